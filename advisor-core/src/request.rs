//! Transport client abstraction

use async_trait::async_trait;

use crate::Result;

/// A client carrying one outstanding query to the advisor service.
///
/// The session manager never issues a second query before the previous
/// one resolved, and implementations do no retrying or queuing of their
/// own: one call, one outbound request.
#[async_trait]
pub trait RequestClient: Send + Sync {
    /// Send `prompt` and return the reply content
    async fn send_query(&self, prompt: &str) -> Result<String>;
}
