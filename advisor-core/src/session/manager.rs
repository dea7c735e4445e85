//! Session manager driving the conversation round trip

use tracing::{debug, warn};

use super::storage::HistoryStore;
use super::store::Session;
use crate::request::RequestClient;
use crate::Result;

/// Owns the session and its storage and drives the request lifecycle.
///
/// The manager is the sole mutator of the session: every operation that
/// changes the history persists it before returning.
pub struct SessionManager {
    session: Session,
    store: Box<dyn HistoryStore>,
}

impl SessionManager {
    /// Create a manager over the given store, restoring stored history
    pub fn new(store: Box<dyn HistoryStore>) -> Self {
        let session = Session::with_history(store.load());
        debug!("Restored {} stored messages", session.messages().len());
        Self { session, store }
    }

    /// Read-only view of the current session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run one question/answer round trip and return the reply content.
    ///
    /// The question is persisted before the request goes out, so an
    /// interrupted run still shows it on the next start. A failed request
    /// keeps the question in the history and parks the failure detail in
    /// the session status.
    pub async fn ask(&mut self, client: &dyn RequestClient, text: &str) -> Result<String> {
        self.session.submit(text)?;
        if let Err(e) = self.save() {
            self.session.fail(e.to_string())?;
            return Err(e);
        }

        debug!("Dispatching prompt ({} chars)", text.len());
        match client.send_query(text).await {
            Ok(content) => {
                self.session.resolve(content.clone())?;
                self.save()?;
                Ok(content)
            }
            Err(e) => {
                self.session.fail(e.to_string())?;
                if let Err(save_err) = self.save() {
                    warn!("Failed to persist session after request failure: {}", save_err);
                }
                Err(e)
            }
        }
    }

    /// Clear the conversation and purge the stored record
    pub fn clear(&mut self) -> Result<()> {
        self.session.clear();
        self.store.clear()
    }

    fn save(&self) -> Result<()> {
        self.store.save(self.session.messages())
    }
}
