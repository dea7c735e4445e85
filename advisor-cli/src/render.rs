//! Terminal rendering for conversation and detection output

use chrono::Local;
use console::style;

use advisor_client::DetectionReport;
use advisor_core::format::{segments, Segment};
use advisor_core::session::{Author, Message};

/// Label shown for replies from the service
const AGENT_LABEL: &str = "AI Advisor";

/// Paints conversation messages under the session's display name
pub struct Renderer {
    username: String,
}

impl Renderer {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// Print one message with its author label and wall-clock time
    pub fn message(&self, message: &Message) {
        let label = match message.author {
            Author::User => style(self.username.as_str()).bold().cyan(),
            Author::Agent => style(AGENT_LABEL).bold().green(),
        };
        let time = message.timestamp.with_timezone(&Local).format("%H:%M:%S");
        println!("{} {}", label, style(time).dim());
        content(&message.content);
        println!();
    }
}

/// Print message content with fenced code blocks set off from the prose
pub fn content(text: &str) {
    for segment in segments(text) {
        match segment {
            Segment::Plain(prose) => {
                let prose = prose.trim();
                if !prose.is_empty() {
                    println!("{}", prose);
                }
            }
            Segment::Code { language, body } => {
                println!("{}", style(format!("[{}]", language)).yellow());
                for line in body.lines() {
                    println!("  {}", style(line).dim());
                }
            }
        }
    }
}

/// Print the red banner for a failed request
pub fn error_banner(detail: &str) {
    println!("{} {}", style("✗").red().bold(), style(detail).red());
}

/// Print a detection report
pub fn report(report: &DetectionReport) {
    let headline = format!("{:.0}% AI probability", report.probability);
    let headline = if report.probability >= 75.0 {
        style(headline).red().bold()
    } else if report.probability >= 45.0 {
        style(headline).yellow().bold()
    } else {
        style(headline).green().bold()
    };
    println!("{}", headline);

    if let Some(metrics) = &report.metrics {
        println!("  Perplexity:  {:.1}", metrics.perplexity);
        println!("  Burstiness:  {:.1}", metrics.burstiness);
        println!("  Consistency: {:.1}", metrics.consistency);
    }

    if !report.patterns.is_empty() {
        println!(
            "\n{} ({} found):",
            style("Detection patterns").bold(),
            report.patterns.len()
        );
        for pattern in &report.patterns {
            println!("  - {}", pattern);
        }
    }

    if !report.analysis.is_empty() {
        println!("\n{}", style("Analysis:").bold());
        println!("{}", report.analysis);
    }
}
