//! Alert delivery
//!
//! [`AlertSink`] is the one-way channel the evaluator reports abnormal
//! readings through. Concrete sinks log, post to a webhook, or fan out to
//! a configured list of targets.

pub mod config;
pub mod notifier;

pub use config::NotifyTarget;
pub use notifier::{LogSink, Notifier, WebhookSink};

/// Destination for alert messages
pub trait AlertSink: Send + Sync {
    /// Deliver a single message
    fn send(&self, message: &str) -> Result<(), SinkError>;
}

/// Alert delivery errors
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Webhook error: {0}")]
    Webhook(String),

    #[error("Multiple notification failures: {0:?}")]
    Multiple(Vec<SinkError>),
}
