//! Alert sinks

use std::collections::HashMap;
use std::sync::Arc;

use super::config::NotifyTarget;
use super::{AlertSink, SinkError};

/// Sink that writes alerts to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl AlertSink for LogSink {
    fn send(&self, message: &str) -> Result<(), SinkError> {
        tracing::warn!("Alert triggered: {}", message);
        Ok(())
    }
}

/// Sink that posts alerts to an HTTP endpoint
pub struct WebhookSink {
    client: reqwest::blocking::Client,
    url: String,
    headers: HashMap<String, String>,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>, headers: HashMap<String, String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            url: url.into(),
            headers,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AlertSink for WebhookSink {
    fn send(&self, message: &str) -> Result<(), SinkError> {
        let payload = serde_json::json!({
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let mut request = self.client.post(&self.url).json(&payload);

        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        let response = request
            .send()
            .map_err(|e| SinkError::Webhook(format!("Failed to send webhook: {}", e)))?;

        if !response.status().is_success() {
            return Err(SinkError::Webhook(format!(
                "Webhook returned status {}",
                response.status()
            )));
        }

        tracing::debug!(url = %self.url, "Webhook notification sent");

        Ok(())
    }
}

/// Sink that delivers every alert to all configured targets
///
/// Every target is attempted even if an earlier one fails.
pub struct Notifier {
    sinks: Vec<Arc<dyn AlertSink>>,
}

impl Notifier {
    /// Create a notifier with no targets
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Create a notifier from target configuration
    pub fn from_targets(targets: &[NotifyTarget]) -> Self {
        let sinks = targets
            .iter()
            .map(|target| -> Arc<dyn AlertSink> {
                match target {
                    NotifyTarget::Log => Arc::new(LogSink),
                    NotifyTarget::Webhook { url, headers } => {
                        Arc::new(WebhookSink::new(url.clone(), headers.clone()))
                    }
                }
            })
            .collect();
        Self { sinks }
    }

    /// Add a sink
    pub fn with_sink(mut self, sink: Arc<dyn AlertSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertSink for Notifier {
    fn send(&self, message: &str) -> Result<(), SinkError> {
        let mut errors = Vec::new();

        for sink in &self.sinks {
            if let Err(e) = sink.send(message) {
                tracing::error!(error = %e, "Failed to send notification");
                errors.push(e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SinkError::Multiple(errors))
        }
    }
}
