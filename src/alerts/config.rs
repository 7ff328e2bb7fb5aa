//! Alert target configuration

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Notification target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotifyTarget {
    /// Log to tracing
    Log,
    /// HTTP webhook
    Webhook {
        url: String,
        #[serde(default)]
        headers: HashMap<String, String>,
    },
}

impl NotifyTarget {
    pub fn webhook(url: impl Into<String>) -> Self {
        NotifyTarget::Webhook {
            url: url.into(),
            headers: HashMap::new(),
        }
    }
}
