//! Runtime configuration
//!
//! Environment variables:
//! - VITALWATCH_PATIENTS_FILE: JSON-lines patient store (default: patients.jsonl)
//! - VITALWATCH_WEBHOOK_URL: Post alerts to this URL (default: unset)
//! - VITALWATCH_LOG_ALERTS: Also write alerts to the log (default: true)

use std::path::PathBuf;

use crate::alerts::NotifyTarget;

/// Monitor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    pub patients_file: PathBuf,
    pub targets: Vec<NotifyTarget>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            patients_file: PathBuf::from("patients.jsonl"),
            targets: vec![NotifyTarget::Log],
        }
    }
}

impl MonitorConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable source
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let patients_file = var("VITALWATCH_PATIENTS_FILE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("patients.jsonl"));

        let log_alerts = var("VITALWATCH_LOG_ALERTS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        let mut targets = Vec::new();
        if log_alerts {
            targets.push(NotifyTarget::Log);
        }
        if let Some(url) = var("VITALWATCH_WEBHOOK_URL").filter(|u| !u.trim().is_empty()) {
            targets.push(NotifyTarget::webhook(url.trim()));
        }

        Self {
            patients_file,
            targets,
        }
    }

    pub fn with_patients_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.patients_file = path.into();
        self
    }
}
