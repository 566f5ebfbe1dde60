//! Audit trail of guard decisions
//!
//! A structured record per classification, separate from the sink contract:
//! the sink's warning entry stays the single warning-severity record for a
//! blocked input, while this trail emits at info level and, optionally, to
//! a JSON-lines file.

use crate::config::AuditConfig;
use crate::types::{AuditEntry, AuditOutcome};
use tracing::info;

/// Audit logger
pub struct AuditLogger {
    config: AuditConfig,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    /// Record one decision.
    ///
    /// Trail writes are best-effort: a failed file append is dropped and
    /// never surfaced to the request.
    pub fn record(&self, entry: &AuditEntry) {
        if !self.config.enabled {
            return;
        }

        match entry.outcome {
            AuditOutcome::Blocked { threat } => info!(
                request_id = %entry.context.request_id,
                threat = %threat,
                raw = %entry.raw,
                "input blocked"
            ),
            AuditOutcome::Forwarded => info!(
                request_id = %entry.context.request_id,
                raw = %entry.raw,
                "input forwarded"
            ),
        }

        if let Some(ref path) = self.config.log_file {
            if let Ok(json) = serde_json::to_string(entry) {
                let _ = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .and_then(|mut f| {
                        use std::io::Write;
                        writeln!(f, "{json}")
                    });
            }
        }
    }
}
