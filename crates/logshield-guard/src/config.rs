//! Configuration for the guard

use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GuardConfig {
    /// Signature detection configuration
    pub detector: DetectorConfig,
    /// Audit trail configuration
    pub audit: AuditConfig,
}

/// Signature detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Enable signature scanning; when disabled every input classifies safe
    pub enabled: bool,
    /// Extra literal markers checked case-insensitively alongside `jndi:`
    pub extra_markers: Vec<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            extra_markers: vec![],
        }
    }
}

/// Audit trail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable the audit trail
    pub enabled: bool,
    /// JSON-lines trail path; `None` keeps the trail in tracing only
    pub log_file: Option<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_file: None,
        }
    }
}
