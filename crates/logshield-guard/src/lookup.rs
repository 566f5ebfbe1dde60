//! Lookup-expression detection
//!
//! Two signatures, checked in order, each sufficient to block on its own:
//! the literal `jndi:` scheme marker, then the `${...}` lookup shape. The
//! marker catches the known exploit family directly; the shape catches
//! lookups that never name a scheme, like `${env:SECRET}`.

use crate::config::DetectorConfig;
use crate::types::ThreatKind;
use regex::Regex;

/// Literal marker carried by the known exploit family
const JNDI_MARKER: &str = "jndi:";

/// Scans untrusted text for lookup-expression signatures
pub struct LookupDetector {
    config: DetectorConfig,
    expression: Regex,
}

impl LookupDetector {
    /// Create a detector with the given configuration
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            // Open `${`, eventually a `}`, anything between. No nesting or
            // escape analysis; see the tests for what falls outside.
            expression: Regex::new(r"\$\{.*\}").unwrap(),
        }
    }

    /// Scan text for either signature. The literal marker is checked before
    /// the expression shape; the first hit wins.
    pub fn scan(&self, text: &str) -> Option<ThreatKind> {
        if !self.config.enabled {
            return None;
        }

        let lower = text.to_lowercase();
        if lower.contains(JNDI_MARKER) {
            return Some(ThreatKind::LiteralMarker);
        }
        for marker in &self.config.extra_markers {
            if lower.contains(&marker.to_lowercase()) {
                return Some(ThreatKind::LiteralMarker);
            }
        }

        if self.expression.is_match(text) {
            return Some(ThreatKind::LookupExpression);
        }

        None
    }
}
