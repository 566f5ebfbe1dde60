//! Core types for the guard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Verdict produced for one untrusted input value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Input carries no known lookup signature
    Safe,
    /// Input matched a lookup signature and must not reach the sink
    Blocked(ThreatKind),
}

impl Classification {
    /// Check if the input was blocked
    pub fn is_blocked(&self) -> bool {
        matches!(self, Classification::Blocked(_))
    }

    /// The signature that fired, if any
    pub fn threat(&self) -> Option<ThreatKind> {
        match self {
            Classification::Blocked(threat) => Some(*threat),
            Classification::Safe => None,
        }
    }
}

/// Which signature classified the input as blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreatKind {
    /// Case-insensitive literal marker (`jndi:` or a configured extra)
    LiteralMarker,
    /// `${` ... `}` lookup-expression shape
    LookupExpression,
}

impl std::fmt::Display for ThreatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThreatKind::LiteralMarker => write!(f, "literal marker"),
            ThreatKind::LookupExpression => write!(f, "lookup expression"),
        }
    }
}

/// Per-request context attached to audit entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Unique request ID
    pub request_id: Uuid,
    /// Arrival timestamp
    pub timestamp: DateTime<Utc>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            timestamp: Utc::now(),
        }
    }
}

impl RequestContext {
    /// Create a context with a fresh request ID
    pub fn new() -> Self {
        Self::default()
    }
}

/// One audit record of a guard decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Request context
    pub context: RequestContext,
    /// What was decided
    pub outcome: AuditOutcome,
    /// The untrusted text as received (empty when absent)
    pub raw: String,
}

/// Decision recorded for one input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditOutcome {
    /// Input was forwarded to the sink
    Forwarded,
    /// Input was withheld from the sink
    Blocked {
        /// The signature that fired
        threat: ThreatKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_helpers() {
        assert!(!Classification::Safe.is_blocked());
        assert!(Classification::Blocked(ThreatKind::LiteralMarker).is_blocked());
        assert_eq!(Classification::Safe.threat(), None);
        assert_eq!(
            Classification::Blocked(ThreatKind::LookupExpression).threat(),
            Some(ThreatKind::LookupExpression)
        );
    }

    #[test]
    fn context_ids_are_unique() {
        let a = RequestContext::new();
        let b = RequestContext::new();
        assert_ne!(a.request_id, b.request_id);
    }
}
