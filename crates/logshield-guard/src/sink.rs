//! The logging sink collaborator
//!
//! The guard never reaches for a global logger. A sink is injected at
//! construction, so tests can substitute [`RecordingSink`] and assert the
//! exact calls (severity, template, raw text) without a real backend.

use crate::error::Result;
use std::sync::Mutex;
use tracing::{error, warn};

/// Severity of a sink call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Warning-level entry
    Warning,
    /// Error-level entry
    Error,
}

/// Downstream recorder of log entries.
///
/// `raw` is the untrusted text, passed as a separate argument so the sink
/// receives it verbatim rather than interpolated into the message.
pub trait LogSink: Send + Sync {
    /// Record an entry at warning severity
    fn warn(&self, template: &str, raw: &str) -> Result<()>;

    /// Record an entry at error severity
    fn error(&self, template: &str, raw: &str) -> Result<()>;
}

/// Production sink routing to the `tracing` stack
#[derive(Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn warn(&self, template: &str, raw: &str) -> Result<()> {
        warn!(input = %raw, "{}", template);
        Ok(())
    }

    fn error(&self, template: &str, raw: &str) -> Result<()> {
        error!(input = %raw, "{}", template);
        Ok(())
    }
}

/// One call captured by [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkCall {
    /// Severity the entry was recorded at
    pub severity: Severity,
    /// Message template
    pub template: String,
    /// The untrusted text, verbatim
    pub raw: String,
}

/// Capturing sink for tests; stores every call in arrival order
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<SinkCall>>,
}

impl RecordingSink {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded calls
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, severity: Severity, template: &str, raw: &str) {
        self.calls.lock().unwrap().push(SinkCall {
            severity,
            template: template.to_string(),
            raw: raw.to_string(),
        });
    }
}

impl LogSink for RecordingSink {
    fn warn(&self, template: &str, raw: &str) -> Result<()> {
        self.push(Severity::Warning, template, raw);
        Ok(())
    }

    fn error(&self, template: &str, raw: &str) -> Result<()> {
        self.push(Severity::Error, template, raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_captures_in_order() {
        let sink = RecordingSink::new();
        sink.warn("blocked", "${jndi:x}").unwrap();
        sink.error("user input", "hello").unwrap();

        let calls = sink.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].severity, Severity::Warning);
        assert_eq!(calls[0].raw, "${jndi:x}");
        assert_eq!(calls[1].severity, Severity::Error);
        assert_eq!(calls[1].template, "user input");
    }

    #[test]
    fn tracing_sink_never_faults() {
        let sink = TracingSink;
        assert!(sink.warn("blocked", "x").is_ok());
        assert!(sink.error("user input", "x").is_ok());
    }
}
