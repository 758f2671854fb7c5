//! Sinks for the conflict diagnostic channel.
//!
//! The parsers report grammar conflicts (`Grammar is not LL(k)`, `Grammar is not LR(0)`,
//! `Grammar is not LR(k)`) as plain text lines through an [IDiagnosticSink]. The channel is
//! advisory only; the parse verdict stays deterministic through fixed tie-breaks.
use crate::IDiagnosticSink;
use std::cell::RefCell;

/// The default sink: every line goes to standard output.
pub struct StdoutSink;

impl IDiagnosticSink for StdoutSink {
    fn report(&self, line: &str) {
        println!("{}", line);
    }
}

/// A sink collecting the reported lines, so that callers can capture and count conflicts.
pub struct CollectorSink {
    lines: RefCell<Vec<String>>,
}

impl CollectorSink {
    pub fn new() -> Self {
        Self {
            lines: RefCell::new(Vec::new()),
        }
    }

    /// The lines reported so far, in order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Whether some reported line contains `pattern`.
    pub fn contains(&self, pattern: &str) -> bool {
        self.lines.borrow().iter().any(|line| line.contains(pattern))
    }
}

impl Default for CollectorSink {
    fn default() -> Self {
        Self::new()
    }
}

impl IDiagnosticSink for CollectorSink {
    fn report(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}
