//! Operator-facing diagnostics.
//!
//! Pipelines never print. They hand every diagnostic to a [`ReportSink`],
//! which the binary backs with `tracing` and tests back with a buffer.

use tracing::{debug, info, warn};

/// How much attention a diagnostic needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warning,
}

/// A single diagnostic, optionally tied to an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub file: Option<String>,
    pub message: String,
}

/// Destination for pipeline diagnostics.
pub trait ReportSink {
    fn record(&mut self, diagnostic: Diagnostic);

    fn info(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.record(Diagnostic {
            severity: Severity::Info,
            file: None,
            message: message.into(),
        });
    }

    /// Note that a file is being analysed.
    fn file_started(&mut self, file: &str)
    where
        Self: Sized,
    {
        self.record(Diagnostic {
            severity: Severity::Debug,
            file: Some(file.to_string()),
            message: "analysing".to_string(),
        });
    }

    /// Note that a file was left out of the results.
    fn file_skipped(&mut self, file: &str, reason: impl Into<String>)
    where
        Self: Sized,
    {
        self.record(Diagnostic {
            severity: Severity::Warning,
            file: Some(file.to_string()),
            message: reason.into(),
        });
    }
}

/// Forwards diagnostics to the global `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn record(&mut self, diagnostic: Diagnostic) {
        let file = diagnostic.file.as_deref().unwrap_or("-");
        match diagnostic.severity {
            Severity::Debug => debug!(file, "{}", diagnostic.message),
            Severity::Info => info!("{}", diagnostic.message),
            Severity::Warning => warn!(file, "{}", diagnostic.message),
        }
    }
}

/// Keeps diagnostics in memory.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All warnings, in the order they were raised.
    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .collect()
    }
}

impl ReportSink for CollectingSink {
    fn record(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

impl<S: ReportSink> ReportSink for &mut S {
    fn record(&mut self, diagnostic: Diagnostic) {
        (**self).record(diagnostic);
    }
}
