//! Side channel for malformed-input reports.
//!
//! Boolean entry points never surface errors to callers; they deny and report
//! here instead.

use serde::Serialize;

use permgate_core::SyntaxError;

/// One report about an expression or pattern that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub expression: String,
    #[serde(skip)]
    pub error: Option<SyntaxError>,
}

impl Diagnostic {
    pub fn syntax(expression: &str, error: SyntaxError) -> Self {
        Self {
            message: format!("invalid permission expression: {error}"),
            expression: expression.to_string(),
            error: Some(error),
        }
    }

    pub fn pattern(pattern: &str, error: &regex::Error) -> Self {
        Self {
            message: format!("permission pattern could not be compiled: {error}"),
            expression: pattern.to_string(),
            error: None,
        }
    }
}

/// Receiver of [`Diagnostic`]s.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    fn report(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// Default sink: a `warn` event per diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        tracing::warn!(
            expression = %diagnostic.expression,
            error = %diagnostic.message,
            "permission check denied: malformed input"
        );
    }
}
