//! `permgate-auth` — declarative permission expressions.
//!
//! Decides strings such as `(admin.* || moderator.*) && active.user` against a
//! caller-supplied list of granted permissions. The pipeline is
//! normalize → tokenize → parse → evaluate, with the granted list injected
//! only at evaluation time.
//!
//! This crate is intentionally decoupled from sessions, UI and storage: it
//! never fetches, stores or mutates a granted set.
//!
//! ```
//! let granted = ["admin.users", "active.user"];
//! assert!(permgate_auth::evaluate_expression("(admin.* | moderator.*) & active.user", &granted));
//! assert!(!permgate_auth::evaluate_expression("a &&", &granted));
//! assert!(!permgate_auth::is_valid_syntax("a &&"));
//! ```

use std::sync::OnceLock;

pub mod cache;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod explain;
pub mod expr;
pub mod normalize;
pub mod parser;
pub mod pattern;
pub mod token;

pub use cache::PatternCache;
pub use config::EngineConfig;
pub use diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
pub use engine::PermissionEngine;
pub use explain::{Explanation, LeafOutcome};
pub use expr::Expr;
pub use normalize::normalize;
pub use parser::{parse, parse_expression};
pub use pattern::GlobPattern;
pub use permgate_core::{ExprResult, Permission, SyntaxError};
pub use token::{Token, TokenKind, tokenize};

/// Process-wide engine behind the free functions, configured from the
/// environment on first use.
pub fn global() -> &'static PermissionEngine {
    static ENGINE: OnceLock<PermissionEngine> = OnceLock::new();
    ENGINE.get_or_init(|| PermissionEngine::new(EngineConfig::from_env()))
}

/// See [`PermissionEngine::evaluate_expression`].
pub fn evaluate_expression<S: AsRef<str>>(expression: &str, granted: &[S]) -> bool {
    global().evaluate_expression(expression, granted)
}

/// See [`PermissionEngine::is_valid_syntax`].
pub fn is_valid_syntax(expression: &str) -> bool {
    global().is_valid_syntax(expression)
}

/// See [`PermissionEngine::matches`].
pub fn matches<S: AsRef<str>>(pattern: &str, granted: &[S]) -> bool {
    global().matches(pattern, granted)
}

/// See [`PermissionEngine::matching_permissions`].
pub fn matching_permissions<'g, S: AsRef<str>>(pattern: &str, granted: &'g [S]) -> Vec<&'g str> {
    global().matching_permissions(pattern, granted)
}

/// See [`PermissionEngine::has_any`].
pub fn has_any<E: AsRef<str>, S: AsRef<str>>(expressions: &[E], granted: &[S]) -> bool {
    global().has_any(expressions, granted)
}

/// See [`PermissionEngine::has_all`].
pub fn has_all<E: AsRef<str>, S: AsRef<str>>(expressions: &[E], granted: &[S]) -> bool {
    global().has_all(expressions, granted)
}

/// See [`PermissionEngine::explain`].
pub fn explain<S: AsRef<str>>(expression: &str, granted: &[S]) -> Explanation {
    global().explain(expression, granted)
}
