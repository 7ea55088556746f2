//! Permission checks against a caller-supplied granted set.

use std::sync::Arc;

use permgate_core::{ExprResult, parse_literal};

use crate::EngineConfig;
use crate::cache::PatternCache;
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::explain::{self, Explanation};
use crate::expr::Expr;
use crate::parser::parse_expression;
use crate::pattern::{GlobPattern, Shortcut, shortcut};

/// Evaluates permission expressions.
///
/// Holds no granted set: every call receives its own. The only state shared
/// between calls is the compiled-pattern cache, which is internally locked, so
/// one engine can serve any number of threads.
pub struct PermissionEngine {
    config: EngineConfig,
    cache: PatternCache,
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for PermissionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl core::fmt::Debug for PermissionEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PermissionEngine")
            .field("config", &self.config)
            .field("cached_patterns", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl PermissionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            cache: PatternCache::new(config.pattern_cache_capacity),
            config,
            sink: Arc::new(TracingSink),
        }
    }

    /// Route malformed-input reports to `sink` instead of `tracing`.
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &PatternCache {
        &self.cache
    }

    /// Parse with this engine's limits.
    pub fn parse(&self, expression: &str) -> ExprResult<Expr> {
        parse_expression(expression, &self.config)
    }

    /// Decide `expression` against `granted`.
    ///
    /// Accepts a bare permission, a glob, or a full boolean expression.
    /// Malformed input is denied and reported to the diagnostic sink.
    pub fn evaluate_expression<S: AsRef<str>>(&self, expression: &str, granted: &[S]) -> bool {
        if let Some(b) = parse_literal(expression) {
            return b;
        }

        let expr = match self.parse(expression) {
            Ok(expr) => expr,
            Err(err) => {
                self.sink.report(&Diagnostic::syntax(expression, err));
                return false;
            }
        };

        let allowed = self.evaluate(&expr, granted);
        tracing::debug!(expression, allowed, "permission expression evaluated");
        allowed
    }

    /// Evaluate an already parsed expression.
    pub fn evaluate<S: AsRef<str>>(&self, expr: &Expr, granted: &[S]) -> bool {
        expr.evaluate(&mut |pattern: &str| self.matches(pattern, granted))
    }

    /// Syntax-only check; no pattern is ever matched.
    pub fn is_valid_syntax(&self, expression: &str) -> bool {
        self.parse(expression).is_ok()
    }

    /// Test one pattern (no operators) against `granted`.
    ///
    /// `true`/`false` are literals and `*` is unconditionally true, even for
    /// an empty granted set. Anything else is a full-string glob.
    pub fn matches<S: AsRef<str>>(&self, pattern: &str, granted: &[S]) -> bool {
        let trimmed = pattern.trim();
        match shortcut(trimmed) {
            Some(Shortcut::Literal(b)) => b,
            Some(Shortcut::Universal) => true,
            None => self
                .glob(trimmed)
                .is_some_and(|glob| glob.matches_any(granted)),
        }
    }

    /// Granted entries matched by `pattern`, in granted order.
    ///
    /// Uses the same compiled glob as [`matches`](Self::matches), so `*`
    /// returns every entry and `true`/`false` only match entries spelled that
    /// way.
    pub fn matching_permissions<'g, S: AsRef<str>>(
        &self,
        pattern: &str,
        granted: &'g [S],
    ) -> Vec<&'g str> {
        self.glob(pattern.trim())
            .map(|glob| glob.filter(granted))
            .unwrap_or_default()
    }

    /// True if at least one expression holds. Empty input is `false`.
    pub fn has_any<E, S>(&self, expressions: &[E], granted: &[S]) -> bool
    where
        E: AsRef<str>,
        S: AsRef<str>,
    {
        expressions
            .iter()
            .any(|e| self.evaluate_expression(e.as_ref(), granted))
    }

    /// True if every expression holds. Empty input is vacuously `true`.
    pub fn has_all<E, S>(&self, expressions: &[E], granted: &[S]) -> bool
    where
        E: AsRef<str>,
        S: AsRef<str>,
    {
        expressions
            .iter()
            .all(|e| self.evaluate_expression(e.as_ref(), granted))
    }

    /// Explain how `expression` is decided against `granted`.
    pub fn explain<S: AsRef<str>>(&self, expression: &str, granted: &[S]) -> Explanation {
        explain::explain(self, expression, granted)
    }

    pub(crate) fn glob(&self, pattern: &str) -> Option<Arc<GlobPattern>> {
        match self.cache.get_or_compile(pattern) {
            Ok(glob) => Some(glob),
            Err(err) => {
                self.sink.report(&Diagnostic::pattern(pattern, &err));
                None
            }
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn ident() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_.-]{0,12}".prop_filter("not a literal", |s| s != "true" && s != "false")
    }

    fn granted_set() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(ident(), 0..8)
    }

    fn expr_tree() -> impl Strategy<Value = Expr> {
        let leaf = prop_oneof![
            any::<bool>().prop_map(Expr::Literal),
            "[a-d](-[a-d])?(\\.[a-d*?])?".prop_map(Expr::Pattern),
        ];
        leaf.prop_recursive(4, 24, 2, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::and(l, r)),
                (inner.clone(), inner).prop_map(|(l, r)| Expr::or(l, r)),
            ]
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a pattern without glob characters is plain membership.
        #[test]
        fn exact_patterns_are_membership(p in ident(), mut granted in granted_set(), include in any::<bool>()) {
            prop_assume!(!p.contains(['*', '?']));
            if include {
                granted.push(p.clone());
            }
            let engine = PermissionEngine::default();
            prop_assert_eq!(engine.matches(&p, &granted), granted.contains(&p));
            prop_assert_eq!(engine.evaluate_expression(&p, &granted), granted.contains(&p));
        }

        /// Property: `*` holds for every granted set, including the empty one.
        #[test]
        fn universal_wildcard_always_holds(granted in granted_set()) {
            let engine = PermissionEngine::default();
            prop_assert!(engine.matches("*", &granted));
            prop_assert!(engine.evaluate_expression("*", &granted));
        }

        /// Property: operator spelling and spacing never change the result.
        #[test]
        fn operator_spellings_are_equivalent(a in ident(), b in ident(), granted in granted_set()) {
            let engine = PermissionEngine::default();
            for (double, single) in [("||", "|"), ("&&", "&")] {
                let compact = engine.evaluate_expression(&format!("{a}{double}{b}"), &granted);
                let spaced = engine.evaluate_expression(&format!("{a} {single} {b}"), &granted);
                let single_compact = engine.evaluate_expression(&format!("{a}{single}{b}"), &granted);
                prop_assert_eq!(compact, spaced);
                prop_assert_eq!(compact, single_compact);
            }
        }

        /// Property: cache hits, misses and a disabled cache all agree.
        #[test]
        fn cache_never_changes_results(
            patterns in prop::collection::vec("[ab.*?-]{1,6}", 1..12),
            granted in prop::collection::vec("[ab.-]{0,6}", 0..6),
        ) {
            let cached = PermissionEngine::new(EngineConfig {
                pattern_cache_capacity: 3,
                ..EngineConfig::default()
            });
            let cold = PermissionEngine::new(EngineConfig {
                pattern_cache_capacity: 0,
                ..EngineConfig::default()
            });
            for _ in 0..2 {
                for p in &patterns {
                    prop_assert_eq!(cached.matches(p, &granted), cold.matches(p, &granted));
                    prop_assert_eq!(
                        cached.matching_permissions(p, &granted),
                        cold.matching_permissions(p, &granted)
                    );
                }
            }
        }

        /// Property: every rendered tree is valid syntax and parses back to itself.
        #[test]
        fn rendered_trees_reparse(expr in expr_tree(), granted in prop::collection::vec("[a-d](-[a-d])?(\\.[a-d])?", 0..6)) {
            let engine = PermissionEngine::default();
            let text = expr.to_string();
            prop_assert!(engine.is_valid_syntax(&text));
            let reparsed = engine.parse(&text).unwrap();
            prop_assert_eq!(&reparsed, &expr);
            prop_assert_eq!(
                engine.evaluate_expression(&text, &granted),
                engine.evaluate(&expr, &granted)
            );
        }
    }
}
