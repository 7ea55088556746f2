//! Decision explanation (audit trail).

use serde::Serialize;

use permgate_core::parse_literal;

use crate::PermissionEngine;
use crate::expr::Expr;
use crate::normalize::normalize;

/// Detailed account of how an expression was decided.
///
/// `granted` always agrees with
/// [`PermissionEngine::evaluate_expression`] for the same inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    /// The expression as supplied.
    pub expression: String,

    /// The expression after operator normalization.
    pub normalized: String,

    /// Fully parenthesized form, when the expression parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,

    /// Final decision.
    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// Every pattern leaf, in source order.
    pub leaves: Vec<LeafOutcome>,

    /// Why the expression was rejected, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax_error: Option<String>,
}

/// What happened to one pattern leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafOutcome {
    pub pattern: String,

    /// False when short-circuiting skipped the leaf.
    pub evaluated: bool,

    /// Leaf result; `None` when not evaluated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<bool>,

    /// Granted entries the pattern matched (empty when not evaluated).
    pub matched: Vec<String>,
}

pub(crate) fn explain<S: AsRef<str>>(
    engine: &PermissionEngine,
    expression: &str,
    granted: &[S],
) -> Explanation {
    let normalized = normalize(expression);

    if let Some(b) = parse_literal(expression) {
        return Explanation {
            expression: expression.to_string(),
            normalized,
            canonical: Some(b.to_string()),
            granted: b,
            reason: format!("Expression is the literal '{b}'"),
            leaves: Vec::new(),
            syntax_error: None,
        };
    }

    let expr = match engine.parse(expression) {
        Ok(expr) => expr,
        Err(err) => {
            return Explanation {
                expression: expression.to_string(),
                normalized,
                canonical: None,
                granted: false,
                reason: "Malformed expression; access is denied".to_string(),
                leaves: Vec::new(),
                syntax_error: Some(err.to_string()),
            };
        }
    };

    let mut leaves = Vec::new();
    let granted_result = walk(engine, &expr, granted, true, &mut leaves);

    let reason = if granted_result {
        let satisfied: Vec<&str> = leaves
            .iter()
            .filter(|l| l.result == Some(true))
            .map(|l| l.pattern.as_str())
            .collect();
        if satisfied.is_empty() {
            "Expression holds through its literal terms".to_string()
        } else {
            format!("Expression holds; satisfied patterns: {satisfied:?}")
        }
    } else {
        let missing: Vec<&str> = leaves
            .iter()
            .filter(|l| l.result == Some(false))
            .map(|l| l.pattern.as_str())
            .collect();
        if missing.is_empty() {
            "Expression is false through its literal terms".to_string()
        } else {
            format!("Expression does not hold; unmatched patterns: {missing:?}")
        }
    };

    Explanation {
        expression: expression.to_string(),
        normalized,
        canonical: Some(expr.to_string()),
        granted: granted_result,
        reason,
        leaves,
        syntax_error: None,
    }
}

/// Short-circuiting walk that also records skipped leaves.
///
/// When `active` is false the subtree is only recorded; its return value is
/// ignored by the caller.
fn walk<S: AsRef<str>>(
    engine: &PermissionEngine,
    expr: &Expr,
    granted: &[S],
    active: bool,
    leaves: &mut Vec<LeafOutcome>,
) -> bool {
    match expr {
        Expr::Literal(b) => *b,
        Expr::Pattern(p) if active => {
            let result = engine.matches(p, granted);
            let matched = engine
                .matching_permissions(p, granted)
                .into_iter()
                .map(str::to_string)
                .collect();
            leaves.push(LeafOutcome {
                pattern: p.clone(),
                evaluated: true,
                result: Some(result),
                matched,
            });
            result
        }
        Expr::Pattern(p) => {
            leaves.push(LeafOutcome {
                pattern: p.clone(),
                evaluated: false,
                result: None,
                matched: Vec::new(),
            });
            false
        }
        Expr::And(l, r) => {
            let left = walk(engine, l, granted, active, leaves);
            let right = walk(engine, r, granted, active && left, leaves);
            left && right
        }
        Expr::Or(l, r) => {
            let left = walk(engine, l, granted, active, leaves);
            let right = walk(engine, r, granted, active && !left, leaves);
            left || right
        }
    }
}
