//! Parsed permission expressions.

use core::fmt;
use core::str::FromStr;

use permgate_core::SyntaxError;

/// Boolean expression over permission patterns.
///
/// Built once per call and immutable afterwards. It never holds a reference
/// to a granted set; leaves are resolved at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `true` / `false`.
    Literal(bool),
    /// Exact permission name or glob.
    Pattern(String),
    /// Both sides must hold.
    And(Box<Expr>, Box<Expr>),
    /// At least one side must hold.
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn pattern(text: impl Into<String>) -> Self {
        Self::Pattern(text.into())
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    /// Evaluate with `leaf` deciding each pattern.
    ///
    /// `&&` and `||` short-circuit: the right side is not visited once the
    /// left side decides the result, so `leaf` sees only the patterns that
    /// mattered.
    pub fn evaluate<F>(&self, leaf: &mut F) -> bool
    where
        F: FnMut(&str) -> bool,
    {
        match self {
            Expr::Literal(b) => *b,
            Expr::Pattern(p) => leaf(p),
            Expr::And(l, r) => l.evaluate(leaf) && r.evaluate(leaf),
            Expr::Or(l, r) => l.evaluate(leaf) || r.evaluate(leaf),
        }
    }

    /// Pattern leaves in source order (duplicates kept).
    pub fn patterns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_patterns(&mut out);
        out
    }

    fn collect_patterns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Pattern(p) => out.push(p),
            Expr::And(l, r) | Expr::Or(l, r) => {
                l.collect_patterns(out);
                r.collect_patterns(out);
            }
        }
    }

    fn is_binary(&self) -> bool {
        matches!(self, Expr::And(..) | Expr::Or(..))
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_binary() {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

/// Canonical, fully parenthesized rendering. Parsing it yields the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(b) => write!(f, "{b}"),
            Expr::Pattern(p) => f.write_str(p),
            Expr::And(l, r) => {
                l.fmt_operand(f)?;
                f.write_str(" && ")?;
                r.fmt_operand(f)
            }
            Expr::Or(l, r) => {
                l.fmt_operand(f)?;
                f.write_str(" || ")?;
                r.fmt_operand(f)
            }
        }
    }
}

impl FromStr for Expr {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_expression(s, &crate::EngineConfig::default())
    }
}
