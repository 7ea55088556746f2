//! Glob matching of single permission patterns.
//!
//! `*` matches any run of characters (including none, and including `.`),
//! `?` matches exactly one character, everything else matches itself. A match
//! always covers the whole permission name.

use regex::Regex;

use permgate_core::{is_wildcard, parse_literal};

/// A compiled, anchored glob.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    /// Compile `pattern` as written (no trimming, no literal handling).
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&glob_to_regex(pattern))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, permission: &str) -> bool {
        self.regex.is_match(permission)
    }

    /// True if any granted entry matches.
    pub fn matches_any<S: AsRef<str>>(&self, granted: &[S]) -> bool {
        granted.iter().any(|p| self.is_match(p.as_ref()))
    }

    /// Granted entries that match, in their original order.
    pub fn filter<'g, S: AsRef<str>>(&self, granted: &'g [S]) -> Vec<&'g str> {
        granted
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| self.is_match(p))
            .collect()
    }
}

/// Translate a glob into an anchored regex source.
fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    // `(?s)` lets `.` cross newlines: a wildcard means any character.
    out.push_str("(?s)^");

    let mut literal = String::new();
    for c in pattern.chars() {
        match c {
            '*' | '?' => {
                out.push_str(&regex::escape(&literal));
                literal.clear();
                out.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    out.push_str(&regex::escape(&literal));
    out.push('$');
    out
}

/// What a trimmed pattern means before any glob compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shortcut {
    /// `true` / `false`.
    Literal(bool),
    /// `*`: unconditionally visible.
    Universal,
}

pub(crate) fn shortcut(trimmed: &str) -> Option<Shortcut> {
    if let Some(b) = parse_literal(trimmed) {
        Some(Shortcut::Literal(b))
    } else if is_wildcard(trimmed) {
        Some(Shortcut::Universal)
    } else {
        None
    }
}
