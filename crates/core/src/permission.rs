use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// The universal wildcard pattern: always visible, whatever is granted.
pub const WILDCARD: &str = "*";

/// Granted permission name.
///
/// Permissions are opaque, case-sensitive strings (e.g. `"users.create"`,
/// `"user-profile.edit"`). Granted sets are passed to the engine as slices of
/// anything that is `AsRef<str>`, so `Vec<Permission>` works as well as
/// `Vec<String>` or `&[&str]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the name itself contains glob metacharacters.
    ///
    /// Granted entries are always compared literally; this only flags names
    /// that look like they were meant as patterns.
    pub fn is_pattern_like(&self) -> bool {
        self.0.contains(['*', '?'])
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Permission {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Interpret `text` as a boolean literal.
///
/// Surrounding whitespace is ignored; the comparison is case-sensitive, so
/// `"True"` is an ordinary permission name.
pub fn parse_literal(text: &str) -> Option<bool> {
    match text.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// True when `text` is exactly the universal wildcard after trimming.
pub fn is_wildcard(text: &str) -> bool {
    text.trim() == WILDCARD
}
