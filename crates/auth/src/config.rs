//! Engine configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ENV_PATTERN_CACHE_CAPACITY: &str = "PERMGATE_PATTERN_CACHE_CAPACITY";
pub const ENV_MAX_EXPRESSION_LEN: &str = "PERMGATE_MAX_EXPRESSION_LEN";
pub const ENV_MAX_NESTING_DEPTH: &str = "PERMGATE_MAX_NESTING_DEPTH";

/// Tunables for a [`PermissionEngine`](crate::PermissionEngine).
///
/// None of these change what a well-formed expression evaluates to. The limits
/// only decide which oversized input is rejected (and therefore denied).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Compiled globs kept in memory. `0` disables memoization.
    pub pattern_cache_capacity: usize,

    /// Longest accepted raw expression, in bytes.
    pub max_expression_len: usize,

    /// Deepest accepted parenthesis nesting.
    pub max_nesting_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pattern_cache_capacity: 256,
            max_expression_len: 4096,
            max_nesting_depth: crate::parser::DEFAULT_MAX_DEPTH,
        }
    }
}

impl EngineConfig {
    /// Read overrides from `PERMGATE_*` environment variables.
    ///
    /// Unset variables keep their defaults; unparsable values are logged and
    /// ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            pattern_cache_capacity: read_var(
                &lookup,
                ENV_PATTERN_CACHE_CAPACITY,
                defaults.pattern_cache_capacity,
            ),
            max_expression_len: read_var(
                &lookup,
                ENV_MAX_EXPRESSION_LEN,
                defaults.max_expression_len,
            ),
            max_nesting_depth: read_var(&lookup, ENV_MAX_NESTING_DEPTH, defaults.max_nesting_depth),
        }
    }

    /// Load from a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn read_var<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + core::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, %default, "ignoring invalid engine setting");
            default
        }),
    }
}
