use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use permgate_auth::{EngineConfig, PermissionEngine};

use crate::cli::Command;

/// Build the engine from `--config` when given, otherwise from the environment.
pub fn load_engine(config: Option<&Path>) -> Result<PermissionEngine> {
    let config = match config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            EngineConfig::from_json(&raw)
                .with_context(|| format!("invalid engine config in {}", path.display()))?
        }
        None => EngineConfig::from_env(),
    };
    tracing::debug!(?config, "engine configured");
    Ok(PermissionEngine::new(config))
}

/// Run one command, writing its output to `out`.
///
/// Returns whether the command succeeded in the exit-code sense: granted,
/// valid, or at least one match.
pub fn run(engine: &PermissionEngine, command: &Command, out: &mut impl Write) -> Result<bool> {
    match command {
        Command::Check {
            expression,
            granted,
        } => {
            let allowed = engine.evaluate_expression(expression, &granted.permissions);
            writeln!(out, "{}", if allowed { "granted" } else { "denied" })?;
            Ok(allowed)
        }
        Command::Validate { expression } => match engine.parse(expression) {
            Ok(expr) => {
                writeln!(out, "valid: {expr}")?;
                Ok(true)
            }
            Err(err) => {
                writeln!(out, "invalid: {err}")?;
                Ok(false)
            }
        },
        Command::Matches { pattern, granted } => {
            let matched = engine.matching_permissions(pattern, &granted.permissions);
            for permission in &matched {
                writeln!(out, "{permission}")?;
            }
            Ok(!matched.is_empty())
        }
        Command::Explain {
            expression,
            granted,
        } => {
            let explanation = engine.explain(expression, &granted.permissions);
            serde_json::to_writer_pretty(&mut *out, &explanation)
                .context("failed to write explanation")?;
            writeln!(out)?;
            Ok(explanation.granted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Granted;

    fn grant(perms: &[&str]) -> Granted {
        Granted {
            permissions: perms.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn run_to_string(command: Command) -> (bool, String) {
        let engine = PermissionEngine::default();
        let mut out = Vec::new();
        let ok = run(&engine, &command, &mut out).unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    #[test]
    fn check_prints_the_decision() {
        let (ok, out) = run_to_string(Command::Check {
            expression: "a && b || c".into(),
            granted: grant(&["a", "c"]),
        });
        assert!(ok);
        assert_eq!(out, "granted\n");

        let (ok, out) = run_to_string(Command::Check {
            expression: "a &&".into(),
            granted: grant(&["a"]),
        });
        assert!(!ok);
        assert_eq!(out, "denied\n");
    }

    #[test]
    fn validate_prints_canonical_form_or_error() {
        let (ok, out) = run_to_string(Command::Validate {
            expression: "a & b | c".into(),
        });
        assert!(ok);
        assert_eq!(out, "valid: (a && b) || c\n");

        let (ok, out) = run_to_string(Command::Validate {
            expression: "(a".into(),
        });
        assert!(!ok);
        assert_eq!(out, "invalid: unclosed '(' opened at position 0\n");
    }

    #[test]
    fn matches_lists_granted_entries() {
        let (ok, out) = run_to_string(Command::Matches {
            pattern: "posts.*".into(),
            granted: grant(&["posts.edit", "users.read", "posts.view"]),
        });
        assert!(ok);
        assert_eq!(out, "posts.edit\nposts.view\n");
    }

    #[test]
    fn explain_prints_json() {
        let (ok, out) = run_to_string(Command::Explain {
            expression: "a || b".into(),
            granted: grant(&["b"]),
        });
        assert!(ok);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["granted"], true);
        assert_eq!(json["canonical"], "a || b");
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = load_engine(Some(Path::new("/nonexistent/permgate.json"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
