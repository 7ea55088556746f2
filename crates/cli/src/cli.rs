use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use permgate_observability::LogFormat;

/// `permgate` - evaluate and validate permission expressions.
#[derive(Parser, Debug)]
#[command(name = "permgate")]
#[command(version)]
#[command(about = "Evaluate permission expressions against granted permissions.", long_about = None)]
pub struct Cli {
    /// Engine settings as JSON (defaults come from PERMGATE_* variables)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log output format on stderr (json, compact)
    #[arg(long, global = true, default_value = "json")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decide an expression; exits 0 when granted, 1 when denied
    Check {
        /// Permission expression, e.g. "(admin.* || moderator.*) && active.user"
        expression: String,

        #[command(flatten)]
        granted: Granted,
    },

    /// Check expression syntax only; exits 0 when valid, 1 when not
    Validate {
        /// Permission expression to validate
        expression: String,
    },

    /// List granted permissions matched by a single pattern
    Matches {
        /// Exact permission or glob (`*`, `?`)
        pattern: String,

        #[command(flatten)]
        granted: Granted,
    },

    /// Print a JSON explanation of the decision
    Explain {
        /// Permission expression to explain
        expression: String,

        #[command(flatten)]
        granted: Granted,
    },
}

#[derive(Args, Debug, Default)]
pub struct Granted {
    /// Granted permission (repeatable, or comma-separated)
    #[arg(short = 'g', long = "grant", value_delimiter = ',')]
    pub permissions: Vec<String>,
}
