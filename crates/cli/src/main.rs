use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    permgate_observability::init_with(cli.log_format);

    let result = commands::load_engine(cli.config.as_deref()).and_then(|engine| {
        let mut stdout = std::io::stdout().lock();
        commands::run(&engine, &cli.command, &mut stdout)
    });

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            tracing::error!("permgate failed: {err:#}");
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
