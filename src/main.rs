use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use wow_ui_validator::config::{Args, Config};
use wow_ui_validator::report::Reporter;
use wow_ui_validator::runner::{self, RunOutcome};

fn main() -> ExitCode {
    match try_main() {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<RunOutcome> {
    let args = Args::parse();

    // RUST_LOG wins over --log-level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level.as_str()),
    )
    .init();

    let config = Config::from_args(args)?;

    log::debug!(
        "Using dialect {} (root <{}>)",
        config.dialect.name,
        config.dialect.root_element
    );

    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock(), config.color);
    runner::run(&config, &mut reporter)
}
