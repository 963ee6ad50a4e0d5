//! `tessera` binary: dry-run layout migration of a batch file.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};

use tessera_cli::{Args, error_adapter::to_reportables};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    debug!(args:?; "Parsed arguments");

    match tessera_cli::run(&args) {
        Ok(summary) if summary.failed() > 0 => {
            warn!(
                rows = summary.rows,
                failed = summary.failed(),
                warnings = summary.warnings;
                "Dry run finished with failed rows, see the error messages in the output"
            );
        }
        Ok(summary) => {
            info!(
                rows = summary.rows,
                warnings = summary.warnings;
                "Dry run finished"
            );
        }
        Err(err) => {
            let reporter = miette::GraphicalReportHandler::new();

            // A batch-level failure: nothing was written.
            for reportable in to_reportables(&err) {
                let mut writer = String::new();
                reporter
                    .render_report(&mut writer, &reportable)
                    .expect("Writing to String buffer is infallible");

                error!("{writer}");
            }

            process::exit(1);
        }
    }
}
