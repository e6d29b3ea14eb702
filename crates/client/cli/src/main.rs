//! Initiative tracker entry point.
use std::process::ExitCode;

use clap::Parser;
use console::style;
use initiative_cli::{Args, CliConfig, TrackerApp, logging};

fn main() -> ExitCode {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let config = CliConfig::from_env();

    let _guard = match logging::setup_logging(&config.log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{} {:#}", style("warning:").yellow().bold(), e);
            None
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{} failed to start runtime: {}", style("error:").red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(TrackerApp::new(args, config).run());
    // A pending stdin read would otherwise block shutdown
    runtime.shutdown_background();

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{} {}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
