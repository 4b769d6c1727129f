use std::io;
use std::process::ExitCode;

use rawhttp_client::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr; stdout carries only the exchange.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    info!(
        read_timeout = ?config.read_timeout,
        default_host = %config.default_host,
        default_port = %config.default_port,
        "starting rawhttp"
    );

    let mut stdout = io::stdout();
    match rawhttp_client::run(&config, io::stdin().lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
