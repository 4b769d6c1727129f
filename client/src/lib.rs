//! Command-line front end for `rawhttp-core`.
//!
//! Reads a `<host> <port>` line, validates it, performs one exchange and
//! writes the status line, header block and body to the output. Any failure
//! ends the run with an error; nothing is retried.

pub mod config;
pub mod input;

use std::error::Error;
use std::io::{BufRead, Write};

use rawhttp_core::{Client, RawMessage, TargetValidator};
use tracing::{info, warn};

pub use config::{CliArgs, Config, ConfigError};

pub fn run<R: BufRead, W: Write>(config: &Config, input: R, out: &mut W) -> Result<(), Box<dyn Error>> {
    writeln!(out, "{}", input::PROMPT)?;
    out.flush()?;

    let (host, port) = input::read_target(input, &config.default_host, &config.default_port)?;
    info!(%host, %port, "target selected");

    let validator = TargetValidator::new(&config.validator)?;
    let endpoint = validator.validate(&host, &port)?;

    let message = Client::new(config.exchange_options()).fetch(&endpoint)?;
    print_message(&message, out)
}

/// Write the three regions of `message`, one per line group. Chunked bodies
/// are decoded; anything else is printed as received.
pub fn print_message<W: Write>(message: &RawMessage, out: &mut W) -> Result<(), Box<dyn Error>> {
    writeln!(out, "{}", message.status()?)?;
    writeln!(out, "{}", message.header()?)?;
    if message.is_chunked()? {
        writeln!(out, "{}", message.body()?)?;
    } else {
        warn!("body is not chunk-framed, printing it undecoded");
        writeln!(out, "{}", String::from_utf8_lossy(message.raw_body()?))?;
    }
    Ok(())
}
