//! Reading the `<host> <port>` target line from the user.

use std::io::{self, BufRead};

pub const PROMPT: &str = "waiting for your input(e.g. hostname port)...";

/// Split a line on its first space. Anything after that space is the port,
/// even if it contains further spaces; validation rejects it later.
pub fn parse_target_line(line: &str) -> Option<(&str, &str)> {
    line.trim_end_matches(['\r', '\n']).split_once(' ')
}

/// Read one line from `input`, falling back to the default target when it
/// holds no space-separated pair.
pub fn read_target<R: BufRead>(
    mut input: R,
    default_host: &str,
    default_port: &str,
) -> io::Result<(String, String)> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(match parse_target_line(&line) {
        Some((host, port)) => (host.to_string(), port.to_string()),
        None => (default_host.to_string(), default_port.to_string()),
    })
}
