//! Minimal TCP server answering every connection with a fixed reply.
//!
//! Each accepted connection gets its own task; there is no shared state, no
//! connection limit and no backpressure. Fit for local testing only.
//!
//! A connection whose request line arrives intact gets `OK_RESPONSE`. Any
//! failure to read that line, including EOF before its newline, gets
//! `BAD_REQUEST_RESPONSE`. The reply is close-delimited: the server shuts
//! the socket down right after writing it.

use std::io;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

pub const OK_RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\nContent-type: text/plain\r\n\r\nreceived your msg.";

pub const BAD_REQUEST_RESPONSE: &[u8] =
    b"HTTP/1.1 400 Bad Request\r\n Content-type: text/plain\r\n\r\nbad request";

/// How long to wait for the rest of a request head after its first line.
const DRAIN_TIMEOUT: Duration = Duration::from_millis(500);

pub async fn run(listener: TcpListener) -> Result<(), io::Error> {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "error accepting connection");
                continue;
            }
        };
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream).await {
                debug!(%peer, error = %e, "connection ended with error");
            }
        });
    }
}

/// Serve one connection. The stream is owned here and dropped on return,
/// whichever way the request line went.
pub async fn handle_connection(mut stream: TcpStream) -> Result<(), io::Error> {
    let mut reader = BufReader::new(&mut stream);
    let response = match read_request_line(&mut reader).await {
        Ok(line) => {
            info!(status = line.trim_end(), "request received");
            drain_head(&mut reader).await;
            OK_RESPONSE
        }
        Err(e) => {
            warn!(error = %e, "failed to read request line");
            BAD_REQUEST_RESPONSE
        }
    };
    drop(reader);

    stream.write_all(response).await?;
    stream.shutdown().await
}

/// Read up to and including the first `\n`.
pub async fn read_request_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<String, io::Error> {
    let mut line = String::new();
    reader.read_line(&mut line).await?;
    if !line.ends_with('\n') {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed before end of request line",
        ));
    }
    Ok(line)
}

/// Consume header lines up to the blank line so that closing the socket
/// does not reset a client whose request is still unread.
async fn drain_head<R: AsyncBufRead + Unpin>(reader: &mut R) {
    let drain = async {
        let mut line = String::new();
        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) | Err(_) => break,
                Ok(_) if line.trim_end_matches(['\r', '\n']).is_empty() => break,
                Ok(_) => {}
            }
        }
    };
    if tokio::time::timeout(DRAIN_TIMEOUT, drain).await.is_err() {
        debug!("request head incomplete, replying anyway");
    }
}
