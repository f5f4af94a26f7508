#![forbid(unsafe_code)]

use super::framing::{FrameReader, write_frame};
use crate::{McpServer, parse_request};
use std::io::{BufRead, BufReader, Write};

pub(crate) fn run_stdio(server: &mut McpServer) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = std::io::stdin();
    let reader = BufReader::new(stdin.lock());
    let writer = std::io::stdout().lock();
    serve(server, reader, writer)
}

/// Request loop: one response per request frame, none for notifications.
pub(crate) fn serve<R: BufRead, W: Write>(
    server: &mut McpServer,
    reader: R,
    mut writer: W,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut frames = FrameReader::new(reader);

    while let Some(body) = frames.next_frame()? {
        let response = match parse_request(&body) {
            Ok(request) => {
                tracing::debug!(method = %request.method, "request");
                server.handle(request)
            }
            Err(error) => {
                tracing::warn!("rejected malformed request frame");
                Some(error)
            }
        };
        if let Some(response) = response {
            write_frame(&mut writer, frames.mode(), &response)?;
        }
    }

    tracing::debug!("stdin closed");
    Ok(())
}
