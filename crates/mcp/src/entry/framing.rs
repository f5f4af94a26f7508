#![forbid(unsafe_code)]

use serde_json::Value;
use std::io::{BufRead, Write};

const MAX_CONTENT_LENGTH_BYTES: usize = 16 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TransportMode {
    NewlineJson,
    ContentLength,
}

pub(crate) fn detect_mode(line: &str) -> Option<TransportMode> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Some(TransportMode::NewlineJson);
    }
    // Some clients send Content-Type before Content-Length.
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("content-length:") || lower.starts_with("content-type:") {
        return Some(TransportMode::ContentLength);
    }
    None
}

pub(crate) fn parse_content_length_header(line: &str) -> Option<usize> {
    let (key, value) = line.trim().split_once(':')?;
    if !key.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse::<usize>().ok()
}

/// Reads request bodies off a byte stream. The framing is fixed by the first
/// non-blank line and kept for the rest of the session.
pub(crate) struct FrameReader<R> {
    reader: R,
    mode: Option<TransportMode>,
}

impl<R: BufRead> FrameReader<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self { reader, mode: None }
    }

    pub(crate) fn mode(&self) -> Option<TransportMode> {
        self.mode
    }

    /// Next request body, or `None` at end of stream.
    pub(crate) fn next_frame(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let mode = match self.mode {
                Some(mode) => mode,
                None => match detect_mode(&line) {
                    Some(detected) => {
                        tracing::debug!(mode = ?detected, "stdio framing detected");
                        self.mode = Some(detected);
                        detected
                    }
                    None => continue,
                },
            };

            if line.trim().is_empty() {
                continue;
            }
            return match mode {
                TransportMode::NewlineJson => Ok(Some(line.trim().as_bytes().to_vec())),
                TransportMode::ContentLength => self.read_content_length_body(line),
            };
        }
    }

    fn read_content_length_body(&mut self, mut header: String) -> std::io::Result<Option<Vec<u8>>> {
        let mut content_length = parse_content_length_header(&header);

        while !header.trim_end().is_empty() {
            header.clear();
            if self.reader.read_line(&mut header)? == 0 {
                // EOF inside the header block closes the session.
                return Ok(None);
            }
            if content_length.is_none() {
                content_length = parse_content_length_header(&header);
            }
        }

        let Some(len) = content_length else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "Missing Content-Length header",
            ));
        };
        if len > MAX_CONTENT_LENGTH_BYTES {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "Content-Length exceeds max allowed size",
            ));
        }

        let mut body = vec![0u8; len];
        self.reader.read_exact(&mut body)?;
        Ok(Some(body))
    }
}

/// Writes one response in the session's framing. Newline JSON is the fallback.
pub(crate) fn write_frame<W: Write>(
    writer: &mut W,
    mode: Option<TransportMode>,
    resp: &Value,
) -> std::io::Result<()> {
    let body = serde_json::to_vec(resp).map_err(std::io::Error::other)?;
    match mode {
        Some(TransportMode::ContentLength) => {
            write!(writer, "Content-Length: {}\r\n\r\n", body.len())?;
            writer.write_all(&body)?;
        }
        Some(TransportMode::NewlineJson) | None => {
            writer.write_all(&body)?;
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()
}
