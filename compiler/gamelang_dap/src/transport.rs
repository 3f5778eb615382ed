//! `Content-Length` framed stdio transport.
//!
//! Each message is a header block terminated by an empty line, followed by
//! exactly `Content-Length` bytes of JSON:
//!
//! ```text
//! Content-Length: 58\r\n
//! \r\n
//! {"seq":1,"type":"request","command":"initialize","arguments":{}}
//! ```

use std::io::{BufRead, Write};

use crate::protocol::{IncomingMessage, OutgoingMessage};
use crate::session::DebugSession;

const CONTENT_LENGTH: &str = "Content-Length:";

/// Largest body accepted from a client. Longer frames are rejected before
/// any buffer is allocated.
pub const MAX_MESSAGE_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum DapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("message header has no Content-Length")]
    MissingContentLength,

    #[error("invalid Content-Length: {value:?}")]
    InvalidContentLength { value: String },
}

/// Read the next framed message body. `Ok(None)` at end of input.
pub fn read_message<R: BufRead>(reader: &mut R) -> Result<Option<Vec<u8>>, DapError> {
    let mut length = None;
    let mut seen_header = false;
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let header = line.trim_end_matches(['\r', '\n']);
        if header.is_empty() {
            if seen_header {
                break;
            }
            continue;
        }
        seen_header = true;
        if let Some(value) = header.strip_prefix(CONTENT_LENGTH) {
            let value = value.trim();
            let parsed = value
                .parse::<usize>()
                .ok()
                .filter(|&n| n <= MAX_MESSAGE_BYTES)
                .ok_or_else(|| DapError::InvalidContentLength {
                    value: value.to_string(),
                })?;
            length = Some(parsed);
        }
    }

    let length = length.ok_or(DapError::MissingContentLength)?;
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body)?;
    Ok(Some(body))
}

/// Frame and write one message, then flush.
pub fn write_message<W: Write>(writer: &mut W, message: &OutgoingMessage) -> Result<(), DapError> {
    let json = serde_json::to_string(message)?;
    write!(writer, "{CONTENT_LENGTH} {}\r\n\r\n{json}", json.len())?;
    writer.flush()?;
    Ok(())
}

/// Serve `session` until end of input or until it is disconnected.
///
/// Malformed frames and bodies are logged and skipped. Only I/O failures
/// end the loop early.
pub fn serve<R: BufRead, W: Write>(
    session: &mut DebugSession,
    mut reader: R,
    mut writer: W,
) -> Result<(), DapError> {
    loop {
        let body = match read_message(&mut reader) {
            Ok(Some(body)) => body,
            Ok(None) => break,
            Err(DapError::Io(err)) => return Err(DapError::Io(err)),
            Err(err) => {
                tracing::warn!(error = %err, "skipping malformed DAP frame");
                continue;
            }
        };

        let request = match serde_json::from_slice::<IncomingMessage>(&body) {
            Ok(IncomingMessage::Request(request)) => request,
            Ok(IncomingMessage::Other) => {
                tracing::trace!("ignoring non-request DAP message");
                continue;
            }
            Err(err) => {
                tracing::warn!(error = %err, "skipping undecodable DAP message");
                continue;
            }
        };

        for message in session.handle_request(&request) {
            write_message(&mut writer, &message)?;
        }
        if session.is_finished() {
            tracing::debug!("DAP client disconnected");
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn frame(json: &str) -> String {
        format!("Content-Length: {}\r\n\r\n{json}", json.len())
    }

    #[test]
    fn reads_consecutive_frames() {
        let input = format!("{}{}", frame(r#"{"a":1}"#), frame("[]"));
        let mut reader = Cursor::new(input.into_bytes());
        assert_eq!(read_message(&mut reader).unwrap(), Some(br#"{"a":1}"#.to_vec()));
        assert_eq!(read_message(&mut reader).unwrap(), Some(b"[]".to_vec()));
        assert_eq!(read_message(&mut reader).unwrap(), None);
    }

    #[test]
    fn extra_headers_are_ignored() {
        let input = "Content-Type: application/json\r\nContent-Length: 2\r\n\r\n{}";
        let mut reader = Cursor::new(input.as_bytes());
        assert_eq!(read_message(&mut reader).unwrap(), Some(b"{}".to_vec()));
    }

    #[test]
    fn header_errors() {
        let mut reader = Cursor::new(&b"Content-Type: x\r\n\r\n"[..]);
        assert!(matches!(
            read_message(&mut reader),
            Err(DapError::MissingContentLength)
        ));

        let mut reader = Cursor::new(&b"Content-Length: lots\r\n\r\n"[..]);
        assert!(matches!(
            read_message(&mut reader),
            Err(DapError::InvalidContentLength { value }) if value == "lots"
        ));

        let mut reader = Cursor::new(&b"Content-Length: 18446744073709551615\r\n\r\n{}"[..]);
        assert!(matches!(
            read_message(&mut reader),
            Err(DapError::InvalidContentLength { value }) if value == "18446744073709551615"
        ));
    }

    #[test]
    fn length_limit_accepts_the_maximum_only() {
        let header = format!("Content-Length: {}\r\n\r\n", MAX_MESSAGE_BYTES + 1);
        let mut reader = Cursor::new(header.into_bytes());
        assert!(matches!(
            read_message(&mut reader),
            Err(DapError::InvalidContentLength { .. })
        ));

        let header = format!("Content-Length: {MAX_MESSAGE_BYTES}\r\n\r\n");
        let mut reader = Cursor::new(header.into_bytes());
        assert!(matches!(read_message(&mut reader), Err(DapError::Io(_))));
    }

    #[test]
    fn short_body_is_an_io_error() {
        let mut reader = Cursor::new(&b"Content-Length: 10\r\n\r\n{}"[..]);
        assert!(matches!(read_message(&mut reader), Err(DapError::Io(_))));
    }

    #[test]
    fn serve_skips_garbage_and_stops_on_disconnect() {
        let input = [
            "Content-Length: nope\r\n\r\n".to_string(),
            frame("not json"),
            frame(r#"{"seq":1,"type":"event","event":"x"}"#),
            frame(r#"{"seq":2,"type":"request","command":"threads"}"#),
            frame(r#"{"seq":3,"type":"request","command":"disconnect"}"#),
            frame(r#"{"seq":4,"type":"request","command":"threads"}"#),
        ]
        .concat();
        let mut output = Vec::new();
        let mut session = DebugSession::new();
        serve(&mut session, Cursor::new(input.into_bytes()), &mut output).unwrap();

        let mut reader = Cursor::new(output);
        let mut commands = Vec::new();
        while let Some(body) = read_message(&mut reader).unwrap() {
            let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
            commands.push(value["command"].as_str().unwrap_or_default().to_string());
        }
        assert_eq!(commands, vec!["threads", "disconnect"]);
    }
}
