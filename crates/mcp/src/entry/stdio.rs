#![forbid(unsafe_code)]

use super::framing::{
    TransportMode, detect_mode_from_first_line, read_content_length_frame, write_frame,
};
use crate::{McpServer, SessionLog, parse_request};
use std::io::{BufRead, Write};

/// Serves requests until EOF. The framing is detected once from the first non-blank line
/// and kept for the whole process.
pub(crate) fn run_stdio<R: BufRead, W: Write>(
    server: &mut McpServer,
    reader: &mut R,
    writer: &mut W,
    log: &mut SessionLog,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut mode: Option<TransportMode> = None;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            log.note_exit("eof");
            return Ok(());
        }

        let active = match mode {
            Some(active) => active,
            None => {
                let Some(detected) = detect_mode_from_first_line(&line) else {
                    continue;
                };
                tracing::debug!(mode = detected.as_str(), "transport detected");
                log.note_mode(detected.as_str());
                mode = Some(detected);
                detected
            }
        };

        let body = match active {
            TransportMode::NewlineJson => {
                let raw = line.trim();
                if raw.is_empty() {
                    continue;
                }
                raw.as_bytes().to_vec()
            }
            TransportMode::ContentLength => {
                if line.trim().is_empty() {
                    continue;
                }
                match read_content_length_frame(reader, line)? {
                    Some(body) => body,
                    None => {
                        log.note_exit("eof");
                        return Ok(());
                    }
                }
            }
        };

        let response = match parse_request(&body) {
            Ok(request) => {
                log.note_method(&request.method);
                server.handle(request)
            }
            Err(error) => {
                log.note_error("malformed request");
                Some(error)
            }
        };
        if let Some(response) = response {
            write_frame(writer, active, &response)?;
        }
    }
}
