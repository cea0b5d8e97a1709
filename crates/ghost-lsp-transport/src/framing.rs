//! Message framing for the LSP Base Protocol (spec.md §4.1).
//!
//! Implements `Content-Length`-delimited framing over any `BufRead`/`Write`
//! pair, independent of the fact that the server binary happens to use
//! stdin/stdout.

use ghost_lsp_protocol::{JsonRpcRequest, JsonRpcResponse};
use std::collections::HashMap;
use std::io::{self, BufRead, Read, Write};

/// Errors that can occur while framing LSP messages.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Underlying I/O failure (non-recoverable, propagated to the caller).
    #[error("transport I/O error: {0}")]
    Io(#[from] io::Error),

    /// A header block was terminated without a `Content-Length` header.
    #[error("message header block is missing Content-Length")]
    MissingContentLength,

    /// The stream ended before `Content-Length` bytes could be read.
    #[error("stream ended after {read} of {expected} expected body bytes")]
    IncompleteMessage {
        /// Bytes actually read before EOF.
        read: usize,
        /// Bytes declared by `Content-Length`.
        expected: usize,
    },

    /// The body was read in full but is not valid JSON-RPC.
    #[error("malformed JSON-RPC body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

/// Outcome of reading one frame from the transport.
pub enum Frame {
    /// A complete, well-formed request or notification.
    Message(JsonRpcRequest),
    /// The stream closed cleanly between messages (no partial header/body read).
    Eof,
}

/// Read one LSP message from a buffered reader.
///
/// A malformed body is reported as [`TransportError::MalformedBody`] rather
/// than silently dropped, so callers can reply with a JSON-RPC `ParseError`
/// per spec.md §7 instead of the connection going quiet.
pub fn read_message<R: BufRead>(reader: &mut R) -> Result<Frame, TransportError> {
    let mut headers = HashMap::new();
    let mut saw_any_header_line = false;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return if saw_any_header_line {
                Err(TransportError::IncompleteMessage { read: 0, expected: 0 })
            } else {
                Ok(Frame::Eof)
            };
        }

        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            break;
        }
        saw_any_header_line = true;

        if let Some((key, value)) = line.split_once(": ") {
            headers.insert(key.to_string(), value.to_string());
        }
    }

    let content_length: usize = headers
        .get("Content-Length")
        .ok_or(TransportError::MissingContentLength)?
        .parse()
        .map_err(|_| TransportError::MissingContentLength)?;

    let mut content = vec![0u8; content_length];
    let mut read = 0;
    while read < content_length {
        match reader.read(&mut content[read..])? {
            0 => return Err(TransportError::IncompleteMessage { read, expected: content_length }),
            n => read += n,
        }
    }

    let request = serde_json::from_slice(&content)?;
    Ok(Frame::Message(request))
}

/// Write an LSP response with `Content-Length` framing.
pub fn write_message<W: Write>(writer: &mut W, response: &JsonRpcResponse) -> io::Result<()> {
    let content = serde_json::to_string(response)?;
    write!(writer, "Content-Length: {}\r\n\r\n{}", content.len(), content)?;
    writer.flush()
}

/// Write a server-initiated notification with `Content-Length` framing.
pub fn write_notification<W: Write>(
    writer: &mut W,
    method: &str,
    params: serde_json::Value,
) -> io::Result<()> {
    let notification = serde_json::json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
    });

    let body = serde_json::to_string(&notification)?;
    write!(writer, "Content-Length: {}\r\n\r\n{}", body.len(), body)?;
    writer.flush()
}
