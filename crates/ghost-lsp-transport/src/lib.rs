//! Transport layer for ghost-lsp: Base Protocol framing plus stderr logging.
//!
//! The LSP Base Protocol frames every message with a `Content-Length` header
//! over a byte stream. This crate implements that framing independent of the
//! stream's source (the server binary happens to use stdin/stdout), and
//! provides the [`Logger`] all server-side logging goes through, since stdout
//! is reserved for protocol traffic.
//!
//! # Example
//!
//! ```no_run
//! use std::io::{BufReader, stdin, stdout};
//! use ghost_lsp_transport::{read_message, write_message, Frame};
//! use ghost_lsp_protocol::JsonRpcResponse;
//!
//! let mut reader = BufReader::new(stdin());
//! let mut writer = stdout();
//!
//! if let Ok(Frame::Message(request)) = read_message(&mut reader) {
//!     let response = JsonRpcResponse::null(request.id);
//!     write_message(&mut writer, &response).unwrap();
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod framing;
mod logger;

pub use framing::{read_message, write_message, write_notification, Frame, TransportError};
pub use logger::{LogLevel, Logger};
