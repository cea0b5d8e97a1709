//! Ghost language server: wires document storage, workspace scanning, the
//! filesystem watcher, and every analysis provider in `ghost-lsp-providers`
//! into one JSON-RPC server loop over stdio (spec.md §4.8).

#![warn(missing_docs)]

mod config;
mod dispatch;
mod document;
mod semantic_analyzer;
mod server;
mod watcher;
mod workspace;

pub use config::ServerConfig;
pub use server::{Lifecycle, LspServer};

use ghost_lsp_transport::TransportError;
use std::io::{stdin, stdout, BufReader};

/// Run the server against real stdio until `exit` is processed or the
/// client closes stdin, returning the process exit code.
pub fn run_stdio(config: ServerConfig) -> Result<i32, TransportError> {
    let mut server = LspServer::new(config);
    let mut reader = BufReader::new(stdin());
    let mut writer = stdout();
    server.run(&mut reader, &mut writer)
}
