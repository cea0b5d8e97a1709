//! `ghost-lsp` binary entry point: CLI parsing and stdio server launch
//! (spec.md §6).

use ghost_lsp::{run_stdio, ServerConfig};
use ghost_lsp_transport::LogLevel;
use std::str::FromStr;

fn print_help() {
    println!(
        "ghost-lsp {}\n\nUsage: ghost-lsp [OPTIONS]\n\nOptions:\n  --log-level=LEVEL  Set the log threshold (debug|info|warn|error|silent) [default: info]\n  -v, --version       Print the version and exit\n  -h, --help          Print this help message and exit",
        env!("CARGO_PKG_VERSION")
    );
}

fn main() {
    let mut config = ServerConfig::default();

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-v" | "--version" => {
                println!("ghost-lsp {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "-h" | "--help" => {
                print_help();
                return;
            }
            _ => {
                let Some(level) = arg.strip_prefix("--log-level=") else {
                    eprintln!("ghost-lsp: unrecognized argument: {arg}");
                    print_help();
                    std::process::exit(1);
                };
                match LogLevel::from_str(level) {
                    Ok(level) => config.log_level = level,
                    Err(_) => {
                        eprintln!("ghost-lsp: unrecognized log level: {level}");
                        std::process::exit(1);
                    }
                }
            }
        }
    }

    match run_stdio(config) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("ghost-lsp: fatal transport error: {e}");
            std::process::exit(1);
        }
    }
}
