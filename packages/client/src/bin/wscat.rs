//! WebSocket cat: bridges the terminal to one WebSocket connection.
//!
//! Each line typed is sent as a binary frame (without its trailing newline);
//! each frame received is printed as `[<T|B>:<length>]><payload>`.
//! Ctrl+D closes the connection and exits.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin wscat -- ws://127.0.0.1:8080/ws
//! cargo run --features tls --bin wscat -- wss://echo.websocket.org
//! ```

use wscat_client::{ClientError, cli::parse_args};
use wscat_shared::logger::setup_logger;

fn main() {
    // Initialize tracing
    setup_logger(&[env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME")], "info");

    let args = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(ClientError::Usage(text)) => {
            print!("{}", text);
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = wscat_client::run_client(&args.url) {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
