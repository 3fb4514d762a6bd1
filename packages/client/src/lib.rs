//! Terminal to WebSocket bridge.
//!
//! Lines typed on standard input are sent over one WebSocket connection as
//! binary frames; frames received are printed on standard output.

pub mod cli;
pub mod error;
pub mod formatter;
pub mod frame;
pub mod input;
pub mod runner;
pub mod session;
pub mod state;
pub mod transport;
pub mod websocket;


pub use error::{ClientError, TransportError};
pub use runner::run_client;
pub use session::{Session, SessionOutcome, SessionReport, run_session};
