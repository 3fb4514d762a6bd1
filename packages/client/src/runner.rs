//! Process-level entry point.

use crate::{
    error::ClientError,
    session::{SessionReport, run_session},
    websocket::WebSocketConnector,
};

/// Bridge standard input/output to `url` on a single-threaded runtime.
///
/// Returns once the connection and the input stream are both released.
/// Connection failures are part of the report, not an error.
pub fn run_client(url: &str) -> Result<SessionReport, ClientError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let (report, _) = runtime.block_on(run_session(
        &WebSocketConnector,
        url,
        tokio::io::stdin(),
        std::io::stdout(),
    ));

    // A stdin read may still be parked on a blocking thread; don't wait for it.
    runtime.shutdown_background();

    tracing::debug!(
        "Session finished: {} frame(s) sent, {} frame(s) received",
        report.frames_sent,
        report.frames_received
    );
    Ok(report)
}
