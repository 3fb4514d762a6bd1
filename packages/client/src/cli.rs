//! Command-line interface.

use std::ffi::OsString;

use clap::Parser;

use crate::error::ClientError;

/// Connect to a WebSocket and bridge it to the terminal.
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(name = "wscat", disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// WebSocket URL (e.g. wss://echo.websocket.org)
    pub url: String,
}

/// Usage text printed for wrong invocations.
pub fn usage(program: &str) -> String {
    format!(
        "\nUSAGE:\t{} <URL>\nEXAMPLE {} wss://echo.websocket.org\n\n",
        program, program
    )
}

/// Parse the full argument list, program name included.
///
/// Anything other than exactly one positional argument is a usage error.
pub fn parse_args<I, T>(args: I) -> Result<Args, ClientError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program = args
        .first()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "wscat".to_string());

    Args::try_parse_from(&args).map_err(|e| {
        tracing::debug!("Rejected arguments: {}", e);
        ClientError::Usage(usage(&program))
    })
}
