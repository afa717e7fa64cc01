use std::path::PathBuf;

use data_subscriptions_cli_common::config::TryInitError;
use snafu::Snafu;

use crate::config;

/// Result type alias for the CLI.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type for the CLI.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Config { source: config::Error },

    #[snafu(display("Could not initialize logger, error: {source}"))]
    InitializeLogger { source: TryInitError },

    #[snafu(display("Could not initialize tokio runtime, error: {source}"))]
    InitializeTokioRuntime { source: tokio::io::Error },

    #[snafu(display("Could not create catalog client, error: {source}"))]
    CreateCatalogClient { source: catalog::Error },

    #[snafu(display("Could not create mail client, error: {source}"))]
    CreateMailClient { source: notification::Error },

    #[snafu(display("Could not read notification candidates from {}, error: {source}", path.display()))]
    ReadCandidates { path: PathBuf, source: std::io::Error },

    #[snafu(display("Could not parse notification candidates from {}, error: {source}", path.display()))]
    ParseCandidates { path: PathBuf, source: serde_json::Error },

    #[snafu(display("{source}"))]
    Notification { source: data_subscriptions_core::Error },

    #[snafu(display("{failed} of {total} notification candidates failed"))]
    IncompleteBatch { failed: usize, total: usize },
}

impl From<config::Error> for Error {
    fn from(source: config::Error) -> Self { Self::Config { source } }
}

impl From<data_subscriptions_core::Error> for Error {
    fn from(source: data_subscriptions_core::Error) -> Self { Self::Notification { source } }
}

pub trait CommandError {
    fn exit_code(&self) -> exitcode::ExitCode;
}

impl CommandError for Error {
    fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Self::Config { .. } | Self::CreateCatalogClient { .. } | Self::CreateMailClient { .. } => {
                exitcode::CONFIG
            }
            Self::InitializeTokioRuntime { .. } | Self::ReadCandidates { .. } => exitcode::IOERR,
            Self::ParseCandidates { .. } => exitcode::DATAERR,
            Self::InitializeLogger { .. }
            | Self::Notification { .. }
            | Self::IncompleteBatch { .. } => exitcode::SOFTWARE,
        }
    }
}
