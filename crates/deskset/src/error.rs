//! Error handling for the deskset binary.

use std::{io, result};

use thiserror::Error;

/// Convenient result type for deskset commands.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can end a deskset command.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Configuration loading or validation errors.
    #[error("{}", .0.pretty())]
    Config(#[from] config::Error),
    /// A run ended in `Failed`.
    #[error("{0}")]
    Run(#[from] deskset_runner::Error),
    /// Window operations outside a run failed.
    #[error("Window operation error: {0}")]
    Winops(#[from] winops::Error),
    /// No workspace with the requested name.
    #[error("No workspace named '{name}'. Known: {known}")]
    UnknownWorkspace {
        /// Requested name.
        name: String,
        /// Comma-separated names from the config file.
        known: String,
    },
}
