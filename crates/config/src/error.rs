//! Error types for workspace definition loading and validation.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error, Clone)]
/// Errors produced while loading, parsing, or validating a workspace file.
pub enum Error {
    #[error("{message}")]
    /// I/O or filesystem read error.
    Read {
        /// Optional path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// RON syntax or shape error.
    Parse {
        /// Optional path associated with the parse error.
        path: Option<PathBuf>,
        /// Parser message, including the line and column reported by RON.
        message: String,
    },
    #[error("{message}")]
    /// The file parsed but describes an inconsistent set of workspaces.
    Validation {
        /// Optional path associated with the validation error.
        path: Option<PathBuf>,
        /// Name of the offending workspace, if the problem is scoped to one.
        workspace: Option<String>,
        /// Human-readable error message.
        message: String,
    },
}

impl Error {
    /// Render a human-friendly error message including the path when available.
    pub fn pretty(&self) -> String {
        match self {
            Self::Read { path, message } => match path {
                Some(p) => format!("Read error at {}: {}", p.display(), message),
                None => format!("Read error: {}", message),
            },
            Self::Parse { path, message } => match path {
                Some(p) => format!("Workspace file parse error in {}\n{}", p.display(), message),
                None => format!("Workspace file parse error\n{}", message),
            },
            Self::Validation {
                path,
                workspace,
                message,
            } => {
                let scope = workspace
                    .as_deref()
                    .map(|w| format!(" (workspace \"{}\")", w))
                    .unwrap_or_default();
                match path {
                    Some(p) => format!(
                        "Workspace file validation error in {}{}\n{}",
                        p.display(),
                        scope,
                        message
                    ),
                    None => format!("Workspace file validation error{}\n{}", scope, message),
                }
            }
        }
    }

    /// Access the optional path attached to this error.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Validation { path, .. } => {
                path.as_deref()
            }
        }
    }

    /// Attach `path` to an error that was produced without one.
    pub(crate) fn with_path(mut self, p: &Path) -> Self {
        match &mut self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Validation { path, .. } => {
                if path.is_none() {
                    *path = Some(p.to_path_buf());
                }
            }
        }
        self
    }
}
