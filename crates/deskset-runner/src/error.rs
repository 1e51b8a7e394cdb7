use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    result::Result as StdResult,
};

use thiserror::Error;

/// Convenient result type for the runner crate.
pub type Result<T> = StdResult<T, Error>;

/// Why a single app could not be brought up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchFailure {
    /// The workspace entry has no application identifier.
    #[error("no identifier")]
    NoIdentifier,
    /// The identifier does not resolve to an installed application.
    #[error("not installed")]
    NotInstalled,
    /// The launch request itself failed.
    #[error("{0}")]
    Launch(String),
}

/// Virtual-desktop step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopPhase {
    /// Creating the new desktop.
    Create,
    /// Switching to the new desktop.
    Switch,
}

impl Display for DesktopPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Create => "create a desktop",
            Self::Switch => "switch to the new desktop",
        })
    }
}

/// Fatal errors that end a run in `Failed`.
///
/// Soft failures (activation fallback, missing windows, poll timeouts) are
/// logged where they happen and never become an `Error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Accessibility permission is missing.
    #[error("permission not granted")]
    PermissionDenied,

    /// One app could not be launched or activated.
    #[error("could not launch {app}: {reason}")]
    AppLaunchFailed {
        /// Display name of the workspace entry.
        app: String,
        /// Underlying cause.
        reason: LaunchFailure,
    },

    /// Creating or switching to a virtual desktop failed.
    #[error("could not {phase}: {reason}")]
    DesktopOperationFailed {
        /// Step that failed.
        phase: DesktopPhase,
        /// Message from the window-control layer.
        reason: String,
    },

    /// The run was cancelled by the caller.
    #[error("cancelled")]
    Cancelled,

    /// The run exceeded its overall deadline.
    #[error("timed out")]
    TimedOut,
}

impl Error {
    /// Sentence shown to the user in the `Failed` state.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// True when the user has to change a system setting before retrying.
    pub fn needs_permission(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }
}
