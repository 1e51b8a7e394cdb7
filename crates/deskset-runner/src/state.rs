//! Observable run states.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Progress of one run, as seen by observers.
///
/// A run moves strictly forward through these states; `Completed` and
/// `Failed` are terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RunnerState {
    /// No run in progress.
    #[default]
    Idle,
    /// Creating a fresh virtual desktop.
    PreparingDesktop,
    /// Switching to the fresh desktop.
    SwitchingDesktop,
    /// Bringing up one app.
    LaunchingApps {
        /// Display name of the app being launched.
        current: String,
        /// Zero-based position in the workspace.
        index: usize,
        /// Number of apps in the workspace.
        total: usize,
    },
    /// Moving windows into their planned rectangles.
    PositioningWindows,
    /// The run finished.
    Completed,
    /// The run stopped at its first hard failure.
    Failed {
        /// User-facing reason.
        message: String,
    },
}

impl RunnerState {
    /// True for `Completed` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed { .. })
    }

    /// Fraction of the run finished, for progress bars. `None` outside app launches.
    pub fn fraction(&self) -> Option<f64> {
        match self {
            Self::LaunchingApps { index, total, .. } if *total > 0 => {
                Some(*index as f64 / *total as f64)
            }
            Self::Completed => Some(1.0),
            _ => None,
        }
    }
}

impl Display for RunnerState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::PreparingDesktop => f.write_str("Preparing desktop"),
            Self::SwitchingDesktop => f.write_str("Switching desktop"),
            Self::LaunchingApps {
                current,
                index,
                total,
            } => write!(f, "Launching {current} ({}/{total})", index + 1),
            Self::PositioningWindows => f.write_str("Positioning windows"),
            Self::Completed => f.write_str("Completed"),
            Self::Failed { message } => write!(f, "Failed: {message}"),
        }
    }
}
