//! deskset-runner: restore a workspace of applications.
//!
//! A [`Runner`] takes a [`config::Workspace`] and walks it through an ordered
//! set of phases: optional virtual-desktop isolation, launch or activation of
//! every app in order (via the [`Sequencer`]), and optional tiling with the
//! grid planner. Every state change is delivered to a [`ProgressSink`]. The
//! first hard failure ends the run in [`RunnerState::Failed`]; nothing is
//! rolled back.
//!
//! All OS access goes through the collaborator traits in [`Deps`], so the
//! whole crate runs against `winops::MockSystem` in tests. Settle delays come
//! from [`config::Timing`] and are tokio sleeps, so tests drive them with a
//! paused clock.

mod clock;
mod deps;
pub mod diagnostics;
mod error;
mod progress;
mod runner;
mod sequencer;
mod state;

pub use deps::Deps;
pub use diagnostics::{EnvironmentReport, diagnose};
pub use error::{DesktopPhase, Error, LaunchFailure, Result};
pub use progress::{Observer, ProgressSink};
pub use runner::Runner;
pub use sequencer::{Activation, Sequencer};
pub use state::RunnerState;
pub use tokio_util::sync::CancellationToken;
