//! The run state machine.
//!
//! ```text
//! Idle → [PreparingDesktop → SwitchingDesktop] → LaunchingApps × N → [PositioningWindows] → Completed
//! ```
//!
//! Any hard failure jumps straight to `Failed`. Work already done is never
//! undone.

use std::collections::HashMap;

use config::{SizeClass, Timing, Workspace, WorkspaceApp};
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    DesktopPhase, Deps, Error, ProgressSink, Result, RunnerState,
    clock::pause,
    sequencer::{Activation, Sequencer},
};

/// Restores workspaces, reporting each state transition to a sink.
///
/// `run` takes `&mut self`, so a runner executes at most one run at a time.
pub struct Runner {
    /// Collaborators.
    deps: Deps,
    /// Per-app launch logic.
    sequencer: Sequencer,
    /// Delays and deadlines.
    timing: Timing,
    /// Transition observer.
    sink: Box<dyn ProgressSink>,
    /// Last emitted state.
    state: RunnerState,
}

impl Runner {
    /// Create an idle runner.
    pub fn new(deps: Deps, timing: Timing, sink: impl ProgressSink + 'static) -> Self {
        let sequencer = Sequencer::new(deps.registry.clone(), deps.control.clone(), timing);
        Self {
            deps,
            sequencer,
            timing,
            sink: Box::new(sink),
            state: RunnerState::Idle,
        }
    }

    /// The most recent state.
    pub fn state(&self) -> &RunnerState {
        &self.state
    }

    /// Restore `workspace`. Equivalent to [`Self::run_with_cancel`] with a
    /// token that never fires.
    pub async fn run(&mut self, workspace: &Workspace) -> Result<()> {
        self.run_with_cancel(workspace, &CancellationToken::new())
            .await
    }

    /// Restore `workspace`, stopping at the next suspension point once
    /// `cancel` fires.
    ///
    /// The final state is always `Completed` or `Failed`; the returned error
    /// carries the same reason as the `Failed` message.
    pub async fn run_with_cancel(
        &mut self,
        workspace: &Workspace,
        cancel: &CancellationToken,
    ) -> Result<()> {
        self.state = RunnerState::Idle;
        info!(
            workspace = workspace.name,
            apps = workspace.apps.len(),
            isolate = workspace.isolate_desktop,
            tile = workspace.tile_windows,
            "run started"
        );
        let result = match self.timing.run_timeout() {
            Some(limit) => time::timeout(limit, self.drive(workspace, cancel))
                .await
                .unwrap_or(Err(Error::TimedOut)),
            None => self.drive(workspace, cancel).await,
        };
        match &result {
            Ok(()) => {
                info!(workspace = workspace.name, "run completed");
                self.transition(RunnerState::Completed);
            }
            Err(e) => {
                warn!(workspace = workspace.name, error = %e, "run failed");
                self.transition(RunnerState::Failed {
                    message: e.user_message(),
                });
            }
        }
        result
    }

    /// All phases in order; the first error ends the run.
    async fn drive(&mut self, workspace: &Workspace, cancel: &CancellationToken) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if !self.deps.permissions.is_granted() {
            return Err(Error::PermissionDenied);
        }
        if workspace.isolate_desktop {
            self.isolate(cancel).await?;
        }
        self.launch_all(workspace, cancel).await?;
        if workspace.tile_windows {
            self.position(workspace, cancel).await?;
        }
        Ok(())
    }

    /// Create a new desktop and switch to it.
    async fn isolate(&mut self, cancel: &CancellationToken) -> Result<()> {
        self.transition(RunnerState::PreparingDesktop);
        self.deps
            .control
            .create_desktop()
            .map_err(|e| Error::DesktopOperationFailed {
                phase: DesktopPhase::Create,
                reason: e.to_string(),
            })?;
        pause(self.timing.desktop_create_settle(), cancel).await?;

        self.transition(RunnerState::SwitchingDesktop);
        self.deps
            .control
            .switch_to_newest_desktop()
            .map_err(|e| Error::DesktopOperationFailed {
                phase: DesktopPhase::Switch,
                reason: e.to_string(),
            })?;
        pause(self.timing.desktop_switch_settle(), cancel).await
    }

    /// Launch or activate every app in workspace order.
    async fn launch_all(
        &mut self,
        workspace: &Workspace,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let total = workspace.apps.len();
        for (index, app) in workspace.apps.iter().enumerate() {
            self.transition(RunnerState::LaunchingApps {
                current: app.name.clone(),
                index,
                total,
            });
            match self.sequencer.activate(app, cancel).await? {
                Activation::Activated => debug!(app = app.name, index, "activated"),
                Activation::Launched { window_seen } => {
                    debug!(app = app.name, index, window_seen, "launched")
                }
            }
            if index + 1 < total {
                pause(self.timing.inter_app(), cancel).await?;
            }
        }
        Ok(())
    }

    /// Tile each entry into its planned rectangle. Entries sharing an
    /// identifier take that app's windows in order.
    async fn position(&mut self, workspace: &Workspace, cancel: &CancellationToken) -> Result<()> {
        pause(self.timing.positioning_settle(), cancel).await?;
        self.transition(RunnerState::PositioningWindows);

        let area = match self.deps.control.usable_area() {
            Ok(area) => area,
            Err(e) => {
                warn!(error = %e, "usable area unavailable; skipping positioning");
                return Ok(());
            }
        };
        let keyed: Vec<(usize, SizeClass)> =
            workspace.apps.iter().map(|a| a.size).enumerate().collect();
        let plan = grid_layout::plan(&keyed, area);
        let slots = window_slots(&workspace.apps);
        let last = plan.len().saturating_sub(1);
        for (i, (idx, rect)) in plan.into_iter().enumerate() {
            let (Some(app), Some(&window)) = (workspace.apps.get(idx), slots.get(idx)) else {
                continue;
            };
            match self.deps.registry.running(&app.identifier) {
                Some(running) => {
                    debug!(app = app.name, window, ?rect, "position");
                    if let Err(e) = self.deps.control.set_frame(&running, window, rect) {
                        warn!(app = app.name, window, error = %e, "positioning failed");
                    }
                }
                None => warn!(app = app.name, "not running; skipping positioning"),
            }
            if i < last {
                pause(self.timing.positioning_step(), cancel).await?;
            }
        }
        Ok(())
    }

    /// Record and emit a new state.
    fn transition(&mut self, next: RunnerState) {
        debug!(state = %next, "transition");
        self.sink.emit(&next);
        self.state = next;
    }
}

/// For each entry, how many earlier entries share its identifier. This is the
/// index of the app window the entry positions.
fn window_slots(apps: &[WorkspaceApp]) -> Vec<usize> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    apps.iter()
        .map(|a| {
            let n = seen.entry(a.identifier.as_str()).or_default();
            let slot = *n;
            *n += 1;
            slot
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_identifiers_take_successive_windows() {
        let apps = [
            WorkspaceApp::new("t1", "Term", "com.example.term"),
            WorkspaceApp::new("m", "Mail", "com.example.mail"),
            WorkspaceApp::new("t2", "Term", "com.example.term"),
            WorkspaceApp::new("t3", "Term", "com.example.term"),
        ];
        assert_eq!(window_slots(&apps), vec![0, 0, 1, 2]);
    }
}
