//! Launch-or-activate logic for a single workspace entry.
//!
//! An app that is already running is unhidden, unminimized, and brought to the
//! front. An app that is not running is launched and then polled until it
//! shows a window or the window timeout passes. Only a missing identifier, an
//! unresolvable identifier, or a failed launch request are errors; everything
//! else is logged and the run continues.

use std::sync::Arc;

use config::{Timing, WorkspaceApp};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use winops::{AppHandle, AppRegistry, LaunchOptions, RunningApp, WindowControl};

use crate::{Error, LaunchFailure, Result, clock::pause};

/// What the sequencer did for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The app was already running and was brought forward.
    Activated,
    /// The app was launched fresh.
    Launched {
        /// Whether a window appeared before the window timeout.
        window_seen: bool,
    },
}

/// Brings workspace entries to the foreground one at a time.
///
/// The inter-app delay is the caller's responsibility.
pub struct Sequencer {
    /// App lookup and launch.
    registry: Arc<dyn AppRegistry>,
    /// Unhide, unminimize, and activation.
    control: Arc<dyn WindowControl>,
    /// Settle and polling durations.
    timing: Timing,
}

impl Sequencer {
    /// Create a sequencer over the given collaborators.
    pub fn new(
        registry: Arc<dyn AppRegistry>,
        control: Arc<dyn WindowControl>,
        timing: Timing,
    ) -> Self {
        Self {
            registry,
            control,
            timing,
        }
    }

    /// Launch or activate `app`.
    pub async fn activate(
        &self,
        app: &WorkspaceApp,
        cancel: &CancellationToken,
    ) -> Result<Activation> {
        let fail = |reason| Error::AppLaunchFailed {
            app: app.name.clone(),
            reason,
        };
        if app.identifier.is_empty() {
            return Err(fail(LaunchFailure::NoIdentifier));
        }
        let Some(handle) = self.registry.resolve(&app.identifier) else {
            return Err(fail(LaunchFailure::NotInstalled));
        };
        match self.registry.running(&app.identifier) {
            Some(running) => {
                self.bring_forward(app, &running, cancel).await?;
                Ok(Activation::Activated)
            }
            None => {
                self.registry
                    .launch(&handle, LaunchOptions::default())
                    .map_err(|e| fail(LaunchFailure::Launch(e.to_string())))?;
                debug!(app = app.name, identifier = app.identifier, "launched");
                let window_seen = self.wait_for_window(app, &handle, cancel).await?;
                Ok(Activation::Launched { window_seen })
            }
        }
    }

    /// Unhide, unminimize, and activate a running app.
    async fn bring_forward(
        &self,
        app: &WorkspaceApp,
        running: &RunningApp,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if running.hidden {
            if let Err(e) = self.control.unhide(running) {
                warn!(app = app.name, error = %e, "unhide failed");
            }
            pause(self.timing.unhide_settle(), cancel).await?;
        }
        match self.control.unminimize_all(running) {
            Ok(0) => {}
            Ok(n) => debug!(app = app.name, restored = n, "unminimized windows"),
            Err(e) => warn!(app = app.name, error = %e, "unminimize failed"),
        }
        if let Err(e) = self.control.activate(&app.identifier) {
            warn!(app = app.name, error = %e, "activate failed; activating process directly");
            if let Err(e) = self.control.activate_pid(running.pid) {
                warn!(app = app.name, pid = running.pid, error = %e, "direct activation failed");
            }
        }
        pause(self.timing.activate_settle(), cancel).await
    }

    /// Poll until the freshly launched app reports a window.
    ///
    /// Returns false if the window timeout passes first; some apps never open
    /// a window.
    async fn wait_for_window(
        &self,
        app: &WorkspaceApp,
        handle: &AppHandle,
        cancel: &CancellationToken,
    ) -> Result<bool> {
        let start = Instant::now();
        let deadline = start + self.timing.window_timeout();
        loop {
            if let Some(running) = self.registry.running(&handle.identifier)
                && !self.registry.list_windows(&running).is_empty()
            {
                debug!(
                    app = app.name,
                    waited_ms = start.elapsed().as_millis() as u64,
                    "window appeared"
                );
                return Ok(true);
            }
            if Instant::now() >= deadline {
                info!(
                    app = app.name,
                    timeout_ms = self.timing.window_timeout_ms,
                    "no window before timeout; continuing"
                );
                return Ok(false);
            }
            pause(self.timing.window_poll(), cancel).await?;
        }
    }
}
