//! Workspace definition types.

use std::time::Duration;

use grid_layout::{Rect, SizeClass};
use serde::{Deserialize, Serialize};

use crate::defaults::*;

/// One application entry in a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceApp {
    /// Stable identifier for this entry, unique within its workspace.
    pub id: String,
    /// Display name shown in progress messages.
    pub name: String,
    /// Platform application identifier (a bundle id on macOS). May be empty,
    /// in which case restoring the workspace fails for this entry.
    #[serde(default)]
    pub identifier: String,
    /// Size hint for tiling.
    #[serde(default)]
    pub size: SizeClass,
    /// Last known frame. Advisory only; tiling never reads it.
    #[serde(default)]
    pub frame: Option<Rect>,
}

impl WorkspaceApp {
    /// Convenience constructor with a `medium` size class and no frame.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            identifier: identifier.into(),
            size: SizeClass::default(),
            frame: None,
        }
    }

    /// Builder-style size override.
    #[must_use]
    pub fn with_size(mut self, size: SizeClass) -> Self {
        self.size = size;
        self
    }
}

/// A named, ordered set of apps plus restore preferences.
///
/// App order is the launch order and the default tiling order. Several entries
/// may share an identifier; each is placed independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    /// Workspace name, unique within a file.
    pub name: String,
    /// Apps in launch order.
    #[serde(default)]
    pub apps: Vec<WorkspaceApp>,
    /// Create and switch to a fresh virtual desktop before launching.
    #[serde(default)]
    pub isolate_desktop: bool,
    /// Tile windows into a grid after launching.
    #[serde(default)]
    pub tile_windows: bool,
}

impl Workspace {
    /// Create an empty workspace with both optional phases disabled.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            apps: Vec::new(),
            isolate_desktop: false,
            tile_windows: false,
        }
    }
}

/// Settle delays and polling bounds used while restoring a workspace.
///
/// These delays paper over asynchronous window-manager updates; they are not
/// correctness guarantees. Tests set them to zero or run on a paused clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    /// Pause after unhiding a running app.
    #[serde(default = "default_unhide_settle_ms")]
    pub unhide_settle_ms: u64,
    /// Pause after activating an already-running app.
    #[serde(default = "default_activate_settle_ms")]
    pub activate_settle_ms: u64,
    /// Interval between window checks after a fresh launch.
    #[serde(default = "default_window_poll_ms")]
    pub window_poll_ms: u64,
    /// Give up waiting for a first window after this long.
    #[serde(default = "default_window_timeout_ms")]
    pub window_timeout_ms: u64,
    /// Pause between consecutive app activations.
    #[serde(default = "default_inter_app_ms")]
    pub inter_app_ms: u64,
    /// Pause between creating a desktop and switching to it.
    #[serde(default = "default_desktop_create_settle_ms")]
    pub desktop_create_settle_ms: u64,
    /// Pause after switching desktops.
    #[serde(default = "default_desktop_switch_settle_ms")]
    pub desktop_switch_settle_ms: u64,
    /// Pause after all launches, before positioning.
    #[serde(default = "default_positioning_settle_ms")]
    pub positioning_settle_ms: u64,
    /// Pause between consecutive positioning calls.
    #[serde(default = "default_positioning_step_ms")]
    pub positioning_step_ms: u64,
    /// Overall deadline for one run; `None` means unbounded.
    #[serde(default)]
    pub run_timeout_ms: Option<u64>,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            unhide_settle_ms: UNHIDE_SETTLE_MS,
            activate_settle_ms: ACTIVATE_SETTLE_MS,
            window_poll_ms: WINDOW_POLL_MS,
            window_timeout_ms: WINDOW_TIMEOUT_MS,
            inter_app_ms: INTER_APP_MS,
            desktop_create_settle_ms: DESKTOP_CREATE_SETTLE_MS,
            desktop_switch_settle_ms: DESKTOP_SWITCH_SETTLE_MS,
            positioning_settle_ms: POSITIONING_SETTLE_MS,
            positioning_step_ms: POSITIONING_STEP_MS,
            run_timeout_ms: None,
        }
    }
}

impl Timing {
    /// All delays zero and no deadline. Useful for tests and dry runs.
    pub const fn immediate() -> Self {
        Self {
            unhide_settle_ms: 0,
            activate_settle_ms: 0,
            window_poll_ms: 0,
            window_timeout_ms: 0,
            inter_app_ms: 0,
            desktop_create_settle_ms: 0,
            desktop_switch_settle_ms: 0,
            positioning_settle_ms: 0,
            positioning_step_ms: 0,
            run_timeout_ms: None,
        }
    }

    pub fn unhide_settle(&self) -> Duration {
        Duration::from_millis(self.unhide_settle_ms)
    }
    pub fn activate_settle(&self) -> Duration {
        Duration::from_millis(self.activate_settle_ms)
    }
    /// Poll interval, never shorter than one millisecond so polling cannot spin.
    pub fn window_poll(&self) -> Duration {
        Duration::from_millis(self.window_poll_ms.max(1))
    }
    pub fn window_timeout(&self) -> Duration {
        Duration::from_millis(self.window_timeout_ms)
    }
    pub fn inter_app(&self) -> Duration {
        Duration::from_millis(self.inter_app_ms)
    }
    pub fn desktop_create_settle(&self) -> Duration {
        Duration::from_millis(self.desktop_create_settle_ms)
    }
    pub fn desktop_switch_settle(&self) -> Duration {
        Duration::from_millis(self.desktop_switch_settle_ms)
    }
    pub fn positioning_settle(&self) -> Duration {
        Duration::from_millis(self.positioning_settle_ms)
    }
    pub fn positioning_step(&self) -> Duration {
        Duration::from_millis(self.positioning_step_ms)
    }
    pub fn run_timeout(&self) -> Option<Duration> {
        self.run_timeout_ms.map(Duration::from_millis)
    }
}

/// Top-level contents of a workspace definition file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Timing overrides; omitted fields keep their defaults.
    #[serde(default)]
    pub timing: Timing,
    /// Defined workspaces, in file order.
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
}

impl Config {
    /// Look up a workspace by exact name.
    pub fn workspace(&self, name: &str) -> Option<&Workspace> {
        self.workspaces.iter().find(|w| w.name == name)
    }
}
