//! Trait seams over the live OS state.
//!
//! Both traits are synchronous: OS automation calls are expected to return
//! promptly. Callers own any waiting or polling. Implementations must tolerate
//! the machine changing underneath them (apps quitting, windows closing) and
//! report that as `None` or an error rather than panicking.

use grid_layout::Rect;

use crate::{AppHandle, LaunchOptions, Result, RunningApp, WindowInfo};

/// Lookup and launch of installed applications.
pub trait AppRegistry: Send + Sync {
    /// Resolve an identifier to an installed application.
    fn resolve(&self, identifier: &str) -> Option<AppHandle>;

    /// The running instance for `identifier`, if any.
    fn running(&self, identifier: &str) -> Option<RunningApp>;

    /// Start a fresh instance.
    fn launch(&self, app: &AppHandle, opts: LaunchOptions) -> Result<()>;

    /// Windows currently owned by `app`.
    fn list_windows(&self, app: &RunningApp) -> Vec<WindowInfo>;
}

/// Window and desktop automation.
pub trait WindowControl: Send + Sync {
    /// Unhide a hidden app.
    fn unhide(&self, app: &RunningApp) -> Result<()>;

    /// Restore every minimized window of `app`; returns how many were restored.
    fn unminimize_all(&self, app: &RunningApp) -> Result<usize>;

    /// Activate the running instance of `identifier`.
    fn activate(&self, identifier: &str) -> Result<()>;

    /// Activate a process by pid. Used when activating by identifier fails.
    fn activate_pid(&self, pid: i32) -> Result<()>;

    /// Move and resize window `window` (zero-based, in `list_windows` order) of
    /// `app`. `rect` is bottom-up.
    fn set_frame(&self, app: &RunningApp, window: usize, rect: Rect) -> Result<()>;

    /// Usable area of the current screen (excludes menu bar and Dock), bottom-up.
    fn usable_area(&self) -> Result<Rect>;

    /// Create a new virtual desktop.
    fn create_desktop(&self) -> Result<()>;

    /// Switch to the most recently created virtual desktop.
    fn switch_to_newest_desktop(&self) -> Result<()>;
}
