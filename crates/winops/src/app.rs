//! Value types exchanged with the app registry and window control seams.

use std::path::PathBuf;

/// An installed application resolved from its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppHandle {
    /// Identifier the app was resolved from (bundle id on macOS).
    pub identifier: String,
    /// Display name of the installed app.
    pub name: String,
    /// Location of the application bundle.
    pub path: PathBuf,
}

/// A running instance of an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningApp {
    /// Identifier of the app this process belongs to.
    pub identifier: String,
    /// Process name.
    pub name: String,
    /// Process identifier.
    pub pid: i32,
    /// True when the app is hidden (Cmd-H).
    pub hidden: bool,
}

/// Minimal information about one window of a running app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Owning process.
    pub pid: i32,
    /// Position in the app's window list (0 is frontmost).
    pub index: u32,
    /// Window title; may be empty.
    pub title: String,
    /// True when the window is minimized to the Dock.
    pub minimized: bool,
}

/// How a fresh launch should behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Bring the app to the foreground once launched.
    pub activate: bool,
    /// Record the launch in the system's recent items.
    pub add_to_recents: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            activate: true,
            add_to_recents: false,
        }
    }
}
