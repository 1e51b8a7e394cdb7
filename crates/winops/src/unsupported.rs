//! Stand-in backend for platforms without AppKit.
//!
//! Nothing is installed or running, and every window operation fails with
//! [`Error::Unsupported`].

use grid_layout::Rect;

use crate::{
    AppHandle, AppRegistry, Error, LaunchOptions, Result, RunningApp, WindowControl, WindowInfo,
};

/// Backend that reports every operation as unsupported.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacOps;

impl AppRegistry for MacOps {
    fn resolve(&self, _identifier: &str) -> Option<AppHandle> {
        None
    }

    fn running(&self, _identifier: &str) -> Option<RunningApp> {
        None
    }

    fn launch(&self, _app: &AppHandle, _opts: LaunchOptions) -> Result<()> {
        Err(Error::Unsupported)
    }

    fn list_windows(&self, _app: &RunningApp) -> Vec<WindowInfo> {
        Vec::new()
    }
}

impl WindowControl for MacOps {
    fn unhide(&self, _app: &RunningApp) -> Result<()> {
        Err(Error::Unsupported)
    }

    fn unminimize_all(&self, _app: &RunningApp) -> Result<usize> {
        Err(Error::Unsupported)
    }

    fn activate(&self, _identifier: &str) -> Result<()> {
        Err(Error::Unsupported)
    }

    fn activate_pid(&self, _pid: i32) -> Result<()> {
        Err(Error::Unsupported)
    }

    fn set_frame(&self, _app: &RunningApp, _window: usize, _rect: Rect) -> Result<()> {
        Err(Error::Unsupported)
    }

    fn usable_area(&self) -> Result<Rect> {
        Err(Error::Unsupported)
    }

    fn create_desktop(&self) -> Result<()> {
        Err(Error::Unsupported)
    }

    fn switch_to_newest_desktop(&self) -> Result<()> {
        Err(Error::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_resolves_or_runs() {
        let ops = MacOps;
        assert!(ops.resolve("com.apple.Safari").is_none());
        assert!(ops.running("com.apple.Safari").is_none());
        assert!(matches!(ops.usable_area(), Err(Error::Unsupported)));
    }
}
