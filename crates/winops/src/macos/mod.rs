//! Native macOS backend.
//!
//! LaunchServices and app state go through `NSWorkspace` and
//! `NSRunningApplication`, screen geometry through `NSScreen`, and windows
//! through the Accessibility API. Desktops have no public API, so the Dock's
//! Mission Control UI is driven through Accessibility as well.

mod ax;
mod mission;

use std::path::PathBuf;

use block2::RcBlock;
use grid_layout::Rect;
use objc2::rc::Retained;
use objc2_app_kit::{
    NSApplicationActivationOptions, NSRunningApplication, NSScreen, NSWorkspace,
    NSWorkspaceOpenConfiguration,
};
use objc2_foundation::{MainThreadMarker, NSError, NSPoint, NSSize, NSString, NSURL};
use tracing::{debug, warn};

use self::ax::{AxElem, ax_check};
use crate::{
    AppHandle, AppRegistry, Error, LaunchOptions, Result, RunningApp, WindowControl, WindowInfo,
    frame::{bundle_name, to_ax_frame},
};

/// First live instance for a bundle identifier.
fn running_instance(identifier: &str) -> Option<Retained<NSRunningApplication>> {
    let id = NSString::from_str(identifier);
    unsafe {
        NSRunningApplication::runningApplicationsWithBundleIdentifier(&id)
            .iter()
            .find(|a| !a.isTerminated())
    }
}

/// Instance for a process id.
fn instance_for_pid(pid: i32) -> Option<Retained<NSRunningApplication>> {
    unsafe { NSRunningApplication::runningApplicationWithProcessIdentifier(pid as libc::pid_t) }
}

/// Activate every window of `inst`.
fn bring_to_front(inst: &NSRunningApplication, op: &'static str) -> Result<()> {
    let opts = NSApplicationActivationOptions::ActivateAllWindows;
    let ok = unsafe { inst.activateWithOptions(opts) };
    let pid = unsafe { inst.processIdentifier() };
    if ok {
        debug!(pid, op, "activated");
        Ok(())
    } else {
        warn!(pid, op, "activateWithOptions returned false");
        Err(Error::Refused(op))
    }
}

/// Screen geometry: the main screen's visible frame and the primary height.
fn screen_geometry() -> Result<(Rect, f64)> {
    let mtm = MainThreadMarker::new().ok_or(Error::MainThread)?;
    let screen = NSScreen::mainScreen(mtm).ok_or(Error::UiNotFound("main screen"))?;
    let v = screen.visibleFrame();
    let visible = Rect::new(v.origin.x, v.origin.y, v.size.width, v.size.height);
    let primary_height = NSScreen::screens(mtm)
        .iter()
        .next()
        .map(|s| s.frame().size.height)
        .unwrap_or(v.origin.y + v.size.height);
    Ok((visible, primary_height))
}

/// Production backend implementing both seams with AppKit and Accessibility.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacOps;

impl AppRegistry for MacOps {
    fn resolve(&self, identifier: &str) -> Option<AppHandle> {
        let id = NSString::from_str(identifier);
        let url =
            unsafe { NSWorkspace::sharedWorkspace().URLForApplicationWithBundleIdentifier(&id) }?;
        let path = PathBuf::from(unsafe { url.path() }?.to_string());
        debug!(identifier, path = %path.display(), "resolved app");
        Some(AppHandle {
            identifier: identifier.to_string(),
            name: bundle_name(&path),
            path,
        })
    }

    fn running(&self, identifier: &str) -> Option<RunningApp> {
        let app = running_instance(identifier)?;
        let (name, pid, hidden) =
            unsafe { (app.localizedName(), app.processIdentifier(), app.isHidden()) };
        Some(RunningApp {
            identifier: identifier.to_string(),
            name: name.map(|n| n.to_string()).unwrap_or_default(),
            pid,
            hidden,
        })
    }

    fn launch(&self, app: &AppHandle, opts: LaunchOptions) -> Result<()> {
        let path = NSString::from_str(&app.path.to_string_lossy());
        let url = unsafe { NSURL::fileURLWithPath(&path) };
        let config = unsafe { NSWorkspaceOpenConfiguration::configuration() };
        unsafe {
            config.setActivates(opts.activate);
            config.setAddsToRecentItems(opts.add_to_recents);
        }
        let identifier = app.identifier.clone();
        let done = RcBlock::new(move |_: *mut NSRunningApplication, err: *mut NSError| {
            if let Some(err) = unsafe { err.as_ref() } {
                warn!(
                    identifier = %identifier,
                    error = %err.localizedDescription(),
                    "launch reported an error"
                );
            }
        });
        debug!(identifier = %app.identifier, ?opts, "launch");
        unsafe {
            NSWorkspace::sharedWorkspace().openApplicationAtURL_configuration_completionHandler(
                &url,
                &config,
                Some(&*done),
            );
        }
        Ok(())
    }

    fn list_windows(&self, app: &RunningApp) -> Vec<WindowInfo> {
        let windows = match AxElem::application(app.pid).and_then(|a| a.windows()) {
            Ok(ws) => ws,
            Err(e) => {
                debug!(pid = app.pid, error = %e, "list_windows failed");
                return Vec::new();
            }
        };
        windows
            .iter()
            .enumerate()
            .map(|(i, w)| WindowInfo {
                pid: app.pid,
                index: i as u32,
                title: w.string("AXTitle").unwrap_or_default(),
                minimized: w.bool("AXMinimized").ok().flatten().unwrap_or(false),
            })
            .collect()
    }
}

impl WindowControl for MacOps {
    fn unhide(&self, app: &RunningApp) -> Result<()> {
        let inst =
            instance_for_pid(app.pid).ok_or_else(|| Error::NotRunning(app.identifier.clone()))?;
        if unsafe { inst.unhide() } {
            Ok(())
        } else {
            Err(Error::Refused("unhide"))
        }
    }

    fn unminimize_all(&self, app: &RunningApp) -> Result<usize> {
        ax_check()?;
        let mut restored = 0;
        for w in AxElem::application(app.pid)?.windows()? {
            if w.bool("AXMinimized")?.unwrap_or(false) {
                w.set_bool("AXMinimized", false)?;
                restored += 1;
            }
        }
        Ok(restored)
    }

    fn activate(&self, identifier: &str) -> Result<()> {
        let inst = running_instance(identifier)
            .ok_or_else(|| Error::NotRunning(identifier.to_string()))?;
        bring_to_front(&inst, "activate")
    }

    fn activate_pid(&self, pid: i32) -> Result<()> {
        let inst = instance_for_pid(pid).ok_or_else(|| Error::NotRunning(pid.to_string()))?;
        bring_to_front(&inst, "activate_pid")
    }

    fn set_frame(&self, app: &RunningApp, window: usize, rect: Rect) -> Result<()> {
        ax_check()?;
        let (_, primary_height) = screen_geometry()?;
        let windows = AxElem::application(app.pid)?.windows()?;
        let w = windows.get(window).ok_or(Error::NoWindow {
            pid: app.pid,
            index: window,
        })?;
        let f = to_ax_frame(rect, primary_height);
        debug!(pid = app.pid, window, ?f, "set_frame");
        w.set_position(NSPoint::new(f.x, f.y))?;
        w.set_size(NSSize::new(f.w, f.h))
    }

    fn usable_area(&self) -> Result<Rect> {
        screen_geometry().map(|(visible, _)| visible)
    }

    fn create_desktop(&self) -> Result<()> {
        ax_check()?;
        mission::add_desktop()
    }

    fn switch_to_newest_desktop(&self) -> Result<()> {
        ax_check()?;
        mission::enter_last_desktop()
    }
}
