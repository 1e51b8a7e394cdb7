//! Desktop creation and switching through the Dock's Mission Control UI.

use std::{
    thread,
    time::{Duration, Instant},
};

use objc2_app_kit::{NSWorkspace, NSWorkspaceOpenConfiguration};
use objc2_foundation::NSString;
use tracing::debug;

use super::{ax::AxElem, running_instance};
use crate::{Error, Result};

/// Bundle identifier of the Dock, which owns the Mission Control UI.
const DOCK: &str = "com.apple.dock";

/// Bundle identifier of the Mission Control launcher.
const MISSION_CONTROL: &str = "com.apple.exposelauncher";

/// How long to wait for Mission Control to appear.
const OPEN_TIMEOUT: Duration = Duration::from_millis(1500);

/// Poll interval while waiting for Mission Control.
const OPEN_POLL: Duration = Duration::from_millis(50);

/// Maximum depth searched below the Mission Control group.
const SEARCH_DEPTH: usize = 6;

/// Accessibility element of the running Dock.
fn dock() -> Result<AxElem> {
    let dock = running_instance(DOCK).ok_or_else(|| Error::NotRunning(DOCK.to_string()))?;
    AxElem::application(unsafe { dock.processIdentifier() })
}

/// The Mission Control group, if it is showing.
fn mission_group(dock: &AxElem) -> Option<AxElem> {
    dock.find(2, &|e| e.label() == "Mission Control")
}

/// Start the Mission Control launcher without recording it as recent.
fn launch_mission_control() -> Result<()> {
    let ws = NSWorkspace::sharedWorkspace();
    let id = NSString::from_str(MISSION_CONTROL);
    let url = unsafe { ws.URLForApplicationWithBundleIdentifier(&id) }
        .ok_or_else(|| Error::NotInstalled(MISSION_CONTROL.to_string()))?;
    let config = unsafe { NSWorkspaceOpenConfiguration::configuration() };
    unsafe {
        config.setAddsToRecentItems(false);
        ws.openApplicationAtURL_configuration_completionHandler(&url, &config, None);
    }
    Ok(())
}

/// Open Mission Control unless it is already showing, and return its group.
fn open_mission_control() -> Result<AxElem> {
    let dock = dock()?;
    if let Some(group) = mission_group(&dock) {
        return Ok(group);
    }
    debug!("opening Mission Control");
    launch_mission_control()?;
    let deadline = Instant::now() + OPEN_TIMEOUT;
    loop {
        if let Some(group) = mission_group(&dock) {
            return Ok(group);
        }
        if Instant::now() >= deadline {
            return Err(Error::UiNotFound("Mission Control"));
        }
        thread::sleep(OPEN_POLL);
    }
}

/// The spaces bar inside Mission Control.
fn spaces_bar(group: &AxElem) -> Result<AxElem> {
    group
        .find(SEARCH_DEPTH, &|e| e.label() == "Spaces Bar")
        .ok_or(Error::UiNotFound("Spaces Bar"))
}

/// Press the "add desktop" button.
pub(super) fn add_desktop() -> Result<()> {
    let bar = spaces_bar(&open_mission_control()?)?;
    let button = bar
        .find(SEARCH_DEPTH, &|e| {
            e.string("AXRole").as_deref() == Some("AXButton") && e.label() == "add desktop"
        })
        .ok_or(Error::UiNotFound("add desktop button"))?;
    debug!("adding desktop");
    button.perform("AXPress")
}

/// Press the last desktop thumbnail, which leaves Mission Control on it.
pub(super) fn enter_last_desktop() -> Result<()> {
    let bar = spaces_bar(&open_mission_control()?)?;
    let list = bar
        .find(SEARCH_DEPTH, &|e| e.string("AXRole").as_deref() == Some("AXList"))
        .ok_or(Error::UiNotFound("desktop list"))?;
    let desktops = list.elements("AXChildren")?;
    let last = desktops.last().ok_or(Error::UiNotFound("desktop"))?;
    debug!(count = desktops.len(), "switching to newest desktop");
    last.perform("AXPress")
}
