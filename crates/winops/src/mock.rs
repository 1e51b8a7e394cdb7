//! Scriptable in-memory implementation of both seams for tests.

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicI32, Ordering},
    },
};

use grid_layout::Rect;
use parking_lot::Mutex;

use crate::{
    AppHandle, AppRegistry, Error, LaunchOptions, Result, RunningApp, WindowControl, WindowInfo,
};

/// Per-app launch behaviour.
#[derive(Clone, Debug)]
struct LaunchScript {
    /// `list_windows` calls that return nothing before the windows appear.
    polls_before_window: usize,
    /// Windows reported once they appear.
    windows: usize,
    /// Whether the launched process shows up as running at all.
    stays_running: bool,
}

impl Default for LaunchScript {
    fn default() -> Self {
        Self {
            polls_before_window: 0,
            windows: 1,
            stays_running: true,
        }
    }
}

/// Mock app registry and window control. Clones share state.
#[derive(Clone)]
pub struct MockSystem {
    /// Every seam call, in order, as `op:arg` strings.
    calls: Arc<Mutex<Vec<String>>>,
    /// Installed apps by identifier.
    installed: Arc<Mutex<HashMap<String, AppHandle>>>,
    /// Running apps by identifier.
    running: Arc<Mutex<HashMap<String, RunningApp>>>,
    /// Windows by owning pid.
    windows: Arc<Mutex<HashMap<i32, Vec<WindowInfo>>>>,
    /// Remaining empty `list_windows` answers per freshly launched pid.
    pending_polls: Arc<Mutex<HashMap<i32, usize>>>,
    /// Launch behaviour overrides by identifier.
    scripts: Arc<Mutex<HashMap<String, LaunchScript>>>,
    /// Applied frames as `(identifier, window, rect)`.
    frames: Arc<Mutex<Vec<(String, usize, Rect)>>>,
    /// Answer for `usable_area`.
    area: Arc<Mutex<Rect>>,
    /// Next pid handed to a spawned process.
    next_pid: Arc<AtomicI32>,
    /// When set, every launch fails with this message.
    fail_launch: Arc<Mutex<Option<String>>>,
    /// Fail `activate`.
    fail_activate: Arc<AtomicBool>,
    /// Fail `activate_pid`.
    fail_activate_pid: Arc<AtomicBool>,
    /// Fail `set_frame`.
    fail_set_frame: Arc<AtomicBool>,
    /// Fail `usable_area`.
    fail_usable_area: Arc<AtomicBool>,
    /// Fail `create_desktop`.
    fail_create_desktop: Arc<AtomicBool>,
    /// Fail `switch_to_newest_desktop`.
    fail_switch_desktop: Arc<AtomicBool>,
}

impl Default for MockSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSystem {
    /// An empty machine: nothing installed, a 1440x875 usable area.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            installed: Arc::new(Mutex::new(HashMap::new())),
            running: Arc::new(Mutex::new(HashMap::new())),
            windows: Arc::new(Mutex::new(HashMap::new())),
            pending_polls: Arc::new(Mutex::new(HashMap::new())),
            scripts: Arc::new(Mutex::new(HashMap::new())),
            frames: Arc::new(Mutex::new(Vec::new())),
            area: Arc::new(Mutex::new(Rect::new(0.0, 0.0, 1440.0, 875.0))),
            next_pid: Arc::new(AtomicI32::new(1000)),
            fail_launch: Arc::new(Mutex::new(None)),
            fail_activate: Arc::new(AtomicBool::new(false)),
            fail_activate_pid: Arc::new(AtomicBool::new(false)),
            fail_set_frame: Arc::new(AtomicBool::new(false)),
            fail_usable_area: Arc::new(AtomicBool::new(false)),
            fail_create_desktop: Arc::new(AtomicBool::new(false)),
            fail_switch_desktop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Register an installed app.
    pub fn install(&self, identifier: &str, name: &str) {
        self.installed.lock().insert(
            identifier.to_string(),
            AppHandle {
                identifier: identifier.to_string(),
                name: name.to_string(),
                path: PathBuf::from(format!("/Applications/{name}.app")),
            },
        );
    }

    /// Register an installed app that is already running with `windows` windows.
    pub fn start(&self, identifier: &str, name: &str, hidden: bool, windows: usize) -> i32 {
        self.install(identifier, name);
        self.spawn_process(identifier, name, hidden, windows)
    }

    /// Mark `windows` of an already-running app as minimized.
    pub fn minimize_all(&self, identifier: &str) {
        if let Some(app) = self.running.lock().get(identifier)
            && let Some(ws) = self.windows.lock().get_mut(&app.pid)
        {
            for w in ws.iter_mut() {
                w.minimized = true;
            }
        }
    }

    /// Simulate the user quitting an app.
    pub fn quit(&self, identifier: &str) {
        if let Some(app) = self.running.lock().remove(identifier) {
            self.windows.lock().remove(&app.pid);
        }
    }

    /// After launch, report no windows for the first `polls` checks.
    pub fn set_window_delay(&self, identifier: &str, polls: usize) {
        self.scripts
            .lock()
            .entry(identifier.to_string())
            .or_default()
            .polls_before_window = polls;
    }

    /// Launch succeeds but the app never opens a window.
    pub fn set_windowless(&self, identifier: &str) {
        self.scripts
            .lock()
            .entry(identifier.to_string())
            .or_default()
            .windows = 0;
    }

    /// Launch succeeds but the process never appears as running.
    pub fn set_exits_on_launch(&self, identifier: &str) {
        self.scripts
            .lock()
            .entry(identifier.to_string())
            .or_default()
            .stays_running = false;
    }

    /// Make every launch fail with `message`.
    pub fn set_fail_launch(&self, message: Option<&str>) {
        *self.fail_launch.lock() = message.map(str::to_string);
    }
    /// Make `activate` fail.
    pub fn set_fail_activate(&self, v: bool) {
        self.fail_activate.store(v, Ordering::SeqCst);
    }
    /// Make `activate_pid` fail.
    pub fn set_fail_activate_pid(&self, v: bool) {
        self.fail_activate_pid.store(v, Ordering::SeqCst);
    }
    /// Make every `set_frame` fail, whether or not the window exists.
    pub fn set_fail_set_frame(&self, v: bool) {
        self.fail_set_frame.store(v, Ordering::SeqCst);
    }
    /// Make `usable_area` fail.
    pub fn set_fail_usable_area(&self, v: bool) {
        self.fail_usable_area.store(v, Ordering::SeqCst);
    }
    /// Make `create_desktop` fail.
    pub fn set_fail_create_desktop(&self, v: bool) {
        self.fail_create_desktop.store(v, Ordering::SeqCst);
    }
    /// Make `switch_to_newest_desktop` fail.
    pub fn set_fail_switch_desktop(&self, v: bool) {
        self.fail_switch_desktop.store(v, Ordering::SeqCst);
    }
    /// Change the answer for `usable_area`.
    pub fn set_usable_area(&self, r: Rect) {
        *self.area.lock() = r;
    }

    /// Every recorded call, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
    /// Whether a call exactly equal to `s` was recorded.
    pub fn calls_contains(&self, s: &str) -> bool {
        self.calls.lock().iter().any(|x| x == s)
    }
    /// Number of recorded calls starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|x| x.starts_with(prefix))
            .count()
    }
    /// Frames applied through `set_frame` as `(identifier, window, rect)`.
    pub fn frames(&self) -> Vec<(String, usize, Rect)> {
        self.frames.lock().clone()
    }
    /// Hidden state of a running app; `None` when it is not running.
    pub fn is_hidden(&self, identifier: &str) -> Option<bool> {
        self.running.lock().get(identifier).map(|a| a.hidden)
    }
    /// Minimized windows of a running app.
    pub fn minimized_count(&self, identifier: &str) -> usize {
        let Some(pid) = self.running.lock().get(identifier).map(|a| a.pid) else {
            return 0;
        };
        self.windows
            .lock()
            .get(&pid)
            .map(|ws| ws.iter().filter(|w| w.minimized).count())
            .unwrap_or(0)
    }

    /// Record a call.
    fn note(&self, s: impl Into<String>) {
        self.calls.lock().push(s.into());
    }

    /// Register a running process with `windows` fresh windows.
    fn spawn_process(&self, identifier: &str, name: &str, hidden: bool, windows: usize) -> i32 {
        let pid = self.next_pid.fetch_add(1, Ordering::SeqCst);
        self.running.lock().insert(
            identifier.to_string(),
            RunningApp {
                identifier: identifier.to_string(),
                name: name.to_string(),
                pid,
                hidden,
            },
        );
        let ws = (0..windows)
            .map(|i| WindowInfo {
                pid,
                index: i as u32,
                title: format!("{name} {i}"),
                minimized: false,
            })
            .collect();
        self.windows.lock().insert(pid, ws);
        pid
    }
}

impl AppRegistry for MockSystem {
    fn resolve(&self, identifier: &str) -> Option<AppHandle> {
        self.note(format!("resolve:{identifier}"));
        self.installed.lock().get(identifier).cloned()
    }

    fn running(&self, identifier: &str) -> Option<RunningApp> {
        self.running.lock().get(identifier).cloned()
    }

    fn launch(&self, app: &AppHandle, opts: LaunchOptions) -> Result<()> {
        self.note(format!("launch:{}", app.identifier));
        if let Some(msg) = self.fail_launch.lock().clone() {
            return Err(Error::Other(msg));
        }
        if !opts.activate || opts.add_to_recents {
            self.note("launch_opts:unexpected");
        }
        let script = self
            .scripts
            .lock()
            .get(&app.identifier)
            .cloned()
            .unwrap_or_default();
        if script.stays_running {
            let pid = self.spawn_process(&app.identifier, &app.name, false, script.windows);
            self.pending_polls
                .lock()
                .insert(pid, script.polls_before_window);
        }
        Ok(())
    }

    fn list_windows(&self, app: &RunningApp) -> Vec<WindowInfo> {
        self.note(format!("list_windows:{}", app.pid));
        {
            let mut pending = self.pending_polls.lock();
            if let Some(n) = pending.get_mut(&app.pid)
                && *n > 0
            {
                *n -= 1;
                return Vec::new();
            }
        }
        self.windows
            .lock()
            .get(&app.pid)
            .cloned()
            .unwrap_or_default()
    }
}

impl WindowControl for MockSystem {
    fn unhide(&self, app: &RunningApp) -> Result<()> {
        self.note(format!("unhide:{}", app.identifier));
        if let Some(a) = self.running.lock().get_mut(&app.identifier) {
            a.hidden = false;
        }
        Ok(())
    }

    fn unminimize_all(&self, app: &RunningApp) -> Result<usize> {
        self.note(format!("unminimize:{}", app.identifier));
        let mut restored = 0;
        if let Some(ws) = self.windows.lock().get_mut(&app.pid) {
            for w in ws.iter_mut().filter(|w| w.minimized) {
                w.minimized = false;
                restored += 1;
            }
        }
        Ok(restored)
    }

    fn activate(&self, identifier: &str) -> Result<()> {
        self.note(format!("activate:{identifier}"));
        if self.fail_activate.load(Ordering::SeqCst) {
            return Err(Error::Other("automation refused".into()));
        }
        Ok(())
    }

    fn activate_pid(&self, pid: i32) -> Result<()> {
        self.note(format!("activate_pid:{pid}"));
        if self.fail_activate_pid.load(Ordering::SeqCst) {
            return Err(Error::Other("activation refused".into()));
        }
        Ok(())
    }

    fn set_frame(&self, app: &RunningApp, window: usize, rect: Rect) -> Result<()> {
        self.note(format!("set_frame:{}#{window}", app.identifier));
        let exists = self
            .windows
            .lock()
            .get(&app.pid)
            .is_some_and(|ws| window < ws.len());
        if !exists || self.fail_set_frame.load(Ordering::SeqCst) {
            return Err(Error::NoWindow {
                pid: app.pid,
                index: window,
            });
        }
        self.frames
            .lock()
            .push((app.identifier.clone(), window, rect));
        Ok(())
    }

    fn usable_area(&self) -> Result<Rect> {
        self.note("usable_area");
        if self.fail_usable_area.load(Ordering::SeqCst) {
            return Err(Error::Other("no screen".into()));
        }
        Ok(*self.area.lock())
    }

    fn create_desktop(&self) -> Result<()> {
        self.note("create_desktop");
        if self.fail_create_desktop.load(Ordering::SeqCst) {
            return Err(Error::Other("Mission Control unavailable".into()));
        }
        Ok(())
    }

    fn switch_to_newest_desktop(&self) -> Result<()> {
        self.note("switch_desktop");
        if self.fail_switch_desktop.load(Ordering::SeqCst) {
            return Err(Error::Other("no desktop to switch to".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_registers_running_with_delayed_windows() {
        let m = MockSystem::new();
        m.install("com.example.a", "A");
        m.set_window_delay("com.example.a", 2);
        let handle = m.resolve("com.example.a").unwrap();
        assert!(m.running("com.example.a").is_none());
        m.launch(&handle, LaunchOptions::default()).unwrap();
        let app = m.running("com.example.a").unwrap();
        assert!(m.list_windows(&app).is_empty());
        assert!(m.list_windows(&app).is_empty());
        assert_eq!(m.list_windows(&app).len(), 1);
    }

    #[test]
    fn unminimize_restores_windows() {
        let m = MockSystem::new();
        m.start("com.example.b", "B", true, 3);
        m.minimize_all("com.example.b");
        assert_eq!(m.minimized_count("com.example.b"), 3);
        let app = m.running("com.example.b").unwrap();
        assert_eq!(m.unminimize_all(&app).unwrap(), 3);
        assert_eq!(m.minimized_count("com.example.b"), 0);
        m.unhide(&app).unwrap();
        assert_eq!(m.is_hidden("com.example.b"), Some(false));
    }

    #[test]
    fn set_frame_targets_existing_windows_only() {
        let m = MockSystem::new();
        m.start("com.example.d", "D", false, 2);
        let app = m.running("com.example.d").unwrap();
        let r = Rect::new(0.0, 0.0, 300.0, 200.0);
        m.set_frame(&app, 1, r).unwrap();
        assert!(matches!(
            m.set_frame(&app, 2, r),
            Err(Error::NoWindow { index: 2, .. })
        ));
        assert_eq!(m.frames(), vec![("com.example.d".to_string(), 1, r)]);
    }

    #[test]
    fn quit_removes_process() {
        let m = MockSystem::new();
        m.start("com.example.c", "C", false, 1);
        m.quit("com.example.c");
        assert!(m.running("com.example.c").is_none());
    }
}
