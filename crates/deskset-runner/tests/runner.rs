use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use config::{Rect, SizeClass, Timing, Workspace, WorkspaceApp};
use deskset_runner::{CancellationToken, Deps, Error, Observer, Runner, RunnerState};
use permissions::StaticPermissions;
use tokio::{
    sync::mpsc::{self, UnboundedReceiver},
    time::{self, Instant},
};
use winops::MockSystem;

struct Harness {
    mock: MockSystem,
    perms: Arc<StaticPermissions>,
    runner: Runner,
    rx: UnboundedReceiver<RunnerState>,
}

impl Harness {
    fn new(timing: Timing) -> Self {
        let mock = MockSystem::new();
        let perms = Arc::new(StaticPermissions::new(true));
        let (tx, rx) = mpsc::unbounded_channel();
        let deps = Deps::from_backend(mock.clone(), perms.clone());
        Self {
            mock,
            perms,
            runner: Runner::new(deps, timing, tx),
            rx,
        }
    }

    fn states(&mut self) -> Vec<RunnerState> {
        let mut out = Vec::new();
        while let Ok(s) = self.rx.try_recv() {
            out.push(s);
        }
        out
    }
}

/// Padded halves of the default 1440x875 mock screen.
const LEFT_HALF: Rect = Rect::new(4.0, 4.0, 712.0, 867.0);
const RIGHT_HALF: Rect = Rect::new(724.0, 4.0, 712.0, 867.0);

fn launching(current: &str, index: usize, total: usize) -> RunnerState {
    RunnerState::LaunchingApps {
        current: current.into(),
        index,
        total,
    }
}

fn failed(message: &str) -> RunnerState {
    RunnerState::Failed {
        message: message.into(),
    }
}

/// A workspace of `names`, each already running with one window.
fn running_workspace(h: &Harness, names: &[&str]) -> Workspace {
    let mut ws = Workspace::new("dev");
    for name in names {
        let id = format!("com.example.{}", name.to_lowercase());
        h.mock.start(&id, name, false, 1);
        ws.apps.push(WorkspaceApp::new(*name, *name, id));
    }
    ws
}

#[tokio::test(start_paused = true)]
async fn starts_idle() {
    let h = Harness::new(Timing::default());
    assert_eq!(h.runner.state(), &RunnerState::Idle);
}

#[tokio::test(start_paused = true)]
async fn missing_permission_fails_before_any_work() {
    let mut h = Harness::new(Timing::default());
    let mut ws = running_workspace(&h, &["Mail", "Notes"]);
    ws.isolate_desktop = true;
    ws.tile_windows = true;
    h.perms.set_granted(false);

    let err = h.runner.run(&ws).await.unwrap_err();

    assert_eq!(err, Error::PermissionDenied);
    assert_eq!(h.states(), vec![failed("permission not granted")]);
    assert!(h.mock.calls().is_empty());
    assert_eq!(h.runner.state(), &failed("permission not granted"));
}

#[tokio::test(start_paused = true)]
async fn launches_every_app_in_order() {
    let mut h = Harness::new(Timing::default());
    let ws = running_workspace(&h, &["Mail", "Notes", "Music"]);

    let start = Instant::now();
    h.runner.run(&ws).await.unwrap();

    assert_eq!(
        h.states(),
        vec![
            launching("Mail", 0, 3),
            launching("Notes", 1, 3),
            launching("Music", 2, 3),
            RunnerState::Completed,
        ]
    );
    let activated: Vec<String> = h
        .mock
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("activate:"))
        .collect();
    assert_eq!(
        activated,
        vec![
            "activate:com.example.mail",
            "activate:com.example.notes",
            "activate:com.example.music",
        ]
    );
    // Three activate settles and two inter-app delays; none after the last app.
    assert_eq!(start.elapsed(), Duration::from_millis(3 * 400 + 2 * 500));
}

#[tokio::test(start_paused = true)]
async fn empty_workspace_completes() {
    let mut h = Harness::new(Timing::default());
    h.runner.run(&Workspace::new("empty")).await.unwrap();
    assert_eq!(h.states(), vec![RunnerState::Completed]);
}

#[tokio::test(start_paused = true)]
async fn first_launch_failure_stops_the_run() {
    let mut h = Harness::new(Timing::default());
    let mut ws = running_workspace(&h, &["Mail"]);
    ws.apps.push(WorkspaceApp::new("ghost", "Ghost", "com.example.ghost"));
    ws.apps.push(WorkspaceApp::new("notes", "Notes", "com.example.notes"));
    h.mock.start("com.example.notes", "Notes", false, 1);
    ws.tile_windows = true;

    let err = h.runner.run(&ws).await.unwrap_err();

    assert_eq!(err.user_message(), "could not launch Ghost: not installed");
    assert_eq!(
        h.states(),
        vec![
            launching("Mail", 0, 3),
            launching("Ghost", 1, 3),
            failed("could not launch Ghost: not installed"),
        ]
    );
    assert!(!h.mock.calls_contains("resolve:com.example.notes"));
    assert_eq!(h.mock.count("set_frame:"), 0);
    // No rollback of the app that was already brought forward.
    assert!(h.mock.calls_contains("activate:com.example.mail"));
}

#[tokio::test(start_paused = true)]
async fn missing_identifier_fails_run() {
    let mut h = Harness::new(Timing::default());
    let mut ws = Workspace::new("broken");
    ws.apps.push(WorkspaceApp::new("x", "Mystery", ""));
    h.runner.run(&ws).await.unwrap_err();
    assert_eq!(
        h.states(),
        vec![
            launching("Mystery", 0, 1),
            failed("could not launch Mystery: no identifier"),
        ]
    );
    assert!(h.mock.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn isolation_runs_desktop_phases_first() {
    let mut h = Harness::new(Timing::default());
    let mut ws = running_workspace(&h, &["Mail"]);
    ws.isolate_desktop = true;

    let start = Instant::now();
    h.runner.run(&ws).await.unwrap();

    assert_eq!(
        h.states(),
        vec![
            RunnerState::PreparingDesktop,
            RunnerState::SwitchingDesktop,
            launching("Mail", 0, 1),
            RunnerState::Completed,
        ]
    );
    let calls = h.mock.calls();
    assert_eq!(&calls[..2], ["create_desktop", "switch_desktop"]);
    assert_eq!(start.elapsed(), Duration::from_millis(500 + 800 + 400));
}

#[tokio::test(start_paused = true)]
async fn desktop_creation_failure_is_fatal() {
    let mut h = Harness::new(Timing::default());
    let mut ws = running_workspace(&h, &["Mail"]);
    ws.isolate_desktop = true;
    h.mock.set_fail_create_desktop(true);

    h.runner.run(&ws).await.unwrap_err();

    assert_eq!(
        h.states(),
        vec![
            RunnerState::PreparingDesktop,
            failed("could not create a desktop: Mission Control unavailable"),
        ]
    );
    assert_eq!(h.mock.count("resolve:"), 0);
    assert_eq!(h.mock.count("switch_desktop"), 0);
}

#[tokio::test(start_paused = true)]
async fn desktop_switch_failure_is_fatal() {
    let mut h = Harness::new(Timing::default());
    let mut ws = running_workspace(&h, &["Mail"]);
    ws.isolate_desktop = true;
    h.mock.set_fail_switch_desktop(true);

    h.runner.run(&ws).await.unwrap_err();

    assert_eq!(
        h.states(),
        vec![
            RunnerState::PreparingDesktop,
            RunnerState::SwitchingDesktop,
            failed("could not switch to the new desktop: no desktop to switch to"),
        ]
    );
    assert_eq!(h.mock.count("resolve:"), 0);
}

#[tokio::test(start_paused = true)]
async fn tiling_positions_each_running_app() {
    let mut h = Harness::new(Timing::default());
    let mut ws = running_workspace(&h, &["Mail", "Notes"]);
    for app in &mut ws.apps {
        app.size = SizeClass::Small;
    }
    ws.tile_windows = true;

    let start = Instant::now();
    h.runner.run(&ws).await.unwrap();

    assert_eq!(
        h.states(),
        vec![
            launching("Mail", 0, 2),
            launching("Notes", 1, 2),
            RunnerState::PositioningWindows,
            RunnerState::Completed,
        ]
    );
    assert_eq!(
        h.mock.frames(),
        vec![
            ("com.example.mail".to_string(), 0, LEFT_HALF),
            ("com.example.notes".to_string(), 0, RIGHT_HALF),
        ]
    );
    // Two activate settles, one inter-app delay, positioning settle, one step.
    assert_eq!(
        start.elapsed(),
        Duration::from_millis(2 * 400 + 500 + 500 + 100)
    );
}

#[tokio::test(start_paused = true)]
async fn shared_identifier_entries_position_distinct_windows() {
    let mut h = Harness::new(Timing::immediate());
    h.mock.start("com.example.term", "Term", false, 2);
    let mut ws = Workspace::new("shells");
    for id in ["left", "right"] {
        let entry = WorkspaceApp::new(id, "Term", "com.example.term");
        ws.apps.push(entry.with_size(SizeClass::Small));
    }
    ws.tile_windows = true;

    h.runner.run(&ws).await.unwrap();

    assert_eq!(
        h.mock.frames(),
        vec![
            ("com.example.term".to_string(), 0, LEFT_HALF),
            ("com.example.term".to_string(), 1, RIGHT_HALF),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn entries_beyond_the_window_count_are_skipped() {
    let mut h = Harness::new(Timing::immediate());
    h.mock.start("com.example.term", "Term", false, 1);
    let mut ws = Workspace::new("shells");
    ws.apps.push(WorkspaceApp::new("a", "Term", "com.example.term"));
    ws.apps.push(WorkspaceApp::new("b", "Term", "com.example.term"));
    ws.tile_windows = true;

    h.runner.run(&ws).await.unwrap();

    assert!(h.mock.calls_contains("set_frame:com.example.term#1"));
    let windows: Vec<usize> = h.mock.frames().into_iter().map(|(_, w, _)| w).collect();
    assert_eq!(windows, vec![0]);
    assert_eq!(h.runner.state(), &RunnerState::Completed);
}

#[tokio::test(start_paused = true)]
async fn positioning_skips_apps_that_are_gone() {
    let mut h = Harness::new(Timing::default());
    let mut ws = running_workspace(&h, &["Mail"]);
    ws.apps.push(WorkspaceApp::new("agent", "Agent", "com.example.agent"));
    h.mock.install("com.example.agent", "Agent");
    h.mock.set_exits_on_launch("com.example.agent");
    ws.tile_windows = true;

    h.runner.run(&ws).await.unwrap();

    assert_eq!(h.runner.state(), &RunnerState::Completed);
    let framed: Vec<String> = h.mock.frames().into_iter().map(|(id, ..)| id).collect();
    assert_eq!(framed, vec!["com.example.mail"]);
}

#[tokio::test(start_paused = true)]
async fn positioning_failures_are_soft() {
    let mut h = Harness::new(Timing::immediate());
    let mut ws = running_workspace(&h, &["Mail", "Notes"]);
    ws.tile_windows = true;
    h.mock.set_fail_set_frame(true);

    h.runner.run(&ws).await.unwrap();

    assert_eq!(h.mock.count("set_frame:"), 2);
    assert_eq!(h.states().last(), Some(&RunnerState::Completed));
}

#[tokio::test(start_paused = true)]
async fn unknown_screen_skips_positioning() {
    let mut h = Harness::new(Timing::immediate());
    let mut ws = running_workspace(&h, &["Mail"]);
    ws.tile_windows = true;
    h.mock.set_fail_usable_area(true);

    h.runner.run(&ws).await.unwrap();

    assert_eq!(h.mock.count("set_frame:"), 0);
    assert_eq!(
        h.states(),
        vec![
            launching("Mail", 0, 1),
            RunnerState::PositioningWindows,
            RunnerState::Completed,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn cancellation_stops_at_next_suspension() {
    let mut h = Harness::new(Timing::default());
    let ws = running_workspace(&h, &["A", "B", "C", "D", "E"]);
    let token = CancellationToken::new();
    let t2 = token.clone();
    tokio::spawn(async move {
        time::sleep(Duration::from_millis(1000)).await;
        t2.cancel();
    });

    let err = h.runner.run_with_cancel(&ws, &token).await.unwrap_err();

    assert_eq!(err, Error::Cancelled);
    let states = h.states();
    assert_eq!(states.last(), Some(&failed("cancelled")));
    assert!(!states.contains(&launching("E", 4, 5)));
    assert!(h.mock.count("activate:") < 5);
}

#[tokio::test(start_paused = true)]
async fn pre_cancelled_run_does_nothing() {
    let mut h = Harness::new(Timing::default());
    let ws = running_workspace(&h, &["A"]);
    let token = CancellationToken::new();
    token.cancel();
    h.runner.run_with_cancel(&ws, &token).await.unwrap_err();
    assert_eq!(h.states(), vec![failed("cancelled")]);
    assert!(h.mock.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn run_deadline_fails_with_timed_out() {
    let timing = Timing {
        run_timeout_ms: Some(1000),
        ..Timing::default()
    };
    let mut h = Harness::new(timing);
    let mut ws = Workspace::new("slow");
    ws.apps.push(WorkspaceApp::new("bar", "Bar", "com.example.bar"));
    h.mock.install("com.example.bar", "Bar");
    h.mock.set_windowless("com.example.bar");

    let start = Instant::now();
    let err = h.runner.run(&ws).await.unwrap_err();

    assert_eq!(err, Error::TimedOut);
    assert_eq!(h.runner.state(), &failed("timed out"));
    assert_eq!(start.elapsed(), Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn rerun_starts_from_the_first_phase() {
    let mut h = Harness::new(Timing::immediate());
    let ws = running_workspace(&h, &["Mail"]);
    h.perms.set_granted(false);
    h.runner.run(&ws).await.unwrap_err();
    h.perms.set_granted(true);
    h.runner.run(&ws).await.unwrap();
    assert_eq!(
        h.states(),
        vec![
            failed("permission not granted"),
            launching("Mail", 0, 1),
            RunnerState::Completed,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn observer_closure_receives_transitions() {
    let mock = MockSystem::new();
    mock.start("com.example.mail", "Mail", false, 1);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s2 = seen.clone();
    let deps = Deps::from_backend(mock, Arc::new(StaticPermissions::new(true)));
    let mut runner = Runner::new(
        deps,
        Timing::immediate(),
        Observer(move |s: &RunnerState| s2.lock().unwrap().push(s.to_string())),
    );
    let mut ws = Workspace::new("dev");
    ws.apps.push(WorkspaceApp::new("m", "Mail", "com.example.mail"));
    runner.run(&ws).await.unwrap();
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["Launching Mail (1/1)".to_string(), "Completed".to_string()]
    );
}
