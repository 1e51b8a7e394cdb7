use std::path::Path;

use crate::{Error, SizeClass, Timing, load_from_path, load_from_str, resolve_config_path};

const SAMPLE: &str = r#"(
    timing: (inter_app_ms: 600, run_timeout_ms: Some(30000)),
    workspaces: [
        (
            name: "Writing",
            tile_windows: true,
            apps: [
                (id: "1", name: "Safari", identifier: "com.apple.Safari", size: large),
                (id: "2", name: "Notes", identifier: "com.apple.Notes", size: small,
                 frame: Some((x: 0.0, y: 0.0, w: 800.0, h: 600.0))),
                (id: "3", name: "Notes", identifier: "com.apple.Notes"),
            ],
        ),
        (
            name: "Focus",
            isolate_desktop: true,
            apps: [(id: "a", name: "Mystery", identifier: "")],
        ),
    ],
)"#;

#[test]
fn parses_sample() {
    let cfg = load_from_str(SAMPLE).unwrap();
    assert_eq!(cfg.workspaces.len(), 2);

    let writing = cfg.workspace("Writing").unwrap();
    assert!(writing.tile_windows);
    assert!(!writing.isolate_desktop);
    assert_eq!(writing.apps[0].size, SizeClass::Large);
    assert_eq!(writing.apps[2].size, SizeClass::Medium);
    assert!(writing.apps[1].frame.is_some());
    assert_eq!(writing.apps[1].identifier, writing.apps[2].identifier);

    let focus = cfg.workspace("Focus").unwrap();
    assert!(focus.isolate_desktop);
    assert!(focus.apps[0].identifier.is_empty());
    assert!(cfg.workspace("Missing").is_none());
}

#[test]
fn timing_overrides_merge_with_defaults() {
    let cfg = load_from_str(SAMPLE).unwrap();
    let d = Timing::default();
    assert_eq!(cfg.timing.inter_app_ms, 600);
    assert_eq!(cfg.timing.run_timeout_ms, Some(30_000));
    assert_eq!(cfg.timing.window_timeout_ms, d.window_timeout_ms);
    assert_eq!(cfg.timing.desktop_switch_settle_ms, 800);
}

#[test]
fn empty_file_defaults() {
    let cfg = load_from_str("(workspaces: [])").unwrap();
    assert!(cfg.workspaces.is_empty());
    assert_eq!(cfg.timing, Timing::default());
}

#[test]
fn duplicate_workspace_names_rejected() {
    let err = load_from_str(r#"(workspaces: [(name: "A"), (name: "A")])"#).unwrap_err();
    match err {
        Error::Validation { workspace, .. } => assert_eq!(workspace.as_deref(), Some("A")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn duplicate_app_ids_rejected() {
    let src = r#"(workspaces: [(name: "A", apps: [
        (id: "x", name: "One", identifier: "a.b"),
        (id: "x", name: "Two", identifier: "a.c"),
    ])])"#;
    let err = load_from_str(src).unwrap_err();
    assert!(err.to_string().contains("\"x\""));
    assert!(err.pretty().contains("workspace \"A\""));
}

#[test]
fn syntax_errors_are_parse_errors() {
    let err = load_from_str("(workspaces: [").unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn missing_file_reports_path() {
    let p = Path::new("/nonexistent/deskset/workspaces.ron");
    let err = load_from_path(p).unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
    assert_eq!(err.path(), Some(p));
}

#[test]
fn explicit_path_wins() {
    let p = Path::new("/tmp/custom.ron");
    assert_eq!(resolve_config_path(Some(p)).unwrap(), p);
}

#[test]
fn bundled_demo_loads() {
    let p = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/workspaces.ron");
    let cfg = load_from_path(&p).unwrap();
    assert_eq!(cfg.timing.inter_app_ms, 600);
    assert!(cfg.workspace("Writing").unwrap().tile_windows);
    assert!(cfg.workspace("Focus").unwrap().isolate_desktop);
}
