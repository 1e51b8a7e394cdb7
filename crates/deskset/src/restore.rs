//! `deskset run`.

use std::time::Duration;

use config::{Config, Timing};
use deskset_runner::{CancellationToken, Deps, EnvironmentReport, Runner, RunnerState, diagnose};
use humantime::format_duration;
use permissions::SystemPermissions;
use tokio::{runtime::Builder, signal, sync::mpsc, time::Instant};
use tracing::{info, warn};

use crate::{cli::RunArgs, error::Result, workspace};

/// Apply CLI overrides to the configured timing.
fn timing_for(base: Timing, args: &RunArgs) -> Timing {
    let ms = |d: Duration| d.as_millis().min(u128::from(u64::MAX)) as u64;
    Timing {
        run_timeout_ms: args.timeout.map(ms).or(base.run_timeout_ms),
        window_timeout_ms: args.window_timeout.map_or(base.window_timeout_ms, ms),
        ..base
    }
}

/// One printed line per state, prefixed with a percentage while apps launch.
fn progress_line(state: &RunnerState) -> String {
    match state.fraction() {
        Some(f) => format!("[{:>3.0}%] {state}", f * 100.0),
        None => state.to_string(),
    }
}

/// Restore a workspace, printing each state as it happens.
pub fn run(cfg: &Config, args: &RunArgs) -> Result<()> {
    let mut ws = workspace(cfg, &args.name)?.clone();
    ws.isolate_desktop |= args.isolate;
    ws.tile_windows |= args.tile;
    let timing = timing_for(cfg.timing, args);

    let runtime = Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(async {
        let (tx, mut rx) = mpsc::unbounded_channel::<RunnerState>();
        let printer = tokio::spawn(async move {
            while let Some(state) = rx.recv().await {
                println!("{}", progress_line(&state));
            }
        });

        let cancel = CancellationToken::new();
        let on_signal = cancel.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                warn!("interrupted; stopping at the next step");
                on_signal.cancel();
            }
        });

        let start = Instant::now();
        let mut runner = Runner::new(Deps::system(), timing, tx);
        let result = runner.run_with_cancel(&ws, &cancel).await;
        drop(runner);
        printer.await.ok();
        info!(
            workspace = ws.name,
            elapsed = %format_duration(Duration::from_millis(start.elapsed().as_millis() as u64)),
            "run finished"
        );

        if let Err(err) = &result {
            let report = EnvironmentReport::probe(&SystemPermissions, ws.isolate_desktop);
            eprintln!("{}", diagnose(&report));
            if err.needs_permission() {
                eprintln!("Run `deskset grant` to open the Accessibility settings.");
            }
        }
        result.map_err(Into::into)
    })
}
