//! Command-line interface definitions for deskset.

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use logging::LogArgs;

use crate::area::Area;

/// Command-line interface for the `deskset` binary.
#[derive(Parser, Debug)]
#[command(
    name = "deskset",
    about = "Restore a named workspace of applications",
    version
)]
pub struct Cli {
    /// Logging controls.
    #[command(flatten)]
    pub log: LogArgs,

    /// Workspace definition file (RON). Defaults to ~/.deskset/workspaces.ron.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// What to do.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the workspaces defined in the config file.
    List,
    /// Show where each app of a workspace would be tiled, without moving anything.
    Plan(PlanArgs),
    /// Restore a workspace.
    Run(RunArgs),
    /// Check permissions and system settings.
    Diagnose(DiagnoseArgs),
    /// Open the Accessibility settings pane.
    Grant,
}

/// Arguments for the `plan` subcommand.
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Workspace name.
    pub name: String,

    /// Target area as `WxH` or `WxH+X+Y`. Defaults to the usable area of the
    /// current screen.
    #[arg(long, value_name = "AREA")]
    pub area: Option<Area>,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Workspace name.
    pub name: String,

    /// Give up on the whole run after this long.
    #[arg(long, value_parser = humantime::parse_duration, value_name = "DURATION")]
    pub timeout: Option<Duration>,

    /// How long to wait for a freshly launched app to show a window.
    #[arg(long, value_parser = humantime::parse_duration, value_name = "DURATION")]
    pub window_timeout: Option<Duration>,

    /// Tile windows even if the workspace does not ask for it.
    #[arg(long)]
    pub tile: bool,

    /// Isolate into a new desktop even if the workspace does not ask for it.
    #[arg(long)]
    pub isolate: bool,
}

/// Arguments for the `diagnose` subcommand.
#[derive(Args, Debug, Clone)]
pub struct DiagnoseArgs {
    /// Also check the settings desktop isolation depends on.
    #[arg(long)]
    pub isolation: bool,
}
