#![warn(missing_docs)]

//! Entry point for the `deskset` binary.

mod area;
mod cli;
mod error;
mod list;
mod plan;
mod restore;

use std::{path::Path, process};

use clap::Parser;
use config::{Config, Workspace};
use deskset_runner::{EnvironmentReport, diagnose};
use permissions::{PermissionOracle, SystemPermissions};
use tracing::{debug, error};

use crate::{
    cli::{Cli, Commands},
    error::{Error, Result},
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and dispatch to the chosen subcommand.
fn run() -> Result<()> {
    let Cli {
        log,
        config,
        command,
    } = Cli::parse();
    logging::init(&log.spec());

    match command {
        Commands::Diagnose(args) => {
            let report = EnvironmentReport::probe(&SystemPermissions, args.isolation);
            println!("{}", diagnose(&report));
            Ok(())
        }
        Commands::Grant => {
            SystemPermissions.request_grant();
            Ok(())
        }
        Commands::List => {
            list::run(&load(config.as_deref())?);
            Ok(())
        }
        Commands::Plan(args) => plan::run(&load(config.as_deref())?, &args),
        Commands::Run(args) => restore::run(&load(config.as_deref())?, &args),
    }
}

/// Resolve and load the workspace file.
fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = config::resolve_config_path(explicit)?;
    debug!(path = %path.display(), "loading workspaces");
    Ok(config::load_from_path(&path)?)
}

/// Look up a workspace by name.
pub fn workspace<'a>(cfg: &'a Config, name: &str) -> Result<&'a Workspace> {
    cfg.workspace(name).ok_or_else(|| Error::UnknownWorkspace {
        name: name.to_string(),
        known: cfg
            .workspaces
            .iter()
            .map(|w| w.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    })
}
