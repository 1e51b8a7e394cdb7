//! Parse and load workspace definition files.

use std::{collections::HashSet, fs, path::Path};

use tracing::debug;

use crate::{Config, Error, Workspace};

/// Parse and validate a workspace file from RON source text.
pub fn load_from_str(source: &str) -> Result<Config, Error> {
    let config: Config = ron::from_str(source).map_err(|e| Error::Parse {
        path: None,
        message: e.to_string(),
    })?;
    validate(&config)?;
    Ok(config)
}

/// Read, parse, and validate the workspace file at `path`.
pub fn load_from_path(path: &Path) -> Result<Config, Error> {
    let source = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    let config = load_from_str(&source).map_err(|e| e.with_path(path))?;
    debug!(
        path = %path.display(),
        workspaces = config.workspaces.len(),
        "loaded workspace file"
    );
    Ok(config)
}

/// Check cross-entry invariants that serde cannot express.
fn validate(config: &Config) -> Result<(), Error> {
    let mut names = HashSet::new();
    for ws in &config.workspaces {
        if ws.name.trim().is_empty() {
            return Err(invalid(None, "workspace name must not be empty"));
        }
        if !names.insert(ws.name.as_str()) {
            return Err(invalid(Some(ws), "workspace name is defined more than once"));
        }
        let mut ids = HashSet::new();
        for app in &ws.apps {
            if app.id.is_empty() {
                return Err(invalid(
                    Some(ws),
                    &format!("app \"{}\" has an empty id", app.name),
                ));
            }
            if !ids.insert(app.id.as_str()) {
                return Err(invalid(
                    Some(ws),
                    &format!("app id \"{}\" is used more than once", app.id),
                ));
            }
        }
    }
    Ok(())
}

/// Build a validation error scoped to `ws`.
fn invalid(ws: Option<&Workspace>, message: &str) -> Error {
    Error::Validation {
        path: None,
        workspace: ws.map(|w| w.name.clone()),
        message: message.to_string(),
    }
}
