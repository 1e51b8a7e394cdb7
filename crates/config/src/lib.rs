//! Workspace definitions for deskset: types, timing defaults, and RON loading.
#![allow(missing_docs)]

use std::{
    env,
    path::{Path, PathBuf},
};

mod defaults;
mod error;
mod loader;
mod types;

#[cfg(test)]
mod test_load;

pub use error::Error;
pub use grid_layout::{Rect, SizeClass};
pub use loader::{load_from_path, load_from_str};
pub use types::{Config, Timing, Workspace, WorkspaceApp};

/// Determine the preferred workspace file path (`~/.deskset/workspaces.ron`).
pub fn default_config_path() -> PathBuf {
    let mut p = PathBuf::from(env::var_os("HOME").unwrap_or_default());
    p.push(".deskset");
    p.push("workspaces.ron");
    p
}

/// Resolve the effective workspace file path using the default policy.
///
/// Policy:
/// 1) Use `explicit` when provided.
/// 2) Else use `~/.deskset/workspaces.ron` when it exists.
/// 3) Else return a clear "no config found" error.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, Error> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let preferred = default_config_path();
    if preferred.exists() {
        return Ok(preferred);
    }

    Err(Error::Read {
        path: Some(preferred),
        message: "No workspace file found. Create ~/.deskset/workspaces.ron or pass --config"
            .to_string(),
    })
}
