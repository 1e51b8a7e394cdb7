use std::sync::Arc;

use permissions::{PermissionOracle, SystemPermissions};
use winops::{AppRegistry, MacOps, WindowControl};

/// External collaborators a runner drives.
///
/// The runner never owns the machine: every collaborator is shared and may
/// observe changes made by the user mid-run.
#[derive(Clone)]
pub struct Deps {
    /// Installed and running application lookup.
    pub registry: Arc<dyn AppRegistry>,
    /// Window and desktop automation.
    pub control: Arc<dyn WindowControl>,
    /// Accessibility permission check.
    pub permissions: Arc<dyn PermissionOracle>,
}

impl Deps {
    /// Collaborators backed by the live macOS session.
    pub fn system() -> Self {
        let ops = Arc::new(MacOps);
        Self {
            registry: ops.clone(),
            control: ops,
            permissions: Arc::new(SystemPermissions),
        }
    }

    /// Use one value for both the registry and window control seams.
    pub fn from_backend<B>(backend: B, permissions: Arc<dyn PermissionOracle>) -> Self
    where
        B: AppRegistry + WindowControl + 'static,
    {
        let backend = Arc::new(backend);
        Self {
            registry: backend.clone(),
            control: backend,
            permissions,
        }
    }
}
