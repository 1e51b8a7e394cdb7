//! Remediation text for a failed or suspicious environment.

use permissions::PermissionOracle;

/// Returned when nothing needs fixing.
pub const ALL_GOOD: &str = "All checks passed: deskset has everything it needs.";

/// Remediation for missing Accessibility access.
pub const GRANT_ACCESSIBILITY: &str = "Grant Accessibility access in System Settings → Privacy & Security → Accessibility, then enable deskset (or the terminal running it).";

/// Remediation for Spaces being reordered by recent use.
pub const DISABLE_SPACE_REARRANGE: &str = "Turn off \"Automatically rearrange Spaces based on most recent use\" in System Settings → Desktop & Dock → Mission Control.";

/// Environment predicates that affect whether a run can succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentReport {
    /// Accessibility permission is granted.
    pub accessibility_granted: bool,
    /// Spaces are reordered by most recent use. `None` when not relevant
    /// (no desktop isolation) or unknown.
    pub auto_rearrange_spaces: Option<bool>,
}

impl EnvironmentReport {
    /// Read the predicates from the live system.
    ///
    /// The Spaces preference is only consulted when `uses_isolation` is set.
    pub fn probe(oracle: &dyn PermissionOracle, uses_isolation: bool) -> Self {
        Self {
            accessibility_granted: oracle.is_granted(),
            auto_rearrange_spaces: if uses_isolation {
                permissions::auto_rearrange_spaces()
            } else {
                None
            },
        }
    }

    /// Remediation steps for every failing predicate, in a fixed order.
    pub fn remediation_steps(&self) -> Vec<&'static str> {
        let mut steps = Vec::new();
        if !self.accessibility_granted {
            steps.push(GRANT_ACCESSIBILITY);
        }
        if self.auto_rearrange_spaces == Some(true) {
            steps.push(DISABLE_SPACE_REARRANGE);
        }
        steps
    }

    /// True when no remediation is needed.
    pub fn is_healthy(&self) -> bool {
        self.remediation_steps().is_empty()
    }
}

/// Human-readable remediation text for `report`. Never fails.
pub fn diagnose(report: &EnvironmentReport) -> String {
    let steps = report.remediation_steps();
    if steps.is_empty() {
        return ALL_GOOD.to_string();
    }
    let mut out = String::from("To fix:");
    for step in steps {
        out.push_str("\n• ");
        out.push_str(step);
    }
    out
}
