//! Simple, macOS-only permission checks for deskset.
//!
//! This crate exposes a minimal API to query whether the process has the
//! Accessibility permission needed to drive other applications, and to read
//! the one Mission Control preference that desktop isolation depends on.
//!
//! Notes
//! - `accessibility_ok()` checks the global Accessibility permission.
//! - `open_accessibility_settings()` opens the matching System Settings pane.
//! - `auto_rearrange_spaces()` reads "Automatically rearrange Spaces based on
//!   most recent use". Switching to the newest desktop is unreliable when it
//!   is on.
//!
//! [`PermissionOracle`] is the injectable seam used by the runner; tests use
//! [`StaticPermissions`].
//!
//! On other platforms the permission check reports "not granted" and the
//! preference reads as unknown.

use std::{
    process::Command,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

#[cfg(target_os = "macos")]
use core_foundation::{
    base::{CFType, CFTypeRef, TCFType},
    boolean::CFBoolean,
    number::CFNumber,
    string::{CFString, CFStringRef},
};

#[cfg(target_os = "macos")]
#[link(name = "ApplicationServices", kind = "framework")]
unsafe extern "C" {
    fn AXIsProcessTrusted() -> bool;
}

/// Settings URL for the Accessibility privacy pane.
const ACCESSIBILITY_PANE: &str =
    "x-apple.systempreferences:com.apple.preference.security?Privacy_Accessibility";

/// Check if the process holds the "Accessibility" permission.
#[cfg(target_os = "macos")]
pub fn accessibility_ok() -> bool {
    unsafe { AXIsProcessTrusted() }
}

/// Check if the process holds the "Accessibility" permission.
#[cfg(not(target_os = "macos"))]
pub fn accessibility_ok() -> bool {
    false
}

/// Open macOS Accessibility settings in System Settings.
pub fn open_accessibility_settings() {
    if Command::new("open").arg(ACCESSIBILITY_PANE).spawn().is_err() {
        tracing::warn!("failed to open Accessibility settings");
    }
}

/// Dock preference domain.
#[cfg(target_os = "macos")]
const DOCK_DOMAIN: &str = "com.apple.dock";

/// Dock key backing "Automatically rearrange Spaces based on most recent use".
#[cfg(target_os = "macos")]
const MRU_SPACES_KEY: &str = "mru-spaces";

#[cfg(target_os = "macos")]
#[link(name = "CoreFoundation", kind = "framework")]
unsafe extern "C" {
    fn CFPreferencesCopyAppValue(key: CFStringRef, application_id: CFStringRef) -> CFTypeRef;
}

/// Read the "Automatically rearrange Spaces" preference.
///
/// Returns `None` when the preference cannot be queried at all (off macOS, or
/// a value of an unexpected type). An unset key means the system default,
/// which is on.
#[cfg(target_os = "macos")]
pub fn auto_rearrange_spaces() -> Option<bool> {
    let key = CFString::new(MRU_SPACES_KEY);
    let domain = CFString::new(DOCK_DOMAIN);
    let raw = unsafe {
        CFPreferencesCopyAppValue(key.as_concrete_TypeRef(), domain.as_concrete_TypeRef())
    };
    if raw.is_null() {
        return rearrange_setting(PrefValue::Unset);
    }
    let value = unsafe { CFType::wrap_under_create_rule(raw) };
    let pref = if let Some(b) = value.downcast::<CFBoolean>() {
        PrefValue::Bool(bool::from(b))
    } else if let Some(n) = value.downcast::<CFNumber>().and_then(|n| n.to_i64()) {
        PrefValue::Int(n)
    } else {
        PrefValue::Other
    };
    rearrange_setting(pref)
}

/// Read the "Automatically rearrange Spaces" preference.
#[cfg(not(target_os = "macos"))]
pub fn auto_rearrange_spaces() -> Option<bool> {
    None
}

/// Shape of a stored preference value.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrefValue {
    /// Key not present in the domain.
    Unset,
    /// Stored as a boolean.
    Bool(bool),
    /// Stored as an integer (`defaults write ... -int`).
    Int(i64),
    /// Stored with any other type.
    Other,
}

/// Interpret the `mru-spaces` value; unset falls back to the system default.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn rearrange_setting(value: PrefValue) -> Option<bool> {
    match value {
        PrefValue::Unset => Some(true),
        PrefValue::Bool(b) => Some(b),
        PrefValue::Int(n) => Some(n != 0),
        PrefValue::Other => None,
    }
}

/// Source of truth for whether the automation permission is granted.
pub trait PermissionOracle: Send + Sync {
    /// Whether the permission is currently granted.
    fn is_granted(&self) -> bool;
    /// Ask the user to grant the permission. Never blocks on the answer.
    fn request_grant(&self);
}

/// Production oracle backed by the live process permission state.
pub struct SystemPermissions;

impl PermissionOracle for SystemPermissions {
    fn is_granted(&self) -> bool {
        accessibility_ok()
    }

    fn request_grant(&self) {
        open_accessibility_settings();
    }
}

/// Oracle with a fixed answer that counts grant requests.
#[derive(Debug, Default)]
pub struct StaticPermissions {
    /// Current answer for [`PermissionOracle::is_granted`].
    granted: AtomicBool,
    /// Number of [`PermissionOracle::request_grant`] calls.
    requests: AtomicUsize,
}

impl StaticPermissions {
    /// Create an oracle answering `granted`.
    pub fn new(granted: bool) -> Self {
        Self {
            granted: AtomicBool::new(granted),
            requests: AtomicUsize::new(0),
        }
    }

    /// Change the answer.
    pub fn set_granted(&self, v: bool) {
        self.granted.store(v, Ordering::SeqCst);
    }

    /// How many times a grant was requested.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl PermissionOracle for StaticPermissions {
    fn is_granted(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    fn request_grant(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}
