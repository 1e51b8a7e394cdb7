//! winops: application lookup, launch, and window control for deskset.
//!
//! The runner talks to the machine only through the [`AppRegistry`] and
//! [`WindowControl`] seams. [`MacOps`] is the production backend: AppKit for
//! apps and screens, Accessibility for windows and Mission Control. With the
//! `test-utils` feature, `MockSystem` provides a scriptable in-memory machine.
//!
//! Most operations require Accessibility permission.

mod app;
mod error;
mod frame;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(any(test, feature = "test-utils"))]
mod mock;
mod ops;
#[cfg(not(target_os = "macos"))]
mod unsupported;

pub use app::{AppHandle, LaunchOptions, RunningApp, WindowInfo};
pub use error::{Error, Result};
#[cfg(target_os = "macos")]
pub use macos::MacOps;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockSystem;
pub use ops::{AppRegistry, WindowControl};
#[cfg(not(target_os = "macos"))]
pub use unsupported::MacOps;
