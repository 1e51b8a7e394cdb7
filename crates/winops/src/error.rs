use thiserror::Error;

/// Errors that can occur during app and window operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Accessibility permission is required for this operation.
    #[error("accessibility permission not granted")]
    Permission,

    /// AppKit screen queries must be made from the main thread.
    #[error("must be called on the main thread")]
    MainThread,

    /// No application bundle is registered for the identifier.
    #[error("app not installed: {0}")]
    NotInstalled(String),

    /// The target application is not running.
    #[error("app not running: {0}")]
    NotRunning(String),

    /// The accessibility element for a process could not be created.
    #[error("no accessibility element for pid {0}")]
    AppElement(i32),

    /// The requested window does not exist.
    #[error("no window {index} for pid {pid}")]
    NoWindow {
        /// Owning process.
        pid: i32,
        /// Zero-based position in the app's window list.
        index: usize,
    },

    /// A window disappeared while it was being changed.
    #[error("window went away")]
    WindowGone,

    /// An accessibility call returned an error code.
    #[error("accessibility error {code} during {op}")]
    AxCode {
        /// Operation that failed.
        op: &'static str,
        /// Raw `AXError` value.
        code: i32,
    },

    /// AppKit declined the request.
    #[error("{0} was refused")]
    Refused(&'static str),

    /// A required system UI element could not be found.
    #[error("could not find {0}")]
    UiNotFound(&'static str),

    /// The operation has no implementation on this platform.
    #[error("not supported on this platform")]
    Unsupported,

    /// Failure reported by a backend without a more specific category.
    #[error("{0}")]
    Other(String),
}

/// Convenient result type for window operations.
pub type Result<T> = std::result::Result<T, Error>;
