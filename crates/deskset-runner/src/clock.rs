//! Cancellable settle delays.

use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::{Error, Result};

/// Sleep for `dur` unless `cancel` fires first.
///
/// Checks the token even for a zero duration, so every suspension point is
/// also a cancellation point.
pub async fn pause(dur: Duration, cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    if dur.is_zero() {
        return Ok(());
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        _ = time::sleep(dur) => Ok(()),
    }
}
