// Defaults for runner timing. Values are milliseconds.

pub(crate) const UNHIDE_SETTLE_MS: u64 = 200;
pub(crate) const ACTIVATE_SETTLE_MS: u64 = 400;
pub(crate) const WINDOW_POLL_MS: u64 = 200;
pub(crate) const WINDOW_TIMEOUT_MS: u64 = 5_000;
pub(crate) const INTER_APP_MS: u64 = 500;
pub(crate) const DESKTOP_CREATE_SETTLE_MS: u64 = 500;
pub(crate) const DESKTOP_SWITCH_SETTLE_MS: u64 = 800;
pub(crate) const POSITIONING_SETTLE_MS: u64 = 500;
pub(crate) const POSITIONING_STEP_MS: u64 = 100;

// Serde default functions
pub(crate) const fn default_unhide_settle_ms() -> u64 {
    UNHIDE_SETTLE_MS
}
pub(crate) const fn default_activate_settle_ms() -> u64 {
    ACTIVATE_SETTLE_MS
}
pub(crate) const fn default_window_poll_ms() -> u64 {
    WINDOW_POLL_MS
}
pub(crate) const fn default_window_timeout_ms() -> u64 {
    WINDOW_TIMEOUT_MS
}
pub(crate) const fn default_inter_app_ms() -> u64 {
    INTER_APP_MS
}
pub(crate) const fn default_desktop_create_settle_ms() -> u64 {
    DESKTOP_CREATE_SETTLE_MS
}
pub(crate) const fn default_desktop_switch_settle_ms() -> u64 {
    DESKTOP_SWITCH_SETTLE_MS
}
pub(crate) const fn default_positioning_settle_ms() -> u64 {
    POSITIONING_SETTLE_MS
}
pub(crate) const fn default_positioning_step_ms() -> u64 {
    POSITIONING_STEP_MS
}
