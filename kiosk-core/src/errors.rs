use thiserror::Error;

/// The two failure kinds the launcher distinguishes.
///
/// `ConfigUnavailable` is terminal for a run: with no URL known there is
/// nothing to retry, so the shell shows the static error page and stops.
/// `LoadFailed` is always recovered by the fixed-interval retry loop and is
/// never surfaced as fatal.
#[derive(Debug, Error)]
pub enum KioskError {
    #[error("configuration unavailable: {0}")]
    ConfigUnavailable(String),

    #[error("navigation failed with net error {code}")]
    LoadFailed { code: i64 },
}
