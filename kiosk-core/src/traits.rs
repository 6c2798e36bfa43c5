// Capability traits the desktop shell implements on top of the real webview.
// The controller only ever talks to these, so tests substitute doubles.

use std::time::Duration;

/// The two static HTML documents bundled with the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalPage {
    /// Shown when no configuration is available. Terminal for the run.
    ConfigError,
    /// Interstitial shown between a load failure and the scheduled retry.
    LaunchDelay,
}

impl LocalPage {
    /// File name of the bundled document, for shells that navigate by path.
    pub fn file_name(&self) -> &'static str {
        match self {
            LocalPage::ConfigError => "config-error.html",
            LocalPage::LaunchDelay => "launch-delay.html",
        }
    }
}

/// Host commands the controller issues against the single application window.
///
/// Both calls are fire-and-forget: success or failure of a navigation is
/// observed asynchronously through host-delivered events, never through the
/// call's return.
pub trait WebviewHost {
    fn navigate(&self, url: &str);
    fn navigate_local(&self, page: LocalPage);
}

/// One-shot retry timer.
///
/// `schedule_retry` arranges for a `KioskEvent::RetryElapsed` to reach the
/// dispatch loop after `delay`. The timer is fire-and-forget: it is not
/// cancellable and nothing awaits it, so a retry scheduled before a success
/// still fires afterwards (re-navigating to the same URL, a no-op in effect).
pub trait RetryScheduler {
    fn schedule_retry(&self, delay: Duration);
}
