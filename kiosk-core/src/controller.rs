use std::time::Duration;

use crate::config::{ConfigRecord, ConfigSource};
use crate::traits::{LocalPage, RetryScheduler, WebviewHost};

/// Fixed interval between load retries. Deliberately constant: the kiosk must
/// eventually come up, so the loop runs without backoff and without an
/// attempt cap until a load succeeds or the process exits.
pub const RETRY_DELAY: Duration = Duration::from_millis(5000);

/// How long the shell waits after window-ready before switching into
/// full-screen kiosk mode. Entering kiosk mode immediately at creation is
/// unreliable on some platforms, so the switch is issued shortly after.
pub const KIOSK_ENTER_DELAY: Duration = Duration::from_millis(100);

/// Where the controller currently stands with the configured URL.
///
/// `Loaded` and the missing-config error page are the only states without an
/// outgoing transition defined here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Host-delivered events the dispatch loop feeds the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KioskEvent {
    /// The webview reported a navigation failure with a net error code.
    LoadFailed { code: i64 },
    /// The webview finished loading the navigation target.
    LoadFinished,
    /// A previously scheduled retry timer expired.
    RetryElapsed,
}

/// Drives the window's navigation target and recovers from load failures.
///
/// Owns the configuration record (read once at start, never re-read), the
/// load-attempt counter, and the load state. All methods run on the single
/// dispatch thread; events arrive strictly one at a time.
pub struct LoadController<H, S> {
    host: H,
    scheduler: S,
    record: Option<ConfigRecord>,
    attempts: u64,
    state: LoadState,
}

impl<H, S> LoadController<H, S>
where
    H: WebviewHost,
    S: RetryScheduler,
{
    pub fn new(host: H, scheduler: S) -> Self {
        Self {
            host,
            scheduler,
            record: None,
            attempts: 0,
            state: LoadState::Idle,
        }
    }

    /// Called once at application-ready time.
    ///
    /// Asks the collaborator for a configuration record. With a record in
    /// hand the first navigation is issued; without one the missing-config
    /// error page is shown and no retry is scheduled, since there is no URL
    /// to retry.
    pub fn start(&mut self, source: &dyn ConfigSource) {
        match source.load() {
            Some(record) => {
                self.record = Some(record);
                self.load_config_url();
            }
            None => {
                tracing::warn!("no kiosk config available, showing config error page");
                self.host.navigate_local(LocalPage::ConfigError);
            }
        }
    }

    /// Instructs the window to navigate to the configured URL.
    ///
    /// The outcome is observed asynchronously via `KioskEvent`s. A retry that
    /// fires without a record (nothing was ever loaded) is logged and
    /// ignored.
    pub fn load_config_url(&mut self) {
        match &self.record {
            Some(record) => {
                tracing::info!(url = %record.url, attempts = self.attempts, "loading configured url");
                self.state = LoadState::Loading;
                self.host.navigate(&record.url);
            }
            None => {
                tracing::warn!("retry elapsed without a config record, ignoring");
            }
        }
    }

    /// The webview reported a navigation failure.
    ///
    /// Shows the launch-delay interstitial and schedules a one-shot retry
    /// with the original record. The attempt counter only ever grows; it is
    /// used for logging, never for giving up.
    pub fn on_load_failed(&mut self, code: i64) {
        self.attempts += 1;
        self.state = LoadState::Failed;
        tracing::warn!(code, attempts = self.attempts, "failed to load configured url");
        self.host.navigate_local(LocalPage::LaunchDelay);
        self.scheduler.schedule_retry(RETRY_DELAY);
    }

    /// The webview finished a load. Purely observational.
    pub fn on_load_finished(&mut self) {
        self.state = LoadState::Loaded;
        tracing::info!(attempts = self.attempts, "finished loading");
    }

    /// Single dispatch point for the event loop.
    pub fn handle(&mut self, event: KioskEvent) {
        match event {
            KioskEvent::LoadFailed { code } => self.on_load_failed(code),
            KioskEvent::LoadFinished => self.on_load_finished(),
            KioskEvent::RetryElapsed => self.load_config_url(),
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }
}
