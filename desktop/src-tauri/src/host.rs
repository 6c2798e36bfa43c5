use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use tauri::{Url, WebviewWindow};

use kiosk_core::{KioskEvent, LocalPage, RetryScheduler, WebviewHost};

use crate::probe;

const CONFIG_ERROR_PAGE: &str = include_str!("../../pages/config-error.html");
const LAUNCH_DELAY_PAGE: &str = include_str!("../../pages/launch-delay.html");

/// `WebviewHost` over the real Tauri window.
///
/// Navigation is issued through `eval` so it works regardless of the origin
/// currently loaded. The webview does not surface engine-level load errors,
/// so each navigation also kicks off a reachability probe that reports
/// unreachable targets as `LoadFailed` events.
pub struct TauriHost {
    window: WebviewWindow,
    events: Sender<KioskEvent>,
}

impl TauriHost {
    pub fn new(window: WebviewWindow, events: Sender<KioskEvent>) -> Self {
        Self { window, events }
    }
}

impl WebviewHost for TauriHost {
    fn navigate(&self, url: &str) {
        probe::spawn(url.to_string(), self.events.clone());
        let script = format!("window.location.href = '{}';", url);
        if let Err(e) = self.window.eval(&script) {
            warn_eval("navigation", e);
        }
    }

    fn navigate_local(&self, page: LocalPage) {
        let html = match page {
            LocalPage::ConfigError => CONFIG_ERROR_PAGE,
            LocalPage::LaunchDelay => LAUNCH_DELAY_PAGE,
        };
        tracing::info!(page = page.file_name(), "showing local page");
        let script = format!(
            "document.open(); document.write(`{}`); document.close();",
            html.replace('`', "\\`")
        );
        if let Err(e) = self.window.eval(&script) {
            warn_eval("local page", e);
        }
    }
}

fn warn_eval(what: &str, e: tauri::Error) {
    tracing::warn!("failed to issue {} to the webview: {}", what, e);
}

/// Fire-and-forget one-shot timer: sleeps on its own thread, then posts the
/// expiry into the dispatch loop.
pub struct ThreadScheduler {
    events: Sender<KioskEvent>,
}

impl ThreadScheduler {
    pub fn new(events: Sender<KioskEvent>) -> Self {
        Self { events }
    }
}

impl RetryScheduler for ThreadScheduler {
    fn schedule_retry(&self, delay: Duration) {
        let events = self.events.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = events.send(KioskEvent::RetryElapsed);
        });
    }
}

/// True for navigations within the launcher's own bundled assets (the boot
/// page and friends under the app origin).
pub fn is_app_page(url: &Url) -> bool {
    url.scheme() == "tauri"
        || url.scheme() == "about"
        || url.host_str() == Some("tauri.localhost")
}
