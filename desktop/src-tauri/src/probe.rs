use std::net::TcpStream;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use tauri::Url;

use kiosk_core::{KioskError, KioskEvent};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

// Chromium net error codes, reported with the failure event.
const NET_ERR_INVALID_URL: i64 = -300;
const NET_ERR_CONNECTION_REFUSED: i64 = -102;
const NET_ERR_NAME_NOT_RESOLVED: i64 = -105;

/// One-shot reachability probe for a navigation target.
///
/// Runs once per navigation on its own thread. An unreachable target posts a
/// `LoadFailed` event into the dispatch loop; a reachable one posts nothing
/// (success is observed through the webview's page-load event). There is no
/// watchdog on the navigation itself: if the target accepts connections but
/// the page never finishes, no event fires.
pub fn spawn(url: String, events: Sender<KioskEvent>) {
    thread::spawn(move || {
        if let Err(KioskError::LoadFailed { code }) = check(&url) {
            tracing::warn!(url = %url, code, "navigation target unreachable");
            let _ = events.send(KioskEvent::LoadFailed { code });
        }
    });
}

fn check(url: &str) -> Result<(), KioskError> {
    let parsed = Url::parse(url).map_err(|_| KioskError::LoadFailed {
        code: NET_ERR_INVALID_URL,
    })?;

    // file: and friends carry no authority to probe
    if parsed.host_str().is_none() {
        return Ok(());
    }

    let addrs = parsed.socket_addrs(|| None).map_err(|_| KioskError::LoadFailed {
        code: NET_ERR_NAME_NOT_RESOLVED,
    })?;

    for addr in &addrs {
        if TcpStream::connect_timeout(addr, CONNECT_TIMEOUT).is_ok() {
            return Ok(());
        }
    }

    Err(KioskError::LoadFailed {
        code: NET_ERR_CONNECTION_REFUSED,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_without_an_authority_are_not_probed() {
        assert!(check("file:///opt/kiosk/index.html").is_ok());
    }

    #[test]
    fn malformed_urls_report_invalid_url() {
        match check("not a url") {
            Err(KioskError::LoadFailed { code }) => assert_eq!(code, NET_ERR_INVALID_URL),
            other => panic!("expected LoadFailed, got {:?}", other),
        }
    }

    #[test]
    fn closed_local_port_reports_connection_refused() {
        match check("http://127.0.0.1:1/") {
            Err(KioskError::LoadFailed { code }) => {
                assert_eq!(code, NET_ERR_CONNECTION_REFUSED)
            }
            other => panic!("expected LoadFailed, got {:?}", other),
        }
    }
}
