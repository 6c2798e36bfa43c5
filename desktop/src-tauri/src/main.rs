// Prevents additional console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod host;
mod probe;

use std::sync::mpsc::{self, Sender};
use std::thread;

use tauri::webview::PageLoadEvent;
use tauri::{Manager, WebviewUrl, WebviewWindowBuilder, WindowEvent};
use tauri_plugin_global_shortcut::{GlobalShortcutExt, ShortcutState};
use tracing::{info, warn};

use host::{TauriHost, ThreadScheduler};
use kiosk_core::{
    logging, FileConfigSource, KioskEvent, LoadController, Settings, KIOSK_ENTER_DELAY,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Channel into the dispatch loop, managed as Tauri state so the page-load
/// hook can reach it.
struct EventSender(Sender<KioskEvent>);

/// Settings live next to the executable as settings.toml; CONFIG_DIR
/// overrides the directory for development runs.
fn settings_base() -> String {
    let dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_string_lossy().into_owned()))
            .unwrap_or_else(|| ".".to_string())
    });
    format!("{}/settings", dir)
}

fn main() {
    let base = settings_base();
    let settings = match Settings::from_file(&base) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings from {}: {:#}, using defaults", base, e);
            Settings::default()
        }
    };

    logging::init(&settings.logging);
    info!("Kiosk Launcher v{}", VERSION);

    tauri::Builder::default()
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .setup(move |app| {
            let (tx, rx) = mpsc::channel();
            app.manage(EventSender(tx.clone()));

            let window =
                WebviewWindowBuilder::new(app, "main", WebviewUrl::App("index.html".into()))
                    .title(&settings.window.title)
                    .inner_size(settings.window.width, settings.window.height)
                    .position(0.0, 0.0)
                    .build()?;

            #[cfg(debug_assertions)]
            if settings.devtools {
                window.open_devtools();
            }

            // Switching to full-screen at creation time is unreliable on
            // some platforms, so kiosk mode is entered shortly after ready.
            if settings.kiosk.enabled {
                let kiosk_window = window.clone();
                thread::spawn(move || {
                    thread::sleep(KIOSK_ENTER_DELAY);
                    info!("entering kiosk mode");
                    if let Err(e) = kiosk_window.set_fullscreen(true) {
                        warn!("failed to enter full-screen: {}", e);
                    }
                    let _ = kiosk_window.set_always_on_top(true);
                });
            }

            // Maintenance shortcut: force a reload of whatever is showing.
            let registered = app.global_shortcut().on_shortcut(
                "CommandOrControl+R",
                |app, _shortcut, event| {
                    if event.state() == ShortcutState::Pressed {
                        info!("reload shortcut pressed");
                        if let Some(window) = app.get_webview_window("main") {
                            let _ = window.eval("window.location.reload();");
                        }
                    }
                },
            );
            if let Err(e) = registered {
                warn!("failed to register reload shortcut: {}", e);
            }

            let host = TauriHost::new(window, tx.clone());
            let scheduler = ThreadScheduler::new(tx);
            let source = FileConfigSource::new(settings.config_path.clone());

            // Single dispatch loop: host events and timer expiries arrive on
            // one channel and each handler runs to completion, so the
            // controller needs no locking.
            thread::spawn(move || {
                let mut controller = LoadController::new(host, scheduler);
                controller.start(&source);
                while let Ok(event) = rx.recv() {
                    controller.handle(event);
                }
            });

            Ok(())
        })
        .on_page_load(|webview, payload| match payload.event() {
            PageLoadEvent::Started => {
                tracing::debug!(url = %payload.url(), "page load started");
            }
            PageLoadEvent::Finished => {
                // Loads of our own bundled pages never count as the
                // configured URL finishing.
                if host::is_app_page(payload.url()) {
                    return;
                }
                info!(url = %payload.url(), "page load finished");
                let events = webview.state::<EventSender>();
                let _ = events.0.send(KioskEvent::LoadFinished);
            }
        })
        .on_window_event(|window, event| {
            if let WindowEvent::CloseRequested { .. } = event {
                if window.label() == "main" {
                    info!("main window closed, shutting down");
                }
            }
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
