use crate::settings::LoggingSettings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging: console output always, plus a non-blocking daily log
/// file when enabled in settings.
///
/// Default level is `info` for all modules; override via the `RUST_LOG`
/// environment variable.
pub fn init(settings: &LoggingSettings) {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer());

    if settings.enabled {
        if let Err(e) = std::fs::create_dir_all(&settings.directory) {
            eprintln!("Failed to create log directory {}: {}", settings.directory, e);
        }

        prune_old_logs(settings);

        let file_appender = tracing_appender::rolling::daily(&settings.directory, &settings.file_prefix);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .init();

        // The guard flushes the writer on drop. The launcher logs for the
        // life of the display process, so it is leaked rather than threaded
        // through to main.
        std::mem::forget(guard);
    } else {
        subscriber.init();
    }
}

/// Delete the oldest log files once more than `max_files` carry our prefix.
fn prune_old_logs(settings: &LoggingSettings) {
    if settings.max_files == 0 {
        return;
    }

    let log_dir = std::path::Path::new(&settings.directory);
    let entries = match std::fs::read_dir(log_dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    let mut log_files: Vec<_> = entries
        .filter_map(|entry_res| {
            let entry = entry_res.ok()?;
            let metadata = entry.metadata().ok()?;
            if !metadata.is_file() {
                return None;
            }
            let file_name = entry.file_name();
            let name = file_name.to_str()?;
            if !name.starts_with(&settings.file_prefix) {
                return None;
            }
            Some((entry.path(), metadata.modified().ok()?))
        })
        .collect();

    // Newest first; everything past the retention window goes
    log_files.sort_by(|a, b| b.1.cmp(&a.1));

    // Runs before the subscriber is up, so plain stderr for the notices
    for (path, _) in log_files.iter().skip(settings.max_files as usize) {
        match std::fs::remove_file(path) {
            Ok(_) => eprintln!("Deleted old log file: {:?}", path),
            Err(e) => eprintln!("Failed to delete log file {:?}: {}", path, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_for(dir: &std::path::Path, max_files: u32) -> LoggingSettings {
        LoggingSettings {
            enabled: true,
            directory: dir.to_str().unwrap().to_string(),
            file_prefix: "kiosk-launcher".to_string(),
            max_files,
        }
    }

    fn touch(dir: &std::path::Path, name: &str) {
        std::fs::write(dir.join(name), b"log line\n").unwrap();
    }

    #[test]
    fn prune_keeps_newest_max_files() {
        let dir = tempfile::tempdir().unwrap();
        for day in 1..=5 {
            touch(dir.path(), &format!("kiosk-launcher.2026-08-0{}", day));
        }

        prune_old_logs(&settings_for(dir.path(), 3));

        let remaining = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(remaining, 3);
    }

    #[test]
    fn prune_ignores_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "kiosk-launcher.2026-08-01");
        touch(dir.path(), "kiosk-launcher.2026-08-02");
        touch(dir.path(), "unrelated.txt");

        prune_old_logs(&settings_for(dir.path(), 1));

        assert!(dir.path().join("unrelated.txt").exists());
        let prefixed = std::fs::read_dir(dir.path())
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .unwrap()
                    .file_name()
                    .to_str()
                    .unwrap()
                    .starts_with("kiosk-launcher")
            })
            .count();
        assert_eq!(prefixed, 1);
    }

    #[test]
    fn prune_unlimited_when_zero() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "kiosk-launcher.2026-08-01");
        touch(dir.path(), "kiosk-launcher.2026-08-02");

        prune_old_logs(&settings_for(dir.path(), 0));

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }
}
