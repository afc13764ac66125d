use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::{app_types::lock_or_recover, DESKTOP_LOG_FILE, LOG_DIR, LOG_FILTER_ENV};

static FILE_LOG_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

pub(crate) fn resolve_desktop_log_dir(user_data_path: &Path) -> PathBuf {
    user_data_path.join(LOG_DIR)
}

/// Installs the global subscriber: stderr always, plus a daily rolling file
/// under the user data directory when one is known.
pub(crate) fn init(user_data_path: Option<&Path>) {
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let mut file_error = None;
    let file_layer = user_data_path.and_then(|user_data_path| {
        let log_dir = resolve_desktop_log_dir(user_data_path);
        if let Err(error) = fs::create_dir_all(&log_dir) {
            file_error = Some(format!(
                "failed to create log directory {}: {}",
                log_dir.display(),
                error
            ));
            return None;
        }

        let appender = tracing_appender::rolling::daily(&log_dir, DESKTOP_LOG_FILE);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        install_file_log_guard(guard);
        Some(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer),
        )
    });

    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();
    if initialized.is_err() {
        return;
    }

    if let Some(error) = file_error {
        append_desktop_log(&error);
    } else if let Some(user_data_path) = user_data_path {
        append_startup_log(&format!(
            "desktop log directory: {}",
            resolve_desktop_log_dir(user_data_path).display()
        ));
    }
}

fn install_file_log_guard(guard: WorkerGuard) {
    *lock_or_recover(&FILE_LOG_GUARD) = Some(guard);
}

/// Drops the file writer guard so buffered lines reach `desktop.log`. Both
/// `AppHandle::exit` and `std::process::exit` skip static destructors.
/// Returns false when there was nothing to flush.
pub(crate) fn flush_file_log() -> bool {
    let guard = lock_or_recover(&FILE_LOG_GUARD).take();
    guard.is_some()
}

pub(crate) fn append_desktop_log(message: &str) {
    tracing::info!(target: "superpowers::desktop", "{message}");
}

pub(crate) fn append_startup_log(message: &str) {
    tracing::info!(target: "superpowers::startup", "{message}");
}

pub(crate) fn append_shutdown_log(message: &str) {
    tracing::info!(target: "superpowers::shutdown", "{message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_log_dir_is_under_user_data() {
        assert_eq!(
            resolve_desktop_log_dir(Path::new("/data")),
            Path::new("/data").join(LOG_DIR)
        );
    }

    #[test]
    fn flush_releases_the_file_writer_once() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let appender = tracing_appender::rolling::never(dir.path(), DESKTOP_LOG_FILE);
        let (mut writer, guard) = tracing_appender::non_blocking(appender);
        install_file_log_guard(guard);

        std::io::Write::write_all(&mut writer, b"desktop process exiting\n")
            .expect("queue log line");
        assert!(flush_file_log());
        assert!(!flush_file_log());

        let written = std::fs::read_to_string(dir.path().join(DESKTOP_LOG_FILE))
            .expect("read flushed log");
        assert_eq!(written, "desktop process exiting\n");
    }
}
