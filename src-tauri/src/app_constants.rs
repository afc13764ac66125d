use std::time::Duration;

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const MAIN_WINDOW_WIDTH: f64 = 1000.0;
pub(crate) const MAIN_WINDOW_HEIGHT: f64 = 600.0;
pub(crate) const MAIN_WINDOW_MIN_WIDTH: f64 = 800.0;
pub(crate) const MAIN_WINDOW_MIN_HEIGHT: f64 = 480.0;
pub(crate) const MAIN_WINDOW_ENTRY: &str = "index.html";

pub(crate) const TRAY_ID: &str = "main-tray";
pub(crate) const TRAY_TOOLTIP: &str = "Superpowers";

pub(crate) const SHELL_MESSAGE_EVENT: &str = "shell-message";

pub(crate) const HIDE_CONFIRM_DELAY: Duration = Duration::from_millis(200);
pub(crate) const HTTP_AUTH_RETRY_DELAY: Duration = Duration::from_secs(1);

pub(crate) const DEFAULT_LANGUAGE_CODE: &str = "en";
pub(crate) const SUPPORTED_LANGUAGE_CODES: &[&str] = &["en", "fr", "de", "es", "zh-CN"];

pub(crate) const USER_DATA_PATH_ENV: &str = "SUPERPOWERS_USER_DATA_PATH";
pub(crate) const CORE_PATH_ENV: &str = "SUPERPOWERS_CORE_PATH";
pub(crate) const LANGUAGE_ENV: &str = "SUPERPOWERS_LANGUAGE";
pub(crate) const LOG_FILTER_ENV: &str = "SUPERPOWERS_LOG";

pub(crate) const PORTABLE_USER_DATA_DIR: &str = "userData";
pub(crate) const CORE_DIR: &str = "core";
pub(crate) const DESKTOP_STATE_FILE: &str = "desktop_state.json";
pub(crate) const AUTHORIZATIONS_FILE: &str = "authorizations.json";
pub(crate) const LOG_DIR: &str = "logs";
pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";
