#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_menu;
mod app_runtime;
mod app_types;
mod desktop_bridge_commands;
mod exit_events;
mod external_url;
mod http_auth;
mod i18n;
mod ipc;
mod lifecycle;
mod logging;
mod main_window;
mod runtime_paths;
mod shell_locale;
mod startup;
mod tray_actions;
mod tray_labels;
mod tray_menu_handler;
mod tray_setup;
mod ui_dispatch;
mod window_actions;

pub(crate) use app_constants::*;
pub(crate) use app_types::{ShellBridgeResult, ShellSession, ShellState, TrayMenuState};
pub(crate) use logging::{append_desktop_log, append_shutdown_log, append_startup_log};

fn main() {
    app_runtime::run();
}
