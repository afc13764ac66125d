use tauri::AppHandle;

use crate::{append_desktop_log, exit_events, tray_actions, window_actions};

pub fn handle_tray_menu_event(app_handle: &AppHandle, menu_id: &str) {
    match tray_actions::action_from_menu_id(menu_id) {
        Some(tray_actions::TrayMenuAction::Dashboard) => {
            window_actions::restore_main_window(app_handle, append_desktop_log)
        }
        Some(tray_actions::TrayMenuAction::Exit) => {
            exit_events::request_quit(app_handle, "tray menu")
        }
        None => {}
    }
}
