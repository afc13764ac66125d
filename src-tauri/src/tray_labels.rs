use tauri::{menu::MenuItem, AppHandle, Manager};

use crate::{tray_actions, ShellState, TrayMenuState};

fn set_menu_text_safe<F>(item: &MenuItem<tauri::Wry>, text: &str, item_name: &str, log: F)
where
    F: Fn(&str),
{
    if let Err(error) = item.set_text(text) {
        log(&format!(
            "failed to update tray menu text for {}: {}",
            item_name, error
        ));
    }
}

/// Re-applies the tray labels from the active translations.
pub fn update_tray_menu_labels<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(tray_state) = app_handle.try_state::<TrayMenuState>() else {
        return;
    };
    let state = app_handle.state::<ShellState>();

    set_menu_text_safe(
        &tray_state.dashboard_item,
        &state.t("tray:dashboard"),
        tray_actions::TRAY_MENU_DASHBOARD,
        &log,
    );
    set_menu_text_safe(
        &tray_state.exit_item,
        &state.t("tray:exit"),
        tray_actions::TRAY_MENU_EXIT,
        &log,
    );
}
