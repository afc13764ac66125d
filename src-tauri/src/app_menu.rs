use tauri::AppHandle;

use crate::exit_events;

pub const APP_MENU_QUIT: &str = "app_quit";

pub fn handle_app_menu_event(app_handle: &AppHandle, menu_id: &str) {
    if menu_id == APP_MENU_QUIT {
        exit_events::request_quit(app_handle, "application menu");
    }
}

/// Only macOS gets a menu bar; the window is frameless everywhere else.
#[cfg(not(target_os = "macos"))]
pub fn setup_app_menu(_app_handle: &AppHandle) -> Result<(), String> {
    Ok(())
}

#[cfg(target_os = "macos")]
pub fn setup_app_menu(app_handle: &AppHandle) -> Result<(), String> {
    use tauri::{
        menu::{Menu, MenuItem, PredefinedMenuItem, Submenu},
        Manager,
    };

    use crate::ShellState;

    let state = app_handle.state::<ShellState>();
    let menu_error = |error: tauri::Error| format!("Failed to build application menu: {error}");

    let quit_item = MenuItem::with_id(
        app_handle,
        APP_MENU_QUIT,
        state.t("menu:quit"),
        true,
        Some("CmdOrCtrl+Q"),
    )
    .map_err(menu_error)?;

    let app_submenu = Submenu::with_items(
        app_handle,
        "Superpowers",
        true,
        &[
            &PredefinedMenuItem::about(app_handle, None, None).map_err(menu_error)?,
            &PredefinedMenuItem::separator(app_handle).map_err(menu_error)?,
            &PredefinedMenuItem::hide(app_handle, None).map_err(menu_error)?,
            &PredefinedMenuItem::hide_others(app_handle, None).map_err(menu_error)?,
            &PredefinedMenuItem::show_all(app_handle, None).map_err(menu_error)?,
            &PredefinedMenuItem::separator(app_handle).map_err(menu_error)?,
            &quit_item,
        ],
    )
    .map_err(menu_error)?;

    let edit_submenu = Submenu::with_items(
        app_handle,
        state.t("menu:edit"),
        true,
        &[
            &PredefinedMenuItem::undo(app_handle, None).map_err(menu_error)?,
            &PredefinedMenuItem::redo(app_handle, None).map_err(menu_error)?,
            &PredefinedMenuItem::separator(app_handle).map_err(menu_error)?,
            &PredefinedMenuItem::cut(app_handle, None).map_err(menu_error)?,
            &PredefinedMenuItem::copy(app_handle, None).map_err(menu_error)?,
            &PredefinedMenuItem::paste(app_handle, None).map_err(menu_error)?,
            &PredefinedMenuItem::select_all(app_handle, None).map_err(menu_error)?,
        ],
    )
    .map_err(menu_error)?;

    let window_submenu = Submenu::with_items(
        app_handle,
        state.t("menu:window"),
        true,
        &[
            &PredefinedMenuItem::minimize(app_handle, None).map_err(menu_error)?,
            &PredefinedMenuItem::close_window(app_handle, None).map_err(menu_error)?,
        ],
    )
    .map_err(menu_error)?;

    let menu = Menu::with_items(app_handle, &[&app_submenu, &edit_submenu, &window_submenu])
        .map_err(menu_error)?;
    app_handle.set_menu(menu).map_err(menu_error)?;
    Ok(())
}
