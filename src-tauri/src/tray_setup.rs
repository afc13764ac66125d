use tauri::{
    menu::{Menu, MenuItem, PredefinedMenuItem},
    tray::{MouseButton, TrayIconBuilder, TrayIconEvent},
    AppHandle, Manager,
};

use crate::{
    append_desktop_log, tray_actions, tray_menu_handler, window_actions, ShellState,
    TrayMenuState, TRAY_ID, TRAY_TOOLTIP,
};

/// Builds the status icon. On macOS it lives in the menu bar and opens its
/// menu on left click, standing in for a dock menu.
pub fn setup_tray(app_handle: &AppHandle) -> Result<(), String> {
    let state = app_handle.state::<ShellState>();

    let dashboard_item = MenuItem::with_id(
        app_handle,
        tray_actions::TRAY_MENU_DASHBOARD,
        state.t("tray:dashboard"),
        true,
        None::<&str>,
    )
    .map_err(|error| format!("Failed to create tray dashboard menu item: {error}"))?;
    let exit_item = MenuItem::with_id(
        app_handle,
        tray_actions::TRAY_MENU_EXIT,
        state.t("tray:exit"),
        true,
        None::<&str>,
    )
    .map_err(|error| format!("Failed to create tray exit menu item: {error}"))?;
    let separator = PredefinedMenuItem::separator(app_handle)
        .map_err(|error| format!("Failed to create tray separator menu item: {error}"))?;

    let menu = Menu::with_items(app_handle, &[&dashboard_item, &separator, &exit_item])
        .map_err(|error| format!("Failed to build tray menu: {error}"))?;

    if !app_handle.manage(TrayMenuState {
        dashboard_item: dashboard_item.clone(),
        exit_item: exit_item.clone(),
    }) {
        append_desktop_log("tray menu state already exists, skipping manage");
    }

    let tray_builder = TrayIconBuilder::with_id(TRAY_ID)
        .menu(&menu)
        .tooltip(TRAY_TOOLTIP)
        .icon(tauri::include_image!("./icons/tray.png"))
        .show_menu_on_left_click(cfg!(target_os = "macos"))
        .on_menu_event(|app, event| {
            tray_menu_handler::handle_tray_menu_event(app, event.id().as_ref())
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::DoubleClick {
                button: MouseButton::Left,
                ..
            } = event
            {
                window_actions::restore_main_window(tray.app_handle(), append_desktop_log);
            }
        });

    #[cfg(target_os = "macos")]
    let tray_builder = tray_builder.icon_as_template(true);

    tray_builder
        .build(app_handle)
        .map_err(|error| format!("Failed to create tray icon: {error}"))?;

    Ok(())
}
