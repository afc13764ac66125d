use tauri::{AppHandle, Manager};
use tauri_plugin_notification::NotificationExt;

use crate::{
    main_window::{self, CloseBehavior, ShellPlatform},
    ui_dispatch, ShellState, HIDE_CONFIRM_DELAY,
};

pub fn restore_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = main_window::get_main_window(app_handle) else {
        log("restore_main_window skipped: main window not found");
        return;
    };

    let state = app_handle.state::<ShellState>();
    main_window::restore_window(&window, state.is_quitting(), log);
}

/// Decides what a close request on the main window turns into. `Allow` means
/// the close must not be vetoed.
pub fn main_window_close_behavior(app_handle: &AppHandle) -> CloseBehavior {
    let state = app_handle.state::<ShellState>();
    main_window::close_behavior(state.is_quitting(), ShellPlatform::current())
}

/// Sends the main window to the background after a vetoed close.
pub fn send_main_window_to_background<F>(app_handle: &AppHandle, behavior: CloseBehavior, log: F)
where
    F: Fn(&str) + Copy + Send + 'static,
{
    let Some(window) = main_window::get_main_window(app_handle) else {
        log("send_main_window_to_background skipped: main window not found");
        return;
    };

    if main_window::apply_close_behavior(&window, behavior, log) {
        ui_dispatch::schedule_on_main_thread(
            app_handle,
            HIDE_CONFIRM_DELAY,
            "confirm main window hide",
            move |main_app| {
                if let Some(window) = main_window::get_main_window(main_app) {
                    main_window::confirm_hide_if_still_minimized(&window, log);
                }
            },
            log,
        );
    }

    if ShellPlatform::current().notifies_still_running() {
        notify_still_running(app_handle, log);
    }
}

fn notify_still_running<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let state = app_handle.state::<ShellState>();
    if let Err(error) = app_handle
        .notification()
        .builder()
        .title(state.t("tray:stillRunning.title"))
        .body(state.t("tray:stillRunning.content"))
        .show()
    {
        log(&format!("failed to show still-running notification: {error}"));
    }
}
