use tauri::{webview::PageLoadEvent, Manager, RunEvent, WindowEvent};

use crate::{
    app_menu, append_desktop_log, exit_events, main_window::CloseBehavior, startup,
    window_actions, ShellState, MAIN_WINDOW_LABEL,
};

pub(crate) fn run() {
    tauri::Builder::default()
        // Must come first so a second process exits before doing anything else.
        .plugin(tauri_plugin_single_instance::init(|app_handle, _argv, _cwd| {
            append_desktop_log("second instance launched; restoring main window");
            window_actions::restore_main_window(app_handle, append_desktop_log);
        }))
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_notification::init())
        .plugin(tauri_plugin_opener::init())
        .manage(ShellState::default())
        .invoke_handler(tauri::generate_handler![
            crate::desktop_bridge_commands::desktop_bridge_is_desktop_runtime,
            crate::desktop_bridge_commands::desktop_bridge_take_init,
            crate::desktop_bridge_commands::desktop_bridge_send,
            crate::desktop_bridge_commands::desktop_bridge_answer_http_auth_challenge,
            crate::desktop_bridge_commands::desktop_bridge_set_language_code,
            crate::desktop_bridge_commands::desktop_bridge_open_external_url,
        ])
        .on_menu_event(|app_handle, event| {
            app_menu::handle_app_menu_event(app_handle, event.id().as_ref())
        })
        .on_window_event(|window, event| {
            if window.label() != MAIN_WINDOW_LABEL {
                return;
            }

            match event {
                WindowEvent::CloseRequested { api, .. } => {
                    let app_handle = window.app_handle();
                    let behavior = window_actions::main_window_close_behavior(app_handle);
                    if behavior == CloseBehavior::Allow {
                        return;
                    }

                    api.prevent_close();
                    window_actions::send_main_window_to_background(
                        app_handle,
                        behavior,
                        append_desktop_log,
                    );
                }
                WindowEvent::Destroyed => {
                    exit_events::handle_main_window_destroyed(window.app_handle());
                }
                _ => {}
            }
        })
        .on_page_load(|webview, payload| {
            let phase = match payload.event() {
                PageLoadEvent::Started => "started",
                PageLoadEvent::Finished => "finished",
            };
            append_desktop_log(&format!(
                "page-load {phase} in '{}': {}",
                webview.label(),
                payload.url()
            ));
        })
        .setup(|app| {
            startup::run_startup(app.handle());
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { api, .. } => {
                exit_events::handle_exit_requested(app_handle, &api);
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen { .. } => {
                window_actions::restore_main_window(app_handle, append_desktop_log);
            }
            RunEvent::Exit => {
                exit_events::handle_exit_event(app_handle);
            }
            _ => {}
        });
}
