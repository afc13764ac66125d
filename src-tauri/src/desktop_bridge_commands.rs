use tauri::{AppHandle, Manager, Webview};

use crate::{
    append_desktop_log, exit_events, external_url,
    http_auth::{self, HttpCredentials},
    i18n::{Translations, SHELL_NAMESPACES},
    ipc::{ContentMessage, ShellMessage},
    shell_locale, startup, tray_labels, window_actions, ShellBridgeResult, ShellState,
    HTTP_AUTH_RETRY_DELAY,
};

#[tauri::command]
pub(crate) fn desktop_bridge_is_desktop_runtime() -> bool {
    true
}

/// Fetched by the content once its `shell-message` listener is in place.
#[tauri::command]
pub(crate) fn desktop_bridge_take_init(app_handle: AppHandle) -> Option<ShellMessage> {
    startup::deliver_init(&app_handle)
}

#[tauri::command]
pub(crate) fn desktop_bridge_send(
    app_handle: AppHandle,
    webview: Webview,
    message: ContentMessage,
) -> ShellBridgeResult {
    append_desktop_log(&format!(
        "content message '{}' from webview '{}'",
        message.name(),
        webview.label()
    ));

    match message {
        ContentMessage::ReadyToQuit => {
            exit_events::acknowledge_ready_to_quit(&app_handle, webview.label());
        }
        ContentMessage::ShowMainWindow => {
            window_actions::restore_main_window(&app_handle, append_desktop_log);
        }
        ContentMessage::SetHttpAuth { host, auth } => {
            let state = app_handle.state::<ShellState>();
            state.http_auth.set(&host, auth);
        }
    }
    ShellBridgeResult::ok()
}

/// Answers a basic-auth challenge raised by the content. `None` tells the
/// content to abort the attempt.
#[tauri::command]
pub(crate) async fn desktop_bridge_answer_http_auth_challenge(
    app_handle: AppHandle,
    url: String,
) -> Option<HttpCredentials> {
    let state = app_handle.state::<ShellState>();
    let answer = state
        .http_auth
        .resolve_challenge(&url, HTTP_AUTH_RETRY_DELAY)
        .await;

    let host_key = http_auth::host_key_for_url(&url).unwrap_or_else(|| "<invalid url>".to_string());
    append_desktop_log(&format!(
        "http auth challenge for {host_key}: {}",
        if answer.is_some() { "answered" } else { "denied" }
    ));
    answer
}

#[tauri::command]
pub(crate) fn desktop_bridge_set_language_code(
    app_handle: AppHandle,
    language_code: Option<String>,
) -> ShellBridgeResult {
    let state = app_handle.state::<ShellState>();
    let Some(session) = state.session() else {
        return ShellBridgeResult::failed("Shell startup has not completed.");
    };

    if let Err(error) =
        shell_locale::write_cached_language_code(language_code.as_deref(), &session.user_data_path)
    {
        append_desktop_log(&format!("failed to persist language code: {error}"));
        return ShellBridgeResult::failed(error);
    }

    let active_code = shell_locale::resolve_language_code(Some(&session.user_data_path));
    state.set_translations(Translations::load(active_code, SHELL_NAMESPACES));
    tray_labels::update_tray_menu_labels(&app_handle, append_desktop_log);
    ShellBridgeResult::ok()
}

#[tauri::command]
pub(crate) fn desktop_bridge_open_external_url(
    app_handle: AppHandle,
    url: String,
) -> ShellBridgeResult {
    match external_url::open_external_url(&app_handle, &url) {
        Ok(()) => ShellBridgeResult::ok(),
        Err(error) => ShellBridgeResult::failed(error),
    }
}
