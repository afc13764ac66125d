use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Emitter};

use crate::{http_auth::HttpCredentials, MAIN_WINDOW_LABEL, SHELL_MESSAGE_EVENT};

/// Messages the shell sends to the main window content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub(crate) enum ShellMessage {
    /// Shutdown is starting; the content persists its state and answers
    /// with `ready-to-quit`.
    Quit,
    /// Returned by `desktop_bridge_take_init` rather than emitted, so it
    /// cannot be lost before the content subscribes.
    #[serde(rename_all = "camelCase")]
    Init {
        core_path: String,
        user_data_path: String,
        language_code: String,
    },
}

/// Messages the main window content sends to the shell through
/// `desktop_bridge_send`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub(crate) enum ContentMessage {
    ReadyToQuit,
    ShowMainWindow,
    SetHttpAuth { host: String, auth: HttpCredentials },
}

impl ContentMessage {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::ReadyToQuit => "ready-to-quit",
            Self::ShowMainWindow => "show-main-window",
            Self::SetHttpAuth { .. } => "set-http-auth",
        }
    }
}

pub(crate) fn send_to_main_window(
    app_handle: &AppHandle,
    message: &ShellMessage,
) -> Result<(), String> {
    app_handle
        .emit_to(MAIN_WINDOW_LABEL, SHELL_MESSAGE_EVENT, message.clone())
        .map_err(|error| format!("Failed to send shell message to main window: {error}"))
}
