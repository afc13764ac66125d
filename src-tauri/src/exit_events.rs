use tauri::{AppHandle, ExitRequestApi, Manager};

use crate::{
    append_shutdown_log,
    ipc::{self, ShellMessage},
    lifecycle::{AckDecision, QuitDecision},
    logging, main_window, ShellState, MAIN_WINDOW_LABEL,
};

/// Where the shell asks the content to get ready for shutdown.
pub(crate) trait QuitChannel {
    fn has_main_window(&self) -> bool;
    fn send_quit(&self) -> Result<(), String>;
}

impl QuitChannel for AppHandle {
    fn has_main_window(&self) -> bool {
        main_window::get_main_window(self).is_some()
    }

    fn send_quit(&self) -> Result<(), String> {
        ipc::send_to_main_window(self, &ShellMessage::Quit)
    }
}

/// Runs a quit request through the clean-exit handshake. Returns true when
/// the process may exit now.
fn handle_quit_request<C: QuitChannel>(state: &ShellState, channel: &C, source: &str) -> bool {
    match state.request_quit() {
        QuitDecision::Allow => true,
        QuitDecision::Veto => {
            append_shutdown_log(&format!(
                "quit request from {source} vetoed: waiting for main window to acknowledge"
            ));
            false
        }
        QuitDecision::StartCleanExit => {
            append_shutdown_log(&format!("quit requested from {source}, exiting cleanly..."));
            start_clean_exit(state, channel)
        }
    }
}

fn start_clean_exit<C: QuitChannel>(state: &ShellState, channel: &C) -> bool {
    if !channel.has_main_window() {
        append_shutdown_log("no main window to acknowledge quit");
        return complete_without_acknowledgement(state);
    }

    match channel.send_quit() {
        Ok(()) => false,
        Err(error) => {
            append_shutdown_log(&error);
            complete_without_acknowledgement(state)
        }
    }
}

fn complete_without_acknowledgement(state: &ShellState) -> bool {
    if !state.force_ready_to_quit() {
        return false;
    }
    persist_http_auth(state);
    true
}

fn accept_ready_to_quit(state: &ShellState, sender_label: &str) -> bool {
    match state.acknowledge_quit(sender_label, MAIN_WINDOW_LABEL) {
        AckDecision::Accepted => {
            persist_http_auth(state);
            append_shutdown_log("exited cleanly");
            true
        }
        AckDecision::IgnoredForeignSender => {
            append_shutdown_log(&format!(
                "ignored ready-to-quit from non-main webview '{sender_label}'"
            ));
            false
        }
        AckDecision::IgnoredNotQuitting => {
            append_shutdown_log("ignored ready-to-quit: no clean exit in progress");
            false
        }
    }
}

fn persist_http_auth(state: &ShellState) {
    let Some(session) = state.session() else {
        append_shutdown_log("http authorizations not saved: user data path unknown");
        return;
    };

    let path = session.authorizations_path();
    match state.http_auth.save_to_file(&path) {
        Ok(()) => append_shutdown_log(&format!(
            "saved {} http authorizations to {}",
            state.http_auth.len(),
            path.display()
        )),
        Err(error) => append_shutdown_log(&format!("failed to save http authorizations: {error}")),
    }
}

/// Quit from the tray, the application menu or any other shell control.
pub(crate) fn request_quit(app_handle: &AppHandle, source: &str) {
    let state = app_handle.state::<ShellState>();
    if handle_quit_request(&state, app_handle, source) {
        app_handle.exit(0);
    }
}

pub(crate) fn acknowledge_ready_to_quit(app_handle: &AppHandle, sender_label: &str) {
    let state = app_handle.state::<ShellState>();
    if accept_ready_to_quit(&state, sender_label) {
        app_handle.exit(0);
    }
}

/// The main window is gone, so nothing is left to acknowledge a pending
/// clean exit.
pub(crate) fn handle_main_window_destroyed(app_handle: &AppHandle) {
    let state = app_handle.state::<ShellState>();
    if complete_without_acknowledgement(&state) {
        append_shutdown_log("main window destroyed during clean exit");
        app_handle.exit(0);
    }
}

pub(crate) fn handle_exit_requested(app_handle: &AppHandle, api: &ExitRequestApi) {
    let state = app_handle.state::<ShellState>();
    if !handle_quit_request(&state, app_handle, "exit request") {
        api.prevent_exit();
    }
}

pub(crate) fn handle_exit_event(app_handle: &AppHandle) {
    let state = app_handle.state::<ShellState>();
    if !state.is_ready_to_quit() {
        append_shutdown_log("desktop process exiting without a clean-exit acknowledgement");
    }
    state.mark_terminated();
    append_shutdown_log("desktop process exiting");
    logging::flush_file_log();
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, fs, path::Path};

    use super::*;
    use crate::{
        http_auth::{HttpAuthStore, HttpCredentials},
        i18n::{Translations, SHELL_NAMESPACES},
        ShellSession,
    };

    #[derive(Default)]
    struct FakeChannel {
        window_missing: bool,
        send_fails: bool,
        quits_sent: Cell<usize>,
    }

    impl QuitChannel for FakeChannel {
        fn has_main_window(&self) -> bool {
            !self.window_missing
        }

        fn send_quit(&self) -> Result<(), String> {
            if self.send_fails {
                return Err("webview gone".to_string());
            }
            self.quits_sent.set(self.quits_sent.get() + 1);
            Ok(())
        }
    }

    fn state_with_credentials(user_data_path: &Path) -> ShellState {
        let state = ShellState::default();
        state.set_session(ShellSession {
            core_path: user_data_path.join("core"),
            user_data_path: user_data_path.to_path_buf(),
            translations: Translations::load("en", SHELL_NAMESPACES),
        });
        state.http_auth.set(
            "builds.example.com:443",
            HttpCredentials {
                username: "alice".to_string(),
                password: "secret".to_string(),
            },
        );
        state
    }

    fn saved_hosts(state: &ShellState) -> Option<usize> {
        let path = state.session()?.authorizations_path();
        fs::metadata(&path).ok()?;
        let restored = HttpAuthStore::default();
        restored.load_from_file(&path).ok()
    }

    #[test]
    fn first_quit_request_asks_content_once_and_waits() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let state = state_with_credentials(dir.path());
        let channel = FakeChannel::default();

        assert!(!handle_quit_request(&state, &channel, "tray menu"));
        assert!(!handle_quit_request(&state, &channel, "app menu"));

        assert_eq!(channel.quits_sent.get(), 1);
        assert!(state.is_quitting());
        assert_eq!(saved_hosts(&state), None);
    }

    #[test]
    fn acknowledgement_from_main_window_saves_credentials() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let state = state_with_credentials(dir.path());
        let channel = FakeChannel::default();
        assert!(!handle_quit_request(&state, &channel, "tray menu"));

        assert!(accept_ready_to_quit(&state, MAIN_WINDOW_LABEL));
        assert_eq!(saved_hosts(&state), Some(1));
        assert!(handle_quit_request(&state, &channel, "exit request"));
    }

    #[test]
    fn foreign_or_early_acknowledgement_saves_nothing() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let state = state_with_credentials(dir.path());

        assert!(!accept_ready_to_quit(&state, MAIN_WINDOW_LABEL));
        assert!(!handle_quit_request(&state, &FakeChannel::default(), "tray menu"));
        assert!(!accept_ready_to_quit(&state, "popup"));

        assert_eq!(saved_hosts(&state), None);
        assert!(!state.is_ready_to_quit());
    }

    #[test]
    fn quit_without_main_window_completes_immediately() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let state = state_with_credentials(dir.path());
        let channel = FakeChannel {
            window_missing: true,
            ..FakeChannel::default()
        };

        assert!(handle_quit_request(&state, &channel, "exit request"));
        assert_eq!(channel.quits_sent.get(), 0);
        assert!(state.is_ready_to_quit());
        assert_eq!(saved_hosts(&state), Some(1));
    }

    #[test]
    fn failed_quit_message_completes_immediately() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let state = state_with_credentials(dir.path());
        let channel = FakeChannel {
            send_fails: true,
            ..FakeChannel::default()
        };

        assert!(handle_quit_request(&state, &channel, "tray menu"));
        assert_eq!(saved_hosts(&state), Some(1));
    }

    #[test]
    fn destroyed_main_window_finishes_pending_clean_exit_only() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let state = state_with_credentials(dir.path());

        assert!(!complete_without_acknowledgement(&state));
        assert_eq!(saved_hosts(&state), None);

        assert!(!handle_quit_request(&state, &FakeChannel::default(), "tray menu"));
        assert!(complete_without_acknowledgement(&state));
        assert!(state.is_ready_to_quit());
        assert_eq!(saved_hosts(&state), Some(1));
    }
}
