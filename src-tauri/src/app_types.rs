use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, MutexGuard,
    },
};
use tauri::menu::MenuItem;

use crate::{
    http_auth::HttpAuthStore,
    i18n::Translations,
    lifecycle::{AckDecision, LifecycleState, QuitDecision},
    AUTHORIZATIONS_FILE,
};

#[derive(Clone)]
pub(crate) struct TrayMenuState {
    pub(crate) dashboard_item: MenuItem<tauri::Wry>,
    pub(crate) exit_item: MenuItem<tauri::Wry>,
}

/// Everything startup resolved before the main window was created.
#[derive(Debug, Clone)]
pub(crate) struct ShellSession {
    pub(crate) core_path: PathBuf,
    pub(crate) user_data_path: PathBuf,
    pub(crate) translations: Translations,
}

impl ShellSession {
    pub(crate) fn authorizations_path(&self) -> PathBuf {
        self.user_data_path.join(AUTHORIZATIONS_FILE)
    }
}

#[derive(Debug, Default)]
pub(crate) struct ShellState {
    lifecycle: Mutex<LifecycleState>,
    session: Mutex<Option<ShellSession>>,
    init_delivered: AtomicBool,
    pub(crate) http_auth: HttpAuthStore,
}

#[derive(Debug, serde::Serialize)]
pub(crate) struct ShellBridgeResult {
    pub(crate) ok: bool,
    pub(crate) reason: Option<String>,
}

impl ShellBridgeResult {
    pub(crate) fn ok() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
        }
    }
}

pub(crate) fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ShellState {
    pub(crate) fn is_quitting(&self) -> bool {
        lock_or_recover(&self.lifecycle).is_quitting()
    }

    pub(crate) fn request_quit(&self) -> QuitDecision {
        lock_or_recover(&self.lifecycle).request_quit()
    }

    pub(crate) fn acknowledge_quit(&self, sender_label: &str, main_label: &str) -> AckDecision {
        lock_or_recover(&self.lifecycle).acknowledge(sender_label, main_label)
    }

    pub(crate) fn is_ready_to_quit(&self) -> bool {
        lock_or_recover(&self.lifecycle).is_ready_to_quit()
    }

    pub(crate) fn force_ready_to_quit(&self) -> bool {
        lock_or_recover(&self.lifecycle).force_ready()
    }

    pub(crate) fn mark_terminated(&self) {
        lock_or_recover(&self.lifecycle).mark_terminated();
    }

    pub(crate) fn set_session(&self, session: ShellSession) {
        *lock_or_recover(&self.session) = Some(session);
    }

    pub(crate) fn session(&self) -> Option<ShellSession> {
        lock_or_recover(&self.session).clone()
    }

    pub(crate) fn set_translations(&self, translations: Translations) {
        if let Some(session) = lock_or_recover(&self.session).as_mut() {
            session.translations = translations;
        }
    }

    pub(crate) fn t(&self, key: &str) -> String {
        match lock_or_recover(&self.session).as_ref() {
            Some(session) => session.translations.t(key),
            None => key.to_string(),
        }
    }

    /// True exactly once: the first caller delivers `init`.
    pub(crate) fn claim_init_delivery(&self) -> bool {
        !self.init_delivered.swap(true, Ordering::AcqRel)
    }
}
