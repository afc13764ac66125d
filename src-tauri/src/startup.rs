use std::path::Path;

use tauri::{AppHandle, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

use crate::{
    app_menu, append_desktop_log, append_startup_log,
    i18n::{Translations, SHELL_NAMESPACES},
    ipc::ShellMessage,
    logging, main_window,
    runtime_paths::{self, PathError, PathSources},
    shell_locale, tray_setup, ShellSession, ShellState, MAIN_WINDOW_ENTRY,
};

/// Resolves paths, loads persisted credentials and translations, then brings
/// up the menu, the tray and the hidden main window. A path failure shows a
/// localized dialog and exits with status 1 before any window exists.
pub(crate) fn run_startup(app_handle: &AppHandle) {
    let sources = PathSources::from_app(app_handle);
    let user_data_path = runtime_paths::resolve_user_data_path(&sources);
    logging::init(user_data_path.as_deref().ok());
    append_startup_log(&format!(
        "desktop process starting, version {}",
        app_handle.package_info().version
    ));

    let language_code = shell_locale::resolve_language_code(user_data_path.as_deref().ok());
    let translations = Translations::load(language_code, SHELL_NAMESPACES);
    append_startup_log(&format!("active language: {language_code}"));

    let state = app_handle.state::<ShellState>();
    if let Ok(user_data_path) = &user_data_path {
        load_http_auth(&state, user_data_path);
    }

    let resolved = user_data_path.and_then(|user_data_path| {
        runtime_paths::resolve_core_path(&sources, &user_data_path)
            .map(|core_path| (core_path, user_data_path))
    });
    let (core_path, user_data_path) = match resolved {
        Ok(paths) => paths,
        Err(error) => {
            show_startup_error(app_handle, &translations, &error);
            return;
        }
    };
    append_startup_log(&format!(
        "core path: {}, user data path: {}",
        core_path.display(),
        user_data_path.display()
    ));

    state.set_session(ShellSession {
        core_path,
        user_data_path,
        translations: translations.clone(),
    });

    if let Err(error) = app_menu::setup_app_menu(app_handle) {
        append_startup_log(&format!("failed to initialize application menu: {error}"));
    }
    if let Err(error) = tray_setup::setup_tray(app_handle) {
        append_startup_log(&format!("failed to initialize tray: {error}"));
    }

    let entry = resolve_window_entry(app_handle, &translations);
    if let Err(error) = main_window::create_main_window(app_handle, &entry) {
        append_startup_log(&error);
    }
}

fn load_http_auth(state: &ShellState, user_data_path: &Path) {
    let path = user_data_path.join(crate::AUTHORIZATIONS_FILE);
    match state.http_auth.load_from_file(&path) {
        Ok(count) => append_startup_log(&format!("loaded {count} http authorizations")),
        Err(error) => append_startup_log(&format!("{error}; starting with none")),
    }
}

fn resolve_window_entry(app_handle: &AppHandle, translations: &Translations) -> String {
    let localized = translations.localized_filename(MAIN_WINDOW_ENTRY);
    if localized != MAIN_WINDOW_ENTRY && app_handle.asset_resolver().get(localized.clone()).is_some()
    {
        return localized;
    }
    MAIN_WINDOW_ENTRY.to_string()
}

fn show_startup_error(app_handle: &AppHandle, translations: &Translations, error: &PathError) {
    let message = translations.t_with(error.key, &error.variables);
    append_startup_log(&format!("startup failed: {message}"));

    app_handle
        .dialog()
        .message(message)
        .title(translations.t("startup:failedToStart"))
        .kind(MessageDialogKind::Error)
        .show(|_| {
            // Skips the clean-exit handshake: there is no content to ask.
            logging::flush_file_log();
            std::process::exit(1);
        });
}

/// The `init` payload for the content, handed out once. Nothing is claimed
/// while startup has not produced a session yet.
pub(crate) fn take_init_message(state: &ShellState) -> Option<ShellMessage> {
    let session = state.session()?;
    if !state.claim_init_delivery() {
        return None;
    }

    Some(ShellMessage::Init {
        core_path: session.core_path.display().to_string(),
        user_data_path: session.user_data_path.display().to_string(),
        language_code: session.translations.language_code().to_string(),
    })
}

/// Called by the content once it is listening: returns `init` and shows the
/// main window. Later calls get `None` and change nothing.
pub(crate) fn deliver_init(app_handle: &AppHandle) -> Option<ShellMessage> {
    let state = app_handle.state::<ShellState>();
    let message = take_init_message(&state)?;
    append_startup_log("init delivered to main window");

    if let Some(window) = main_window::get_main_window(app_handle) {
        if let Err(error) = window.show() {
            append_desktop_log(&format!("failed to show main window: {error}"));
        }
    }
    Some(message)
}
