use std::time::Duration;

use tauri::AppHandle;

pub(crate) fn run_on_main_thread_dispatch<F>(
    app_handle: &AppHandle,
    task_name: &str,
    task: F,
) -> Result<(), String>
where
    F: FnOnce(&AppHandle) + Send + 'static,
{
    let main_app = app_handle.clone();
    app_handle
        .run_on_main_thread(move || task(&main_app))
        .map_err(|error| format!("Failed to dispatch '{task_name}' to main thread: {error}"))
}

/// Runs `task` once on the main thread after `delay`. There is no
/// cancellation, so the task must re-check whatever state it depends on.
pub(crate) fn schedule_on_main_thread<F, L>(
    app_handle: &AppHandle,
    delay: Duration,
    task_name: &'static str,
    task: F,
    log: L,
) where
    F: FnOnce(&AppHandle) + Send + 'static,
    L: Fn(&str) + Send + 'static,
{
    let app_handle = app_handle.clone();
    tauri::async_runtime::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Err(error) = run_on_main_thread_dispatch(&app_handle, task_name, task) {
            log(&error);
        }
    });
}
