use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};
use url::Url;

use crate::{
    append_desktop_log, external_url, MAIN_WINDOW_HEIGHT, MAIN_WINDOW_LABEL,
    MAIN_WINDOW_MIN_HEIGHT, MAIN_WINDOW_MIN_WIDTH, MAIN_WINDOW_WIDTH,
};

/// The window operations the visibility controller needs.
pub(crate) trait WindowControl {
    fn is_visible(&self) -> Result<bool, String>;
    fn is_minimized(&self) -> Result<bool, String>;
    fn show(&self) -> Result<(), String>;
    fn hide(&self) -> Result<(), String>;
    fn minimize(&self) -> Result<(), String>;
    fn unminimize(&self) -> Result<(), String>;
    fn focus(&self) -> Result<(), String>;
}

impl WindowControl for WebviewWindow {
    fn is_visible(&self) -> Result<bool, String> {
        WebviewWindow::is_visible(self).map_err(|error| error.to_string())
    }

    fn is_minimized(&self) -> Result<bool, String> {
        WebviewWindow::is_minimized(self).map_err(|error| error.to_string())
    }

    fn show(&self) -> Result<(), String> {
        WebviewWindow::show(self).map_err(|error| error.to_string())
    }

    fn hide(&self) -> Result<(), String> {
        WebviewWindow::hide(self).map_err(|error| error.to_string())
    }

    fn minimize(&self) -> Result<(), String> {
        WebviewWindow::minimize(self).map_err(|error| error.to_string())
    }

    fn unminimize(&self) -> Result<(), String> {
        WebviewWindow::unminimize(self).map_err(|error| error.to_string())
    }

    fn focus(&self) -> Result<(), String> {
        WebviewWindow::set_focus(self).map_err(|error| error.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShellPlatform {
    MacOs,
    Windows,
    Linux,
}

impl ShellPlatform {
    pub(crate) fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Linux
        }
    }

    /// Only Windows shows a "still running in the background" notice.
    pub(crate) fn notifies_still_running(self) -> bool {
        self == Self::Windows
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CloseBehavior {
    Allow,
    HideNow,
    /// Minimize first so the user sees the window go to the taskbar, then
    /// hide it once the hide delay has elapsed.
    MinimizeThenHide,
}

pub(crate) fn close_behavior(quitting: bool, platform: ShellPlatform) -> CloseBehavior {
    if quitting {
        return CloseBehavior::Allow;
    }

    match platform {
        ShellPlatform::MacOs => CloseBehavior::HideNow,
        ShellPlatform::Windows | ShellPlatform::Linux => CloseBehavior::MinimizeThenHide,
    }
}

fn log_failure<F>(result: Result<(), String>, action: &str, log: &F)
where
    F: Fn(&str),
{
    if let Err(error) = result {
        log(&format!("failed to {action} main window: {error}"));
    }
}

/// Applies a vetoed close. Returns true when a deferred
/// [`confirm_hide_if_still_minimized`] must follow.
pub(crate) fn apply_close_behavior<W, F>(window: &W, behavior: CloseBehavior, log: F) -> bool
where
    W: WindowControl,
    F: Fn(&str),
{
    match behavior {
        CloseBehavior::Allow => false,
        CloseBehavior::HideNow => {
            log_failure(window.hide(), "hide", &log);
            false
        }
        CloseBehavior::MinimizeThenHide => {
            log_failure(window.minimize(), "minimize", &log);
            true
        }
    }
}

/// Hides the window only if nobody restored it during the hide delay.
pub(crate) fn confirm_hide_if_still_minimized<W, F>(window: &W, log: F) -> bool
where
    W: WindowControl,
    F: Fn(&str),
{
    match window.is_minimized() {
        Ok(true) => {
            log_failure(window.hide(), "hide", &log);
            true
        }
        Ok(false) => false,
        Err(error) => {
            log(&format!("failed to read main window minimized state: {error}"));
            false
        }
    }
}

/// Brings the window to the front. Safe to call repeatedly; does nothing
/// once the shell is quitting.
pub(crate) fn restore_window<W, F>(window: &W, quitting: bool, log: F)
where
    W: WindowControl,
    F: Fn(&str),
{
    if quitting {
        return;
    }

    if !window.is_visible().unwrap_or(false) {
        log_failure(window.show(), "show", &log);
    }
    if window.is_minimized().unwrap_or(false) {
        log_failure(window.unminimize(), "unminimize", &log);
    }
    log_failure(window.focus(), "focus", &log);
}

pub(crate) fn get_main_window(app_handle: &AppHandle) -> Option<WebviewWindow> {
    app_handle.get_webview_window(MAIN_WINDOW_LABEL)
}

/// Creates the hidden main window. It is shown once the content has loaded
/// and received `init`.
pub(crate) fn create_main_window(
    app_handle: &AppHandle,
    entry: &str,
) -> Result<WebviewWindow, String> {
    let dev_url: Option<Url> = app_handle.config().build.dev_url.clone();
    let opener_app = app_handle.clone();

    WebviewWindowBuilder::new(app_handle, MAIN_WINDOW_LABEL, WebviewUrl::App(entry.into()))
        .title("Superpowers")
        .inner_size(MAIN_WINDOW_WIDTH, MAIN_WINDOW_HEIGHT)
        .min_inner_size(MAIN_WINDOW_MIN_WIDTH, MAIN_WINDOW_MIN_HEIGHT)
        .decorations(false)
        .visible(false)
        .on_navigation(move |url| {
            if external_url::is_internal_navigation(url, dev_url.as_ref()) {
                return true;
            }

            if let Err(error) = external_url::open_external_url(&opener_app, url.as_str()) {
                append_desktop_log(&format!("failed to open external url {url}: {error}"));
            }
            false
        })
        .build()
        .map_err(|error| format!("Failed to create main window: {error}"))
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    #[derive(Default)]
    struct FakeWindow {
        visible: Cell<bool>,
        minimized: Cell<bool>,
        focus_count: Cell<usize>,
        calls: RefCell<Vec<&'static str>>,
    }

    impl FakeWindow {
        fn visible() -> Self {
            let window = Self::default();
            window.visible.set(true);
            window
        }

        fn record(&self, call: &'static str) {
            self.calls.borrow_mut().push(call);
        }
    }

    impl WindowControl for FakeWindow {
        fn is_visible(&self) -> Result<bool, String> {
            Ok(self.visible.get())
        }

        fn is_minimized(&self) -> Result<bool, String> {
            Ok(self.minimized.get())
        }

        fn show(&self) -> Result<(), String> {
            self.record("show");
            self.visible.set(true);
            Ok(())
        }

        fn hide(&self) -> Result<(), String> {
            self.record("hide");
            self.visible.set(false);
            Ok(())
        }

        fn minimize(&self) -> Result<(), String> {
            self.record("minimize");
            self.minimized.set(true);
            Ok(())
        }

        fn unminimize(&self) -> Result<(), String> {
            self.record("unminimize");
            self.minimized.set(false);
            Ok(())
        }

        fn focus(&self) -> Result<(), String> {
            self.focus_count.set(self.focus_count.get() + 1);
            Ok(())
        }
    }

    fn no_log(_: &str) {}

    #[test]
    fn close_is_allowed_while_quitting_on_every_platform() {
        for platform in [ShellPlatform::MacOs, ShellPlatform::Windows, ShellPlatform::Linux] {
            assert_eq!(close_behavior(true, platform), CloseBehavior::Allow);
        }
    }

    #[test]
    fn close_hides_immediately_on_macos_and_minimizes_elsewhere() {
        assert_eq!(
            close_behavior(false, ShellPlatform::MacOs),
            CloseBehavior::HideNow
        );
        assert_eq!(
            close_behavior(false, ShellPlatform::Windows),
            CloseBehavior::MinimizeThenHide
        );
        assert_eq!(
            close_behavior(false, ShellPlatform::Linux),
            CloseBehavior::MinimizeThenHide
        );
    }

    #[test]
    fn only_windows_notifies_still_running() {
        assert!(ShellPlatform::Windows.notifies_still_running());
        assert!(!ShellPlatform::MacOs.notifies_still_running());
        assert!(!ShellPlatform::Linux.notifies_still_running());
    }

    #[test]
    fn minimize_then_hide_hides_when_still_minimized() {
        let window = FakeWindow::visible();

        assert!(apply_close_behavior(
            &window,
            CloseBehavior::MinimizeThenHide,
            no_log
        ));
        assert!(confirm_hide_if_still_minimized(&window, no_log));
        assert!(!window.visible.get());
        assert_eq!(*window.calls.borrow(), vec!["minimize", "hide"]);
    }

    #[test]
    fn reopen_within_hide_delay_keeps_window_visible() {
        let window = FakeWindow::visible();

        assert!(apply_close_behavior(
            &window,
            CloseBehavior::MinimizeThenHide,
            no_log
        ));
        restore_window(&window, false, no_log);
        assert!(!confirm_hide_if_still_minimized(&window, no_log));

        assert!(window.visible.get());
        assert!(!window.minimized.get());
        assert!(!window.calls.borrow().contains(&"hide"));
    }

    #[test]
    fn hide_now_needs_no_confirmation() {
        let window = FakeWindow::visible();
        assert!(!apply_close_behavior(&window, CloseBehavior::HideNow, no_log));
        assert!(!window.visible.get());
    }

    #[test]
    fn restore_shows_unminimizes_and_focuses() {
        let window = FakeWindow::default();
        window.minimized.set(true);

        restore_window(&window, false, no_log);

        assert!(window.visible.get());
        assert!(!window.minimized.get());
        assert_eq!(window.focus_count.get(), 1);
        assert_eq!(*window.calls.borrow(), vec!["show", "unminimize"]);
    }

    #[test]
    fn restore_is_idempotent_on_visible_window() {
        let window = FakeWindow::visible();

        restore_window(&window, false, no_log);
        restore_window(&window, false, no_log);

        assert!(window.calls.borrow().is_empty());
        assert_eq!(window.focus_count.get(), 2);
        assert!(window.visible.get());
    }

    #[test]
    fn restore_does_nothing_while_quitting() {
        let window = FakeWindow::default();

        restore_window(&window, true, no_log);

        assert!(!window.visible.get());
        assert_eq!(window.focus_count.get(), 0);
        assert!(window.calls.borrow().is_empty());
    }
}
