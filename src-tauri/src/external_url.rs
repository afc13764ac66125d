use tauri::AppHandle;
use tauri_plugin_opener::OpenerExt;
use url::Url;

/// Only web links leave the shell; everything else stays unopened.
pub(crate) fn external_http_url(raw_url: &str) -> Result<Url, String> {
    let raw_url = raw_url.trim();
    if raw_url.is_empty() {
        return Err("Missing external URL.".to_string());
    }

    let url = Url::parse(raw_url).map_err(|error| format!("Invalid URL '{raw_url}': {error}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!(
            "Refusing to open '{}' URL outside the shell.",
            url.scheme()
        ));
    }
    Ok(url)
}

/// Navigation that stays inside the shell: the bundled frontend, or the dev
/// server during development.
pub(crate) fn is_internal_navigation(url: &Url, dev_url: Option<&Url>) -> bool {
    if url.scheme() == "tauri" || url.host_str() == Some("tauri.localhost") {
        return true;
    }
    if matches!(url.scheme(), "about" | "data" | "blob") {
        return true;
    }

    dev_url.is_some_and(|dev_url| dev_url.origin() == url.origin())
}

/// Hands an http(s) link to the system browser.
pub(crate) fn open_external_url(app_handle: &AppHandle, raw_url: &str) -> Result<(), String> {
    let url = external_http_url(raw_url)?;
    app_handle
        .opener()
        .open_url(url.as_str(), None::<&str>)
        .map_err(|error| format!("Failed to open {url} in the system browser: {error}"))
}
