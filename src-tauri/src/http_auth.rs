use std::{
    collections::BTreeMap,
    fs,
    path::Path,
    sync::Mutex,
    time::Duration,
};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::app_types::lock_or_recover;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct HttpCredentials {
    pub(crate) username: String,
    pub(crate) password: String,
}

/// Basic-auth credentials registered by the content, keyed by `hostname:port`.
#[derive(Debug, Default)]
pub(crate) struct HttpAuthStore {
    entries: Mutex<BTreeMap<String, HttpCredentials>>,
}

/// Lookup key for a request URL. Without an explicit port, `https` maps to
/// 443 and every other scheme to 80.
pub(crate) fn host_key_for_url(request_url: &str) -> Option<String> {
    let parsed = Url::parse(request_url.trim()).ok()?;
    let hostname = parsed
        .host_str()?
        .trim_start_matches('[')
        .trim_end_matches(']');
    if hostname.is_empty() {
        return None;
    }

    let port = parsed
        .port()
        .unwrap_or(if parsed.scheme() == "https" { 443 } else { 80 });
    Some(format!("{hostname}:{port}"))
}

impl HttpAuthStore {
    pub(crate) fn set(&self, host: &str, credentials: HttpCredentials) {
        lock_or_recover(&self.entries).insert(host.to_string(), credentials);
    }

    pub(crate) fn get(&self, host: &str) -> Option<HttpCredentials> {
        lock_or_recover(&self.entries).get(host).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        lock_or_recover(&self.entries).len()
    }

    /// Answers an authentication challenge for `request_url`.
    ///
    /// The registration message may still be in flight when the challenge
    /// fires, so a miss is retried exactly once after `retry_delay`. A second
    /// miss answers `None`, which aborts the attempt.
    pub(crate) async fn resolve_challenge(
        &self,
        request_url: &str,
        retry_delay: Duration,
    ) -> Option<HttpCredentials> {
        let key = host_key_for_url(request_url)?;
        if let Some(credentials) = self.get(&key) {
            return Some(credentials);
        }

        tokio::time::sleep(retry_delay).await;
        self.get(&key)
    }

    /// Replaces the in-memory map with the persisted one. A missing file
    /// leaves the map empty.
    pub(crate) fn load_from_file(&self, path: &Path) -> Result<usize, String> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(error) => {
                return Err(format!(
                    "Failed to read http authorizations {}: {}",
                    path.display(),
                    error
                ));
            }
        };
        let parsed: BTreeMap<String, HttpCredentials> =
            serde_json::from_str(&raw).map_err(|error| {
                format!(
                    "Failed to parse http authorizations {}: {}",
                    path.display(),
                    error
                )
            })?;

        let count = parsed.len();
        *lock_or_recover(&self.entries) = parsed;
        Ok(count)
    }

    pub(crate) fn save_to_file(&self, path: &Path) -> Result<(), String> {
        let serialized = {
            let entries = lock_or_recover(&self.entries);
            serde_json::to_string_pretty(&*entries)
                .map_err(|error| format!("Failed to serialize http authorizations: {error}"))?
        };

        if let Some(parent_dir) = path.parent() {
            fs::create_dir_all(parent_dir).map_err(|error| {
                format!(
                    "Failed to create http authorization directory {}: {}",
                    parent_dir.display(),
                    error
                )
            })?;
        }
        fs::write(path, serialized).map_err(|error| {
            format!(
                "Failed to write http authorizations {}: {}",
                path.display(),
                error
            )
        })
    }
}
