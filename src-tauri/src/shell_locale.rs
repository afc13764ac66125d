use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use crate::{DEFAULT_LANGUAGE_CODE, DESKTOP_STATE_FILE, LANGUAGE_ENV, SUPPORTED_LANGUAGE_CODES};

const LANGUAGE_CODE_FIELD: &str = "languageCode";
const LOCALE_ENV_KEYS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

fn empty_state_object() -> Value {
    Value::Object(Map::new())
}

pub(crate) fn desktop_state_path(user_data_path: &Path) -> PathBuf {
    user_data_path.join(DESKTOP_STATE_FILE)
}

/// Picks the active language: explicit override, then the persisted choice,
/// then the system locale, then English.
pub(crate) fn resolve_language_code(user_data_path: Option<&Path>) -> &'static str {
    if let Some(code) = env::var(LANGUAGE_ENV)
        .ok()
        .and_then(|value| normalize_language_code(&value))
    {
        return code;
    }

    if let Some(code) = user_data_path.and_then(read_cached_language_code) {
        return code;
    }

    system_language_code().unwrap_or(DEFAULT_LANGUAGE_CODE)
}

/// POSIX locale variables win; Windows and macOS GUI launches usually leave
/// them unset, so the OS locale is asked next.
fn system_language_code() -> Option<&'static str> {
    let from_env = LOCALE_ENV_KEYS.iter().filter_map(|key| env::var(key).ok());
    first_supported_language(from_env.chain(sys_locale::get_locale()))
}

fn first_supported_language<I>(candidates: I) -> Option<&'static str>
where
    I: IntoIterator<Item = String>,
{
    candidates
        .into_iter()
        .find_map(|candidate| normalize_language_code(&candidate))
}

pub(crate) fn normalize_language_code(raw: &str) -> Option<&'static str> {
    // Strip encoding and modifier suffixes such as `fr_FR.UTF-8@euro`.
    let raw = raw.trim().split(['.', '@']).next().unwrap_or_default();
    if raw.is_empty() || raw == "C" || raw == "POSIX" {
        return None;
    }

    let canonical = raw.replace('_', "-");
    if let Some(code) = SUPPORTED_LANGUAGE_CODES
        .iter()
        .copied()
        .find(|code| code.eq_ignore_ascii_case(&canonical))
    {
        return Some(code);
    }

    let language = canonical
        .split('-')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    SUPPORTED_LANGUAGE_CODES
        .iter()
        .find(|code| code.split('-').next() == Some(language.as_str()))
        .copied()
}

fn read_cached_language_code(user_data_path: &Path) -> Option<&'static str> {
    let raw = fs::read_to_string(desktop_state_path(user_data_path)).ok()?;
    let parsed: Value = serde_json::from_str(&raw).ok()?;
    let code = parsed.get(LANGUAGE_CODE_FIELD)?.as_str()?;
    normalize_language_code(code)
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = empty_state_object();
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just normalized into a JSON object"),
    }
}

/// Persists the language choice, keeping any other fields of the state file.
/// An unsupported or absent code clears the stored choice.
pub(crate) fn write_cached_language_code(
    code: Option<&str>,
    user_data_path: &Path,
) -> Result<(), String> {
    let normalized_code = code.and_then(normalize_language_code);
    if let Some(raw_code) = code {
        if normalized_code.is_none() {
            crate::append_desktop_log(&format!(
                "unsupported language code '{raw_code}'; clearing cached language code"
            ));
        }
    }

    let state_path = desktop_state_path(user_data_path);
    if let Some(parent_dir) = state_path.parent() {
        fs::create_dir_all(parent_dir).map_err(|error| {
            format!(
                "Failed to create desktop state directory {}: {}",
                parent_dir.display(),
                error
            )
        })?;
    }

    let mut parsed = match fs::read_to_string(&state_path) {
        Ok(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(value) => value,
            Err(error) => {
                crate::append_desktop_log(&format!(
                    "failed to parse desktop state {}: {}. resetting state file",
                    state_path.display(),
                    error
                ));
                empty_state_object()
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => empty_state_object(),
        Err(error) => {
            return Err(format!(
                "Failed to read desktop state {}: {}",
                state_path.display(),
                error
            ));
        }
    };
    let object = ensure_object(&mut parsed);

    if let Some(normalized_code) = normalized_code {
        object.insert(
            LANGUAGE_CODE_FIELD.to_string(),
            Value::String(normalized_code.to_string()),
        );
    } else {
        object.remove(LANGUAGE_CODE_FIELD);
    }

    let serialized = serde_json::to_string_pretty(&parsed)
        .map_err(|error| format!("Failed to serialize desktop state: {error}"))?;
    fs::write(&state_path, serialized).map_err(|error| {
        format!(
            "Failed to write desktop state {}: {}",
            state_path.display(),
            error
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_language_code_accepts_exact_and_posix_forms() {
        assert_eq!(normalize_language_code("fr"), Some("fr"));
        assert_eq!(normalize_language_code("zh_CN.UTF-8"), Some("zh-CN"));
        assert_eq!(normalize_language_code("de_DE@euro"), Some("de"));
    }

    #[test]
    fn normalize_language_code_falls_back_to_language_prefix() {
        assert_eq!(normalize_language_code("EN_us"), Some("en"));
        assert_eq!(normalize_language_code("zh-TW"), Some("zh-CN"));
        assert_eq!(normalize_language_code("es-419"), Some("es"));
    }

    #[test]
    fn normalize_language_code_rejects_unknown_and_neutral_locales() {
        assert_eq!(normalize_language_code("ja-JP"), None);
        assert_eq!(normalize_language_code("C"), None);
        assert_eq!(normalize_language_code("  "), None);
    }

    #[test]
    fn first_supported_language_skips_unusable_locales() {
        let candidates = ["C.UTF-8", "ja_JP.UTF-8", "fr-FR"].map(String::from);
        assert_eq!(first_supported_language(candidates), Some("fr"));
    }

    #[test]
    fn os_locale_is_used_when_posix_variables_are_unset() {
        let unset_env: Vec<String> = Vec::new();
        assert_eq!(
            first_supported_language(unset_env.into_iter().chain(Some("de-DE".to_string()))),
            Some("de")
        );
        assert_eq!(first_supported_language(Vec::<String>::new()), None);
    }

    #[test]
    fn write_then_read_cached_language_code() {
        let dir = tempfile::tempdir().expect("create temp dir");

        write_cached_language_code(Some("fr_FR"), dir.path()).expect("write language code");
        assert_eq!(read_cached_language_code(dir.path()), Some("fr"));

        write_cached_language_code(None, dir.path()).expect("clear language code");
        assert_eq!(read_cached_language_code(dir.path()), None);
    }

    #[test]
    fn write_cached_language_code_preserves_other_fields() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let state_path = desktop_state_path(dir.path());
        fs::write(&state_path, r#"{"lastServer":"localhost:4237"}"#).expect("seed state");

        write_cached_language_code(Some("de"), dir.path()).expect("write language code");

        let parsed: Value =
            serde_json::from_str(&fs::read_to_string(&state_path).expect("read state"))
                .expect("parse state");
        assert_eq!(parsed["lastServer"], "localhost:4237");
        assert_eq!(parsed[LANGUAGE_CODE_FIELD], "de");
    }

    #[test]
    fn write_cached_language_code_resets_non_object_state() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(desktop_state_path(dir.path()), "[1, 2, 3]").expect("seed state");

        write_cached_language_code(Some("es"), dir.path()).expect("write language code");
        assert_eq!(read_cached_language_code(dir.path()), Some("es"));
    }
}
