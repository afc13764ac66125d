use std::{
    env, fs,
    path::{Path, PathBuf},
};

use tauri::{path::BaseDirectory, AppHandle, Manager};

use crate::{
    i18n::TranslationVars, CORE_DIR, CORE_PATH_ENV, PORTABLE_USER_DATA_DIR, USER_DATA_PATH_ENV,
};

/// A path failure that can be shown to the user through `t_with(key, variables)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PathError {
    pub(crate) key: &'static str,
    pub(crate) variables: TranslationVars,
}

impl PathError {
    fn new(key: &'static str, variables: &[(&str, String)]) -> Self {
        Self {
            key,
            variables: variables
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PathSources {
    pub(crate) user_data_override: Option<PathBuf>,
    pub(crate) core_override: Option<PathBuf>,
    pub(crate) executable_dir: Option<PathBuf>,
    pub(crate) app_data_dir: Option<PathBuf>,
    pub(crate) bundled_core_dir: Option<PathBuf>,
}

fn non_empty_env_path(key: &str) -> Option<PathBuf> {
    let value = env::var(key).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(trimmed))
}

impl PathSources {
    pub(crate) fn from_app(app_handle: &AppHandle) -> Self {
        Self {
            user_data_override: non_empty_env_path(USER_DATA_PATH_ENV),
            core_override: non_empty_env_path(CORE_PATH_ENV),
            executable_dir: env::current_exe()
                .ok()
                .and_then(|path| path.parent().map(Path::to_path_buf)),
            app_data_dir: app_handle.path().app_data_dir().ok(),
            bundled_core_dir: app_handle
                .path()
                .resolve(CORE_DIR, BaseDirectory::Resource)
                .ok(),
        }
    }
}

/// User data lives in the override directory, a portable `userData` folder
/// next to the executable, or the platform app-data directory, in that order.
/// The directory is created when missing.
pub(crate) fn resolve_user_data_path(sources: &PathSources) -> Result<PathBuf, PathError> {
    let portable_dir = sources
        .executable_dir
        .as_ref()
        .map(|dir| dir.join(PORTABLE_USER_DATA_DIR))
        .filter(|dir| dir.is_dir());

    let Some(user_data_path) = sources
        .user_data_override
        .clone()
        .or(portable_dir)
        .or_else(|| sources.app_data_dir.clone())
    else {
        return Err(PathError::new(
            "startup:errors.couldNotCreateUserDataFolder",
            &[
                ("path", String::new()),
                (
                    "reason",
                    "no application data directory is available".to_string(),
                ),
            ],
        ));
    };

    fs::create_dir_all(&user_data_path).map_err(|error| {
        PathError::new(
            "startup:errors.couldNotCreateUserDataFolder",
            &[
                ("path", user_data_path.display().to_string()),
                ("reason", error.to_string()),
            ],
        )
    })?;
    Ok(user_data_path)
}

/// The core is taken from the override, a user-installed copy under the user
/// data directory, or the copy bundled with the application.
pub(crate) fn resolve_core_path(
    sources: &PathSources,
    user_data_path: &Path,
) -> Result<PathBuf, PathError> {
    if let Some(core_override) = &sources.core_override {
        if core_override.is_dir() {
            return Ok(core_override.clone());
        }
        return Err(PathError::new(
            "startup:errors.couldNotFindCore",
            &[("path", core_override.display().to_string())],
        ));
    }

    let user_core_dir = user_data_path.join(CORE_DIR);
    if user_core_dir.is_dir() {
        return Ok(user_core_dir);
    }

    if let Some(bundled_core_dir) = sources.bundled_core_dir.as_ref().filter(|dir| dir.is_dir()) {
        return Ok(bundled_core_dir.clone());
    }

    Err(PathError::new(
        "startup:errors.couldNotFindCore",
        &[("path", user_core_dir.display().to_string())],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_data_override_is_created_when_missing() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let target = dir.path().join("profile").join("data");
        let sources = PathSources {
            user_data_override: Some(target.clone()),
            app_data_dir: Some(dir.path().join("ignored")),
            ..PathSources::default()
        };

        assert_eq!(resolve_user_data_path(&sources), Ok(target.clone()));
        assert!(target.is_dir());
    }

    #[test]
    fn portable_user_data_beats_app_data_dir() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let portable = dir.path().join(PORTABLE_USER_DATA_DIR);
        fs::create_dir_all(&portable).expect("create portable dir");
        let sources = PathSources {
            executable_dir: Some(dir.path().to_path_buf()),
            app_data_dir: Some(dir.path().join("appdata")),
            ..PathSources::default()
        };

        assert_eq!(resolve_user_data_path(&sources), Ok(portable));
    }

    #[test]
    fn app_data_dir_is_used_without_portable_folder() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let sources = PathSources {
            executable_dir: Some(dir.path().join("bin")),
            app_data_dir: Some(dir.path().join("appdata")),
            ..PathSources::default()
        };

        assert_eq!(
            resolve_user_data_path(&sources),
            Ok(dir.path().join("appdata"))
        );
    }

    #[test]
    fn missing_user_data_location_is_a_localized_error() {
        let error = resolve_user_data_path(&PathSources::default()).expect_err("no location");
        assert_eq!(error.key, "startup:errors.couldNotCreateUserDataFolder");
        assert!(error.variables.contains_key("reason"));
    }

    #[test]
    fn user_core_beats_bundled_core() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let user_data = dir.path().join("user");
        let bundled = dir.path().join("bundled");
        fs::create_dir_all(user_data.join(CORE_DIR)).expect("create user core");
        fs::create_dir_all(&bundled).expect("create bundled core");
        let sources = PathSources {
            bundled_core_dir: Some(bundled.clone()),
            ..PathSources::default()
        };

        assert_eq!(
            resolve_core_path(&sources, &user_data),
            Ok(user_data.join(CORE_DIR))
        );

        fs::remove_dir_all(user_data.join(CORE_DIR)).expect("remove user core");
        assert_eq!(resolve_core_path(&sources, &user_data), Ok(bundled));
    }

    #[test]
    fn missing_core_reports_user_core_path() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let error =
            resolve_core_path(&PathSources::default(), dir.path()).expect_err("no core anywhere");

        assert_eq!(error.key, "startup:errors.couldNotFindCore");
        assert_eq!(
            error.variables.get("path"),
            Some(&dir.path().join(CORE_DIR).display().to_string())
        );
    }

    #[test]
    fn missing_core_override_is_not_silently_replaced() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::create_dir_all(dir.path().join(CORE_DIR)).expect("create user core");
        let sources = PathSources {
            core_override: Some(dir.path().join("nowhere")),
            ..PathSources::default()
        };

        let error = resolve_core_path(&sources, dir.path()).expect_err("override missing");
        assert_eq!(error.key, "startup:errors.couldNotFindCore");
    }
}
