use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::DEFAULT_LANGUAGE_CODE;

pub(crate) const SHELL_NAMESPACES: &[&str] = &["startup", "tray", "menu"];

pub(crate) type TranslationVars = BTreeMap<String, String>;

macro_rules! locale_table {
    ($lang:literal, $namespace:literal) => {
        include_str!(concat!("../locales/", $lang, "/", $namespace, ".json"))
    };
}

fn embedded_table(language_code: &str, namespace: &str) -> Option<&'static str> {
    let raw = match (language_code, namespace) {
        ("en", "startup") => locale_table!("en", "startup"),
        ("en", "tray") => locale_table!("en", "tray"),
        ("en", "menu") => locale_table!("en", "menu"),
        ("fr", "startup") => locale_table!("fr", "startup"),
        ("fr", "tray") => locale_table!("fr", "tray"),
        ("fr", "menu") => locale_table!("fr", "menu"),
        ("de", "startup") => locale_table!("de", "startup"),
        ("de", "tray") => locale_table!("de", "tray"),
        ("de", "menu") => locale_table!("de", "menu"),
        ("es", "startup") => locale_table!("es", "startup"),
        ("es", "tray") => locale_table!("es", "tray"),
        ("es", "menu") => locale_table!("es", "menu"),
        ("zh-CN", "startup") => locale_table!("zh-CN", "startup"),
        ("zh-CN", "tray") => locale_table!("zh-CN", "tray"),
        ("zh-CN", "menu") => locale_table!("zh-CN", "menu"),
        _ => return None,
    };
    Some(raw)
}

fn load_namespaces(language_code: &str, namespaces: &[&str]) -> HashMap<String, Value> {
    let mut tables = HashMap::new();
    for namespace in namespaces {
        let Some(raw) = embedded_table(language_code, namespace) else {
            continue;
        };
        match serde_json::from_str::<Value>(raw) {
            Ok(table) => {
                tables.insert((*namespace).to_string(), table);
            }
            Err(error) => crate::append_desktop_log(&format!(
                "failed to parse locale table {language_code}/{namespace}: {error}"
            )),
        }
    }
    tables
}

/// Translation tables for the active language, with English as the per-key
/// fallback.
#[derive(Debug, Clone)]
pub(crate) struct Translations {
    language_code: &'static str,
    tables: HashMap<String, Value>,
    fallback: HashMap<String, Value>,
}

impl Translations {
    pub(crate) fn load(language_code: &'static str, namespaces: &[&str]) -> Self {
        let fallback = if language_code == DEFAULT_LANGUAGE_CODE {
            HashMap::new()
        } else {
            load_namespaces(DEFAULT_LANGUAGE_CODE, namespaces)
        };

        Self {
            language_code,
            tables: load_namespaces(language_code, namespaces),
            fallback,
        }
    }

    pub(crate) fn language_code(&self) -> &'static str {
        self.language_code
    }

    pub(crate) fn t(&self, key: &str) -> String {
        self.t_with(key, &TranslationVars::new())
    }

    /// Looks up `namespace:dotted.path` and substitutes `${name}` placeholders.
    /// Unknown keys come back verbatim.
    pub(crate) fn t_with(&self, key: &str, vars: &TranslationVars) -> String {
        let Some(template) =
            lookup(&self.tables, key).or_else(|| lookup(&self.fallback, key))
        else {
            return key.to_string();
        };
        interpolate(template, vars)
    }

    /// `index.html` becomes `index.fr.html` for French, and so on.
    pub(crate) fn localized_filename(&self, filename: &str) -> String {
        localized_filename(filename, self.language_code)
    }
}

fn lookup<'a>(tables: &'a HashMap<String, Value>, key: &str) -> Option<&'a str> {
    let (namespace, path) = key.split_once(':')?;
    let mut node = tables.get(namespace)?;
    for segment in path.split('.') {
        node = node.get(segment)?;
    }
    node.as_str()
}

fn interpolate(template: &str, vars: &TranslationVars) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            output.push_str(&rest[start..]);
            return output;
        };
        let name = &after[..end];
        match vars.get(name) {
            Some(value) => output.push_str(value),
            None => output.push_str(&rest[start..start + 2 + end + 1]),
        }
        rest = &after[end + 1..];
    }
    output.push_str(rest);
    output
}

pub(crate) fn localized_filename(filename: &str, language_code: &str) -> String {
    if language_code == DEFAULT_LANGUAGE_CODE {
        return filename.to_string();
    }

    match filename.rsplit_once('.') {
        Some((stem, extension)) => format!("{stem}.{language_code}.{extension}"),
        None => format!("{filename}.{language_code}"),
    }
}
