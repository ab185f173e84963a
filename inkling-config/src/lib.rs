//! Loader for Inkling configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. an optional YAML file (`inkling.yaml`, or the path in `INKLING_CONFIG`)
//! 3. the plain credential variables `APP_KEY`, `APP_SECRET`, `ACCESS_TOKEN`,
//!    `ACCESS_SECRET`, `BEARER_TOKEN` and `OPENAI_API_KEY`
//! 4. `INKLING__<SECTION>__<KEY>` variables, e.g. `INKLING__OPENAI__MODEL`
//!
//! `${VAR}` placeholders in file values are expanded. A value that is nothing
//! but an unresolved placeholder is treated as unset.
use config::{Config, ConfigError, Environment, File, FileFormat};
use inkling_common::observability::{LogConfig, LogFormat};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

pub const CONFIG_PATH_ENV: &str = "INKLING_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "inkling.yaml";

/// Plain variables recognised for credentials, with the key each one sets.
pub const CREDENTIAL_ENV: &[(&str, &str, &str)] = &[
    ("APP_KEY", "twitter", "app_key"),
    ("APP_SECRET", "twitter", "app_secret"),
    ("ACCESS_TOKEN", "twitter", "access_token"),
    ("ACCESS_SECRET", "twitter", "access_secret"),
    ("BEARER_TOKEN", "twitter", "bearer_token"),
    ("OPENAI_API_KEY", "openai", "api_key"),
];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InklingConfig {
    pub twitter: TwitterSettings,
    pub openai: OpenAiSettings,
    pub http: HttpSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TwitterSettings {
    pub app_key: Option<String>,
    pub app_secret: Option<String>,
    pub access_token: Option<String>,
    pub access_secret: Option<String>,
    pub bearer_token: Option<String>,
    pub base_url: String,
}

impl Default for TwitterSettings {
    fn default() -> Self {
        Self {
            app_key: None,
            app_secret: None,
            access_token: None,
            access_secret: None,
            bearer_token: None,
            base_url: "https://api.twitter.com/".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4".into(),
            base_url: "https://api.openai.com/v1/".into(),
            temperature: None,
            max_tokens: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Per-request timeout. Unset means requests may wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl HttpSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub dir: Option<PathBuf>,
    pub format: LogFormat,
    pub emit_stderr: bool,
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            dir: None,
            format: LogFormat::Text,
            emit_stderr: false,
            filter: "info".into(),
        }
    }
}

impl LoggingSettings {
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            app_name: "inkling",
            log_dir: self.dir.clone(),
            emit_stderr: self.emit_stderr,
            format: self.format,
            default_filter: self.filter.clone(),
        }
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                if is_bare_placeholder(&cur) {
                    *v = Value::Null;
                } else {
                    *s = cur;
                }
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// `${NAME}` or `$NAME` with nothing around it.
fn is_bare_placeholder(s: &str) -> bool {
    let name = s
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
        .or_else(|| s.strip_prefix('$'));
    name.is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
}

/// Credential variables that are set and non-empty, shaped like the config tree.
fn credential_overrides() -> Value {
    let mut root = Map::new();
    for (var, section, key) in CREDENTIAL_ENV {
        let Some(value) = std::env::var(var).ok().filter(|v| !v.trim().is_empty()) else {
            continue;
        };
        let entry = root
            .entry(section.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(map) = entry {
            map.insert(key.to_string(), Value::String(value));
        }
    }
    Value::Object(root)
}

/// Builder hides the `config` crate wiring.
pub struct InklingConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for InklingConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl InklingConfigLoader {
    /// Start from defaults only; environment sources are applied in [`load`](Self::load).
    ///
    /// ```
    /// use inkling_config::InklingConfigLoader;
    ///
    /// let config = InklingConfigLoader::new()
    ///     .with_yaml_str("openai:\n  model: gpt-4o\n")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.twitter.base_url, "https://api.twitter.com/");
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// `INKLING_CONFIG` when set (must exist), otherwise `inkling.yaml` if present.
    pub fn discover() -> Self {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::new().with_file(path),
            _ => Self::new().with_optional_file(DEFAULT_CONFIG_FILE),
        }
    }

    /// Attach a required YAML/TOML/JSON file; the format is inferred by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is skipped when it does not exist.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests to merge inline YAML snippets.
    ///
    /// ```
    /// use inkling_config::InklingConfigLoader;
    ///
    /// let cfg = InklingConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// twitter:
    ///   bearer_token: "example"
    /// http:
    ///   timeout_secs: 30
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.twitter.bearer_token.as_deref(), Some("example"));
    /// assert_eq!(cfg.http.timeout().map(|d| d.as_secs()), Some(30));
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self.builder.add_source(File::from_str(yaml, FileFormat::Yaml));
        self
    }

    /// Merge every source, expand `${VAR}` placeholders and deserialize.
    pub fn load(self) -> Result<InklingConfig, ConfigError> {
        let credentials = credential_overrides().to_string();
        let cfg = self
            .builder
            .add_source(File::from_str(&credentials, FileFormat::Json))
            .add_source(
                Environment::with_prefix("INKLING")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        // Re-read through `config` so env strings like "30" still fill numeric fields.
        Config::builder()
            .add_source(File::from_str(&v.to_string(), FileFormat::Json))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("FOO", Some("bar"), || {
            let mut v = json!("prefix-${FOO}-suffix");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("prefix-bar-suffix"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars([("CITY", Some("Winston")), ("STATE", Some("NC"))], || {
            let mut v = json!(["hello-$CITY", { "loc": "${CITY}-${STATE}" }, 42, null]);
            expand_env_in_value(&mut v);
            assert_eq!(v, json!(["hello-Winston", { "loc": "Winston-NC" }, 42, null]));
        });
    }

    #[test]
    fn expands_recursively_but_stops_on_cycles() {
        temp_env::with_vars(
            [
                ("BAZ", Some("qux")),
                ("BAR", Some("mid-${BAZ}")),
                ("A", Some("${B}")),
                ("B", Some("${A}")),
            ],
            || {
                let mut v = json!("X=${BAR}");
                expand_env_in_value(&mut v);
                assert_eq!(v, json!("X=mid-qux"));

                let mut cyc = json!("x=${A}-y");
                expand_env_in_value(&mut cyc);
                let s = cyc.as_str().unwrap();
                assert!(s.starts_with("x=") && s.ends_with("-y"));
            },
        );
    }

    #[test]
    fn bare_unresolved_placeholder_becomes_unset() {
        temp_env::with_var_unset("INKLING_TEST_NOPE", || {
            let mut v = json!({ "api_key": "${INKLING_TEST_NOPE}", "note": "hi-${INKLING_TEST_NOPE}" });
            expand_env_in_value(&mut v);
            assert_eq!(v, json!({ "api_key": null, "note": "hi-${INKLING_TEST_NOPE}" }));
        });
    }

    #[test]
    fn placeholder_detection() {
        assert!(is_bare_placeholder("${OPENAI_API_KEY}"));
        assert!(is_bare_placeholder("$HOME"));
        assert!(!is_bare_placeholder("sk-$abc-def"));
        assert!(!is_bare_placeholder("${}"));
        assert!(!is_bare_placeholder("plain"));
    }

    #[test]
    fn logging_settings_map_to_log_config() {
        let settings = LoggingSettings {
            dir: Some(PathBuf::from("/tmp/inkling-logs")),
            format: LogFormat::Json,
            emit_stderr: true,
            filter: "debug".into(),
        };
        let cfg = settings.to_log_config();
        assert_eq!(cfg.app_name, "inkling");
        assert_eq!(cfg.format, LogFormat::Json);
        assert!(cfg.emit_stderr);
        assert_eq!(cfg.default_filter, "debug");
    }
}
