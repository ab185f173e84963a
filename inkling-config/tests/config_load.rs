use inkling_common::observability::LogFormat;
use inkling_config::InklingConfigLoader;
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

const CREDENTIAL_VARS: [&str; 6] = [
    "APP_KEY",
    "APP_SECRET",
    "ACCESS_TOKEN",
    "ACCESS_SECRET",
    "BEARER_TOKEN",
    "OPENAI_API_KEY",
];

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

fn without_credentials<R>(f: impl FnOnce() -> R) -> R {
    temp_env::with_vars_unset(CREDENTIAL_VARS, f)
}

#[test]
#[serial]
fn defaults_without_any_source() {
    without_credentials(|| {
        let cfg = InklingConfigLoader::new().load().expect("defaults load");
        assert_eq!(cfg.openai.model, "gpt-4");
        assert_eq!(cfg.openai.base_url, "https://api.openai.com/v1/");
        assert!(cfg.openai.api_key.is_none());
        assert!(cfg.twitter.bearer_token.is_none());
        assert!(cfg.http.timeout().is_none());
        assert_eq!(cfg.logging.format, LogFormat::Text);
        assert!(!cfg.logging.emit_stderr);
    });
}

#[test]
#[serial]
fn file_values_with_placeholders() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(
        &tmp,
        "inkling.yaml",
        r#"
twitter:
  bearer_token: "${INKLING_TEST_BEARER}"
  app_key: "${INKLING_TEST_UNSET_KEY}"
openai:
  model: "gpt-4o-mini"
  temperature: 0.2
  max_tokens: 512
http:
  timeout_secs: 20
logging:
  format: json
  filter: "inkling=debug"
"#,
    );

    without_credentials(|| {
        temp_env::with_vars(
            [
                ("INKLING_TEST_BEARER", Some("from-placeholder")),
                ("INKLING_TEST_UNSET_KEY", None),
            ],
            || {
                let cfg = InklingConfigLoader::new().with_file(&p).load().expect("load");
                assert_eq!(cfg.twitter.bearer_token.as_deref(), Some("from-placeholder"));
                assert!(cfg.twitter.app_key.is_none());
                assert_eq!(cfg.openai.model, "gpt-4o-mini");
                assert_eq!(cfg.openai.temperature, Some(0.2));
                assert_eq!(cfg.openai.max_tokens, Some(512));
                assert_eq!(cfg.http.timeout_secs, Some(20));
                assert_eq!(cfg.logging.format, LogFormat::Json);
                assert_eq!(cfg.logging.filter, "inkling=debug");
            },
        );
    });
}

#[test]
#[serial]
fn plain_credential_variables_beat_the_file() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(
        &tmp,
        "inkling.yaml",
        "openai:\n  api_key: from-file\ntwitter:\n  bearer_token: file-bearer\n",
    );

    without_credentials(|| {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("sk-from-env")),
                ("APP_KEY", Some("ck")),
                ("BEARER_TOKEN", Some("")),
            ],
            || {
                let cfg = InklingConfigLoader::new().with_file(&p).load().expect("load");
                assert_eq!(cfg.openai.api_key.as_deref(), Some("sk-from-env"));
                assert_eq!(cfg.twitter.app_key.as_deref(), Some("ck"));
                // Empty variables count as unset.
                assert_eq!(cfg.twitter.bearer_token.as_deref(), Some("file-bearer"));
            },
        );
    });
}

#[test]
#[serial]
fn prefixed_variables_win_over_everything() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "inkling.yaml", "openai:\n  model: gpt-4o\n");

    without_credentials(|| {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("sk-plain")),
                ("INKLING__OPENAI__API_KEY", Some("sk-prefixed")),
                ("INKLING__OPENAI__MODEL", Some("gpt-4-turbo")),
                ("INKLING__HTTP__TIMEOUT_SECS", Some("45")),
            ],
            || {
                let cfg = InklingConfigLoader::new().with_file(&p).load().expect("load");
                assert_eq!(cfg.openai.api_key.as_deref(), Some("sk-prefixed"));
                assert_eq!(cfg.openai.model, "gpt-4-turbo");
                assert_eq!(cfg.http.timeout_secs, Some(45));
            },
        );
    });
}

#[test]
#[serial]
fn missing_required_file_is_an_error_but_optional_is_not() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.yaml");

    without_credentials(|| {
        assert!(InklingConfigLoader::new().with_file(&missing).load().is_err());
        assert!(
            InklingConfigLoader::new()
                .with_optional_file(&missing)
                .load()
                .is_ok()
        );
    });
}

#[test]
#[serial]
fn discover_honours_inkling_config() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "custom.yaml", "openai:\n  model: from-custom\n");

    without_credentials(|| {
        temp_env::with_var("INKLING_CONFIG", Some(p.as_os_str()), || {
            let cfg = InklingConfigLoader::discover().load().expect("load");
            assert_eq!(cfg.openai.model, "from-custom");
        });
    });
}
