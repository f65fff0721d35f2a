// SPDX-FileCopyrightText: 2026 Flowpipe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Flowpipe configuration system.

use figment::Jail;
use flowpipe_config::diagnostic::ConfigError;
use flowpipe_config::model::{FlowpipeConfig, DEFAULT_LANGUAGES};
use flowpipe_config::{load_and_validate_str, load_config, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[logging]
level = "debug"

[chatflow]
prediction_url = "https://flowise.local/api/v1/prediction/abc"
api_key = "secret"
max_history = 4
system_in_history = true
pipe_id = "support_bot"
pipe_name = "Support Bot"

[transcript]
languages = ["en", "de"]
youtube_base_url = "http://127.0.0.1:9000"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(
        config.chatflow.prediction_url,
        "https://flowise.local/api/v1/prediction/abc"
    );
    assert_eq!(config.chatflow.api_key, "secret");
    assert_eq!(config.chatflow.max_history, Some(4));
    assert!(config.chatflow.system_in_history);
    assert_eq!(config.chatflow.pipe_id, "support_bot");
    assert_eq!(config.chatflow.pipe_name, "Support Bot");
    assert_eq!(config.transcript.languages, vec!["en", "de"]);
    assert_eq!(config.transcript.youtube_base_url, "http://127.0.0.1:9000");
}

#[test]
fn empty_toml_yields_defaults() {
    let config = load_config_from_str("").unwrap();
    assert_eq!(config, FlowpipeConfig::default());
    assert_eq!(config.chatflow.pipe_id, "flowise_chat");
    assert_eq!(config.chatflow.pipe_name, "Flowise AI Chat");
    assert_eq!(config.chatflow.max_history, None);
    assert!(!config.chatflow.system_in_history);
    assert_eq!(config.transcript.languages, DEFAULT_LANGUAGES.to_vec());
}

#[test]
fn unknown_key_is_rejected_with_suggestion() {
    let toml = r#"
[chatflow]
api_kye = "secret"
"#;
    let errors = load_and_validate_str(toml).expect_err("should reject unknown key");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "api_kye");
            assert_eq!(suggestion.as_deref(), Some("api_key"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn wrong_type_is_rejected() {
    let toml = r#"
[chatflow]
max_history = "ten"
"#;
    let errors = load_and_validate_str(toml).expect_err("should reject wrong type");
    assert!(
        matches!(&errors[0], ConfigError::InvalidType { key, .. } if key.contains("max_history")),
        "got: {errors:?}"
    );
}

#[test]
fn missing_endpoint_is_a_warning_not_an_error() {
    let loaded = load_and_validate_str("").expect("defaults must load");
    assert_eq!(loaded.warnings.len(), 2);
    assert!(loaded.warnings[0].to_string().contains("FLOWISE_API_URL"));
    assert!(loaded.warnings[1].to_string().contains("FLOWISE_API_KEY"));
}

#[test]
fn legacy_env_vars_fill_chatflow_section() {
    Jail::expect_with(|jail| {
        jail.set_env("FLOWISE_API_URL", "https://legacy.local/api/v1/prediction/x");
        jail.set_env("FLOWISE_API_KEY", "legacy-key");
        let config = load_config()?;
        assert_eq!(
            config.chatflow.prediction_url,
            "https://legacy.local/api/v1/prediction/x"
        );
        assert_eq!(config.chatflow.api_key, "legacy-key");
        Ok(())
    });
}

#[test]
fn prefixed_env_overrides_legacy_and_files() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "flowpipe.toml",
            r#"
[chatflow]
prediction_url = "https://file.local/p"
api_key = "from-file"
"#,
        )?;
        jail.set_env("FLOWISE_API_KEY", "legacy-key");
        jail.set_env("FLOWPIPE_CHATFLOW_API_KEY", "prefixed-key");
        jail.set_env("FLOWPIPE_LOGGING_LEVEL", "warn");
        let config = load_config()?;
        assert_eq!(config.chatflow.prediction_url, "https://file.local/p");
        assert_eq!(config.chatflow.api_key, "prefixed-key");
        assert_eq!(config.logging.level, "warn");
        Ok(())
    });
}

#[test]
fn numeric_and_boolean_looking_secrets_stay_strings() {
    Jail::expect_with(|jail| {
        jail.set_env("FLOWISE_API_URL", "https://legacy.local/p");
        jail.set_env("FLOWISE_API_KEY", "1234567890");
        let config = load_config()?;
        assert_eq!(config.chatflow.api_key, "1234567890");

        jail.set_env("FLOWISE_API_KEY", "true");
        assert_eq!(load_config()?.chatflow.api_key, "true");

        jail.set_env("FLOWPIPE_CHATFLOW_API_KEY", "0042");
        jail.set_env("FLOWPIPE_CHATFLOW_PIPE_ID", "7");
        let config = load_config()?;
        assert_eq!(config.chatflow.api_key, "0042");
        assert_eq!(config.chatflow.pipe_id, "7");
        Ok(())
    });
}

#[test]
fn typed_keys_still_parse_from_prefixed_env() {
    Jail::expect_with(|jail| {
        jail.set_env("FLOWPIPE_CHATFLOW_MAX_HISTORY", "3");
        jail.set_env("FLOWPIPE_CHATFLOW_SYSTEM_IN_HISTORY", "true");
        let config = load_config()?;
        assert_eq!(config.chatflow.max_history, Some(3));
        assert!(config.chatflow.system_in_history);
        Ok(())
    });
}
