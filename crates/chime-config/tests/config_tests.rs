// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Chime configuration system.

use std::io::Write;

use chime_config::{
    load_and_validate_path, load_and_validate_str, load_config_from_str, ChimeConfig, ConfigError,
};
use chime_core::DeliveryStatus;

const FULL: &str = r#"
[engine]
log_level = "debug"
dedup_capacity = 8
ignore_case = false

[router]
default_target_status = "likely_seen"
default_status = "error"

[[router.sinks]]
kind = "desktop"
name = "popup"
backends = ["notify_send", "osascript"]
icon = "dialog-information"
timeout_ms = 0
target_status = "seen"

[[router.sinks]]
kind = "command"
name = "phone"
program = "/usr/local/bin/push"
args = ["--title", "{title}", "{body}"]
wait_ms = 2000
success_status = "not_yet_seen"

[[router.sinks]]
kind = "log"
tags = ["notify_private"]

[filter]
min_priority = 2

[filter.rule]
kind = "add"

[[filter.rule.children]]
kind = "highlight"

[[filter.rule.children]]
kind = "scale"
factor = 2

[[filter.rule.children.children]]
kind = "sender"
pattern = "re:^(carol|dave)$"
"#;

#[test]
fn full_config_deserializes() {
    let config = load_and_validate_str(FULL).expect("valid config");

    assert_eq!(config.engine.log_level, "debug");
    assert_eq!(config.engine.dedup_capacity, 8);
    assert!(!config.engine.ignore_case);
    assert_eq!(config.router.default_target_status, DeliveryStatus::LikelySeen);
    assert_eq!(config.router.default_status, DeliveryStatus::Error);

    let sinks = &config.router.sinks;
    assert_eq!(sinks.len(), 3);
    assert_eq!(sinks[0].effective_name(), "popup");
    assert_eq!(
        sinks[0].backends.as_deref(),
        Some(&["notify_send".to_string(), "osascript".to_string()][..])
    );
    assert_eq!(sinks[0].timeout_ms, Some(0));
    assert_eq!(sinks[0].target_status, Some(DeliveryStatus::Seen));
    assert_eq!(sinks[1].program.as_deref(), Some("/usr/local/bin/push"));
    assert_eq!(sinks[1].args, vec!["--title", "{title}", "{body}"]);
    assert_eq!(sinks[1].success_status, Some(DeliveryStatus::NotYetSeen));
    assert_eq!(sinks[2].effective_name(), "log");
    assert_eq!(sinks[2].tags.as_deref(), Some(&["notify_private".to_string()][..]));

    assert_eq!(config.filter.min_priority, 2);
    let rule = config.filter.rule.as_ref().expect("rule");
    assert_eq!(rule.kind, "add");
    assert_eq!(rule.children.len(), 2);
    assert_eq!(rule.children[1].factor, Some(2));
    assert_eq!(rule.children[1].children[0].pattern.as_deref(), Some("re:^(carol|dave)$"));
}

#[test]
fn empty_config_uses_defaults() {
    let config = load_config_from_str("").expect("defaults");
    assert_eq!(config, ChimeConfig::default());
    assert_eq!(config.engine.log_level, "info");
    assert_eq!(config.engine.dedup_capacity, 5);
    assert!(config.engine.ignore_case);
    assert_eq!(config.router.default_target_status, DeliveryStatus::Unknown);
    assert_eq!(config.router.default_status, DeliveryStatus::NotPresented);
    assert!(config.router.sinks.is_empty());
    assert_eq!(config.filter.min_priority, 1);
    assert!(config.filter.rule.is_none());
}

#[test]
fn unknown_key_gets_suggestion_and_span() {
    let toml = "[engine]\ndedup_capasity = 3\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key,
            suggestion,
            span,
            ..
        } => {
            assert_eq!(key, "dedup_capasity");
            assert_eq!(suggestion.as_deref(), Some("dedup_capacity"));
            let span = span.expect("span into the inline source");
            assert_eq!(&toml[span.offset()..span.offset() + span.len()], "dedup_capasity");
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_key_in_sink_entry() {
    let toml = "[[router.sinks]]\nkind = \"log\"\nnmae = \"x\"\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(matches!(
        &errors[0],
        ConfigError::UnknownKey { suggestion: Some(s), .. } if s == "name"
    ));
}

#[test]
fn misspelled_status_gets_suggestion() {
    let toml = "[router]\ndefault_status = \"not_presentd\"\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    match &errors[0] {
        ConfigError::UnknownValue {
            value, suggestion, ..
        } => {
            assert_eq!(value, "not_presentd");
            assert_eq!(suggestion.as_deref(), Some("not_presented"));
        }
        other => panic!("expected UnknownValue, got {other:?}"),
    }
}

#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[engine]\ndedup_capacity = \"many\"\n").unwrap_err();
    assert!(matches!(&errors[0], ConfigError::InvalidType { key, .. } if key.contains("dedup_capacity")));
}

#[test]
fn validation_runs_after_loading() {
    let toml = "[[router.sinks]]\nkind = \"command\"\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(matches!(&errors[0], ConfigError::Validation { message } if message.contains("program")));
}

#[test]
fn explicit_path_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[engine]\nlog_level = \"warn\"").unwrap();
    let config = load_and_validate_path(file.path()).expect("valid file");
    assert_eq!(config.engine.log_level, "warn");
}

#[test]
fn explicit_path_errors_point_into_the_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[filter]\nmin_prio = 2\n").unwrap();
    let errors = load_and_validate_path(file.path()).unwrap_err();
    match &errors[0] {
        ConfigError::UnknownKey { suggestion, src, .. } => {
            assert_eq!(suggestion.as_deref(), Some("min_priority"));
            assert!(src.is_some());
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn missing_explicit_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let errors = load_and_validate_path(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(&errors[0], ConfigError::NotFound { .. }));
}

#[test]
fn diagnostics_render_with_codes() {
    use miette::Diagnostic;

    let errors = load_and_validate_str("[engine]\nlog_levle = \"info\"\n").unwrap_err();
    let code = errors[0].code().map(|c| c.to_string());
    assert_eq!(code.as_deref(), Some("chime::config::unknown_key"));
    let help = errors[0].help().map(|h| h.to_string()).unwrap_or_default();
    assert!(help.contains("did you mean `log_level`?"));
}
