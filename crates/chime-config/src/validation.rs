// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks serde cannot express.
//!
//! Everything is checked and all problems are reported together.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::ChimeConfig;

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

pub fn validate_config(config: &ChimeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.engine.log_level.as_str()) {
        errors.push(ConfigError::UnknownValue {
            key: "engine.log_level".to_string(),
            value: config.engine.log_level.clone(),
            suggestion: crate::diagnostic::suggest_key(&config.engine.log_level, &LOG_LEVELS),
            valid_values: LOG_LEVELS.join(", "),
        });
    }

    if config.engine.dedup_capacity == 0 {
        errors.push(ConfigError::Validation {
            message: "engine.dedup_capacity must be at least 1".to_string(),
        });
    }

    let mut seen_names = HashSet::new();
    for (i, sink) in config.router.sinks.iter().enumerate() {
        let name = sink.effective_name();
        if !seen_names.insert(name) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate sink name `{name}` in [[router.sinks]]"),
            });
        }

        match sink.kind.as_str() {
            "command" => {
                if sink.program.as_deref().is_none_or(|p| p.trim().is_empty()) {
                    errors.push(ConfigError::Validation {
                        message: format!("router.sinks[{i}] (`{name}`): command sinks need a non-empty `program`"),
                    });
                }
            }
            "desktop" => {
                if sink.backends.as_ref().is_some_and(Vec::is_empty) {
                    errors.push(ConfigError::Validation {
                        message: format!("router.sinks[{i}] (`{name}`): `backends` must not be empty; omit it to try all"),
                    });
                }
            }
            _ => {}
        }

        if sink.wait_ms == Some(0) {
            errors.push(ConfigError::Validation {
                message: format!("router.sinks[{i}] (`{name}`): `wait_ms` must be at least 1"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SinkSpec;

    fn sink(kind: &str) -> SinkSpec {
        SinkSpec {
            kind: kind.to_string(),
            ..SinkSpec::default()
        }
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&ChimeConfig::default()).is_ok());
    }

    #[test]
    fn bad_log_level_gets_a_suggestion() {
        let mut config = ChimeConfig::default();
        config.engine.log_level = "dbug".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            &errors[0],
            ConfigError::UnknownValue { suggestion: Some(s), .. } if s == "debug"
        ));
    }

    #[test]
    fn zero_dedup_capacity_fails() {
        let mut config = ChimeConfig::default();
        config.engine.dedup_capacity = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("dedup_capacity"));
    }

    #[test]
    fn command_without_program_fails() {
        let mut config = ChimeConfig::default();
        config.router.sinks.push(sink("command"));
        let mut blank = sink("command");
        blank.name = Some("blank".into());
        blank.program = Some("  ".into());
        config.router.sinks.push(blank);
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.to_string().contains("program")));
    }

    #[test]
    fn empty_backend_list_fails_but_unset_is_fine() {
        let mut config = ChimeConfig::default();
        config.router.sinks.push(sink("desktop"));
        assert!(validate_config(&config).is_ok());

        config.router.sinks[0].backends = Some(Vec::new());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("backends"));
    }

    #[test]
    fn duplicate_names_fail_including_defaulted_ones() {
        let mut config = ChimeConfig::default();
        config.router.sinks.push(sink("log"));
        config.router.sinks.push(sink("log"));
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("duplicate sink name `log`"));

        config.router.sinks[1].name = Some("audit".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = ChimeConfig::default();
        config.engine.log_level = "loud".into();
        config.engine.dedup_capacity = 0;
        let mut s = sink("log");
        s.wait_ms = Some(0);
        config.router.sinks.push(s);
        assert_eq!(validate_config(&config).unwrap_err().len(), 3);
    }
}
