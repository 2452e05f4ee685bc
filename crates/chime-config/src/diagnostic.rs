// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns Figment errors into miette diagnostics.
//!
//! Unknown keys and unknown enum values get a "did you mean" suggestion from
//! Jaro-Winkler similarity, and a source span when the offending key can be
//! located in one of the loaded files.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Similarity a candidate needs before it is offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration problem, ready for miette to render.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(chime::config::unknown_key),
        help("{}", format_choices_help(suggestion.as_deref(), "valid keys", valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A string that should name one of a fixed set of values does not.
    #[error("unknown value `{value}` for `{key}`")]
    #[diagnostic(
        code(chime::config::unknown_value),
        help("{}", format_choices_help(suggestion.as_deref(), "expected one of", valid_values))
    )]
    UnknownValue {
        key: String,
        value: String,
        suggestion: Option<String>,
        valid_values: String,
    },

    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(chime::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(chime::config::missing_key),
        help("add `{key} = <value>` to your chime.toml")
    )]
    MissingKey { key: String },

    /// An explicitly requested config file does not exist.
    #[error("config file `{path}` not found")]
    #[diagnostic(code(chime::config::not_found))]
    NotFound { path: String },

    #[error("validation error: {message}")]
    #[diagnostic(code(chime::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(chime::config::other))]
    Other(String),
}

fn format_choices_help(suggestion: Option<&str>, label: &str, choices: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? {label}: {choices}"),
        None => format!("{label}: {choices}"),
    }
}

/// Convert every error inside a `figment::Error`.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| {
            let key = error
                .path
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(".");

            match &error.kind {
                Kind::UnknownField(field, expected) => {
                    let (span, src) = find_source_span(&error, field, toml_sources);
                    ConfigError::UnknownKey {
                        key: field.clone(),
                        suggestion: suggest_key(field, expected),
                        valid_keys: expected.join(", "),
                        span,
                        src,
                    }
                }
                Kind::UnknownVariant(value, expected) => ConfigError::UnknownValue {
                    key,
                    value: value.clone(),
                    suggestion: suggest_key(value, expected),
                    valid_values: expected.join(", "),
                },
                Kind::MissingField(field) => ConfigError::MissingKey {
                    key: if key.is_empty() {
                        field.to_string()
                    } else {
                        format!("{key}.{field}")
                    },
                },
                Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                    key,
                    detail: format!("found {actual}, expected {expected}"),
                    expected: expected.clone(),
                },
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

fn find_source_span(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let source_path = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // Inline strings have no file source; fall back to the only candidate.
    let source = match source_path {
        Some(path) => toml_sources
            .iter()
            .find(|(p, _)| *p == path)
            .or_else(|| toml_sources.iter().find(|(p, _)| same_file(p, &path))),
        None if toml_sources.len() == 1 => toml_sources.first(),
        None => None,
    };

    if let Some((path, content)) = source
        && let Some(offset) = find_key_offset(content, &error.path, field)
    {
        let span = SourceSpan::new(offset.into(), field.len());
        return (Some(span), Some(NamedSource::new(path, content.clone())));
    }

    (None, None)
}

fn same_file(a: &str, b: &str) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Byte offset of `field` as a key inside the table at `path`.
///
/// Tries the deepest matching `[a.b]` or `[[a.b]]` header first, so keys
/// inside nested and array tables are found. An empty path searches from the
/// top of the file.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let search_start = if path.is_empty() {
        0
    } else {
        (1..=path.len()).rev().find_map(|depth| {
            let table = path[..depth].join(".");
            [format!("[[{table}]]"), format!("[{table}]")]
                .iter()
                .find_map(|header| content.find(header.as_str()).map(|pos| pos + header.len()))
        })?
    };

    let mut line_start = search_start;
    for line in content[search_start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(after) = trimmed.strip_prefix(field)
            && after.trim_start().starts_with('=')
        {
            return Some(line_start + (line.len() - trimmed.len()));
        }
        line_start += line.len();
    }

    None
}

/// The closest valid name above the similarity threshold, if any.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|&key| (strsim::jaro_winkler(unknown, key), key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render each error to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_close_keys_only() {
        let valid = &["log_level", "dedup_capacity", "ignore_case"];
        assert_eq!(suggest_key("dedup_capasity", valid), Some("dedup_capacity".to_string()));
        assert_eq!(suggest_key("ignorecase", valid), Some("ignore_case".to_string()));
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn finds_keys_in_nested_and_array_tables() {
        let content = "[engine]\nlog_level = \"info\"\n\n[[router.sinks]]\nkind = \"log\"\nnmae = \"x\"\n";
        let path = vec!["router".to_string(), "sinks".to_string()];
        let o = find_key_offset(content, &path, "nmae").unwrap();
        assert_eq!(&content[o..o + 4], "nmae");

        let path = vec!["engine".to_string()];
        let o = find_key_offset(content, &path, "log_level").unwrap();
        assert_eq!(&content[o..o + 9], "log_level");
    }

    #[test]
    fn key_prefixes_are_not_matches() {
        let content = "[engine]\nlog_level_extra = 1\nlog_level = 2\n";
        let path = vec!["engine".to_string()];
        let o = find_key_offset(content, &path, "log_level").unwrap();
        assert_eq!(&content[o..o + 11], "log_level =");
        assert_eq!(find_key_offset(content, &["nope".to_string()], "x"), None);
    }

    #[test]
    fn help_text_mentions_suggestion() {
        assert_eq!(
            format_choices_help(Some("seen"), "expected one of", "seen, error"),
            "did you mean `seen`? expected one of: seen, error"
        );
        assert_eq!(format_choices_help(None, "valid keys", "a"), "valid keys: a");
    }
}
