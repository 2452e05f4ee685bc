// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! String matchers compiled from a small pattern language.
//!
//! A pattern spec is read left to right:
//!
//! 1. an optional case prefix: `cs:` / `case-sensitive:` or `ic:` /
//!    `ignore-case:` (the caller's default applies when absent),
//! 2. an optional mode prefix: `exact:` for string equality or `re:` for a
//!    regular expression searched anywhere in the text,
//! 3. otherwise the rest is a shell glob that must match the whole text.
//!
//! Prefixes themselves are matched case-insensitively.
//!
//! Globs support `?`, `*`, `[...]` classes (with `!` or `^` negation and
//! POSIX names such as `[:alpha:]`),
//! nested `{a,b}` alternation and backslash escapes.

use chime_core::ChimeError;
use regex::{Regex, RegexBuilder};

const CASE_SENSITIVE_PREFIXES: &[&str] = &["cs:", "case-sensitive:"];
const IGNORE_CASE_PREFIXES: &[&str] = &["ic:", "ignore-case:"];
const EXACT_PREFIX: &str = "exact:";
const REGEX_PREFIX: &str = "re:";

/// Characters escaped when they appear outside a bracket expression.
const GLOB_LITERAL_META: &str = ".^$+|()";

/// Short escapes the regex engine understands on its own (`\n`, `\t`, ...).
const SHORT_ESCAPES: &str = "aftnrv";

/// How a [`PatternMatcher`] compares text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    Regex,
    Glob,
}

#[derive(Debug, Clone)]
enum Compiled {
    Exact(String),
    Regex(Regex),
}

/// A compiled, reusable string matcher.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    spec: String,
    mode: MatchMode,
    ignore_case: bool,
    compiled: Compiled,
}

impl PatternMatcher {
    /// Compile `spec`, using `default_ignore_case` unless the pattern carries
    /// its own case prefix.
    ///
    /// Errors are reported here, never while matching.
    pub fn compile(spec: &str, default_ignore_case: bool) -> Result<Self, ChimeError> {
        let mut rest = spec;
        let mut ignore_case = default_ignore_case;

        if let Some(r) = strip_any_prefix(rest, CASE_SENSITIVE_PREFIXES) {
            ignore_case = false;
            rest = r;
        } else if let Some(r) = strip_any_prefix(rest, IGNORE_CASE_PREFIXES) {
            ignore_case = true;
            rest = r;
        }

        let (mode, compiled) = if let Some(literal) = strip_any_prefix(rest, &[EXACT_PREFIX]) {
            let literal = if ignore_case {
                literal.to_lowercase()
            } else {
                literal.to_string()
            };
            (MatchMode::Exact, Compiled::Exact(literal))
        } else if let Some(re) = strip_any_prefix(rest, &[REGEX_PREFIX]) {
            (MatchMode::Regex, Compiled::Regex(build_regex(spec, re, ignore_case)?))
        } else {
            let translated = glob_to_regex(rest).map_err(|reason| ChimeError::pattern(spec, reason))?;
            (
                MatchMode::Glob,
                Compiled::Regex(build_regex(spec, &translated, ignore_case)?),
            )
        };

        Ok(Self {
            spec: spec.to_string(),
            mode,
            ignore_case,
            compiled,
        })
    }

    /// Whether `text` matches.
    pub fn matches(&self, text: &str) -> bool {
        match &self.compiled {
            Compiled::Exact(literal) if self.ignore_case => text.to_lowercase() == *literal,
            Compiled::Exact(literal) => text == literal,
            Compiled::Regex(re) => re.is_match(text),
        }
    }

    /// The pattern text this matcher was compiled from, prefixes included.
    pub fn spec(&self) -> &str {
        &self.spec
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }
}

impl PartialEq for PatternMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.spec == other.spec && self.ignore_case == other.ignore_case
    }
}

fn build_regex(spec: &str, source: &str, ignore_case: bool) -> Result<Regex, ChimeError> {
    RegexBuilder::new(source)
        .case_insensitive(ignore_case)
        .build()
        .map_err(|e| ChimeError::pattern(spec, e.to_string()))
}

fn strip_any_prefix<'a>(text: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes.iter().find_map(|prefix| {
        let n = prefix.len();
        // Prefixes are ASCII, so an ASCII-equal head always ends on a char boundary.
        (text.len() >= n && text.as_bytes()[..n].eq_ignore_ascii_case(prefix.as_bytes()))
            .then(|| &text[n..])
    })
}

/// Translate a shell glob into an anchored regular expression.
///
/// The result matches the entire text. On malformed input the error names
/// the offending construct.
pub fn glob_to_regex(glob: &str) -> Result<String, String> {
    let mut out = String::with_capacity(glob.len() * 2);
    let mut chars = glob.chars().peekable();
    let mut brace_depth = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '?' => out.push('.'),
            '*' => out.push_str(".*"),
            '[' => translate_bracket(&mut chars, &mut out)?,
            ']' => return Err("unbalanced ']'".to_string()),
            '{' => {
                brace_depth += 1;
                out.push_str("(?:");
            }
            '}' => {
                if brace_depth == 0 {
                    return Err("unbalanced '}'".to_string());
                }
                brace_depth -= 1;
                out.push(')');
            }
            ',' if brace_depth > 0 => out.push('|'),
            '\\' => translate_escape(chars.next(), &mut out),
            c if GLOB_LITERAL_META.contains(c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }

    if brace_depth > 0 {
        return Err("unbalanced '{'".to_string());
    }

    Ok(format!("(?s)^(?:{out})$"))
}

/// Copy a bracket expression; the opening `[` has been consumed.
fn translate_bracket(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    out: &mut String,
) -> Result<(), String> {
    out.push('[');
    if matches!(chars.peek(), Some('!' | '^')) {
        chars.next();
        out.push('^');
    }
    // A `]` right after the opening is a member, not the end.
    if chars.peek() == Some(&']') {
        chars.next();
        out.push_str("\\]");
    }

    loop {
        match chars.next() {
            None => return Err("unbalanced '['".to_string()),
            Some(']') => {
                out.push(']');
                return Ok(());
            }
            Some('\\') => {
                let Some(next) = chars.next() else {
                    return Err("unbalanced '['".to_string());
                };
                out.push('\\');
                out.push(next);
            }
            Some('[') if chars.peek() == Some(&':') => match posix_class(chars) {
                Some(name) => {
                    out.push_str("[:");
                    out.push_str(&name);
                    out.push_str(":]");
                }
                None => out.push_str("\\["),
            },
            // Nested classes and set operators are regex-only syntax.
            Some(c @ ('[' | '&' | '~')) => {
                out.push('\\');
                out.push(c);
            }
            Some('-') if chars.peek() == Some(&'-') => out.push_str("\\-"),
            Some(c) => out.push(c),
        }
    }
}

/// Consume `:name:]` after a `[` inside a bracket expression. Leaves the
/// input untouched unless a complete POSIX class name follows.
fn posix_class(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
    let mut ahead = chars.clone();
    ahead.next();
    let mut name = String::new();
    loop {
        match ahead.next()? {
            ':' => break,
            c if c.is_ascii_alphabetic() => name.push(c),
            _ => return None,
        }
    }
    if name.is_empty() || ahead.next()? != ']' {
        return None;
    }
    *chars = ahead;
    Some(name)
}

fn translate_escape(next: Option<char>, out: &mut String) {
    match next {
        // A trailing backslash stands for itself.
        None => out.push_str("\\\\"),
        Some(c) if SHORT_ESCAPES.contains(c) => {
            out.push('\\');
            out.push(c);
        }
        // `\1` would read as a back-reference; keep the backslash literally.
        Some(c) if c.is_ascii_digit() => {
            out.push_str("\\\\");
            out.push(c);
        }
        Some(c) => out.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4]))),
    }
}
