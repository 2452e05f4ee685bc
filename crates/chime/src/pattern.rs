// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `chime match`: try a pattern against sample texts.

use std::io::Write;
use std::process::ExitCode;

use chime_router::PatternMatcher;

use crate::CliError;

/// Prints one `match`/`no match` line per text. Exits non-zero when nothing
/// matched, so the command works in shell conditionals.
pub fn run(
    pattern: &str,
    texts: &[String],
    default_ignore_case: bool,
    mut out: impl Write,
) -> Result<ExitCode, CliError> {
    let matcher = PatternMatcher::compile(pattern, default_ignore_case)?;
    writeln!(
        out,
        "{:?} pattern, {}",
        matcher.mode(),
        if matcher.ignore_case() { "ignoring case" } else { "case-sensitive" }
    )?;

    let mut any = false;
    for text in texts {
        let hit = matcher.matches(text);
        any |= hit;
        writeln!(out, "{}\t{text}", if hit { "match" } else { "no match" })?;
    }

    Ok(if any { ExitCode::SUCCESS } else { ExitCode::from(1) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_core::ChimeError;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reports_each_text() {
        let mut out = Vec::new();
        let code = run("*bot", &texts(&["NewsBot", "carol"]), true, &mut out).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Glob pattern, ignoring case\n"));
        assert!(text.contains("match\tNewsBot\n"));
        assert!(text.contains("no match\tcarol\n"));
    }

    #[test]
    fn nothing_matching_fails() {
        let mut out = Vec::new();
        let code = run("exact:abc", &texts(&["ABC"]), false, &mut out).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn case_prefix_overrides_the_default() {
        let mut out = Vec::new();
        run("cs:abc*", &texts(&["ABCD", "abcd"]), true, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Glob pattern, case-sensitive\n"));
        assert!(text.contains("no match\tABCD\n"));
        assert!(text.contains("match\tabcd\n"));

        let mut out = Vec::new();
        run("ic:exact:abc", &texts(&["ABC"]), false, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("match\tABC\n"));
    }

    #[test]
    fn bad_pattern_is_an_error() {
        let err = run("[abc", &texts(&["a"]), true, Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Chime(ChimeError::PatternSyntax { .. })));
    }
}
