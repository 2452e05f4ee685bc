// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The host's callback tuple and its normalization into an [`Event`].

use chime_core::{ChimeError, Event, SourceRef, TagSet};
use chrono::DateTime;

/// The seven strings a host print callback carries, untouched.
///
/// Equality is exact field-by-field equality; that is what duplicate
/// suppression compares.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawEvent {
    pub source: String,
    pub date: String,
    pub tags: String,
    pub displayed: String,
    pub highlighted: String,
    pub prefix: String,
    pub message: String,
}

impl RawEvent {
    pub const FIELDS: usize = 7;

    /// Split one tab-separated line. The message is the last field and may
    /// itself contain tabs.
    pub fn from_tab_line(line: &str) -> Result<Self, ChimeError> {
        let fields: Vec<&str> = line.splitn(Self::FIELDS, '\t').collect();
        let &[source, date, tags, displayed, highlighted, prefix, message] = fields.as_slice() else {
            return Err(ChimeError::InvalidEvent {
                field: "line",
                message: format!(
                    "expected {} tab-separated fields, found {}",
                    Self::FIELDS,
                    fields.len()
                ),
            });
        };

        Ok(Self {
            source: source.to_string(),
            date: date.to_string(),
            tags: tags.to_string(),
            displayed: displayed.to_string(),
            highlighted: highlighted.to_string(),
            prefix: prefix.to_string(),
            message: message.to_string(),
        })
    }

    /// Parse the raw strings into an [`Event`].
    ///
    /// The date is epoch seconds (UTC); tags are comma-joined with empty
    /// segments dropped; flags are integers where anything non-zero is true.
    pub fn normalize(&self) -> Result<Event, ChimeError> {
        let secs = parse_int("date", &self.date)?;
        let timestamp =
            DateTime::from_timestamp(secs, 0).ok_or_else(|| ChimeError::InvalidEvent {
                field: "date",
                message: format!("timestamp {secs} is out of range"),
            })?;

        Ok(Event {
            source: SourceRef(self.source.clone()),
            timestamp,
            tags: self
                .tags
                .split(',')
                .filter(|tag| !tag.is_empty())
                .collect::<TagSet>(),
            displayed: parse_int("displayed", &self.displayed)? != 0,
            highlighted: parse_int("highlighted", &self.highlighted)? != 0,
            sender_prefix: self.prefix.clone(),
            body: self.message.clone(),
        })
    }
}

fn parse_int(field: &'static str, value: &str) -> Result<i64, ChimeError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|e| ChimeError::InvalidEvent {
            field,
            message: format!("`{value}` is not an integer: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(date: &str, tags: &str, displayed: &str, highlighted: &str) -> RawEvent {
        RawEvent {
            source: "0x55d0".into(),
            date: date.into(),
            tags: tags.into(),
            displayed: displayed.into(),
            highlighted: highlighted.into(),
            prefix: "alice".into(),
            message: "hi there".into(),
        }
    }

    #[test]
    fn normalizes_a_typical_line() {
        let e = raw("1700000000", "notify_private,nick_alice,log1", "1", "0")
            .normalize()
            .unwrap();
        assert_eq!(e.source, SourceRef("0x55d0".into()));
        assert_eq!(e.timestamp.timestamp(), 1_700_000_000);
        assert_eq!(
            e.tags,
            TagSet::from(["notify_private", "nick_alice", "log1"])
        );
        assert!(e.displayed);
        assert!(!e.highlighted);
        assert_eq!(e.sender_prefix, "alice");
        assert_eq!(e.body, "hi there");
    }

    #[test]
    fn empty_tag_segments_are_dropped() {
        let e = raw("0", ",a,,b,", "0", "1").normalize().unwrap();
        assert_eq!(e.tags, TagSet::from(["a", "b"]));
        assert!(e.highlighted);

        let e = raw("0", "", "0", "0").normalize().unwrap();
        assert!(e.tags.is_empty());
    }

    #[test]
    fn any_nonzero_flag_is_true() {
        let e = raw("0", "", "2", "-1").normalize().unwrap();
        assert!(e.displayed && e.highlighted);
    }

    #[test]
    fn malformed_fields_are_rejected() {
        let err = raw("yesterday", "", "1", "0").normalize().unwrap_err();
        assert!(matches!(err, ChimeError::InvalidEvent { field: "date", .. }));

        let err = raw("0", "", "yes", "0").normalize().unwrap_err();
        assert!(matches!(err, ChimeError::InvalidEvent { field: "displayed", .. }));

        let err = raw(&i64::MAX.to_string(), "", "1", "0").normalize().unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn tab_lines_keep_tabs_in_the_message() {
        let r = RawEvent::from_tab_line("0x1\t0\ta,b\t1\t0\tbob\tcol1\tcol2").unwrap();
        assert_eq!(r.prefix, "bob");
        assert_eq!(r.message, "col1\tcol2");

        let err = RawEvent::from_tab_line("0x1\t0\ta").unwrap_err();
        assert!(err.to_string().contains("found 3"));
    }
}
