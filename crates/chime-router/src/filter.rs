// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filter trees that score events with a [`Priority`].
//!
//! Leaves read one aspect of the event; combinators fold their children's
//! priorities with the [`Priority`] algebra and combine their tag interest.
//! A combinator owns its children outright, so a filter is always a tree.

use std::fmt;

use chime_core::{ChimeError, Event, HIGHLIGHT_TAG, PRIVATE_TAG, Priority, TagSet};

use crate::pattern::PatternMatcher;

/// The combinators a filter tree may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Minimum of the children; tag interest is intersected.
    And,
    /// Maximum of the children; tag interest is united.
    Or,
    /// Sum of the children.
    Add,
    /// First child minus the second.
    Sub,
    /// Negation of the only child.
    Not,
    /// The only child multiplied by a constant factor.
    Scale,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::And,
        Operator::Or,
        Operator::Add,
        Operator::Sub,
        Operator::Not,
        Operator::Scale,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Add => "add",
            Operator::Sub => "sub",
            Operator::Not => "not",
            Operator::Scale => "scale",
        }
    }

    /// Look up an operator by name (case-insensitive).
    ///
    /// Anything else is an [`ChimeError::UnknownOperator`]: there is no
    /// dynamic fallback.
    pub fn parse(name: &str) -> Result<Operator, ChimeError> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ChimeError::UnknownOperator {
                operator: name.to_string(),
            })
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in a filter tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `+1` if the event carries the tag, else `-1`.
    Tag(String),
    /// `+1` if the message body matches.
    Text(PatternMatcher),
    /// `+1` if the sender prefix matches.
    Sender(PatternMatcher),
    /// `+1` for highlights.
    Highlight,
    /// `+1` for private messages.
    Private,
    /// Always the same priority.
    Constant(Priority),
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Add(Vec<Filter>),
    Sub(Box<Filter>, Box<Filter>),
    Not(Box<Filter>),
    Scale(Box<Filter>, i64),
}

impl Filter {
    pub fn tag(tag: impl Into<String>) -> Filter {
        Filter::Tag(tag.into())
    }

    pub fn text(spec: &str, default_ignore_case: bool) -> Result<Filter, ChimeError> {
        Ok(Filter::Text(PatternMatcher::compile(spec, default_ignore_case)?))
    }

    pub fn sender(spec: &str, default_ignore_case: bool) -> Result<Filter, ChimeError> {
        Ok(Filter::Sender(PatternMatcher::compile(spec, default_ignore_case)?))
    }

    pub fn constant(value: i64) -> Filter {
        Filter::Constant(Priority::new(value))
    }

    pub fn and(children: Vec<Filter>) -> Filter {
        Filter::And(children)
    }

    pub fn or(children: Vec<Filter>) -> Filter {
        Filter::Or(children)
    }

    pub fn add(children: Vec<Filter>) -> Filter {
        Filter::Add(children)
    }

    pub fn sub(minuend: Filter, subtrahend: Filter) -> Filter {
        Filter::Sub(Box::new(minuend), Box::new(subtrahend))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(child: Filter) -> Filter {
        Filter::Not(Box::new(child))
    }

    pub fn scale(child: Filter, factor: i64) -> Filter {
        Filter::Scale(Box::new(child), factor)
    }

    /// Build a combinator node, checking the operator's arity.
    ///
    /// `factor` is required by [`Operator::Scale`] and rejected elsewhere.
    pub fn combine(
        op: Operator,
        mut children: Vec<Filter>,
        factor: Option<i64>,
    ) -> Result<Filter, ChimeError> {
        if factor.is_some() && op != Operator::Scale {
            return Err(ChimeError::Config(format!(
                "operator `{op}` does not take a factor"
            )));
        }
        let arity = |expected: usize| {
            if children.len() == expected {
                Ok(())
            } else {
                Err(ChimeError::Config(format!(
                    "operator `{op}` takes {expected} operand(s), got {}",
                    children.len()
                )))
            }
        };
        match op {
            Operator::And => Ok(Filter::And(children)),
            Operator::Or => Ok(Filter::Or(children)),
            Operator::Add => Ok(Filter::Add(children)),
            Operator::Sub => {
                arity(2)?;
                let subtrahend = children.pop();
                let minuend = children.pop();
                match (minuend, subtrahend) {
                    (Some(a), Some(b)) => Ok(Filter::sub(a, b)),
                    _ => Err(ChimeError::Internal("sub arity check".into())),
                }
            }
            Operator::Not => {
                arity(1)?;
                children
                    .pop()
                    .map(Filter::not)
                    .ok_or_else(|| ChimeError::Internal("not arity check".into()))
            }
            Operator::Scale => {
                arity(1)?;
                let factor = factor.ok_or_else(|| {
                    ChimeError::Config("operator `scale` requires a factor".into())
                })?;
                children
                    .pop()
                    .map(|child| Filter::scale(child, factor))
                    .ok_or_else(|| ChimeError::Internal("scale arity check".into()))
            }
        }
    }

    /// Score an event.
    ///
    /// Every child is evaluated; priorities are not booleans, so there is no
    /// short-circuit. Empty `And`/`Or`/`Add` nodes score zero.
    pub fn prioritize(&self, event: &Event) -> Priority {
        match self {
            Filter::Tag(tag) => Priority::from_bool(event.tags.contains(tag)),
            Filter::Text(m) => Priority::from_bool(m.matches(&event.body)),
            Filter::Sender(m) => Priority::from_bool(m.matches(&event.sender_prefix)),
            Filter::Highlight => Priority::from_bool(event.highlighted),
            Filter::Private => Priority::from_bool(event.is_private()),
            Filter::Constant(p) => *p,
            Filter::And(children) => fold(children, event, Priority::min),
            Filter::Or(children) => fold(children, event, Priority::max),
            Filter::Add(children) => fold(children, event, Priority::add),
            Filter::Sub(a, b) => a.prioritize(event).sub(b.prioritize(event)),
            Filter::Not(child) => child.prioritize(event).negate(),
            Filter::Scale(child, factor) => child.prioritize(event).scale(*factor),
        }
    }

    /// Tags this filter needs to see.
    pub fn interested_in_tags(&self) -> TagSet {
        match self {
            Filter::Tag(tag) => TagSet::from([tag.as_str()]),
            Filter::Private => TagSet::from([PRIVATE_TAG]),
            Filter::Highlight => TagSet::from([HIGHLIGHT_TAG]),
            Filter::Text(_) | Filter::Sender(_) | Filter::Constant(_) => TagSet::wildcard(),
            Filter::Or(children) | Filter::Add(children) => {
                let mut tags = TagSet::new();
                for child in children {
                    tags.union_update(&child.interested_in_tags());
                }
                tags
            }
            Filter::Sub(a, b) => a.interested_in_tags().union(&b.interested_in_tags()),
            Filter::And(children) => {
                let mut sets = children.iter().map(Filter::interested_in_tags);
                let Some(mut tags) = sets.next() else {
                    return TagSet::wildcard();
                };
                for set in sets {
                    tags.intersection_update(&set);
                }
                tags
            }
            // Negation says nothing about which tags matter.
            Filter::Not(_) => TagSet::wildcard(),
            Filter::Scale(child, _) => child.interested_in_tags(),
        }
    }
}

fn fold(children: &[Filter], event: &Event, op: fn(Priority, Priority) -> Priority) -> Priority {
    children
        .iter()
        .map(|child| child.prioritize(event))
        .reduce(op)
        .unwrap_or(Priority::ZERO)
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, name: &str, children: &[Filter]) -> fmt::Result {
            write!(f, "{name}(")?;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{child}")?;
            }
            write!(f, ")")
        }

        match self {
            Filter::Tag(tag) => write!(f, "tag({tag})"),
            Filter::Text(m) => write!(f, "text({})", m.spec()),
            Filter::Sender(m) => write!(f, "sender({})", m.spec()),
            Filter::Highlight => write!(f, "highlight"),
            Filter::Private => write!(f, "private"),
            Filter::Constant(p) => write!(f, "{p}"),
            Filter::And(c) => list(f, "and", c),
            Filter::Or(c) => list(f, "or", c),
            Filter::Add(c) => list(f, "add", c),
            Filter::Sub(a, b) => write!(f, "sub({a}, {b})"),
            Filter::Not(c) => write!(f, "not({c})"),
            Filter::Scale(c, k) => write!(f, "scale({c}, {k})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_core::WILDCARD;
    use chime_test_utils::EventBuilder;

    #[test]
    fn leaves_map_booleans_to_plus_minus_one() {
        let e = EventBuilder::new()
            .tags(["irc_privmsg", PRIVATE_TAG])
            .sender("alice")
            .body("ping snowball")
            .highlighted(true)
            .build();

        assert_eq!(Filter::tag("irc_privmsg").prioritize(&e), Priority::YES);
        assert_eq!(Filter::tag("irc_join").prioritize(&e), Priority::NO);
        assert_eq!(Filter::Highlight.prioritize(&e), Priority::YES);
        assert_eq!(Filter::Private.prioritize(&e), Priority::YES);
        assert_eq!(Filter::sender("ali*", true).unwrap().prioritize(&e), Priority::YES);
        assert_eq!(Filter::text("*snowball", true).unwrap().prioritize(&e), Priority::YES);
        assert_eq!(Filter::text("snowball", true).unwrap().prioritize(&e), Priority::NO);
        assert_eq!(Filter::constant(7).prioritize(&e), Priority::new(7));
    }

    #[test]
    fn combinators_follow_priority_algebra() {
        let e = EventBuilder::new().highlighted(true).build();
        let yes = || Filter::Highlight;
        let no = || Filter::Private;

        assert_eq!(Filter::and(vec![yes(), no()]).prioritize(&e), Priority::NO);
        assert_eq!(Filter::or(vec![yes(), no()]).prioritize(&e), Priority::YES);
        assert_eq!(
            Filter::add(vec![yes(), yes(), Filter::constant(3)]).prioritize(&e),
            Priority::new(5)
        );
        assert_eq!(Filter::sub(yes(), no()).prioritize(&e), Priority::new(2));
        assert_eq!(Filter::not(yes()).prioritize(&e), Priority::NO);
        assert_eq!(Filter::scale(no(), 10).prioritize(&e), Priority::new(-10));
        assert_eq!(Filter::and(vec![]).prioritize(&e), Priority::ZERO);
    }

    #[test]
    fn interest_aggregation() {
        let a = Filter::tag("a");
        let b = Filter::tag("b");
        let any = Filter::text("*", true).unwrap();

        assert_eq!(
            Filter::or(vec![a.clone(), b.clone()]).interested_in_tags(),
            TagSet::from(["a", "b"])
        );
        assert_eq!(
            Filter::and(vec![a.clone(), b.clone()]).interested_in_tags(),
            TagSet::new()
        );
        assert_eq!(
            Filter::and(vec![a.clone(), any.clone()]).interested_in_tags(),
            TagSet::from(["a"])
        );
        assert_eq!(
            Filter::or(vec![a.clone(), any]).interested_in_tags(),
            TagSet::from(["a", WILDCARD])
        );
        assert_eq!(Filter::and(vec![]).interested_in_tags(), TagSet::wildcard());
        assert_eq!(Filter::not(a.clone()).interested_in_tags(), TagSet::wildcard());
        assert_eq!(Filter::scale(a.clone(), 3).interested_in_tags(), TagSet::from(["a"]));
        assert_eq!(Filter::sub(a, b).interested_in_tags(), TagSet::from(["a", "b"]));
        assert_eq!(
            Filter::Highlight.interested_in_tags(),
            TagSet::from([HIGHLIGHT_TAG])
        );
    }

    #[test]
    fn operator_names() {
        assert_eq!(Operator::parse("AND").unwrap(), Operator::And);
        assert_eq!(Operator::parse("scale").unwrap(), Operator::Scale);
        match Operator::parse("mul") {
            Err(ChimeError::UnknownOperator { operator }) => assert_eq!(operator, "mul"),
            other => panic!("expected UnknownOperator, got {other:?}"),
        }
    }

    #[test]
    fn combine_checks_arity_and_factor() {
        let e = EventBuilder::new().highlighted(true).build();

        let f = Filter::combine(Operator::Scale, vec![Filter::Highlight], Some(4)).unwrap();
        assert_eq!(f.prioritize(&e), Priority::new(4));

        let f = Filter::combine(
            Operator::Sub,
            vec![Filter::constant(10), Filter::Highlight],
            None,
        )
        .unwrap();
        assert_eq!(f.prioritize(&e), Priority::new(9));

        assert!(Filter::combine(Operator::Not, vec![], None).is_err());
        assert!(Filter::combine(Operator::Scale, vec![Filter::Highlight], None).is_err());
        assert!(Filter::combine(Operator::Or, vec![], Some(2)).is_err());
        assert!(
            Filter::combine(
                Operator::Sub,
                vec![Filter::Highlight, Filter::Private, Filter::Private],
                None
            )
            .is_err()
        );
    }

    #[test]
    fn rebuilding_is_deterministic() {
        let build = || {
            Filter::or(vec![
                Filter::scale(Filter::Highlight, 5),
                Filter::and(vec![Filter::Private, Filter::sender("bob", true).unwrap()]),
            ])
        };
        let e = EventBuilder::new()
            .tags([PRIVATE_TAG])
            .sender("Bob")
            .build();
        assert_eq!(build(), build());
        assert_eq!(build().prioritize(&e), build().prioritize(&e));
        assert_eq!(build().prioritize(&e), Priority::YES);
    }

    #[test]
    fn display_renders_tree() {
        let f = Filter::or(vec![Filter::tag("a"), Filter::not(Filter::Private)]);
        assert_eq!(f.to_string(), "or(tag(a), not(private))");
    }
}
