// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tag sets with wildcard-aware set algebra.
//!
//! A filter or sink declares the tags it wants to see as a [`TagSet`]. It
//! only wants events carrying at least one of those tags, although it may
//! still receive others when a sibling asks for them.
//!
//! The member [`WILDCARD`] means "also accept events with tags that are not
//! listed". It never causes a hook on its own: a wildcard-only interest set
//! receives events only when some other component requests concrete tags.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The reserved tag meaning "anything not otherwise listed".
pub const WILDCARD: &str = "*";

/// A set of event tags with special handling for [`WILDCARD`].
///
/// `union` and `intersection` honour the wildcard; `difference` treats it as
/// an ordinary member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet {
    tags: BTreeSet<String>,
}

impl TagSet {
    /// Create an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A set containing only the wildcard.
    pub fn wildcard() -> Self {
        Self::from([WILDCARD])
    }

    /// Whether `tag` is a member.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Whether the wildcard is a member.
    pub fn has_wildcard(&self) -> bool {
        self.contains(WILDCARD)
    }

    /// Add one tag. Returns `true` if it was not present.
    pub fn add(&mut self, tag: impl Into<String>) -> bool {
        self.tags.insert(tag.into())
    }

    /// Remove one tag. Returns `true` if it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate over the tags in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// A copy of this set with the wildcard removed.
    pub fn without_wildcard(&self) -> TagSet {
        let mut out = self.clone();
        out.remove(WILDCARD);
        out
    }

    /// Union of both sets. The wildcard needs no special case here: if either
    /// side accepts anything, so does the result.
    pub fn union(&self, other: &TagSet) -> TagSet {
        let mut out = self.clone();
        out.union_update(other);
        out
    }

    /// In-place [`TagSet::union`].
    pub fn union_update(&mut self, other: &TagSet) {
        self.tags.extend(other.tags.iter().cloned());
    }

    /// Wildcard-aware intersection.
    ///
    /// * both sides have `*`: the plain union (everything either side wants).
    /// * only `self` has `*`: `(self ∩ other) ∪ other`, i.e. keep all of
    ///   `other` plus the overlap.
    /// * only `other` has `*`: `(self ∩ other) ∪ self`.
    /// * neither: the ordinary intersection.
    pub fn intersection(&self, other: &TagSet) -> TagSet {
        let mut out = self.clone();
        out.intersection_update(other);
        out
    }

    /// In-place [`TagSet::intersection`].
    pub fn intersection_update(&mut self, other: &TagSet) {
        match (self.has_wildcard(), other.has_wildcard()) {
            (true, true) => self.union_update(other),
            (true, false) => {
                self.tags.retain(|t| other.tags.contains(t));
                self.union_update(other);
            }
            (false, true) => {
                // (self ∩ other) ⊆ self, so self already is the answer.
            }
            (false, false) => self.tags.retain(|t| other.tags.contains(t)),
        }
    }

    /// Plain set difference; the wildcard is an ordinary member here.
    pub fn difference(&self, other: &TagSet) -> TagSet {
        let mut out = self.clone();
        out.difference_update(other);
        out
    }

    /// In-place [`TagSet::difference`].
    pub fn difference_update(&mut self, other: &TagSet) {
        self.tags.retain(|t| !other.tags.contains(t));
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, tag) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{tag}")?;
        }
        write!(f, "}}")
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for TagSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.tags.extend(iter.into_iter().map(Into::into));
    }
}

impl<const N: usize> From<[&str; N]> for TagSet {
    fn from(tags: [&str; N]) -> Self {
        tags.into_iter().collect()
    }
}

impl IntoIterator for TagSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.into_iter()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn abc() -> TagSet {
        TagSet::from(["a", "b", "c"])
    }

    #[test]
    fn construction_and_membership() {
        let a = abc();
        let b: TagSet = vec!["d", "e", "f"].into_iter().collect();
        let mut c = b.clone();
        c.add("g");

        assert!(a.contains("a") && a.contains("b") && a.contains("c"));
        assert!(!a.contains("d"));
        assert!(!a.contains(WILDCARD));
        assert!(c.contains("g"));
        assert!(!b.contains("g"), "clone must not share storage");
    }

    #[test]
    fn plain_intersection_and_union() {
        let a = abc();
        let b = TagSet::from(["d", "e", "f"]);
        let c = TagSet::from(["d", "e", "f", "g"]);
        let d = TagSet::from(["b", "d", "e", "g"]);

        assert_eq!(a.intersection(&b), TagSet::new());
        assert_eq!(a.intersection(&d), TagSet::from(["b"]));
        assert_eq!(b.intersection(&d), TagSet::from(["d", "e"]));
        assert_eq!(c.intersection(&d), TagSet::from(["d", "e", "g"]));

        assert_eq!(a.union(&b), TagSet::from(["a", "b", "c", "d", "e", "f"]));
        assert_eq!(c.union(&d), TagSet::from(["b", "d", "e", "f", "g"]));
        assert_eq!(d, TagSet::from(["b", "d", "e", "g"]));
    }

    #[test]
    fn wildcard_on_one_side_keeps_the_concrete_side() {
        let a = abc();
        let e = TagSet::from(["b", "d", "e", "g", "*"]);

        assert_eq!(a.intersection(&e), a);
        assert_eq!(e.intersection(&a), a);
        assert_eq!(e, TagSet::from(["b", "d", "e", "g", "*"]));
    }

    #[test]
    fn wildcard_on_both_sides_is_union() {
        let e = TagSet::from(["b", "d", "e", "g", "*"]);
        let f = TagSet::from(["b", "d", "h", "*"]);
        let expected = TagSet::from(["b", "d", "e", "g", "h", "*"]);

        assert_eq!(e.intersection(&f), expected);
        assert_eq!(f.intersection(&e), expected);
        assert_eq!(e.union(&f), expected);
    }

    #[test]
    fn union_keeps_wildcard() {
        let a = abc();
        let e = TagSet::from(["b", "d", "*"]);
        assert_eq!(a.union(&e), TagSet::from(["a", "b", "c", "d", "*"]));
    }

    #[test]
    fn difference_treats_wildcard_as_plain_member() {
        let e = TagSet::from(["a", "*"]);
        assert_eq!(e.difference(&TagSet::wildcard()), TagSet::from(["a"]));
        assert_eq!(e.difference(&TagSet::from(["b"])), e);
    }

    #[test]
    fn display_is_sorted() {
        assert_eq!(TagSet::from(["b", "a"]).to_string(), "{a, b}");
    }

    #[test]
    fn serde_is_a_plain_list() {
        let json = serde_json::to_string(&TagSet::from(["b", "a"])).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
    }

    fn tag_set() -> impl Strategy<Value = TagSet> {
        prop::collection::btree_set(prop_oneof![Just("*".to_string()), "[a-e]"], 0..6)
            .prop_map(|tags| tags.into_iter().collect())
    }

    fn plain_tag_set() -> impl Strategy<Value = TagSet> {
        prop::collection::btree_set("[a-e]", 0..6).prop_map(|tags| tags.into_iter().collect())
    }

    proptest! {
        #[test]
        fn union_is_commutative_and_associative(a in tag_set(), b in tag_set(), c in tag_set()) {
            prop_assert_eq!(a.union(&b), b.union(&a));
            prop_assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
        }

        #[test]
        fn operations_do_not_mutate_operands(a in tag_set(), b in tag_set()) {
            let (a0, b0) = (a.clone(), b.clone());
            let _ = a.union(&b);
            let _ = a.intersection(&b);
            let _ = a.difference(&b);
            prop_assert_eq!(a, a0);
            prop_assert_eq!(b, b0);
        }

        #[test]
        fn without_wildcard_matches_std_sets(a in plain_tag_set(), b in plain_tag_set()) {
            let sa: BTreeSet<String> = a.iter().map(String::from).collect();
            let sb: BTreeSet<String> = b.iter().map(String::from).collect();
            let inter: TagSet = sa.intersection(&sb).cloned().collect();
            let uni: TagSet = sa.union(&sb).cloned().collect();
            prop_assert_eq!(a.intersection(&b), inter);
            prop_assert_eq!(a.union(&b), uni);
        }

        #[test]
        fn one_sided_wildcard_intersection(a in plain_tag_set(), b in plain_tag_set()) {
            let mut wild = a.clone();
            wild.add(WILDCARD);
            let expected = a.intersection(&b).union(&b);
            prop_assert_eq!(wild.intersection(&b), expected);
        }

        #[test]
        fn both_wildcard_intersection_is_union(a in plain_tag_set(), b in plain_tag_set()) {
            let mut wa = a.clone();
            wa.add(WILDCARD);
            let mut wb = b.clone();
            wb.add(WILDCARD);
            prop_assert_eq!(wa.intersection(&wb), wa.union(&wb));
        }
    }
}
