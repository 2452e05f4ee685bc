// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Priorities assigned to events by filters.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// How strongly a filter recommends surfacing an event.
///
/// Positive values mean "notify", negative values mean "stay quiet". Yes/no
/// decisions map to `+1` and `-1` (see [`Priority::from_bool`]).
///
/// A priority can be scaled by a plain integer, but two priorities cannot be
/// multiplied:
///
/// ```compile_fail
/// use chime_core::Priority;
/// let _ = Priority::new(2) * Priority::new(3);
/// ```
///
/// Arithmetic saturates at the `i64` bounds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Priority(i64);

#[allow(clippy::should_implement_trait)] // the operator traits below delegate here
impl Priority {
    pub const ZERO: Priority = Priority(0);
    pub const YES: Priority = Priority(1);
    pub const NO: Priority = Priority(-1);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// `true` maps to `+1`, `false` to `-1`.
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::YES } else { Self::NO }
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    pub fn min(self, other: Priority) -> Priority {
        Ord::min(self, other)
    }

    pub fn max(self, other: Priority) -> Priority {
        Ord::max(self, other)
    }

    pub fn negate(self) -> Priority {
        Priority(self.0.saturating_neg())
    }

    pub fn scale(self, factor: i64) -> Priority {
        Priority(self.0.saturating_mul(factor))
    }

    pub fn add(self, other: Priority) -> Priority {
        Priority(self.0.saturating_add(other.0))
    }

    pub fn sub(self, other: Priority) -> Priority {
        self.add(other.negate())
    }
}

impl From<i64> for Priority {
    fn from(value: i64) -> Self {
        Priority(value)
    }
}

impl From<bool> for Priority {
    fn from(value: bool) -> Self {
        Priority::from_bool(value)
    }
}

impl From<Priority> for i64 {
    fn from(p: Priority) -> Self {
        p.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Neg for Priority {
    type Output = Priority;

    fn neg(self) -> Priority {
        self.negate()
    }
}

impl Add for Priority {
    type Output = Priority;

    fn add(self, rhs: Priority) -> Priority {
        Priority::add(self, rhs)
    }
}

impl Sub for Priority {
    type Output = Priority;

    fn sub(self, rhs: Priority) -> Priority {
        Priority::sub(self, rhs)
    }
}

impl Mul<i64> for Priority {
    type Output = Priority;

    fn mul(self, factor: i64) -> Priority {
        self.scale(factor)
    }
}

impl Mul<Priority> for i64 {
    type Output = Priority;

    fn mul(self, p: Priority) -> Priority {
        p.scale(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bool_convention() {
        assert_eq!(Priority::from_bool(true).value(), 1);
        assert_eq!(Priority::from_bool(false).value(), -1);
        assert!(Priority::from(true) > Priority::from(false));
    }

    #[test]
    fn operators_match_methods() {
        let a = Priority::new(3);
        let b = Priority::new(-5);
        assert_eq!(-a, Priority::new(-3));
        assert_eq!(a + b, Priority::new(-2));
        assert_eq!(a - b, Priority::new(8));
        assert_eq!(a * 4, Priority::new(12));
        assert_eq!(4 * a, Priority::new(12));
    }

    #[test]
    fn arithmetic_saturates() {
        assert_eq!(Priority::new(i64::MAX).add(Priority::YES).value(), i64::MAX);
        assert_eq!(Priority::new(i64::MIN).negate().value(), i64::MAX);
        assert_eq!(Priority::new(i64::MAX).scale(2).value(), i64::MAX);
    }

    proptest! {
        #[test]
        fn min_max_laws(a in any::<i64>(), b in any::<i64>(), c in any::<i64>()) {
            let (a, b, c) = (Priority::new(a), Priority::new(b), Priority::new(c));
            prop_assert_eq!(a.min(b), b.min(a));
            prop_assert_eq!(a.max(b), b.max(a));
            prop_assert_eq!(a.min(b).min(c), a.min(b.min(c)));
            prop_assert_eq!(a.max(b).max(c), a.max(b.max(c)));
            prop_assert_eq!(a.min(a), a);
            prop_assert_eq!(a.max(a), a);
        }

        #[test]
        fn scale_identity_and_zero(a in any::<i64>()) {
            let p = Priority::new(a);
            prop_assert_eq!(p.scale(1), p);
            prop_assert_eq!(p.scale(0), Priority::ZERO);
        }
    }
}
