// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outcome of a delivery attempt.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How well a delivery attempt succeeded, from confirmed receipt down to
/// permanent failure. Higher is better and [`DeliveryStatus::Unknown`] is the
/// zero point.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// The user confirmed they saw the notification.
    Confirmed,
    /// Presented on a device the user was using at the time.
    Seen,
    /// Presented on a device used recently (screensaver not active).
    LikelySeen,
    /// Presented on an idle device; the user will notice it on return.
    NotYetSeen,
    /// The outcome could not be determined.
    Unknown,
    /// Presented on an idle device and may vanish before the user looks.
    NotSeen,
    /// Could not be presented at all.
    NotPresented,
    /// Failed, but a later attempt may succeed.
    TemporaryError,
    /// Failed with no further information.
    Error,
    /// Failed and will keep failing.
    PermanentError,
}

impl DeliveryStatus {
    /// Numeric rank on the `-100..=100` scale.
    pub const fn value(self) -> i16 {
        match self {
            DeliveryStatus::Confirmed => 100,
            DeliveryStatus::Seen => 80,
            DeliveryStatus::LikelySeen => 50,
            DeliveryStatus::NotYetSeen => 10,
            DeliveryStatus::Unknown => 0,
            DeliveryStatus::NotSeen => -10,
            DeliveryStatus::NotPresented => -30,
            DeliveryStatus::TemporaryError => -50,
            DeliveryStatus::Error => -80,
            DeliveryStatus::PermanentError => -100,
        }
    }

    /// Any of the three error outcomes.
    pub const fn is_error(self) -> bool {
        self.value() <= DeliveryStatus::TemporaryError.value()
    }
}

impl PartialOrd for DeliveryStatus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DeliveryStatus {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}
