use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Upper bound (inclusive) of the low band, in percent.
pub const LOW_UPPER_BOUND: f64 = 40.0;
/// Upper bound (inclusive) of the medium band, in percent.
pub const MEDIUM_UPPER_BOUND: f64 = 70.0;

/// Stress severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "low_stress")]
    Low,
    #[serde(rename = "medium_stress")]
    Medium,
    #[serde(rename = "high_stress")]
    High,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Low, Tier::Medium, Tier::High];

    /// Buckets a normalized percentage.
    ///
    /// Each band's upper bound belongs to that band: exactly 40% is Low and
    /// exactly 70% is Medium.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage <= LOW_UPPER_BOUND {
            Tier::Low
        } else if percentage <= MEDIUM_UPPER_BOUND {
            Tier::Medium
        } else {
            Tier::High
        }
    }

    /// Key used in catalog documents and exports.
    pub fn key(&self) -> &'static str {
        match self {
            Tier::Low => "low_stress",
            Tier::Medium => "medium_stress",
            Tier::High => "high_stress",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Low => "Low Stress - You're managing well!",
            Tier::Medium => "Moderate Stress - Some areas need attention",
            Tier::High => "High Stress - Priority support needed",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Tier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .into_iter()
            .find(|tier| tier.key() == s)
            .ok_or_else(|| Error::UnknownTier(s.to_string()))
    }
}
