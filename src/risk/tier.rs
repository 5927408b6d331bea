//! Five-tier risk stratification.
//!
//! Tier breakpoints are fixed constants rather than configuration: every
//! intervention cost table and success-rate range is indexed by these tiers,
//! so moving a breakpoint means re-pricing every table.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bounds of tiers 2..=5. Intervals are half-open: a score equal to a
/// breakpoint belongs to the higher tier.
pub const TIER_BREAKPOINTS: [f64; 4] = [0.10, 0.25, 0.50, 0.75];

/// Number of risk tiers
pub const TIER_COUNT: usize = 5;

/// Ordinal risk bucket derived from a risk probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RiskTier {
    /// Tier 1: [0.00, 0.10) monitoring only
    Normal,
    /// Tier 2: [0.10, 0.25)
    Low,
    /// Tier 3: [0.25, 0.50)
    Moderate,
    /// Tier 4: [0.50, 0.75)
    High,
    /// Tier 5: [0.75, 1.00]
    Critical,
}

impl RiskTier {
    pub const ALL: [RiskTier; TIER_COUNT] = [
        RiskTier::Normal,
        RiskTier::Low,
        RiskTier::Moderate,
        RiskTier::High,
        RiskTier::Critical,
    ];

    /// Classify a risk probability.
    ///
    /// Scores outside [0, 1] (and NaN) are rejected rather than clamped.
    pub fn from_score(risk_score: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&risk_score) {
            return Err(Error::InvalidRiskScore(risk_score));
        }

        let tier = match risk_score {
            s if s < TIER_BREAKPOINTS[0] => RiskTier::Normal,
            s if s < TIER_BREAKPOINTS[1] => RiskTier::Low,
            s if s < TIER_BREAKPOINTS[2] => RiskTier::Moderate,
            s if s < TIER_BREAKPOINTS[3] => RiskTier::High,
            _ => RiskTier::Critical,
        };
        Ok(tier)
    }

    /// Tier from its 1-based number
    pub fn from_number(number: u8) -> Result<Self> {
        match number {
            1..=5 => Ok(Self::ALL[usize::from(number - 1)]),
            _ => Err(Error::InvalidTier(number)),
        }
    }

    /// 1-based tier number
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// 0-based position, used to index per-tier tables
    pub fn index(self) -> usize {
        match self {
            RiskTier::Normal => 0,
            RiskTier::Low => 1,
            RiskTier::Moderate => 2,
            RiskTier::High => 3,
            RiskTier::Critical => 4,
        }
    }

    /// Get tier label for display
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Normal => "Normal",
            RiskTier::Low => "Low Risk",
            RiskTier::Moderate => "Moderate Risk",
            RiskTier::High => "High Risk",
            RiskTier::Critical => "Critical Risk",
        }
    }

    /// Get short tier label
    pub fn short_label(self) -> &'static str {
        match self {
            RiskTier::Normal => "T1",
            RiskTier::Low => "T2",
            RiskTier::Moderate => "T3",
            RiskTier::High => "T4",
            RiskTier::Critical => "T5",
        }
    }

    /// Recommended care action for the tier
    pub fn recommendation(self) -> &'static str {
        match self {
            RiskTier::Normal => "Low risk of deterioration. Routine monitoring recommended.",
            RiskTier::Low => "Low-to-moderate risk. Basic preventive measures suggested.",
            RiskTier::Moderate => "Moderate risk. Proactive care coordination recommended.",
            RiskTier::High => "High risk. Intensive case management recommended.",
            RiskTier::Critical => "Critical risk. Immediate intervention required.",
        }
    }

    /// Score interval `[lower, upper)` covered by this tier (upper is
    /// inclusive for the critical tier).
    pub fn score_bounds(self) -> (f64, f64) {
        let lower = match self.index() {
            0 => 0.0,
            i => TIER_BREAKPOINTS[i - 1],
        };
        let upper = TIER_BREAKPOINTS.get(self.index()).copied().unwrap_or(1.0);
        (lower, upper)
    }
}

impl TryFrom<u8> for RiskTier {
    type Error = Error;

    fn try_from(number: u8) -> Result<Self> {
        Self::from_number(number)
    }
}

impl From<RiskTier> for u8 {
    fn from(tier: RiskTier) -> Self {
        tier.number()
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tier {} ({})", self.number(), self.label())
    }
}
