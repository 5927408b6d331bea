use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Days in the annual cost baseline
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Prediction / intervention window length in days
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Horizon(u32);

impl Horizon {
    pub const THIRTY_DAYS: Horizon = Horizon(30);
    pub const SIXTY_DAYS: Horizon = Horizon(60);
    pub const NINETY_DAYS: Horizon = Horizon(90);

    /// The three standard windows, shortest first
    pub const STANDARD: [Horizon; 3] = [Self::THIRTY_DAYS, Self::SIXTY_DAYS, Self::NINETY_DAYS];

    pub fn new(days: u32) -> Result<Self> {
        if days == 0 {
            return Err(Error::InvalidHorizon(days));
        }
        Ok(Self(days))
    }

    pub fn days(self) -> u32 {
        self.0
    }

    /// Fraction of a year covered by the window
    pub fn year_fraction(self) -> f64 {
        f64::from(self.0) / DAYS_PER_YEAR
    }

    /// Default display label, e.g. "Months 1-2 (0-60 days)"
    pub fn default_label(self) -> String {
        match self.0 {
            30 => "Month 1 (0-30 days)".to_string(),
            d if d % 30 == 0 => format!("Months 1-{} (0-{} days)", d / 30, d),
            d => format!("0-{d} days"),
        }
    }
}

impl TryFrom<u32> for Horizon {
    type Error = Error;

    fn try_from(days: u32) -> Result<Self> {
        Self::new(days)
    }
}

impl From<Horizon> for u32 {
    fn from(horizon: Horizon) -> Self {
        horizon.0
    }
}

impl FromStr for Horizon {
    type Err = String;

    /// Accepts "30", "30d" and "30_day"
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .trim_end_matches("_day")
            .trim_end_matches("-day")
            .trim_end_matches('d');
        let days: u32 = digits
            .parse()
            .map_err(|_| format!("'{s}' is not a horizon in days"))?;
        Horizon::new(days).map_err(|e| e.to_string())
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-day", self.0)
    }
}
