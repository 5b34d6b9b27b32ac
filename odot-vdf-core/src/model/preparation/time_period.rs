use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::model::preparation::PreparationError;

/// assignment time periods. link capacities are prepared as hourly values
/// and scaled up to the length of the period.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    /// early morning
    Ea,
    /// morning peak
    Am,
    /// midday
    Md,
    /// evening peak
    Pm,
    /// evening
    Ev,
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 5] = [
        TimePeriod::Ea,
        TimePeriod::Am,
        TimePeriod::Md,
        TimePeriod::Pm,
        TimePeriod::Ev,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TimePeriod::Ea => "ea",
            TimePeriod::Am => "am",
            TimePeriod::Md => "md",
            TimePeriod::Pm => "pm",
            TimePeriod::Ev => "ev",
        }
    }
}

impl FromStr for TimePeriod {
    type Err = PreparationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimePeriod::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PreparationError::UnknownTimePeriod(s.to_string()))
    }
}

impl Display for TimePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
