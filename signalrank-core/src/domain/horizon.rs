//! Analysis horizon ("mode").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Requested analysis timeframe. Controls the volatility window and the
/// size of the top-N slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Horizon {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Biquarterly,
    Yearly,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown horizon '{0}' (expected daily, weekly, monthly, quarterly, biquarterly, yearly)")]
pub struct HorizonParseError(pub String);

impl Horizon {
    pub const ALL: [Horizon; 6] = [
        Horizon::Daily,
        Horizon::Weekly,
        Horizon::Monthly,
        Horizon::Quarterly,
        Horizon::Biquarterly,
        Horizon::Yearly,
    ];

    /// Number of entries kept in the top slice for this horizon.
    pub fn top_n(self) -> usize {
        match self {
            Horizon::Daily => 5,
            Horizon::Weekly => 10,
            Horizon::Monthly => 20,
            Horizon::Quarterly => 20,
            Horizon::Biquarterly => 30,
            Horizon::Yearly => 50,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Horizon::Daily => "daily",
            Horizon::Weekly => "weekly",
            Horizon::Monthly => "monthly",
            Horizon::Quarterly => "quarterly",
            Horizon::Biquarterly => "biquarterly",
            Horizon::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Horizon {
    type Err = HorizonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Horizon::ALL
            .into_iter()
            .find(|h| h.as_str() == lowered)
            .ok_or_else(|| HorizonParseError(s.to_string()))
    }
}
