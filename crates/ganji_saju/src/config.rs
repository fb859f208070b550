//! Calculation policies.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::SajuError;

/// Which instant starts a new sexagenary year for the year pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearBoundary {
    /// The year turns at Lichun (立春).
    #[default]
    SolarTerm,
    /// The year turns on 1 January of the local civil calendar.
    Civil,
}

/// Bounds applied to the fortune starting age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeClamp {
    #[default]
    ZeroToTen,
    OneToTen,
    Unclamped,
}

impl AgeClamp {
    /// Inclusive (min, max) starting age, if clamped.
    pub const fn bounds(self) -> Option<(f64, f64)> {
        match self {
            Self::ZeroToTen => Some((0.0, 10.0)),
            Self::OneToTen => Some((1.0, 10.0)),
            Self::Unclamped => None,
        }
    }
}

/// Hour stem for births between 23:00 and midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZiHourPolicy {
    /// Use the current day's stem.
    #[default]
    SameDay,
    /// Use the following day's stem (late Zi hour, 夜子時).
    NextDayStem,
}

/// Configuration for [`PillarCalculator`](crate::PillarCalculator).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SajuConfig {
    pub year_boundary: YearBoundary,
    pub age_clamp: AgeClamp,
    pub zi_hour: ZiHourPolicy,
    /// Number of ten-year fortune blocks (default 10).
    pub block_count: u32,
    /// Civil zone for day and hour pillars; the birth's own offset when unset.
    #[serde(with = "offset_serde")]
    pub local_offset: Option<FixedOffset>,
}

impl Default for SajuConfig {
    fn default() -> Self {
        Self {
            year_boundary: YearBoundary::SolarTerm,
            age_clamp: AgeClamp::ZeroToTen,
            zi_hour: ZiHourPolicy::SameDay,
            block_count: 10,
            local_offset: None,
        }
    }
}

impl SajuConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.block_count == 0 {
            return Err("block_count must be > 0");
        }
        if self.block_count > 12 {
            return Err("block_count must not exceed 12");
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SajuError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            tracing::warn!(error = %e, "malformed configuration");
            SajuError::InvalidConfig("malformed configuration JSON")
        })?;
        config.validate().map_err(SajuError::InvalidConfig)?;
        Ok(config)
    }
}

/// `Option<FixedOffset>` as `"+09:00"`.
mod offset_serde {
    use chrono::FixedOffset;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &Option<FixedOffset>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(o) => s.serialize_some(&o.to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<FixedOffset>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|s| s.parse::<FixedOffset>().map_err(serde::de::Error::custom))
            .transpose()
    }
}
