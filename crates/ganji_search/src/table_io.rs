//! JSON persistence for [`SolarTermTable`].
//!
//! Layout, in the table's civil zone:
//!
//! ```json
//! { "2024": { "立春": { "month": 2, "day": 4, "hour": 16, "minute": 27, "second": 8 } } }
//! ```
//!
//! Reading also accepts reference files that wrap the years in
//! `solar_terms_data` beside a `metadata` block, give `month` as an English
//! name, key terms by pinyin or English name, or list the mid-month terms
//! (which are skipped). Xiaohan entries stored under year Y are dated in
//! January of Y + 1.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{Datelike, FixedOffset, TimeZone, Timelike};
use ganji_base::{Jieqi, is_zhongqi_name};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::locator_types::{Precision, SolarTermEvent};
use crate::table::SolarTermTable;

#[derive(Debug, Serialize)]
struct TermRecord {
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    month: RawMonth,
    day: u32,
    #[serde(default)]
    hour: u32,
    #[serde(default)]
    minute: u32,
    #[serde(default)]
    second: u32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMonth {
    Number(u32),
    Name(String),
}

impl RawMonth {
    fn number(&self) -> Result<u32, SearchError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Name(s) => s
                .parse::<chrono::Month>()
                .map(|m| m.number_from_month())
                .map_err(|_| SearchError::Parse(format!("unknown month name {s:?}"))),
        }
    }
}

impl SolarTermTable {
    /// Serialize all events as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, SearchError> {
        let mut years: BTreeMap<i32, BTreeMap<&'static str, TermRecord>> = BTreeMap::new();
        for ev in self.iter() {
            let t = ev.instant.with_timezone(&self.civil_offset());
            years.entry(ev.calendar_year).or_default().insert(
                ev.term.hanzi(),
                TermRecord {
                    month: t.month(),
                    day: t.day(),
                    hour: t.hour(),
                    minute: t.minute(),
                    second: t.second(),
                },
            );
        }
        Ok(serde_json::to_string_pretty(&years)?)
    }

    /// Write the table to `path` as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SearchError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json_string()?)?;
        tracing::info!(path = %path.display(), events = self.len(), "saved solar-term table");
        Ok(())
    }

    /// Parse a table whose civil fields are in `civil_offset`.
    ///
    /// The year range spans the smallest to largest year present. Years that
    /// fail validation are marked incomplete rather than rejected.
    pub fn from_json_str(json: &str, civil_offset: FixedOffset) -> Result<Self, SearchError> {
        let root: serde_json::Value = serde_json::from_str(json)?;
        let data = root.get("solar_terms_data").unwrap_or(&root);
        let years = data
            .as_object()
            .ok_or_else(|| SearchError::Parse("expected an object keyed by year".into()))?;

        let mut events = Vec::new();
        for (year_key, terms) in years {
            if year_key == "metadata" {
                continue;
            }
            let year: i32 = year_key
                .parse()
                .map_err(|_| SearchError::Parse(format!("invalid year key {year_key:?}")))?;
            let terms = terms
                .as_object()
                .ok_or_else(|| SearchError::Parse(format!("year {year} is not an object")))?;

            for (name, value) in terms {
                let term = match name.parse::<Jieqi>() {
                    Ok(term) => term,
                    Err(_) if is_zhongqi_name(name) => continue,
                    Err(_) => {
                        tracing::warn!(year, name = %name, "unknown solar-term name skipped");
                        continue;
                    }
                };
                let raw = RawRecord::deserialize(value)?;
                let month = raw.month.number()?;
                let instant = civil_offset
                    .with_ymd_and_hms(
                        term.civil_year(year),
                        month,
                        raw.day,
                        raw.hour,
                        raw.minute,
                        raw.second,
                    )
                    .single()
                    .ok_or_else(|| {
                        SearchError::Parse(format!("invalid date for {term} of {year}"))
                    })?;
                events.push(SolarTermEvent {
                    term,
                    calendar_year: year,
                    instant,
                    precision: Precision::Tabulated,
                });
            }
        }

        let (Some(first), Some(last)) = (
            events.iter().map(|e| e.calendar_year).min(),
            events.iter().map(|e| e.calendar_year).max(),
        ) else {
            return Err(SearchError::Parse("no solar-term entries".into()));
        };

        let mut table = SolarTermTable::from_events(first..=last, civil_offset, events);
        table.validate_years(first..=last, false)?;
        tracing::debug!(first, last, events = table.len(), "parsed solar-term table");
        Ok(table)
    }

    /// Read a table from a JSON file.
    pub fn load(path: impl AsRef<Path>, civil_offset: FixedOffset) -> Result<Self, SearchError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&json, civil_offset)?;
        tracing::info!(path = %path.display(), events = table.len(), "loaded solar-term table");
        Ok(table)
    }
}
