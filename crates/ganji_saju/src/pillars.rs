//! The Four Pillars of a birth.
//!
//! - Year: sexagenary year, 1984 = 甲子; turns at Lichun or 1 January
//! - Month: opened by the latest jieqi at or before the birth instant
//! - Day: continuous 60-day count, 2000-01-07 = 甲子
//! - Hour: double-hour branch of the local civil time

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike};
use ganji_base::{Branch, Ganzhi, Stem, hour_branch, hour_stem, month_stem};
use ganji_search::{SolarTermEvent, SolarTermTable};
use serde::{Deserialize, Serialize};

use crate::birth::BirthMoment;
use crate::config::{SajuConfig, YearBoundary, ZiHourPolicy};
use crate::error::SajuError;

/// Year whose pillar is 甲子.
const YEAR_EPOCH: i32 = 1984;

/// Day number (days from 0001-01-01, 1-based) of the 甲子 day 2000-01-07.
const DAY_EPOCH_FROM_CE: i64 = 730_126;

/// Year, month, day, and hour pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "PillarCodes", try_from = "PillarCodes")]
pub struct FourPillars {
    pub year: Ganzhi,
    pub month: Ganzhi,
    pub day: Ganzhi,
    pub hour: Ganzhi,
}

impl std::fmt::Display for FourPillars {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.year, self.month, self.day, self.hour)
    }
}

/// Flat serialized form: eight stem/branch codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PillarCodes {
    year_stem: Stem,
    year_branch: Branch,
    month_stem: Stem,
    month_branch: Branch,
    day_stem: Stem,
    day_branch: Branch,
    hour_stem: Stem,
    hour_branch: Branch,
}

impl From<FourPillars> for PillarCodes {
    fn from(p: FourPillars) -> Self {
        Self {
            year_stem: p.year.stem,
            year_branch: p.year.branch,
            month_stem: p.month.stem,
            month_branch: p.month.branch,
            day_stem: p.day.stem,
            day_branch: p.day.branch,
            hour_stem: p.hour.stem,
            hour_branch: p.hour.branch,
        }
    }
}

impl TryFrom<PillarCodes> for FourPillars {
    type Error = ganji_base::BaseError;

    fn try_from(c: PillarCodes) -> Result<Self, Self::Error> {
        let pair = |s, b| Ganzhi::new(s, b).ok_or(ganji_base::BaseError::ParityMismatch);
        Ok(Self {
            year: pair(c.year_stem, c.year_branch)?,
            month: pair(c.month_stem, c.month_branch)?,
            day: pair(c.day_stem, c.day_branch)?,
            hour: pair(c.hour_stem, c.hour_branch)?,
        })
    }
}

/// Pillars with the context they were derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Chart {
    pub birth: BirthMoment,
    /// Birth instant in the zone used for day and hour pillars.
    pub local: DateTime<FixedOffset>,
    pub pillars: FourPillars,
    /// Jieqi that opened the birth month.
    pub month_term: SolarTermEvent,
    pub year_boundary_used: YearBoundary,
}

/// Pillar of sexagenary year `year` (歲運 when used for a later year).
pub fn year_pillar_for(year: i32) -> Ganzhi {
    Ganzhi::from_cycle_index((year - YEAR_EPOCH) as i64)
}

/// Pillar of month `month` (1 = Yin month, opened by Lichun) of sexagenary
/// year `year`.
pub fn month_pillar_for(year: i32, month: u32) -> Result<Ganzhi, SajuError> {
    if !(1..=12).contains(&month) {
        return Err(SajuError::InvalidDate(format!("month {month} outside 1..=12")));
    }
    let branch = Branch::Yin.offset(month as i64 - 1);
    Ok(Ganzhi {
        stem: month_stem(year_pillar_for(year).stem, branch),
        branch,
    })
}

/// Pillar of a civil date.
pub fn day_pillar(date: NaiveDate) -> Ganzhi {
    Ganzhi::from_cycle_index(date.num_days_from_ce() as i64 - DAY_EPOCH_FROM_CE)
}

/// Day pillars (日運) of every date in civil month `month` of `year`.
pub fn day_pillars_for(year: i32, month: u32) -> Result<Vec<(NaiveDate, Ganzhi)>, SajuError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| SajuError::InvalidDate(format!("{year}-{month:02} is not a civil month")))?;
    Ok(first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|d| (d, day_pillar(d)))
        .collect())
}

/// Resolves births against a solar-term table.
#[derive(Debug, Clone, Copy)]
pub struct PillarCalculator<'a> {
    table: &'a SolarTermTable,
    config: SajuConfig,
}

impl<'a> PillarCalculator<'a> {
    pub fn new(table: &'a SolarTermTable, config: SajuConfig) -> Result<Self, SajuError> {
        config.validate().map_err(SajuError::InvalidConfig)?;
        Ok(Self { table, config })
    }

    pub fn config(&self) -> &SajuConfig {
        &self.config
    }

    pub fn table(&self) -> &'a SolarTermTable {
        self.table
    }

    /// Birth instant in the configured civil zone.
    pub fn local_time(&self, birth: &BirthMoment) -> DateTime<FixedOffset> {
        let offset = self.config.local_offset.unwrap_or(*birth.civil.offset());
        birth.civil.with_timezone(&offset)
    }

    /// Month pillar from the jieqi that opened the birth month.
    ///
    /// The stem is keyed by the jieqi's own sexagenary year, so the month
    /// pillar does not depend on the year-boundary policy.
    pub fn month_pillar(&self, term: &SolarTermEvent) -> Ganzhi {
        let branch = term.term.month_branch();
        Ganzhi {
            stem: month_stem(year_pillar_for(term.calendar_year).stem, branch),
            branch,
        }
    }

    fn hour_pillar(&self, local: &DateTime<FixedOffset>, day: Ganzhi) -> Ganzhi {
        let hour = local.hour();
        let branch = hour_branch(hour);
        let stem_day = match self.config.zi_hour {
            ZiHourPolicy::NextDayStem if hour == 23 => day.offset(1),
            _ => day,
        };
        Ganzhi {
            stem: hour_stem(stem_day.stem, branch),
            branch,
        }
    }

    /// Four pillars with derivation context.
    pub fn chart(&self, birth: &BirthMoment) -> Result<Chart, SajuError> {
        let local = self.local_time(birth);
        let month_term = *self.table.term_at_or_before(&birth.civil)?;

        let year = match self.config.year_boundary {
            YearBoundary::SolarTerm => year_pillar_for(month_term.calendar_year),
            YearBoundary::Civil => year_pillar_for(local.year()),
        };
        let month = self.month_pillar(&month_term);
        let day = day_pillar(local.date_naive());
        let hour = self.hour_pillar(&local, day);

        Ok(Chart {
            birth: *birth,
            local,
            pillars: FourPillars { year, month, day, hour },
            month_term,
            year_boundary_used: self.config.year_boundary,
        })
    }

    pub fn four_pillars(&self, birth: &BirthMoment) -> Result<FourPillars, SajuError> {
        Ok(self.chart(birth)?.pillars)
    }
}
