//! Major fortune cycle (大運) engine.
//!
//! Direction follows the year stem's polarity and gender. The starting age
//! is the day count from birth to the anchoring jieqi divided by three (three
//! days per year of age); its fractional part is carried into the precise
//! start date at 365.25 days per year. Block k is the month pillar moved k
//! steps in the cycle direction.

use chrono::{DateTime, Datelike, FixedOffset, TimeDelta};
use ganji_base::Stem;

use crate::birth::{BirthMoment, Gender};
use crate::config::AgeClamp;
use crate::error::SajuError;
use crate::fortune_types::{Direction, FortuneBlock, FortuneCycle, StartingAge};
use crate::pillars::PillarCalculator;

const DAYS_PER_AGE_YEAR: f64 = 3.0;
const DAYS_PER_YEAR: f64 = 365.25;
const MS_PER_DAY: f64 = 86_400_000.0;

/// Forward for a yang year stem and male, or a yin year stem and female.
pub fn direction_for(year_stem: Stem, gender: Gender) -> Direction {
    if year_stem.is_yang() == (gender == Gender::Male) {
        Direction::Forward
    } else {
        Direction::Backward
    }
}

/// Starting age for `elapsed_days` under a clamping policy.
pub fn starting_age(elapsed_days: f64, clamp: AgeClamp) -> StartingAge {
    let raw = elapsed_days / DAYS_PER_AGE_YEAR;
    match clamp.bounds() {
        Some((min, _)) if raw < min => StartingAge {
            raw_years: raw,
            years: min as u32,
            fraction: 0.0,
            clamped: true,
        },
        Some((_, max)) if raw > max => StartingAge {
            raw_years: raw,
            years: max as u32,
            fraction: 0.0,
            clamped: true,
        },
        _ => StartingAge {
            raw_years: raw,
            years: raw.trunc() as u32,
            fraction: raw.fract(),
            clamped: false,
        },
    }
}

/// Same month, day, and time `years` civil years later; Feb 29 falls back to
/// Feb 28.
fn add_civil_years(
    dt: DateTime<FixedOffset>,
    years: u32,
) -> Result<DateTime<FixedOffset>, SajuError> {
    let year = dt.year() + years as i32;
    dt.with_year(year)
        .or_else(|| dt.with_day(28).and_then(|d| d.with_year(year)))
        .ok_or_else(|| SajuError::InvalidDate(format!("cannot move {dt} to year {year}")))
}

impl PillarCalculator<'_> {
    /// Direction, starting age, and pillar blocks of the major fortune cycle.
    pub fn fortune_cycle(&self, birth: &BirthMoment) -> Result<FortuneCycle, SajuError> {
        let chart = self.chart(birth)?;
        let direction = direction_for(chart.pillars.year.stem, birth.gender);

        let anchor = *match direction {
            Direction::Forward => self.table().next_term_after(&birth.civil)?,
            Direction::Backward => self.table().previous_term_before(&birth.civil)?,
        };
        let elapsed_ms = (anchor.instant - birth.civil).num_milliseconds().abs();
        let elapsed_days = elapsed_ms as f64 / MS_PER_DAY;

        let age = starting_age(elapsed_days, self.config().age_clamp);
        let mut precise_start = add_civil_years(birth.civil, age.years)?;
        if age.fraction > 0.0 {
            let extra_ms = (age.fraction * DAYS_PER_YEAR * MS_PER_DAY).round() as i64;
            precise_start += TimeDelta::milliseconds(extra_ms);
        }

        let blocks = (1..=self.config().block_count)
            .map(|order| FortuneBlock {
                order,
                start_age: age.years + 10 * (order - 1),
                end_age: age.years + 10 * (order - 1) + 9,
                pillar: chart.pillars.month.offset(direction.sign() * order as i64),
            })
            .collect();

        tracing::debug!(
            ?direction,
            anchor = anchor.term.name(),
            elapsed_days,
            start_age = age.years,
            "fortune cycle"
        );

        Ok(FortuneCycle {
            direction,
            anchor,
            elapsed_days,
            starting_age: age,
            precise_start,
            blocks,
        })
    }
}
