//! Precomputed solar-term table.
//!
//! Holds the 12 month-starting terms for every year in a contiguous range.
//! The table is built once and then only read; all scans borrow it.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::time::Instant;

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Utc};
use ganji_base::{ALL_JIEQI, Jieqi};
use rayon::prelude::*;

use crate::error::SearchError;
use crate::locator::locate_or_estimate;
use crate::locator_types::SolarTermEvent;
use crate::table_types::TableConfig;

/// Contiguous run of usable years scanned around an instant.
struct ScanWindow<'a> {
    events: Vec<&'a SolarTermEvent>,
    first_year: i32,
    last_year: i32,
}

/// Solar-term events keyed by (sexagenary year, term index).
#[derive(Debug, Clone, PartialEq)]
pub struct SolarTermTable {
    first_year: i32,
    last_year: i32,
    civil_offset: FixedOffset,
    events: BTreeMap<(i32, u8), SolarTermEvent>,
    /// Years that failed validation, with the first reason found.
    incomplete: BTreeMap<i32, String>,
}

impl SolarTermTable {
    pub(crate) fn from_events(
        years: RangeInclusive<i32>,
        civil_offset: FixedOffset,
        events: impl IntoIterator<Item = SolarTermEvent>,
    ) -> Self {
        let events = events
            .into_iter()
            .map(|ev| {
                let ev = SolarTermEvent {
                    instant: ev.instant.with_timezone(&civil_offset),
                    ..ev
                };
                ((ev.calendar_year, ev.term.index()), ev)
            })
            .collect();
        Self {
            first_year: *years.start(),
            last_year: *years.end(),
            civil_offset,
            events,
            incomplete: BTreeMap::new(),
        }
    }

    /// Locate every term of every year in `years`.
    ///
    /// Years are computed in parallel. The result is deterministic: building
    /// the same range with the same configuration yields identical events.
    pub fn build(years: RangeInclusive<i32>, config: &TableConfig) -> Result<Self, SearchError> {
        config.validate().map_err(SearchError::InvalidConfig)?;
        if years.is_empty() {
            return Err(SearchError::InvalidConfig("year range is empty"));
        }

        let started = Instant::now();
        let locator = config.locator;
        let per_year = years
            .clone()
            .into_par_iter()
            .map(|year| -> Result<Vec<SolarTermEvent>, SearchError> {
                let events = ALL_JIEQI
                    .iter()
                    .map(|&term| locate_or_estimate(year, term, &locator))
                    .collect::<Result<Vec<_>, _>>()?;
                tracing::debug!(year, "located solar terms");
                Ok(events)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut table = Self::from_events(
            years.clone(),
            locator.civil_offset,
            per_year.into_iter().flatten(),
        );
        table.validate_years(years, config.strict)?;

        tracing::info!(
            first = table.first_year,
            last = table.last_year,
            events = table.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "built solar-term table"
        );
        Ok(table)
    }

    /// Re-check the given years, updating the incomplete set.
    pub(crate) fn validate_years(
        &mut self,
        years: impl IntoIterator<Item = i32>,
        strict: bool,
    ) -> Result<(), SearchError> {
        for year in years {
            match self.check_year(year) {
                Ok(()) => {
                    self.incomplete.remove(&year);
                }
                Err(reason) if strict => return Err(SearchError::DataQuality { year, reason }),
                Err(reason) => {
                    tracing::warn!(year, %reason, "solar-term year marked incomplete");
                    self.incomplete.insert(year, reason);
                }
            }
        }
        Ok(())
    }

    /// Exactly 12 events, one per term, strictly increasing, Xiaohan in
    /// January of the following year.
    fn check_year(&self, year: i32) -> Result<(), String> {
        let events: Vec<&SolarTermEvent> = self.raw_year(year).collect();
        if events.len() != ALL_JIEQI.len() {
            return Err(format!("expected 12 events, found {}", events.len()));
        }
        for (ev, term) in events.iter().zip(ALL_JIEQI) {
            if ev.term != term || ev.calendar_year != year {
                return Err(format!("entry for {term} is mislabeled"));
            }
        }
        for pair in events.windows(2) {
            if pair[1].instant <= pair[0].instant {
                return Err(format!("{} is not after {}", pair[1].term, pair[0].term));
            }
        }
        let last = events[events.len() - 1];
        let civil = last.instant.with_timezone(&self.civil_offset);
        if civil.year() != year + 1 || civil.month() != 1 {
            return Err(format!(
                "{} falls on {}, not in January {}",
                last.term,
                civil.date_naive(),
                year + 1
            ));
        }
        Ok(())
    }

    fn raw_year(&self, year: i32) -> impl Iterator<Item = &SolarTermEvent> {
        self.events.range((year, 0)..=(year, u8::MAX)).map(|(_, ev)| ev)
    }

    fn covers(&self, year: i32) -> bool {
        (self.first_year..=self.last_year).contains(&year)
    }

    fn check_covered(&self, year: i32) -> Result<(), SearchError> {
        if !self.covers(year) {
            return Err(SearchError::UnsupportedYear(year));
        }
        if let Some(reason) = self.incomplete.get(&year) {
            return Err(SearchError::DataQuality {
                year,
                reason: reason.clone(),
            });
        }
        Ok(())
    }

    /// The event for `term` in sexagenary year `year`.
    pub fn lookup(&self, year: i32, term: Jieqi) -> Result<&SolarTermEvent, SearchError> {
        self.check_covered(year)?;
        self.events
            .get(&(year, term.index()))
            .ok_or(SearchError::NotFound { year, term })
    }

    /// All events of a sexagenary year in term order (Lichun first).
    pub fn events_for_year(&self, year: i32) -> Result<Vec<&SolarTermEvent>, SearchError> {
        self.check_covered(year)?;
        Ok(self.raw_year(year).collect())
    }

    /// Events of the instant's civil year and of each usable neighbour, in
    /// time order. Uncovered or incomplete neighbours are left out; an answer
    /// that would fall on them surfaces as [`Self::missing_year`].
    fn scan_window(&self, year: i32) -> Result<ScanWindow<'_>, SearchError> {
        self.check_covered(year)?;
        let usable = |y: i32| self.covers(y) && !self.incomplete.contains_key(&y);
        let first_year = if usable(year - 1) { year - 1 } else { year };
        let last_year = if usable(year + 1) { year + 1 } else { year };
        let events = (first_year..=last_year)
            .flat_map(move |y| self.raw_year(y))
            .collect();
        Ok(ScanWindow {
            events,
            first_year,
            last_year,
        })
    }

    /// Error for an answer that lies in `year`, which the scan left out.
    fn missing_year(&self, year: i32) -> SearchError {
        match self.incomplete.get(&year) {
            Some(reason) => SearchError::DataQuality {
                year,
                reason: reason.clone(),
            },
            None => SearchError::UnsupportedYear(year),
        }
    }

    fn civil_year_of<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> i32 {
        instant.with_timezone(&self.civil_offset).year()
    }

    /// First event strictly after `instant`.
    pub fn next_term_after<Tz: TimeZone>(
        &self,
        instant: &DateTime<Tz>,
    ) -> Result<&SolarTermEvent, SearchError> {
        let t = instant.with_timezone(&Utc);
        let window = self.scan_window(self.civil_year_of(instant))?;
        match window.events.iter().position(|ev| ev.instant > t) {
            // nothing known at or before the instant: the answer may precede the window
            Some(0) => Err(self.missing_year(window.first_year - 1)),
            Some(i) => Ok(window.events[i]),
            None => Err(self.missing_year(window.last_year + 1)),
        }
    }

    /// Last event strictly before `instant`.
    pub fn previous_term_before<Tz: TimeZone>(
        &self,
        instant: &DateTime<Tz>,
    ) -> Result<&SolarTermEvent, SearchError> {
        let t = instant.with_timezone(&Utc);
        self.last_matching(instant, |ev| ev.instant < t)
    }

    /// Last event at or before `instant`. An instant equal to an event
    /// belongs to the month that event opens.
    pub fn term_at_or_before<Tz: TimeZone>(
        &self,
        instant: &DateTime<Tz>,
    ) -> Result<&SolarTermEvent, SearchError> {
        let t = instant.with_timezone(&Utc);
        self.last_matching(instant, |ev| ev.instant <= t)
    }

    fn last_matching<Tz: TimeZone>(
        &self,
        instant: &DateTime<Tz>,
        pred: impl Fn(&SolarTermEvent) -> bool,
    ) -> Result<&SolarTermEvent, SearchError> {
        let window = self.scan_window(self.civil_year_of(instant))?;
        match window.events.iter().rposition(|&ev| pred(ev)) {
            Some(i) if i + 1 < window.events.len() => Ok(window.events[i]),
            Some(_) => Err(self.missing_year(window.last_year + 1)),
            None => Err(self.missing_year(window.first_year - 1)),
        }
    }

    /// Replace events with those of `other` for every year both tables cover.
    ///
    /// Affected years are re-validated. Returns the number of events replaced
    /// or added.
    pub fn merge_overrides(&mut self, other: &SolarTermTable) -> Result<usize, SearchError> {
        let mut touched = Vec::new();
        let mut count = 0;
        for (&key, ev) in &other.events {
            if !self.covers(key.0) {
                tracing::debug!(year = key.0, "override outside table range ignored");
                continue;
            }
            let ev = SolarTermEvent {
                instant: ev.instant.with_timezone(&self.civil_offset),
                ..*ev
            };
            self.events.insert(key, ev);
            if touched.last() != Some(&key.0) {
                touched.push(key.0);
            }
            count += 1;
        }
        self.validate_years(touched, false)?;
        tracing::info!(count, "merged solar-term overrides");
        Ok(count)
    }

    /// Inclusive range of sexagenary years covered.
    pub fn year_range(&self) -> RangeInclusive<i32> {
        self.first_year..=self.last_year
    }

    pub fn civil_offset(&self) -> FixedOffset {
        self.civil_offset
    }

    /// Number of events stored.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Years marked incomplete, ascending.
    pub fn incomplete_years(&self) -> Vec<i32> {
        self.incomplete.keys().copied().collect()
    }

    /// Fail with the first data-quality violation, if any.
    pub fn ensure_complete(&self) -> Result<(), SearchError> {
        match self.incomplete.iter().next() {
            Some((&year, reason)) => Err(SearchError::DataQuality {
                year,
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &SolarTermEvent> {
        self.events.values()
    }
}
