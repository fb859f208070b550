//! Birth input: civil instant and gender.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::SajuError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Male => "male",
            Self::Female => "female",
        })
    }
}

impl FromStr for Gender {
    type Err = SajuError;

    /// Accepts `male`/`female`/`m`/`f` in any case, or 男/女, 남/여.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "男" | "남" => Ok(Self::Male),
            "female" | "f" | "女" | "여" => Ok(Self::Female),
            _ => Err(SajuError::InvalidGender(s.to_string())),
        }
    }
}

/// A birth instant in its civil zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthMoment {
    pub civil: DateTime<FixedOffset>,
    pub gender: Gender,
}

/// Layouts accepted for date-times without a zone.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

impl BirthMoment {
    pub fn new(civil: DateTime<FixedOffset>, gender: Gender) -> Self {
        Self { civil, gender }
    }

    /// Parse an ISO-8601 date-time and a gender string.
    ///
    /// The date-time must carry an offset (`1990-03-15T14:30:00+09:00` or
    /// `1990-03-15T14:30+09:00`).
    pub fn parse(datetime: &str, gender: &str) -> Result<Self, SajuError> {
        Ok(Self::new(parse_datetime(datetime, None)?, gender.parse()?))
    }

    /// As [`BirthMoment::parse`], reading a zone-less date-time in
    /// `default_offset`.
    pub fn parse_in(
        datetime: &str,
        gender: &str,
        default_offset: FixedOffset,
    ) -> Result<Self, SajuError> {
        Ok(Self::new(
            parse_datetime(datetime, Some(default_offset))?,
            gender.parse()?,
        ))
    }
}

/// Parse an ISO-8601 date-time. Zone-less input needs `default_offset`.
pub fn parse_datetime(
    s: &str,
    default_offset: Option<FixedOffset>,
) -> Result<DateTime<FixedOffset>, SajuError> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%:z") {
        return Ok(dt);
    }
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| SajuError::InvalidDate(format!("cannot parse {s:?} as ISO-8601")))?;
    let offset = default_offset
        .ok_or_else(|| SajuError::InvalidDate(format!("{s:?} has no UTC offset")))?;
    naive
        .and_local_timezone(offset)
        .single()
        .ok_or_else(|| SajuError::InvalidDate(format!("{s:?} is not a valid local time")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn gender_spellings() {
        for s in ["male", "M", " Male ", "m", "男", "남"] {
            assert_eq!(s.parse::<Gender>().unwrap(), Gender::Male, "{s}");
        }
        for s in ["female", "F", "FEMALE", "女", "여"] {
            assert_eq!(s.parse::<Gender>().unwrap(), Gender::Female, "{s}");
        }
        assert_eq!(
            "x".parse::<Gender>(),
            Err(SajuError::InvalidGender("x".into()))
        );
    }

    #[test]
    fn parses_offset_forms() {
        let a = parse_datetime("1990-03-15T14:30:00+09:00", None).unwrap();
        let b = parse_datetime("1990-03-15T14:30+09:00", None).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.offset().local_minus_utc(), 9 * 3600);
        assert_eq!(a.hour(), 14);
    }

    #[test]
    fn naive_needs_default_offset() {
        assert!(matches!(
            parse_datetime("1990-03-15T14:30", None),
            Err(SajuError::InvalidDate(_))
        ));
        let kst = FixedOffset::east_opt(9 * 3600).unwrap();
        let dt = parse_datetime("1990-03-15 14:30", Some(kst)).unwrap();
        assert_eq!(dt, parse_datetime("1990-03-15T14:30:00+09:00", None).unwrap());
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        assert!(matches!(
            parse_datetime("yesterday", None),
            Err(SajuError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_datetime("1990-02-30T10:00:00+09:00", None),
            Err(SajuError::InvalidDate(_))
        ));
    }

    #[test]
    fn birth_parse() {
        let b = BirthMoment::parse("1990-03-15T14:30+09:00", "m").unwrap();
        assert_eq!(b.gender, Gender::Male);
        assert!(matches!(
            BirthMoment::parse("1990-03-15T14:30+09:00", "unknown"),
            Err(SajuError::InvalidGender(_))
        ));
    }
}
