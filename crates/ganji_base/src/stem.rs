//! The ten heavenly stems (天干).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BaseError;

/// One of the 10 heavenly stems, Jia (甲) through Gui (癸).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// All 10 stems in cycle order (0 = Jia).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

const HANZI: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
const HANGUL: [&str; 10] = ["갑", "을", "병", "정", "무", "기", "경", "신", "임", "계"];
const PINYIN: [&str; 10] = ["jia", "yi", "bing", "ding", "wu", "ji", "geng", "xin", "ren", "gui"];

impl Stem {
    /// 0-based cycle index (Jia=0 .. Gui=9).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Stem at `i` mod 10.
    pub const fn from_index(i: u32) -> Self {
        ALL_STEMS[(i % 10) as usize]
    }

    /// Stem `n` steps away, wrapping in either direction.
    pub const fn offset(self, n: i64) -> Self {
        ALL_STEMS[(self as i64 + n).rem_euclid(10) as usize]
    }

    /// Even-indexed stems are yang.
    pub const fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    pub const fn hanzi(self) -> &'static str {
        HANZI[self as usize]
    }

    pub const fn hangul(self) -> &'static str {
        HANGUL[self as usize]
    }

    /// Lowercase pinyin code, as used in serialized output.
    pub const fn name(self) -> &'static str {
        PINYIN[self as usize]
    }

    pub const fn all() -> &'static [Stem; 10] {
        &ALL_STEMS
    }
}

impl Display for Stem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanzi())
    }
}

impl FromStr for Stem {
    type Err = BaseError;

    /// Accepts hanzi, hangul, or pinyin (any case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let lower = t.to_ascii_lowercase();
        (0..10)
            .find(|&i| HANZI[i] == t || HANGUL[i] == t || PINYIN[i] == lower)
            .map(|i| ALL_STEMS[i])
            .ok_or_else(|| BaseError::UnknownSymbol(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip() {
        for (i, s) in ALL_STEMS.iter().enumerate() {
            assert_eq!(s.index() as usize, i);
            assert_eq!(Stem::from_index(i as u32), *s);
        }
        assert_eq!(Stem::from_index(13), Stem::Ding);
    }

    #[test]
    fn offset_wraps_both_ways() {
        assert_eq!(Stem::Gui.offset(1), Stem::Jia);
        assert_eq!(Stem::Jia.offset(-1), Stem::Gui);
        assert_eq!(Stem::Geng.offset(-23), Stem::Ding);
    }

    #[test]
    fn parity() {
        assert!(Stem::Jia.is_yang());
        assert!(!Stem::Yi.is_yang());
        assert!(Stem::Geng.is_yang());
    }

    #[test]
    fn parse_any_script() {
        assert_eq!("庚".parse::<Stem>().unwrap(), Stem::Geng);
        assert_eq!("경".parse::<Stem>().unwrap(), Stem::Geng);
        assert_eq!("Geng".parse::<Stem>().unwrap(), Stem::Geng);
        assert!("x".parse::<Stem>().is_err());
    }
}
