//! The twelve month-starting solar terms (節氣).
//!
//! Each term begins a sexagenary month when the Sun's apparent ecliptic
//! longitude reaches a multiple of 30° offset by 15°. Term index 0 is Lichun
//! (立春, 315°), which also opens the sexagenary year. Xiaohan (小寒, 285°) is
//! the last term of a year and falls in January of the following civil year.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::error::BaseError;

/// A month-starting solar term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Jieqi {
    Lichun,
    Jingzhe,
    Qingming,
    Lixia,
    Mangzhong,
    Xiaoshu,
    Liqiu,
    Bailu,
    Hanlu,
    Lidong,
    Daxue,
    Xiaohan,
}

/// All 12 terms in year order (0 = Lichun).
pub const ALL_JIEQI: [Jieqi; 12] = [
    Jieqi::Lichun,
    Jieqi::Jingzhe,
    Jieqi::Qingming,
    Jieqi::Lixia,
    Jieqi::Mangzhong,
    Jieqi::Xiaoshu,
    Jieqi::Liqiu,
    Jieqi::Bailu,
    Jieqi::Hanlu,
    Jieqi::Lidong,
    Jieqi::Daxue,
    Jieqi::Xiaohan,
];

const HANZI: [&str; 12] = [
    "立春", "驚蟄", "清明", "立夏", "芒種", "小暑", "立秋", "白露", "寒露", "立冬", "大雪", "小寒",
];
const SIMPLIFIED: [&str; 12] = [
    "立春", "惊蛰", "清明", "立夏", "芒种", "小暑", "立秋", "白露", "寒露", "立冬", "大雪", "小寒",
];
const HANGUL: [&str; 12] = [
    "입춘", "경칩", "청명", "입하", "망종", "소서", "입추", "백로", "한로", "입동", "대설", "소한",
];
const PINYIN: [&str; 12] = [
    "lichun", "jingzhe", "qingming", "lixia", "mangzhong", "xiaoshu", "liqiu", "bailu", "hanlu",
    "lidong", "daxue", "xiaohan",
];
const ENGLISH: [&str; 12] = [
    "Beginning of Spring",
    "Awakening of Insects",
    "Clear and Bright",
    "Beginning of Summer",
    "Grain in Ear",
    "Slight Heat",
    "Beginning of Autumn",
    "White Dew",
    "Cold Dew",
    "Beginning of Winter",
    "Great Snow",
    "Slight Cold",
];

/// Typical civil (month, day) in East Asian time, used to seed searches.
const TYPICAL_DATE: [(u32, u32); 12] = [
    (2, 4),
    (3, 6),
    (4, 5),
    (5, 6),
    (6, 6),
    (7, 7),
    (8, 8),
    (9, 8),
    (10, 8),
    (11, 7),
    (12, 7),
    (1, 6),
];

/// Mid-month terms (中氣). These never start a month and are skipped when
/// reading reference data.
const ZHONGQI_NAMES: [&str; 39] = [
    "雨水", "春分", "穀雨", "小滿", "夏至", "大暑", "處暑", "秋分", "霜降", "小雪", "冬至", "大寒",
    "谷雨", "小满", "处暑", "우수", "춘분", "곡우", "소만", "하지", "대서", "처서", "추분", "상강",
    "소설", "동지", "대한",
    "yushui", "chunfen", "guyu", "xiaoman", "xiazhi", "dashu", "chushu", "qiufen", "shuangjiang",
    "xiaoxue", "dongzhi", "dahan",
];

impl Jieqi {
    /// 0-based term index (Lichun=0 .. Xiaohan=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(i: u32) -> Option<Self> {
        if i < 12 { Some(ALL_JIEQI[i as usize]) } else { None }
    }

    /// Apparent solar longitude (degrees) at which the term begins.
    pub const fn longitude_deg(self) -> f64 {
        ((315 + 30 * self as u32) % 360) as f64
    }

    /// Branch of the month this term opens: Lichun → 寅 .. Xiaohan → 丑.
    pub const fn month_branch(self) -> Branch {
        Branch::from_index(self as u32 + 2)
    }

    /// Usual civil (month, day) of the term.
    pub const fn typical_date(self) -> (u32, u32) {
        TYPICAL_DATE[self as usize]
    }

    /// True when the term's civil date lies in the year after its
    /// sexagenary year (only Xiaohan).
    pub const fn in_following_year(self) -> bool {
        matches!(self, Self::Xiaohan)
    }

    /// Civil year of this term within sexagenary year `year`.
    pub const fn civil_year(self, year: i32) -> i32 {
        if self.in_following_year() { year + 1 } else { year }
    }

    /// Traditional-character name.
    pub const fn hanzi(self) -> &'static str {
        HANZI[self as usize]
    }

    pub const fn hangul(self) -> &'static str {
        HANGUL[self as usize]
    }

    /// Lowercase pinyin code.
    pub const fn name(self) -> &'static str {
        PINYIN[self as usize]
    }

    pub const fn english_name(self) -> &'static str {
        ENGLISH[self as usize]
    }

    pub const fn all() -> &'static [Jieqi; 12] {
        &ALL_JIEQI
    }

    /// Term opening the month whose branch is `branch`.
    pub const fn for_month_branch(branch: Branch) -> Self {
        ALL_JIEQI[(branch as i64 - 2).rem_euclid(12) as usize]
    }
}

impl Display for Jieqi {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanzi())
    }
}

impl FromStr for Jieqi {
    type Err = BaseError;

    /// Accepts traditional or simplified hanzi, hangul, pinyin, or the English
    /// name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let lower = t.to_ascii_lowercase();
        (0..12)
            .find(|&i| {
                HANZI[i] == t
                    || SIMPLIFIED[i] == t
                    || HANGUL[i] == t
                    || PINYIN[i] == lower
                    || ENGLISH[i].eq_ignore_ascii_case(t)
            })
            .map(|i| ALL_JIEQI[i])
            .ok_or_else(|| BaseError::UnknownSymbol(s.to_string()))
    }
}

/// True for names of the mid-month terms (中氣).
pub fn is_zhongqi_name(s: &str) -> bool {
    let t = s.trim();
    let lower = t.to_ascii_lowercase();
    ZHONGQI_NAMES.iter().any(|&n| n == t || n == lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longitudes_step_by_thirty() {
        assert_eq!(Jieqi::Lichun.longitude_deg(), 315.0);
        assert_eq!(Jieqi::Jingzhe.longitude_deg(), 345.0);
        assert_eq!(Jieqi::Qingming.longitude_deg(), 15.0);
        assert_eq!(Jieqi::Xiaohan.longitude_deg(), 285.0);
        for w in ALL_JIEQI.windows(2) {
            let d = (w[1].longitude_deg() - w[0].longitude_deg()).rem_euclid(360.0);
            assert_eq!(d, 30.0);
        }
    }

    #[test]
    fn month_branches() {
        assert_eq!(Jieqi::Lichun.month_branch(), Branch::Yin);
        assert_eq!(Jieqi::Jingzhe.month_branch(), Branch::Mao);
        assert_eq!(Jieqi::Daxue.month_branch(), Branch::Zi);
        assert_eq!(Jieqi::Xiaohan.month_branch(), Branch::Chou);
        for j in ALL_JIEQI {
            assert_eq!(Jieqi::for_month_branch(j.month_branch()), j);
        }
    }

    #[test]
    fn only_xiaohan_crosses_year() {
        for j in ALL_JIEQI {
            assert_eq!(j.in_following_year(), j == Jieqi::Xiaohan);
        }
        assert_eq!(Jieqi::Xiaohan.civil_year(2024), 2025);
        assert_eq!(Jieqi::Xiaohan.typical_date().0, 1);
    }

    #[test]
    fn parse_variants() {
        assert_eq!("驚蟄".parse::<Jieqi>().unwrap(), Jieqi::Jingzhe);
        assert_eq!("惊蛰".parse::<Jieqi>().unwrap(), Jieqi::Jingzhe);
        assert_eq!("경칩".parse::<Jieqi>().unwrap(), Jieqi::Jingzhe);
        assert_eq!("Jingzhe".parse::<Jieqi>().unwrap(), Jieqi::Jingzhe);
        assert_eq!("awakening of insects".parse::<Jieqi>().unwrap(), Jieqi::Jingzhe);
        assert!("雨水".parse::<Jieqi>().is_err());
    }

    #[test]
    fn zhongqi_recognized() {
        assert!(is_zhongqi_name("雨水"));
        assert!(is_zhongqi_name("Dongzhi"));
        assert!(!is_zhongqi_name("立春"));
    }

    #[test]
    fn from_index_bounds() {
        assert_eq!(Jieqi::from_index(0), Some(Jieqi::Lichun));
        assert_eq!(Jieqi::from_index(12), None);
    }
}
