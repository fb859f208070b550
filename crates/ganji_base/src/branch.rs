//! The twelve earthly branches (地支).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BaseError;

/// One of the 12 earthly branches, Zi (子) through Hai (亥).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All 12 branches in cycle order (0 = Zi).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

const HANZI: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];
const HANGUL: [&str; 12] = [
    "자", "축", "인", "묘", "진", "사", "오", "미", "신", "유", "술", "해",
];
const PINYIN: [&str; 12] = [
    "zi", "chou", "yin", "mao", "chen", "si", "wu", "wei", "shen", "you", "xu", "hai",
];

impl Branch {
    /// 0-based cycle index (Zi=0 .. Hai=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Branch at `i` mod 12.
    pub const fn from_index(i: u32) -> Self {
        ALL_BRANCHES[(i % 12) as usize]
    }

    /// Branch `n` steps away, wrapping in either direction.
    pub const fn offset(self, n: i64) -> Self {
        ALL_BRANCHES[(self as i64 + n).rem_euclid(12) as usize]
    }

    pub const fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    pub const fn hanzi(self) -> &'static str {
        HANZI[self as usize]
    }

    pub const fn hangul(self) -> &'static str {
        HANGUL[self as usize]
    }

    pub const fn name(self) -> &'static str {
        PINYIN[self as usize]
    }

    pub const fn all() -> &'static [Branch; 12] {
        &ALL_BRANCHES
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanzi())
    }
}

impl FromStr for Branch {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let lower = t.to_ascii_lowercase();
        (0..12)
            .find(|&i| HANZI[i] == t || HANGUL[i] == t || PINYIN[i] == lower)
            .map(|i| ALL_BRANCHES[i])
            .ok_or_else(|| BaseError::UnknownSymbol(s.to_string()))
    }
}
