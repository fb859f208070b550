//! Stem–branch pairs of the sexagenary cycle (干支).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::error::BaseError;
use crate::stem::Stem;

/// Length of the sexagenary cycle.
pub const CYCLE_LEN: u32 = 60;

/// A stem–branch pair of equal yin/yang parity (one of 60).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ganzhi {
    pub stem: Stem,
    pub branch: Branch,
}

impl Ganzhi {
    /// Pair a stem and branch; `None` when their parity differs.
    pub const fn new(stem: Stem, branch: Branch) -> Option<Self> {
        if stem.is_yang() == branch.is_yang() {
            Some(Self { stem, branch })
        } else {
            None
        }
    }

    /// Pair at cycle position `n` mod 60 (0 = 甲子).
    pub const fn from_cycle_index(n: i64) -> Self {
        let i = n.rem_euclid(CYCLE_LEN as i64);
        Self {
            stem: Stem::from_index((i % 10) as u32),
            branch: Branch::from_index((i % 12) as u32),
        }
    }

    /// Position in the cycle, 0..60.
    ///
    /// Inverse of [`Ganzhi::from_cycle_index`] by the Chinese remainder
    /// theorem: n ≡ 6s − 5b (mod 60).
    pub const fn cycle_index(self) -> u32 {
        let s = self.stem.index() as i64;
        let b = self.branch.index() as i64;
        (6 * s - 5 * b).rem_euclid(CYCLE_LEN as i64) as u32
    }

    /// Advance both components by `n` (negative moves backward).
    pub const fn offset(self, n: i64) -> Self {
        Self {
            stem: self.stem.offset(n),
            branch: self.branch.offset(n),
        }
    }

    pub fn hanzi(self) -> String {
        format!("{}{}", self.stem.hanzi(), self.branch.hanzi())
    }

    pub fn hangul(self) -> String {
        format!("{}{}", self.stem.hangul(), self.branch.hangul())
    }
}

impl Display for Ganzhi {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem.hanzi(), self.branch.hanzi())
    }
}

impl FromStr for Ganzhi {
    type Err = BaseError;

    /// Parses a two-character hanzi or hangul pair such as `甲子` or `갑자`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        let (Some(a), Some(b), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(BaseError::UnknownSymbol(s.to_string()));
        };
        let stem: Stem = a.to_string().parse()?;
        let branch: Branch = b.to_string().parse()?;
        Self::new(stem, branch).ok_or(BaseError::ParityMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_and_last() {
        assert_eq!(Ganzhi::from_cycle_index(0).to_string(), "甲子");
        assert_eq!(Ganzhi::from_cycle_index(59).to_string(), "癸亥");
        assert_eq!(Ganzhi::from_cycle_index(60), Ganzhi::from_cycle_index(0));
        assert_eq!(Ganzhi::from_cycle_index(-1).to_string(), "癸亥");
    }

    #[test]
    fn cycle_index_inverts() {
        for n in 0..60 {
            let g = Ganzhi::from_cycle_index(n);
            assert_eq!(g.cycle_index() as i64, n);
        }
    }

    #[test]
    fn all_sixty_distinct_and_parity_consistent() {
        let mut seen = std::collections::HashSet::new();
        for n in 0..60 {
            let g = Ganzhi::from_cycle_index(n);
            assert_eq!(g.stem.is_yang(), g.branch.is_yang());
            assert!(seen.insert(g));
        }
        assert_eq!(seen.len(), 60);
    }

    #[test]
    fn rejects_mismatched_parity() {
        assert!(Ganzhi::new(Stem::Jia, Branch::Chou).is_none());
        assert!(Ganzhi::new(Stem::Yi, Branch::Chou).is_some());
        assert_eq!("甲丑".parse::<Ganzhi>(), Err(BaseError::ParityMismatch));
    }

    #[test]
    fn offset_matches_index_arithmetic() {
        let g: Ganzhi = "己卯".parse().unwrap();
        assert_eq!(g.cycle_index(), 15);
        assert_eq!(g.offset(1).to_string(), "庚辰");
        assert_eq!(g.offset(-1).to_string(), "戊寅");
        assert_eq!(g.offset(45).cycle_index(), 0);
    }

    #[test]
    fn hangul_form() {
        assert_eq!("경오".parse::<Ganzhi>().unwrap().hangul(), "경오");
        assert_eq!("庚午".parse::<Ganzhi>().unwrap().hangul(), "경오");
    }

    #[test]
    fn serializes_as_codes() {
        let g = Ganzhi::from_cycle_index(6);
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, r#"{"stem":"geng","branch":"wu"}"#);
    }
}
