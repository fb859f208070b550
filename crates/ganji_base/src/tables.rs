//! Static stem-derivation tables.
//!
//! Month stems follow the "five tigers" rule (五虎遁): the Yin month of a
//! year whose stem is 甲 or 己 starts at 丙寅. Hour stems follow the "five
//! rats" rule (五鼠遁): the Zi hour of a 甲 or 己 day is 甲子. Both tables are
//! indexed `[stem index % 5][branch index]`.

use crate::branch::Branch;
use crate::stem::Stem;

use Stem as S;

/// Month stem by `[year_stem % 5][month_branch]`.
#[rustfmt::skip]
pub static MONTH_STEM_TABLE: [[Stem; 12]; 5] = [
    [S::Bing, S::Ding, S::Bing, S::Ding, S::Wu, S::Ji, S::Geng, S::Xin, S::Ren, S::Gui, S::Jia, S::Yi],
    [S::Wu, S::Ji, S::Wu, S::Ji, S::Geng, S::Xin, S::Ren, S::Gui, S::Jia, S::Yi, S::Bing, S::Ding],
    [S::Geng, S::Xin, S::Geng, S::Xin, S::Ren, S::Gui, S::Jia, S::Yi, S::Bing, S::Ding, S::Wu, S::Ji],
    [S::Ren, S::Gui, S::Ren, S::Gui, S::Jia, S::Yi, S::Bing, S::Ding, S::Wu, S::Ji, S::Geng, S::Xin],
    [S::Jia, S::Yi, S::Jia, S::Yi, S::Bing, S::Ding, S::Wu, S::Ji, S::Geng, S::Xin, S::Ren, S::Gui],
];

/// Hour stem by `[day_stem % 5][hour_branch]`.
#[rustfmt::skip]
pub static HOUR_STEM_TABLE: [[Stem; 12]; 5] = [
    [S::Jia, S::Yi, S::Bing, S::Ding, S::Wu, S::Ji, S::Geng, S::Xin, S::Ren, S::Gui, S::Jia, S::Yi],
    [S::Bing, S::Ding, S::Wu, S::Ji, S::Geng, S::Xin, S::Ren, S::Gui, S::Jia, S::Yi, S::Bing, S::Ding],
    [S::Wu, S::Ji, S::Geng, S::Xin, S::Ren, S::Gui, S::Jia, S::Yi, S::Bing, S::Ding, S::Wu, S::Ji],
    [S::Geng, S::Xin, S::Ren, S::Gui, S::Jia, S::Yi, S::Bing, S::Ding, S::Wu, S::Ji, S::Geng, S::Xin],
    [S::Ren, S::Gui, S::Jia, S::Yi, S::Bing, S::Ding, S::Wu, S::Ji, S::Geng, S::Xin, S::Ren, S::Gui],
];

/// Stem of the month with `branch` in a year whose stem is `year_stem`.
pub fn month_stem(year_stem: Stem, branch: Branch) -> Stem {
    MONTH_STEM_TABLE[(year_stem.index() % 5) as usize][branch.index() as usize]
}

/// Stem of the double-hour `branch` on a day whose stem is `day_stem`.
pub fn hour_stem(day_stem: Stem, branch: Branch) -> Stem {
    HOUR_STEM_TABLE[(day_stem.index() % 5) as usize][branch.index() as usize]
}

/// Double-hour branch of a civil hour (0..24). 23:00 and 00:00 are both Zi.
pub fn hour_branch(hour: u32) -> Branch {
    Branch::from_index((hour + 1) / 2)
}
