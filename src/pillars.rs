//! The four pillars (四柱): year, month, day and hour stem-branch pairs.
//!
//! All four are plain modular arithmetic from fixed anchors:
//! - year: 1900 is 庚子, and the year turns over on a fixed February day
//!   rather than at the true 立春 solar term;
//! - month: the branch is fixed by the civil month (month 1 is 寅) and the
//!   stem follows the year stem (五虎遁);
//! - day: 1900-01-01 is 甲戌;
//! - hour: the branch is the two-hour block and the stem follows the day
//!   stem (五鼠遁).

use crate::config::{EngineConfig, ZiHourRule};
use crate::consts::{
    DAY_PILLAR_EPOCH_BRANCH, DAY_PILLAR_EPOCH_ORDINAL, DAY_PILLAR_EPOCH_STEM, DEFAULT_SPRING_BOUNDARY_DAY, FEBRUARY,
    MAX_HOUR, YEAR_PILLAR_EPOCH, YEAR_PILLAR_EPOCH_BRANCH, YEAR_PILLAR_EPOCH_STEM,
};
use crate::ganzhi::{Branch, GanZhi, ShiChen, Stem, Zodiac};
use crate::types::{Hour, SolarDate};
use serde::Serialize;

/// Year pillar, turning over on February 4th.
pub fn year_pillar(date: SolarDate) -> GanZhi {
    year_pillar_with_boundary(date, DEFAULT_SPRING_BOUNDARY_DAY)
}

/// Year pillar, turning over on February `boundary_day`.
pub fn year_pillar_with_boundary(date: SolarDate, boundary_day: u8) -> GanZhi {
    let before_boundary = date.month() < FEBRUARY || (date.month() == FEBRUARY && date.day() < boundary_day);
    let effective_year = i64::from(date.year()) - i64::from(before_boundary);
    let offset = effective_year - YEAR_PILLAR_EPOCH;
    GanZhi::from_indices(YEAR_PILLAR_EPOCH_STEM + offset, YEAR_PILLAR_EPOCH_BRANCH + offset)
}

/// Month-1 stem for each year stem pair (甲己 乙庚 丙辛 丁壬 戊癸).
const FIVE_TIGER_START: [Stem; 5] = [Stem::Bing, Stem::Wu, Stem::Geng, Stem::Ren, Stem::Jia];

/// First-block stem for each day stem pair (甲己 乙庚 丙辛 丁壬 戊癸).
const FIVE_RAT_START: [Stem; 5] = [Stem::Jia, Stem::Bing, Stem::Wu, Stem::Geng, Stem::Ren];

const fn stem_pair_slot(stem: Stem) -> usize {
    (stem.index() % 5) as usize
}

/// Month pillar, using the February 4th year boundary for the stem.
pub fn month_pillar(date: SolarDate) -> GanZhi {
    month_pillar_with_boundary(date, DEFAULT_SPRING_BOUNDARY_DAY)
}

/// Month pillar with an explicit year-boundary day.
pub fn month_pillar_with_boundary(date: SolarDate, boundary_day: u8) -> GanZhi {
    let year_stem = year_pillar_with_boundary(date, boundary_day).stem();
    let start = i64::from(FIVE_TIGER_START[stem_pair_slot(year_stem)].index());
    let month = i64::from(date.month());
    GanZhi::from_indices(start + month - 1, month + 1)
}

/// Day pillar, counted in whole Gregorian days from 1900-01-01 (甲戌).
pub fn day_pillar(date: SolarDate) -> GanZhi {
    let offset = i64::from(date.ordinal() - DAY_PILLAR_EPOCH_ORDINAL);
    GanZhi::from_indices(DAY_PILLAR_EPOCH_STEM + offset, DAY_PILLAR_EPOCH_BRANCH + offset)
}

/// Hour pillar for `hour` on `date`.
pub fn hour_pillar(date: SolarDate, hour: Hour) -> GanZhi {
    hour_pillar_for_day(day_pillar(date).stem(), hour)
}

/// Hour pillar given the governing day stem.
pub fn hour_pillar_for_day(day_stem: Stem, hour: Hour) -> GanZhi {
    let branch = i64::from(Branch::for_hour(hour).index());
    let start = i64::from(FIVE_RAT_START[stem_pair_slot(day_stem)].index());
    GanZhi::from_indices(start + branch, branch)
}

/// Year, month, day and hour pillars of a birth moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FourPillars {
    pub year:    GanZhi,
    pub month:   GanZhi,
    pub day:     GanZhi,
    pub hour:    GanZhi,
    /// Animal of the year branch
    pub zodiac:  Zodiac,
    pub shichen: ShiChen,
}

impl FourPillars {
    /// Computes all four pillars under `config`.
    ///
    /// With [`ZiHourRule::NextDay`], 23:00 takes the day pillar of the
    /// following civil day, and the hour stem follows that day.
    pub fn compute(date: SolarDate, hour: Hour, config: &EngineConfig) -> Self {
        let boundary = config.spring_boundary_day();
        let year = year_pillar_with_boundary(date, boundary);

        let day_date = match config.zi_hour_rule() {
            ZiHourRule::NextDay if hour.get() == MAX_HOUR => date.succ().unwrap_or(date),
            ZiHourRule::SameDay | ZiHourRule::NextDay => date,
        };
        let day = day_pillar(day_date);

        Self {
            year,
            month: month_pillar_with_boundary(date, boundary),
            day,
            hour: hour_pillar_for_day(day.stem(), hour),
            zodiac: year.branch().zodiac(),
            shichen: ShiChen::from_hour(hour),
        }
    }

    /// Pillars in chart order: year, month, day, hour.
    pub const fn as_array(&self) -> [GanZhi; 4] {
        [self.year, self.month, self.day, self.hour]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solar(year: u16, month: u8, day: u8) -> SolarDate {
        SolarDate::new(year, month, day).expect("valid solar date")
    }

    fn hour(h: u8) -> Hour {
        Hour::new(h).expect("valid hour")
    }

    fn gz(s: &str) -> GanZhi {
        s.parse().expect("valid pair")
    }

    #[test]
    fn test_year_anchor_is_geng_zi() {
        assert_eq!(year_pillar(solar(1900, 6, 1)), gz("庚子"));
        assert_eq!(year_pillar(solar(1984, 6, 1)), gz("甲子"));
        assert_eq!(year_pillar(solar(1990, 6, 1)), gz("庚午"));
        assert_eq!(year_pillar(solar(2024, 6, 15)), gz("甲辰"));
    }

    #[test]
    fn test_year_boundary_on_february_fourth() {
        assert_eq!(year_pillar(solar(1984, 2, 3)), gz("癸亥"));
        assert_eq!(year_pillar(solar(1984, 2, 4)), gz("甲子"));
        assert_eq!(year_pillar(solar(1984, 1, 31)), gz("癸亥"));
        // Before the 1900 boundary the effective year is 1899
        assert_eq!(year_pillar(solar(1900, 1, 1)), gz("己亥"));
    }

    #[test]
    fn test_year_boundary_is_configurable() {
        let date = solar(2024, 2, 4);
        assert_eq!(year_pillar_with_boundary(date, 4), gz("甲辰"));
        assert_eq!(year_pillar_with_boundary(date, 5), gz("癸卯"));
    }

    #[test]
    fn test_month_pillar_five_tiger_rule() {
        struct TestCase {
            date:     (u16, u8, u8),
            expected: &'static str,
        }

        let cases = [
            // 甲 year: month 1 starts at 丙寅
            TestCase { date: (1984, 2, 4), expected: "丁卯" },
            TestCase { date: (1984, 3, 1), expected: "戊辰" },
            // 己 year (1989) governs January 1990
            TestCase { date: (1990, 1, 1), expected: "丙寅" },
            // 庚 year: month 1 would be 戊寅
            TestCase { date: (1990, 2, 4), expected: "己卯" },
            TestCase { date: (2024, 6, 15), expected: "辛未" },
            TestCase { date: (2024, 11, 1), expected: "丙子" },
            TestCase { date: (2024, 12, 1), expected: "丁丑" },
        ];

        for case in &cases {
            let (y, m, d) = case.date;
            assert_eq!(month_pillar(solar(y, m, d)), gz(case.expected), "{y}-{m}-{d}");
        }
    }

    #[test]
    fn test_month_branch_fixed_by_month() {
        for month in 1..=12u8 {
            let pillar = month_pillar(solar(2001, month, 15));
            assert_eq!(pillar.branch(), Branch::from_index(i64::from(month) + 1));
        }
    }

    #[test]
    fn test_day_pillar_anchors() {
        assert_eq!(day_pillar(solar(1900, 1, 1)), gz("甲戌"));
        assert_eq!(day_pillar(solar(2000, 1, 1)), gz("戊午"));
        assert_eq!(day_pillar(solar(1990, 1, 1)), gz("丙寅"));
        assert_eq!(day_pillar(solar(1984, 2, 4)), gz("戊辰"));
        assert_eq!(day_pillar(solar(2024, 6, 15)), gz("庚戌"));
    }

    #[test]
    fn test_day_pillar_before_epoch() {
        assert_eq!(day_pillar(solar(1899, 12, 31)), gz("癸酉"));
    }

    #[test]
    fn test_hour_pillar_five_rat_rule() {
        let date = solar(1990, 1, 1); // 丙 day: first block is 戊子
        assert_eq!(hour_pillar(date, hour(0)), gz("戊子"));
        assert_eq!(hour_pillar(date, hour(1)), gz("己丑"));
        assert_eq!(hour_pillar(date, hour(12)), gz("甲午"));
        assert_eq!(hour_pillar(date, hour(23)), gz("戊子"));

        let jia_day = solar(1900, 1, 1);
        assert_eq!(hour_pillar(jia_day, hour(0)), gz("甲子"));
        assert_eq!(hour_pillar(jia_day, hour(22)), gz("乙亥"));
    }

    #[test]
    fn test_four_pillars_default() {
        let pillars = FourPillars::compute(solar(1990, 1, 1), hour(0), &EngineConfig::default());
        let names: Vec<String> = pillars.as_array().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["己巳", "丙寅", "丙寅", "戊子"]);
        assert_eq!(pillars.zodiac, Zodiac::Snake);
        assert_eq!(pillars.shichen.to_string(), "子时");
    }

    #[test]
    fn test_zi_hour_next_day_rule() {
        let date = solar(1990, 1, 1);
        let same = FourPillars::compute(date, hour(23), &EngineConfig::default());
        let next = FourPillars::compute(date, hour(23), &EngineConfig::new().with_zi_hour_rule(ZiHourRule::NextDay));

        assert_eq!(same.day, gz("丙寅"));
        assert_eq!(next.day, gz("丁卯"));
        assert_eq!(next.hour, gz("庚子"));
        assert_eq!(same.year, next.year);
        assert_eq!(same.month, next.month);

        // Other hours are unaffected
        let noon = FourPillars::compute(date, hour(12), &EngineConfig::new().with_zi_hour_rule(ZiHourRule::NextDay));
        assert_eq!(noon.day, gz("丙寅"));
    }
}
