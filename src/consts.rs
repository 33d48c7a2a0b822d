/// Maximum valid Gregorian year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Last hour of the civil day
pub const MAX_HOUR: u8 = 23;

/// Last minute of the hour
pub const MAX_MINUTE: u8 = 59;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';

/// Number of heavenly stems
pub const STEM_COUNT: u8 = 10;
/// Number of earthly branches
pub const BRANCH_COUNT: u8 = 12;
/// Length of the combined sexagenary cycle
pub const SEXAGENARY_CYCLE: u8 = 60;

/// First lunar year covered by the packed lunar table
pub const LUNAR_MIN_YEAR: u16 = 1900;
/// Last lunar year covered by the packed lunar table
pub const LUNAR_MAX_YEAR: u16 = 2100;

/// Earliest birth year accepted by [`crate::BirthEvent`]
pub const MIN_BIRTH_YEAR: u16 = 1900;
/// Latest birth year accepted by [`crate::BirthEvent`]
pub const MAX_BIRTH_YEAR: u16 = 2100;

/// Days from CE of 1900-01-31, lunar new year of 1900
pub(crate) const LUNAR_EPOCH_ORDINAL: i32 = 693_626;
/// Days from CE of 1900-01-01, a 甲戌 day
pub(crate) const DAY_PILLAR_EPOCH_ORDINAL: i32 = 693_596;
/// Stem index of the 1900-01-01 day pillar (甲)
pub(crate) const DAY_PILLAR_EPOCH_STEM: i64 = 0;
/// Branch index of the 1900-01-01 day pillar (戌)
pub(crate) const DAY_PILLAR_EPOCH_BRANCH: i64 = 10;

/// Reference year for the year pillar: 1900 is 庚子
pub(crate) const YEAR_PILLAR_EPOCH: i64 = 1900;
/// Stem index of the reference year (庚)
pub(crate) const YEAR_PILLAR_EPOCH_STEM: i64 = 6;
/// Branch index of the reference year (子)
pub(crate) const YEAR_PILLAR_EPOCH_BRANCH: i64 = 0;

/// Default February day on which the year pillar turns over (立春 approximation)
pub const DEFAULT_SPRING_BOUNDARY_DAY: u8 = 4;

/// Days in a short lunar month
pub const SHORT_LUNAR_MONTH: u8 = 29;
/// Days in a long lunar month
pub const LONG_LUNAR_MONTH: u8 = 30;

/// Packed lunar year records for 1900..=2100.
///
/// Bits 0-3: leap month (0 = none). Bits 4-15: months 12..1, set means 30 days.
/// Bit 16: the leap month has 30 days.
pub(crate) const LUNAR_INFO: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2,
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977,
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970,
    0x06566, 0x0d4a0, 0x0ea50, 0x06e95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950,
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557,
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5d0, 0x14573, 0x052d0, 0x0a9a8, 0x0e950, 0x06aa0,
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0,
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b5a0, 0x195a6,
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570,
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x055c0, 0x0ab60, 0x096d5, 0x092e0,
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5,
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930,
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530,
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45,
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0,
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0,
    0x0a2e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4,
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0,
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160,
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252,
    0x0d520,
];
