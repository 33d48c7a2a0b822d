//! Error types for the ganzhi crate.

use crate::consts::{
    LUNAR_MAX_YEAR, LUNAR_MIN_YEAR, MAX_BIRTH_YEAR, MAX_HOUR, MAX_MINUTE, MAX_MONTH, MAX_YEAR, MIN_BIRTH_YEAR,
};
use crate::prelude::*;

/// Rejected date or time component.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Invalid hour: {} (must be 0-{})", "_0", MAX_HOUR)]
    InvalidHour(u8),
    #[display(fmt = "Invalid minute: {} (must be 0-{})", "_0", MAX_MINUTE)]
    InvalidMinute(u8),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Error type for calendar conversion and chart computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DivinationError {
    /// Solar date has no lunar counterpart in the 1900-2100 table.
    #[error(
        "Solar date {year:04}-{month:02}-{day:02} is outside the lunar calendar table ({min}-{max})",
        min = LUNAR_MIN_YEAR,
        max = LUNAR_MAX_YEAR
    )]
    OutOfRangeCalendar { year: u16, month: u8, day: u8 },

    /// Lunar year has no table entry.
    #[error(
        "Lunar year {0} is outside the lunar calendar table ({min}-{max})",
        min = LUNAR_MIN_YEAR,
        max = LUNAR_MAX_YEAR
    )]
    LunarYearOutOfRange(u16),

    /// Lunar month/day does not exist in the given lunar year.
    #[error(
        "Invalid lunar date {year}-{month:02}-{day:02}{suffix}",
        suffix = leap_suffix(.is_leap_month)
    )]
    InvalidLunarDate {
        year: u16,
        month: u8,
        day: u8,
        is_leap_month: bool,
    },

    /// Birth year outside the range accepted by the divination service.
    #[error("Birth year {0} is out of range ({min}-{max})", min = MIN_BIRTH_YEAR, max = MAX_BIRTH_YEAR)]
    BirthYearOutOfRange(u16),

    /// Birth event submitted without a name.
    #[error("Name must not be empty")]
    EmptyName,

    /// Error validating a date or time component.
    #[error(transparent)]
    InvalidDate(#[from] ParseError),

    /// Engine configuration failed validation.
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),
}

const fn leap_suffix(is_leap_month: &bool) -> &'static str {
    if *is_leap_month { " (leap)" } else { "" }
}
