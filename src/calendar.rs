//! Chinese lunisolar calendar for lunar years 1900-2100.
//!
//! Month lengths come from a fixed historical table rather than from
//! astronomical computation. Each packed record is decoded once, at compile
//! time, into a [`LunarYearInfo`].

use crate::consts::{
    LONG_LUNAR_MONTH, LUNAR_EPOCH_ORDINAL, LUNAR_INFO, LUNAR_MAX_YEAR, LUNAR_MIN_YEAR, MAX_MONTH, SHORT_LUNAR_MONTH,
};
use crate::error::DivinationError;
use crate::types::SolarDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

const LEAP_MONTH_MASK: u32 = 0xf;
const MONTH_BITS_SHIFT: u32 = 4;
const MONTH_BITS_MASK: u32 = 0xfff;
const LEAP_IS_LONG_BIT: u32 = 0x1_0000;

const YEAR_COUNT: usize = (LUNAR_MAX_YEAR - LUNAR_MIN_YEAR + 1) as usize;

/// Decoded calendar data for one lunar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LunarYearInfo {
    /// Month followed by a leap month, 0 when the year has none
    leap_month:   u8,
    /// Bit 11 is month 1 ... bit 0 is month 12; set means 30 days
    month_bits:   u16,
    /// The leap month has 30 days
    leap_is_long: bool,
}

impl LunarYearInfo {
    /// Decodes a packed table record.
    pub const fn decode(record: u32) -> Self {
        Self {
            leap_month:   (record & LEAP_MONTH_MASK) as u8,
            month_bits:   ((record >> MONTH_BITS_SHIFT) & MONTH_BITS_MASK) as u16,
            leap_is_long: record & LEAP_IS_LONG_BIT != 0,
        }
    }

    /// Month after which the leap month is inserted, if any.
    pub const fn leap_month(self) -> Option<u8> {
        if self.leap_month == 0 { None } else { Some(self.leap_month) }
    }

    /// Length of ordinary month `month` (1-12).
    pub const fn month_days(self, month: u8) -> u8 {
        debug_assert!(month >= 1 && month <= MAX_MONTH);
        if self.month_bits & (1 << (MAX_MONTH - month)) != 0 {
            LONG_LUNAR_MONTH
        } else {
            SHORT_LUNAR_MONTH
        }
    }

    /// Length of the leap month, 0 when the year has none.
    pub const fn leap_days(self) -> u8 {
        match (self.leap_month(), self.leap_is_long) {
            (None, _) => 0,
            (Some(_), true) => LONG_LUNAR_MONTH,
            (Some(_), false) => SHORT_LUNAR_MONTH,
        }
    }

    /// Total days in the lunar year, leap month included.
    pub const fn year_days(self) -> u16 {
        let long_months = self.month_bits.count_ones() as u16;
        MAX_MONTH as u16 * SHORT_LUNAR_MONTH as u16 + long_months + self.leap_days() as u16
    }

    /// Months in calendar order as `(month, is_leap, days)`; a leap month
    /// follows directly after its nominal month.
    pub fn months(self) -> impl Iterator<Item = (u8, bool, u8)> {
        (1..=MAX_MONTH).flat_map(move |month| {
            let ordinary = Some((month, false, self.month_days(month)));
            let leap = (self.leap_month() == Some(month)).then_some((month, true, self.leap_days()));
            ordinary.into_iter().chain(leap)
        })
    }
}

const fn decode_table() -> [LunarYearInfo; YEAR_COUNT] {
    let mut years = [LunarYearInfo::decode(0); YEAR_COUNT];
    let mut i = 0;
    while i < YEAR_COUNT {
        years[i] = LunarYearInfo::decode(LUNAR_INFO[i]);
        i += 1;
    }
    years
}

static LUNAR_YEARS: [LunarYearInfo; YEAR_COUNT] = decode_table();

/// Table entry for lunar `year`.
///
/// # Errors
/// Returns `DivinationError::LunarYearOutOfRange` outside 1900-2100.
pub fn lunar_year_info(year: u16) -> Result<LunarYearInfo, DivinationError> {
    year.checked_sub(LUNAR_MIN_YEAR)
        .and_then(|i| LUNAR_YEARS.get(usize::from(i)))
        .copied()
        .ok_or(DivinationError::LunarYearOutOfRange(year))
}

/// A date in the Chinese lunar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarDate {
    pub year:          u16,
    pub month:         u8,
    pub day:           u8,
    pub is_leap_month: bool,
}

impl LunarDate {
    pub const fn new(year: u16, month: u8, day: u8, is_leap_month: bool) -> Self {
        Self {
            year,
            month,
            day,
            is_leap_month,
        }
    }

    const fn invalid(self) -> DivinationError {
        DivinationError::InvalidLunarDate {
            year:          self.year,
            month:         self.month,
            day:           self.day,
            is_leap_month: self.is_leap_month,
        }
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}年{}月{}日", self.year, self.month, self.day)?;
        if self.is_leap_month {
            write!(f, "(闰)")?;
        }
        Ok(())
    }
}

/// Converts a Gregorian date to its lunar date.
///
/// Walks forward from the lunar new year of 1900 (1900-01-31), one lunar
/// year and then one lunar month at a time.
///
/// # Errors
/// Returns `DivinationError::OutOfRangeCalendar` for dates before 1900-01-31
/// or after the last day of lunar 2100.
pub fn solar_to_lunar(date: SolarDate) -> Result<LunarDate, DivinationError> {
    let out_of_range = || {
        debug!(%date, "solar date outside lunar table");
        DivinationError::OutOfRangeCalendar {
            year:  date.year(),
            month: date.month(),
            day:   date.day(),
        }
    };

    let mut offset = date.ordinal() - LUNAR_EPOCH_ORDINAL;
    if offset < 0 {
        return Err(out_of_range());
    }

    let mut year = LUNAR_MIN_YEAR;
    let info = loop {
        let info = lunar_year_info(year).map_err(|_| out_of_range())?;
        let days = i32::from(info.year_days());
        if offset < days {
            break info;
        }
        offset -= days;
        year += 1;
    };
    trace!(%date, lunar_year = year, "resolved lunar year");

    for (month, is_leap_month, days) in info.months() {
        let days = i32::from(days);
        if offset < days {
            return Ok(LunarDate::new(year, month, offset as u8 + 1, is_leap_month));
        }
        offset -= days;
    }

    // The month walk always consumes a whole year_days() span
    Err(out_of_range())
}

/// Converts a lunar date back to its Gregorian date.
///
/// # Errors
/// Returns `DivinationError::LunarYearOutOfRange` outside 1900-2100 and
/// `DivinationError::InvalidLunarDate` when the month, leap flag or day does
/// not exist in that lunar year.
pub fn lunar_to_solar(lunar: LunarDate) -> Result<SolarDate, DivinationError> {
    let info = lunar_year_info(lunar.year)?;

    let preceding_years: i32 = (LUNAR_MIN_YEAR..lunar.year)
        .map(|y| lunar_year_info(y).map(|i| i32::from(i.year_days())))
        .sum::<Result<i32, _>>()?;

    let mut offset = preceding_years;
    let mut found = None;
    for (month, is_leap_month, days) in info.months() {
        if month == lunar.month && is_leap_month == lunar.is_leap_month {
            found = Some(days);
            break;
        }
        offset += i32::from(days);
    }

    match found {
        Some(days) if (1..=days).contains(&lunar.day) => {
            SolarDate::from_ordinal(LUNAR_EPOCH_ORDINAL + offset + i32::from(lunar.day) - 1)
                .ok_or_else(|| lunar.invalid())
        },
        _ => Err(lunar.invalid()),
    }
}
