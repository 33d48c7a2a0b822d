use crate::consts::{DATE_SEPARATOR, MAX_HOUR, MAX_MINUTE, MAX_MONTH, MAX_YEAR};
use crate::error::ParseError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;
use std::str::FromStr;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        let non_zero = NonZeroU16::new(value).ok_or(ParseError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(ParseError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hour of the civil day, `0..=23`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Hour(u8);

impl Hour {
    /// Midnight
    pub const MIDNIGHT: Self = Self(0);

    /// # Errors
    /// Returns `ParseError::InvalidHour` if the value is > 23.
    pub const fn new(value: u8) -> Result<Self, ParseError> {
        if value > MAX_HOUR {
            return Err(ParseError::InvalidHour(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Hour {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hour> for u8 {
    fn from(hour: Hour) -> Self {
        hour.0
    }
}

/// Minute of the hour, `0..=59`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Minute(u8);

impl Minute {
    /// # Errors
    /// Returns `ParseError::InvalidMinute` if the value is > 59.
    pub const fn new(value: u8) -> Result<Self, ParseError> {
        if value > MAX_MINUTE {
            return Err(ParseError::InvalidMinute(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Minute {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Minute> for u8 {
    fn from(minute: Minute) -> Self {
        minute.0
    }
}

/// A validated Gregorian calendar date.
///
/// Impossible dates such as February 30th cannot be constructed, so every
/// pillar and calendar function downstream is total over its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SolarDate(NaiveDate);

impl SolarDate {
    /// Creates a date from its components.
    ///
    /// Year and month are range-checked first so each gets its own error;
    /// whether the day exists in that month is left to chrono.
    ///
    /// # Errors
    /// Returns the `ParseError` for the first invalid component.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let y = Year::new(year)?;
        let m = Month::new(month)?;
        NaiveDate::from_ymd_opt(i32::from(y.get()), u32::from(m.get()), u32::from(day))
            .map(Self)
            .ok_or(ParseError::InvalidDay { year, month, day })
    }

    /// Year component
    pub fn year(self) -> u16 {
        self.0.year() as u16
    }

    /// Month component (1-12)
    pub fn month(self) -> u8 {
        self.0.month() as u8
    }

    /// Day-of-month component (1-31)
    pub fn day(self) -> u8 {
        self.0.day() as u8
    }

    /// Days since 0001-01-01 (which is day 1).
    pub fn ordinal(self) -> i32 {
        self.0.num_days_from_ce()
    }

    /// Builds a date from its [`ordinal`](Self::ordinal).
    /// Returns `None` outside years `1..=MAX_YEAR`.
    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        NaiveDate::from_num_days_from_ce_opt(ordinal)
            .filter(|d| (1..=i32::from(MAX_YEAR)).contains(&d.year()))
            .map(Self)
    }

    /// Signed whole days from `earlier` to `self`.
    pub fn days_since(self, earlier: Self) -> i32 {
        self.ordinal() - earlier.ordinal()
    }

    /// The following day, or `None` past `MAX_YEAR`.
    pub fn succ(self) -> Option<Self> {
        Self::from_ordinal(self.ordinal() + 1)
    }

    fn parse_component<T: FromStr>(s: &str) -> Result<T, ParseError> {
        s.parse::<T>().map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl fmt::Display for SolarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for SolarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        match parts.as_slice() {
            [year, month, day] => {
                let year = Self::parse_component::<u16>(year)?;
                let month = Self::parse_component::<u8>(month)?;
                let day = Self::parse_component::<u8>(day)?;
                Self::new(year, month, day)
            },
            _ => Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} part(s): {trimmed}",
                parts.len()
            ))),
        }
    }
}

impl Serialize for SolarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SolarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
