//! Validated birth-event input shared by every divination engine.

use crate::calendar::{LunarDate, lunar_to_solar, solar_to_lunar};
use crate::consts::{MAX_BIRTH_YEAR, MIN_BIRTH_YEAR};
use crate::error::{DivinationError, ParseError};
use crate::prelude::*;
use crate::types::{Hour, Minute, Month, SolarDate};
use serde::{Deserialize, Serialize};

/// Largest day number accepted before calendar-specific checks.
const MAX_INPUT_DAY: u8 = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[display(fmt = "男")]
    Male,
    #[display(fmt = "女")]
    Female,
}

/// Wire shape before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBirthEvent {
    name:         String,
    gender:       Gender,
    birth_year:   u16,
    birth_month:  u8,
    birth_day:    u8,
    birth_hour:   u8,
    birth_minute: u8,
    is_lunar:     bool,
    #[serde(default)]
    question:     Option<String>,
}

/// A person's birth moment plus an optional question, as submitted to the
/// divination service.
///
/// Deserializes from the service's camelCase JSON and runs the same range
/// checks as [`BirthEvent::new`].
///
/// ```
/// use ganzhi::{BirthEvent, Gender};
///
/// let event = BirthEvent::new("张三", Gender::Male, (1990, 1, 1), 0, 0, false)?;
/// assert_eq!(event.birth_date_label(), "1990年1月1日");
/// assert_eq!(event.birth_time_label(), "00:00");
/// # Ok::<(), ganzhi::DivinationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBirthEvent", rename_all = "camelCase")]
pub struct BirthEvent {
    name:         String,
    gender:       Gender,
    birth_year:   u16,
    birth_month:  u8,
    birth_day:    u8,
    birth_hour:   Hour,
    birth_minute: Minute,
    is_lunar:     bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    question:     Option<String>,
}

impl BirthEvent {
    /// Validates and builds a birth event.
    ///
    /// `date` is `(year, month, day)`, read as a lunar date when `is_lunar`
    /// is set. Solar dates must exist in the Gregorian calendar; lunar days
    /// are only checked against 1-31 here and against the lunar table when
    /// a Bazi chart is computed.
    ///
    /// # Errors
    /// - `EmptyName` for a blank name
    /// - `BirthYearOutOfRange` outside 1900-2100
    /// - `InvalidDate` for a bad month, day, hour or minute
    pub fn new(
        name: impl Into<String>,
        gender: Gender,
        date: (u16, u8, u8),
        hour: u8,
        minute: u8,
        is_lunar: bool,
    ) -> Result<Self, DivinationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DivinationError::EmptyName);
        }

        let (year, month, day) = date;
        if !(MIN_BIRTH_YEAR..=MAX_BIRTH_YEAR).contains(&year) {
            return Err(DivinationError::BirthYearOutOfRange(year));
        }
        Month::new(month)?;
        if is_lunar {
            if day == 0 || day > MAX_INPUT_DAY {
                return Err(ParseError::InvalidDay { year, month, day }.into());
            }
        } else {
            SolarDate::new(year, month, day)?;
        }

        Ok(Self {
            name,
            gender,
            birth_year: year,
            birth_month: month,
            birth_day: day,
            birth_hour: Hour::new(hour)?,
            birth_minute: Minute::new(minute)?,
            is_lunar,
            question: None,
        })
    }

    /// Attaches the question asked alongside the birth data.
    #[must_use]
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn gender(&self) -> Gender {
        self.gender
    }

    /// `(year, month, day)` as submitted.
    pub const fn date_parts(&self) -> (u16, u8, u8) {
        (self.birth_year, self.birth_month, self.birth_day)
    }

    pub const fn hour(&self) -> Hour {
        self.birth_hour
    }

    pub const fn minute(&self) -> Minute {
        self.birth_minute
    }

    pub const fn is_lunar(&self) -> bool {
        self.is_lunar
    }

    pub fn question(&self) -> Option<&str> {
        self.question.as_deref()
    }

    /// Birth date as submitted, e.g. `1990年1月1日`.
    pub fn birth_date_label(&self) -> String {
        format!("{}年{}月{}日", self.birth_year, self.birth_month, self.birth_day)
    }

    /// Birth time as `HH:MM`.
    pub fn birth_time_label(&self) -> String {
        format!("{:02}:{:02}", self.birth_hour.get(), self.birth_minute.get())
    }

    /// Resolves the civil date and the lunar date of this birth.
    ///
    /// Lunar input is taken as a non-leap month.
    ///
    /// # Errors
    /// Propagates the calendar converter's range and validity errors.
    pub fn resolve_dates(&self) -> Result<(SolarDate, LunarDate), DivinationError> {
        let (year, month, day) = self.date_parts();
        if self.is_lunar {
            let lunar = LunarDate::new(year, month, day, false);
            Ok((lunar_to_solar(lunar)?, lunar))
        } else {
            let solar = SolarDate::new(year, month, day)?;
            Ok((solar, solar_to_lunar(solar)?))
        }
    }
}

impl TryFrom<RawBirthEvent> for BirthEvent {
    type Error = DivinationError;

    fn try_from(raw: RawBirthEvent) -> Result<Self, Self::Error> {
        let event = Self::new(
            raw.name,
            raw.gender,
            (raw.birth_year, raw.birth_month, raw.birth_day),
            raw.birth_hour,
            raw.birth_minute,
            raw.is_lunar,
        )?;
        Ok(match raw.question {
            Some(question) => event.with_question(question),
            None => event,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(date: (u16, u8, u8), is_lunar: bool) -> Result<BirthEvent, DivinationError> {
        BirthEvent::new("张三", Gender::Male, date, 8, 30, is_lunar)
    }

    #[test]
    fn test_valid_event() {
        let e = event((1990, 1, 1), false).expect("valid event");
        assert_eq!(e.name(), "张三");
        assert_eq!(e.date_parts(), (1990, 1, 1));
        assert_eq!(e.birth_time_label(), "08:30");
        assert_eq!(e.question(), None);
        assert_eq!(e.gender().to_string(), "男");
    }

    #[test]
    fn test_rejections() {
        struct TestCase {
            result:      Result<BirthEvent, DivinationError>,
            expected:    DivinationError,
            description: &'static str,
        }

        let cases = [
            TestCase {
                result:      event((1899, 12, 31), false),
                expected:    DivinationError::BirthYearOutOfRange(1899),
                description: "year before range",
            },
            TestCase {
                result:      event((2101, 1, 1), false),
                expected:    DivinationError::BirthYearOutOfRange(2101),
                description: "year after range",
            },
            TestCase {
                result:      event((2000, 13, 1), false),
                expected:    ParseError::InvalidMonth(13).into(),
                description: "month 13",
            },
            TestCase {
                result:      event((2023, 2, 30), false),
                expected:    ParseError::InvalidDay {
                    year:  2023,
                    month: 2,
                    day:   30,
                }
                .into(),
                description: "February 30th solar",
            },
            TestCase {
                result:      event((2023, 2, 32), true),
                expected:    ParseError::InvalidDay {
                    year:  2023,
                    month: 2,
                    day:   32,
                }
                .into(),
                description: "lunar day 32",
            },
            TestCase {
                result:      BirthEvent::new("张三", Gender::Female, (2000, 1, 1), 24, 0, false),
                expected:    ParseError::InvalidHour(24).into(),
                description: "hour 24",
            },
            TestCase {
                result:      BirthEvent::new("张三", Gender::Female, (2000, 1, 1), 0, 60, false),
                expected:    ParseError::InvalidMinute(60).into(),
                description: "minute 60",
            },
            TestCase {
                result:      BirthEvent::new("  ", Gender::Female, (2000, 1, 1), 0, 0, false),
                expected:    DivinationError::EmptyName,
                description: "blank name",
            },
        ];

        for case in cases {
            assert_eq!(case.result, Err(case.expected), "{}", case.description);
        }
    }

    #[test]
    fn test_lunar_day_thirty_deferred() {
        // Accepted here; the lunar table decides later
        assert!(event((2023, 2, 30), true).is_ok());
    }

    #[test]
    fn test_deserialize_service_shape() {
        let json = r#"{
            "name": "李四",
            "gender": "female",
            "birthYear": 1984,
            "birthMonth": 2,
            "birthDay": 4,
            "birthHour": 12,
            "birthMinute": 5,
            "isLunar": false,
            "question": "事业"
        }"#;
        let e: BirthEvent = serde_json::from_str(json).expect("valid json");
        assert_eq!(e.gender(), Gender::Female);
        assert_eq!(e.date_parts(), (1984, 2, 4));
        assert_eq!(e.hour().get(), 12);
        assert_eq!(e.question(), Some("事业"));

        let back = serde_json::to_value(&e).expect("serialize");
        assert_eq!(back["birthYear"], 1984);
        assert_eq!(back["isLunar"], false);
        assert_eq!(back["gender"], "female");
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"name":"王五","gender":"male","birthYear":1800,"birthMonth":1,
            "birthDay":1,"birthHour":0,"birthMinute":0,"isLunar":false}"#;
        assert!(serde_json::from_str::<BirthEvent>(json).is_err());

        let json = r#"{"name":"王五","gender":"other","birthYear":1990,"birthMonth":1,
            "birthDay":1,"birthHour":0,"birthMinute":0,"isLunar":false}"#;
        assert!(serde_json::from_str::<BirthEvent>(json).is_err());
    }

    #[test]
    fn test_question_omitted_when_absent() {
        let e = event((1990, 1, 1), false).expect("valid event");
        let json = serde_json::to_value(&e).expect("serialize");
        assert!(json.get("question").is_none());
        let e = e.with_question("婚姻");
        assert_eq!(e.question(), Some("婚姻"));
    }

    #[test]
    fn test_resolve_solar_input() {
        let e = event((1990, 1, 1), false).expect("valid event");
        let (solar, lunar) = e.resolve_dates().expect("in range");
        assert_eq!(solar.to_string(), "1990-01-01");
        assert_eq!(lunar, LunarDate::new(1989, 12, 5, false));
    }

    #[test]
    fn test_resolve_lunar_input() {
        let e = event((1989, 12, 5), true).expect("valid event");
        let (solar, lunar) = e.resolve_dates().expect("in range");
        assert_eq!(solar.to_string(), "1990-01-01");
        assert!(!lunar.is_leap_month);
    }
}
