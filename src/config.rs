//! Tunable conventions for chart computation.

use crate::consts::{DEFAULT_SPRING_BOUNDARY_DAY, MAX_MONTH};
use crate::error::DivinationError;
use serde::{Deserialize, Serialize};

/// Which civil day the 23:00 hour belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZiHourRule {
    /// 23:00-23:59 keeps the civil day's day pillar.
    #[default]
    SameDay,
    /// 23:00-23:59 already counts as the following day (早晚子时 split).
    NextDay,
}

/// Configuration shared by the chart engines.
///
/// The defaults reproduce the fixed approximations of the engine: the year
/// pillar turns over on February 4th, hour 23 stays on the civil day, and
/// March through August is Yang Dun.
///
/// # Example
///
/// ```
/// use ganzhi::{EngineConfig, ZiHourRule};
///
/// let config = EngineConfig::new()
///     .with_spring_boundary_day(5)
///     .with_zi_hour_rule(ZiHourRule::NextDay);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// February day on which the year pillar advances (立春 approximation).
    spring_boundary_day: u8,
    /// Day assignment for the late 子 hour.
    zi_hour_rule:        ZiHourRule,
    /// Inclusive month window treated as Yang Dun by the Qimen engine.
    yang_dun_months:     (u8, u8),
}

impl EngineConfig {
    /// Creates the default configuration.
    pub const fn new() -> Self {
        Self {
            spring_boundary_day: DEFAULT_SPRING_BOUNDARY_DAY,
            zi_hour_rule:        ZiHourRule::SameDay,
            yang_dun_months:     (3, 8),
        }
    }

    /// Sets the February day on which the year pillar advances.
    pub const fn with_spring_boundary_day(mut self, day: u8) -> Self {
        self.spring_boundary_day = day;
        self
    }

    /// Sets the day assignment for the 23:00 hour.
    pub const fn with_zi_hour_rule(mut self, rule: ZiHourRule) -> Self {
        self.zi_hour_rule = rule;
        self
    }

    /// Sets the inclusive Yang Dun month window.
    pub const fn with_yang_dun_months(mut self, first: u8, last: u8) -> Self {
        self.yang_dun_months = (first, last);
        self
    }

    pub const fn spring_boundary_day(&self) -> u8 {
        self.spring_boundary_day
    }

    pub const fn zi_hour_rule(&self) -> ZiHourRule {
        self.zi_hour_rule
    }

    pub const fn yang_dun_months(&self) -> (u8, u8) {
        self.yang_dun_months
    }

    /// Whether `month` falls in the Yang Dun window.
    pub const fn is_yang_dun_month(&self, month: u8) -> bool {
        let (first, last) = self.yang_dun_months;
        month >= first && month <= last
    }

    /// Validates this configuration.
    ///
    /// # Errors
    /// Returns `DivinationError::InvalidConfig` if the boundary day is not
    /// 3-5 or the Yang Dun window is not an ordered pair of months.
    pub fn validate(&self) -> Result<(), DivinationError> {
        if !(3..=5).contains(&self.spring_boundary_day) {
            return Err(DivinationError::InvalidConfig(format!(
                "spring_boundary_day must be 3-5, got {}",
                self.spring_boundary_day
            )));
        }
        let (first, last) = self.yang_dun_months;
        if first == 0 || last > MAX_MONTH || first > last {
            return Err(DivinationError::InvalidConfig(format!(
                "yang_dun_months must satisfy 1 <= first <= last <= {MAX_MONTH}, got ({first}, {last})"
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
