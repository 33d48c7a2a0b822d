//! Bazi (八字) chart: four pillars, element balance and the fixed reading.

use crate::calendar::LunarDate;
use crate::config::EngineConfig;
use crate::error::DivinationError;
use crate::event::{BirthEvent, Gender};
use crate::ganzhi::Stem;
use crate::narrative;
use crate::pillars::FourPillars;
use crate::types::SolarDate;
use crate::wuxing::{Element, ElementCount, HasElement, PillarElements, ShiShen, StrengthBuckets, ten_god};
use serde::Serialize;
use tracing::{debug, debug_span};

/// Ten-god relation of each non-day pillar stem to the day master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PillarShiShen {
    pub year:  ShiShen,
    pub month: ShiShen,
    pub hour:  ShiShen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PillarElementSet {
    pub year:  PillarElements,
    pub month: PillarElements,
    pub day:   PillarElements,
    pub hour:  PillarElements,
}

impl PillarElementSet {
    fn of(pillars: &FourPillars) -> Self {
        Self {
            year:  PillarElements::of(pillars.year),
            month: PillarElements::of(pillars.month),
            day:   PillarElements::of(pillars.day),
            hour:  PillarElements::of(pillars.hour),
        }
    }
}

/// Favorable (喜用) and unfavorable (忌) elements for a day master.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementBalance {
    pub favorable:   Vec<Element>,
    pub unfavorable: Vec<Element>,
}

impl ElementBalance {
    /// A strong day master wants outflow: what it feeds, what restrains it
    /// and what it restrains. A weak one wants support from its own element
    /// and its generator, and avoids its restrainer.
    pub fn for_day_master(day_element: Element, is_strong: bool) -> Self {
        if is_strong {
            Self {
                favorable:   vec![day_element.generates(), day_element.overcome_by(), day_element.overcomes()],
                unfavorable: vec![day_element, day_element.generated_by()],
            }
        } else {
            Self {
                favorable:   vec![day_element, day_element.generated_by()],
                unfavorable: vec![day_element.overcome_by()],
            }
        }
    }
}

/// Complete Bazi chart for one birth event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaziResult {
    pub name:               String,
    pub gender:             Gender,
    pub birth_date:         String,
    pub birth_time:         String,
    pub solar_date:         SolarDate,
    pub lunar_date:         LunarDate,
    pub pillars:            FourPillars,
    pub day_master:         Stem,
    pub day_master_element: Element,
    pub shi_shen:           PillarShiShen,
    pub pillar_elements:    PillarElementSet,
    pub element_count:      ElementCount,
    pub strength:           StrengthBuckets,
    pub balance:            ElementBalance,
    pub personality:        Vec<String>,
    pub career:             Vec<String>,
    pub wealth:             Vec<String>,
    pub marriage:           Vec<String>,
    pub health:             Vec<String>,
    pub suggestions:        Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question:           Option<String>,
}

/// Computes a Bazi chart under the default configuration.
///
/// # Errors
/// Returns the calendar converter's error when the birth date falls outside
/// the lunar table, or when a lunar input date does not exist.
pub fn compute_bazi(event: &BirthEvent) -> Result<BaziResult, DivinationError> {
    compute_bazi_with(event, &EngineConfig::default())
}

/// Computes a Bazi chart under `config`.
///
/// # Errors
/// Returns `InvalidConfig` for an invalid configuration, otherwise as
/// [`compute_bazi`].
pub fn compute_bazi_with(event: &BirthEvent, config: &EngineConfig) -> Result<BaziResult, DivinationError> {
    config.validate()?;
    let (solar, lunar) = event.resolve_dates()?;
    let _span = debug_span!("compute_bazi", date = %solar, hour = event.hour().get()).entered();

    let pillars = FourPillars::compute(solar, event.hour(), config);
    let day_master = pillars.day.stem();
    let day_master_element = day_master.element();

    let element_count = ElementCount::from_pillars(&pillars);
    let strength = element_count.strength();
    let balance = ElementBalance::for_day_master(day_master_element, strength.is_strong(day_master_element));

    debug!(
        year = %pillars.year,
        month = %pillars.month,
        day = %pillars.day,
        hour = %pillars.hour,
        day_master = %day_master,
        "bazi pillars computed"
    );

    Ok(BaziResult {
        name: event.name().to_owned(),
        gender: event.gender(),
        birth_date: event.birth_date_label(),
        birth_time: event.birth_time_label(),
        solar_date: solar,
        lunar_date: lunar,
        day_master,
        day_master_element,
        shi_shen: PillarShiShen {
            year:  ten_god(day_master, pillars.year.stem()),
            month: ten_god(day_master, pillars.month.stem()),
            hour:  ten_god(day_master, pillars.hour.stem()),
        },
        pillar_elements: PillarElementSet::of(&pillars),
        personality: narrative::personality(day_master, pillars.zodiac),
        career: narrative::career(day_master, &balance.favorable),
        wealth: narrative::wealth(day_master, &balance.favorable),
        marriage: narrative::marriage(event.gender(), day_master),
        health: narrative::health(&element_count),
        suggestions: narrative::suggestions(&balance.favorable),
        question: event.question().map(str::to_owned),
        pillars,
        element_count,
        strength,
        balance,
    })
}
