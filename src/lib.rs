//! Chinese calendrical and sexagenary divination engine.
//!
//! Converts between the Gregorian and Chinese lunar calendars (1900-2100),
//! derives the four pillars (四柱) of a birth moment, and builds Bazi (八字)
//! and Qimen Dunjia (奇门遁甲) charts from them. Natal trigram (本命卦) and
//! plum-blossom (梅花易数) castings are included as lighter readings.
//!
//! Every computation is pure: the same [`BirthEvent`] and [`EngineConfig`]
//! always produce the same result, and every result type serializes with
//! `serde`.
//!
//! ```
//! use ganzhi::{BirthEvent, Gender, compute_bazi, compute_qimen};
//!
//! let event = BirthEvent::new("张三", Gender::Male, (1990, 1, 1), 0, 0, false)?;
//!
//! let bazi = compute_bazi(&event)?;
//! assert_eq!(bazi.pillars.day.to_string(), "丙寅");
//!
//! let qimen = compute_qimen(&event)?;
//! assert_eq!(qimen.ju_name, "阴遁1局");
//! # Ok::<(), ganzhi::DivinationError>(())
//! ```

mod bagua;
mod bazi;
mod calendar;
mod config;
mod consts;
mod error;
mod event;
mod ganzhi;
mod meihua;
mod narrative;
mod pillars;
mod prelude;
mod qimen;
mod trigram;
mod types;
mod wuxing;

pub use bagua::{BaguaReading, ben_ming, compute_bagua};
pub use bazi::{BaziResult, ElementBalance, PillarElementSet, PillarShiShen, compute_bazi, compute_bazi_with};
pub use calendar::{LunarDate, LunarYearInfo, lunar_to_solar, lunar_year_info, solar_to_lunar};
pub use config::{EngineConfig, ZiHourRule};
pub use consts::*;
pub use error::{DivinationError, ParseError};
pub use event::{BirthEvent, Gender};
pub use ganzhi::{Branch, GanZhi, ShiChen, Stem, Zodiac};
pub use meihua::{MeihuaReading, TiYong, compute_meihua};
pub use pillars::{
    FourPillars, day_pillar, hour_pillar, hour_pillar_for_day, month_pillar, month_pillar_with_boundary, year_pillar,
    year_pillar_with_boundary,
};
pub use qimen::{
    Advice, AuspiceLevel, AuspiceReading, Door, DunType, Palace, PalacePosition, Pattern, PatternQuality,
    PatternReading, QimenClock, QimenResult, Spirit, Star, ThreeWonders, arrange_palaces, compute_qimen,
    compute_qimen_with,
};
pub use trigram::Trigram;
pub use types::{Hour, Minute, Month, SolarDate, Year};
pub use wuxing::{
    Element, ElementCount, HasElement, PillarElements, ShiShen, StrengthBuckets, element_of, stem_for, ten_god,
};
