//! Qimen Dunjia (奇门遁甲) nine-palace chart.
//!
//! The chart uses its own simplified day and hour stems rather than the
//! Bazi pillars, then lays stars, doors, spirits and stems over the Luoshu
//! grid by rotating fixed lists from an offset derived from the Ju number.

use crate::config::EngineConfig;
use crate::error::DivinationError;
use crate::event::{BirthEvent, Gender};
use crate::ganzhi::{Branch, GanZhi, Stem};
use crate::prelude::*;
use crate::types::Hour;
use serde::Serialize;
use tracing::{debug, debug_span};

/// Yang Dun rotates forward through the palaces, Yin Dun backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum DunType {
    #[display(fmt = "阳")]
    #[serde(rename = "阳")]
    Yang,
    #[display(fmt = "阴")]
    #[serde(rename = "阴")]
    Yin,
}

impl DunType {
    const fn step(self) -> i64 {
        match self {
            Self::Yang => 1,
            Self::Yin => -1,
        }
    }
}

/// The nine palaces, in grid order (top row first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum PalacePosition {
    #[display(fmt = "巽四")]
    #[serde(rename = "巽四")]
    Xun,
    #[display(fmt = "离九")]
    #[serde(rename = "离九")]
    Li,
    #[display(fmt = "坤二")]
    #[serde(rename = "坤二")]
    Kun,
    #[display(fmt = "震三")]
    #[serde(rename = "震三")]
    Zhen,
    #[display(fmt = "中五")]
    #[serde(rename = "中五")]
    Center,
    #[display(fmt = "兑七")]
    #[serde(rename = "兑七")]
    Dui,
    #[display(fmt = "艮八")]
    #[serde(rename = "艮八")]
    Gen,
    #[display(fmt = "坎一")]
    #[serde(rename = "坎一")]
    Kan,
    #[display(fmt = "乾六")]
    #[serde(rename = "乾六")]
    Qian,
}

impl PalacePosition {
    pub const GRID: [Self; 9] = [
        Self::Xun,
        Self::Li,
        Self::Kun,
        Self::Zhen,
        Self::Center,
        Self::Dui,
        Self::Gen,
        Self::Kan,
        Self::Qian,
    ];

    /// Luoshu magic-square number of this palace.
    pub const fn luoshu(self) -> u8 {
        match self {
            Self::Kan => 1,
            Self::Kun => 2,
            Self::Zhen => 3,
            Self::Xun => 4,
            Self::Center => 5,
            Self::Qian => 6,
            Self::Dui => 7,
            Self::Gen => 8,
            Self::Li => 9,
        }
    }

    /// Compass direction of this palace.
    pub const fn direction(self) -> &'static str {
        match self {
            Self::Kan => "正北",
            Self::Kun => "西南",
            Self::Zhen => "正东",
            Self::Xun => "东南",
            Self::Center => "中央",
            Self::Qian => "西北",
            Self::Dui => "正西",
            Self::Gen => "东北",
            Self::Li => "正南",
        }
    }
}

/// The eight doors (八门).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Door {
    #[display(fmt = "开门")]
    #[serde(rename = "开门")]
    Open,
    #[display(fmt = "休门")]
    #[serde(rename = "休门")]
    Rest,
    #[display(fmt = "生门")]
    #[serde(rename = "生门")]
    Life,
    #[display(fmt = "伤门")]
    #[serde(rename = "伤门")]
    Harm,
    #[display(fmt = "杜门")]
    #[serde(rename = "杜门")]
    Block,
    #[display(fmt = "景门")]
    #[serde(rename = "景门")]
    View,
    #[display(fmt = "死门")]
    #[serde(rename = "死门")]
    Death,
    #[display(fmt = "惊门")]
    #[serde(rename = "惊门")]
    Fright,
}

impl Door {
    pub const ALL: [Self; 8] = [
        Self::Open,
        Self::Rest,
        Self::Life,
        Self::Harm,
        Self::Block,
        Self::View,
        Self::Death,
        Self::Fright,
    ];

    /// 开 休 生
    pub const fn is_auspicious(self) -> bool {
        matches!(self, Self::Open | Self::Rest | Self::Life)
    }

    /// 死 惊
    pub const fn is_ominous(self) -> bool {
        matches!(self, Self::Death | Self::Fright)
    }

    /// Doors whose direction should be avoided: 死 惊 伤.
    pub const fn is_adverse(self) -> bool {
        matches!(self, Self::Death | Self::Fright | Self::Harm)
    }
}

/// The nine stars (九星).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Star {
    #[display(fmt = "天蓬")]
    #[serde(rename = "天蓬")]
    Peng,
    #[display(fmt = "天任")]
    #[serde(rename = "天任")]
    Ren,
    #[display(fmt = "天冲")]
    #[serde(rename = "天冲")]
    Chong,
    #[display(fmt = "天辅")]
    #[serde(rename = "天辅")]
    Fu,
    #[display(fmt = "天英")]
    #[serde(rename = "天英")]
    Ying,
    #[display(fmt = "天芮")]
    #[serde(rename = "天芮")]
    Rui,
    #[display(fmt = "天柱")]
    #[serde(rename = "天柱")]
    Zhu,
    #[display(fmt = "天心")]
    #[serde(rename = "天心")]
    Xin,
    #[display(fmt = "天禽")]
    #[serde(rename = "天禽")]
    Qin,
}

impl Star {
    pub const ALL: [Self; 9] = [
        Self::Peng,
        Self::Ren,
        Self::Chong,
        Self::Fu,
        Self::Ying,
        Self::Rui,
        Self::Zhu,
        Self::Xin,
        Self::Qin,
    ];
}

/// The eight spirits (八神).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Spirit {
    #[display(fmt = "值符")]
    #[serde(rename = "值符")]
    ChiefTally,
    #[display(fmt = "螣蛇")]
    #[serde(rename = "螣蛇")]
    Serpent,
    #[display(fmt = "太阴")]
    #[serde(rename = "太阴")]
    GreatYin,
    #[display(fmt = "六合")]
    #[serde(rename = "六合")]
    SixHarmony,
    #[display(fmt = "白虎")]
    #[serde(rename = "白虎")]
    WhiteTiger,
    #[display(fmt = "玄武")]
    #[serde(rename = "玄武")]
    BlackTortoise,
    #[display(fmt = "九地")]
    #[serde(rename = "九地")]
    NineEarth,
    #[display(fmt = "九天")]
    #[serde(rename = "九天")]
    NineHeaven,
}

impl Spirit {
    pub const ALL: [Self; 8] = [
        Self::ChiefTally,
        Self::Serpent,
        Self::GreatYin,
        Self::SixHarmony,
        Self::WhiteTiger,
        Self::BlackTortoise,
        Self::NineEarth,
        Self::NineHeaven,
    ];
}

/// Six instruments followed by the three wonders (六仪三奇).
const YI_QI: [Stem; 9] = [
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
];

/// The three wonders 乙 丙 丁.
const fn is_wonder(stem: Stem) -> bool {
    matches!(stem, Stem::Yi | Stem::Bing | Stem::Ding)
}

/// Heads of the six decades (旬首).
const XUN_SHOU: [GanZhi; 6] = [
    GanZhi::from_cycle(0),
    GanZhi::from_cycle(10),
    GanZhi::from_cycle(20),
    GanZhi::from_cycle(30),
    GanZhi::from_cycle(40),
    GanZhi::from_cycle(50),
];

/// Readings of Ju 1 through 9.
const JU_DESCRIPTIONS: [&str; 9] = [
    "一局主水，利于流动、变化之事",
    "二局主土，利于稳定、奠基之事",
    "三局主木，利于生长、发展之事",
    "四局主木，利于文职、协商之事",
    "五局主土，居于中央，诸事皆需平衡",
    "六局主金，利于决断、执法之事",
    "七局主金，利于交际、合作之事",
    "八局主土，利于守成、积蓄之事",
    "九局主火，利于展示、推广之事",
];

/// One cell of the nine-palace grid. The center carries no door or spirit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palace {
    pub position: PalacePosition,
    pub number:   u8,
    pub door:     Option<Door>,
    pub star:     Star,
    pub spirit:   Option<Spirit>,
    pub stem:     Stem,
}

/// Day and hour stems and branches as the Qimen chart counts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QimenClock {
    pub day_stem:    Stem,
    pub day_branch:  Branch,
    pub hour_stem:   Stem,
    pub hour_branch: Branch,
}

impl QimenClock {
    /// Seeds the clock from the date numbers as submitted, solar or lunar.
    pub fn new((year, month, day): (u16, u8, u8), hour: Hour) -> Self {
        let (y, m, d) = (i64::from(year), i64::from(month), i64::from(day));
        let day_stem = Stem::from_index(5 * y + 30 * m + d);
        let hour_stem = Stem::from_index(5 * i64::from(day_stem.index()) + i64::from(hour.get() / 2));
        Self {
            day_stem,
            day_branch: Branch::from_index(y + m + d),
            hour_stem,
            hour_branch: Branch::for_hour(hour),
        }
    }

    /// Head of the decade (旬首) for the day, selected by the stem-branch
    /// gap modulo six.
    ///
    /// The simplified clock can pair a stem and branch of opposite parity,
    /// so the gap is not always even.
    pub const fn xun_shou(&self) -> GanZhi {
        let gap = (self.day_stem.index() as i64 - self.day_branch.index() as i64).rem_euclid(12);
        XUN_SHOU[(gap % 6) as usize]
    }

    /// Ju number in `1..=9` from the day branch and stem.
    pub const fn ju(&self) -> u8 {
        let ju = self.day_branch.index() % 9 + 1 + self.day_stem.index() / 2;
        if ju > 9 { ju - 9 } else { ju }
    }
}

/// Lays out the nine palaces for `ju` under `dun`, seeding stems from the
/// hour stem.
pub fn arrange_palaces(ju: u8, dun: DunType, hour_stem: Stem) -> [Palace; 9] {
    let origin = i64::from(ju) - 1;
    let step = dun.step();
    let mut outer = 0i64;

    std::array::from_fn(|i| {
        let position = PalacePosition::GRID[i];
        let i = i as i64;
        let (door, spirit) = if position == PalacePosition::Center {
            (None, None)
        } else {
            let k = outer;
            outer += 1;
            (
                Some(Door::ALL[(origin + k * step).rem_euclid(8) as usize]),
                Some(Spirit::ALL[(k * step).rem_euclid(8) as usize]),
            )
        };
        Palace {
            position,
            number: position.luoshu(),
            door,
            star: Star::ALL[(origin + i * step).rem_euclid(9) as usize],
            spirit,
            stem: YI_QI[(i64::from(hour_stem.index()) + i).rem_euclid(9) as usize],
        }
    })
}

/// Wonders (乙丙丁) sitting on auspicious doors (三奇得使).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreeWonders {
    pub has:         bool,
    pub description: String,
}

impl ThreeWonders {
    pub fn find(palaces: &[Palace]) -> Self {
        let matches: Vec<String> = palaces
            .iter()
            .filter_map(|p| match p.door {
                Some(door) if door.is_auspicious() && is_wonder(p.stem) => {
                    Some(format!("{}宫{}加{}", p.position, p.stem, door))
                },
                _ => None,
            })
            .collect();
        if matches.is_empty() {
            Self {
                has:         false,
                description: "无三奇得使".to_owned(),
            }
        } else {
            Self {
                has:         true,
                description: format!("三奇得使：{}", matches.join("、")),
            }
        }
    }
}

/// Grade of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum PatternQuality {
    #[display(fmt = "上吉")]
    #[serde(rename = "上吉")]
    Superb,
    #[display(fmt = "吉")]
    #[serde(rename = "吉")]
    Good,
    #[display(fmt = "中平")]
    #[serde(rename = "中平")]
    Middling,
    #[display(fmt = "平")]
    #[serde(rename = "平")]
    Plain,
}

/// Named stem combinations (格局), checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Pattern {
    #[display(fmt = "青龙回首")]
    #[serde(rename = "青龙回首")]
    DragonTurnsHead,
    #[display(fmt = "飞鸟跌穴")]
    #[serde(rename = "飞鸟跌穴")]
    BirdFallsIntoNest,
    #[display(fmt = "龙虎相争")]
    #[serde(rename = "龙虎相争")]
    DragonTigerStrife,
    #[display(fmt = "奇仪相合")]
    #[serde(rename = "奇仪相合")]
    WonderInstrumentUnion,
    #[display(fmt = "普通格局")]
    #[serde(rename = "普通格局")]
    Ordinary,
}

impl Pattern {
    pub const fn quality(self) -> PatternQuality {
        match self {
            Self::DragonTurnsHead | Self::BirdFallsIntoNest => PatternQuality::Superb,
            Self::DragonTigerStrife => PatternQuality::Middling,
            Self::WonderInstrumentUnion => PatternQuality::Good,
            Self::Ordinary => PatternQuality::Plain,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::DragonTurnsHead => "大吉之象，百事皆宜，利于求财、婚姻、出行等",
            Self::BirdFallsIntoNest => "大吉之象，利于求官、考试、经营等",
            Self::DragonTigerStrife => "中平之象，主争执竞争，需谨慎行事",
            Self::WonderInstrumentUnion => "吉象，主合作、和谐、贵人相助",
            Self::Ordinary => "无特殊格局，需综合分析其他因素",
        }
    }

    /// First pattern matching the day and hour stems.
    pub const fn detect(day: Stem, hour: Stem) -> Self {
        match (day, hour) {
            (Stem::Xin, Stem::Yi) => Self::DragonTurnsHead,
            (Stem::Yi, Stem::Xin) => Self::BirdFallsIntoNest,
            (Stem::Xin, Stem::Geng) => Self::DragonTigerStrife,
            (Stem::Geng, Stem::Yi) | (Stem::Xin, Stem::Bing) | (Stem::Ren, Stem::Ding) | (Stem::Gui, Stem::Wu) => {
                Self::WonderInstrumentUnion
            },
            _ => Self::Ordinary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatternReading {
    pub name:        Pattern,
    pub quality:     PatternQuality,
    pub description: &'static str,
}

impl From<Pattern> for PatternReading {
    fn from(pattern: Pattern) -> Self {
        Self {
            name:        pattern,
            quality:     pattern.quality(),
            description: pattern.description(),
        }
    }
}

/// Overall fortune of the chart (吉凶).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum AuspiceLevel {
    #[display(fmt = "大吉")]
    #[serde(rename = "大吉")]
    Great,
    #[display(fmt = "吉")]
    #[serde(rename = "吉")]
    Good,
    #[display(fmt = "中平")]
    #[serde(rename = "中平")]
    Mixed,
    #[display(fmt = "凶")]
    #[serde(rename = "凶")]
    Bad,
}

impl AuspiceLevel {
    /// Grades from the pattern quality and the count of auspicious (开休生)
    /// and ominous (死惊) doors.
    pub fn assess(quality: PatternQuality, palaces: &[Palace]) -> Self {
        let doors = palaces.iter().filter_map(|p| p.door);
        let good = doors.clone().filter(|d| d.is_auspicious()).count();
        let bad = doors.filter(|d| d.is_ominous()).count();

        match quality {
            PatternQuality::Superb => Self::Great,
            _ if good >= 3 => Self::Great,
            PatternQuality::Good => Self::Good,
            _ if good >= 2 => Self::Good,
            PatternQuality::Middling => Self::Mixed,
            _ if good == 1 && bad <= 1 => Self::Mixed,
            _ => Self::Bad,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Great => "吉利之象，百事顺遂，可积极进取",
            Self::Good => "吉利之象，可以行动，但需谨慎",
            Self::Mixed => "吉凶参半，需根据具体情况判断",
            Self::Bad => "不利之象，宜静不宜动，宜守不宜攻",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuspiceReading {
    pub level:       AuspiceLevel,
    pub description: &'static str,
}

/// Favorable and unfavorable items of one kind of advice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub favorable:   Vec<String>,
    pub unfavorable: Vec<String>,
}

impl Advice {
    /// Directions of palaces holding auspicious and adverse doors.
    pub fn directions(palaces: &[Palace]) -> Self {
        let pick = |keep: fn(Door) -> bool| {
            palaces
                .iter()
                .filter(|p| p.door.is_some_and(keep))
                .map(|p| p.position.direction().to_owned())
                .collect::<Vec<_>>()
        };
        Self {
            favorable:   pick(Door::is_auspicious),
            unfavorable: pick(Door::is_adverse),
        }
    }

    /// Reading of the hour stem and branch.
    pub fn timing(hour_stem: Stem, hour_branch: Branch) -> Self {
        let mut advice = Self::default();
        match hour_stem {
            Stem::Jia | Stem::Yi | Stem::Bing | Stem::Ding | Stem::Wu => {
                advice.favorable.push("当前时辰吉利".to_owned());
            },
            Stem::Geng | Stem::Xin | Stem::Ren | Stem::Gui => {
                advice.unfavorable.push("当前时辰不利".to_owned());
            },
            Stem::Ji => {},
        }
        match hour_branch {
            Branch::Zi | Branch::Yin | Branch::Mao | Branch::Wu => {
                advice.favorable.push(format!("{hour_branch}时较为吉利"));
            },
            Branch::Chou | Branch::Shen | Branch::You => {
                advice.unfavorable.push(format!("{hour_branch}时需要谨慎"));
            },
            _ => {},
        }
        advice
    }
}

fn suggestions(quality: PatternQuality, level: AuspiceLevel, directions: &Advice) -> Vec<String> {
    let by_quality = match quality {
        PatternQuality::Superb => ["当前格局大吉，可以大胆行动", "宜积极进取，把握良机"],
        PatternQuality::Good => ["当前格局吉利，可以行动", "宜稳中求进，谨慎而为"],
        PatternQuality::Middling => ["当前格局一般，需谨慎决策", "宜观察时机，不宜冒进"],
        PatternQuality::Plain => ["当前格局不利，宜静待时机", "宜守不宜攻，不宜做重大决策"],
    };
    let by_level = match level {
        AuspiceLevel::Great | AuspiceLevel::Good => "此为吉利之象，可以进行重要活动",
        AuspiceLevel::Mixed => "吉凶参半，需根据具体情况判断",
        AuspiceLevel::Bad => "此为不利之象，宜低调行事",
    };

    let mut lines: Vec<String> = by_quality.iter().map(|&s| s.to_owned()).collect();
    lines.push(by_level.to_owned());
    if !directions.favorable.is_empty() {
        lines.push(format!("吉门在：{}", directions.favorable.join("、")));
    }
    lines
}

/// Complete Qimen chart for one birth event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QimenResult {
    pub name:           String,
    pub gender:         Gender,
    pub birth_date:     String,
    pub birth_time:     String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question:       Option<String>,
    pub clock:          QimenClock,
    pub dun:            DunType,
    pub ju:             u8,
    /// e.g. `阳遁3局`
    pub ju_name:        String,
    pub ju_description: String,
    pub xun_shou:       GanZhi,
    /// e.g. `甲子遁`
    pub dun_jia:        String,
    pub palaces:        [Palace; 9],
    pub three_wonders:  ThreeWonders,
    pub pattern:        PatternReading,
    pub auspice:        AuspiceReading,
    pub directions:     Advice,
    pub timing:         Advice,
    pub suggestions:    Vec<String>,
}

/// Computes a Qimen chart under the default configuration.
///
/// The chart works on the submitted date numbers without calendar
/// conversion, so lunar input is never checked against the lunar table.
///
/// # Errors
/// None under the default configuration; see [`compute_qimen_with`].
pub fn compute_qimen(event: &BirthEvent) -> Result<QimenResult, DivinationError> {
    compute_qimen_with(event, &EngineConfig::default())
}

/// Computes a Qimen chart under `config`.
///
/// # Errors
/// Returns `InvalidConfig` for an invalid configuration.
pub fn compute_qimen_with(event: &BirthEvent, config: &EngineConfig) -> Result<QimenResult, DivinationError> {
    config.validate()?;
    let (year, month, day) = event.date_parts();
    let _span = debug_span!("compute_qimen", year, month, day, hour = event.hour().get(), lunar = event.is_lunar())
        .entered();

    let clock = QimenClock::new((year, month, day), event.hour());
    let dun = if config.is_yang_dun_month(month) {
        DunType::Yang
    } else {
        DunType::Yin
    };
    let ju = clock.ju();
    let xun_shou = clock.xun_shou();
    let palaces = arrange_palaces(ju, dun, clock.hour_stem);

    let pattern = Pattern::detect(clock.day_stem, clock.hour_stem);
    let level = AuspiceLevel::assess(pattern.quality(), &palaces);
    let directions = Advice::directions(&palaces);

    debug!(%dun, ju, %xun_shou, %pattern, %level, "qimen chart laid out");

    Ok(QimenResult {
        name: event.name().to_owned(),
        gender: event.gender(),
        birth_date: event.birth_date_label(),
        birth_time: event.birth_time_label(),
        question: event.question().map(str::to_owned),
        clock,
        dun,
        ju,
        ju_name: format!("{dun}遁{ju}局"),
        ju_description: format!("{dun}遁{ju}局：{}", JU_DESCRIPTIONS[usize::from(ju - 1)]),
        xun_shou,
        dun_jia: format!("{xun_shou}遁"),
        three_wonders: ThreeWonders::find(&palaces),
        pattern: pattern.into(),
        auspice: AuspiceReading {
            level,
            description: level.description(),
        },
        timing: Advice::timing(clock.hour_stem, clock.hour_branch),
        suggestions: suggestions(pattern.quality(), level, &directions),
        directions,
        palaces,
    })
}
