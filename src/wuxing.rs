//! Five phases (五行), their cycles, and the ten-god (十神) relations between stems.

use crate::ganzhi::{Branch, GanZhi, Stem};
use crate::pillars::FourPillars;
use crate::prelude::*;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five phases, in generating order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum Element {
    #[display(fmt = "木")]
    #[serde(rename = "木")]
    Wood,
    #[display(fmt = "火")]
    #[serde(rename = "火")]
    Fire,
    #[display(fmt = "土")]
    #[serde(rename = "土")]
    Earth,
    #[display(fmt = "金")]
    #[serde(rename = "金")]
    Metal,
    #[display(fmt = "水")]
    #[serde(rename = "水")]
    Water,
}

impl Element {
    pub const ALL: [Self; 5] = [Self::Wood, Self::Fire, Self::Earth, Self::Metal, Self::Water];

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    const fn offset(self, steps: u8) -> Self {
        Self::ALL[((self.index() + steps) % 5) as usize]
    }

    /// The phase this one feeds (木生火).
    pub const fn generates(self) -> Self {
        self.offset(1)
    }

    /// The phase this one restrains (木克土).
    pub const fn overcomes(self) -> Self {
        self.offset(2)
    }

    /// The phase that restrains this one (金克木).
    pub const fn overcome_by(self) -> Self {
        self.offset(3)
    }

    /// The phase that feeds this one (水生木).
    pub const fn generated_by(self) -> Self {
        self.offset(4)
    }
}

/// Anything with a fixed five-phase assignment.
pub trait HasElement {
    fn element(self) -> Element;
}

impl HasElement for Stem {
    fn element(self) -> Element {
        Element::ALL[(self.index() / 2) as usize]
    }
}

impl HasElement for Branch {
    fn element(self) -> Element {
        match self {
            Self::Yin | Self::Mao => Element::Wood,
            Self::Si | Self::Wu => Element::Fire,
            Self::Chou | Self::Chen | Self::Wei | Self::Xu => Element::Earth,
            Self::Shen | Self::You => Element::Metal,
            Self::Zi | Self::Hai => Element::Water,
        }
    }
}

pub fn element_of<T: HasElement>(item: T) -> Element {
    item.element()
}

/// Elements of a pillar's stem and branch.
///
/// Displays as one character when both agree (`木`), otherwise stem first
/// (`木火`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PillarElements {
    pub stem:   Element,
    pub branch: Element,
}

impl PillarElements {
    pub fn of(pillar: GanZhi) -> Self {
        Self {
            stem:   pillar.stem().element(),
            branch: pillar.branch().element(),
        }
    }
}

impl fmt::Display for PillarElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stem == self.branch {
            write!(f, "{}", self.stem)
        } else {
            write!(f, "{}{}", self.stem, self.branch)
        }
    }
}

impl Serialize for PillarElements {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Ten gods: how another stem relates to the day master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum ShiShen {
    #[display(fmt = "比肩")]
    #[serde(rename = "比肩")]
    Friend,
    #[display(fmt = "劫财")]
    #[serde(rename = "劫财")]
    RobWealth,
    #[display(fmt = "食神")]
    #[serde(rename = "食神")]
    EatingGod,
    #[display(fmt = "伤官")]
    #[serde(rename = "伤官")]
    HurtingOfficer,
    #[display(fmt = "偏财")]
    #[serde(rename = "偏财")]
    IndirectWealth,
    #[display(fmt = "正财")]
    #[serde(rename = "正财")]
    DirectWealth,
    #[display(fmt = "七杀")]
    #[serde(rename = "七杀")]
    SevenKillings,
    #[display(fmt = "正官")]
    #[serde(rename = "正官")]
    DirectOfficer,
    #[display(fmt = "偏印")]
    #[serde(rename = "偏印")]
    IndirectResource,
    #[display(fmt = "正印")]
    #[serde(rename = "正印")]
    DirectResource,
}

/// Rows are the day master, columns the other stem, both in 甲..癸 order.
const TEN_GOD_TABLE: [[ShiShen; 10]; 10] = {
    use ShiShen::{
        DirectOfficer as ZG, DirectResource as ZY, DirectWealth as ZC, EatingGod as SS, Friend as BJ,
        HurtingOfficer as SG, IndirectResource as PY, IndirectWealth as PC, RobWealth as JC, SevenKillings as QS,
    };
    [
        [BJ, JC, SS, SG, PC, ZC, QS, ZG, PY, ZY], // 甲
        [JC, BJ, SG, SS, ZC, PC, ZG, QS, ZY, PY], // 乙
        [PY, ZY, BJ, JC, SS, SG, PC, ZC, QS, ZG], // 丙
        [ZY, PY, JC, BJ, SG, SS, ZC, PC, ZG, QS], // 丁
        [QS, ZG, PY, ZY, BJ, JC, SS, SG, PC, ZC], // 戊
        [ZG, QS, ZY, PY, JC, BJ, SG, SS, ZC, PC], // 己
        [PC, ZC, QS, ZG, PY, ZY, BJ, JC, SS, SG], // 庚
        [ZC, PC, ZG, QS, ZY, PY, JC, BJ, SG, SS], // 辛
        [SS, SG, PC, ZC, QS, ZG, PY, ZY, BJ, JC], // 壬
        [SG, SS, ZC, PC, ZG, QS, ZY, PY, JC, BJ], // 癸
    ]
};

const fn invert_ten_god_table(table: &[[ShiShen; 10]; 10]) -> [[Stem; 10]; 10] {
    let mut inverse = [[Stem::Jia; 10]; 10];
    let mut day = 0;
    while day < 10 {
        let mut other = 0;
        while other < 10 {
            inverse[day][table[day][other] as usize] = Stem::ALL[other];
            other += 1;
        }
        day += 1;
    }
    inverse
}

/// For each day master, the stem holding each ten-god role.
static STEM_FOR_TEN_GOD: [[Stem; 10]; 10] = invert_ten_god_table(&TEN_GOD_TABLE);

/// Relation of `other` to the day master `day`.
pub const fn ten_god(day: Stem, other: Stem) -> ShiShen {
    TEN_GOD_TABLE[day.index() as usize][other.index() as usize]
}

/// The stem that stands in relation `role` to the day master `day`.
pub fn stem_for(day: Stem, role: ShiShen) -> Stem {
    STEM_FOR_TEN_GOD[day.index() as usize][role as usize]
}

/// Histogram of elements over the eight characters of a chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ElementCount([u8; 5]);

impl ElementCount {
    pub fn from_pillars(pillars: &FourPillars) -> Self {
        let mut count = Self::default();
        for pillar in pillars.as_array() {
            count.add(pillar.stem().element());
            count.add(pillar.branch().element());
        }
        count
    }

    fn add(&mut self, element: Element) {
        self.0[element.index() as usize] += 1;
    }

    pub const fn get(&self, element: Element) -> u8 {
        self.0[element.index() as usize]
    }

    pub fn total(&self) -> u8 {
        self.0.iter().sum()
    }

    /// `(element, count)` in 木火土金水 order.
    pub fn iter(&self) -> impl Iterator<Item = (Element, u8)> + '_ {
        Element::ALL.into_iter().map(|e| (e, self.get(e)))
    }

    /// Buckets every element by its count.
    ///
    /// Elements are visited by count, highest first, with ties kept in
    /// 木火土金水 order; each lands in exactly one bucket.
    pub fn strength(&self) -> StrengthBuckets {
        let mut ranked: Vec<(Element, u8)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        let max = ranked.first().map_or(0, |&(_, n)| n);

        let mut buckets = StrengthBuckets::default();
        for (element, n) in ranked {
            let bucket = match n {
                n if n == max && n >= 3 => &mut buckets.strongest,
                n if n >= 2 => &mut buckets.strong,
                1 => &mut buckets.weak,
                _ => &mut buckets.weakest,
            };
            bucket.push(element);
        }
        buckets
    }
}

impl Serialize for ElementCount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(Element::ALL.len()))?;
        for (element, n) in self.iter() {
            map.serialize_entry(&element, &n)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StrengthBuckets {
    pub strongest: Vec<Element>,
    pub strong:    Vec<Element>,
    pub weak:      Vec<Element>,
    pub weakest:   Vec<Element>,
}

impl StrengthBuckets {
    /// Whether `element` sits in the strongest or strong bucket.
    pub fn is_strong(&self, element: Element) -> bool {
        self.strongest.contains(&element) || self.strong.contains(&element)
    }
}
