//! Heavenly stems, earthly branches and the sexagenary cycle they form.

use crate::consts::{BRANCH_COUNT, SEXAGENARY_CYCLE, STEM_COUNT};
use crate::error::ParseError;
use crate::prelude::*;
use crate::types::Hour;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The ten heavenly stems (天干), in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum Stem {
    #[display(fmt = "甲")]
    #[serde(rename = "甲")]
    Jia,
    #[display(fmt = "乙")]
    #[serde(rename = "乙")]
    Yi,
    #[display(fmt = "丙")]
    #[serde(rename = "丙")]
    Bing,
    #[display(fmt = "丁")]
    #[serde(rename = "丁")]
    Ding,
    #[display(fmt = "戊")]
    #[serde(rename = "戊")]
    Wu,
    #[display(fmt = "己")]
    #[serde(rename = "己")]
    Ji,
    #[display(fmt = "庚")]
    #[serde(rename = "庚")]
    Geng,
    #[display(fmt = "辛")]
    #[serde(rename = "辛")]
    Xin,
    #[display(fmt = "壬")]
    #[serde(rename = "壬")]
    Ren,
    #[display(fmt = "癸")]
    #[serde(rename = "癸")]
    Gui,
}

impl Stem {
    pub const ALL: [Self; 10] = [
        Self::Jia,
        Self::Yi,
        Self::Bing,
        Self::Ding,
        Self::Wu,
        Self::Ji,
        Self::Geng,
        Self::Xin,
        Self::Ren,
        Self::Gui,
    ];

    /// Position in the cycle, `0..10`
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Stem at `index`, wrapping any integer (including negatives) into `0..10`.
    pub const fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(STEM_COUNT as i64) as usize]
    }

    /// Odd-numbered stems (甲丙戊庚壬) are yang.
    pub const fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    /// Parses the single Chinese character for a stem.
    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.to_string().starts_with(c))
    }
}

/// The twelve earthly branches (地支), in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum Branch {
    #[display(fmt = "子")]
    #[serde(rename = "子")]
    Zi,
    #[display(fmt = "丑")]
    #[serde(rename = "丑")]
    Chou,
    #[display(fmt = "寅")]
    #[serde(rename = "寅")]
    Yin,
    #[display(fmt = "卯")]
    #[serde(rename = "卯")]
    Mao,
    #[display(fmt = "辰")]
    #[serde(rename = "辰")]
    Chen,
    #[display(fmt = "巳")]
    #[serde(rename = "巳")]
    Si,
    #[display(fmt = "午")]
    #[serde(rename = "午")]
    Wu,
    #[display(fmt = "未")]
    #[serde(rename = "未")]
    Wei,
    #[display(fmt = "申")]
    #[serde(rename = "申")]
    Shen,
    #[display(fmt = "酉")]
    #[serde(rename = "酉")]
    You,
    #[display(fmt = "戌")]
    #[serde(rename = "戌")]
    Xu,
    #[display(fmt = "亥")]
    #[serde(rename = "亥")]
    Hai,
}

impl Branch {
    pub const ALL: [Self; 12] = [
        Self::Zi,
        Self::Chou,
        Self::Yin,
        Self::Mao,
        Self::Chen,
        Self::Si,
        Self::Wu,
        Self::Wei,
        Self::Shen,
        Self::You,
        Self::Xu,
        Self::Hai,
    ];

    /// Position in the cycle, `0..12`
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Branch at `index`, wrapping any integer (including negatives) into `0..12`.
    pub const fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(BRANCH_COUNT as i64) as usize]
    }

    /// Two-hour block containing `hour`. 23:00 opens the 子 block, so it
    /// shares a branch with 00:00.
    pub const fn for_hour(hour: Hour) -> Self {
        Self::from_index((hour.get() as i64 + 1) / 2)
    }

    /// Zodiac animal (生肖) of this branch
    pub const fn zodiac(self) -> Zodiac {
        Zodiac::ALL[self.index() as usize]
    }

    /// Parses the single Chinese character for a branch.
    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.to_string().starts_with(c))
    }
}

/// Zodiac animals (生肖), aligned with [`Branch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Zodiac {
    #[display(fmt = "鼠")]
    #[serde(rename = "鼠")]
    Rat,
    #[display(fmt = "牛")]
    #[serde(rename = "牛")]
    Ox,
    #[display(fmt = "虎")]
    #[serde(rename = "虎")]
    Tiger,
    #[display(fmt = "兔")]
    #[serde(rename = "兔")]
    Rabbit,
    #[display(fmt = "龙")]
    #[serde(rename = "龙")]
    Dragon,
    #[display(fmt = "蛇")]
    #[serde(rename = "蛇")]
    Snake,
    #[display(fmt = "马")]
    #[serde(rename = "马")]
    Horse,
    #[display(fmt = "羊")]
    #[serde(rename = "羊")]
    Goat,
    #[display(fmt = "猴")]
    #[serde(rename = "猴")]
    Monkey,
    #[display(fmt = "鸡")]
    #[serde(rename = "鸡")]
    Rooster,
    #[display(fmt = "狗")]
    #[serde(rename = "狗")]
    Dog,
    #[display(fmt = "猪")]
    #[serde(rename = "猪")]
    Pig,
}

impl Zodiac {
    pub const ALL: [Self; 12] = [
        Self::Rat,
        Self::Ox,
        Self::Tiger,
        Self::Rabbit,
        Self::Dragon,
        Self::Snake,
        Self::Horse,
        Self::Goat,
        Self::Monkey,
        Self::Rooster,
        Self::Dog,
        Self::Pig,
    ];
}

/// A stem-branch pair (干支).
///
/// Only the 60 pairs whose stem and branch share parity exist; the
/// constructors preserve that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{stem}{branch}")]
pub struct GanZhi {
    stem:   Stem,
    branch: Branch,
}

impl GanZhi {
    /// 甲子, the first pair of the cycle
    pub const JIA_ZI: Self = Self::from_cycle(0);

    /// Pairs a stem with a branch. Returns `None` when their parities differ.
    pub const fn new(stem: Stem, branch: Branch) -> Option<Self> {
        if stem.index() % 2 == branch.index() % 2 {
            Some(Self { stem, branch })
        } else {
            None
        }
    }

    /// The `n`-th pair of the cycle, wrapping modulo 60.
    pub const fn from_cycle(n: i64) -> Self {
        Self {
            stem:   Stem::from_index(n),
            branch: Branch::from_index(n),
        }
    }

    /// Builds a pair from a stem and branch offset that advance in lockstep.
    ///
    /// Callers pass indices with matching parity; the assertion guards the
    /// arithmetic in debug builds.
    pub(crate) const fn from_indices(stem: i64, branch: i64) -> Self {
        debug_assert!(stem.rem_euclid(2) == branch.rem_euclid(2));
        Self {
            stem:   Stem::from_index(stem),
            branch: Branch::from_index(branch),
        }
    }

    pub const fn stem(self) -> Stem {
        self.stem
    }

    pub const fn branch(self) -> Branch {
        self.branch
    }

    /// Position in the 60-pair cycle (甲子 = 0).
    pub const fn cycle_index(self) -> u8 {
        let n = 6 * self.stem.index() as i64 - 5 * self.branch.index() as i64;
        n.rem_euclid(SEXAGENARY_CYCLE as i64) as u8
    }

    /// Next pair in the cycle
    pub const fn succ(self) -> Self {
        Self::from_cycle(self.cycle_index() as i64 + 1)
    }
}

impl FromStr for GanZhi {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let pair = match (chars.next(), chars.next(), chars.next()) {
            (Some(s), Some(b), None) => Stem::from_char(s).zip(Branch::from_char(b)),
            _ => None,
        };
        pair.and_then(|(stem, branch)| Self::new(stem, branch))
            .ok_or_else(|| ParseError::InvalidFormat(trimmed.to_owned()))
    }
}

impl Serialize for GanZhi {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for GanZhi {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Chinese double-hour (时辰) name, e.g. 子时.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[display(fmt = "{_0}时")]
#[serde(into = "String")]
pub struct ShiChen(Branch);

impl ShiChen {
    pub const fn from_hour(hour: Hour) -> Self {
        Self(Branch::for_hour(hour))
    }

    pub const fn branch(self) -> Branch {
        self.0
    }
}

impl From<ShiChen> for String {
    fn from(shichen: ShiChen) -> Self {
        shichen.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hour(h: u8) -> Hour {
        Hour::new(h).expect("valid hour")
    }

    #[test]
    fn test_from_index_wraps_negatives() {
        assert_eq!(Stem::from_index(-1), Stem::Gui);
        assert_eq!(Stem::from_index(10), Stem::Jia);
        assert_eq!(Branch::from_index(-1), Branch::Hai);
        assert_eq!(Branch::from_index(25), Branch::Chou);
    }

    #[test]
    fn test_display_names() {
        let stems: String = Stem::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(stems, "甲乙丙丁戊己庚辛壬癸");
        let branches: String = Branch::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(branches, "子丑寅卯辰巳午未申酉戌亥");
        let animals: String = Zodiac::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(animals, "鼠牛虎兔龙蛇马羊猴鸡狗猪");
    }

    #[test]
    fn test_from_char() {
        assert_eq!(Stem::from_char('庚'), Some(Stem::Geng));
        assert_eq!(Branch::from_char('戌'), Some(Branch::Xu));
        assert_eq!(Stem::from_char('子'), None);
    }

    #[test]
    fn test_new_enforces_parity() {
        assert!(GanZhi::new(Stem::Jia, Branch::Zi).is_some());
        assert!(GanZhi::new(Stem::Jia, Branch::Chou).is_none());
        assert!(GanZhi::new(Stem::Yi, Branch::Chou).is_some());
    }

    #[test]
    fn test_cycle_index_inverts_from_cycle() {
        for n in 0..60 {
            assert_eq!(GanZhi::from_cycle(n).cycle_index(), n as u8);
        }
        assert_eq!(GanZhi::from_cycle(60), GanZhi::JIA_ZI);
        assert_eq!(GanZhi::from_cycle(-1).to_string(), "癸亥");
    }

    #[test]
    fn test_known_cycle_positions() {
        let jia_xu: GanZhi = "甲戌".parse().expect("甲戌");
        assert_eq!(jia_xu.cycle_index(), 10);
        let wu_wu: GanZhi = "戊午".parse().expect("戊午");
        assert_eq!(wu_wu.cycle_index(), 54);
        assert_eq!(GanZhi::from_cycle(59).succ(), GanZhi::JIA_ZI);
    }

    #[test]
    fn test_sixty_distinct_pairs() {
        let mut seen = std::collections::HashSet::new();
        for n in 0..60 {
            assert!(seen.insert(GanZhi::from_cycle(n)));
        }
        assert_eq!(seen.len(), 60);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("甲丑".parse::<GanZhi>().is_err());
        assert!("甲".parse::<GanZhi>().is_err());
        assert!("甲子子".parse::<GanZhi>().is_err());
        assert!("ab".parse::<GanZhi>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let pair: GanZhi = "庚午".parse().expect("庚午");
        let json = serde_json::to_string(&pair).expect("serialize");
        assert_eq!(json, r#""庚午""#);
        let back: GanZhi = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, pair);
        assert!(serde_json::from_str::<GanZhi>(r#""庚未""#).is_err());
        assert_eq!(serde_json::to_string(&Stem::Xin).expect("stem"), r#""辛""#);
    }

    #[test]
    fn test_hour_blocks() {
        struct TestCase {
            hour:   u8,
            branch: Branch,
        }

        let cases = [
            TestCase { hour: 23, branch: Branch::Zi },
            TestCase { hour: 0, branch: Branch::Zi },
            TestCase { hour: 1, branch: Branch::Chou },
            TestCase { hour: 2, branch: Branch::Chou },
            TestCase { hour: 11, branch: Branch::Wu },
            TestCase { hour: 12, branch: Branch::Wu },
            TestCase { hour: 22, branch: Branch::Hai },
        ];

        for case in &cases {
            assert_eq!(Branch::for_hour(hour(case.hour)), case.branch, "hour {}", case.hour);
        }
    }

    #[test]
    fn test_shichen_names() {
        assert_eq!(ShiChen::from_hour(hour(23)).to_string(), "子时");
        assert_eq!(ShiChen::from_hour(hour(0)).to_string(), "子时");
        assert_eq!(ShiChen::from_hour(hour(13)).to_string(), "未时");
        assert_eq!(ShiChen::from_hour(hour(21)).to_string(), "亥时");
        let json = serde_json::to_string(&ShiChen::from_hour(hour(7))).expect("serialize");
        assert_eq!(json, r#""辰时""#);
    }

    #[test]
    fn test_zodiac_follows_branch() {
        assert_eq!(Branch::Zi.zodiac(), Zodiac::Rat);
        assert_eq!(Branch::Yin.zodiac(), Zodiac::Tiger);
        assert_eq!(Branch::Hai.zodiac(), Zodiac::Pig);
    }
}
