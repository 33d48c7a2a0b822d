//! The eight trigrams (八卦) in Earlier Heaven order.

use crate::prelude::*;
use crate::wuxing::Element;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Trigram {
    #[display(fmt = "乾")]
    #[serde(rename = "乾")]
    Qian,
    #[display(fmt = "兑")]
    #[serde(rename = "兑")]
    Dui,
    #[display(fmt = "离")]
    #[serde(rename = "离")]
    Li,
    #[display(fmt = "震")]
    #[serde(rename = "震")]
    Zhen,
    #[display(fmt = "巽")]
    #[serde(rename = "巽")]
    Xun,
    #[display(fmt = "坎")]
    #[serde(rename = "坎")]
    Kan,
    #[display(fmt = "艮")]
    #[serde(rename = "艮")]
    Gen,
    #[display(fmt = "坤")]
    #[serde(rename = "坤")]
    Kun,
}

impl Trigram {
    /// Earlier Heaven order, numbered 1 (乾) through 8 (坤).
    pub const ALL: [Self; 8] = [
        Self::Qian,
        Self::Dui,
        Self::Li,
        Self::Zhen,
        Self::Xun,
        Self::Kan,
        Self::Gen,
        Self::Kun,
    ];

    /// Trigram for a casting sum: the remainder mod 8, with 0 read as 8.
    pub const fn from_number(n: u32) -> Self {
        match n % 8 {
            0 => Self::Kun,
            r => Self::ALL[(r - 1) as usize],
        }
    }

    pub const fn element(self) -> Element {
        match self {
            Self::Qian | Self::Dui => Element::Metal,
            Self::Li => Element::Fire,
            Self::Zhen | Self::Xun => Element::Wood,
            Self::Kan => Element::Water,
            Self::Gen | Self::Kun => Element::Earth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_number_wraps_zero_to_kun() {
        assert_eq!(Trigram::from_number(1), Trigram::Qian);
        assert_eq!(Trigram::from_number(7), Trigram::Gen);
        assert_eq!(Trigram::from_number(8), Trigram::Kun);
        assert_eq!(Trigram::from_number(0), Trigram::Kun);
        assert_eq!(Trigram::from_number(9), Trigram::Qian);
    }

    #[test]
    fn test_elements() {
        let elements: String = Trigram::ALL.iter().map(|t| t.element().to_string()).collect();
        assert_eq!(elements, "金金火木木水土土");
    }
}
