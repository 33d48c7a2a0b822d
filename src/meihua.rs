//! Plum-blossom (梅花易数) hexagram cast from the birth moment.

use crate::event::BirthEvent;
use crate::prelude::*;
use crate::trigram::Trigram;
use serde::Serialize;
use tracing::{debug, debug_span};

/// Lines in a hexagram.
const HEXAGRAM_LINES: u32 = 6;

/// Element relation between the self (体) and matter (用) trigrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum TiYong {
    #[display(fmt = "体用比和，平稳之象")]
    #[serde(rename = "体用比和，平稳之象")]
    Harmony,
    #[display(fmt = "体生用，耗泄之象")]
    #[serde(rename = "体生用，耗泄之象")]
    TiFeedsYong,
    #[display(fmt = "用生体，得助之象")]
    #[serde(rename = "用生体，得助之象")]
    YongFeedsTi,
    /// Restraining relations are left to the reader.
    #[display(fmt = "需详细分析")]
    #[serde(rename = "需详细分析")]
    Undetermined,
}

impl TiYong {
    pub fn relate(ti: Trigram, yong: Trigram) -> Self {
        let (t, y) = (ti.element(), yong.element());
        if t == y {
            Self::Harmony
        } else if t.generates() == y {
            Self::TiFeedsYong
        } else if y.generates() == t {
            Self::YongFeedsTi
        } else {
            Self::Undetermined
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeihuaReading {
    pub name:           String,
    pub birth_date:     String,
    pub birth_time:     String,
    pub upper:          Trigram,
    pub lower:          Trigram,
    pub hexagram:       String,
    /// Moving line, `1..=6` counted from the bottom
    pub moving_line:    u8,
    pub ti:             Trigram,
    pub yong:           Trigram,
    pub relation:       TiYong,
    pub interpretation: String,
    pub suggestions:    Vec<String>,
}

/// Casts the hexagram for `event` from its submitted numbers.
pub fn compute_meihua(event: &BirthEvent) -> MeihuaReading {
    let (year, month, day) = event.date_parts();
    let hour = event.hour().get();
    let minute = event.minute().get();
    let _span = debug_span!("compute_meihua", year, month, day, hour, minute).entered();

    let date_sum = u32::from(year) + u32::from(month) + u32::from(day);
    let upper = Trigram::from_number(date_sum);
    let lower = Trigram::from_number(date_sum + u32::from(hour));
    let moving_line = match (date_sum + u32::from(hour) + u32::from(minute)) % HEXAGRAM_LINES {
        0 => 6,
        r => r as u8,
    };

    // The moving line sits in the lower trigram for lines 1-3
    let in_lower = moving_line <= 3;
    let (ti, yong) = if in_lower { (lower, upper) } else { (upper, lower) };
    let relation = TiYong::relate(ti, yong);
    debug!(%upper, %lower, moving_line, %relation, "meihua cast");

    MeihuaReading {
        name: event.name().to_owned(),
        birth_date: event.birth_date_label(),
        birth_time: event.birth_time_label(),
        upper,
        lower,
        hexagram: format!("{upper}{lower}卦"),
        moving_line,
        ti,
        yong,
        relation,
        interpretation: format!(
            "{upper}{lower}卦，动爻在第{moving_line}爻，主变化在{}卦",
            if in_lower { "下" } else { "上" }
        ),
        suggestions: vec![
            format!("体卦为{ti}，代表自身"),
            format!("用卦为{yong}，代表所问之事"),
            "宜顺势而为，不宜强求".to_owned(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Gender;

    fn event(date: (u16, u8, u8), hour: u8, minute: u8) -> BirthEvent {
        BirthEvent::new("张三", Gender::Male, date, hour, minute, false).expect("valid event")
    }

    #[test]
    fn test_relations() {
        assert_eq!(TiYong::relate(Trigram::Qian, Trigram::Dui), TiYong::Harmony);
        // metal feeds water
        assert_eq!(TiYong::relate(Trigram::Qian, Trigram::Kan), TiYong::TiFeedsYong);
        assert_eq!(TiYong::relate(Trigram::Kan, Trigram::Qian), TiYong::YongFeedsTi);
        // metal restrains wood
        assert_eq!(TiYong::relate(Trigram::Qian, Trigram::Zhen), TiYong::Undetermined);
    }

    #[test]
    fn test_moving_line_in_lower_trigram() {
        // 1990+1+1 = 1992 (坤), +8 = 2000 (坤), +30 = 2030 -> line 2
        let reading = compute_meihua(&event((1990, 1, 1), 8, 30));
        assert_eq!(reading.upper, Trigram::Kun);
        assert_eq!(reading.lower, Trigram::Kun);
        assert_eq!(reading.moving_line, 2);
        assert_eq!(reading.relation, TiYong::Harmony);
        assert_eq!(reading.interpretation, "坤坤卦，动爻在第2爻，主变化在下卦");
        assert_eq!(reading.birth_time, "08:30");
    }

    #[test]
    fn test_moving_line_in_upper_trigram() {
        // 2024+6+7 = 2037 (巽), +12 = 2049 (乾), +3 = 2052 -> line 6
        let reading = compute_meihua(&event((2024, 6, 7), 12, 3));
        assert_eq!(reading.upper, Trigram::Xun);
        assert_eq!(reading.lower, Trigram::Qian);
        assert_eq!(reading.moving_line, 6);
        assert_eq!(reading.ti, Trigram::Xun);
        assert_eq!(reading.yong, Trigram::Qian);
        assert_eq!(reading.relation, TiYong::Undetermined);
        assert_eq!(reading.interpretation, "巽乾卦，动爻在第6爻，主变化在上卦");
        assert_eq!(reading.suggestions[0], "体卦为巽，代表自身");
    }
}
