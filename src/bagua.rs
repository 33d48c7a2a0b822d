//! Natal trigram (本命卦) reading cast from the birth numbers.
//!
//! Numerology over the submitted year, month and day; no calendar
//! conversion takes place, so lunar input is cast from its lunar numbers.

use crate::event::{BirthEvent, Gender};
use crate::trigram::Trigram;
use crate::wuxing::Element;
use serde::Serialize;
use tracing::{debug, debug_span};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaguaReading {
    pub name:             String,
    pub gender:           Gender,
    pub birth_date:       String,
    pub upper:            Trigram,
    pub lower:            Trigram,
    /// e.g. `震兑卦`
    pub hexagram:         String,
    pub ben_ming:         Trigram,
    pub ben_ming_element: Element,
    pub interpretation:   String,
    pub suggestions:      Vec<String>,
}

fn digit_sum(year: u16) -> u32 {
    let mut rest = u32::from(year);
    let mut sum = 0;
    while rest > 0 {
        sum += rest % 10;
        rest /= 10;
    }
    sum
}

/// Natal trigram from the birth year and gender.
pub fn ben_ming(year: u16, gender: Gender) -> Trigram {
    let cycle = year % 9;
    let index = match gender {
        Gender::Male => (11 - cycle) % 8,
        Gender::Female => (cycle + 3) % 8,
    };
    Trigram::ALL[usize::from(index)]
}

fn interpretation(upper: Trigram, lower: Trigram) -> String {
    let text = match (upper, lower) {
        (Trigram::Qian, Trigram::Qian) => "乾为天，刚健中正，自强不息",
        (Trigram::Kun, Trigram::Kun) => "坤为地，厚德载物，顺势而为",
        (Trigram::Qian, Trigram::Kun) => "天地否，闭塞不通，宜守不宜进",
        (Trigram::Kun, Trigram::Qian) => "地天泰，通泰亨通，万事顺遂",
        _ => return format!("{upper}{lower}卦，需综合分析"),
    };
    text.to_owned()
}

fn suggestions(ben_ming: Trigram) -> Vec<String> {
    let lines: [&str; 3] = match ben_ming {
        Trigram::Qian => ["适合领导岗位", "宜向西北方发展", "幸运颜色：白色、金色"],
        Trigram::Kun => ["适合辅助工作", "宜向西南方发展", "幸运颜色：黄色、棕色"],
        Trigram::Zhen => ["适合开创事业", "宜向东方发展", "幸运颜色：绿色、青色"],
        Trigram::Xun => ["适合文职工作", "宜向东南方发展", "幸运颜色：绿色"],
        Trigram::Kan => ["适合智慧型工作", "宜向北方发展", "幸运颜色：黑色、蓝色"],
        Trigram::Li => ["适合表现型工作", "宜向南方发展", "幸运颜色：红色、紫色"],
        Trigram::Gen => ["适合稳定型工作", "宜向东北方发展", "幸运颜色：黄色"],
        Trigram::Dui => ["适合交际型工作", "宜向西方发展", "幸运颜色：白色"],
    };
    lines.iter().map(|&s| s.to_owned()).collect()
}

/// Casts the natal hexagram for `event`.
pub fn compute_bagua(event: &BirthEvent) -> BaguaReading {
    let (year, month, day) = event.date_parts();
    let _span = debug_span!("compute_bagua", year, month, day).entered();

    let upper = Trigram::from_number(digit_sum(year) + u32::from(month));
    let lower = Trigram::from_number(u32::from(month) + u32::from(day));
    let ben_ming = ben_ming(year, event.gender());
    debug!(%upper, %lower, %ben_ming, "bagua cast");

    BaguaReading {
        name: event.name().to_owned(),
        gender: event.gender(),
        birth_date: event.birth_date_label(),
        upper,
        lower,
        hexagram: format!("{upper}{lower}卦"),
        ben_ming,
        ben_ming_element: ben_ming.element(),
        interpretation: interpretation(upper, lower),
        suggestions: suggestions(ben_ming),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(gender: Gender, date: (u16, u8, u8)) -> BirthEvent {
        BirthEvent::new("张三", gender, date, 0, 0, false).expect("valid event")
    }

    #[test]
    fn test_digit_sum() {
        assert_eq!(digit_sum(1990), 19);
        assert_eq!(digit_sum(2000), 2);
        assert_eq!(digit_sum(2100), 3);
    }

    #[test]
    fn test_ben_ming_by_gender() {
        assert_eq!(ben_ming(1990, Gender::Male), Trigram::Li);
        assert_eq!(ben_ming(1990, Gender::Female), Trigram::Xun);
        // 1989 % 9 == 0
        assert_eq!(ben_ming(1989, Gender::Male), Trigram::Zhen);
        assert_eq!(ben_ming(1989, Gender::Female), Trigram::Zhen);
    }

    #[test]
    fn test_reference_reading() {
        let reading = compute_bagua(&event(Gender::Male, (1990, 1, 1)));
        assert_eq!(reading.upper, Trigram::Zhen);
        assert_eq!(reading.lower, Trigram::Dui);
        assert_eq!(reading.hexagram, "震兑卦");
        assert_eq!(reading.interpretation, "震兑卦，需综合分析");
        assert_eq!(reading.ben_ming, Trigram::Li);
        assert_eq!(reading.ben_ming_element, Element::Fire);
        assert_eq!(reading.suggestions, vec!["适合表现型工作", "宜向南方发展", "幸运颜色：红色、紫色"]);
    }

    #[test]
    fn test_named_hexagrams() {
        assert_eq!(
            compute_bagua(&event(Gender::Male, (2000, 6, 3))).interpretation,
            "地天泰，通泰亨通，万事顺遂"
        );
        assert_eq!(
            compute_bagua(&event(Gender::Female, (2000, 7, 2))).interpretation,
            "乾为天，刚健中正，自强不息"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(compute_bagua(&event(Gender::Female, (1990, 1, 1)))).expect("serialize");
        assert_eq!(json["benMing"], "巽");
        assert_eq!(json["benMingElement"], "木");
        assert_eq!(json["gender"], "female");
    }
}
