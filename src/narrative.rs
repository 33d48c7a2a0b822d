//! Fixed text tables for the Bazi reading.
//!
//! Each function selects lines by key (day stem, zodiac, gender, element)
//! and does no analysis of its own.

use crate::event::Gender;
use crate::ganzhi::{Stem, Zodiac};
use crate::wuxing::{Element, ElementCount, HasElement, ShiShen, stem_for};

/// Character traits by day stem, 甲..癸.
const DAY_MASTER_TRAITS: [[&str; 4]; 10] = [
    ["正直刚毅", "进取心强", "有领导力", "有时过于固执"],
    ["温和谦逊", "善于适应", "心思细腻", "有时优柔寡断"],
    ["热情开朗", "乐于助人", "有创造力", "有时冲动急躁"],
    ["文雅有礼", "细心周到", "善于表达", "有时敏感多疑"],
    ["稳重踏实", "值得信赖", "有责任感", "有时固执保守"],
    ["包容温和", "善于协调", "脚踏实地", "有时优柔寡断"],
    ["果断坚毅", "有正义感", "讲义气", "有时过于强硬"],
    ["优雅精致", "有审美观", "善解人意", "有时过于敏感"],
    ["聪明灵活", "适应力强", "有谋略", "有时变化无常"],
    ["内敛深沉", "洞察力强", "富有同情心", "有时过于消极"],
];

/// Industries by day stem, 甲..癸.
const DAY_MASTER_CAREERS: [[&str; 4]; 10] = [
    ["企业管理", "政治", "林业", "教育"],
    ["艺术", "设计", "文化", "教育"],
    ["传媒", "演艺", "能源", "科技"],
    ["文化", "艺术", "教育", "服务"],
    ["金融", "房地产", "建筑", "农业"],
    ["服务", "协调", "人力资源", "行政"],
    ["军警", "法律", "机械", "金融"],
    ["珠宝", "时尚", "美容", "艺术"],
    ["贸易", "航运", "旅游", "物流"],
    ["研究", "咨询", "医疗", "服务"],
];

/// Organ systems by element, 木火土金水.
const ORGANS: [&str; 5] = [
    "肝、胆、眼睛、筋",
    "心、小肠、舌头、血脉",
    "脾、胃、唇、肌肉",
    "肺、大肠、鼻、皮毛",
    "肾、膀胱、耳、骨",
];

const COLORS: [&[&str]; 5] = [
    &["绿色", "青色"],
    &["红色", "紫色", "粉色"],
    &["黄色", "棕色"],
    &["白色", "金色", "银色"],
    &["黑色", "蓝色"],
];

const NUMBERS: [&[u8]; 5] = [&[3, 8], &[2, 7], &[5, 10], &[4, 9], &[1, 6]];

const DIRECTIONS: [&[&str]; 5] = [
    &["东方", "东南"],
    &["南方"],
    &["中央", "西南", "东北"],
    &["西方", "西北"],
    &["北方"],
];

fn join_elements(elements: &[Element]) -> String {
    elements.iter().map(ToString::to_string).collect::<Vec<_>>().join("、")
}

fn lookup<'a, T: ?Sized>(table: &[&'a T; 5], elements: &[Element]) -> Vec<&'a T> {
    elements.iter().map(|e| table[e.index() as usize]).collect()
}

pub fn personality(day_master: Stem, zodiac: Zodiac) -> Vec<String> {
    let mut lines: Vec<String> = DAY_MASTER_TRAITS[day_master.index() as usize]
        .iter()
        .map(|&s| s.to_owned())
        .collect();
    match zodiac {
        Zodiac::Tiger | Zodiac::Horse => lines.push("热情奔放，行动力强".to_owned()),
        Zodiac::Ox => lines.push("沉稳踏实，做事有恒心".to_owned()),
        _ => {},
    }
    lines
}

pub fn career(day_master: Stem, favorable: &[Element]) -> Vec<String> {
    let mut lines: Vec<String> = DAY_MASTER_CAREERS[day_master.index() as usize]
        .iter()
        .map(|&s| s.to_owned())
        .collect();
    lines.push(format!("适合五行属{}的行业", join_elements(favorable)));
    lines
}

/// Whether the day master's wealth star (偏财) element is favorable.
pub fn wealth(day_master: Stem, favorable: &[Element]) -> Vec<String> {
    let wealth_element = stem_for(day_master, ShiShen::IndirectWealth).element();
    let lines = if favorable.contains(&wealth_element) {
        ["财运较好，善于理财", "正财偏财皆有"]
    } else {
        ["财运平稳，需要稳健理财", "不宜投机冒险"]
    };
    lines.iter().map(|&s| s.to_owned()).collect()
}

/// Spouse star: 偏财 for a man, 正官 for a woman.
pub fn marriage(gender: Gender, day_master: Stem) -> Vec<String> {
    let (label, role) = match gender {
        Gender::Male => ("妻星", ShiShen::IndirectWealth),
        Gender::Female => ("夫星", ShiShen::DirectOfficer),
    };
    let star = stem_for(day_master, role);
    vec![
        format!("{label}为{star}，宜找五行属{}的伴侣", star.element()),
        "宜晚婚，婚姻更稳定".to_owned(),
        "夫妻之间需要相互包容理解".to_owned(),
    ]
}

/// Warnings for absent elements, notes for dominant ones (count >= 3).
pub fn health(count: &ElementCount) -> Vec<String> {
    count
        .iter()
        .filter_map(|(element, n)| {
            let organs = ORGANS[element.index() as usize];
            match n {
                0 => Some(format!("注意{organs}方面的健康")),
                n if n >= 3 => Some(format!("{organs}功能较强，但不要过度消耗")),
                _ => None,
            }
        })
        .collect()
}

/// Lucky colors, numbers and directions of the favorable elements.
pub fn suggestions(favorable: &[Element]) -> Vec<String> {
    let colors: Vec<&str> = lookup(&COLORS, favorable).into_iter().flatten().copied().collect();
    let numbers: Vec<String> = lookup(&NUMBERS, favorable)
        .into_iter()
        .flatten()
        .map(ToString::to_string)
        .collect();
    let directions: Vec<&str> = lookup(&DIRECTIONS, favorable).into_iter().flatten().copied().collect();

    let mut lines = Vec::new();
    if !colors.is_empty() {
        lines.push(format!("幸运颜色：{}", colors.join("、")));
    }
    if !numbers.is_empty() {
        lines.push(format!("幸运数字：{}", numbers.join("、")));
    }
    if !directions.is_empty() {
        lines.push(format!("吉利方位：{}", directions.join("、")));
    }
    lines
}
