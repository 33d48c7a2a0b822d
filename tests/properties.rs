use ganzhi::{
    BirthEvent, Door, DunType, GanZhi, Gender, PalacePosition, SolarDate, arrange_palaces, compute_bazi,
    compute_qimen, day_pillar, lunar_to_solar, solar_to_lunar, year_pillar,
};
use proptest::prelude::*;

/// 1900-01-31, the first day the lunar table covers
const FIRST_LUNAR_ORDINAL: i32 = 693_626;
/// 2100-12-31, the last day a birth event accepts
const LAST_BIRTH_ORDINAL: i32 = 767_009;
/// 2101-01-28, the last day of lunar 2100
const LAST_LUNAR_ORDINAL: i32 = 767_037;

fn arb_date(first: i32, last: i32) -> impl Strategy<Value = SolarDate> {
    (first..=last).prop_map(|ordinal| SolarDate::from_ordinal(ordinal).expect("ordinal within 1..=9999"))
}

fn arb_birth_date() -> impl Strategy<Value = SolarDate> {
    arb_date(FIRST_LUNAR_ORDINAL, LAST_BIRTH_ORDINAL)
}

fn arb_gender() -> impl Strategy<Value = Gender> {
    prop_oneof![Just(Gender::Male), Just(Gender::Female)]
}

fn arb_event() -> impl Strategy<Value = BirthEvent> {
    (arb_birth_date(), 0u8..=23, 0u8..=59, arb_gender()).prop_map(|(date, hour, minute, gender)| {
        BirthEvent::new("测试", gender, (date.year(), date.month(), date.day()), hour, minute, false)
            .expect("generated event is valid")
    })
}

fn is_valid_pair(pair: GanZhi) -> bool {
    GanZhi::new(pair.stem(), pair.branch()).is_some()
}

proptest! {
    #[test]
    fn prop_pillars_keep_parity(event in arb_event()) {
        let result = compute_bazi(&event).expect("in range");
        for pillar in result.pillars.as_array() {
            prop_assert!(is_valid_pair(pillar), "{pillar}");
        }
    }

    #[test]
    fn prop_day_pillar_repeats_every_sixty_days(date in arb_date(FIRST_LUNAR_ORDINAL, LAST_BIRTH_ORDINAL - 60)) {
        let later = SolarDate::from_ordinal(date.ordinal() + 60).expect("in range");
        prop_assert_eq!(day_pillar(date), day_pillar(later));
    }

    #[test]
    fn prop_day_pillar_advances_one_per_day(date in arb_date(FIRST_LUNAR_ORDINAL, LAST_BIRTH_ORDINAL - 1)) {
        let next = date.succ().expect("in range");
        prop_assert_eq!(day_pillar(date).succ(), day_pillar(next));
    }

    #[test]
    fn prop_year_pillar_advances_one_per_year(year in 1901u16..=2100, month in 3u8..=12, day in 1u8..=28) {
        let date = SolarDate::new(year, month, day).expect("valid date");
        let previous = SolarDate::new(year - 1, month, day).expect("valid date");
        prop_assert_eq!(year_pillar(previous).succ(), year_pillar(date));
    }

    #[test]
    fn prop_element_tally_sums_to_eight(event in arb_event()) {
        let result = compute_bazi(&event).expect("in range");
        prop_assert_eq!(result.element_count.total(), 8);
        let bucketed = result.strength.strongest.len()
            + result.strength.strong.len()
            + result.strength.weak.len()
            + result.strength.weakest.len();
        prop_assert_eq!(bucketed, 5);
    }

    #[test]
    fn prop_charts_are_deterministic(event in arb_event()) {
        let first = serde_json::to_string(&compute_bazi(&event).expect("in range")).expect("serialize");
        let second = serde_json::to_string(&compute_bazi(&event).expect("in range")).expect("serialize");
        prop_assert_eq!(first, second);

        let first = serde_json::to_string(&compute_qimen(&event).expect("valid")).expect("serialize");
        let second = serde_json::to_string(&compute_qimen(&event).expect("valid")).expect("serialize");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_qimen_grid_invariants(event in arb_event()) {
        let result = compute_qimen(&event).expect("valid");
        let numbers: Vec<u8> = result.palaces.iter().map(|p| p.number).collect();
        prop_assert_eq!(numbers, vec![4, 9, 2, 3, 5, 7, 8, 1, 6]);
        prop_assert!((1..=9).contains(&result.ju));

        for palace in &result.palaces {
            let is_center = palace.position == PalacePosition::Center;
            prop_assert_eq!(palace.door.is_none(), is_center);
            prop_assert_eq!(palace.spirit.is_none(), is_center);
        }
    }

    #[test]
    fn prop_doors_are_a_rotation(ju in 1u8..=9, yang in any::<bool>(), stem in 0i64..10) {
        let dun = if yang { DunType::Yang } else { DunType::Yin };
        let palaces = arrange_palaces(ju, dun, ganzhi::Stem::from_index(stem));
        let doors: Vec<Door> = palaces.iter().filter_map(|p| p.door).collect();
        prop_assert_eq!(doors.len(), 8);

        let start = Door::ALL.iter().position(|&d| d == doors[0]).expect("known door");
        let step: i64 = if yang { 1 } else { -1 };
        for (k, door) in doors.iter().enumerate() {
            let expected = Door::ALL[(start as i64 + k as i64 * step).rem_euclid(8) as usize];
            prop_assert_eq!(*door, expected);
        }
    }

    #[test]
    fn prop_lunar_round_trip(date in arb_date(FIRST_LUNAR_ORDINAL, LAST_LUNAR_ORDINAL)) {
        let lunar = solar_to_lunar(date).expect("in range");
        prop_assert!((1..=12).contains(&lunar.month));
        prop_assert!((1..=30).contains(&lunar.day));
        prop_assert_eq!(lunar_to_solar(lunar).expect("valid lunar date"), date);
    }
}
