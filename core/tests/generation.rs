//! Properties every generated month must satisfy, plus the worked
//! October 2024 scenarios.

use chrono::{Datelike, Duration, NaiveDate};
use shiftgen_core::{
    calendar::Month,
    config::{ScheduleConfig, StaffingBand},
    generator::ShiftGenerator,
    model::{NewEmployee, Role, ShiftAssignment},
    rng::SeedMode,
    store::ShiftStore,
    types::EmployeeId,
};
use std::collections::{BTreeMap, HashSet};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn make_generator(n: usize) -> (ShiftGenerator<ShiftStore>, Vec<EmployeeId>) {
    init_logging();
    let store = ShiftStore::in_memory().unwrap();
    store.migrate().unwrap();
    let ids = (1..=n)
        .map(|i| {
            let role = match i % 3 {
                0 => Role::Manager,
                1 => Role::Staff,
                _ => Role::Part,
            };
            store.insert_employee(&NewEmployee::new(format!("E{i}"), role)).unwrap().id
        })
        .collect();
    (ShiftGenerator::new(ScheduleConfig::default(), store), ids)
}

fn oct(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, day).unwrap()
}

fn longest_streaks(shifts: &[ShiftAssignment]) -> BTreeMap<EmployeeId, usize> {
    let mut dates: BTreeMap<EmployeeId, Vec<NaiveDate>> = BTreeMap::new();
    for s in shifts {
        dates.entry(s.employee_id).or_default().push(s.date);
    }
    dates
        .into_iter()
        .map(|(id, mut days)| {
            days.sort();
            let (mut best, mut run) = (1, 1);
            for pair in days.windows(2) {
                run = if pair[1] - pair[0] == Duration::days(1) { run + 1 } else { 1 };
                best = best.max(run);
            }
            (id, best)
        })
        .collect()
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// 10 employees, E1 and E2 off on October 4. Across many seeds neither is
/// ever scheduled that day and nobody works more than five days in a row.
#[test]
fn october_scenario_respects_requested_off_and_streak_limit() {
    for seed in 0..25 {
        let (mut generator, ids) = make_generator(10);
        generator.store.add_requested_off(ids[0], oct(4)).unwrap();
        generator.store.add_requested_off(ids[1], oct(4)).unwrap();

        generator.generate_month(2024, 10, SeedMode::Fixed(seed)).unwrap();
        let shifts = generator.store.shifts_for_month(Month::new(2024, 10).unwrap()).unwrap();

        assert!(
            !shifts
                .iter()
                .any(|s| s.date == oct(4) && (s.employee_id == ids[0] || s.employee_id == ids[1])),
            "seed {seed}: requested-off employee scheduled on Oct 4"
        );
        for (id, streak) in longest_streaks(&shifts) {
            assert!(streak <= 5, "seed {seed}: employee {id} worked {streak} days in a row");
        }
    }
}

/// Requested-off dates scattered across the roster are never scheduled.
#[test]
fn requested_off_is_never_scheduled() {
    let (mut generator, ids) = make_generator(16);
    let mut off = HashSet::new();
    for (i, id) in ids.iter().enumerate() {
        for day in [1 + i as u32, 15, 28 - (i as u32 % 7)] {
            generator.store.add_requested_off(*id, oct(day)).unwrap();
            off.insert((*id, oct(day)));
        }
    }

    generator.generate_month(2024, 10, SeedMode::Fixed(7)).unwrap();
    let shifts = generator.store.shifts_for_month(Month::new(2024, 10).unwrap()).unwrap();

    assert!(!shifts.is_empty());
    for s in &shifts {
        assert!(!off.contains(&(s.employee_id, s.date)), "scheduled on requested day off: {s:?}");
    }
}

/// Per day: headcount ≤ eligible pool, ≤ band max, one row per employee.
#[test]
fn daily_headcount_is_bounded() {
    for (n, seed) in [(4, 1), (9, 2), (20, 3), (40, 4)] {
        let (mut generator, _) = make_generator(n);
        let report = generator.generate_month(2024, 10, SeedMode::Fixed(seed)).unwrap();
        let shifts = generator.store.shifts_for_month(Month::new(2024, 10).unwrap()).unwrap();

        for day in &report.days {
            assert!(day.assigned <= day.eligible, "{day:?}");
            assert!((day.assigned as u32) <= day.band.max, "{day:?}");
            assert_eq!(day.understaffed, (day.assigned as u32) < day.band.min, "{day:?}");
            let stored = shifts.iter().filter(|s| s.date == day.date).count();
            assert_eq!(stored, day.assigned);
        }

        let distinct: HashSet<_> = shifts.iter().map(|s| (s.employee_id, s.date)).collect();
        assert_eq!(distinct.len(), shifts.len());
        for (_, streak) in longest_streaks(&shifts) {
            assert!(streak <= 5);
        }
    }
}

/// Five employees on a Wednesday: the band asks for at least six, all five
/// are scheduled, and the day is reported as understaffed, not failed.
#[test]
fn small_pool_is_silently_understaffed_but_reported() {
    let (mut generator, _) = make_generator(5);
    let report = generator.generate_month(2024, 10, SeedMode::Fixed(11)).unwrap();

    let wednesday = &report.days[1];
    assert_eq!(wednesday.date, oct(2));
    assert_eq!(wednesday.date.weekday(), chrono::Weekday::Wed);
    assert_eq!(wednesday.band, StaffingBand { min: 6, max: 10 });
    assert_eq!(wednesday.eligible, 5);
    assert_eq!(wednesday.assigned, 5);
    assert!(wednesday.understaffed);

    let saturday = &report.days[4];
    assert_eq!(saturday.date.weekday(), chrono::Weekday::Sat);
    assert_eq!(saturday.band, StaffingBand { min: 8, max: 12 });

    // Five people can never meet a minimum of six.
    assert_eq!(report.days_understaffed, 31);
}

/// No employees: a valid, empty month.
#[test]
fn empty_roster_generates_empty_month() {
    let (mut generator, _) = make_generator(0);
    let report = generator.generate_month(2024, 10, SeedMode::Fixed(1)).unwrap();

    assert_eq!(report.assignments_written, 0);
    assert_eq!(report.days_understaffed, 31);
    assert!(generator
        .store
        .shifts_for_month(Month::new(2024, 10).unwrap())
        .unwrap()
        .is_empty());
}

/// With a large roster every day can be fully staffed.
#[test]
fn large_roster_meets_every_band() {
    let (mut generator, _) = make_generator(30);
    let report = generator.generate_month(2024, 10, SeedMode::Fixed(21)).unwrap();

    assert_eq!(report.days_understaffed, 0);
    for day in &report.days {
        assert!((day.band.min..=day.band.max).contains(&(day.assigned as u32)), "{day:?}");
    }
}

/// Streak limit is read from config, not hard-coded.
#[test]
fn configured_streak_limit_is_honoured() {
    let (mut generator, _) = make_generator(3);
    generator.config.max_consecutive_days = 2;
    generator.generate_month(2024, 10, SeedMode::Fixed(3)).unwrap();

    let shifts = generator.store.shifts_for_month(Month::new(2024, 10).unwrap()).unwrap();
    for (id, streak) in longest_streaks(&shifts) {
        assert!(streak <= 2, "employee {id} worked {streak} days in a row");
    }
}
