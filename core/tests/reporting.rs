//! Matrix, attendance, salary and CSV views over a generated month,
//! plus the opt-in weekday requirement table.

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use chrono::{Datelike, Weekday};
use shiftgen_core::{
    calendar::Month,
    config::{ScheduleConfig, StaffingBand, StaffingSource},
    export::{sheet_title, write_csv, write_xlsx},
    generator::ShiftGenerator,
    model::{NewEmployee, Role, StaffingRequirement},
    report::{salary_summary, ShiftMatrix},
    rng::SeedMode,
    store::ShiftStore,
};

fn generator_with_roster() -> ShiftGenerator<ShiftStore> {
    let store = ShiftStore::in_memory().unwrap();
    store.migrate().unwrap();
    for (i, role) in [Role::Part, Role::Staff, Role::Manager].iter().cycle().take(15).enumerate() {
        let mut e = NewEmployee::new(format!("E{}", i + 1), *role);
        e.hourly_rate = Some(1000 + 100 * (i as u32 % 4));
        store.insert_employee(&e).unwrap();
    }
    ShiftGenerator::new(ScheduleConfig::default(), store)
}

#[test]
fn matrix_agrees_with_generation_report() {
    let mut generator = generator_with_roster();
    let report = generator.generate_month(2024, 10, SeedMode::Fixed(77)).unwrap();
    let matrix = ShiftMatrix::load(&generator.store, report.month).unwrap();

    // Managers first, part-timers last.
    let orders: Vec<u8> = matrix.rows.iter().map(|r| r.role.display_order()).collect();
    assert!(orders.windows(2).all(|w| w[0] <= w[1]));

    for (outcome, (date, count)) in report.days.iter().zip(&matrix.attendance) {
        assert_eq!(outcome.date, *date);
        assert_eq!(outcome.assigned, *count);
    }

    let stored = generator.store.shifts_for_month(report.month).unwrap();
    for (date, count) in &matrix.attendance {
        assert_eq!(stored.iter().filter(|s| s.date == *date).count(), *count);
    }

    let total_days: usize = matrix.rows.iter().map(|r| r.days_worked()).sum();
    assert_eq!(total_days, report.assignments_written);
}

#[test]
fn salary_is_hours_times_rate() {
    let mut generator = generator_with_roster();
    generator.generate_month(2024, 10, SeedMode::Fixed(5)).unwrap();
    let matrix = ShiftMatrix::load(&generator.store, Month::new(2024, 10).unwrap()).unwrap();

    for (line, row) in salary_summary(&matrix).iter().zip(&matrix.rows) {
        assert_eq!(line.hours, 8.0 * row.days_worked() as f64);
        let rate = u64::from(row.hourly_rate.unwrap_or(0));
        assert_eq!(line.amount, rate * 8 * row.days_worked() as u64);
    }
}

#[test]
fn csv_has_one_line_per_employee() {
    let mut generator = generator_with_roster();
    generator.generate_month(2024, 10, SeedMode::Fixed(8)).unwrap();
    let matrix = ShiftMatrix::load(&generator.store, Month::new(2024, 10).unwrap()).unwrap();

    let mut buf = Vec::new();
    write_csv(&matrix, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 1 + 15);
    assert!(lines[1].contains(",正社員,"));
    assert!(lines[15].contains(",アルバイト,"));
}

#[test]
fn xlsx_has_the_same_table_as_csv() {
    let mut generator = generator_with_roster();
    generator.generate_month(2024, 10, SeedMode::Fixed(8)).unwrap();
    let month = Month::new(2024, 10).unwrap();
    let matrix = ShiftMatrix::load(&generator.store, month).unwrap();

    let mut csv_buf = Vec::new();
    write_csv(&matrix, &mut csv_buf).unwrap();
    let csv_text = String::from_utf8(csv_buf).unwrap();
    let csv_rows: Vec<Vec<String>> = csv_text
        .trim_start_matches('\u{feff}')
        .lines()
        .map(|l| l.split(',').map(str::to_string).collect())
        .collect();

    let mut xlsx_buf = Vec::new();
    write_xlsx(&matrix, &mut xlsx_buf).unwrap();
    let mut book: Xlsx<_> = open_workbook_from_rs(std::io::Cursor::new(xlsx_buf)).unwrap();
    let range = book.worksheet_range(&sheet_title(month)).unwrap();
    assert_eq!(range.get_size(), (16, 33));

    let xlsx_rows: Vec<Vec<String>> = range
        .rows()
        .map(|r| {
            r.iter()
                .map(|c| match c {
                    Data::String(s) => s.clone(),
                    other => panic!("non-string cell {other:?}"),
                })
                .collect()
        })
        .collect();
    assert_eq!(xlsx_rows, csv_rows);
}

#[test]
fn requirement_table_is_ignored_by_default() {
    let mut generator = generator_with_roster();
    generator
        .store
        .set_staffing_requirement(StaffingRequirement { weekday: Weekday::Wed, min_staff: 2 })
        .unwrap();

    let report = generator.generate_month(2024, 10, SeedMode::Fixed(1)).unwrap();
    let wednesday = report.days.iter().find(|d| d.date.weekday() == Weekday::Wed).unwrap();
    assert_eq!(wednesday.band, StaffingBand { min: 6, max: 10 });
}

#[test]
fn requirement_table_sets_minimum_when_selected() {
    let mut generator = generator_with_roster();
    generator.config.staffing_source = StaffingSource::WeekdayRequirements;
    generator
        .store
        .set_staffing_requirement(StaffingRequirement { weekday: Weekday::Wed, min_staff: 2 })
        .unwrap();
    generator
        .store
        .set_staffing_requirement(StaffingRequirement { weekday: Weekday::Sun, min_staff: 13 })
        .unwrap();

    let report = generator.generate_month(2024, 10, SeedMode::Fixed(1)).unwrap();
    for day in &report.days {
        let expected = match day.date.weekday() {
            Weekday::Wed => StaffingBand { min: 2, max: 10 },
            Weekday::Sun => StaffingBand { min: 13, max: 13 },
            Weekday::Sat => StaffingBand { min: 8, max: 12 },
            _ => StaffingBand { min: 6, max: 10 },
        };
        assert_eq!(day.band, expected, "{}", day.date);
    }
}
