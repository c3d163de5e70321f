//! shift-runner: headless month generator.
//!
//! Usage:
//!   shift-runner --db shifts.db --year 2024 --month 10 --seed 42
//!   shift-runner --db shifts.db --year 2024 --month 10 --csv out.csv --xlsx out.xlsx
//!   shift-runner --db shifts.db --demo-roster 12 --year 2024 --month 10
//!   shift-runner --db shifts.db --ipc-mode

use anyhow::{bail, Result};
use chrono::Datelike;
use shiftgen_core::{
    calendar::Month,
    config::ScheduleConfig,
    export,
    generator::{GenerationReport, ShiftGenerator},
    name_generator::demo_roster,
    report::{salary_summary, ShiftMatrix},
    rng::SeedMode,
    store::ShiftStore,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Generate {
        year: i32,
        month: u32,
        #[serde(default)]
        seed: Option<u64>,
    },
    Matrix {
        year: i32,
        month: u32,
    },
    Salary {
        year: i32,
        month: u32,
    },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let today = chrono::Local::now().date_naive();
    let year = parse_arg(&args, "--year", today.year())?;
    let month = parse_arg(&args, "--month", today.month())?;
    let seed: Option<u64> = parse_opt_arg(&args, "--seed")?;
    let demo: Option<usize> = parse_opt_arg(&args, "--demo-roster")?;
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = str_arg(&args, "--db")?.unwrap_or(":memory:");
    let csv_path = str_arg(&args, "--csv")?;
    let xlsx_path = str_arg(&args, "--xlsx")?;

    let config = match str_arg(&args, "--config")? {
        Some(path) => ScheduleConfig::load(path)?,
        None => ScheduleConfig::default(),
    };

    let store = ShiftStore::open(db)?;
    store.migrate()?;

    if let Some(n) = demo {
        seed_demo_roster(&store, n, seed.unwrap_or(0))?;
    }

    let mut generator = ShiftGenerator::new(config, store);

    if ipc_mode {
        return run_ipc_loop(&mut generator);
    }

    println!("shift-runner");
    println!("  db:     {db}");
    println!("  month:  {year}-{month:02}");
    println!(
        "  seed:   {}",
        seed.map_or_else(|| "entropy".to_string(), |s| s.to_string())
    );
    println!();

    let report = generator.generate_month(year, month, SeedMode::from(seed))?;
    print_summary(&report);

    if csv_path.is_some() || xlsx_path.is_some() {
        let matrix = ShiftMatrix::load(&generator.store, report.month)?;
        if let Some(path) = csv_path {
            export::export_csv_file(&matrix, path)?;
            println!("  csv:                {path}");
        }
        if let Some(path) = xlsx_path {
            export::export_xlsx_file(&matrix, path)?;
            println!("  xlsx:               {path}");
        }
    }

    println!();
    println!("=== REPORT JSON ===");
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Only seeds when the roster is empty, so reruns against a file
/// database keep the same people.
fn seed_demo_roster(store: &ShiftStore, n: usize, seed: u64) -> Result<()> {
    if store.employee_count()? > 0 {
        log::info!("demo roster skipped: employees already present");
        return Ok(());
    }
    for employee in demo_roster(n, seed) {
        store.insert_employee(&employee)?;
    }
    log::info!("demo roster: inserted {n} employees");
    Ok(())
}

fn run_ipc_loop(generator: &mut ShiftGenerator<ShiftStore>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                reply(&mut stdout, &serde_json::json!({ "error": e.to_string() }))?;
                continue;
            }
        };

        if matches!(cmd, IpcCommand::Quit) {
            break;
        }
        match handle_command(generator, cmd) {
            Ok(value) => reply(&mut stdout, &value)?,
            Err(e) => reply(&mut stdout, &serde_json::json!({ "error": e.to_string() }))?,
        }
    }
    Ok(())
}

fn handle_command(
    generator: &mut ShiftGenerator<ShiftStore>,
    cmd: IpcCommand,
) -> Result<serde_json::Value> {
    let value = match cmd {
        IpcCommand::Generate { year, month, seed } => {
            serde_json::to_value(generator.generate_month(year, month, SeedMode::from(seed))?)?
        }
        IpcCommand::Matrix { year, month } => {
            let matrix = ShiftMatrix::load(&generator.store, Month::new(year, month)?)?;
            serde_json::to_value(matrix)?
        }
        IpcCommand::Salary { year, month } => {
            let matrix = ShiftMatrix::load(&generator.store, Month::new(year, month)?)?;
            serde_json::to_value(salary_summary(&matrix))?
        }
        IpcCommand::Quit => serde_json::Value::Null,
    };
    Ok(value)
}

fn reply(stdout: &mut io::Stdout, value: &serde_json::Value) -> Result<()> {
    writeln!(stdout, "{value}")?;
    stdout.flush()?;
    Ok(())
}

fn print_summary(report: &GenerationReport) {
    println!("=== RUN SUMMARY ===");
    println!("  run_id:             {}", report.run_id);
    println!("  month:              {}", report.month);
    println!("  seed:               {}", report.seed);
    println!("  assignments:        {}", report.assignments_written);
    println!("  days understaffed:  {}", report.days_understaffed);

    let short: Vec<_> = report.days.iter().filter(|d| d.understaffed).collect();
    if !short.is_empty() {
        println!();
        println!("=== UNDERSTAFFED DAYS ===");
        for d in short {
            println!(
                "  {} | assigned {} of min {} | eligible {} | off {} | streak-blocked {}",
                d.date, d.assigned, d.band.min, d.eligible, d.requested_off, d.streak_blocked
            );
        }
    }
}

/// Falls back to `default` only when the flag is absent.
fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> Result<T> {
    Ok(parse_opt_arg(args, flag)?.unwrap_or(default))
}

/// A flag that is present but does not parse is an error, never a default.
fn parse_opt_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>> {
    match str_arg(args, flag)? {
        None => Ok(None),
        Some(v) => match v.parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => bail!("invalid value for {flag}: {v}"),
        },
    }
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|a| a == flag) {
        None => Ok(None),
        Some(i) => match args.get(i + 1) {
            Some(v) => Ok(Some(v.as_str())),
            None => bail!("missing value for {flag}"),
        },
    }
}
