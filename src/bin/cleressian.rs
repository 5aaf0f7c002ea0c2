//! Command line front end of the calendar engine.

use std::process;

use clap::{Parser, Subcommand};
use cleressian::{
    CalendarDate, Cycle, DateDelta, DayDiff, GrandCycle, IntoMonth, Month, Result, Year,
};
use tracing_subscriber::EnvFilter;

/// Clerèssian calendar conversions and arithmetic.
#[derive(Parser)]
#[command(name = "cleressian", version, about)]
struct Cli {
    /// Log level of the library, `RUST_LOG` takes precedence when set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a date through a template.
    Format {
        grand_cycle: GrandCycle,
        cycle: Cycle,
        year: Year,
        /// Month number or full name.
        month: String,
        day: u8,
        #[arg(short, long, default_value = "%x")]
        template: String,
    },
    /// Read a date with one template and print it with another.
    Parse {
        input: String,
        #[arg(short, long, default_value = "%x")]
        template: String,
        #[arg(short, long, default_value = "%X")]
        output: String,
    },
    /// Move an absolute date (`%X`, e.g. 0003.041) by years and days.
    Add {
        date: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        years: DayDiff,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        days: DayDiff,
    },
    /// Print the distance from the first absolute date to the second.
    Diff { from: String, to: String },
    /// Tell whether a year of a cycle is leap.
    Leap { cycle: Cycle, year: Year },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cleressian={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli.command) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn absolute(text: &str) -> Result<CalendarDate> {
    CalendarDate::parse(text, "%X")
}

fn month(text: &str) -> Result<Month> {
    match text.parse::<i64>() {
        Ok(number) => number.into_month(),
        Err(_) => text.into_month(),
    }
}

fn run(command: Command) -> Result<String> {
    Ok(match command {
        Command::Format {
            grand_cycle,
            cycle,
            year,
            month: m,
            day,
            template,
        } => CalendarDate::new(grand_cycle, cycle, year, month(&m), day)?.format(&template),
        Command::Parse {
            input,
            template,
            output,
        } => CalendarDate::parse(&input, &template)?.format(&output),
        Command::Add { date, years, days } => {
            let moved = absolute(&date)?.checked_add(DateDelta::new(years, days))?;
            format!("{} ({moved})", moved.format("%X"))
        }
        Command::Diff { from, to } => absolute(&to)?.since(&absolute(&from)?).to_string(),
        Command::Leap { cycle, year } => {
            let date = CalendarDate::new(1, cycle, year, Month::MIN, 1)?;
            let kind = if date.is_leap_year() { "leap" } else { "common" };
            format!("{kind} ({} days)", date.days_in_year())
        }
    })
}
