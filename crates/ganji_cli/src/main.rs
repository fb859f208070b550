use std::path::{Path, PathBuf};

use chrono::{Datelike, FixedOffset, Offset, Utc};
use clap::{Args, Parser, Subcommand};
use ganji_base::{Ganzhi, Jieqi};
use ganji_saju::birth::parse_datetime;
use ganji_saju::{
    AgeClamp, BirthMoment, PillarCalculator, SajuConfig, YearBoundary, ZiHourPolicy,
    day_pillars_for, month_pillar_for, year_pillar_for,
};
use ganji_search::{
    DEFAULT_FIRST_YEAR, DEFAULT_LAST_YEAR, SolarTermTable, TableConfig, sun_longitude_at,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ganji", about = "Solar terms, Four Pillars, and fortune cycles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Four Pillars of a birth
    Pillars {
        #[command(flatten)]
        chart: ChartArgs,
    },
    /// Major fortune cycle of a birth
    Fortune {
        #[command(flatten)]
        chart: ChartArgs,
    },
    /// The 12 month-starting solar terms of a year
    Terms {
        /// Sexagenary year (Lichun of this year through Xiaohan in January of the next)
        #[arg(long)]
        year: i32,
        #[command(flatten)]
        table: TableArgs,
    },
    /// Compute a solar-term table and write it as JSON
    BuildTable {
        /// First sexagenary year
        #[arg(long, default_value_t = DEFAULT_FIRST_YEAR)]
        from: i32,
        /// Last sexagenary year
        #[arg(long, default_value_t = DEFAULT_LAST_YEAR)]
        to: i32,
        /// Output file
        #[arg(long)]
        out: PathBuf,
        /// Fail on the first data-quality violation
        #[arg(long)]
        strict: bool,
        /// Civil UTC offset of the table
        #[arg(long, default_value = "+08:00")]
        offset: String,
    },
    /// Apparent solar longitude at an instant
    Longitude {
        /// ISO-8601 date-time; UTC when no offset is given
        #[arg(long)]
        date: String,
    },
    /// Annual pillars
    Annual {
        #[arg(long)]
        year: i32,
        /// Number of consecutive years
        #[arg(long, default_value = "1")]
        count: u32,
    },
    /// Monthly pillars of a sexagenary year
    Monthly {
        #[arg(long)]
        year: i32,
        /// Month number, 1 = Yin month (all 12 when omitted)
        #[arg(long)]
        month: Option<u32>,
    },
    /// Day pillars of a civil month
    Daily {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },
}

#[derive(Args)]
struct TableArgs {
    /// Solar-term table JSON; computed on the fly when omitted
    #[arg(long)]
    table: Option<PathBuf>,
    /// Civil UTC offset of the table
    #[arg(long, default_value = "+08:00")]
    offset: String,
}

#[derive(Args)]
struct ChartArgs {
    /// Birth date-time, ISO-8601 with offset (e.g. 1990-03-15T14:30+09:00)
    #[arg(long)]
    date: String,
    /// male/female/m/f
    #[arg(long)]
    gender: String,
    #[command(flatten)]
    table: TableArgs,
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Turn the year on 1 January instead of Lichun
    #[arg(long)]
    civil_year: bool,
    /// Starting-age clamp: zero-to-ten (default), one-to-ten, none
    #[arg(long)]
    clamp: Option<String>,
    /// Use the next day's stem for 23:00-24:00 births
    #[arg(long)]
    late_zi_next_day: bool,
    /// Number of fortune blocks
    #[arg(long)]
    blocks: Option<u32>,
    /// Civil offset for day and hour pillars (e.g. +09:00)
    #[arg(long)]
    local_offset: Option<String>,
    /// Print JSON
    #[arg(long)]
    json: bool,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

fn parse_offset(s: &str) -> FixedOffset {
    s.parse::<FixedOffset>()
        .unwrap_or_else(|e| fail(format!("Invalid UTC offset {s:?}: {e}")))
}

fn load_config(args: &ChartArgs) -> SajuConfig {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .unwrap_or_else(|e| fail(format!("Failed to read {}: {e}", path.display())));
            SajuConfig::from_json_str(&json).unwrap_or_else(|e| fail(e))
        }
        None => SajuConfig::default(),
    };
    if args.civil_year {
        config.year_boundary = YearBoundary::Civil;
    }
    if let Some(clamp) = &args.clamp {
        config.age_clamp = match clamp.as_str() {
            "zero-to-ten" => AgeClamp::ZeroToTen,
            "one-to-ten" => AgeClamp::OneToTen,
            "none" => AgeClamp::Unclamped,
            other => fail(format!(
                "Invalid clamp: {other} (zero-to-ten, one-to-ten, none)"
            )),
        };
    }
    if args.late_zi_next_day {
        config.zi_hour = ZiHourPolicy::NextDayStem;
    }
    if let Some(n) = args.blocks {
        config.block_count = n;
    }
    if let Some(s) = &args.local_offset {
        config.local_offset = Some(parse_offset(s));
    }
    if let Err(e) = config.validate() {
        fail(format!("Invalid config: {e}"));
    }
    config
}

fn load_table(path: &Path, offset: FixedOffset) -> SolarTermTable {
    SolarTermTable::load(path, offset)
        .unwrap_or_else(|e| fail(format!("Failed to load table: {e}")))
}

/// Table from `--table`, or computed for `years`.
fn table_for(args: &TableArgs, years: std::ops::RangeInclusive<i32>) -> SolarTermTable {
    let offset = parse_offset(&args.offset);
    match &args.table {
        Some(path) => load_table(path, offset),
        None => {
            tracing::debug!(first = years.start(), last = years.end(), "computing solar-term table");
            let config = TableConfig {
                locator: ganji_search::LocatorConfig::with_offset(offset),
                strict: false,
            };
            SolarTermTable::build(years, &config)
                .unwrap_or_else(|e| fail(format!("Failed to compute solar terms: {e}")))
        }
    }
}

fn birth_of(args: &ChartArgs) -> BirthMoment {
    BirthMoment::parse(&args.date, &args.gender).unwrap_or_else(|e| fail(e))
}

fn describe(label: &str, gz: Ganzhi) {
    println!("{label:<6} {gz} ({})", gz.hangul());
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Pillars { chart: args } => {
            let birth = birth_of(&args);
            let config = load_config(&args);
            let year = birth.civil.year();
            let table = table_for(&args.table, year - 1..=year + 1);
            let calc = PillarCalculator::new(&table, config).unwrap_or_else(|e| fail(e));
            let chart = calc.chart(&birth).unwrap_or_else(|e| fail(e));
            if args.json {
                let json = serde_json::to_string_pretty(&chart).unwrap_or_else(|e| fail(e));
                println!("{json}");
            } else {
                describe("Year", chart.pillars.year);
                describe("Month", chart.pillars.month);
                describe("Day", chart.pillars.day);
                describe("Hour", chart.pillars.hour);
                println!(
                    "Month opened by {} ({}) at {}",
                    chart.month_term.term,
                    chart.month_term.term.english_name(),
                    chart.month_term.instant
                );
            }
        }

        Commands::Fortune { chart: args } => {
            let birth = birth_of(&args);
            let config = load_config(&args);
            let year = birth.civil.year();
            let table = table_for(&args.table, year - 1..=year + 1);
            let calc = PillarCalculator::new(&table, config).unwrap_or_else(|e| fail(e));
            let cycle = calc.fortune_cycle(&birth).unwrap_or_else(|e| fail(e));
            if args.json {
                let json = serde_json::to_string_pretty(&cycle).unwrap_or_else(|e| fail(e));
                println!("{json}");
            } else {
                println!("Direction:     {:?}", cycle.direction);
                println!(
                    "Anchor:        {} at {}",
                    cycle.anchor.term, cycle.anchor.instant
                );
                println!("Elapsed days:  {:.4}", cycle.elapsed_days);
                println!(
                    "Starting age:  {} ({:.4}{})",
                    cycle.starting_age.years,
                    cycle.starting_age.raw_years,
                    if cycle.starting_age.clamped { ", clamped" } else { "" }
                );
                println!("Precise start: {}", cycle.precise_start);
                for block in &cycle.blocks {
                    println!(
                        "  {:>2}. age {:>3}-{:<3} {} ({})",
                        block.order,
                        block.start_age,
                        block.end_age,
                        block.pillar,
                        block.pillar.hangul()
                    );
                }
            }
        }

        Commands::Terms { year, table } => {
            let t = table_for(&table, year..=year);
            let events = t.events_for_year(year).unwrap_or_else(|e| fail(e));
            for ev in events {
                println!(
                    "{} {:<10} {:>5.1}°  {}  {:?}",
                    ev.term,
                    ev.term.name(),
                    ev.term.longitude_deg(),
                    ev.instant,
                    ev.precision
                );
            }
        }

        Commands::BuildTable {
            from,
            to,
            out,
            strict,
            offset,
        } => {
            let config = TableConfig {
                locator: ganji_search::LocatorConfig::with_offset(parse_offset(&offset)),
                strict,
            };
            let table = SolarTermTable::build(from..=to, &config).unwrap_or_else(|e| fail(e));
            table.save(&out).unwrap_or_else(|e| fail(e));
            let incomplete = table.incomplete_years();
            println!(
                "Wrote {} events for {from}-{to} to {}",
                table.len(),
                out.display()
            );
            if !incomplete.is_empty() {
                println!("Incomplete years: {incomplete:?}");
            }
        }

        Commands::Longitude { date } => {
            let dt = parse_datetime(&date, Some(Utc.fix())).unwrap_or_else(|e| fail(e));
            let lon = sun_longitude_at(&dt);
            let idx = ((lon - Jieqi::Lichun.longitude_deg()).rem_euclid(360.0) / 30.0) as u32;
            match Jieqi::from_index(idx) {
                Some(t) => println!("{lon:.6}°  (month of {t} {})", t.name()),
                None => println!("{lon:.6}°"),
            }
        }

        Commands::Annual { year, count } => {
            for y in year..year + count as i32 {
                let gz = year_pillar_for(y);
                println!("{y}  {gz} ({})", gz.hangul());
            }
        }

        Commands::Monthly { year, month } => {
            let months = match month {
                Some(m) => m..=m,
                None => 1..=12,
            };
            for m in months {
                let gz = month_pillar_for(year, m).unwrap_or_else(|e| fail(e));
                let opener = Jieqi::for_month_branch(gz.branch);
                println!("{m:>2}  {gz} ({})  from {}", gz.hangul(), opener);
            }
        }

        Commands::Daily { year, month } => {
            let days = day_pillars_for(year, month).unwrap_or_else(|e| fail(e));
            for (date, gz) in days {
                println!("{date}  {gz} ({})", gz.hangul());
            }
        }
    }
}
