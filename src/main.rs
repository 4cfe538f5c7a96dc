mod date;
mod event;
mod filter;
mod gaps;
mod menu;

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::Parser;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use filter::SearchSpec;
use gaps::{DateField, Row};

const DEFAULT_URL: &str = "https://beachvolley.torneopal.fi";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(
    name = "biitsi",
    version,
    about = "Beach volleyball tournament calendar scraper"
)]
struct Cli {
    /// URL of the tournament calendar to scrape.
    #[arg(short, long, default_value = DEFAULT_URL)]
    url: String,

    /// Limit events to a specific count. Negative means no limit.
    #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
    limit: i64,

    /// Only include events where all comma-separated words are found,
    /// e.g. "t18,tampere". Repeat the flag to accept several alternatives.
    #[arg(short, long, num_args = 1..)]
    include: Vec<String>,

    /// Sort results by date in ascending order (oldest first).
    #[arg(short = 'd', long)]
    sort_by_date: bool,

    /// Include events that have already ended.
    #[arg(short = 'p', long)]
    include_past: bool,

    /// Log skipped anchors and other diagnostics.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Captured once; the pipeline itself never reads the clock.
    let today = chrono::Local::now().date_naive();

    let html = fetch(&cli.url)?;
    let anchors = menu::flatten_menu(&html)?;
    let spec = SearchSpec::parse(&cli.include);

    let mut events = event::find_events(today.year(), &anchors, cli.limit, &spec, cli.sort_by_date);
    if !cli.include_past {
        events = event::drop_past(events, today);
    }
    let rows = gaps::add_gaps(events.into_iter().map(Row::Event).collect(), DateField::Start);

    for row in &rows {
        println!("{}", render_row(row));
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn fetch(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?;
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("GET {url}"))?
        .error_for_status()?;
    Ok(response.text()?)
}

/// One tab-separated output line: start, end, name, series.
/// Gap rows become a line of four pipes.
fn render_row(row: &Row) -> String {
    match row {
        Row::Gap => "|\t|\t|\t|".to_string(),
        Row::Event(e) => format!(
            "{}\t{}\t{}\t{}",
            format_date(e.start),
            format_date(e.end),
            e.name,
            e.series
        ),
    }
}

/// "Mon 2024-06-03" style date.
fn format_date(date: NaiveDate) -> String {
    date.format("%a %Y-%m-%d").to_string()
}
