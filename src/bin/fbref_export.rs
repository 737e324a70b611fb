use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use fbref_tables::config::ScrapeConfig;
use fbref_tables::export;
use fbref_tables::fetch::HttpSource;
use fbref_tables::leagues::{self, Season};
use fbref_tables::merge::SquadSide;
use fbref_tables::scrape;

const DEFAULT_LEAGUE: &str = "Premier League";

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let league_name = arg_value("--league").unwrap_or_else(|| DEFAULT_LEAGUE.to_string());
    let league = leagues::league(&league_name)?;
    let season = match arg_value("--season") {
        Some(raw) => Season::parse(&raw)?,
        None => Season::current(chrono::Local::now().date_naive()),
    };
    let side = match arg_value("--squads").as_deref() {
        None => None,
        Some("for") => Some(SquadSide::For),
        Some("against") => Some(SquadSide::Against),
        Some(other) => return Err(anyhow!("--squads expects for|against, got {other:?}")),
    };
    let out = arg_value("--out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default_file_name(league.name, season, side)));

    let config = ScrapeConfig::from_env();
    let source = HttpSource::new(&config)?;
    let table = match side {
        Some(side) => scrape::scrape_squads(&source, &config, league, season, side),
        None => scrape::scrape_players(&source, &config, league, season),
    }
    .with_context(|| format!("scrape {} {}", league.name, season))?;

    let is_json = out
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        export::export_json(&out, &table)?;
    } else {
        export::export_xlsx(&out, &[&table])?;
    }

    println!("{} {}", league.name, season);
    println!("Rows: {}", table.len());
    println!("Columns: {}", table.columns.len());
    println!("Written: {}", out.display());
    Ok(())
}

fn default_file_name(league: &str, season: Season, side: Option<SquadSide>) -> String {
    let kind = match side {
        None => "players",
        Some(SquadSide::For) => "squads",
        Some(SquadSide::Against) => "opponents",
    };
    format!("{}_{}_{}.xlsx", league.replace(' ', "_"), season, kind)
}

fn arg_value(name: &str) -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&prefix) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}
