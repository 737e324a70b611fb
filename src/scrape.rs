use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::extract::{extract, normalize_opponent_names};
use crate::fetch::{self, PageSource, TableLocator};
use crate::leagues::{League, Season, stats_url};
use crate::merge::{Scope, SquadSide, merge, merge_squads};
use crate::schema::{Entity, StatCategory};
use crate::table::{CategoryTable, Table};

/// Fetch one stats page and name its rows.
pub fn scrape_category(
    source: &dyn PageSource,
    config: &ScrapeConfig,
    league: &League,
    season: Season,
    category: StatCategory,
    entity: Entity,
    locator: &TableLocator,
) -> Result<CategoryTable> {
    let url = stats_url(&config.base_url, league, season, category, entity);
    let rows = fetch::fetch(source, &url, locator)?;
    extract(&rows, category, entity, league.variant, league.name)
}

/// Every player category for one league season, merged.
pub fn scrape_players(
    source: &dyn PageSource,
    config: &ScrapeConfig,
    league: &League,
    season: Season,
) -> Result<Table> {
    info!(league = league.name, %season, "scraping player stats");
    let tables = fetch_categories(config, |category| {
        let locator = TableLocator::Id(category.table_id().to_string());
        scrape_category(source, config, league, season, category, Entity::Players, &locator)
    })?;
    let scope = Scope::season(&season.to_string(), league.variant).with_alignment(config.alignment);
    let table = merge(tables, &scope)?;
    info!(league = league.name, %season, rows = table.len(), "player stats merged");
    Ok(table)
}

/// Every squad category for one league season, from the team's side or
/// the opponents' side.
pub fn scrape_squads(
    source: &dyn PageSource,
    config: &ScrapeConfig,
    league: &League,
    season: Season,
    side: SquadSide,
) -> Result<Table> {
    info!(league = league.name, %season, ?side, "scraping squad stats");
    let locator = TableLocator::Index(side.table_index());
    let tables = fetch_categories(config, |category| {
        let mut table =
            scrape_category(source, config, league, season, category, Entity::Squads, &locator)?;
        if side == SquadSide::Against {
            normalize_opponent_names(&mut table);
        }
        Ok(table)
    })?;
    let scope = Scope::season(&season.to_string(), league.variant).with_alignment(config.alignment);
    let table = merge_squads(tables, &scope, side)?;
    info!(league = league.name, %season, rows = table.len(), "squad stats merged");
    Ok(table)
}

/// Run `fetch_one` for every category in merge order. With parallelism
/// above one the fetches share a dedicated pool; the first error wins.
fn fetch_categories<F>(config: &ScrapeConfig, fetch_one: F) -> Result<Vec<CategoryTable>>
where
    F: Fn(StatCategory) -> Result<CategoryTable> + Sync,
{
    if config.fetch_parallelism <= 1 {
        return StatCategory::ALL.iter().map(|&c| fetch_one(c)).collect();
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.fetch_parallelism)
        .build();
    match pool {
        Ok(pool) => pool.install(|| {
            StatCategory::ALL[..]
                .par_iter()
                .map(|&c| fetch_one(c))
                .collect()
        }),
        Err(err) => {
            warn!(%err, "fetch pool unavailable, fetching sequentially");
            StatCategory::ALL.iter().map(|&c| fetch_one(c)).collect()
        }
    }
}
