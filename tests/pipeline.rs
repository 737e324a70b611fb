use std::collections::HashMap;

use fbref_tables::StatsError;
use fbref_tables::config::ScrapeConfig;
use fbref_tables::leagues::{League, Season, league, stats_url};
use fbref_tables::merge::SquadSide;
use fbref_tables::schema::{self, Entity, StatCategory};
use fbref_tables::scrape::{scrape_players, scrape_squads};
use fbref_tables::table::Value;

const BASE: &str = "https://fbref.test/en/comps";

struct FixtureSource(HashMap<String, String>);

impl fbref_tables::fetch::PageSource for FixtureSource {
    fn fetch_page(&self, url: &str) -> fbref_tables::Result<String> {
        self.0
            .get(url)
            .cloned()
            .ok_or_else(|| StatsError::NotFound(url.to_string()))
    }
}

struct Player {
    name: &'static str,
    position: &'static str,
    squad: &'static str,
    matches: &'static str,
}

const PLAYERS: &[Player] = &[
    Player { name: "Alpha", position: "DF", squad: "Arsenal", matches: "30" },
    Player { name: "Unused", position: "GK", squad: "Arsenal", matches: "0" },
    Player { name: "Bravo", position: "MF", squad: "Chelsea", matches: "25" },
    Player { name: "Charlie", position: "FW", squad: "Everton", matches: "12" },
];

fn config() -> ScrapeConfig {
    ScrapeConfig {
        base_url: BASE.to_string(),
        ..ScrapeConfig::default()
    }
}

fn player_cell(column: &str, rank: usize, p: &Player) -> String {
    match column {
        "Rk" => rank.to_string(),
        "Player" => p.name.to_string(),
        "Nation" => "eng ENG".to_string(),
        "Position" => p.position.to_string(),
        "Squad" => p.squad.to_string(),
        "Age" => "24".to_string(),
        "Born" => "1999".to_string(),
        "Matches Played" => p.matches.to_string(),
        "Minutes" => if p.matches == "0" { "0" } else { "900" }.to_string(),
        "Matches" => "Matches".to_string(),
        "Attempted Passes Total" => "100".to_string(),
        "Completed Passes Total" => "80".to_string(),
        "Touches" => "200".to_string(),
        "90s" => "10.0".to_string(),
        "Goals" => String::new(),
        _ => "1".to_string(),
    }
}

/// A stats page whose table sits inside a comment, as fbref serves it.
fn player_page(category: StatCategory, league: &League) -> String {
    let columns = schema::columns(category, Entity::Players, league.variant);
    let listed: Vec<&Player> = PLAYERS
        .iter()
        .filter(|p| category == StatCategory::PlayingTime || p.matches != "0")
        .collect();

    let mut body = String::new();
    for (idx, p) in listed.iter().enumerate() {
        if idx == 2 {
            body.push_str("<tr class=\"thead\"><th>Rk</th><th>Player</th></tr>\n");
        }
        body.push_str("<tr>");
        for (c, column) in columns.iter().enumerate() {
            let tag = if c == 0 { "th" } else { "td" };
            body.push_str(&format!("<{tag}>{}</{tag}>", player_cell(column, idx + 1, p)));
        }
        body.push_str("</tr>\n");
    }
    format!(
        "<html><body><div class=\"table_wrapper\"><!--\n<table id=\"{}\"><thead><tr class=\"over_header\"><th></th></tr><tr><th>Rk</th></tr></thead><tbody>\n{}</tbody></table>\n--></div></body></html>",
        category.table_id(),
        body
    )
}

fn squad_table(category: StatCategory, league: &League, names: &[&str]) -> String {
    let columns = schema::columns(category, Entity::Squads, league.variant);
    let mut body = String::new();
    for name in names {
        body.push_str("<tr>");
        for column in columns {
            let cell = match *column {
                "Squad" => name.to_string(),
                "Matches Played" => "38".to_string(),
                _ => "2".to_string(),
            };
            body.push_str(&format!("<td>{cell}</td>"));
        }
        body.push_str("</tr>");
    }
    format!("<table><thead><tr><th>Squad</th></tr></thead><tbody>{body}</tbody></table>")
}

fn squad_page(category: StatCategory, league: &League) -> String {
    format!(
        "<html><body>{}{}</body></html>",
        squad_table(category, league, &["Arsenal", "Chelsea"]),
        squad_table(category, league, &["vs Arsenal", "vs Chelsea"]),
    )
}

fn source_for(entity: Entity, league: &League, season: Season) -> FixtureSource {
    let pages = StatCategory::ALL
        .iter()
        .map(|&category| {
            let url = stats_url(BASE, league, season, category, entity);
            let html = match entity {
                Entity::Players => player_page(category, league),
                Entity::Squads => squad_page(category, league),
            };
            (url, html)
        })
        .collect();
    FixtureSource(pages)
}

/// One page per category holding the visible squad tables and the
/// commented player table, as single-competition pages do.
fn shared_source(league: &League, season: Season) -> FixtureSource {
    let pages = StatCategory::ALL
        .iter()
        .map(|&category| {
            let url = stats_url(BASE, league, season, category, Entity::Players);
            let html = format!("{}{}", squad_page(category, league), player_page(category, league));
            (url, html)
        })
        .collect();
    FixtureSource(pages)
}

#[test]
fn scrapes_and_merges_every_player_category() {
    let league = league("Premier League").unwrap();
    let season = Season::parse("2023-2024").unwrap();
    let source = source_for(Entity::Players, league, season);

    let table = scrape_players(&source, &config(), league, season).expect("offline scrape");

    assert_eq!(table.label, "2023-2024");
    assert_eq!(table.len(), 3);
    let names: Vec<&str> = (0..table.len()).map(|i| table.text(i, "Player").unwrap()).collect();
    assert_eq!(names, vec!["Alpha", "Bravo", "Charlie"]);
    let ranks: Vec<&str> = (0..table.len()).map(|i| table.text(i, "Rank").unwrap()).collect();
    assert_eq!(ranks, vec!["1", "2", "3"]);

    assert_eq!(table.text(1, "Competition"), Some("Premier League"));
    assert_eq!(table.value(1, "Matches Played"), Some(&Value::Int(25)));
    assert_eq!(table.value(0, "Goals"), Some(&Value::Float(0.0)));
    assert!(table.column("Matches").is_none());

    // 20 incomplete passes + 1 dispossessed + 1 tackled + 1 miscontrol
    assert_eq!(table.f64(0, "Turnover"), Some(23.0));
    assert_eq!(table.f64(0, "Turnover%"), Some(11.5));
    assert_eq!(table.f64(0, "Turnover/90"), Some(2.3));

    let unique: std::collections::HashSet<&String> = table.columns.iter().collect();
    assert_eq!(unique.len(), table.columns.len(), "no duplicate columns");
}

#[test]
fn parallel_fetch_gives_the_same_table() {
    let league = league("Premier League").unwrap();
    let season = Season::parse("2023-2024").unwrap();
    let source = source_for(Entity::Players, league, season);

    let sequential = scrape_players(&source, &config(), league, season).expect("sequential");
    let parallel_config = ScrapeConfig {
        fetch_parallelism: 4,
        ..config()
    };
    let parallel = scrape_players(&source, &parallel_config, league, season).expect("parallel");
    assert_eq!(sequential, parallel);
}

#[test]
fn missing_page_aborts_the_run() {
    let league = league("Premier League").unwrap();
    let season = Season::parse("2023-2024").unwrap();
    let mut source = source_for(Entity::Players, league, season);
    source
        .0
        .remove(&stats_url(BASE, league, season, StatCategory::Defense, Entity::Players));

    let err = scrape_players(&source, &config(), league, season).expect_err("defense page missing");
    assert!(matches!(err, StatsError::NotFound(_)));
}

#[test]
fn scrapes_opponent_squad_tables() {
    let league = league("Premier League").unwrap();
    let season = Season::parse("2023-2024").unwrap();
    let source = source_for(Entity::Squads, league, season);

    let table = scrape_squads(&source, &config(), league, season, SquadSide::Against).expect("offline scrape");
    assert_eq!(table.len(), 2);
    assert_eq!(table.text(0, "Squad"), Some("Arsenal"));
    assert_eq!(table.text(1, "Squad"), Some("Chelsea"));
    assert_eq!(table.f64(0, "Opponent Goals"), Some(2.0));
    assert!(table.column("Opponent Turnover").is_some());
    assert!(table.column("Opponent Minutes").is_none());

    let ours = scrape_squads(&source, &config(), league, season, SquadSide::For).expect("offline scrape");
    assert!(ours.column("Squad Goals").is_some());
}

#[test]
fn single_competition_page_serves_players_and_squads() {
    let league = league("Eredivisie").unwrap();
    let season = Season::parse("2022-2023").unwrap();
    let source = shared_source(league, season);

    let players = scrape_players(&source, &config(), league, season).expect("players");
    assert_eq!(players.len(), 3);
    // 2022-2023 ages are plain here; only hyphenated cells are split
    assert_eq!(players.value(0, "Age"), Some(&Value::Int(24)));

    let ours = scrape_squads(&source, &config(), league, season, SquadSide::For).expect("squads");
    assert_eq!(ours.len(), 2);
    let theirs = scrape_squads(&source, &config(), league, season, SquadSide::Against).expect("opponents");
    assert_eq!(theirs.text(1, "Squad"), Some("Chelsea"));
}
