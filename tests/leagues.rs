use chrono::NaiveDate;

use fbref_tables::StatsError;
use fbref_tables::leagues::{Season, league, stats_url};
use fbref_tables::schema::{Entity, SourceVariant, StatCategory};

#[test]
fn parses_well_formed_seasons() {
    let season = Season::parse("2022-2023").expect("valid season");
    assert_eq!(season.start_year(), 2022);
    assert_eq!(season.to_string(), "2022-2023");
}

#[test]
fn rejects_malformed_seasons() {
    for raw in ["2022", "2022-2024", "22-23", "2022/2023", "abcd-efgh", ""] {
        assert!(
            matches!(Season::parse(raw), Err(StatsError::InvalidSeason(_))),
            "{raw:?} should be rejected"
        );
    }
}

#[test]
fn current_season_rolls_over_in_august() {
    let july = NaiveDate::from_ymd_opt(2024, 7, 31).unwrap();
    let august = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
    assert_eq!(Season::current(july).to_string(), "2023-2024");
    assert_eq!(Season::current(august).to_string(), "2024-2025");
}

#[test]
fn league_lookup_is_case_insensitive() {
    let epl = league("premier league").expect("known league");
    assert_eq!(epl.comp_id, "9");
    assert_eq!(epl.variant, SourceVariant::SingleCompetition);

    let big5 = league("Big 5").expect("known league");
    assert_eq!(big5.variant, SourceVariant::Combined);

    assert!(matches!(league("Sunday League"), Err(StatsError::UnknownLeague(_))));
}

#[test]
fn builds_stats_urls() {
    let season = Season::parse("2023-2024").unwrap();
    let url = stats_url(
        "https://fbref.com/en/comps/",
        league("Eredivisie").unwrap(),
        season,
        StatCategory::PlayingTime,
        Entity::Players,
    );
    assert_eq!(
        url,
        "https://fbref.com/en/comps/23/2023-2024/playingtime/2023-2024-Eredivisie-Stats"
    );

    let url = stats_url(
        "https://fbref.com/en/comps",
        league("Big 5").unwrap(),
        season,
        StatCategory::PassTypes,
        Entity::Squads,
    );
    assert_eq!(
        url,
        "https://fbref.com/en/comps/Big5/2023-2024/passing_types/squads/2023-2024-Big-5-European-Leagues-Stats"
    );
}

#[test]
fn single_competition_pages_serve_players_and_squads_together() {
    let season = Season::parse("2022-2023").unwrap();
    let eredivisie = league("Eredivisie").unwrap();
    let players = stats_url(
        "https://fbref.com/en/comps",
        eredivisie,
        season,
        StatCategory::Standard,
        Entity::Players,
    );
    let squads = stats_url(
        "https://fbref.com/en/comps",
        eredivisie,
        season,
        StatCategory::Standard,
        Entity::Squads,
    );
    assert_eq!(players, squads);
    assert_eq!(
        squads,
        "https://fbref.com/en/comps/23/2022-2023/stats/2022-2023-Eredivisie-Stats"
    );

    let big5 = league("Big 5").unwrap();
    let players = stats_url("https://fbref.com/en/comps", big5, season, StatCategory::Standard, Entity::Players);
    let squads = stats_url("https://fbref.com/en/comps", big5, season, StatCategory::Standard, Entity::Squads);
    assert!(players.contains("/stats/players/"));
    assert!(squads.contains("/stats/squads/"));
}
