use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::{Result, StatsError};
use crate::schema::{Entity, SourceVariant, StatCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct League {
    pub name: &'static str,
    pub comp_id: &'static str,
    pub slug: &'static str,
    pub variant: SourceVariant,
}

const fn single(name: &'static str, comp_id: &'static str, slug: &'static str) -> League {
    League {
        name,
        comp_id,
        slug,
        variant: SourceVariant::SingleCompetition,
    }
}

pub const LEAGUES: &[League] = &[
    single("Premier League", "9", "Premier-League"),
    single("La Liga", "12", "La-Liga"),
    single("Serie A", "11", "Serie-A"),
    single("Bundesliga", "20", "Bundesliga"),
    single("Ligue 1", "13", "Ligue-1"),
    single("Eredivisie", "23", "Eredivisie"),
    single("Primeira Liga", "32", "Primeira-Liga"),
    single("MLS", "22", "Major-League-Soccer"),
    single("Championship", "10", "Championship"),
    single("Brasil", "24", "Serie-A"),
    single("Liga MX", "31", "Liga-MX"),
    single("Primera Division", "21", "Primera-Division"),
    single("Belgian Pro League", "37", "Belgian-Pro-League"),
    single("Segunda", "17", "Segunda-Division"),
    single("Serie B", "18", "Serie-B"),
    single("Bundesliga 2", "33", "2-Bundesliga"),
    single("Ligue 2", "60", "Ligue-2"),
    League {
        name: "Big 5",
        comp_id: "Big5",
        slug: "Big-5-European-Leagues",
        variant: SourceVariant::Combined,
    },
];

/// Case-insensitive lookup by display name.
pub fn league(name: &str) -> Result<&'static League> {
    let wanted = name.trim();
    LEAGUES
        .iter()
        .find(|l| l.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| StatsError::UnknownLeague(name.to_string()))
}

/// A `YYYY-YYYY` season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Season {
    start: i32,
}

impl Season {
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || StatsError::InvalidSeason(raw.to_string());
        let (a, b) = raw.trim().split_once('-').ok_or_else(invalid)?;
        if a.len() != 4 || b.len() != 4 {
            return Err(invalid());
        }
        let start = a.parse::<i32>().map_err(|_| invalid())?;
        let end = b.parse::<i32>().map_err(|_| invalid())?;
        if end != start + 1 {
            return Err(invalid());
        }
        Ok(Self { start })
    }

    /// Season in progress on `today`; a new one starts in August.
    pub fn current(today: NaiveDate) -> Self {
        let start = if today.month() >= 8 {
            today.year()
        } else {
            today.year() - 1
        };
        Self { start }
    }

    pub fn start_year(self) -> i32 {
        self.start
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.start + 1)
    }
}

/// `{base}/{comp}/{season}/{stat}/{season}-{slug}-Stats`
///
/// Single-competition pages carry the squad tables and the commented
/// player table together. Combined pages split them under a
/// `players` or `squads` segment after the stat.
pub fn stats_url(
    base: &str,
    league: &League,
    season: Season,
    category: StatCategory,
    entity: Entity,
) -> String {
    let stat = match league.variant {
        SourceVariant::SingleCompetition => category.url_path().to_string(),
        SourceVariant::Combined => format!("{}/{}", category.url_path(), entity.url_path()),
    };
    format!(
        "{}/{}/{}/{}/{}-{}-Stats",
        base.trim_end_matches('/'),
        league.comp_id,
        season,
        stat,
        season,
        league.slug
    )
}
