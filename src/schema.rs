//! Flat column headers for every fbref stats table.
//!
//! fbref renders a two-row header (a grouping row over the real column
//! names) and reuses short names such as `Cmp` or `Att` across groups.
//! The registry replaces that header with one ordered list of readable
//! names per (category, entity, source variant).

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Rank cell rendered by the site; replaced by the synthetic `Rank`.
pub const RANK_PLACEHOLDER: &str = "Rk";
/// Per-row competition cell on combined pages; replaced by `Competition`.
pub const COMP_PLACEHOLDER: &str = "Comp";

pub const RANK: &str = "Rank";
pub const COMPETITION: &str = "Competition";

/// Columns that stay text through casting.
pub const IDENTITY_COLUMNS: &[&str] = &[RANK, "Player", "Nation", "Position", "Squad", COMPETITION];

/// Player columns cast to integers; every other numeric column is a float.
pub const PLAYER_INTEGER_COLUMNS: &[&str] = &[
    "Age",
    "Born",
    "Matches Played",
    "Starts",
    "Minutes",
    "Minutes per Match",
    "Minutes per Start",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatCategory {
    Standard,
    Shooting,
    Passing,
    PassTypes,
    GoalShotCreation,
    Defense,
    Possession,
    PlayingTime,
    Misc,
}

impl StatCategory {
    /// Merge order: the first table wins column collisions.
    pub const ALL: [StatCategory; 9] = [
        StatCategory::Standard,
        StatCategory::Shooting,
        StatCategory::Passing,
        StatCategory::PassTypes,
        StatCategory::GoalShotCreation,
        StatCategory::Defense,
        StatCategory::Possession,
        StatCategory::Misc,
        StatCategory::PlayingTime,
    ];

    pub fn table_id(self) -> &'static str {
        match self {
            StatCategory::Standard => "stats_standard",
            StatCategory::Shooting => "stats_shooting",
            StatCategory::Passing => "stats_passing",
            StatCategory::PassTypes => "stats_passing_types",
            StatCategory::GoalShotCreation => "stats_gca",
            StatCategory::Defense => "stats_defense",
            StatCategory::Possession => "stats_possession",
            StatCategory::PlayingTime => "stats_playing_time",
            StatCategory::Misc => "stats_misc",
        }
    }

    pub fn url_path(self) -> &'static str {
        match self {
            StatCategory::Standard => "stats",
            StatCategory::Shooting => "shooting",
            StatCategory::Passing => "passing",
            StatCategory::PassTypes => "passing_types",
            StatCategory::GoalShotCreation => "gca",
            StatCategory::Defense => "defense",
            StatCategory::Possession => "possession",
            StatCategory::PlayingTime => "playingtime",
            StatCategory::Misc => "misc",
        }
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatCategory::Standard => "standard",
            StatCategory::Shooting => "shooting",
            StatCategory::Passing => "passing",
            StatCategory::PassTypes => "pass types",
            StatCategory::GoalShotCreation => "goal and shot creation",
            StatCategory::Defense => "defense",
            StatCategory::Possession => "possession",
            StatCategory::PlayingTime => "playing time",
            StatCategory::Misc => "misc",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entity {
    Players,
    Squads,
}

impl Entity {
    pub fn url_path(self) -> &'static str {
        match self {
            Entity::Players => "players",
            Entity::Squads => "squads",
        }
    }

    /// Columns that identify one row across categories.
    pub fn key_columns(self) -> &'static [&'static str] {
        match self {
            Entity::Players => &["Player", "Squad", "Born"],
            Entity::Squads => &["Squad"],
        }
    }

    pub fn is_integer_column(self, column: &str) -> bool {
        match self {
            Entity::Players => PLAYER_INTEGER_COLUMNS.contains(&column),
            Entity::Squads => false,
        }
    }
}

/// Which flavour of fbref page a table comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceVariant {
    /// One league's pages.
    SingleCompetition,
    /// The "Big 5" pages that list several leagues in one table.
    Combined,
}

impl SourceVariant {
    pub fn number_format(self) -> NumberFormat {
        match self {
            SourceVariant::SingleCompetition => NumberFormat {
                thousands_separator: None,
            },
            SourceVariant::Combined => NumberFormat {
                thousands_separator: Some(','),
            },
        }
    }
}

/// Locale rules applied before numeric casting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub thousands_separator: Option<char>,
}

pub fn is_identity(column: &str) -> bool {
    IDENTITY_COLUMNS.contains(&column)
}

pub fn is_placeholder(column: &str) -> bool {
    column == RANK_PLACEHOLDER || column == COMP_PLACEHOLDER
}

/// Ordered flat header for one table, placeholders included.
pub fn columns(category: StatCategory, entity: Entity, variant: SourceVariant) -> &'static [&'static str] {
    REGISTRY
        .get(&(category, entity, variant))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

type SchemaKey = (StatCategory, Entity, SourceVariant);

static REGISTRY: Lazy<HashMap<SchemaKey, Vec<&'static str>>> = Lazy::new(|| {
    let mut out = HashMap::new();
    for category in StatCategory::ALL {
        let player = player_body(category);
        let squad = squad_body(category);

        let mut single = vec![RANK_PLACEHOLDER];
        single.extend_from_slice(player);
        out.insert((category, Entity::Players, SourceVariant::SingleCompetition), single);

        let mut combined = vec![RANK_PLACEHOLDER];
        combined.extend(with_comp_after_squad(player));
        out.insert((category, Entity::Players, SourceVariant::Combined), combined);

        out.insert(
            (category, Entity::Squads, SourceVariant::SingleCompetition),
            squad.to_vec(),
        );

        let mut combined = vec![RANK_PLACEHOLDER];
        combined.extend(with_comp_after_squad(squad));
        out.insert((category, Entity::Squads, SourceVariant::Combined), combined);
    }
    out
});

fn with_comp_after_squad(body: &[&'static str]) -> Vec<&'static str> {
    let mut out = Vec::with_capacity(body.len() + 1);
    for col in body {
        out.push(*col);
        if *col == "Squad" {
            out.push(COMP_PLACEHOLDER);
        }
    }
    out
}

fn player_body(category: StatCategory) -> &'static [&'static str] {
    match category {
        StatCategory::Standard => PLAYER_STANDARD,
        StatCategory::Shooting => PLAYER_SHOOTING,
        StatCategory::Passing => PLAYER_PASSING,
        StatCategory::PassTypes => PLAYER_PASS_TYPES,
        StatCategory::GoalShotCreation => PLAYER_GCA,
        StatCategory::Defense => PLAYER_DEFENSE,
        StatCategory::Possession => PLAYER_POSSESSION,
        StatCategory::PlayingTime => PLAYER_PLAYING_TIME,
        StatCategory::Misc => PLAYER_MISC,
    }
}

fn squad_body(category: StatCategory) -> &'static [&'static str] {
    match category {
        StatCategory::Standard => SQUAD_STANDARD,
        StatCategory::Shooting => SQUAD_SHOOTING,
        StatCategory::Passing => SQUAD_PASSING,
        StatCategory::PassTypes => SQUAD_PASS_TYPES,
        StatCategory::GoalShotCreation => SQUAD_GCA,
        StatCategory::Defense => SQUAD_DEFENSE,
        StatCategory::Possession => SQUAD_POSSESSION,
        StatCategory::PlayingTime => SQUAD_PLAYING_TIME,
        StatCategory::Misc => SQUAD_MISC,
    }
}

const PLAYER_STANDARD: &[&str] = &[
    "Player", "Nation", "Position", "Squad", "Age", "Born", "Matches Played", "Starts", "Minutes",
    "90s", "Goals", "Assists", "G+A", "Non Penalty Goals", "Penalty Goals", "Penalty Attempted",
    "Yellow Cards", "Red Cards", "xG", "npxG", "xAG", "npxG+xAG", "Progressive Carries",
    "Progressive Passes", "Progressive Passes Received", "Goals/90", "Assists/90", "G+A/90",
    "Non Penalty Goals/90", "Non Penalty G+A/90", "xG/90", "xAG/90", "xG+xAG/90", "npxG/90",
    "npxG+xAG/90", "Matches",
];

const PLAYER_SHOOTING: &[&str] = &[
    "Player", "Nation", "Position", "Squad", "Age", "Born", "90s", "Goals", "Shots",
    "Shots on Target", "Shots on Target %", "Shots/90", "Shots on Target/90", "Goals/Shot",
    "Goals/Shot on Target", "Average Shot Distance", "Free Kicks", "Penalty Goals",
    "Penalty Attempted", "xG", "npxG", "npxG/Shot", "Goals - xG", "Non Penalty Goals - npxG",
    "Matches",
];

const PLAYER_PASSING: &[&str] = &[
    "Player", "Nation", "Position", "Squad", "Age", "Born", "90s", "Completed Passes Total",
    "Attempted Passes Total", "Completed Passes Total%", "Total Passing Distance",
    "Progressive Passing Distance", "Completed Short Passes", "Attempted Short Passes",
    "Completed Short Passes%", "Completed Medium Passes", "Attempted Medium Passes",
    "Completed Medium Passes%", "Completed Long Passes", "Attempted Long Passes",
    "Completed Long Passes%", "Assists", "xAG", "xA", "A-xAG", "Key Passes",
    "Passes Into Final 3rd", "Passes Into Pen Area", "Crossing Into Pen Area",
    "Progressive Passes", "Matches",
];

const PLAYER_PASS_TYPES: &[&str] = &[
    "Player", "Nation", "Position", "Squad", "Age", "Born", "90s", "Attempted Passes Total",
    "Live Ball Passes", "Dead Ball Passes", "Free Kicks Passes", "Through Balls", "Switches",
    "Crosses", "Throw Ins", "Corner Kicks", "Inswinging Corner", "Outswinging Corner",
    "Straight Corner", "Completed Passes Total", "Passes Offside", "Passes Blocked", "Matches",
];

const PLAYER_GCA: &[&str] = &[
    "Player", "Nation", "Position", "Squad", "Age", "Born", "90s", "SCA", "SCA90", "SCAPassLive",
    "SCAPassDead", "SCATakeOns", "SCAShot", "SCAFouled", "SCADefAct", "GCA", "GCA90",
    "GCAPassLive", "GCAPassDead", "GCATakeOns", "GCAShot", "GCAFouled", "GCADefAct", "Matches",
];

const PLAYER_DEFENSE: &[&str] = &[
    "Player", "Nation", "Position", "Squad", "Age", "Born", "90s", "Tackles", "Tackles Won",
    "Def 3rd Tackles", "Mid 3rd Tackles", "Att 3rd Tackles", "Dribblers Tackled",
    "Dribbles Challenged", "Dribbles Challenged%", "Challenges Lost", "Blocks", "Shots Blocked",
    "Pass Blocked", "Interceptions", "Interceptions+Tackles", "Clearances", "Errors", "Matches",
];

const PLAYER_POSSESSION: &[&str] = &[
    "Player", "Nation", "Position", "Squad", "Age", "Born", "90s", "Touches", "Def Pen Touches",
    "Def 3rd Touches", "Mid 3rd Touches", "Att 3rd Touches", "Att Pen Touches", "Live Touches",
    "TakeOns Attempted", "Successful TakeOns", "Successful TakeOns%", "TakeOns Tackled",
    "TakeOns Tackled %", "Carries", "Total Carries Distance", "Progressive Carries Distance",
    "Progressive Carries", "Carries to Final Third", "Carries to Pen Area", "Miscontrols",
    "Dispossessed", "Passes Received", "Progressive Passes Received", "Matches",
];

const PLAYER_PLAYING_TIME: &[&str] = &[
    "Player", "Nation", "Position", "Squad", "Age", "Born", "Matches Played", "Minutes",
    "Minutes per Match", "Minutes%", "90s", "Starts", "Minutes per Start", "Complete Match",
    "Subs", "Minutes per Subs", "Unused Subs", "PPM", "onG", "onGA", "Plus-Minus",
    "Plus-Minus/90", "On-Off", "onxG", "onxGA", "xG+/-", "xG+/-90", "xG On-Off", "Matches",
];

const PLAYER_MISC: &[&str] = &[
    "Player", "Nation", "Position", "Squad", "Age", "Born", "90s", "Yellow Cards", "Red Cards",
    "2nd Yellow", "Fouls", "Fouled", "Offsides", "Crosses", "Interceptions", "Tackles Won",
    "Pen Won", "Pen Conceded", "Own Goals", "Recoveries", "Aerial Won", "Aerial Lost",
    "Aerial Won%", "Matches",
];

const SQUAD_STANDARD: &[&str] = &[
    "Squad", "# Player", "Age", "Possession", "Matches Played", "Starts", "Minutes", "90s",
    "Goals", "Assists", "G+A", "Non Penalty Goals", "Penalty Goals", "Penalty Attempted",
    "Yellow Cards", "Red Cards", "xG", "npxG", "xAG", "npxG+xAG", "Progressive Carries",
    "Progressive Passes", "Goals/90", "Assists/90", "G+A/90", "Non Penalty Goals/90",
    "Non Penalty G+A/90", "xG/90", "xAG/90", "xG+xAG/90", "npxG/90", "npxG+xAG/90",
];

const SQUAD_SHOOTING: &[&str] = &[
    "Squad", "# Player", "90s", "Goals", "Shots", "Shots on Target", "Shots on Target %",
    "Shots/90", "Shots on Target/90", "Goals/Shot", "Goals/Shot on Target",
    "Average Shot Distance", "Free Kicks", "Penalty Goals", "Penalty Attempted", "xG", "npxG",
    "npxG/Shot", "Goals - xG", "Non Penalty Goals - npxG",
];

const SQUAD_PASSING: &[&str] = &[
    "Squad", "# Player", "90s", "Completed Passes Total", "Attempted Passes Total",
    "Completed Passes Total%", "Total Passing Distance", "Progressive Passing Distance",
    "Completed Short Passes", "Attempted Short Passes", "Completed Short Passes%",
    "Completed Medium Passes", "Attempted Medium Passes", "Completed Medium Passes%",
    "Completed Long Passes", "Attempted Long Passes", "Completed Long Passes%", "Assists", "xAG",
    "xA", "A-xAG", "Key Passes", "Passes Into Final 3rd", "Passes Into Pen Area",
    "Crossing Into Pen Area", "Progressive Passes",
];

const SQUAD_PASS_TYPES: &[&str] = &[
    "Squad", "# Player", "90s", "Attempted Passes Total", "Live Ball Passes", "Dead Ball Passes",
    "Free Kicks Passes", "Through Balls", "Switches", "Crosses", "Throw Ins", "Corner Kicks",
    "Inswinging Corner", "Outswinging Corner", "Straight Corner", "Completed Passes Total",
    "Passes Offside", "Passes Blocked",
];

const SQUAD_GCA: &[&str] = &[
    "Squad", "# Player", "90s", "SCA", "SCA90", "SCAPassLive", "SCAPassDead", "SCATakeOns",
    "SCAShot", "SCAFouled", "SCADefAct", "GCA", "GCA90", "GCAPassLive", "GCAPassDead",
    "GCATakeOns", "GCAShot", "GCAFouled", "GCADefAct",
];

const SQUAD_DEFENSE: &[&str] = &[
    "Squad", "# Player", "90s", "Tackles", "Tackles Won", "Def 3rd Tackles", "Mid 3rd Tackles",
    "Att 3rd Tackles", "Dribblers Tackled", "Dribbles Challenged", "Dribbles Challenged%",
    "Challenges Lost", "Blocks", "Shots Blocked", "Pass Blocked", "Interceptions",
    "Interceptions+Tackles", "Clearances", "Errors",
];

const SQUAD_POSSESSION: &[&str] = &[
    "Squad", "# Player", "Possession", "90s", "Touches", "Def Pen Touches", "Def 3rd Touches",
    "Mid 3rd Touches", "Att 3rd Touches", "Att Pen Touches", "Live Touches", "TakeOns Attempted",
    "Successful TakeOns", "Successful TakeOns%", "TakeOns Tackled", "TakeOns Tackled %",
    "Carries", "Total Carries Distance", "Progressive Carries Distance", "Progressive Carries",
    "Carries to Final Third", "Carries to Pen Area", "Miscontrols", "Dispossessed",
    "Passes Received", "Progressive Passes Received",
];

const SQUAD_PLAYING_TIME: &[&str] = &[
    "Squad", "# Player", "Age", "Matches Played", "Minutes", "Minutes per Match", "Minutes%",
    "90s", "Starts", "Minutes per Start", "Complete Match", "Subs", "Minutes per Subs",
    "Unused Subs", "PPM", "onG", "onGA", "Plus-Minus", "Plus-Minus/90", "onxG", "onxGA", "xG+/-",
    "xG+/-90",
];

const SQUAD_MISC: &[&str] = &[
    "Squad", "# Player", "90s", "Yellow Cards", "Red Cards", "2nd Yellow", "Fouls", "Fouled",
    "Offsides", "Crosses", "Interceptions", "Tackles Won", "Pen Won", "Pen Conceded", "Own Goals",
    "Recoveries", "Aerial Won", "Aerial Lost", "Aerial Won%",
];
