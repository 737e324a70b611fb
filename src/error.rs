use thiserror::Error;

use crate::schema::StatCategory;

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("table not found: {0}")]
    NotFound(String),

    #[error("{category} row {row}: expected {expected} cells, found {found}")]
    SchemaMismatch {
        category: StatCategory,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("column {column:?} row {row}: {value:?} is not a number")]
    NumericFormat {
        column: String,
        row: usize,
        value: String,
    },

    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("{category} rank {rank}: {column} {found:?} does not match {expected:?}")]
    MisalignedRows {
        category: StatCategory,
        rank: usize,
        column: String,
        expected: String,
        found: String,
    },

    #[error("unknown league: {0}")]
    UnknownLeague(String),

    #[error("invalid season {0:?}, expected YYYY-YYYY")]
    InvalidSeason(String),

    #[error("bad selector: {0}")]
    Selector(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}
