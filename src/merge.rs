//! Join per-category tables into one wide table and type it.
//!
//! Rows are matched on the synthetic `Rank`, which only lines up because
//! fbref lists the same population in the same order on every stat page
//! of a scope. The playing-time page is the exception: it also lists
//! squad members who never played. Those rows are removed before the
//! join and every table touched is re-ranked, then the identity columns
//! of the joined rows are compared so a broken ordering is caught.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::error::{Result, StatsError};
use crate::schema::{self, Entity, NumberFormat, RANK, SourceVariant, StatCategory};
use crate::table::{CategoryTable, Table, Value};

/// Seasons whose player ages are rendered as `years-days`.
pub const HYPHENATED_AGE_SEASONS: &[&str] = &["2022-2023"];

const MATCHES_PLAYED: &str = "Matches Played";

/// Columns compared row-by-row after the join.
const ALIGNMENT_COLUMNS: &[&str] = &["Player", "Squad"];

/// Squad columns that only make sense per player, dropped after a squad merge.
const SQUAD_DROPPED: &[&str] = &["# Player", MATCHES_PLAYED, "Minutes", "Starts"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignmentPolicy {
    /// Mismatched identity columns fail the merge.
    #[default]
    Strict,
    /// Mismatches are logged and the merge continues.
    Warn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeFormat {
    Plain,
    /// `26-143`: only the part before the hyphen is kept.
    Hyphenated,
}

/// What a merge covers and how its text is formatted.
#[derive(Debug, Clone)]
pub struct Scope {
    pub label: String,
    pub number_format: NumberFormat,
    pub age_format: AgeFormat,
    pub alignment: AlignmentPolicy,
}

impl Scope {
    pub fn new(label: impl Into<String>, variant: SourceVariant) -> Self {
        Self {
            label: label.into(),
            number_format: variant.number_format(),
            age_format: AgeFormat::Plain,
            alignment: AlignmentPolicy::Strict,
        }
    }

    /// Scope for one season; picks the age format the site used that year.
    pub fn season(season: &str, variant: SourceVariant) -> Self {
        let mut scope = Self::new(season, variant);
        if HYPHENATED_AGE_SEASONS.contains(&season) {
            scope.age_format = AgeFormat::Hyphenated;
        }
        scope
    }

    pub fn with_age_format(mut self, age_format: AgeFormat) -> Self {
        self.age_format = age_format;
        self
    }

    pub fn with_alignment(mut self, alignment: AlignmentPolicy) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Declares how column-name collisions between categories are treated.
#[derive(Debug, Clone, Copy)]
pub struct MergeSpec {
    /// Never carried into the merged table.
    pub dropped: &'static [&'static str],
    /// Expected in more than one category; the first occurrence is kept.
    pub shared: &'static [&'static str],
}

impl MergeSpec {
    pub const DEFAULT: MergeSpec = MergeSpec {
        dropped: &["Matches"],
        shared: &[
            RANK,
            "Player",
            "Nation",
            "Position",
            "Squad",
            "Competition",
            "Age",
            "Born",
            "90s",
            "# Player",
            "Possession",
            MATCHES_PLAYED,
            "Starts",
            "Minutes",
            "Goals",
            "Assists",
            "Penalty Goals",
            "Penalty Attempted",
            "Yellow Cards",
            "Red Cards",
            "xG",
            "npxG",
            "xAG",
            "Progressive Carries",
            "Progressive Passes",
            "Progressive Passes Received",
            "Attempted Passes Total",
            "Completed Passes Total",
            "Crosses",
            "Interceptions",
            "Tackles Won",
        ],
    };

    fn is_shared(&self, column: &str) -> bool {
        self.shared.contains(&column)
    }

    fn is_dropped(&self, column: &str) -> bool {
        self.dropped.contains(&column)
    }
}

/// Which side of the squad pages a table describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquadSide {
    For,
    Against,
}

impl SquadSide {
    /// Position of the table on a squad stats page.
    pub fn table_index(self) -> usize {
        match self {
            SquadSide::For => 0,
            SquadSide::Against => 1,
        }
    }

    pub fn column_prefix(self) -> &'static str {
        match self {
            SquadSide::For => "Squad ",
            SquadSide::Against => "Opponent ",
        }
    }
}

/// Remove rows with zero matches played and regenerate `Rank`.
///
/// Returns the removed rows.
pub fn drop_inactive_rows(table: &mut CategoryTable) -> Vec<Vec<String>> {
    let Some(col) = table.column(MATCHES_PLAYED) else {
        return Vec::new();
    };
    let (kept, removed): (Vec<_>, Vec<_>) = table
        .rows
        .drain(..)
        .partition(|row| row.get(col).map(|v| v.trim() != "0").unwrap_or(true));
    table.rows = kept;
    table.rerank();
    removed
}

pub fn merge(tables: Vec<CategoryTable>, scope: &Scope) -> Result<Table> {
    merge_with_spec(tables, scope, &MergeSpec::DEFAULT)
}

pub fn merge_with_spec(
    mut tables: Vec<CategoryTable>,
    scope: &Scope,
    spec: &MergeSpec,
) -> Result<Table> {
    let Some(entity) = tables.first().map(|t| t.entity) else {
        return Ok(Table {
            label: scope.label.clone(),
            columns: Vec::new(),
            rows: Vec::new(),
        });
    };

    for table in &tables {
        check_shape(table)?;
    }
    remove_inactive_population(&mut tables, entity);

    let (columns, text_rows) = join_on_rank(&tables, spec, scope.alignment)?;
    let mut rows = Vec::with_capacity(text_rows.len());
    let age_col = columns.iter().position(|c| c == "Age");
    for (idx, mut row) in text_rows.into_iter().enumerate() {
        if scope.age_format == AgeFormat::Hyphenated {
            if let Some(col) = age_col {
                let age = row[col].split('-').next().unwrap_or_default().to_string();
                row[col] = age;
            }
        }
        let typed = row
            .into_iter()
            .zip(&columns)
            .map(|(cell, column)| {
                if schema::is_identity(column) {
                    Ok(Value::Text(cell))
                } else {
                    cast_cell(
                        &cell,
                        column,
                        idx + 1,
                        entity.is_integer_column(column),
                        scope.number_format,
                    )
                }
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(typed);
    }

    let mut table = Table {
        label: scope.label.clone(),
        columns,
        rows,
    };
    add_derived_metrics(&mut table);
    debug!(
        label = %table.label,
        rows = table.len(),
        columns = table.columns.len(),
        "merged tables"
    );
    Ok(table)
}

/// Merge squad tables, drop per-player columns and prefix the rest.
pub fn merge_squads(tables: Vec<CategoryTable>, scope: &Scope, side: SquadSide) -> Result<Table> {
    let merged = merge(tables, scope)?;
    let keep: Vec<usize> = merged
        .columns
        .iter()
        .enumerate()
        .filter(|(_, c)| !SQUAD_DROPPED.contains(&c.as_str()))
        .map(|(idx, _)| idx)
        .collect();

    let columns = keep
        .iter()
        .map(|&idx| {
            let name = &merged.columns[idx];
            if name == "Squad" || name == RANK || name == schema::COMPETITION {
                name.clone()
            } else {
                format!("{}{}", side.column_prefix(), name)
            }
        })
        .collect();
    let rows = merged
        .rows
        .into_iter()
        .map(|row| keep.iter().map(|&idx| row[idx].clone()).collect())
        .collect();

    Ok(Table {
        label: merged.label,
        columns,
        rows,
    })
}

/// Zero-minute rows come off the playing-time table, and the same
/// players come off any other table that happens to list them.
fn remove_inactive_population(tables: &mut [CategoryTable], entity: Entity) {
    let Some(pt_idx) = tables
        .iter()
        .position(|t| t.category == StatCategory::PlayingTime)
    else {
        return;
    };

    let removed = drop_inactive_rows(&mut tables[pt_idx]);
    if removed.is_empty() {
        return;
    }
    debug!(removed = removed.len(), "dropped rows without matches played");

    let key_columns: Vec<&str> = entity
        .key_columns()
        .iter()
        .copied()
        .filter(|c| tables[pt_idx].column(c).is_some())
        .collect();
    if key_columns.is_empty() {
        return;
    }
    let pt_key_idx: Vec<usize> = key_columns
        .iter()
        .filter_map(|c| tables[pt_idx].column(c))
        .collect();
    let removed_keys: HashSet<Vec<String>> = removed
        .iter()
        .map(|row| pt_key_idx.iter().map(|&i| row[i].clone()).collect())
        .collect();

    for (idx, table) in tables.iter_mut().enumerate() {
        if idx == pt_idx {
            continue;
        }
        let Some(key_idx) = key_columns
            .iter()
            .map(|c| table.column(c))
            .collect::<Option<Vec<usize>>>()
        else {
            continue;
        };
        let before = table.rows.len();
        table.rows.retain(|row| {
            let key: Vec<String> = key_idx.iter().map(|&i| row[i].clone()).collect();
            !removed_keys.contains(&key)
        });
        if table.rows.len() != before {
            debug!(
                category = %table.category,
                removed = before - table.rows.len(),
                "dropped inactive rows from category"
            );
            table.rerank();
        }
    }
}

/// Every row must have one cell per column.
fn check_shape(table: &CategoryTable) -> Result<()> {
    let expected = table.columns.len();
    match table.rows.iter().position(|row| row.len() != expected) {
        Some(idx) => Err(StatsError::SchemaMismatch {
            category: table.category,
            row: idx + 1,
            expected,
            found: table.rows[idx].len(),
        }),
        None => Ok(()),
    }
}

type JoinedText = (Vec<String>, Vec<Vec<String>>);

fn join_on_rank(tables: &[CategoryTable], spec: &MergeSpec, alignment: AlignmentPolicy) -> Result<JoinedText> {
    // (table, column) pairs in output order.
    let mut plan: Vec<(usize, usize)> = Vec::new();
    let mut columns: Vec<String> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for (t_idx, table) in tables.iter().enumerate() {
        for (c_idx, name) in table.columns.iter().enumerate() {
            if spec.is_dropped(name) {
                continue;
            }
            if !seen.insert(name.as_str()) {
                if !spec.is_shared(name) {
                    debug!(
                        column = %name,
                        category = %table.category,
                        "undeclared column collision, keeping first"
                    );
                }
                continue;
            }
            plan.push((t_idx, c_idx));
            columns.push(name.clone());
        }
    }

    let rank_maps: Vec<HashMap<&str, usize>> = tables
        .iter()
        .map(|table| {
            let Some(col) = table.column(RANK) else {
                return HashMap::new();
            };
            table
                .rows
                .iter()
                .enumerate()
                .map(|(idx, row)| (row[col].as_str(), idx))
                .collect()
        })
        .collect();

    let base = &tables[0];
    let base_rank = base
        .column(RANK)
        .ok_or_else(|| StatsError::MissingColumn(RANK.to_string()))?;

    let mut rows = Vec::new();
    for base_row in &base.rows {
        let rank = base_row[base_rank].as_str();
        let Some(row_idx) = rank_maps
            .iter()
            .map(|m| m.get(rank).copied())
            .collect::<Option<Vec<usize>>>()
        else {
            continue;
        };
        check_alignment(tables, &row_idx, rank, alignment)?;
        rows.push(
            plan.iter()
                .map(|&(t, c)| tables[t].rows[row_idx[t]][c].clone())
                .collect(),
        );
    }
    Ok((columns, rows))
}

fn check_alignment(
    tables: &[CategoryTable],
    row_idx: &[usize],
    rank: &str,
    alignment: AlignmentPolicy,
) -> Result<()> {
    let base = &tables[0];
    for column in ALIGNMENT_COLUMNS {
        let Some(expected) = base.cell(row_idx[0], column) else {
            continue;
        };
        for (t_idx, table) in tables.iter().enumerate().skip(1) {
            let Some(found) = table.cell(row_idx[t_idx], column) else {
                continue;
            };
            if found == expected {
                continue;
            }
            match alignment {
                AlignmentPolicy::Strict => {
                    return Err(StatsError::MisalignedRows {
                        category: table.category,
                        rank: rank.parse().unwrap_or_default(),
                        column: column.to_string(),
                        expected: expected.to_string(),
                        found: found.to_string(),
                    });
                }
                AlignmentPolicy::Warn => warn!(
                    category = %table.category,
                    rank,
                    column,
                    expected,
                    found,
                    "rows out of alignment"
                ),
            }
        }
    }
    Ok(())
}

/// Cast one text cell. `row` is 1-based and only used for errors.
pub fn cast_cell(
    raw: &str,
    column: &str,
    row: usize,
    integer: bool,
    format: NumberFormat,
) -> Result<Value> {
    let cleaned: String = match format.thousands_separator {
        Some(sep) => raw.trim().chars().filter(|c| *c != sep).collect(),
        None => raw.trim().to_string(),
    };
    let err = || StatsError::NumericFormat {
        column: column.to_string(),
        row,
        value: raw.to_string(),
    };
    if integer {
        cleaned.parse::<i64>().map(Value::Int).map_err(|_| err())
    } else {
        match cleaned.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Value::Float(v)),
            _ => Err(err()),
        }
    }
}

/// Balls lost: incomplete passes, dispossessions, failed take-ons and
/// miscontrols.
pub fn turnover(
    attempted_passes: f64,
    completed_passes: f64,
    dispossessed: f64,
    takeons_tackled: f64,
    miscontrols: f64,
) -> f64 {
    (attempted_passes - completed_passes) + dispossessed + takeons_tackled + miscontrols
}

pub fn turnover_pct(turnover: f64, touches: f64) -> f64 {
    if touches == 0.0 {
        return 0.0;
    }
    round2(turnover / touches * 100.0)
}

pub fn turnover_per90(turnover: f64, nineties: f64) -> f64 {
    if nineties == 0.0 {
        return 0.0;
    }
    round2(turnover / nineties)
}

/// Append `Turnover`, `Turnover%` and `Turnover/90` when their inputs exist.
pub fn add_derived_metrics(table: &mut Table) {
    let inputs = [
        "Attempted Passes Total",
        "Completed Passes Total",
        "Dispossessed",
        "TakeOns Tackled",
        "Miscontrols",
    ];
    let Some(idx) = inputs
        .iter()
        .map(|c| table.column(c))
        .collect::<Option<Vec<usize>>>()
    else {
        return;
    };
    let touches = table.column("Touches");
    let nineties = table.column("90s");

    for row in &mut table.rows {
        let v: Vec<f64> = idx.iter().map(|&c| number_at(row, c)).collect();
        let t = turnover(v[0], v[1], v[2], v[3], v[4]);
        let pct = touches.map(|c| turnover_pct(t, number_at(row, c)));
        let per90 = nineties.map(|c| turnover_per90(t, number_at(row, c)));
        row.push(Value::Float(t));
        if let Some(v) = pct {
            row.push(Value::Float(v));
        }
        if let Some(v) = per90 {
            row.push(Value::Float(v));
        }
    }

    table.columns.push("Turnover".to_string());
    if touches.is_some() {
        table.columns.push("Turnover%".to_string());
    }
    if nineties.is_some() {
        table.columns.push("Turnover/90".to_string());
    }
}

fn number_at(row: &[Value], col: usize) -> f64 {
    row.get(col).and_then(Value::as_f64).unwrap_or(0.0)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
