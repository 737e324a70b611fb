use crate::error::{Result, StatsError};
use crate::table::{Table, Value};

/// Columns copied through unchanged.
pub const PROFILE_IDENTITY: &[&str] = &["Player", "Age", "Position", "Squad"];

/// Metrics where a smaller raw value is the better one.
pub const LOWER_IS_BETTER: &[&str] = &["Turnover%", "onxGA"];

pub const RATING: &str = "Rating";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherBetter,
    LowerBetter,
}

impl Direction {
    pub fn for_column(column: &str) -> Self {
        if LOWER_IS_BETTER.contains(&column) {
            Direction::LowerBetter
        } else {
            Direction::HigherBetter
        }
    }

    fn apply(self, v: f64) -> f64 {
        match self {
            Direction::HigherBetter => v,
            Direction::LowerBetter => -v,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProfileQuery {
    pub columns: Vec<String>,
    pub position: String,
    pub age_min: i64,
    pub age_max: i64,
    pub min_minutes: i64,
}

impl ProfileQuery {
    pub fn new<S: AsRef<str>>(columns: &[S], position: &str) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            position: position.to_string(),
            age_min: 16,
            age_max: 45,
            min_minutes: 0,
        }
    }

    pub fn ages(mut self, min: i64, max: i64) -> Self {
        self.age_min = min;
        self.age_max = max;
        self
    }

    pub fn min_minutes(mut self, minutes: i64) -> Self {
        self.min_minutes = minutes;
        self
    }
}

/// Percentile profile of one position group.
///
/// Rows are filtered by position, age range and minutes; every selected
/// metric is replaced by its percentile (0-100) within the filtered group
/// and `Rating` is the mean of those percentiles, rounded half to even.
pub fn profile(table: &Table, query: &ProfileQuery) -> Result<Table> {
    let position_col = require(table, "Position")?;
    let age_col = require(table, "Age")?;
    let minutes_col = require(table, "Minutes")?;
    let selected = query
        .columns
        .iter()
        .map(|c| require(table, c))
        .collect::<Result<Vec<usize>>>()?;

    let population: Vec<&Vec<Value>> = table
        .rows
        .iter()
        .filter(|row| {
            let position_ok = row[position_col].as_str() == Some(query.position.as_str());
            let age = row[age_col].as_f64().unwrap_or(f64::NAN);
            let minutes = row[minutes_col].as_f64().unwrap_or(f64::NAN);
            position_ok
                && age >= query.age_min as f64
                && age <= query.age_max as f64
                && minutes >= query.min_minutes as f64
        })
        .collect();

    let mut columns = query.columns.clone();
    columns.push(RATING.to_string());

    let mut rows: Vec<Vec<Value>> = population
        .iter()
        .map(|row| selected.iter().map(|&c| row[c].clone()).collect())
        .collect();

    let mut metric_count = 0usize;
    for (out_idx, (name, &col)) in query.columns.iter().zip(&selected).enumerate() {
        if PROFILE_IDENTITY.contains(&name.as_str()) {
            continue;
        }
        let direction = Direction::for_column(name);
        let values = population
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                row[col]
                    .as_f64()
                    .map(|v| direction.apply(v))
                    .ok_or_else(|| StatsError::NumericFormat {
                        column: name.clone(),
                        row: row_idx + 1,
                        value: row[col].to_string(),
                    })
            })
            .collect::<Result<Vec<f64>>>()?;
        for (row, pct) in rows.iter_mut().zip(percentile_ranks(&values)) {
            row[out_idx] = Value::Int(pct);
        }
        metric_count += 1;
    }

    for row in &mut rows {
        let sum: i64 = row
            .iter()
            .zip(&query.columns)
            .filter(|(_, name)| !PROFILE_IDENTITY.contains(&name.as_str()))
            .filter_map(|(v, _)| match v {
                Value::Int(p) => Some(*p),
                _ => None,
            })
            .sum();
        let rating = if metric_count == 0 {
            0
        } else {
            (sum as f64 / metric_count as f64).round_ties_even() as i64
        };
        row.push(Value::Int(rating));
    }

    Ok(Table {
        label: query.position.clone(),
        columns,
        rows,
    })
}

/// Percentile rank of each value: average 1-based rank among ties,
/// divided by the population size, as a percentage rounded half to even
/// (rank 1 of 8 is 12, rank 3 of 8 is 38).
pub fn percentile_ranks(values: &[f64]) -> Vec<i64> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start+1 ..= end share their mean rank
        let avg = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = avg;
        }
        start = end;
    }

    ranks
        .iter()
        .map(|r| (r / n as f64 * 100.0).round_ties_even() as i64)
        .collect()
}

fn require(table: &Table, column: &str) -> Result<usize> {
    table
        .column(column)
        .ok_or_else(|| StatsError::MissingColumn(column.to_string()))
}
