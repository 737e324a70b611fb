use std::fmt;

use serde::Serialize;

use crate::schema::{Entity, RANK, StatCategory};

/// One cell of a typed table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
        }
    }
}

/// One stat category as scraped: every cell still text.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTable {
    pub category: StatCategory,
    pub entity: Entity,
    pub competition: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CategoryTable {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.column(name)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rewrite `Rank` as 1-based row order.
    pub fn rerank(&mut self) {
        let Some(col) = self.column(RANK) else {
            return;
        };
        for (idx, row) in self.rows.iter_mut().enumerate() {
            if let Some(cell) = row.get_mut(col) {
                *cell = (idx + 1).to_string();
            }
        }
    }
}

/// A typed table: a merged scope or a profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub label: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn value(&self, row: usize, name: &str) -> Option<&Value> {
        let col = self.column(name)?;
        self.rows.get(row)?.get(col)
    }

    pub fn f64(&self, row: usize, name: &str) -> Option<f64> {
        self.value(row, name).and_then(Value::as_f64)
    }

    pub fn text(&self, row: usize, name: &str) -> Option<&str> {
        self.value(row, name).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn string_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(Value::to_string).collect())
            .collect()
    }
}
