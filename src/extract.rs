use crate::error::{Result, StatsError};
use crate::fetch::RawRow;
use crate::schema::{self, COMPETITION, Entity, RANK, SourceVariant, StatCategory};
use crate::table::CategoryTable;

/// Name the cells of each raw row with the category's flat header.
///
/// Site placeholders (`Rk`, `Comp`) are dropped, empty cells become
/// `"0"`, a 1-based `Rank` leads each row and `Competition` ends it.
pub fn extract(
    rows: &[RawRow],
    category: StatCategory,
    entity: Entity,
    variant: SourceVariant,
    competition: &str,
) -> Result<CategoryTable> {
    let schema = schema::columns(category, entity, variant);
    let keep: Vec<bool> = schema.iter().map(|c| !schema::is_placeholder(c)).collect();

    let mut columns = Vec::with_capacity(schema.len() + 1);
    columns.push(RANK.to_string());
    columns.extend(
        schema
            .iter()
            .filter(|c| !schema::is_placeholder(c))
            .map(|c| c.to_string()),
    );
    columns.push(COMPETITION.to_string());

    let mut out = Vec::with_capacity(rows.len());
    for (idx, raw) in rows.iter().enumerate() {
        if raw.len() != schema.len() {
            return Err(StatsError::SchemaMismatch {
                category,
                row: idx + 1,
                expected: schema.len(),
                found: raw.len(),
            });
        }
        let mut row = Vec::with_capacity(columns.len());
        row.push((idx + 1).to_string());
        for (cell, keep) in raw.iter().zip(&keep) {
            if !keep {
                continue;
            }
            let cell = cell.trim();
            row.push(if cell.is_empty() {
                "0".to_string()
            } else {
                cell.to_string()
            });
        }
        row.push(competition.to_string());
        out.push(row);
    }

    Ok(CategoryTable {
        category,
        entity,
        competition: competition.to_string(),
        columns,
        rows: out,
    })
}

/// Opponent tables name each row `vs <Squad>`; keep only the squad.
pub fn normalize_opponent_names(table: &mut CategoryTable) {
    let Some(col) = table.column("Squad") else {
        return;
    };
    for row in &mut table.rows {
        if let Some(cell) = row.get_mut(col) {
            if let Some(name) = cell.strip_prefix("vs ") {
                *cell = name.trim().to_string();
            }
        }
    }
}
