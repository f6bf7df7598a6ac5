//! Mass update — select a batch of source rows, then run one parameterized
//! write per row.
//!
//! All candidate rows are read before any write executes, so the select
//! statement never observes its own effects. The per-row callback decides
//! whether the row counts toward the reported total.

use rusqlite::{Connection, Row, Statement};
use tracing::debug;

use lintra_core::errors::StorageError;

/// Run `select_sql`, map every row through `map_row`, then execute
/// `update_sql` once per mapped row via `apply`. Returns the number of rows
/// for which `apply` returned `true`.
pub fn mass_update<T>(
    conn: &Connection,
    select_sql: &str,
    map_row: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
    update_sql: &str,
    mut apply: impl FnMut(&T, &mut Statement<'_>) -> rusqlite::Result<bool>,
    row_plural_name: &str,
) -> Result<usize, StorageError> {
    let mut select = conn
        .prepare(select_sql)
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let mapped = select
        .query_map([], map_row)
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let mut candidates = Vec::new();
    for row in mapped {
        candidates.push(row.map_err(|e| StorageError::SqliteError { message: e.to_string() })?);
    }

    let mut update = conn
        .prepare_cached(update_sql)
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let mut count = 0;
    for candidate in &candidates {
        if apply(candidate, &mut update)
            .map_err(|e| StorageError::SqliteError { message: e.to_string() })?
        {
            count += 1;
        }
    }

    debug!("mass update: {count} {row_plural_name}");
    Ok(count)
}
