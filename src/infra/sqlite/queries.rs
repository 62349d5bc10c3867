use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use crate::infra::sqlite::schema::open_connection;

pub fn load_preference(db_path: &Path, key: &str) -> Result<Option<String>> {
    let conn = open_connection(db_path)?;
    conn.query_row(
        "SELECT value FROM preference WHERE key = ?1",
        [key],
        |row| row.get::<_, String>(0),
    )
    .optional()
    .with_context(|| format!("failed to read preference: {key}"))
}

pub fn upsert_preference(db_path: &Path, key: &str, value: &str) -> Result<()> {
    let conn = open_connection(db_path)?;
    conn.execute(
        "INSERT INTO preference(key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
        params![key, value],
    )
    .with_context(|| format!("failed to store preference: {key}"))?;
    Ok(())
}

pub fn upsert_column_selection(
    db_path: &Path,
    view: &str,
    selection: &BTreeMap<String, bool>,
) -> Result<()> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start column selection transaction")?;

    tx.execute("DELETE FROM column_selection WHERE view = ?1", [view])
        .context("failed to clear existing column selection")?;

    let mut insert_stmt = tx
        .prepare(
            "INSERT INTO column_selection(view, column_key, selected)
             VALUES (?1, ?2, ?3)",
        )
        .context("failed to prepare column selection insert")?;

    for (column_key, selected) in selection {
        insert_stmt
            .execute(params![view, column_key, i64::from(*selected)])
            .context("failed to insert column selection")?;
    }

    drop(insert_stmt);
    tx.commit()
        .context("failed to commit column selection updates")?;
    Ok(())
}

pub fn load_column_selection(db_path: &Path, view: &str) -> Result<BTreeMap<String, bool>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(
            "SELECT column_key, selected
             FROM column_selection
             WHERE view = ?1
             ORDER BY column_key ASC",
        )
        .context("failed to prepare column selection query")?;

    let selection_iter = stmt
        .query_map([view], |row| {
            let column_key: String = row.get(0)?;
            let selected: i64 = row.get(1)?;
            Ok((column_key, selected != 0))
        })
        .context("failed to query column selection")?;

    let mut selection = BTreeMap::new();
    for item in selection_iter {
        let (column_key, selected) = item.context("failed to read column selection row")?;
        selection.insert(column_key, selected);
    }

    Ok(selection)
}
