use std::collections::BTreeMap;

use sqlx::sqlite::SqlitePool;

/// All display strings for a language as a flat key -> value map. An unknown
/// language yields an empty map, not an error; callers supply their own
/// per-key defaults.
pub async fn lookup(db: &SqlitePool, lang: &str) -> Result<BTreeMap<String, String>, sqlx::Error> {
    let rows: Vec<(String, String)> =
        sqlx::query_as("SELECT key_name, value FROM texts WHERE lang = ?")
            .bind(lang)
            .fetch_all(db)
            .await?;
    Ok(rows.into_iter().collect())
}
