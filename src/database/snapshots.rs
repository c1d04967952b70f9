// file: src/database/snapshots.rs
use crate::models::PlannerData;
use crate::utils::logging::log_database_operation;
use anyhow::{Context, Result};
use log::{error, warn};
use sqlx::SqlitePool;
use std::time::Instant;

/// Key the planner document is stored under.
pub const STORAGE_KEY: &str = "homeAceData";

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

pub async fn load(pool: &SqlitePool) -> Result<Option<PlannerData>> {
    let started = Instant::now();
    let stored: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?")
        .bind(STORAGE_KEY)
        .fetch_optional(pool)
        .await
        .context("Failed to read planner snapshot")?;
    log_database_operation("SELECT", "kv_store", elapsed_ms(started));

    let Some(json) = stored else {
        return Ok(None);
    };

    match PlannerData::from_json(&json) {
        Ok(data) => Ok(Some(data)),
        Err(e) => {
            // Same as an empty store: the next save overwrites the bad document.
            error!("Failed to parse stored planner snapshot: {}", e.to_safe_string());
            warn!("Starting with an empty planner");
            Ok(None)
        }
    }
}

pub async fn save(pool: &SqlitePool, data: &PlannerData) -> Result<()> {
    let json = data.to_json().context("Failed to encode planner snapshot")?;
    let now = chrono::Utc::now();
    let started = Instant::now();

    sqlx::query(
        r#"
        INSERT INTO kv_store (key, value, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(STORAGE_KEY)
    .bind(json)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to write planner snapshot")?;

    log_database_operation("UPSERT", "kv_store", elapsed_ms(started));
    Ok(())
}

pub async fn clear(pool: &SqlitePool) -> Result<()> {
    sqlx::query("DELETE FROM kv_store WHERE key = ?")
        .bind(STORAGE_KEY)
        .execute(pool)
        .await
        .context("Failed to clear planner snapshot")?;

    Ok(())
}
