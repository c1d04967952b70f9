// file: src/database/mod.rs

use crate::config::Config;
use crate::models::PlannerData;
use anyhow::{Context, Result};
use log::info;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePool, Sqlite};

// Declare submodules
pub mod snapshots;

#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    pub async fn new(config: &Config) -> Result<Self> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        Self::connect(&config.database_url()).await
    }

    pub async fn connect(db_url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        let db_exists = Sqlite::database_exists(db_url)
            .await
            .context("Failed to check if database exists")?;
        if !db_exists {
            info!("Creating database");
            Sqlite::create_database(db_url)
                .await
                .context("Failed to create database")?;
        }

        let pool = SqlitePool::connect(db_url)
            .await
            .context("Failed to connect to database")?;

        run_schema(&pool).await.context("Failed to run database schema")?;

        info!("Database initialized successfully");

        Ok(Database { pool })
    }

    // --- Snapshot Delegates ---

    pub async fn load_snapshot(&self) -> Result<Option<PlannerData>> {
        snapshots::load(&self.pool).await
    }

    pub async fn save_snapshot(&self, data: &PlannerData) -> Result<()> {
        snapshots::save(&self.pool, data).await
    }

    pub async fn clear_snapshot(&self) -> Result<()> {
        snapshots::clear(&self.pool).await
    }
}

async fn run_schema(pool: &SqlitePool) -> Result<()> {
    let schema = include_str!("schema.sql");

    let mut current_statement = String::new();
    for line in schema.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("--") || trimmed.is_empty() {
            continue;
        }

        current_statement.push_str(line);
        current_statement.push('\n');

        if trimmed.ends_with(';') {
            sqlx::query(&current_statement).execute(pool).await?;
            current_statement.clear();
        }
    }
    Ok(())
}
