// HomeAce Library
// Personal planner core: days, recurring responsibilities/todos and their
// per-date overrides.

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod planner;
pub mod recurrence;
pub mod utils;

// Re-export commonly used types
pub use config::{validate_config, Config};
pub use database::Database;
pub use error::{AppError, AppResult};
pub use models::*;
pub use planner::{Planner, Scheduled, SeriesAction};
pub use recurrence::{applies_to_date, occurrences_through, NewRuleRequest};

use std::sync::Arc;
use tokio::sync::RwLock;

/// Planner plus its backing store, shared across tasks.
///
/// Mutations hold the write lock for the whole operation and readers
/// resolve under the read lock, so nobody sees a half-applied change.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub planner: Arc<RwLock<Planner>>,
}

impl AppState {
    /// Opens the planner stored in `db`, or an empty one.
    pub async fn load(db: Database) -> AppResult<Self> {
        let planner = match db.load_snapshot().await? {
            Some(data) => Planner::from_data(data),
            None => Planner::new(),
        };
        Ok(Self {
            db: Arc::new(db),
            planner: Arc::new(RwLock::new(planner)),
        })
    }

    pub async fn resolve(&self, date: DateKey) -> EffectiveDay {
        self.planner.read().await.resolve(date)
    }

    /// Saves a consistent snapshot of the current planner state.
    pub async fn persist(&self) -> AppResult<()> {
        let snapshot = self.planner.read().await.data().clone();
        self.db.save_snapshot(&snapshot).await?;
        Ok(())
    }
}
