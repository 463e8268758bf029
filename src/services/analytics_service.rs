use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use super::analytics::build_snapshot;
use crate::database::{AnalyticsRepository, AttemptRepository, DatabaseManager};
use crate::models::AnalyticsSnapshot;

/// Generates and stores per-user analytics snapshots.
///
/// Repositories are constructed from an injected `DatabaseManager` rather
/// than module-level handles, so callers (and tests) control which database
/// a service instance talks to.
pub struct AnalyticsService {
    db: DatabaseManager,
}

impl AnalyticsService {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    /// Aggregate all of a user's attempts into a fresh snapshot and persist
    /// it. Each call appends a new snapshot row; history is never rewritten.
    pub async fn generate_for_user(&self, user_id: Uuid) -> Result<AnalyticsSnapshot> {
        tracing::info!(user_id = %user_id, "Generating analytics snapshot");

        let attempt_repo = AttemptRepository::new(self.db.clone());
        let mut attempts = attempt_repo.list_for_user(user_id)?;

        // The aggregation contract requires most-recent-first ordering. The
        // repository already returns it, but sort here so the contract does
        // not silently depend on the SQL.
        attempts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let snapshot = build_snapshot(user_id, &attempts, Utc::now());

        let analytics_repo = AnalyticsRepository::new(self.db.clone());
        analytics_repo.insert(&snapshot)?;

        tracing::info!(
            user_id = %user_id,
            attempts = attempts.len(),
            overall_accuracy = snapshot.performance_metrics.overall_accuracy,
            "Analytics snapshot stored"
        );
        Ok(snapshot)
    }

    /// The most recently generated snapshot for a user, if any
    pub async fn latest_for_user(&self, user_id: Uuid) -> Result<Option<AnalyticsSnapshot>> {
        let analytics_repo = AnalyticsRepository::new(self.db.clone());
        analytics_repo.latest_for_user(user_id)
    }

    /// All snapshots for a user, most recent first
    pub async fn history_for_user(&self, user_id: Uuid) -> Result<Vec<AnalyticsSnapshot>> {
        let analytics_repo = AnalyticsRepository::new(self.db.clone());
        analytics_repo.history_for_user(user_id)
    }
}
