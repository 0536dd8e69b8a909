//! Report Store: pluggable persistence for career reports.
//!
//! Reports are write-once: the trait offers create and two reads, nothing else.
//! Ownership is NOT checked here; callers compare `owner_id` at read time.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::profile::UserProfile;
use crate::models::report::{CareerAnalysis, CareerReport};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to encode analysis payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Stored report {id} is unreadable: {reason}")]
    Corrupt { id: Uuid, reason: String },

    #[error("Value for {field} does not fit its column")]
    OutOfRange { field: &'static str },
}

/// Everything a report needs except what the store assigns (id, timestamp).
#[derive(Debug, Clone)]
pub struct NewReport {
    pub owner_id: String,
    pub profile: UserProfile,
    pub analysis: CareerAnalysis,
}

/// Carried in `CareerService` as `Arc<dyn ReportStore>`.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persists a report, assigning its id and creation timestamp.
    /// Returns the report exactly as a later `get` would.
    async fn create(&self, report: NewReport) -> Result<CareerReport, StoreError>;

    /// All reports owned by `owner_id`, newest first. Empty when there are none.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<CareerReport>, StoreError>;

    /// A single report regardless of owner, or `None`.
    async fn get(&self, id: Uuid) -> Result<Option<CareerReport>, StoreError>;
}
