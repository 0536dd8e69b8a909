//! In-process report store. Used when no `DATABASE_URL` is configured and by tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::report::CareerReport;
use crate::reports::store::{NewReport, ReportStore, StoreError};

/// Reports kept in insertion order behind an async lock.
#[derive(Default)]
pub struct InMemoryReportStore {
    reports: RwLock<Vec<CareerReport>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.reports.read().await.len()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn create(&self, report: NewReport) -> Result<CareerReport, StoreError> {
        let record = CareerReport {
            id: Uuid::new_v4(),
            owner_id: report.owner_id,
            profile: report.profile,
            analysis: report.analysis,
            created_at: Utc::now(),
        };
        self.reports.write().await.push(record.clone());
        Ok(record)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<CareerReport>, StoreError> {
        let reports = self.reports.read().await;
        // Newest insert first, so equal timestamps still come out newest first.
        let mut owned: Vec<CareerReport> = reports
            .iter()
            .rev()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn get(&self, id: Uuid) -> Result<Option<CareerReport>, StoreError> {
        Ok(self
            .reports
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }
}
