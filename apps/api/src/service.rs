//! Career service, the one place the analysis pipeline meets the report store.
//!
//! Flow for a new report: request_analysis → store.create.
//! A failed analysis or a failed write aborts before anything is persisted.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::requester::request_analysis;
use crate::auth::AuthUser;
use crate::errors::{AppError, REPORT_NOT_FOUND_MESSAGE};
use crate::llm_client::TextGenerator;
use crate::models::profile::UserProfile;
use crate::models::report::CareerReport;
use crate::reports::store::{NewReport, ReportStore};

#[derive(Clone)]
pub struct CareerService {
    generator: Arc<dyn TextGenerator>,
    store: Arc<dyn ReportStore>,
}

impl CareerService {
    pub fn new(generator: Arc<dyn TextGenerator>, store: Arc<dyn ReportStore>) -> Self {
        Self { generator, store }
    }

    /// Analyzes a validated profile and persists the result for `owner`.
    /// Returns the stored report, including its assigned id and timestamp.
    pub async fn generate_report(
        &self,
        owner: &AuthUser,
        profile: UserProfile,
    ) -> Result<CareerReport, AppError> {
        let analysis = request_analysis(self.generator.as_ref(), &profile).await?;

        let report = self
            .store
            .create(NewReport {
                owner_id: owner.uid.clone(),
                profile,
                analysis,
            })
            .await?;

        info!("Generated career report {} for user {}", report.id, owner.uid);
        Ok(report)
    }

    /// All of the caller's reports, newest first.
    pub async fn list_reports(&self, owner: &AuthUser) -> Result<Vec<CareerReport>, AppError> {
        Ok(self.store.list_by_owner(&owner.uid).await?)
    }

    /// A single report, visible only to its owner.
    ///
    /// A foreign-owned report is reported exactly like a missing one.
    pub async fn get_report(&self, owner: &AuthUser, id: Uuid) -> Result<CareerReport, AppError> {
        match self.store.get(id).await? {
            Some(report) if report.owner_id == owner.uid => Ok(report),
            Some(_) => {
                warn!("User {} requested report {id} owned by someone else", owner.uid);
                Err(AppError::NotFound(REPORT_NOT_FOUND_MESSAGE.to_string()))
            }
            None => Err(AppError::NotFound(REPORT_NOT_FOUND_MESSAGE.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::reports::memory::InMemoryReportStore;
    use crate::reports::store::StoreError;
    use crate::test_support::{sample_analysis, sample_analysis_json, sample_profile, service_with, CannedGenerator};

    /// Writes go through; every read fails.
    #[derive(Default)]
    struct WriteOnlyStore {
        inner: InMemoryReportStore,
    }

    #[async_trait]
    impl ReportStore for WriteOnlyStore {
        async fn create(&self, report: NewReport) -> Result<CareerReport, StoreError> {
            self.inner.create(report).await
        }

        async fn list_by_owner(&self, _owner_id: &str) -> Result<Vec<CareerReport>, StoreError> {
            Err(StoreError::OutOfRange { field: "owner_id" })
        }

        async fn get(&self, id: Uuid) -> Result<Option<CareerReport>, StoreError> {
            Err(StoreError::Corrupt {
                id,
                reason: "read path down".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_end_to_end_generate_then_get() {
        let generator = Arc::new(CannedGenerator::replying(sample_analysis_json()));
        let (service, _store) = service_with(generator);
        let alice = AuthUser::new("alice");

        let created = service.generate_report(&alice, sample_profile()).await.unwrap();
        assert_eq!(created.analysis.job_possibility.total(), 100);
        assert_eq!(created.owner_id, "alice");

        let fetched = service.get_report(&alice, created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.profile, sample_profile());
        assert_eq!(fetched.analysis, sample_analysis());
    }

    #[tokio::test]
    async fn test_generate_returns_created_report_without_reading_back() {
        let store = Arc::new(WriteOnlyStore::default());
        let service = CareerService::new(
            Arc::new(CannedGenerator::replying(sample_analysis_json())),
            store.clone(),
        );

        let created = service
            .generate_report(&AuthUser::new("alice"), sample_profile())
            .await
            .unwrap();
        assert_eq!(created.owner_id, "alice");
        assert_eq!(created.analysis, sample_analysis());
        assert_eq!(store.inner.count().await, 1);
    }

    #[tokio::test]
    async fn test_failed_generation_persists_nothing() {
        let generator = Arc::new(CannedGenerator::failing("quota exceeded"));
        let (service, store) = service_with(generator);

        let err = service
            .generate_report(&AuthUser::new("alice"), sample_profile())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "GENERATION_FAILED");
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_invalid_shape_persists_nothing() {
        let generator = Arc::new(CannedGenerator::replying(r#"{"advice": "learn Rust"}"#));
        let (service, store) = service_with(generator);

        let err = service
            .generate_report(&AuthUser::new("alice"), sample_profile())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_ANALYSIS_SHAPE");
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_foreign_report_looks_like_missing_report() {
        let generator = Arc::new(CannedGenerator::replying(sample_analysis_json()));
        let (service, _store) = service_with(generator);
        let alice = AuthUser::new("alice");
        let mallory = AuthUser::new("mallory");

        let created = service.generate_report(&alice, sample_profile()).await.unwrap();

        let foreign = service.get_report(&mallory, created.id).await.unwrap_err();
        let missing = service.get_report(&mallory, Uuid::new_v4()).await.unwrap_err();

        match (foreign, missing) {
            (AppError::NotFound(a), AppError::NotFound(b)) => assert_eq!(a, b),
            other => panic!("expected two NotFound errors, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_for_new_user_is_empty() {
        let generator = Arc::new(CannedGenerator::replying(sample_analysis_json()));
        let (service, _store) = service_with(generator);
        let reports = service.list_reports(&AuthUser::new("newcomer")).await.unwrap();
        assert!(reports.is_empty());
    }

    #[tokio::test]
    async fn test_list_only_returns_callers_reports() {
        let generator = Arc::new(CannedGenerator::replying(sample_analysis_json()));
        let (service, _store) = service_with(generator);
        let alice = AuthUser::new("alice");
        let bob = AuthUser::new("bob");

        service.generate_report(&alice, sample_profile()).await.unwrap();
        service.generate_report(&bob, sample_profile()).await.unwrap();
        let second = service.generate_report(&alice, sample_profile()).await.unwrap();

        let reports = service.list_reports(&alice).await.unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].id, second.id);
        assert!(reports.iter().all(|r| r.owner_id == "alice"));
    }
}
