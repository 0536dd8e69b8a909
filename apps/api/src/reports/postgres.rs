//! PostgreSQL report store. The analysis payload lives in a JSONB column;
//! the profile fields are plain columns so the dashboard query stays cheap.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::models::profile::{EducationLevel, Location, UserProfile};
use crate::models::report::{CareerAnalysis, CareerReport};
use crate::reports::store::{NewReport, ReportStore, StoreError};

#[derive(Debug, Clone, FromRow)]
pub struct CareerReportRow {
    pub id: Uuid,
    pub owner_id: String,
    pub target_job: String,
    pub location: Vec<String>,
    pub education: String,
    pub skills: String,
    pub experience: Option<i32>,
    pub analysis: Value,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CareerReportRow> for CareerReport {
    type Error = StoreError;

    fn try_from(row: CareerReportRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |reason: String| StoreError::Corrupt { id, reason };

        let location = row
            .location
            .iter()
            .map(|l| l.parse::<Location>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| corrupt(e.to_string()))?;
        let education = row
            .education
            .parse::<EducationLevel>()
            .map_err(|e| corrupt(e.to_string()))?;
        let experience = row
            .experience
            .map(u32::try_from)
            .transpose()
            .map_err(|e| corrupt(format!("experience: {e}")))?;
        let analysis: CareerAnalysis =
            serde_json::from_value(row.analysis).map_err(|e| corrupt(e.to_string()))?;

        Ok(CareerReport {
            id,
            owner_id: row.owner_id,
            profile: UserProfile {
                target_job: row.target_job,
                location,
                education,
                skills: row.skills,
                experience,
            },
            analysis,
            created_at: row.created_at,
        })
    }
}

#[derive(Clone)]
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn create(&self, report: NewReport) -> Result<CareerReport, StoreError> {
        let NewReport {
            owner_id,
            profile,
            analysis,
        } = report;

        let analysis_value = serde_json::to_value(&analysis).map_err(StoreError::Encode)?;
        let location: Vec<String> = profile
            .location
            .iter()
            .map(|l| l.as_str().to_string())
            .collect();
        let experience = profile
            .experience
            .map(i32::try_from)
            .transpose()
            .map_err(|_| StoreError::OutOfRange { field: "experience" })?;

        // id and created_at are assigned by the database.
        let (id, created_at): (Uuid, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO career_reports
                (owner_id, target_job, location, education, skills, experience, analysis)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, created_at
            "#,
        )
        .bind(&owner_id)
        .bind(&profile.target_job)
        .bind(&location)
        .bind(profile.education.as_str())
        .bind(&profile.skills)
        .bind(experience)
        .bind(&analysis_value)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted career report {id} for owner {owner_id} at {created_at}");
        Ok(CareerReport {
            id,
            owner_id,
            profile,
            analysis,
            created_at,
        })
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<CareerReport>, StoreError> {
        let rows = sqlx::query_as::<_, CareerReportRow>(
            "SELECT * FROM career_reports WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CareerReport::try_from).collect()
    }

    async fn get(&self, id: Uuid) -> Result<Option<CareerReport>, StoreError> {
        let row = sqlx::query_as::<_, CareerReportRow>("SELECT * FROM career_reports WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(CareerReport::try_from).transpose()
    }
}
