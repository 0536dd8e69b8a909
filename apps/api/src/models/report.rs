//! Career analysis payload and the persisted report that wraps it.
//!
//! These types double as the schema the model output is validated against:
//! anything that does not deserialize into `CareerAnalysis` is rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::profile::{EducationLevel, UserProfile};

// ────────────────────────────────────────────────────────────────────────────
// Analysis payload
// ────────────────────────────────────────────────────────────────────────────

/// Percentage split of job prospects. The three values are asked to sum to
/// 100 but nothing here enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPossibility {
    pub bangladesh: u32,
    pub international: u32,
    pub none: u32,
}

impl JobPossibility {
    /// Widened so that arbitrary model values cannot overflow.
    pub fn total(&self) -> u64 {
        u64::from(self.bangladesh) + u64::from(self.international) + u64::from(self.none)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationGap {
    pub required: String,
    pub user_has: String,
    pub gap: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingSkill {
    pub skill: String,
    pub difficulty: Difficulty,
    pub time_to_learn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsGap {
    pub missing: Vec<MissingSkill>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationGuide {
    pub language_requirements: String,
    pub visa_requirements: String,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapPhase {
    /// Free-form label such as "1-3 months".
    pub duration: String,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    pub short_term: RoadmapPhase,
    pub mid_term: RoadmapPhase,
    pub long_term: RoadmapPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskForecast {
    pub level: RiskLevel,
    pub explanation: String,
}

/// Structured analysis produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerAnalysis {
    pub job_possibility: JobPossibility,
    pub education_gap: EducationGap,
    pub skills_gap: SkillsGap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migration_guide: Option<MigrationGuide>,
    pub roadmap: Roadmap,
    pub current_opportunities: Vec<String>,
    pub future_opportunities: Vec<String>,
    pub risk_forecast: RiskForecast,
}

// ────────────────────────────────────────────────────────────────────────────
// Persisted report
// ────────────────────────────────────────────────────────────────────────────

/// One stored analysis. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerReport {
    pub id: Uuid,
    pub owner_id: String,
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(flatten)]
    pub analysis: CareerAnalysis,
    pub created_at: DateTime<Utc>,
}

/// Dashboard row for a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub id: Uuid,
    pub target_job: String,
    pub education: EducationLevel,
    pub location: String,
    pub experience: Option<u32>,
    pub bangladesh_possibility: u32,
    pub international_possibility: u32,
    pub risk_level: RiskLevel,
    pub created_at: DateTime<Utc>,
}

impl From<&CareerReport> for ReportSummary {
    fn from(report: &CareerReport) -> Self {
        Self {
            id: report.id,
            target_job: report.profile.target_job.clone(),
            education: report.profile.education,
            location: report.profile.location_label(),
            experience: report.profile.experience,
            bangladesh_possibility: report.analysis.job_possibility.bangladesh,
            international_possibility: report.analysis.job_possibility.international,
            risk_level: report.analysis.risk_forecast.level,
            created_at: report.created_at,
        }
    }
}
