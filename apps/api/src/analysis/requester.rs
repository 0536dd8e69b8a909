//! Analysis Requester: renders a profile into a prompt, calls the model once,
//! and turns the reply into a validated `CareerAnalysis`.
//!
//! Flow: build_analysis_prompt → TextGenerator::generate → strip_json_fences →
//!       parse JSON → validate against the analysis schema.
//!
//! Stateless: no caching, no retries, no deduplication.

use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::prompts::{
    ANALYSIS_RULES, ANALYST_PREAMBLE, CAREER_ANALYSIS_SCHEMA, EDUCATION_SLOT, SCHEMA_INTRO,
};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{strip_json_fences, LlmError, TextGenerator};
use crate::models::profile::UserProfile;
use crate::models::report::CareerAnalysis;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("generation call failed: {0}")]
    Generation(#[from] LlmError),

    #[error("model returned malformed JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("model output does not match the analysis schema: {0}")]
    InvalidShape(#[source] serde_json::Error),
}

/// Renders the profile block of the prompt.
fn render_profile(profile: &UserProfile) -> String {
    format!(
        "User Profile:\n\
         - Target Job: {}\n\
         - Location Preference: {}\n\
         - Current Education: {}\n\
         - Current Skills: {}\n\
         - Experience: {} years",
        profile.target_job,
        profile.location_label(),
        profile.education,
        profile.skills,
        profile.experience_label(),
    )
}

/// The output schema with `userHas` filled in from the profile.
fn render_schema(profile: &UserProfile) -> String {
    CAREER_ANALYSIS_SCHEMA.replace(EDUCATION_SLOT, profile.education.as_str())
}

/// Builds the full analysis prompt. Deterministic for a given profile.
pub fn build_analysis_prompt(profile: &UserProfile) -> String {
    format!(
        "{ANALYST_PREAMBLE}\n\n{}\n\n{SCHEMA_INTRO}\n\n{}\n\n{ANALYSIS_RULES}\n5. {JSON_ONLY_INSTRUCTION}",
        render_profile(profile),
        render_schema(profile),
    )
}

/// Parses raw model output into a `CareerAnalysis`.
///
/// Malformed JSON and well-formed JSON of the wrong shape are reported separately.
/// A `jobPossibility` that does not sum to 100 is accepted as-is.
pub fn parse_analysis(text: &str) -> Result<CareerAnalysis, AnalysisError> {
    let json = strip_json_fences(text);
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(AnalysisError::MalformedJson)?;
    let analysis: CareerAnalysis =
        serde_json::from_value(value).map_err(AnalysisError::InvalidShape)?;

    let total = analysis.job_possibility.total();
    if total != 100 {
        warn!("jobPossibility sums to {total}, not 100; keeping model values unchanged");
    }

    Ok(analysis)
}

/// Requests a career analysis for a validated profile.
pub async fn request_analysis(
    generator: &dyn TextGenerator,
    profile: &UserProfile,
) -> Result<CareerAnalysis, AnalysisError> {
    let prompt = build_analysis_prompt(profile);
    info!("Requesting career analysis for target job '{}'", profile.target_job);

    let text = generator.generate(&prompt).await?;
    parse_analysis(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{EducationLevel, Location};
    use crate::test_support::{sample_analysis, sample_analysis_json, sample_profile, CannedGenerator};

    #[test]
    fn test_prompt_contains_every_field_verbatim() {
        let profile = UserProfile {
            target_job: "Registered Nurse (ICU)".to_string(),
            location: vec![Location::Bangladesh, Location::International],
            education: EducationLevel::Diploma,
            skills: "Patient care, triage, {braces}".to_string(),
            experience: Some(7),
        };
        let prompt = build_analysis_prompt(&profile);

        assert!(prompt.contains("- Target Job: Registered Nurse (ICU)\n"));
        assert!(prompt.contains("- Location Preference: Bangladesh, International\n"));
        assert!(prompt.contains("- Current Education: Diploma\n"));
        assert!(prompt.contains("- Current Skills: Patient care, triage, {braces}\n"));
        assert!(prompt.contains("- Experience: 7 years"));
    }

    #[test]
    fn test_prompt_contains_schema_and_rules_unmodified() {
        let profile = sample_profile();
        let prompt = build_analysis_prompt(&profile);
        assert!(prompt.starts_with(ANALYST_PREAMBLE));
        assert!(prompt.contains(&render_schema(&profile)));
        assert!(!prompt.contains(EDUCATION_SLOT));
        assert!(prompt.contains(ANALYSIS_RULES));
        assert!(prompt.contains(JSON_ONLY_INSTRUCTION));
        assert!(prompt.contains("sum to exactly 100"));
    }

    #[test]
    fn test_schema_carries_profile_education_in_user_has() {
        let mut profile = sample_profile();
        profile.education = EducationLevel::Masters;
        let prompt = build_analysis_prompt(&profile);
        assert!(prompt.contains("\"userHas\": \"Masters\","));

        let (before, after) = CAREER_ANALYSIS_SCHEMA.split_once(EDUCATION_SLOT).unwrap();
        assert!(prompt.contains(before));
        assert!(prompt.contains(after));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let profile = sample_profile();
        assert_eq!(build_analysis_prompt(&profile), build_analysis_prompt(&profile));
    }

    #[test]
    fn test_prompt_renders_missing_experience_as_none() {
        let mut profile = sample_profile();
        profile.experience = None;
        assert!(build_analysis_prompt(&profile).contains("- Experience: None years"));
    }

    #[test]
    fn test_fenced_and_plain_replies_parse_identically() {
        let plain = sample_analysis_json();
        let tagged = format!("```json\n{plain}\n```");
        let untagged = format!("```\n{plain}\n```");

        let expected = parse_analysis(&plain).unwrap();
        assert_eq!(parse_analysis(&tagged).unwrap(), expected);
        assert_eq!(parse_analysis(&untagged).unwrap(), expected);
        assert_eq!(expected, sample_analysis());
    }

    #[test]
    fn test_prose_reply_is_malformed_json() {
        let err = parse_analysis("Sure! Here is your analysis: {...}").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedJson(_)));
    }

    #[test]
    fn test_wrong_shape_is_distinct_from_malformed() {
        let err = parse_analysis(r#"{"jobPossibility": {"bangladesh": 50}}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidShape(_)));

        let err = parse_analysis("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidShape(_)));
    }

    #[test]
    fn test_possibility_sum_mismatch_is_accepted_unchanged() {
        let text = sample_analysis_json().replace("\"bangladesh\": 70", "\"bangladesh\": 50");
        let analysis = parse_analysis(&text).unwrap();
        assert_eq!(analysis.job_possibility.bangladesh, 50);
        assert_eq!(analysis.job_possibility.total(), 80);
    }

    #[test]
    fn test_possibility_near_integer_limit_is_accepted_unchanged() {
        let text = sample_analysis_json().replace("\"bangladesh\": 70", "\"bangladesh\": 4294967295");
        let analysis = parse_analysis(&text).unwrap();
        assert_eq!(analysis.job_possibility.bangladesh, u32::MAX);
        assert_eq!(analysis.job_possibility.total(), u64::from(u32::MAX) + 30);
    }

    #[tokio::test]
    async fn test_request_analysis_sends_prompt_once() {
        let generator = CannedGenerator::replying(format!("```json\n{}\n```", sample_analysis_json()));
        let profile = sample_profile();

        let analysis = request_analysis(&generator, &profile).await.unwrap();

        assert_eq!(analysis.job_possibility.total(), 100);
        assert_eq!(generator.calls(), 1);
        assert_eq!(generator.last_prompt().unwrap(), build_analysis_prompt(&profile));
    }

    #[tokio::test]
    async fn test_request_analysis_surfaces_service_failure_without_retry() {
        let generator = CannedGenerator::failing("model overloaded");
        let err = request_analysis(&generator, &sample_profile()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Generation(LlmError::Api { status: 503, .. })));
        assert_eq!(generator.calls(), 1);
    }
}
