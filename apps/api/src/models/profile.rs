//! Intake profile: the raw form submission and its validated counterpart.
//!
//! `ProfileForm` is what the client posts. `UserProfile` only exists once every
//! field has passed validation; the analysis pipeline never re-checks it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Enumerations
// ────────────────────────────────────────────────────────────────────────────

/// Where the user wants to work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Bangladesh,
    International,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Bangladesh => "Bangladesh",
            Location::International => "International",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Bangladesh" => Ok(Location::Bangladesh),
            "International" => Ok(Location::International),
            other => Err(ProfileError::UnknownLocation(other.to_string())),
        }
    }
}

/// Highest completed education level, using the Bangladeshi naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "SSC")]
    Ssc,
    #[serde(rename = "HSC")]
    Hsc,
    Diploma,
    Honours,
    Masters,
    PhD,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 6] = [
        EducationLevel::Ssc,
        EducationLevel::Hsc,
        EducationLevel::Diploma,
        EducationLevel::Honours,
        EducationLevel::Masters,
        EducationLevel::PhD,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::Ssc => "SSC",
            EducationLevel::Hsc => "HSC",
            EducationLevel::Diploma => "Diploma",
            EducationLevel::Honours => "Honours",
            EducationLevel::Masters => "Masters",
            EducationLevel::PhD => "PhD",
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EducationLevel {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        EducationLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ProfileError::UnknownEducation(s.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validated profile
// ────────────────────────────────────────────────────────────────────────────

/// A validated career profile. Built only through `ProfileForm::validate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub target_job: String,
    /// Non-empty, no duplicates, in the order the user picked them.
    pub location: Vec<Location>,
    pub education: EducationLevel,
    /// Free text, comma-separated.
    pub skills: String,
    pub experience: Option<u32>,
}

impl UserProfile {
    /// Location preference as shown to the model and on the dashboard.
    pub fn location_label(&self) -> String {
        self.location
            .iter()
            .map(Location::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Years of experience, or `None` when the field was left blank.
    pub fn experience_label(&self) -> String {
        match self.experience {
            Some(years) => years.to_string(),
            None => "None".to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Raw form input
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("Target job is required")]
    MissingTargetJob,

    #[error("Please select at least one location preference")]
    MissingLocation,

    #[error("Unknown location preference '{0}'")]
    UnknownLocation(String),

    #[error("Please select your education level")]
    MissingEducation,

    #[error("Unknown education level '{0}'")]
    UnknownEducation(String),

    #[error("Current skills are required")]
    MissingSkills,

    #[error("Years of experience must be a non-negative whole number, got '{0}'")]
    InvalidExperience(String),
}

/// Largest accepted experience value; the report table stores it as INTEGER.
pub const MAX_EXPERIENCE_YEARS: u32 = i32::MAX as u32;

/// Years of experience as the form sends it: a number, or the raw text of
/// the input box (empty when untouched). Non-integral numbers deserialize
/// so that `validate` can reject them with a form message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExperienceInput {
    Years(i64),
    Fractional(f64),
    Text(String),
}

/// Intake form exactly as submitted. Every field defaults so that a missing
/// field is reported as a validation error, not a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileForm {
    pub target_job: String,
    pub location: Vec<String>,
    pub education: String,
    pub skills: String,
    pub experience: Option<ExperienceInput>,
}

impl ProfileForm {
    /// Checks every required field and produces a `UserProfile`.
    /// Text fields are trimmed; duplicate location picks collapse into one.
    pub fn validate(self) -> Result<UserProfile, ProfileError> {
        let target_job = self.target_job.trim().to_string();
        if target_job.is_empty() {
            return Err(ProfileError::MissingTargetJob);
        }

        let mut location: Vec<Location> = Vec::with_capacity(2);
        for raw in &self.location {
            let parsed = raw.parse::<Location>()?;
            if !location.contains(&parsed) {
                location.push(parsed);
            }
        }
        if location.is_empty() {
            return Err(ProfileError::MissingLocation);
        }

        if self.education.trim().is_empty() {
            return Err(ProfileError::MissingEducation);
        }
        let education = self.education.parse::<EducationLevel>()?;

        let skills = self.skills.trim().to_string();
        if skills.is_empty() {
            return Err(ProfileError::MissingSkills);
        }

        let experience = match self.experience {
            None => None,
            Some(ExperienceInput::Years(years)) => Some(
                u32::try_from(years)
                    .ok()
                    .filter(|y| *y <= MAX_EXPERIENCE_YEARS)
                    .ok_or_else(|| ProfileError::InvalidExperience(years.to_string()))?,
            ),
            Some(ExperienceInput::Fractional(years)) => {
                return Err(ProfileError::InvalidExperience(years.to_string()));
            }
            Some(ExperienceInput::Text(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    None
                } else {
                    Some(
                        text.parse::<u32>()
                            .ok()
                            .filter(|y| *y <= MAX_EXPERIENCE_YEARS)
                            .ok_or_else(|| ProfileError::InvalidExperience(text.to_string()))?,
                    )
                }
            }
        };

        Ok(UserProfile {
            target_job,
            location,
            education,
            skills,
            experience,
        })
    }
}
