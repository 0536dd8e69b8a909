//! Shared fixtures for unit and router tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::llm_client::{LlmError, TextGenerator};
use crate::models::profile::{EducationLevel, Location, UserProfile};
use crate::models::report::CareerAnalysis;
use crate::reports::memory::InMemoryReportStore;
use crate::service::CareerService;

/// Model output for the "Data Scientist" profile. `jobPossibility` sums to 100.
pub fn sample_analysis_json() -> String {
    r#"{
  "jobPossibility": {
    "bangladesh": 70,
    "international": 20,
    "none": 10
  },
  "educationGap": {
    "required": "Honours in CS, Statistics or Mathematics",
    "userHas": "Honours",
    "gap": "Degree level matches; applied ML coursework is thin.",
    "steps": ["Complete an applied ML specialization", "Publish two portfolio projects"]
  },
  "skillsGap": {
    "missing": [
      {"skill": "Machine Learning", "difficulty": "Intermediate", "timeToLearn": "4-6 months"},
      {"skill": "Statistics", "difficulty": "Beginner", "timeToLearn": "2 months"}
    ],
    "certifications": ["Google Data Analytics"]
  },
  "migrationGuide": {
    "languageRequirements": "IELTS 6.5 overall",
    "visaRequirements": "Skilled worker visa with employer sponsorship",
    "certifications": ["AWS Certified Machine Learning"]
  },
  "roadmap": {
    "shortTerm": {"duration": "1-3 months", "tasks": ["Learn pandas", "Finish a Kaggle project"]},
    "midTerm": {"duration": "3-6 months", "tasks": ["Study scikit-learn"]},
    "longTerm": {"duration": "1 year+", "tasks": ["Apply for junior data scientist roles"]}
  },
  "currentOpportunities": ["Data Analyst", "BI Analyst"],
  "futureOpportunities": ["Data Scientist", "ML Engineer"],
  "riskForecast": {
    "level": "Medium",
    "explanation": "Routine reporting is automatable; modelling work is not."
  }
}"#
    .to_string()
}

pub fn sample_analysis() -> CareerAnalysis {
    serde_json::from_str(&sample_analysis_json()).expect("fixture must parse")
}

/// The end-to-end profile: Data Scientist, Bangladesh, Honours, "Python, SQL", 2 years.
pub fn sample_profile() -> UserProfile {
    UserProfile {
        target_job: "Data Scientist".to_string(),
        location: vec![Location::Bangladesh],
        education: EducationLevel::Honours,
        skills: "Python, SQL".to_string(),
        experience: Some(2),
    }
}

/// Text generator that replays a fixed reply and records every prompt.
pub struct CannedGenerator {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last_prompt: std::sync::Mutex<Option<String>>,
}

impl CannedGenerator {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            calls: AtomicUsize::new(0),
            last_prompt: std::sync::Mutex::new(None),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            calls: AtomicUsize::new(0),
            last_prompt: std::sync::Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().expect("prompt lock").clone()
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().expect("prompt lock") = Some(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(LlmError::Api {
                status: 503,
                message: message.clone(),
            }),
        }
    }
}

/// Service wired to an in-memory store and the given generator.
pub fn service_with(generator: Arc<CannedGenerator>) -> (CareerService, Arc<InMemoryReportStore>) {
    let store = Arc::new(InMemoryReportStore::new());
    let service = CareerService::new(generator, store.clone());
    (service, store)
}
