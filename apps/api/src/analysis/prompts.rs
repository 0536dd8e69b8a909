// Career analysis prompt templates.
// The profile block and the schema's education slot are rendered per request;
// everything else is fixed text.

pub const ANALYST_PREAMBLE: &str = "You are an expert career counselor and job market analyst. \
Analyze the following user profile and provide a comprehensive career analysis in JSON format.";

pub const SCHEMA_INTRO: &str = "Please provide a detailed analysis in the following JSON structure:";

/// Replaced with the profile's education level when the prompt is built.
pub const EDUCATION_SLOT: &str = "{education}";

pub const CAREER_ANALYSIS_SCHEMA: &str = r#"{
  "jobPossibility": {
    "bangladesh": <integer 0-100>,
    "international": <integer 0-100>,
    "none": <integer 0-100>
  },
  "educationGap": {
    "required": "<minimum education requirement>",
    "userHas": "{education}",
    "gap": "<explanation of gap>",
    "steps": ["<step 1>", "<step 2>", ...]
  },
  "skillsGap": {
    "missing": [
      {
        "skill": "<skill name>",
        "difficulty": "<Beginner/Intermediate/Expert>",
        "timeToLearn": "<estimated time>"
      }
    ],
    "certifications": ["<certification 1>", "<certification 2>", ...]
  },
  "migrationGuide": {
    "languageRequirements": "<IELTS/TOEFL requirements>",
    "visaRequirements": "<visa information>",
    "certifications": ["<international certifications>"]
  },
  "roadmap": {
    "shortTerm": {
      "duration": "1-3 months",
      "tasks": ["<task 1>", "<task 2>", ...]
    },
    "midTerm": {
      "duration": "3-6 months",
      "tasks": ["<task 1>", "<task 2>", ...]
    },
    "longTerm": {
      "duration": "1 year+",
      "tasks": ["<task 1>", "<task 2>", ...]
    }
  },
  "currentOpportunities": ["<job role 1>", "<job role 2>", ...],
  "futureOpportunities": ["<job role 1>", "<job role 2>", ...],
  "riskForecast": {
    "level": "<Low/Medium/High>",
    "explanation": "<explanation of automation risk>"
  }
}"#;

pub const ANALYSIS_RULES: &str = "IMPORTANT:
1. The jobPossibility values MUST be whole numbers that sum to exactly 100.
2. Provide realistic and actionable advice based on current job market trends.
3. Consider Bangladesh's job market specifically when analyzing local opportunities.
4. Use exactly the field names and enum values shown above.";
