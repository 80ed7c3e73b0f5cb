//! Explanation payload published with every screening result. Describes the fixed
//! process and weight table; it is not generated per run.

use serde::Serialize;

use crate::scoring::ScoringWeights;

#[derive(Debug, Clone, Serialize)]
pub struct AgentReasoning {
    pub process_steps: Vec<&'static str>,
    pub scoring_methodology: ScoringMethodology,
    pub decision_factors: Vec<&'static str>,
    pub autonomous_features: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoringMethodology {
    pub skills_matching: String,
    pub experience_level: String,
    pub education_relevance: String,
    pub preferred_skills: String,
    pub role_relevance: String,
}

const PROCESS_STEPS: &[&str] = &[
    "Document text extraction and parsing",
    "Information extraction using pattern rules",
    "Skill matching against job requirements",
    "Experience level analysis and scoring",
    "Education relevance assessment",
    "Preferred skills bonus calculation",
    "Role relevance evaluation",
    "Multi-factor weighted scoring",
    "Candidate ranking and selection",
    "Strength and concern identification",
    "Summary generation and reporting",
];

const DECISION_FACTORS: &[&str] = &[
    "Technical skill alignment with job requirements",
    "Professional experience level and relevance",
    "Educational background in relevant fields",
    "Demonstrated expertise in preferred technologies",
    "Career progression and role relevance",
    "Contact information completeness",
    "Resume quality and information clarity",
];

const AUTONOMOUS_FEATURES: &[&str] = &[
    "Automatic document parsing and text extraction",
    "Information extraction without manual input",
    "Self-scoring using predefined algorithms",
    "Automatic candidate ranking and selection",
    "Per-request analysis and reporting",
    "Fallback values for unrecognized resume layouts",
];

pub fn agent_reasoning() -> AgentReasoning {
    let w = ScoringWeights::STANDARD;
    let pct = |weight: f64| (weight * 100.0).round() as u32;

    AgentReasoning {
        process_steps: PROCESS_STEPS.to_vec(),
        scoring_methodology: ScoringMethodology {
            skills_matching: format!(
                "{}% weight - Direct matching of candidate skills with job requirements",
                pct(w.skills)
            ),
            experience_level: format!(
                "{}% weight - Years of experience compared to job requirements",
                pct(w.experience)
            ),
            education_relevance: format!(
                "{}% weight - Educational background alignment with role",
                pct(w.education)
            ),
            preferred_skills: format!(
                "{}% weight - Bonus points for preferred qualifications",
                pct(w.preferred)
            ),
            role_relevance: format!(
                "{}% weight - Current/previous role similarity to target position",
                pct(w.role)
            ),
        },
        decision_factors: DECISION_FACTORS.to_vec(),
        autonomous_features: AUTONOMOUS_FEATURES.to_vec(),
    }
}
