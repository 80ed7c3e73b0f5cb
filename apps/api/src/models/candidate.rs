use serde::{Deserialize, Serialize};

use crate::scoring::weights::ScoringWeights;

/// Structured fields extracted from one resume. Produced once per document by the
/// field extractor and never mutated afterwards; scoring builds a `ScoredCandidate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: String,
    /// Never empty: falls back to the title-cased file stem.
    pub name: String,
    pub email: Option<String>,
    /// Normalized as `(AAA) BBB-CCCC` when the three-group pattern matched.
    pub phone: Option<String>,
    pub location: Option<String>,
    /// Canonical catalog names, deduplicated, alphabetically ordered.
    pub skills: Vec<String>,
    /// Years of experience stated in the text.
    pub experience: Option<u32>,
    pub education: Option<String>,
    pub current_role: Option<String>,
    /// At most 5, first-seen order, no duplicates.
    pub previous_roles: Vec<String>,
    /// Never empty: a generic sentence when no summary section is found.
    pub summary: String,
    pub raw_text: String,
    pub file_name: String,
}

impl CandidateRecord {
    /// Experience counts as "known" for comparisons only when present and nonzero.
    pub fn known_experience(&self) -> Option<u32> {
        self.experience.filter(|years| *years > 0)
    }
}

/// Per-factor sub-scores (each 0–100) and the weight table that combined them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    pub skills_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub preferred_skills_score: f64,
    pub role_relevance_score: f64,
    pub weights_used: ScoringWeights,
}

/// A candidate record joined with its match analysis against one job.
/// `candidate.summary` holds the scoring-derived narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: CandidateRecord,
    /// 0 – 100
    pub match_score: u32,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub analysis_details: AnalysisDetails,
}
