//! Match scoring — pluggable scorer that measures one candidate record against a job.
//!
//! Default: `WeightedMatchScorer`, five fixed-weight sub-scores combined into a
//! 0–100 match score. Absent candidate fields and empty job fields degrade to the
//! documented neutral sub-score; scoring never fails.

use tracing::debug;

use crate::models::{AnalysisDetails, CandidateRecord, JobDescription, ScoredCandidate};
use crate::scoring::insights::{analyze_strengths_concerns, generate_summary};
use crate::scoring::weights::{compute_match_score, ScoringWeights, SubScores};

const NEUTRAL_SKILLS_SCORE: f64 = 50.0;
const NO_EXPERIENCE_REQUIREMENT_SCORE: f64 = 75.0;
const UNKNOWN_EXPERIENCE_SCORE: f64 = 25.0;
const EXCESS_YEAR_BONUS: f64 = 5.0;
const NEUTRAL_EDUCATION_SCORE: f64 = 50.0;
const NO_PREFERRED_SKILLS_SCORE: f64 = 0.0;
const NEUTRAL_ROLE_SCORE: f64 = 50.0;
const UNRELATED_ROLE_SCORE: f64 = 30.0;

const RELEVANT_FIELDS: &[&str] = &[
    "computer science",
    "software engineering",
    "information technology",
    "computer engineering",
    "electrical engineering",
    "mathematics",
    "data science",
    "cybersecurity",
];
const SENIORITY_QUALIFIERS: &[&str] = &["senior", "junior", "lead", "principal", "staff"];
const GENERIC_ROLE_WORDS: &[&str] = &["developer", "engineer", "programmer"];

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Turns an extracted record into a scored candidate for one job.
///
/// Carried in `AppState` as `Arc<dyn CandidateScorer>`. Pure: no shared mutable
/// state, safe to call from any number of tasks.
pub trait CandidateScorer: Send + Sync {
    fn score(&self, candidate: CandidateRecord, job: &JobDescription) -> ScoredCandidate;

    /// Short label for logs.
    fn backend(&self) -> &'static str;
}

/// Fixed-weight multi-factor scorer.
#[derive(Debug, Clone, Default)]
pub struct WeightedMatchScorer {
    weights: ScoringWeights,
}

impl CandidateScorer for WeightedMatchScorer {
    fn score(&self, candidate: CandidateRecord, job: &JobDescription) -> ScoredCandidate {
        let scores = compute_sub_scores(&candidate, job);
        let match_score = compute_match_score(&scores, &self.weights);

        debug!(
            candidate = %candidate.name,
            skills = scores.skills,
            experience = scores.experience,
            education = scores.education,
            preferred = scores.preferred,
            role = scores.role,
            match_score,
            "Scored candidate"
        );

        let (strengths, concerns) = analyze_strengths_concerns(&candidate, job, &scores);
        let summary = generate_summary(&candidate, match_score, &strengths, &concerns);

        ScoredCandidate {
            candidate: CandidateRecord {
                summary,
                ..candidate
            },
            match_score,
            strengths,
            concerns,
            analysis_details: AnalysisDetails {
                skills_score: scores.skills,
                experience_score: scores.experience,
                education_score: scores.education,
                preferred_skills_score: scores.preferred,
                role_relevance_score: scores.role,
                weights_used: self.weights,
            },
        }
    }

    fn backend(&self) -> &'static str {
        "weighted"
    }
}

pub fn compute_sub_scores(candidate: &CandidateRecord, job: &JobDescription) -> SubScores {
    SubScores {
        skills: skills_score(candidate, job),
        experience: experience_score(candidate, job),
        education: education_score(candidate),
        preferred: preferred_skills_score(candidate, job),
        role: role_relevance_score(candidate, job),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sub-scores
// ────────────────────────────────────────────────────────────────────────────

/// Number of `wanted` skills the candidate covers. A skill counts when it and any
/// extracted skill contain one another, or when it appears verbatim in the resume text.
pub fn count_matched_skills(wanted: &[String], candidate: &CandidateRecord) -> usize {
    let candidate_skills: Vec<String> = candidate.skills.iter().map(|s| s.to_lowercase()).collect();
    let text = candidate.raw_text.to_lowercase();

    wanted
        .iter()
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| {
            candidate_skills
                .iter()
                .any(|cand| cand.contains(skill.as_str()) || skill.contains(cand.as_str()))
                || text.contains(skill.as_str())
        })
        .count()
}

pub fn skills_score(candidate: &CandidateRecord, job: &JobDescription) -> f64 {
    if job.requirements.is_empty() {
        return NEUTRAL_SKILLS_SCORE;
    }
    let matched = count_matched_skills(&job.requirements, candidate);
    matched as f64 / job.requirements.len() as f64 * 100.0
}

pub fn experience_score(candidate: &CandidateRecord, job: &JobDescription) -> f64 {
    let required = job.experience;
    if required == 0 {
        return NO_EXPERIENCE_REQUIREMENT_SCORE;
    }
    let Some(years) = candidate.experience else {
        return UNKNOWN_EXPERIENCE_SCORE;
    };

    if years >= required {
        return (100.0 + f64::from(years - required) * EXCESS_YEAR_BONUS).min(100.0);
    }

    match f64::from(years) / f64::from(required) {
        r if r >= 0.8 => 80.0,
        r if r >= 0.6 => 60.0,
        r if r >= 0.4 => 40.0,
        _ => 20.0,
    }
}

pub fn education_score(candidate: &CandidateRecord) -> f64 {
    let education = match candidate.education.as_deref() {
        Some(e) if !e.trim().is_empty() => e.to_lowercase(),
        _ => return NEUTRAL_EDUCATION_SCORE,
    };
    let mentions = |words: &[&str]| words.iter().any(|w| education.contains(w));

    if mentions(RELEVANT_FIELDS) {
        if mentions(&["master", "phd", "doctorate"]) {
            100.0
        } else if mentions(&["bachelor"]) {
            85.0
        } else {
            70.0
        }
    } else if mentions(&["bachelor", "master", "degree"]) {
        60.0
    } else {
        40.0
    }
}

/// Zero when the job lists no preferred skills: there is no bonus to award.
pub fn preferred_skills_score(candidate: &CandidateRecord, job: &JobDescription) -> f64 {
    if job.preferred_skills.is_empty() {
        return NO_PREFERRED_SKILLS_SCORE;
    }
    let matched = count_matched_skills(&job.preferred_skills, candidate);
    matched as f64 / job.preferred_skills.len() as f64 * 100.0
}

/// The current role is always checked before previous roles, even when a previous
/// role would have matched the title keywords.
pub fn role_relevance_score(candidate: &CandidateRecord, job: &JobDescription) -> f64 {
    if !job.has_title() {
        return NEUTRAL_ROLE_SCORE;
    }

    let title = job.title.to_lowercase();
    let keywords: Vec<&str> = title
        .split_whitespace()
        .filter(|w| !SENIORITY_QUALIFIERS.contains(w))
        .collect();
    let has_keyword = |role: &str| keywords.iter().any(|k| role.contains(k));
    let has_generic = |role: &str| GENERIC_ROLE_WORDS.iter().any(|g| role.contains(g));

    if let Some(current) = candidate.current_role.as_deref().filter(|r| !r.is_empty()) {
        let current = current.to_lowercase();
        if has_keyword(&current) {
            return 100.0;
        }
        if has_generic(&current) {
            return 75.0;
        }
    }

    for role in &candidate.previous_roles {
        let role = role.to_lowercase();
        if has_keyword(&role) {
            return 80.0;
        }
        if has_generic(&role) {
            return 60.0;
        }
    }

    UNRELATED_ROLE_SCORE
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn make_candidate() -> CandidateRecord {
        CandidateRecord {
            id: "candidate_test".to_string(),
            name: "Jane Doe".to_string(),
            email: Some("jane@example.com".to_string()),
            phone: Some("(555) 123-4567".to_string()),
            location: None,
            skills: vec![],
            experience: None,
            education: None,
            current_role: None,
            previous_roles: vec![],
            summary: "Extracted summary".to_string(),
            raw_text: String::new(),
            file_name: "jane_doe.pdf".to_string(),
        }
    }

    pub(crate) fn make_job(title: &str, requirements: &[&str], preferred: &[&str], years: u32) -> JobDescription {
        JobDescription {
            title: title.to_string(),
            company: "Acme".to_string(),
            requirements: requirements.iter().map(|s| s.to_string()).collect(),
            preferred_skills: preferred.iter().map(|s| s.to_string()).collect(),
            experience: years,
            ..Default::default()
        }
    }

    // ── skills ──────────────────────────────────────────────────────────────

    #[test]
    fn test_skills_neutral_without_requirements() {
        let job = make_job("Engineer", &[], &[], 0);
        assert_eq!(skills_score(&make_candidate(), &job), 50.0);
    }

    #[test]
    fn test_skills_matched_via_raw_text() {
        let candidate = CandidateRecord {
            skills: vec!["Python".to_string()],
            raw_text: "Built reporting on a SQL database".to_string(),
            ..make_candidate()
        };
        let job = make_job("Engineer", &["Python", "SQL"], &[], 0);
        assert_eq!(skills_score(&candidate, &job), 100.0);
    }

    #[test]
    fn test_skills_substring_both_directions() {
        let candidate = CandidateRecord {
            skills: vec!["PostgreSQL".to_string(), "React".to_string()],
            ..make_candidate()
        };
        // "sql" ⊂ "postgresql"; "react" ⊂ "react native"
        let job = make_job("Engineer", &["SQL", "React Native", "Haskell"], &[], 0);
        let score = skills_score(&candidate, &job);
        assert!((score - 200.0 / 3.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_skills_requirement_trimmed_and_case_insensitive() {
        let candidate = CandidateRecord {
            skills: vec!["Docker".to_string()],
            ..make_candidate()
        };
        let job = make_job("Engineer", &["  DOCKER "], &[], 0);
        assert_eq!(skills_score(&candidate, &job), 100.0);
    }

    // ── experience ──────────────────────────────────────────────────────────

    #[test]
    fn test_experience_unspecified_requirement_is_75() {
        let job = make_job("Engineer", &[], &[], 0);
        for years in [None, Some(0), Some(3), Some(30)] {
            let c = CandidateRecord {
                experience: years,
                ..make_candidate()
            };
            assert_eq!(experience_score(&c, &job), 75.0);
        }
    }

    #[test]
    fn test_experience_unknown_is_25() {
        let job = make_job("Engineer", &[], &[], 5);
        assert_eq!(experience_score(&make_candidate(), &job), 25.0);
    }

    #[test]
    fn test_experience_step_bands() {
        let job = make_job("Engineer", &[], &[], 10);
        let expected = [(0, 20.0), (3, 20.0), (4, 40.0), (6, 60.0), (7, 60.0), (8, 80.0), (9, 80.0), (10, 100.0), (12, 100.0)];
        for (years, score) in expected {
            let c = CandidateRecord {
                experience: Some(years),
                ..make_candidate()
            };
            assert_eq!(experience_score(&c, &job), score, "candidate={years} required=10");
        }
    }

    #[test]
    fn test_experience_monotonic_in_years() {
        let job = make_job("Engineer", &[], &[], 7);
        let mut last = 0.0;
        for years in 0..20 {
            let c = CandidateRecord {
                experience: Some(years),
                ..make_candidate()
            };
            let score = experience_score(&c, &job);
            assert!(score >= last, "score dropped at {years} years");
            last = score;
        }
    }

    // ── education ───────────────────────────────────────────────────────────

    #[test]
    fn test_education_ladder() {
        let cases = [
            (None, 50.0),
            (Some("Master of Science in Computer Science"), 100.0),
            (Some("PhD, Mathematics"), 100.0),
            (Some("Bachelor of Science in Software Engineering"), 85.0),
            (Some("Diploma in Information Technology"), 70.0),
            (Some("Bachelor of Arts in History"), 60.0),
            (Some("Associate degree in Business"), 60.0),
            (Some("Springfield High School"), 40.0),
        ];
        for (education, expected) in cases {
            let c = CandidateRecord {
                education: education.map(String::from),
                ..make_candidate()
            };
            assert_eq!(education_score(&c), expected, "education={education:?}");
        }
    }

    // ── preferred ───────────────────────────────────────────────────────────

    #[test]
    fn test_preferred_zero_when_none_listed() {
        let c = CandidateRecord {
            skills: vec!["Docker".to_string()],
            ..make_candidate()
        };
        assert_eq!(preferred_skills_score(&c, &make_job("Engineer", &[], &[], 0)), 0.0);
    }

    #[test]
    fn test_preferred_fraction_matched() {
        let c = CandidateRecord {
            skills: vec!["Docker".to_string()],
            raw_text: "kubernetes clusters".to_string(),
            ..make_candidate()
        };
        let job = make_job("Engineer", &[], &["Docker", "Kubernetes", "Terraform", "Go"], 0);
        assert_eq!(preferred_skills_score(&c, &job), 50.0);
    }

    // ── role ────────────────────────────────────────────────────────────────

    #[test]
    fn test_role_neutral_without_title() {
        let c = CandidateRecord {
            current_role: Some("Software Engineer".to_string()),
            ..make_candidate()
        };
        assert_eq!(role_relevance_score(&c, &make_job("  ", &[], &[], 0)), 50.0);
    }

    #[test]
    fn test_role_current_keyword_match() {
        let c = CandidateRecord {
            current_role: Some("Backend Developer at Initech".to_string()),
            ..make_candidate()
        };
        assert_eq!(role_relevance_score(&c, &make_job("Senior Backend Developer", &[], &[], 0)), 100.0);
    }

    #[test]
    fn test_role_seniority_words_are_not_keywords() {
        let c = CandidateRecord {
            current_role: Some("Senior Accountant".to_string()),
            ..make_candidate()
        };
        assert_eq!(role_relevance_score(&c, &make_job("Senior Designer", &[], &[], 0)), 30.0);
    }

    #[test]
    fn test_role_current_generic_beats_previous_keyword() {
        let c = CandidateRecord {
            current_role: Some("Embedded Engineer".to_string()),
            previous_roles: vec!["Data Scientist".to_string()],
            ..make_candidate()
        };
        // previous role would give 80, but the current role is checked first
        assert_eq!(role_relevance_score(&c, &make_job("Data Scientist", &[], &[], 0)), 75.0);
    }

    #[test]
    fn test_role_previous_roles_in_order() {
        let c = CandidateRecord {
            previous_roles: vec!["Web Developer".to_string(), "Data Analyst".to_string()],
            ..make_candidate()
        };
        // first previous role is generic → 60, even though the second matches the title
        assert_eq!(role_relevance_score(&c, &make_job("Data Analyst", &[], &[], 0)), 60.0);

        let c = CandidateRecord {
            previous_roles: vec!["Data Analyst".to_string()],
            ..make_candidate()
        };
        assert_eq!(role_relevance_score(&c, &make_job("Data Analyst", &[], &[], 0)), 80.0);
    }

    #[test]
    fn test_role_nothing_matches() {
        assert_eq!(role_relevance_score(&make_candidate(), &make_job("Data Analyst", &[], &[], 0)), 30.0);
    }

    // ── scorer ──────────────────────────────────────────────────────────────

    #[test]
    fn test_unknown_experience_contributes_quarter_weight_without_concern() {
        let c = CandidateRecord {
            skills: vec!["Python".to_string()],
            raw_text: "python".to_string(),
            ..make_candidate()
        };
        let job = make_job("", &["Python"], &[], 5);
        let scored = WeightedMatchScorer::default().score(c, &job);

        // skills 100*0.4 + exp 25*0.25 + edu 50*0.15 + pref 0 + role 50*0.1 = 40 + 6.25 + 7.5 + 5 = 58.75
        assert_eq!(scored.match_score, 58);
        assert_eq!(scored.analysis_details.experience_score, 25.0);
        assert!(
            !scored.concerns.iter().any(|c| c.contains("experience")),
            "concerns: {:?}",
            scored.concerns
        );
    }

    #[test]
    fn test_scored_candidate_keeps_record_fields_and_replaces_summary() {
        let c = CandidateRecord {
            skills: vec!["Rust".to_string()],
            ..make_candidate()
        };
        let original = c.clone();
        let scored = WeightedMatchScorer::default().score(c, &make_job("Engineer", &["Rust"], &[], 0));

        assert_eq!(scored.candidate.id, original.id);
        assert_eq!(scored.candidate.skills, original.skills);
        assert_ne!(scored.candidate.summary, original.summary);
        assert_eq!(scored.analysis_details.weights_used, ScoringWeights::default());
    }

    #[test]
    fn test_match_score_always_bounded() {
        let scorer = WeightedMatchScorer::default();
        let rich = CandidateRecord {
            skills: vec!["Rust".to_string(), "Go".to_string()],
            experience: Some(40),
            education: Some("PhD in Computer Science".to_string()),
            current_role: Some("Rust Engineer".to_string()),
            raw_text: "rust go".to_string(),
            ..make_candidate()
        };
        let jobs = [
            make_job("Rust Engineer", &["Rust", "Go"], &["Rust"], 1),
            make_job("", &[], &[], 0),
            make_job("Chef", &["Cooking"], &["Baking"], 30),
        ];
        for job in &jobs {
            for c in [rich.clone(), make_candidate()] {
                let score = scorer.score(c, job).match_score;
                assert!(score <= 100, "score {score} out of range");
            }
        }
    }

    #[test]
    fn test_perfect_candidate_scores_100() {
        let c = CandidateRecord {
            skills: vec!["Rust".to_string()],
            experience: Some(8),
            education: Some("MSc, Master of Computer Science".to_string()),
            current_role: Some("Rust Engineer".to_string()),
            raw_text: "rust docker".to_string(),
            ..make_candidate()
        };
        let job = make_job("Senior Rust Engineer", &["Rust"], &["Docker"], 5);
        let scored = WeightedMatchScorer::default().score(c, &job);
        assert_eq!(scored.match_score, 100);
    }

    #[test]
    fn test_scorer_backend_label() {
        assert_eq!(WeightedMatchScorer::default().backend(), "weighted");
    }
}
