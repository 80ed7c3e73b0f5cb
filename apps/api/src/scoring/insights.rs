//! Strengths, concerns and the narrative summary attached to a scored candidate.

use crate::models::{CandidateRecord, JobDescription};
use crate::scoring::weights::SubScores;

const EXCEEDS_EXPERIENCE_FACTOR: f64 = 1.2;
const SHORT_EXPERIENCE_FACTOR: f64 = 0.7;
const TECH_EDUCATION_WORDS: &[&str] = &["computer", "software", "engineering"];

pub const MISSING_EMAIL: &str = "Contact email not found in resume";
pub const MISSING_PHONE: &str = "Phone number not found in resume";
pub const MISSING_SKILLS: &str = "No technical skills clearly identified in resume";

/// Builds the ordered strengths and concerns lists. Checks run in a fixed order
/// (skills, experience, education, preferred skills, missing data) and every
/// check appends independently.
pub fn analyze_strengths_concerns(
    candidate: &CandidateRecord,
    job: &JobDescription,
    scores: &SubScores,
) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut concerns = Vec::new();

    if scores.skills >= 80.0 {
        strengths.push("Excellent technical skill alignment with job requirements".to_string());
    } else if scores.skills >= 60.0 {
        strengths.push("Good match with most required technical skills".to_string());
    } else if scores.skills < 40.0 {
        concerns.push("Limited match with required technical skills".to_string());
    }

    // Only compared when both sides are known and nonzero.
    if let Some(years) = candidate.known_experience() {
        if job.experience > 0 {
            let (have, need) = (f64::from(years), f64::from(job.experience));
            if have >= need * EXCEEDS_EXPERIENCE_FACTOR {
                strengths.push("Exceeds required experience level".to_string());
            } else if have >= need {
                strengths.push("Meets required experience level".to_string());
            } else if have < need * SHORT_EXPERIENCE_FACTOR {
                concerns.push(format!(
                    "May lack sufficient experience ({years} vs {} years required)",
                    job.experience
                ));
            }
        }
    }

    if let Some(education) = candidate.education.as_deref() {
        let education = education.to_lowercase();
        if TECH_EDUCATION_WORDS.iter().any(|w| education.contains(w)) {
            strengths.push("Relevant educational background in technology".to_string());
        }
    }

    if !job.preferred_skills.is_empty() && scores.preferred > 50.0 {
        // Derived from the score, rounded down: 2 of 3 reads as 1.
        let areas = (scores.preferred / 100.0 * job.preferred_skills.len() as f64).floor() as usize;
        strengths.push(format!("Strong in {areas} preferred skill areas"));
    }

    if candidate.email.is_none() {
        concerns.push(MISSING_EMAIL.to_string());
    }
    if candidate.phone.is_none() {
        concerns.push(MISSING_PHONE.to_string());
    }
    if candidate.skills.is_empty() {
        concerns.push(MISSING_SKILLS.to_string());
    }

    (strengths, concerns)
}

/// Qualitative label for a match score.
pub fn grade_label(match_score: u32) -> &'static str {
    match match_score {
        80.. => "Excellent",
        60..=79 => "Good",
        40..=59 => "Fair",
        _ => "Limited",
    }
}

pub fn generate_summary(
    candidate: &CandidateRecord,
    match_score: u32,
    strengths: &[String],
    concerns: &[String],
) -> String {
    let mut summary = format!("{} candidate", grade_label(match_score));

    if let Some(years) = candidate.known_experience() {
        summary.push_str(&format!(" with {years} years of experience"));
    }
    if let Some(role) = candidate.current_role.as_deref().filter(|r| !r.is_empty()) {
        summary.push_str(&format!(" currently working as {role}"));
    }
    summary.push_str(". ");

    if let Some(first) = strengths.first() {
        summary.push_str(&format!("Key strengths include {}. ", first.to_lowercase()));
    }

    match concerns.first() {
        Some(first) => summary.push_str(&format!(
            "Areas for consideration: {}.",
            first.to_lowercase()
        )),
        None => summary.push_str("Strong overall fit for the position."),
    }

    summary
}
