//! Field extraction — turns raw resume text into a `CandidateRecord`.
//!
//! Each field comes from one independent heuristic rule with its own fallback.
//! Rules never read each other's output; the summary rule rescans the same text.

use std::path::Path;

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;
use uuid::Uuid;

use crate::extraction::skills_catalog::match_skills;
use crate::extraction::ExtractionError;
use crate::models::CandidateRecord;

// ────────────────────────────────────────────────────────────────────────────
// Keyword tables
// ────────────────────────────────────────────────────────────────────────────

const NAME_SCAN_LINES: usize = 5;
const NAME_HEADER_WORDS: &[&str] = &["resume", "curriculum", "cv", "vitae"];
const UNKNOWN_NAME: &str = "Unknown Candidate";

const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "doctorate",
    "degree",
    "university",
    "college",
    "institute",
    "school",
];

/// Recency markers. The year tokens are fixed so extraction stays deterministic.
const CURRENT_ROLE_INDICATORS: &[&str] = &["current", "present", "now", "currently", "2024", "2023"];
const CURRENT_ROLE_TITLE_WORDS: &[&str] = &[
    "developer",
    "engineer",
    "manager",
    "analyst",
    "designer",
    "architect",
];
const CURRENT_ROLE_WINDOW: usize = 2;

const PREVIOUS_ROLE_TITLE_WORDS: &[&str] = &[
    "developer",
    "engineer",
    "manager",
    "analyst",
    "consultant",
    "architect",
    "designer",
    "specialist",
    "coordinator",
    "lead",
    "director",
    "senior",
    "junior",
    "associate",
];
const MAX_PREVIOUS_ROLES: usize = 5;

const SUMMARY_MARKERS: &[&str] = &["summary", "profile", "objective", "about"];
const SUMMARY_WINDOW: usize = 4;
const SUMMARY_MIN_LINE_CHARS: usize = 20;
const SUMMARY_TARGET_CHARS: usize = 200;
const SUMMARY_MAX_CHARS: usize = 300;
pub const FALLBACK_SUMMARY: &str =
    "Professional with experience in software development and technology.";

// ────────────────────────────────────────────────────────────────────────────
// Patterns
// ────────────────────────────────────────────────────────────────────────────

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").unwrap()
});

// North American: optional +1, optional parens and separators.
static PHONE_GROUPED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+?1?[-.\s]?\(?([0-9]{3})\)?[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})").unwrap()
});
static PHONE_PLAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").unwrap());

// "Austin, TX", then "San Francisco, CA". Tried in order; kept on one line and
// the state must end a word.
static LOCATION_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b[A-Z][a-z]+,?[ \t]+[A-Z]{2}\b",
        r"\b[A-Z][a-z]+[ \t]+[A-Z][a-z]+,?[ \t]+[A-Z]{2}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

// Applied to lowercased text, in order.
static EXPERIENCE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(\d+)\+?\s*years?\s*(?:of\s*)?experience",
        r"(\d+)\+?\s*yrs?\s*(?:of\s*)?experience",
        r"experience[:\s]*(\d+)\+?\s*years?",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Extracts a candidate record from decoded resume text.
///
/// The file stem of `file_name` is the fallback identifier used when no name line
/// is found. Output is deterministic for identical input apart from the generated `id`.
pub fn extract(raw_text: &str, file_name: &str) -> Result<CandidateRecord, ExtractionError> {
    if raw_text.trim().is_empty() {
        return Err(ExtractionError::EmptyText);
    }

    let stem = file_stem(file_name);

    let record = CandidateRecord {
        id: generate_candidate_id(&stem),
        name: extract_name(raw_text, &stem),
        email: extract_email(raw_text),
        phone: extract_phone(raw_text),
        location: extract_location(raw_text),
        skills: match_skills(raw_text),
        experience: extract_experience_years(raw_text),
        education: extract_education(raw_text),
        current_role: extract_current_role(raw_text),
        previous_roles: extract_previous_roles(raw_text),
        summary: extract_summary(raw_text),
        raw_text: raw_text.to_string(),
        file_name: file_name.to_string(),
    };

    info!(
        "Extracted candidate '{}' from {} ({} skills)",
        record.name,
        file_name,
        record.skills.len()
    );
    Ok(record)
}

fn file_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `candidate_<timestamp>_<stem>_<8 hex>`: readable, and unique within a run even
/// when two uploads share a file name.
fn generate_candidate_id(stem: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "candidate_{}_{}_{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        stem,
        &suffix[..8]
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Rules
// ────────────────────────────────────────────────────────────────────────────

/// First of the leading non-empty lines that reads as a 2–4 word Title Case name.
/// Falls back to the identifier with `_`/`-` turned into spaces, title-cased.
pub fn extract_name(text: &str, fallback_identifier: &str) -> String {
    let candidate_line = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(NAME_SCAN_LINES)
        .filter(|line| {
            let lower = line.to_lowercase();
            !NAME_HEADER_WORDS.iter().any(|h| lower.contains(h))
        })
        .find(|line| looks_like_name(line));

    if let Some(line) = candidate_line {
        return line.to_string();
    }

    let fallback = title_case(&fallback_identifier.replace(['_', '-'], " "));
    let fallback = fallback.trim();
    if fallback.is_empty() {
        UNKNOWN_NAME.to_string()
    } else {
        fallback.to_string()
    }
}

fn looks_like_name(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    (2..=4).contains(&words.len())
        && words
            .iter()
            .filter(|w| w.chars().count() > 1)
            .all(|w| is_capitalized_word(w))
}

/// Uppercase first character, then at least one lowercase and no uppercase characters.
fn is_capitalized_word(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let rest: Vec<char> = chars.collect();
    first.is_uppercase()
        && rest.iter().any(|c| c.is_lowercase())
        && !rest.iter().any(|c| c.is_uppercase())
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    if let Some(caps) = PHONE_GROUPED_RE.captures(text) {
        if let (Some(area), Some(exchange), Some(line)) = (caps.get(1), caps.get(2), caps.get(3)) {
            return Some(format!(
                "({}) {}-{}",
                area.as_str(),
                exchange.as_str(),
                line.as_str()
            ));
        }
    }
    PHONE_PLAIN_RE.find(text).map(|m| m.as_str().to_string())
}

/// First pattern (in fixed order) that matches anywhere wins, so a single-word
/// city is preferred over a two-word one.
pub fn extract_location(text: &str) -> Option<String> {
    LOCATION_RES
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().to_string())
}

/// First pattern (in fixed order) that matches anywhere wins.
pub fn extract_experience_years(text: &str) -> Option<u32> {
    let lower = text.to_lowercase();
    EXPERIENCE_RES.iter().find_map(|re| {
        re.captures(&lower)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
    })
}

pub fn extract_education(text: &str) -> Option<String> {
    text.lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            EDUCATION_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .map(str::trim)
        .find(|line| {
            let len = line.chars().count();
            len > 10 && len < 200
        })
        .map(String::from)
}

/// For every line carrying a recency indicator, looks two lines either side for a
/// job-title line. The first hit across all indicator lines wins.
pub fn extract_current_role(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();

    for (i, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        if !CURRENT_ROLE_INDICATORS.iter().any(|ind| lower.contains(ind)) {
            continue;
        }

        let start = i.saturating_sub(CURRENT_ROLE_WINDOW);
        let end = (i + CURRENT_ROLE_WINDOW + 1).min(lines.len());
        for nearby in &lines[start..end] {
            let nearby = nearby.trim();
            let len = nearby.chars().count();
            if len > 5 && len < 100 {
                let nearby_lower = nearby.to_lowercase();
                if CURRENT_ROLE_TITLE_WORDS
                    .iter()
                    .any(|w| nearby_lower.contains(w))
                {
                    return Some(nearby.to_string());
                }
            }
        }
    }

    None
}

pub fn extract_previous_roles(text: &str) -> Vec<String> {
    let mut roles: Vec<String> = Vec::new();

    for line in text.lines().map(str::trim) {
        let len = line.chars().count();
        if len <= 5 || len >= 100 {
            continue;
        }
        let lower = line.to_lowercase();
        if PREVIOUS_ROLE_TITLE_WORDS.iter().any(|k| lower.contains(k))
            && !roles.iter().any(|r| r == line)
        {
            roles.push(line.to_string());
            if roles.len() == MAX_PREVIOUS_ROLES {
                break;
            }
        }
    }

    roles
}

/// Collects up to four substantial lines following a section marker. A marker whose
/// section yields nothing does not stop the scan; the next marker is tried.
pub fn extract_summary(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();

    for (i, line) in lines.iter().enumerate() {
        let lower = line.trim().to_lowercase();
        if !SUMMARY_MARKERS.iter().any(|m| lower.contains(m)) {
            continue;
        }

        let mut collected: Vec<&str> = Vec::new();
        for next in lines.iter().skip(i + 1).take(SUMMARY_WINDOW) {
            let next = next.trim();
            if next.chars().count() > SUMMARY_MIN_LINE_CHARS {
                collected.push(next);
                if collected.join(" ").chars().count() > SUMMARY_TARGET_CHARS {
                    break;
                }
            }
        }

        if !collected.is_empty() {
            return collected
                .join(" ")
                .chars()
                .take(SUMMARY_MAX_CHARS)
                .collect();
        }
    }

    FALLBACK_SUMMARY.to_string()
}
