//! Orders scored candidates, picks the top matches and summarizes the cohort.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::ScoredCandidate;
use crate::ranking::StatisticsError;

pub const TOP_MATCH_COUNT: usize = 3;
const EXCELLENT_THRESHOLD: u32 = 80;
const GOOD_THRESHOLD: u32 = 60;
const WEAK_THRESHOLD: u32 = 40;

/// Ranked view over one screening run. `top_matches` is always a prefix of `candidates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResultSet {
    pub candidates: Vec<ScoredCandidate>,
    pub top_matches: Vec<ScoredCandidate>,
    pub statistics: Statistics,
}

/// Serializes as `{}` for an empty cohort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(flatten)]
    pub cohort: Option<CohortStatistics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortStatistics {
    pub average_match_score: f64,
    pub highest_match_score: u32,
    pub lowest_match_score: u32,
    pub candidates_above_80: usize,
    pub candidates_above_60: usize,
    pub candidates_below_40: usize,
    pub total_skills_identified: usize,
    /// Mean over candidates with known, nonzero experience. `null` when there are none.
    pub average_experience: Option<f64>,
}

/// Sorts descending by match score. The sort is stable, so equal scores keep their
/// submission order.
pub fn rank(mut scored: Vec<ScoredCandidate>) -> RankedResultSet {
    info!("Ranking {} candidates", scored.len());

    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));

    let top_matches: Vec<ScoredCandidate> =
        scored.iter().take(TOP_MATCH_COUNT).cloned().collect();
    let statistics = compute_statistics(&scored);

    match top_matches.first() {
        Some(top) => info!(
            "Ranking completed. Top candidate: {} ({})",
            top.candidate.name, top.match_score
        ),
        None => info!("Ranking completed. No candidates"),
    }

    RankedResultSet {
        candidates: scored,
        top_matches,
        statistics,
    }
}

pub fn compute_statistics(candidates: &[ScoredCandidate]) -> Statistics {
    let scores: Vec<u32> = candidates.iter().map(|c| c.match_score).collect();
    let (Some(&highest), Some(&lowest)) = (scores.iter().max(), scores.iter().min()) else {
        return Statistics::default();
    };

    let count_where = |pred: fn(u32) -> bool| scores.iter().filter(|s| pred(**s)).count();

    let average_experience = match mean_experience(candidates) {
        Ok(mean) => Some(mean),
        Err(e) => {
            debug!("average_experience not applicable: {e}");
            None
        }
    };

    Statistics {
        cohort: Some(CohortStatistics {
            average_match_score: scores.iter().map(|s| f64::from(*s)).sum::<f64>()
                / scores.len() as f64,
            highest_match_score: highest,
            lowest_match_score: lowest,
            candidates_above_80: count_where(|s| s >= EXCELLENT_THRESHOLD),
            candidates_above_60: count_where(|s| s >= GOOD_THRESHOLD),
            candidates_below_40: count_where(|s| s < WEAK_THRESHOLD),
            total_skills_identified: candidates.iter().map(|c| c.candidate.skills.len()).sum(),
            average_experience,
        }),
    }
}

/// Mean years of experience, excluding absent and zero values from both sides of
/// the division.
pub fn mean_experience(candidates: &[ScoredCandidate]) -> Result<f64, StatisticsError> {
    let known: Vec<f64> = candidates
        .iter()
        .filter_map(|c| c.candidate.known_experience())
        .map(f64::from)
        .collect();

    if known.is_empty() {
        return Err(StatisticsError::DivisionUndefined);
    }
    Ok(known.iter().sum::<f64>() / known.len() as f64)
}
