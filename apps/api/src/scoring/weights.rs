use serde::{Deserialize, Serialize};

/// Fraction of the overall match score contributed by each factor. Sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub preferred: f64,
    pub role: f64,
}

impl ScoringWeights {
    pub const STANDARD: ScoringWeights = ScoringWeights {
        skills: 0.40,
        experience: 0.25,
        education: 0.15,
        preferred: 0.10,
        role: 0.10,
    };

    #[cfg(test)]
    pub fn total(&self) -> f64 {
        self.skills + self.experience + self.education + self.preferred + self.role
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Five sub-scores, each in 0–100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub preferred: f64,
    pub role: f64,
}

/// Weighted sum of the sub-scores, truncated and clamped to 0–100.
pub fn compute_match_score(scores: &SubScores, weights: &ScoringWeights) -> u32 {
    let total = scores.skills * weights.skills
        + scores.experience * weights.experience
        + scores.education * weights.education
        + scores.preferred * weights.preferred
        + scores.role * weights.role;
    total.clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(v: f64) -> SubScores {
        SubScores {
            skills: v,
            experience: v,
            education: v,
            preferred: v,
            role: v,
        }
    }

    #[test]
    fn test_standard_weights_sum_to_one() {
        assert!((ScoringWeights::default().total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_match_score_truncates() {
        // 0.4*50 + 0.25*75 + 0.15*50 + 0.1*0 + 0.1*30 = 20 + 18.75 + 7.5 + 0 + 3 = 49.25
        let scores = SubScores {
            skills: 50.0,
            experience: 75.0,
            education: 50.0,
            preferred: 0.0,
            role: 30.0,
        };
        assert_eq!(compute_match_score(&scores, &ScoringWeights::default()), 49);
    }

    #[test]
    fn test_match_score_clamped() {
        let w = ScoringWeights::default();
        assert!(compute_match_score(&uniform(250.0), &w) <= 100);
        assert_eq!(compute_match_score(&uniform(-40.0), &w), 0);
        assert_eq!(compute_match_score(&uniform(0.0), &w), 0);
    }
}
