// Match scoring: five weighted sub-scores, strengths/concerns, narrative summary.
// Pure functions of (CandidateRecord, JobDescription); nothing here can fail.

pub mod insights;
pub mod matcher;
pub mod weights;

pub use matcher::{CandidateScorer, WeightedMatchScorer};
pub use weights::ScoringWeights;
