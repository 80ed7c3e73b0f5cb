pub mod candidate;
pub mod job;

pub use candidate::{AnalysisDetails, CandidateRecord, ScoredCandidate};
pub use job::JobDescription;
