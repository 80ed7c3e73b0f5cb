// Ranking: stable ordering by match score, top-match prefix, cohort statistics,
// and the fixed reasoning metadata published alongside results.

pub mod aggregator;
pub mod reasoning;

use thiserror::Error;

pub use aggregator::rank;

#[derive(Debug, Error, PartialEq)]
pub enum StatisticsError {
    #[error("no candidate has a known, nonzero experience value")]
    DivisionUndefined,
}
