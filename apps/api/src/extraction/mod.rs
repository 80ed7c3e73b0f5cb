// Resume extraction: document decoding, skills catalog, and heuristic field rules.
// No I/O beyond decoding bytes that were already received.

pub mod document;
pub mod fields;
pub mod skills_catalog;

use thiserror::Error;

pub use document::{DocumentTextExtractor, TextExtractor};
pub use fields::extract;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no text could be extracted from the document")]
    EmptyText,

    #[error("could not decode document: {0}")]
    Decode(String),

    #[error("document is {size} bytes, limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },
}
