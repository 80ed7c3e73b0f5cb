// Screening: batch orchestration over extraction, scoring and ranking, plus the
// HTTP handlers, plain-text report and results notification built on top of it.

pub mod handlers;
pub mod notify;
pub mod pipeline;
pub mod report;
