// Interview lifecycle: start → answer × N → finish (or abandon).
// Scoring goes through `scoring::ScoringEngine`; aggregation through `reporting`.

pub mod handlers;
pub mod service;
pub mod session;
pub mod store;
