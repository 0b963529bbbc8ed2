// Aggregation: per-interview skill summary and insights, plus analytics across
// a user's completed interviews. Pure functions over session snapshots.

pub mod analytics;
pub mod handlers;
pub mod summary;
