//! The board data model: dataset rows, pins, and the board aggregate.

/// Ordered dataset rows and cell/content resolution.
pub mod dataset;
/// Board and pin model types with construction-time validation.
pub mod model;
