//! openlens-core: shared types for the OpenLens pipeline
//!
//! Holds the label accumulation type the detection and description crates
//! both operate on, plus the base error type the entry points report with.

pub mod error;
pub mod labels;

pub use error::{Error, Result};
pub use labels::LabelSequence;
