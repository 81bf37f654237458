//! Pipelines.
//!
//! [Generator]s turn an edition record into training examples,
//! and the [Batch] runner drives one over a whole record file, round after round.
pub mod labels;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod restoration;
pub mod sample;
pub mod seed;

pub use labels::{Labels, LabelsConfig};
pub use pipeline::{Batch, Generator, Pipeline};
pub use restoration::{Correspondence, Restoration, RestorationConfig, ScrambleMode};
pub use sample::Sample;
