//! Keplerian orbit model: element validation, position evaluation, and point sampling.
//!
//! Every consumer in the workspace (display curves, the coarse distance search,
//! and the local refinement) evaluates positions through [`model::position_at`],
//! so there is exactly one place where the ω → i → Ω rotation order lives.

pub mod curve;
pub mod elements;
pub mod model;
pub mod sampler;

pub use curve::CurveResolution;
pub use elements::{ElementsError, NamedOrbit, OrbitalElements};
pub use model::{PrecomputedOrbit, position_at};
pub use sampler::{OrbitPointSequence, SampleCache, SampleError, true_anomalies};
