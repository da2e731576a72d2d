//! Orbit display data and closest/farthest approach between Keplerian orbits.
//!
//! The workspace crates are re-exported under short names so front-ends only
//! depend on this package: `orbits` samples and caches orbit points, `extremes`
//! runs the coarse grid search plus local refinement, `config` loads body
//! catalogs and scenarios, and `export` writes CSV rows and scene descriptions.

pub use orrery_config as config;
pub use orrery_core as core;
pub use orrery_export as export;
pub use orrery_extremes as extremes;
pub use orrery_orbits as orbits;

pub use orrery_extremes::{ExtremalResult, ExtremalSolver, SolverConfig, extremes as solve};
pub use orrery_orbits::{NamedOrbit, OrbitalElements};

/// Returns the version of the library for smoke tests and `--version` banners.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
