//! Closest and farthest approach between two confocal Keplerian orbits.
//!
//! The search runs in two phases. A coarse pass samples both orbits, builds the
//! full pairwise distance matrix and picks the global minimum and maximum
//! cells. Each pick then seeds a small derivative-free pattern search over the
//! two true anomalies, and the final positions are evaluated directly from the
//! orbit model at the refined angles.

pub mod matrix;
pub mod median;
pub mod refine;
pub mod solver;

pub use matrix::{CoarseExtrema, DistanceMatrix, MatrixCell};
pub use median::median;
pub use refine::{Objective, Refinement, refine};
pub use solver::{
    ExtremalPoint, ExtremalResult, ExtremalSearch, ExtremalSolver, SolverConfig, SolverError,
    extremes,
};
