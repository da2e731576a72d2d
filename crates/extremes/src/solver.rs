//! Coarse-to-fine extremal distance search between two orbits.

use orrery_core::vector::{Vector3, distance};
use orrery_orbits::{NamedOrbit, OrbitalElements, PrecomputedOrbit, SampleCache, SampleError};
use serde::Deserialize;
use thiserror::Error;

use crate::matrix::{CoarseExtrema, DistanceMatrix};
use crate::median::median;
use crate::refine::{Objective, Refinement, refine};

/// Sample count used for the coarse search unless overridden.
pub const DEFAULT_SAMPLE_COUNT: usize = 500;
/// Sample count used for median distances unless overridden.
pub const DEFAULT_MEDIAN_SAMPLE_COUNT: usize = 1000;

/// Errors surfaced before a search starts. A validated search never fails.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("invalid resolution: {0}")]
    Resolution(#[from] SampleError),
    #[error("invalid solver configuration: {0}")]
    Config(&'static str),
}

/// Tuning knobs for the coarse grid and the pattern search.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Points sampled per orbit in the coarse pass.
    pub sample_count: usize,
    /// Pattern-search iteration budget per extremum.
    pub refine_steps: usize,
    /// Initial neighbour offset (radians).
    pub initial_step_rad: f64,
    /// The search stops once a halving drops the step below this (radians).
    pub step_floor_rad: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            refine_steps: 5,
            initial_step_rad: 1.0e-3,
            step_floor_rad: 1.0e-6,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.sample_count < 2 {
            return Err(SampleError::Resolution {
                n: self.sample_count,
            }
            .into());
        }
        if !self.initial_step_rad.is_finite() || self.initial_step_rad <= 0.0 {
            return Err(SolverError::Config("initial_step_rad must be finite and positive"));
        }
        if !self.step_floor_rad.is_finite() || self.step_floor_rad <= 0.0 {
            return Err(SolverError::Config("step_floor_rad must be finite and positive"));
        }
        Ok(())
    }
}

/// One extremum: the separation and where on each orbit it occurs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremalPoint {
    pub distance: f64,
    pub theta1: f64,
    pub theta2: f64,
    pub position1: Vector3,
    pub position2: Vector3,
}

impl ExtremalPoint {
    fn evaluate(
        orbit1: &PrecomputedOrbit,
        orbit2: &PrecomputedOrbit,
        theta1: f64,
        theta2: f64,
    ) -> Self {
        let position1 = orbit1.position_at(theta1);
        let position2 = orbit2.position_at(theta2);
        Self {
            distance: distance(&position1, &position2),
            theta1,
            theta2,
            position1,
            position2,
        }
    }
}

/// Closest and farthest approach between two orbits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremalResult {
    pub min: ExtremalPoint,
    pub max: ExtremalPoint,
}

impl ExtremalResult {
    pub fn min_distance(&self) -> f64 {
        self.min.distance
    }

    pub fn max_distance(&self) -> f64 {
        self.max.distance
    }

    /// `max / min`, or `None` when the orbits touch.
    pub fn ratio(&self) -> Option<f64> {
        if self.min.distance > 0.0 {
            Some(self.max.distance / self.min.distance)
        } else {
            None
        }
    }
}

/// Full record of a search, including the coarse picks and refinement traces.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtremalSearch {
    pub result: ExtremalResult,
    pub coarse: CoarseExtrema,
    pub min_refinement: Refinement,
    pub max_refinement: Refinement,
}

/// A solver session: configuration plus the point-sequence cache it owns.
pub struct ExtremalSolver {
    config: SolverConfig,
    cache: SampleCache,
}

impl Default for ExtremalSolver {
    fn default() -> Self {
        Self {
            config: SolverConfig::default(),
            cache: SampleCache::new(),
        }
    }
}

impl ExtremalSolver {
    pub fn new(config: SolverConfig) -> Result<Self, SolverError> {
        config.validate()?;
        Ok(Self {
            config,
            cache: SampleCache::new(),
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn cache(&self) -> &SampleCache {
        &self.cache
    }

    /// Extremes at the configured sample count.
    pub fn extremes(
        &mut self,
        orbit1: &NamedOrbit,
        orbit2: &NamedOrbit,
    ) -> Result<ExtremalResult, SolverError> {
        self.extremes_with(orbit1, orbit2, self.config.sample_count)
    }

    /// Extremes with an explicit sample count `n`.
    pub fn extremes_with(
        &mut self,
        orbit1: &NamedOrbit,
        orbit2: &NamedOrbit,
        n: usize,
    ) -> Result<ExtremalResult, SolverError> {
        Ok(self.search(orbit1, orbit2, n)?.result)
    }

    /// Run both phases and keep the intermediate picks.
    pub fn search(
        &mut self,
        orbit1: &NamedOrbit,
        orbit2: &NamedOrbit,
        n: usize,
    ) -> Result<ExtremalSearch, SolverError> {
        let points1 = self.cache.sample(&orbit1.name, &orbit1.elements, n)?;
        let points2 = self.cache.sample(&orbit2.name, &orbit2.elements, n)?;

        let matrix = DistanceMatrix::between(points1.points(), points2.points());
        let coarse = matrix.extrema().ok_or(SampleError::Resolution { n })?;
        tracing::debug!(
            first = %orbit1.name,
            second = %orbit2.name,
            n,
            coarse_min = coarse.min.distance,
            coarse_max = coarse.max.distance,
            "coarse search complete"
        );

        let precomputed1 = orbit1.elements.precompute();
        let precomputed2 = orbit2.elements.precompute();

        let min_refinement = refine(
            &precomputed1,
            &precomputed2,
            points1.true_anomaly(coarse.min.row),
            points2.true_anomaly(coarse.min.col),
            Objective::Minimize,
            &self.config,
        );
        let max_refinement = refine(
            &precomputed1,
            &precomputed2,
            points1.true_anomaly(coarse.max.row),
            points2.true_anomaly(coarse.max.col),
            Objective::Maximize,
            &self.config,
        );

        let result = ExtremalResult {
            min: ExtremalPoint::evaluate(
                &precomputed1,
                &precomputed2,
                min_refinement.theta1,
                min_refinement.theta2,
            ),
            max: ExtremalPoint::evaluate(
                &precomputed1,
                &precomputed2,
                max_refinement.theta1,
                max_refinement.theta2,
            ),
        };
        tracing::debug!(
            first = %orbit1.name,
            second = %orbit2.name,
            min = result.min.distance,
            max = result.max.distance,
            "refinement complete"
        );

        Ok(ExtremalSearch {
            result,
            coarse,
            min_refinement,
            max_refinement,
        })
    }

    /// Median of all pairwise sample distances between the two orbits.
    pub fn median_distance(
        &mut self,
        orbit1: &NamedOrbit,
        orbit2: &NamedOrbit,
        n: usize,
    ) -> Result<f64, SolverError> {
        let points1 = self.cache.sample(&orbit1.name, &orbit1.elements, n)?;
        let points2 = self.cache.sample(&orbit2.name, &orbit2.elements, n)?;
        let mut values = DistanceMatrix::between(points1.points(), points2.points()).into_values();
        median(&mut values).ok_or_else(|| SampleError::Resolution { n }.into())
    }
}

/// One-shot search with a throwaway session and default refinement settings.
pub fn extremes(
    orbit1: &OrbitalElements,
    orbit2: &OrbitalElements,
    n: usize,
) -> Result<ExtremalResult, SolverError> {
    let mut solver = ExtremalSolver::new(SolverConfig {
        sample_count: n,
        ..SolverConfig::default()
    })?;
    solver.extremes(
        &NamedOrbit::new("orbit1", *orbit1),
        &NamedOrbit::new("orbit2", *orbit2),
    )
}
