//! Local refinement of a coarse extremum by 2-D coordinate pattern search.
//!
//! The separation between two independently parameterized curves has no
//! derivative exposed here, so the search tries the 8 neighbours of the
//! current anomaly pair at offsets `{-s, 0, +s}` and halves `s` whenever none
//! of them is strictly better.

use orrery_core::angle::wrap_tau;
use orrery_core::vector::distance;
use orrery_orbits::PrecomputedOrbit;

use crate::solver::SolverConfig;

/// Direction of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    Minimize,
    Maximize,
}

impl Objective {
    /// `true` when `candidate` is strictly better than `incumbent`.
    #[inline]
    pub fn improves(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Self::Minimize => candidate < incumbent,
            Self::Maximize => candidate > incumbent,
        }
    }
}

/// Outcome of one pattern search.
#[derive(Debug, Clone, PartialEq)]
pub struct Refinement {
    pub objective: Objective,
    /// Anomaly pair the search started from.
    pub seed: (f64, f64),
    pub theta1: f64,
    pub theta2: f64,
    pub distance: f64,
    /// Iterations consumed, counting both moves and step halvings.
    pub iterations: usize,
    pub final_step: f64,
    /// Distance at the start of every iteration, followed by the final distance.
    pub trace: Vec<f64>,
}

/// Separation between body 1 at `theta1` and body 2 at `theta2`.
#[inline]
pub fn separation(
    orbit1: &PrecomputedOrbit,
    orbit2: &PrecomputedOrbit,
    theta1: f64,
    theta2: f64,
) -> f64 {
    distance(&orbit1.position_at(theta1), &orbit2.position_at(theta2))
}

/// Pattern search from `(theta1, theta2)` under the budget in `config`.
///
/// Neighbours are visited with the first offset in the outer loop and the
/// second in the inner loop, each ordered `-s, 0, +s`; the first strictly best
/// neighbour wins. Offset angles wrap into `[0, 2π)`. The search stops when the
/// iteration budget runs out or a halving drops the step below the floor.
pub fn refine(
    orbit1: &PrecomputedOrbit,
    orbit2: &PrecomputedOrbit,
    theta1: f64,
    theta2: f64,
    objective: Objective,
    config: &SolverConfig,
) -> Refinement {
    let mut current = (theta1, theta2);
    let mut step = config.initial_step_rad;
    let mut iterations = 0;
    let mut trace = Vec::with_capacity(config.refine_steps + 1);

    for _ in 0..config.refine_steps {
        iterations += 1;
        let current_distance = separation(orbit1, orbit2, current.0, current.1);
        trace.push(current_distance);

        let mut best_distance = current_distance;
        let mut best = None;
        for d1 in [-step, 0.0, step] {
            for d2 in [-step, 0.0, step] {
                if d1 == 0.0 && d2 == 0.0 {
                    continue;
                }
                let candidate = (wrap_tau(current.0 + d1), wrap_tau(current.1 + d2));
                let d = separation(orbit1, orbit2, candidate.0, candidate.1);
                if objective.improves(d, best_distance) {
                    best_distance = d;
                    best = Some(candidate);
                }
            }
        }

        match best {
            Some(next) => current = next,
            None => {
                step /= 2.0;
                if step < config.step_floor_rad {
                    break;
                }
            }
        }
    }

    let distance = separation(orbit1, orbit2, current.0, current.1);
    trace.push(distance);

    Refinement {
        objective,
        seed: (theta1, theta2),
        theta1: current.0,
        theta2: current.1,
        distance,
        iterations,
        final_step: step,
        trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_orbits::OrbitalElements;

    fn pair() -> (PrecomputedOrbit, PrecomputedOrbit) {
        let earth = OrbitalElements::from_degrees(1.0, 0.016708, 0.0, 0.0, 102.937)
            .expect("valid elements")
            .precompute();
        let mars = OrbitalElements::from_degrees(1.523679, 0.093401, 1.850, 49.558, 286.502)
            .expect("valid elements")
            .precompute();
        (earth, mars)
    }

    #[test]
    fn objective_is_strict() {
        assert!(Objective::Minimize.improves(1.0, 2.0));
        assert!(!Objective::Minimize.improves(2.0, 2.0));
        assert!(Objective::Maximize.improves(3.0, 2.0));
        assert!(!Objective::Maximize.improves(2.0, 2.0));
    }

    #[test]
    fn minimum_trace_never_increases() {
        let (earth, mars) = pair();
        let config = SolverConfig {
            refine_steps: 50,
            ..SolverConfig::default()
        };
        let r = refine(&earth, &mars, 1.0, 4.0, Objective::Minimize, &config);
        assert!(r.trace.windows(2).all(|w| w[1] <= w[0]), "{:?}", r.trace);
        assert!(r.distance < r.trace[0]);
        assert_eq!(r.trace.len(), r.iterations + 1);
    }

    #[test]
    fn maximum_trace_never_decreases() {
        let (earth, mars) = pair();
        let config = SolverConfig {
            refine_steps: 50,
            ..SolverConfig::default()
        };
        let r = refine(&earth, &mars, 1.0, 4.0, Objective::Maximize, &config);
        assert!(r.trace.windows(2).all(|w| w[1] >= w[0]), "{:?}", r.trace);
        assert!(r.distance > r.trace[0]);
    }

    #[test]
    fn budget_limits_moves() {
        let (earth, mars) = pair();
        let config = SolverConfig::default();
        let r = refine(&earth, &mars, 1.0, 4.0, Objective::Minimize, &config);
        assert!(r.iterations <= config.refine_steps);
        // five moves of at most one step in each anomaly
        let max_travel = config.initial_step_rad * config.refine_steps as f64 + 1e-12;
        assert!((r.theta1 - 1.0).abs() <= max_travel);
        assert!((r.theta2 - 4.0).abs() <= max_travel);
    }

    #[test]
    fn step_shrinks_to_the_floor_at_an_optimum() {
        // concentric coplanar circles: every anomaly pair with θ1 = θ2 is a minimum
        let inner = OrbitalElements::circular(1.0).expect("valid").precompute();
        let outer = OrbitalElements::circular(2.0).expect("valid").precompute();
        // along the diagonal the distance only changes by rounding noise, which
        // may still count as a strict improvement, so leave the budget generous
        let config = SolverConfig {
            refine_steps: 10_000,
            ..SolverConfig::default()
        };
        let r = refine(&inner, &outer, 0.5, 0.5, Objective::Minimize, &config);
        assert!(r.final_step < config.step_floor_rad);
        assert!(r.iterations < config.refine_steps);
        assert!((r.distance - 1.0).abs() < 1e-12);
    }

    #[test]
    fn angles_wrap_around_the_seam() {
        let inner = OrbitalElements::circular(1.0).expect("valid").precompute();
        let outer = OrbitalElements::circular(2.0).expect("valid").precompute();
        // seed just below 2π on one orbit and just above 0 on the other; the
        // minimum pulls the two anomalies together across the seam
        let r = refine(
            &inner,
            &outer,
            0.0005,
            std::f64::consts::TAU - 0.0005,
            Objective::Minimize,
            &SolverConfig::default(),
        );
        assert!((0.0..std::f64::consts::TAU).contains(&r.theta1));
        assert!((0.0..std::f64::consts::TAU).contains(&r.theta2));
        assert!(r.distance < r.trace[0]);
    }
}
