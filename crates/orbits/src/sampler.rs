//! Equally spaced point sampling over one revolution, memoized per orbit and resolution.

use std::collections::HashMap;
use std::sync::Arc;

use orrery_core::constants::TAU;
use orrery_core::vector::Vector3;
use thiserror::Error;

use crate::elements::OrbitalElements;
use crate::model::PrecomputedOrbit;

/// Smallest resolution that still spans a revolution.
pub const MIN_RESOLUTION: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("sample count {n} is too small; at least {MIN_RESOLUTION} points are required")]
    Resolution { n: usize },
}

/// `n` true anomalies linearly spaced over `[0, 2π]`, both endpoints included.
///
/// The first and last samples describe the same point on the orbit. Index `k`
/// maps to `k · 2π / (n - 1)`; the final value is exactly `2π`.
pub fn true_anomalies(n: usize) -> Result<Vec<f64>, SampleError> {
    check_resolution(n)?;
    Ok((0..n).map(|k| anomaly_at(k, n)).collect())
}

/// Anomaly of sample `k` out of `n`; the single place the grid rounding lives.
#[inline]
fn anomaly_at(k: usize, n: usize) -> f64 {
    if k + 1 == n {
        TAU
    } else {
        k as f64 * (TAU / (n - 1) as f64)
    }
}

/// Evaluate `orbit` at every anomaly of [`true_anomalies`].
pub fn sample_points(orbit: &PrecomputedOrbit, n: usize) -> Result<Vec<Vector3>, SampleError> {
    Ok(true_anomalies(n)?
        .into_iter()
        .map(|nu| orbit.position_at(nu))
        .collect())
}

fn check_resolution(n: usize) -> Result<(), SampleError> {
    if n < MIN_RESOLUTION {
        return Err(SampleError::Resolution { n });
    }
    Ok(())
}

/// Positions of one orbit at one resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPointSequence {
    orbit_id: String,
    points: Vec<Vector3>,
}

impl OrbitPointSequence {
    pub fn new(
        orbit_id: impl Into<String>,
        orbit: &PrecomputedOrbit,
        n: usize,
    ) -> Result<Self, SampleError> {
        Ok(Self {
            orbit_id: orbit_id.into(),
            points: sample_points(orbit, n)?,
        })
    }

    pub fn orbit_id(&self) -> &str {
        &self.orbit_id
    }

    /// Number of samples, the `n` the sequence was built with.
    pub fn resolution(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[Vector3] {
        &self.points
    }

    /// True anomaly of sample `index`, consistent with [`true_anomalies`].
    pub fn true_anomaly(&self, index: usize) -> f64 {
        anomaly_at(index, self.points.len())
    }
}

struct CacheEntry {
    elements: OrbitalElements,
    sequence: Arc<OrbitPointSequence>,
}

/// Memoized point sequences keyed by `(orbit id, resolution)`.
///
/// The cache belongs to whoever owns it (typically one solver session); there
/// is no process-wide instance. Element sets are expected to stay fixed per
/// id, but a changed element set under a known id rebuilds the entry.
#[derive(Default)]
pub struct SampleCache {
    entries: HashMap<(String, usize), CacheEntry>,
}

impl SampleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sequence for `(orbit_id, n)`, sampling it on first use.
    pub fn sample(
        &mut self,
        orbit_id: &str,
        elements: &OrbitalElements,
        n: usize,
    ) -> Result<Arc<OrbitPointSequence>, SampleError> {
        check_resolution(n)?;
        let key = (orbit_id.to_string(), n);

        if let Some(entry) = self.entries.get(&key) {
            if entry.elements == *elements {
                return Ok(Arc::clone(&entry.sequence));
            }
            tracing::warn!(
                orbit = orbit_id,
                resolution = n,
                "elements changed for a cached orbit; resampling"
            );
        }

        let sequence = Arc::new(OrbitPointSequence::new(
            orbit_id,
            &elements.precompute(),
            n,
        )?);
        tracing::debug!(orbit = orbit_id, resolution = n, "sampled orbit");
        self.entries.insert(
            key,
            CacheEntry {
                elements: *elements,
                sequence: Arc::clone(&sequence),
            },
        );
        Ok(sequence)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
