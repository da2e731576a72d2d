//! Classical orbital elements for bound (elliptical) orbits.

use orrery_core::units::deg_to_rad;
use thiserror::Error;

use crate::model::PrecomputedOrbit;

/// Errors raised when an element set does not describe a bound conic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ElementsError {
    #[error("eccentricity {0} is outside [0, 1); only bound orbits are supported")]
    Eccentricity(f64),
    #[error("semi-major axis {0} must be finite and positive")]
    SemiMajorAxis(f64),
    #[error("{name} must be a finite angle")]
    NonFiniteAngle { name: &'static str },
}

/// Immutable Keplerian element set. Angles are stored in radians.
///
/// The semi-major axis carries whatever length unit the caller picked (AU for
/// planets, km for moons); comparing two orbits requires both to use the same one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    semi_major_axis: f64,
    eccentricity: f64,
    inclination_rad: f64,
    node_rad: f64,
    periapsis_rad: f64,
}

impl OrbitalElements {
    /// Validate and build an element set from radian angles.
    pub fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination_rad: f64,
        node_rad: f64,
        periapsis_rad: f64,
    ) -> Result<Self, ElementsError> {
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(ElementsError::Eccentricity(eccentricity));
        }
        if !semi_major_axis.is_finite() || semi_major_axis <= 0.0 {
            return Err(ElementsError::SemiMajorAxis(semi_major_axis));
        }
        for (name, value) in [
            ("inclination", inclination_rad),
            ("longitude of ascending node", node_rad),
            ("argument of periapsis", periapsis_rad),
        ] {
            if !value.is_finite() {
                return Err(ElementsError::NonFiniteAngle { name });
            }
        }

        Ok(Self {
            semi_major_axis,
            eccentricity,
            inclination_rad,
            node_rad,
            periapsis_rad,
        })
    }

    /// Validate and build an element set from degree angles, as catalogs list them.
    pub fn from_degrees(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination_deg: f64,
        node_deg: f64,
        periapsis_deg: f64,
    ) -> Result<Self, ElementsError> {
        Self::new(
            semi_major_axis,
            eccentricity,
            deg_to_rad(inclination_deg),
            deg_to_rad(node_deg),
            deg_to_rad(periapsis_deg),
        )
    }

    /// Circular, equatorial orbit of radius `radius`.
    pub fn circular(radius: f64) -> Result<Self, ElementsError> {
        Self::new(radius, 0.0, 0.0, 0.0, 0.0)
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn inclination_rad(&self) -> f64 {
        self.inclination_rad
    }

    pub fn node_rad(&self) -> f64 {
        self.node_rad
    }

    pub fn periapsis_rad(&self) -> f64 {
        self.periapsis_rad
    }

    /// Cache the trigonometric terms used by every position evaluation.
    pub fn precompute(&self) -> PrecomputedOrbit {
        PrecomputedOrbit::new(self)
    }
}

/// An element set tagged with the name used as its identity in caches and reports.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedOrbit {
    pub name: String,
    pub elements: OrbitalElements,
}

impl NamedOrbit {
    pub fn new(name: impl Into<String>, elements: OrbitalElements) -> Self {
        Self {
            name: name.into(),
            elements,
        }
    }
}
