//! Position of a body on a Keplerian ellipse as a function of true anomaly.

use orrery_core::vector::Vector3;

use crate::elements::OrbitalElements;

/// Element set with the cosine/sine of each angle evaluated once.
///
/// Sampling evaluates thousands of positions per orbit, so the six
/// trigonometric terms are computed when the orbit is built rather than per point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecomputedOrbit {
    elements: OrbitalElements,
    a: f64,
    e: f64,
    cos_inc: f64,
    sin_inc: f64,
    cos_node: f64,
    sin_node: f64,
    cos_peri: f64,
    sin_peri: f64,
}

impl PrecomputedOrbit {
    pub fn new(elements: &OrbitalElements) -> Self {
        let (sin_inc, cos_inc) = elements.inclination_rad().sin_cos();
        let (sin_node, cos_node) = elements.node_rad().sin_cos();
        let (sin_peri, cos_peri) = elements.periapsis_rad().sin_cos();
        Self {
            elements: *elements,
            a: elements.semi_major_axis(),
            e: elements.eccentricity(),
            cos_inc,
            sin_inc,
            cos_node,
            sin_node,
            cos_peri,
            sin_peri,
        }
    }

    /// Element set this orbit was built from.
    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    /// Focus-to-body distance from the polar equation of the conic.
    #[inline]
    pub fn radius_at(&self, true_anomaly: f64) -> f64 {
        self.a * (1.0 - self.e * self.e) / (1.0 + self.e * true_anomaly.cos())
    }

    /// Closest approach to the focus, `a(1 - e)`.
    pub fn periapsis(&self) -> f64 {
        self.a * (1.0 - self.e)
    }

    /// Farthest distance from the focus, `a(1 + e)`.
    pub fn apoapsis(&self) -> f64 {
        self.a * (1.0 + self.e)
    }

    /// See [`position_at`].
    #[inline]
    pub fn position_at(&self, true_anomaly: f64) -> Vector3 {
        position_at(self, true_anomaly)
    }
}

/// Position in the reference frame for the given true anomaly.
///
/// Rotations are applied in the fixed order: argument of periapsis about the
/// orbit normal, inclination about the x-axis, then node longitude about z.
pub fn position_at(orbit: &PrecomputedOrbit, true_anomaly: f64) -> Vector3 {
    let r = orbit.radius_at(true_anomaly);
    let (sin_nu, cos_nu) = true_anomaly.sin_cos();

    let x = r * cos_nu;
    let y = r * sin_nu;
    let z = 0.0;

    let x_peri = x * orbit.cos_peri - y * orbit.sin_peri;
    let y_peri = x * orbit.sin_peri + y * orbit.cos_peri;
    let z_peri = z;

    let y_inc = y_peri * orbit.cos_inc - z_peri * orbit.sin_inc;
    let z_inc = y_peri * orbit.sin_inc + z_peri * orbit.cos_inc;

    let x_final = x_peri * orbit.cos_node - y_inc * orbit.sin_node;
    let y_final = x_peri * orbit.sin_node + y_inc * orbit.cos_node;

    [x_final, y_final, z_inc]
}
