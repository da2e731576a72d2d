//! Core units, constants, and shared primitives for the Orrery workspace.

/// Constants shared by the orbit model and the reporting front-ends.
pub mod constants {
    /// Full revolution in radians.
    pub const TAU: f64 = std::f64::consts::TAU;
}

/// Angle unit conversion at the catalog boundary.
pub mod units {
    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }
}

/// Angle helpers for periodic phase values.
pub mod angle {
    use super::constants::TAU;

    /// Wrap an angle into `[0, 2π)`.
    #[inline]
    pub fn wrap_tau(theta: f64) -> f64 {
        let wrapped = theta.rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if wrapped >= TAU { 0.0 } else { wrapped }
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D position in whatever length unit the caller uses.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Euclidean distance between two points.
    #[inline]
    pub fn distance(a: &Vector3, b: &Vector3) -> f64 {
        norm(&sub(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::angle::wrap_tau;
    use super::constants::TAU;
    use super::vector::{distance, scale};

    #[test]
    fn wrap_keeps_angles_in_range() {
        assert_eq!(wrap_tau(0.0), 0.0);
        assert!((wrap_tau(TAU + 0.5) - 0.5).abs() < 1e-12);
        assert!((wrap_tau(-0.25) - (TAU - 0.25)).abs() < 1e-12);
        assert_eq!(wrap_tau(TAU), 0.0);
        assert!(wrap_tau(-1e-18) < TAU);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = [1.0, 2.0, 2.0];
        let b = scale(&a, -1.0);
        assert_eq!(distance(&a, &b), distance(&b, &a));
        assert!((distance(&a, &b) - 6.0).abs() < 1e-12);
    }
}
