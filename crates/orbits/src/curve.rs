//! Display curves: how many points to draw per orbit and at what scale.

use orrery_core::vector::{Vector3, scale};
use serde::Deserialize;

use crate::model::PrecomputedOrbit;
use crate::sampler::{SampleError, sample_points};

/// Points used for a display curve when nothing else is requested.
pub const DEFAULT_CURVE_POINTS: usize = 100;

/// Point-count policy for display curves.
///
/// In configuration files a bare integer selects `Fixed(n)` and the string
/// `"adaptive"` selects `Adaptive`, which reads the same in YAML and TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "ResolutionSetting")]
pub enum CurveResolution {
    /// Same number of points for every orbit.
    Fixed(usize),
    /// 100 points, 200 above e = 0.2, 300 above e = 0.4. Eccentric orbits
    /// bunch up near periapsis and need the extra density to look smooth.
    Adaptive,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResolutionSetting {
    Points(usize),
    Named(ResolutionName),
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum ResolutionName {
    Adaptive,
}

impl From<ResolutionSetting> for CurveResolution {
    fn from(setting: ResolutionSetting) -> Self {
        match setting {
            ResolutionSetting::Points(n) => Self::Fixed(n),
            ResolutionSetting::Named(ResolutionName::Adaptive) => Self::Adaptive,
        }
    }
}

impl Default for CurveResolution {
    fn default() -> Self {
        Self::Fixed(DEFAULT_CURVE_POINTS)
    }
}

impl CurveResolution {
    pub fn points_for(&self, eccentricity: f64) -> usize {
        match *self {
            Self::Fixed(n) => n,
            Self::Adaptive => {
                if eccentricity > 0.4 {
                    300
                } else if eccentricity > 0.2 {
                    200
                } else {
                    DEFAULT_CURVE_POINTS
                }
            }
        }
    }
}

/// Curve vertices for `orbit`, multiplied by `scale_factor` for display.
pub fn curve_points(
    orbit: &PrecomputedOrbit,
    resolution: CurveResolution,
    scale_factor: f64,
) -> Result<Vec<Vector3>, SampleError> {
    let n = resolution.points_for(orbit.elements().eccentricity());
    Ok(sample_points(orbit, n)?
        .iter()
        .map(|p| scale(p, scale_factor))
        .collect())
}
