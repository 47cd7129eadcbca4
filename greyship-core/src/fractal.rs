use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;

/// Squared escape radius. An orbit has escaped once `|z|² > 4`.
pub const ESCAPE_NORM_SQ: f64 = 4.0;

/// Escape count recorded for pixels that never escape within the budget.
pub const IN_SET: u8 = u8::MAX;

/// Parameters shared by every fractal variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FractalParams {
    /// Number of update steps applied to each pixel. Always below
    /// [`IN_SET`] so a real escape step never collides with the sentinel.
    pub max_iterations: u8,
}

impl FractalParams {
    /// Largest accepted budget.
    pub const MAX_ITERATIONS: u32 = IN_SET as u32 - 1;

    /// Validate an iteration budget.
    ///
    /// A budget of zero is accepted: every pixel that is not already outside
    /// the escape radius ends up in the set.
    pub fn new(max_iterations: u32) -> crate::Result<Self> {
        if max_iterations > Self::MAX_ITERATIONS {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        Ok(Self {
            max_iterations: max_iterations as u8,
        })
    }
}

/// A per-step update rule: maps the current iterate to the next one.
///
/// Designed for **static dispatch**: the engine is generic over
/// `R: UpdateRule` so the step inlines into the hot loop.
pub trait UpdateRule {
    /// Compute the next iterate from `z`. `origin` is the pixel's initial
    /// sample point, which some rules reuse as their additive term.
    fn step(&self, z: Complex, origin: Complex) -> Complex;

    /// Short human-readable name used in logs and image metadata.
    fn name(&self) -> &'static str;

    /// Scalar escape time of a single point.
    ///
    /// Returns 0 when `origin` is already outside the escape radius,
    /// `k` when the `k`-th step first leaves it, or [`IN_SET`] when the orbit
    /// stays bounded for `max_iterations` steps. The banded engine produces
    /// exactly these values for every pixel.
    fn escape_count(&self, origin: Complex, max_iterations: u8) -> u8 {
        if origin.norm_sq() > ESCAPE_NORM_SQ {
            return 0;
        }
        let mut z = origin;
        for i in 0..max_iterations {
            z = self.step(z, origin);
            if z.norm_sq() > ESCAPE_NORM_SQ {
                return i + 1;
            }
        }
        IN_SET
    }
}

/// The closed set of supported fractals, as selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Variant {
    /// Julia set for the fixed constant `c`.
    Julia { c: Complex },
    /// Burning Ship: each pixel's own coordinate is the additive term.
    BurningShip,
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Julia { .. } => "Julia",
            Self::BurningShip => "Burning Ship",
        }
    }

    /// Whether the intensity raster must be row-reversed so row 0 is the
    /// top (highest imaginary) edge.
    ///
    /// The grid puts the lowest imaginary value in row 0. Burning Ship
    /// renders are flipped to put the ship upright; Julia renders are
    /// written in grid order.
    pub fn flip_rows(&self) -> bool {
        match self {
            Self::Julia { .. } => false,
            Self::BurningShip => true,
        }
    }

    /// Default iteration budget for this variant.
    pub fn default_max_iterations(&self) -> u32 {
        match self {
            Self::Julia { .. } => 200,
            Self::BurningShip => FractalParams::MAX_ITERATIONS - 1,
        }
    }

    /// The Julia constant, if any.
    pub fn julia_c(&self) -> Option<Complex> {
        match self {
            Self::Julia { c } => Some(*c),
            Self::BurningShip => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_params() {
        assert_eq!(FractalParams::new(200).unwrap().max_iterations, 200);
        assert_eq!(FractalParams::new(254).unwrap().max_iterations, 254);
    }

    #[test]
    fn zero_budget_is_valid() {
        assert_eq!(FractalParams::new(0).unwrap().max_iterations, 0);
    }

    #[test]
    fn budget_colliding_with_sentinel_is_rejected() {
        assert!(matches!(
            FractalParams::new(255),
            Err(CoreError::InvalidMaxIterations(255))
        ));
        assert!(FractalParams::new(10_000).is_err());
    }

    #[test]
    fn flip_flags_per_variant() {
        assert!(Variant::BurningShip.flip_rows());
        assert!(!Variant::Julia {
            c: Complex::new(-0.8, 0.156)
        }
        .flip_rows());
    }

    #[test]
    fn default_budgets() {
        assert_eq!(Variant::BurningShip.default_max_iterations(), 253);
        assert_eq!(
            Variant::Julia { c: Complex::ZERO }.default_max_iterations(),
            200
        );
    }

    #[test]
    fn variant_serde_tagging() {
        let json = serde_json::to_string(&Variant::BurningShip).unwrap();
        assert_eq!(json, r#"{"kind":"burning_ship"}"#);

        let v: Variant =
            serde_json::from_str(r#"{"kind":"julia","c":{"re":-0.8,"im":0.156}}"#).unwrap();
        assert_eq!(v.julia_c(), Some(Complex::new(-0.8, 0.156)));
    }
}
