use crate::complex::Complex;
use crate::fractal::UpdateRule;

/// The Burning Ship: `z_{n+1} = (Re z_n)² − (Im z_n)² + c_re
///  + i·|2·Re z_n·Im z_n + c_im|`, where `c` is the pixel's own coordinate.
///
/// Unlike the classic formulation, only the imaginary part of the update is
/// folded with `abs`, and the orbit starts at `z₀ = c` rather than zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct BurningShip;

impl BurningShip {
    pub fn new() -> Self {
        Self
    }
}

impl UpdateRule for BurningShip {
    #[inline]
    fn step(&self, z: Complex, origin: Complex) -> Complex {
        Complex::new(
            z.re * z.re - z.im * z.im + origin.re,
            (2.0 * z.re * z.im + origin.im).abs(),
        )
    }

    fn name(&self) -> &'static str {
        "Burning Ship"
    }
}
