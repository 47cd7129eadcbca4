use crate::complex::Complex;
use crate::fractal::UpdateRule;

/// A Julia set: `z_{n+1} = z_n² + c`, where `c` is a fixed constant
/// and `z₀` is the point on the complex plane.
#[derive(Debug, Clone, Copy)]
pub struct Julia {
    /// The fixed constant `c` that defines this Julia set.
    c: Complex,
}

impl Julia {
    pub fn new(c: Complex) -> Self {
        Self { c }
    }

    /// `c = -0.8 + 0.156i`, a connected, dendrite-like set.
    pub fn default_c() -> Complex {
        Complex::new(-0.8, 0.156)
    }
}

impl Default for Julia {
    fn default() -> Self {
        Self::new(Self::default_c())
    }
}

impl UpdateRule for Julia {
    #[inline]
    fn step(&self, z: Complex, _origin: Complex) -> Complex {
        Complex::new(
            z.re * z.re - z.im * z.im + self.c.re,
            2.0 * z.re * z.im + self.c.im,
        )
    }

    fn name(&self) -> &'static str {
        "Julia"
    }
}
