use crate::complex::Complex;
use crate::error::CoreError;

/// The rectangle of the complex plane covered by a render.
///
/// Defined by its centre, the extent along the real axis and the output
/// size in pixels. The imaginary extent is derived as
/// `real_extent * (width / height)`, so only square images keep
/// square pixels on the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexWindow {
    /// Centre of the window in the complex plane.
    pub center: Complex,

    /// Length of the window along the real axis.
    pub real_extent: f64,

    /// Image width in pixels.
    pub width: u32,

    /// Image height in pixels.
    pub height: u32,
}

impl ComplexWindow {
    /// Close-up of the Burning Ship's antenna at `-1.67415 + 0.002i`.
    pub fn default_burning_ship() -> Self {
        Self {
            center: Complex::new(-1.67415, 0.002),
            real_extent: 0.005,
            width: 4000,
            height: 4000,
        }
    }

    /// The full `[-2, 2] × [-2, 2]` square around the origin.
    pub fn default_julia() -> Self {
        Self {
            center: Complex::ZERO,
            real_extent: 4.0,
            width: 1000,
            height: 1000,
        }
    }

    /// Create a window with explicit parameters.
    pub fn new(center: Complex, real_extent: f64, width: u32, height: u32) -> crate::Result<Self> {
        let window = Self {
            center,
            real_extent,
            width,
            height,
        };
        window.validate()?;
        Ok(window)
    }

    /// Check the window invariants. Presets and deserialized windows go
    /// through this before a grid is built.
    pub fn validate(&self) -> crate::Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::InvalidWindow {
                reason: format!(
                    "dimensions must be > 0, got {}×{}",
                    self.width, self.height
                ),
            });
        }
        if self.real_extent <= 0.0 || !self.real_extent.is_finite() {
            return Err(CoreError::InvalidWindow {
                reason: format!(
                    "real extent must be positive and finite, got {}",
                    self.real_extent
                ),
            });
        }
        if !self.center.is_finite() {
            return Err(CoreError::InvalidWindow {
                reason: format!("center must be finite, got {}", self.center),
            });
        }
        let imag_extent = self.imag_extent();
        if imag_extent <= 0.0 || !imag_extent.is_finite() {
            return Err(CoreError::InvalidWindow {
                reason: format!("imaginary extent must be positive and finite, got {imag_extent}"),
            });
        }
        Ok(())
    }

    /// Length of the window along the imaginary axis.
    pub fn imag_extent(&self) -> f64 {
        self.real_extent * self.aspect_ratio()
    }

    /// Pixel-count ratio `width / height`. Scales the real extent into the
    /// imaginary extent, so non-square images stretch rather than keep
    /// square pixels.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    fn half_extents(&self) -> Complex {
        Complex::new(self.real_extent / 2.0, self.imag_extent() / 2.0)
    }

    /// Corner with the smallest real and imaginary parts.
    pub fn bottom_left(&self) -> Complex {
        self.center - self.half_extents()
    }

    /// Corner with the largest real and imaginary parts. Never sampled:
    /// both axes are half-open.
    pub fn top_right(&self) -> Complex {
        self.center + self.half_extents()
    }

    /// Real-axis distance between horizontally adjacent samples.
    pub fn re_step(&self) -> f64 {
        (self.top_right().re - self.bottom_left().re) / self.width as f64
    }

    /// Imaginary-axis distance between vertically adjacent samples.
    pub fn im_step(&self) -> f64 {
        (self.top_right().im - self.bottom_left().im) / self.height as f64
    }

    /// Number of pixels covered by the window.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
