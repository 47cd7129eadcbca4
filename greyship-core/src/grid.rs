use tracing::debug;

use crate::complex::Complex;
use crate::window::ComplexWindow;

/// Initial sample points for every pixel of a window.
///
/// Two flat, row-major buffers of `width * height` values. The real part
/// varies along a row and is the same for every row; the imaginary part
/// varies by row, starting from the window's bottom edge in row 0.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateGrid {
    pub width: u32,
    pub height: u32,
    re: Vec<f64>,
    im: Vec<f64>,
}

impl CoordinateGrid {
    /// Build the grid for a validated window.
    ///
    /// Column `x` samples `bottom_left.re + x * re_step` and row `y` samples
    /// `bottom_left.im + y * im_step`; the right and top edges are excluded.
    pub fn generate(window: &ComplexWindow) -> Self {
        let width = window.width as usize;
        let height = window.height as usize;
        let origin = window.bottom_left();
        let re_step = window.re_step();
        let im_step = window.im_step();

        let re_row: Vec<f64> = (0..width).map(|x| origin.re + x as f64 * re_step).collect();

        let mut re = Vec::with_capacity(window.pixel_count());
        let mut im = Vec::with_capacity(window.pixel_count());
        for y in 0..height {
            re.extend_from_slice(&re_row);
            let row_im = origin.im + y as f64 * im_step;
            im.extend(std::iter::repeat(row_im).take(width));
        }

        debug!(
            width,
            height,
            re_step,
            im_step,
            bottom_left = %origin,
            "Generated coordinate grid"
        );

        Self {
            width: window.width,
            height: window.height,
            re,
            im,
        }
    }

    /// Real parts, row-major.
    pub fn re(&self) -> &[f64] {
        &self.re
    }

    /// Imaginary parts, row-major.
    pub fn im(&self) -> &[f64] {
        &self.im
    }

    /// Real and imaginary parts of rows `start..start + rows`.
    pub fn rows(&self, start: u32, rows: u32) -> (&[f64], &[f64]) {
        let w = self.width as usize;
        let from = start as usize * w;
        let to = from + rows as usize * w;
        (&self.re[from..to], &self.im[from..to])
    }

    /// Sample point of pixel `(x, y)`.
    #[inline]
    pub fn point(&self, x: u32, y: u32) -> Complex {
        let idx = y as usize * self.width as usize + x as usize;
        Complex::new(self.re[idx], self.im[idx])
    }

    pub fn len(&self) -> usize {
        self.re.len()
    }

    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }
}
