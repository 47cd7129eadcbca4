use rayon::prelude::*;

use crate::escape_counts::EscapeCounts;

/// Intensity of a pixel with the given escape count.
///
/// Pixels in the set (count 255) are black; pixels that were outside the
/// escape radius from the start (count 0) are white.
#[inline]
pub fn intensity(count: u8) -> u8 {
    u8::MAX - count
}

/// A single-channel 8-bit greyscale image, row-major, row 0 on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreyBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl GreyBuffer {
    /// Map escape counts to intensities.
    ///
    /// Escape-count rows run from the lowest imaginary value upwards. With
    /// `flip_rows` the rows are reversed so the output's top row is the
    /// window's top edge; without it the rows are written in count order.
    pub fn from_counts(counts: &EscapeCounts, flip_rows: bool) -> Self {
        let w = counts.width as usize;
        let h = counts.height as usize;
        let mut pixels = vec![0u8; w * h];

        if w > 0 {
            pixels
                .par_chunks_mut(w)
                .enumerate()
                .for_each(|(y, row)| {
                    let src_y = if flip_rows { h - 1 - y } else { y };
                    let src = &counts.data[src_y * w..(src_y + 1) * w];
                    for (dst, &count) in row.iter_mut().zip(src) {
                        *dst = intensity(count);
                    }
                });
        }

        Self {
            width: counts.width,
            height: counts.height,
            pixels,
        }
    }

    /// One row of intensities.
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }
}
