/// Default band height in rows. A band is the unit of parallel work.
pub const BAND_ROWS: u32 = 16;

/// A horizontal strip of full-width rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// First row of the band.
    pub y: u32,
    /// Number of rows (may be smaller for the last band).
    pub height: u32,
}

impl Band {
    /// Number of pixels in this band for an image `width` pixels wide.
    pub fn pixel_count(&self, width: u32) -> usize {
        width as usize * self.height as usize
    }
}

/// Split `height` rows into consecutive bands of at most `band_rows` rows.
pub fn build_band_grid(height: u32, band_rows: u32) -> Vec<Band> {
    let band_rows = band_rows.max(1);
    let mut bands = Vec::with_capacity(height.div_ceil(band_rows) as usize);
    let mut y = 0;
    while y < height {
        let h = band_rows.min(height - y);
        bands.push(Band { y, height: h });
        y += h;
    }
    bands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_cover_every_row_once() {
        let bands = build_band_grid(150, BAND_ROWS);
        let mut covered = vec![false; 150];
        for band in &bands {
            for row in band.y..band.y + band.height {
                assert!(!covered[row as usize], "row {row} covered twice");
                covered[row as usize] = true;
            }
        }
        assert!(covered.iter().all(|&c| c), "all rows must be covered");
    }

    #[test]
    fn last_band_is_short() {
        let bands = build_band_grid(40, 16);
        assert_eq!(
            bands,
            vec![
                Band { y: 0, height: 16 },
                Band { y: 16, height: 16 },
                Band { y: 32, height: 8 },
            ]
        );
    }

    #[test]
    fn zero_band_rows_falls_back_to_single_rows() {
        let bands = build_band_grid(3, 0);
        assert_eq!(bands.len(), 3);
        assert!(bands.iter().all(|b| b.height == 1));
    }

    #[test]
    fn pixel_count() {
        assert_eq!(Band { y: 0, height: 4 }.pixel_count(10), 40);
    }
}
