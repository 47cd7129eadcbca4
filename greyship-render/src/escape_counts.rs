use greyship_core::IN_SET;

/// Per-pixel escape counts for a full frame.
///
/// This is the raw output of the engine before intensity mapping. `0`
/// means the sample was outside the escape radius before the first step,
/// `k` means it escaped on step `k`, and [`IN_SET`] means it stayed
/// bounded for the whole budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeCounts {
    pub width: u32,
    pub height: u32,
    pub max_iterations: u8,
    pub data: Vec<u8>,
}

impl EscapeCounts {
    /// A zero-initialised frame.
    pub fn new(width: u32, height: u32, max_iterations: u8) -> Self {
        Self {
            width,
            height,
            max_iterations,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Escape count at pixel `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// One row of counts.
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.data[start..start + w]
    }

    /// Largest value in the frame, sentinel included.
    pub fn max_count(&self) -> u8 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Largest count among pixels that escaped, if any did.
    ///
    /// Values close to `max_iterations` suggest the budget is too low to
    /// separate slow escapes from the set.
    pub fn max_escape_count(&self) -> Option<u8> {
        self.data.iter().copied().filter(|&c| c != IN_SET).max()
    }

    /// Number of pixels that never escaped.
    pub fn in_set_count(&self) -> usize {
        self.data.iter().filter(|&&c| c == IN_SET).count()
    }
}
