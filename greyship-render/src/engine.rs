use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use greyship_core::{
    BurningShip, Complex, CoordinateGrid, FractalParams, Julia, UpdateRule, Variant,
    ESCAPE_NORM_SQ, IN_SET,
};

use crate::band::{build_band_grid, BAND_ROWS};
use crate::escape_counts::EscapeCounts;

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Shared cancellation flag and progress counters for a banded render.
///
/// A render snapshots the generation when it starts; bumping it with
/// [`cancel`](Self::cancel) makes every band still iterating give up at its
/// next step. Progress is reported in finished bands and in lockstep
/// iteration steps taken across all bands.
#[derive(Debug)]
pub struct RenderCancel {
    generation: AtomicU64,
    bands_done: AtomicUsize,
    bands_total: AtomicUsize,
    steps_taken: AtomicU64,
}

/// Snapshot of a render's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderProgress {
    pub bands_done: usize,
    pub bands_total: usize,
    /// Iteration steps completed, summed over bands. A band that stops
    /// early because all its pixels escaped contributes fewer steps.
    pub steps_taken: u64,
}

impl RenderCancel {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            bands_done: AtomicUsize::new(0),
            bands_total: AtomicUsize::new(0),
            steps_taken: AtomicU64::new(0),
        }
    }

    /// Abort whichever render is currently running.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Begin a render of `bands` bands: clear progress and return the
    /// generation the render belongs to.
    fn begin(&self, bands: usize) -> u64 {
        self.bands_total.store(bands, Ordering::Relaxed);
        self.bands_done.store(0, Ordering::Relaxed);
        self.steps_taken.store(0, Ordering::Relaxed);
        self.generation.load(Ordering::SeqCst)
    }

    /// `false` once the render started at `generation` has been cancelled.
    #[inline]
    fn is_live(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn band_finished(&self, steps: u64) {
        self.steps_taken.fetch_add(steps, Ordering::Relaxed);
        self.bands_done.fetch_add(1, Ordering::Relaxed);
    }

    pub fn progress(&self) -> RenderProgress {
        RenderProgress {
            bands_done: self.bands_done.load(Ordering::Relaxed),
            bands_total: self.bands_total.load(Ordering::Relaxed),
            steps_taken: self.steps_taken.load(Ordering::Relaxed),
        }
    }
}

impl Default for RenderCancel {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// The result of a full-frame render.
///
/// Contains raw escape counts; map them with
/// [`GreyBuffer::from_counts`](crate::GreyBuffer::from_counts) to get an image.
/// When `cancelled` is set, bands that did not finish are left zeroed.
#[derive(Debug)]
pub struct RenderResult {
    pub counts: EscapeCounts,
    pub elapsed: Duration,
    pub cancelled: bool,
    pub bands_rendered: usize,
}

// ---------------------------------------------------------------------------
// Per-band kernel
// ---------------------------------------------------------------------------

/// Run the escape-time iteration for one band, in lockstep across its pixels.
///
/// Counts are built in per-band scratch: each pixel's count is set once, on
/// the step where its orbit first leaves the escape radius, or to
/// [`IN_SET`] after the last step. Escaped lanes are parked at zero and no
/// longer stepped. On completion the counts are copied into `out` and the
/// number of steps taken is returned; a cancelled band returns `None` and
/// leaves `out` untouched.
fn escape_band<R: UpdateRule>(
    rule: &R,
    re0: &[f64],
    im0: &[f64],
    max_iterations: u8,
    out: &mut [u8],
    cancel: &RenderCancel,
    gen: u64,
) -> Option<u64> {
    debug_assert_eq!(re0.len(), out.len());

    // Per-band scratch, dropped when the band is done.
    let mut re = re0.to_vec();
    let mut im = im0.to_vec();
    let mut counts = vec![0u8; re0.len()];
    let mut escaped: Vec<bool> = re0
        .iter()
        .zip(im0)
        .map(|(&x, &y)| Complex::new(x, y).norm_sq() > ESCAPE_NORM_SQ)
        .collect();

    let mut active = 0usize;
    for (p, &gone) in escaped.iter().enumerate() {
        if gone {
            re[p] = 0.0;
            im[p] = 0.0;
        } else {
            active += 1;
        }
    }

    let mut steps = 0u64;
    for i in 0..max_iterations {
        if active == 0 {
            break;
        }
        if !cancel.is_live(gen) {
            return None;
        }
        for p in 0..counts.len() {
            if escaped[p] {
                continue;
            }
            let z = rule.step(Complex::new(re[p], im[p]), Complex::new(re0[p], im0[p]));
            if z.norm_sq() > ESCAPE_NORM_SQ {
                counts[p] = i + 1;
                escaped[p] = true;
                re[p] = 0.0;
                im[p] = 0.0;
                active -= 1;
            } else {
                re[p] = z.re;
                im[p] = z.im;
            }
        }
        steps += 1;
    }

    for (count, &gone) in counts.iter_mut().zip(&escaped) {
        if !gone {
            *count = IN_SET;
        }
    }
    out.copy_from_slice(&counts);
    Some(steps)
}

// ---------------------------------------------------------------------------
// Full-frame render
// ---------------------------------------------------------------------------

/// Render a full frame with the default band height.
///
/// The renderer is generic over the update rule for static dispatch.
/// Bands are processed in parallel via Rayon, each writing its own slice of
/// the output. The `cancel` handle can be used from another thread to
/// abort the render.
pub fn render<R: UpdateRule + Sync>(
    rule: &R,
    grid: &CoordinateGrid,
    params: FractalParams,
    cancel: &Arc<RenderCancel>,
) -> RenderResult {
    render_banded(rule, grid, params, BAND_ROWS, cancel)
}

/// Render a full frame split into bands of `band_rows` rows.
///
/// The output does not depend on `band_rows`.
pub fn render_banded<R: UpdateRule + Sync>(
    rule: &R,
    grid: &CoordinateGrid,
    params: FractalParams,
    band_rows: u32,
    cancel: &Arc<RenderCancel>,
) -> RenderResult {
    let start = Instant::now();
    let band_rows = band_rows.max(1);
    let max_iterations = params.max_iterations;

    let mut counts = EscapeCounts::new(grid.width, grid.height, max_iterations);
    let bands = build_band_grid(grid.height, band_rows);
    let gen = cancel.begin(bands.len());

    debug!(
        fractal = rule.name(),
        band_count = bands.len(),
        width = grid.width,
        height = grid.height,
        max_iterations,
        "Starting banded render"
    );

    let bands_rendered: usize = if grid.is_empty() {
        0
    } else {
        let chunk_len = grid.width as usize * band_rows as usize;
        counts
            .data
            .par_chunks_mut(chunk_len)
            .zip(bands.par_iter())
            .map(|(out, band)| {
                if !cancel.is_live(gen) {
                    return 0;
                }
                debug_assert_eq!(out.len(), band.pixel_count(grid.width));
                let (re0, im0) = grid.rows(band.y, band.height);
                match escape_band(rule, re0, im0, max_iterations, out, cancel, gen) {
                    Some(steps) => {
                        cancel.band_finished(steps);
                        1
                    }
                    None => 0,
                }
            })
            .sum()
    };

    let cancelled = !cancel.is_live(gen);
    let elapsed = start.elapsed();
    info!(
        fractal = rule.name(),
        elapsed_ms = elapsed.as_millis(),
        bands_rendered,
        steps_taken = cancel.progress().steps_taken,
        cancelled,
        max_count = counts.max_count(),
        max_escape_count = ?counts.max_escape_count(),
        in_set = counts.in_set_count(),
        "Render complete"
    );

    RenderResult {
        counts,
        elapsed,
        cancelled,
        bands_rendered,
    }
}

/// Render the fractal selected by `variant`.
pub fn render_variant(
    variant: &Variant,
    grid: &CoordinateGrid,
    params: FractalParams,
    cancel: &Arc<RenderCancel>,
) -> RenderResult {
    match *variant {
        Variant::Julia { c } => render(&Julia::new(c), grid, params, cancel),
        Variant::BurningShip => render(&BurningShip::new(), grid, params, cancel),
    }
}
