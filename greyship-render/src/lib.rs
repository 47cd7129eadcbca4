pub mod band;
pub mod engine;
pub mod error;
pub mod escape_counts;
pub mod export;
pub mod intensity;

use std::sync::Arc;

use greyship_core::{ComplexWindow, CoordinateGrid, FractalParams, Variant};

pub use band::BAND_ROWS;
pub use engine::{
    render, render_banded, render_variant, RenderCancel, RenderProgress, RenderResult,
};
pub use error::RenderError;
pub use escape_counts::EscapeCounts;
pub use export::{export_png, ExportMetadata};
pub use intensity::{intensity, GreyBuffer};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Validate the inputs, build the coordinate grid and render it.
///
/// Window and budget errors are returned before anything is allocated.
pub fn render_window(
    variant: &Variant,
    window: &ComplexWindow,
    max_iterations: u32,
    cancel: &Arc<RenderCancel>,
) -> Result<RenderResult> {
    window.validate()?;
    let params = FractalParams::new(max_iterations)?;
    let grid = CoordinateGrid::generate(window);
    Ok(render_variant(variant, &grid, params, cancel))
}
