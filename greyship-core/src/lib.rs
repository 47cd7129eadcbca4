pub mod burning_ship;
pub mod complex;
pub mod error;
pub mod fractal;
pub mod grid;
pub mod julia;
pub mod window;

// Re-export primary types for convenience.
pub use burning_ship::BurningShip;
pub use complex::Complex;
pub use error::CoreError;
pub use fractal::{FractalParams, UpdateRule, Variant, ESCAPE_NORM_SQ, IN_SET};
pub use grid::CoordinateGrid;
pub use julia::Julia;
pub use window::ComplexWindow;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
