use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use greyship_core::{Complex, ComplexWindow, Variant};

use crate::error::CliError;

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Everything needed for one render, after presets and overrides are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub variant: Variant,
    pub width: u32,
    pub height: u32,
    pub center_re: f64,
    pub center_im: f64,
    pub real_extent: f64,
    pub max_iterations: u32,
    /// Row-flip override. `None` uses the variant's own orientation.
    pub flip_rows: Option<bool>,
    pub output: PathBuf,
}

impl RenderConfig {
    pub const DEFAULT_OUTPUT: &'static str = "out.png";

    /// Built-in defaults for a variant.
    pub fn preset(variant: Variant) -> Self {
        let window = match variant {
            Variant::Julia { .. } => ComplexWindow::default_julia(),
            Variant::BurningShip => ComplexWindow::default_burning_ship(),
        };
        Self {
            variant,
            width: window.width,
            height: window.height,
            center_re: window.center.re,
            center_im: window.center.im,
            real_extent: window.real_extent,
            max_iterations: variant.default_max_iterations(),
            flip_rows: None,
            output: PathBuf::from(Self::DEFAULT_OUTPUT),
        }
    }

    /// Apply every field set in `overrides`.
    pub fn apply(&mut self, overrides: &RenderOverrides) {
        if let Some(v) = overrides.width {
            self.width = v;
        }
        if let Some(v) = overrides.height {
            self.height = v;
        }
        if let Some(v) = overrides.center_re {
            self.center_re = v;
        }
        if let Some(v) = overrides.center_im {
            self.center_im = v;
        }
        if let Some(v) = overrides.real_extent {
            self.real_extent = v;
        }
        if let Some(v) = overrides.max_iterations {
            self.max_iterations = v;
        }
        if let Some(v) = overrides.flip_rows {
            self.flip_rows = Some(v);
        }
        if let Some(ref v) = overrides.output {
            self.output = v.clone();
        }
        if let Variant::Julia { ref mut c } = self.variant {
            if let Some(re) = overrides.julia_c_re {
                c.re = re;
            }
            if let Some(im) = overrides.julia_c_im {
                c.im = im;
            }
        }
    }

    /// The validated window this configuration describes.
    pub fn window(&self) -> greyship_core::Result<ComplexWindow> {
        ComplexWindow::new(
            Complex::new(self.center_re, self.center_im),
            self.real_extent,
            self.width,
            self.height,
        )
    }

    /// Effective row-flip flag.
    pub fn flip_rows(&self) -> bool {
        self.flip_rows.unwrap_or_else(|| self.variant.flip_rows())
    }
}

// ---------------------------------------------------------------------------
// Partial overrides (config file and command line)
// ---------------------------------------------------------------------------

/// A partial configuration. Loaded from a JSON file or built from flags;
/// unset fields leave the preset untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOverrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub center_re: Option<f64>,
    pub center_im: Option<f64>,
    pub real_extent: Option<f64>,
    pub max_iterations: Option<u32>,
    pub flip_rows: Option<bool>,
    pub output: Option<PathBuf>,
    /// Ignored for variants without a constant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub julia_c_re: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub julia_c_im: Option<f64>,
}

/// Every field of a resolved config, in the shape `--config` reads back.
/// The variant itself comes from the subcommand, not the file.
impl From<&RenderConfig> for RenderOverrides {
    fn from(config: &RenderConfig) -> Self {
        let c = config.variant.julia_c();
        Self {
            width: Some(config.width),
            height: Some(config.height),
            center_re: Some(config.center_re),
            center_im: Some(config.center_im),
            real_extent: Some(config.real_extent),
            max_iterations: Some(config.max_iterations),
            flip_rows: Some(config.flip_rows()),
            output: Some(config.output.clone()),
            julia_c_re: c.map(|c| c.re),
            julia_c_im: c.map(|c| c.im),
        }
    }
}

impl RenderOverrides {
    /// Load overrides from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let json = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides = serde_json::from_str(&json).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded render config from {}", path.display());
        Ok(overrides)
    }
}
