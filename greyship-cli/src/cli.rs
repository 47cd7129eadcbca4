use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use greyship_core::{Julia, Variant};

use crate::config::{RenderConfig, RenderOverrides};
use crate::error::CliError;

/// Render escape-time fractals to greyscale PNG images
#[derive(Parser, Debug)]
#[command(name = "greyship")]
#[command(version)]
#[command(about = "Render Burning Ship and Julia fractals as greyscale PNG images", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// JSON file with render settings (flags take precedence)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the resolved settings as JSON and exit without rendering
    #[arg(long, global = true)]
    pub print_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a Julia set for a fixed constant c
    Julia {
        #[command(flatten)]
        render: RenderArgs,

        /// Real part of the Julia constant
        #[arg(long, allow_negative_numbers = true, value_name = "RE")]
        c_re: Option<f64>,

        /// Imaginary part of the Julia constant
        #[arg(long, allow_negative_numbers = true, value_name = "IM")]
        c_im: Option<f64>,
    },

    /// Render the Burning Ship fractal
    BurningShip {
        #[command(flatten)]
        render: RenderArgs,
    },
}

/// Flags shared by every fractal.
#[derive(Args, Debug, Default)]
pub struct RenderArgs {
    /// Image width in pixels
    #[arg(long, value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long, value_name = "PIXELS")]
    pub height: Option<u32>,

    /// Real part of the window centre
    #[arg(long, allow_negative_numbers = true, value_name = "RE")]
    pub center_re: Option<f64>,

    /// Imaginary part of the window centre
    #[arg(long, allow_negative_numbers = true, value_name = "IM")]
    pub center_im: Option<f64>,

    /// Length of the window along the real axis
    #[arg(long, value_name = "LENGTH")]
    pub extent: Option<f64>,

    /// Iteration budget (at most 254)
    #[arg(short = 'n', long, value_name = "N")]
    pub iterations: Option<u32>,

    /// Reverse image rows (defaults to the fractal's usual orientation)
    #[arg(long, value_name = "BOOL")]
    pub flip_rows: Option<bool>,

    /// Output PNG path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl Cli {
    fn variant(&self) -> Variant {
        match self.command {
            Command::Julia { .. } => Variant::Julia {
                c: Julia::default_c(),
            },
            Command::BurningShip { .. } => Variant::BurningShip,
        }
    }

    fn overrides(&self) -> RenderOverrides {
        let (args, c_re, c_im) = match &self.command {
            Command::Julia { render, c_re, c_im } => (render, *c_re, *c_im),
            Command::BurningShip { render } => (render, None, None),
        };
        RenderOverrides {
            width: args.width,
            height: args.height,
            center_re: args.center_re,
            center_im: args.center_im,
            real_extent: args.extent,
            max_iterations: args.iterations,
            flip_rows: args.flip_rows,
            output: args.output.clone(),
            julia_c_re: c_re,
            julia_c_im: c_im,
        }
    }

    /// Merge the variant preset, the config file and the flags, in that
    /// order of precedence.
    pub fn resolve(&self) -> Result<RenderConfig, CliError> {
        let mut config = RenderConfig::preset(self.variant());
        if let Some(ref path) = self.config {
            config.apply(&RenderOverrides::load(path)?);
        }
        config.apply(&self.overrides());
        Ok(config)
    }
}
