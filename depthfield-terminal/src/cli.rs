/// Command line options
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use depthfield_core::{ImageSize, RenderRequest, RenderSettings, ViewWindow};
use log::LevelFilter;
use nalgebra::Point3;

/// Render a depth field image from a Wavefront OBJ mesh.
///
/// Tuples are comma separated, e.g. `--camera "50, 50, 50"`.
#[derive(Debug, Clone, Parser)]
#[command(name = "depthfield", version)]
pub struct Cli {
    /// Mesh file to render
    #[arg(short, long, default_value = "cube.obj")]
    pub model: PathBuf,

    /// Camera position as x,y,z
    #[arg(short, long, default_value = "50., 50., 50.", value_parser = parse_point, allow_hyphen_values = true)]
    pub camera: Point3<f64>,

    /// Point the camera looks at, as x,y,z
    #[arg(short, long, default_value = "0.0, 0.0, 0.0", value_parser = parse_point, allow_hyphen_values = true)]
    pub target: Point3<f64>,

    /// World-space width,height of the visible region around the target
    #[arg(long, default_value = "8.0, 6.0", value_parser = parse_view)]
    pub view: ViewWindow,

    /// Image width,height in pixels
    #[arg(short, long, default_value = "800, 600", value_parser = parse_size)]
    pub size: ImageSize,

    /// Write the depth field to this PNG file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show the terminal preview even when writing a file
    #[arg(long)]
    pub preview: bool,

    /// Preview width in terminal columns (defaults to the terminal width)
    #[arg(long)]
    pub columns: Option<u16>,

    /// More logging; repeat for debug output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn request(&self) -> RenderRequest {
        RenderRequest::new(
            &self.model,
            RenderSettings::new(self.camera, self.target, self.view, self.size),
        )
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    /// Whether to draw the preview in the terminal.
    pub fn wants_preview(&self) -> bool {
        self.preview || self.output.is_none()
    }
}

fn parse_components<T: FromStr, const N: usize>(input: &str) -> Result<[T; N], String> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {N} comma separated values, got {}", parts.len()));
    }

    let mut values = Vec::with_capacity(N);
    for part in parts {
        values.push(
            part.parse::<T>()
                .map_err(|_| format!("'{part}' is not a valid number"))?,
        );
    }
    values
        .try_into()
        .map_err(|_| format!("expected {N} values"))
}

fn parse_point(input: &str) -> Result<Point3<f64>, String> {
    let [x, y, z] = parse_components::<f64, 3>(input)?;
    Ok(Point3::new(x, y, z))
}

fn parse_view(input: &str) -> Result<ViewWindow, String> {
    let [width, height] = parse_components::<f64, 2>(input)?;
    Ok(ViewWindow::new(width, height))
}

fn parse_size(input: &str) -> Result<ImageSize, String> {
    let [width, height] = parse_components::<u32, 2>(input)?;
    Ok(ImageSize::new(width, height))
}
