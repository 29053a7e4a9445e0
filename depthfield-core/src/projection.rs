/// Perspective projection onto the image plane
use nalgebra::Point3;

use crate::error::{DepthFieldError, Result};

/// Largest pixel offset from the image center a projection may produce.
/// Vertices almost level with the camera land far outside any image; they
/// are pinned here so pixel arithmetic stays in range.
const MAX_PIXEL_OFFSET: f64 = i32::MAX as f64;

/// World-space size of the visible rectangle around the target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewWindow {
    pub width: f64,
    pub height: f64,
}

impl ViewWindow {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Output raster size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A vertex projected to pixel coordinates, with its distance to the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: i64,
    pub y: i64,
    /// Euclidean distance from the camera to the unprojected point.
    pub distance: f64,
}

impl ProjectedPoint {
    pub fn new(x: i64, y: i64, distance: f64) -> Self {
        Self { x, y, distance }
    }
}

/// Mapping from the camera-aligned image plane to pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub image: ImageSize,
    pub scale_x: f64,
    pub scale_y: f64,
    pub offset_x: i64,
    pub offset_y: i64,
}

impl Viewport {
    pub fn new(view: ViewWindow, image: ImageSize) -> Self {
        Self {
            image,
            scale_x: f64::from(image.width) / view.width,
            scale_y: f64::from(image.height) / view.height,
            offset_x: i64::from(image.width / 2),
            offset_y: i64::from(image.height / 2),
        }
    }

    /// Project `point` as seen from a camera on the +Z axis.
    ///
    /// Pixel coordinates are truncated toward zero, not rounded, and pinned
    /// to `±MAX_PIXEL_OFFSET` around the center. Larger world Y maps to
    /// smaller pixel rows so that up is up in the image.
    pub fn project(&self, camera: &Point3<f64>, point: &Point3<f64>) -> Option<ProjectedPoint> {
        let dz = camera.z - point.z;
        if dz <= 0.0 {
            return None;
        }

        let nx = point.x * camera.z / dz;
        let ny = point.y * camera.z / dz;
        let x = pixels(nx * self.scale_x) + self.offset_x;
        let y = i64::from(self.image.height) - pixels(ny * self.scale_y) - self.offset_y;

        Some(ProjectedPoint::new(x, y, (camera - point).norm()))
    }

    /// Project every vertex, failing on the first one at or behind the camera.
    pub fn project_all(
        &self,
        camera: &Point3<f64>,
        vertices: &[Point3<f64>],
    ) -> Result<Vec<ProjectedPoint>> {
        vertices
            .iter()
            .enumerate()
            .map(|(vertex, point)| {
                self.project(camera, point)
                    .ok_or(DepthFieldError::Projection {
                        vertex,
                        axial_distance: camera.z - point.z,
                    })
            })
            .collect()
    }
}

fn pixels(offset: f64) -> i64 {
    offset.trunc().clamp(-MAX_PIXEL_OFFSET, MAX_PIXEL_OFFSET) as i64
}
