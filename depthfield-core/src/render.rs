/// Render requests and the per-call pipeline
use std::path::PathBuf;

use image::RgbImage;
use nalgebra::Point3;

use crate::depth_buffer::DepthBuffer;
use crate::error::{DepthFieldError, Result};
use crate::geometry::Mesh;
use crate::normalize::to_grayscale;
use crate::obj::load_obj;
use crate::projection::{ImageSize, ViewWindow, Viewport};
use crate::raster::Rasterizer;
use crate::transform::Scene;
use crate::visibility::cull_backfaces;

/// Camera placement and output geometry for one render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub camera: Point3<f64>,
    pub target: Point3<f64>,
    pub view: ViewWindow,
    pub image: ImageSize,
}

impl RenderSettings {
    pub fn new(camera: Point3<f64>, target: Point3<f64>, view: ViewWindow, image: ImageSize) -> Self {
        Self {
            camera,
            target,
            view,
            image,
        }
    }

    /// Check the camera and target are finite and the view window and image
    /// size are strictly positive.
    pub fn validate(&self) -> Result<()> {
        for (name, point) in [("camera", &self.camera), ("target", &self.target)] {
            if !point.coords.iter().all(|c| c.is_finite()) {
                return Err(DepthFieldError::Validation(format!(
                    "invalid {name} ({}, {}, {}): coordinates must be finite",
                    point.x, point.y, point.z
                )));
            }
        }
        // Written so NaN fails too.
        if !(self.view.width > 0.0 && self.view.height > 0.0)
            || !self.view.width.is_finite()
            || !self.view.height.is_finite()
        {
            return Err(DepthFieldError::Validation(format!(
                "invalid view {} x {}: both dimensions must be positive",
                self.view.width, self.view.height
            )));
        }
        if self.image.width == 0 || self.image.height == 0 {
            return Err(DepthFieldError::Validation(format!(
                "invalid size {} x {}: both dimensions must be positive",
                self.image.width, self.image.height
            )));
        }
        Ok(())
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            camera: Point3::new(50.0, 50.0, 50.0),
            target: Point3::origin(),
            view: ViewWindow::new(8.0, 6.0),
            image: ImageSize::new(800, 600),
        }
    }
}

/// A mesh file plus the settings to render it with
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub mesh_path: PathBuf,
    pub settings: RenderSettings,
}

impl RenderRequest {
    pub fn new(mesh_path: impl Into<PathBuf>, settings: RenderSettings) -> Self {
        Self {
            mesh_path: mesh_path.into(),
            settings,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.mesh_path.exists() {
            return Err(DepthFieldError::Validation(format!(
                "file does not exist: {}",
                self.mesh_path.display()
            )));
        }
        self.settings.validate()
    }
}

/// Load the requested mesh and render its depth field.
pub fn render(request: &RenderRequest) -> Result<RgbImage> {
    request.validate()?;
    let mesh = load_obj(&request.mesh_path)?;
    Ok(to_grayscale(&RenderContext::new(mesh, &request.settings).run()?))
}

/// Render the depth field of an in-memory mesh.
pub fn render_mesh(mesh: Mesh, settings: &RenderSettings) -> Result<RgbImage> {
    Ok(to_grayscale(&depth_field(mesh, settings)?))
}

/// Run the pipeline up to, but not including, grayscale conversion.
pub fn depth_field(mesh: Mesh, settings: &RenderSettings) -> Result<DepthBuffer> {
    settings.validate()?;
    mesh.validate()?;
    RenderContext::new(mesh, settings).run()
}

/// Everything one render mutates. Owned by a single call and dropped when
/// it returns, whichever way it returns.
struct RenderContext {
    scene: Scene,
    viewport: Viewport,
    buffer: DepthBuffer,
    rasterizer: Rasterizer,
}

impl RenderContext {
    fn new(mesh: Mesh, settings: &RenderSettings) -> Self {
        Self {
            scene: Scene::new(mesh, settings.camera, settings.target),
            viewport: Viewport::new(settings.view, settings.image),
            buffer: DepthBuffer::new(settings.image.width, settings.image.height),
            rasterizer: Rasterizer::new(),
        }
    }

    fn run(mut self) -> Result<DepthBuffer> {
        self.scene.center_on_target();
        self.scene.align_camera()?;
        cull_backfaces(&mut self.scene.mesh)?;

        let points = self
            .viewport
            .project_all(&self.scene.camera, &self.scene.mesh.vertices)?;
        let written = self
            .rasterizer
            .draw_faces(&self.scene.mesh.faces, &points, &mut self.buffer);

        log::debug!(
            "{} faces wrote {} depth cells, {} pixels filled",
            self.scene.mesh.faces.len(),
            written,
            self.buffer.filled_count()
        );
        if let Some(range) = self.buffer.range() {
            log::info!("rendered depth field, depth {:.4}..{:.4}", range.min, range.max);
        }
        Ok(self.buffer)
    }
}
