/// Depth Field Core Library - mesh to depth-field image pipeline
///
/// Loads a triangle mesh, turns the scene so the camera looks down the Z axis,
/// culls back faces, projects and scan-converts the rest into a nearest-depth
/// buffer, then maps depth onto an 8-bit grayscale image (nearer is brighter).
/// Every render owns its own state, so renders may run concurrently.

pub mod depth_buffer;
pub mod error;
pub mod geometry;
pub mod normalize;
pub mod obj;
pub mod projection;
pub mod raster;
pub mod render;
pub mod transform;
pub mod visibility;

// Re-export commonly used types
pub use depth_buffer::{DepthBuffer, DepthRange};
pub use error::{DepthFieldError, ParseError, Result};
pub use geometry::{Face, Mesh, Vertex};
pub use projection::{ImageSize, ProjectedPoint, ViewWindow, Viewport};
pub use render::{depth_field, render, render_mesh, RenderRequest, RenderSettings};
pub use transform::{CameraRotation, Scene};
