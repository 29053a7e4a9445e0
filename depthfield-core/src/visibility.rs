/// Backface culling in camera-aligned space
use crate::error::{DepthFieldError, Result};
use crate::geometry::Mesh;

/// Remove every face whose normal does not point toward +Z.
///
/// Expects the scene to have been aligned so the camera lies on the +Z axis.
/// Faces seen exactly edge-on (normal z of zero) are removed too. Returns the
/// number of faces removed, or [`DepthFieldError::EmptyScene`] if none remain.
pub fn cull_backfaces(mesh: &mut Mesh) -> Result<usize> {
    let before = mesh.faces.len();
    let vertices = &mesh.vertices;
    mesh.faces.retain(|face| face.normal(vertices).z > 0.0);

    let removed = before - mesh.faces.len();
    log::debug!("culled {removed} of {before} faces");

    if mesh.faces.is_empty() {
        return Err(DepthFieldError::EmptyScene);
    }
    Ok(removed)
}
