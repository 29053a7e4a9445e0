/// Scene centering and camera-alignment rotation
use nalgebra::{Matrix3, Point3};

use crate::error::{DepthFieldError, Result};
use crate::geometry::{rounds_to_zero, Mesh};

/// Decimal places used when testing the camera for a degenerate placement.
const DEGENERATE_DIGITS: i32 = 8;

/// Camera, target and mesh for one render
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Point3<f64>,
    pub target: Point3<f64>,
    pub mesh: Mesh,
}

impl Scene {
    pub fn new(mesh: Mesh, camera: Point3<f64>, target: Point3<f64>) -> Self {
        Self {
            camera,
            target,
            mesh,
        }
    }

    /// Translate the camera and every vertex so the target sits at the origin.
    ///
    /// Does nothing when the target is already exactly at the origin.
    pub fn center_on_target(&mut self) {
        if self.target == Point3::origin() {
            return;
        }

        let offset = self.target.coords;
        self.camera -= offset;
        for vertex in &mut self.mesh.vertices {
            *vertex -= offset;
        }
        self.target = Point3::origin();
    }

    /// Rotate the scene about the origin so the camera lands on the +Z axis.
    ///
    /// Call after [`Scene::center_on_target`].
    pub fn align_camera(&mut self) -> Result<CameraRotation> {
        let rotation = CameraRotation::for_camera(&self.camera)?;
        let matrix = rotation.matrix();

        self.camera = rotate(&self.camera, &matrix);
        for vertex in &mut self.mesh.vertices {
            *vertex = rotate(vertex, &matrix);
        }

        log::debug!(
            "aligned camera (yaw {:.4}, pitch {:.4}) at {:?}",
            rotation.yaw,
            rotation.pitch,
            self.camera
        );
        Ok(rotation)
    }
}

/// Angles (in radians) that bring a camera onto the +Z axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRotation {
    /// Rotation about the Y axis.
    pub yaw: f64,
    /// Rotation about the X axis.
    pub pitch: f64,
}

impl CameraRotation {
    /// Derive the rotation for a camera expressed relative to the target.
    ///
    /// Fails when the camera's z or its distance from the Y axis rounds to
    /// zero, i.e. the camera sits on the target or straight above or below it.
    pub fn for_camera(camera: &Point3<f64>) -> Result<Self> {
        let xz = (camera.x * camera.x + camera.z * camera.z).sqrt();
        if rounds_to_zero(camera.z, DEGENERATE_DIGITS) || rounds_to_zero(xz, DEGENERATE_DIGITS) {
            return Err(DepthFieldError::Geometry(format!(
                "camera at {:?} relative to the target has no usable line of sight",
                camera.coords.as_slice()
            )));
        }

        Ok(Self {
            yaw: (camera.x / camera.z).atan(),
            pitch: -(camera.y / xz).atan(),
        })
    }

    /// Combined matrix `Ry · Rx` for row vectors.
    pub fn matrix(&self) -> Matrix3<f64> {
        rotation_y(self.yaw) * rotation_x(self.pitch)
    }
}

pub fn rotation_x(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, c, -s, //
        0.0, s, c,
    )
}

pub fn rotation_y(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        c, 0.0, s, //
        0.0, 1.0, 0.0, //
        -s, 0.0, c,
    )
}

/// `point · matrix` with the point as a row vector.
pub fn rotate(point: &Point3<f64>, matrix: &Matrix3<f64>) -> Point3<f64> {
    Point3::from(matrix.tr_mul(&point.coords))
}
