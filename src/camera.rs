use nalgebra as na;
use na::{matrix, vector, Matrix4, Vector3};

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;
pub const MIN_FOV: f32 = 30.0;
pub const MAX_FOV: f32 = 120.0;
/// Pitch limit in degrees, short of straight up/down where the basis degenerates.
pub const MAX_PITCH: f32 = 89.99;

/// Left-handed first person camera: +z is forward, +y is up.
///
/// Supplies the view matrix, projection matrix and world position used by the vertex
/// transform stage. Input handling lives in the viewer, which drives the camera through
/// `move_local`, `rotate` and `change_fov`.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vector3<f32>,
    fov: f32,
    aspect_ratio: f32,
    yaw: f32,
    pitch: f32,
    forward: Vector3<f32>,
    right: Vector3<f32>,
    up: Vector3<f32>,
}

impl Camera {
    /// `fov` is the vertical field of view in degrees and gets clamped to \[30, 120\].
    pub fn new(origin: Vector3<f32>, fov: f32, aspect_ratio: f32) -> Self {
        let mut camera = Self {
            origin,
            fov: fov.clamp(MIN_FOV, MAX_FOV),
            aspect_ratio,
            yaw: 0.0,
            pitch: 0.0,
            forward: Vector3::z(),
            right: Vector3::x(),
            up: Vector3::y(),
        };
        camera.update_basis();
        return camera;
    }

    fn update_basis(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.forward = vector![pitch.cos() * yaw.sin(), pitch.sin(), pitch.cos() * yaw.cos()];
        self.right = Vector3::y().cross(&self.forward).normalize();
        self.up = self.forward.cross(&self.right);
    }

    /// Moves along the camera's own right, up and forward axes.
    pub fn move_local(&mut self, offset: Vector3<f32>) {
        self.origin += self.right * offset.x + self.up * offset.y + self.forward * offset.z;
    }

    /// Adds to yaw and pitch, both in degrees. Pitch is clamped so the camera never flips.
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        self.yaw = (self.yaw + yaw) % 360.0;
        self.pitch = (self.pitch + pitch).clamp(-MAX_PITCH, MAX_PITCH);
        self.update_basis();
    }

    pub fn change_fov(&mut self, delta: f32) {
        self.fov = (self.fov + delta).clamp(MIN_FOV, MAX_FOV);
    }

    /// World to camera transform: the inverse of the camera's orthonormal basis placed at
    /// its origin. The rotation part is orthonormal, so the inverse is its transpose.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let (r, u, f) = (self.right, self.up, self.forward);
        let o = self.origin;
        return matrix![r.x, r.y, r.z, -r.dot(&o);
                       u.x, u.y, u.z, -u.dot(&o);
                       f.x, f.y, f.z, -f.dot(&o);
                       0.0, 0.0, 0.0, 1.0];
    }

    /// Left-handed perspective projection mapping view depth \[near, far\] to ndc z \[0, 1\]
    /// and copying view depth into w.
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let y_scale = 1.0 / (self.fov.to_radians() / 2.0).tan();
        let x_scale = y_scale / self.aspect_ratio;
        let depth_scale = FAR_PLANE / (FAR_PLANE - NEAR_PLANE);
        return matrix![x_scale, 0.0,     0.0,         0.0;
                       0.0,     y_scale, 0.0,         0.0;
                       0.0,     0.0,     depth_scale, -NEAR_PLANE * depth_scale;
                       0.0,     0.0,     1.0,         0.0];
    }

    pub fn origin(&self) -> Vector3<f32> {
        return self.origin;
    }

    pub fn fov(&self) -> f32 {
        return self.fov;
    }

    pub fn forward(&self) -> Vector3<f32> {
        return self.forward;
    }
}
