use glam::{Mat4, Vec3};

/// Buffers a renderer clears before drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClearMask(pub u32);

impl ClearMask {
    pub const COLOR: Self = Self(1 << 0);
    pub const DEPTH: Self = Self(1 << 1);
    pub const COLOR_AND_DEPTH: Self = Self(Self::COLOR.0 | Self::DEPTH.0);

    pub fn has(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for ClearMask {
    fn default() -> Self {
        Self::COLOR_AND_DEPTH
    }
}

/// Perspective camera state for one renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    view_angle_degrees: f32,
    position: Vec3,
    focal_point: Vec3,
    view_up: Vec3,
    center_of_rotation: Vec3,
    clear_mask: ClearMask,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            view_angle_degrees: 30.0,
            position: Vec3::new(0.0, 0.0, 1.0),
            focal_point: Vec3::ZERO,
            view_up: Vec3::Y,
            center_of_rotation: Vec3::ZERO,
            clear_mask: ClearMask::default(),
        }
    }
}

impl Camera {
    pub fn view_angle_degrees(&self) -> f32 {
        self.view_angle_degrees
    }

    pub fn set_view_angle_degrees(&mut self, degrees: f32) {
        self.view_angle_degrees = degrees;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn focal_point(&self) -> Vec3 {
        self.focal_point
    }

    pub fn set_focal_point(&mut self, focal_point: Vec3) {
        self.focal_point = focal_point;
    }

    pub fn view_up(&self) -> Vec3 {
        self.view_up
    }

    pub fn set_view_up(&mut self, view_up: Vec3) {
        self.view_up = view_up;
    }

    pub fn center_of_rotation(&self) -> Vec3 {
        self.center_of_rotation
    }

    pub fn set_center_of_rotation(&mut self, center: Vec3) {
        self.center_of_rotation = center;
    }

    pub fn clear_mask(&self) -> ClearMask {
        self.clear_mask
    }

    pub fn set_clear_mask(&mut self, mask: ClearMask) {
        self.clear_mask = mask;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.focal_point, self.view_up)
    }

    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh(self.view_angle_degrees.to_radians(), aspect, near, far)
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.focal_point)
    }
}
