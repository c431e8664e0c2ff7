use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

/// Per-renderer camera block, uploaded once per layer per frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PerFrameUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    /// x, y, width, height in pixels.
    pub viewport: [f32; 4],
}

impl PerFrameUniforms {
    pub fn new(view: Mat4, projection: Mat4, camera_pos: Vec3, viewport: [f32; 4]) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            camera_pos: camera_pos.extend(1.0).to_array(),
            viewport,
        }
    }
}

/// Per-object push data: model matrix plus normal matrix columns.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PerObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub normal_matrix_col0: [f32; 4],
    pub normal_matrix_col1: [f32; 4],
    pub normal_matrix_col2: [f32; 4],
    /// x = opacity, yzw unused.
    pub opacity: [f32; 4],
}

impl PerObjectUniforms {
    pub fn new(model: Mat4, opacity: f32) -> Self {
        let upper = Mat3::from_mat4(model);
        // Singular transforms (zero scale) fall back to the plain upper 3x3.
        let normal = if upper.determinant().abs() > f32::EPSILON {
            upper.inverse().transpose()
        } else {
            upper
        };
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix_col0: normal.x_axis.extend(0.0).to_array(),
            normal_matrix_col1: normal.y_axis.extend(0.0).to_array(),
            normal_matrix_col2: normal.z_axis.extend(0.0).to_array(),
            opacity: [opacity, 0.0, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_sizes() {
        assert_eq!(std::mem::size_of::<PerFrameUniforms>(), 160);
        assert_eq!(std::mem::size_of::<PerObjectUniforms>(), 128);
    }

    #[test]
    fn test_normal_matrix_of_uniform_scale() {
        let u = PerObjectUniforms::new(Mat4::from_scale(Vec3::splat(2.0)), 1.0);
        assert!((u.normal_matrix_col0[0] - 0.5).abs() < 1e-6);
        assert!((u.normal_matrix_col1[1] - 0.5).abs() < 1e-6);
        assert_eq!(u.model[3], [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_singular_model_does_not_produce_nan() {
        let u = PerObjectUniforms::new(Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0)), 0.5);
        assert!(u.normal_matrix_col0.iter().all(|v| v.is_finite()));
        assert_eq!(u.opacity[0], 0.5);
    }
}
