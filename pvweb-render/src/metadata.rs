//! Applies per-layer scene metadata to renderers.

use glam::Vec2;

use crate::camera::ClearMask;
use crate::renderer::Renderer;
use crate::scene::LayerDescription;

/// Configure `renderer` as `layer` of a window of `parent` pixels.
///
/// The viewport spans `(size - origin) * parent`. The camera orbits its
/// focal point. Layer 0 takes the background color; higher layers keep
/// their size on window resize and only clear depth.
pub fn apply_layer(renderer: &mut Renderer, layer: usize, desc: &LayerDescription, parent: Vec2) {
    let extent = (Vec2::from_array(desc.size) - Vec2::from_array(desc.origin)) * parent;
    renderer.resize(extent.x, extent.y);

    let look_at = &desc.look_at;
    let camera = renderer.camera_mut();
    camera.set_center_of_rotation(look_at.focal_point);
    camera.set_view_angle_degrees(look_at.view_angle_degrees);
    camera.set_position(look_at.position);
    camera.set_focal_point(look_at.focal_point);
    camera.set_view_up(look_at.view_up);

    if layer == 0 {
        if let Some([r, g, b]) = desc.background {
            renderer.set_background([r, g, b, 1.0]);
        }
    } else {
        renderer.set_resizable(false);
        renderer.camera_mut().set_clear_mask(ClearMask::DEPTH);
    }
    renderer.set_layer(layer);
    log::debug!("layer {layer}: viewport {}x{}", extent.x, extent.y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RendererKind;
    use crate::scene::LookAt;
    use glam::Vec3;

    fn layer(size: [f32; 2], origin: [f32; 2]) -> LayerDescription {
        LayerDescription {
            size,
            origin,
            look_at: LookAt::from([60.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 10.0]),
            background: Some([0.2, 0.3, 0.4]),
        }
    }

    #[test]
    fn test_look_at_applied() {
        let mut r = Renderer::new(RendererKind::Standard);
        apply_layer(&mut r, 0, &layer([1.0, 1.0], [0.0, 0.0]), Vec2::new(800.0, 600.0));
        let cam = r.camera();
        assert_eq!(cam.view_angle_degrees(), 60.0);
        assert_eq!(cam.focal_point(), Vec3::ZERO);
        assert_eq!(cam.view_up(), Vec3::Y);
        assert_eq!(cam.position(), Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(cam.center_of_rotation(), cam.focal_point());
        assert_eq!(r.size(), Vec2::new(800.0, 600.0));
        assert_eq!(r.background(), [0.2, 0.3, 0.4, 1.0]);
        assert!(r.is_resizable());
        assert_eq!(cam.clear_mask(), ClearMask::COLOR_AND_DEPTH);
    }

    #[test]
    fn test_overlay_layer() {
        let mut r = Renderer::new(RendererKind::Standard);
        apply_layer(&mut r, 1, &layer([0.5, 0.75], [0.25, 0.25]), Vec2::new(800.0, 400.0));
        assert_eq!(r.size(), Vec2::new(200.0, 200.0));
        assert_eq!(r.layer(), 1);
        assert!(!r.is_resizable());
        assert_eq!(r.camera().clear_mask(), ClearMask::DEPTH);
        // background only applies to the base layer
        assert_eq!(r.background(), [0.0, 0.0, 0.0, 1.0]);
    }
}
