use glam::Vec2;

use crate::assembler::Actor;
use crate::camera::Camera;
use crate::uniforms::PerFrameUniforms;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RendererKind {
    Standard,
    /// Order-independent transparency via depth peeling.
    DepthPeeling,
}

/// One layer of the scene: a camera, a viewport and the actors drawn in it.
#[derive(Debug)]
pub struct Renderer {
    kind: RendererKind,
    camera: Camera,
    size: Vec2,
    background: [f32; 4],
    layer: usize,
    resizable: bool,
    reset_scene_on_add: bool,
    reset_clipping_range: bool,
    actors: Vec<Actor>,
}

impl Renderer {
    pub fn new(kind: RendererKind) -> Self {
        Self {
            kind,
            camera: Camera::default(),
            size: Vec2::ZERO,
            background: [0.0, 0.0, 0.0, 1.0],
            layer: 0,
            resizable: true,
            reset_scene_on_add: true,
            reset_clipping_range: true,
            actors: Vec::new(),
        }
    }

    pub fn kind(&self) -> RendererKind {
        self.kind
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Viewport size in pixels.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    pub fn background(&self) -> [f32; 4] {
        self.background
    }

    pub fn set_background(&mut self, rgba: [f32; 4]) {
        self.background = rgba;
    }

    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn set_layer(&mut self, layer: usize) {
        self.layer = layer;
    }

    pub fn is_resizable(&self) -> bool {
        self.resizable
    }

    pub fn set_resizable(&mut self, resizable: bool) {
        self.resizable = resizable;
    }

    /// Whether adding an actor re-frames the camera around the scene.
    pub fn resets_scene_on_add(&self) -> bool {
        self.reset_scene_on_add
    }

    pub fn set_reset_scene_on_add(&mut self, enabled: bool) {
        self.reset_scene_on_add = enabled;
    }

    pub fn resets_clipping_range(&self) -> bool {
        self.reset_clipping_range
    }

    pub fn set_reset_clipping_range(&mut self, enabled: bool) {
        self.reset_clipping_range = enabled;
    }

    pub fn add_actor(&mut self, actor: Actor) {
        self.actors.push(actor);
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Actors in draw order: ascending render bin, insertion order within a bin.
    pub fn draw_order(&self) -> Vec<&Actor> {
        let mut ordered: Vec<&Actor> = self.actors.iter().collect();
        ordered.sort_by_key(|a| a.material.bin_number());
        ordered
    }

    /// Camera block for this layer. Clipping planes bracket the focal
    /// distance; a degenerate viewport uses a square aspect.
    pub fn frame_uniforms(&self) -> PerFrameUniforms {
        let aspect = if self.size.x > 0.0 && self.size.y > 0.0 {
            self.size.x / self.size.y
        } else {
            1.0
        };
        let distance = self.camera.distance().max(1e-3);
        let projection = self.camera.projection_matrix(aspect, distance * 0.01, distance * 100.0);
        PerFrameUniforms::new(
            self.camera.view_matrix(),
            projection,
            self.camera.position(),
            [0.0, 0.0, self.size.x, self.size.y],
        )
    }
}
