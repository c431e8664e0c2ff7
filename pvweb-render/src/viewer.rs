//! Viewer, render window and the per-layer renderer registry.

use glam::Vec2;

use crate::camera::ClearMask;
use crate::handle::{Handle, HandleStore};
use crate::renderer::{Renderer, RendererKind};

/// The host surface a viewer draws into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasNode {
    pub width: u32,
    pub height: u32,
}

impl CanvasNode {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Owns renderers and their draw order.
#[derive(Debug)]
pub struct RenderWindow {
    size: Vec2,
    renderers: HandleStore<Renderer>,
    order: Vec<Handle>,
}

impl RenderWindow {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            renderers: HandleStore::new(),
            order: Vec::new(),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Resize the window and every resizable renderer with it.
    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
        for &handle in &self.order {
            if let Some(r) = self.renderers.get_mut(handle) {
                if r.is_resizable() {
                    r.resize(size.x, size.y);
                }
            }
        }
    }

    pub fn add_renderer(&mut self, renderer: Renderer) -> Handle {
        let handle = self.renderers.insert(renderer);
        self.order.push(handle);
        handle
    }

    pub fn remove_renderer(&mut self, handle: Handle) -> Option<Renderer> {
        self.order.retain(|&h| h != handle);
        self.renderers.remove(handle)
    }

    pub fn renderer(&self, handle: Handle) -> Option<&Renderer> {
        self.renderers.get(handle)
    }

    pub fn renderer_mut(&mut self, handle: Handle) -> Option<&mut Renderer> {
        self.renderers.get_mut(handle)
    }

    /// Renderers in the order they were added.
    pub fn renderers(&self) -> impl Iterator<Item = (Handle, &Renderer)> + '_ {
        self.order
            .iter()
            .filter_map(|&h| self.renderers.get(h).map(|r| (h, r)))
    }

    pub fn renderer_count(&self) -> usize {
        self.order.len()
    }
}

#[derive(Debug)]
pub struct Viewer {
    window: RenderWindow,
}

impl Viewer {
    /// A viewer whose window matches `node` and holds one default renderer.
    pub fn new(node: CanvasNode) -> Self {
        let mut window = RenderWindow::new(node.size());
        let mut renderer = Renderer::new(RendererKind::Standard);
        renderer.resize(node.size().x, node.size().y);
        window.add_renderer(renderer);
        Self { window }
    }

    pub fn window(&self) -> &RenderWindow {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut RenderWindow {
        &mut self.window
    }

    /// Swap the default renderer for a depth-peeling one and return its handle.
    pub fn install_depth_peeling(&mut self) -> Handle {
        let defaults: Vec<Handle> = self.window.renderers().map(|(h, _)| h).collect();
        for handle in defaults {
            self.window.remove_renderer(handle);
        }
        let size = self.window.size();
        let mut renderer = Renderer::new(RendererKind::DepthPeeling);
        renderer.resize(size.x, size.y);
        self.window.add_renderer(renderer)
    }
}

/// Insertion-ordered mapping from layer index to renderer handle.
#[derive(Debug, Default)]
pub struct RendererRegistry {
    layers: Vec<(usize, Handle)>,
}

impl RendererRegistry {
    pub fn get(&self, layer: usize) -> Option<Handle> {
        self.layers.iter().find(|(l, _)| *l == layer).map(|&(_, h)| h)
    }

    pub fn insert(&mut self, layer: usize, handle: Handle) {
        match self.layers.iter_mut().find(|(l, _)| *l == layer) {
            Some(entry) => entry.1 = handle,
            None => self.layers.push((layer, handle)),
        }
    }

    /// Handle for `layer`, creating a renderer in `window` on first use.
    ///
    /// New renderers do not reset the scene or clipping range when actors
    /// are added. Layers above 0 only clear depth so lower layers show
    /// through.
    pub fn get_or_create(&mut self, window: &mut RenderWindow, layer: usize) -> Handle {
        if let Some(handle) = self.get(layer) {
            return handle;
        }
        let mut renderer = Renderer::new(RendererKind::Standard);
        renderer.set_reset_scene_on_add(false);
        renderer.set_reset_clipping_range(false);
        renderer.set_layer(layer);
        if layer != 0 {
            renderer.camera_mut().set_clear_mask(ClearMask::DEPTH);
        }
        let size = window.size();
        renderer.resize(size.x, size.y);
        let handle = window.add_renderer(renderer);
        log::debug!("created renderer {handle} for layer {layer}");
        self.layers.push((layer, handle));
        handle
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Handle)> + '_ {
        self.layers.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn clear(&mut self) {
        self.layers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_starts_with_one_renderer() {
        let v = Viewer::new(CanvasNode::new(320, 240));
        assert_eq!(v.window().renderer_count(), 1);
        assert_eq!(v.window().size(), Vec2::new(320.0, 240.0));
    }

    #[test]
    fn test_install_depth_peeling_replaces_default() {
        let mut v = Viewer::new(CanvasNode::new(320, 240));
        let h = v.install_depth_peeling();
        assert_eq!(v.window().renderer_count(), 1);
        let r = v.window().renderer(h).unwrap();
        assert_eq!(r.kind(), RendererKind::DepthPeeling);
        assert_eq!(r.size(), Vec2::new(320.0, 240.0));
    }

    #[test]
    fn test_get_or_create_is_stable() {
        let mut window = RenderWindow::new(Vec2::new(100.0, 100.0));
        let mut reg = RendererRegistry::default();
        let a = reg.get_or_create(&mut window, 2);
        let b = reg.get_or_create(&mut window, 2);
        assert_eq!(a, b);
        assert_eq!(window.renderer_count(), 1);

        let r = window.renderer(a).unwrap();
        assert_eq!(r.layer(), 2);
        assert!(!r.resets_scene_on_add());
        assert!(!r.resets_clipping_range());
        assert_eq!(r.camera().clear_mask(), ClearMask::DEPTH);
    }

    #[test]
    fn test_layer_zero_keeps_full_clear() {
        let mut window = RenderWindow::new(Vec2::new(100.0, 100.0));
        let mut reg = RendererRegistry::default();
        let h = reg.get_or_create(&mut window, 0);
        assert_eq!(window.renderer(h).unwrap().camera().clear_mask(), ClearMask::COLOR_AND_DEPTH);
    }

    #[test]
    fn test_registry_keeps_insertion_order() {
        let mut window = RenderWindow::new(Vec2::ZERO);
        let mut reg = RendererRegistry::default();
        reg.get_or_create(&mut window, 3);
        reg.get_or_create(&mut window, 1);
        reg.insert(0, 99);
        let layers: Vec<_> = reg.iter().map(|(l, _)| l).collect();
        assert_eq!(layers, vec![3, 1, 0]);
        reg.clear();
        assert!(reg.is_empty());
    }

    #[test]
    fn test_resize_skips_fixed_renderers() {
        let mut window = RenderWindow::new(Vec2::new(100.0, 100.0));
        let mut fixed = Renderer::new(RendererKind::Standard);
        fixed.resize(10.0, 10.0);
        fixed.set_resizable(false);
        let fixed = window.add_renderer(fixed);
        let free = window.add_renderer(Renderer::new(RendererKind::Standard));
        window.resize(Vec2::new(50.0, 40.0));
        assert_eq!(window.renderer(fixed).unwrap().size(), Vec2::new(10.0, 10.0));
        assert_eq!(window.renderer(free).unwrap().size(), Vec2::new(50.0, 40.0));
    }
}
