//! The scene reader: viewer lifecycle, layer metadata and object loading.

use pvweb_format::{decode_payload, DecodeError, RecordKind};

use crate::assembler::{Assembled, ObjectAssembler, ObjectStyle};
use crate::error::{SceneError, SceneResult};
use crate::handle::Handle;
use crate::legend::{BasicLegendFactory, LegendFactory, LegendWidget};
use crate::material::{BasicMaterialFactory, MaterialFactory};
use crate::metadata;
use crate::options::ReaderOptions;
use crate::renderer::Renderer;
use crate::scene::{EncodedObject, SceneDescription};
use crate::viewer::{CanvasNode, RendererRegistry, Viewer};

/// Outcome of [`SceneReader::load_objects`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: usize,
}

pub struct SceneReader<M = BasicMaterialFactory, L = BasicLegendFactory> {
    options: ReaderOptions,
    assembler: ObjectAssembler<M, L>,
    viewer: Option<Viewer>,
    registry: RendererRegistry,
    scene: Option<SceneDescription>,
    legends: Vec<LegendWidget>,
    object_count: usize,
}

impl SceneReader {
    pub fn new(options: ReaderOptions) -> Self {
        Self::with_factories(options, BasicMaterialFactory, BasicLegendFactory)
    }
}

impl Default for SceneReader {
    fn default() -> Self {
        Self::new(ReaderOptions::default())
    }
}

impl<M: MaterialFactory, L: LegendFactory> SceneReader<M, L> {
    pub fn with_factories(options: ReaderOptions, materials: M, legends: L) -> Self {
        let assembler = ObjectAssembler::new(materials, legends)
            .with_legend_height(options.legend_height)
            .with_transparent_bin(options.transparent_bin);
        Self {
            options,
            assembler,
            viewer: None,
            registry: RendererRegistry::default(),
            scene: None,
            legends: Vec::new(),
            object_count: 0,
        }
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    // ============================================================
    // Viewer lifecycle
    // ============================================================

    /// Create the viewer for `node`, or return the existing one unchanged.
    ///
    /// A fresh viewer's default renderer is replaced by a depth-peeling
    /// renderer registered as layer 0.
    pub fn create_viewer(&mut self, node: CanvasNode) -> &mut Viewer {
        let registry = &mut self.registry;
        self.viewer.get_or_insert_with(|| {
            let mut viewer = Viewer::new(node);
            let handle = viewer.install_depth_peeling();
            registry.insert(0, handle);
            log::info!("viewer created ({}x{})", node.width, node.height);
            viewer
        })
    }

    /// Drop the viewer along with every renderer, actor and legend.
    pub fn delete_viewer(&mut self) {
        self.registry.clear();
        self.legends.clear();
        self.object_count = 0;
        if self.viewer.take().is_some() {
            log::info!("viewer deleted");
        }
    }

    pub fn update_canvas(&mut self, node: CanvasNode) -> SceneResult<()> {
        let viewer = self.viewer.as_mut().ok_or(SceneError::ViewerNotCreated)?;
        viewer.window_mut().resize(node.size());
        Ok(())
    }

    pub fn viewer(&self) -> Option<&Viewer> {
        self.viewer.as_ref()
    }

    // ============================================================
    // Renderer registry
    // ============================================================

    /// Handle of the renderer for `layer`, created on first request.
    pub fn get_renderer(&mut self, layer: usize) -> SceneResult<Handle> {
        let viewer = self.viewer.as_mut().ok_or(SceneError::ViewerNotCreated)?;
        Ok(self.registry.get_or_create(viewer.window_mut(), layer))
    }

    /// The renderer registered for `layer`, if any.
    pub fn renderer(&self, layer: usize) -> Option<&Renderer> {
        let handle = self.registry.get(layer)?;
        self.viewer.as_ref()?.window().renderer(handle)
    }

    pub fn registry(&self) -> &RendererRegistry {
        &self.registry
    }

    // ============================================================
    // Scene metadata
    // ============================================================

    pub fn set_scene(&mut self, scene: SceneDescription) {
        self.scene = Some(scene);
    }

    pub fn scene(&self) -> Option<&SceneDescription> {
        self.scene.as_ref()
    }

    /// Apply the description's entry for `layer` to that layer's renderer.
    pub fn apply_layer_metadata(&mut self, layer: usize) -> SceneResult<()> {
        let desc = self
            .scene
            .as_ref()
            .and_then(|s| s.layer(layer))
            .cloned()
            .ok_or(SceneError::InvalidSceneLayer(layer))?;
        let handle = self.get_renderer(layer)?;
        let window = self
            .viewer
            .as_mut()
            .ok_or(SceneError::ViewerNotCreated)?
            .window_mut();
        let parent = window.size();
        if let Some(renderer) = window.renderer_mut(handle) {
            metadata::apply_layer(renderer, layer, &desc, parent);
        }
        Ok(())
    }

    /// Apply metadata to every described layer, last to first. Registered
    /// layers the description does not cover are logged and left alone.
    /// Without a scene this does nothing.
    pub fn init_scene(&mut self) -> SceneResult<()> {
        let Some(count) = self.scene.as_ref().map(|s| s.renderers.len()) else {
            return Ok(());
        };
        for layer in (0..count).rev() {
            self.apply_layer_metadata(layer)?;
        }

        for (layer, _) in self.registry.iter().filter(|&(layer, _)| layer >= count) {
            log::warn!("skipping layer {layer}: {}", SceneError::InvalidSceneLayer(layer));
        }
        log::info!("scene initialised with {count} layer(s)");
        Ok(())
    }

    // ============================================================
    // Objects
    // ============================================================

    /// Decode and assemble one object. Actors go to the renderer for the
    /// object's layer; legends are kept on the reader.
    pub fn parse_object(&mut self, object: &EncodedObject) -> SceneResult<RecordKind> {
        let viewport = self
            .viewer
            .as_ref()
            .ok_or(SceneError::ViewerNotCreated)?
            .window()
            .size();
        let record = decode_payload(&object.data, self.options.base64_mode())?;
        let kind = record.kind();
        let style = ObjectStyle {
            has_transparency: object.has_transparency,
            opacity: object.opacity,
        };

        match self.assembler.assemble(record, style, viewport) {
            Assembled::Actor(actor) => {
                let handle = self.get_renderer(object.layer)?;
                if let Some(renderer) = self
                    .viewer
                    .as_mut()
                    .and_then(|v| v.window_mut().renderer_mut(handle))
                {
                    renderer.add_actor(actor);
                }
            }
            Assembled::Legend(legend) => self.legends.push(legend),
        }
        self.object_count += 1;
        log::debug!("object {:?} assembled as {:?} on layer {}", object.id, kind, object.layer);
        Ok(kind)
    }

    /// Parse every object in the current scene. A failing object is logged
    /// and skipped; its siblings still load. A payload that cannot be
    /// unwrapped aborts the whole load and is returned.
    pub fn load_objects(&mut self) -> SceneResult<LoadSummary> {
        if self.viewer.is_none() {
            return Err(SceneError::ViewerNotCreated);
        }
        let objects = match self.scene.as_mut() {
            Some(scene) => std::mem::take(&mut scene.objects),
            None => Vec::new(),
        };
        let result = self.parse_objects(&objects);
        if let Some(scene) = self.scene.as_mut() {
            scene.objects = objects;
        }
        let summary = result?;
        log::info!("loaded {} object(s), skipped {}", summary.loaded, summary.skipped);
        Ok(summary)
    }

    fn parse_objects(&mut self, objects: &[EncodedObject]) -> SceneResult<LoadSummary> {
        let mut summary = LoadSummary::default();
        for (index, object) in objects.iter().enumerate() {
            match self.parse_object(object) {
                Ok(_) => summary.loaded += 1,
                Err(SceneError::Decode(e)) if !e.is_per_object() => {
                    log::error!("object {index} ({:?}) could not be unwrapped: {e}", object.id);
                    return Err(e.into());
                }
                Err(SceneError::Decode(e @ DecodeError::UnrecognizedType(_))) => {
                    log::warn!("object {index} skipped: {e}");
                    summary.skipped += 1;
                }
                Err(e) => {
                    log::error!("object {index} ({:?}) failed: {e}", object.id);
                    summary.skipped += 1;
                }
            }
        }
        Ok(summary)
    }

    /// Create the viewer, then set, initialise and load `scene`.
    pub fn load_scene(&mut self, scene: SceneDescription, node: CanvasNode) -> SceneResult<LoadSummary> {
        self.create_viewer(node);
        self.set_scene(scene);
        self.init_scene()?;
        self.load_objects()
    }

    /// Number of objects assembled since the viewer was created.
    pub fn num_objects(&self) -> usize {
        self.object_count
    }

    pub fn legends(&self) -> &[LegendWidget] {
        &self.legends
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::ClearMask;
    use crate::renderer::RendererKind;

    fn node() -> CanvasNode {
        CanvasNode::new(640, 480)
    }

    #[test]
    fn test_update_canvas_before_create() {
        let mut reader = SceneReader::new(ReaderOptions::default());
        assert!(matches!(reader.update_canvas(node()), Err(SceneError::ViewerNotCreated)));
        assert!(matches!(reader.get_renderer(0), Err(SceneError::ViewerNotCreated)));
        assert!(reader.viewer().is_none());
    }

    #[test]
    fn test_create_viewer_idempotent() {
        let mut reader = SceneReader::new(ReaderOptions::default());
        reader.create_viewer(node());
        let first = reader.get_renderer(0).unwrap();
        reader.create_viewer(CanvasNode::new(10, 10));
        assert_eq!(reader.get_renderer(0).unwrap(), first);
        let window = reader.viewer().unwrap().window();
        assert_eq!(window.renderer_count(), 1);
        assert_eq!(window.size().x, 640.0);
        assert_eq!(window.renderer(first).unwrap().kind(), RendererKind::DepthPeeling);
    }

    #[test]
    fn test_get_renderer_identity() {
        let mut reader = SceneReader::new(ReaderOptions::default());
        reader.create_viewer(node());
        let a = reader.get_renderer(1).unwrap();
        let b = reader.get_renderer(1).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, reader.get_renderer(0).unwrap());
        let r = reader.renderer(1).unwrap();
        assert_eq!(r.camera().clear_mask(), ClearMask::DEPTH);
        assert!(!r.resets_scene_on_add());
    }

    #[test]
    fn test_delete_viewer_clears_registry() {
        let mut reader = SceneReader::new(ReaderOptions::default());
        reader.create_viewer(node());
        reader.get_renderer(2).unwrap();
        assert_eq!(reader.registry().len(), 2);
        reader.delete_viewer();
        assert!(reader.registry().is_empty());
        assert!(reader.viewer().is_none());
        assert!(reader.renderer(0).is_none());
    }

    #[test]
    fn test_update_canvas_resizes_window() {
        let mut reader = SceneReader::new(ReaderOptions::default());
        reader.create_viewer(node());
        reader.update_canvas(CanvasNode::new(1024, 768)).unwrap();
        assert_eq!(reader.viewer().unwrap().window().size().x, 1024.0);
        assert_eq!(reader.renderer(0).unwrap().size().y, 768.0);
    }

    #[test]
    fn test_init_scene_without_scene_is_noop() {
        let mut reader = SceneReader::new(ReaderOptions::default());
        reader.create_viewer(node());
        reader.init_scene().unwrap();
        assert_eq!(reader.registry().len(), 1);
    }

    #[test]
    fn test_metadata_for_missing_layer() {
        let mut reader = SceneReader::new(ReaderOptions::default());
        reader.create_viewer(node());
        reader.set_scene(SceneDescription::default());
        assert!(matches!(
            reader.apply_layer_metadata(3),
            Err(SceneError::InvalidSceneLayer(3))
        ));
    }

    #[test]
    fn test_parse_object_requires_viewer() {
        let mut reader = SceneReader::new(ReaderOptions::default());
        let result = reader.parse_object(&EncodedObject::new("AAAA"));
        assert!(matches!(result, Err(SceneError::ViewerNotCreated)));
        assert_eq!(reader.num_objects(), 0);
    }
}
