//! Scene assembly for ParaView WebGL exports.
//!
//! A [`SceneReader`] owns a viewer with one renderer per scene layer. It
//! applies each layer's camera and viewport metadata from the scene
//! description, then decodes every exported object and hands it to the
//! [`ObjectAssembler`], which produces either an [`Actor`] for the object's
//! layer or a [`LegendWidget`] for a colormap.
//!
//! The state built here (renderers, cameras, geometry sources, uniform
//! blocks) is what a drawing backend consumes; nothing in this crate talks
//! to a GPU.

pub mod assembler;
pub mod camera;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod legend;
pub mod material;
pub mod metadata;
pub mod options;
pub mod reader;
pub mod renderer;
pub mod scene;
pub mod uniforms;
pub mod viewer;

pub use assembler::{Actor, Assembled, ObjectAssembler, ObjectStyle};
pub use camera::{Camera, ClearMask};
pub use error::{SceneError, SceneResult};
pub use geometry::{Attribute, GeometryData, VertexSource};
pub use handle::Handle;
pub use legend::{BasicLegendFactory, LegendFactory, LegendLayout, LegendWidget, LookupTable, LEGEND_HEIGHT};
pub use material::{
    BasicMaterial, BasicMaterialFactory, Material, MaterialFactory, MaterialKind, UniformValue, TRANSPARENT_BIN,
};
pub use options::ReaderOptions;
pub use reader::{LoadSummary, SceneReader};
pub use renderer::{Renderer, RendererKind};
pub use scene::{EncodedObject, LayerDescription, LookAt, SceneDescription};
pub use uniforms::{PerFrameUniforms, PerObjectUniforms};
pub use viewer::{CanvasNode, RenderWindow, RendererRegistry, Viewer};
