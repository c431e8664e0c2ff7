//! GPU-ready geometry containers.
//!
//! A [`GeometryData`] holds named vertex sources and a single indexed
//! primitive. Meshes carry interleaved position and normal data in one
//! source; points and lines carry bare positions. Colors always live in a
//! separate source.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use pvweb_format::{GeometryBuffer, PrimitiveKind};

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PositionVertex {
    pub position: [f32; 3],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PositionNormalVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub color: [f32; 3],
}

/// Vertex attribute semantics a shader binds against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    Position,
    Normal,
    Color,
}

/// One vertex buffer with its attribute layout.
#[derive(Clone, Debug, PartialEq)]
pub enum VertexSource {
    Positions(Vec<PositionVertex>),
    PositionsNormals(Vec<PositionNormalVertex>),
    Colors(Vec<ColorVertex>),
}

impl VertexSource {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Positions(_) => "position",
            Self::PositionsNormals(_) => "positionNormal",
            Self::Colors(_) => "color",
        }
    }

    pub fn attributes(&self) -> &'static [Attribute] {
        match self {
            Self::Positions(_) => &[Attribute::Position],
            Self::PositionsNormals(_) => &[Attribute::Position, Attribute::Normal],
            Self::Colors(_) => &[Attribute::Color],
        }
    }

    /// Bytes between consecutive vertices.
    pub fn stride(&self) -> usize {
        match self {
            Self::Positions(_) => std::mem::size_of::<PositionVertex>(),
            Self::PositionsNormals(_) => std::mem::size_of::<PositionNormalVertex>(),
            Self::Colors(_) => std::mem::size_of::<ColorVertex>(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Positions(v) => v.len(),
            Self::PositionsNormals(v) => v.len(),
            Self::Colors(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Positions(v) => bytemuck::cast_slice(v),
            Self::PositionsNormals(v) => bytemuck::cast_slice(v),
            Self::Colors(v) => bytemuck::cast_slice(v),
        }
    }
}

/// Indexed connectivity over the vertex sources.
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub indices: Vec<u16>,
}

impl Primitive {
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeometryData {
    name: String,
    sources: Vec<VertexSource>,
    primitive: Primitive,
}

impl GeometryData {
    /// Wrap a decoded buffer. Normals are interleaved with positions when present.
    pub fn from_buffer(name: impl Into<String>, buffer: GeometryBuffer) -> Self {
        let GeometryBuffer {
            positions,
            normals,
            colors,
            indices,
            primitive,
        } = buffer;

        let vertices = match normals {
            Some(normals) => VertexSource::PositionsNormals(
                positions
                    .iter()
                    .zip(normals)
                    .map(|(&position, normal)| PositionNormalVertex { position, normal })
                    .collect(),
            ),
            None => VertexSource::Positions(
                positions
                    .into_iter()
                    .map(|position| PositionVertex { position })
                    .collect(),
            ),
        };
        let colors = VertexSource::Colors(colors.into_iter().map(|color| ColorVertex { color }).collect());

        Self {
            name: name.into(),
            sources: vec![vertices, colors],
            primitive: Primitive {
                kind: primitive,
                indices,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sources(&self) -> &[VertexSource] {
        &self.sources
    }

    /// The source providing `attribute`, if any.
    pub fn source(&self, attribute: Attribute) -> Option<&VertexSource> {
        self.sources.iter().find(|s| s.attributes().contains(&attribute))
    }

    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    pub fn vertex_count(&self) -> usize {
        self.sources.first().map_or(0, VertexSource::len)
    }

    /// Axis-aligned bounds of the untransformed positions.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let positions: Box<dyn Iterator<Item = [f32; 3]> + '_> = match self.source(Attribute::Position)? {
            VertexSource::Positions(v) => Box::new(v.iter().map(|p| p.position)),
            VertexSource::PositionsNormals(v) => Box::new(v.iter().map(|p| p.position)),
            VertexSource::Colors(_) => return None,
        };
        positions.map(Vec3::from_array).fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
        })
    }
}
