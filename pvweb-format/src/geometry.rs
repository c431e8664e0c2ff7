//! Point, line and mesh records.
//!
//! All three share one layout: point count, positions, (normals for meshes),
//! padded RGBA colors, an index block and a 4x4 transform. Decoders start
//! with the cursor just past the type tag.

use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};

/// Bytes per wire color entry: r, g, b and one pad byte.
const COLOR_STRIDE: usize = 4;

/// Connectivity of a decoded geometry buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Points,
    Lines,
    Triangles,
}

/// Vertex and connectivity data for one decoded object.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryBuffer {
    pub positions: Vec<[f32; 3]>,
    /// Present for meshes only, parallel to `positions`.
    pub normals: Option<Vec<[f32; 3]>>,
    /// Normalized to [0, 1], parallel to `positions`.
    pub colors: Vec<[f32; 3]>,
    /// Every value is `< positions.len()`.
    pub indices: Vec<u16>,
    pub primitive: PrimitiveKind,
}

impl GeometryBuffer {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

/// The 16 transform floats exactly as they appear on the wire.
///
/// Read as a column-major array this is the transpose of the matrix the
/// object should be drawn with; see [`WireMatrix::transposed`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WireMatrix(pub [f32; 16]);

impl WireMatrix {
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    pub fn as_array(&self) -> &[f32; 16] {
        &self.0
    }

    /// Column-major array of the matrix to apply to the object.
    pub fn transposed(&self) -> [f32; 16] {
        let mut out = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = self.0[row * 4 + col];
            }
        }
        out
    }
}

impl Default for WireMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A decoded point/line/mesh record.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedGeometry {
    pub geometry: GeometryBuffer,
    pub matrix: WireMatrix,
}

fn read_count(c: &mut Cursor<'_>) -> DecodeResult<usize> {
    Ok(c.read_u32_le()? as usize)
}

/// `n` padded color entries, normalized. The pad byte is skipped.
fn read_colors(c: &mut Cursor<'_>, n: usize) -> DecodeResult<Vec<[f32; 3]>> {
    let bytes = c.read_blocks(n, COLOR_STRIDE)?;
    Ok(bytes
        .chunks_exact(COLOR_STRIDE)
        .map(|rgba| {
            [
                f32::from(rgba[0]) / 255.0,
                f32::from(rgba[1]) / 255.0,
                f32::from(rgba[2]) / 255.0,
            ]
        })
        .collect())
}

fn read_indices(c: &mut Cursor<'_>) -> DecodeResult<Vec<u16>> {
    let m = read_count(c)?;
    c.read_u16_array(m)
}

fn read_matrix(c: &mut Cursor<'_>) -> DecodeResult<WireMatrix> {
    c.read_f32_array::<16>().map(WireMatrix)
}

fn check_indices(indices: &[u16], vertex_count: usize) -> DecodeResult<()> {
    match indices.iter().find(|&&i| usize::from(i) >= vertex_count) {
        Some(&index) => Err(DecodeError::IndexOutOfRange { index, vertex_count }),
        None => Ok(()),
    }
}

/// `'L'` records: positions, colors, line-segment indices, matrix.
pub fn decode_lines(c: &mut Cursor<'_>) -> DecodeResult<DecodedGeometry> {
    let n = read_count(c)?;
    let positions = c.read_float_triples(n)?;
    let colors = read_colors(c, n)?;
    let indices = read_indices(c)?;
    let matrix = read_matrix(c)?;
    check_indices(&indices, n)?;

    Ok(DecodedGeometry {
        geometry: GeometryBuffer {
            positions,
            normals: None,
            colors,
            indices,
            primitive: PrimitiveKind::Lines,
        },
        matrix,
    })
}

/// `'M'` records: positions, normals, colors, triangle indices, matrix.
///
/// Texture coordinates may trail the matrix; they are left unread.
pub fn decode_mesh(c: &mut Cursor<'_>) -> DecodeResult<DecodedGeometry> {
    let n = read_count(c)?;
    let positions = c.read_float_triples(n)?;
    let normals = c.read_float_triples(n)?;
    let colors = read_colors(c, n)?;
    let indices = read_indices(c)?;
    let matrix = read_matrix(c)?;
    check_indices(&indices, n)?;

    Ok(DecodedGeometry {
        geometry: GeometryBuffer {
            positions,
            normals: Some(normals),
            colors,
            indices,
            primitive: PrimitiveKind::Triangles,
        },
        matrix,
    })
}

/// `'P'` records. The wire index block is consumed but ignored: point clouds
/// always get 1:1 connectivity.
pub fn decode_points(c: &mut Cursor<'_>) -> DecodeResult<DecodedGeometry> {
    let n = read_count(c)?;
    let positions = c.read_float_triples(n)?;
    let colors = read_colors(c, n)?;
    let _wire_indices = read_indices(c)?;
    let matrix = read_matrix(c)?;

    if n > usize::from(u16::MAX) + 1 {
        log::warn!("point cloud has {n} points; 16-bit indices wrap");
    }
    let indices = (0..n).map(|i| i as u16).collect();

    Ok(DecodedGeometry {
        geometry: GeometryBuffer {
            positions,
            normals: None,
            colors,
            indices,
            primitive: PrimitiveKind::Points,
        },
        matrix,
    })
}
