//! Synthetic record writer.
//!
//! Produces byte-exact records in the exporter's layout so tests and tools
//! can build scenes without a ParaView server. Only the fields the format
//! carries are written; colors are quantized to bytes.

use crate::base64;
use crate::colormap::ColorMapDescriptor;
use crate::geometry::{GeometryBuffer, WireMatrix};
use crate::record::{RecordKind, HEADER_SIZE};

fn push_f32s(buf: &mut Vec<u8>, values: &[f32]) {
    for v in values {
        buf.extend_from_slice(&v.to_le_bytes());
    }
}

fn push_triples(buf: &mut Vec<u8>, triples: &[[f32; 3]]) {
    for t in triples {
        push_f32s(buf, t);
    }
}

fn quantize(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Prefix `payload` with a size field and `tag`.
pub fn frame(tag: u8, declared_size: u32, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(payload.len() + HEADER_SIZE);
    buf.extend_from_slice(&declared_size.to_le_bytes());
    buf.push(tag);
    buf.extend_from_slice(payload);
    buf
}

/// Frame a geometry-style payload; the size counts tag plus payload.
pub fn frame_sized(tag: u8, payload: &[u8]) -> Vec<u8> {
    frame(tag, payload.len() as u32 + 1, payload)
}

/// Payload of an `'L'`, `'M'` or `'P'` record, without size or tag.
///
/// `Mesh` writes zero normals when the buffer has none; `tcoords` are
/// appended after the matrix for meshes and ignored otherwise.
pub fn geometry_payload(
    kind: RecordKind,
    geometry: &GeometryBuffer,
    matrix: &WireMatrix,
    tcoords: &[[f32; 2]],
) -> Vec<u8> {
    let n = geometry.positions.len();
    let mut buf = Vec::new();
    buf.extend_from_slice(&(n as u32).to_le_bytes());
    push_triples(&mut buf, &geometry.positions);

    if kind == RecordKind::Mesh {
        match &geometry.normals {
            Some(normals) => push_triples(&mut buf, normals),
            None => push_triples(&mut buf, &vec![[0.0; 3]; n]),
        }
    }

    for i in 0..n {
        let [r, g, b] = geometry.colors.get(i).copied().unwrap_or([1.0; 3]);
        buf.extend_from_slice(&[quantize(r), quantize(g), quantize(b), 0xff]);
    }

    buf.extend_from_slice(&(geometry.indices.len() as u32).to_le_bytes());
    for i in &geometry.indices {
        buf.extend_from_slice(&i.to_le_bytes());
    }

    push_f32s(&mut buf, matrix.as_array());

    if kind == RecordKind::Mesh {
        for uv in tcoords {
            push_f32s(&mut buf, uv);
        }
    }
    buf
}

/// A complete geometry record.
pub fn encode_geometry(kind: RecordKind, geometry: &GeometryBuffer, matrix: &WireMatrix) -> Vec<u8> {
    frame_sized(kind.tag(), &geometry_payload(kind, geometry, matrix, &[]))
}

/// A complete `'C'` record; the size field carries the stop count.
pub fn encode_colormap(colormap: &ColorMapDescriptor) -> Vec<u8> {
    let mut payload = Vec::new();
    push_f32s(&mut payload, &colormap.position);
    push_f32s(&mut payload, &colormap.size);
    for stop in &colormap.colors {
        payload.extend_from_slice(&stop.value.to_le_bytes());
        payload.extend_from_slice(&stop.rgb);
    }
    payload.push(colormap.orientation);
    payload.push(colormap.label_count);
    payload.extend(colormap.title.chars().map(|c| c as u32 as u8));
    frame(RecordKind::ColorMap.tag(), colormap.colors.len() as u32, &payload)
}

/// Base64 text for a record, as found in a scene description's `data` field.
pub fn to_base64(record: &[u8]) -> String {
    base64::encode(record)
}
