//! Decoder for the object records produced by ParaView's WebGL exporter.
//!
//! Each exported object arrives as base64 text wrapping one binary record:
//! a declared size, a one-character type tag and a tag-specific payload of
//! little-endian integers, floats and packed color bytes. This crate turns
//! that text into typed buffers and knows nothing about rendering.
//!
//! ```text
//! text ──base64──▶ bytes ──Cursor──▶ header ──tag──▶ Lines | Mesh | Points | ColorMap
//! ```

pub mod base64;
pub mod colormap;
pub mod cursor;
#[cfg(any(test, feature = "encode"))]
pub mod encode;
pub mod error;
pub mod geometry;
pub mod record;

pub use base64::Base64Mode;
pub use colormap::{ColorMapDescriptor, ColorStop};
pub use cursor::Cursor;
pub use error::{DecodeError, DecodeResult};
pub use geometry::{DecodedGeometry, GeometryBuffer, PrimitiveKind, WireMatrix};
pub use record::{decode_record, records, Record, RecordHeader, RecordKind, Records};

/// Unwrap base64 `text` and decode the single record it carries.
pub fn decode_payload(text: &str, mode: Base64Mode) -> DecodeResult<Record> {
    let bytes = mode.decode(text)?;
    decode_record(&bytes)
}
