//! Record framing and dispatch.
//!
//! ```text
//! record := u32 declaredSize, u8 typeTag, payload(typeTag)
//! ```
//!
//! For geometry (and unknown) tags `declaredSize` counts the tag plus the
//! payload. For colormaps it is the number of color stops, and the payload
//! runs to the end of the buffer.

use crate::colormap::{decode_colormap, ColorMapDescriptor};
use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};
use crate::geometry::{decode_lines, decode_mesh, decode_points, DecodedGeometry};

/// Size field plus type tag.
pub const HEADER_SIZE: usize = 5;

/// The closed set of record kinds, keyed by the one-byte tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Lines,
    Mesh,
    Points,
    ColorMap,
    Unrecognized(u8),
}

impl RecordKind {
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            b'L' => Self::Lines,
            b'M' => Self::Mesh,
            b'P' => Self::Points,
            b'C' => Self::ColorMap,
            other => Self::Unrecognized(other),
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            Self::Lines => b'L',
            Self::Mesh => b'M',
            Self::Points => b'P',
            Self::ColorMap => b'C',
            Self::Unrecognized(tag) => tag,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordHeader {
    pub declared_size: u32,
    pub kind: RecordKind,
}

/// A fully decoded record.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    Lines(DecodedGeometry),
    Mesh(DecodedGeometry),
    Points(DecodedGeometry),
    ColorMap(ColorMapDescriptor),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Lines(_) => RecordKind::Lines,
            Self::Mesh(_) => RecordKind::Mesh,
            Self::Points(_) => RecordKind::Points,
            Self::ColorMap(_) => RecordKind::ColorMap,
        }
    }

    pub fn geometry(&self) -> Option<&DecodedGeometry> {
        match self {
            Self::Lines(g) | Self::Mesh(g) | Self::Points(g) => Some(g),
            Self::ColorMap(_) => None,
        }
    }
}

pub fn read_header(c: &mut Cursor<'_>) -> DecodeResult<RecordHeader> {
    let declared_size = c.read_u32_le()?;
    let kind = RecordKind::from_tag(c.read_u8()?);
    Ok(RecordHeader { declared_size, kind })
}

/// Decode the payload following `header`. The cursor must sit just past the tag.
pub fn decode_body(c: &mut Cursor<'_>, header: RecordHeader) -> DecodeResult<Record> {
    let record = match header.kind {
        RecordKind::Lines => Record::Lines(decode_lines(c)?),
        RecordKind::Mesh => Record::Mesh(decode_mesh(c)?),
        RecordKind::Points => Record::Points(decode_points(c)?),
        RecordKind::ColorMap => Record::ColorMap(decode_colormap(c, header.declared_size as usize)?),
        RecordKind::Unrecognized(tag) => return Err(DecodeError::UnrecognizedType(tag)),
    };
    log::debug!(
        "decoded {:?} record ({} bytes consumed)",
        header.kind,
        c.position()
    );
    Ok(record)
}

/// Decode a buffer holding exactly one record. The declared size is not used
/// to bound geometry reads; only the end of the buffer is.
pub fn decode_record(bytes: &[u8]) -> DecodeResult<Record> {
    let mut c = Cursor::new(bytes);
    let header = read_header(&mut c)?;
    decode_body(&mut c, header)
}

/// Walk a buffer of concatenated records.
///
/// Each record is decoded inside its own declared extent, so a failure in
/// one (unknown tag, bad index, short payload) does not shift the next.
/// Iteration ends at the end of the buffer, after a colormap, or when a
/// record's extent overruns the buffer.
pub fn records(bytes: &[u8]) -> Records<'_> {
    Records {
        cursor: Cursor::new(bytes),
        done: false,
    }
}

pub struct Records<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl<'a> Records<'a> {
    fn next_record(&mut self) -> DecodeResult<Record> {
        let header = match read_header(&mut self.cursor) {
            Ok(header) => header,
            Err(e) => {
                self.done = true;
                return Err(e);
            }
        };

        let body = if header.kind == RecordKind::ColorMap {
            self.done = true;
            self.cursor.read_rest()
        } else {
            let len = (header.declared_size as usize).saturating_sub(1);
            match self.cursor.read_bytes(len) {
                Ok(body) => body,
                Err(e) => {
                    self.done = true;
                    return Err(e);
                }
            }
        };

        decode_body(&mut Cursor::new(body), header)
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = DecodeResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cursor.is_empty() {
            return None;
        }
        Some(self.next_record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for tag in [b'L', b'M', b'P', b'C', b'Z', 0] {
            assert_eq!(RecordKind::from_tag(tag).tag(), tag);
        }
        assert_eq!(RecordKind::from_tag(b'Z'), RecordKind::Unrecognized(b'Z'));
    }

    #[test]
    fn test_unrecognized_tag() {
        let data = [9, 0, 0, 0, b'Z', 1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(decode_record(&data), Err(DecodeError::UnrecognizedType(b'Z')));
    }

    #[test]
    fn test_header_underrun() {
        assert!(matches!(
            decode_record(&[1, 0, 0]),
            Err(DecodeError::BufferUnderrun { .. })
        ));
    }

    #[test]
    fn test_stream_stops_when_extent_overruns() {
        // declares 100 bytes but only carries 3
        let data = [100, 0, 0, 0, b'L', 1, 2, 3];
        let mut it = records(&data);
        assert!(matches!(it.next(), Some(Err(DecodeError::BufferUnderrun { .. }))));
        assert!(it.next().is_none());
    }

    #[test]
    fn test_header_precedes_payload() {
        let data = crate::encode::frame(b'Z', 5, &[7; 4]);
        assert_eq!(data.len(), HEADER_SIZE + 4);
        let header = read_header(&mut Cursor::new(&data)).unwrap();
        assert_eq!(header.declared_size, 5);
        assert_eq!(header.kind, RecordKind::Unrecognized(b'Z'));
    }

    #[test]
    fn test_empty_stream() {
        assert_eq!(records(&[]).count(), 0);
    }
}
