//! `'C'` records: scalar-bar legends.
//!
//! Unlike geometry records a colormap does not describe its own stop count;
//! the record's declared size field carries it and the caller passes it in.

use crate::cursor::Cursor;
use crate::error::DecodeResult;

/// One entry of the legend's lookup table. Color intensities stay raw 0-255.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub value: f32,
    pub rgb: [u8; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColorMapDescriptor {
    /// Anchor in normalized viewport coordinates, origin bottom-left.
    pub position: [f32; 2],
    /// Extent in normalized viewport units.
    pub size: [f32; 2],
    pub colors: Vec<ColorStop>,
    pub orientation: u8,
    pub label_count: u8,
    pub title: String,
}

pub fn decode_colormap(c: &mut Cursor<'_>, color_count: usize) -> DecodeResult<ColorMapDescriptor> {
    let position = c.read_f32_array::<2>()?;
    let size = c.read_f32_array::<2>()?;

    // Reading stop by stop keeps a bogus count from reserving memory up front.
    let mut colors = Vec::new();
    for _ in 0..color_count {
        let value = c.read_f32_le()?;
        let rgb = [c.read_u8()?, c.read_u8()?, c.read_u8()?];
        colors.push(ColorStop { value, rgb });
    }

    let orientation = c.read_u8()?;
    let label_count = c.read_u8()?;
    // One byte per character, Latin-1.
    let title = c.read_rest().iter().map(|&b| char::from(b)).collect();

    Ok(ColorMapDescriptor {
        position,
        size,
        colors,
        orientation,
        label_count,
        title,
    })
}
