//! Forward-only little-endian reader over a borrowed byte slice.

use crate::error::{DecodeError, DecodeResult};

/// Read position over one decoded object's bytes.
///
/// Every read either consumes exactly the bytes it reports or fails with
/// `BufferUnderrun` and leaves the position untouched. There is no seek.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn underrun(&self, needed: usize) -> DecodeError {
        DecodeError::BufferUnderrun {
            offset: self.pos,
            needed,
            remaining: self.remaining(),
        }
    }

    pub fn read_bytes(&mut self, n: usize) -> DecodeResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(self.underrun(n));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Byte count for `count` items of `width` bytes, as an underrun when it
    /// cannot even be represented.
    fn span(&self, count: usize, width: usize) -> DecodeResult<usize> {
        count
            .checked_mul(width)
            .ok_or_else(|| self.underrun(usize::MAX))
    }

    /// `count` fixed-width blocks as one contiguous slice.
    pub fn read_blocks(&mut self, count: usize, width: usize) -> DecodeResult<&'a [u8]> {
        let len = self.span(count, width)?;
        self.read_bytes(len)
    }

    fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u32_le(&mut self) -> DecodeResult<u32> {
        self.read_array::<4>().map(u32::from_le_bytes)
    }

    pub fn read_f32_le(&mut self) -> DecodeResult<f32> {
        self.read_array::<4>().map(f32::from_le_bytes)
    }

    /// `N` consecutive little-endian floats.
    pub fn read_f32_array<const N: usize>(&mut self) -> DecodeResult<[f32; N]> {
        let bytes = self.read_bytes(N * 4)?;
        let mut out = [0.0f32; N];
        for (value, chunk) in out.iter_mut().zip(bytes.chunks_exact(4)) {
            *value = f32_from_le(chunk);
        }
        Ok(out)
    }

    /// `n` (x, y, z) float triples, `n * 12` bytes.
    pub fn read_float_triples(&mut self, n: usize) -> DecodeResult<Vec<[f32; 3]>> {
        let bytes = self.read_blocks(n, 12)?;
        Ok(bytes
            .chunks_exact(12)
            .map(|t| [f32_from_le(&t[0..4]), f32_from_le(&t[4..8]), f32_from_le(&t[8..12])])
            .collect())
    }

    /// `m` little-endian u16 values, `m * 2` bytes.
    pub fn read_u16_array(&mut self, m: usize) -> DecodeResult<Vec<u16>> {
        let bytes = self.read_blocks(m, 2)?;
        Ok(bytes
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect())
    }

    /// Everything left in the buffer. Never fails; may be empty.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = &self.data[self.pos..];
        self.pos = self.data.len();
        rest
    }
}

/// IEEE-754 binary32 from exactly four little-endian bytes.
pub(crate) fn f32_from_le(bytes: &[u8]) -> f32 {
    f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
