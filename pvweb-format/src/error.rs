use thiserror::Error;

/// Errors produced while unwrapping or decoding an encoded object.
///
/// Everything except `MalformedEncoding` is local to one record: a caller
/// walking several records can log it and move on to the next sibling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed base64 payload: unexpected {symbol:?} at offset {position}")]
    MalformedEncoding { position: usize, symbol: char },

    #[error("buffer underrun at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    BufferUnderrun {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("unrecognized encoded data type {:?}", char::from(*.0))]
    UnrecognizedType(u8),

    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u16, vertex_count: usize },
}

impl DecodeError {
    /// True for failures that only invalidate the current record.
    pub fn is_per_object(&self) -> bool {
        !matches!(self, DecodeError::MalformedEncoding { .. })
    }
}

pub type DecodeResult<T> = Result<T, DecodeError>;
