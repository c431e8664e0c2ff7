//! Base64 unwrapping of the exporter's text payloads.
//!
//! Two decoders share one alphabet. `decode` behaves like the browser `atob`
//! the exporter's payloads were written for; `decode_lenient` mirrors the
//! older reverse-table reader, which skips anything it does not recognise.

use crate::error::{DecodeError, DecodeResult};

/// Which unwrapping rules to apply to a payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Base64Mode {
    #[default]
    Strict,
    Lenient,
}

impl Base64Mode {
    pub fn decode(self, text: &str) -> DecodeResult<Vec<u8>> {
        match self {
            Self::Strict => decode(text),
            Self::Lenient => Ok(decode_lenient(text)),
        }
    }
}

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn symbol_value(c: char) -> Option<u8> {
    match c {
        'A'..='Z' => Some(c as u8 - b'A'),
        'a'..='z' => Some(c as u8 - b'a' + 26),
        '0'..='9' => Some(c as u8 - b'0' + 52),
        '+' => Some(62),
        '/' => Some(63),
        _ => None,
    }
}

/// Pack up to four 6-bit symbols into bytes. Two symbols yield one byte,
/// three yield two, four yield three.
fn push_quantum(out: &mut Vec<u8>, q: &[u8]) {
    out.push((q[0] << 2) | (q[1] >> 4));
    if q.len() > 2 {
        out.push((q[1] << 4) | (q[2] >> 2));
    }
    if q.len() > 3 {
        out.push((q[2] << 6) | q[3]);
    }
}

/// Strict decode: ASCII whitespace is ignored, up to two `=` may pad a
/// complete final quantum, and any other stray symbol is an error.
pub fn decode(text: &str) -> DecodeResult<Vec<u8>> {
    let mut symbols: Vec<(usize, char)> = text
        .char_indices()
        .filter(|(_, c)| !c.is_ascii_whitespace())
        .collect();

    if symbols.len() % 4 == 0 {
        for _ in 0..2 {
            if symbols.last().is_some_and(|&(_, c)| c == '=') {
                symbols.pop();
            }
        }
    }
    if symbols.len() % 4 == 1 {
        let (position, symbol) = symbols[symbols.len() - 1];
        return Err(DecodeError::MalformedEncoding { position, symbol });
    }

    let mut values = Vec::with_capacity(symbols.len());
    for &(position, symbol) in &symbols {
        let v = symbol_value(symbol).ok_or(DecodeError::MalformedEncoding { position, symbol })?;
        values.push(v);
    }

    let mut out = Vec::with_capacity(values.len() / 4 * 3 + 2);
    for quantum in values.chunks(4) {
        push_quantum(&mut out, quantum);
    }
    Ok(out)
}

/// Lenient decode: unknown symbols (padding, whitespace, garbage) are
/// skipped and decoding stops at the first incomplete quantum. `A` is the
/// zero symbol and is never skipped.
pub fn decode_lenient(text: &str) -> Vec<u8> {
    let mut symbols = text.chars().filter_map(symbol_value);
    let mut out = Vec::with_capacity(text.len() / 4 * 3);

    loop {
        let (Some(s0), Some(s1)) = (symbols.next(), symbols.next()) else {
            break;
        };
        match (symbols.next(), symbols.next()) {
            (Some(s2), Some(s3)) => push_quantum(&mut out, &[s0, s1, s2, s3]),
            (Some(s2), None) => {
                push_quantum(&mut out, &[s0, s1, s2]);
                break;
            }
            _ => {
                push_quantum(&mut out, &[s0, s1]);
                break;
            }
        }
    }
    out
}

/// Standard padded base64, the inverse of `decode`.
#[cfg(any(test, feature = "encode"))]
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(3) {
        let b = [chunk[0], *chunk.get(1).unwrap_or(&0), *chunk.get(2).unwrap_or(&0)];
        let n = (u32::from(b[0]) << 16) | (u32::from(b[1]) << 8) | u32::from(b[2]);
        for i in 0..4 {
            if i <= chunk.len() {
                out.push(ALPHABET[((n >> (18 - 6 * i)) & 0x3f) as usize] as char);
            } else {
                out.push('=');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_vectors() {
        assert_eq!(decode("").unwrap(), b"");
        assert_eq!(decode("Zg==").unwrap(), b"f");
        assert_eq!(decode("Zm8=").unwrap(), b"fo");
        assert_eq!(decode("Zm9v").unwrap(), b"foo");
        assert_eq!(decode("Zm9vYmFy").unwrap(), b"foobar");
    }

    #[test]
    fn test_decode_unpadded_tail() {
        assert_eq!(decode("Zg").unwrap(), b"f");
        assert_eq!(decode("Zm8").unwrap(), b"fo");
    }

    #[test]
    fn test_decode_ignores_whitespace() {
        assert_eq!(decode(" Zm9v\nYmFy\r\n").unwrap(), b"foobar");
    }

    #[test]
    fn test_decode_rejects_foreign_symbol() {
        assert_eq!(
            decode("Zm9v*mFy"),
            Err(DecodeError::MalformedEncoding { position: 4, symbol: '*' })
        );
    }

    #[test]
    fn test_decode_rejects_dangling_symbol() {
        assert!(matches!(
            decode("Zm9vY"),
            Err(DecodeError::MalformedEncoding { symbol: 'Y', .. })
        ));
    }

    #[test]
    fn test_decode_rejects_inner_padding() {
        assert!(decode("Zg==Zg==").is_err());
    }

    #[test]
    fn test_lenient_skips_unknown_symbols() {
        // `*` is dropped, leaving "Zm9vmFy": one full quantum plus three symbols.
        assert_eq!(decode_lenient("Zm9v*mFy"), b"foo\x98\x5c");
        assert_eq!(decode_lenient("Zm9v!Ym!Fy"), b"foobar");
        assert_eq!(decode_lenient("Zg=="), b"f");
    }

    #[test]
    fn test_lenient_keeps_zero_symbol() {
        assert_eq!(decode_lenient("AAAA"), vec![0, 0, 0]);
        assert_eq!(decode_lenient("AAAB"), vec![0, 0, 1]);
    }

    #[test]
    fn test_lenient_stops_at_incomplete_quantum() {
        assert_eq!(decode_lenient("Zm9vY"), b"foo");
        assert_eq!(decode_lenient("Zm9vYm"), b"foob");
        assert_eq!(decode_lenient("Zm9vYmE"), b"fooba");
    }

    #[test]
    fn test_encode_matches_decode() {
        let inputs: [&[u8]; 5] = [b"", b"f", b"fo", b"foo", b"\x00\xff\x10\x80"];
        for input in inputs {
            let text = encode(input);
            assert_eq!(decode(&text).unwrap(), input);
            assert_eq!(decode_lenient(&text), input);
        }
        assert_eq!(encode(b"foobar"), "Zm9vYmFy");
        assert_eq!(encode(b"fo"), "Zm8=");
    }

    #[test]
    fn test_mode_dispatch() {
        assert!(Base64Mode::Strict.decode("Zm9v*").is_err());
        assert_eq!(Base64Mode::Lenient.decode("Zm9v*").unwrap(), b"foo");
    }
}
