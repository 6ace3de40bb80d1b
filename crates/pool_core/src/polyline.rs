//! Encoded polyline codec at 1e-5 degree precision.
//!
//! Each coordinate is stored as a signed delta against the previous point,
//! zig-zag encoded and split into 5-bit groups. Every group is offset by 63
//! and all but the last carry the `0x20` continuation bit, so the encoded
//! form only ever contains printable ASCII in `63..=126`.

use std::fmt;

use crate::geo::Point;

const PRECISION: f64 = 1e5;
const CHAR_OFFSET: u8 = 63;
const CONTINUATION_BIT: i64 = 0x20;
const CHUNK_MASK: i64 = 0x1f;
/// Enough 5-bit groups to hold any delta inside the ±180 degree domain.
const MAX_SHIFT: u32 = 35;

/// Reasons an encoded polyline cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolylineError {
    Empty,
    /// Input ended in the middle of a value or after a lone latitude.
    Truncated { offset: usize },
    InvalidCharacter { offset: usize, byte: u8 },
    /// A single value used more continuation groups than a coordinate can need.
    Overflow { offset: usize },
}

impl fmt::Display for PolylineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolylineError::Empty => f.write_str("encoded polyline is empty"),
            PolylineError::Truncated { offset } => {
                write!(f, "encoded polyline truncated at byte {offset}")
            }
            PolylineError::InvalidCharacter { offset, byte } => {
                write!(f, "invalid polyline byte 0x{byte:02x} at offset {offset}")
            }
            PolylineError::Overflow { offset } => {
                write!(f, "polyline value overflows at byte {offset}")
            }
        }
    }
}

impl std::error::Error for PolylineError {}

/// Decode a polyline, treating any malformed input as "no geometry".
///
/// Callers that need to distinguish a broken polyline from an empty one
/// should use [`try_decode`].
pub fn decode(encoded: &str) -> Vec<Point> {
    match try_decode(encoded) {
        Ok(points) => points,
        Err(err) => {
            log::debug!("discarding undecodable polyline: {err}");
            Vec::new()
        }
    }
}

/// Decode a polyline into points in their original order.
pub fn try_decode(encoded: &str) -> Result<Vec<Point>, PolylineError> {
    let bytes = encoded.as_bytes();
    if bytes.is_empty() {
        return Err(PolylineError::Empty);
    }

    let mut points = Vec::with_capacity(bytes.len() / 4);
    let mut cursor = 0usize;
    let mut lat = 0i64;
    let mut lng = 0i64;

    while cursor < bytes.len() {
        lat += read_value(bytes, &mut cursor)?;
        if cursor >= bytes.len() {
            return Err(PolylineError::Truncated { offset: cursor });
        }
        lng += read_value(bytes, &mut cursor)?;
        points.push(Point::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    Ok(points)
}

fn read_value(bytes: &[u8], cursor: &mut usize) -> Result<i64, PolylineError> {
    let mut result = 0i64;
    let mut shift = 0u32;

    loop {
        let offset = *cursor;
        let byte = *bytes
            .get(offset)
            .ok_or(PolylineError::Truncated { offset })?;
        if !(CHAR_OFFSET..=126).contains(&byte) {
            return Err(PolylineError::InvalidCharacter { offset, byte });
        }
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow { offset });
        }
        *cursor += 1;

        let chunk = i64::from(byte - CHAR_OFFSET);
        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    Ok(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

/// Encode points at 1e-5 precision. Inverse of [`decode`] up to rounding.
pub fn encode(points: &[Point]) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    let mut prev_lat = 0i64;
    let mut prev_lng = 0i64;

    for point in points {
        let lat = (point.lat * PRECISION).round() as i64;
        let lng = (point.lng * PRECISION).round() as i64;
        write_value(lat - prev_lat, &mut out);
        write_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

fn write_value(delta: i64, out: &mut String) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 };
    while value >= CONTINUATION_BIT {
        out.push(char::from(
            (((value & CHUNK_MASK) | CONTINUATION_BIT) as u8) + CHAR_OFFSET,
        ));
        value >>= 5;
    }
    out.push(char::from(value as u8 + CHAR_OFFSET));
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn assert_close(p: Point, lat: f64, lng: f64) {
        assert!((p.lat - lat).abs() < 1e-9, "lat {} != {}", p.lat, lat);
        assert!((p.lng - lng).abs() < 1e-9, "lng {} != {}", p.lng, lng);
    }

    #[test]
    fn decodes_reference_polyline() {
        let points = decode(REFERENCE);
        assert_eq!(points.len(), 3);
        assert_close(points[0], 38.5, -120.2);
        assert_close(points[1], 40.7, -120.95);
        assert_close(points[2], 43.252, -126.453);
    }

    #[test]
    fn encodes_reference_polyline() {
        let points = [
            Point::new(38.5, -120.2),
            Point::new(40.7, -120.95),
            Point::new(43.252, -126.453),
        ];
        assert_eq!(encode(&points), REFERENCE);
    }

    #[test]
    fn empty_input_is_an_error_and_decodes_to_nothing() {
        assert_eq!(try_decode(""), Err(PolylineError::Empty));
        assert!(decode("").is_empty());
    }

    #[test]
    fn truncated_continuation_is_rejected() {
        // '_' carries the continuation bit and nothing follows it.
        assert!(matches!(
            try_decode("_p~iF~ps|U_"),
            Err(PolylineError::Truncated { .. })
        ));
        assert!(decode("_p~iF~ps|U_").is_empty());
    }

    #[test]
    fn lone_latitude_is_truncated() {
        assert!(matches!(
            try_decode("_p~iF"),
            Err(PolylineError::Truncated { offset: 5 })
        ));
    }

    #[test]
    fn characters_below_offset_are_rejected() {
        assert_eq!(
            try_decode("_p~iF ps|U"),
            Err(PolylineError::InvalidCharacter {
                offset: 5,
                byte: b' '
            })
        );
    }

    #[test]
    fn endless_continuation_overflows() {
        let encoded = "~".repeat(16);
        assert!(matches!(
            try_decode(&encoded),
            Err(PolylineError::Overflow { .. })
        ));
    }

    #[test]
    fn negative_and_zero_deltas_survive_encoding() {
        let points = [
            Point::new(-33.86785, 151.20732),
            Point::new(-33.86785, 151.20732),
            Point::new(-33.9, 151.1),
        ];
        let decoded = decode(&encode(&points));
        assert_eq!(decoded.len(), 3);
        assert_close(decoded[1], -33.86785, 151.20732);
        assert_close(decoded[2], -33.9, 151.1);
    }
}
