//! Fixed-width field encoders for the GPS tags.
//!
//! Every byte-order and layout assumption about GPS values lives here:
//! rationals, three-rational coordinates and timestamps, hemisphere
//! reference codes and the `YYYY:MM:DD` datestamp. Nothing in this module
//! touches a file; callers copy the returned arrays over located entries.

use chrono::{DateTime, Timelike, Utc};

/// Width of a single RATIONAL value (numerator + denominator).
pub const RATIONAL_LEN: usize = 8;
/// Width of a degrees/minutes/seconds coordinate or an h/m/s timestamp.
pub const TRIPLE_LEN: usize = 3 * RATIONAL_LEN;
/// Width of a reference code (`"N"`, `"S"`, `"E"`, `"W"`) plus its NUL.
pub const REF_LEN: usize = 2;
/// Width of a datestamp field (`YYYY:MM:DD` plus NUL).
pub const DATE_LEN: usize = 11;
/// Number of characters a formatted datestamp occupies.
pub const DATE_TEXT_LEN: usize = 10;

/// Denominator used for randomized seconds (tenths of a second).
pub const SECONDS_DENOMINATOR: u32 = 10;

const DATESTAMP_FMT: &str = "%Y:%m:%d";

/// Host value to big-endian. Applying it twice yields the original value.
#[inline]
pub const fn to_big_endian(val: u32) -> u32 {
    val.to_be()
}

/// Big-endian to host value. Inverse of [`to_big_endian`].
#[inline]
pub const fn from_big_endian(val: u32) -> u32 {
    u32::from_be(val)
}

/// Byte order declared by a TIFF header (`MM` or `II`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// `MM`, Motorola, big-endian.
    Big,
    /// `II`, Intel, little-endian.
    Little,
}

impl ByteOrder {
    /// Detect the byte order from the first two bytes of a TIFF header.
    pub fn from_mark(mark: &[u8]) -> Option<Self> {
        match mark {
            b"MM" => Some(Self::Big),
            b"II" => Some(Self::Little),
            _ => None,
        }
    }

    pub fn read_u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::Big => u16::from_be_bytes(bytes),
            Self::Little => u16::from_le_bytes(bytes),
        }
    }

    pub fn read_u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::Big => from_big_endian(u32::from_ne_bytes(bytes)),
            Self::Little => u32::from_le_bytes(bytes),
        }
    }

    pub fn write_u16(self, val: u16) -> [u8; 2] {
        match self {
            Self::Big => val.to_be_bytes(),
            Self::Little => val.to_le_bytes(),
        }
    }

    pub fn write_u32(self, val: u32) -> [u8; 4] {
        match self {
            Self::Big => to_big_endian(val).to_ne_bytes(),
            Self::Little => val.to_le_bytes(),
        }
    }
}

/// An unsigned EXIF RATIONAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self { numerator, denominator }
    }

    /// A whole value, `(value, 1)`.
    pub const fn whole(value: u32) -> Self {
        Self::new(value, 1)
    }
}

pub fn encode_rational(value: Rational, order: ByteOrder) -> [u8; RATIONAL_LEN] {
    let mut out = [0u8; RATIONAL_LEN];
    out[..4].copy_from_slice(&order.write_u32(value.numerator));
    out[4..].copy_from_slice(&order.write_u32(value.denominator));
    out
}

pub fn decode_rational(bytes: [u8; RATIONAL_LEN], order: ByteOrder) -> Rational {
    let [a, b, c, d, e, f, g, h] = bytes;
    Rational::new(order.read_u32([a, b, c, d]), order.read_u32([e, f, g, h]))
}

/// Encode three consecutive rationals (deg/min/sec or h/m/s).
pub fn encode_triple(values: [Rational; 3], order: ByteOrder) -> [u8; TRIPLE_LEN] {
    let mut out = [0u8; TRIPLE_LEN];
    for (chunk, value) in out.chunks_exact_mut(RATIONAL_LEN).zip(values) {
        chunk.copy_from_slice(&encode_rational(value, order));
    }
    out
}

/// Decode three consecutive rationals.
pub fn decode_triple(bytes: &[u8; TRIPLE_LEN], order: ByteOrder) -> [Rational; 3] {
    let mut out = [Rational::whole(0); 3];
    for (value, chunk) in out.iter_mut().zip(bytes.chunks_exact(RATIONAL_LEN)) {
        let mut raw = [0u8; RATIONAL_LEN];
        raw.copy_from_slice(chunk);
        *value = decode_rational(raw, order);
    }
    out
}

/// A degrees/minutes/tenths-of-seconds coordinate as written by the randomizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds_tenths: u32,
}

impl Coordinate {
    pub fn to_rationals(self) -> [Rational; 3] {
        [
            Rational::whole(self.degrees),
            Rational::whole(self.minutes),
            Rational::new(self.seconds_tenths, SECONDS_DENOMINATOR),
        ]
    }
}

pub fn encode_coordinate(coord: Coordinate, order: ByteOrder) -> [u8; TRIPLE_LEN] {
    encode_triple(coord.to_rationals(), order)
}

/// Encode the UTC hour, minute and second of `now` as `(value, 1)` rationals.
pub fn encode_time(now: &DateTime<Utc>, order: ByteOrder) -> [u8; TRIPLE_LEN] {
    encode_triple(
        [
            Rational::whole(now.hour()),
            Rational::whole(now.minute()),
            Rational::whole(now.second()),
        ],
        order,
    )
}

/// Format the UTC date of `now` as the 10 ASCII bytes `YYYY:MM:DD`.
///
/// No NUL is included; the datestamp field keeps whatever its last byte held.
pub fn encode_date(now: &DateTime<Utc>) -> [u8; DATE_TEXT_LEN] {
    let text = now.format(DATESTAMP_FMT).to_string();
    let mut out = [b'0'; DATE_TEXT_LEN];
    let bytes = text.as_bytes();
    let len = bytes.len().min(DATE_TEXT_LEN);
    out[..len].copy_from_slice(&bytes[..len]);
    out
}

/// Read a datestamp field back into its text, stopping at the first NUL.
pub fn decode_date(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Hemisphere reference code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn code(self) -> u8 {
        match self {
            Self::North => b'N',
            Self::South => b'S',
            Self::East => b'E',
            Self::West => b'W',
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            b'N' => Some(Self::North),
            b'S' => Some(Self::South),
            b'E' => Some(Self::East),
            b'W' => Some(Self::West),
            _ => None,
        }
    }
}

pub fn encode_ref(hemisphere: Hemisphere) -> [u8; REF_LEN] {
    [hemisphere.code(), 0]
}

pub fn decode_ref(bytes: &[u8]) -> Option<Hemisphere> {
    bytes.first().copied().and_then(Hemisphere::from_code)
}
