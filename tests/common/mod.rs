#![allow(dead_code)]

use rand_gps_exif::container::Container;
use rand_gps_exif::exif::codec::ByteOrder;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Make tag stored inline in IFD0, so tests can check it survives.
pub const TAG_MAKE: u16 = 0x010F;
pub const MAKE: &[u8; 4] = b"Cam\0";

/// Which GPS entries the fixture carries.
#[derive(Debug, Clone, Copy)]
pub struct GpsFields {
    pub latitude_ref: bool,
    pub latitude: bool,
    pub longitude_ref: bool,
    pub longitude: bool,
    pub timestamp: bool,
    pub datestamp: bool,
}

impl GpsFields {
    pub fn all() -> Self {
        Self {
            latitude_ref: true,
            latitude: true,
            longitude_ref: true,
            longitude: true,
            timestamp: true,
            datestamp: true,
        }
    }

    pub fn coordinates_only() -> Self {
        Self {
            latitude_ref: false,
            latitude: true,
            longitude_ref: false,
            longitude: true,
            timestamp: false,
            datestamp: false,
        }
    }
}

/// A TIFF blob plus where each out-of-line GPS value landed.
pub struct Fixture {
    pub tiff: Vec<u8>,
    pub latitude: Option<Range<usize>>,
    pub longitude: Option<Range<usize>>,
    pub timestamp: Option<Range<usize>>,
    pub datestamp: Option<Range<usize>>,
}

fn rationals(order: ByteOrder, values: [(u32, u32); 3]) -> Vec<u8> {
    let mut out = Vec::with_capacity(24);
    for (num, den) in values {
        out.extend_from_slice(&order.write_u32(num));
        out.extend_from_slice(&order.write_u32(den));
    }
    out
}

/// Build a TIFF blob: IFD0 with Make and the GPS pointer, then the GPS IFD,
/// then the out-of-line GPS values.
pub fn tiff(order: ByteOrder, fields: GpsFields) -> Fixture {
    const GPS_IFD: usize = 38;

    // (tag, format, count, inline value or out-of-line bytes)
    let mut entries: Vec<(u16, u16, u32, Result<[u8; 4], Vec<u8>>)> = Vec::new();
    if fields.latitude_ref {
        entries.push((0x0001, 2, 2, Ok(*b"N\0\0\0")));
    }
    if fields.latitude {
        entries.push((0x0002, 5, 3, Err(rationals(order, [(12, 1), (34, 1), (560, 10)]))));
    }
    if fields.longitude_ref {
        entries.push((0x0003, 2, 2, Ok(*b"E\0\0\0")));
    }
    if fields.longitude {
        entries.push((0x0004, 5, 3, Err(rationals(order, [(98, 1), (7, 1), (65, 10)]))));
    }
    if fields.timestamp {
        entries.push((0x0007, 5, 3, Err(rationals(order, [(1, 1), (2, 1), (3, 1)]))));
    }
    if fields.datestamp {
        entries.push((0x001D, 2, 11, Err(b"2001:02:03\0".to_vec())));
    }

    let mut b = Vec::new();
    b.extend_from_slice(if order == ByteOrder::Big { b"MM" } else { b"II" });
    b.extend_from_slice(&order.write_u16(42));
    b.extend_from_slice(&order.write_u32(8));

    b.extend_from_slice(&order.write_u16(2));
    b.extend_from_slice(&order.write_u16(TAG_MAKE));
    b.extend_from_slice(&order.write_u16(2));
    b.extend_from_slice(&order.write_u32(4));
    b.extend_from_slice(MAKE);
    b.extend_from_slice(&order.write_u16(0x8825));
    b.extend_from_slice(&order.write_u16(4));
    b.extend_from_slice(&order.write_u32(1));
    b.extend_from_slice(&order.write_u32(GPS_IFD as u32));
    b.extend_from_slice(&order.write_u32(0));
    assert_eq!(b.len(), GPS_IFD);

    let mut next_value = GPS_IFD + 2 + entries.len() * 12 + 4;
    let mut values = Vec::new();
    let mut fixture = Fixture { tiff: Vec::new(), latitude: None, longitude: None, timestamp: None, datestamp: None };

    b.extend_from_slice(&order.write_u16(entries.len() as u16));
    for (tag, format, count, value) in &entries {
        b.extend_from_slice(&order.write_u16(*tag));
        b.extend_from_slice(&order.write_u16(*format));
        b.extend_from_slice(&order.write_u32(*count));
        match value {
            Ok(inline) => b.extend_from_slice(inline),
            Err(bytes) => {
                let range = next_value..next_value + bytes.len();
                b.extend_from_slice(&order.write_u32(next_value as u32));
                match tag {
                    0x0002 => fixture.latitude = Some(range),
                    0x0004 => fixture.longitude = Some(range),
                    0x0007 => fixture.timestamp = Some(range),
                    _ => fixture.datestamp = Some(range),
                }
                next_value += bytes.len();
                values.extend_from_slice(bytes);
            }
        }
    }
    b.extend_from_slice(&order.write_u32(0));
    b.extend_from_slice(&values);

    fixture.tiff = b;
    fixture
}

fn segment(marker: u8, contents: &[u8]) -> Vec<u8> {
    let mut s = vec![0xFF, marker];
    s.extend_from_slice(&((contents.len() + 2) as u16).to_be_bytes());
    s.extend_from_slice(contents);
    s
}

/// SOI, APP0/JFIF, optional APP1/Exif, COM, SOS with entropy bytes, EOI.
pub fn jpeg(tiff: Option<&[u8]>) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    out.extend(segment(0xE0, b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0"));
    if let Some(tiff) = tiff {
        let mut contents = b"Exif\0\0".to_vec();
        contents.extend_from_slice(tiff);
        out.extend(segment(0xE1, &contents));
    }
    out.extend(segment(0xFE, b"keep me"));
    out.extend(segment(0xDA, &[1, 1, 0, 0, 0x3F, 0]));
    out.extend_from_slice(&[0x12, 0x34, 0x56, 0x78]);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// The TIFF blob stored in the JPEG at `path`.
pub fn exif_blob(path: &Path) -> Vec<u8> {
    Container::load(path).unwrap().metadata().as_bytes().to_vec()
}
