//! The three per-image GPS operations: randomize, delete, identify.
//!
//! None of them ever changes the size of a value. Randomizing overwrites
//! bytes in place; deleting removes whole directory entries.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use super::codec::{self, Coordinate, DATE_TEXT_LEN, Hemisphere};
use super::error::ExifError;
use super::ifd::ExifBlob;
use super::locate::{GpsEntrySet, MetadataEntry};

pub const LATITUDE_DEGREES_MAX: u32 = 90;
pub const LONGITUDE_DEGREES_MAX: u32 = 180;
pub const MINUTES_MAX: u32 = 60;
/// Seconds are drawn in tenths, so `[0, 600)` covers `[0.0, 60.0)`.
pub const SECONDS_TENTHS_MAX: u32 = 600;

/// Draw a coordinate with degrees in `[0, degrees_max)`.
pub fn random_coordinate<R: Rng + ?Sized>(rng: &mut R, degrees_max: u32) -> Coordinate {
    Coordinate {
        degrees: rng.gen_range(0..degrees_max),
        minutes: rng.gen_range(0..MINUTES_MAX),
        seconds_tenths: rng.gen_range(0..SECONDS_TENTHS_MAX),
    }
}

/// Draw the latitude reference; longitude gets the paired code.
///
/// The pairing is fixed: `N` goes with `E`, `S` with `W`.
pub fn random_ref_pair<R: Rng + ?Sized>(rng: &mut R) -> (Hemisphere, Hemisphere) {
    if rng.gen_bool(0.5) {
        (Hemisphere::South, Hemisphere::West)
    } else {
        (Hemisphere::North, Hemisphere::East)
    }
}

/// Copy `bytes` over the start of `entry`'s value. Returns whether anything was written.
fn overwrite(blob: &mut ExifBlob, entry: Option<&MetadataEntry>, bytes: &[u8]) -> bool {
    let Some(entry) = entry else {
        return false;
    };
    match entry.raw_bytes_mut(blob) {
        Some(dst) if dst.len() >= bytes.len() => {
            dst[..bytes.len()].copy_from_slice(bytes);
            true
        }
        _ => {
            log::debug!("skipping {}: value width {}", entry.tag.name(), entry.len());
            false
        }
    }
}

/// Overwrite latitude and longitude with random coordinates.
///
/// Both coordinates are drawn even if only one (or neither) entry exists.
/// Returns the number of entries written.
pub fn randomize<R: Rng + ?Sized>(set: &GpsEntrySet, blob: &mut ExifBlob, rng: &mut R) -> usize {
    let order = blob.order();
    let latitude = codec::encode_coordinate(random_coordinate(rng, LATITUDE_DEGREES_MAX), order);
    let longitude = codec::encode_coordinate(random_coordinate(rng, LONGITUDE_DEGREES_MAX), order);

    usize::from(overwrite(blob, set.latitude.as_ref(), &latitude))
        + usize::from(overwrite(blob, set.longitude.as_ref(), &longitude))
}

/// Overwrite the hemisphere references with a random `N/E` or `S/W` pair.
pub fn randomize_ref<R: Rng + ?Sized>(set: &GpsEntrySet, blob: &mut ExifBlob, rng: &mut R) -> usize {
    let (lat_ref, lon_ref) = random_ref_pair(rng);

    usize::from(overwrite(blob, set.latitude_ref.as_ref(), &codec::encode_ref(lat_ref)))
        + usize::from(overwrite(blob, set.longitude_ref.as_ref(), &codec::encode_ref(lon_ref)))
}

/// Overwrite the GPS timestamp and datestamp with `now` in UTC.
///
/// The datestamp receives the ten characters of `YYYY:MM:DD`; its last byte
/// is left as it was.
pub fn randomize_datetime(set: &GpsEntrySet, blob: &mut ExifBlob, now: &DateTime<Utc>) -> usize {
    let time = codec::encode_time(now, blob.order());
    let date: [u8; DATE_TEXT_LEN] = codec::encode_date(now);

    usize::from(overwrite(blob, set.timestamp.as_ref(), &time))
        + usize::from(overwrite(blob, set.datestamp.as_ref(), &date))
}

/// Remove every present entry from its directory. Returns how many were removed.
///
/// Entries already gone are skipped, so running this twice is the same as once.
pub fn delete(set: GpsEntrySet, blob: &mut ExifBlob) -> Result<usize, ExifError> {
    let mut removed = 0;
    for entry in set.iter() {
        if blob.remove_entry(entry.directory.offset(), entry.tag.id())? {
            removed += 1;
        }
    }
    Ok(removed)
}

/// Whether an image carries any of the GPS entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Present,
    Absent,
}

pub fn identify(set: &GpsEntrySet) -> Presence {
    if set.present_count() > 0 {
        Presence::Present
    } else {
        Presence::Absent
    }
}
