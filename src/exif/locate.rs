use std::ops::Range;

use super::error::ExifError;
use super::ifd::{Directory, ExifBlob, IfdEntry};
use super::tags::GpsTag;

/// Identifies the directory an entry belongs to: its offset inside the blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectoryKey(usize);

impl DirectoryKey {
    pub fn offset(self) -> usize {
        self.0
    }
}

/// A located GPS field.
///
/// This is a handle into an [`ExifBlob`], not a copy of the bytes: reads and
/// writes go through the blob it was located in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub tag: GpsTag,
    pub directory: DirectoryKey,
    /// TIFF field format as stored in the entry.
    pub format: u16,
    value: Option<Range<usize>>,
}

impl MetadataEntry {
    fn new(tag: GpsTag, dir: &Directory, raw: &IfdEntry) -> Self {
        Self {
            tag,
            directory: DirectoryKey(dir.offset),
            format: raw.format,
            value: raw.value.clone(),
        }
    }

    /// Size of the stored value in bytes.
    pub fn len(&self) -> usize {
        self.value.as_ref().map_or(0, Range::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the stored value has the fixed width of its tag.
    pub fn has_expected_width(&self) -> bool {
        self.len() == self.tag.width()
    }

    /// Width and field format both match the tag, so it can be overwritten in place.
    pub fn is_writable(&self) -> bool {
        self.has_expected_width() && self.format == self.tag.format()
    }

    pub fn raw_bytes<'a>(&self, blob: &'a ExifBlob) -> &'a [u8] {
        self.value
            .clone()
            .and_then(|range| blob.bytes(range))
            .unwrap_or_default()
    }

    /// Mutable view of the value, only when it has the tag's width and format.
    pub fn raw_bytes_mut<'a>(&self, blob: &'a mut ExifBlob) -> Option<&'a mut [u8]> {
        if !self.is_writable() {
            return None;
        }
        self.value.clone().and_then(|range| blob.bytes_mut(range))
    }
}

/// The GPS entries found in one image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpsEntrySet {
    pub latitude: Option<MetadataEntry>,
    pub latitude_ref: Option<MetadataEntry>,
    pub longitude: Option<MetadataEntry>,
    pub longitude_ref: Option<MetadataEntry>,
    pub timestamp: Option<MetadataEntry>,
    pub datestamp: Option<MetadataEntry>,
}

impl GpsEntrySet {
    pub fn get(&self, tag: GpsTag) -> Option<&MetadataEntry> {
        match tag {
            GpsTag::Latitude => self.latitude.as_ref(),
            GpsTag::LatitudeRef => self.latitude_ref.as_ref(),
            GpsTag::Longitude => self.longitude.as_ref(),
            GpsTag::LongitudeRef => self.longitude_ref.as_ref(),
            GpsTag::TimeStamp => self.timestamp.as_ref(),
            GpsTag::DateStamp => self.datestamp.as_ref(),
        }
    }

    fn slot_mut(&mut self, tag: GpsTag) -> &mut Option<MetadataEntry> {
        match tag {
            GpsTag::Latitude => &mut self.latitude,
            GpsTag::LatitudeRef => &mut self.latitude_ref,
            GpsTag::Longitude => &mut self.longitude,
            GpsTag::LongitudeRef => &mut self.longitude_ref,
            GpsTag::TimeStamp => &mut self.timestamp,
            GpsTag::DateStamp => &mut self.datestamp,
        }
    }

    /// Present entries, in lookup order.
    pub fn iter(&self) -> impl Iterator<Item = &MetadataEntry> {
        GpsTag::ALL.into_iter().filter_map(|tag| self.get(tag))
    }

    pub fn present_count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.present_count() == 0
    }
}

/// Find the six GPS entries in `blob`.
///
/// Missing tags, or a missing GPS IFD altogether, are not errors. With
/// `verbose`, each present entry is hex-dumped to stdout and each missing one
/// is logged.
pub fn locate_gps(blob: &ExifBlob, verbose: bool) -> Result<GpsEntrySet, ExifError> {
    if verbose {
        log::info!("Getting GPS content: ");
    }

    let mut set = GpsEntrySet::default();
    let directory = blob.gps_directory()?;

    for tag in GpsTag::ALL {
        let found = directory
            .as_ref()
            .and_then(|dir| dir.find(tag.id()).map(|raw| MetadataEntry::new(tag, dir, raw)));

        let Some(entry) = found else {
            if verbose {
                log::info!("No {} data.", tag.label());
            }
            continue;
        };

        if verbose {
            print!("{}", format_hex_dump(tag.name(), entry.raw_bytes(blob)));
        }
        if !entry.is_writable() {
            log::warn!(
                "{} holds {} bytes of format {}, expected {} bytes of format {}; it will not be rewritten",
                tag.name(),
                entry.len(),
                entry.format,
                tag.width(),
                tag.format()
            );
        }
        *set.slot_mut(tag) = Some(entry);
    }

    log::debug!("{} GPS entries present", set.present_count());
    Ok(set)
}

/// Render `data` as space-separated hex octets, eight per line.
pub fn format_hex_dump(name: &str, data: &[u8]) -> String {
    let mut out = format!("{name}:\n\t");
    for (i, byte) in data.iter().enumerate() {
        out.push_str(&format!("{byte:02x} "));
        if (i + 1) % 8 == 0 {
            out.push_str("\n\t");
        }
    }
    out.push('\n');
    out
}
