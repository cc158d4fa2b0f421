use std::ops::Range;

use super::codec::ByteOrder;
use super::error::ExifError;
use super::tags::TAG_GPS_IFD_POINTER;

/// TIFF header: byte order mark, magic 42, offset of IFD0.
pub const TIFF_HEADER_LEN: usize = 8;
const TIFF_MAGIC: u16 = 42;

/// One IFD entry: tag, format, count, value-or-offset.
pub const ENTRY_LEN: usize = 12;
const COUNT_LEN: usize = 2;
const NEXT_IFD_LEN: usize = 4;
const INLINE_VALUE_LEN: usize = 4;

/// Byte size of one unit of a TIFF field format.
fn unit_size(format: u16) -> Option<usize> {
    match format {
        1 | 2 | 6 | 7 => Some(1), // BYTE, ASCII, SBYTE, UNDEFINED
        3 | 8 => Some(2),         // SHORT, SSHORT
        4 | 9 | 11 | 13 => Some(4), // LONG, SLONG, FLOAT, IFD
        5 | 10 | 12 => Some(8),   // RATIONAL, SRATIONAL, DOUBLE
        _ => None,
    }
}

/// A single parsed IFD entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfdEntry {
    /// Offset of the entry's 12-byte slot within the blob.
    pub slot: usize,
    pub tag: u16,
    pub format: u16,
    pub count: u32,
    /// Where the value bytes live. `None` when the format is unknown or the
    /// value points outside the blob.
    pub value: Option<Range<usize>>,
}

impl IfdEntry {
    /// Whether the value is stored in the entry itself rather than behind an offset.
    pub fn is_inline(&self) -> bool {
        self.value
            .as_ref()
            .is_some_and(|v| v.start == self.slot + ENTRY_LEN - INLINE_VALUE_LEN)
    }
}

/// An image file directory: its offset in the blob and its entries in table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    pub offset: usize,
    pub entries: Vec<IfdEntry>,
}

impl Directory {
    pub fn find(&self, tag: u16) -> Option<&IfdEntry> {
        self.entries.iter().find(|e| e.tag == tag)
    }

    /// Byte range covered by the entry count, the entry table and the next-IFD pointer.
    pub fn table_range(&self) -> Range<usize> {
        self.offset..self.offset + COUNT_LEN + self.entries.len() * ENTRY_LEN + NEXT_IFD_LEN
    }
}

/// TIFF-structured EXIF data, i.e. the APP1 payload after `Exif\0\0`.
///
/// The blob keeps the original bytes untouched except for the fields a caller
/// explicitly overwrites or removes, so every offset stays valid across edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExifBlob {
    data: Vec<u8>,
    order: ByteOrder,
}

impl ExifBlob {
    /// Validate the TIFF header and IFD0 table and wrap the bytes.
    pub fn parse(data: Vec<u8>) -> Result<Self, ExifError> {
        if data.len() < TIFF_HEADER_LEN {
            return Err(ExifError::TooShort(data.len()));
        }
        let order = ByteOrder::from_mark(&data[..2]).ok_or(ExifError::BadByteOrder)?;
        let blob = Self { data, order };

        let magic = blob.read_u16(2, "TIFF magic")?;
        if magic != TIFF_MAGIC {
            return Err(ExifError::BadMagic(magic));
        }

        let ifd0 = blob.directory(blob.ifd0_offset()?)?;
        log::trace!("IFD0 at {} with {} entries", ifd0.offset, ifd0.entries.len());
        Ok(blob)
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn bytes(&self, range: Range<usize>) -> Option<&[u8]> {
        self.data.get(range)
    }

    pub fn bytes_mut(&mut self, range: Range<usize>) -> Option<&mut [u8]> {
        self.data.get_mut(range)
    }

    pub fn ifd0_offset(&self) -> Result<usize, ExifError> {
        Ok(self.read_u32(4, "IFD0 offset")? as usize)
    }

    /// Parse the directory at `offset`.
    ///
    /// The count, entry table and next-IFD pointer must lie inside the blob.
    /// Individual values that point outside it are tolerated and reported as
    /// `value: None`.
    pub fn directory(&self, offset: usize) -> Result<Directory, ExifError> {
        let count = self.read_u16(offset, "IFD entry count")? as usize;
        let table = offset + COUNT_LEN;
        self.check("IFD entry table", table, count * ENTRY_LEN + NEXT_IFD_LEN)?;

        let entries = (0..count)
            .map(|i| self.entry_at(table + i * ENTRY_LEN))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Directory { offset, entries })
    }

    /// Locate the GPS IFD through IFD0's GPSInfo pointer.
    ///
    /// Returns `Ok(None)` when IFD0 has no GPS pointer.
    pub fn gps_directory(&self) -> Result<Option<Directory>, ExifError> {
        let ifd0 = self.directory(self.ifd0_offset()?)?;
        let Some(pointer) = ifd0.find(TAG_GPS_IFD_POINTER) else {
            return Ok(None);
        };
        let offset = self.read_u32(pointer.slot + 8, "GPS IFD pointer")? as usize;
        log::debug!("GPS IFD at offset {offset}");
        self.directory(offset).map(Some)
    }

    /// Remove the first entry with `tag` from the directory at `dir_offset`.
    ///
    /// Later entries and the next-IFD pointer move up one slot, the entry count
    /// drops by one and the vacated trailing slot is zeroed. Out-of-line value
    /// bytes of the removed entry are zeroed as well, unless another entry of
    /// the same directory or of IFD0 points into them. Nothing else moves, so
    /// all other offsets in the blob stay valid.
    ///
    /// Returns `Ok(false)` if the directory has no such entry.
    pub fn remove_entry(&mut self, dir_offset: usize, tag: u16) -> Result<bool, ExifError> {
        let dir = self.directory(dir_offset)?;
        let Some(index) = dir.entries.iter().position(|e| e.tag == tag) else {
            return Ok(false);
        };

        let table = dir.table_range();
        let removed = &dir.entries[index];
        if let Some(value) = removed.value.clone().filter(|_| !removed.is_inline()) {
            // values overlapping the table itself are left to the shift below
            let outside_table = value.end <= table.start || value.start >= table.end;
            if outside_table && !self.value_shared(&dir, index, &value)? {
                self.data[value].fill(0);
            }
        }

        let slot = removed.slot;
        self.data.copy_within(slot + ENTRY_LEN..table.end, slot);
        self.data[table.end - ENTRY_LEN..table.end].fill(0);

        let count = self.order.write_u16((dir.entries.len() - 1) as u16);
        self.data[dir_offset..dir_offset + COUNT_LEN].copy_from_slice(&count);

        log::trace!("removed tag {tag:#06x} from IFD at {dir_offset}");
        Ok(true)
    }

    /// Whether an entry other than `dir.entries[skip]`, in `dir` or in IFD0,
    /// has a value overlapping `value`.
    fn value_shared(&self, dir: &Directory, skip: usize, value: &Range<usize>) -> Result<bool, ExifError> {
        let overlaps = |e: &IfdEntry| {
            e.value
                .as_ref()
                .is_some_and(|r| r.start < value.end && value.start < r.end)
        };
        if dir.entries.iter().enumerate().any(|(i, e)| i != skip && overlaps(e)) {
            return Ok(true);
        }

        let ifd0 = self.ifd0_offset()?;
        if ifd0 == dir.offset {
            return Ok(false);
        }
        Ok(self.directory(ifd0)?.entries.iter().any(overlaps))
    }

    fn entry_at(&self, slot: usize) -> Result<IfdEntry, ExifError> {
        let tag = self.read_u16(slot, "IFD entry tag")?;
        let format = self.read_u16(slot + 2, "IFD entry format")?;
        let count = self.read_u32(slot + 4, "IFD entry count")?;

        let size = unit_size(format).and_then(|unit| unit.checked_mul(count as usize));
        let value = match size {
            Some(size) if size <= INLINE_VALUE_LEN => {
                let start = slot + ENTRY_LEN - INLINE_VALUE_LEN;
                Some(start..start + size)
            }
            Some(size) => {
                let offset = self.read_u32(slot + 8, "IFD value offset")? as usize;
                self.check("IFD value", offset, size).ok()
            }
            None => None,
        };
        if value.is_none() {
            log::debug!("tag {tag:#06x}: format {format} x {count} has no readable value");
        }

        Ok(IfdEntry { slot, tag, format, count, value })
    }

    fn check(&self, what: &'static str, offset: usize, len: usize) -> Result<Range<usize>, ExifError> {
        offset
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .map(|end| offset..end)
            .ok_or(ExifError::OutOfBounds { what, offset, len: self.data.len() })
    }

    fn read_u16(&self, offset: usize, what: &'static str) -> Result<u16, ExifError> {
        let r = self.check(what, offset, 2)?;
        Ok(self.order.read_u16([self.data[r.start], self.data[r.start + 1]]))
    }

    fn read_u32(&self, offset: usize, what: &'static str) -> Result<u32, ExifError> {
        let r = self.check(what, offset, 4)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.data[r]);
        Ok(self.order.read_u32(raw))
    }
}
