use thiserror::Error;

/// Structural faults found while walking a TIFF/EXIF blob.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExifError {
    #[error("EXIF data too short ({0} bytes)")]
    TooShort(usize),

    #[error("invalid TIFF byte order mark")]
    BadByteOrder,

    #[error("invalid TIFF magic number {0:#06x}")]
    BadMagic(u16),

    #[error("{what} at offset {offset} extends past the end of the EXIF data ({len} bytes)")]
    OutOfBounds {
        what: &'static str,
        offset: usize,
        len: usize,
    },
}
