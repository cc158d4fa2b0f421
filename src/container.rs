//! JPEG container round-trip.
//!
//! The file is split into segments with img-parts. The first APP1 segment that
//! starts with `Exif\0\0` provides the [`ExifBlob`]; on save only that
//! segment's contents are replaced, in place, and every other segment is
//! written back untouched.

use img_parts::Bytes;
use img_parts::jpeg::{Jpeg, JpegSegment};
use std::fmt;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::exif::{ExifBlob, ExifError};

const APP1: u8 = 0xE1;
const EXIF_PREFIX: &[u8] = b"Exif\0\0";

/// Why a file yielded no usable EXIF metadata.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read file: {0}")]
    Io(#[from] io::Error),

    #[error("not a JPEG file: {0}")]
    NotJpeg(String),

    #[error("no EXIF segment")]
    NoExif,

    #[error("corrupt EXIF data: {0}")]
    Exif(#[from] ExifError),
}

/// A parsed JPEG file that owns its EXIF blob.
pub struct Container {
    jpeg: Jpeg,
    exif_pos: usize,
    exif: ExifBlob,
}

impl Container {
    /// Read and parse the JPEG at `path`.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, LoadError> {
        let jpeg = Jpeg::from_bytes(Bytes::from(bytes)).map_err(|e| LoadError::NotJpeg(e.to_string()))?;

        let exif_pos = find_exif_segment_pos(&jpeg).ok_or(LoadError::NoExif)?;
        let tiff = jpeg.segments()[exif_pos].contents()[EXIF_PREFIX.len()..].to_vec();
        let exif = ExifBlob::parse(tiff)?;
        log::debug!("EXIF in segment {exif_pos}, {} bytes", exif.len());

        Ok(Self { jpeg, exif_pos, exif })
    }

    pub fn metadata(&self) -> &ExifBlob {
        &self.exif
    }

    pub fn metadata_mut(&mut self) -> &mut ExifBlob {
        &mut self.exif
    }

    /// Re-encode the JPEG with the current EXIF blob.
    pub fn into_bytes(self) -> Bytes {
        let Self { mut jpeg, exif_pos, exif } = self;

        let mut contents = Vec::with_capacity(EXIF_PREFIX.len() + exif.len());
        contents.extend_from_slice(EXIF_PREFIX);
        contents.extend_from_slice(&exif.into_bytes());

        if let Some(segment) = jpeg.segments_mut().get_mut(exif_pos) {
            *segment = JpegSegment::new_with_contents(APP1, Bytes::from(contents));
        }
        jpeg.encoder().bytes()
    }

    /// Write the JPEG, with its current EXIF blob, to `dest`.
    pub fn save(self, dest: &Path) -> io::Result<()> {
        let output = self.into_bytes();
        std::fs::write(dest, &output)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("segments", &self.jpeg.segments().len())
            .field("exif_pos", &self.exif_pos)
            .field("exif_len", &self.exif.len())
            .finish()
    }
}

/// Find the position of the EXIF APP1 segment in a JPEG.
fn find_exif_segment_pos(jpeg: &Jpeg) -> Option<usize> {
    jpeg.segments()
        .iter()
        .position(|s| s.marker() == APP1 && s.contents().starts_with(EXIF_PREFIX))
}
