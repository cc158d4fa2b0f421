//! GPS EXIF handling inside a TIFF-structured EXIF blob.
//!
//! - [`codec`]: byte order and fixed-width GPS field encoders
//! - [`ifd`]: TIFF header and IFD tables, in-place entry removal
//! - [`locate`]: find the six GPS entries ([`locate_gps`])
//! - [`mutate`]: [`randomize`], [`randomize_ref`], [`randomize_datetime`], [`delete`], [`identify`]

pub mod codec;
mod error;
pub mod ifd;
pub mod locate;
pub mod mutate;
pub mod tags;

pub use error::ExifError;
pub use ifd::ExifBlob;
pub use locate::{GpsEntrySet, MetadataEntry, format_hex_dump, locate_gps};
pub use mutate::{Presence, delete, identify, randomize, randomize_datetime, randomize_ref};
pub use tags::GpsTag;
