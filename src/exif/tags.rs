use super::codec::{DATE_LEN, REF_LEN, TRIPLE_LEN};

/// TIFF field format ASCII.
pub const FORMAT_ASCII: u16 = 2;
/// TIFF field format RATIONAL.
pub const FORMAT_RATIONAL: u16 = 5;

/// IFD0 tag holding the offset of the GPS IFD.
pub const TAG_GPS_IFD_POINTER: u16 = 0x8825;

/// The GPS tags this crate locates and mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpsTag {
    Latitude,
    LatitudeRef,
    Longitude,
    LongitudeRef,
    TimeStamp,
    DateStamp,
}

impl GpsTag {
    /// Lookup order used by the locator and the deleter.
    pub const ALL: [GpsTag; 6] = [
        GpsTag::Latitude,
        GpsTag::LatitudeRef,
        GpsTag::Longitude,
        GpsTag::LongitudeRef,
        GpsTag::TimeStamp,
        GpsTag::DateStamp,
    ];

    pub fn id(self) -> u16 {
        match self {
            GpsTag::LatitudeRef => 0x0001,
            GpsTag::Latitude => 0x0002,
            GpsTag::LongitudeRef => 0x0003,
            GpsTag::Longitude => 0x0004,
            GpsTag::TimeStamp => 0x0007,
            GpsTag::DateStamp => 0x001D,
        }
    }

    pub fn from_id(id: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.id() == id)
    }

    /// Tag name as printed in hex dumps.
    pub fn name(self) -> &'static str {
        match self {
            GpsTag::Latitude => "GPSLatitude",
            GpsTag::LatitudeRef => "GPSLatitudeRef",
            GpsTag::Longitude => "GPSLongitude",
            GpsTag::LongitudeRef => "GPSLongitudeRef",
            GpsTag::TimeStamp => "GPSTimeStamp",
            GpsTag::DateStamp => "GPSDateStamp",
        }
    }

    /// Human label used in "No ... data." notices.
    pub fn label(self) -> &'static str {
        match self {
            GpsTag::Latitude => "latitude",
            GpsTag::LatitudeRef => "latitude reference",
            GpsTag::Longitude => "longitude",
            GpsTag::LongitudeRef => "longitude reference",
            GpsTag::TimeStamp => "timestamp",
            GpsTag::DateStamp => "datestamp",
        }
    }

    /// TIFF field format the tag's value is stored in.
    pub fn format(self) -> u16 {
        match self {
            GpsTag::Latitude | GpsTag::Longitude | GpsTag::TimeStamp => FORMAT_RATIONAL,
            GpsTag::LatitudeRef | GpsTag::LongitudeRef | GpsTag::DateStamp => FORMAT_ASCII,
        }
    }

    /// Fixed encoding width of the tag's value in bytes.
    pub fn width(self) -> usize {
        match self {
            GpsTag::Latitude | GpsTag::Longitude | GpsTag::TimeStamp => TRIPLE_LEN,
            GpsTag::LatitudeRef | GpsTag::LongitudeRef => REF_LEN,
            GpsTag::DateStamp => DATE_LEN,
        }
    }
}
