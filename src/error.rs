use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::container::LoadError;

/// Per-file conditions. None of them stops a run.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Not a JPEG, no EXIF segment, or EXIF too damaged to walk.
    #[error("Couldn't load exif data from '{}': {source}", .path.display())]
    NoMetadata {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("Can't stat '{}': {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Couldn't write new image file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Not processing {} because -R was not specified.", .path.display())]
    NotRecursed { path: PathBuf },
}
