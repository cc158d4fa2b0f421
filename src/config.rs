use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Prefix given to the output file name when a new file is requested.
pub const NEW_FILE_PREFIX: &str = "rand_";

/// What to do with the GPS entries of each image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Overwrite coordinates, references and time/date in place.
    #[default]
    Randomize,
    /// Remove the GPS entries from the GPS IFD.
    Delete,
    /// Only report whether GPS entries exist.
    Identify,
}

/// Run configuration, built once from the command line and passed to the pipeline.
///
/// # Example
///
/// ```rust
/// use rand_gps_exif::config::{Config, Flags, Mode};
///
/// let config = Config::from_flags(&Flags {
///     delete: true,
///     create_new: true, // ignored together with delete
///     ..Flags::default()
/// })
/// .unwrap();
/// assert_eq!(config.mode, Mode::Delete);
/// assert!(!config.create_new);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub mode: Mode,
    /// Print per-file headers, hex dumps and absence notices.
    pub verbose: bool,
    /// Write `rand_<name>` next to the input instead of overwriting it.
    pub create_new: bool,
    /// Descend into directory arguments.
    pub recursive: bool,
}

/// Raw command-line switches before validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub verbose: bool,
    pub create_new: bool,
    pub delete: bool,
    pub identify: bool,
    pub recursive: bool,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("You can't use -d and -i at the same time.")]
    ConflictingModes,
}

impl Config {
    /// Validate `flags` into a configuration.
    ///
    /// Delete and identify together are rejected. A new-file request is dropped,
    /// with a notice, when combined with either of them.
    pub fn from_flags(flags: &Flags) -> Result<Self, ConfigError> {
        let mode = match (flags.delete, flags.identify) {
            (true, true) => return Err(ConfigError::ConflictingModes),
            (true, false) => Mode::Delete,
            (false, true) => Mode::Identify,
            (false, false) => Mode::Randomize,
        };

        let create_new = flags.create_new && mode == Mode::Randomize;
        if flags.create_new && !create_new {
            log::info!("Ignoring -n flag.");
        }

        Ok(Self {
            mode,
            verbose: flags.verbose,
            create_new,
            recursive: flags.recursive,
        })
    }

    /// Where the processed version of `input` is written.
    ///
    /// With `create_new` this is `<dir>/rand_<name>`, otherwise `input` itself.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        if !self.create_new {
            return input.to_path_buf();
        }
        match input.file_name() {
            Some(name) => {
                let mut new_name = OsString::from(NEW_FILE_PREFIX);
                new_name.push(name);
                input.with_file_name(new_name)
            }
            None => input.to_path_buf(),
        }
    }
}
