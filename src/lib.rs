//! # rand-gps-exif
//!
//! Scrub the GPS location out of JPEG images. Each file's EXIF GPS entries
//! (latitude, longitude, their hemisphere references, GPS time and GPS date)
//! are either overwritten with random values, removed, or only reported on.
//! Everything else in the file is written back unchanged.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rand_gps_exif::config::{Config, Flags};
//! use rand_gps_exif::pipeline::{run, wall_clock_rng, Outcome};
//! use std::path::PathBuf;
//!
//! let config = Config::from_flags(&Flags { create_new: true, ..Flags::default() })?;
//! let mut rng = wall_clock_rng();
//!
//! for report in run(&[PathBuf::from("photo.jpg")], &config, &mut rng) {
//!     if let Outcome::Randomized { output, fields } = report.outcome {
//!         println!("{fields} field(s) randomized into {}", output.display());
//!     }
//! }
//! # Ok::<(), rand_gps_exif::config::ConfigError>(())
//! ```
//!
//! ## Lower-Level Usage
//!
//! ```rust,no_run
//! use rand_gps_exif::container::Container;
//! use rand_gps_exif::exif::{locate_gps, randomize};
//! use rand::SeedableRng;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut container = Container::load(Path::new("photo.jpg"))?;
//! let set = locate_gps(container.metadata(), false)?;
//! println!("{} GPS entries", set.present_count());
//!
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(1);
//! randomize(&set, container.metadata_mut(), &mut rng);
//! container.save(Path::new("rand_photo.jpg"))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: run configuration built from command-line flags
//! - [`container`]: JPEG load/save around the EXIF segment
//! - [`error`]: per-file error conditions
//! - [`exif`]: GPS IFD parsing, locating and mutation
//! - [`pipeline`]: per-file processing, directory walking and reports

pub mod config;
pub mod container;
pub mod error;
pub mod exif;
pub mod pipeline;
