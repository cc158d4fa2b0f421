use chrono::Utc;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{Config, Mode};
use crate::container::{Container, LoadError};
use crate::error::ProcessError;
use crate::exif::{self, Presence};

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Coordinates, references and time/date rewritten; `fields` entries changed.
    Randomized { output: PathBuf, fields: usize },
    /// `removed` GPS entries taken out of the GPS IFD.
    Deleted { output: PathBuf, removed: usize },
    /// Presence check only, nothing written.
    Identified { presence: Presence, entries: usize },
    /// No usable EXIF, or a directory given without recursion.
    Skipped { reason: String },
    /// Stat or write failure.
    Failed { error: String },
}

/// Per-file result, as printed by `--json`.
///
/// # Example
///
/// ```rust
/// use rand_gps_exif::pipeline::{FileReport, Outcome};
///
/// let report = FileReport {
///     path: "photo.jpg".into(),
///     outcome: Outcome::Skipped { reason: "no EXIF segment".into() },
/// };
/// let json = serde_json::to_value(&report).unwrap();
/// assert_eq!(json["status"], "skipped");
/// assert_eq!(json["path"], "photo.jpg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl FileReport {
    fn from_error(path: &Path, err: &ProcessError) -> Self {
        let outcome = match err {
            ProcessError::NoMetadata { source, .. } => Outcome::Skipped { reason: source.to_string() },
            ProcessError::NotRecursed { .. } => Outcome::Skipped { reason: err.to_string() },
            ProcessError::Stat { .. } | ProcessError::Write { .. } => Outcome::Failed { error: err.to_string() },
        };
        Self { path: path.to_path_buf(), outcome }
    }
}

/// Totals over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            match report.outcome {
                Outcome::Skipped { .. } => summary.skipped += 1,
                Outcome::Failed { .. } => summary.failed += 1,
                _ => summary.processed += 1,
            }
        }
        summary
    }
}

/// Random source for a run, seeded from the wall clock.
pub fn wall_clock_rng() -> SmallRng {
    SmallRng::seed_from_u64(Utc::now().timestamp() as u64)
}

/// Every regular file below `root`, depth-first and sorted by name.
///
/// Symlinks are followed. Entries that cannot be read come back as
/// [`ProcessError::Stat`] so the caller can report them and carry on.
pub fn collect_files(root: &Path) -> Vec<Result<PathBuf, ProcessError>> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) if e.file_type().is_file() => Some(Ok(e.into_path())),
            Ok(_) => None,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                Some(Err(ProcessError::Stat { path, source: e.into() }))
            }
        })
        .collect()
}

/// Load, locate, act on and save a single file.
///
/// Never fails: every condition ends up in the returned report and the log.
pub fn process_file<R: Rng + ?Sized>(path: &Path, config: &Config, rng: &mut R) -> FileReport {
    if config.verbose {
        println!("=== {} ===", path.display());
    }

    match apply(path, config, rng) {
        Ok(outcome) => FileReport { path: path.to_path_buf(), outcome },
        Err(err) => {
            match &err {
                ProcessError::NoMetadata { .. } | ProcessError::NotRecursed { .. } => {
                    if config.verbose {
                        log::info!("{err}");
                    }
                }
                ProcessError::Stat { .. } | ProcessError::Write { .. } => log::error!("{err}"),
            }
            FileReport::from_error(path, &err)
        }
    }
}

fn apply<R: Rng + ?Sized>(path: &Path, config: &Config, rng: &mut R) -> Result<Outcome, ProcessError> {
    let no_metadata = |source: LoadError| ProcessError::NoMetadata { path: path.to_path_buf(), source };

    let mut container = Container::load(path).map_err(no_metadata)?;
    let set = exif::locate_gps(container.metadata(), config.verbose).map_err(|e| no_metadata(e.into()))?;

    let dest = config.output_path(path);
    let outcome = match config.mode {
        Mode::Identify => {
            let presence = exif::identify(&set);
            match presence {
                Presence::Present => println!("{}: GPS data present", path.display()),
                Presence::Absent => {
                    log::info!("No GPS data present.");
                    println!("{}: no GPS data", path.display());
                }
            }
            return Ok(Outcome::Identified { presence, entries: set.present_count() });
        }
        Mode::Delete => {
            let removed = exif::delete(set, container.metadata_mut()).map_err(|e| no_metadata(e.into()))?;
            Outcome::Deleted { output: dest.clone(), removed }
        }
        Mode::Randomize => {
            let blob = container.metadata_mut();
            let fields = exif::randomize(&set, blob, rng)
                + exif::randomize_ref(&set, blob, rng)
                + exif::randomize_datetime(&set, blob, &Utc::now());
            Outcome::Randomized { output: dest.clone(), fields }
        }
    };

    if config.create_new && config.verbose {
        log::info!("Creating new jpeg image: {}", dest.display());
    }
    container.save(&dest).map_err(|source| ProcessError::Write { path: dest.clone(), source })?;
    log::debug!("wrote {}", dest.display());

    Ok(outcome)
}

/// Process every input path in order and return one report per file.
///
/// Directories are walked only with `recursive`; otherwise they are skipped
/// with a notice. No single path can abort the run.
///
/// # Example
///
/// ```rust,no_run
/// use rand_gps_exif::config::{Config, Flags};
/// use rand_gps_exif::pipeline::{run, wall_clock_rng};
/// use std::path::PathBuf;
///
/// let config = Config::from_flags(&Flags { identify: true, ..Flags::default() }).unwrap();
/// let mut rng = wall_clock_rng();
/// let reports = run(&[PathBuf::from("./photos")], &config, &mut rng);
/// println!("{} file(s) looked at", reports.len());
/// ```
pub fn run<R: Rng + ?Sized>(inputs: &[PathBuf], config: &Config, rng: &mut R) -> Vec<FileReport> {
    let mut reports = Vec::new();

    for input in inputs {
        let meta = match std::fs::metadata(input) {
            Ok(meta) => meta,
            Err(source) => {
                let err = ProcessError::Stat { path: input.clone(), source };
                log::error!("{err}");
                reports.push(FileReport::from_error(input, &err));
                continue;
            }
        };

        if !meta.is_dir() {
            reports.push(process_file(input, config, rng));
            continue;
        }

        if !config.recursive {
            let err = ProcessError::NotRecursed { path: input.clone() };
            log::info!("{err}");
            reports.push(FileReport::from_error(input, &err));
            continue;
        }

        for entry in collect_files(input) {
            match entry {
                Ok(path) => reports.push(process_file(&path, config, rng)),
                Err(err) => {
                    log::error!("{err}");
                    let path = match &err {
                        ProcessError::Stat { path, .. } => path.clone(),
                        _ => input.clone(),
                    };
                    reports.push(FileReport::from_error(&path, &err));
                }
            }
        }
    }

    if config.verbose {
        let summary = Summary::from_reports(&reports);
        log::info!(
            "Done: {} processed, {} skipped, {} failed",
            summary.processed,
            summary.skipped,
            summary.failed
        );
    }

    reports
}
