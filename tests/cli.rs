mod common;

use common::GpsFields;
use rand_gps_exif::exif::codec::ByteOrder;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_cli(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rand-gps-exif"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn gps_jpeg() -> Vec<u8> {
    common::jpeg(Some(&common::tiff(ByteOrder::Big, GpsFields::all()).tiff))
}

// ── usage errors ─────────────────────────────────────────────────────

#[test]
fn delete_with_identify_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let original = gps_jpeg();
    common::write_file(dir.path(), "a.jpg", &original);

    let out = run_cli(&["-d", "-i", "a.jpg"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));
    assert_eq!(fs::read(dir.path().join("a.jpg")).unwrap(), original);
}

#[test]
fn no_arguments_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let out = run_cli(&[], dir.path());
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn flags_without_paths_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let out = run_cli(&["-v", "-R"], dir.path());
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn help_exits_zero() {
    let dir = TempDir::new().unwrap();
    let out = run_cli(&["--help"], dir.path());
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("-R"));
}

// ── per-file conditions ──────────────────────────────────────────────

#[test]
fn missing_exif_exits_zero_without_output() {
    let dir = TempDir::new().unwrap();
    common::write_file(dir.path(), "bare.jpg", &common::jpeg(None));

    let out = run_cli(&["-n", "bare.jpg"], dir.path());
    assert_eq!(out.status.code(), Some(0));
    assert!(!dir.path().join("rand_bare.jpg").exists());
}

#[test]
fn missing_file_exits_zero() {
    let dir = TempDir::new().unwrap();
    let out = run_cli(&["nope.jpg"], dir.path());
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stderr).contains("nope.jpg"));
}

#[test]
fn directory_without_recursion_is_skipped() {
    let dir = TempDir::new().unwrap();
    let photos = dir.path().join("photos");
    fs::create_dir(&photos).unwrap();
    let original = gps_jpeg();
    common::write_file(&photos, "a.jpg", &original);

    let out = run_cli(&["photos"], dir.path());
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stderr).contains("because -R was not specified"));
    assert_eq!(fs::read(photos.join("a.jpg")).unwrap(), original);
    assert_eq!(fs::read_dir(&photos).unwrap().count(), 1);
}

// ── modes ────────────────────────────────────────────────────────────

#[test]
fn identify_prints_verdicts() {
    let dir = TempDir::new().unwrap();
    common::write_file(dir.path(), "gps.jpg", &gps_jpeg());
    common::write_file(
        dir.path(),
        "plain.jpg",
        &common::jpeg(Some(&common::tiff(ByteOrder::Big, GpsFields {
            latitude_ref: false,
            latitude: false,
            longitude_ref: false,
            longitude: false,
            timestamp: false,
            datestamp: false,
        })
        .tiff)),
    );

    let out = run_cli(&["-i", "gps.jpg", "plain.jpg"], dir.path());
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("gps.jpg: GPS data present"));
    assert!(stdout.contains("plain.jpg: no GPS data"));
    assert!(String::from_utf8_lossy(&out.stderr).contains("No GPS data present."));
}

#[test]
fn new_file_ignored_with_delete() {
    let dir = TempDir::new().unwrap();
    let original = gps_jpeg();
    common::write_file(dir.path(), "a.jpg", &original);

    let out = run_cli(&["-n", "-d", "a.jpg"], dir.path());
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Ignoring -n flag."));
    assert!(!dir.path().join("rand_a.jpg").exists());
    assert_ne!(fs::read(dir.path().join("a.jpg")).unwrap(), original);
}

#[test]
fn new_file_ignored_with_identify() {
    let dir = TempDir::new().unwrap();
    let original = gps_jpeg();
    common::write_file(dir.path(), "a.jpg", &original);

    let out = run_cli(&["-n", "-i", "a.jpg"], dir.path());
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Ignoring -n flag."));
    assert!(!dir.path().join("rand_a.jpg").exists());
    assert_eq!(fs::read(dir.path().join("a.jpg")).unwrap(), original);
}

#[test]
fn verbose_prints_hex_dump() {
    let dir = TempDir::new().unwrap();
    common::write_file(dir.path(), "a.jpg", &gps_jpeg());

    let out = run_cli(&["-v", "-i", "a.jpg"], dir.path());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("=== a.jpg ==="));
    assert!(stdout.contains("GPSLatitude:\n\t00 00 00 0c 00 00 00 01 \n\t"));
}

#[test]
fn verbose_reports_missing_entries_and_new_file() {
    let dir = TempDir::new().unwrap();
    let fixture = common::tiff(ByteOrder::Big, GpsFields::coordinates_only());
    common::write_file(dir.path(), "a.jpg", &common::jpeg(Some(&fixture.tiff)));

    let out = run_cli(&["-v", "-n", "a.jpg"], dir.path());
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stdout.contains("=== a.jpg ==="));
    for notice in [
        "No latitude reference data.",
        "No longitude reference data.",
        "No timestamp data.",
        "No datestamp data.",
    ] {
        assert!(stderr.contains(notice), "missing {notice:?} in {stderr}");
    }
    assert!(!stderr.contains("No latitude data."));
    assert!(stderr.contains("Creating new jpeg image: rand_a.jpg"));
    assert!(dir.path().join("rand_a.jpg").exists());
}

#[test]
fn verbose_keeps_internal_detail_out() {
    let dir = TempDir::new().unwrap();
    common::write_file(dir.path(), "a.jpg", &gps_jpeg());

    let out = run_cli(&["-v", "a.jpg"], dir.path());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!stderr.contains("GPS IFD at offset"));
    assert!(!stderr.contains("config:"));
    assert!(!stderr.contains("DEBUG"));
}

#[test]
fn recursive_json_report() {
    let dir = TempDir::new().unwrap();
    let photos = dir.path().join("photos");
    fs::create_dir(&photos).unwrap();
    common::write_file(&photos, "a.jpg", &gps_jpeg());
    common::write_file(&photos, "b.jpg", &common::jpeg(None));

    let out = run_cli(&["-R", "--json", "photos"], dir.path());
    assert_eq!(out.status.code(), Some(0));
    assert!(dir.path().join("photos").join("a.jpg").exists());

    let reports: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["status"], "randomized");
    assert_eq!(reports[0]["fields"], 6);
    assert_eq!(reports[1]["status"], "skipped");
}
