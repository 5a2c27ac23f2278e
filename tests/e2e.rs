//! End-to-end integration tests for hdf2tif.
//!
//! A real HEG/GDAL install is not assumed: the external tools are replaced
//! by generated shell scripts that mimic their observable behaviour —
//! hegtool drops a `HegHdr.hdr` into its cwd, resample consumes the `-p`
//! parameter file and creates the output plus its `.met` sidecar, gdalwarp
//! copies input to output. The scripts capture what they were given so the
//! tests can assert on the exact parameter text and arguments.
//!
//! Run with:
//!   cargo test --test e2e -- --nocapture

#![cfg(unix)]

use hdf2tif::{convert, convert_to, inspect, ConversionConfig, Hdf2TifError};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

const SAMPLE_HEADER: &str = "\
HDF_FILENAME = /data/MOD13Q1.A2017145.h13v10.hdf
INPUT_SHORTNAME = MOD13Q1
GRID_NAMES = MODIS_Grid_16DAY_250m_500m_VI,
GRID_UL_CORNER_LATLON = 9.999999 -59.978479
GRID_LR_CORNER_LATLON = -0.000000 -49.990909
";

/// Write an executable shell script into `dir`.
fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A fake hegtool that writes `header` (plus a log file) into its cwd.
fn fake_hegtool(dir: &Path, header: &str) -> PathBuf {
    write_script(
        dir,
        "hegtool",
        &format!("cat > HegHdr.hdr <<'EOF'\n{header}EOF\n: > hegtool.log\n"),
    )
}

/// A fake resample that captures the parameter file to `capture`, then
/// creates the output raster, its `.met` sidecar and the usual droppings.
fn fake_resample(dir: &Path, capture: &Path) -> PathBuf {
    write_script(
        dir,
        "resample",
        &format!(
            "cp \"$2\" \"{capture}\"\n\
             out=$(sed -n 's/^OUTPUT_FILENAME = //p' \"$2\")\n\
             printf 'TIF' > \"$out\"\n\
             : > \"$out.met\"\n\
             : > resample.log\n\
             : > filetable.temp_001\n\
             : > GetAttrtemp_001\n",
            capture = capture.display()
        ),
    )
}

/// A fake gdalwarp that records its arguments and writes a recognisable
/// payload into the target path.
fn fake_gdalwarp(dir: &Path, capture: &Path) -> PathBuf {
    write_script(
        dir,
        "gdalwarp",
        &format!(
            "printf '%s\\n' \"$@\" > \"{capture}\"\nprintf 'WARPED' > \"$2\"\n",
            capture = capture.display()
        ),
    )
}

struct Harness {
    dir: TempDir,
    input: PathBuf,
    resample_capture: PathBuf,
    warp_capture: PathBuf,
}

impl Harness {
    fn new(header: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("scene.hdf");
        std::fs::write(&input, "not really hdf").unwrap();
        fake_hegtool(dir.path(), header);
        let resample_capture = dir.path().join("resample_params.txt");
        fake_resample(dir.path(), &resample_capture);
        let warp_capture = dir.path().join("warp_args.txt");
        fake_gdalwarp(dir.path(), &warp_capture);
        Self {
            dir,
            input,
            resample_capture,
            warp_capture,
        }
    }

    fn config(&self) -> hdf2tif::config::ConversionConfigBuilder {
        ConversionConfig::builder()
            .stat_cmd(self.dir.path().join("hegtool"))
            .resample_cmd(self.dir.path().join("resample"))
            .warp_cmd(self.dir.path().join("gdalwarp"))
            .verbose(false)
    }
}

// ── Full pipeline ────────────────────────────────────────────────────────────

#[test]
fn converts_granule_end_to_end() {
    let h = Harness::new(SAMPLE_HEADER);
    let output = h.dir.path().join("scene.tif");

    let config = h.config().band("evi").build().unwrap();
    convert_to(&h.input, &output, &config).expect("conversion should succeed");

    assert!(output.is_file(), "output raster not produced");
    assert!(
        !output.with_file_name("scene.tif.met").exists(),
        ".met sidecar should have been cleaned up"
    );

    let params = std::fs::read_to_string(&h.resample_capture).unwrap();
    let lines: Vec<&str> = params.lines().collect();
    assert_eq!(lines[0], "NUM_RUNS = 1");
    assert_eq!(lines[2], "BEGIN");
    assert_eq!(*lines.last().unwrap(), "END");
    assert!(params.contains("FIELD_NAME = 250m 16 days EVI\n"));
    assert!(params.contains("OBJECT_NAME = MODIS_Grid_16DAY_250m_500m_VI|\n"));
    assert!(params.contains("SPATIAL_SUBSET_UL_CORNER = ( 9.999999 -59.978479 )\n"));
    assert!(params.contains("SPATIAL_SUBSET_LR_CORNER = ( -0.000000 -49.990909 )\n"));
    assert!(params.contains("RESAMPLING_TYPE = BI\n"));
    assert!(params.contains("ELLIPSOID_CODE = WGS84\n"));
    assert!(params.contains(&format!("OUTPUT_FILENAME = {}\n", output.display())));
}

#[test]
fn derives_output_path_next_to_input() {
    let h = Harness::new(SAMPLE_HEADER);

    let config = h.config().band("ndvi").build().unwrap();
    let output = convert(&h.input, &config).expect("conversion should succeed");

    assert_eq!(output, h.dir.path().join("scene.tif"));
    assert!(output.is_file());

    let params = std::fs::read_to_string(&h.resample_capture).unwrap();
    assert!(params.contains("FIELD_NAME = 250m 16 days NDVI\n"));
}

#[test]
fn unknown_band_alias_is_passed_verbatim() {
    let h = Harness::new(SAMPLE_HEADER);
    let output = h.dir.path().join("scene.tif");

    let config = h.config().band("250m 16 days NDVI").build().unwrap();
    convert_to(&h.input, &output, &config).unwrap();

    let params = std::fs::read_to_string(&h.resample_capture).unwrap();
    assert!(params.contains("FIELD_NAME = 250m 16 days NDVI\n"));
}

// ── Warp stage ───────────────────────────────────────────────────────────────

#[test]
fn warp_uppercases_srs_and_replaces_output() {
    let h = Harness::new(SAMPLE_HEADER);
    let output = h.dir.path().join("scene.tif");

    let config = h
        .config()
        .band("ndvi")
        .projection("epsg:32633")
        .build()
        .unwrap();
    convert_to(&h.input, &output, &config).expect("conversion should succeed");

    let args = std::fs::read_to_string(&h.warp_capture).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(args[0], output.display().to_string());
    assert_eq!(args[2], "-t_srs");
    assert_eq!(args[3], "EPSG:32633", "SRS must be upper-cased");

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "WARPED",
        "output must have been atomically replaced by the warped raster"
    );
    // No staging leftovers next to the output.
    let leftovers: Vec<_> = std::fs::read_dir(h.dir.path())
        .unwrap()
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().contains(".warp"))
        .collect();
    assert!(leftovers.is_empty(), "staging file left behind: {leftovers:?}");
}

#[test]
fn no_projection_means_no_warp_invocation() {
    let h = Harness::new(SAMPLE_HEADER);
    let output = h.dir.path().join("scene.tif");

    let config = h.config().band("ndvi").build().unwrap();
    convert_to(&h.input, &output, &config).unwrap();

    assert!(!h.warp_capture.exists(), "gdalwarp should not have run");
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "TIF");
}

// ── Failure modes ────────────────────────────────────────────────────────────

#[test]
fn stat_failure_aborts_before_resample_runs() {
    let h = Harness::new(SAMPLE_HEADER);
    write_script(h.dir.path(), "hegtool", "exit 3\n");
    let output = h.dir.path().join("scene.tif");

    let config = h.config().band("ndvi").build().unwrap();
    let err = convert_to(&h.input, &output, &config).unwrap_err();

    match err {
        Hdf2TifError::ToolFailed { tool, status } => {
            assert_eq!(tool, "hegtool");
            assert_eq!(status.code(), Some(3));
        }
        other => panic!("expected ToolFailed, got: {other}"),
    }
    assert!(
        !h.resample_capture.exists(),
        "resample must not run after a stat failure"
    );
    assert!(!output.exists());
}

#[test]
fn resample_failure_is_fatal() {
    let h = Harness::new(SAMPLE_HEADER);
    write_script(h.dir.path(), "resample", "exit 2\n");
    let output = h.dir.path().join("scene.tif");

    let config = h.config().band("ndvi").build().unwrap();
    let err = convert_to(&h.input, &output, &config).unwrap_err();
    assert!(matches!(err, Hdf2TifError::ToolFailed { ref tool, .. } if tool == "resample"));
}

#[test]
fn missing_header_field_is_fatal() {
    // Header without GRID_NAMES.
    let h = Harness::new(
        "INPUT_SHORTNAME = MOD13Q1\n\
         GRID_UL_CORNER_LATLON = 9.9 -59.9\n\
         GRID_LR_CORNER_LATLON = -0.0 -49.9\n",
    );
    let output = h.dir.path().join("scene.tif");

    let config = h.config().band("ndvi").build().unwrap();
    let err = convert_to(&h.input, &output, &config).unwrap_err();
    assert!(matches!(
        err,
        Hdf2TifError::MissingHeaderField { ref field } if field == "grid_names"
    ));
    assert!(
        !h.resample_capture.exists(),
        "resample must not run without a complete header"
    );
}

#[test]
fn missing_input_fails_without_tool_invocation() {
    let h = Harness::new(SAMPLE_HEADER);
    // Track hegtool invocations via a marker file.
    let marker = h.dir.path().join("hegtool_ran");
    write_script(
        h.dir.path(),
        "hegtool",
        &format!(": > \"{}\"\n", marker.display()),
    );

    let config = h.config().band("ndvi").build().unwrap();
    let err = convert(h.dir.path().join("absent.hdf"), &config).unwrap_err();

    assert!(matches!(err, Hdf2TifError::FileNotFound { .. }));
    assert!(!marker.exists(), "no tool may run for a missing input");
}

// ── Inspect ──────────────────────────────────────────────────────────────────

#[test]
fn inspect_returns_the_parsed_report() {
    let h = Harness::new(SAMPLE_HEADER);

    let config = h.config().band("ndvi").build().unwrap();
    let report = inspect(&h.input, &config).expect("inspect should succeed");

    assert_eq!(report.get("input_shortname"), Some("MOD13Q1"));
    assert_eq!(
        report.get("grid_names"),
        Some("MODIS_Grid_16DAY_250m_500m_VI,")
    );
    assert!(
        !h.resample_capture.exists(),
        "inspect must not run the resampler"
    );
}

// ── Environment overrides ────────────────────────────────────────────────────

#[test]
fn heg_environment_reaches_the_tools() {
    let h = Harness::new(SAMPLE_HEADER);
    let env_capture = h.dir.path().join("env.txt");
    write_script(
        h.dir.path(),
        "hegtool",
        &format!(
            "printf '%s\\n%s\\n%s\\n' \"$HEGUSER\" \"$MRTDATADIR\" \"$PGSHOME\" > \"{}\"\n\
             cat > HegHdr.hdr <<'EOF'\n{SAMPLE_HEADER}EOF\n",
            env_capture.display()
        ),
    );

    let config = h
        .config()
        .band("ndvi")
        .heg_root("/opt/heg")
        .heg_user("ALICE")
        .build()
        .unwrap();
    inspect(&h.input, &config).unwrap();

    let env = std::fs::read_to_string(&env_capture).unwrap();
    let lines: Vec<&str> = env.lines().collect();
    assert_eq!(lines, vec!["ALICE", "/opt/heg/data", "/opt/heg/TOOLKIT_MTD"]);
    assert!(
        std::env::var("HEGUSER").is_err(),
        "the test process's own environment must stay untouched"
    );
}
