//! Integration tests driving the compiled binary's compare command.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use image::{Rgb, RgbImage};
use tempfile::TempDir;

fn dsx_binary() -> &'static str {
    env!("CARGO_BIN_EXE_dsx")
}

fn write_solid(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
    let img = RgbImage::from_pixel(width, height, Rgb(rgb));
    img.save_with_format(path, image::ImageFormat::Png)
        .expect("write test image");
}

fn run_compare(dir: &TempDir, extra: &[&str]) -> Output {
    let out_dir = dir.path().join("out");
    let mut cmd = Command::new(dsx_binary());
    cmd.current_dir(dir.path())
        .arg("compare")
        .arg("--output-dir")
        .arg(&out_dir);
    cmd.args(extra);
    cmd.output().expect("run dsx compare")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout should be JSON ({e}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

fn stderr_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stderr).unwrap_or_else(|e| {
        panic!(
            "stderr should be JSON ({e}): {}",
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

#[test]
fn identical_images_pass_with_perfect_scores() {
    let dir = TempDir::new().expect("tempdir");
    let original = dir.path().join("original.png");
    let current = dir.path().join("current.png");
    write_solid(&original, 100, 100, [255, 0, 0]);
    write_solid(&current, 100, 100, [255, 0, 0]);

    let output = run_compare(
        &dir,
        &[
            "--original",
            original.to_str().unwrap(),
            "--current-image",
            current.to_str().unwrap(),
            "--metric",
            "both",
        ],
    );

    assert_eq!(output.status.code(), Some(0));
    let report = stdout_json(&output);
    assert_eq!(report["success"], true);
    assert_eq!(report["passed"], true);
    assert_eq!(report["similarity"], 100.0);
    assert_eq!(report["metrics"]["ssim"], 100.0);
    assert_eq!(report["metrics"]["rms"], 100.0);
    assert_eq!(report["metric"], "both");
    assert_eq!(report["regionAnalysis"]["top"], 0.0);
    assert_eq!(report["regionAnalysis"]["middle"], 0.0);
    assert_eq!(report["regionAnalysis"]["bottom"], 0.0);
    assert!(report.get("recommendations").is_none());

    // The diff image is written and uniformly black.
    let diff_path = PathBuf::from(report["images"]["diff"].as_str().unwrap());
    let diff_abs = if diff_path.is_absolute() {
        diff_path
    } else {
        dir.path().join(diff_path)
    };
    let diff = image::open(&diff_abs).expect("diff image exists").to_rgb8();
    assert!(diff.pixels().all(|p| p.0 == [0, 0, 0]));
}

#[test]
fn large_difference_fails_with_recommendations() {
    let dir = TempDir::new().expect("tempdir");
    let original = dir.path().join("original.png");
    let current = dir.path().join("current.png");
    write_solid(&original, 100, 100, [0, 0, 0]);
    write_solid(&current, 100, 100, [255, 255, 255]);

    let output = run_compare(
        &dir,
        &[
            "--original",
            original.to_str().unwrap(),
            "--current-image",
            current.to_str().unwrap(),
            "--metric",
            "rms",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let report = stdout_json(&output);
    assert_eq!(report["passed"], false);
    assert_eq!(report["similarity"], 0.0);
    let recommendations = report["recommendations"].as_array().expect("recommendations");
    assert!(recommendations
        .iter()
        .any(|r| r.as_str().unwrap_or_default().contains("Large difference detected")));
    assert!(recommendations
        .iter()
        .any(|r| r.as_str().unwrap_or_default().contains("background colors")));
}

#[test]
fn missing_original_is_a_fatal_error() {
    let dir = TempDir::new().expect("tempdir");
    let current = dir.path().join("current.png");
    write_solid(&current, 50, 50, [0, 0, 0]);

    let output = run_compare(
        &dir,
        &[
            "--original",
            "missing.png",
            "--current-image",
            current.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(2));
    let payload = stderr_json(&output);
    assert_eq!(payload["success"], false);
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("missing.png"));
    assert!(output.stdout.is_empty());
}

#[test]
fn malformed_region_file_is_reported_in_band() {
    let dir = TempDir::new().expect("tempdir");
    let original = dir.path().join("original.png");
    let current = dir.path().join("current.png");
    write_solid(&original, 100, 100, [10, 20, 30]);
    write_solid(&current, 100, 100, [10, 20, 30]);

    let regions = dir.path().join("regions.json");
    std::fs::write(&regions, "not valid json {").expect("write bad regions");

    let output = run_compare(
        &dir,
        &[
            "--original",
            original.to_str().unwrap(),
            "--current-image",
            current.to_str().unwrap(),
            "--regions",
            regions.to_str().unwrap(),
        ],
    );

    // The comparison still completes and passes.
    assert_eq!(output.status.code(), Some(0));
    let report = stdout_json(&output);
    assert_eq!(report["passed"], true);
    assert!(report["regionSSIMError"].is_string());
    assert!(report.get("regionSSIM").is_none());
}

#[test]
fn region_ssim_reports_per_region_scores() {
    let dir = TempDir::new().expect("tempdir");
    let original = dir.path().join("original.png");
    let current_img_path = dir.path().join("current.png");
    write_solid(&original, 100, 100, [255, 255, 255]);

    // Corrupt only the left half of the current implementation.
    let mut current = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
    for y in 0..100 {
        for x in 0..50 {
            current.put_pixel(x, y, Rgb([0, 0, 0]));
        }
    }
    current
        .save_with_format(&current_img_path, image::ImageFormat::Png)
        .expect("write current");

    let regions = dir.path().join("regions.json");
    std::fs::write(
        &regions,
        r#"[
            {"name": "left", "bounds": {"x": 0, "y": 0, "w": 50, "h": 100}},
            {"name": "right", "bounds": {"x": 50, "y": 0, "w": 50, "h": 100}},
            {"name": "tiny", "bounds": {"x": 0, "y": 0, "w": 5, "h": 5}}
        ]"#,
    )
    .expect("write regions");

    let output = run_compare(
        &dir,
        &[
            "--original",
            original.to_str().unwrap(),
            "--current-image",
            current_img_path.to_str().unwrap(),
            "--regions",
            regions.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let report = stdout_json(&output);
    let region_ssim = report["regionSSIM"].as_array().expect("region results");
    // The sub-window-size region is excluded; worst region comes first.
    assert_eq!(region_ssim.len(), 2);
    assert_eq!(region_ssim[0]["name"], "left");
    assert_eq!(region_ssim[0]["passed"], false);
    assert_eq!(region_ssim[1]["name"], "right");
    assert_eq!(region_ssim[1]["passed"], true);

    // Failing regions are surfaced at the top of the recommendations.
    let recommendations = report["recommendations"].as_array().expect("recommendations");
    assert!(recommendations[0]
        .as_str()
        .unwrap_or_default()
        .contains("region(s) below 90%"));
}

#[test]
fn size_mismatch_is_a_recommendation_not_a_failure() {
    let dir = TempDir::new().expect("tempdir");
    let original = dir.path().join("original.png");
    let current = dir.path().join("current.png");
    write_solid(&original, 100, 50, [40, 40, 40]);
    write_solid(&current, 80, 50, [40, 40, 40]);

    let output = run_compare(
        &dir,
        &[
            "--original",
            original.to_str().unwrap(),
            "--current-image",
            current.to_str().unwrap(),
            "--metric",
            "rms",
        ],
    );

    // Uniform color survives the resize, so the comparison still passes.
    assert_eq!(output.status.code(), Some(0));
    let report = stdout_json(&output);
    assert_eq!(report["similarity"], 100.0);
    assert_eq!(report["regionAnalysis"]["sizesDifferent"], true);
    assert_eq!(report["regionAnalysis"]["original"]["width"], 100);
    assert_eq!(report["regionAnalysis"]["current"]["width"], 80);
    assert!(report["regionAnalysis"]["recommendation"]
        .as_str()
        .unwrap_or_default()
        .contains("--auto-viewport"));
}

#[test]
fn font_search_emits_suggestions_field() {
    let dir = TempDir::new().expect("tempdir");
    let original = dir.path().join("original.png");
    let current = dir.path().join("current.png");
    write_solid(&original, 200, 200, [128, 128, 128]);
    write_solid(&current, 200, 200, [128, 128, 128]);

    let output = run_compare(
        &dir,
        &[
            "--original",
            original.to_str().unwrap(),
            "--current-image",
            current.to_str().unwrap(),
            "--font-search",
        ],
    );

    assert_eq!(output.status.code(), Some(0));
    let report = stdout_json(&output);
    let suggestions = report["fontSearchSuggestions"]
        .as_array()
        .expect("font search field present");
    assert!(suggestions.is_empty());
}

#[test]
fn report_can_be_written_to_a_file() {
    let dir = TempDir::new().expect("tempdir");
    let original = dir.path().join("original.png");
    let current = dir.path().join("current.png");
    let report_path = dir.path().join("report.json");
    write_solid(&original, 64, 64, [1, 2, 3]);
    write_solid(&current, 64, 64, [1, 2, 3]);

    let output = run_compare(
        &dir,
        &[
            "--original",
            original.to_str().unwrap(),
            "--current-image",
            current.to_str().unwrap(),
            "--output",
            report_path.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(0));
    let raw = std::fs::read_to_string(&report_path).expect("report file written");
    let report: serde_json::Value = serde_json::from_str(&raw).expect("valid JSON report");
    assert_eq!(report["passed"], true);
}
