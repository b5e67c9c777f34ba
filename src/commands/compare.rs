use std::path::PathBuf;
use std::process::ExitCode;

use dsx_lib::{
    analyze_differences, calculate_region_ssim, calculate_similarity, calculate_ssim,
    create_diff_image, suggest_font_sizes, BrowserManager, BrowserOptions, CompareReport,
    DsxError, ImagePaths, MetricKind, MetricValues, RegionAnalysis, RegionSpec, Viewport,
};

use crate::cli::{MetricArg, OutputFormat};
use crate::formatting::{exit_code_for_compare, render_error, write_output, DsxReport};
use crate::settings::{
    load_config, log_effective_config, resolve_compare_settings, CompareFlagSources,
};

/// Run the compare command.
#[allow(clippy::too_many_arguments)]
pub async fn run_compare(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    verbose: bool,
    original: PathBuf,
    current_url: Option<String>,
    current_image: Option<PathBuf>,
    selector: Option<String>,
    viewport: Viewport,
    auto_viewport: bool,
    threshold: f64,
    metric: MetricArg,
    wait: u64,
    font_search: bool,
    regions: Option<PathBuf>,
    output_dir: PathBuf,
    nav_timeout: u64,
    process_timeout: u64,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format),
    };
    let flags = CompareFlagSources::from_args(raw_args);
    let settings = resolve_compare_settings(
        viewport,
        threshold,
        wait,
        nav_timeout,
        process_timeout,
        &config,
        &flags,
    );
    if verbose {
        log_effective_config(config_path.as_deref(), &settings);
    }

    let original_img = match dsx_lib::load_rgb_image(&original) {
        Ok(img) => img,
        Err(err) => return render_error(err, format),
    };

    if let Err(err) = std::fs::create_dir_all(&output_dir) {
        return render_error(DsxError::Io(err), format);
    }

    let original_path = output_dir.join("original.png");
    let current_path = output_dir.join("current.png");
    let diff_path = output_dir.join("diff.png");

    // Materialize the current implementation: capture the URL or load the
    // provided screenshot.
    let current_img = if let Some(url) = current_url {
        let capture_viewport = if auto_viewport {
            Viewport {
                width: original_img.width(),
                height: original_img.height(),
            }
        } else {
            settings.viewport
        };
        if verbose {
            eprintln!("Capturing {} at {}\u{2026}", url, capture_viewport);
        }

        let manager = BrowserManager::new(BrowserOptions {
            viewport: capture_viewport,
            wait: settings.wait,
            navigation_timeout: settings.navigation_timeout,
            process_timeout: settings.process_timeout,
            ..BrowserOptions::default()
        });
        if let Err(err) = manager
            .capture_url(&url, selector.as_deref(), &current_path)
            .await
        {
            return render_error(err, format);
        }
        match dsx_lib::load_rgb_image(&current_path) {
            Ok(img) => img,
            Err(err) => return render_error(err, format),
        }
    } else {
        let Some(path) = current_image else {
            return render_error(
                DsxError::Config(
                    "Either --current-url or --current-image is required".to_string(),
                ),
                format,
            );
        };
        match dsx_lib::load_rgb_image(&path) {
            Ok(img) => img,
            Err(err) => return render_error(err, format),
        }
    };

    // Score with the selected metric(s).
    let metric: MetricKind = metric.into();
    let mut metrics = MetricValues::default();
    if matches!(metric, MetricKind::Rms | MetricKind::Both) {
        metrics.rms = Some(calculate_similarity(&original_img, &current_img));
    }
    if matches!(metric, MetricKind::Ssim | MetricKind::Both) {
        metrics.ssim = Some(calculate_ssim(&original_img, &current_img));
    }
    let similarity = match metric {
        MetricKind::Rms => metrics.rms.unwrap_or(0.0),
        MetricKind::Ssim | MetricKind::Both => metrics.ssim.unwrap_or(0.0),
    };

    if verbose {
        eprintln!("Similarity: {:.2}% ({})", similarity, metric);
    }

    // Persist the compared images and the enhanced diff.
    let diff_img = create_diff_image(&original_img, &current_img);
    for (img, path) in [
        (&original_img, &original_path),
        (&current_img, &current_path),
        (&diff_img, &diff_path),
    ] {
        if let Err(err) = dsx_lib::save_png(img, path) {
            return render_error(err, format);
        }
    }

    let region_analysis = analyze_differences(&original_img, &current_img);
    let passed = similarity >= settings.threshold;

    let mut recommendations = if passed {
        None
    } else {
        let mut recs = Vec::new();
        if similarity < 80.0 {
            recs.push("Large difference detected. Check overall layout and structure.".to_string());
        }
        if let RegionAnalysis::Bands { top, middle, bottom } = &region_analysis {
            if *top > 30.0 {
                recs.push("Header/top area has significant differences.".to_string());
            }
            if *middle > 30.0 {
                recs.push(
                    "Main content area has differences. Check colors and spacing.".to_string(),
                );
            }
            if *bottom > 30.0 {
                recs.push("Footer/bottom area has differences.".to_string());
            }
        }
        recs.extend([
            "Re-read the original image and diff image to identify problem areas.".to_string(),
            "Re-run the extract command with refined regions for problematic areas.".to_string(),
            "Verify background colors match exactly.".to_string(),
            "Check padding and margin values.".to_string(),
        ]);
        Some(recs)
    };

    let font_search_suggestions =
        font_search.then(|| suggest_font_sizes(&original_img, &current_img));

    // Per-region SSIM: a malformed region file is reported in-band without
    // aborting the rest of the comparison.
    let mut region_ssim = None;
    let mut region_ssim_error = None;
    if let Some(path) = regions {
        match load_region_specs(&path) {
            Ok(specs) => {
                let results = calculate_region_ssim(&original_img, &current_img, &specs);
                let failed: Vec<String> = results
                    .iter()
                    .filter(|r| !r.passed)
                    .map(|r| format!("{}({}%)", r.name, r.ssim))
                    .collect();
                if !failed.is_empty() {
                    if let Some(recs) = recommendations.as_mut() {
                        recs.insert(
                            0,
                            format!("{} region(s) below 90%: {}", failed.len(), failed.join(", ")),
                        );
                    }
                }
                region_ssim = Some(results);
            }
            Err(err) => region_ssim_error = Some(err.to_string()),
        }
    }

    let report = CompareReport {
        success: true,
        similarity,
        metric,
        metrics,
        threshold: settings.threshold,
        passed,
        region_analysis,
        images: ImagePaths {
            original: original_path,
            current: current_path,
            diff: diff_path,
        },
        recommendations,
        font_search_suggestions,
        region_ssim,
        region_ssim_error,
    };

    if let Err(err) = write_output(&DsxReport::Compare(Box::new(report)), format, output.as_deref())
    {
        return render_error(err, format);
    }

    exit_code_for_compare(passed)
}

fn load_region_specs(path: &std::path::Path) -> Result<Vec<RegionSpec>, DsxError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|_| DsxError::InputNotFound(path.display().to_string()))?;
    Ok(serde_json::from_str(&raw)?)
}
