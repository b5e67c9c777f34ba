use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use dsx_lib::{
    CompareReport, ConvertStatus, DsxError, ExtractStatus, RegionAnalysis,
};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Report payloads the binary can emit on stdout.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DsxReport {
    Compare(Box<CompareReport>),
    Extract(ExtractStatus),
    Convert(ConvertStatus),
}

/// Write a report in the requested format to stdout or a file.
pub fn write_output(
    body: &DsxReport,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), DsxError> {
    let content = match format {
        OutputFormat::Json => serde_json::to_string_pretty(body)?,
        OutputFormat::Pretty => format_pretty(body),
    };
    match output {
        Some(path) => std::fs::write(path, content)?,
        None => println!("{content}"),
    }
    Ok(())
}

/// Render an error payload on the error stream and return the fatal exit
/// code. Threshold failures use exit code 1; this is reserved for errors.
pub fn render_error(err: DsxError, format: OutputFormat) -> ExitCode {
    let payload = err.to_payload();
    match format {
        OutputFormat::Json => {
            let content = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|_| "{\"success\":false}".into());
            eprintln!("{content}");
        }
        OutputFormat::Pretty => {
            eprintln!("[ERROR] {}", payload.error);
            if let Some(remediation) = &payload.remediation {
                eprintln!("Hint: {}", remediation);
            }
        }
    }
    ExitCode::from(2)
}

/// Format a report for human consumption.
pub fn format_pretty(body: &DsxReport) -> String {
    match body {
        DsxReport::Compare(report) => {
            let mut buf = String::new();
            let status = if report.passed { "PASS" } else { "FAIL" };
            writeln!(buf, "{} Visual comparison ({})", status, report.metric).ok();
            writeln!(
                buf,
                "Similarity: {:.2}% (threshold {:.1}%)",
                report.similarity, report.threshold
            )
            .ok();
            if let Some(ssim) = report.metrics.ssim {
                writeln!(buf, "- ssim {:.2}%", ssim).ok();
            }
            if let Some(rms) = report.metrics.rms {
                writeln!(buf, "- rms  {:.2}%", rms).ok();
            }
            match &report.region_analysis {
                RegionAnalysis::Bands { top, middle, bottom } => {
                    writeln!(
                        buf,
                        "Bands: top {:.2}% / middle {:.2}% / bottom {:.2}%",
                        top, middle, bottom
                    )
                    .ok();
                }
                RegionAnalysis::SizeMismatch { recommendation, .. } => {
                    writeln!(buf, "Size mismatch: {}", recommendation).ok();
                }
            }
            if let Some(region_ssim) = &report.region_ssim {
                let failed: Vec<_> = region_ssim.iter().filter(|r| !r.passed).collect();
                if !failed.is_empty() {
                    writeln!(buf, "Failing regions:").ok();
                    for region in failed {
                        writeln!(buf, "- {} ({:.2}%)", region.name, region.ssim).ok();
                    }
                }
            }
            if let Some(recommendations) = &report.recommendations {
                writeln!(buf, "Recommendations (max 5):").ok();
                for recommendation in recommendations.iter().take(5) {
                    writeln!(buf, "- {recommendation}").ok();
                }
            }
            writeln!(buf, "Diff image: {}", report.images.diff.display()).ok();
            buf
        }
        DsxReport::Extract(status) => {
            let mut buf = String::new();
            writeln!(buf, "Extracted {} ({} colors)", status.dimensions, status.colors_extracted)
                .ok();
            writeln!(
                buf,
                "Regions analyzed: {}; elements: {}",
                status.regions_analyzed, status.elements_count
            )
            .ok();
            writeln!(buf, "Output: {}", status.output.display()).ok();
            buf
        }
        DsxReport::Convert(status) => {
            let mut buf = String::new();
            writeln!(
                buf,
                "Converted {} elements ({} custom colors)",
                status.elements_converted, status.custom_colors
            )
            .ok();
            writeln!(buf, "Output: {}", status.output.display()).ok();
            buf
        }
    }
}

/// Determine the exit code for the compare command.
pub fn exit_code_for_compare(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Write a JSON document to a file, creating parent directories as needed.
pub fn write_json_file<T: Serialize>(value: &T, path: &PathBuf) -> Result<(), DsxError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}
