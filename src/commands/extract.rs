use std::path::PathBuf;
use std::process::ExitCode;

use dsx_lib::{
    build_elements, extract_color_palette, extract_region_styles, Dimensions, DsxError,
    ExtractDocument, ExtractStatus, RegionSpec,
};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_json_file, write_output, DsxReport};

/// Run the extract command: palette + optional region analysis over a local
/// design image.
pub fn run_extract(
    verbose: bool,
    image: PathBuf,
    regions: Option<PathBuf>,
    palette_size: usize,
    output: PathBuf,
    format: OutputFormat,
) -> ExitCode {
    let img = match dsx_lib::load_rgb_image(&image) {
        Ok(img) => img,
        Err(err) => return render_error(err, format),
    };
    let (width, height) = (img.width(), img.height());

    if verbose {
        eprintln!("Loaded {} ({}x{})", image.display(), width, height);
    }

    let palette = extract_color_palette(&img, palette_size);

    // Group palette hexes by category, preserving coverage order.
    let mut categorized: std::collections::BTreeMap<String, Vec<String>> = Default::default();
    for color in &palette {
        categorized
            .entry(color.category.as_str().to_string())
            .or_default()
            .push(color.hex.clone());
    }

    let regions_data = match regions {
        Some(path) => {
            let raw = match std::fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(_) => {
                    return render_error(
                        DsxError::InputNotFound(path.display().to_string()),
                        format,
                    )
                }
            };
            let specs: Vec<RegionSpec> = match serde_json::from_str(&raw) {
                Ok(specs) => specs,
                Err(err) => return render_error(DsxError::Serialization(err), format),
            };
            if verbose {
                eprintln!("Analyzing {} regions\u{2026}", specs.len());
            }
            extract_region_styles(&img, &specs)
        }
        None => Vec::new(),
    };

    let elements = build_elements(width, height, &palette, &regions_data);

    let source = std::fs::canonicalize(&image)
        .unwrap_or_else(|_| image.clone())
        .display()
        .to_string();

    let document = ExtractDocument {
        source,
        kind: "image".to_string(),
        dimensions: Dimensions { width, height },
        color_palette: categorized,
        dominant_colors: palette.clone(),
        elements_count: elements.len(),
        elements,
    };

    if let Err(err) = write_json_file(&document, &output) {
        return render_error(err, format);
    }

    let status = ExtractStatus {
        success: true,
        dimensions: format!("{}x{}", width, height),
        colors_extracted: palette.len(),
        regions_analyzed: regions_data.len(),
        elements_count: document.elements_count,
        output,
    };

    if let Err(err) = write_output(&DsxReport::Extract(status), format, None) {
        return render_error(err, format);
    }

    ExitCode::SUCCESS
}
