use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use dsx_lib::color::rgb_to_hex;
use dsx_lib::tailwind::{common_color_name, convert_element_styles};
use dsx_lib::{
    ConfigExtensions, ConvertDocument, ConvertStatus, ConvertedElement, DsxError, Element,
    OriginalStyles,
};
use serde::Deserialize;

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_json_file, write_output, DsxReport};

/// Lenient view of an extraction document: only the fields conversion needs.
#[derive(Debug, Deserialize)]
struct ConvertInput {
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    elements: Vec<Element>,
}

/// Run the convert command: map every element's styles (plus an optional
/// hover variant) onto utility classes.
pub fn run_convert(
    verbose: bool,
    input: PathBuf,
    output: PathBuf,
    format: OutputFormat,
) -> ExitCode {
    let raw = match std::fs::read_to_string(&input) {
        Ok(raw) => raw,
        Err(_) => {
            return render_error(DsxError::InputNotFound(input.display().to_string()), format)
        }
    };
    let document: ConvertInput = match serde_json::from_str(&raw) {
        Ok(doc) => doc,
        Err(err) => return render_error(DsxError::Serialization(err), format),
    };

    if verbose {
        eprintln!("Converting {} elements\u{2026}", document.elements.len());
    }

    let mut results = Vec::with_capacity(document.elements.len());
    let mut custom_colors: BTreeMap<String, String> = BTreeMap::new();

    for element in &document.elements {
        let classes = convert_element_styles(&element.styles, element.states.hover.as_ref());

        // Collect non-common background colors as theme extensions.
        if let Some(bg_hex) = element
            .styles
            .background_color
            .as_deref()
            .and_then(rgb_to_hex)
        {
            if common_color_name(&bg_hex).is_none() {
                custom_colors.insert(format!("custom-{}", custom_colors.len()), bg_hex);
            }
        }

        results.push(ConvertedElement {
            selector: element.selector.clone(),
            tag: element.tag.clone(),
            role: element.role.clone(),
            text: element.text.clone(),
            tailwind_classes: classes,
            original_styles: OriginalStyles {
                background_color: element.styles.background_color.clone(),
                color: element.styles.color.clone(),
                padding: element.styles.padding.clone(),
                border_radius: element.styles.border_radius.clone(),
                font_size: element.styles.font_size.clone(),
            },
        });
    }

    let custom_count = custom_colors.len();
    let converted = ConvertDocument {
        source: document.url.or(document.source),
        elements_converted: results.len(),
        elements: results,
        config_extensions: if custom_colors.is_empty() {
            None
        } else {
            Some(ConfigExtensions {
                colors: custom_colors,
            })
        },
    };

    if let Err(err) = write_json_file(&converted, &output) {
        return render_error(err, format);
    }

    let status = ConvertStatus {
        success: true,
        elements_converted: converted.elements_converted,
        custom_colors: custom_count,
        output,
    };

    if let Err(err) = write_output(&DsxReport::Convert(status), format, None) {
        return render_error(err, format);
    }

    ExitCode::SUCCESS
}
