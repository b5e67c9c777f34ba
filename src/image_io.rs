//! Image loading, resizing, and saving helpers.

use std::fs;
use std::path::Path;

use image::{imageops::FilterType, DynamicImage, RgbImage};

use crate::error::{DsxError, Result};

/// Load an image from disk as RGB, with an explicit not-found error so the
/// offending path shows up in the failure payload.
pub fn load_rgb_image(path: &Path) -> Result<RgbImage> {
    if !path.exists() {
        return Err(DsxError::InputNotFound(path.display().to_string()));
    }
    Ok(image::open(path)?.to_rgb8())
}

/// Resize both images to the elementwise maximum of their dimensions.
///
/// Comparison never crops: the smaller image is scaled up so that no pixels
/// of either input are discarded. Returns the inputs untouched when the
/// dimensions already match.
pub fn resize_to_common(a: &RgbImage, b: &RgbImage) -> (RgbImage, RgbImage) {
    if a.dimensions() == b.dimensions() {
        return (a.clone(), b.clone());
    }

    let width = a.width().max(b.width());
    let height = a.height().max(b.height());

    (resize_exact(a, width, height), resize_exact(b, width, height))
}

fn resize_exact(img: &RgbImage, width: u32, height: u32) -> RgbImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    DynamicImage::ImageRgb8(img.clone())
        .resize_exact(width, height, FilterType::Lanczos3)
        .to_rgb8()
}

/// Save an image as PNG, creating parent directories as needed.
pub fn save_png(img: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::TempDir;

    #[test]
    fn load_nonexistent_file_reports_path() {
        let result = load_rgb_image(Path::new("/nonexistent/path/image.png"));
        match result {
            Err(DsxError::InputNotFound(path)) => assert!(path.contains("image.png")),
            other => panic!("expected InputNotFound, got {other:?}"),
        }
    }

    #[test]
    fn resize_to_common_takes_elementwise_max() {
        let a = RgbImage::from_pixel(20, 10, Rgb([255, 0, 0]));
        let b = RgbImage::from_pixel(10, 30, Rgb([0, 255, 0]));
        let (ra, rb) = resize_to_common(&a, &b);
        assert_eq!(ra.dimensions(), (20, 30));
        assert_eq!(rb.dimensions(), (20, 30));
    }

    #[test]
    fn resize_to_common_is_identity_for_matching_sizes() {
        let a = RgbImage::from_pixel(8, 8, Rgb([1, 2, 3]));
        let b = RgbImage::from_pixel(8, 8, Rgb([4, 5, 6]));
        let (ra, rb) = resize_to_common(&a, &b);
        assert_eq!(ra.as_raw(), a.as_raw());
        assert_eq!(rb.as_raw(), b.as_raw());
    }

    #[test]
    fn save_png_creates_parent_dirs_and_round_trips() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("nested/out.png");
        let img = RgbImage::from_pixel(4, 4, Rgb([9, 8, 7]));

        save_png(&img, &path).expect("save image");
        assert!(path.exists());

        let loaded = load_rgb_image(&path).expect("reload image");
        assert_eq!(loaded.dimensions(), (4, 4));
        assert_eq!(loaded.get_pixel(0, 0).0, [9, 8, 7]);
    }
}
