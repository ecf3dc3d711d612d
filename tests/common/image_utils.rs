//! Image inspection utilities for testing.
//!
//! Helpers for checking rendered figures loaded from disk or kept in memory.

#![allow(dead_code)]

use image::{DynamicImage, GenericImageView, ImageError, ImageFormat, RgbaImage};
use std::collections::HashSet;
use std::path::Path;

/// Load an image from a file
pub fn load_image(path: &Path) -> Result<DynamicImage, ImageError> {
    image::open(path)
}

/// Detect the format of an image file from its leading bytes
pub fn detect_file_format(path: &Path) -> Option<ImageFormat> {
    let bytes = std::fs::read(path).ok()?;
    image::guess_format(&bytes).ok()
}

/// Check if an image has the expected dimensions
///
/// # Returns
///
/// * `Ok(())` if the image has the expected dimensions
/// * `Err(String)` with an error message if the dimensions differ
pub fn assert_image_dimensions(
    image: &DynamicImage,
    expected_width: u32,
    expected_height: u32,
) -> Result<(), String> {
    let (actual_width, actual_height) = image.dimensions();

    if actual_width != expected_width || actual_height != expected_height {
        return Err(format!(
            "Image dimensions differ: actual = {}x{}, expected = {}x{}",
            actual_width, actual_height, expected_width, expected_height
        ));
    }

    Ok(())
}

/// Distinct colors inside the rectangle `[x0, x1) x [y0, y1)`
pub fn distinct_colors(image: &RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32) -> HashSet<[u8; 4]> {
    let mut colors = HashSet::new();
    for y in y0..y1 {
        for x in x0..x1 {
            colors.insert(image.get_pixel(x, y).0);
        }
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    #[test]
    fn test_assert_image_dimensions() {
        let img = DynamicImage::new_rgb8(10, 20);

        assert!(assert_image_dimensions(&img, 10, 20).is_ok());
        assert!(assert_image_dimensions(&img, 11, 20).is_err());
        assert!(assert_image_dimensions(&img, 10, 21).is_err());
    }

    #[test]
    fn test_distinct_colors() {
        let mut img = ImageBuffer::<Rgba<u8>, Vec<u8>>::new(3, 3);
        img.put_pixel(1, 1, Rgba([255, 0, 0, 255]));

        assert_eq!(distinct_colors(&img, 0, 0, 3, 3).len(), 2);
        assert_eq!(distinct_colors(&img, 0, 0, 1, 1).len(), 1);
    }
}
