use image::{ImageResult, RgbImage};
use std::path::Path;

/// Decodes a photo into 24-bit color, the only pixel format the
/// preprocessor consumes.
pub fn read_image_as_rgb8(filepath: &Path) -> ImageResult<RgbImage> {
    Ok(image::open(filepath)?.into_rgb8())
}
