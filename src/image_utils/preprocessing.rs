use crate::errors::DetectionError;
use image::RgbImage;
use image::imageops::{self, FilterType};
use ndarray::Array4;

/// Resizes and normalizes a photo into the tensor layout the model expects.
///
/// The image is stretched to exactly `target_size` x `target_size`; aspect
/// ratio is deliberately not preserved, and the decoder's independent per-axis
/// scale factors undo the stretch when boxes are mapped back. The output is
/// channel first: all red values, then all green, then all blue, each 8-bit
/// value divided by 255.
pub fn preprocess_image(
    image: &RgbImage,
    target_size: u32,
) -> Result<Array4<f32>, DetectionError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(DetectionError::InvalidInput { width, height });
    }
    let resized = imageops::resize(image, target_size, target_size, FilterType::Triangle);
    let size = target_size as usize;
    let mut tensor = Array4::zeros((1, 3, size, size));
    for pixel in resized.enumerate_pixels() {
        let x = pixel.0 as usize;
        let y = pixel.1 as usize;
        let [r, g, b] = pixel.2.0;
        tensor[[0, 0, y, x]] = (r as f32) / 255.;
        tensor[[0, 1, y, x]] = (g as f32) / 255.;
        tensor[[0, 2, y, x]] = (b as f32) / 255.;
    }
    Ok(tensor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn rejects_empty_images() {
        let empty = RgbImage::new(0, 5);
        assert!(matches!(
            preprocess_image(&empty, 640),
            Err(DetectionError::InvalidInput { width: 0, height: 5 })
        ));
    }

    #[test]
    fn lays_pixels_out_channel_first() {
        // One pure-color pixel per corner; at the identity size the resize
        // leaves them untouched.
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        img.put_pixel(1, 1, Rgb([255, 255, 255]));

        let tensor = preprocess_image(&img, 2).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 2, 2]);
        // The array dimensions encode (image, channel, row, column).
        assert_eq!(
            (tensor[[0, 0, 0, 0]], tensor[[0, 1, 0, 0]], tensor[[0, 2, 0, 0]]),
            (1.0, 0.0, 0.0)
        );
        assert_eq!(
            (tensor[[0, 0, 0, 1]], tensor[[0, 1, 0, 1]], tensor[[0, 2, 0, 1]]),
            (0.0, 1.0, 0.0)
        );
        assert_eq!(
            (tensor[[0, 0, 1, 0]], tensor[[0, 1, 1, 0]], tensor[[0, 2, 1, 0]]),
            (0.0, 0.0, 1.0)
        );
        assert_eq!(
            (tensor[[0, 0, 1, 1]], tensor[[0, 1, 1, 1]], tensor[[0, 2, 1, 1]]),
            (1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn stretches_non_square_images_to_the_target_square() {
        let img = RgbImage::from_pixel(8, 2, Rgb([100, 150, 200]));
        let tensor = preprocess_image(&img, 4).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 4, 4]);
        // A uniform image stays uniform through the stretch.
        assert_eq!(tensor[[0, 0, 3, 3]], 100.0 / 255.0);
        assert_eq!(tensor[[0, 1, 0, 2]], 150.0 / 255.0);
        assert_eq!(tensor[[0, 2, 2, 0]], 200.0 / 255.0);
    }
}
