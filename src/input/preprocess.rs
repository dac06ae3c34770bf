//! Image Preprocessing Module
//!
//! Decodes raw image bytes and converts them into the tensor layout the
//! serving model expects: RGB channel order, HWC layout, pixel values
//! scaled to `[0, 1]`. The model accepts variable spatial dimensions, so
//! no resizing is applied.

use image::DynamicImage;

use crate::client::envelope::ImageInstance;
use crate::utils::error::Result;

/// A decoded image as a flat HWC tensor with pixels scaled to `[0, 1]`
#[derive(Debug, Clone)]
pub struct ImageTensor {
    /// Row-major HWC data: `data[(row * width + col) * 3 + channel]`
    data: Vec<f32>,
    width: u32,
    height: u32,
}

impl ImageTensor {
    /// Decode raw image bytes (any format the `image` crate understands)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::from_image(&decoded))
    }

    /// Convert a decoded image, scaling each channel to `[0, 1]`
    pub fn from_image(image: &DynamicImage) -> Self {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for pixel in rgb.pixels() {
            data.push(f32::from(pixel[0]) / 255.0);
            data.push(f32::from(pixel[1]) / 255.0);
            data.push(f32::from(pixel[2]) / 255.0);
        }

        Self {
            data,
            width,
            height,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of scalar values (height * width * 3)
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the tensor holds no pixels
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// RGB values of a single pixel
    pub fn pixel(&self, row: u32, col: u32) -> [f32; 3] {
        let base = ((row * self.width + col) * 3) as usize;
        [self.data[base], self.data[base + 1], self.data[base + 2]]
    }

    /// Nest the tensor as rows of pixels for the serving API's
    /// `instances` envelope
    pub fn to_instance(&self) -> ImageInstance {
        (0..self.height)
            .map(|row| (0..self.width).map(|col| self.pixel(row, col)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn two_pixel_image() -> DynamicImage {
        // One row: pure red, then (0, 128, 255)
        let buffer = RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 128, 255]).unwrap();
        DynamicImage::ImageRgb8(buffer)
    }

    #[test]
    fn test_scaling_and_layout() {
        let tensor = ImageTensor::from_image(&two_pixel_image());

        assert_eq!(tensor.width(), 2);
        assert_eq!(tensor.height(), 1);
        assert_eq!(tensor.len(), 6);

        let first = tensor.pixel(0, 0);
        assert_eq!(first, [1.0, 0.0, 0.0]);

        let second = tensor.pixel(0, 1);
        assert_eq!(second[0], 0.0);
        assert!((second[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(second[2], 1.0);
    }

    #[test]
    fn test_to_instance_shape() {
        let tensor = ImageTensor::from_image(&two_pixel_image());
        let instance = tensor.to_instance();

        assert_eq!(instance.len(), 1); // rows
        assert_eq!(instance[0].len(), 2); // cols
        assert_eq!(instance[0][0], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_values_stay_in_unit_range() {
        let tensor = ImageTensor::from_image(&DynamicImage::new_rgb8(4, 3));
        assert_eq!(tensor.len(), 4 * 3 * 3);

        let instance = tensor.to_instance();
        for row in &instance {
            for pixel in row {
                for &channel in pixel {
                    assert!((0.0..=1.0).contains(&channel));
                }
            }
        }
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = ImageTensor::from_bytes(b"not an image at all");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_bytes_decodes_png() {
        // Encode a tiny PNG in memory, then decode it back
        let mut bytes = Vec::new();
        let img = two_pixel_image();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();

        let tensor = ImageTensor::from_bytes(&bytes).unwrap();
        assert_eq!(tensor.width(), 2);
        assert_eq!(tensor.pixel(0, 0), [1.0, 0.0, 0.0]);
    }
}
