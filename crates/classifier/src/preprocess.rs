//! Raster-to-tensor preprocessing
//!
//! The model expects a (1, 28, 28, 1) float tensor of inverted intensities:
//! ink drawn in a dark foreground on a light background maps to high values.
//! Pixel values are kept on the 0..255 scale the model was shipped with; no
//! division by 255 happens here (see DESIGN.md).

use canvas::RasterSurface;
use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::ClassifyError;

/// Model input edge length in pixels
pub const IMAGE_SIDE: usize = 28;

/// Total values per input tensor (batch=1, channel=1)
pub const IMAGE_PIXELS: usize = IMAGE_SIDE * IMAGE_SIDE;

/// A (1, 28, 28, 1) input tensor, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct DigitTensor {
    values: Vec<f32>,
}

impl DigitTensor {
    /// Build a tensor from raw values; must hold exactly 28*28 entries
    pub fn from_values(values: Vec<f32>) -> Result<Self, ClassifyError> {
        if values.len() != IMAGE_PIXELS {
            return Err(ClassifyError::InvalidInput {
                expected: IMAGE_PIXELS,
                actual: values.len(),
            });
        }
        Ok(Self { values })
    }

    /// Build a tensor from an RGBA image of any size.
    ///
    /// The image is bilinearly resized to 28x28; each pixel contributes its
    /// inverted blue channel (`255 - b`) as a float.
    pub fn from_image(image: &RgbaImage) -> Self {
        let resized = imageops::resize(
            image,
            IMAGE_SIDE as u32,
            IMAGE_SIDE as u32,
            FilterType::Triangle,
        );

        let mut values = Vec::with_capacity(IMAGE_PIXELS);
        for y in 0..IMAGE_SIDE as u32 {
            for x in 0..IMAGE_SIDE as u32 {
                let pixel = resized.get_pixel(x, y);
                values.push((255 - pixel[2]) as f32);
            }
        }
        Self { values }
    }

    /// Build a tensor straight from the canvas surface
    pub fn from_surface(surface: &RasterSurface) -> Result<Self, ClassifyError> {
        let bytes = surface.to_rgba8();
        let expected = (surface.width as usize) * (surface.height as usize) * 4;
        let actual = bytes.len();
        let Some(image) = RgbaImage::from_raw(surface.width, surface.height, bytes) else {
            return Err(ClassifyError::InvalidInput { expected, actual });
        };
        Ok(Self::from_image(&image))
    }

    /// The tensor values in row-major (height, width) order
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}
