//! Decoded image input and the batched tensor fed to the graph.
//!
//! `ImageSurface` is the pipeline's entry type: an already-decoded RGB
//! surface with known pixel dimensions. Construction validates the caller
//! contract up front, so a zero-sized or inconsistent buffer is rejected
//! as a usage error before any inference work starts.

use image::DynamicImage;

use crate::error::DetectError;

/// Decoded RGB8 surface handed to `Detector::detect`.
#[derive(Debug)]
pub struct ImageSurface {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl ImageSurface {
    /// Wrap a row-major RGB8 buffer of `width * height * 3` bytes.
    pub fn from_rgb(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self, DetectError> {
        if width == 0 || height == 0 {
            return Err(DetectError::InvalidImage(format!(
                "zero-sized image {}x{}",
                width, height
            )));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(3))
            .ok_or_else(|| {
                DetectError::InvalidImage(format!("image dimensions {}x{} overflow", width, height))
            })?;
        if pixels.len() != expected {
            return Err(DetectError::InvalidImage(format!(
                "expected {} RGB bytes for {}x{}, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Adapt a surface decoded by the `image` crate.
    pub fn from_image(image: &DynamicImage) -> Result<Self, DetectError> {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        Self::from_rgb(rgb.into_raw(), width, height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Preprocess into the graph input: one batch element of the surface's
    /// pixel data, channel layout as captured. No resizing or value
    /// normalization happens here; the graph performs its own.
    pub fn to_tensor(&self) -> ImageTensor {
        ImageTensor {
            data: self.pixels.clone(),
            width: self.width,
            height: self.height,
        }
    }
}

/// Batch-of-one NHWC u8 tensor, shape `[1, height, width, 3]`.
///
/// Owned by exactly one forward pass; the graph backend consumes it and
/// drops the buffer before returning.
pub struct ImageTensor {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl ImageTensor {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn shape(&self) -> [usize; 4] {
        [1, self.height as usize, self.width as usize, 3]
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Take the pixel buffer, consuming the tensor.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
