//! Captured frames and their conversions to `image` and `ndarray` types

use std::path::Path;

use image::{DynamicImage, GrayImage, ImageBuffer, Luma, RgbImage, RgbaImage};
use ndarray::{Array2, Array3};

use crate::capture::frame_buffer_size;
use crate::common::ImageType;
use crate::error::{Result, SvbError};

/// One frame as delivered by the SDK.
///
/// Samples wider than 8 bits are little-endian `u16`. Colour frames are
/// stored in BGR / BGRA byte order.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub image_type: ImageType,
    pub data: Vec<u8>,
}

impl Frame {
    /// Wrap a frame buffer. `data` may be longer than the frame; it may not be shorter.
    pub fn new(width: u32, height: u32, image_type: ImageType, data: Vec<u8>) -> Result<Self> {
        let len = frame_buffer_size(width, height, image_type)?;
        if data.len() < len {
            return Err(SvbError::Image(format!(
                "{}x{} {} frame needs {} bytes, got {}",
                width,
                height,
                image_type,
                len,
                data.len()
            )));
        }
        Ok(Frame {
            width,
            height,
            image_type,
            data,
        })
    }

    /// Bytes that make up the image itself.
    pub fn len(&self) -> usize {
        frame_buffer_size(self.width, self.height, self.image_type).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pixels(&self) -> &[u8] {
        &self.data[..self.len()]
    }

    fn samples_u16(&self) -> Vec<u16> {
        self.pixels()
            .chunks_exact(2)
            .map(|b| u16::from_le_bytes([b[0], b[1]]))
            .collect()
    }

    /// Pixels in RGB(A) order for colour frames.
    fn rgb_bytes(&self) -> Vec<u8> {
        let channels = self.image_type.bytes_per_pixel();
        let mut out = self.pixels().to_vec();
        for px in out.chunks_exact_mut(channels) {
            px.swap(0, 2);
        }
        out
    }

    fn shape_error(&self, wanted: &str) -> SvbError {
        SvbError::Image(format!("{} frame cannot be converted to {wanted}", self.image_type))
    }

    pub fn to_image(&self) -> Result<DynamicImage> {
        let (w, h) = (self.width, self.height);
        let too_small = || SvbError::Image("buffer does not match frame dimensions".to_owned());
        let image = match self.image_type.bytes_per_pixel() {
            1 => DynamicImage::ImageLuma8(GrayImage::from_raw(w, h, self.pixels().to_vec()).ok_or_else(too_small)?),
            2 => DynamicImage::ImageLuma16(
                ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w, h, self.samples_u16()).ok_or_else(too_small)?,
            ),
            3 => DynamicImage::ImageRgb8(RgbImage::from_raw(w, h, self.rgb_bytes()).ok_or_else(too_small)?),
            4 => DynamicImage::ImageRgba8(RgbaImage::from_raw(w, h, self.rgb_bytes()).ok_or_else(too_small)?),
            _ => return Err(self.shape_error("an image")),
        };
        Ok(image)
    }

    /// Height x width array of an 8-bit mono frame.
    pub fn to_array_u8(&self) -> Result<Array2<u8>> {
        if self.image_type.bytes_per_pixel() != 1 {
            return Err(self.shape_error("Array2<u8>"));
        }
        Array2::from_shape_vec((self.height as usize, self.width as usize), self.pixels().to_vec())
            .map_err(|e| SvbError::Image(e.to_string()))
    }

    /// Height x width array of a 10 to 16 bit mono frame.
    pub fn to_array_u16(&self) -> Result<Array2<u16>> {
        if self.image_type.bytes_per_pixel() != 2 {
            return Err(self.shape_error("Array2<u16>"));
        }
        Array2::from_shape_vec((self.height as usize, self.width as usize), self.samples_u16())
            .map_err(|e| SvbError::Image(e.to_string()))
    }

    /// Height x width x channels array of a colour frame in RGB(A) order.
    pub fn to_array_rgb(&self) -> Result<Array3<u8>> {
        if !self.image_type.is_color() {
            return Err(self.shape_error("Array3<u8>"));
        }
        let channels = self.image_type.bytes_per_pixel();
        Array3::from_shape_vec((self.height as usize, self.width as usize, channels), self.rgb_bytes())
            .map_err(|e| SvbError::Image(e.to_string()))
    }

    /// Write the frame bytes exactly as the SDK delivered them.
    pub fn save_raw<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.pixels())?;
        Ok(())
    }

    /// Encode the frame to an image file; the format follows the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_image()?
            .save(path)
            .map_err(|e| SvbError::Image(e.to_string()))
    }
}
