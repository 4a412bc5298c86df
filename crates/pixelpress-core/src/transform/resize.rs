//! Image resizing via the `image` crate's resampling kernels.
//!
//! Resampling is delegated to `image::imageops`, so the output for a given
//! (source, target, filter) triple is deterministic. Bilinear (`Triangle`)
//! is the default; both upscaling and downscaling are supported, down to
//! 1x1 targets.

use crate::buffer::{Channels, PixelBuffer};
use crate::error::PipelineError;

/// Filter type for resampling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Resample `buffer` to exact target dimensions.
///
/// # Errors
///
/// Returns `InvalidConfig` if either target dimension is zero.
pub fn resize(
    buffer: &PixelBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<PixelBuffer, PipelineError> {
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidConfig(format!(
            "resize target must be non-zero, got {width}x{height}"
        )));
    }

    // Fast path: if dimensions match, just clone
    if buffer.width() == width && buffer.height() == height {
        return Ok(buffer.clone());
    }

    let samples = match buffer.channels() {
        Channels::Rgb => {
            let img = image::RgbImage::from_raw(
                buffer.width(),
                buffer.height(),
                buffer.samples().to_vec(),
            )
            .ok_or_else(|| {
                PipelineError::InvalidConfig("buffer is not a valid RGB image".to_string())
            })?;
            image::imageops::resize(&img, width, height, filter.to_image_filter()).into_raw()
        }
        Channels::Rgba => {
            let img = image::RgbaImage::from_raw(
                buffer.width(),
                buffer.height(),
                buffer.samples().to_vec(),
            )
            .ok_or_else(|| {
                PipelineError::InvalidConfig("buffer is not a valid RGBA image".to_string())
            })?;
            image::imageops::resize(&img, width, height, filter.to_image_filter()).into_raw()
        }
    };

    Ok(PixelBuffer::from_parts(
        width,
        height,
        buffer.channels(),
        samples,
    ))
}
