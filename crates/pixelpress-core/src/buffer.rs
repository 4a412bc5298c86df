//! Pixel buffer types: the substrate all pipeline stages operate on.
//!
//! A [`PixelBuffer`] owns a rectangular grid of 8-bit RGB or RGBA samples in
//! row-major order. Buffers are value types: every transform consumes its
//! input by reference and produces a new owned buffer, so no stage can
//! observe a half-applied update from another.

use crate::error::PipelineError;
use crate::{Color, Rect};

/// Channel layout of a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Channels {
    /// 3 samples per pixel (red, green, blue).
    #[default]
    Rgb,
    /// 4 samples per pixel (red, green, blue, alpha).
    Rgba,
}

impl Channels {
    /// Number of samples per pixel.
    #[inline]
    pub fn count(self) -> usize {
        match self {
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }

    /// Returns true if this layout carries an alpha channel.
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, Channels::Rgba)
    }
}

/// A rectangular grid of 8-bit pixel samples.
///
/// Invariant: `samples.len() == width * height * channels.count()`, enforced
/// by every constructor. Equality is dimensional plus sample-exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: Channels,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new buffer from dimensions and raw sample data.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is zero or the sample
    /// array length does not equal `width * height * channels`.
    pub fn new(
        width: u32,
        height: u32,
        channels: Channels,
        samples: Vec<u8>,
    ) -> Result<Self, PipelineError> {
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidConfig(format!(
                "buffer dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize * channels.count();
        if samples.len() != expected {
            return Err(PipelineError::InvalidConfig(format!(
                "sample array length {} does not match {width}x{height}x{}",
                samples.len(),
                channels.count()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// Create a buffer filled with a single color.
    ///
    /// Used for the opacity blend canvas, border rings, and test fixtures.
    /// The alpha component of `color` is ignored for RGB buffers. Dimensions
    /// must be non-zero.
    pub fn solid(width: u32, height: u32, channels: Channels, color: Color) -> Self {
        debug_assert!(
            width > 0 && height > 0,
            "solid buffer dimensions must be non-zero"
        );
        let count = width as usize * height as usize;
        let mut samples = Vec::with_capacity(count * channels.count());
        for _ in 0..count {
            samples.push(color.r);
            samples.push(color.g);
            samples.push(color.b);
            if channels.has_alpha() {
                samples.push(color.a);
            }
        }
        Self {
            width,
            height,
            channels,
            samples,
        }
    }

    /// Internal constructor for transforms that computed consistent
    /// dimensions themselves.
    pub(crate) fn from_parts(
        width: u32,
        height: u32,
        channels: Channels,
        samples: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(
            samples.len(),
            width as usize * height as usize * channels.count(),
            "sample buffer size mismatch"
        );
        Self {
            width,
            height,
            channels,
            samples,
        }
    }

    /// Buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Raw sample data in row-major order.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Mutable access to the raw sample data, for in-place compositing.
    #[inline]
    pub(crate) fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    /// Consume the buffer, returning its raw sample data.
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Size of the sample array in bytes.
    pub fn byte_size(&self) -> usize {
        self.samples.len()
    }

    /// Shape summary used in mismatch errors.
    pub(crate) fn shape_string(&self) -> String {
        format!(
            "{}x{}x{}",
            self.width,
            self.height,
            self.channels.count()
        )
    }

    /// Returns true if `other` has the same width, height, and channel layout.
    pub fn same_shape(&self, other: &PixelBuffer) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.channels == other.channels
    }

    /// Index of the first sample of pixel (x, y). Callers must bounds-check.
    #[inline]
    pub(crate) fn sample_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels.count()
    }

    /// Get the sample slice for pixel (x, y).
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `x >= width` or `y >= height`.
    pub fn get(&self, x: u32, y: u32) -> Result<&[u8], PipelineError> {
        if x >= self.width || y >= self.height {
            return Err(PipelineError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.sample_index(x, y);
        Ok(&self.samples[idx..idx + self.channels.count()])
    }

    /// Extract a sub-rectangle as a new buffer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRect` if the rectangle is empty or extends outside the
    /// source bounds. No clamping is performed; the caller supplies absolute
    /// pixel coordinates.
    pub fn region(&self, rect: Rect) -> Result<PixelBuffer, PipelineError> {
        if rect.width == 0 || rect.height == 0 {
            return Err(PipelineError::InvalidRect(format!(
                "region {}x{} is empty",
                rect.width, rect.height
            )));
        }
        let right = rect.left.checked_add(rect.width);
        let bottom = rect.top.checked_add(rect.height);
        match (right, bottom) {
            (Some(r), Some(b)) if r <= self.width && b <= self.height => {}
            _ => {
                return Err(PipelineError::InvalidRect(format!(
                    "region ({}, {}) {}x{} extends outside {}x{} source",
                    rect.left, rect.top, rect.width, rect.height, self.width, self.height
                )));
            }
        }

        let c = self.channels.count();
        let mut samples = Vec::with_capacity(rect.width as usize * rect.height as usize * c);
        for y in 0..rect.height {
            let src_y = rect.top + y;
            let start = self.sample_index(rect.left, src_y);
            let end = start + rect.width as usize * c;
            samples.extend_from_slice(&self.samples[start..end]);
        }

        Ok(PixelBuffer {
            width: rect.width,
            height: rect.height,
            channels: self.channels,
            samples,
        })
    }

    /// Resample to exact target dimensions. See [`crate::transform::resize`].
    pub fn resized(
        &self,
        width: u32,
        height: u32,
        filter: crate::transform::FilterType,
    ) -> Result<PixelBuffer, PipelineError> {
        crate::transform::resize(self, width, height, filter)
    }
}
