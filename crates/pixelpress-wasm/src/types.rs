//! WASM-compatible wrapper types for pixel data.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! Pixelpress types, handling the conversion between Rust and JavaScript
//! data representations.

use pixelpress_core::{Channels, PixelBuffer};
use wasm_bindgen::prelude::*;

/// A pixel buffer wrapper for JavaScript.
///
/// # Memory Management
///
/// The sample data is stored in WASM memory. When you call `samples()`, a
/// copy is made to JavaScript memory as a `Uint8Array`. The `free()` method
/// can be called to explicitly release WASM memory, but this is optional as
/// wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a new buffer from dimensions and raw sample data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `channels` - Samples per pixel: 3 for RGB, 4 for RGBA
    /// * `samples` - Raw sample data, row-major order
    ///
    /// # Errors
    /// Returns an error for zero dimensions, an unsupported channel count,
    /// or a sample array of the wrong length.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        channels: u8,
        samples: Vec<u8>,
    ) -> Result<JsPixelBuffer, JsValue> {
        let channels = channels_from_u8(channels)?;
        let inner = PixelBuffer::new(width, height, channels, samples)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(JsPixelBuffer { inner })
    }

    /// Get the buffer width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the buffer height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Get the number of samples per pixel (3 for RGB, 4 for RGBA)
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.inner.channels().count() as u8
    }

    /// Get the number of bytes in the sample buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns the raw sample data as Uint8Array.
    ///
    /// Note: This creates a copy of the sample data.
    pub fn samples(&self) -> Vec<u8> {
        self.inner.samples().to_vec()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup
    /// automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPixelBuffer {
    /// Wrap a core buffer. Internal constructor used by the pipeline
    /// bindings.
    pub(crate) fn from_core(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped core buffer.
    pub(crate) fn as_core(&self) -> &PixelBuffer {
        &self.inner
    }
}

/// Convert a samples-per-pixel count to the core channel layout.
pub(crate) fn channels_from_u8(value: u8) -> Result<Channels, JsValue> {
    match value {
        3 => Ok(Channels::Rgb),
        4 => Ok(Channels::Rgba),
        other => Err(JsValue::from_str(&format!(
            "unsupported channel count {other}, expected 3 or 4"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelpress_core::Color;

    #[test]
    fn test_js_pixel_buffer_accessors() {
        let core = PixelBuffer::solid(100, 50, Channels::Rgb, Color::rgb(1, 2, 3));
        let buf = JsPixelBuffer::from_core(core);
        assert_eq!(buf.width(), 100);
        assert_eq!(buf.height(), 50);
        assert_eq!(buf.channels(), 3);
        assert_eq!(buf.byte_length(), 15000);
    }

    #[test]
    fn test_samples_round_trip() {
        let samples = vec![255u8, 128, 64, 32, 16, 8];
        let core = PixelBuffer::new(2, 1, Channels::Rgb, samples.clone()).unwrap();
        let buf = JsPixelBuffer::from_core(core);
        assert_eq!(buf.samples(), samples);
    }

    #[test]
    fn test_rgba_channel_count() {
        let core = PixelBuffer::solid(2, 2, Channels::Rgba, Color::rgba(0, 0, 0, 255));
        let buf = JsPixelBuffer::from_core(core);
        assert_eq!(buf.channels(), 4);
        assert_eq!(buf.byte_length(), 16);
    }

    #[test]
    fn test_channels_from_u8() {
        assert!(matches!(channels_from_u8(3), Ok(Channels::Rgb)));
        assert!(matches!(channels_from_u8(4), Ok(Channels::Rgba)));
    }
}
