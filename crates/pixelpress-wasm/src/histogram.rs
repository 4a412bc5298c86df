//! Histogram computation WASM bindings.
//!
//! This module provides JavaScript bindings for histogram computation,
//! allowing per-channel distributions to be calculated from a pixel buffer.

use pixelpress_core::histogram::compute_histogram as compute_histogram_core;
use wasm_bindgen::prelude::*;

use crate::types::JsPixelBuffer;

/// Histogram result accessible from JavaScript.
///
/// Contains 256-bin histograms for red, green, and blue (plus alpha for
/// RGBA buffers), with helper accessors for clipping detection and
/// normalization.
#[wasm_bindgen]
pub struct JsHistogram {
    red: Vec<u32>,
    green: Vec<u32>,
    blue: Vec<u32>,
    alpha: Option<Vec<u32>>,
    max_value: u32,
    has_highlight_clipping: bool,
    has_shadow_clipping: bool,
}

#[wasm_bindgen]
impl JsHistogram {
    /// Get red channel histogram (256 bins).
    pub fn red(&self) -> Vec<u32> {
        self.red.clone()
    }

    /// Get green channel histogram (256 bins).
    pub fn green(&self) -> Vec<u32> {
        self.green.clone()
    }

    /// Get blue channel histogram (256 bins).
    pub fn blue(&self) -> Vec<u32> {
        self.blue.clone()
    }

    /// Get the alpha channel histogram (256 bins), or undefined for RGB
    /// buffers.
    pub fn alpha(&self) -> Option<Vec<u32>> {
        self.alpha.clone()
    }

    /// Get maximum bin value across the color channels.
    ///
    /// Useful for normalizing histogram display.
    #[wasm_bindgen(getter)]
    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// Check if any color channel has values at 255 (highlight clipping).
    #[wasm_bindgen(getter)]
    pub fn has_highlight_clipping(&self) -> bool {
        self.has_highlight_clipping
    }

    /// Check if any color channel has values at 0 (shadow clipping).
    #[wasm_bindgen(getter)]
    pub fn has_shadow_clipping(&self) -> bool {
        self.has_shadow_clipping
    }
}

/// Compute per-channel histograms from a pixel buffer.
///
/// # Example (TypeScript)
/// ```typescript
/// const hist = compute_histogram(buffer);
/// const redBins = hist.red();        // Uint32Array[256]
/// const max = hist.max_value;        // For normalization
/// const clipped = hist.has_highlight_clipping;
/// hist.free();
/// ```
#[wasm_bindgen]
pub fn compute_histogram(buffer: &JsPixelBuffer) -> JsHistogram {
    let hist = compute_histogram_core(buffer.as_core());

    JsHistogram {
        red: hist.red.to_vec(),
        green: hist.green.to_vec(),
        blue: hist.blue.to_vec(),
        alpha: hist.alpha.map(|a| a.to_vec()),
        max_value: hist.max_value(),
        has_highlight_clipping: hist.has_highlight_clipping(),
        has_shadow_clipping: hist.has_shadow_clipping(),
    }
}
