//! Pixelpress WASM - WebAssembly bindings for Pixelpress
//!
//! This crate exposes the pixelpress-core editing pipeline to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for pixel data
//! - `pipeline` - Pipeline execution bindings
//! - `histogram` - Histogram computation bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsPixelBuffer, run_pipeline } from '@pixelpress/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const buffer = new JsPixelBuffer(width, height, 4, rgbaBytes);
//! const result = run_pipeline(buffer, { filter: "grayscale", opacity: 0.9 });
//! console.log(`Processed ${result.width}x${result.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod histogram;
mod pipeline;
mod types;

// Re-export public types
pub use histogram::{compute_histogram, JsHistogram};
pub use pipeline::{active_stages, run_pipeline};
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
