//! Pipeline execution WASM bindings.
//!
//! The pipeline config crosses the boundary as a plain JavaScript object and
//! is deserialized into the core `PipelineConfig`; unknown fields are
//! rejected by serde, out-of-range values by the core validation.

use pixelpress_core::{pipeline, PipelineConfig};
use wasm_bindgen::prelude::*;

use crate::types::JsPixelBuffer;

/// Run the full editing pipeline over a buffer.
///
/// # Arguments
/// * `buffer` - Source pixel buffer; never modified
/// * `config` - Pipeline configuration object. Omitted fields take their
///   identity defaults, so `{}` returns a copy of the input.
///
/// # Example (TypeScript)
/// ```typescript
/// const result = run_pipeline(buffer, {
///   filter: "sepia",
///   strength: 0.8,
///   resize: [800, 600],
///   border: { thickness: 10, color: { r: 255, g: 255, b: 255, a: 255 } },
/// });
/// const pixels = result.samples();
/// result.free();
/// ```
///
/// # Errors
/// Returns an error string for a malformed config object, out-of-range
/// parameters, or a crop rectangle that does not fit.
#[wasm_bindgen]
pub fn run_pipeline(buffer: &JsPixelBuffer, config: JsValue) -> Result<JsPixelBuffer, JsValue> {
    let config: PipelineConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("invalid pipeline config: {e}")))?;

    pipeline::run_pipeline(buffer.as_core(), &config)
        .map(JsPixelBuffer::from_core)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// List the stage names a config would execute, in order.
///
/// Useful for progress UI: the result is a JavaScript array of stage name
/// strings such as `["filter", "crop", "opacity"]`.
#[wasm_bindgen]
pub fn active_stages(config: JsValue) -> Result<JsValue, JsValue> {
    let config: PipelineConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("invalid pipeline config: {e}")))?;

    let stages = pipeline::active_stages(&config);
    serde_wasm_bindgen::to_value(&stages).map_err(|e| JsValue::from_str(&e.to_string()))
}


/// WASM-specific tests that require JsValue.
///
/// These can only run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_run_pipeline_empty_config() {
        let buffer = JsPixelBuffer::new(2, 2, 3, vec![10u8; 12]).unwrap();
        let config = js_sys::Object::new();
        let result = run_pipeline(&buffer, config.into()).unwrap();
        assert_eq!(result.samples(), vec![10u8; 12]);
    }

    #[wasm_bindgen_test]
    fn test_run_pipeline_rejects_garbage_config() {
        let buffer = JsPixelBuffer::new(2, 2, 3, vec![10u8; 12]).unwrap();
        let config = JsValue::from_str("not an object");
        assert!(run_pipeline(&buffer, config).is_err());
    }
}
