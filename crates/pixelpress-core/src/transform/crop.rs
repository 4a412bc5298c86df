//! Image cropping.
//!
//! The crop rectangle is given in absolute pixel coordinates and must be
//! fully contained in the source; out-of-bounds rectangles are an error
//! rather than being clamped, so a misconfigured crop surfaces instead of
//! silently producing the wrong region.

use crate::buffer::PixelBuffer;
use crate::error::PipelineError;
use crate::Rect;

/// Extract the sub-rectangle `rect` from `buffer` as a new buffer.
///
/// # Errors
///
/// Returns `InvalidRect` if the rectangle is empty or extends outside the
/// source bounds.
pub fn crop(buffer: &PixelBuffer, rect: Rect) -> Result<PixelBuffer, PipelineError> {
    buffer.region(rect)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
