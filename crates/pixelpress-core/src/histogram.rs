//! Histogram computation from pixel buffers.
//!
//! This module bins each channel of a buffer into 256-bucket distributions,
//! used for exposure readouts and clipping indicators.

use crate::buffer::PixelBuffer;
use crate::Histogram;

/// Compute per-channel histograms for a buffer.
///
/// Every color channel gets a 256-bin distribution; the alpha distribution
/// is populated only for RGBA buffers. Each color bin sum equals the pixel
/// count.
///
/// # Performance
/// Single pass, O(n) in the number of pixels, constant memory for the bins.
pub fn compute_histogram(buffer: &PixelBuffer) -> Histogram {
    let mut hist = Histogram::new();
    let n = buffer.channels().count();

    if buffer.channels().has_alpha() {
        let mut alpha = [0u32; 256];
        for chunk in buffer.samples().chunks_exact(n) {
            hist.red[chunk[0] as usize] += 1;
            hist.green[chunk[1] as usize] += 1;
            hist.blue[chunk[2] as usize] += 1;
            alpha[chunk[3] as usize] += 1;
        }
        hist.alpha = Some(alpha);
    } else {
        for chunk in buffer.samples().chunks_exact(n) {
            hist.red[chunk[0] as usize] += 1;
            hist.green[chunk[1] as usize] += 1;
            hist.blue[chunk[2] as usize] += 1;
        }
    }

    hist
}
