//! Square-kernel convolution over pixel buffers.
//!
//! # Edge policy
//!
//! Window samples that fall outside the buffer contribute **zero** to the
//! weighted sum. They are dropped, not clamped to the nearest edge pixel and
//! not wrapped. Because the kernel weights for those positions are simply
//! lost, normalized kernels (blur) bias the output darker near edges. This
//! matches the behavior the filters were designed around and is asserted in
//! tests.
//!
//! # Clamping
//!
//! Convolution results are kept as raw `f32` values in [`ConvolvedPlanes`].
//! Sharpen kernels intentionally overshoot [0, 255]; the single saturating
//! clamp happens in [`ConvolvedPlanes::saturate`] so every filter is clamped
//! uniformly.

use crate::buffer::{Channels, PixelBuffer};
use crate::error::PipelineError;

/// An odd-sided square matrix of convolution weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    side: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from a side length and row-major weights.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKernel` if the side is zero or even, or if the weight
    /// count does not equal `side * side`.
    pub fn new(side: usize, weights: Vec<f32>) -> Result<Self, PipelineError> {
        if side == 0 || side % 2 == 0 {
            return Err(PipelineError::InvalidKernel { side });
        }
        if weights.len() != side * side {
            return Err(PipelineError::InvalidKernel { side });
        }
        Ok(Self { side, weights })
    }

    /// 1x1 identity kernel: convolution with it reproduces the input.
    pub fn identity() -> Self {
        Self {
            side: 1,
            weights: vec![1.0],
        }
    }

    /// Box blur kernel: every weight is `1 / side^2`, so weights sum to 1.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKernel` for a zero or even side.
    pub fn box_blur(side: usize) -> Result<Self, PipelineError> {
        if side == 0 || side % 2 == 0 {
            return Err(PipelineError::InvalidKernel { side });
        }
        let weight = 1.0 / (side * side) as f32;
        Ok(Self {
            side,
            weights: vec![weight; side * side],
        })
    }

    /// Cross-shaped sharpen kernel scaled by `amount`.
    ///
    /// `amount = 1.0` gives the classic `[0,-1,0; -1,5,-1; 0,-1,0]` matrix;
    /// `amount = 0.0` degenerates to a 3x3 identity. Weights sum to 1 for any
    /// amount, so flat areas are unchanged.
    pub fn sharpen(amount: f32) -> Self {
        let a = amount;
        Self {
            side: 3,
            weights: vec![0.0, -a, 0.0, -a, 1.0 + 4.0 * a, -a, 0.0, -a, 0.0],
        }
    }

    /// Kernel side length.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Row-major kernel weights.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Offset from the center to the window edge.
    #[inline]
    fn half(&self) -> i64 {
        (self.side / 2) as i64
    }
}

/// Unclamped convolution output: one `f32` per sample, same layout as the
/// source buffer. Alpha samples are copied through verbatim.
#[derive(Debug, Clone)]
pub struct ConvolvedPlanes {
    width: u32,
    height: u32,
    channels: Channels,
    values: Vec<f32>,
}

impl ConvolvedPlanes {
    /// Raw convolution values in row-major sample order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Convert to a pixel buffer with a uniform saturating clamp to [0, 255].
    pub fn saturate(self) -> PixelBuffer {
        let samples: Vec<u8> = self
            .values
            .into_iter()
            .map(|v| v.clamp(0.0, 255.0).round() as u8)
            .collect();
        PixelBuffer::from_parts(self.width, self.height, self.channels, samples)
    }
}

/// Apply a convolution kernel to every color channel of a buffer.
///
/// The alpha channel of RGBA buffers is excluded from convolution and copied
/// through unchanged. Results are not clamped; see [`ConvolvedPlanes`].
///
/// # Errors
///
/// Returns `InvalidKernel` if the kernel side is even or zero (checked again
/// here so hand-built kernels cannot bypass validation).
pub fn convolve(buffer: &PixelBuffer, kernel: &Kernel) -> Result<ConvolvedPlanes, PipelineError> {
    if kernel.side == 0 || kernel.side % 2 == 0 {
        return Err(PipelineError::InvalidKernel { side: kernel.side });
    }

    let width = buffer.width();
    let height = buffer.height();
    let channels = buffer.channels();
    let c = channels.count();
    let src = buffer.samples();
    let half = kernel.half();

    let mut values = vec![0.0f32; src.len()];

    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let dst_idx = (y as usize * width as usize + x as usize) * c;
            let mut acc = [0.0f32; 3];

            for ky in -half..=half {
                let sy = y + ky;
                if sy < 0 || sy >= height as i64 {
                    continue;
                }
                for kx in -half..=half {
                    let sx = x + kx;
                    if sx < 0 || sx >= width as i64 {
                        continue;
                    }
                    let weight = kernel.weights
                        [((ky + half) as usize) * kernel.side + (kx + half) as usize];
                    let src_idx = (sy as usize * width as usize + sx as usize) * c;
                    acc[0] += src[src_idx] as f32 * weight;
                    acc[1] += src[src_idx + 1] as f32 * weight;
                    acc[2] += src[src_idx + 2] as f32 * weight;
                }
            }

            values[dst_idx] = acc[0];
            values[dst_idx + 1] = acc[1];
            values[dst_idx + 2] = acc[2];
            if channels.has_alpha() {
                values[dst_idx + 3] = src[dst_idx + 3] as f32;
            }
        }
    }

    Ok(ConvolvedPlanes {
        width,
        height,
        channels,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn checker_2x2() -> PixelBuffer {
        // Rows: black, white / black, white
        let samples = vec![0, 0, 0, 255, 255, 255, 0, 0, 0, 255, 255, 255];
        PixelBuffer::new(2, 2, Channels::Rgb, samples).unwrap()
    }

    #[test]
    fn test_kernel_rejects_even_side() {
        assert_eq!(
            Kernel::new(2, vec![0.25; 4]).unwrap_err(),
            PipelineError::InvalidKernel { side: 2 }
        );
        assert!(Kernel::new(0, vec![]).is_err());
        assert!(Kernel::box_blur(4).is_err());
    }

    #[test]
    fn test_kernel_rejects_weight_mismatch() {
        assert!(Kernel::new(3, vec![1.0; 8]).is_err());
    }

    #[test]
    fn test_identity_kernel_reproduces_input() {
        let buf = checker_2x2();
        let out = convolve(&buf, &Kernel::identity()).unwrap().saturate();
        assert_eq!(out, buf);
    }

    #[test]
    fn test_identity_kernel_reproduces_rgba_input() {
        let samples = vec![10, 20, 30, 40, 50, 60, 70, 80];
        let buf = PixelBuffer::new(2, 1, Channels::Rgba, samples).unwrap();
        let out = convolve(&buf, &Kernel::identity()).unwrap().saturate();
        assert_eq!(out, buf);
    }

    #[test]
    fn test_box_blur_edge_drop_exact_values() {
        // 2x2 checkerboard, 3x3 box blur with the drop-out-of-bounds policy:
        // every output window sees all four pixels and nothing else, so each
        // output sample is (0 + 255 + 0 + 255) / 9 = 56.67 -> 57.
        let buf = checker_2x2();
        let kernel = Kernel::box_blur(3).unwrap();
        let out = convolve(&buf, &kernel).unwrap().saturate();
        for px in out.samples().chunks_exact(3) {
            assert_eq!(px, &[57, 57, 57]);
        }
    }

    #[test]
    fn test_box_blur_darkens_edges() {
        // A solid white buffer blurred with a normalized kernel stays white
        // in the interior but loses dropped edge contributions.
        let buf = PixelBuffer::solid(5, 5, Channels::Rgb, Color::rgb(255, 255, 255));
        let kernel = Kernel::box_blur(3).unwrap();
        let out = convolve(&buf, &kernel).unwrap().saturate();

        // Center pixel: full 9-sample window.
        assert_eq!(out.get(2, 2).unwrap(), &[255, 255, 255]);
        // Corner pixel: only 4 of 9 window samples exist -> 255 * 4/9 = 113.
        assert_eq!(out.get(0, 0).unwrap(), &[113, 113, 113]);
        // Edge pixel: 6 of 9 samples -> 255 * 6/9 = 170.
        assert_eq!(out.get(2, 0).unwrap(), &[170, 170, 170]);
    }

    #[test]
    fn test_sharpen_flat_area_unchanged() {
        let buf = PixelBuffer::solid(5, 5, Channels::Rgb, Color::rgb(100, 100, 100));
        let out = convolve(&buf, &Kernel::sharpen(1.0)).unwrap().saturate();
        // Interior pixels see a kernel that sums to 1 over a flat area.
        assert_eq!(out.get(2, 2).unwrap(), &[100, 100, 100]);
    }

    #[test]
    fn test_sharpen_overshoot_is_unclamped_until_saturate() {
        // Bright pixel on a dark field: the center overshoots 255.
        let mut samples = vec![0u8; 9 * 3];
        samples[4 * 3] = 250;
        samples[4 * 3 + 1] = 250;
        samples[4 * 3 + 2] = 250;
        let buf = PixelBuffer::new(3, 3, Channels::Rgb, samples).unwrap();

        let planes = convolve(&buf, &Kernel::sharpen(1.0)).unwrap();
        let center = planes.values()[4 * 3];
        assert!(center > 255.0, "raw value should overshoot, got {center}");

        let out = planes.saturate();
        assert_eq!(out.get(1, 1).unwrap(), &[255, 255, 255]);
    }

    #[test]
    fn test_convolve_copies_alpha_through() {
        let samples = vec![
            10, 20, 30, 200, //
            40, 50, 60, 100, //
            70, 80, 90, 50, //
            15, 25, 35, 0,
        ];
        let buf = PixelBuffer::new(2, 2, Channels::Rgba, samples).unwrap();
        let out = convolve(&buf, &Kernel::box_blur(3).unwrap())
            .unwrap()
            .saturate();

        assert_eq!(out.get(0, 0).unwrap()[3], 200);
        assert_eq!(out.get(1, 0).unwrap()[3], 100);
        assert_eq!(out.get(0, 1).unwrap()[3], 50);
        assert_eq!(out.get(1, 1).unwrap()[3], 0);
    }

    #[test]
    fn test_sharpen_amount_zero_is_identity() {
        let buf = checker_2x2();
        let out = convolve(&buf, &Kernel::sharpen(0.0)).unwrap().saturate();
        assert_eq!(out, buf);
    }
}
