//! Linear interpolation between two same-shaped buffers.
//!
//! This is the single primitive behind both per-filter "strength" and the
//! final "opacity over black" stage: `t = 0` keeps the first buffer,
//! `t = 1` keeps the second, anything between interpolates per sample.

use crate::buffer::PixelBuffer;
use crate::error::PipelineError;

/// Blend two buffers: `output = round(a * (1 - t) + b * t)` per sample.
///
/// All channels, including alpha, are interpolated.
///
/// # Errors
///
/// Returns `InvalidConfig` if `t` is outside [0, 1] and `ShapeMismatch` if
/// the buffers differ in dimensions or channel count.
pub fn blend(a: &PixelBuffer, b: &PixelBuffer, t: f32) -> Result<PixelBuffer, PipelineError> {
    if !(0.0..=1.0).contains(&t) {
        return Err(PipelineError::InvalidConfig(format!(
            "blend factor must be in [0, 1], got {t}"
        )));
    }
    if !a.same_shape(b) {
        return Err(PipelineError::ShapeMismatch {
            a: a.shape_string(),
            b: b.shape_string(),
        });
    }

    // Exact endpoints, skipping the float round-trip
    if t == 0.0 {
        return Ok(a.clone());
    }
    if t == 1.0 {
        return Ok(b.clone());
    }

    let samples: Vec<u8> = a
        .samples()
        .iter()
        .zip(b.samples().iter())
        .map(|(&sa, &sb)| (sa as f32 * (1.0 - t) + sb as f32 * t).round() as u8)
        .collect();

    Ok(PixelBuffer::from_parts(
        a.width(),
        a.height(),
        a.channels(),
        samples,
    ))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::buffer::Channels;
    use proptest::prelude::*;

    fn buffer_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=16, 1u32..=16).prop_flat_map(|(w, h)| {
            proptest::collection::vec(any::<u8>(), (w * h * 3) as usize)
                .prop_map(move |samples| PixelBuffer::new(w, h, Channels::Rgb, samples).unwrap())
        })
    }

    proptest! {
        /// Property: blend output is always bounded by min/max of its inputs.
        #[test]
        fn prop_blend_bounded(
            (w, h) in (1u32..=12, 1u32..=12),
            t in 0.0f32..=1.0,
            seed_a in any::<u8>(),
            seed_b in any::<u8>(),
        ) {
            let a = PixelBuffer::solid(w, h, Channels::Rgb, crate::Color::rgb(seed_a, seed_a, seed_a));
            let b = PixelBuffer::solid(w, h, Channels::Rgb, crate::Color::rgb(seed_b, seed_b, seed_b));
            let out = blend(&a, &b, t).unwrap();

            let lo = seed_a.min(seed_b);
            let hi = seed_a.max(seed_b);
            for &s in out.samples() {
                prop_assert!(s >= lo && s <= hi);
            }
        }

        /// Property: blending a buffer with itself is the identity for any t.
        #[test]
        fn prop_blend_self_identity(buf in buffer_strategy(), t in 0.0f32..=1.0) {
            let out = blend(&buf, &buf, t).unwrap();
            prop_assert_eq!(out, buf);
        }

        /// Property: endpoints are exact for arbitrary buffers.
        #[test]
        fn prop_blend_endpoints(a in buffer_strategy()) {
            let b = PixelBuffer::solid(a.width(), a.height(), Channels::Rgb, crate::Color::rgb(9, 9, 9));
            prop_assert_eq!(blend(&a, &b, 0.0).unwrap(), a.clone());
            prop_assert_eq!(blend(&a, &b, 1.0).unwrap(), b);
        }
    }
}
