//! Stateless per-pixel color transforms.
//!
//! Every function here maps an input buffer to a new output buffer without
//! touching neighboring pixels. Alpha samples are copied through unchanged.
//! All color outputs use a saturating clamp to [0, 255] before being stored.
//!
//! Filter strength is not handled here: the pipeline blends each full-effect
//! result against the unmodified input, except for [`warm`] and [`cool`]
//! whose additive shift scales with strength directly (the two forms are
//! equivalent for additive filters).

use crate::buffer::PixelBuffer;

/// Additive shift at full strength for the warm/cool filters.
const TEMPERATURE_SHIFT: f32 = 60.0;

/// Map every pixel's color channels through `f`, copying alpha through.
///
/// Values are handed to `f` in 0-255 space and saturate-clamped on store.
fn map_colors<F>(buffer: &PixelBuffer, f: F) -> PixelBuffer
where
    F: Fn(f32, f32, f32) -> (f32, f32, f32),
{
    let c = buffer.channels().count();
    let mut samples = Vec::with_capacity(buffer.byte_size());
    for px in buffer.samples().chunks_exact(c) {
        let (r, g, b) = f(px[0] as f32, px[1] as f32, px[2] as f32);
        samples.push(r.clamp(0.0, 255.0).round() as u8);
        samples.push(g.clamp(0.0, 255.0).round() as u8);
        samples.push(b.clamp(0.0, 255.0).round() as u8);
        if c == 4 {
            samples.push(px[3]);
        }
    }
    PixelBuffer::from_parts(buffer.width(), buffer.height(), buffer.channels(), samples)
}

/// Grayscale via the unweighted mean of R, G, B, replicated to all three
/// color channels. Deliberately a simple mean, not a perceptual weighting.
pub fn grayscale(buffer: &PixelBuffer) -> PixelBuffer {
    map_colors(buffer, |r, g, b| {
        let avg = (r + g + b) / 3.0;
        (avg, avg, avg)
    })
}

/// Invert every color channel: `v -> 255 - v`. Involutive.
pub fn invert(buffer: &PixelBuffer) -> PixelBuffer {
    map_colors(buffer, |r, g, b| (255.0 - r, 255.0 - g, 255.0 - b))
}

/// Sepia via the fixed color-mixing matrix
/// `[[.272,.534,.131], [.349,.686,.168], [.393,.769,.189]]`
/// applied row-per-output-channel to (R, G, B).
pub fn sepia(buffer: &PixelBuffer) -> PixelBuffer {
    map_colors(buffer, |r, g, b| {
        (
            0.272 * r + 0.534 * g + 0.131 * b,
            0.349 * r + 0.686 * g + 0.168 * b,
            0.393 * r + 0.769 * g + 0.189 * b,
        )
    })
}

/// Warm shift: add to red and green, scaled by `strength` in [0, 1].
/// Saturates at 255 rather than wrapping.
pub fn warm(buffer: &PixelBuffer, strength: f32) -> PixelBuffer {
    let shift = TEMPERATURE_SHIFT * strength;
    map_colors(buffer, |r, g, b| (r + shift, g + shift, b))
}

/// Cool shift: add to blue, scaled by `strength` in [0, 1].
/// Saturates at 255 rather than wrapping.
pub fn cool(buffer: &PixelBuffer, strength: f32) -> PixelBuffer {
    let shift = TEMPERATURE_SHIFT * strength;
    map_colors(buffer, |r, g, b| (r, g, b + shift))
}

/// Multiplicative brightness. `factor` 1.0 leaves the buffer unchanged;
/// results saturate at the channel bounds.
pub fn brightness(buffer: &PixelBuffer, factor: f32) -> PixelBuffer {
    map_colors(buffer, |r, g, b| (r * factor, g * factor, b * factor))
}

/// Contrast remap around mid-gray: `v -> 128 + (v - 128) * factor`.
pub fn contrast(buffer: &PixelBuffer, factor: f32) -> PixelBuffer {
    map_colors(buffer, |r, g, b| {
        (
            128.0 + (r - 128.0) * factor,
            128.0 + (g - 128.0) * factor,
            128.0 + (b - 128.0) * factor,
        )
    })
}

// ============================================================================
// Style lookup tables
// ============================================================================

/// Pre-computed 256-entry per-channel remap table for the style filters.
///
/// The vintage and polaroid looks in the source material came from an
/// external gradient library; here they are explicit affine channel curves
/// so the remap is self-contained and deterministic.
#[derive(Debug, Clone)]
pub struct StyleLut {
    red: [u8; 256],
    green: [u8; 256],
    blue: [u8; 256],
}

impl StyleLut {
    /// Build a table from one affine curve `v -> v * gain + lift` per channel.
    fn from_affine(r: (f32, f32), g: (f32, f32), b: (f32, f32)) -> Self {
        let mut lut = Self {
            red: [0; 256],
            green: [0; 256],
            blue: [0; 256],
        };
        for i in 0..256 {
            let v = i as f32;
            lut.red[i] = (v * r.0 + r.1).clamp(0.0, 255.0).round() as u8;
            lut.green[i] = (v * g.0 + g.1).clamp(0.0, 255.0).round() as u8;
            lut.blue[i] = (v * b.0 + b.1).clamp(0.0, 255.0).round() as u8;
        }
        lut
    }

    /// Pink-toned "vintage" map: lifted red and blue, muted green.
    pub fn vintage() -> Self {
        Self::from_affine((1.06, 20.0), (0.94, 6.0), (0.96, 24.0))
    }

    /// Ocean-toned "polaroid" map: boosted blue and green, muted red.
    pub fn polaroid() -> Self {
        Self::from_affine((0.90, 0.0), (1.02, 8.0), (1.08, 22.0))
    }

    /// Remap every pixel of `buffer` through the table.
    pub fn apply(&self, buffer: &PixelBuffer) -> PixelBuffer {
        map_colors(buffer, |r, g, b| {
            (
                self.red[r as usize] as f32,
                self.green[g as usize] as f32,
                self.blue[b as usize] as f32,
            )
        })
    }
}

/// Vintage style filter at full strength.
pub fn vintage(buffer: &PixelBuffer) -> PixelBuffer {
    StyleLut::vintage().apply(buffer)
}

/// Polaroid style filter at full strength.
pub fn polaroid(buffer: &PixelBuffer) -> PixelBuffer {
    StyleLut::polaroid().apply(buffer)
}
