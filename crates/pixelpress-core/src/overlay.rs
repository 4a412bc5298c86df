//! Text and border compositing.
//!
//! Text is rasterized from the `font8x8` bitmap font: each glyph is an 8x8
//! bit pattern scaled up with nearest-neighbor to approximate the requested
//! font size. Glyphs without a bitmap (emoji, most non-Latin codepoints)
//! render as `?`. Pixels falling outside the canvas are clipped silently.
//!
//! Borders expand the canvas by the ring thickness on every side; the
//! original image is pasted back at the ring offset, never covered.

use font8x8::{UnicodeFonts, BASIC_FONTS};

use crate::buffer::PixelBuffer;
use crate::error::PipelineError;
use crate::{Border, Color, TextOverlay};

/// Glyph bitmaps are 8x8; one advance step includes a 1-bit gap.
const GLYPH_SIZE: u32 = 8;

/// Upper bound on the nearest-neighbor glyph scale. Caps rasterized glyphs
/// at 4096 pixels and keeps every coordinate product in range for any
/// `font_size`.
const MAX_GLYPH_SCALE: u32 = 512;

/// Rasterize `overlay.text` onto a copy of `buffer`.
///
/// The overlay anchor is the top-left corner of the first glyph; negative
/// coordinates are allowed and simply clip. On RGBA buffers the glyph color
/// is composited source-over using its alpha; on RGB buffers it is written
/// opaquely. Font sizes beyond `8 * MAX_GLYPH_SCALE` render at the capped
/// scale.
pub fn draw_text(buffer: &PixelBuffer, overlay: &TextOverlay) -> PixelBuffer {
    let mut out = buffer.clone();
    if overlay.text.is_empty() {
        return out;
    }

    let scale = (overlay.font_size / GLYPH_SIZE).clamp(1, MAX_GLYPH_SCALE);
    let advance = i64::from((GLYPH_SIZE + 1) * scale);

    // Cursor math is i64 so arbitrarily long strings and extreme anchors
    // clip instead of overflowing.
    let mut cursor_x = i64::from(overlay.x);
    for ch in overlay.text.chars() {
        let glyph = BASIC_FONTS
            .get(ch)
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or_default();

        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                if (bits >> col) & 1 == 0 {
                    continue;
                }
                // Scale each set bit into a scale x scale block
                let base_x = cursor_x + i64::from(col * scale);
                let base_y = i64::from(overlay.y) + i64::from(row as u32 * scale);
                for dy in 0..i64::from(scale) {
                    for dx in 0..i64::from(scale) {
                        put_pixel(&mut out, base_x + dx, base_y + dy, overlay.color);
                    }
                }
            }
        }
        cursor_x += advance;
    }

    out
}

/// Surround `buffer` with a solid ring of `border.color`.
///
/// The output is `(w + 2t) x (h + 2t)`; the source is pasted unchanged at
/// offset `(t, t)`. A zero thickness returns a copy of the input.
///
/// # Errors
///
/// Returns `InvalidConfig` if the expanded dimensions overflow.
pub fn add_border(buffer: &PixelBuffer, border: &Border) -> Result<PixelBuffer, PipelineError> {
    let t = border.thickness;
    if t == 0 {
        return Ok(buffer.clone());
    }

    let expanded = |dim: u32| t.checked_mul(2).and_then(|tt| dim.checked_add(tt));
    let (new_w, new_h) = match (expanded(buffer.width()), expanded(buffer.height())) {
        (Some(w), Some(h)) => (w, h),
        _ => {
            return Err(PipelineError::InvalidConfig(format!(
                "border thickness {t} overflows the canvas dimensions"
            )));
        }
    };
    let mut out = PixelBuffer::solid(new_w, new_h, buffer.channels(), border.color);

    let n = buffer.channels().count();
    let src_row = buffer.width() as usize * n;
    let dst_row = new_w as usize * n;
    let src = buffer.samples();
    let dst = out.samples_mut();

    for y in 0..buffer.height() as usize {
        let src_start = y * src_row;
        let dst_start = (y + t as usize) * dst_row + t as usize * n;
        dst[dst_start..dst_start + src_row].copy_from_slice(&src[src_start..src_start + src_row]);
    }

    Ok(out)
}

/// Write one glyph pixel, clipping out-of-bounds coordinates.
#[inline]
fn put_pixel(buffer: &mut PixelBuffer, x: i64, y: i64, color: Color) {
    if x < 0 || y < 0 || x >= i64::from(buffer.width()) || y >= i64::from(buffer.height()) {
        return;
    }
    let n = buffer.channels().count();
    let has_alpha = buffer.channels().has_alpha();
    let idx = (y as usize * buffer.width() as usize + x as usize) * n;
    let samples = buffer.samples_mut();

    if has_alpha {
        // Source-over: out = src * a + dst * (1 - a), alpha accumulates
        let a = color.a as f32 / 255.0;
        for (offset, src) in [color.r, color.g, color.b].into_iter().enumerate() {
            let dst = samples[idx + offset] as f32;
            samples[idx + offset] = (src as f32 * a + dst * (1.0 - a)).round() as u8;
        }
        let dst_a = samples[idx + 3] as f32 / 255.0;
        samples[idx + 3] = ((a + dst_a * (1.0 - a)) * 255.0).round() as u8;
    } else {
        samples[idx] = color.r;
        samples[idx + 1] = color.g;
        samples[idx + 2] = color.b;
    }
}
