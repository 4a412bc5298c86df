//! Image rotation with bilinear and Lanczos3 interpolation.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each pixel in the output image,
//! we calculate which source pixel(s) contribute to it and interpolate
//! their values.
//!
//! For rotation by angle θ, the inverse transform is:
//! ```text
//! src_x = (dst_x - cx) * cos(-θ) - (dst_y - cy) * sin(-θ) + src_cx
//! src_y = (dst_x - cx) * sin(-θ) + (dst_y - cy) * cos(-θ) + src_cy
//! ```
//!
//! The output canvas is expanded to the bounding box of the rotated image;
//! uncovered corners are filled with black (transparent black for RGBA).

use crate::buffer::PixelBuffer;
use crate::transform::FilterType;

/// Compute the dimensions of the bounding box for a rotated image.
///
/// When an image is rotated, the corners extend beyond the original bounds.
/// This function calculates the minimum bounding box that contains the
/// entire rotated image.
///
/// Positive angles are counter-clockwise; multiples of 360 are normalized.
pub fn rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    // Normalize angle to handle 360, 720, etc.
    let angle_normalized = angle_degrees % 360.0;

    // Fast path: no rotation needed (including near-zero and multiples of 360)
    if angle_normalized.abs() < 0.001 || (360.0 - angle_normalized.abs()).abs() < 0.001 {
        return (width, height);
    }

    // Fast path: exact 90/270 degree rotations (swap dimensions)
    let abs_angle = angle_normalized.abs();
    if (abs_angle - 90.0).abs() < 0.001 || (abs_angle - 270.0).abs() < 0.001 {
        return (height, width);
    }

    // Fast path: exact 180 degree rotation (same dimensions)
    if (abs_angle - 180.0).abs() < 0.001 {
        return (width, height);
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    // The bounding box of a rotated rectangle is:
    // new_w = |w*cos| + |h*sin|
    // new_h = |w*sin| + |h*cos|
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image around its center.
///
/// The output canvas is expanded to fit the entire rotated image (no
/// clipping). Positive angles rotate counter-clockwise. Nearest falls back
/// to bilinear sampling; the distinction only matters for resize.
pub fn rotate(buffer: &PixelBuffer, angle_degrees: f64, filter: FilterType) -> PixelBuffer {
    // Fast path: no rotation needed
    if (angle_degrees % 360.0).abs() < 0.001 {
        return buffer.clone();
    }

    let n = buffer.channels().count();
    let (src_w, src_h) = (buffer.width() as f64, buffer.height() as f64);
    let (dst_w, dst_h) = rotated_bounds(buffer.width(), buffer.height(), angle_degrees);

    // Negate angle for correct visual rotation direction
    // (positive angle should rotate counter-clockwise visually)
    let angle_rad = -angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    // Center of source and destination images
    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; (dst_w * dst_h) as usize * n];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Translate destination point to origin at center
            let dx = dst_x as f64 - dst_cx;
            let dy = dst_y as f64 - dst_cy;

            // Apply inverse rotation to find source coordinates
            let src_x = dx * cos - dy * sin + src_cx;
            let src_y = dx * sin + dy * cos + src_cy;

            let dst_idx = ((dst_y * dst_w + dst_x) as usize) * n;

            let pixel = match filter {
                FilterType::Lanczos3 => sample_lanczos3(buffer, src_x, src_y),
                FilterType::Bilinear | FilterType::Nearest => {
                    sample_bilinear(buffer, src_x, src_y)
                }
            };

            output[dst_idx..dst_idx + n].copy_from_slice(&pixel[..n]);
        }
    }

    PixelBuffer::from_parts(dst_w, dst_h, buffer.channels(), output)
}

/// Get a pixel as [f64; 4] at the given coordinates. Unused channels are 0.
#[inline]
fn get_pixel_f64(buffer: &PixelBuffer, px: usize, py: usize) -> [f64; 4] {
    let n = buffer.channels().count();
    let idx = (py * buffer.width() as usize + px) * n;
    let mut out = [0.0; 4];
    for (o, &s) in out.iter_mut().zip(&buffer.samples()[idx..idx + n]) {
        *o = s as f64;
    }
    out
}

/// Sample a pixel using bilinear interpolation.
///
/// Considers the 4 nearest pixels and weights their contribution based on
/// distance.
fn sample_bilinear(buffer: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (buffer.width() as i64, buffer.height() as i64);
    let n = buffer.channels().count();

    // Out-of-bounds samples become black (transparent black for RGBA)
    if x < 0.0 || x >= (w - 1) as f64 || y < 0.0 || y >= (h - 1) as f64 {
        return [0, 0, 0, 0];
    }

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(buffer, x0, y0);
    let p10 = get_pixel_f64(buffer, x1, y0);
    let p01 = get_pixel_f64(buffer, x0, y1);
    let p11 = get_pixel_f64(buffer, x1, y1);

    let mut result = [0u8; 4];
    for i in 0..n {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

/// Sample a pixel using Lanczos3 interpolation over a 6x6 neighborhood.
fn sample_lanczos3(buffer: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (buffer.width() as i64, buffer.height() as i64);
    let n = buffer.channels().count();

    // Near the edges the full kernel does not fit; fall back to bilinear
    if x < 2.0 || x >= (w - 3) as f64 || y < 2.0 || y >= (h - 3) as f64 {
        return sample_bilinear(buffer, x, y);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 4];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;

            if px >= 0 && px < w && py >= 0 && py < h {
                let dx = x - px as f64;
                let dy = y - py as f64;
                let weight = lanczos_weight(dx, 3.0) * lanczos_weight(dy, 3.0);

                let pixel = get_pixel_f64(buffer, px as usize, py as usize);
                for i in 0..n {
                    sum[i] += pixel[i] * weight;
                }
                weight_sum += weight;
            }
        }
    }

    let mut result = [0u8; 4];
    if weight_sum > 0.0 {
        for i in 0..n {
            result[i] = (sum[i] / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }

    result
}

/// Lanczos kernel weight function.
///
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;

    // L(x) = a * sin(πx) * sin(πx/a) / (π²x²)
    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
