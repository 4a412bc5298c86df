//! Horizontal and vertical mirroring.
//!
//! Flips are pure pixel permutations: dimensions, channel count, and the
//! sample multiset are all preserved, and each flip is its own inverse.

use crate::buffer::PixelBuffer;

/// Mirror an image across its vertical axis (left/right swap).
pub fn flip_horizontal(buffer: &PixelBuffer) -> PixelBuffer {
    let n = buffer.channels().count();
    let (w, h) = (buffer.width() as usize, buffer.height() as usize);
    let src = buffer.samples();
    let mut out = vec![0u8; src.len()];

    for y in 0..h {
        for x in 0..w {
            let src_idx = (y * w + x) * n;
            let dst_idx = (y * w + (w - 1 - x)) * n;
            out[dst_idx..dst_idx + n].copy_from_slice(&src[src_idx..src_idx + n]);
        }
    }

    PixelBuffer::from_parts(buffer.width(), buffer.height(), buffer.channels(), out)
}

/// Mirror an image across its horizontal axis (top/bottom swap).
pub fn flip_vertical(buffer: &PixelBuffer) -> PixelBuffer {
    let n = buffer.channels().count();
    let (w, h) = (buffer.width() as usize, buffer.height() as usize);
    let row_bytes = w * n;
    let src = buffer.samples();
    let mut out = vec![0u8; src.len()];

    for y in 0..h {
        let src_row = y * row_bytes;
        let dst_row = (h - 1 - y) * row_bytes;
        out[dst_row..dst_row + row_bytes].copy_from_slice(&src[src_row..src_row + row_bytes]);
    }

    PixelBuffer::from_parts(buffer.width(), buffer.height(), buffer.channels(), out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Channels;

    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut samples = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                samples.push(v);
                samples.push(v);
                samples.push(v);
            }
        }
        PixelBuffer::new(width, height, Channels::Rgb, samples).unwrap()
    }

    #[test]
    fn test_flip_horizontal_swaps_columns() {
        let img = test_image(3, 1);
        let result = flip_horizontal(&img);
        assert_eq!(result.get(0, 0).unwrap(), img.get(2, 0).unwrap());
        assert_eq!(result.get(1, 0).unwrap(), img.get(1, 0).unwrap());
        assert_eq!(result.get(2, 0).unwrap(), img.get(0, 0).unwrap());
    }

    #[test]
    fn test_flip_vertical_swaps_rows() {
        let img = test_image(1, 3);
        let result = flip_vertical(&img);
        assert_eq!(result.get(0, 0).unwrap(), img.get(0, 2).unwrap());
        assert_eq!(result.get(0, 1).unwrap(), img.get(0, 1).unwrap());
        assert_eq!(result.get(0, 2).unwrap(), img.get(0, 0).unwrap());
    }

    #[test]
    fn test_flip_horizontal_is_involution() {
        let img = test_image(7, 5);
        assert_eq!(flip_horizontal(&flip_horizontal(&img)), img);
    }

    #[test]
    fn test_flip_vertical_is_involution() {
        let img = test_image(6, 9);
        assert_eq!(flip_vertical(&flip_vertical(&img)), img);
    }

    #[test]
    fn test_flips_commute() {
        let img = test_image(8, 6);
        let hv = flip_vertical(&flip_horizontal(&img));
        let vh = flip_horizontal(&flip_vertical(&img));
        assert_eq!(hv, vh);
    }

    #[test]
    fn test_flip_preserves_dimensions() {
        let img = test_image(13, 4);
        let h = flip_horizontal(&img);
        let v = flip_vertical(&img);
        assert_eq!((h.width(), h.height()), (13, 4));
        assert_eq!((v.width(), v.height()), (13, 4));
    }

    #[test]
    fn test_flip_1x1_is_identity() {
        let img = test_image(1, 1);
        assert_eq!(flip_horizontal(&img), img);
        assert_eq!(flip_vertical(&img), img);
    }

    #[test]
    fn test_flip_moves_whole_pixels() {
        // Channel order within a pixel must not reverse
        let samples = vec![
            1, 2, 3, 255, //
            4, 5, 6, 128,
        ];
        let img = PixelBuffer::new(2, 1, Channels::Rgba, samples).unwrap();
        let result = flip_horizontal(&img);
        assert_eq!(result.get(0, 0).unwrap(), &[4, 5, 6, 128]);
        assert_eq!(result.get(1, 0).unwrap(), &[1, 2, 3, 255]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::buffer::Channels;
    use proptest::prelude::*;

    fn buffer_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=24, 1u32..=24).prop_flat_map(|(w, h)| {
            proptest::collection::vec(any::<u8>(), (w * h * 3) as usize)
                .prop_map(move |samples| PixelBuffer::new(w, h, Channels::Rgb, samples).unwrap())
        })
    }

    proptest! {
        /// Property: flipping twice returns the original.
        #[test]
        fn prop_double_flip_is_identity(img in buffer_strategy()) {
            prop_assert_eq!(flip_horizontal(&flip_horizontal(&img)), img.clone());
            prop_assert_eq!(flip_vertical(&flip_vertical(&img)), img);
        }

        /// Property: flips preserve the sample multiset.
        #[test]
        fn prop_flip_preserves_samples(img in buffer_strategy()) {
            let mut before: Vec<u8> = img.samples().to_vec();
            let mut after: Vec<u8> = flip_horizontal(&img).samples().to_vec();
            before.sort_unstable();
            after.sort_unstable();
            prop_assert_eq!(before, after);
        }
    }
}
