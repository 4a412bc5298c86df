//! Pixelpress Core - Image editing pipeline library
//!
//! This crate provides the core pixel-processing functionality for
//! Pixelpress: convolution filters, color transforms, blending, geometric
//! transforms, overlay compositing, histogram computation, and the ordered
//! pipeline that ties them together.
//!
//! The library operates purely on in-memory [`PixelBuffer`]s. Decoding and
//! encoding container formats, as well as all UI concerns, belong to the
//! external caller.

pub mod blend;
pub mod buffer;
pub mod color;
pub mod convolve;
pub mod error;
pub mod histogram;
pub mod overlay;
pub mod pipeline;
pub mod transform;

pub use blend::blend;
pub use buffer::{Channels, PixelBuffer};
pub use convolve::{convolve, Kernel};
pub use error::PipelineError;
pub use histogram::compute_histogram;
pub use overlay::{add_border, draw_text};
pub use pipeline::{active_stages, run_pipeline, Stage};
pub use transform::{
    crop, flip_horizontal, flip_vertical, resize, rotate, rotated_bounds, FilterType,
};

/// An RGBA color. The alpha component is ignored when drawing onto RGB
/// buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully opaque color from RGB components.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA components.
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque black.
    pub const BLACK: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// A rectangle in absolute pixel coordinates, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// Left edge in pixels.
    pub left: u32,
    /// Top edge in pixels.
    pub top: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Selectable pixel filter for the color/convolution stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// No filter; the stage is skipped.
    #[default]
    None,
    /// Box blur via convolution. Kernel size comes from `blur_kernel_size`.
    Blur,
    /// Sharpen via convolution. Intensity comes from `sharpen_amount`.
    Sharpen,
    /// Per-channel inversion.
    Invert,
    /// Simple-mean grayscale.
    Grayscale,
    /// Fixed sepia color-mixing matrix.
    Sepia,
    /// Pink-toned lookup-table remap.
    Vintage,
    /// Additive blue shift.
    Cool,
    /// Additive red/green shift.
    Warm,
    /// Ocean-toned lookup-table remap.
    Polaroid,
}

/// A text or emoji overlay entry.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextOverlay {
    /// Text to rasterize.
    pub text: String,
    /// Left edge of the first glyph; may be negative.
    pub x: i32,
    /// Top edge of the glyph row; may be negative.
    pub y: i32,
    /// Requested glyph height in pixels; rendered from a compact bitmap font.
    pub font_size: u32,
    /// Glyph color.
    pub color: Color,
}

/// A solid border drawn around the image, expanding the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Border {
    /// Ring thickness in pixels. Zero is a no-op.
    pub thickness: u32,
    /// Ring color.
    pub color: Color,
}

/// Full configuration for one pipeline run.
///
/// The config is fully resolved before execution: no stage consults external
/// state mid-run. `Default` describes an identity run that returns a copy of
/// the input.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Filter applied in the first stage.
    pub filter: FilterKind,
    /// Blend factor between the unfiltered and fully filtered buffer (0-1).
    pub strength: f32,
    /// Side length of the box blur kernel; must be odd.
    pub blur_kernel_size: u32,
    /// Sharpen intensity; 1.0 reproduces the classic 5/-1 cross kernel.
    pub sharpen_amount: f32,
    /// Multiplicative brightness factor (> 0, 1.0 = unchanged).
    pub brightness: f32,
    /// Contrast factor (> 0, 1.0 = unchanged), remapped around mid-gray.
    pub contrast: f32,
    /// Final opacity over a solid black canvas (0-1, 1.0 = unchanged).
    pub opacity: f32,
    /// Resize target (width, height), applied before crop.
    pub resize: Option<(u32, u32)>,
    /// Crop rectangle in pixel coordinates of the (possibly resized) image.
    pub crop: Option<Rect>,
    /// Rotation angle in degrees; the canvas expands to fit.
    pub rotation: f64,
    /// Mirror along the vertical axis.
    pub flip_horizontal: bool,
    /// Mirror along the horizontal axis.
    pub flip_vertical: bool,
    /// Text/emoji overlays, drawn last in order.
    pub overlays: Vec<TextOverlay>,
    /// Optional canvas-expanding border.
    pub border: Option<Border>,
    /// Resampling filter used by resize and rotation.
    pub resample: FilterType,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            filter: FilterKind::None,
            strength: 1.0,
            blur_kernel_size: 3,
            sharpen_amount: 1.0,
            brightness: 1.0,
            contrast: 1.0,
            opacity: 1.0,
            resize: None,
            crop: None,
            rotation: 0.0,
            flip_horizontal: false,
            flip_vertical: false,
            overlays: Vec::new(),
            border: None,
            resample: FilterType::default(),
        }
    }
}

impl PipelineConfig {
    /// Create a new identity configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every parameter is within its documented range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first out-of-range field.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !(0.0..=1.0).contains(&self.strength) {
            return Err(PipelineError::InvalidConfig(format!(
                "strength must be in [0, 1], got {}",
                self.strength
            )));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(PipelineError::InvalidConfig(format!(
                "opacity must be in [0, 1], got {}",
                self.opacity
            )));
        }
        if !self.brightness.is_finite() || self.brightness <= 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "brightness must be a positive finite factor, got {}",
                self.brightness
            )));
        }
        if !self.contrast.is_finite() || self.contrast <= 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "contrast must be a positive finite factor, got {}",
                self.contrast
            )));
        }
        if self.blur_kernel_size == 0 || self.blur_kernel_size % 2 == 0 {
            return Err(PipelineError::InvalidConfig(format!(
                "blur kernel size must be odd and >= 1, got {}",
                self.blur_kernel_size
            )));
        }
        if !self.sharpen_amount.is_finite() || self.sharpen_amount < 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "sharpen amount must be non-negative and finite, got {}",
                self.sharpen_amount
            )));
        }
        if let Some((w, h)) = self.resize {
            if w == 0 || h == 0 {
                return Err(PipelineError::InvalidConfig(format!(
                    "resize target must be non-zero, got {w}x{h}"
                )));
            }
        }
        if !self.rotation.is_finite() {
            return Err(PipelineError::InvalidConfig(format!(
                "rotation angle must be finite, got {}",
                self.rotation
            )));
        }
        for overlay in &self.overlays {
            if overlay.font_size == 0 {
                return Err(PipelineError::InvalidConfig(
                    "overlay font size must be >= 1".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Check if this configuration describes an identity run.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// Per-channel intensity distributions for a buffer.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// Red channel histogram (256 bins).
    pub red: [u32; 256],
    /// Green channel histogram (256 bins).
    pub green: [u32; 256],
    /// Blue channel histogram (256 bins).
    pub blue: [u32; 256],
    /// Alpha channel histogram; populated only for RGBA buffers.
    pub alpha: Option<[u32; 256]>,
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            red: [0; 256],
            green: [0; 256],
            blue: [0; 256],
            alpha: None,
        }
    }
}

impl Histogram {
    /// Create a new empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the maximum bin value across the color channels for
    /// normalization.
    pub fn max_value(&self) -> u32 {
        let max_r = *self.red.iter().max().unwrap_or(&0);
        let max_g = *self.green.iter().max().unwrap_or(&0);
        let max_b = *self.blue.iter().max().unwrap_or(&0);
        max_r.max(max_g).max(max_b)
    }

    /// Check for highlight clipping (color values at 255).
    pub fn has_highlight_clipping(&self) -> bool {
        self.red[255] > 0 || self.green[255] > 0 || self.blue[255] > 0
    }

    /// Check for shadow clipping (color values at 0).
    pub fn has_shadow_clipping(&self) -> bool {
        self.red[0] > 0 || self.green[0] > 0 || self.blue[0] > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_is_identity() {
        let config = PipelineConfig::new();
        assert!(config.is_identity());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_not_identity() {
        let mut config = PipelineConfig::new();
        config.filter = FilterKind::Invert;
        assert!(!config.is_identity());
    }

    #[test]
    fn test_validate_rejects_strength_out_of_range() {
        let mut config = PipelineConfig::new();
        config.strength = 1.5;
        assert!(matches!(
            config.validate(),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_even_blur_kernel() {
        let mut config = PipelineConfig::new();
        config.blur_kernel_size = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_brightness() {
        let mut config = PipelineConfig::new();
        config.brightness = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_resize_target() {
        let mut config = PipelineConfig::new();
        config.resize = Some((0, 100));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan_rotation() {
        let mut config = PipelineConfig::new();
        config.rotation = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_font_size() {
        let mut config = PipelineConfig::new();
        config.overlays.push(TextOverlay {
            text: "hi".to_string(),
            x: 0,
            y: 0,
            font_size: 0,
            color: Color::BLACK,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_histogram_clipping() {
        let mut hist = Histogram::new();
        assert!(!hist.has_highlight_clipping());
        assert!(!hist.has_shadow_clipping());

        hist.red[255] = 100;
        assert!(hist.has_highlight_clipping());

        hist.blue[0] = 50;
        assert!(hist.has_shadow_clipping());
    }

    #[test]
    fn test_color_constructors() {
        assert_eq!(Color::rgb(1, 2, 3).a, 255);
        assert_eq!(Color::rgba(1, 2, 3, 4).a, 4);
        assert_eq!(Color::default(), Color::BLACK);
    }
}
