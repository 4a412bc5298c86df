//! The ordered filter pipeline.
//!
//! Stages run in one canonical order regardless of the order config fields
//! were set in: filter and tone adjustments, then resize, crop, rotation,
//! flips, the opacity blend, the border, and finally text overlays. Stages
//! whose config is at its identity value are skipped entirely, so an
//! all-default config returns a byte-identical copy of the input.
//!
//! Coordinate-sensitive consequences of the ordering:
//! - Crop rectangles address the resized image, not the original.
//! - Text overlay coordinates address the final canvas, after any border
//!   expansion.
//! - The border ring is drawn after the opacity blend and is never dimmed
//!   by it.

use crate::blend::blend;
use crate::buffer::PixelBuffer;
use crate::color;
use crate::convolve::{convolve, Kernel};
use crate::error::PipelineError;
use crate::overlay;
use crate::transform;
use crate::{Color, FilterKind, PipelineConfig};

/// One stage of the canonical pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Color/convolution filter plus brightness and contrast.
    Filter,
    /// Resample to the target dimensions.
    Resize,
    /// Extract the crop rectangle.
    Crop,
    /// Rotate with canvas expansion.
    Rotate,
    /// Horizontal and vertical mirroring.
    Flip,
    /// Blend toward a black canvas.
    Opacity,
    /// Expand the canvas with a solid ring.
    Border,
    /// Rasterize text overlays.
    Overlay,
}

impl Stage {
    /// All stages in execution order.
    pub const ORDER: [Stage; 8] = [
        Stage::Filter,
        Stage::Resize,
        Stage::Crop,
        Stage::Rotate,
        Stage::Flip,
        Stage::Opacity,
        Stage::Border,
        Stage::Overlay,
    ];
}

/// List the stages a config will actually execute, in order.
pub fn active_stages(config: &PipelineConfig) -> Vec<Stage> {
    Stage::ORDER
        .into_iter()
        .filter(|stage| stage_enabled(*stage, config))
        .collect()
}

/// Whether a stage's config is away from its identity value.
fn stage_enabled(stage: Stage, config: &PipelineConfig) -> bool {
    match stage {
        Stage::Filter => {
            config.filter != FilterKind::None
                || config.brightness != 1.0
                || config.contrast != 1.0
        }
        Stage::Resize => config.resize.is_some(),
        Stage::Crop => config.crop.is_some(),
        Stage::Rotate => (config.rotation % 360.0).abs() >= 0.001,
        Stage::Flip => config.flip_horizontal || config.flip_vertical,
        Stage::Opacity => config.opacity < 1.0,
        Stage::Border => config.border.map_or(false, |b| b.thickness > 0),
        Stage::Overlay => !config.overlays.is_empty(),
    }
}

/// Run the full pipeline over `input`.
///
/// The config is validated up front; no partial work happens on a rejected
/// config. The input buffer is never mutated.
///
/// # Errors
///
/// Returns `InvalidConfig` for out-of-range parameters and `InvalidRect`
/// when the crop rectangle does not fit the image it is applied to.
pub fn run_pipeline(
    input: &PixelBuffer,
    config: &PipelineConfig,
) -> Result<PixelBuffer, PipelineError> {
    config.validate()?;

    let mut current = apply_filter(input, config)?;

    if config.brightness != 1.0 {
        current = color::brightness(&current, config.brightness);
    }
    if config.contrast != 1.0 {
        current = color::contrast(&current, config.contrast);
    }

    if let Some((w, h)) = config.resize {
        current = transform::resize(&current, w, h, config.resample)?;
    }
    if let Some(rect) = config.crop {
        current = transform::crop(&current, rect)?;
    }
    if (config.rotation % 360.0).abs() >= 0.001 {
        current = transform::rotate(&current, config.rotation, config.resample);
    }
    if config.flip_horizontal {
        current = transform::flip_horizontal(&current);
    }
    if config.flip_vertical {
        current = transform::flip_vertical(&current);
    }

    if config.opacity < 1.0 {
        // Fade toward black; transparent black when alpha is present
        let canvas = PixelBuffer::solid(
            current.width(),
            current.height(),
            current.channels(),
            Color::rgba(0, 0, 0, 0),
        );
        current = blend(&canvas, &current, config.opacity)?;
    }

    if let Some(border) = &config.border {
        current = overlay::add_border(&current, border)?;
    }
    for text in &config.overlays {
        current = overlay::draw_text(&current, text);
    }

    Ok(current)
}

/// Apply the selected filter at the configured strength.
///
/// Most filters are computed at full intensity and blended against the
/// unfiltered buffer. Warm and cool are additive shifts, so strength scales
/// the shift directly and no blend is needed.
fn apply_filter(input: &PixelBuffer, config: &PipelineConfig) -> Result<PixelBuffer, PipelineError> {
    let filtered = match config.filter {
        FilterKind::None => return Ok(input.clone()),
        FilterKind::Warm => return Ok(color::warm(input, config.strength)),
        FilterKind::Cool => return Ok(color::cool(input, config.strength)),
        FilterKind::Blur => {
            let kernel = Kernel::box_blur(config.blur_kernel_size as usize)?;
            convolve(input, &kernel)?.saturate()
        }
        FilterKind::Sharpen => {
            let kernel = Kernel::sharpen(config.sharpen_amount);
            convolve(input, &kernel)?.saturate()
        }
        FilterKind::Invert => color::invert(input),
        FilterKind::Grayscale => color::grayscale(input),
        FilterKind::Sepia => color::sepia(input),
        FilterKind::Vintage => color::vintage(input),
        FilterKind::Polaroid => color::polaroid(input),
    };

    blend(input, &filtered, config.strength)
}
