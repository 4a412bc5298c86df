//! Geometric transform operations: crop, resize, rotation, and flips.
//!
//! # Transform Order
//!
//! Crop, resize, and rotation do not commute, so the pipeline fixes one
//! canonical order (see [`crate::pipeline`]):
//!
//! 1. Color/convolution filters
//! 2. Resize
//! 3. Crop
//! 4. Rotation (canvas-expanding)
//! 5. Flips (horizontal, then vertical)
//! 6. Opacity blend
//! 7. Border
//! 8. Text/emoji overlay
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - Crop rectangles are absolute pixel coordinates
//! - Rotation angles are in degrees, positive = counter-clockwise

mod crop;
mod flip;
mod resize;
mod rotation;

pub use crop::crop;
pub use flip::{flip_horizontal, flip_vertical};
pub use resize::{resize, FilterType};
pub use rotation::{rotate, rotated_bounds};
