//! Default sizes and settings (world units, mirroring the original editor)

/// Default node width/height when an import record omits it
pub const NODE_SIZE: f64 = 10.0;
/// Lower bound for node width/height
pub const NODE_MIN_SIZE: f64 = 10.0;
/// Padding added around node rectangles by the bounding box
pub const BBOX_PADDING: f64 = 80.0;
/// Self-loop start angle in degrees
pub const LOOP_START: f64 = 180.0;
/// Self-loop end angle in degrees
pub const LOOP_END: f64 = 270.0;
pub const ARROW_LENGTH: f64 = 10.0;
/// Half-opening of the arrowhead in degrees
pub const ARROW_ANGLE: f64 = 15.0;
pub const RECT_ASPECT: f64 = 1.0;
/// Distance between rings of the placement spiral
pub const SPIRAL_SPACING: f64 = 40.0;
pub const CHAR_WIDTH: f64 = 7.0;
pub const LINE_HEIGHT: f64 = 16.0;
