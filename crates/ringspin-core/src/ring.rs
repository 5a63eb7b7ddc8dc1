use crate::options::SpinnerOptions;
use crate::surface::Transform;

/// Number of spokes on the ring.
pub const STEP_COUNT: usize = 12;

/// Angle between two neighbouring spokes, in degrees.
pub const STEP_ANGLE: f64 = 360.0 / STEP_COUNT as f64;

/// Normalize any step index into `0..STEP_COUNT`, wrapping negatives.
pub fn circulate_step_index(step_index: i64) -> usize {
    step_index.rem_euclid(STEP_COUNT as i64) as usize
}

/// Axis-aligned rounded rectangle, before rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpokeRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
}

/// Where the ring sits inside a host of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLayout {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    /// Spoke 0, straight above the center. Every other spoke is this one
    /// rotated about the center.
    pub first_spoke: SpokeRect,
}

impl RingLayout {
    pub fn compute(width: u32, height: u32, options: &SpinnerOptions) -> Self {
        let center_x = f64::from(width / 2);
        let center_y = f64::from(height / 2);
        let radius = center_x.min(center_y);

        let first_spoke = SpokeRect {
            x: (center_x - f64::from(options.step_width) / 2.0).floor(),
            y: center_y - radius,
            width: f64::from(options.step_width),
            height: radius - (radius * options.knock_out_ratio).floor(),
            corner_radius: f64::from(options.corner_radius),
        };

        Self {
            center_x,
            center_y,
            radius,
            first_spoke,
        }
    }

    /// Rotation that carries spoke 0 onto spoke `index`.
    pub fn spoke_transform(&self, index: usize) -> Transform {
        Transform::Rotate {
            degrees: STEP_ANGLE * index as f64,
            cx: self.center_x,
            cy: self.center_y,
        }
    }
}
