use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// A shape transform, written in the compact `r<deg>,<cx>,<cy>` form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Clockwise rotation by `degrees` about the pivot `(cx, cy)`.
    Rotate { degrees: f64, cx: f64, cy: f64 },
}

impl Transform {
    /// Apply the transform to a point in surface coordinates (y grows down).
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        match *self {
            Transform::Rotate { degrees, cx, cy } => {
                let (sin, cos) = degrees.to_radians().sin_cos();
                let dx = x - cx;
                let dy = y - cy;
                (cx + dx * cos - dy * sin, cy + dx * sin + dy * cos)
            }
        }
    }

    pub fn inverse(&self) -> Transform {
        match *self {
            Transform::Rotate { degrees, cx, cy } => Transform::Rotate {
                degrees: -degrees,
                cx,
                cy,
            },
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Rotate { degrees, cx, cy } => write!(f, "r{},{},{}", degrees, cx, cy),
        }
    }
}

impl FromStr for Transform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidTransform(s.to_string());
        let body = s.trim().strip_prefix('r').ok_or_else(invalid)?;
        let values: Vec<f64> = body
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|_| invalid())?;
        match values.as_slice() {
            [degrees, cx, cy] => Ok(Transform::Rotate {
                degrees: *degrees,
                cx: *cx,
                cy: *cy,
            }),
            _ => Err(invalid()),
        }
    }
}

/// Vector drawing surface the spinner paints its spokes onto.
///
/// Shapes are created visible with no transform. Calls never fail; a
/// backend that can fault is expected to panic or record the fault itself.
pub trait DrawingSurface {
    /// Handle to a shape living on this surface.
    type Shape: Copy;

    fn resize(&mut self, width: u32, height: u32);

    /// Remove every shape. Handles obtained before are invalid afterwards.
    fn clear(&mut self);

    fn rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, corner_radius: f64)
        -> Self::Shape;

    /// Duplicate a shape with all of its attributes.
    fn clone_shape(&mut self, shape: Self::Shape) -> Self::Shape;

    /// Replace the shape's transform.
    fn transform(&mut self, shape: Self::Shape, transform: Transform);

    fn set_fill(&mut self, shape: Self::Shape, color: &str);

    fn set_stroke_width(&mut self, shape: Self::Shape, width: f64);

    fn show_shape(&mut self, shape: Self::Shape);

    fn hide_shape(&mut self, shape: Self::Shape);
}

/// Host element the spinner is mounted in.
pub trait Mount {
    type Surface: DrawingSurface;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Create the drawing surface, sized `width` x `height`, attached to this
    /// host. Called at most once per spinner.
    fn create_surface(&mut self, width: u32, height: u32) -> Self::Surface;
}
