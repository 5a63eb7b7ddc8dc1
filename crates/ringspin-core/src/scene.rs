use crate::ring::SpokeRect;
use crate::surface::{DrawingSurface, Transform};

/// Index of a shape inside a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(pub usize);

/// A rounded rectangle retained by a [`Scene`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneShape {
    pub rect: SpokeRect,
    pub transform: Option<Transform>,
    pub fill: String,
    pub stroke_width: f64,
    pub visible: bool,
}

impl SceneShape {
    /// Hit test in surface coordinates, honouring transform and rounded corners.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (lx, ly) = match self.transform {
            Some(t) => t.inverse().apply(x, y),
            None => (x, y),
        };
        let SpokeRect {
            x: rx,
            y: ry,
            width,
            height,
            corner_radius,
        } = self.rect;
        if width <= 0.0 || height <= 0.0 {
            return false;
        }
        if lx < rx || lx > rx + width || ly < ry || ly > ry + height {
            return false;
        }
        let r = corner_radius.max(0.0).min(width / 2.0).min(height / 2.0);
        // Distance to the rectangle shrunk by r on every side.
        let dx = (rx + r - lx).max(lx - (rx + width - r)).max(0.0);
        let dy = (ry + r - ly).max(ly - (ry + height - r)).max(0.0);
        dx * dx + dy * dy <= r * r
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)` in surface coordinates.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let SpokeRect {
            x, y, width, height, ..
        } = self.rect;
        let corners = [(x, y), (x + width, y), (x, y + height), (x + width, y + height)];
        corners
            .iter()
            .map(|&(cx, cy)| match self.transform {
                Some(t) => t.apply(cx, cy),
                None => (cx, cy),
            })
            .fold(
                (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
                |(ax, ay, bx, by), (px, py)| (ax.min(px), ay.min(py), bx.max(px), by.max(py)),
            )
    }
}

/// In-memory retained drawing surface.
///
/// Hosts render it however they like; the terminal host rasterizes it onto a
/// ratatui canvas.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    width: u32,
    height: u32,
    shapes: Vec<SceneShape>,
    clear_count: usize,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn shapes(&self) -> &[SceneShape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&SceneShape> {
        self.shapes.get(id.0)
    }

    pub fn visible_shapes(&self) -> impl Iterator<Item = &SceneShape> {
        self.shapes.iter().filter(|s| s.visible)
    }

    /// How many times the scene has been cleared.
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }

    fn with_shape(&mut self, id: ShapeId, f: impl FnOnce(&mut SceneShape)) {
        if let Some(shape) = self.shapes.get_mut(id.0) {
            f(shape);
        }
    }
}

impl DrawingSurface for Scene {
    type Shape = ShapeId;

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.shapes.clear();
        self.clear_count += 1;
    }

    fn rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        corner_radius: f64,
    ) -> ShapeId {
        self.shapes.push(SceneShape {
            rect: SpokeRect {
                x,
                y,
                width,
                height,
                corner_radius,
            },
            transform: None,
            fill: "none".to_string(),
            stroke_width: 1.0,
            visible: true,
        });
        ShapeId(self.shapes.len() - 1)
    }

    fn clone_shape(&mut self, shape: ShapeId) -> ShapeId {
        match self.shapes.get(shape.0).cloned() {
            Some(copy) => {
                self.shapes.push(copy);
                ShapeId(self.shapes.len() - 1)
            }
            // Cloning a dead handle yields another dead handle.
            None => ShapeId(usize::MAX),
        }
    }

    fn transform(&mut self, shape: ShapeId, transform: Transform) {
        self.with_shape(shape, |s| s.transform = Some(transform));
    }

    fn set_fill(&mut self, shape: ShapeId, color: &str) {
        self.with_shape(shape, |s| s.fill = color.to_string());
    }

    fn set_stroke_width(&mut self, shape: ShapeId, width: f64) {
        self.with_shape(shape, |s| s.stroke_width = width);
    }

    fn show_shape(&mut self, shape: ShapeId) {
        self.with_shape(shape, |s| s.visible = true);
    }

    fn hide_shape(&mut self, shape: ShapeId) {
        self.with_shape(shape, |s| s.visible = false);
    }
}
