use ratatui::style::Color;
use ratatui::widgets::canvas::{Painter, Shape};
use ringspin_core::{ColorParser, CssColorParser, Scene, SceneShape};

/// Sub-dot sampling step, in scene units (one unit is one braille dot).
const SAMPLE_STEP: f64 = 0.5;

/// Draws the visible shapes of a [`Scene`] onto a ratatui canvas.
///
/// The canvas must use `x_bounds([0, scene.width()])` and
/// `y_bounds([0, scene.height()])`; scene y grows down, canvas y grows up.
pub struct ScenePainter<'a> {
    scene: &'a Scene,
}

impl<'a> ScenePainter<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, f64::from(self.scene.width())]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        [0.0, f64::from(self.scene.height())]
    }
}

/// Convert a scene point to canvas coordinates.
pub fn scene_to_canvas(scene_height: u32, x: f64, y: f64) -> (f64, f64) {
    (x, f64::from(scene_height) - y)
}

/// Terminal color for a fill string; `None` for unparsable or "none" fills.
pub fn fill_color(fill: &str) -> Option<Color> {
    CssColorParser
        .parse(fill)
        .ok()
        .map(|rgb| Color::Rgb(rgb.r, rgb.g, rgb.b))
}

fn paint_shape(painter: &mut Painter<'_, '_>, scene_height: u32, shape: &SceneShape, color: Color) {
    let (min_x, min_y, max_x, max_y) = shape.bounds();
    let mut y = min_y.floor();
    while y <= max_y {
        let mut x = min_x.floor();
        while x <= max_x {
            if shape.contains(x, y) {
                let (cx, cy) = scene_to_canvas(scene_height, x, y);
                if let Some((px, py)) = painter.get_point(cx, cy) {
                    painter.paint(px, py, color);
                }
            }
            x += SAMPLE_STEP;
        }
        y += SAMPLE_STEP;
    }
}

impl Shape for ScenePainter<'_> {
    fn draw(&self, painter: &mut Painter<'_, '_>) {
        let height = self.scene.height();
        for shape in self.scene.visible_shapes() {
            if let Some(color) = fill_color(&shape.fill) {
                paint_shape(painter, height, shape, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::symbols::Marker;
    use ratatui::widgets::canvas::Canvas;
    use ratatui::widgets::Widget;
    use ringspin_core::DrawingSurface;

    use super::*;

    fn render(scene: &Scene, area: Rect) -> Buffer {
        let painter = ScenePainter::new(scene);
        let mut buf = Buffer::empty(area);
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds(painter.x_bounds())
            .y_bounds(painter.y_bounds())
            .paint(|ctx| ctx.draw(&painter))
            .render(area, &mut buf);
        buf
    }

    fn painted_cells(buf: &Buffer, color: Color) -> usize {
        buf.content()
            .iter()
            .filter(|c| c.fg == color && c.symbol() != " ")
            .count()
    }

    #[test]
    fn test_scene_to_canvas_flips_y() {
        assert_eq!(scene_to_canvas(40, 3.0, 0.0), (3.0, 40.0));
        assert_eq!(scene_to_canvas(40, 3.0, 40.0), (3.0, 0.0));
    }

    #[test]
    fn test_fill_color() {
        assert_eq!(fill_color("#aaaaaa"), Some(Color::Rgb(170, 170, 170)));
        assert_eq!(fill_color("none"), None);
    }

    #[test]
    fn test_paints_visible_shapes_in_fill_color() {
        let area = Rect::new(0, 0, 10, 5);
        let mut scene = Scene::new(20, 20);
        let bar = scene.rounded_rect(8.0, 0.0, 4.0, 10.0, 1.0);
        scene.set_fill(bar, "#ff0000");

        let buf = render(&scene, area);
        assert!(painted_cells(&buf, Color::Rgb(255, 0, 0)) > 0);

        // Top half of the canvas only: the bar sits above the center.
        let bottom = area.height - 1;
        assert!((0..area.width).all(|x| buf.content()[buf.index_of(x, bottom)].symbol() == " "));
    }

    #[test]
    fn test_hidden_and_unfilled_shapes_are_skipped() {
        let area = Rect::new(0, 0, 10, 5);
        let mut scene = Scene::new(20, 20);
        let hidden = scene.rounded_rect(0.0, 0.0, 20.0, 20.0, 0.0);
        scene.set_fill(hidden, "#00ff00");
        scene.hide_shape(hidden);
        scene.rounded_rect(0.0, 0.0, 20.0, 20.0, 0.0);

        let buf = render(&scene, area);
        assert!(buf.content().iter().all(|c| c.symbol() == " "));
    }
}
