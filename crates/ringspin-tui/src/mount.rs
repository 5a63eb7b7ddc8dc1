use ratatui::layout::Rect;
use ringspin_core::{Mount, Scene};

/// Braille dots per terminal cell, horizontally and vertically.
pub const DOTS_PER_CELL: (u32, u32) = (2, 4);

/// A terminal region hosting a spinner. Sizes are in braille dots, so the
/// ring keeps its shape on the usual tall, narrow terminal cells.
#[derive(Debug, Default)]
pub struct TerminalMount {
    area: Rect,
    surfaces_created: usize,
}

impl TerminalMount {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            surfaces_created: 0,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Move or resize the region. Returns true if the size changed.
    pub fn set_area(&mut self, area: Rect) -> bool {
        let resized = area.width != self.area.width || area.height != self.area.height;
        self.area = area;
        resized
    }

    pub fn surfaces_created(&self) -> usize {
        self.surfaces_created
    }
}

impl Mount for TerminalMount {
    type Surface = Scene;

    fn width(&self) -> u32 {
        u32::from(self.area.width) * DOTS_PER_CELL.0
    }

    fn height(&self) -> u32 {
        u32::from(self.area.height) * DOTS_PER_CELL.1
    }

    fn create_surface(&mut self, width: u32, height: u32) -> Scene {
        self.surfaces_created += 1;
        Scene::new(width, height)
    }
}
