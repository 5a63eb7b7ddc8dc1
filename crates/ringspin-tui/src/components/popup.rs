use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear};
use ratatui::Frame;

use crate::theme::Theme;

/// Centered overlay frame shared by the help and log popups, with an
/// optional key hint in the bottom border.
pub struct Popup {
    title: String,
    footer: Option<String>,
    visible: bool,
    theme: Theme,
    width_percent: u16,
    height_percent: u16,
}

impl Popup {
    pub fn new(title: impl Into<String>, theme: Theme) -> Self {
        Self {
            title: title.into(),
            footer: None,
            visible: false,
            theme,
            width_percent: 50,
            height_percent: 40,
        }
    }

    pub fn with_size(mut self, width_percent: u16, height_percent: u16) -> Self {
        self.width_percent = width_percent;
        self.height_percent = height_percent;
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Flip visibility and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Area the popup covers inside `full`.
    pub fn area(&self, full: Rect) -> Rect {
        let [column] = Layout::horizontal([Constraint::Percentage(self.width_percent)])
            .flex(Flex::Center)
            .areas(full);
        let [area] = Layout::vertical([Constraint::Percentage(self.height_percent)])
            .flex(Flex::Center)
            .areas(column);
        area
    }

    /// Clear the popup area and draw its border. Returns the inner area.
    pub fn render_frame(&self, frame: &mut Frame, full: Rect) -> Rect {
        let area = self.area(full);
        frame.render_widget(Clear, area);

        let mut block = Block::bordered()
            .title(Line::styled(format!(" {} ", self.title), self.theme.popup_title))
            .border_style(self.theme.popup_border);
        if let Some(footer) = &self.footer {
            block = block.title_bottom(
                Line::styled(format!(" {} ", footer), self.theme.dimmed).right_aligned(),
            );
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;

    #[test]
    fn test_area_is_centered() {
        let popup = Popup::new("Test", Theme::default()).with_size(50, 50);
        assert_eq!(popup.area(Rect::new(0, 0, 100, 40)), Rect::new(25, 10, 50, 20));
    }

    #[test]
    fn test_toggle() {
        let mut popup = Popup::new("Test", Theme::default());
        assert!(!popup.visible());
        assert!(popup.toggle());
        assert!(!popup.toggle());
        popup.show();
        assert!(popup.visible());
    }

    #[test]
    fn test_footer_in_bottom_border() {
        let popup = Popup::new("Log", Theme::default())
            .with_size(100, 100)
            .with_footer("q:close");
        let mut terminal = Terminal::new(TestBackend::new(30, 6)).unwrap();
        terminal
            .draw(|frame| {
                let inner = popup.render_frame(frame, frame.area());
                assert_eq!(inner, Rect::new(1, 1, 28, 4));
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let bottom: String = (0..30)
            .map(|x| buffer.content()[buffer.index_of(x, 5)].symbol().to_string())
            .collect();
        assert!(bottom.contains(" q:close "));
        let top: String = (0..30)
            .map(|x| buffer.content()[buffer.index_of(x, 0)].symbol().to_string())
            .collect();
        assert!(top.contains(" Log "));
    }
}
