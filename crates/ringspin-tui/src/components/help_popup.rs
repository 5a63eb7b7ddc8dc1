use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::Action;
use crate::components::popup::Popup;
use crate::keymap::BINDINGS;
use crate::theme::Theme;

/// Key binding reference.
pub struct HelpPopup {
    popup: Popup,
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self {
            popup: Popup::new("Help", theme.clone())
                .with_size(60, 60)
                .with_footer("any key closes"),
            theme,
        }
    }

    pub fn visible(&self) -> bool {
        self.popup.visible()
    }

    pub fn show(&mut self) {
        self.popup.show();
    }

    pub fn hide(&mut self) {
        self.popup.hide();
    }

    /// Any key closes the popup.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            _ => {
                self.hide();
                Action::ClosePopup
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, full: Rect) {
        if !self.popup.visible() {
            return;
        }

        let inner = self.popup.render_frame(frame, full);
        let width = BINDINGS.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(keys, description)| {
                Line::from(vec![
                    Span::styled(format!(" {:<width$}  ", keys, width = width), self.theme.accent),
                    Span::styled(*description, self.theme.normal),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
