use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use ringspin_core::ring::STEP_COUNT;
use ringspin_core::AnimationState;

use crate::component::Component;
use crate::keymap::HINTS;
use crate::theme::Theme;

/// Snapshot of the spinner shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinnerStatus {
    pub state: AnimationState,
    pub visible: bool,
    pub step: usize,
    pub tail_length: u32,
    pub step_interval_ms: u128,
}

/// Bottom status bar showing spinner state and hints.
pub struct StatusBar {
    status: Option<SpinnerStatus>,
    message: Option<String>,
    theme: Theme,
}

impl StatusBar {
    pub fn new(theme: Theme) -> Self {
        Self {
            status: None,
            message: None,
            theme,
        }
    }

    pub fn set_status(&mut self, status: SpinnerStatus) {
        self.status = Some(status);
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Text of the bar before padding.
    pub fn text(&self) -> String {
        let mut text = String::from(" ");
        match self.status {
            Some(status) => {
                text.push_str(&status.state.to_string());
                if !status.visible {
                    text.push_str(" (hidden)");
                }
                text.push_str(&format!(
                    " | step {}/{} | tail {} | {} ms/step",
                    status.step + 1,
                    STEP_COUNT,
                    status.tail_length,
                    status.step_interval_ms
                ));
            }
            None => text.push_str("not rendered"),
        }
        if let Some(message) = &self.message {
            text.push_str(" | ");
            text.push_str(message);
        }
        text.push_str(" | ");
        text.push_str(HINTS);
        text.push(' ');
        text
    }
}

impl Component for StatusBar {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let text = self.text();
        let mut spans = vec![Span::styled(text, self.theme.status_bar)];

        // Pad to fill width
        let content_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let padding = " ".repeat(area.width as usize - content_len.min(area.width as usize));
        spans.push(Span::styled(padding, self.theme.status_bar));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
