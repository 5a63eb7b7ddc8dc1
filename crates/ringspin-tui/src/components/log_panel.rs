use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::Action;
use crate::components::popup::Popup;
use crate::theme::Theme;

const MAX_ENTRIES: usize = 500;

/// Toggleable in-app record of spinner lifecycle events.
pub struct LogPanel {
    popup: Popup,
    theme: Theme,
    messages: Vec<LogEntry>,
    scroll_offset: usize,
}

struct LogEntry {
    level: LogLevel,
    message: String,
}

#[derive(Clone, Copy)]
enum LogLevel {
    Info,
    Debug,
}

impl LogPanel {
    pub fn new(theme: Theme) -> Self {
        Self {
            popup: Popup::new("Log", theme.clone())
                .with_size(70, 60)
                .with_footer("↑/↓:scroll g/G:top/bottom q:close"),
            theme,
            messages: Vec::new(),
            scroll_offset: 0,
        }
    }

    pub fn visible(&self) -> bool {
        self.popup.visible()
    }

    pub fn toggle(&mut self) {
        if self.popup.toggle() {
            self.scroll_offset = self.messages.len().saturating_sub(1);
        }
    }

    pub fn hide(&mut self) {
        self.popup.hide();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push_info(&mut self, msg: impl Into<String>) {
        self.push(LogLevel::Info, msg.into());
    }

    pub fn push_debug(&mut self, msg: impl Into<String>) {
        self.push(LogLevel::Debug, msg.into());
    }

    fn push(&mut self, level: LogLevel, message: String) {
        self.messages.push(LogEntry { level, message });
        if self.messages.len() > MAX_ENTRIES {
            self.messages.drain(..self.messages.len() - MAX_ENTRIES);
        }
        // Follow the newest entry
        self.scroll_offset = self.messages.len().saturating_sub(1);
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('l') => {
                self.hide();
                Action::ClosePopup
            }
            KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                if self.scroll_offset + 1 < self.messages.len() {
                    self.scroll_offset += 1;
                }
                Action::None
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.scroll_offset = 0;
                Action::None
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.scroll_offset = self.messages.len().saturating_sub(1);
                Action::None
            }
            _ => Action::None,
        }
    }

    pub fn render(&self, frame: &mut Frame, full: Rect) {
        if !self.popup.visible() {
            return;
        }

        let inner = self.popup.render_frame(frame, full);

        let visible_height = inner.height as usize;
        let start = self
            .scroll_offset
            .saturating_sub(visible_height.saturating_sub(1));
        let end = (start + visible_height).min(self.messages.len());

        let lines: Vec<Line> = self.messages[start..end]
            .iter()
            .map(|entry| {
                let (prefix, style) = match entry.level {
                    LogLevel::Info => ("[INFO] ", self.theme.normal),
                    LogLevel::Debug => ("[DBG]  ", self.theme.dimmed),
                };
                Line::from(vec![
                    Span::styled(prefix, style),
                    Span::styled(entry.message.as_str(), style),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
