use std::time::Duration;

use anyhow::Context;
use crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Layout, Rect};
use tracing::{debug, info};

use crate::action::{Action, SpinnerAction};
use crate::component::Component;
use crate::components::help_popup::HelpPopup;
use crate::components::log_panel::LogPanel;
use crate::components::spinner_panel::SpinnerPanel;
use crate::components::status_bar::StatusBar;
use crate::config::AppConfig;
use crate::event::{self, AppEvent};
use crate::keymap;
use crate::theme::Theme;
use crate::tui;

/// The main application.
pub struct App {
    config: AppConfig,
    should_quit: bool,
    /// Start the animation once the ring has been laid out.
    pending_autostart: bool,

    spinner_panel: SpinnerPanel,
    status_bar: StatusBar,
    help_popup: HelpPopup,
    log_panel: LogPanel,
}

impl App {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let theme = Theme::load(&config.general.theme);
        let options = config.spinner_options(&theme);
        debug!(?options, "effective spinner options");

        let spinner_panel =
            SpinnerPanel::new(options, theme.clone()).context("Invalid spinner options")?;

        let mut log_panel = LogPanel::new(theme.clone());
        if config.first_launch {
            log_panel.push_info("No config file found, using defaults");
        }
        log_panel.push_info(format!("Theme: {}", config.general.theme));

        Ok(Self {
            pending_autostart: config.general.autostart,
            config,
            should_quit: false,
            spinner_panel,
            status_bar: StatusBar::new(theme.clone()),
            help_popup: HelpPopup::new(theme),
            log_panel,
        })
    }

    pub fn spinner_panel(&self) -> &SpinnerPanel {
        &self.spinner_panel
    }

    pub fn status_bar(&self) -> &StatusBar {
        &self.status_bar
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut session = tui::TerminalSession::start()?;
        info!("terminal initialized");

        let tick_rate = Duration::from_millis(self.config.general.tick_rate_ms);

        while !self.should_quit {
            session.terminal().draw(|frame| self.render(frame))?;

            // Wake for input, the next spinner tick or the redraw bound
            let timeout = self
                .spinner_panel
                .next_deadline()
                .map_or(tick_rate, |deadline| deadline.min(tick_rate));

            let action = match event::next_event(timeout)? {
                Some(AppEvent::Key(key)) => self.handle_key(key),
                Some(AppEvent::Resize(w, h)) => Action::Resize(w, h),
                None => Action::None,
            };
            self.dispatch(action);
            self.dispatch(Action::Tick);
        }

        Ok(())
    }

    /// Route a key to the topmost popup, or resolve it through the keymap.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.help_popup.visible() {
            return self.help_popup.handle_key_event(key);
        }
        if self.log_panel.visible() {
            return self.log_panel.handle_key_event(key);
        }
        keymap::resolve_key(key)
    }

    /// Process an action and everything it chains into.
    pub fn dispatch(&mut self, action: Action) {
        let mut next = action;
        while next != Action::None {
            next = self.process_action(next);
        }
    }

    fn process_action(&mut self, action: Action) -> Action {
        match action {
            Action::Quit => {
                self.should_quit = true;
                Action::None
            }
            Action::Tick => {
                self.spinner_panel.poll_timers();
                Action::None
            }
            Action::Resize(w, h) => {
                debug!(w, h, "terminal resized");
                self.apply_layout(Rect::new(0, 0, w, h));
                Action::None
            }
            Action::ShowHelp => {
                self.help_popup.show();
                Action::None
            }
            Action::ToggleLogPanel => {
                self.log_panel.toggle();
                Action::None
            }
            Action::ClosePopup => {
                self.help_popup.hide();
                self.log_panel.hide();
                Action::None
            }
            Action::StatusMessage(message) => {
                info!("{}", message);
                self.log_panel.push_info(message.clone());
                self.status_bar.set_message(message);
                Action::None
            }
            Action::Spinner(_) => self.spinner_panel.update(&action),
            Action::None => Action::None,
        }
    }

    /// Split the screen into the spinner panel and a one-line status bar.
    fn layout(full: Rect) -> (Rect, Rect) {
        let outer = Layout::vertical([
            Constraint::Min(3),    // spinner
            Constraint::Length(1), // status bar
        ])
        .split(full);
        (outer[0], outer[1])
    }

    /// Fit the spinner to the screen, starting it the first time if
    /// autostart is on.
    fn apply_layout(&mut self, full: Rect) {
        let (content, _) = Self::layout(full);
        if self.spinner_panel.resize(content) {
            self.log_panel
                .push_debug(format!("Ring laid out in {}x{} cells", content.width, content.height));
        }

        if self.pending_autostart {
            self.pending_autostart = false;
            if !self.spinner_panel.spinner().animating() {
                self.dispatch(Action::Spinner(SpinnerAction::Toggle));
            }
        }
    }

    fn render(&mut self, frame: &mut ratatui::Frame) {
        let full = frame.area();
        self.apply_layout(full);
        self.status_bar.set_status(self.spinner_panel.status());

        let (content, status) = Self::layout(full);
        self.spinner_panel.render(frame, content);
        self.status_bar.render(frame, status);

        // Popups render on top
        self.log_panel.render(frame, full);
        self.help_popup.render(frame, full);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(autostart: bool) -> App {
        let mut config = AppConfig::default();
        config.general.autostart = autostart;
        App::new(config).unwrap()
    }

    #[test]
    fn test_autostart_after_first_layout() {
        let mut app = app(true);
        assert!(!app.spinner_panel().spinner().animating());
        app.dispatch(Action::Resize(40, 20));
        assert!(app.spinner_panel().spinner().animating());
        assert_eq!(app.status_bar().message(), Some("started"));
    }

    #[test]
    fn test_no_autostart() {
        let mut app = app(false);
        app.dispatch(Action::Resize(40, 20));
        assert!(!app.spinner_panel().spinner().animating());
        assert!(app.spinner_panel().spinner().visible());
    }

    #[test]
    fn test_keys_drive_spinner() {
        let mut app = app(false);
        app.dispatch(Action::Resize(40, 20));

        let action = app.handle_key(key(KeyCode::Char(' ')));
        app.dispatch(action);
        assert!(app.spinner_panel().spinner().animating());

        let action = app.handle_key(key(KeyCode::Char('x')));
        app.dispatch(action);
        assert!(!app.spinner_panel().spinner().animating());
        assert!(!app.spinner_panel().spinner().visible());
        assert_eq!(app.status_bar().message(), Some("stopped and hidden"));
    }

    #[test]
    fn test_help_popup_captures_keys() {
        let mut app = app(false);
        app.dispatch(Action::Resize(40, 20));
        app.dispatch(Action::ShowHelp);

        // Space closes help instead of starting the spinner
        let action = app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(action, Action::ClosePopup);
        app.dispatch(action);
        assert!(!app.spinner_panel().spinner().animating());

        let action = app.handle_key(key(KeyCode::Char('q')));
        app.dispatch(action);
        assert!(app.should_quit());
    }

    #[test]
    fn test_invalid_configured_color_fails() {
        let mut config = AppConfig::default();
        config.spinner.fill_color = Some("bogus".to_string());
        assert!(App::new(config).is_err());
    }

    #[test]
    fn test_render_lays_out_and_draws_status() {
        let mut app = app(true);
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        assert!(app.spinner_panel().spinner().animating());

        let buffer = terminal.backend().buffer();
        let status_row: String = (0..buffer.area.width)
            .map(|x| buffer.content()[buffer.index_of(x, 19)].symbol().to_string())
            .collect();
        assert!(status_row.starts_with(" animating | step 1/12"));
    }
}
