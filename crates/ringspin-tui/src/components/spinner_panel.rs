use std::time::Duration;

use ratatui::layout::Rect;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::Canvas;
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;
use ringspin_core::scheduler::MIN_PERIOD;
use ringspin_core::{RingSpinner, Scheduler, SpinnerOptions};
use tracing::debug;

use crate::action::{Action, SpinnerAction};
use crate::component::Component;
use crate::components::status_bar::SpinnerStatus;
use crate::mount::TerminalMount;
use crate::painter::ScenePainter;
use crate::scheduler::IntervalScheduler;
use crate::theme::Theme;

pub type TerminalSpinner = RingSpinner<TerminalMount, IntervalScheduler>;

/// Bordered panel hosting one spinner in its inner area.
pub struct SpinnerPanel {
    spinner: TerminalSpinner,
    theme: Theme,
}

impl SpinnerPanel {
    pub fn new(options: SpinnerOptions, theme: Theme) -> ringspin_core::Result<Self> {
        let spinner = RingSpinner::new(TerminalMount::default(), IntervalScheduler::new(), options)?;
        Ok(Self { spinner, theme })
    }

    pub fn spinner(&self) -> &TerminalSpinner {
        &self.spinner
    }

    fn block(&self) -> Block<'static> {
        Block::default().borders(Borders::ALL)
    }

    /// Fit the ring to `area`. The first call draws it; later calls redraw
    /// only when the size changed, keeping visibility and a running
    /// animation. Returns true if the ring was redrawn.
    pub fn resize(&mut self, area: Rect) -> bool {
        let inner = self.block().inner(area);
        let first = self.spinner.surface().is_none();
        let resized = self.spinner.mount_mut().set_area(inner);
        if !first && !resized {
            return false;
        }

        let was_animating = self.spinner.animating();
        let was_visible = self.spinner.visible();
        self.spinner.render();
        if !first && !was_visible {
            self.spinner.hide();
        }
        if was_animating {
            self.spinner.start();
        }
        debug!(width = inner.width, height = inner.height, "spinner panel resized");
        true
    }

    /// Advance the ring for every elapsed timer firing.
    pub fn poll_timers(&mut self) -> usize {
        self.spinner.poll_timers()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.spinner.scheduler().next_deadline()
    }

    pub fn status(&self) -> SpinnerStatus {
        SpinnerStatus {
            state: self.spinner.state(),
            visible: self.spinner.visible(),
            step: self.spinner.current_step(),
            tail_length: self.spinner.tail_length(),
            step_interval_ms: self.spinner.options().step_interval().max(MIN_PERIOD).as_millis(),
        }
    }

    /// Run one spinner operation and describe the outcome.
    pub fn apply(&mut self, op: SpinnerAction) -> Action {
        let message = match op {
            SpinnerAction::Toggle => {
                if self.spinner.animating() {
                    self.spinner.stop_visible();
                    "stopped".to_string()
                } else {
                    self.spinner.start();
                    "started".to_string()
                }
            }
            SpinnerAction::StopAndHide => {
                self.spinner.stop();
                "stopped and hidden".to_string()
            }
            SpinnerAction::ToggleVisibility => {
                if self.spinner.visible() {
                    self.spinner.hide();
                    "hidden".to_string()
                } else {
                    self.spinner.show();
                    "shown".to_string()
                }
            }
            SpinnerAction::Rerender => {
                let was_animating = self.spinner.animating();
                self.spinner.render();
                if was_animating {
                    "re-rendered, animation stopped".to_string()
                } else {
                    "re-rendered".to_string()
                }
            }
            SpinnerAction::StepForward => self.step_by(1),
            SpinnerAction::StepBack => self.step_by(-1),
        };
        Action::StatusMessage(message)
    }

    fn step_by(&mut self, delta: i64) -> String {
        let step = self.spinner.current_step() as i64 + delta;
        self.spinner.set_current_step(step);
        format!("step {}", self.spinner.current_step() + 1)
    }
}

impl Component for SpinnerPanel {
    fn update(&mut self, action: &Action) -> Action {
        match action {
            Action::Spinner(op) => self.apply(*op),
            _ => Action::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = self
            .block()
            .title(format!(" ringspin: {} ", self.spinner.state()))
            .border_style(self.theme.border)
            .title_style(self.theme.title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(scene) = self.spinner.surface() else {
            return;
        };
        let painter = ScenePainter::new(scene);
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds(painter.x_bounds())
            .y_bounds(painter.y_bounds())
            .paint(|ctx| ctx.draw(&painter));
        frame.render_widget(canvas, inner);
    }
}
