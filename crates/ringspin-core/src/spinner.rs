use strum::Display;
use tracing::{debug, trace};

use crate::color::{ColorParser, CssColorParser, Rgb};
use crate::error::Result;
use crate::options::SpinnerOptions;
use crate::ring::{circulate_step_index, RingLayout, STEP_COUNT};
use crate::scheduler::{Scheduler, TimerId};
use crate::surface::{DrawingSurface, Mount};

type ShapeOf<M> = <<M as Mount>::Surface as DrawingSurface>::Shape;

/// Whether the ring is cycling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AnimationState {
    #[strum(serialize = "idle")]
    Idle,
    #[strum(serialize = "animating")]
    Animating,
}

/// Twelve-spoke ring spinner.
///
/// The spinner owns its mount, its timer source and, once rendered, the
/// drawing surface holding the spokes. Timer firings are fed back through
/// [`RingSpinner::poll_timers`] (or [`RingSpinner::fire`]), one tick at a time.
pub struct RingSpinner<M: Mount, S: Scheduler, P: ColorParser = CssColorParser> {
    options: SpinnerOptions,
    mount: M,
    scheduler: S,
    parser: P,
    active_rgb: Rgb,
    fill_rgb: Rgb,
    surface: Option<M::Surface>,
    steps: Vec<ShapeOf<M>>,
    visible: bool,
    timer: Option<TimerId>,
    current_step: usize,
    tail_length: u32,
}

impl<M: Mount, S: Scheduler> RingSpinner<M, S, CssColorParser> {
    /// Create an idle, hidden spinner with no shapes yet.
    ///
    /// Fails if either configured color cannot be parsed.
    pub fn new(mount: M, scheduler: S, options: SpinnerOptions) -> Result<Self> {
        Self::with_parser(mount, scheduler, CssColorParser, options)
    }
}

impl<M: Mount, S: Scheduler, P: ColorParser> RingSpinner<M, S, P> {
    pub fn with_parser(mount: M, scheduler: S, parser: P, options: SpinnerOptions) -> Result<Self> {
        let active_rgb = parser.parse(&options.active_color)?;
        let fill_rgb = parser.parse(&options.fill_color)?;
        Ok(Self {
            options,
            mount,
            scheduler,
            parser,
            active_rgb,
            fill_rgb,
            surface: None,
            steps: Vec::with_capacity(STEP_COUNT),
            visible: false,
            timer: None,
            current_step: 0,
            tail_length: 0,
        })
    }

    pub fn options(&self) -> &SpinnerOptions {
        &self.options
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn animating(&self) -> bool {
        self.timer.is_some()
    }

    pub fn state(&self) -> AnimationState {
        if self.animating() {
            AnimationState::Animating
        } else {
            AnimationState::Idle
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Number of trailing spokes currently faded; grows by one per tick up to
    /// the configured tail count.
    pub fn tail_length(&self) -> u32 {
        self.tail_length
    }

    /// Move the active position. A running animation restarts from the new
    /// position with a fresh tail.
    pub fn set_current_step(&mut self, step_index: i64) {
        if self.animating() {
            self.stop_with(false);
            self.current_step = circulate_step_index(step_index);
            self.start();
        } else {
            self.current_step = circulate_step_index(step_index);
        }
    }

    pub fn mount(&self) -> &M {
        &self.mount
    }

    /// Mutable access to the host, e.g. to update its size before a
    /// [`RingSpinner::render`].
    pub fn mount_mut(&mut self) -> &mut M {
        &mut self.mount
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn surface(&self) -> Option<&M::Surface> {
        self.surface.as_ref()
    }

    /// Spoke handles, index 0 at twelve o'clock, then clockwise.
    pub fn steps(&self) -> &[ShapeOf<M>] {
        &self.steps
    }

    /// Rebuild the twelve spokes for the mount's current size.
    ///
    /// Stops a running animation without hiding. An existing surface is
    /// cleared and resized in place, never recreated.
    pub fn render(&mut self) {
        if self.animating() {
            self.stop_with(false);
        }

        let width = self.mount.width();
        let height = self.mount.height();
        let surface = match self.surface.take() {
            Some(mut surface) => {
                surface.clear();
                surface.resize(width, height);
                surface
            }
            None => self.mount.create_surface(width, height),
        };
        let surface = self.surface.insert(surface);
        self.steps.clear();

        let layout = RingLayout::compute(width, height, &self.options);
        let rect = layout.first_spoke;
        let first = surface.rounded_rect(rect.x, rect.y, rect.width, rect.height, rect.corner_radius);
        surface.set_fill(first, &self.options.fill_color);
        surface.set_stroke_width(first, 0.0);
        self.steps.push(first);

        for index in 1..STEP_COUNT {
            let step = surface.clone_shape(first);
            surface.transform(step, layout.spoke_transform(index));
            self.steps.push(step);
        }

        self.visible = true;
        debug!(
            width,
            height,
            radius = layout.radius,
            "spinner rendered"
        );
    }

    /// Begin cycling. No-op while already animating.
    pub fn start(&mut self) {
        if self.animating() {
            return;
        }

        self.show();
        self.set_active(self.current_step, 1.0);
        self.tail_length = 0;

        let period = self.options.step_interval();
        self.timer = Some(self.scheduler.schedule_repeating(period));
        debug!(step = self.current_step, ?period, "spinner started");
    }

    /// Stop cycling, reset every spoke to the fill color and hide the ring.
    pub fn stop(&mut self) {
        self.stop_with(true);
    }

    /// Stop cycling and reset every spoke to the fill color, leaving the ring
    /// on screen.
    pub fn stop_visible(&mut self) {
        self.stop_with(false);
    }

    fn stop_with(&mut self, hide: bool) {
        if let Some(timer) = self.timer.take() {
            self.scheduler.cancel(timer);
            debug!(step = self.current_step, "spinner stopped");
        }

        if let Some(surface) = self.surface.as_mut() {
            for &step in &self.steps {
                surface.set_fill(step, &self.options.fill_color);
            }
        }

        if hide {
            self.hide();
        }
    }

    pub fn show(&mut self) {
        if self.steps.is_empty() {
            self.render();
        } else if !self.visible {
            if let Some(surface) = self.surface.as_mut() {
                for &step in &self.steps {
                    surface.show_shape(step);
                }
            }
            self.visible = true;
            debug!("spinner shown");
        }
    }

    pub fn hide(&mut self) {
        if self.animating() {
            self.stop_with(false);
        }

        if self.visible {
            if let Some(surface) = self.surface.as_mut() {
                for &step in &self.steps {
                    surface.hide_shape(step);
                }
            }
            debug!("spinner hidden");
        }
        self.visible = false;
    }

    /// Run every timer firing the scheduler has queued. Returns how many
    /// ticks advanced the ring.
    pub fn poll_timers(&mut self) -> usize {
        self.scheduler
            .take_due()
            .into_iter()
            .filter(|&id| self.fire(id))
            .count()
    }

    /// Handle one firing of `timer`. Firings of anything but the live timer
    /// are ignored, so nothing moves after a stop.
    pub fn fire(&mut self, timer: TimerId) -> bool {
        if self.timer != Some(timer) {
            return false;
        }
        self.tick();
        true
    }

    fn tick(&mut self) {
        if self.tail_length < self.options.tail_count {
            self.tail_length += 1;
        }

        self.current_step = circulate_step_index(self.current_step as i64 + 1);

        // One spoke past the tail is always repainted; with a level of zero
        // it lands exactly on the fill color.
        let tail_ratio = 1.0 / (f64::from(self.options.tail_count) + 1.0);
        for tail_counter in 0..=self.tail_length + 1 {
            let step = circulate_step_index(self.current_step as i64 - i64::from(tail_counter));
            self.set_active(step, 1.0 - f64::from(tail_counter) * tail_ratio);
        }
        trace!(step = self.current_step, tail = self.tail_length, "spinner tick");
    }

    fn set_active(&mut self, step_index: usize, active_level: f64) {
        let color = Rgb::blend(self.active_rgb, self.fill_rgb, active_level);
        let color = self.parser.format(color);
        if let (Some(surface), Some(&step)) = (self.surface.as_mut(), self.steps.get(step_index)) {
            surface.set_fill(step, &color);
        }
    }
}
