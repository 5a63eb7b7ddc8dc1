use std::time::Duration;

/// Handle to a repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Shortest period a scheduler will honour; a zero period would spin.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Source of repeating timer callbacks.
///
/// Pull based: the host asks for the timers that came due and feeds them back
/// to the widget one at a time, so ticks run strictly in sequence and never
/// interrupt an explicit call.
pub trait Scheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TimerId;

    /// Cancel a timer. Unknown ids are ignored. Firings of `id` that are
    /// already due but not yet taken are discarded.
    fn cancel(&mut self, id: TimerId);

    /// Timer firings that came due since the last call, in deadline order.
    /// A timer that fell behind appears once per missed period.
    fn take_due(&mut self) -> Vec<TimerId>;

    /// Time left until the earliest pending deadline, if any timer is active.
    fn next_deadline(&self) -> Option<Duration>;

    fn active_timers(&self) -> usize;
}

#[derive(Debug, Clone)]
struct ManualTimer {
    id: TimerId,
    period: Duration,
    next_due: Duration,
}

/// Scheduler driven by an explicit virtual clock. Time only moves on
/// [`ManualScheduler::advance`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    timers: Vec<ManualTimer>,
    due: Vec<TimerId>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Period of an active timer.
    pub fn period(&self, id: TimerId) -> Option<Duration> {
        self.timers.iter().find(|t| t.id == id).map(|t| t.period)
    }

    /// Move the clock forward and queue every firing that falls inside the
    /// elapsed window.
    pub fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
        let now = self.now;
        loop {
            let next = self
                .timers
                .iter_mut()
                .filter(|t| t.next_due <= now)
                .min_by_key(|t| (t.next_due, t.id));
            match next {
                Some(timer) => {
                    self.due.push(timer.id);
                    timer.next_due += timer.period;
                }
                None => break,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let period = period.max(MIN_PERIOD);
        self.timers.push(ManualTimer {
            id,
            period,
            next_due: self.now + period,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
        self.due.retain(|d| *d != id);
    }

    fn take_due(&mut self) -> Vec<TimerId> {
        std::mem::take(&mut self.due)
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.timers
            .iter()
            .map(|t| t.next_due.saturating_sub(self.now))
            .min()
    }

    fn active_timers(&self) -> usize {
        self.timers.len()
    }
}
