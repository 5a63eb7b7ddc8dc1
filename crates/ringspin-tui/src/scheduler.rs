use std::time::{Duration, Instant};

use ringspin_core::ring::STEP_COUNT;
use ringspin_core::scheduler::MIN_PERIOD;
use ringspin_core::{Scheduler, TimerId};
use tracing::debug;

/// Most firings a single timer may owe after a stall. Anything beyond one
/// revolution is dropped and the timer re-anchors on the current time.
const MAX_CATCH_UP: usize = STEP_COUNT;

#[derive(Debug)]
struct Interval {
    id: TimerId,
    period: Duration,
    next_due: Instant,
}

/// Wall-clock scheduler for the terminal event loop.
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    next_id: u64,
    timers: Vec<Interval>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule relative to an explicit `now`.
    pub fn schedule_at(&mut self, now: Instant, period: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let period = period.max(MIN_PERIOD);
        self.timers.push(Interval {
            id,
            period,
            next_due: now + period,
        });
        id
    }

    /// Firings due at `now`, in deadline order.
    pub fn take_due_at(&mut self, now: Instant) -> Vec<TimerId> {
        let mut due: Vec<(Instant, TimerId)> = Vec::new();
        for timer in &mut self.timers {
            let mut owed = 0;
            while timer.next_due <= now {
                if owed == MAX_CATCH_UP {
                    debug!(timer = timer.id.0, "timer fell behind, re-anchoring");
                    timer.next_due = now + timer.period;
                    break;
                }
                due.push((timer.next_due, timer.id));
                timer.next_due += timer.period;
                owed += 1;
            }
        }
        due.sort();
        due.into_iter().map(|(_, id)| id).collect()
    }

    /// Time from `now` until the earliest deadline.
    pub fn next_deadline_at(&self, now: Instant) -> Option<Duration> {
        self.timers
            .iter()
            .map(|t| t.next_due.saturating_duration_since(now))
            .min()
    }
}

impl Scheduler for IntervalScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TimerId {
        self.schedule_at(Instant::now(), period)
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }

    fn take_due(&mut self) -> Vec<TimerId> {
        self.take_due_at(Instant::now())
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.next_deadline_at(Instant::now())
    }

    fn active_timers(&self) -> usize {
        self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_due_after_period() {
        let start = Instant::now();
        let mut sched = IntervalScheduler::new();
        let id = sched.schedule_at(start, ms(10));
        assert!(sched.take_due_at(start + ms(5)).is_empty());
        assert_eq!(sched.take_due_at(start + ms(10)), vec![id]);
        assert_eq!(sched.next_deadline_at(start + ms(12)), Some(ms(8)));
    }

    #[test]
    fn test_catch_up_is_bounded() {
        let start = Instant::now();
        let mut sched = IntervalScheduler::new();
        let id = sched.schedule_at(start, ms(10));
        assert_eq!(sched.take_due_at(start + ms(35)), vec![id; 3]);

        let due = sched.take_due_at(start + ms(10_000));
        assert_eq!(due.len(), MAX_CATCH_UP);
        assert_eq!(sched.next_deadline_at(start + ms(10_000)), Some(ms(10)));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut sched = IntervalScheduler::new();
        let a = sched.schedule_at(start, ms(10));
        let b = sched.schedule_at(start, ms(15));
        sched.cancel(a);
        assert_eq!(sched.active_timers(), 1);
        assert_eq!(sched.take_due_at(start + ms(30)), vec![b, b]);
    }
}
