//! Deterministic scheduler driven by hand.

use crate::core::Timer;
use crate::effects::{Scheduler, ShellError};
use parking_lot::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
struct Pending {
    due: Duration,
    seq: u64,
    timer: Timer,
}

#[derive(Debug, Default)]
struct ClockState {
    now: Duration,
    next_seq: u64,
    pending: Vec<Pending>,
}

/// A clock that only moves when told to.
///
/// Timers scheduled on it are held until [`advance`](Self::advance) or
/// [`fire_next`](Self::fire_next) moves time past their due point. Timers
/// due at the same instant come out in the order they were scheduled.
///
/// # Example
///
/// ```rust
/// use pattern_recall::core::{Timer, TimerKind};
/// use pattern_recall::effects::Scheduler;
/// use pattern_recall::runtime::VirtualClock;
/// use std::time::Duration;
///
/// let clock = VirtualClock::new();
/// let timer = Timer { kind: TimerKind::SettleInput, epoch: 1, delay: Duration::from_millis(500) };
/// clock.schedule(timer).unwrap();
///
/// assert!(clock.advance(Duration::from_millis(499)).is_empty());
/// assert_eq!(clock.advance(Duration::from_millis(1)), vec![timer]);
/// ```
#[derive(Debug, Default)]
pub struct VirtualClock {
    state: Mutex<ClockState>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the clock was created.
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Number of timers not yet fired.
    pub fn pending(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Move time forward and return every timer now due, earliest first.
    pub fn advance(&self, by: Duration) -> Vec<Timer> {
        let mut state = self.state.lock();
        state.now += by;
        let now = state.now;

        let (mut due, rest): (Vec<_>, Vec<_>) =
            state.pending.drain(..).partition(|p| p.due <= now);
        state.pending = rest;

        due.sort_by_key(|p| (p.due, p.seq));
        due.into_iter().map(|p| p.timer).collect()
    }

    /// Jump to the earliest pending timer and return it.
    pub fn fire_next(&self) -> Option<Timer> {
        let mut state = self.state.lock();
        let index = state
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(i, _)| i)?;
        let next = state.pending.remove(index);
        state.now = state.now.max(next.due);
        Some(next.timer)
    }
}

impl Scheduler for VirtualClock {
    fn schedule(&self, timer: Timer) -> Result<(), ShellError> {
        let mut state = self.state.lock();
        let pending = Pending {
            due: state.now + timer.delay,
            seq: state.next_seq,
            timer,
        };
        state.next_seq += 1;
        state.pending.push(pending);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimerKind;

    fn timer(kind: TimerKind, epoch: u64, ms: u64) -> Timer {
        Timer {
            kind,
            epoch,
            delay: Duration::from_millis(ms),
        }
    }

    #[test]
    fn advance_releases_only_due_timers() {
        let clock = VirtualClock::new();
        clock.schedule(timer(TimerKind::SettleInput, 1, 500)).unwrap();
        clock.schedule(timer(TimerKind::NextRound, 2, 1000)).unwrap();

        let due = clock.advance(Duration::from_millis(600));

        assert_eq!(due, vec![timer(TimerKind::SettleInput, 1, 500)]);
        assert_eq!(clock.pending(), 1);
        assert_eq!(clock.now(), Duration::from_millis(600));
    }

    #[test]
    fn due_timers_come_out_earliest_first() {
        let clock = VirtualClock::new();
        clock.schedule(timer(TimerKind::NextRound, 1, 1000)).unwrap();
        clock.schedule(timer(TimerKind::SettleInput, 2, 500)).unwrap();

        let due = clock.advance(Duration::from_secs(2));

        assert_eq!(due[0].epoch, 2);
        assert_eq!(due[1].epoch, 1);
    }

    #[test]
    fn ties_keep_scheduling_order() {
        let clock = VirtualClock::new();
        clock.schedule(timer(TimerKind::SettleInput, 7, 500)).unwrap();
        clock.schedule(timer(TimerKind::SettleInput, 3, 500)).unwrap();

        let epochs: Vec<_> = clock
            .advance(Duration::from_millis(500))
            .iter()
            .map(|t| t.epoch)
            .collect();

        assert_eq!(epochs, vec![7, 3]);
    }

    #[test]
    fn fire_next_jumps_to_the_due_time() {
        let clock = VirtualClock::new();
        clock.schedule(timer(TimerKind::NextRound, 1, 1000)).unwrap();

        let fired = clock.fire_next().unwrap();

        assert_eq!(fired.kind, TimerKind::NextRound);
        assert_eq!(clock.now(), Duration::from_millis(1000));
        assert!(clock.fire_next().is_none());
    }

    #[test]
    fn delay_counts_from_scheduling_time() {
        let clock = VirtualClock::new();
        clock.advance(Duration::from_millis(300));
        clock.schedule(timer(TimerKind::SettleInput, 1, 500)).unwrap();

        assert!(clock.advance(Duration::from_millis(400)).is_empty());
        assert_eq!(clock.advance(Duration::from_millis(100)).len(), 1);
    }
}
