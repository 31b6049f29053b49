//! Deterministic simulated-time timers

use std::time::Duration;

use bevy::prelude::*;

use super::collaborators::{TimerHandle, TimerService};

/// Timer service driven by explicit `advance` calls rather than wall-clock time.
///
/// The game advances it by one fixed timestep per simulation tick, tests
/// advance it by whatever they like.
#[derive(Resource, Debug, Default)]
pub struct SimTimers {
    now: Duration,
    next_id: u64,
    /// (handle, deadline) of timers that have not expired yet
    pending: Vec<(TimerHandle, Duration)>,
    /// Expired timers nobody has collected
    fired: Vec<TimerHandle>,
}

impl SimTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated time elapsed so far
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward, expiring any timers whose deadline has passed
    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
        let now = self.now;
        let fired = &mut self.fired;
        self.pending.retain(|&(handle, deadline)| {
            if deadline <= now {
                fired.push(handle);
                false
            } else {
                true
            }
        });
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|(h, _)| *h == handle)
    }

    /// Timers scheduled but not yet expired
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl TimerService for SimTimers {
    fn schedule_after(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.push((handle, self.now + delay));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|(h, _)| *h != handle);
        self.fired.retain(|h| *h != handle);
    }

    fn take_fired(&mut self, handle: TimerHandle) -> bool {
        match self.fired.iter().position(|h| *h == handle) {
            Some(index) => {
                self.fired.swap_remove(index);
                true
            }
            None => false,
        }
    }
}
