// scheduler.rs - Idle/Running auto-advance state machine

use std::time::{Duration, Instant};

/// Cadence of the auto-advance loop.
pub const ADVANCE_INTERVAL: Duration = Duration::from_millis(750);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Cooperative auto-advance timer. The UI polls it once per frame; stopping
/// takes effect at the next poll, so an advance dispatched for the current
/// iteration still completes and is applied.
#[derive(Debug)]
pub struct AutoAdvance {
    state: SchedulerState,
    last_fire: Option<Instant>,
    interval: Duration,
}

impl Default for AutoAdvance {
    fn default() -> Self {
        Self {
            state: SchedulerState::Idle,
            last_fire: None,
            interval: ADVANCE_INTERVAL,
        }
    }
}

impl AutoAdvance {
    /// Idle -> Running; the first advance fires on the very next poll.
    /// No-op when already Running.
    pub fn start(&mut self) {
        if self.state == SchedulerState::Idle {
            self.state = SchedulerState::Running;
            self.last_fire = None;
        }
    }

    /// Running -> Idle. No-op when already Idle.
    pub fn stop(&mut self) {
        self.state = SchedulerState::Idle;
    }

    /// Returns true when an advance command should be dispatched now.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.state != SchedulerState::Running {
            return false;
        }
        let due = match self.last_fire {
            None => true,
            Some(last) => now.duration_since(last) >= self.interval,
        };
        if due {
            self.last_fire = Some(now);
        }
        due
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }
}
