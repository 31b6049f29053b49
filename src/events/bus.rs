//! Event Bus - central hub for cross-module communication
//!
//! Shot, scoring and camera systems emit events here; the logger drains
//! them into the session's `.evlog` file.

use bevy::prelude::*;

use super::types::GameEvent;
use crate::shooting::{ResetReason, ShotFeedback};

/// Timestamped event for the event bus
#[derive(Debug, Clone, PartialEq)]
pub struct BusEvent {
    /// Time in milliseconds since startup
    pub time_ms: u32,
    pub event: GameEvent,
}

/// Central event bus for cross-module communication
#[derive(Resource, Default)]
pub struct EventBus {
    /// Events emitted this frame, waiting to be consumed
    pending: Vec<BusEvent>,

    /// Current elapsed time in milliseconds (for timestamping)
    elapsed_ms: u32,

    /// Whether the bus is enabled (for testing/simulation)
    enabled: bool,
}

impl EventBus {
    /// Create a new enabled event bus
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    /// Create a disabled event bus (events are dropped)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Update the elapsed time (called each frame)
    pub fn update_time(&mut self, elapsed_secs: f32) {
        self.elapsed_ms = (elapsed_secs * 1000.0) as u32;
    }

    /// Emit an event to the bus
    pub fn emit(&mut self, event: GameEvent) {
        if !self.enabled {
            return;
        }
        self.pending.push(BusEvent {
            time_ms: self.elapsed_ms,
            event,
        });
    }

    /// Get pending events for consumption (does not drain)
    pub fn peek(&self) -> &[BusEvent] {
        &self.pending
    }

    /// Take all pending events
    pub fn drain(&mut self) -> Vec<BusEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }
}

impl ShotFeedback for EventBus {
    fn charge_started(&mut self) {
        self.emit(GameEvent::ChargeStart);
    }

    fn fully_charged(&mut self) {
        self.emit(GameEvent::FullyCharged);
    }

    fn shot_released(&mut self, charge: u32, impulse: Vec3) {
        self.emit(GameEvent::ShotRelease {
            charge,
            impulse: (impulse.x, impulse.y, impulse.z),
        });
    }

    fn ball_reset(&mut self, reason: ResetReason) {
        self.emit(GameEvent::BallReset { reason });
    }
}

/// System to update the event bus time each frame
pub fn update_event_bus_time(mut bus: ResMut<EventBus>, time: Res<Time>) {
    bus.update_time(time.elapsed_secs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_and_drain() {
        let mut bus = EventBus::new();
        bus.update_time(1.5);
        bus.emit(GameEvent::Goal { score: 1 });

        assert_eq!(bus.pending_count(), 1);
        let events = bus.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].time_ms, 1500);
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn test_disabled_bus() {
        let mut bus = EventBus::disabled();
        bus.emit(GameEvent::ChargeStart);
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn test_feedback_becomes_events() {
        let mut bus = EventBus::new();
        bus.charge_started();
        bus.fully_charged();
        bus.shot_released(100, Vec3::new(0.0, 17.0, -15.0));
        bus.ball_reset(ResetReason::Timeout);

        let codes: Vec<_> = bus.peek().iter().map(|e| e.event.type_code()).collect();
        assert_eq!(codes, ["CS", "FC", "SR", "BR"]);
        assert_eq!(
            bus.peek()[2].event,
            GameEvent::ShotRelease {
                charge: 100,
                impulse: (0.0, 17.0, -15.0)
            }
        );
    }
}
