//! Game event logging
//!
//! Provides a compact text format for logging shot, scoring and camera
//! events. The EventBus collects events during a frame and the logger
//! appends them to the session's `.evlog` file.

mod bus;
mod format;
mod logger;
mod types;

pub use bus::{BusEvent, EventBus, update_event_bus_time};
pub use format::{parse_event, serialize_event};
pub use logger::{
    EventLogConfig, EventLogger, log_tuning_changes, start_event_log, write_bus_events,
};
pub use types::{GameConfig, GameEvent};
