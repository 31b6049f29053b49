//! Event logger writing the session's `.evlog` file

use bevy::prelude::*;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use uuid::Uuid;

use super::bus::EventBus;
use super::format::serialize_event;
use super::types::{GameConfig, GameEvent};
use crate::tuning::PhysicsTweaks;

/// Configuration for event logging
#[derive(Resource, Clone)]
pub struct EventLogConfig {
    /// Directory for log files
    pub log_dir: PathBuf,
    /// Whether logging is enabled
    pub enabled: bool,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            enabled: true,
        }
    }
}

/// Active event logger with file handle
#[derive(Resource)]
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    session_id: String,
    path: Option<PathBuf>,
    config: EventLogConfig,
}

impl EventLogger {
    /// Create a new event logger (but don't open file yet)
    pub fn new(config: EventLogConfig) -> Self {
        Self {
            writer: None,
            session_id: String::new(),
            path: None,
            config,
        }
    }

    /// Start a new log session.
    /// Generates a new UUID for this session and logs the SessionStart event.
    pub fn start_session(&mut self, timestamp: &str) {
        if !self.config.enabled {
            return;
        }

        self.session_id = Uuid::new_v4().to_string();

        if let Err(e) = std::fs::create_dir_all(&self.config.log_dir) {
            warn!("Failed to create log directory: {}", e);
            return;
        }

        // Use session_id in filename for uniqueness
        let filename = format!("{}_{}.evlog", timestamp, &self.session_id[..8]);
        let path = self.config.log_dir.join(filename);

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
        {
            Ok(file) => {
                self.writer = Some(BufWriter::new(file));
                info!(
                    "Event logging started: {} (session: {})",
                    path.display(),
                    &self.session_id[..8]
                );
                self.path = Some(path);

                self.log(
                    0,
                    &GameEvent::SessionStart {
                        session_id: self.session_id.clone(),
                        timestamp: timestamp.to_string(),
                    },
                );
            }
            Err(e) => {
                warn!("Failed to open event log: {}", e);
            }
        }
    }

    /// Log the tuning snapshot (call after start_session)
    pub fn log_config(&mut self, config: GameConfig) {
        self.log(0, &GameEvent::Config(config));
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Log one event; a write failure disables the logger
    pub fn log(&mut self, time_ms: u32, event: &GameEvent) {
        let Some(writer) = &mut self.writer else {
            return;
        };

        let line = serialize_event(time_ms, event);
        if let Err(e) = writeln!(writer, "{}", line) {
            warn!("Failed to write event, disabling event log: {}", e);
            self.writer = None;
        }
    }

    pub fn flush(&mut self) {
        if let Some(writer) = &mut self.writer
            && let Err(e) = writer.flush()
        {
            warn!("Failed to flush event log: {}", e);
        }
    }

    /// End the current log session
    pub fn end_session(&mut self) {
        self.flush();
        self.writer = None;
    }

    pub fn is_active(&self) -> bool {
        self.writer.is_some()
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(EventLogConfig::default())
    }
}

/// Open the session log and record the starting tuning
pub fn start_event_log(mut logger: ResMut<EventLogger>, tweaks: Res<PhysicsTweaks>) {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    logger.start_session(&timestamp);
    logger.log_config(GameConfig::from(&*tweaks));
}

/// Drain the bus into the log once per frame
pub fn write_bus_events(mut bus: ResMut<EventBus>, mut logger: ResMut<EventLogger>) {
    let events = bus.drain();
    if events.is_empty() || !logger.is_active() {
        return;
    }
    for bus_event in &events {
        logger.log(bus_event.time_ms, &bus_event.event);
    }
    logger.flush();
}

/// Record tuning reloads
pub fn log_tuning_changes(tweaks: Res<PhysicsTweaks>, mut bus: ResMut<EventBus>) {
    if tweaks.is_changed() && !tweaks.is_added() {
        bus.emit(GameEvent::Config(GameConfig::from(&*tweaks)));
    }
}
