//! Config file auto-reload system
//!
//! Polls the gameplay tuning file every 2 seconds and reapplies it when
//! its modification time changes.

use bevy::prelude::*;
use std::fs;
use std::time::SystemTime;

use crate::tuning::{GAMEPLAY_TUNING_FILE, PhysicsTweaks, load_gameplay_tuning_from_file};

/// How often to check for config changes (seconds)
const CHECK_INTERVAL: f32 = 2.0;

/// Tracks modification time of the tuning file for hot-reload
#[derive(Resource)]
pub struct ConfigWatcher {
    /// Time since last check
    pub timer: f32,
    pub tuning_mtime: Option<SystemTime>,
}

impl Default for ConfigWatcher {
    fn default() -> Self {
        Self {
            timer: 0.0,
            tuning_mtime: get_mtime(GAMEPLAY_TUNING_FILE),
        }
    }
}

/// Get file modification time, or None if file doesn't exist
fn get_mtime(path: &str) -> Option<SystemTime> {
    fs::metadata(path).ok().and_then(|m| m.modified().ok())
}

impl ConfigWatcher {
    /// Advance the poll timer; true when a check is due
    pub fn tick(&mut self, delta: f32) -> bool {
        self.timer += delta;
        if self.timer < CHECK_INTERVAL {
            return false;
        }
        self.timer = 0.0;
        true
    }
}

/// Check for tuning file changes and reload.
/// A file that fails to parse leaves the current tuning in place.
pub fn check_config_changes(
    time: Res<Time>,
    mut watcher: ResMut<ConfigWatcher>,
    mut tweaks: ResMut<PhysicsTweaks>,
) {
    if !watcher.tick(time.delta_secs()) {
        return;
    }

    let new_mtime = get_mtime(GAMEPLAY_TUNING_FILE);
    if new_mtime == watcher.tuning_mtime {
        return;
    }
    watcher.tuning_mtime = new_mtime;

    match load_gameplay_tuning_from_file(GAMEPLAY_TUNING_FILE) {
        Ok(tuning) => {
            tuning.apply_to(&mut tweaks);
            info!("Auto-reloaded tuning from {}", GAMEPLAY_TUNING_FILE);
        }
        Err(err) => warn!("{}, keeping current tuning", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_interval() {
        let mut watcher = ConfigWatcher {
            timer: 0.0,
            tuning_mtime: None,
        };
        assert!(!watcher.tick(1.0));
        assert!(!watcher.tick(0.9));
        assert!(watcher.tick(0.2));
        assert_eq!(watcher.timer, 0.0);
    }
}
