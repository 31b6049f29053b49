//! Compact text format for game event serialization
//!
//! Format: `T:NNNNN|CODE|data...`
//! - T:NNNNN = timestamp in milliseconds (5 digits, wraps at 99999)
//! - CODE = 1-2 char event type code
//! - data = pipe-separated values specific to event type
//!
//! Examples:
//! ```text
//! T:00000|SS|5f0c...|20261019_143000
//! T:00320|CS|
//! T:01153|FC|
//! T:01400|SR|100|0.00,17.00,-15.00
//! T:02210|G|1
//! T:06400|BR|timeout
//! T:07000|CM|orbital
//! ```

use super::types::{GameConfig, GameEvent};

/// Format a 3D vector with fixed precision (2 decimals)
fn fmt_vec3(v: (f32, f32, f32)) -> String {
    format!("{:.2},{:.2},{:.2}", v.0, v.1, v.2)
}

/// Serialize a GameEvent to compact text format
pub fn serialize_event(time_ms: u32, event: &GameEvent) -> String {
    let ts = format!("T:{:05}", time_ms % 100000);
    let code = event.type_code();

    let data = match event {
        GameEvent::SessionStart {
            session_id,
            timestamp,
        } => format!("{}|{}", session_id, timestamp),
        GameEvent::Config(config) => {
            // Serialize config as compact JSON for easy parsing
            serde_json::to_string(config).unwrap_or_else(|_| "{}".to_string())
        }
        GameEvent::ChargeStart => String::new(),
        GameEvent::FullyCharged => String::new(),
        GameEvent::ShotRelease { charge, impulse } => {
            format!("{}|{}", charge, fmt_vec3(*impulse))
        }
        GameEvent::BallReset { reason } => reason.to_string(),
        GameEvent::Goal { score } => score.to_string(),
        GameEvent::CameraMode { mode } => mode.to_string(),
    };

    format!("{}|{}|{}", ts, code, data)
}

/// Parse a line back into timestamp and event
pub fn parse_event(line: &str) -> Option<(u32, GameEvent)> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 3 {
        return None;
    }

    let ts_str = parts[0].strip_prefix("T:")?;
    let time_ms: u32 = ts_str.parse().ok()?;

    let code = parts[1];
    let data = &parts[2..];

    let event = match code {
        "SS" if data.len() >= 2 => GameEvent::SessionStart {
            session_id: data[0].to_string(),
            timestamp: data[1].to_string(),
        },
        "CF" => {
            // Config is serialized as JSON, rejoin with | in case JSON contains |
            let json_str = data.join("|");
            let config: GameConfig = serde_json::from_str(&json_str).ok()?;
            GameEvent::Config(config)
        }
        "CS" => GameEvent::ChargeStart,
        "FC" => GameEvent::FullyCharged,
        "SR" if data.len() >= 2 => GameEvent::ShotRelease {
            charge: data[0].parse().ok()?,
            impulse: parse_vec3(data[1])?,
        },
        "BR" => GameEvent::BallReset {
            reason: data[0].parse().ok()?,
        },
        "G" => GameEvent::Goal {
            score: data[0].parse().ok()?,
        },
        "CM" => GameEvent::CameraMode {
            mode: data[0].parse().ok()?,
        },
        _ => return None,
    };

    Some((time_ms, event))
}

fn parse_vec3(s: &str) -> Option<(f32, f32, f32)> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return None;
    }
    Some((
        parts[0].parse().ok()?,
        parts[1].parse().ok()?,
        parts[2].parse().ok()?,
    ))
}
