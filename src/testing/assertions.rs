//! Assertion checking for scenario expectations

use bevy::prelude::*;

use super::parser::StateAssertion;
use crate::shooting::{PossessionState, ResetReason};

/// Error when an assertion fails
#[derive(Debug)]
pub struct AssertionError {
    /// 1-based step the check ran after (None for end-of-run checks)
    pub step: Option<usize>,
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl AssertionError {
    fn new(message: String, expected: String, actual: String) -> Self {
        Self {
            step: None,
            message,
            expected,
            actual,
        }
    }
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(step) = self.step {
            write!(f, "[after step {}] ", step)?;
        }
        write!(
            f,
            "{}\n    Expected: {}\n    Actual: {}",
            self.message, self.expected, self.actual
        )
    }
}

/// Observable controller and collaborator state at a point in a scenario
#[derive(Debug, Clone)]
pub struct ScenarioState {
    pub state: PossessionState,
    pub charge: u32,
    pub charge_starts: u32,
    pub fully_charged: u32,
    pub releases: u32,
    pub resets: Vec<ResetReason>,
    pub last_impulse: Option<Vec3>,
    pub pending_timer: bool,
    pub ball_position: Vec3,
    pub ball_velocity: Vec3,
}

/// Check the feedback log contains `expected` as an ordered subsequence
pub fn check_sequence(expected: &[String], captured: &[&str]) -> Result<(), AssertionError> {
    let mut captured_idx = 0;

    for (i, exp) in expected.iter().enumerate() {
        match captured[captured_idx..].iter().position(|c| c == exp) {
            Some(offset) => captured_idx += offset + 1,
            None => {
                return Err(AssertionError::new(
                    format!("Event #{} '{}' not found", i + 1, exp),
                    format!("'{}' in sequence", exp),
                    format!(
                        "events after position {}: {:?}",
                        captured_idx,
                        &captured[captured_idx..]
                    ),
                ));
            }
        }
    }

    Ok(())
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // Try operators in order of specificity (>= before >, etc.)
    for op in &[">=", "<=", "!=", "=", ">", "<"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, op, value));
        }
    }
    None
}

/// Check state assertions against scenario state
pub fn check_state(assertion: &StateAssertion, state: &ScenarioState) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_value) = parse_check(check).ok_or_else(|| {
            AssertionError::new(
                format!("Invalid check syntax: {}", check),
                "format: 'property = value' or 'property > value'".to_string(),
                check.clone(),
            )
        })?;
        let expected_value = expected_value.trim_matches('"');

        match path {
            "state" => {
                let actual = format!("{:?}", state.state);
                check_text(check, &actual, operator, expected_value)?;
            }
            "charge" => check_number(path, state.charge as f32, operator, expected_value)?,
            "charge_starts" => {
                check_number(path, state.charge_starts as f32, operator, expected_value)?
            }
            "fully_charged" => {
                check_number(path, state.fully_charged as f32, operator, expected_value)?
            }
            "releases" => check_number(path, state.releases as f32, operator, expected_value)?,
            "resets" => check_number(path, state.resets.len() as f32, operator, expected_value)?,
            "last_reset" => {
                let actual = state
                    .resets
                    .last()
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "none".to_string());
                check_text(check, &actual, operator, expected_value)?;
            }
            "pending_timer" => {
                check_text(check, &state.pending_timer.to_string(), operator, expected_value)?
            }
            "impulse.x" | "impulse.y" | "impulse.z" => {
                let impulse = state.last_impulse.ok_or_else(|| {
                    AssertionError::new(
                        format!("Check failed: {}", check),
                        "a released shot".to_string(),
                        "no release".to_string(),
                    )
                })?;
                check_number(path, axis(impulse, path), operator, expected_value)?;
            }
            "ball.x" | "ball.y" | "ball.z" => {
                check_number(path, axis(state.ball_position, path), operator, expected_value)?
            }
            "ball.speed" => {
                check_number(path, state.ball_velocity.length(), operator, expected_value)?
            }
            _ => {
                return Err(AssertionError::new(
                    format!("Unknown property: {}", path),
                    "a known property".to_string(),
                    path.to_string(),
                ));
            }
        }
    }

    Ok(())
}

fn axis(v: Vec3, path: &str) -> f32 {
    match path.rsplit('.').next() {
        Some("x") => v.x,
        Some("y") => v.y,
        _ => v.z,
    }
}

fn check_text(check: &str, actual: &str, operator: &str, expected: &str) -> Result<(), AssertionError> {
    let pass = match operator {
        "=" => actual == expected,
        "!=" => actual != expected,
        _ => {
            return Err(AssertionError::new(
                format!("Operator {} not supported for {}", operator, check),
                "= or !=".to_string(),
                operator.to_string(),
            ));
        }
    };
    if !pass {
        return Err(AssertionError::new(
            format!("Check failed: {}", check),
            expected.to_string(),
            actual.to_string(),
        ));
    }
    Ok(())
}

/// Check numeric comparison with operator
fn check_number(path: &str, actual: f32, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    let value: f32 = expected_str.trim().parse().map_err(|_| {
        AssertionError::new(
            format!("Invalid value for {}", path),
            "number".to_string(),
            expected_str.to_string(),
        )
    })?;

    let pass = match operator {
        ">=" => actual >= value,
        "<=" => actual <= value,
        ">" => actual > value,
        "<" => actual < value,
        "=" => (actual - value).abs() < 1e-3,
        "!=" => (actual - value).abs() >= 1e-3,
        _ => false,
    };

    if !pass {
        return Err(AssertionError::new(
            format!(
                "Check failed: {} {} {} (actual: {:.3})",
                path, operator, expected_str, actual
            ),
            format!("{} {} {}", path, operator, value),
            format!("{:.3}", actual),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScenarioState {
        ScenarioState {
            state: PossessionState::Released,
            charge: 0,
            charge_starts: 1,
            fully_charged: 1,
            releases: 1,
            resets: vec![ResetReason::Timeout],
            last_impulse: Some(Vec3::new(0.0, 17.0, -15.0)),
            pending_timer: false,
            ball_position: Vec3::new(0.0, 1.3, 5.0),
            ball_velocity: Vec3::ZERO,
        }
    }

    fn assertion(checks: &[&str]) -> StateAssertion {
        StateAssertion {
            after_step: 1,
            checks: checks.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_passing_checks() {
        let checks = assertion(&[
            "state = Released",
            "charge = 0",
            "impulse.y = 17",
            "impulse.z <= -15",
            "last_reset = timeout",
            "pending_timer = false",
            "ball.y > 1",
        ]);
        assert!(check_state(&checks, &sample()).is_ok());
    }

    #[test]
    fn test_failing_check_reports_actual() {
        let err = check_state(&assertion(&["state = Held"]), &sample()).unwrap_err();
        assert_eq!(err.expected, "Held");
        assert_eq!(err.actual, "Released");
    }

    #[test]
    fn test_unknown_property() {
        assert!(check_state(&assertion(&["spin = 3"]), &sample()).is_err());
    }

    #[test]
    fn test_sequence_subsequence() {
        let log = ["ChargeStart", "FullyCharged", "ShotRelease", "BallReset"];
        let ok: Vec<String> = vec!["ChargeStart".into(), "BallReset".into()];
        assert!(check_sequence(&ok, &log).is_ok());
        let out_of_order: Vec<String> = vec!["ShotRelease".into(), "ChargeStart".into()];
        assert!(check_sequence(&out_of_order, &log).is_err());
    }
}
