//! Ball possession state machine and shot charging

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::collaborators::{BallBody, HolderPose, ResetReason, ShotContext, TimerHandle};
use super::release::compute_impulse;
use crate::constants::*;

/// Who controls the ball right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PossessionState {
    /// Ball is slaved to the holder, no charge
    #[default]
    Held,
    /// Still slaved to the holder, charge building each tick
    Charging,
    /// Ball is in flight, physics owns it
    Released,
}

/// Shot charge in `[0, MAX_POWER]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ChargeLevel(u32);

impl ChargeLevel {
    pub const ZERO: ChargeLevel = ChargeLevel(0);

    /// Clamps into range
    pub fn new(value: u32) -> Self {
        Self(value.min(MAX_POWER))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn fraction(self) -> f32 {
        self.0 as f32 / MAX_POWER as f32
    }

    pub fn is_full(self) -> bool {
        self.0 >= MAX_POWER
    }

    /// Cosmetic band used by the shot meter
    pub fn in_sweet_spot(self) -> bool {
        (SWEET_SPOT_MIN..=SWEET_SPOT_MAX).contains(&self.0)
    }

    fn raised(self, step: u32) -> Self {
        Self::new(self.0.saturating_add(step))
    }
}

/// Values the controller needs from tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotConfig {
    pub charge_step: u32,
    pub base_speed: f32,
    pub reset_delay: Duration,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            charge_step: CHARGE_STEP,
            base_speed: BASE_SPEED,
            reset_delay: Duration::from_secs_f32(RESET_DELAY),
        }
    }
}

/// Owns possession state and charge for the single ball.
///
/// Input adapters call the `on_*` methods, the fixed-step loop calls
/// [`on_tick`](Self::on_tick). Every side effect goes through the
/// [`ShotContext`] collaborators. Calls that arrive in the wrong state
/// (a release while held, a second charge start) are ignored.
#[derive(Resource, Debug, Clone, Default)]
pub struct PossessionController {
    state: PossessionState,
    charge: ChargeLevel,
    config: ShotConfig,
    full_signalled: bool,
    pending_reset: Option<TimerHandle>,
}

impl PossessionController {
    pub fn new(config: ShotConfig) -> Self {
        Self {
            config,
            ..default()
        }
    }

    pub fn state(&self) -> PossessionState {
        self.state
    }

    pub fn charge(&self) -> ChargeLevel {
        self.charge
    }

    pub fn config(&self) -> &ShotConfig {
        &self.config
    }

    /// Takes effect from the next call; does not touch the current state
    pub fn set_config(&mut self, config: ShotConfig) {
        self.config = config;
    }

    /// True while the ball is pinned to the holder
    pub fn is_holding(&self) -> bool {
        matches!(
            self.state,
            PossessionState::Held | PossessionState::Charging
        )
    }

    /// Deferred reset scheduled by the last release, if still outstanding
    pub fn pending_reset(&self) -> Option<TimerHandle> {
        self.pending_reset
    }

    /// Begin charging. Only valid while `Held`.
    pub fn on_charge_start(&mut self, ctx: &mut ShotContext) -> bool {
        if self.state != PossessionState::Held {
            debug!("Charge start ignored in state {:?}", self.state);
            return false;
        }

        if let Some(stale) = self.pending_reset.take() {
            ctx.timers.cancel(stale);
        }
        self.state = PossessionState::Charging;
        self.charge = ChargeLevel::ZERO;
        self.full_signalled = false;
        ctx.feedback.charge_started();
        true
    }

    /// Advance one fixed simulation step
    pub fn on_tick(&mut self, holder: &HolderPose, ctx: &mut ShotContext) {
        if let Some(handle) = self.pending_reset
            && ctx.timers.take_fired(handle)
        {
            self.pending_reset = None;
            self.rehome(holder, ctx, ResetReason::Timeout);
        }

        match self.state {
            PossessionState::Held => pin_to_holder(holder, ctx.ball),
            PossessionState::Charging => {
                pin_to_holder(holder, ctx.ball);
                self.charge = self.charge.raised(self.config.charge_step);
                if self.charge.is_full() && !self.full_signalled {
                    self.full_signalled = true;
                    ctx.feedback.fully_charged();
                }
            }
            PossessionState::Released => {}
        }
    }

    /// Throw the ball. Only valid while `Charging`.
    ///
    /// Returns the impulse applied, or `None` if the release was ignored.
    pub fn on_charge_release(&mut self, aim: Vec3, ctx: &mut ShotContext) -> Option<Vec3> {
        if self.state != PossessionState::Charging {
            debug!("Charge release ignored in state {:?}", self.state);
            return None;
        }

        let charge = self.charge.value();
        let impulse = compute_impulse(charge, aim, self.config.base_speed);
        let at = ctx.ball.position();
        ctx.ball.apply_impulse(impulse, at);

        self.state = PossessionState::Released;
        self.charge = ChargeLevel::ZERO;
        self.full_signalled = false;

        // Only one deferred reset may be outstanding
        if let Some(stale) = self.pending_reset.take() {
            ctx.timers.cancel(stale);
        }
        self.pending_reset = Some(ctx.timers.schedule_after(self.config.reset_delay));

        ctx.feedback.shot_released(charge, impulse);
        Some(impulse)
    }

    /// Return the ball to the holder from any state
    pub fn reset(&mut self, holder: &HolderPose, ctx: &mut ShotContext) {
        if let Some(handle) = self.pending_reset.take() {
            ctx.timers.cancel(handle);
        }
        self.rehome(holder, ctx, ResetReason::Manual);
    }

    fn rehome(&mut self, holder: &HolderPose, ctx: &mut ShotContext, reason: ResetReason) {
        self.state = PossessionState::Held;
        self.charge = ChargeLevel::ZERO;
        self.full_signalled = false;
        pin_to_holder(holder, ctx.ball);
        debug!("Ball reset ({})", reason);
        ctx.feedback.ball_reset(reason);
    }
}

fn pin_to_holder(holder: &HolderPose, ball: &mut dyn BallBody) {
    ball.set_position(holder.hold_point());
    ball.set_velocity(Vec3::ZERO);
    ball.set_angular_velocity(Vec3::ZERO);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shooting::SimTimers;
    use crate::testing::fakes::{BodyCommand, RecordingBall, RecordingFeedback};

    struct Rig {
        controller: PossessionController,
        ball: RecordingBall,
        timers: SimTimers,
        feedback: RecordingFeedback,
        holder: HolderPose,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                controller: PossessionController::default(),
                ball: RecordingBall::default(),
                timers: SimTimers::new(),
                feedback: RecordingFeedback::default(),
                holder: HolderPose::new(SHOOTER_SPAWN, Vec3::NEG_Z),
            }
        }

        fn start(&mut self) -> bool {
            let mut ctx = ShotContext {
                ball: &mut self.ball,
                timers: &mut self.timers,
                feedback: &mut self.feedback,
            };
            self.controller.on_charge_start(&mut ctx)
        }

        fn tick(&mut self) {
            let mut ctx = ShotContext {
                ball: &mut self.ball,
                timers: &mut self.timers,
                feedback: &mut self.feedback,
            };
            self.controller.on_tick(&self.holder, &mut ctx);
        }

        fn release(&mut self, aim: Vec3) -> Option<Vec3> {
            let mut ctx = ShotContext {
                ball: &mut self.ball,
                timers: &mut self.timers,
                feedback: &mut self.feedback,
            };
            self.controller.on_charge_release(aim, &mut ctx)
        }

        fn reset(&mut self) {
            let mut ctx = ShotContext {
                ball: &mut self.ball,
                timers: &mut self.timers,
                feedback: &mut self.feedback,
            };
            self.controller.reset(&self.holder, &mut ctx);
        }

        fn wait(&mut self, secs: f32) {
            self.timers.advance(Duration::from_secs_f32(secs));
            self.tick();
        }
    }

    #[test]
    fn test_full_charge_scenario() {
        let mut rig = Rig::new();
        assert!(rig.start());
        for _ in 0..51 {
            rig.tick();
        }
        assert_eq!(rig.controller.charge().value(), 100);
        assert_eq!(rig.feedback.fully_charged, 1);

        let impulse = rig.release(Vec3::NEG_Z).expect("release while charging");
        assert_eq!(impulse, Vec3::new(0.0, 17.0, -15.0));
        assert_eq!(rig.controller.state(), PossessionState::Released);
        assert_eq!(rig.controller.charge(), ChargeLevel::ZERO);
        assert_eq!(
            rig.ball.commands.last(),
            Some(&BodyCommand::ApplyImpulse {
                impulse,
                at: rig.holder.hold_point(),
            })
        );
    }

    #[test]
    fn test_fully_charged_fires_once_per_cycle() {
        let mut rig = Rig::new();
        rig.start();
        for _ in 0..80 {
            rig.tick();
        }
        assert_eq!(rig.feedback.fully_charged, 1);

        rig.release(Vec3::NEG_Z);
        rig.reset();
        rig.start();
        for _ in 0..50 {
            rig.tick();
        }
        assert_eq!(rig.feedback.fully_charged, 2);
    }

    #[test]
    fn test_charge_monotonic_and_bounded() {
        let mut rig = Rig::new();
        rig.start();
        let mut last = rig.controller.charge();
        for _ in 0..120 {
            rig.tick();
            let now = rig.controller.charge();
            assert!(now >= last);
            assert!(now.value() <= MAX_POWER);
            last = now;
        }
    }

    #[test]
    fn test_held_ball_pinned_each_tick() {
        let mut rig = Rig::new();
        rig.ball.position = Vec3::new(4.0, 0.0, 0.0);
        rig.ball.velocity = Vec3::new(1.0, 2.0, 3.0);
        rig.ball.angular_velocity = Vec3::ONE;

        rig.tick();
        assert_eq!(rig.ball.position, rig.holder.hold_point());
        assert_eq!(rig.ball.velocity, Vec3::ZERO);
        assert_eq!(rig.ball.angular_velocity, Vec3::ZERO);

        rig.holder.position = Vec3::new(2.0, 1.8, 3.0);
        rig.start();
        rig.tick();
        assert_eq!(rig.ball.position, rig.holder.hold_point());
        assert_eq!(rig.ball.position.x, 2.0);
    }

    #[test]
    fn test_released_ball_not_pinned() {
        let mut rig = Rig::new();
        rig.start();
        rig.tick();
        rig.release(Vec3::NEG_Z);
        let commands_after_release = rig.ball.commands.len();

        rig.ball.position = Vec3::new(0.0, 3.0, -5.0);
        for _ in 0..10 {
            rig.tick();
        }
        assert_eq!(rig.ball.commands.len(), commands_after_release);
        assert_eq!(rig.ball.position, Vec3::new(0.0, 3.0, -5.0));
    }

    #[test]
    fn test_timer_resets_exactly_once() {
        let mut rig = Rig::new();
        rig.start();
        rig.tick();
        rig.release(Vec3::NEG_Z);
        assert!(rig.controller.pending_reset().is_some());

        rig.wait(4.9);
        assert_eq!(rig.controller.state(), PossessionState::Released);

        rig.wait(0.1);
        assert_eq!(rig.controller.state(), PossessionState::Held);
        assert_eq!(rig.controller.charge(), ChargeLevel::ZERO);
        assert_eq!(rig.feedback.resets, vec![ResetReason::Timeout]);
        assert!(rig.controller.pending_reset().is_none());

        rig.wait(10.0);
        assert_eq!(rig.feedback.resets.len(), 1);
    }

    #[test]
    fn test_manual_reset_cancels_timer() {
        let mut rig = Rig::new();
        rig.start();
        rig.tick();
        rig.release(Vec3::NEG_Z);

        rig.wait(2.0);
        rig.reset();
        assert_eq!(rig.controller.state(), PossessionState::Held);
        assert_eq!(rig.timers.pending_count(), 0);

        // New cycle in flight when the old deadline passes
        rig.start();
        rig.tick();
        rig.release(Vec3::NEG_Z);
        rig.wait(3.5);
        assert_eq!(rig.controller.state(), PossessionState::Released);
        assert_eq!(rig.feedback.resets, vec![ResetReason::Manual]);
    }

    #[test]
    fn test_release_after_reset_ignored() {
        let mut rig = Rig::new();
        rig.start();
        rig.tick();
        rig.reset();
        assert_eq!(rig.release(Vec3::NEG_Z), None);
        assert_eq!(rig.controller.state(), PossessionState::Held);
        assert_eq!(rig.feedback.releases, 0);
    }

    #[test]
    fn test_guards_are_noops() {
        let mut rig = Rig::new();
        assert_eq!(rig.release(Vec3::NEG_Z), None);
        assert!(rig.start());
        rig.tick();
        rig.tick();
        assert!(!rig.start(), "second charge start is ignored");
        assert_eq!(rig.controller.charge().value(), 4);

        rig.release(Vec3::NEG_Z);
        assert!(!rig.start(), "cannot charge while the ball is in flight");
        assert_eq!(rig.release(Vec3::NEG_Z), None);
        assert_eq!(rig.controller.state(), PossessionState::Released);
    }

    #[test]
    fn test_reset_zeroes_motion() {
        let mut rig = Rig::new();
        rig.start();
        rig.tick();
        rig.release(Vec3::NEG_Z);
        rig.ball.position = Vec3::new(1.0, 0.24, -9.0);
        rig.ball.angular_velocity = Vec3::new(0.0, 4.0, 0.0);

        rig.reset();
        assert_eq!(rig.ball.position, rig.holder.hold_point());
        assert_eq!(rig.ball.velocity, Vec3::ZERO);
        assert_eq!(rig.ball.angular_velocity, Vec3::ZERO);
    }

    #[test]
    fn test_only_legal_transitions() {
        #[derive(Clone, Copy)]
        enum Op {
            Start,
            Tick,
            Release,
            Reset,
            Wait,
        }
        const OPS: [Op; 5] = [Op::Start, Op::Tick, Op::Release, Op::Reset, Op::Wait];
        const LEN: u32 = 6;

        fn legal(from: PossessionState, to: PossessionState, op: Op) -> bool {
            use PossessionState::*;
            if from == to {
                return true;
            }
            match (from, to) {
                (Held, Charging) => matches!(op, Op::Start),
                (Charging, Released) => matches!(op, Op::Release),
                (Released, Held) => matches!(op, Op::Reset | Op::Tick | Op::Wait),
                (Charging, Held) => matches!(op, Op::Reset),
                _ => false,
            }
        }

        for code in 0..OPS.len().pow(LEN) {
            let mut rig = Rig::new();
            let mut rest = code;
            for _ in 0..LEN {
                let op = OPS[rest % OPS.len()];
                rest /= OPS.len();

                let before = rig.controller.state();
                match op {
                    Op::Start => {
                        rig.start();
                    }
                    Op::Tick => rig.tick(),
                    Op::Release => {
                        rig.release(Vec3::NEG_Z);
                    }
                    Op::Reset => rig.reset(),
                    Op::Wait => rig.wait(RESET_DELAY),
                }
                let after = rig.controller.state();

                assert!(legal(before, after, op), "{:?} -> {:?}", before, after);
                assert!(rig.controller.charge().value() <= MAX_POWER);
                if after != PossessionState::Charging {
                    assert_eq!(rig.controller.charge(), ChargeLevel::ZERO);
                }
                assert!(rig.timers.pending_count() <= 1);
            }
        }
    }

    #[test]
    fn test_config_changes_charge_rate() {
        let mut rig = Rig::new();
        rig.controller.set_config(ShotConfig {
            charge_step: 5,
            ..default()
        });
        rig.start();
        for _ in 0..3 {
            rig.tick();
        }
        assert_eq!(rig.controller.charge().value(), 15);
    }

    #[test]
    fn test_sweet_spot_is_cosmetic() {
        assert!(!ChargeLevel::new(39).in_sweet_spot());
        assert!(ChargeLevel::new(40).in_sweet_spot());
        assert!(ChargeLevel::new(70).in_sweet_spot());
        assert!(!ChargeLevel::new(71).in_sweet_spot());
        assert_eq!(ChargeLevel::new(500).value(), MAX_POWER);
    }
}
