//! Headless App Builder
//!
//! Provides a reusable builder for creating headless Bevy apps that run the
//! fixed-step gameplay loop without a window.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use std::time::Duration;

use super::setup::{add_fixed_step_systems, sim_setup};
use crate::constants::PHYSICS_HZ;
use crate::events::EventBus;
use crate::input::PlayerInput;
use crate::menu::MainMenu;
use crate::scoring::Score;
use crate::shooting::{PossessionController, SimTimers};
use crate::tuning::{self, PhysicsTweaks};

/// Builder for creating headless Bevy apps
pub struct HeadlessAppBuilder {
    fps: f32,
    minimal_threads: bool,
    global_tuning: bool,
}

impl Default for HeadlessAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessAppBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            fps: 60.0,
            minimal_threads: false,
            global_tuning: false,
        }
    }

    /// Set the target FPS (default: 60)
    pub fn with_fps(mut self, fps: f32) -> Self {
        self.fps = fps;
        self
    }

    /// Enable minimal thread mode (task pools = 1)
    pub fn with_minimal_threads(mut self) -> Self {
        self.minimal_threads = true;
        self
    }

    /// Load `config/gameplay_tuning.json` instead of compiled defaults
    pub fn with_global_tuning(mut self) -> Self {
        self.global_tuning = true;
        self
    }

    /// Build the app with minimal plugins, game resources and the
    /// fixed-step chain. The menu starts closed.
    ///
    /// Callers drive it with `app.update()` (runs Startup on the first call)
    /// and `app.world_mut().run_schedule(FixedUpdate)` for exact steps.
    pub fn build(self) -> App {
        let mut app = App::new();

        if self.minimal_threads {
            app.add_plugins(
                MinimalPlugins
                    .set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f32(
                        1.0 / self.fps,
                    )))
                    .set(TaskPoolPlugin {
                        task_pool_options: TaskPoolOptions::with_num_threads(1),
                    }),
            );
        } else {
            app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(
                Duration::from_secs_f32(1.0 / self.fps),
            )));
        }
        app.add_plugins(bevy::transform::TransformPlugin);

        let mut tweaks = PhysicsTweaks::default();
        if self.global_tuning
            && let Err(err) = tuning::apply_global_tuning(&mut tweaks)
        {
            warn!("{}, using default tuning", err);
        }

        app.insert_resource(Time::<Fixed>::from_hz(PHYSICS_HZ));
        app.insert_resource(PossessionController::new(tweaks.shot_config()));
        app.insert_resource(tweaks);
        app.init_resource::<Score>();
        app.init_resource::<PlayerInput>();
        app.init_resource::<SimTimers>();
        app.insert_resource(EventBus::new());
        app.insert_resource(MainMenu { open: false });

        app.add_systems(Startup, sim_setup);
        add_fixed_step_systems(&mut app);

        app
    }
}
