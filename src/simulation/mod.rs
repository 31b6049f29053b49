//! Headless simulation - the fixed-step game loop without rendering
//!
//! Shared by the game binary (system wiring) and by tests that drive the
//! full charge/release/reset path through Bevy.

pub mod app_builder;
pub mod setup;

pub use app_builder::HeadlessAppBuilder;
pub use setup::{add_fixed_step_systems, sim_setup};
