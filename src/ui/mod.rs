//! UI module - shot meter and HUD

mod hud;
mod shot_meter;

pub use hud::*;
pub use shot_meter::*;
