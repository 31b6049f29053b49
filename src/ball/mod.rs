//! Ball module - components and ballistic physics

mod components;
mod physics;

pub use components::*;
pub use physics::*;
