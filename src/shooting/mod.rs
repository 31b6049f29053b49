//! Shooting module - possession state machine, release impulse, and the
//! systems that drive them from the fixed-step loop

mod collaborators;
mod possession;
mod release;
mod systems;
mod timers;

pub use collaborators::*;
pub use possession::*;
pub use release::*;
pub use systems::*;
pub use timers::*;
