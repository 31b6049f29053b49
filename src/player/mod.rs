//! Player module - the shooter entity and aim controls

mod aim;
mod components;

pub use aim::*;
pub use components::*;
