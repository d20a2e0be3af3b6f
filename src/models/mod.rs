// Core data models for gcboard
// Everything here is rebuilt from the source tables on every refresh

pub mod participant;
pub mod roster;
pub mod stage;

pub use participant::*;
pub use roster::*;
pub use stage::*;
