//! Frame-stepped agent simulation
//!
//! All gameplay logic lives here. This module is single-threaded and
//! deterministic:
//! - Time only advances through `tick`
//! - Timed behavior is explicit state (`Transition`, `FlashState`), never sleeps
//! - Side effects go through the collaborator traits in `ports`

pub mod agent;
pub mod color;
pub mod locomotion;
pub mod ports;
pub mod resource;
pub mod state;
pub mod tick;
pub mod tint;
pub mod transition;

#[cfg(test)]
pub(crate) mod testing;

pub use agent::{Agent, AgentBuilder};
pub use color::Color;
pub use locomotion::{LocomotionState, Motion, MoveIntent};
pub use ports::{Hud, InputSource, Mover, Presentation, Session};
pub use resource::{FlashState, HealthMeter, ResourceMeter};
pub use state::{
    AgentEvent, AgentPhase, AgentState, ContactKind, DamageOutcome, IgnoreReason,
    ProgressCounters, ShootOutcome,
};
pub use tick::{TickInput, tick, tick_polled};
pub use tint::{TintState, shoot_color_range};
pub use transition::{Lerp, Sample, Transition};
