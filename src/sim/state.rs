//! Agent state and simulation result types
//!
//! Everything needed to resume an agent lives in `AgentState`; the
//! collaborators it talks to are held separately by `Agent`.

use serde::{Deserialize, Serialize};

use super::locomotion::LocomotionState;
use super::resource::{HealthMeter, ResourceMeter};
use super::tint::TintState;
use crate::settings::AgentConfig;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentPhase {
    /// Accepting input and damage
    Alive,
    /// Health reached zero; terminal
    Defeated,
}

/// Why a damage call changed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Inside the invulnerability window of the previous hit
    Invulnerable,
    /// Agent already defeated
    Defeated,
}

/// Result of `Agent::apply_damage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Ignored(IgnoreReason),
    /// Non-lethal hit; remaining health
    Hit { health: u32 },
    /// Health reached zero
    Defeated,
}

/// Result of `Agent::try_shoot`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShootOutcome {
    /// Shot fired; resource target after paying the cost
    Fired { resource_target: f32 },
    /// Not enough resource; `flash_started` is false if a flash was already running
    Insufficient { flash_started: bool },
    NotAiming,
    Dead,
}

/// What the agent touched, as reported by the mover's collision callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Hazard,
    Neutral,
}

/// Things that happened during a tick or operation, drained by the host
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    Jumped,
    Fired,
    ResourceInsufficient,
    ResourceSettled { value: f32 },
    Damaged { amount: u32, health: u32 },
    Defeated,
    AimToggled { aiming: bool },
    ColorModeChanged { index: usize },
    ItemCollected { count: u32 },
    MobSaved { count: u32 },
}

/// Level progress; the agent only forwards these to the HUD
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressCounters {
    pub items_collected: u32,
    pub items_total: u32,
    pub mobs_saved: u32,
    pub mobs_total: u32,
}

impl ProgressCounters {
    pub fn new(items_total: u32, mobs_total: u32) -> Self {
        Self {
            items_total,
            mobs_total,
            ..Default::default()
        }
    }

    pub fn items_complete(&self) -> bool {
        self.items_total > 0 && self.items_collected == self.items_total
    }

    pub fn mobs_complete(&self) -> bool {
        self.mobs_total > 0 && self.mobs_saved == self.mobs_total
    }

    /// Rescue progress in [0, 1]
    pub fn mobs_fraction(&self) -> f32 {
        if self.mobs_total == 0 {
            return 0.0;
        }
        (self.mobs_saved as f32 / self.mobs_total as f32).min(1.0)
    }
}

/// Complete agent state (serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentState {
    /// Sim time in seconds since level start
    pub now: f64,
    pub phase: AgentPhase,
    pub health: HealthMeter,
    pub resource: ResourceMeter,
    pub locomotion: LocomotionState,
    /// Time of the last damage that landed
    pub last_damage_time: Option<f64>,
    /// Cursor locked; yaw and shooting only work in this mode
    pub aiming: bool,
    pub tint: TintState,
    pub progress: ProgressCounters,
}

impl AgentState {
    /// Fresh level-start state: full health, empty resource, aiming
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            now: 0.0,
            phase: AgentPhase::Alive,
            health: HealthMeter::new(config.max_health),
            resource: ResourceMeter::new(config),
            locomotion: LocomotionState::default(),
            last_damage_time: None,
            aiming: true,
            tint: TintState::new(config.default_tint),
            progress: ProgressCounters::default(),
        }
    }

    /// Alive until defeated. Defeat is terminal even if health is written again.
    pub fn is_alive(&self) -> bool {
        self.phase == AgentPhase::Alive && self.health.is_alive()
    }

    /// Within the invulnerability window of the last hit
    pub fn is_invulnerable(&self, window: f32) -> bool {
        self.last_damage_time
            .is_some_and(|last| self.now - last < f64::from(window))
    }
}
