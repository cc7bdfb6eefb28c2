//! Agent tuning and configuration
//!
//! Loaded from JSON; every field falls back to its `consts` default so a
//! partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::Color;

/// How the sprint modifier is gated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SprintRule {
    /// Sprint whenever the key is held, airborne included
    #[default]
    KeyHeld,
    /// Sprint only while grounded and holding the key
    GroundedOnly,
}

impl SprintRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            SprintRule::KeyHeld => "KeyHeld",
            SprintRule::GroundedOnly => "GroundedOnly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "keyheld" | "held" => Some(SprintRule::KeyHeld),
            "groundedonly" | "grounded" => Some(SprintRule::GroundedOnly),
            _ => None,
        }
    }

    /// Whether the sprint multiplier applies this tick
    pub fn applies(&self, grounded: bool, sprint_held: bool) -> bool {
        match self {
            SprintRule::KeyHeld => sprint_held,
            SprintRule::GroundedOnly => grounded && sprint_held,
        }
    }
}

/// Agent tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    // === Locomotion ===
    pub gravity_multiplier: f32,
    /// Horizontal speed (units/second)
    pub speed: f32,
    pub initial_jump_speed: f32,
    /// Yaw rate in degrees/second per unit of mouse delta
    pub rotational_speed: f32,
    pub sprint_multiplier: f32,
    pub sprint_rule: SprintRule,

    // === Health ===
    pub max_health: u32,
    /// Seconds after a hit during which further damage is ignored
    pub invulnerability: f32,
    /// Damage dealt by a hazard contact
    pub hazard_damage: u32,

    // === Resource ===
    pub low_threshold: f32,
    pub shoot_cost: f32,
    pub regen_amount: f32,
    pub regen_interval: f32,
    pub transition_secs: f32,
    pub flash_half_step: f32,
    pub flash_cycles: u8,

    // === Colors ===
    /// Resource bar color when above the low threshold
    pub resource_color: Color,
    pub warning_color: Color,
    pub alert_color: Color,
    /// Initial body tint
    pub default_tint: Color,
    pub tint_secs: f32,
    /// Body/shot colors cycled by the mode toggle
    pub color_modes: Vec<Color>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            gravity_multiplier: GRAVITY_MULTIPLIER,
            speed: WALK_SPEED,
            initial_jump_speed: INITIAL_JUMP_SPEED,
            rotational_speed: ROTATIONAL_SPEED_DEG,
            sprint_multiplier: SPRINT_MULTIPLIER,
            sprint_rule: SprintRule::default(),

            max_health: MAX_HEALTH,
            invulnerability: INVULNERABILITY_SECS,
            hazard_damage: HAZARD_DAMAGE,

            low_threshold: RESOURCE_LOW_THRESHOLD,
            shoot_cost: SHOOT_COST,
            regen_amount: REGEN_AMOUNT,
            regen_interval: REGEN_INTERVAL_SECS,
            transition_secs: RESOURCE_TRANSITION_SECS,
            flash_half_step: FLASH_HALF_STEP_SECS,
            flash_cycles: FLASH_CYCLES,

            resource_color: Color::BLUE,
            warning_color: Color::YELLOW,
            alert_color: Color::RED,
            default_tint: Color::GRAY,
            tint_secs: TINT_TRANSITION_SECS,
            color_modes: vec![Color::GRAY, Color::rgb(0.2, 0.6, 1.0), Color::rgb(1.0, 0.45, 0.1)],
        }
    }
}

impl AgentConfig {
    /// Reject configurations the agent cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health == 0 {
            return Err(ConfigError::NonPositiveMaxHealth);
        }

        let non_negative = [
            ("gravity_multiplier", self.gravity_multiplier),
            ("speed", self.speed),
            ("initial_jump_speed", self.initial_jump_speed),
            ("rotational_speed", self.rotational_speed),
            ("sprint_multiplier", self.sprint_multiplier),
            ("invulnerability", self.invulnerability),
            ("shoot_cost", self.shoot_cost),
            ("regen_amount", self.regen_amount),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        let positive = [
            ("regen_interval", self.regen_interval),
            ("transition_secs", self.transition_secs),
            ("flash_half_step", self.flash_half_step),
            ("tint_secs", self.tint_secs),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        if !(0.0..=1.0).contains(&self.low_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "low_threshold",
                value: self.low_threshold,
            });
        }

        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded agent config from {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Agent config saved to {}", path.as_ref().display());
        Ok(())
    }
}
