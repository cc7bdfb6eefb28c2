//! Resource regulator: health meter and the regenerating resource bar
//!
//! Health writes are immediate: clamp, then reflect the fill fraction to the
//! HUD in the same call. Resource writes are gradual: they set a target and
//! start a timed transition from whatever the bar currently shows.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::ports::Hud;
use super::transition::{Sample, Transition};
use crate::clamp01;
use crate::settings::AgentConfig;

/// Integer health clamped to `[0, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthMeter {
    current: u32,
    max: u32,
}

impl HealthMeter {
    /// Full health. `max` is validated non-zero by the config.
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Fill fraction shown on the health bar
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Clamp `value` into range, store it and update the health bar.
    /// Returns the stored health.
    pub fn set(&mut self, value: i64, hud: &mut dyn Hud) -> u32 {
        self.current = value.clamp(0, i64::from(self.max)) as u32;
        hud.set_health_fill(self.fraction());
        self.current
    }
}

/// Insufficient-resource flash sequence
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum FlashState {
    #[default]
    Idle,
    /// `step` counts half-steps; even steps show the alert color, odd steps the warning color
    Flashing { step: u8, next_at: f64 },
}

/// The spendable resource and its bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceMeter {
    /// Level the bar currently shows
    value: f32,
    /// Pending target while a transition is in flight
    target: Option<f32>,
    transition: Option<Transition<f32>>,
    /// Level color (normal or warning), re-evaluated on every transition step
    level_color: Color,
    flash: FlashState,
    next_regen_at: f64,
}

impl ResourceMeter {
    /// Empty bar; the first regeneration is due at t = 0
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            value: 0.0,
            target: None,
            transition: None,
            level_color: Self::color_for(0.0, config),
            flash: FlashState::Idle,
            next_regen_at: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Target of the in-flight transition, if any
    pub fn target(&self) -> Option<f32> {
        self.target
    }

    /// Committed level: the pending target, or the shown value when settled.
    /// Costs and increments are charged against this, never the mid-fade value.
    pub fn level(&self) -> f32 {
        self.target.unwrap_or(self.value)
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn flash_state(&self) -> FlashState {
        self.flash
    }

    pub fn is_flashing(&self) -> bool {
        matches!(self.flash, FlashState::Flashing { .. })
    }

    pub fn next_regen_at(&self) -> f64 {
        self.next_regen_at
    }

    /// Color the bar should show right now. The flash overrides the level color.
    pub fn shown_color(&self, config: &AgentConfig) -> Color {
        match self.flash {
            FlashState::Flashing { step, .. } if step % 2 == 0 => config.alert_color,
            FlashState::Flashing { .. } => config.warning_color,
            FlashState::Idle => self.level_color,
        }
    }

    fn color_for(value: f32, config: &AgentConfig) -> Color {
        if value >= config.low_threshold {
            config.resource_color
        } else {
            config.warning_color
        }
    }

    /// Record a new target and (re)start the transition toward it from the
    /// current bar value. Returns the clamped target.
    pub fn set_target(&mut self, value: f32, now: f64, config: &AgentConfig) -> f32 {
        let target = clamp01(value);
        if self.transition.is_some() {
            log::debug!(
                "Resource transition to {:?} abandoned at {:.3}",
                self.target,
                self.value
            );
        }
        self.target = Some(target);
        self.transition = Some(Transition::new(self.value, target, now, config.transition_secs));
        target
    }

    /// Advance the transition. Returns the settled value on natural completion.
    pub fn step_transition(&mut self, now: f64, config: &AgentConfig) -> Option<f32> {
        let transition = self.transition?;
        if self.target != Some(transition.target) {
            // Superseded; never write a stale value
            self.transition = None;
            return None;
        }

        match transition.sample(now) {
            Sample::Running(value) => {
                self.value = value;
                self.level_color = Self::color_for(value, config);
                None
            }
            Sample::Done(value) => {
                self.value = value;
                self.level_color = Self::color_for(value, config);
                self.transition = None;
                self.target = None;
                log::debug!("Resource settled at {:.3}", value);
                Some(value)
            }
        }
    }

    /// Issue a regeneration increment if one is due. Returns true when issued.
    pub fn step_regen(&mut self, now: f64, config: &AgentConfig) -> bool {
        if now < self.next_regen_at {
            return false;
        }
        self.next_regen_at += f64::from(config.regen_interval);
        self.set_target(self.level() + config.regen_amount, now, config);
        true
    }

    /// Start the flash sequence. Returns false if one is already running.
    pub fn start_flash(&mut self, now: f64, config: &AgentConfig) -> bool {
        if self.is_flashing() {
            return false;
        }
        self.flash = FlashState::Flashing {
            step: 0,
            next_at: now + f64::from(config.flash_half_step),
        };
        true
    }

    /// Advance the flash sequence; the final half-step returns the bar to its level color
    pub fn step_flash(&mut self, now: f64, config: &AgentConfig) {
        let total_steps = config.flash_cycles.saturating_mul(2);
        while let FlashState::Flashing { step, next_at } = self.flash {
            if now < next_at {
                break;
            }
            let step = step + 1;
            self.flash = if step >= total_steps {
                self.level_color = Self::color_for(self.value, config);
                FlashState::Idle
            } else {
                FlashState::Flashing {
                    step,
                    next_at: next_at + f64::from(config.flash_half_step),
                }
            };
        }
    }
}
