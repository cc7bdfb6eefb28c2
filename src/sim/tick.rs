//! Per-frame simulation tick
//!
//! Advances the clock, dispatches input, steps locomotion and then every
//! timed task in a fixed order. The order matters where two tasks touch the
//! resource bar: regeneration retargets before the transition steps, and the
//! flash is evaluated last so its color wins while it runs.

use glam::Vec2;

use super::agent::Agent;
use super::locomotion::MoveIntent;
use super::ports::InputSource;
use super::state::AgentEvent;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement axes: x = strafe right, y = forward, each in [-1, 1]
    pub move_axes: Vec2,
    /// Horizontal mouse delta this frame
    pub mouse_dx: f32,
    /// Jump pressed this frame
    pub jump: bool,
    /// Sprint held
    pub sprint: bool,
    /// Fire pressed this frame
    pub fire: bool,
    /// Toggle aiming (cursor lock) pressed this frame
    pub toggle_aim: bool,
    /// Cycle color mode pressed this frame
    pub mode_toggle: bool,
}

impl TickInput {
    pub fn intent(&self) -> MoveIntent {
        MoveIntent {
            axes: self.move_axes.clamp(Vec2::splat(-1.0), Vec2::splat(1.0)),
            mouse_dx: self.mouse_dx,
            jump: self.jump,
            sprint: self.sprint,
        }
    }
}

/// Advance the agent by `dt` seconds
pub fn tick(agent: &mut Agent, input: &TickInput, dt: f32) {
    agent.state.now += f64::from(dt);
    let now = agent.state.now;
    let alive = agent.is_alive();

    if alive {
        agent.presentation.set_sprinting(input.sprint);
        if input.fire {
            agent.try_shoot();
        }
        if input.toggle_aim {
            agent.toggle_aim();
        }
        if input.mode_toggle {
            agent.cycle_color_mode();
        }
    }

    // Locomotion
    let grounded = agent.mover.is_grounded();
    let aiming = agent.state.aiming;
    let motion = agent.state.locomotion.step(
        &agent.config,
        &input.intent(),
        grounded,
        aiming,
        alive,
        dt,
    );
    if alive {
        if grounded && input.jump {
            agent.push_event(AgentEvent::Jumped);
        }
        agent.mover.move_by(motion.displacement);
    }

    // Timed tasks
    if alive {
        agent.state.resource.step_regen(now, &agent.config);
    }
    if let Some(value) = agent.state.resource.step_transition(now, &agent.config) {
        agent.push_event(AgentEvent::ResourceSettled { value });
    }
    agent.state.resource.step_flash(now, &agent.config);
    if let Some(color) = agent.state.tint.step(now) {
        agent.presentation.set_tint(color);
    }

    agent.sync_resource_hud();
}

/// Poll `source` for this frame's input, then tick
pub fn tick_polled(agent: &mut Agent, source: &mut dyn InputSource, dt: f32) {
    let input = source.poll();
    tick(agent, &input, dt);
}
