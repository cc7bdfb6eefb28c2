//! Locomotion controller: yaw, walk/sprint, jump and gravity
//!
//! Produces one frame of displacement from input and the mover's grounded
//! report. Collision resolution is the mover's job; this only decides where
//! the agent wants to go.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::GRAVITY;
use crate::local_to_world;
use crate::settings::AgentConfig;

/// Per-agent locomotion state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocomotionState {
    /// Heading about the up axis (radians)
    pub yaw: f32,
    /// Current vertical speed (units/second, positive is up)
    pub vertical_speed: f32,
    /// Set by a jump from the ground, cleared on landing. Grants air control.
    pub jumped: bool,
    /// Grounded report used for the last step
    pub grounded: bool,
}

/// Movement-relevant slice of one tick's input
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveIntent {
    /// x = strafe (right positive), y = forward
    pub axes: Vec2,
    pub mouse_dx: f32,
    pub jump: bool,
    pub sprint: bool,
}

/// Output of one locomotion step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Motion {
    /// Local-space velocity (x = right, y = up, z = forward)
    pub velocity: Vec3,
    /// World-space displacement for this frame (velocity rotated by yaw, times dt)
    pub displacement: Vec3,
}

impl Motion {
    pub const NONE: Motion = Motion {
        velocity: Vec3::ZERO,
        displacement: Vec3::ZERO,
    };
}

impl LocomotionState {
    /// Advance one frame.
    ///
    /// A dead agent neither turns nor moves. Otherwise yaw turns only while
    /// aiming, and an agent that left the ground without jumping gets no
    /// horizontal control until it lands.
    pub fn step(
        &mut self,
        config: &AgentConfig,
        intent: &MoveIntent,
        grounded: bool,
        aiming: bool,
        alive: bool,
        dt: f32,
    ) -> Motion {
        self.grounded = grounded;
        if !alive {
            return Motion::NONE;
        }

        if aiming {
            self.yaw += intent.mouse_dx * config.rotational_speed.to_radians() * dt;
        }

        let mut velocity = config.speed * Vec3::new(intent.axes.x, 0.0, intent.axes.y);
        if !grounded && !self.jumped {
            velocity.x = 0.0;
            velocity.z = 0.0;
        }

        if config.sprint_rule.applies(grounded, intent.sprint) {
            velocity *= config.sprint_multiplier;
        }

        if grounded {
            self.vertical_speed = 0.0;
            self.jumped = false;
            if intent.jump {
                self.jumped = true;
                self.vertical_speed = config.initial_jump_speed;
            }
        }
        self.vertical_speed -= GRAVITY * config.gravity_multiplier * dt;
        velocity.y = self.vertical_speed;

        Motion {
            velocity,
            displacement: local_to_world(self.yaw, velocity * dt),
        }
    }
}
