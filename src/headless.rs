//! Headless collaborators for running the agent without a game engine
//!
//! `FlatGround` stands in for a character mover on an infinite floor, the
//! `Log*` types report through the `log` facade, and `DemoPilot` is a seeded
//! input source that wanders, jumps, fires and occasionally brushes a hazard.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{Color, ContactKind, Hud, InputSource, Mover, Presentation, Session, TickInput};

/// Mover on an infinite horizontal floor
#[derive(Debug, Clone)]
pub struct FlatGround {
    pub position: Vec3,
    pub floor_y: f32,
    grounded: bool,
}

impl FlatGround {
    pub fn new(floor_y: f32) -> Self {
        Self {
            position: Vec3::new(0.0, floor_y, 0.0),
            floor_y,
            grounded: true,
        }
    }
}

impl Mover for FlatGround {
    fn move_by(&mut self, displacement: Vec3) {
        self.position += displacement;
        if self.position.y <= self.floor_y {
            self.position.y = self.floor_y;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }
}

/// Presentation that logs reactions
#[derive(Debug, Default)]
pub struct LogPresentation {
    pub tint: Option<Color>,
}

impl Presentation for LogPresentation {
    fn play_hit_reaction(&mut self) {
        log::info!("Hit!");
    }

    fn play_defeat_reaction(&mut self) {
        log::info!("Defeated");
    }

    fn play_shoot_effect(&mut self) {
        log::info!("Shoot");
    }

    fn set_tint(&mut self, color: Color) {
        self.tint = Some(color);
    }

    fn set_shoot_color_range(&mut self, low: Color, high: Color) {
        log::debug!("Shoot colors {:?}..{:?}", low, high);
    }

    fn set_cursor_locked(&mut self, locked: bool) {
        log::debug!("Cursor locked: {}", locked);
    }

    fn play_item_collect(&mut self) {
        log::info!("Item collected");
    }
}

/// HUD that keeps the last written values and logs bar changes
#[derive(Debug, Default)]
pub struct LogHud {
    pub health_fill: f32,
    pub resource_fill: f32,
    pub resource_color: Option<Color>,
}

impl Hud for LogHud {
    fn set_health_fill(&mut self, fraction: f32) {
        if fraction != self.health_fill {
            log::info!("Health bar: {:.0}%", fraction * 100.0);
        }
        self.health_fill = fraction;
    }

    fn set_resource_fill(&mut self, fraction: f32) {
        self.resource_fill = fraction;
    }

    fn set_resource_color(&mut self, color: Color) {
        if self.resource_color != Some(color) {
            log::debug!("Resource bar color: {:?}", color);
        }
        self.resource_color = Some(color);
    }

    fn set_items_collected(&mut self, count: u32, complete: bool) {
        log::info!("Items: {}{}", count, if complete { " (all)" } else { "" });
    }

    fn set_mobs_saved(&mut self, count: u32, complete: bool) {
        log::info!("Saved: {}{}", count, if complete { " (all)" } else { "" });
    }
}

/// Session that records reset requests
#[derive(Debug, Default)]
pub struct LogSession {
    pub resets: u32,
}

impl Session for LogSession {
    fn reset(&mut self) {
        self.resets += 1;
        log::info!("Session reset requested");
    }

    fn set_main_light(&mut self, fraction: f32) {
        log::debug!("Main light: {:.2}", fraction);
    }
}

/// Seeded wandering input
#[derive(Debug, Clone)]
pub struct DemoPilot {
    rng: Pcg32,
    axes: Vec2,
    ticks_until_turn: u32,
    /// Chance per tick of touching a hazard
    pub hazard_chance: f64,
}

impl DemoPilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            axes: Vec2::ZERO,
            ticks_until_turn: 0,
            hazard_chance: 0.002,
        }
    }

    /// Contact reported by the environment this tick, if any
    pub fn contact(&mut self) -> Option<ContactKind> {
        self.rng
            .random_bool(self.hazard_chance)
            .then_some(ContactKind::Hazard)
    }
}

impl InputSource for DemoPilot {
    fn poll(&mut self) -> TickInput {
        if self.ticks_until_turn == 0 {
            self.axes = Vec2::new(
                self.rng.random_range(-1.0..=1.0),
                self.rng.random_range(-1.0..=1.0),
            );
            self.ticks_until_turn = self.rng.random_range(30..120);
        }
        self.ticks_until_turn -= 1;

        TickInput {
            move_axes: self.axes,
            mouse_dx: self.rng.random_range(-0.2..=0.2),
            jump: self.rng.random_bool(0.01),
            sprint: self.rng.random_bool(0.3),
            fire: self.rng.random_bool(0.02),
            toggle_aim: false,
            mode_toggle: self.rng.random_bool(0.001),
        }
    }
}
