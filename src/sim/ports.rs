//! Collaborator interfaces the agent calls into
//!
//! Rendering, audio, scene management and widgets live outside the core.
//! They are handed to the agent at construction through `AgentBuilder`.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use super::color::Color;
use super::tick::TickInput;

/// Collision-aware displacement and ground contact
pub trait Mover {
    /// Apply a world-space displacement for this frame
    fn move_by(&mut self, displacement: Vec3);
    /// Whether the last move left the agent on a supporting surface
    fn is_grounded(&self) -> bool;
}

/// Animation, particle and audio reactions
pub trait Presentation {
    fn play_hit_reaction(&mut self);
    fn play_defeat_reaction(&mut self);
    fn play_shoot_effect(&mut self);
    fn set_tint(&mut self, color: Color);

    /// Particle start-color range for shots
    fn set_shoot_color_range(&mut self, _low: Color, _high: Color) {}
    fn set_sprinting(&mut self, _sprinting: bool) {}
    fn set_cursor_locked(&mut self, _locked: bool) {}
    fn play_item_collect(&mut self) {}
}

/// HUD widgets written by the resource regulator and progress forwarders
pub trait Hud {
    /// Health bar fill fraction in [0, 1]
    fn set_health_fill(&mut self, fraction: f32);
    /// Resource bar fill fraction in [0, 1]
    fn set_resource_fill(&mut self, fraction: f32);
    fn set_resource_color(&mut self, color: Color);

    /// `complete` is set once the count reaches the level total
    fn set_items_collected(&mut self, _count: u32, _complete: bool) {}
    fn set_mobs_saved(&mut self, _count: u32, _complete: bool) {}
}

/// Scene/session controller
pub trait Session {
    /// Reload the level after defeat
    fn reset(&mut self);
    /// Scene light intensity in [0, 1] tracking rescue progress
    fn set_main_light(&mut self, _fraction: f32) {}
}

/// Per-tick input polling
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

// Shared handles let the owner of a collaborator keep observing it after
// handing a clone to the agent.

impl<T: Mover> Mover for Rc<RefCell<T>> {
    fn move_by(&mut self, displacement: Vec3) {
        self.borrow_mut().move_by(displacement);
    }

    fn is_grounded(&self) -> bool {
        self.borrow().is_grounded()
    }
}

impl<T: Presentation> Presentation for Rc<RefCell<T>> {
    fn play_hit_reaction(&mut self) {
        self.borrow_mut().play_hit_reaction();
    }

    fn play_defeat_reaction(&mut self) {
        self.borrow_mut().play_defeat_reaction();
    }

    fn play_shoot_effect(&mut self) {
        self.borrow_mut().play_shoot_effect();
    }

    fn set_tint(&mut self, color: Color) {
        self.borrow_mut().set_tint(color);
    }

    fn set_shoot_color_range(&mut self, low: Color, high: Color) {
        self.borrow_mut().set_shoot_color_range(low, high);
    }

    fn set_sprinting(&mut self, sprinting: bool) {
        self.borrow_mut().set_sprinting(sprinting);
    }

    fn set_cursor_locked(&mut self, locked: bool) {
        self.borrow_mut().set_cursor_locked(locked);
    }

    fn play_item_collect(&mut self) {
        self.borrow_mut().play_item_collect();
    }
}

impl<T: Hud> Hud for Rc<RefCell<T>> {
    fn set_health_fill(&mut self, fraction: f32) {
        self.borrow_mut().set_health_fill(fraction);
    }

    fn set_resource_fill(&mut self, fraction: f32) {
        self.borrow_mut().set_resource_fill(fraction);
    }

    fn set_resource_color(&mut self, color: Color) {
        self.borrow_mut().set_resource_color(color);
    }

    fn set_items_collected(&mut self, count: u32, complete: bool) {
        self.borrow_mut().set_items_collected(count, complete);
    }

    fn set_mobs_saved(&mut self, count: u32, complete: bool) {
        self.borrow_mut().set_mobs_saved(count, complete);
    }
}

impl<T: Session> Session for Rc<RefCell<T>> {
    fn reset(&mut self) {
        self.borrow_mut().reset();
    }

    fn set_main_light(&mut self, fraction: f32) {
        self.borrow_mut().set_main_light(fraction);
    }
}
