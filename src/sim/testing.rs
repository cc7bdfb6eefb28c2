//! Recording collaborators for unit tests

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use super::agent::{Agent, AgentBuilder};
use super::color::Color;
use super::ports::{Hud, Mover, Presentation, Session};
use crate::settings::AgentConfig;

#[derive(Debug, Default)]
pub struct ScriptedMover {
    pub grounded: bool,
    pub moves: Vec<Vec3>,
}

impl Mover for ScriptedMover {
    fn move_by(&mut self, displacement: Vec3) {
        self.moves.push(displacement);
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }
}

#[derive(Debug, Default)]
pub struct RecordingPresentation {
    pub hits: u32,
    pub defeats: u32,
    pub shots: u32,
    pub item_collects: u32,
    pub tints: Vec<Color>,
    pub shoot_range: Option<(Color, Color)>,
    pub sprinting: Option<bool>,
    pub cursor_locked: Option<bool>,
}

impl Presentation for RecordingPresentation {
    fn play_hit_reaction(&mut self) {
        self.hits += 1;
    }

    fn play_defeat_reaction(&mut self) {
        self.defeats += 1;
    }

    fn play_shoot_effect(&mut self) {
        self.shots += 1;
    }

    fn set_tint(&mut self, color: Color) {
        self.tints.push(color);
    }

    fn set_shoot_color_range(&mut self, low: Color, high: Color) {
        self.shoot_range = Some((low, high));
    }

    fn set_sprinting(&mut self, sprinting: bool) {
        self.sprinting = Some(sprinting);
    }

    fn set_cursor_locked(&mut self, locked: bool) {
        self.cursor_locked = Some(locked);
    }

    fn play_item_collect(&mut self) {
        self.item_collects += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordingHud {
    pub health_fill: Option<f32>,
    pub resource_fill: Option<f32>,
    pub resource_color: Option<Color>,
    pub items: Option<(u32, bool)>,
    pub mobs: Option<(u32, bool)>,
}

impl Hud for RecordingHud {
    fn set_health_fill(&mut self, fraction: f32) {
        self.health_fill = Some(fraction);
    }

    fn set_resource_fill(&mut self, fraction: f32) {
        self.resource_fill = Some(fraction);
    }

    fn set_resource_color(&mut self, color: Color) {
        self.resource_color = Some(color);
    }

    fn set_items_collected(&mut self, count: u32, complete: bool) {
        self.items = Some((count, complete));
    }

    fn set_mobs_saved(&mut self, count: u32, complete: bool) {
        self.mobs = Some((count, complete));
    }
}

#[derive(Debug, Default)]
pub struct RecordingSession {
    pub resets: u32,
    pub light: Option<f32>,
}

impl Session for RecordingSession {
    fn reset(&mut self) {
        self.resets += 1;
    }

    fn set_main_light(&mut self, fraction: f32) {
        self.light = Some(fraction);
    }
}

/// An agent wired to recording collaborators, with handles kept for inspection
pub struct Harness {
    pub agent: Agent,
    pub mover: Rc<RefCell<ScriptedMover>>,
    pub presentation: Rc<RefCell<RecordingPresentation>>,
    pub hud: Rc<RefCell<RecordingHud>>,
    pub session: Rc<RefCell<RecordingSession>>,
}

impl Harness {
    pub fn new(config: AgentConfig) -> Self {
        let mover = Rc::new(RefCell::new(ScriptedMover {
            grounded: true,
            ..Default::default()
        }));
        let presentation = Rc::new(RefCell::new(RecordingPresentation::default()));
        let hud = Rc::new(RefCell::new(RecordingHud::default()));
        let session = Rc::new(RefCell::new(RecordingSession::default()));

        let agent = AgentBuilder::new(config)
            .mover(mover.clone())
            .presentation(presentation.clone())
            .hud(hud.clone())
            .session(session.clone())
            .build()
            .expect("valid test agent");

        Self {
            agent,
            mover,
            presentation,
            hud,
            session,
        }
    }

    pub fn with_max_health(max_health: u32) -> Self {
        Self::new(AgentConfig {
            max_health,
            ..Default::default()
        })
    }
}
