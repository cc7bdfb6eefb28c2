//! The agent: state plus injected collaborators
//!
//! Damage, shooting, color and progress operations live here as named
//! methods with explicit results. The per-frame scheduler is in `tick`.

use super::color::Color;
use super::ports::{Hud, Mover, Presentation, Session};
use super::state::{
    AgentEvent, AgentPhase, AgentState, ContactKind, DamageOutcome, IgnoreReason, ProgressCounters,
    ShootOutcome,
};
use super::tint::shoot_color_range;
use crate::consts::{MAX_PENDING_EVENTS, SHOOT_COLOR_SPREAD};
use crate::error::AgentError;
use crate::settings::AgentConfig;

/// A controllable agent wired to its collaborators
pub struct Agent {
    pub(crate) config: AgentConfig,
    pub(crate) state: AgentState,
    pub(crate) mover: Box<dyn Mover>,
    pub(crate) presentation: Box<dyn Presentation>,
    pub(crate) hud: Box<dyn Hud>,
    pub(crate) session: Box<dyn Session>,
    /// Bounded by `MAX_PENDING_EVENTS`; the host drains it once per frame
    pub(crate) events: Vec<AgentEvent>,
    dropped_events: usize,
}

/// Collects collaborators and validates the config before creating an [`Agent`]
pub struct AgentBuilder {
    config: AgentConfig,
    progress: ProgressCounters,
    mover: Option<Box<dyn Mover>>,
    presentation: Option<Box<dyn Presentation>>,
    hud: Option<Box<dyn Hud>>,
    session: Option<Box<dyn Session>>,
}

impl AgentBuilder {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            progress: ProgressCounters::default(),
            mover: None,
            presentation: None,
            hud: None,
            session: None,
        }
    }

    pub fn mover(mut self, mover: impl Mover + 'static) -> Self {
        self.mover = Some(Box::new(mover));
        self
    }

    pub fn presentation(mut self, presentation: impl Presentation + 'static) -> Self {
        self.presentation = Some(Box::new(presentation));
        self
    }

    pub fn hud(mut self, hud: impl Hud + 'static) -> Self {
        self.hud = Some(Box::new(hud));
        self
    }

    pub fn session(mut self, session: impl Session + 'static) -> Self {
        self.session = Some(Box::new(session));
        self
    }

    /// Level totals for the progress counters
    pub fn progress_totals(mut self, items_total: u32, mobs_total: u32) -> Self {
        self.progress = ProgressCounters::new(items_total, mobs_total);
        self
    }

    /// Validate and assemble the agent at t = 0.
    ///
    /// Writes the initial HUD and tint, and issues the first regeneration
    /// increment.
    pub fn build(self) -> Result<Agent, AgentError> {
        self.config.validate()?;
        let mover = self.mover.ok_or(AgentError::MissingCollaborator("mover"))?;
        let presentation = self
            .presentation
            .ok_or(AgentError::MissingCollaborator("presentation"))?;
        let hud = self.hud.ok_or(AgentError::MissingCollaborator("hud"))?;
        let session = self
            .session
            .ok_or(AgentError::MissingCollaborator("session"))?;

        let mut state = AgentState::new(&self.config);
        state.progress = self.progress;

        let mut agent = Agent {
            config: self.config,
            state,
            mover,
            presentation,
            hud,
            session,
            events: Vec::new(),
            dropped_events: 0,
        };

        let max = agent.state.health.max();
        agent.state.health.set(i64::from(max), &mut *agent.hud);
        agent.presentation.set_tint(agent.state.tint.current());
        agent.presentation.set_cursor_locked(agent.state.aiming);
        agent.state.resource.step_regen(0.0, &agent.config);
        agent.sync_resource_hud();

        log::info!(
            "Agent ready: max_health={}, sprint_rule={}",
            max,
            agent.config.sprint_rule.as_str()
        );
        Ok(agent)
    }
}

impl Agent {
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    /// Sim time in seconds
    pub fn now(&self) -> f64 {
        self.state.now
    }

    pub fn phase(&self) -> AgentPhase {
        self.state.phase
    }

    pub fn health(&self) -> u32 {
        self.state.health.current()
    }

    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    pub fn is_invulnerable(&self) -> bool {
        self.state.is_invulnerable(self.config.invulnerability)
    }

    /// Resource level the bar currently shows
    pub fn resource(&self) -> f32 {
        self.state.resource.value()
    }

    /// Committed resource level: the pending target, or the shown level when settled
    pub fn resource_level(&self) -> f32 {
        self.state.resource.level()
    }

    /// Pending resource target, if a transition is in flight
    pub fn resource_target(&self) -> Option<f32> {
        self.state.resource.target()
    }

    pub fn resource_color(&self) -> Color {
        self.state.resource.shown_color(&self.config)
    }

    pub fn yaw(&self) -> f32 {
        self.state.locomotion.yaw
    }

    pub fn is_aiming(&self) -> bool {
        self.state.aiming
    }

    pub fn tint(&self) -> Color {
        self.state.tint.current()
    }

    pub fn progress(&self) -> &ProgressCounters {
        &self.state.progress
    }

    /// Take the events recorded since the last drain.
    ///
    /// Hosts should call this every frame. At most `MAX_PENDING_EVENTS` are
    /// buffered; beyond that the oldest are discarded.
    pub fn drain_events(&mut self) -> Vec<AgentEvent> {
        if self.dropped_events > 0 {
            log::warn!(
                "{} agent events dropped since the last drain",
                self.dropped_events
            );
            self.dropped_events = 0;
        }
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: AgentEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
            self.dropped_events += 1;
        }
        self.events.push(event);
    }

    /// Set health (clamped) and update the health bar. Reaching zero defeats the agent.
    /// Ignored once defeated.
    pub fn set_health(&mut self, value: i64) -> u32 {
        if self.state.phase == AgentPhase::Defeated {
            log::debug!("Health write {} ignored (defeated)", value);
            return self.state.health.current();
        }
        let health = self.state.health.set(value, &mut *self.hud);
        if health == 0 && self.state.phase == AgentPhase::Alive {
            self.defeat();
        }
        health
    }

    /// Apply damage at the current sim time
    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.state.phase == AgentPhase::Defeated {
            return DamageOutcome::Ignored(IgnoreReason::Defeated);
        }
        if self.is_invulnerable() {
            log::debug!("Damage {} ignored (invulnerable) at t={:.3}", amount, self.state.now);
            return DamageOutcome::Ignored(IgnoreReason::Invulnerable);
        }

        self.state.last_damage_time = Some(self.state.now);
        let remaining = i64::from(self.state.health.current()) - i64::from(amount);
        let health = self.state.health.set(remaining, &mut *self.hud);
        self.push_event(AgentEvent::Damaged { amount, health });

        if health == 0 {
            self.defeat();
            DamageOutcome::Defeated
        } else {
            self.presentation.play_hit_reaction();
            DamageOutcome::Hit { health }
        }
    }

    fn defeat(&mut self) {
        self.state.phase = AgentPhase::Defeated;
        log::info!("Agent defeated at t={:.3}", self.state.now);
        self.presentation.play_defeat_reaction();
        self.session.reset();
        self.push_event(AgentEvent::Defeated);
    }

    /// Collision callback from the mover. Hazards deal the configured damage.
    pub fn on_contact(&mut self, kind: ContactKind) -> Option<DamageOutcome> {
        match kind {
            ContactKind::Hazard => Some(self.apply_damage(self.config.hazard_damage)),
            ContactKind::Neutral => None,
        }
    }

    /// Start a gradual transition of the resource toward `value` (clamped). Returns the target.
    pub fn set_resource_target(&mut self, value: f32) -> f32 {
        self.state
            .resource
            .set_target(value, self.state.now, &self.config)
    }

    /// Fire if aiming and the committed resource is above the threshold, otherwise flash the bar
    pub fn try_shoot(&mut self) -> ShootOutcome {
        if !self.is_alive() {
            return ShootOutcome::Dead;
        }
        if !self.state.aiming {
            return ShootOutcome::NotAiming;
        }

        let level = self.resource_level();
        if level > self.config.low_threshold {
            self.presentation.play_shoot_effect();
            let resource_target = self.set_resource_target(level - self.config.shoot_cost);
            self.push_event(AgentEvent::Fired);
            ShootOutcome::Fired { resource_target }
        } else {
            let flash_started = self
                .state
                .resource
                .start_flash(self.state.now, &self.config);
            if flash_started {
                self.push_event(AgentEvent::ResourceInsufficient);
                self.sync_resource_hud();
            }
            ShootOutcome::Insufficient { flash_started }
        }
    }

    /// Flip aiming mode (cursor lock)
    pub fn toggle_aim(&mut self) -> bool {
        self.state.aiming = !self.state.aiming;
        self.presentation.set_cursor_locked(self.state.aiming);
        self.push_event(AgentEvent::AimToggled {
            aiming: self.state.aiming,
        });
        self.state.aiming
    }

    /// Fade the body tint toward `color`
    pub fn set_color(&mut self, color: Color) {
        self.state
            .tint
            .set(color, self.state.now, self.config.tint_secs);
    }

    /// Center the shot particle colors on `color`
    pub fn set_shoot_color(&mut self, color: Color) {
        let (low, high) = shoot_color_range(color, SHOOT_COLOR_SPREAD);
        self.presentation.set_shoot_color_range(low, high);
    }

    /// Advance to the next configured color mode. Returns the new index.
    pub fn cycle_color_mode(&mut self) -> Option<usize> {
        let count = self.config.color_modes.len();
        if count == 0 {
            return None;
        }
        let index = (self.state.tint.mode_index + 1) % count;
        let color = self.config.color_modes[index];
        self.state.tint.mode_index = index;
        self.set_color(color);
        self.set_shoot_color(color);
        self.push_event(AgentEvent::ColorModeChanged { index });
        Some(index)
    }

    pub fn collect_item(&mut self) -> u32 {
        let progress = &mut self.state.progress;
        progress.items_collected += 1;
        let count = progress.items_collected;
        let complete = progress.items_complete();
        self.presentation.play_item_collect();
        self.hud.set_items_collected(count, complete);
        self.push_event(AgentEvent::ItemCollected { count });
        if complete {
            log::info!("All {} items collected", count);
        }
        count
    }

    pub fn save_mob(&mut self) -> u32 {
        let progress = &mut self.state.progress;
        progress.mobs_saved += 1;
        let count = progress.mobs_saved;
        let complete = progress.mobs_complete();
        let fraction = progress.mobs_fraction();
        self.hud.set_mobs_saved(count, complete);
        self.session.set_main_light(fraction);
        self.push_event(AgentEvent::MobSaved { count });
        count
    }

    /// Push the resource bar's value and color to the HUD
    pub(crate) fn sync_resource_hud(&mut self) {
        let resource = &self.state.resource;
        self.hud.set_resource_fill(resource.value());
        self.hud
            .set_resource_color(resource.shown_color(&self.config));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::testing::{Harness, RecordingHud, RecordingSession, ScriptedMover};
    use crate::sim::tick::{TickInput, tick};

    fn advance(h: &mut Harness, secs: f32) {
        tick(&mut h.agent, &TickInput::default(), secs);
    }

    #[test]
    fn test_build_initial_state() {
        let h = Harness::with_max_health(5);
        assert_eq!(h.agent.health(), 5);
        assert_eq!(h.agent.resource(), 0.0);
        assert_eq!(h.agent.resource_target(), Some(0.05));
        assert_eq!(h.hud.borrow().health_fill, Some(1.0));
        assert_eq!(h.hud.borrow().resource_fill, Some(0.0));
        assert_eq!(h.presentation.borrow().tints, vec![Color::GRAY]);
        assert_eq!(h.presentation.borrow().cursor_locked, Some(true));
    }

    #[test]
    fn test_build_rejects_bad_config() {
        let result = AgentBuilder::new(AgentConfig {
            max_health: 0,
            ..Default::default()
        })
        .mover(ScriptedMover::default())
        .presentation(crate::sim::testing::RecordingPresentation::default())
        .hud(RecordingHud::default())
        .session(RecordingSession::default())
        .build();
        assert!(matches!(result, Err(AgentError::Config(_))));
    }

    #[test]
    fn test_build_requires_collaborators() {
        let result = AgentBuilder::new(AgentConfig::default())
            .mover(ScriptedMover::default())
            .session(RecordingSession::default())
            .build();
        assert!(matches!(
            result,
            Err(AgentError::MissingCollaborator("presentation"))
        ));

        let result = AgentBuilder::new(AgentConfig::default())
            .presentation(crate::sim::testing::RecordingPresentation::default())
            .hud(RecordingHud::default())
            .session(RecordingSession::default())
            .build();
        assert!(matches!(result, Err(AgentError::MissingCollaborator("mover"))));
    }

    #[test]
    fn test_damage_then_invulnerable() {
        let mut h = Harness::new(AgentConfig {
            invulnerability: 1.5,
            ..Default::default()
        });
        assert_eq!(h.agent.apply_damage(1), DamageOutcome::Hit { health: 4 });
        advance(&mut h, 0.01);
        assert_eq!(
            h.agent.apply_damage(1),
            DamageOutcome::Ignored(IgnoreReason::Invulnerable)
        );
        assert_eq!(h.agent.health(), 4);
        assert_eq!(h.presentation.borrow().hits, 1);
    }

    #[test]
    fn test_end_to_end_defeat() {
        let mut h = Harness::with_max_health(5);

        assert_eq!(h.agent.apply_damage(2), DamageOutcome::Hit { health: 3 });
        assert_eq!(h.hud.borrow().health_fill, Some(0.6));

        advance(&mut h, 0.5);
        assert_eq!(
            h.agent.apply_damage(2),
            DamageOutcome::Ignored(IgnoreReason::Invulnerable)
        );
        assert_eq!(h.agent.health(), 3);

        advance(&mut h, 1.5);
        assert_eq!(h.agent.now(), 2.0);
        assert_eq!(h.agent.apply_damage(3), DamageOutcome::Defeated);
        assert_eq!(h.agent.health(), 0);
        assert!(!h.agent.is_alive());
        assert_eq!(h.agent.phase(), AgentPhase::Defeated);
        assert_eq!(h.session.borrow().resets, 1);
        assert_eq!(h.presentation.borrow().defeats, 1);
        assert_eq!(h.hud.borrow().health_fill, Some(0.0));

        advance(&mut h, 5.0);
        assert_eq!(
            h.agent.apply_damage(1),
            DamageOutcome::Ignored(IgnoreReason::Defeated)
        );
        assert_eq!(h.session.borrow().resets, 1);
    }

    #[test]
    fn test_overkill_clamps_to_zero() {
        let mut h = Harness::with_max_health(3);
        assert_eq!(h.agent.apply_damage(10), DamageOutcome::Defeated);
        assert_eq!(h.agent.health(), 0);
    }

    #[test]
    fn test_set_health_clamps_and_defeats() {
        let mut h = Harness::with_max_health(4);
        assert_eq!(h.agent.set_health(9), 4);
        assert_eq!(h.agent.set_health(1), 1);
        assert_eq!(h.hud.borrow().health_fill, Some(0.25));
        assert_eq!(h.agent.set_health(-2), 0);
        assert_eq!(h.session.borrow().resets, 1);
        h.agent.set_health(0);
        assert_eq!(h.session.borrow().resets, 1);
    }

    #[test]
    fn test_set_health_after_defeat_is_ignored() {
        let mut h = Harness::with_max_health(5);
        assert_eq!(h.agent.apply_damage(100), DamageOutcome::Defeated);
        assert_eq!(h.agent.set_health(3), 0);
        assert_eq!(h.agent.health(), 0);
        assert!(!h.agent.is_alive());
        assert_eq!(h.agent.phase(), AgentPhase::Defeated);
        assert_eq!(h.hud.borrow().health_fill, Some(0.0));
        assert_eq!(h.agent.try_shoot(), ShootOutcome::Dead);
    }

    #[test]
    fn test_hazard_contact() {
        let mut h = Harness::with_max_health(5);
        assert_eq!(h.agent.on_contact(ContactKind::Neutral), None);
        assert_eq!(
            h.agent.on_contact(ContactKind::Hazard),
            Some(DamageOutcome::Hit { health: 4 })
        );
    }

    #[test]
    fn test_shoot_requires_resource() {
        let mut h = Harness::new(AgentConfig::default());
        let outcome = h.agent.try_shoot();
        assert_eq!(outcome, ShootOutcome::Insufficient { flash_started: true });
        assert_eq!(h.presentation.borrow().shots, 0);
        assert_eq!(h.hud.borrow().resource_color, Some(Color::RED));

        let outcome = h.agent.try_shoot();
        assert_eq!(outcome, ShootOutcome::Insufficient { flash_started: false });
    }

    #[test]
    fn test_shoot_debits_resource() {
        let mut h = Harness::new(AgentConfig::default());
        h.agent.set_resource_target(1.0);
        advance(&mut h, 0.5);
        assert_eq!(h.agent.resource(), 1.0);

        match h.agent.try_shoot() {
            ShootOutcome::Fired { resource_target } => {
                assert!((resource_target - 0.6).abs() < 1e-6)
            }
            other => panic!("expected shot, got {:?}", other),
        }
        assert_eq!(h.presentation.borrow().shots, 1);

        advance(&mut h, 0.5);
        assert!((h.agent.resource() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_second_shot_pays_full_cost_mid_fade() {
        let mut h = Harness::new(AgentConfig::default());
        h.agent.set_resource_target(1.0);
        advance(&mut h, 0.5);

        h.agent.try_shoot();
        advance(&mut h, 0.1);
        assert!(h.agent.resource() > 0.6);
        match h.agent.try_shoot() {
            ShootOutcome::Fired { resource_target } => {
                assert!((resource_target - 0.2).abs() < 1e-6)
            }
            other => panic!("expected shot, got {:?}", other),
        }
        // Committed level is now below the threshold even though the bar still shows more
        assert!(h.agent.resource() > h.agent.config().low_threshold);
        assert!(matches!(
            h.agent.try_shoot(),
            ShootOutcome::Insufficient { .. }
        ));
        assert_eq!(h.presentation.borrow().shots, 2);

        advance(&mut h, 0.5);
        assert!((h.agent.resource() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_shoot_at_threshold_is_insufficient() {
        let mut h = Harness::new(AgentConfig::default());
        h.agent.set_resource_target(0.4);
        advance(&mut h, 0.5);
        assert!(matches!(
            h.agent.try_shoot(),
            ShootOutcome::Insufficient { .. }
        ));
    }

    #[test]
    fn test_shoot_not_aiming_or_dead() {
        let mut h = Harness::new(AgentConfig::default());
        h.agent.set_resource_target(1.0);
        advance(&mut h, 0.5);

        assert!(!h.agent.toggle_aim());
        assert_eq!(h.presentation.borrow().cursor_locked, Some(false));
        assert_eq!(h.agent.try_shoot(), ShootOutcome::NotAiming);

        h.agent.toggle_aim();
        h.agent.apply_damage(100);
        assert_eq!(h.agent.try_shoot(), ShootOutcome::Dead);
        assert_eq!(h.presentation.borrow().shots, 0);
    }

    #[test]
    fn test_color_mode_cycle() {
        let mut h = Harness::new(AgentConfig::default());
        let modes = h.agent.config().color_modes.clone();
        assert_eq!(h.agent.cycle_color_mode(), Some(1));
        let (low, high) = h.presentation.borrow().shoot_range.unwrap();
        assert!((low.r - (modes[1].r - SHOOT_COLOR_SPREAD)).abs() < 1e-6);
        assert!((high.g - (modes[1].g + SHOOT_COLOR_SPREAD)).abs() < 1e-6);

        advance(&mut h, 1.0);
        assert_eq!(h.agent.tint(), modes[1]);
        assert_eq!(h.presentation.borrow().tints.last(), Some(&modes[1]));

        h.agent.cycle_color_mode();
        assert_eq!(h.agent.cycle_color_mode(), Some(0));
    }

    #[test]
    fn test_progress_forwarders() {
        let mut h = Harness::new(AgentConfig::default());
        h.agent.state.progress = ProgressCounters::new(2, 4);

        h.agent.collect_item();
        assert_eq!(h.hud.borrow().items, Some((1, false)));
        assert_eq!(h.agent.collect_item(), 2);
        assert_eq!(h.hud.borrow().items, Some((2, true)));
        assert_eq!(h.presentation.borrow().item_collects, 2);

        h.agent.save_mob();
        assert_eq!(h.hud.borrow().mobs, Some((1, false)));
        assert_eq!(h.session.borrow().light, Some(0.25));
    }

    #[test]
    fn test_events_drained() {
        let mut h = Harness::with_max_health(5);
        h.agent.apply_damage(1);
        let events = h.agent.drain_events();
        assert_eq!(events, vec![AgentEvent::Damaged { amount: 1, health: 4 }]);
        assert!(h.agent.drain_events().is_empty());
    }

    #[test]
    fn test_event_buffer_is_bounded() {
        let mut h = Harness::new(AgentConfig::default());
        let toggles = MAX_PENDING_EVENTS + 10;
        for _ in 0..toggles {
            h.agent.toggle_aim();
        }
        assert_eq!(h.agent.dropped_events, 10);

        let events = h.agent.drain_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        // Oldest dropped: the eleventh toggle is the first one kept
        assert_eq!(events[0], AgentEvent::AimToggled { aiming: false });
        assert_eq!(
            events.last(),
            Some(&AgentEvent::AimToggled { aiming: h.agent.is_aiming() })
        );
        assert_eq!(h.agent.dropped_events, 0);
    }
}
