//! Agent Core headless runner
//!
//! Drives one agent with the seeded demo pilot on a fixed timestep until it
//! is defeated or the time limit runs out.
//!
//! Usage: `agent-core [config.json] [seed]`
//!
//! `AGENT_SPRINT_RULE` (`held` or `grounded`) overrides the config's sprint rule.

use std::cell::RefCell;
use std::rc::Rc;

use agent_core::consts::{MAX_SUBSTEPS, SIM_DT};
use agent_core::headless::{DemoPilot, FlatGround, LogHud, LogPresentation, LogSession};
use agent_core::sim::{AgentBuilder, AgentEvent, InputSource, tick};
use agent_core::{AgentConfig, AgentError, SprintRule};

/// Simulated seconds before the demo stops on its own
const RUN_SECS: f32 = 120.0;
/// Host frame time fed into the accumulator
const FRAME_DT: f32 = 1.0 / 50.0;
/// Environment override for the sprint rule
const SPRINT_RULE_VAR: &str = "AGENT_SPRINT_RULE";

fn main() {
    env_logger::init();
    log::info!("Agent Core (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AgentError> {
    let mut args = std::env::args().skip(1);
    let mut config = match args.next() {
        Some(path) => AgentConfig::load(path)?,
        None => {
            log::info!("No config given, using defaults");
            AgentConfig::default()
        }
    };
    if let Ok(value) = std::env::var(SPRINT_RULE_VAR) {
        match SprintRule::from_str(&value) {
            Some(rule) => {
                log::info!("Sprint rule override: {}", rule.as_str());
                config.sprint_rule = rule;
            }
            None => log::warn!("Ignoring unknown {}={:?}", SPRINT_RULE_VAR, value),
        }
    }
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);

    let ground = Rc::new(RefCell::new(FlatGround::new(0.0)));
    let hud = Rc::new(RefCell::new(LogHud::default()));
    let session = Rc::new(RefCell::new(LogSession::default()));

    let mut agent = AgentBuilder::new(config)
        .mover(ground.clone())
        .presentation(LogPresentation::default())
        .hud(hud.clone())
        .session(session.clone())
        .progress_totals(5, 3)
        .build()?;
    let mut pilot = DemoPilot::new(seed);
    log::info!("Running with seed: {}", seed);

    let mut accumulator = 0.0;
    let mut elapsed = 0.0;
    while elapsed < RUN_SECS && session.borrow().resets == 0 {
        accumulator += FRAME_DT;
        elapsed += FRAME_DT;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = pilot.poll();
            tick(&mut agent, &input, SIM_DT);
            if let Some(contact) = pilot.contact() {
                agent.on_contact(contact);
            }
            accumulator -= SIM_DT;
            substeps += 1;
        }

        for event in agent.drain_events() {
            match event {
                AgentEvent::ResourceSettled { value } => {
                    log::debug!("Resource {:.2}", value)
                }
                AgentEvent::Damaged { amount, health } => {
                    log::info!("Took {} damage, health {}", amount, health)
                }
                other => log::debug!("{:?}", other),
            }
        }
    }

    let position = ground.borrow().position;
    log::info!(
        "Finished at t={:.2}: health={}, resource={:.2} ({:.2} shown), position=({:.1}, {:.1}, {:.1})",
        agent.now(),
        agent.health(),
        agent.resource(),
        hud.borrow().resource_fill,
        position.x,
        position.y,
        position.z
    );
    Ok(())
}
