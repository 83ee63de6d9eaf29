//! The autonomous pilot: a fixed-period poll-and-act loop over a [`Surface`].
//!
//! Each tick steps the press cycle, triggers the primary action, re-reads the
//! spendable total, lets the shop logic buy at most one upgrade, and claims
//! whatever loot and rewards are on screen. Every phase isolates its own
//! failures so one broken control cannot starve the rest of the tick.

pub mod extract;
pub mod press;
pub mod shop;

use std::time::{Duration, Instant};

use rand::rngs::ThreadRng;
use rand::thread_rng;
use tracing::{debug, info, warn};

use crate::pilot::press::{PressCycle, PressPhase};
use crate::surface::{Surface, Target};

/// Poll period of the decision loop, measured from schedule time.
pub const TICK_PERIOD: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

pub struct Pilot {
    press: PressCycle,
    run_state: RunState,
    launched_at: Instant,
    rng: ThreadRng,
}

impl Pilot {
    pub fn new() -> Self {
        Self {
            press: PressCycle::new(),
            run_state: RunState::Stopped,
            launched_at: Instant::now(),
            rng: thread_rng(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn press_phase(&self) -> PressPhase {
        self.press.phase()
    }

    /// Begin autonomous operation. Calling while already running is a logged
    /// no-op; the drive loop keys off [`Pilot::is_running`], so no second
    /// schedule can come into existence.
    pub fn start(&mut self) {
        if self.run_state == RunState::Running {
            info!("pilot is already running");
            return;
        }
        self.run_state = RunState::Running;
        info!("pilot started");
    }

    /// End autonomous operation: the drive loop winds down, the press cycle
    /// drops back to idle and its stall deadline is disarmed. Always reports
    /// session time, running or not.
    pub fn stop(&mut self) {
        if self.run_state == RunState::Stopped {
            info!("pilot is not running");
        } else {
            self.run_state = RunState::Stopped;
            self.press.reset();
            info!("pilot stopped");
        }
        self.report_elapsed_time();
    }

    /// Logs time since the pilot was created, independent of run state.
    pub fn report_elapsed_time(&self) {
        info!("session time: {}", format_elapsed(self.launched_at.elapsed()));
    }

    /// One poll-and-act cycle against `surface`. The scheduler gates calls on
    /// the run state; the body itself never propagates a failure.
    pub fn tick<S: Surface>(&mut self, surface: &mut S, now: Instant) {
        if let Err(err) = self.press.step(surface, now) {
            warn!(%err, "press cycle step failed");
        }

        if let Some(main_button) = surface.find_one(Target::MainAction) {
            if let Err(err) = surface.invoke(&main_button) {
                warn!(%err, "main action failed");
            }
        }

        self.shop_step(surface);

        if let Some(loot) = surface.find_one(Target::LootDrop) {
            if let Err(err) = surface.invoke(&loot) {
                warn!(%err, "loot claim failed");
            }
        }

        for claim in surface.find_all(Target::RewardClaim) {
            if let Err(err) = surface.invoke(&claim) {
                warn!(%err, "reward claim failed");
            }
        }
    }

    /// Reads the spendable total fresh, scans the offers on the board, and
    /// buys at most one of them.
    fn shop_step<S: Surface>(&mut self, surface: &mut S) {
        let Some(readout) = surface.find_one(Target::ResourceReadout) else {
            return;
        };
        let resources = match surface.text(&readout) {
            Ok(text) => extract::extract_number(&text),
            Err(err) => {
                warn!(%err, "resource readout unreadable");
                return;
            }
        };

        let offers = shop::scan_offers(surface);
        let Some(pick) = shop::choose(resources, &offers, &mut self.rng) else {
            return;
        };
        debug!(
            offer = pick.desc_text.as_deref().unwrap_or("(no description)"),
            "buying upgrade"
        );
        if let Err(err) = surface.invoke(&pick.handle) {
            warn!(%err, "upgrade purchase failed");
        }
    }
}

impl Default for Pilot {
    fn default() -> Self {
        Self::new()
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    let total_seconds = elapsed.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours}h {minutes}m {seconds}s")
}
