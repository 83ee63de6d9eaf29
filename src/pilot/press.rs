use std::time::{Duration, Instant};

use tracing::warn;

use crate::surface::{Surface, SurfaceError, Target};

/// How long a started press may wait for its collection control before the
/// cycle is forced back to idle.
pub const COLLECT_TIMEOUT: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressPhase {
    Idle,
    AwaitingCollection,
}

/// The two-step press interaction: activate the press control, then claim the
/// payout once the collection control shows up. A transient absence of the
/// collection control (an animation, a slow host) must not wedge the cycle,
/// so activation arms a wall-clock stall deadline.
#[derive(Debug)]
pub struct PressCycle {
    phase: PressPhase,
    collect_deadline: Option<Instant>,
}

impl PressCycle {
    pub fn new() -> Self {
        Self {
            phase: PressPhase::Idle,
            collect_deadline: None,
        }
    }

    pub fn phase(&self) -> PressPhase {
        self.phase
    }

    /// One step per tick. Runs before every other phase of the tick; the
    /// caller treats a failure here as a warning and carries on.
    pub fn step<S: Surface>(&mut self, surface: &mut S, now: Instant) -> Result<(), SurfaceError> {
        match self.phase {
            PressPhase::AwaitingCollection => {
                if self.collect_deadline.is_some_and(|deadline| now >= deadline) {
                    warn!("collection control never appeared in time; resetting press cycle");
                    self.reset();
                    return Ok(());
                }
                let Some(collect) = surface.find_one(Target::PressCollect) else {
                    return Ok(());
                };
                if surface.is_hidden_or_disabled(&collect) {
                    return Ok(());
                }
                surface.invoke(&collect)?;
                self.reset();
            }
            PressPhase::Idle => {
                let Some(start) = surface.find_one(Target::PressStart) else {
                    return Ok(());
                };
                surface.invoke(&start)?;
                self.phase = PressPhase::AwaitingCollection;
                self.collect_deadline = Some(now + COLLECT_TIMEOUT);
            }
        }
        Ok(())
    }

    /// Back to idle with no deadline armed. Used on collection, on stall
    /// expiry, and when the scheduler stops.
    pub fn reset(&mut self) {
        self.phase = PressPhase::Idle;
        self.collect_deadline = None;
    }
}

impl Default for PressCycle {
    fn default() -> Self {
        Self::new()
    }
}
