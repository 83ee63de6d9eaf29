//! In-memory stimulation arcade: the demo host the pilot plays against.
//! It stands in for a rendered page, exposing its controls through the
//! [`Surface`] trait and evolving in real time between ticks.

use std::time::Duration;

use rand::Rng;
use rand::rngs::ThreadRng;
use rand::thread_rng;
use tracing::{debug, info};

use crate::surface::{Surface, SurfaceError, Target};

const PRESS_HOLD: Duration = Duration::from_millis(600);
const PRESS_PAYOUT: f64 = 25.0;
const LOOT_INTERVAL: Duration = Duration::from_secs(9);
const REWARD_INTERVAL: Duration = Duration::from_secs(14);
const MAX_PENDING_REWARDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpgradeAction {
    PassiveYield,
    InstantPayout,
    DoubleNextPress,
}

struct CatalogEntry {
    name: &'static str,
    description: &'static str,
    cost: f64,
    unlock_at: f64,
    per_second: f64,
    payout: f64,
    action: UpgradeAction,
}

const CATALOG: [CatalogEntry; 6] = [
    CatalogEntry {
        name: "Free Sample",
        description: "A burst of complimentary stimulation, on the house.",
        cost: 0.0,
        unlock_at: 0.0,
        per_second: 0.0,
        payout: 12.0,
        action: UpgradeAction::InstantPayout,
    },
    CatalogEntry {
        name: "Finger Exercises",
        description: "Idle hands no more. +1 stimulation per second",
        cost: 15.0,
        unlock_at: 10.0,
        per_second: 1.0,
        payout: 0.0,
        action: UpgradeAction::PassiveYield,
    },
    CatalogEntry {
        name: "Bubble Wrap",
        description: "An endless sheet. +3 stimulation per second",
        cost: 60.0,
        unlock_at: 45.0,
        per_second: 3.0,
        payout: 0.0,
        action: UpgradeAction::PassiveYield,
    },
    CatalogEntry {
        name: "Sugar Rush",
        description: "Your next press pays double.",
        cost: 90.0,
        unlock_at: 80.0,
        per_second: 0.0,
        payout: 0.0,
        action: UpgradeAction::DoubleNextPress,
    },
    CatalogEntry {
        name: "Lava Lamp",
        description: "Hypnotic. +8 stimulation per second",
        cost: 240.0,
        unlock_at: 180.0,
        per_second: 8.0,
        payout: 0.0,
        action: UpgradeAction::PassiveYield,
    },
    CatalogEntry {
        name: "Disco Ball",
        description: "The whole room sparkles. +20 stimulation per second",
        cost: 900.0,
        unlock_at: 600.0,
        per_second: 20.0,
        payout: 0.0,
        action: UpgradeAction::PassiveYield,
    },
];

fn catalog() -> &'static [CatalogEntry] {
    &CATALOG
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressState {
    Ready,
    Holding { remaining: Duration },
}

#[derive(Debug, Clone, Copy)]
struct PendingReward {
    id: u64,
    amount: f64,
}

/// A handle to one on-screen control. Handles stay valid only as long as the
/// control they point at; a bought offer leaves its old handles detached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArcadeElement {
    PressStart,
    PressCollect,
    MainButton,
    StimReadout,
    Offer(usize),
    OfferCost(usize),
    OfferDescription(usize),
    LootBox,
    RewardClaim(u64),
}

pub struct Arcade {
    stimulation: f64,
    per_second: f64,
    purchased: [bool; CATALOG.len()],
    unlocked: [bool; CATALOG.len()],
    press: PressState,
    sugar_rush: bool,
    loot_timer: Duration,
    loot_ready: bool,
    reward_timer: Duration,
    rewards: Vec<PendingReward>,
    next_reward_id: u64,
    rng: ThreadRng,
}

impl Arcade {
    pub fn new() -> Self {
        let mut arcade = Self {
            stimulation: 0.0,
            per_second: 0.0,
            purchased: [false; CATALOG.len()],
            unlocked: [false; CATALOG.len()],
            press: PressState::Ready,
            sugar_rush: false,
            loot_timer: Duration::ZERO,
            loot_ready: false,
            reward_timer: Duration::ZERO,
            rewards: Vec::new(),
            next_reward_id: 0,
            rng: thread_rng(),
        };
        arcade.unlock_reached_upgrades();
        arcade
    }

    pub fn stimulation(&self) -> f64 {
        self.stimulation
    }

    pub fn per_second(&self) -> f64 {
        self.per_second
    }

    /// Moves the arcade forward by `delta` of wall-clock time: passive
    /// income, the press hold animation, loot and reward spawns, and upgrade
    /// unlocks.
    pub fn advance(&mut self, delta: Duration) {
        self.stimulation += self.per_second * delta.as_secs_f64();

        if let PressState::Holding { remaining } = self.press {
            self.press = PressState::Holding {
                remaining: remaining.saturating_sub(delta),
            };
        }

        self.loot_timer += delta;
        while self.loot_timer >= LOOT_INTERVAL {
            self.loot_timer -= LOOT_INTERVAL;
            if !self.loot_ready {
                self.loot_ready = true;
                debug!("a loot box drifts across the screen");
            }
        }

        self.reward_timer += delta;
        while self.reward_timer >= REWARD_INTERVAL {
            self.reward_timer -= REWARD_INTERVAL;
            self.spawn_reward();
        }

        self.unlock_reached_upgrades();
    }

    fn unlock_reached_upgrades(&mut self) {
        for (index, entry) in catalog().iter().enumerate() {
            if !self.unlocked[index] && self.stimulation >= entry.unlock_at {
                self.unlocked[index] = true;
                info!("new upgrade on offer: {}", entry.name);
            }
        }
    }

    fn spawn_reward(&mut self) {
        if self.rewards.len() >= MAX_PENDING_REWARDS {
            return;
        }
        self.next_reward_id += 1;
        let amount = f64::from(self.rng.gen_range(10u32..=40));
        self.rewards.push(PendingReward {
            id: self.next_reward_id,
            amount,
        });
        debug!(amount, "a reward is ready to claim");
    }

    fn offer_visible(&self, index: usize) -> bool {
        index < CATALOG.len() && self.unlocked[index] && !self.purchased[index]
    }

    fn visible_offers(&self) -> impl Iterator<Item = usize> + '_ {
        (0..CATALOG.len()).filter(|&index| self.offer_visible(index))
    }

    fn catalog_entry(&self, index: usize) -> Result<&'static CatalogEntry, SurfaceError> {
        if self.offer_visible(index) {
            catalog().get(index).ok_or(SurfaceError::Detached)
        } else {
            Err(SurfaceError::Detached)
        }
    }

    fn purchase(&mut self, index: usize) -> Result<(), SurfaceError> {
        let entry = self.catalog_entry(index)?;
        if entry.cost > self.stimulation {
            // An unaffordable button simply does nothing when clicked.
            debug!("cannot afford {}", entry.name);
            return Ok(());
        }
        self.stimulation -= entry.cost;
        self.purchased[index] = true;
        match entry.action {
            UpgradeAction::PassiveYield => self.per_second += entry.per_second,
            UpgradeAction::InstantPayout => self.stimulation += entry.payout,
            UpgradeAction::DoubleNextPress => self.sugar_rush = true,
        }
        info!(cost = entry.cost, "purchased {}", entry.name);
        Ok(())
    }
}

impl Default for Arcade {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for Arcade {
    type Element = ArcadeElement;

    fn find_one(&self, target: Target) -> Option<ArcadeElement> {
        match target {
            Target::PressStart => {
                matches!(self.press, PressState::Ready).then_some(ArcadeElement::PressStart)
            }
            Target::PressCollect => matches!(self.press, PressState::Holding { .. })
                .then_some(ArcadeElement::PressCollect),
            Target::MainAction => Some(ArcadeElement::MainButton),
            Target::ResourceReadout => Some(ArcadeElement::StimReadout),
            Target::LootDrop => self.loot_ready.then_some(ArcadeElement::LootBox),
            Target::Offer => self.visible_offers().next().map(ArcadeElement::Offer),
            Target::RewardClaim => self
                .rewards
                .first()
                .map(|reward| ArcadeElement::RewardClaim(reward.id)),
            Target::OfferCost | Target::OfferDescription => None,
        }
    }

    fn find_all(&self, target: Target) -> Vec<ArcadeElement> {
        match target {
            Target::Offer => self.visible_offers().map(ArcadeElement::Offer).collect(),
            Target::RewardClaim => self
                .rewards
                .iter()
                .map(|reward| ArcadeElement::RewardClaim(reward.id))
                .collect(),
            other => self.find_one(other).into_iter().collect(),
        }
    }

    fn find_in(&self, scope: &ArcadeElement, target: Target) -> Option<ArcadeElement> {
        let ArcadeElement::Offer(index) = scope else {
            return None;
        };
        if !self.offer_visible(*index) {
            return None;
        }
        match target {
            Target::OfferCost => Some(ArcadeElement::OfferCost(*index)),
            Target::OfferDescription => Some(ArcadeElement::OfferDescription(*index)),
            _ => None,
        }
    }

    fn is_hidden_or_disabled(&self, element: &ArcadeElement) -> bool {
        match element {
            // The collect button exists the moment a press starts but stays
            // hidden until the hold animation has run its course.
            ArcadeElement::PressCollect => {
                !matches!(self.press, PressState::Holding { remaining } if remaining.is_zero())
            }
            _ => false,
        }
    }

    fn text(&self, element: &ArcadeElement) -> Result<String, SurfaceError> {
        match element {
            ArcadeElement::StimReadout => {
                Ok(format!("{} stimulation", self.stimulation.floor() as u64))
            }
            ArcadeElement::Offer(index) => Ok(self.catalog_entry(*index)?.name.to_string()),
            ArcadeElement::OfferCost(index) => {
                Ok(format!("Cost: {}", self.catalog_entry(*index)?.cost as u64))
            }
            ArcadeElement::OfferDescription(index) => {
                Ok(self.catalog_entry(*index)?.description.to_string())
            }
            ArcadeElement::MainButton => Ok("+1".to_string()),
            ArcadeElement::PressStart => Ok("PRESS".to_string()),
            ArcadeElement::PressCollect => Ok("collect".to_string()),
            ArcadeElement::LootBox | ArcadeElement::RewardClaim(_) => Ok("claim".to_string()),
        }
    }

    fn invoke(&mut self, element: &ArcadeElement) -> Result<(), SurfaceError> {
        match element {
            ArcadeElement::MainButton => {
                self.stimulation += 1.0;
                Ok(())
            }
            ArcadeElement::PressStart => {
                if !matches!(self.press, PressState::Ready) {
                    return Err(SurfaceError::Rejected);
                }
                self.press = PressState::Holding {
                    remaining: PRESS_HOLD,
                };
                Ok(())
            }
            ArcadeElement::PressCollect => match self.press {
                PressState::Holding { remaining } if remaining.is_zero() => {
                    let mut payout = PRESS_PAYOUT;
                    if self.sugar_rush {
                        payout *= 2.0;
                        self.sugar_rush = false;
                    }
                    self.stimulation += payout;
                    self.press = PressState::Ready;
                    info!(payout, "press payout collected");
                    Ok(())
                }
                _ => Err(SurfaceError::Rejected),
            },
            ArcadeElement::Offer(index) => self.purchase(*index),
            ArcadeElement::LootBox => {
                if !self.loot_ready {
                    return Err(SurfaceError::Detached);
                }
                self.loot_ready = false;
                let amount = f64::from(self.rng.gen_range(5u32..=30));
                self.stimulation += amount;
                info!(amount, "loot box opened");
                Ok(())
            }
            ArcadeElement::RewardClaim(id) => {
                let position = self
                    .rewards
                    .iter()
                    .position(|reward| reward.id == *id)
                    .ok_or(SurfaceError::Detached)?;
                let reward = self.rewards.remove(position);
                self.stimulation += reward.amount;
                info!(amount = reward.amount, "reward claimed");
                Ok(())
            }
            ArcadeElement::StimReadout
            | ArcadeElement::OfferCost(_)
            | ArcadeElement::OfferDescription(_) => Err(SurfaceError::Rejected),
        }
    }
}
