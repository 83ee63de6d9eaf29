//! The seam between the pilot and whatever renders the game. The pilot only
//! ever locates controls, reads their text, and invokes them; everything else
//! about the presentation layer is the host's business.

use thiserror::Error;

/// Interface controls the pilot knows how to locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Begins the press/hold interaction.
    PressStart,
    /// Finalizes a press and claims its payout; only meaningful after a press
    /// has started, and may be rendered hidden while the hold animates.
    PressCollect,
    /// The always-clickable primary button.
    MainAction,
    /// The element whose text carries the current spendable total.
    ResourceReadout,
    /// One purchasable upgrade.
    Offer,
    /// The cost field inside an offer.
    OfferCost,
    /// The description field inside an offer.
    OfferDescription,
    /// A transient loot drop.
    LootDrop,
    /// A claimable reward.
    RewardClaim,
}

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("element is no longer attached to the interface")]
    Detached,
    #[error("the interface rejected the action")]
    Rejected,
}

pub trait Surface {
    type Element: Clone;

    fn find_one(&self, target: Target) -> Option<Self::Element>;
    fn find_all(&self, target: Target) -> Vec<Self::Element>;
    /// Child lookup scoped to `scope`; used to reach an offer's cost and
    /// description fields.
    fn find_in(&self, scope: &Self::Element, target: Target) -> Option<Self::Element>;
    fn is_hidden_or_disabled(&self, element: &Self::Element) -> bool;
    fn text(&self, element: &Self::Element) -> Result<String, SurfaceError>;
    /// Fire-and-forget; the pilot never observes a return value beyond
    /// success or failure.
    fn invoke(&mut self, element: &Self::Element) -> Result<(), SurfaceError>;
}
