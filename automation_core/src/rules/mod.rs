//! The automation rules.
//!
//! Each event-driven rule declares the event it listens to and the config
//! option that gates it. The engine does the gating; a rule only checks its
//! own preconditions and, if they hold, acts through the host.

mod auto_paddler;
mod container_auto_closer;
mod container_toggler;
mod door_closer;
mod greeter;

#[cfg(test)]
pub(crate) mod fixtures;

pub use auto_paddler::*;
pub use container_auto_closer::*;
pub use container_toggler::*;
pub use door_closer::*;
pub use greeter::*;

use game_world::Host;
use serde::{Deserialize, Serialize};

use crate::config::AutomationOption;
use crate::error::Result;
use crate::events::{EventKind, WorldEvent};

/// Identifies a rule in dispatch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleId {
    Greeter,
    DoorCloser,
    ContainerAutoCloser,
    AutoPaddler,
}

/// Why a rule did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    /// The gating option is switched off.
    Disabled,
    /// The event does not belong to this rule.
    WrongEvent,
    /// The rule is already acting further up the call stack.
    Reentrant,
    UnknownActor,
    NoIsland,
    NoDoodad,
    NoDescription,
    NotDoorOrGate,
    AlreadyClosed,
    /// Door or gate with no closed counterpart in the transition table.
    UnrecognizedType,
    NoFacingTile,
    /// The faced tile holds a doodad with its own container.
    DoodadContainer,
    EmptyContainer,
    InVehicle,
    AlreadySwimming,
    NotWater,
    Blocked,
    NoPaddle,
    /// Neither side of an item move is a ground container.
    NotGroundContainer,
}

/// What a rule did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Acted,
    Skipped(SkipReason),
}

impl Outcome {
    pub fn acted(&self) -> bool {
        matches!(self, Outcome::Acted)
    }
}

/// An event-driven automation.
pub trait Rule {
    fn id(&self) -> RuleId;

    /// The event kind this rule is registered under.
    fn trigger(&self) -> EventKind;

    /// The option gating this rule; `None` runs unconditionally.
    fn option(&self) -> Option<AutomationOption>;

    /// Check preconditions and act. Missing context is `Ok(Skipped)`; errors
    /// only come from host mutations.
    fn apply(&self, event: &WorldEvent, host: &mut dyn Host) -> Result<Outcome>;

    /// Whether the rule is in the middle of acting.
    fn is_busy(&self) -> bool {
        false
    }
}
