//! Door-Closer - shuts the door or gate an actor just walked through.

use std::cell::Cell;

use game_world::{
    DoodadId, DoodadType, Host, MessageKey, MessageSource, Notification, Notifier, RenderRequest,
    TileRef, TileUpdate, WorldMutation, WorldQuery,
};

use super::{Outcome, Rule, RuleId, SkipReason};
use crate::config::AutomationOption;
use crate::error::Result;
use crate::events::{EventKind, WorldEvent};

/// Open type -> closed type. Doodads missing from this table are left alone.
const CLOSE_TRANSITIONS: &[(DoodadType, DoodadType)] = &[
    (DoodadType::WoodenDoorOpen, DoodadType::WoodenDoor),
    (DoodadType::WoodenGateOpen, DoodadType::WoodenGate),
];

/// The closed counterpart of an open door or gate type.
pub fn closed_variant(open: DoodadType) -> Option<DoodadType> {
    CLOSE_TRANSITIONS
        .iter()
        .find(|(from, _)| *from == open)
        .map(|(_, to)| *to)
}

/// An open door found behind the actor.
#[derive(Debug, Clone)]
struct OpenDoor {
    tile: TileRef,
    doodad: DoodadId,
    name: &'static str,
    actor_name: String,
}

/// Closes an open door or gate one step behind a completed move.
///
/// Closing a door can make the host fire another `MoveCompleted` before
/// `apply` returns. An in-flight flag turns such nested calls into
/// `Skipped(Reentrant)`; it is cleared on every exit path.
#[derive(Debug, Default)]
pub struct DoorCloser {
    in_flight: Cell<bool>,
}

/// Clears the in-flight flag when dropped.
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl DoorCloser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Find an open door or gate one step behind the actor's direction of travel.
    fn find_open_door(
        host: &dyn Host,
        event: &WorldEvent,
    ) -> std::result::Result<OpenDoor, SkipReason> {
        let WorldEvent::MoveCompleted {
            actor,
            from,
            facing,
        } = event
        else {
            return Err(SkipReason::WrongEvent);
        };

        let actor_name = host.actor_name(*actor).ok_or(SkipReason::UnknownActor)?;
        let island = host.actor_island(*actor).ok_or(SkipReason::NoIsland)?;
        let behind = from.behind(*facing).ok_or(SkipReason::NoDoodad)?;
        let tile = TileRef::new(island, behind);

        let doodad = host.doodad_at(tile).ok_or(SkipReason::NoDoodad)?;
        let description = host
            .doodad_description(doodad)
            .ok_or(SkipReason::NoDescription)?;

        if !(description.is_door || description.is_gate) {
            return Err(SkipReason::NotDoorOrGate);
        }
        if description.is_closed {
            return Err(SkipReason::AlreadyClosed);
        }

        Ok(OpenDoor {
            tile,
            doodad,
            name: description.name,
            actor_name,
        })
    }

    fn close(door: OpenDoor, host: &mut dyn Host) -> Result<Outcome> {
        let Some(closed) = host.doodad_type(door.doodad).and_then(closed_variant) else {
            tracing::debug!("No closed variant for {} at {}", door.name, door.tile);
            return Ok(Outcome::Skipped(SkipReason::UnrecognizedType));
        };

        host.change_doodad_type(door.doodad, closed)?;
        host.update_tile(door.tile, TileUpdate::DoodadChangeType);
        host.refresh_view(RenderRequest::Full);
        host.broadcast(
            Notification::new(MessageKey::ClosedDoor)
                .with_source(MessageSource::Action)
                .with_arg(door.name)
                .with_arg(door.actor_name.as_str()),
        );

        tracing::info!("{} closed the {} at {}", door.actor_name, door.name, door.tile);
        Ok(Outcome::Acted)
    }
}

impl Rule for DoorCloser {
    fn id(&self) -> RuleId {
        RuleId::DoorCloser
    }

    fn trigger(&self) -> EventKind {
        EventKind::MoveCompleted
    }

    fn option(&self) -> Option<AutomationOption> {
        Some(AutomationOption::CloseDoor)
    }

    fn apply(&self, event: &WorldEvent, host: &mut dyn Host) -> Result<Outcome> {
        if self.in_flight.get() {
            tracing::debug!("Door close already in flight, ignoring nested move");
            return Ok(Outcome::Skipped(SkipReason::Reentrant));
        }
        let _guard = InFlight::enter(&self.in_flight);

        match Self::find_open_door(host, event) {
            Ok(door) => Self::close(door, host),
            Err(reason) => {
                tracing::debug!("Door-Closer skipped: {:?}", reason);
                Ok(Outcome::Skipped(reason))
            }
        }
    }

    fn is_busy(&self) -> bool {
        self.is_in_flight()
    }
}
