//! Container-Toggler - shows or hides the ground container the actor faces.

use game_world::{
    ContainerRef, ContainerViews, EntityId, Host, MessageKey, Notification, Notifier, WorldQuery,
};
use serde::{Deserialize, Serialize};

use super::SkipReason;

/// Preconditions that differ between hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerTogglerOptions {
    /// Leave tiles holding a container doodad (a chest) to the host's own
    /// container handling.
    pub defer_to_doodad_containers: bool,
}

impl Default for ContainerTogglerOptions {
    fn default() -> Self {
        Self {
            defer_to_doodad_containers: true,
        }
    }
}

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleOutcome {
    Shown,
    Hidden,
    DidNothing(SkipReason),
}

/// Opens or closes the view onto the items lying on the faced tile.
///
/// Bound to an input rather than an event. A view's identity is the
/// [`ContainerRef::Tile`] of the faced tile, so the same reference opens and
/// closes it.
#[derive(Debug, Clone, Default)]
pub struct ContainerToggler {
    options: ContainerTogglerOptions,
}

impl ContainerToggler {
    pub fn new(options: ContainerTogglerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ContainerTogglerOptions {
        self.options
    }

    pub fn toggle(&self, actor: EntityId, host: &mut dyn Host) -> ToggleOutcome {
        let container = match self.target(actor, host) {
            Ok(container) => container,
            Err(reason) => {
                tracing::debug!("Container toggle skipped: {:?}", reason);
                return ToggleOutcome::DidNothing(reason);
            }
        };

        let (outcome, status) = if host.is_container_open(&container) {
            host.close_container(&container);
            (ToggleOutcome::Hidden, "hidden")
        } else {
            host.open_container(container);
            (ToggleOutcome::Shown, "shown")
        };

        host.send(
            actor,
            Notification::new(MessageKey::ToggleGroundContainer).with_arg(status),
        );
        tracing::debug!("Ground container {:?} {}", container, status);
        outcome
    }

    /// The ground container in front of the actor, if it can be toggled.
    ///
    /// An open view can always be closed; opening needs at least one item.
    fn target(&self, actor: EntityId, host: &dyn Host) -> Result<ContainerRef, SkipReason> {
        let facing = host
            .actor_facing_tile(actor)
            .ok_or(SkipReason::NoFacingTile)?;

        if self.options.defer_to_doodad_containers {
            let doodad_container = host
                .doodad_at(facing)
                .and_then(|doodad| host.doodad_container(doodad));
            if doodad_container.is_some() {
                return Err(SkipReason::DoodadContainer);
            }
        }

        let container = ContainerRef::Tile(facing);
        if host.is_container_open(&container) {
            return Ok(container);
        }

        match host.container_item_count(&container) {
            Some(count) if count > 0 => Ok(container),
            _ => Err(SkipReason::EmptyContainer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::Fixture;
    use game_world::{Direction, Doodad, DoodadType, Item, Point, Recipient, TileRef};

    /// Bertie faces east onto (11, 10).
    fn facing_east() -> (Fixture, TileRef) {
        let mut fixture = Fixture::new();
        fixture.state.get_actor_mut(fixture.actor).unwrap().facing = Direction::East;
        let tile = fixture.tile(11, 10);
        (fixture, tile)
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let (mut fixture, tile) = facing_east();
        fixture.state.drop_item(tile, Item::new("Stone")).unwrap();
        let toggler = ContainerToggler::default();
        let container = ContainerRef::Tile(tile);

        assert_eq!(toggler.toggle(fixture.actor, &mut fixture.state), ToggleOutcome::Shown);
        assert!(fixture.state.is_container_open(&container));

        assert_eq!(toggler.toggle(fixture.actor, &mut fixture.state), ToggleOutcome::Hidden);
        assert!(!fixture.state.is_container_open(&container));
    }

    #[test]
    fn test_status_goes_to_acting_actor_only() {
        let (mut fixture, tile) = facing_east();
        fixture.state.drop_item(tile, Item::new("Stone")).unwrap();
        let toggler = ContainerToggler::default();

        toggler.toggle(fixture.actor, &mut fixture.state);
        toggler.toggle(fixture.actor, &mut fixture.state);

        let statuses: Vec<_> = fixture
            .state
            .deliveries
            .iter()
            .map(|d| {
                assert_eq!(d.recipient, Recipient::Actor(fixture.actor));
                assert_eq!(d.notification.key, MessageKey::ToggleGroundContainer);
                d.notification.args[0].clone()
            })
            .collect();
        assert_eq!(statuses, vec!["shown", "hidden"]);
    }

    #[test]
    fn test_empty_tile_does_nothing() {
        let (mut fixture, tile) = facing_east();
        let toggler = ContainerToggler::default();

        let outcome = toggler.toggle(fixture.actor, &mut fixture.state);

        assert_eq!(outcome, ToggleOutcome::DidNothing(SkipReason::EmptyContainer));
        assert!(!fixture.state.is_container_open(&ContainerRef::Tile(tile)));
        assert!(fixture.state.deliveries.is_empty());
    }

    #[test]
    fn test_open_view_on_emptied_tile_can_still_close() {
        let (mut fixture, tile) = facing_east();
        let container = ContainerRef::Tile(tile);
        fixture.state.open_container(container);

        let outcome = ContainerToggler::default().toggle(fixture.actor, &mut fixture.state);

        assert_eq!(outcome, ToggleOutcome::Hidden);
        assert!(!fixture.state.is_container_open(&container));
    }

    #[test]
    fn test_defers_to_chest() {
        let (mut fixture, tile) = facing_east();
        fixture.state.drop_item(tile, Item::new("Stone")).unwrap();
        fixture
            .state
            .place_doodad(tile, Doodad::new(DoodadType::WoodenChest))
            .unwrap();

        let outcome = ContainerToggler::default().toggle(fixture.actor, &mut fixture.state);
        assert_eq!(outcome, ToggleOutcome::DidNothing(SkipReason::DoodadContainer));

        let permissive = ContainerToggler::new(ContainerTogglerOptions {
            defer_to_doodad_containers: false,
        });
        assert_eq!(
            permissive.toggle(fixture.actor, &mut fixture.state),
            ToggleOutcome::Shown
        );
        assert!(fixture.state.is_container_open(&ContainerRef::Tile(tile)));
    }

    #[test]
    fn test_non_container_doodad_does_not_block() {
        let (mut fixture, tile) = facing_east();
        fixture.state.drop_item(tile, Item::new("Stone")).unwrap();
        fixture
            .state
            .place_doodad(tile, Doodad::new(DoodadType::Campfire))
            .unwrap();

        let outcome = ContainerToggler::default().toggle(fixture.actor, &mut fixture.state);
        assert_eq!(outcome, ToggleOutcome::Shown);
    }

    #[test]
    fn test_facing_past_edge_of_coordinate_range() {
        let mut fixture = Fixture::new();
        let actor = fixture.state.get_actor_mut(fixture.actor).unwrap();
        actor.position = Point::new(i32::MAX, 10, 0);
        actor.facing = Direction::East;

        let outcome = ContainerToggler::default().toggle(fixture.actor, &mut fixture.state);

        assert_eq!(outcome, ToggleOutcome::DidNothing(SkipReason::NoFacingTile));
        assert!(fixture.state.open_containers.is_empty());
    }

    #[test]
    fn test_unknown_actor() {
        let mut fixture = Fixture::new();
        let outcome = ContainerToggler::default().toggle(EntityId::new(), &mut fixture.state);
        assert_eq!(outcome, ToggleOutcome::DidNothing(SkipReason::NoFacingTile));
    }
}
