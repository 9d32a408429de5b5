//! Keeps ground container views honest when items move.

use game_world::{ContainerRef, ContainerViews, Host, RenderRequest, WorldMutation, WorldQuery};

use super::{Outcome, Rule, RuleId, SkipReason};
use crate::config::AutomationOption;
use crate::error::Result;
use crate::events::{EventKind, WorldEvent};

/// Closes a ground container view whose container disappeared, and refreshes
/// the view whenever items move to or from the ground.
///
/// Automatic closes send no notification.
#[derive(Debug, Default)]
pub struct ContainerAutoCloser;

impl ContainerAutoCloser {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ContainerAutoCloser {
    fn id(&self) -> RuleId {
        RuleId::ContainerAutoCloser
    }

    fn trigger(&self) -> EventKind {
        EventKind::ItemMoved
    }

    fn option(&self) -> Option<AutomationOption> {
        Some(AutomationOption::ManageGroundContainer)
    }

    fn apply(&self, event: &WorldEvent, host: &mut dyn Host) -> Result<Outcome> {
        let WorldEvent::ItemMoved {
            source,
            source_position,
            destination,
            ..
        } = event
        else {
            return Ok(Outcome::Skipped(SkipReason::WrongEvent));
        };

        let source_gone = source.map_or(true, |container| !host.container_exists(&container));
        let position = source_position.or_else(|| source.and_then(|c| c.tile()));

        let mut closed = false;
        if let (true, Some(position)) = (source_gone, position) {
            let view = ContainerRef::Tile(position);
            if host.is_container_open(&view) {
                host.close_container(&view);
                tracing::debug!("Closed view of vanished ground container at {}", position);
                closed = true;
            }
        }

        // A source reported only by position was a ground pile that the move emptied.
        let from_emptied_pile = source.is_none() && source_position.is_some();
        let touches_ground = closed
            || from_emptied_pile
            || destination.is_tile()
            || source.is_some_and(|c| c.is_tile());
        if !touches_ground {
            return Ok(Outcome::Skipped(SkipReason::NotGroundContainer));
        }

        host.refresh_view(RenderRequest::Full);
        Ok(Outcome::Acted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::Fixture;
    use game_world::{Doodad, DoodadType, Item, ItemId};

    #[test]
    fn test_closes_view_when_source_vanishes() {
        let mut fixture = Fixture::new();
        let tile = fixture.tile(11, 10);
        let view = ContainerRef::Tile(tile);
        let stone = fixture.state.drop_item(tile, Item::new("Stone")).unwrap();
        fixture.state.open_container(view);

        fixture
            .state
            .move_item(stone, ContainerRef::Inventory(fixture.actor))
            .unwrap();
        let event = WorldEvent::ItemMoved {
            item: stone,
            source: None,
            source_position: Some(tile),
            destination: ContainerRef::Inventory(fixture.actor),
        };

        let outcome = ContainerAutoCloser::new()
            .apply(&event, &mut fixture.state)
            .unwrap();

        assert_eq!(outcome, Outcome::Acted);
        assert!(!fixture.state.is_container_open(&view));
        assert!(fixture.state.deliveries.is_empty());
        assert_eq!(fixture.state.view_refreshes, vec![RenderRequest::Full]);
    }

    #[test]
    fn test_picking_up_last_item_refreshes_without_open_view() {
        let mut fixture = Fixture::new();
        let tile = fixture.tile(11, 10);
        let stick = fixture.state.drop_item(tile, Item::new("Stick")).unwrap();
        fixture
            .state
            .move_item(stick, ContainerRef::Inventory(fixture.actor))
            .unwrap();
        let event = WorldEvent::ItemMoved {
            item: stick,
            source: None,
            source_position: Some(tile),
            destination: ContainerRef::Inventory(fixture.actor),
        };

        let outcome = ContainerAutoCloser::new()
            .apply(&event, &mut fixture.state)
            .unwrap();

        assert_eq!(outcome, Outcome::Acted);
        assert_eq!(fixture.state.view_refreshes, vec![RenderRequest::Full]);
        assert!(fixture.state.open_containers.is_empty());
        assert!(fixture.state.deliveries.is_empty());
    }

    #[test]
    fn test_stale_source_reference_counts_as_vanished() {
        let mut fixture = Fixture::new();
        let tile = fixture.tile(11, 10);
        let view = ContainerRef::Tile(tile);
        fixture.state.open_container(view);

        // The host still names the tile container, but it no longer exists.
        let event = WorldEvent::ItemMoved {
            item: ItemId::new(),
            source: Some(view),
            source_position: None,
            destination: ContainerRef::Inventory(fixture.actor),
        };

        ContainerAutoCloser::new()
            .apply(&event, &mut fixture.state)
            .unwrap();
        assert!(!fixture.state.is_container_open(&view));
    }

    #[test]
    fn test_keeps_view_while_items_remain() {
        let mut fixture = Fixture::new();
        let tile = fixture.tile(11, 10);
        let view = ContainerRef::Tile(tile);
        let stone = fixture.state.drop_item(tile, Item::new("Stone")).unwrap();
        fixture.state.drop_item(tile, Item::new("Stick")).unwrap();
        fixture.state.open_container(view);

        fixture
            .state
            .move_item(stone, ContainerRef::Inventory(fixture.actor))
            .unwrap();
        let event = WorldEvent::ItemMoved {
            item: stone,
            source: Some(view),
            source_position: Some(tile),
            destination: ContainerRef::Inventory(fixture.actor),
        };

        let outcome = ContainerAutoCloser::new()
            .apply(&event, &mut fixture.state)
            .unwrap();

        assert_eq!(outcome, Outcome::Acted);
        assert!(fixture.state.is_container_open(&view));
        assert_eq!(fixture.state.view_refreshes.len(), 1);
    }

    #[test]
    fn test_inventory_moves_are_ignored() {
        let mut fixture = Fixture::new();
        let tile = fixture.tile(3, 3);
        let chest = fixture
            .state
            .place_doodad(tile, Doodad::new(DoodadType::WoodenChest))
            .unwrap();
        let event = WorldEvent::ItemMoved {
            item: ItemId::new(),
            source: Some(ContainerRef::Inventory(fixture.actor)),
            source_position: None,
            destination: ContainerRef::Doodad(chest),
        };

        let outcome = ContainerAutoCloser::new()
            .apply(&event, &mut fixture.state)
            .unwrap();

        assert_eq!(outcome, Outcome::Skipped(SkipReason::NotGroundContainer));
        assert!(fixture.state.view_refreshes.is_empty());
    }

    #[test]
    fn test_drop_to_ground_refreshes() {
        let mut fixture = Fixture::new();
        let event = WorldEvent::ItemMoved {
            item: ItemId::new(),
            source: Some(ContainerRef::Inventory(fixture.actor)),
            source_position: None,
            destination: ContainerRef::Tile(fixture.tile(10, 11)),
        };

        let outcome = ContainerAutoCloser::new()
            .apply(&event, &mut fixture.state)
            .unwrap();
        assert!(outcome.acted());
        assert_eq!(fixture.state.view_refreshes, vec![RenderRequest::Full]);
    }
}
