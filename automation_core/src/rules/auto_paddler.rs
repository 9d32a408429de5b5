//! Auto-Paddler - starts paddling when the actor steps into deep water.

use game_world::{
    ContainerRef, Host, ItemUse, MessageKey, Notification, Notifier, WorldMutation, WorldQuery,
};

use super::{Outcome, Rule, RuleId, SkipReason};
use crate::config::AutomationOption;
use crate::error::Result;
use crate::events::{EventKind, WorldEvent};

/// Equips and uses the best paddle in the actor's inventory just before it
/// moves onto swimmable water.
///
/// Observes the move; never vetoes it.
#[derive(Debug, Default)]
pub struct AutoPaddler;

impl AutoPaddler {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for AutoPaddler {
    fn id(&self) -> RuleId {
        RuleId::AutoPaddler
    }

    fn trigger(&self) -> EventKind {
        EventKind::PreMove
    }

    fn option(&self) -> Option<AutomationOption> {
        Some(AutomationOption::AutoPaddle)
    }

    fn apply(&self, event: &WorldEvent, host: &mut dyn Host) -> Result<Outcome> {
        let WorldEvent::PreMove { actor, to, .. } = event else {
            return Ok(Outcome::Skipped(SkipReason::WrongEvent));
        };
        let actor = *actor;

        let skip = if host.is_in_vehicle(actor) {
            Some(SkipReason::InVehicle)
        } else if host.is_swimming(actor) {
            Some(SkipReason::AlreadySwimming)
        } else if !host.terrain_at(*to).is_some_and(|t| t.is_swimmable()) {
            Some(SkipReason::NotWater)
        } else if !host.is_tile_open(*to) {
            Some(SkipReason::Blocked)
        } else {
            None
        };
        if let Some(reason) = skip {
            return Ok(Outcome::Skipped(reason));
        }

        let Some((paddle, name)) = host
            .best_item_for(actor, ItemUse::Paddle)
            .and_then(|item| host.item_name(item).map(|name| (item, name)))
        else {
            tracing::debug!("No usable paddle for {} entering {}", actor, to);
            return Ok(Outcome::Skipped(SkipReason::NoPaddle));
        };

        host.send(
            actor,
            Notification::new(MessageKey::PaddleEngaged).with_arg(name.as_str()),
        );
        host.move_item(paddle, ContainerRef::Inventory(actor))?;
        host.begin_using(actor, paddle, ItemUse::Paddle)?;

        tracing::info!("{} started paddling with {}", actor, name);
        Ok(Outcome::Acted)
    }
}
