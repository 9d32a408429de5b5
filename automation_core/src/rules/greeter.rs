//! Greets the local player once the game is ready.

use game_world::{Host, MessageKey, MessageType, Notification, Notifier};

use super::{Outcome, Rule, RuleId, SkipReason};
use crate::config::AutomationOption;
use crate::error::Result;
use crate::events::{EventKind, WorldEvent};
use crate::VERSION;

#[derive(Debug, Default)]
pub struct Greeter;

impl Greeter {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for Greeter {
    fn id(&self) -> RuleId {
        RuleId::Greeter
    }

    fn trigger(&self) -> EventKind {
        EventKind::GameReady
    }

    fn option(&self) -> Option<AutomationOption> {
        None
    }

    fn apply(&self, event: &WorldEvent, host: &mut dyn Host) -> Result<Outcome> {
        let WorldEvent::GameReady { local_actor } = event else {
            return Ok(Outcome::Skipped(SkipReason::WrongEvent));
        };

        host.send(
            *local_actor,
            Notification::new(MessageKey::Init)
                .with_type(MessageType::Good)
                .with_arg(VERSION),
        );
        Ok(Outcome::Acted)
    }
}
