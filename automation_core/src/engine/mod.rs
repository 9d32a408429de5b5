//! Automation engine - the rule registry and event dispatch.
//!
//! Dispatch works as follows:
//! 1. **Route**: Look up the rules registered for the event's kind
//! 2. **Gate**: Skip rules whose option is switched off, before any query
//! 3. **Apply**: Let each remaining rule check its preconditions and act
//! 4. **Report**: Collect one outcome per registered rule
//!
//! The engine is single-threaded (`!Sync`). Dispatch takes `&self`, so a
//! host may dispatch again from inside a mutation call; rules guard
//! themselves against such nested calls.

use std::cell::Cell;
use std::collections::HashMap;
use std::path::Path;

use game_world::{EntityId, Host};
use serde::{Deserialize, Serialize};

use crate::config::{AutomationConfig, AutomationOption};
use crate::error::Result;
use crate::events::{EventKind, InputAction, WorldEvent};
use crate::rules::{
    AutoPaddler, ContainerAutoCloser, ContainerToggler, ContainerTogglerOptions, DoorCloser,
    Greeter, Outcome, Rule, RuleId, SkipReason, ToggleOutcome,
};
use crate::settings::{settings_section, SettingsSection};

/// What dispatching one event did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub event: EventKind,
    pub outcomes: Vec<(RuleId, Outcome)>,
}

impl DispatchReport {
    pub fn outcome(&self, rule: RuleId) -> Option<Outcome> {
        self.outcomes
            .iter()
            .find(|(id, _)| *id == rule)
            .map(|(_, outcome)| *outcome)
    }

    pub fn acted(&self, rule: RuleId) -> bool {
        self.outcome(rule).is_some_and(|o| o.acted())
    }
}

/// Owns the config and the rules, and routes events to them.
pub struct AutomationEngine {
    config: Cell<AutomationConfig>,
    registry: HashMap<EventKind, Vec<Box<dyn Rule>>>,
    container_toggler: ContainerToggler,
}

impl AutomationEngine {
    /// Create an engine with every rule registered.
    pub fn new(config: AutomationConfig) -> Self {
        Self::with_toggler_options(config, ContainerTogglerOptions::default())
    }

    /// Create an engine with all automations off.
    pub fn with_defaults() -> Self {
        Self::new(AutomationConfig::default())
    }

    pub fn with_toggler_options(
        config: AutomationConfig,
        toggler_options: ContainerTogglerOptions,
    ) -> Self {
        let mut engine = Self {
            config: Cell::new(config),
            registry: HashMap::new(),
            container_toggler: ContainerToggler::new(toggler_options),
        };

        engine.register(Box::new(Greeter::new()));
        engine.register(Box::new(DoorCloser::new()));
        engine.register(Box::new(ContainerAutoCloser::new()));
        engine.register(Box::new(AutoPaddler::new()));
        engine
    }

    /// Create an engine from a saved config file, or defaults if none exists.
    pub fn from_config_file(path: &Path) -> Result<Self> {
        Ok(Self::new(AutomationConfig::load_from_file(path)?))
    }

    /// Persist the current config.
    pub fn save_config(&self, path: &Path) -> Result<()> {
        self.config.get().save_to_file(path)?;
        Ok(())
    }

    fn register(&mut self, rule: Box<dyn Rule>) {
        self.registry.entry(rule.trigger()).or_default().push(rule);
    }

    pub fn config(&self) -> AutomationConfig {
        self.config.get()
    }

    /// Swap in a freshly loaded config.
    pub fn replace_config(&self, config: AutomationConfig) {
        self.config.set(config);
    }

    pub fn is_enabled(&self, option: AutomationOption) -> bool {
        self.config.get().get(option)
    }

    pub fn set_option(&self, option: AutomationOption, enabled: bool) {
        let mut config = self.config.get();
        config.set(option, enabled);
        self.config.set(config);
        tracing::info!("Automation {} {}", option, if enabled { "enabled" } else { "disabled" });
    }

    /// Flip an option and return its new value.
    pub fn toggle_option(&self, option: AutomationOption) -> bool {
        let mut config = self.config.get();
        let enabled = config.toggle(option);
        self.config.set(config);
        tracing::info!("Automation {} {}", option, if enabled { "enabled" } else { "disabled" });
        enabled
    }

    /// Rules registered for an event kind, in dispatch order.
    pub fn rules_for(&self, kind: EventKind) -> Vec<RuleId> {
        self.registry
            .get(&kind)
            .map(|rules| rules.iter().map(|r| r.id()).collect())
            .unwrap_or_default()
    }

    /// Whether a rule is currently mid-action.
    pub fn is_rule_busy(&self, id: RuleId) -> bool {
        self.registry
            .values()
            .flatten()
            .any(|rule| rule.id() == id && rule.is_busy())
    }

    /// Run every rule registered for the event.
    ///
    /// A host error stops dispatch and is returned; rules already run keep
    /// their effects.
    pub fn dispatch(&self, event: &WorldEvent, host: &mut dyn Host) -> Result<DispatchReport> {
        let kind = event.kind();
        let mut report = DispatchReport {
            event: kind,
            outcomes: Vec::new(),
        };

        let Some(rules) = self.registry.get(&kind) else {
            return Ok(report);
        };

        for rule in rules {
            let gated_off = rule.option().is_some_and(|option| !self.is_enabled(option));
            let outcome = if gated_off {
                Outcome::Skipped(SkipReason::Disabled)
            } else {
                rule.apply(event, host)?
            };
            report.outcomes.push((rule.id(), outcome));
        }

        Ok(report)
    }

    /// Handle a bound input.
    pub fn handle_input(
        &self,
        input: InputAction,
        actor: EntityId,
        host: &mut dyn Host,
    ) -> ToggleOutcome {
        match input {
            InputAction::ToggleGroundContainer => {
                if !self.is_enabled(AutomationOption::ManageGroundContainer) {
                    return ToggleOutcome::DidNothing(SkipReason::Disabled);
                }
                self.container_toggler.toggle(actor, host)
            }
        }
    }

    /// The checkbox section for the host's settings panel.
    pub fn settings_section(&self) -> SettingsSection {
        settings_section(&self.config.get())
    }

    /// Apply a checkbox toggle from the settings panel.
    pub fn on_checkbox_toggled(&self, option: AutomationOption, checked: bool) {
        self.set_option(option, checked);
    }
}

impl Default for AutomationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::Fixture;
    use game_world::{
        ContainerViews, Direction, Doodad, DoodadType, Item, Point, TerrainType, WorldQuery,
    };
    use std::cell::RefCell;
    use std::rc::Rc;

    fn door_fixture() -> (Fixture, game_world::DoodadId, WorldEvent) {
        let mut fixture = Fixture::new();
        let tile = fixture.tile(9, 10);
        let door = fixture
            .state
            .place_doodad(tile, Doodad::new(DoodadType::WoodenDoorOpen))
            .unwrap();
        let event = WorldEvent::MoveCompleted {
            actor: fixture.actor,
            from: Point::new(10, 10, 0),
            facing: Direction::East,
        };
        (fixture, door, event)
    }

    #[test]
    fn test_registry_routes_by_event_kind() {
        let engine = AutomationEngine::with_defaults();
        assert_eq!(engine.rules_for(EventKind::GameReady), vec![RuleId::Greeter]);
        assert_eq!(engine.rules_for(EventKind::MoveCompleted), vec![RuleId::DoorCloser]);
        assert_eq!(engine.rules_for(EventKind::PreMove), vec![RuleId::AutoPaddler]);
        assert_eq!(
            engine.rules_for(EventKind::ItemMoved),
            vec![RuleId::ContainerAutoCloser]
        );
    }

    #[test]
    fn test_disabled_rule_does_not_touch_world() {
        let (mut fixture, door, event) = door_fixture();
        let engine = AutomationEngine::with_defaults();

        let report = engine.dispatch(&event, &mut fixture.state).unwrap();

        assert_eq!(
            report.outcome(RuleId::DoorCloser),
            Some(Outcome::Skipped(SkipReason::Disabled))
        );
        assert_eq!(
            fixture.state.doodad_type(door),
            Some(DoodadType::WoodenDoorOpen)
        );
        assert!(fixture.state.deliveries.is_empty());
    }

    #[test]
    fn test_checkbox_enables_rule() {
        let (mut fixture, door, event) = door_fixture();
        let engine = AutomationEngine::with_defaults();

        engine.on_checkbox_toggled(AutomationOption::CloseDoor, true);
        assert!(engine.config().close_door);

        let report = engine.dispatch(&event, &mut fixture.state).unwrap();
        assert!(report.acted(RuleId::DoorCloser));
        assert_eq!(fixture.state.doodad_type(door), Some(DoodadType::WoodenDoor));
    }

    #[test]
    fn test_greeter_is_ungated() {
        let mut fixture = Fixture::new();
        let event = WorldEvent::GameReady {
            local_actor: fixture.actor,
        };
        let engine = AutomationEngine::with_defaults();

        let report = engine.dispatch(&event, &mut fixture.state).unwrap();
        assert!(report.acted(RuleId::Greeter));
    }

    #[test]
    fn test_nested_dispatch_during_door_close() {
        let (mut fixture, door, event) = door_fixture();
        let engine = Rc::new(AutomationEngine::new(AutomationConfig::all_enabled()));
        let nested: Rc<RefCell<Vec<(bool, DispatchReport)>>> = Rc::default();

        {
            let engine = Rc::clone(&engine);
            let nested = Rc::clone(&nested);
            let event = event.clone();
            fixture.state.set_doodad_change_listener(move |state, _| {
                let busy = engine.is_rule_busy(RuleId::DoorCloser);
                let report = engine.dispatch(&event, state).unwrap();
                nested.borrow_mut().push((busy, report));
            });
        }

        let report = engine.dispatch(&event, &mut fixture.state).unwrap();

        assert!(report.acted(RuleId::DoorCloser));
        let nested = nested.borrow();
        assert_eq!(nested.len(), 1);
        assert!(nested[0].0, "guard should read true during the nested call");
        assert_eq!(
            nested[0].1.outcome(RuleId::DoorCloser),
            Some(Outcome::Skipped(SkipReason::Reentrant))
        );
        assert!(!engine.is_rule_busy(RuleId::DoorCloser));
        assert_eq!(fixture.state.doodad_type(door), Some(DoodadType::WoodenDoor));
        assert_eq!(fixture.state.deliveries.len(), 1);
    }

    #[test]
    fn test_toggle_input_gated() {
        let mut fixture = Fixture::new();
        fixture.state.get_actor_mut(fixture.actor).unwrap().facing = Direction::North;
        let tile = fixture.tile(10, 9);
        fixture.state.drop_item(tile, Item::new("Stone")).unwrap();
        let engine = AutomationEngine::with_defaults();

        assert_eq!(
            engine.handle_input(InputAction::ToggleGroundContainer, fixture.actor, &mut fixture.state),
            ToggleOutcome::DidNothing(SkipReason::Disabled)
        );

        engine.set_option(AutomationOption::ManageGroundContainer, true);
        assert_eq!(
            engine.handle_input(InputAction::ToggleGroundContainer, fixture.actor, &mut fixture.state),
            ToggleOutcome::Shown
        );
        assert!(fixture
            .state
            .is_container_open(&game_world::ContainerRef::Tile(tile)));
    }

    #[test]
    fn test_pre_move_reports_without_veto() {
        let mut fixture = Fixture::new();
        let to = fixture.tile(10, 11);
        fixture.state.set_terrain(to, TerrainType::Grass).unwrap();
        let engine = AutomationEngine::new(AutomationConfig::all_enabled());

        let report = engine
            .dispatch(
                &WorldEvent::PreMove {
                    actor: fixture.actor,
                    from: fixture.tile(10, 10),
                    to,
                },
                &mut fixture.state,
            )
            .unwrap();

        assert_eq!(report.event, EventKind::PreMove);
        assert_eq!(
            report.outcomes,
            vec![(RuleId::AutoPaddler, Outcome::Skipped(SkipReason::NotWater))]
        );
    }

    #[test]
    fn test_toggle_option_flips_one_flag() {
        let engine = AutomationEngine::with_defaults();

        assert!(engine.toggle_option(AutomationOption::AutoPaddle));
        assert!(engine.is_enabled(AutomationOption::AutoPaddle));
        assert!(!engine.is_enabled(AutomationOption::CloseDoor));

        assert!(!engine.toggle_option(AutomationOption::AutoPaddle));
        assert_eq!(engine.config(), AutomationConfig::default());
    }

    #[test]
    fn test_config_file_round_trip_through_engine() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("automation.toml");

        let engine = AutomationEngine::from_config_file(&path).unwrap();
        assert_eq!(engine.config(), AutomationConfig::default());

        engine.set_option(AutomationOption::CloseDoor, true);
        engine.save_config(&path).unwrap();

        let reloaded = AutomationEngine::from_config_file(&path).unwrap();
        assert!(reloaded.is_enabled(AutomationOption::CloseDoor));
        assert!(!reloaded.is_enabled(AutomationOption::AutoPaddle));
    }

    #[test]
    fn test_malformed_config_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("automation.toml");
        std::fs::write(&path, "close_door = \"sometimes\"").unwrap();

        let result = AutomationEngine::from_config_file(&path);
        assert!(matches!(result, Err(crate::error::EngineError::Config(_))));
    }

    #[test]
    fn test_replace_config() {
        let engine = AutomationEngine::with_defaults();
        engine.replace_config(AutomationConfig::all_enabled());
        for option in AutomationOption::ALL {
            assert!(engine.is_enabled(option));
        }
    }
}
