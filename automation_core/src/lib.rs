//! # Automation Core (Jeeves)
//!
//! A small automation overlay that reacts to world events and performs
//! conditional, user-configurable world mutations on behalf of the player.
//!
//! ## Core Components
//!
//! - **config**: One persisted on/off flag per automation
//! - **events**: World events and input actions the overlay reacts to
//! - **rules**: Door-Closer, Container-Toggler, Auto-Paddler and friends
//! - **engine**: Rule registry keyed by event kind, plus dispatch
//! - **settings**: Checkbox section and key binding the host renders
//!
//! ## Design Philosophy
//!
//! - **Event-Driven**: Rules only run when the host delivers an event; the
//!   core never drives the game loop
//! - **Narrow Host**: All world access goes through `game_world::Host`
//! - **Quiet Failure**: Missing context is a skipped rule, not an error

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod rules;
pub mod settings;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use events::*;
pub use rules::*;
pub use settings::*;

/// Version reported in the greeting sent when the game becomes ready.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
