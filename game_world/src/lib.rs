//! # Game World
//!
//! The host side of the automation overlay: the world model (tiles, doodads,
//! actors, items), the facade traits the automation core queries and mutates
//! the world through, and an in-memory `WorldState` that implements them.
//! This crate holds no automation logic.

pub mod entities;
pub mod host;
pub mod mechanics;
pub mod world_state;

pub use entities::*;
pub use host::*;
pub use mechanics::*;
pub use world_state::*;
