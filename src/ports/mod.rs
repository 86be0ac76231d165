//! Ports (trait boundaries) between the game driver and its participants.
//!
//! The driver owns these traits; learning agents, baseline players and
//! observers are adapters implementing them.

pub mod observer;
pub mod player;

pub use observer::Observer;
pub use player::{Player, apply_action, ensure_playable};
