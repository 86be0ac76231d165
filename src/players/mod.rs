//! Non-learning participants
//!
//! Baselines the learning agents are trained and evaluated against, and the
//! console player for interactive games.

pub mod benchmark;
pub mod human;
pub mod random;

pub use benchmark::BenchmarkPlayer;
pub use human::HumanPlayer;
pub use random::RandomPlayer;
