//! Tabular reinforcement learning for Tic-Tac-Toe
//!
//! This crate provides:
//! - The board, its base-3 state encoding and a stepping environment
//! - Q-learning, SARSA and TD(0) agents over explicit value tables
//! - Random, one-ply heuristic and console human players
//! - A battle driver that reports win/draw percentages over time

pub mod cli;
pub mod config;
pub mod error;
pub mod learning;
pub mod pipeline;
pub mod players;
pub mod ports;
pub mod tictactoe;

pub use error::{Error, Result};
