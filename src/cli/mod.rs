//! Command-line interface for training, evaluating and playing against the
//! tabular agents.

pub mod commands;
pub mod output;
