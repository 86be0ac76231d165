//! Tabular temporal-difference learners
//!
//! Three agents share the same episode lifecycle and ε-greedy move
//! selection, and differ only in what they estimate and how credit flows
//! back once the game is over:
//!
//! | Aspect | Q-learning | SARSA | TD(0) |
//! |--------|------------|-------|-------|
//! | Table | Q(s, a) | Q(s, a) | V(s) |
//! | Greedy move | max Q(s, a) | max Q(s, a) | max V of the resulting board |
//! | Bootstrap | max over legal a' of Q(s', a') | Q(s', a') actually taken | V of the next recorded board |
//! | Evaluation mode | no exploration, still updates | frozen | frozen |
//!
//! Terminal values are 1.0 for a win, 0.5 for a draw and 0.0 for a loss,
//! always from the agent's own side.
//!
//! ## Usage Example
//!
//! ```no_run
//! use ttt_rl::{
//!     config::AgentConfig,
//!     learning::{QLearningAgent, TdAgent},
//! };
//!
//! let q_agent = QLearningAgent::new(AgentConfig::q_learning().with_seed(7))?;
//! let td_agent = TdAgent::new(AgentConfig::td().with_epsilon(0.2))?;
//! # Ok::<(), ttt_rl::Error>(())
//! ```

pub mod agent;
pub mod episode;
pub mod exploration;
pub mod kind;
pub mod q_table;
pub mod td_agent;
pub mod value_table;

pub use agent::{QLearningAgent, SarsaAgent, StateAction};
pub use episode::{RES_DRAW, RES_LOSS, RES_WIN, terminal_value};
pub use kind::{Agent, AgentKind};
pub use q_table::QTable;
pub use td_agent::TdAgent;
pub use value_table::ValueTable;
