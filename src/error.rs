//! Error types for the ttt-rl crate

use thiserror::Error;

/// Main error type for the ttt-rl crate
///
/// Every variant except the IO/serialization wrappers is a contract
/// violation raised by the game or by a participant. Callers abort the
/// episode on any of them.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: position {position} is already occupied")]
    InvalidMove { position: usize },

    #[error("position {position} is out of bounds (must be 0-8)")]
    InvalidPosition { position: usize },

    #[error("game already over")]
    GameOver,

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("unexpected game result code {code} (expected 1, -1 or 0)")]
    InvalidResult { code: i64 },

    #[error("player '{player}' has no game in progress")]
    NoActiveGame { player: String },

    #[error("state hash {hash} is outside the 3^9 table")]
    InvalidHash { hash: usize },

    #[error("invalid piece counts: first={first}, second={second} (must be equal or first ahead by 1)")]
    InvalidPieceCounts { first: usize, second: usize },

    #[error("board string must have {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
