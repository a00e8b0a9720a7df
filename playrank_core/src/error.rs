//! Error type shared by the board, search and ranking engines.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: ({row}, {col}) is out of range or already occupied")]
    InvalidMove { row: usize, col: usize },

    #[error("cannot read a move from '{0}' (expected \"row col\")")]
    UnreadableMove(String),

    #[error("position is not over but has no legal moves")]
    NoLegalMoves,

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("corpus contains no pages")]
    EmptyCorpus,

    #[error("page '{0}' is not part of the corpus")]
    UnknownPage(String),

    #[error("page '{page}' links to '{link}', which is not part of the corpus")]
    DanglingLink { page: String, link: String },

    #[error("page '{0}' appears more than once")]
    DuplicatePage(String),

    #[error("page '{0}' links to itself")]
    SelfLink(String),

    #[error("invalid rank options: {0}")]
    InvalidOptions(String),

    #[error("ranks did not converge after {iterations} iterations (last max delta {delta:.6})")]
    NotConverged { iterations: usize, delta: f64 },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
