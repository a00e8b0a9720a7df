pub mod error;
pub mod interface;
pub mod minimax;
pub mod pagerank;
pub mod tictactoe;

pub use error::{Error, Result};
pub use minimax::{optimal_move, Minimax};
pub use pagerank::{
    crawl::crawl, graph::LinkGraph, iterative::iterate_rank, sampling::sample_rank,
    sampling::sample_rank_with, transition::transition_model, RankOptions, Ranks,
};
pub use tictactoe::{Board, Mark, Move, Outcome, TicTacToe};
