//! The common structures and traits.

use crate::error::Result;

/// A terminal score from the perspective of the first player.
/// Positive values favor the maximizing side, negative the minimizing side.
/// A draw is defined as a score of zero.
pub type Evaluation = i8;

/// Defines the rules for a two-player, zero-sum, perfect-knowledge game.
///
/// A game ties together types for the state and moves, generates the possible
/// moves from a particular state, and determines whether a state is terminal.
///
/// This is meant to be defined on an empty newtype so that a search strategy
/// can be written without knowing about a particular board representation.
pub trait Game: Sized {
    /// The type of the game state. States are values; applying a move
    /// produces a new one.
    type S: Clone;
    /// The type of game moves.
    type M: Copy + PartialEq;

    /// Generate moves at the given state, in a fixed canonical order.
    fn generate_moves(state: &Self::S, moves: &mut Vec<Self::M>);

    /// Apply a move to get a new state. The input state is left untouched.
    fn apply(state: &Self::S, m: &Self::M) -> Result<Self::S>;

    /// Whether the game is over.
    fn is_terminal(state: &Self::S) -> bool;

    /// Score of a terminal state. Meaningless for non-terminal states.
    fn utility(state: &Self::S) -> Evaluation;

    /// Whether the side to move is the maximizing player.
    fn maximizing(state: &Self::S) -> bool;
}

/// Defines a method of choosing a move for the current player.
pub trait Strategy<G: Game> {
    /// `Ok(None)` when the game is already over.
    fn choose_move(&mut self, state: &G::S) -> Result<Option<G::M>>;

    /// From the last choose_move call, return the principal variation,
    /// i.e. the best sequence of moves for both players.
    fn principal_variation(&self) -> Vec<G::M> {
        Vec::new()
    }
}
