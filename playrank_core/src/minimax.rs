//! Exhaustive minimax search.
//!
//! Every legal continuation is explored to the end of the game, without
//! pruning or memoization. Moves are tried in the order the game generates
//! them and only a strictly better value replaces the current best, so the
//! first optimal move in that order wins ties.

use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::interface::{Evaluation, Game, Strategy};
use crate::tictactoe::{Board, Move, TicTacToe};

pub struct Minimax<G: Game> {
    // Nodes visited by the last search, root included.
    nodes: u64,
    pv: Vec<G::M>,
    _game: PhantomData<G>,
}

impl<G: Game> Default for Minimax<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Game> Minimax<G> {
    pub fn new() -> Self {
        Self {
            nodes: 0,
            pv: Vec::new(),
            _game: PhantomData,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// The game-theoretic value of `state` and the move that reaches it.
    /// Terminal states have no move.
    ///
    /// Also resets the node count and the principal variation to this search.
    pub fn evaluate(&mut self, state: &G::S) -> Result<(Evaluation, Option<G::M>)> {
        self.nodes = 0;
        let (value, line) = if G::maximizing(state) {
            self.max_value(state)?
        } else {
            self.min_value(state)?
        };
        let best = line.first().copied();
        self.pv = line;
        Ok((value, best))
    }

    fn max_value(&mut self, state: &G::S) -> Result<(Evaluation, Vec<G::M>)> {
        self.search(state, true)
    }

    fn min_value(&mut self, state: &G::S) -> Result<(Evaluation, Vec<G::M>)> {
        self.search(state, false)
    }

    /// Value of `state` and the best line of play from it, first move first.
    fn search(&mut self, state: &G::S, maximize: bool) -> Result<(Evaluation, Vec<G::M>)> {
        self.nodes += 1;
        if G::is_terminal(state) {
            return Ok((G::utility(state), Vec::new()));
        }

        let mut moves = Vec::new();
        G::generate_moves(state, &mut moves);

        let mut best: Option<(Evaluation, Vec<G::M>)> = None;
        for m in moves {
            let next = G::apply(state, &m)?;
            let (value, mut line) = if maximize {
                self.min_value(&next)?
            } else {
                self.max_value(&next)?
            };
            let better = match &best {
                None => true,
                Some((best_value, _)) if maximize => value > *best_value,
                Some((best_value, _)) => value < *best_value,
            };
            if better {
                line.insert(0, m);
                best = Some((value, line));
            }
        }
        best.ok_or(Error::NoLegalMoves)
    }
}

impl<G: Game> Strategy<G> for Minimax<G> {
    fn choose_move(&mut self, state: &G::S) -> Result<Option<G::M>> {
        let (value, best) = self.evaluate(state)?;
        log::debug!(
            "minimax visited {} nodes, value {} with {}",
            self.nodes,
            value,
            if best.is_some() { "a move" } else { "no move" }
        );
        Ok(best)
    }

    fn principal_variation(&self) -> Vec<G::M> {
        self.pv.clone()
    }
}

/// The optimal move for the side to move, or `None` if the game is over.
pub fn optimal_move(board: &Board) -> Result<Option<Move>> {
    Ok(Minimax::<TicTacToe>::new().evaluate(board)?.1)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tictactoe::{Mark, Outcome};

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_completes_winning_line() {
        let b = board("XX. O.. O..");
        assert_eq!(b.current_player(), Mark::X);
        assert_eq!(optimal_move(&b).unwrap(), Some(Move::new(0, 2)));
    }

    #[test]
    fn test_blocks_opponent() {
        // O to move must stop X on the top row.
        let b = board("XX. .O. ...");
        assert_eq!(b.current_player(), Mark::O);
        assert_eq!(optimal_move(&b).unwrap(), Some(Move::new(0, 2)));
    }

    #[test]
    fn test_o_takes_win_over_block() {
        let b = board("XX. OO. X..");
        assert_eq!(b.current_player(), Mark::O);
        assert_eq!(optimal_move(&b).unwrap(), Some(Move::new(1, 2)));
    }

    #[test]
    fn test_terminal_board_has_no_move() {
        assert_eq!(optimal_move(&board("XXX OO. ...")).unwrap(), None);
        assert_eq!(optimal_move(&board("XOX XOO OXX")).unwrap(), None);
    }

    #[test]
    fn test_deterministic() {
        let b = Board::initial_state();
        let first = optimal_move(&b).unwrap();
        assert_eq!(first, optimal_move(&b).unwrap());
        // every opening draws, so the first row-major move is kept
        assert_eq!(first, Some(Move::new(0, 0)));
    }

    #[test]
    fn test_perfect_play_draws() {
        let mut b = Board::initial_state();
        while let Some(m) = optimal_move(&b).unwrap() {
            b = b.apply_move(m).unwrap();
        }
        assert_eq!(b.outcome(), Outcome::Draw);
        assert_eq!(b.utility(), 0);
    }

    #[test]
    fn test_strategy_records_search() {
        let mut strategy = Minimax::<TicTacToe>::new();
        let b = board("XX. OO. X..");
        assert_eq!(strategy.choose_move(&b).unwrap(), Some(Move::new(1, 2)));
        let nodes = strategy.nodes();
        assert!(nodes > 1);
        assert_eq!(strategy.principal_variation(), vec![Move::new(1, 2)]);
        assert_eq!(strategy.evaluate(&b).unwrap().0, -1);
        assert_eq!(strategy.nodes(), nodes);
    }

    #[test]
    fn test_principal_variation_plays_out() {
        let mut strategy = Minimax::<TicTacToe>::new();
        let start = board("XX. .O. ...");
        strategy.choose_move(&start).unwrap();
        let line = strategy.principal_variation();
        assert_eq!(line.first(), Some(&Move::new(0, 2)));

        let mut b = start;
        for m in &line {
            assert_eq!(optimal_move(&b).unwrap(), Some(*m));
            b = b.apply_move(*m).unwrap();
        }
        assert!(b.is_terminal());
        assert_eq!(b.outcome(), Outcome::Draw);
    }

    // One-move game whose only move cannot be applied.
    struct Rejecting;

    impl Game for Rejecting {
        type S = u8;
        type M = u8;

        fn generate_moves(_: &u8, moves: &mut Vec<u8>) {
            moves.clear();
            moves.push(0);
        }

        fn apply(_: &u8, m: &u8) -> Result<u8> {
            Err(Error::InvalidMove {
                row: *m as usize,
                col: 0,
            })
        }

        fn is_terminal(_: &u8) -> bool {
            false
        }

        fn utility(_: &u8) -> Evaluation {
            0
        }

        fn maximizing(_: &u8) -> bool {
            true
        }
    }

    // Never ends, yet offers no moves.
    struct Stuck;

    impl Game for Stuck {
        type S = u8;
        type M = u8;

        fn generate_moves(_: &u8, moves: &mut Vec<u8>) {
            moves.clear();
        }

        fn apply(state: &u8, _: &u8) -> Result<u8> {
            Ok(*state)
        }

        fn is_terminal(_: &u8) -> bool {
            false
        }

        fn utility(_: &u8) -> Evaluation {
            0
        }

        fn maximizing(_: &u8) -> bool {
            false
        }
    }

    #[test]
    fn test_apply_failure_propagates() {
        let mut strategy = Minimax::<Rejecting>::new();
        assert!(matches!(
            strategy.evaluate(&0),
            Err(Error::InvalidMove { row: 0, col: 0 })
        ));
        assert!(strategy.choose_move(&0).is_err());
    }

    #[test]
    fn test_live_state_without_moves_is_an_error() {
        let mut strategy = Minimax::<Stuck>::new();
        assert!(matches!(strategy.evaluate(&0), Err(Error::NoLegalMoves)));
    }
}
