use super::error::{Error, Result};
use super::interface::{Evaluation, Game};
use std::fmt::{Debug, Display};
use std::str::FromStr;

pub struct TicTacToe;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// How a board stands. Always derived from the cells, never stored.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Outcome {
    XWins,
    OWins,
    Draw,
    InProgress,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Move { row, col }
    }

    fn in_bounds(&self) -> bool {
        self.row < 3 && self.col < 3
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "M({},{})", self.row, self.col)
    }
}

/// Parses "row col" (a comma works as separator too).
impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::UnreadableMove(s.trim().to_string());
        let mut parts = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .map(|p| p.parse::<usize>());
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(row)), Some(Ok(col)), None) => Ok(Move::new(row, col)),
            _ => Err(invalid()),
        }
    }
}

const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// A 3x3 grid. `X` always moves first and marks strictly alternate.
///
/// Boards are plain values: [`Board::apply_move`] returns a new board and
/// never touches the one it was called on.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Mark>; 3]; 3],
}

impl Board {
    pub fn initial_state() -> Self {
        Self::default()
    }

    /// The mark at (`row`, `col`). `None` for empty or out-of-range cells.
    pub fn cell(&self, row: usize, col: usize) -> Option<Mark> {
        *self.cells.get(row)?.get(col)?
    }

    fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Some(mark))
            .count()
    }

    pub fn current_player(&self) -> Mark {
        if self.count(Mark::X) == self.count(Mark::O) {
            Mark::X
        } else {
            Mark::O
        }
    }

    /// Empty cells in row-major order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(9);
        TicTacToe::generate_moves(self, &mut moves);
        moves
    }

    pub fn apply_move(&self, m: Move) -> Result<Board> {
        if !m.in_bounds() || self.cells[m.row][m.col].is_some() {
            return Err(Error::InvalidMove {
                row: m.row,
                col: m.col,
            });
        }
        let mut next = *self;
        next.cells[m.row][m.col] = Some(self.current_player());
        Ok(next)
    }

    /// Whether X, and whether O, holds a complete line.
    fn line_owners(&self) -> (bool, bool) {
        let mut owners = (false, false);
        for line in &LINES {
            let [a, b, c] = line.map(|(row, col)| self.cells[row][col]);
            match a {
                Some(Mark::X) if b == a && c == a => owners.0 = true,
                Some(Mark::O) if b == a && c == a => owners.1 = true,
                _ => {}
            }
        }
        owners
    }

    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|line| {
            let [a, b, c] = line.map(|(row, col)| self.cells[row][col]);
            match a {
                Some(mark) if b == a && c == a => Some(mark),
                _ => None,
            }
        })
    }

    fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    pub fn utility(&self) -> Evaluation {
        match self.winner() {
            Some(Mark::X) => 1,
            Some(Mark::O) => -1,
            None => 0,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self.winner() {
            Some(Mark::X) => Outcome::XWins,
            Some(Mark::O) => Outcome::OWins,
            None if self.is_full() => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }
}

/// Reads nine cells: `X`, `O` and `.`/`_`/`-` for empty. Whitespace, `|`
/// and `/` are separators and ignored.
impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut cells = [[None; 3]; 3];
        let mut seen = 0;
        for c in s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|' && *c != '/')
        {
            let cell = match c {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '.' | '_' | '-' => None,
                other => {
                    return Err(Error::InvalidBoard(format!(
                        "unexpected character '{other}' in '{s}'"
                    )))
                }
            };
            if seen < 9 {
                cells[seen / 3][seen % 3] = cell;
            }
            seen += 1;
        }
        if seen != 9 {
            return Err(Error::InvalidBoard(format!(
                "expected 9 cells, got {seen} in '{s}'"
            )));
        }

        let board = Board { cells };
        let (x, o) = (board.count(Mark::X), board.count(Mark::O));
        if x != o && x != o + 1 {
            return Err(Error::InvalidBoard(format!(
                "X={x}, O={o} (X moves first, marks alternate)"
            )));
        }
        // The game stops at the first completed line, so only the side that
        // moved last can own one.
        match board.line_owners() {
            (true, true) => Err(Error::InvalidBoard(format!(
                "both X and O have three in a row in '{s}'"
            ))),
            (true, false) if x != o + 1 => Err(Error::InvalidBoard(format!(
                "X has three in a row but O moved after it in '{s}'"
            ))),
            (false, true) if x != o => Err(Error::InvalidBoard(format!(
                "O has three in a row but X moved after it in '{s}'"
            ))),
            _ => Ok(board),
        }
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "   0 1 2")?;
        for (row, line) in self.cells.iter().enumerate() {
            write!(f, "{:2} ", row)?;
            for cell in line {
                match cell {
                    Some(mark) => write!(f, "{} ", mark)?,
                    None => write!(f, "_ ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, line) in self.cells.iter().enumerate() {
            if row > 0 {
                write!(f, "/")?;
            }
            for cell in line {
                match cell {
                    Some(mark) => write!(f, "{}", mark)?,
                    None => write!(f, ".")?,
                }
            }
        }
        Ok(())
    }
}

impl Game for TicTacToe {
    type S = Board;
    type M = Move;

    fn generate_moves(state: &Self::S, moves: &mut Vec<Self::M>) {
        moves.clear();
        // row-major, the search relies on this order for tie-breaks
        #[allow(clippy::needless_range_loop)]
        for row in 0..3 {
            for col in 0..3 {
                if state.cells[row][col].is_none() {
                    moves.push(Move::new(row, col));
                }
            }
        }
    }

    fn apply(state: &Self::S, m: &Self::M) -> Result<Self::S> {
        state.apply_move(*m)
    }

    fn is_terminal(state: &Self::S) -> bool {
        state.is_terminal()
    }

    fn utility(state: &Self::S) -> Evaluation {
        state.utility()
    }

    fn maximizing(state: &Self::S) -> bool {
        state.current_player() == Mark::X
    }
}
