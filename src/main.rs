use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use playrank_core::{interface::Strategy, Board, Mark, Minimax, Move, Outcome, TicTacToe};

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(version, about = "Play tic-tac-toe against a perfect minimax opponent", long_about = None)]
struct Cli {
    /// Which side the human plays
    #[arg(long, value_enum, default_value_t = Side::X)]
    play: Side,

    /// Start from this position, e.g. "XO./.X./..."
    #[arg(long)]
    board: Option<Board>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    X,
    O,
}

impl From<Side> for Mark {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Mark::X,
            Side::O => Mark::O,
        }
    }
}

fn human_play(board: &Board) -> Result<Board> {
    let mut input = String::new();
    loop {
        print!("enter a move (e.g. \"1 2\"): ");
        std::io::stdout().flush()?;
        input.clear();
        if std::io::stdin()
            .read_line(&mut input)
            .context("failed to read move")?
            == 0
        {
            anyhow::bail!("input closed before the game ended");
        }
        match input.parse::<Move>().and_then(|m| board.apply_move(m)) {
            Ok(next) => return Ok(next),
            Err(e) => println!("{e}, re enter:"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let human: Mark = cli.play.into();
    let mut board = cli.board.unwrap_or_else(Board::initial_state);
    let mut strategy = Minimax::<TicTacToe>::new();

    println!("{}", board);
    while !board.is_terminal() {
        if board.current_player() == human {
            board = human_play(&board)?;
        } else {
            let best_move = strategy
                .choose_move(&board)?
                .context("no move on a live board")?;
            log::info!("searched {} positions", strategy.nodes());
            println!("best move: {}", best_move);
            board = board.apply_move(best_move)?;
        }
        println!("{}", board);
    }

    match board.outcome() {
        Outcome::XWins => println!("Player X wins the game!"),
        Outcome::OWins => println!("Player O wins the game!"),
        _ => println!("Game over: tie."),
    }
    Ok(())
}
