use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use crossterm::style::{style, Stylize};

use npuzzle::{Board, Move, Node, SearchResult};

/// Whitespace-separated tokens read lazily from a line-oriented source.
pub struct Input<R> {
    reader: R,
    pending: Vec<String>,
}

impl<R: BufRead> Input<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new(),
        }
    }

    fn next_token(&mut self) -> Result<String> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line).context("reading stdin")? == 0 {
                bail!("unexpected end of input");
            }
            self.pending = line.split_whitespace().rev().map(str::to_string).collect();
        }
        self.pending.pop().context("no token available")
    }

    /// Reads `width * width` tiles, possibly spread over several lines.
    pub fn read_board(&mut self, width: usize) -> Result<Board> {
        let tokens = (0..Board::cell_count(width)?)
            .map(|_| self.next_token())
            .collect::<Result<Vec<_>>>()?;
        Ok(Board::parse(width, &tokens.join(" "))?)
    }

    pub fn read_number<T>(&mut self) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let token = self.next_token()?;
        token
            .parse()
            .with_context(|| format!("{token:?} is not a number"))
    }
}

pub fn prompt(message: &str) -> Result<()> {
    print!("{message}");
    io::stdout().flush().context("flushing stdout")
}

/// Row-major grid, tab-separated, blank dimmed.
pub fn render(board: &Board) -> String {
    let mut out = String::new();
    for row in board.tiles().chunks(board.width()) {
        for &tile in row {
            let cell = if tile == npuzzle::puzzle::BLANK {
                style(tile).dark_grey()
            } else {
                style(tile).bold()
            };
            out.push_str(&cell.to_string());
            out.push('\t');
        }
        out.push('\n');
    }
    out
}

pub fn print_step(step: u64, node: &Node<Board>) {
    println!("step {step}");
    println!("depth {}", node.depth());
    println!("{}", render(node.state()));
}

pub fn print_summary(result: &SearchResult<Board>) {
    println!("Total Steps: {}", result.steps());
    if !result.success() {
        println!("{}", style("Failed.").red());
        return;
    }

    println!("{}", style("Success.").green());
    if let Some(depth) = result.depth() {
        let moves: Vec<String> = result
            .path()
            .windows(2)
            .filter_map(|pair| pair[0].move_to(&pair[1]))
            .map(|m: Move| m.to_string())
            .collect();
        println!("Solution depth: {depth}");
        if !moves.is_empty() {
            println!("Moves: {}", moves.join(" "));
        }
    }
}
