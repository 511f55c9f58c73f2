mod console;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use log::{warn, LevelFilter};
use rand::{rngs::StdRng, SeedableRng};

use console::Input;
use npuzzle::{Board, Node, SearchResult, Strategy};

#[derive(Debug, Parser)]
#[command(name = "npuzzle", about = "Solve sliding-tile puzzles with BFS, DFS, best-first or A*")]
struct Args {
    /// Board width
    #[arg(short = 'n', long, default_value_t = 3)]
    size: usize,

    /// Search strategy (1 BFS, 2 DFS, 3 best-first, 4 A*); prompted when absent
    #[arg(short, long)]
    strategy: Option<u32>,

    /// Depth bound for DFS; prompted when absent
    #[arg(short = 'd', long)]
    max_depth: Option<usize>,

    /// Generate the start board with this many random moves from the solved board
    #[arg(long)]
    scramble: Option<usize>,

    /// Seed for --scramble
    #[arg(long, requires = "scramble")]
    seed: Option<u64>,

    /// Only print the summary
    #[arg(short, long)]
    quiet: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let stdin = io::stdin();
    let mut input = Input::new(stdin.lock());

    let (start, target) = match args.scramble {
        Some(moves) => {
            let target = Board::solved(args.size)?;
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let start = target.scramble(moves, &mut rng);
            println!("Start board:\n{}", console::render(&start));
            println!("Target board:\n{}", console::render(&target));
            (start, target)
        }
        None => {
            console::prompt("Please input the start board:\n")?;
            let start = input.read_board(args.size).context("reading start board")?;
            console::prompt("Please input the target board:\n")?;
            let target = input.read_board(args.size).context("reading target board")?;
            (start, target)
        }
    };

    for (name, board) in [("start", &start), ("target", &target)] {
        if !board.is_permutation() {
            warn!("{name} board is not a permutation of 0..{}", board.tiles().len());
        }
    }

    let option = match args.strategy {
        Some(option) => option,
        None => {
            println!("The search method implemented: ");
            for (option, label) in Strategy::MENU {
                println!("{option}. {label}");
            }
            console::prompt("Please select the search method [1-4]: ")?;
            input.read_number().context("reading search method")?
        }
    };

    let max_depth = match (option, args.max_depth) {
        (Strategy::DEPTH_FIRST_OPTION, None) => {
            console::prompt("Please input the max depth: ")?;
            Some(input.read_number().context("reading max depth")?)
        }
        (_, depth) => depth,
    };

    let result = match Strategy::from_option(option, max_depth) {
        Ok(strategy) => {
            log::info!("running {strategy}");
            strategy.run(&start, &target, |step: u64, node: &Node<Board>| {
                if !args.quiet {
                    console::print_step(step, node);
                }
            })
        }
        Err(err) => {
            println!("Error: {err}");
            SearchResult::default()
        }
    };

    console::print_summary(&result);
    Ok(())
}
