use std::env;

use anyhow::{bail, Context, Result};
use chess_rules::utils::divide;
use chess_rules::Board;

fn main() -> Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    let args: Vec<String> = env::args().collect();
    let fen = args
        .get(1)
        .context("usage: perft-debug <fen> <depth> [expected]")?;
    let depth: usize = args
        .get(2)
        .context("depth is missing")?
        .parse()
        .context("depth must be a number")?;
    let expected: Option<usize> = args
        .get(3)
        .map(|value| value.parse())
        .transpose()
        .context("expected node count must be a number")?;
    if depth == 0 {
        bail!("depth must be at least 1");
    }

    let (board, color) = Board::from_fen(fen).context("can't load the position")?;
    let mut total = 0;
    for (_move, nodes) in divide(&board, color, depth) {
        println!("{_move}: {nodes}");
        total += nodes;
    }
    println!("\nNodes searched: {total}");
    if let Some(expected) = expected {
        if total != expected {
            bail!("expected {expected} nodes, found {total}");
        }
    }
    Ok(())
}
