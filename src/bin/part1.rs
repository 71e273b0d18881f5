use anyhow::{Context, Result};
use clap::Parser;
use reindeer_maze::CLIArgs;

fn main() -> Result<()> {
    env_logger::init();
    let args = CLIArgs::parse();
    let maze = reindeer_maze::read_maze(&args.input_path).with_context(|| {
        format!(
            "Failed to read maze from given file({}).",
            args.input_path.display()
        )
    })?;

    if let Some(min_cost) = maze.min_cost(args.engine) {
        println!("The minimum score of completing the maze is {}.", min_cost);
    } else {
        eprintln!("There're no paths can complete the given maze.");
    }

    Ok(())
}
