pub mod direction;
pub mod graph;
pub mod reconstruct;
pub mod search;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::Parser;

pub use direction::Direction;
pub use graph::{Graph, GraphBuilder, NodeId, Position};
pub use reconstruct::{OptimalCells, Strategy};
pub use search::{BestCosts, Engine, State};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Expect {expected} column(s) in each row, given {found} in row {row}.")]
    InconsistentRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Expect only one start position, given two({0}, {1}).")]
    MultipleStartPosition(Position, Position),
    #[error("Expect only one end position, given two({0}, {1}).")]
    MultipleEndPosition(Position, Position),
    #[error("Invalid character({0}) for map.")]
    InvalidCharForMap(char),
    #[error("No start position in map.")]
    NoStartPosition,
    #[error("No end position in map.")]
    NoEndPosition,
}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
    /// Search used to find the minimum cost of every state.
    #[arg(long, value_enum, default_value_t = Engine::BranchAndBound)]
    pub engine: Engine,
    /// How cells on minimum-cost paths are collected.
    #[arg(long, value_enum, default_value_t = Strategy::Backward)]
    pub strategy: Strategy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub min_cost: usize,
    pub optimal_cells: OptimalCells,
}

#[derive(Debug, Clone)]
pub struct Maze {
    graph: Graph,
}

impl FromStr for Maze {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self { graph: s.parse()? })
    }
}

impl Maze {
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn min_cost(&self, engine: Engine) -> Option<usize> {
        engine.discover(&self.graph).min_cost()
    }

    /// Both passes; `None` when the end can't be reached from the start.
    pub fn solve(&self, engine: Engine, strategy: Strategy) -> Option<Solution> {
        let best = engine.discover(&self.graph);
        let min_cost = best.min_cost()?;
        let optimal_cells = strategy.reconstruct(&self.graph, &best);

        Some(Solution {
            min_cost,
            optimal_cells,
        })
    }
}

pub fn read_maze<P: AsRef<Path>>(path: P) -> Result<Maze> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut builder = GraphBuilder::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!(
                "Failed to read line {} in given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
        builder.add_row(line.as_str())?
    }

    Ok(Maze {
        graph: builder.build()?,
    })
}
