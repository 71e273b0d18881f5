use std::{fmt::Display, str::FromStr};

use log::debug;

use crate::{direction::Direction, Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn neighbor(&self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::North if self.y > 0 => Some(Self::new(self.x, self.y - 1)),
            Direction::East => Some(Self::new(self.x + 1, self.y)),
            Direction::South => Some(Self::new(self.x, self.y + 1)),
            Direction::West if self.x > 0 => Some(Self::new(self.x - 1, self.y)),
            _ => None,
        }
    }

    pub fn manhattan_distance(&self, other: &Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    neighbors: [Option<NodeId>; 4],
    terminal: bool,
    pos: Position,
}

impl Node {
    pub fn neighbor(&self, dir: Direction) -> Option<NodeId> {
        self.neighbors[dir.index()]
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn pos(&self) -> Position {
        self.pos
    }
}

/// Open cells of a maze linked to their orthogonal open neighbors.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    start: NodeId,
    end: NodeId,
    row_n: usize,
    col_n: usize,
}

impl Graph {
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_n(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn row_n(&self) -> usize {
        self.row_n
    }

    pub fn col_n(&self) -> usize {
        self.col_n
    }

    pub fn neighbor(&self, id: NodeId, dir: Direction) -> Option<NodeId> {
        self.node(id).neighbor(dir)
    }

    pub fn pos(&self, id: NodeId) -> Position {
        self.node(id).pos
    }

    pub fn is_terminal(&self, id: NodeId) -> bool {
        self.node(id).terminal
    }

    /// Whether every edge has its mirror edge pointing back.
    pub fn is_symmetric(&self) -> bool {
        self.node_ids().all(|id| {
            Direction::all_dirs().iter().all(|dir| {
                self.neighbor(id, *dir)
                    .map(|other| self.neighbor(other, dir.reverse()) == Some(id))
                    .unwrap_or(true)
            })
        })
    }
}

impl FromStr for Graph {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut builder = GraphBuilder::new();
        for line in s.lines() {
            builder.add_row(line)?;
        }

        builder.build()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Wall,
    Floor,
}

#[derive(Debug, Default)]
pub struct GraphBuilder {
    tiles: Vec<Tile>,
    row_n: usize,
    line_n: usize,
    col_n: Option<usize>,
    start_pos: Option<Position>,
    end_pos: Option<Position>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank rows are skipped, but still counted for the row number in
    /// errors, so it matches the line in the input.
    pub fn add_row(&mut self, text: &str) -> Result<(), Error> {
        self.line_n += 1;
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        let this_col_n = text.chars().count();
        let expected = *self.col_n.get_or_insert(this_col_n);
        if expected != this_col_n {
            return Err(Error::InconsistentRow {
                row: self.line_n,
                expected,
                found: this_col_n,
            });
        }

        for (x, c) in text.chars().enumerate() {
            let pos = Position::new(x, self.row_n);
            self.tiles.push(match c {
                'S' => {
                    if let Some(last_pos) = self.start_pos {
                        return Err(Error::MultipleStartPosition(last_pos, pos));
                    }

                    self.start_pos = Some(pos);
                    Tile::Floor
                }
                'E' => {
                    if let Some(last_pos) = self.end_pos {
                        return Err(Error::MultipleEndPosition(last_pos, pos));
                    }

                    self.end_pos = Some(pos);
                    Tile::Floor
                }
                '#' => Tile::Wall,
                '.' => Tile::Floor,
                other => return Err(Error::InvalidCharForMap(other)),
            });
        }
        self.row_n += 1;

        Ok(())
    }

    pub fn build(self) -> Result<Graph, Error> {
        let Some(start_pos) = self.start_pos else {
            return Err(Error::NoStartPosition);
        };
        let Some(end_pos) = self.end_pos else {
            return Err(Error::NoEndPosition);
        };
        let col_n = self.col_n.unwrap_or(0);

        let mut ids = vec![None; self.tiles.len()];
        let mut nodes = Vec::new();
        for (ind, tile) in self.tiles.iter().enumerate() {
            if *tile == Tile::Floor {
                let pos = Position::new(ind % col_n, ind / col_n);
                ids[ind] = Some(NodeId(nodes.len()));
                nodes.push(Node {
                    neighbors: [None; 4],
                    terminal: pos == end_pos,
                    pos,
                });
            }
        }

        let id_at = |pos: &Position| -> Option<NodeId> {
            if pos.x < col_n && pos.y < self.row_n {
                ids[pos.y * col_n + pos.x]
            } else {
                None
            }
        };
        // Linking north and west from each node, with the mirror edge set at
        // the same time, covers every edge exactly once.
        for ind in 0..nodes.len() {
            let pos = nodes[ind].pos;
            for dir in [Direction::North, Direction::West] {
                if let Some(other) = pos.neighbor(dir).and_then(|p| id_at(&p)) {
                    nodes[ind].neighbors[dir.index()] = Some(other);
                    nodes[other.0].neighbors[dir.reverse().index()] = Some(NodeId(ind));
                }
            }
        }

        let (Some(start), Some(end)) = (id_at(&start_pos), id_at(&end_pos)) else {
            unreachable!("start and end positions are always floor tiles");
        };
        let graph = Graph {
            nodes,
            start,
            end,
            row_n: self.row_n,
            col_n,
        };
        debug_assert!(graph.is_symmetric(), "asymmetric adjacency in built graph");
        debug!(
            "Built graph of {} node(s) from a {}x{} grid, start at {}, end at {}.",
            graph.node_n(),
            graph.col_n(),
            graph.row_n(),
            start_pos,
            end_pos
        );

        Ok(graph)
    }
}
