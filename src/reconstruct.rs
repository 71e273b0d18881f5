use std::collections::HashSet;

use clap::ValueEnum;
use log::debug;

use crate::{
    direction::{step_cost, Direction},
    graph::{Graph, NodeId, Position},
    search::{BestCosts, State},
};

/// Cells lying on at least one minimum-cost path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptimalCells {
    nodes: HashSet<NodeId>,
}

impl OptimalCells {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter()
    }

    pub fn positions(&self, graph: &Graph) -> Vec<Position> {
        let mut positions = self
            .nodes
            .iter()
            .map(|id| graph.pos(*id))
            .collect::<Vec<_>>();
        positions.sort_by_key(|pos| (pos.y, pos.x));

        positions
    }

    /// Set union, for merging sets built from separate branches.
    pub fn merge(&mut self, other: OptimalCells) {
        self.nodes.extend(other.nodes);
    }
}

impl FromIterator<NodeId> for OptimalCells {
    fn from_iter<T: IntoIterator<Item = NodeId>>(iter: T) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Strategy {
    /// Walk back from the end over states whose recorded costs chain exactly.
    #[default]
    Backward,
    /// Re-run the search from the start, following ties, and keep every path
    /// that reaches the end at the minimum cost.
    Forward,
}

impl Strategy {
    pub fn reconstruct(&self, graph: &Graph, best: &BestCosts) -> OptimalCells {
        match self {
            Strategy::Backward => backward(graph, best),
            Strategy::Forward => forward(graph, best),
        }
    }
}

enum Frame {
    Enter(State, usize),
    Leave,
}

pub fn forward(graph: &Graph, best: &BestCosts) -> OptimalCells {
    let mut cells = OptimalCells::default();
    let Some(min_cost) = best.min_cost() else {
        return cells;
    };

    let mut path = Vec::new();
    let mut frames = vec![Frame::Enter(State::init(graph), 0)];
    let mut complete_path_n = 0usize;
    while let Some(frame) = frames.pop() {
        let (cur_state, cur_cost) = match frame {
            Frame::Enter(state, cost) => (state, cost),
            Frame::Leave => {
                path.pop();
                continue;
            }
        };

        if graph.is_terminal(cur_state.node) {
            if cur_cost <= min_cost {
                complete_path_n += 1;
                cells.nodes.insert(cur_state.node);
                cells.nodes.extend(path.iter().copied());
            }
            continue;
        }

        if best.get(&cur_state).map_or(true, |cost| cost < cur_cost) {
            continue;
        }

        path.push(cur_state.node);
        frames.push(Frame::Leave);
        frames.extend(
            cur_state
                .successors(graph)
                .rev()
                .map(|(next_state, step)| Frame::Enter(next_state, cur_cost + step)),
        );
    }
    debug!(
        "Forward reconstruction followed {} minimum-cost path(s) over {} cell(s).",
        complete_path_n,
        cells.len()
    );

    cells
}

pub fn backward(graph: &Graph, best: &BestCosts) -> OptimalCells {
    let mut cells = OptimalCells::default();
    let Some(min_cost) = best.min_cost() else {
        return cells;
    };

    let end = graph.end();
    cells.nodes.insert(end);
    let mut search_states = Direction::all_dirs()
        .iter()
        .flat_map(|arrive_dir| predecessors(graph, best, end, *arrive_dir, min_cost))
        .collect::<Vec<_>>();
    let mut searched_states = search_states.iter().copied().collect::<HashSet<_>>();
    while let Some(cur_state) = search_states.pop() {
        cells.nodes.insert(cur_state.node);
        let Some(cur_cost) = best.get(&cur_state) else {
            unreachable!("predecessors only yields recorded states");
        };
        for src_state in predecessors(graph, best, cur_state.node, cur_state.dir, cur_cost) {
            if searched_states.insert(src_state) {
                search_states.push(src_state);
            }
        }
    }
    debug!(
        "Backward reconstruction walked {} state(s) over {} cell(s).",
        searched_states.len(),
        cells.len()
    );

    cells
}

/// Recorded states one step before arriving at `node` facing `arrive_dir`
/// whose cost plus that step is exactly `cost`.
fn predecessors<'a>(
    graph: &'a Graph,
    best: &'a BestCosts,
    node: NodeId,
    arrive_dir: Direction,
    cost: usize,
) -> impl Iterator<Item = State> + 'a {
    graph
        .neighbor(node, arrive_dir.reverse())
        .into_iter()
        .flat_map(|src_node| {
            Direction::all_dirs()
                .iter()
                .map(move |dir| State::new(src_node, *dir))
        })
        .filter(move |src_state| {
            best.get(src_state).is_some_and(|src_cost| {
                src_cost + step_cost(src_state.dir.turns_to(arrive_dir)) == cost
            })
        })
}
