use std::{cmp::Reverse, collections::BinaryHeap};

use clap::ValueEnum;
use log::debug;

use crate::{
    direction::{step_cost, Direction},
    graph::{Graph, NodeId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    pub node: NodeId,
    pub dir: Direction,
}

impl State {
    pub fn new(node: NodeId, dir: Direction) -> Self {
        Self { node, dir }
    }

    pub fn init(graph: &Graph) -> Self {
        Self::new(graph.start(), Direction::East)
    }

    /// States reachable in one step, with the cost of that step, straight
    /// first, then right, reverse and left.
    pub fn successors<'a>(
        &self,
        graph: &'a Graph,
    ) -> impl DoubleEndedIterator<Item = (State, usize)> + 'a {
        let node = self.node;
        self.dir.turns().filter_map(move |(turn_n, dir)| {
            graph
                .neighbor(node, dir)
                .map(|next| (State::new(next, dir), step_cost(turn_n)))
        })
    }
}

/// Minimum known cost of every explored state.
///
/// The end cell is direction-agnostic, so arrivals there are recorded in one
/// separate slot instead of per direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestCosts {
    costs: Vec<Option<usize>>,
    terminal: Option<usize>,
}

impl BestCosts {
    fn new(node_n: usize) -> Self {
        Self {
            costs: vec![None; node_n * 4],
            terminal: None,
        }
    }

    pub fn get(&self, state: &State) -> Option<usize> {
        self.costs[Self::slot(state)]
    }

    /// `None` when the end can't be reached.
    pub fn min_cost(&self) -> Option<usize> {
        self.terminal
    }

    pub fn recorded_n(&self) -> usize {
        self.costs.iter().filter(|cost| cost.is_some()).count()
    }

    fn record(&mut self, state: &State, cost: usize) {
        let slot = &mut self.costs[Self::slot(state)];
        debug_assert!(
            slot.map_or(true, |last| cost < last),
            "cost of {:?} raised from {:?} to {}",
            state,
            slot,
            cost
        );
        *slot = Some(cost);
    }

    fn record_terminal(&mut self, cost: usize) {
        self.terminal = Some(self.terminal.map_or(cost, |last| last.min(cost)));
    }

    fn slot(state: &State) -> usize {
        state.node.index() * 4 + state.dir.index()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Engine {
    /// Depth-first search that only re-expands a state on strict improvement.
    #[default]
    BranchAndBound,
    /// Binary-heap Dijkstra over the same states.
    Dijkstra,
}

impl Engine {
    pub fn discover(&self, graph: &Graph) -> BestCosts {
        match self {
            Engine::BranchAndBound => branch_and_bound(graph),
            Engine::Dijkstra => dijkstra(graph),
        }
    }
}

pub fn branch_and_bound(graph: &Graph) -> BestCosts {
    let mut best = BestCosts::new(graph.node_n());
    let mut search_states = vec![(State::init(graph), 0)];
    let (mut expanded_n, mut pruned_n) = (0usize, 0usize);
    while let Some((cur_state, cur_cost)) = search_states.pop() {
        if graph.is_terminal(cur_state.node) {
            best.record_terminal(cur_cost);
            continue;
        }

        if best.get(&cur_state).is_some_and(|cost| cost <= cur_cost) {
            pruned_n += 1;
            continue;
        }

        best.record(&cur_state, cur_cost);
        expanded_n += 1;
        // Popped from the back, so pushed in reverse priority.
        search_states.extend(
            cur_state
                .successors(graph)
                .rev()
                .map(|(next_state, step)| (next_state, cur_cost + step)),
        );
    }
    debug!(
        "Branch and bound expanded {} state(s) and pruned {}, minimum cost {:?}.",
        expanded_n,
        pruned_n,
        best.min_cost()
    );

    best
}

pub fn dijkstra(graph: &Graph) -> BestCosts {
    let mut best = BestCosts::new(graph.node_n());
    let mut possible_states = BinaryHeap::from([Reverse((0, State::init(graph)))]);
    let (mut expanded_n, mut pruned_n) = (0usize, 0usize);
    while let Some(Reverse((cur_cost, cur_state))) = possible_states.pop() {
        if graph.is_terminal(cur_state.node) {
            best.record_terminal(cur_cost);
            continue;
        }

        if best.get(&cur_state).is_some_and(|cost| cost <= cur_cost) {
            pruned_n += 1;
            continue;
        }

        best.record(&cur_state, cur_cost);
        expanded_n += 1;
        for (next_state, step) in cur_state.successors(graph) {
            let next_cost = cur_cost + step;
            if best.get(&next_state).map_or(true, |cost| next_cost < cost) {
                possible_states.push(Reverse((next_cost, next_state)));
            }
        }
    }
    debug!(
        "Dijkstra expanded {} state(s) and pruned {}, minimum cost {:?}.",
        expanded_n,
        pruned_n,
        best.min_cost()
    );

    best
}
