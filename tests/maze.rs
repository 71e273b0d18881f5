use std::collections::HashSet;

use reindeer_maze::{
    reconstruct, search, Direction, Engine, Error, Graph, Maze, OptimalCells, Position, Strategy,
};

const SAMPLE_A: &str = include_str!("inputs/sample_a.txt");
const SAMPLE_B: &str = include_str!("inputs/sample_b.txt");
const WALLED_OFF: &str = include_str!("inputs/walled_off.txt");

fn maze(text: &str) -> Maze {
    text.parse().unwrap()
}

fn all_combinations() -> impl Iterator<Item = (Engine, Strategy)> {
    [Engine::BranchAndBound, Engine::Dijkstra]
        .into_iter()
        .flat_map(|engine| {
            [Strategy::Backward, Strategy::Forward]
                .into_iter()
                .map(move |strategy| (engine, strategy))
        })
}

#[test]
fn sample_a_has_right_answers() {
    for (engine, strategy) in all_combinations() {
        let solution = maze(SAMPLE_A).solve(engine, strategy).unwrap();
        assert_eq!(solution.min_cost, 7036, "{:?}/{:?}", engine, strategy);
        assert_eq!(solution.optimal_cells.len(), 45, "{:?}/{:?}", engine, strategy);
    }
}

#[test]
fn sample_b_has_right_answers() {
    for (engine, strategy) in all_combinations() {
        let solution = maze(SAMPLE_B).solve(engine, strategy).unwrap();
        assert_eq!(solution.min_cost, 11048, "{:?}/{:?}", engine, strategy);
        assert_eq!(solution.optimal_cells.len(), 64, "{:?}/{:?}", engine, strategy);
    }
}

#[test]
fn straight_corridor_costs_manhattan_distance() {
    let maze = maze("#######\n#S...E#\n#######\n");
    let solution = maze
        .solve(Engine::BranchAndBound, Strategy::Forward)
        .unwrap();

    assert_eq!(solution.min_cost, 4);
    assert_eq!(
        solution.optimal_cells.positions(maze.graph()),
        (1..=5).map(|x| Position::new(x, 1)).collect::<Vec<_>>()
    );
}

#[test]
fn dead_end_start_needs_reverse() {
    let maze = maze("#####\n#E.S#\n#####");
    let solution = maze
        .solve(Engine::BranchAndBound, Strategy::Backward)
        .unwrap();

    assert_eq!(solution.min_cost, 2002);
    assert_eq!(solution.optimal_cells.len(), 3);
}

#[test]
fn walled_off_end_has_no_path() {
    let maze = maze(WALLED_OFF);
    for (engine, strategy) in all_combinations() {
        assert_eq!(maze.min_cost(engine), None);
        assert_eq!(maze.solve(engine, strategy), None);
    }

    let best = search::branch_and_bound(maze.graph());
    assert!(best.min_cost().is_none());
    assert!(reconstruct::forward(maze.graph(), &best).is_empty());
    assert!(reconstruct::backward(maze.graph(), &best).is_empty());
}

#[test]
fn repeated_runs_are_identical() {
    let maze = maze(SAMPLE_B);
    let first = maze.solve(Engine::BranchAndBound, Strategy::Forward);
    for _ in 0..3 {
        assert_eq!(maze.solve(Engine::BranchAndBound, Strategy::Forward), first);
    }
}

#[test]
fn engines_agree_on_every_state() {
    for text in [SAMPLE_A, SAMPLE_B, WALLED_OFF] {
        let graph = text.parse::<Graph>().unwrap();
        let branch_and_bound = search::branch_and_bound(&graph);
        let dijkstra = search::dijkstra(&graph);

        assert_eq!(branch_and_bound, dijkstra);
    }
}

#[test]
fn strategies_agree_on_cells() {
    for text in [SAMPLE_A, SAMPLE_B] {
        let graph = text.parse::<Graph>().unwrap();
        let best = search::branch_and_bound(&graph);

        assert_eq!(
            reconstruct::forward(&graph, &best),
            reconstruct::backward(&graph, &best)
        );
    }
}

#[test]
fn optimal_cells_contain_start_and_end() {
    for text in [SAMPLE_A, SAMPLE_B] {
        let maze = maze(text);
        let graph = maze.graph();
        for (engine, strategy) in all_combinations() {
            let cells = maze.solve(engine, strategy).unwrap().optimal_cells;
            assert!(cells.contains(graph.start()));
            assert!(cells.contains(graph.end()));
        }
    }
}

#[test]
fn min_cost_is_at_least_manhattan_distance() {
    for text in [SAMPLE_A, SAMPLE_B, "#######\n#S...E#\n#######"] {
        let maze = maze(text);
        let graph = maze.graph();
        let distance = graph.pos(graph.start()).manhattan_distance(&graph.pos(graph.end()));

        assert!(maze.min_cost(Engine::BranchAndBound).unwrap() >= distance);
    }
}

#[test]
fn start_state_costs_nothing() {
    let graph = SAMPLE_A.parse::<Graph>().unwrap();
    let best = search::branch_and_bound(&graph);

    assert_eq!(
        best.get(&reindeer_maze::State::new(graph.start(), Direction::East)),
        Some(0)
    );
    assert!(best.recorded_n() <= graph.node_n() * 4);
}

#[test]
fn merged_cells_are_union() {
    let graph = SAMPLE_A.parse::<Graph>().unwrap();
    let best = search::branch_and_bound(&graph);
    let all = reconstruct::backward(&graph, &best);
    let ids = all.iter().copied().collect::<Vec<_>>();
    let (left, right) = ids.split_at(ids.len() / 2);

    let mut merged = left.iter().copied().collect::<OptimalCells>();
    merged.merge(right.iter().copied().collect());

    assert_eq!(merged, all);
}

#[test]
fn built_graph_is_symmetric() {
    for text in [SAMPLE_A, SAMPLE_B, WALLED_OFF] {
        let graph = text.parse::<Graph>().unwrap();
        assert!(graph.is_symmetric());
    }
}

#[test]
fn built_graph_skips_walls() {
    let graph = "####\n#SE#\n#.##\n####".parse::<Graph>().unwrap();
    let start = graph.start();

    assert_eq!(graph.node_n(), 3);
    assert_eq!(graph.pos(start), Position::new(1, 1));
    assert_eq!(graph.neighbor(start, Direction::East), Some(graph.end()));
    assert_eq!(graph.neighbor(start, Direction::North), None);
    assert_eq!(graph.neighbor(start, Direction::West), None);
    assert!(graph.is_terminal(graph.end()));
    assert!(!graph.is_terminal(start));

    let below = graph.neighbor(start, Direction::South).unwrap();
    assert_eq!(graph.pos(below), Position::new(1, 2));
    assert_eq!(graph.neighbor(below, Direction::North), Some(start));
    assert_eq!(graph.neighbor(graph.end(), Direction::South), None);
}

#[test]
fn grid_without_border_links_edges() {
    let graph = "S.\n.E".parse::<Graph>().unwrap();
    let ids = graph.node_ids().collect::<HashSet<_>>();

    assert_eq!(ids.len(), 4);
    assert_eq!((graph.col_n(), graph.row_n()), (2, 2));
    assert!(graph.is_symmetric());

    let solution = "S.\n.E"
        .parse::<Maze>()
        .unwrap()
        .solve(Engine::BranchAndBound, Strategy::Forward)
        .unwrap();
    // Turning south first costs a second turn to face east again.
    assert_eq!(solution.min_cost, 1002);
    assert_eq!(solution.optimal_cells.len(), 3);
}

#[test]
fn inconsistent_rows_are_rejected() {
    let err = "#####\n#S.E#\n####".parse::<Graph>().unwrap_err();

    assert!(matches!(
        err,
        Error::InconsistentRow {
            row: 3,
            expected: 5,
            found: 4
        }
    ));
}

#[test]
fn crlf_rows_and_trailing_blank_line_are_accepted() {
    let maze = maze("#####\r\n#S.E#\r\n\r\n#####\r\n");
    let graph = maze.graph();

    assert_eq!((graph.col_n(), graph.row_n()), (5, 3));
    for (engine, strategy) in all_combinations() {
        let solution = maze.solve(engine, strategy).unwrap();
        assert_eq!(solution.min_cost, 2);
        assert_eq!(solution.optimal_cells.len(), 3);
    }
}

#[test]
fn blank_row_between_rows_is_skipped() {
    let maze = maze("#####\n\n#S.E#\n  \n#####");

    assert_eq!(maze.graph().row_n(), 3);
    assert_eq!(maze.min_cost(Engine::BranchAndBound), Some(2));
}

#[test]
fn inconsistent_row_after_blank_line_reports_its_line() {
    let err = "#####\n\n#S.E#\n###".parse::<Graph>().unwrap_err();

    assert!(matches!(
        err,
        Error::InconsistentRow {
            row: 4,
            expected: 5,
            found: 3
        }
    ));
    assert_eq!(
        err.to_string(),
        "Expect 5 column(s) in each row, given 3 in row 4."
    );
}

#[test]
fn missing_markers_are_rejected() {
    assert!(matches!(
        "####\n#.E#\n####".parse::<Graph>(),
        Err(Error::NoStartPosition)
    ));
    assert!(matches!(
        "####\n#S.#\n####".parse::<Graph>(),
        Err(Error::NoEndPosition)
    ));
    assert!(matches!("".parse::<Graph>(), Err(Error::NoStartPosition)));
}

#[test]
fn duplicate_markers_are_rejected() {
    assert!(matches!(
        "#####\n#SSE#\n#####".parse::<Graph>(),
        Err(Error::MultipleStartPosition(first, second))
            if first == Position::new(1, 1) && second == Position::new(2, 1)
    ));
    assert!(matches!(
        "#####\n#SEE#\n#####".parse::<Graph>(),
        Err(Error::MultipleEndPosition(_, _))
    ));
}

#[test]
fn unknown_characters_are_rejected() {
    assert!(matches!(
        "#####\n#S?E#\n#####".parse::<Graph>(),
        Err(Error::InvalidCharForMap('?'))
    ));
}

#[test]
fn direction_turns_in_priority_order() {
    let turns = Direction::East.turns().collect::<Vec<_>>();

    assert_eq!(
        turns,
        vec![
            (0, Direction::East),
            (1, Direction::South),
            (2, Direction::West),
            (3, Direction::North),
        ]
    );
    for dir in Direction::all_dirs() {
        assert_eq!(dir.turn_clockwise(), dir.quarter_turns(1));
        assert_eq!(dir.turn_counterclockwise(), dir.quarter_turns(3));
        assert_eq!(dir.reverse().reverse(), *dir);
        assert_eq!(dir.turns_to(dir.turn_counterclockwise()), 3);
    }
    assert_eq!(reindeer_maze::direction::step_cost(0), 1);
    assert_eq!(reindeer_maze::direction::step_cost(1), 1001);
    assert_eq!(reindeer_maze::direction::step_cost(2), 2001);
    assert_eq!(reindeer_maze::direction::step_cost(3), 1001);
}

#[test]
fn successors_follow_turn_priority() {
    let graph = "...\n.SE\n...".parse::<Graph>().unwrap();
    let start = graph.start();
    let successors = reindeer_maze::State::init(&graph)
        .successors(&graph)
        .map(|(state, step)| (graph.pos(state.node), state.dir, step))
        .collect::<Vec<_>>();

    assert_eq!(graph.pos(start), Position::new(1, 1));
    assert_eq!(
        successors,
        vec![
            (Position::new(2, 1), Direction::East, 1),
            (Position::new(1, 2), Direction::South, 1001),
            (Position::new(0, 1), Direction::West, 2001),
            (Position::new(1, 0), Direction::North, 1001),
        ]
    );
}
