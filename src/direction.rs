use std::fmt::Display;

pub const MOVE_COST: usize = 1;
pub const TURN_COST: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        write!(f, "{}", name)
    }
}

impl Direction {
    pub fn all_dirs() -> &'static [Direction] {
        static ALL_DIRECTIONS: [Direction; 4] = [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ];

        &ALL_DIRECTIONS
    }

    pub fn index(&self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    pub fn turn_clockwise(&self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    pub fn turn_counterclockwise(&self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::East => Direction::North,
            Direction::South => Direction::East,
            Direction::West => Direction::South,
        }
    }

    pub fn reverse(&self) -> Self {
        self.turn_clockwise().turn_clockwise()
    }

    /// Direction after `n` clockwise quarter turns.
    pub fn quarter_turns(&self, n: usize) -> Self {
        match n % 4 {
            0 => *self,
            1 => self.turn_clockwise(),
            2 => self.reverse(),
            _ => self.turn_counterclockwise(),
        }
    }

    /// Clockwise quarter turns needed to face `to`, in `0..4`.
    pub fn turns_to(&self, to: Direction) -> usize {
        (to.index() + 4 - self.index()) % 4
    }

    /// Straight, right, reverse and left, in that order, with the number of
    /// clockwise quarter turns each one takes.
    pub fn turns(&self) -> impl DoubleEndedIterator<Item = (usize, Direction)> {
        let from = *self;
        (0..4).map(move |n| (n, from.quarter_turns(n)))
    }
}

/// Cost of turning `quarter_turns` clockwise and then moving one cell.
///
/// A left turn is three clockwise quarter turns but costs a single turn.
pub fn step_cost(quarter_turns: usize) -> usize {
    let turn_n = match quarter_turns % 4 {
        0 => 0,
        1 | 3 => 1,
        _ => 2,
    };

    turn_n * TURN_COST + MOVE_COST
}
