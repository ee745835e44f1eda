use crate::input::Direction;

/// Consecutive grants to one direction before the other side gets a turn.
pub const MAX_RUN: u32 = 2;

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Fairness {
    pub last_direction: Option<Direction>,
    pub run_length: u32,
    pub force_alternate: bool,
}

impl Fairness {
    pub fn new() -> Self {
        Default::default()
    }

    /// Record a grant to `served`. `opposite_waiting` tells whether the other
    /// direction has a ready train right now.
    pub fn update(&mut self, served: Direction, opposite_waiting: bool) {
        if self.last_direction == Some(served) {
            self.run_length += 1;
        } else {
            self.last_direction = Some(served);
            self.run_length = 1;
        }
        if self.run_length >= MAX_RUN && opposite_waiting {
            self.force_alternate = true;
        }
    }

    /// Takes the pending alternation, if any. The flag is cleared whether or
    /// not the caller finds a train going the forced way.
    pub fn take_forced(&mut self) -> Option<Direction> {
        let forced = if self.force_alternate {
            self.last_direction.map(Direction::opposite)
        } else {
            None
        };
        self.force_alternate = false;
        forced
    }

    /// Direction preferred when both directions have a candidate.
    pub fn preferred(&self) -> Direction {
        self.last_direction.map(Direction::opposite).unwrap_or(Direction::West)
    }
}
