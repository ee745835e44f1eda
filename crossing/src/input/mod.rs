//! Train list input.

pub mod trains;

pub use self::trains::{parse_trains, Direction, ParseError, Priority, Train, TrainId, MAX_TRAINS};
