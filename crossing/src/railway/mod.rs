//! Trains running over the single track.

pub mod driver;

pub use self::driver::Driver;
