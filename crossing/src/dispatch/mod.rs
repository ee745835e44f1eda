//! Track arbitration: who crosses next, and the locking around it.

pub mod waiting;
pub mod fairness;
pub mod schedule;
pub mod track;

pub use self::schedule::{Grant, Schedule};
pub use self::track::Track;
