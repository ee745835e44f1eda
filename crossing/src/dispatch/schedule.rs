use std::time::Duration;
use crate::input::{Direction, Priority, TrainId};
use super::fairness::Fairness;
use super::waiting::{Waiting, WaitingSet};

const DIRECTIONS: [Direction; 2] = [Direction::East, Direction::West];

/// A train that has just been given the track.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grant {
    pub id: TrainId,
    pub direction: Direction,
    pub priority: Priority,
    pub ready_time: Duration,
}

/// Scheduling state of the single track: the four waiting sets, the
/// current holder, the fairness state and the number of trains that have
/// not yet cleared the track.
///
/// `Schedule` itself does no locking. It lives inside
/// [`Track`](super::track::Track), which serializes all access.
#[derive(Debug)]
pub struct Schedule {
    waiting: [[WaitingSet; 2]; 2],
    holder: Option<TrainId>,
    fairness: Fairness,
    remaining: usize,
}

impl Schedule {
    pub fn new(trains: usize) -> Schedule {
        Schedule {
            waiting: Default::default(),
            holder: None,
            fairness: Fairness::new(),
            remaining: trains,
        }
    }

    fn set(&self, d: Direction, p: Priority) -> &WaitingSet {
        &self.waiting[d.index()][p.index()]
    }

    fn set_mut(&mut self, d: Direction, p: Priority) -> &mut WaitingSet {
        &mut self.waiting[d.index()][p.index()]
    }

    pub fn enqueue(&mut self, direction: Direction, priority: Priority,
                   ready_time: Duration, id: TrainId) {
        self.set_mut(direction, priority).insert(Waiting { ready_time, id });
    }

    pub fn has_ready(&self, d: Direction) -> bool {
        !self.set(d, Priority::High).is_empty() || !self.set(d, Priority::Low).is_empty()
    }

    pub fn any_ready(&self) -> bool {
        DIRECTIONS.iter().any(|d| self.has_ready(*d))
    }

    pub fn is_free(&self) -> bool {
        self.holder.is_none()
    }

    pub fn holder(&self) -> Option<TrainId> {
        self.holder
    }

    pub fn fairness(&self) -> &Fairness {
        &self.fairness
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Best candidate set of one direction: high priority first.
    fn head_of(&self, d: Direction) -> Option<Priority> {
        [Priority::High, Priority::Low].iter().cloned()
            .find(|p| !self.set(d, *p).is_empty())
    }

    /// Picks the set holding the next train to cross. Consumes a pending
    /// forced alternation even when the forced direction has nobody ready.
    fn select(&mut self) -> Option<(Direction, Priority)> {
        if let Some(must) = self.fairness.take_forced() {
            if let Some(p) = self.head_of(must) {
                return Some((must, p));
            }
        }

        for p in &[Priority::High, Priority::Low] {
            let east = !self.set(Direction::East, *p).is_empty();
            let west = !self.set(Direction::West, *p).is_empty();
            match (east, west) {
                (true, true) => return Some((self.fairness.preferred(), *p)),
                (true, false) => return Some((Direction::East, *p)),
                (false, true) => return Some((Direction::West, *p)),
                (false, false) => {},
            }
        }
        None
    }

    /// Hands the track to the next train, if the track is free and anyone is
    /// waiting. The train leaves its waiting set and the fairness state is
    /// updated before this returns.
    pub fn grant(&mut self) -> Option<Grant> {
        if !self.is_free() {
            return None;
        }
        let (direction, priority) = self.select()?;
        let w = self.set_mut(direction, priority).pop()?;
        self.holder = Some(w.id);
        let opposite_waiting = self.has_ready(direction.opposite());
        self.fairness.update(direction, opposite_waiting);
        Some(Grant { id: w.id, direction, priority, ready_time: w.ready_time })
    }

    /// The holder has cleared the track. Returns false if `id` was not the
    /// holder, in which case nothing changes.
    pub fn release(&mut self, id: TrainId) -> bool {
        if self.holder != Some(id) {
            return false;
        }
        self.holder = None;
        self.remaining = self.remaining.saturating_sub(1);
        true
    }

    pub fn shutdown(&mut self) {
        self.remaining = 0;
    }
}
