use smallvec::SmallVec;
use std::cmp::Ordering;
use std::time::Duration;
use crate::input::TrainId;

/// A ready train waiting for the track.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Waiting {
    pub ready_time: Duration,
    pub id: TrainId,
}

impl Ord for Waiting {
    fn cmp(&self, other: &Waiting) -> Ordering {
        self.ready_time.cmp(&other.ready_time).
            then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Waiting {
    fn partial_cmp(&self, other: &Waiting) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ready trains of one direction and priority, earliest first.
#[derive(Default, Debug)]
pub struct WaitingSet {
    trains: SmallVec<[Waiting; 8]>,
}

impl WaitingSet {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }

    pub fn len(&self) -> usize {
        self.trains.len()
    }

    pub fn peek(&self) -> Option<&Waiting> {
        self.trains.first()
    }

    pub fn insert(&mut self, w: Waiting) {
        let idx = self.trains.partition_point(|x| *x < w);
        self.trains.insert(idx, w);
    }

    pub fn pop(&mut self) -> Option<Waiting> {
        if self.trains.is_empty() {
            None
        } else {
            Some(self.trains.remove(0))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Waiting> {
        self.trains.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(ms: u64, id: TrainId) -> Waiting {
        Waiting { ready_time: Duration::from_millis(ms), id }
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut set = WaitingSet::new();
        for x in &[w(300, 0), w(100, 5), w(200, 1), w(100, 2), w(300, 3), w(0, 9)] {
            set.insert(*x);
            let v: Vec<_> = set.iter().cloned().collect();
            assert!(v.windows(2).all(|p| p[0] < p[1]), "unsorted: {:?}", v);
        }
        let order: Vec<_> = set.iter().map(|x| x.id).collect();
        assert_eq!(order, vec![9, 2, 5, 1, 0, 3]);
    }

    #[test]
    fn test_equal_ready_time_by_id() {
        let mut set = WaitingSet::new();
        set.insert(w(0, 1));
        set.insert(w(0, 0));
        assert_eq!(set.peek().map(|x| x.id), Some(0));
    }

    #[test]
    fn test_pop() {
        let mut set = WaitingSet::new();
        assert!(set.pop().is_none());
        set.insert(w(20, 4));
        set.insert(w(10, 7));
        assert_eq!(set.len(), 2);
        assert_eq!(set.pop(), Some(w(10, 7)));
        assert_eq!(set.pop(), Some(w(20, 4)));
        assert!(set.is_empty());
    }
}
