use log::{debug, trace};
use parking_lot::{Condvar, Mutex};
use std::time::Duration;
use crate::input::{Direction, Priority, TrainId};
use super::schedule::{Grant, Schedule};

/// The single track, shared by the dispatcher and every train.
///
/// All scheduling state sits behind one mutex. The dispatcher sleeps on
/// `dispatcher` until a train is ready and the track is free; trains sleep on
/// the condition variable of their own direction until they are the holder.
pub struct Track {
    schedule: Mutex<Schedule>,
    dispatcher: Condvar,
    lanes: [Condvar; 2],
}

impl Track {
    pub fn new(trains: usize) -> Track {
        Track {
            schedule: Mutex::new(Schedule::new(trains)),
            dispatcher: Condvar::new(),
            lanes: [Condvar::new(), Condvar::new()],
        }
    }

    /// Puts a ready train in line and blocks until it holds the track.
    pub fn wait_for_track(&self, id: TrainId, direction: Direction, priority: Priority,
                          ready_time: Duration) {
        let mut schedule = self.schedule.lock();
        schedule.enqueue(direction, priority, ready_time, id);
        self.dispatcher.notify_one();

        // Everyone going this way is woken by a grant; only the holder leaves.
        while schedule.holder() != Some(id) {
            self.lanes[direction.index()].wait(&mut schedule);
        }
        trace!("train {} leaves the waiting line", id);
    }

    /// Gives the track back. `on_release` runs while the lock is held, so
    /// anything it reports is ordered before the next grant.
    pub fn leave_track<F: FnOnce()>(&self, id: TrainId, on_release: F) {
        let mut schedule = self.schedule.lock();
        on_release();
        if schedule.release(id) {
            trace!("train {} off the track, {} still to cross", id, schedule.remaining());
        } else {
            debug!("train {} released a track held by {:?}", id, schedule.holder());
        }
        self.dispatcher.notify_one();
    }

    /// Dispatcher loop. Returns once every train has cleared the track or
    /// `shutdown` was called.
    pub fn dispatch(&self) -> Vec<Grant> {
        let mut grants = Vec::new();
        let mut schedule = self.schedule.lock();

        loop {
            while !schedule.is_finished() && !(schedule.is_free() && schedule.any_ready()) {
                self.dispatcher.wait(&mut schedule);
            }
            if schedule.is_finished() {
                break;
            }

            if let Some(grant) = schedule.grant() {
                let fairness = schedule.fairness();
                debug!("granting train {} ({:?} {:?}), run of {} {:?}{}",
                       grant.id, grant.direction, grant.priority,
                       fairness.run_length, fairness.last_direction,
                       if fairness.force_alternate { ", alternation pending" } else { "" });
                self.lanes[grant.direction.index()].notify_all();
                grants.push(grant);
            }
        }

        debug!("dispatcher done after {} grants", grants.len());
        grants
    }

    /// Stops the dispatcher even if trains are unaccounted for.
    pub fn shutdown(&self) {
        let mut schedule = self.schedule.lock();
        schedule.shutdown();
        self.dispatcher.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use crate::input::Direction::*;
    use crate::input::Priority::*;

    #[test]
    fn test_dispatch_without_trains_returns() {
        let track = Track::new(0);
        assert!(track.dispatch().is_empty());
    }

    #[test]
    fn test_shutdown_stops_dispatcher() {
        let track = Track::new(3);
        thread::scope(|s| {
            let d = s.spawn(|| track.dispatch());
            thread::sleep(Duration::from_millis(20));
            track.shutdown();
            assert!(d.join().unwrap().is_empty());
        });
        assert!(track.schedule.lock().is_finished());
    }

    #[test]
    fn test_single_train_round_trip() {
        let track = Track::new(1);
        thread::scope(|s| {
            let d = s.spawn(|| track.dispatch());
            track.wait_for_track(0, West, Low, Duration::from_millis(0));
            let mut released = false;
            track.leave_track(0, || released = true);
            assert!(released);
            let grants = d.join().unwrap();
            assert_eq!(grants.len(), 1);
            assert_eq!(grants[0].id, 0);
        });
        assert!(track.schedule.lock().is_finished());
        assert!(track.schedule.lock().is_free());
    }

    #[test]
    fn test_same_direction_waiters_one_at_a_time() {
        let n = 16;
        let track = Track::new(n);
        let in_flight = AtomicUsize::new(0);
        let crossed = Mutex::new(Vec::new());
        thread::scope(|s| {
            let d = s.spawn(|| track.dispatch());
            for id in 0..n {
                let track = &track;
                let in_flight = &in_flight;
                let crossed = &crossed;
                s.spawn(move || {
                    track.wait_for_track(id, East, High, Duration::from_millis(id as u64));
                    assert_eq!(in_flight.fetch_add(1, Ordering::SeqCst), 0, "train {} joined another", id);
                    thread::sleep(Duration::from_millis(1));
                    assert_eq!(in_flight.load(Ordering::SeqCst), 1);
                    crossed.lock().push(id);
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    track.leave_track(id, || {});
                });
            }
            assert_eq!(d.join().unwrap().len(), n);
        });
        assert_eq!(in_flight.into_inner(), 0);
        let mut seen = crossed.into_inner();
        seen.sort();
        assert_eq!(seen, (0..n).collect::<Vec<_>>());
    }
}
