use log::trace;
use crate::clock::Clock;
use crate::dispatch::Track;
use crate::input::Train;
use crate::output::history::{EventSink, TrainLogEvent};

/// Drives one train through loading, waiting, crossing and leaving.
pub struct Driver<'a> {
    train: &'a Train,
    track: &'a Track,
    clock: &'a dyn Clock,
    logger: EventSink<'a>,
}

impl<'a> Driver<'a> {
    pub fn new(train: &'a Train,
               track: &'a Track,
               clock: &'a dyn Clock,
               logger: EventSink<'a>)
               -> Self {
        Driver { train, track, clock, logger }
    }

    fn log(&self, event: TrainLogEvent) {
        (self.logger)(self.clock.elapsed(), event);
    }

    /// Runs the train to completion.
    pub fn run(&self) {
        let t = self.train;

        self.clock.sleep(t.load);
        let ready_time = self.clock.elapsed();
        (self.logger)(ready_time, TrainLogEvent::Ready(t.id, t.direction));
        trace!("train {} ready at {:?}", t.id, ready_time);

        self.track.wait_for_track(t.id, t.direction, t.priority, ready_time);

        self.log(TrainLogEvent::OnTrack(t.id, t.direction));
        self.clock.sleep(t.cross);

        self.track.leave_track(t.id, || self.log(TrainLogEvent::OffTrack(t.id, t.direction)));
        trace!("train {} done", t.id);
    }
}
