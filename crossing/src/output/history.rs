use parking_lot::Mutex;
use std::fmt;
use std::time::Duration;
use crate::input::{Direction, TrainId};

/// Something a train reports while going through the crossing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrainLogEvent {
    Ready(TrainId, Direction),
    OnTrack(TrainId, Direction),
    OffTrack(TrainId, Direction),
}

impl TrainLogEvent {
    pub fn train(&self) -> TrainId {
        match *self {
            TrainLogEvent::Ready(id, _) |
            TrainLogEvent::OnTrack(id, _) |
            TrainLogEvent::OffTrack(id, _) => id,
        }
    }
}

impl fmt::Display for TrainLogEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TrainLogEvent::Ready(id, d) =>
                write!(f, "Train {:2} is ready to go {:>4}", id, d),
            TrainLogEvent::OnTrack(id, d) =>
                write!(f, "Train {:2} is ON the main track going {:>4}", id, d),
            TrainLogEvent::OffTrack(id, d) =>
                write!(f, "Train {:2} is OFF the main track after going {:>4}", id, d),
        }
    }
}

/// Receives every event together with the elapsed time it happened at.
pub type EventSink<'a> = &'a (dyn Fn(Duration, TrainLogEvent) + Sync);

#[derive(Debug, Default)]
pub struct History {
    pub events: Vec<(Duration, TrainLogEvent)>,
}

impl History {
    /// Grants in the order trains got onto the track.
    pub fn crossings(&self) -> Vec<TrainId> {
        self.events.iter().filter_map(|&(_, e)| match e {
            TrainLogEvent::OnTrack(id, _) => Some(id),
            _ => None,
        }).collect()
    }

    pub fn of_train(&self, id: TrainId) -> Vec<TrainLogEvent> {
        self.events.iter().map(|&(_, e)| e).filter(|e| e.train() == id).collect()
    }
}

/// Collects events from many threads into a `History`.
#[derive(Default)]
pub struct Recorder {
    history: Mutex<History>,
}

impl Recorder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn record(&self, t: Duration, e: TrainLogEvent) {
        self.history.lock().events.push((t, e));
    }

    pub fn into_history(self) -> History {
        self.history.into_inner()
    }
}

/// Print one crossing per line on the following format:
/// `train direction ready on off`, times in seconds.
pub fn crossings_table(h: &History) -> Result<String, fmt::Error> {
    use std::collections::BTreeMap;
    use std::fmt::Write;

    let mut rows: BTreeMap<TrainId, (Option<Direction>, [Option<Duration>; 3])> = BTreeMap::new();
    for &(t, ev) in &h.events {
        let (id, d, col) = match ev {
            TrainLogEvent::Ready(id, d) => (id, d, 0),
            TrainLogEvent::OnTrack(id, d) => (id, d, 1),
            TrainLogEvent::OffTrack(id, d) => (id, d, 2),
        };
        let row = rows.entry(id).or_insert((None, [None; 3]));
        row.0 = Some(d);
        row.1[col] = Some(t);
    }

    let mut s = String::new();
    for (id, (d, times)) in rows {
        write!(s, "{}", id)?;
        if let Some(d) = d {
            write!(s, " {}", d)?;
        }
        for t in &times {
            match t {
                Some(t) => write!(s, " {:.1}", t.as_secs_f64())?,
                None => write!(s, " -")?,
            }
        }
        writeln!(s)?;
    }
    Ok(s)
}
