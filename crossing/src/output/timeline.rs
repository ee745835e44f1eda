use parking_lot::Mutex;
use std::io::{self, Write};
use std::time::Duration;
use super::history::TrainLogEvent;

/// `HH:MM:SS.t`, truncated to tenths of a second.
pub fn timestamp(t: Duration) -> String {
    let tenths = t.as_millis() / 100;
    let secs = tenths / 10;
    format!("{:02}:{:02}:{:02}.{}", secs / 3600, (secs % 3600) / 60, secs % 60, tenths % 10)
}

pub fn line(t: Duration, ev: &TrainLogEvent) -> String {
    format!("{} {}", timestamp(t), ev)
}

/// Writes each event as one line to every output, flushing after each line.
/// Lines from different threads never interleave.
pub struct Timeline {
    outputs: Mutex<Vec<Box<dyn Write + Send>>>,
}

impl Timeline {
    pub fn new() -> Timeline {
        Timeline { outputs: Mutex::new(Vec::new()) }
    }

    pub fn stdout() -> Timeline {
        Timeline::new().with_output(Box::new(io::stdout()))
    }

    pub fn with_output(self, w: Box<dyn Write + Send>) -> Timeline {
        self.outputs.lock().push(w);
        self
    }

    pub fn write(&self, t: Duration, ev: TrainLogEvent) -> io::Result<()> {
        let text = line(t, &ev);
        let mut outputs = self.outputs.lock();
        for w in outputs.iter_mut() {
            writeln!(w, "{}", text)?;
            w.flush()?;
        }
        Ok(())
    }

    /// Like `write`, but a failing output is only logged. The simulation
    /// keeps going.
    pub fn log(&self, t: Duration, ev: TrainLogEvent) {
        if let Err(e) = self.write(t, ev) {
            log::warn!("could not write timeline: {}", e);
        }
    }
}
