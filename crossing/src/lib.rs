#[macro_use] extern crate failure_derive;

pub mod input;
pub mod output;
pub mod dispatch;
pub mod railway;
pub mod clock;


use std::path::Path;
use std::thread;
use log::info;

use clock::Clock;
use dispatch::{Grant, Track};
use input::Train;
use output::history::EventSink;

pub type AppResult<T> = Result<T, failure::Error>;

#[derive(Debug, Fail)]
pub enum SpawnError {
    #[fail(display = "could not start dispatcher thread: {}", _0)]
    Dispatcher(String),
    #[fail(display = "could not start thread for train {}: {}", _0, _1)]
    Train(usize, String),
}

/// Runs every train over the single track, one thread per train plus one
/// dispatcher thread, and returns the grants in the order they were made.
///
/// All threads are joined before this returns. If a thread cannot be
/// started, the trains that did start are still run to completion before
/// the error is returned.
pub fn simulate(trains: &[Train], clock: &dyn Clock, logger: EventSink) -> AppResult<Vec<Grant>> {
    let track = Track::new(trains.len());
    info!("starting simulation of {} trains", trains.len());

    let grants = thread::scope(|s| -> AppResult<Vec<Grant>> {
        let track = &track;
        let dispatcher = thread::Builder::new()
            .name("dispatcher".to_string())
            .spawn_scoped(s, move || track.dispatch())
            .map_err(|e| SpawnError::Dispatcher(e.to_string()))?;

        let mut drivers = Vec::with_capacity(trains.len());
        let mut spawn_error = None;
        for train in trains {
            let spawned = thread::Builder::new()
                .name(format!("train-{}", train.id))
                .spawn_scoped(s, move || railway::Driver::new(train, track, clock, logger).run());
            match spawned {
                Ok(handle) => drivers.push(handle),
                Err(e) => {
                    spawn_error = Some(SpawnError::Train(train.id, e.to_string()));
                    break;
                }
            }
        }

        for handle in drivers {
            if handle.join().is_err() {
                log::error!("a train thread panicked");
            }
        }
        track.shutdown();
        let grants = dispatcher.join()
            .map_err(|_| failure::err_msg("dispatcher thread panicked"))?;

        match spawn_error {
            Some(e) => Err(e.into()),
            None => Ok(grants),
        }
    })?;

    info!("simulation finished, {} crossings", grants.len());
    Ok(grants)
}

pub fn read_file(f :&Path) -> AppResult<String> {
  use std::fs::File;
  use std::io::prelude::*;
  use std::io::BufReader;

  let file = File::open(f)?;
  let mut file = BufReader::new(&file);
  let mut contents = String::new();
  file.read_to_string(&mut contents)?;
  Ok(contents)
}

pub fn get_trains(f :&Path) -> AppResult<Vec<Train>> {
    let contents = read_file(f)?;
    let trains = input::parse_trains(&contents)?;
    info!("read {} trains from {}", trains.len(), f.display());
    Ok(trains)
}
