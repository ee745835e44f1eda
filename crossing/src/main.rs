use crossing::*;
use crossing::clock::{Clock, ScaledClock, SystemClock};
use crossing::output::history::{crossings_table, Recorder, TrainLogEvent};
use crossing::output::timeline::Timeline;
use std::path::PathBuf;
use std::time::Duration;
use structopt::StructOpt;

/// Crossing -- trains sharing a single main track
#[derive(StructOpt, Debug)]
#[structopt(name="crossing")]
struct Opt {
    /// Verbose mode (-v, -vv, -vvv)
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: u8,

    /// Train file: one `<e|E|w|W> <load> <cross>` triple per train, times in tenths of a second
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Copy of the timeline
    #[structopt(short = "o", long = "output", parse(from_os_str), default_value = "output.txt")]
    output: PathBuf,

    /// Run the clock this many times faster than real time
    #[structopt(short = "s", long = "speed", default_value = "1")]
    speed: u32,

    /// Print a table of ready, on and off times per train when done
    #[structopt(short = "t", long = "table")]
    table: bool,
}

fn run(opt :&Opt) -> AppResult<()> {
    let trains = get_trains(&opt.input)?;
    if opt.verbose >= 2 {
        println!("Trains:");
        for x in &trains { println!("  - {:?}", x); }
    }

    use std::fs::File;
    let file = File::create(&opt.output)?;
    let timeline = Timeline::stdout().with_output(Box::new(file));
    let recorder = Recorder::new();
    let logger = |t: Duration, e: TrainLogEvent| {
        timeline.log(t, e);
        recorder.record(t, e);
    };

    let clock: Box<dyn Clock> = if opt.speed > 1 {
        Box::new(ScaledClock::start(opt.speed))
    } else {
        Box::new(SystemClock::start())
    };
    crossing::simulate(&trains, clock.as_ref(), &logger)?;

    if opt.table {
        print!("{}", crossings_table(&recorder.into_history())?);
    }
    Ok(())
}

pub fn main() {
    let opt = Opt::from_args();
    let level = match opt.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&opt) {
        Ok(()) => {},
        Err(e) => {
            eprintln!("Error:\n{}", e.as_fail());
            std::process::exit(1);
        },
    }
}
