use regex::Regex;
use std::fmt;
use std::time::Duration;

pub type TrainId = usize;

/// Upper bound on the number of trains read from one input.
pub const MAX_TRAINS: usize = 256;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    West,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Direction::East => 0,
            Direction::West => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match *self {
            Direction::East => "East",
            Direction::West => "West",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Low,
}

impl Priority {
    pub fn index(self) -> usize {
        match self {
            Priority::High => 0,
            Priority::Low => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    pub id: TrainId,
    pub direction: Direction,
    pub priority: Priority,
    pub load: Duration,
    pub cross: Duration,
}

impl Train {
    pub fn new(id: TrainId, direction: Direction, priority: Priority,
               load: Duration, cross: Duration) -> Train {
        Train { id, direction, priority, load, cross }
    }
}

#[derive(Debug, Fail)]
pub enum ParseError {
    #[fail(display = "error in regular expression: {}", _0)]
    RegexError(String),
    #[fail(display = "invalid direction {:?} for train {}", _0, _1)]
    InvalidDirection(String, TrainId),
}

/// `None` if the duration does not fit in milliseconds.
pub fn tenths(n: u64) -> Option<Duration> {
    n.checked_mul(100).map(Duration::from_millis)
}

fn direction_priority(token: &str) -> Option<(Direction, Priority)> {
    match token {
        "e" => Some((Direction::East, Priority::Low)),
        "E" => Some((Direction::East, Priority::High)),
        "w" => Some((Direction::West, Priority::Low)),
        "W" => Some((Direction::West, Priority::High)),
        _ => None,
    }
}

/// Parses the train list format
///
/// * `E 10 6` -- high priority, eastbound, loads for 1.0s, crosses for 0.6s
/// * `w 6 7` -- low priority, westbound
///
/// Records are whitespace separated triples. Reading stops quietly at the end
/// of input, at the first triple whose durations are not numbers (or too
/// large to represent), or after `MAX_TRAINS` records. An unknown direction
/// in an otherwise complete triple rejects the whole input.
///
/// The direction is a token of its own: `E1 2 3` is rejected as direction
/// `"E1"` rather than read as a train loading for 1 and crossing for 2.
pub fn parse_trains(input: &str) -> Result<Vec<Train>, ParseError> {
    let triple_re = Regex::new(r"(?P<dir>\S+)\s+(?P<load>\S+)\s+(?P<cross>\S+)")
        .map_err(|e| ParseError::RegexError(format!("{:?}", e)))?;

    let mut trains = Vec::new();
    for groups in triple_re.captures_iter(input).take(MAX_TRAINS) {
        let duration = |name: &str| groups[name].parse::<u64>().ok().and_then(tenths);
        let (load, cross) = match (duration("load"), duration("cross")) {
            (Some(l), Some(c)) => (l, c),
            _ => break,
        };
        let id = trains.len();
        let (direction, priority) = direction_priority(&groups["dir"])
            .ok_or_else(|| ParseError::InvalidDirection(groups["dir"].to_string(), id))?;
        trains.push(Train::new(id, direction, priority, load, cross));
    }

    Ok(trains)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(x: u64) -> Duration {
        Duration::from_millis(x)
    }

    #[test]
    fn test_parse_basic() {
        let trains = parse_trains("e 10 6\nW 6 7\nE 3 10\nw 1 1\n").unwrap();
        assert_eq!(trains.len(), 4);
        assert_eq!(trains[0], Train::new(0, Direction::East, Priority::Low, ms(1000), ms(600)));
        assert_eq!(trains[1].direction, Direction::West);
        assert_eq!(trains[1].priority, Priority::High);
        assert_eq!(trains[2].priority, Priority::High);
        assert_eq!(trains[3].id, 3);
        assert_eq!(trains[3].load, Duration::from_millis(100));
    }

    #[test]
    fn test_whitespace_is_free_form() {
        let trains = parse_trains("  E 1 2   w\t3\n4 e 5 6").unwrap();
        let dirs: Vec<_> = trains.iter().map(|t| t.direction).collect();
        assert_eq!(dirs, vec![Direction::East, Direction::West, Direction::East]);
        assert_eq!(trains[1].cross, ms(400));
    }

    #[test]
    fn test_invalid_direction() {
        match parse_trains("E 1 1\nx 1 1\n") {
            Err(ParseError::InvalidDirection(ref d, 1)) => assert_eq!(d, "x"),
            other => panic!("expected invalid direction, got {:?}", other),
        }
    }

    #[test]
    fn test_stops_at_non_numeric() {
        let trains = parse_trains("E 1 1\nW one 2\nx 1 1\n").unwrap();
        assert_eq!(trains.len(), 1);
    }

    #[test]
    fn test_stops_at_oversized_duration() {
        let trains = parse_trains("W 1 1\ne 184467440737095517 1\nE 1 1\n").unwrap();
        assert_eq!(trains.len(), 1);
        assert_eq!(tenths(u64::MAX / 100), Some(Duration::from_millis(u64::MAX / 100 * 100)));
        assert_eq!(tenths(u64::MAX / 100 + 1), None);
    }

    #[test]
    fn test_direction_is_its_own_token() {
        match parse_trains("E1 2 3\n") {
            Err(ParseError::InvalidDirection(ref d, 0)) => assert_eq!(d, "E1"),
            other => panic!("expected invalid direction, got {:?}", other),
        }
    }

    #[test]
    fn test_incomplete_tail_is_ignored() {
        let trains = parse_trains("E 1 1\nW 2").unwrap();
        assert_eq!(trains.len(), 1);
        assert!(parse_trains("").unwrap().is_empty());
    }

    #[test]
    fn test_max_trains() {
        let input = "e 0 0\n".repeat(MAX_TRAINS + 10);
        assert_eq!(parse_trains(&input).unwrap().len(), MAX_TRAINS);
    }

    #[test]
    fn test_direction_display_padding() {
        assert_eq!(format!("{:4}", Direction::East), "East");
        assert_eq!(format!("{:>6}", Direction::West), "  West");
        assert_eq!(Direction::East.opposite(), Direction::West);
    }
}
