//! Newline-delimited sample replay from stdin or a recorded file.
//!
//! Each line is one of:
//! - a JSON sample `{"x":..,"y":..,"z":..,"timestamp":..}` (timestamp optional)
//! - `null` or an empty line, an event with no reading
//! - `roll`, a manual roll
//! - `quit`, end of session
//!
//! Lines starting with `#` are comments.

use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::Sender;
use log::{info, warn};

use crate::source::SourceError;
use crate::types::{DataPoint, InputEvent};

/// 解析一行输入；注释行返回 `Ok(None)`
pub fn parse_line(line: &str) -> Result<Option<InputEvent>, serde_json::Error> {
    let line = line.trim();
    if line.starts_with('#') {
        return Ok(None);
    }
    if line.is_empty() {
        return Ok(Some(InputEvent::Sample(None)));
    }
    if line.eq_ignore_ascii_case("roll") {
        return Ok(Some(InputEvent::ManualRoll));
    }
    if line.eq_ignore_ascii_case("quit") {
        return Ok(Some(InputEvent::Shutdown));
    }

    serde_json::from_str::<Option<DataPoint>>(line).map(|sample| Some(InputEvent::Sample(sample)))
}

/// Streams events from `reader` into `sender` until EOF, a `quit` line, the
/// shutdown flag, or the receiving side goes away. Returns the number of
/// events forwarded.
pub fn run_replay<R: BufRead>(
    reader: R,
    sender: Sender<InputEvent>,
    shutdown_signal: Arc<AtomicBool>,
) -> Result<usize, SourceError> {
    let mut forwarded = 0;

    for (index, line) in reader.lines().enumerate() {
        if shutdown_signal.load(Ordering::Relaxed) {
            info!("Replay received shutdown signal after {} events", forwarded);
            break;
        }

        let line = line?;
        let event = match parse_line(&line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                warn!("Skipping line {}: {}", index + 1, e);
                continue;
            }
        };

        let quit = event == InputEvent::Shutdown;
        if sender.send(event).is_err() {
            info!("Input channel disconnected, replay exiting");
            break;
        }
        forwarded += 1;

        if quit {
            info!("Quit requested at line {}", index + 1);
            break;
        }
    }

    Ok(forwarded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_each_line_kind() {
        assert_eq!(
            parse_line(r#"{"x":1.0,"y":2.0,"z":3.0,"timestamp":5}"#).unwrap(),
            Some(InputEvent::sample(DataPoint::new(1.0, 2.0, 3.0, 5)))
        );
        assert_eq!(parse_line("  ROLL ").unwrap(), Some(InputEvent::ManualRoll));
        assert_eq!(parse_line("quit").unwrap(), Some(InputEvent::Shutdown));
        assert_eq!(parse_line("null").unwrap(), Some(InputEvent::Sample(None)));
        assert_eq!(parse_line("").unwrap(), Some(InputEvent::Sample(None)));
        assert_eq!(parse_line("# recorded 2024-05-01").unwrap(), None);
        assert!(parse_line("{not json").is_err());
    }

    #[test]
    fn replay_skips_bad_lines_and_forwards_the_rest() {
        let input = "# header\n{\"x\":0,\"y\":0,\"z\":12,\"timestamp\":0}\ngarbage\nroll\n";
        let (tx, rx) = crossbeam_channel::unbounded();

        let forwarded = run_replay(Cursor::new(input), tx, Arc::new(AtomicBool::new(false))).unwrap();
        assert_eq!(forwarded, 2);

        let events: Vec<_> = rx.iter().collect();
        assert_eq!(
            events,
            vec![
                InputEvent::sample(DataPoint::new(0.0, 0.0, 12.0, 0)),
                InputEvent::ManualRoll,
            ]
        );
    }

    #[test]
    fn replay_stops_reading_after_quit() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let forwarded = run_replay(Cursor::new("roll\nquit\nroll\n"), tx, Arc::new(AtomicBool::new(false))).unwrap();
        assert_eq!(forwarded, 2);

        let events: Vec<_> = rx.iter().collect();
        assert_eq!(events, vec![InputEvent::ManualRoll, InputEvent::Shutdown]);
    }

    #[test]
    fn replay_stops_on_shutdown() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let forwarded = run_replay(Cursor::new("roll\nroll\n"), tx, Arc::new(AtomicBool::new(true))).unwrap();
        assert_eq!(forwarded, 0);
        assert!(rx.try_recv().is_err());
    }
}
