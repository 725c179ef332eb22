//! Recorded touch traces
//!
//! A trace is the JSON form of one drawing session: the touch events in
//! arrival order, plus an optional expected digit for evaluation runs.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use canvas::TouchEvent;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("Failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid trace format: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One recorded drawing session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouchTrace {
    /// Touch events in arrival order
    pub events: Vec<TouchEvent>,
    /// Expected digit, if the trace is labeled
    #[serde(default)]
    pub expected: Option<u8>,
}

impl TouchTrace {
    /// Load a trace from a JSON file
    pub fn load(path: &Path) -> Result<Self, TraceError> {
        let file = File::open(path)?;
        let trace = serde_json::from_reader(BufReader::new(file))?;
        Ok(trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_round_trip() {
        let trace = TouchTrace {
            events: vec![
                TouchEvent::Down { x: 10.0, y: 20.0 },
                TouchEvent::Move { x: 40.0, y: 20.0 },
                TouchEvent::Up,
            ],
            expected: Some(1),
        };

        let json = serde_json::to_string(&trace).unwrap();
        let parsed: TouchTrace = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.events.len(), 3);
        assert_eq!(parsed.events[0], TouchEvent::Down { x: 10.0, y: 20.0 });
        assert_eq!(parsed.expected, Some(1));
    }

    #[test]
    fn test_expected_is_optional() {
        let json = r#"{"events":[{"Down":{"x":1.0,"y":2.0}},"Up"]}"#;
        let parsed: TouchTrace = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.events.len(), 2);
        assert_eq!(parsed.expected, None);
    }
}
