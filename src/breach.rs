//! Match-long breach accounting and per-turn event feed parsing.

use crate::error::EventError;
use crate::location::Location;
use serde::Deserialize;
use serde_json::Value;

/// Locations where an enemy unit reached the home edge, appended
/// chronologically for the whole match. Never evicted; consumers pick
/// their own order (the reactive defense pass wants the freshest breach
/// first, other planners read oldest-first).
#[derive(Clone, Debug, Default)]
pub struct BreachLog {
    records: Vec<Location>,
}

impl BreachLog {
    pub fn new() -> BreachLog {
        BreachLog::default()
    }

    pub fn record(&mut self, cell: Location) {
        self.records.push(cell);
    }

    pub fn chronological(&self) -> impl Iterator<Item = Location> + '_ {
        self.records.iter().copied()
    }

    pub fn newest_first(&self) -> impl Iterator<Item = Location> + '_ {
        self.records.iter().rev().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One breach from the event feed. `self_inflicted` distinguishes our
/// own units scoring on the opponent (owner flag 1) from opponent units
/// crossing our edge (owner flag 2).
#[derive(Clone, Debug, PartialEq)]
pub struct BreachEvent {
    pub location: Location,
    pub self_inflicted: bool,
}

/// Parsed per-turn event batch.
#[derive(Clone, Debug, Default)]
pub struct FrameBatch {
    pub breaches: Vec<BreachEvent>,
}

#[derive(Deserialize)]
struct RawFrame {
    events: RawEvents,
}

#[derive(Deserialize)]
struct RawEvents {
    #[serde(default)]
    breach: Vec<Vec<Value>>,
}

/// Parse one action frame. Each breach record is a heterogeneous array;
/// element 0 is the `[x, y]` location and element 4 the owner flag. A
/// structural failure anywhere aborts the whole frame: a partially
/// parsed batch must not record breaches.
pub fn parse_frame(raw: &str) -> Result<FrameBatch, EventError> {
    let frame: RawFrame = serde_json::from_str(raw)?;
    let mut breaches = Vec::with_capacity(frame.events.breach.len());
    for (index, fields) in frame.events.breach.iter().enumerate() {
        breaches.push(parse_breach(index, fields)?);
    }
    Ok(FrameBatch { breaches })
}

fn parse_breach(index: usize, fields: &[Value]) -> Result<BreachEvent, EventError> {
    let location = fields
        .first()
        .ok_or(EventError::MalformedBreach {
            index,
            reason: "missing location",
        })
        .and_then(|value| {
            serde_json::from_value::<Location>(value.clone()).map_err(|_| {
                EventError::MalformedBreach {
                    index,
                    reason: "location is not an in-grid [x, y] pair",
                }
            })
        })?;

    let owner = fields
        .get(4)
        .and_then(Value::as_u64)
        .ok_or(EventError::MalformedBreach {
            index,
            reason: "missing owner flag",
        })?;

    Ok(BreachEvent {
        location,
        self_inflicted: owner == 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_preserves_both_orders() {
        let mut log = BreachLog::new();
        log.record(Location::new(5, 12));
        log.record(Location::new(20, 13));
        log.record(Location::new(0, 13));

        let oldest: Vec<Location> = log.chronological().collect();
        let newest: Vec<Location> = log.newest_first().collect();
        assert_eq!(oldest.first(), Some(&Location::new(5, 12)));
        assert_eq!(newest.first(), Some(&Location::new(0, 13)));
        assert_eq!(oldest.len(), 3);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn parses_mixed_owner_batch() {
        let raw = r#"{"events":{"breach":[
            [[20, 13], 5.0, 3, "7", 2, 12],
            [[24, 15], 5.0, 3, "9", 1, 12]
        ]}}"#;
        let batch = parse_frame(raw).unwrap();
        assert_eq!(batch.breaches.len(), 2);
        assert_eq!(
            batch.breaches[0],
            BreachEvent {
                location: Location::new(20, 13),
                self_inflicted: false,
            }
        );
        assert!(batch.breaches[1].self_inflicted);
    }

    #[test]
    fn empty_breach_list_is_fine() {
        let batch = parse_frame(r#"{"events":{"breach":[]}}"#).unwrap();
        assert!(batch.breaches.is_empty());
        let batch = parse_frame(r#"{"events":{}}"#).unwrap();
        assert!(batch.breaches.is_empty());
    }

    #[test]
    fn malformed_frame_is_fatal() {
        assert!(matches!(
            parse_frame("{nope"),
            Err(EventError::Json(_))
        ));
        assert!(matches!(
            parse_frame(r#"{"events":{"breach":[[[20, 13], 5.0]]}}"#),
            Err(EventError::MalformedBreach { index: 0, .. })
        ));
        assert!(matches!(
            parse_frame(r#"{"events":{"breach":[[[99, 13], 5.0, 3, "7", 2, 12]]}}"#),
            Err(EventError::MalformedBreach { index: 0, .. })
        ));
    }
}
