//! Decoding of the planner service's response envelopes
//!
//! Every response looks like `{ "success": true, "data": { "<resource>": ... } }`.
//! Individual records that do not decode are skipped with a warning so one bad
//! record never loses the whole snapshot.

use crate::analytics::SnapshotInput;
use crate::error::{Error, Result};
use crate::model::{Reminder, StudySession, Task, TimetableEntry, WeekTimetable};
use log::{debug, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

pub const TASKS_KEY: &str = "tasks";
pub const SESSIONS_KEY: &str = "sessions";
pub const REMINDERS_KEY: &str = "reminders";
pub const TIMETABLE_KEY: &str = "weekTimetable";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Pull `data.<key>` out of an envelope. A missing payload is `None`, a
/// response flagged unsuccessful is an error.
fn payload(body: &str, key: &str) -> Result<Option<Value>> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.success == Some(false) {
        return Err(Error::Api {
            resource: key.to_string(),
            message: envelope.message.unwrap_or_else(|| "API request failed".to_string()),
        });
    }
    Ok(envelope
        .data
        .and_then(|mut data| data.get_mut(key).map(Value::take))
        .filter(|value| !value.is_null()))
}

fn decode_records<T: DeserializeOwned>(key: &str, value: Option<Value>) -> Vec<T> {
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!("Expected a list of {}, got {}", key, other);
            return Vec::new();
        }
        None => return Vec::new(),
    };
    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed {} record #{}: {}", key, index, e);
                None
            }
        })
        .collect();
    debug!("Decoded {} of {} {} records", records.len(), total, key);
    records
}

pub fn parse_tasks(body: &str) -> Result<Vec<Task>> {
    Ok(decode_records(TASKS_KEY, payload(body, TASKS_KEY)?))
}

pub fn parse_sessions(body: &str) -> Result<Vec<StudySession>> {
    Ok(decode_records(SESSIONS_KEY, payload(body, SESSIONS_KEY)?))
}

pub fn parse_reminders(body: &str) -> Result<Vec<Reminder>> {
    Ok(decode_records(REMINDERS_KEY, payload(body, REMINDERS_KEY)?))
}

/// Decode the week timetable. A day mapped to `null` counts as an empty day.
pub fn parse_timetable(body: &str) -> Result<WeekTimetable> {
    let days = match payload(body, TIMETABLE_KEY)? {
        Some(Value::Object(days)) => days,
        Some(other) => {
            warn!("Expected a day-keyed timetable, got {}", other);
            return Ok(WeekTimetable::new());
        }
        None => return Ok(WeekTimetable::new()),
    };
    Ok(days
        .into_iter()
        .map(|(day, entries)| {
            let entries: Vec<TimetableEntry> = decode_records(TIMETABLE_KEY, Some(entries).filter(|v| !v.is_null()));
            (day, entries)
        })
        .collect())
}

/// File locations of the four response bodies; any of them may be absent
#[derive(Debug, Clone, Default)]
pub struct InputPaths<'a> {
    pub tasks: Option<&'a Path>,
    pub sessions: Option<&'a Path>,
    pub reminders: Option<&'a Path>,
    pub timetable: Option<&'a Path>,
}

fn read_optional<T: Default>(path: Option<&Path>, parse: fn(&str) -> Result<T>) -> Result<T> {
    match path {
        Some(path) => {
            debug!("Reading {}", path.display());
            parse(&std::fs::read_to_string(path)?)
        }
        None => Ok(T::default()),
    }
}

/// Read one snapshot's worth of responses from disk
pub fn load_snapshot(paths: &InputPaths<'_>) -> Result<SnapshotInput> {
    Ok(SnapshotInput {
        tasks: read_optional(paths.tasks, parse_tasks)?,
        sessions: read_optional(paths.sessions, parse_sessions)?,
        reminders: read_optional(paths.reminders, parse_reminders)?,
        timetable: read_optional(paths.timetable, parse_timetable)?,
    })
}
