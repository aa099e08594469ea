use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Subject label used when a task or session has none
pub const DEFAULT_SUBJECT: &str = "General";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Case-insensitive name lookup; anything else is no priority
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_completed: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Subject label, falling back to "General" when missing or blank
    pub fn subject_or_default(&self) -> &str {
        non_blank(self.subject.as_deref()).unwrap_or(DEFAULT_SUBJECT)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub end_time: Option<DateTime<Utc>>,
    /// Duration in minutes as recorded by the service, when it reports one
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl StudySession {
    pub fn subject_or_default(&self) -> &str {
        non_blank(self.subject.as_deref()).unwrap_or(DEFAULT_SUBJECT)
    }

    /// A session that has started but not ended
    pub fn is_active(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub reminder_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryType {
    #[default]
    Lecture,
    Lab,
    Tutorial,
    Seminar,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<String>,
    #[serde(default)]
    pub day_of_week: Option<String>,
    /// Zero-padded 24-hour `HH:MM`
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default, rename = "type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub room: Option<String>,
}

/// Week timetable keyed by day name, as returned by the service
pub type WeekTimetable = BTreeMap<String, Vec<TimetableEntry>>;

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Parse a timestamp the way the service emits them: RFC 3339, a naive
/// date-time (taken as UTC), a bare date, or epoch milliseconds
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => None,
        Some(serde_json::Value::String(s)) => {
            let parsed = parse_timestamp(&s);
            if parsed.is_none() {
                warn!("Ignoring unparseable timestamp {:?}", s);
            }
            parsed
        }
        Some(serde_json::Value::Number(n)) => {
            let parsed = n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single());
            if parsed.is_none() {
                warn!("Ignoring out-of-range timestamp {}", n);
            }
            parsed
        }
        Some(other) => {
            warn!("Ignoring non-timestamp value {}", other);
            None
        }
    };
    Ok(parsed)
}

fn lenient_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => Priority::parse(&s),
        _ => None,
    })
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
