use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Number, Value};

use crate::{SatNftError, TelemetryRecord, TelemetrySource};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Outcome of looking at a single node of the telemetry tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Record(TelemetryRecord),
    Skip,
}

pub fn classify(value: &Value) -> Node {
    let Value::Object(map) = value else {
        return Node::Skip;
    };

    match (
        map.get("timestamp"),
        number_field(map, "temperature"),
        number_field(map, "humidity"),
        number_field(map, "light"),
        number_field(map, "air_quality"),
    ) {
        (
            Some(Value::String(timestamp)),
            Some(temperature),
            Some(humidity),
            Some(light),
            Some(air_quality),
        ) if !timestamp.is_empty() => Node::Record(TelemetryRecord {
            timestamp: timestamp.clone(),
            temperature,
            humidity,
            light,
            air_quality,
        }),
        _ => Node::Skip,
    }
}

fn number_field(map: &Map<String, Value>, key: &str) -> Option<Number> {
    match map.get(key) {
        Some(Value::Number(number)) => Some(number.clone()),
        _ => None,
    }
}

/// Depth-first walk collecting every record, in document order.
///
/// A node that qualifies as a record is not descended into.
pub fn collect_records(document: &Value) -> Vec<TelemetryRecord> {
    let mut records = Vec::new();
    walk(document, &mut records);
    records
}

fn walk(value: &Value, out: &mut Vec<TelemetryRecord>) {
    if let Node::Record(record) = classify(value) {
        out.push(record);
        return;
    }

    match value {
        Value::Object(map) => map.values().for_each(|child| walk(child, out)),
        Value::Array(items) => items.iter().for_each(|child| walk(child, out)),
        _ => {}
    }
}

/// Parses the date shapes telemetry devices emit. Values without a zone are
/// taken as UTC; date-only values resolve to midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Some(parsed) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(raw, format).ok())
    {
        return Some(parsed.with_timezone(&Utc));
    }

    let zoneless = raw.strip_suffix(['Z', 'z']).unwrap_or(raw);
    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(zoneless, format).ok())
    {
        return Some(naive.and_utc());
    }

    parse_date(raw)
        .or_else(|| raw.parse::<i64>().ok().and_then(DateTime::<Utc>::from_timestamp_millis))
}

// `YYYY-MM-DD`, `YYYY-MM` and bare `YYYY`, at midnight UTC.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"))
        .ok()
        .or_else(|| {
            let is_year = raw.len() == 4 && raw.bytes().all(|byte| byte.is_ascii_digit());
            is_year
                .then(|| raw.parse::<i32>().ok())
                .flatten()
                .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        })?;
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

/// Picks the record with the greatest timestamp.
///
/// Ties go to the record seen last. If any timestamp is unparseable the
/// whole ordering is abandoned and the last record in traversal order wins.
pub fn pick_latest(records: Vec<TelemetryRecord>) -> Option<TelemetryRecord> {
    let parsed: Option<Vec<DateTime<Utc>>> = records
        .iter()
        .map(|record| parse_timestamp(&record.timestamp))
        .collect();

    match parsed {
        Some(times) => records
            .into_iter()
            .zip(times)
            .max_by_key(|(_, time)| *time)
            .map(|(record, _)| record),
        None => {
            tracing::warn!("unparseable telemetry timestamp; falling back to last record");
            records.into_iter().last()
        }
    }
}

pub fn select_latest(document: Option<&Value>) -> Result<TelemetryRecord, SatNftError> {
    let document = match document {
        None | Some(Value::Null) => {
            return Err(SatNftError::NotFound(
                "telemetry store returned no data".to_string(),
            ))
        }
        Some(document) => document,
    };

    let records = collect_records(document);
    tracing::debug!(count = records.len(), "collected telemetry records");

    pick_latest(records).ok_or_else(|| {
        SatNftError::NotFound("no valid telemetry records in document".to_string())
    })
}

/// Fetches the telemetry tree on every call and selects the newest record.
#[derive(Clone, Debug)]
pub struct LatestRecordSelector<S> {
    source: S,
}

impl<S> LatestRecordSelector<S>
where
    S: TelemetrySource,
{
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn latest(&self) -> Result<TelemetryRecord, SatNftError> {
        let document = self.source.fetch_document().await?;
        select_latest(document.as_ref())
    }
}
