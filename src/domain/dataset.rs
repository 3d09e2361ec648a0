// Dataset helpers - normalising data function output and reading record values
use crate::domain::filter::Record;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Flatten data function output into a plain record list.
///
/// Accepts `Record[]`, `{ key: Record[] }` (concatenated in key order) or a
/// single record. Scalars and non-object array items are dropped.
pub fn flatten_dataset(output: Value) -> Vec<Record> {
    match output {
        Value::Array(items) => objects(items),
        Value::Object(map) => {
            let grouped = !map.is_empty()
                && map.values().all(|v| {
                    v.as_array()
                        .is_some_and(|items| items.iter().all(Value::is_object))
                });
            if grouped {
                map.into_iter()
                    .flat_map(|(_, v)| match v {
                        Value::Array(items) => objects(items),
                        _ => Vec::new(),
                    })
                    .collect()
            } else {
                vec![map]
            }
        }
        _ => Vec::new(),
    }
}

fn objects(items: Vec<Value>) -> Vec<Record> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect()
}

/// Numbers and numeric strings.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// RFC 3339, `YYYY-MM-DD[ T]HH:MM:SS`, `YYYY-MM-DD` or epoch milliseconds.
pub fn value_as_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_datetime(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_flatten_array() {
        let records = flatten_dataset(json!([{ "a": 1 }, 5, { "a": 2 }]));
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["a"], json!(2));
    }

    #[test]
    fn test_flatten_keyed_groups() {
        let records = flatten_dataset(json!({
            "north": [{ "site": "N1" }, { "site": "N2" }],
            "south": [{ "site": "S1" }]
        }));
        let sites: Vec<_> = records.iter().map(|r| r["site"].clone()).collect();
        assert_eq!(sites, vec![json!("N1"), json!("N2"), json!("S1")]);
    }

    #[test]
    fn test_flatten_single_record_and_scalars() {
        assert_eq!(flatten_dataset(json!({ "site": "N1", "value": 3 })).len(), 1);
        assert!(flatten_dataset(json!(42)).is_empty());
        assert!(flatten_dataset(Value::Null).is_empty());
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(value_as_f64(&json!(12)), Some(12.0));
        assert_eq!(value_as_f64(&json!(" 12.5 ")), Some(12.5));
        assert_eq!(value_as_f64(&json!("fast")), None);
        assert_eq!(value_as_f64(&json!(true)), None);
    }

    #[test]
    fn test_datetime_parsing() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap();
        assert_eq!(value_as_datetime(&json!("2024-03-05T10:30:00Z")), Some(expected));
        assert_eq!(value_as_datetime(&json!("2024-03-05 10:30:00")), Some(expected));
        assert_eq!(
            value_as_datetime(&json!(expected.timestamp_millis())),
            Some(expected)
        );
        assert_eq!(
            value_as_datetime(&json!("2024-03-05")),
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap())
        );
        assert_eq!(value_as_datetime(&json!("yesterday")), None);
    }
}
