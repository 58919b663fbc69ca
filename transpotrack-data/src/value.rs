//! Column and parameter values.

use base64::Engine;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// A single database value, as bound into a statement or decoded from a row.
///
/// Every variant has a plain JSON rendering, so rows can be returned to
/// HTTP callers without further conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// Exact numeric kept as its decimal text to avoid rounding.
    Decimal(String),
    Text(String),
    /// Rendered as base64.
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Json(serde_json::Value),
    /// Multi-valued column (e.g. `SET`) normalized to an ordered list.
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::UInt(u) => i64::try_from(*u).ok(),
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Decimal(s) | Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt(u) => Some(*u),
            other => other.as_i64().and_then(|i| u64::try_from(i).ok()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            Value::UInt(u) => Some(*u as f64),
            Value::Decimal(s) | Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Decimal(s) => Some(s),
            _ => None,
        }
    }

    /// Split a comma-separated multi-value column into a list of text items.
    pub fn from_set_text(text: &str) -> Value {
        if text.is_empty() {
            return Value::List(Vec::new());
        }
        Value::List(text.split(',').map(|s| Value::Text(s.to_string())).collect())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::UInt(u) => serializer.serialize_u64(*u),
            Value::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Value::Float(_) => serializer.serialize_none(),
            Value::Decimal(s) | Value::Text(s) => serializer.serialize_str(s),
            Value::Bytes(b) => {
                serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(b))
            }
            Value::Date(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
            Value::Time(t) => serializer.collect_str(&t.format("%H:%M:%S%.f")),
            Value::DateTime(dt) => serializer.collect_str(&dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Value::Json(v) => v.serialize(serializer),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UInt(u64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_render_as_plain_json() {
        assert_eq!(serde_json::to_value(Value::Null).unwrap(), json!(null));
        assert_eq!(serde_json::to_value(Value::Int(-4)).unwrap(), json!(-4));
        assert_eq!(serde_json::to_value(Value::Decimal("120.50".into())).unwrap(), json!("120.50"));
        assert_eq!(serde_json::to_value(Value::Float(f64::NAN)).unwrap(), json!(null));
        assert_eq!(serde_json::to_value(Value::Bytes(b"hi".to_vec())).unwrap(), json!("aGk="));
    }

    #[test]
    fn temporal_values_use_iso_format() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 29).unwrap();
        let time = NaiveTime::from_hms_opt(8, 30, 0).unwrap();
        assert_eq!(serde_json::to_value(Value::Date(date)).unwrap(), json!("2024-01-29"));
        assert_eq!(serde_json::to_value(Value::Time(time)).unwrap(), json!("08:30:00"));
        assert_eq!(
            serde_json::to_value(Value::DateTime(date.and_time(time))).unwrap(),
            json!("2024-01-29T08:30:00")
        );
    }

    #[test]
    fn set_text_becomes_ordered_list() {
        let v = Value::from_set_text("Metro,Bus,Tram");
        assert_eq!(serde_json::to_value(&v).unwrap(), json!(["Metro", "Bus", "Tram"]));
        assert_eq!(Value::from_set_text(""), Value::List(vec![]));
    }

    #[test]
    fn options_map_none_to_null() {
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some(7i64)), Value::Int(7));
    }

    #[test]
    fn numeric_accessors_coerce_decimal_text() {
        assert_eq!(Value::Decimal("1520.75".into()).as_f64(), Some(1520.75));
        assert_eq!(Value::Decimal("42".into()).as_i64(), Some(42));
        assert_eq!(Value::UInt(3).as_i64(), Some(3));
        assert_eq!(Value::Text("n/a".into()).as_f64(), None);
    }
}
