use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::Value;

/// One result row: column names mapped to values, in select-list order.
///
/// Serializes as a JSON object whose keys keep the column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Row::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    /// Append a column. A repeated name shadows the earlier one on lookup
    /// and in the JSON rendering.
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.columns.push((name.into(), value));
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Column names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (i, (name, value)) in self.columns.iter().enumerate() {
            let shadowed = self.columns[i + 1..].iter().any(|(n, _)| n == name);
            if !shadowed {
                map.serialize_entry(name, value)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_column_order_in_json() {
        let row = Row::new()
            .with("PassengerID", 7i64)
            .with("Name", "Asha Rao")
            .with("City", None::<String>);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"PassengerID":7,"Name":"Asha Rao","City":null}"#);
    }

    #[test]
    fn duplicate_names_resolve_to_last_column() {
        let row = Row::new().with("StationName", "Central").with("StationName", "Harbor");
        assert_eq!(row.get("StationName"), Some(&Value::Text("Harbor".into())));
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            serde_json::json!({ "StationName": "Harbor" })
        );
        assert_eq!(row.len(), 2);
    }
}
