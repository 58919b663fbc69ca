use sqlx::mysql::{MySql, MySqlArguments};
use sqlx::query::Query;

use crate::value::Value;

type MySqlQuery<'q> = Query<'q, MySql, MySqlArguments>;

/// Bind every parameter positionally.
pub(crate) fn bind_params<'q>(mut query: MySqlQuery<'q>, params: &[Value]) -> MySqlQuery<'q> {
    for param in params {
        query = bind_value(query, param);
    }
    query
}

fn bind_value<'q>(query: MySqlQuery<'q>, value: &Value) -> MySqlQuery<'q> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Int(i) => query.bind(*i),
        Value::UInt(u) => query.bind(*u),
        Value::Float(f) => query.bind(*f),
        Value::Decimal(s) | Value::Text(s) => query.bind(s.clone()),
        Value::Bytes(b) => query.bind(b.clone()),
        Value::Date(d) => query.bind(*d),
        Value::Time(t) => query.bind(*t),
        Value::DateTime(dt) => query.bind(*dt),
        Value::Json(j) => query.bind(j.to_string()),
        Value::List(items) => query.bind(list_text(items)),
    }
}

/// Comma-joined text, the form MySQL accepts for a `SET` column.
fn list_text(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Null => String::new(),
            Value::Text(s) | Value::Decimal(s) => s.clone(),
            other => match serde_json::to_value(other) {
                Ok(serde_json::Value::String(s)) => s,
                Ok(json) => json.to_string(),
                Err(_) => String::new(),
            },
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn list_text_joins_plain_items() {
        let items = vec![
            Value::Text("Metro".into()),
            Value::Int(3),
            Value::Date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
        ];
        assert_eq!(list_text(&items), "Metro,3,2024-02-01");
        assert_eq!(list_text(&[]), "");
    }
}
