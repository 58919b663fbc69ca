use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

use crate::row::Row;
use crate::value::Value;

/// Decode a driver row into an ordered [`Row`].
pub(crate) fn decode_row(row: &MySqlRow) -> Row {
    let mut out = Row::with_capacity(row.len());
    for (index, column) in row.columns().iter().enumerate() {
        let value = decode_column(row, index, column.type_info().name());
        out.push(column.name(), value);
    }
    out
}

fn decode_column(row: &MySqlRow, index: usize, type_name: &str) -> Value {
    match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(_) => {}
        Err(_) => return Value::Null,
    }

    decode_typed(row, index, type_name)
        .or_else(|| row.try_get_unchecked::<String, _>(index).ok().map(Value::Text))
        .or_else(|| row.try_get_unchecked::<Vec<u8>, _>(index).ok().map(Value::Bytes))
        .unwrap_or_else(|| {
            tracing::debug!(column = index, type_name, "undecodable column value");
            Value::Null
        })
}

fn decode_typed(row: &MySqlRow, index: usize, type_name: &str) -> Option<Value> {
    match ColumnKind::of(type_name) {
        ColumnKind::Bool => row.try_get_unchecked::<bool, _>(index).ok().map(Value::Bool),
        ColumnKind::Signed => row.try_get_unchecked::<i64, _>(index).ok().map(Value::Int),
        ColumnKind::Unsigned => row.try_get_unchecked::<u64, _>(index).ok().map(Value::UInt),
        ColumnKind::Float => row
            .try_get_unchecked::<f32, _>(index)
            .ok()
            .map(|f| Value::Float(f64::from(f))),
        ColumnKind::Double => row.try_get_unchecked::<f64, _>(index).ok().map(Value::Float),
        ColumnKind::Decimal => row.try_get_unchecked::<String, _>(index).ok().map(Value::Decimal),
        ColumnKind::Date => row.try_get_unchecked::<NaiveDate, _>(index).ok().map(Value::Date),
        ColumnKind::Time => row.try_get_unchecked::<NaiveTime, _>(index).ok().map(Value::Time),
        ColumnKind::DateTime => row
            .try_get_unchecked::<NaiveDateTime, _>(index)
            .ok()
            .map(Value::DateTime),
        ColumnKind::Json => row
            .try_get_unchecked::<String, _>(index)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .map(Value::Json),
        ColumnKind::Set => row
            .try_get_unchecked::<String, _>(index)
            .ok()
            .map(|s| Value::from_set_text(&s)),
        ColumnKind::Binary => row.try_get_unchecked::<Vec<u8>, _>(index).ok().map(Value::Bytes),
        ColumnKind::Text => None,
    }
}

/// How a MySQL column type is turned into a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Bool,
    Signed,
    Unsigned,
    Float,
    Double,
    Decimal,
    Date,
    Time,
    DateTime,
    Json,
    Set,
    Binary,
    Text,
}

impl ColumnKind {
    fn of(type_name: &str) -> Self {
        if type_name.ends_with(" UNSIGNED") {
            return ColumnKind::Unsigned;
        }
        match type_name {
            "BOOLEAN" => ColumnKind::Bool,
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => ColumnKind::Signed,
            "FLOAT" => ColumnKind::Float,
            "DOUBLE" => ColumnKind::Double,
            "DECIMAL" => ColumnKind::Decimal,
            "DATE" => ColumnKind::Date,
            "TIME" => ColumnKind::Time,
            "DATETIME" | "TIMESTAMP" => ColumnKind::DateTime,
            "JSON" => ColumnKind::Json,
            "SET" => ColumnKind::Set,
            "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BIT"
            | "GEOMETRY" => ColumnKind::Binary,
            _ => ColumnKind::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_mysql_type_names() {
        assert_eq!(ColumnKind::of("BIGINT"), ColumnKind::Signed);
        assert_eq!(ColumnKind::of("BIGINT UNSIGNED"), ColumnKind::Unsigned);
        assert_eq!(ColumnKind::of("BOOLEAN"), ColumnKind::Bool);
        assert_eq!(ColumnKind::of("DECIMAL"), ColumnKind::Decimal);
        assert_eq!(ColumnKind::of("TIMESTAMP"), ColumnKind::DateTime);
        assert_eq!(ColumnKind::of("SET"), ColumnKind::Set);
        assert_eq!(ColumnKind::of("VARBINARY"), ColumnKind::Binary);
        assert_eq!(ColumnKind::of("VARCHAR"), ColumnKind::Text);
        assert_eq!(ColumnKind::of("ENUM"), ColumnKind::Text);
        assert_eq!(ColumnKind::of("TEXT"), ColumnKind::Text);
    }
}
