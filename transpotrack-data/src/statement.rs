use crate::value::Value;

/// What the caller expects back from a statement.
///
/// Either way, a statement that produces a result set returns its rows;
/// the flag only decides whether a generated id is reported for one that
/// does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    /// Reads. A statement without a result set reports only the row count.
    Rows,
    /// Writes. Reports the row count and the generated id, if any.
    Affected,
}

/// SQL text with `?` placeholders plus its positional parameters.
///
/// Parameters are always bound, never spliced into the text.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<Value>,
    fetch: Fetch,
}

impl Statement {
    /// A statement expected to return rows.
    pub fn query(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            fetch: Fetch::Rows,
        }
    }

    /// An INSERT / UPDATE / DELETE.
    pub fn mutation(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            fetch: Fetch::Affected,
        }
    }

    /// Append the next positional parameter.
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn fetch(&self) -> Fetch {
        self.fetch
    }

    /// Number of `?` placeholders outside string literals and comments.
    pub fn placeholder_count(&self) -> usize {
        count_placeholders(&self.sql)
    }
}

/// A stored procedure name with its positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureCall {
    name: String,
    args: Vec<Value>,
}

impl ProcedureCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Whether the name is a plain (optionally schema-qualified) identifier.
    ///
    /// The name is the one part of a `CALL` that cannot be bound.
    pub fn has_valid_name(&self) -> bool {
        let mut parts = self.name.split('.');
        let valid_part = |p: &str| {
            !p.is_empty()
                && !p.starts_with(|c: char| c.is_ascii_digit())
                && p.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        };
        match (parts.next(), parts.next(), parts.next()) {
            (Some(a), None, _) => valid_part(a),
            (Some(a), Some(b), None) => valid_part(a) && valid_part(b),
            _ => false,
        }
    }

    /// `CALL name(?, ?, ...)` with one placeholder per argument.
    pub fn to_sql(&self) -> String {
        let placeholders = vec!["?"; self.args.len()].join(", ");
        format!("CALL {}({placeholders})", self.name)
    }
}

fn count_placeholders(sql: &str) -> usize {
    let mut count = 0;
    let mut chars = sql.chars().peekable();
    let mut quote: Option<char> = None;
    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == '\\' {
                    chars.next();
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' | '`' => quote = Some(c),
                '?' => count += 1,
                '-' if chars.peek() == Some(&'-') => {
                    for c in chars.by_ref() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                '#' => {
                    for c in chars.by_ref() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    let mut prev = ' ';
                    for c in chars.by_ref() {
                        if prev == '*' && c == '/' {
                            break;
                        }
                        prev = c;
                    }
                }
                _ => {}
            },
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_params_in_order() {
        let stmt = Statement::mutation("UPDATE STATION SET StationName=? WHERE StationID=?")
            .bind("Central")
            .bind(4i64);
        assert_eq!(stmt.fetch(), Fetch::Affected);
        assert_eq!(stmt.params(), &[Value::Text("Central".into()), Value::Int(4)]);
    }

    #[test]
    fn counts_placeholders_outside_literals() {
        let stmt = Statement::query(
            "SELECT '?' AS q, `a?b` FROM T WHERE x = ? AND y = ? -- trailing ?\n AND z = \"?\"",
        );
        assert_eq!(stmt.placeholder_count(), 2);
        assert_eq!(Statement::query("SELECT 1").placeholder_count(), 0);
    }

    #[test]
    fn skips_placeholders_in_block_comments() {
        let stmt = Statement::query("SELECT /* id = ? */ * FROM PASSENGER WHERE PassengerID = ? /* or ?");
        assert_eq!(stmt.placeholder_count(), 1);
        assert_eq!(Statement::query("SELECT /*/ ? */ ?").placeholder_count(), 1);
    }

    #[test]
    fn procedure_call_sql() {
        let call = ProcedureCall::new("sp_generate_revenue_report")
            .arg("2024-01-01")
            .arg("2024-01-31");
        assert_eq!(call.to_sql(), "CALL sp_generate_revenue_report(?, ?)");
        assert_eq!(ProcedureCall::new("sp_noop").to_sql(), "CALL sp_noop()");
    }

    #[test]
    fn procedure_names_must_be_identifiers() {
        assert!(ProcedureCall::new("sp_book_ticket_with_payment").has_valid_name());
        assert!(ProcedureCall::new("transit.sp_report").has_valid_name());
        assert!(!ProcedureCall::new("sp_x(); DROP TABLE PASSENGER; --").has_valid_name());
        assert!(!ProcedureCall::new("").has_valid_name());
        assert!(!ProcedureCall::new("a.b.c").has_valid_name());
        assert!(!ProcedureCall::new("1sp").has_valid_name());
    }
}
