//! INSERT statement builder.

use crate::placeholder::Placeholders;
use crate::statement::{Clause, SqlStatement};
use crate::value::Value;

/// INSERT statement builder.
///
/// Declare the column list first: [`values`](Insert::values) and
/// [`prepare_values`](Insert::prepare_values) key their placeholders by the
/// declared columns, positionally.
#[derive(Clone, Debug)]
pub struct Insert {
    main_table: String,
    placeholders: Placeholders,
    build_error: Option<String>,
    command: String,
    columns: String,
    set: String,
    values: String,
    duplicate: String,
}

impl Insert {
    const CLAUSES: &'static [Clause] = &[
        Clause::Command,
        Clause::Columns,
        Clause::Set,
        Clause::Values,
        Clause::Duplicate,
    ];

    /// Create an INSERT builder for `table`.
    pub fn new(table: &str) -> Self {
        Self {
            main_table: table.to_string(),
            placeholders: Placeholders::new(),
            build_error: None,
            command: format!("INSERT INTO {}", table),
            columns: String::new(),
            set: "VALUES".to_string(),
            values: String::new(),
            duplicate: String::new(),
        }
    }

    /// Declare the column list, qualified with the main table and
    /// parenthesized.
    pub fn columns(mut self, columns: &[&str]) -> Self {
        let qualified: Vec<String> = columns
            .iter()
            .map(|column| format!("{}.{}", self.main_table, column))
            .collect();
        self.columns = format!("({})", qualified.join(", "));
        self
    }

    /// Append one row of values.
    ///
    /// Each value is resolved with the literal double-quote policy and
    /// stored under its positional column's placeholder. A count mismatch
    /// with the declared columns is a silent no-op.
    pub fn values(mut self, values: Vec<Value>) -> Self {
        let columns = self.columns_list();
        if columns.len() != values.len() {
            self.note(format!(
                "values: expected {} values for the declared columns, got {}",
                columns.len(),
                values.len()
            ));
            return self;
        }

        let mut tokens = Vec::with_capacity(columns.len());
        for (column, value) in columns.iter().zip(values) {
            tokens.push(self.placeholders.allocate(column, value.quoted_literal()));
        }

        let row = format!("({})", tokens.join(","));
        if !self.values.is_empty() {
            self.values.push_str(", ");
        }
        self.values.push_str(&row);
        self
    }

    /// Append `times` rows of unbound placeholders, one per declared
    /// column, for later binding through `get_all`.
    pub fn prepare_values(mut self, times: usize) -> Self {
        let columns = self.columns_list();
        if columns.is_empty() {
            self.note("prepare_values: no columns declared".to_string());
            return self;
        }

        for _ in 0..times {
            let mut tokens = Vec::with_capacity(columns.len());
            for column in &columns {
                tokens.push(self.placeholders.allocate(column, None));
            }

            let row = format!("({})", tokens.join(", "));
            if !self.values.is_empty() {
                self.values.push_str(", ");
            }
            self.values.push_str(&row);
        }
        self
    }

    /// Set the `ON DUPLICATE KEY UPDATE` clause.
    ///
    /// Values are spliced as literals (double-quote policy), no placeholders
    /// involved. A column/value count mismatch is a silent no-op.
    pub fn duplicate_key(mut self, columns: &[&str], values: &[Value]) -> Self {
        if columns.is_empty() || columns.len() != values.len() {
            self.note("duplicate_key: column/value count mismatch".to_string());
            return self;
        }

        let assignments: Vec<String> = columns
            .iter()
            .zip(values)
            .map(|(column, value)| {
                let literal = value.quoted_literal().unwrap_or_default();
                format!("{}.{} = {}", self.main_table, column, literal)
            })
            .collect();

        self.duplicate = format!("ON DUPLICATE KEY UPDATE {}", assignments.join(", "));
        self
    }

    // Declared columns, recovered from the rendered column list.
    fn columns_list(&self) -> Vec<String> {
        let inner = self
            .columns
            .trim_start_matches('(')
            .trim_end_matches(')');
        if inner.is_empty() {
            return Vec::new();
        }
        inner.split(", ").map(str::to_string).collect()
    }

    fn note(&mut self, message: String) {
        if self.build_error.is_none() {
            self.build_error = Some(message);
        }
    }
}

impl SqlStatement for Insert {
    fn clause_order(&self) -> &'static [Clause] {
        Self::CLAUSES
    }

    fn clause_text(&self, clause: Clause) -> &str {
        match clause {
            Clause::Command => &self.command,
            Clause::Columns => &self.columns,
            Clause::Set => &self.set,
            Clause::Values => &self.values,
            Clause::Duplicate => &self.duplicate,
            _ => "",
        }
    }

    fn placeholders(&self) -> &Placeholders {
        &self.placeholders
    }

    fn placeholders_mut(&mut self) -> &mut Placeholders {
        &mut self.placeholders
    }

    fn build_error(&self) -> Option<&str> {
        self.build_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_with_literal_values() {
        let insert = Insert::new("users")
            .columns(&["name", "age"])
            .values(vec!["Bob".into(), 20.into()]);
        assert_eq!(
            insert.get_query(true),
            "INSERT INTO users (users.name, users.age) VALUES (\"Bob\",20)"
        );
    }

    #[test]
    fn test_insert_multiple_rows() {
        let insert = Insert::new("users")
            .columns(&["name"])
            .values(vec!["Ann".into()])
            .values(vec!["Bob".into()]);
        assert_eq!(
            insert.get_query(true),
            "INSERT INTO users (users.name) VALUES (\"Ann\"), (\"Bob\")"
        );
    }

    #[test]
    fn test_prepare_values_rows() {
        let insert = Insert::new("users").columns(&["name", "age"]).prepare_values(2);
        assert_eq!(
            insert.get_query(false),
            "INSERT INTO users (users.name, users.age) \
             VALUES (:users_name, :users_age), (:users_name2, :users_age2)"
        );
    }

    #[test]
    fn test_prepare_values_binding() {
        let mut insert = Insert::new("users").columns(&["name"]).prepare_values(1);
        let (_, bindings) = insert.get_all(&["Ann"]);
        assert_eq!(bindings.value(":users_name"), Some("Ann"));
        // bound values substitute verbatim, no re-quoting
        assert_eq!(insert.get_query(true), "INSERT INTO users (users.name) VALUES (Ann)");
    }

    #[test]
    fn test_values_count_mismatch_is_noop() {
        let insert = Insert::new("users")
            .columns(&["name", "age"])
            .values(vec!["Bob".into()]);
        assert_eq!(insert.clause_text(Clause::Values), "");
        assert!(insert.build_error().is_some());
        assert!(insert.validate().is_err());
    }

    #[test]
    fn test_duplicate_key() {
        let insert = Insert::new("users")
            .columns(&["name"])
            .values(vec!["Bob".into()])
            .duplicate_key(&["name"], &["Bobby".into()]);
        assert_eq!(
            insert.get_query(true),
            "INSERT INTO users (users.name) VALUES (\"Bob\") \
             ON DUPLICATE KEY UPDATE users.name = \"Bobby\""
        );
    }

    #[test]
    fn test_duplicate_key_mismatch_is_noop() {
        let insert = Insert::new("users")
            .columns(&["name"])
            .duplicate_key(&["name", "age"], &["Bobby".into()]);
        assert_eq!(insert.clause_text(Clause::Duplicate), "");
    }
}
