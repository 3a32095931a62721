//! UPDATE statement builder.

use crate::condition::{ConditionChain, ConditionKind, ConditionTarget};
use crate::placeholder::Placeholders;
use crate::statement::{Clause, SqlStatement};
use crate::value::Value;

/// UPDATE statement builder.
#[derive(Clone, Debug)]
pub struct Update {
    main_table: String,
    placeholders: Placeholders,
    build_error: Option<String>,
    command: String,
    values: String,
    where_clause: String,
}

impl Update {
    const CLAUSES: &'static [Clause] = &[Clause::Command, Clause::Values, Clause::Where];

    /// Create an UPDATE builder for `table`.
    pub fn new(table: &str) -> Self {
        Self {
            main_table: table.to_string(),
            placeholders: Placeholders::new(),
            build_error: None,
            command: format!("UPDATE {} SET", table),
            values: String::new(),
            where_clause: String::new(),
        }
    }

    /// Append `column = value` assignments with literal values
    /// (double-quote policy). A count mismatch is a silent no-op.
    pub fn set(mut self, columns: &[&str], values: &[Value]) -> Self {
        if columns.len() != values.len() {
            self.note(format!(
                "set: {} columns against {} values",
                columns.len(),
                values.len()
            ));
            return self;
        }

        for (column, value) in columns.iter().zip(values) {
            let literal = value.quoted_literal().unwrap_or_default();
            self.push_assignment(column, &literal);
        }
        self
    }

    /// Append `column = :column` assignments with unbound placeholders for
    /// later binding through `get_all`.
    pub fn set_prepare(mut self, columns: &[&str]) -> Self {
        for column in columns {
            let token = self.placeholders.allocate(column, None);
            self.push_assignment(column, &token);
        }
        self
    }

    /// Open a WHERE chain; `end()` returns this builder.
    pub fn where_(self) -> ConditionChain<Self> {
        ConditionChain::new(self, ConditionKind::Where)
    }

    fn push_assignment(&mut self, column: &str, value: &str) {
        if !self.values.is_empty() {
            self.values.push_str(", ");
        }
        self.values.push_str(&format!("{} = {}", column, value));
    }

    fn note(&mut self, message: String) {
        if self.build_error.is_none() {
            self.build_error = Some(message);
        }
    }
}

impl SqlStatement for Update {
    fn clause_order(&self) -> &'static [Clause] {
        Self::CLAUSES
    }

    fn clause_text(&self, clause: Clause) -> &str {
        match clause {
            Clause::Command => &self.command,
            Clause::Values => &self.values,
            Clause::Where => &self.where_clause,
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

impl ConditionTarget for Update {
    fn main_table(&self) -> &str {
        &self.main_table
    }

    fn set_condition(&mut self, kind: ConditionKind, text: String) {
        if kind == ConditionKind::Where {
            self.where_clause = text;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_literal_values() {
        let update = Update::new("users").set(&["name", "age"], &["Bob".into(), 20.into()]);
        assert_eq!(update.get_query(true), "UPDATE users SET name = \"Bob\", age = 20");
    }

    #[test]
    fn test_set_count_mismatch_is_noop() {
        let update = Update::new("users").set(&["name", "age"], &["Bob".into()]);
        assert_eq!(update.clause_text(Clause::Values), "");
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_set_prepare_allocates_unbound() {
        let update = Update::new("users").set_prepare(&["name", "age"]);
        assert_eq!(
            update.get_query(false),
            "UPDATE users SET name = :name, age = :age"
        );
        assert_eq!(update.placeholders().unbound_count(), 2);
    }

    #[test]
    fn test_set_prepare_with_where() {
        let mut update = Update::new("users")
            .set_prepare(&["name"])
            .where_()
            .equal("id", 1)
            .end();

        let (query, bindings) = update.get_all(&["Ann"]);
        assert_eq!(query, "UPDATE users SET name = :name WHERE users.id = :users_id");
        assert_eq!(bindings.value(":name"), Some("Ann"));
        assert_eq!(bindings.value(":users_id"), Some("1"));
    }
}
