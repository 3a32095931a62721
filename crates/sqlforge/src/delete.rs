//! DELETE statement builder.

use crate::condition::{ConditionChain, ConditionKind, ConditionTarget};
use crate::placeholder::Placeholders;
use crate::statement::{Clause, SqlStatement};

/// DELETE statement builder.
#[derive(Clone, Debug)]
pub struct Delete {
    main_table: String,
    placeholders: Placeholders,
    command: String,
    where_clause: String,
}

impl Delete {
    const CLAUSES: &'static [Clause] = &[Clause::Command, Clause::Where];

    /// Create a DELETE builder for `table`.
    pub fn new(table: &str) -> Self {
        Self {
            main_table: table.to_string(),
            placeholders: Placeholders::new(),
            command: format!("DELETE FROM {}", table),
            where_clause: String::new(),
        }
    }

    /// Open a WHERE chain; `end()` returns this builder.
    pub fn where_(self) -> ConditionChain<Self> {
        ConditionChain::new(self, ConditionKind::Where)
    }
}

impl SqlStatement for Delete {
    fn clause_order(&self) -> &'static [Clause] {
        Self::CLAUSES
    }

    fn clause_text(&self, clause: Clause) -> &str {
        match clause {
            Clause::Command => &self.command,
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
}

impl ConditionTarget for Delete {
    fn main_table(&self) -> &str {
        &self.main_table
    }

    fn set_condition(&mut self, kind: ConditionKind, text: String) {
        if kind == ConditionKind::Where {
            self.where_clause = text;
        }
    }
}
