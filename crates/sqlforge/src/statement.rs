//! Clause identifiers and the shared statement surface.

use crate::error::{BuildError, BuildResult};
use crate::placeholder::Placeholders;

/// Named clause slot of a statement.
///
/// Each command declares its canonical clause order as a const slice of
/// these identifiers; rendering walks that list and nothing else, so clause
/// fragments always appear in the fixed per-command order regardless of the
/// order fluent methods were invoked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Clause {
    Union,
    Command,
    Distinct,
    Columns,
    From,
    Join,
    Where,
    Group,
    Having,
    Order,
    Limit,
    /// INSERT's constant `VALUES` keyword slot.
    Set,
    Values,
    Duplicate,
}

/// Shared accessor surface of every command builder.
///
/// Provides rendering, value substitution and positional binding on top of
/// the per-command clause storage.
pub trait SqlStatement {
    /// Canonical clause order for this command, fixed at construction.
    fn clause_order(&self) -> &'static [Clause];

    /// Current text of one clause; empty when the clause is unset or does
    /// not belong to this command.
    fn clause_text(&self, clause: Clause) -> &str;

    /// The statement's placeholder map.
    fn placeholders(&self) -> &Placeholders;

    /// Mutable access to the placeholder map (chain write-back, binding).
    fn placeholders_mut(&mut self) -> &mut Placeholders;

    /// First silently rejected fluent call, if any.
    fn build_error(&self) -> Option<&str> {
        None
    }

    /// Render the statement text from scratch.
    ///
    /// Walks the canonical clause order, skips empty fragments and joins the
    /// rest with single spaces. Never appends to a previous render: calling
    /// this twice with no state change yields identical text.
    fn render(&self) -> String {
        let mut query = String::new();
        for &clause in self.clause_order() {
            let text = self.clause_text(clause);
            if text.is_empty() {
                continue;
            }
            if !query.is_empty() {
                query.push(' ');
            }
            query.push_str(text);
        }
        query
    }

    /// Statement text, with bound values substituted for their tokens when
    /// `with_values` is true.
    ///
    /// If any placeholder is still unbound the templated text is returned
    /// unchanged; substitution is all-or-nothing.
    fn get_query(&self, with_values: bool) -> String {
        let query = self.render();

        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %query, "rendered statement");

        if !with_values || self.placeholders().unbound_count() > 0 {
            return query;
        }
        self.placeholders().substitute(&query)
    }

    /// Statement text plus a snapshot of the binding map, after binding
    /// `values` to the outstanding placeholders in allocation order.
    ///
    /// A non-empty `values` whose length does not match the number of
    /// unbound placeholders is ignored; the current, still partially bound
    /// state is returned unchanged.
    fn get_all(&mut self, values: &[&str]) -> (String, Placeholders) {
        let query = self.render();

        if !values.is_empty() {
            self.placeholders_mut().bind_all(values);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %query, bindings = self.placeholders().len(), "rendered statement");

        (query, self.placeholders().clone())
    }

    /// Report the first silently rejected fluent call as an error.
    fn validate(&self) -> BuildResult<()> {
        if let Some(message) = self.build_error() {
            return Err(BuildError::validation(message));
        }
        Ok(())
    }

    /// Fully substituted statement text, or an error when the builder
    /// rejected a call or a placeholder is still unbound.
    fn try_query(&self) -> BuildResult<String> {
        self.validate()?;
        if let Some(token) = self.placeholders().first_unbound() {
            return Err(BuildError::Unbound(token.to_string()));
        }
        Ok(self.get_query(true))
    }
}
