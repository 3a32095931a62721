//! WHERE / HAVING condition chains.

use crate::funcs::SqlFunc;
use crate::placeholder::Placeholders;
use crate::statement::SqlStatement;
use crate::value::{InValues, Value};

/// Which clause a chain writes back into at `end()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConditionKind {
    Where,
    Having,
}

impl ConditionKind {
    fn keyword(self) -> &'static str {
        match self {
            ConditionKind::Where => "WHERE",
            ConditionKind::Having => "HAVING",
        }
    }
}

/// Comparison operators available on a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CmpOp {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Like,
    NotLike,
}

impl CmpOp {
    fn as_sql(self) -> &'static str {
        match self {
            CmpOp::Equal => "=",
            CmpOp::NotEqual => "<>",
            CmpOp::Less => "<",
            CmpOp::LessOrEqual => "<=",
            CmpOp::Greater => ">",
            CmpOp::GreaterOrEqual => ">=",
            CmpOp::Like => "LIKE",
            CmpOp::NotLike => "NOT LIKE",
        }
    }
}

/// A statement that can host a WHERE or HAVING chain.
pub trait ConditionTarget: SqlStatement + Sized {
    /// Table used to qualify columns when no override is supplied.
    fn main_table(&self) -> &str;

    /// Receive the finished clause text (keyword included).
    fn set_condition(&mut self, kind: ConditionKind, text: String);
}

/// Boolean predicate chain owning its parent statement until [`end`].
///
/// The chain accumulates predicate text against a snapshot of the parent's
/// placeholder map, so tokens allocated here stay unique across the whole
/// statement; `end()` writes the map and the clause back and hands the
/// parent out again. Predicates are not separated automatically: call
/// [`and`](ConditionChain::and) or [`or`](ConditionChain::or) between them.
///
/// [`end`]: ConditionChain::end
#[must_use]
pub struct ConditionChain<P: ConditionTarget> {
    parent: P,
    kind: ConditionKind,
    table: String,
    query: String,
    placeholders: Placeholders,
}

impl<P: ConditionTarget> ConditionChain<P> {
    pub(crate) fn new(parent: P, kind: ConditionKind) -> Self {
        let table = parent.main_table().to_string();
        let placeholders = parent.placeholders().clone();
        Self {
            parent,
            kind,
            table,
            query: String::new(),
            placeholders,
        }
    }

    /// Close the chain: write the clause and the placeholder map back into
    /// the parent and return it.
    pub fn end(mut self) -> P {
        if !self.query.is_empty() {
            let text = format!("{} {}", self.kind.keyword(), self.query);
            self.parent.set_condition(self.kind, text);
        }
        *self.parent.placeholders_mut() = self.placeholders;
        self.parent
    }

    /// Insert an ` AND ` separator before the next predicate. No-op while
    /// the chain is empty.
    pub fn and(mut self) -> Self {
        self.separator("AND");
        self
    }

    /// Insert an ` OR ` separator before the next predicate. No-op while
    /// the chain is empty.
    pub fn or(mut self) -> Self {
        self.separator("OR");
        self
    }

    pub fn equal(self, column: &str, value: impl Into<Value>) -> Self {
        self.compare(column, CmpOp::Equal, value, None, None)
    }

    pub fn not_equal(self, column: &str, value: impl Into<Value>) -> Self {
        self.compare(column, CmpOp::NotEqual, value, None, None)
    }

    pub fn less(self, column: &str, value: impl Into<Value>) -> Self {
        self.compare(column, CmpOp::Less, value, None, None)
    }

    pub fn less_or_equal(self, column: &str, value: impl Into<Value>) -> Self {
        self.compare(column, CmpOp::LessOrEqual, value, None, None)
    }

    pub fn greater(self, column: &str, value: impl Into<Value>) -> Self {
        self.compare(column, CmpOp::Greater, value, None, None)
    }

    pub fn greater_or_equal(self, column: &str, value: impl Into<Value>) -> Self {
        self.compare(column, CmpOp::GreaterOrEqual, value, None, None)
    }

    pub fn like(self, column: &str, pattern: impl Into<Value>) -> Self {
        self.compare(column, CmpOp::Like, pattern, None, None)
    }

    pub fn not_like(self, column: &str, pattern: impl Into<Value>) -> Self {
        self.compare(column, CmpOp::NotLike, pattern, None, None)
    }

    /// Full comparison form with a table override and optional aggregate
    /// wrapping.
    ///
    /// With a function tag the wrapped call stands in for the column in the
    /// predicate text and the placeholder is keyed by the function name.
    pub fn compare(
        mut self,
        column: &str,
        op: CmpOp,
        value: impl Into<Value>,
        table: Option<&str>,
        func: Option<SqlFunc>,
    ) -> Self {
        let table = table.unwrap_or(&self.table).to_string();

        let wrapped = func.and_then(|func| {
            func.apply(column, &table, None)
                .map(|sql| (sql, func.name()))
        });

        match wrapped {
            Some((sql, key)) => {
                let token = self.resolve(value.into(), key);
                self.push_predicate(&format!("{} {} {}", sql, op.as_sql(), token));
            }
            None => {
                let qualified = format!("{}.{}", table, column);
                let token = self.resolve(value.into(), &qualified);
                self.push_predicate(&format!("{} {} {}", qualified, op.as_sql(), token));
            }
        }
        self
    }

    pub fn in_list(self, column: &str, values: impl Into<InValues>) -> Self {
        self.membership(column, values, None, false)
    }

    pub fn not_in(self, column: &str, values: impl Into<InValues>) -> Self {
        self.membership(column, values, None, true)
    }

    /// `IN` with a table override for the column.
    pub fn in_list_with(self, column: &str, values: impl Into<InValues>, table: Option<&str>) -> Self {
        self.membership(column, values, table, false)
    }

    /// `NOT IN` with a table override for the column.
    pub fn not_in_with(self, column: &str, values: impl Into<InValues>, table: Option<&str>) -> Self {
        self.membership(column, values, table, true)
    }

    pub fn null(self, column: &str) -> Self {
        self.null_check(column, None, false)
    }

    pub fn not_null(self, column: &str) -> Self {
        self.null_check(column, None, true)
    }

    /// `IS NULL` with a table override for the column.
    pub fn null_with(self, column: &str, table: Option<&str>) -> Self {
        self.null_check(column, table, false)
    }

    /// `IS NOT NULL` with a table override for the column.
    pub fn not_null_with(self, column: &str, table: Option<&str>) -> Self {
        self.null_check(column, table, true)
    }

    pub fn between(self, column: &str, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        self.between_check(column, low.into(), high.into(), None, false)
    }

    pub fn not_between(self, column: &str, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        self.between_check(column, low.into(), high.into(), None, true)
    }

    /// `BETWEEN` with a table override for the column.
    pub fn between_with(
        self,
        column: &str,
        low: impl Into<Value>,
        high: impl Into<Value>,
        table: Option<&str>,
    ) -> Self {
        self.between_check(column, low.into(), high.into(), table, false)
    }

    /// `NOT BETWEEN` with a table override for the column.
    pub fn not_between_with(
        self,
        column: &str,
        low: impl Into<Value>,
        high: impl Into<Value>,
        table: Option<&str>,
    ) -> Self {
        self.between_check(column, low.into(), high.into(), table, true)
    }

    fn membership(
        mut self,
        column: &str,
        values: impl Into<InValues>,
        table: Option<&str>,
        negated: bool,
    ) -> Self {
        let qualified = self.qualify(column, table);

        let list = match values.into() {
            InValues::Raw(raw) => raw,
            InValues::List(values) => {
                let mut tokens = Vec::with_capacity(values.len());
                for value in values {
                    let literal = value.condition_literal();
                    tokens.push(self.placeholders.allocate(&qualified, literal));
                }
                tokens.join(", ")
            }
        };

        let op = if negated { "NOT IN" } else { "IN" };
        self.push_predicate(&format!("{} {} ({})", qualified, op, list));
        self
    }

    fn null_check(mut self, column: &str, table: Option<&str>, negated: bool) -> Self {
        let qualified = self.qualify(column, table);
        let not = if negated { "NOT " } else { "" };
        self.push_predicate(&format!("{} IS {}NULL", qualified, not));
        self
    }

    fn between_check(
        mut self,
        column: &str,
        low: Value,
        high: Value,
        table: Option<&str>,
        negated: bool,
    ) -> Self {
        let qualified = self.qualify(column, table);
        let low = self.resolve(low, &qualified);
        let high = self.resolve(high, &qualified);
        let not = if negated { "NOT " } else { "" };
        self.push_predicate(&format!("{} {}BETWEEN {} AND {}", qualified, not, low, high));
        self
    }

    fn qualify(&self, column: &str, table: Option<&str>) -> String {
        format!("{}.{}", table.unwrap_or(&self.table), column)
    }

    // Resolve the literal and trade it for a placeholder token keyed by
    // `key`; the token is what lands in the predicate text.
    fn resolve(&mut self, value: Value, key: &str) -> String {
        let literal = value.condition_literal();
        self.placeholders.allocate(key, literal)
    }

    fn push_predicate(&mut self, text: &str) {
        self.query.push_str(text);
    }

    fn separator(&mut self, word: &str) {
        if !self.query.is_empty() {
            self.query.push(' ');
            self.query.push_str(word);
            self.query.push(' ');
        }
    }
}
