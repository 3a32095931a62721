//! JOIN clause builder for SELECT statements.

use crate::condition::ConditionTarget;
use crate::select::Select;

/// Join type for [`Select::join`]. Closed set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
}

impl JoinType {
    fn keyword(self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
        }
    }
}

/// Builds `JOIN ... ON ...` text, owning the SELECT until [`end`].
///
/// `on`/`and`/`or` compare a column of the main table against a column of
/// the join target, or against a literal. [`join`](JoinBuilder::join) starts
/// another segment on the same clause; later conditions qualify their right
/// side with the most recent join table.
///
/// [`end`]: JoinBuilder::end
#[must_use]
pub struct JoinBuilder {
    parent: Select,
    main_table: String,
    join_table: String,
    join: String,
}

impl JoinBuilder {
    pub(crate) fn new(parent: Select, join_table: &str, join_type: JoinType) -> Self {
        let main_table = parent.main_table().to_string();
        let mut builder = Self {
            parent,
            main_table,
            join_table: String::new(),
            join: String::new(),
        };
        builder.push_join(join_table, join_type);
        builder
    }

    /// Append another join segment to the same clause.
    pub fn join(mut self, table: &str, join_type: JoinType) -> Self {
        self.push_join(table, join_type);
        self
    }

    pub fn on(self, left: &str, right: &str) -> Self {
        self.condition("ON", left, right, None, true)
    }

    pub fn and(self, left: &str, right: &str) -> Self {
        self.condition("AND", left, right, None, true)
    }

    pub fn or(self, left: &str, right: &str) -> Self {
        self.condition("OR", left, right, None, true)
    }

    /// Full `ON` form: table override for the left column, and control of
    /// right-side qualification. An unqualified right side is treated as a
    /// literal (numeric verbatim, otherwise single-quoted).
    pub fn on_with(self, left: &str, right: &str, table: Option<&str>, qualify_right: bool) -> Self {
        self.condition("ON", left, right, table, qualify_right)
    }

    /// Full `AND` form, see [`on_with`](JoinBuilder::on_with).
    pub fn and_with(self, left: &str, right: &str, table: Option<&str>, qualify_right: bool) -> Self {
        self.condition("AND", left, right, table, qualify_right)
    }

    /// Full `OR` form, see [`on_with`](JoinBuilder::on_with).
    pub fn or_with(self, left: &str, right: &str, table: Option<&str>, qualify_right: bool) -> Self {
        self.condition("OR", left, right, table, qualify_right)
    }

    /// Write the accumulated text into the SELECT's join clause and return
    /// the SELECT.
    pub fn end(mut self) -> Select {
        self.parent.set_join(self.join);
        self.parent
    }

    fn push_join(&mut self, table: &str, join_type: JoinType) {
        self.join_table = table.to_string();
        if !self.join.is_empty() {
            self.join.push(' ');
        }
        self.join.push_str(join_type.keyword());
        self.join.push(' ');
        self.join.push_str(table);
    }

    fn condition(
        mut self,
        separator: &'static str,
        left: &str,
        right: &str,
        table: Option<&str>,
        qualify_right: bool,
    ) -> Self {
        let left = format!("{}.{}", table.unwrap_or(&self.main_table), left);

        let right = if qualify_right {
            format!("{}.{}", self.join_table, right)
        } else if right.parse::<f64>().is_ok() {
            right.to_string()
        } else {
            format!("'{}'", right)
        };

        self.join
            .push_str(&format!(" {} {} = {}", separator, left, right));
        self
    }
}
