//! Aggregate SQL function rendering.

/// Closed set of aggregate functions that may wrap a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SqlFunc {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl SqlFunc {
    /// Lowercase tag. Used as the placeholder key when the wrapped call
    /// stands in for a column in a condition chain.
    pub fn name(self) -> &'static str {
        match self {
            SqlFunc::Count => "count",
            SqlFunc::Sum => "sum",
            SqlFunc::Avg => "avg",
            SqlFunc::Min => "min",
            SqlFunc::Max => "max",
        }
    }

    /// Look a function up by its lowercase tag. `None` signals "not
    /// applicable", distinct from any rendered text.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "count" => Some(SqlFunc::Count),
            "sum" => Some(SqlFunc::Sum),
            "avg" => Some(SqlFunc::Avg),
            "min" => Some(SqlFunc::Min),
            "max" => Some(SqlFunc::Max),
            _ => None,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            SqlFunc::Count => "COUNT",
            SqlFunc::Sum => "SUM",
            SqlFunc::Avg => "AVG",
            SqlFunc::Min => "MIN",
            SqlFunc::Max => "MAX",
        }
    }

    /// Wrap `column` in the function call.
    ///
    /// The wildcard `*` is never table-qualified; any other column renders as
    /// `table.column`. A non-empty `alias` appends ` AS alias`. Returns `None`
    /// when there is nothing to wrap, so callers can fall back to plain
    /// column rendering.
    pub fn apply(self, column: &str, table: &str, alias: Option<&str>) -> Option<String> {
        if column.is_empty() {
            return None;
        }

        let target = if column == "*" {
            column.to_string()
        } else {
            format!("{}.{}", table, column)
        };

        let mut sql = format!("{}({})", self.keyword(), target);
        if let Some(alias) = alias.filter(|alias| !alias.is_empty()) {
            sql.push_str(" AS ");
            sql.push_str(alias);
        }
        Some(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_qualifies_column() {
        assert_eq!(
            SqlFunc::Count.apply("id", "users", None),
            Some("COUNT(users.id)".into())
        );
    }

    #[test]
    fn test_apply_wildcard_is_unqualified() {
        assert_eq!(
            SqlFunc::Count.apply("*", "users", Some("total")),
            Some("COUNT(*) AS total".into())
        );
    }

    #[test]
    fn test_apply_with_alias() {
        assert_eq!(
            SqlFunc::Sum.apply("price", "orders", Some("revenue")),
            Some("SUM(orders.price) AS revenue".into())
        );
    }

    #[test]
    fn test_apply_empty_column_not_applicable() {
        assert_eq!(SqlFunc::Max.apply("", "users", None), None);
    }

    #[test]
    fn test_from_tag() {
        assert_eq!(SqlFunc::from_tag("avg"), Some(SqlFunc::Avg));
        assert_eq!(SqlFunc::from_tag("median"), None);
    }
}
