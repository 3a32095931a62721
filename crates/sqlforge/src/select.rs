//! SELECT statement builder.

use crate::condition::{ConditionChain, ConditionKind, ConditionTarget};
use crate::funcs::SqlFunc;
use crate::join::{JoinBuilder, JoinType};
use crate::placeholder::Placeholders;
use crate::statement::{Clause, SqlStatement};

/// Sort direction for [`Select::order`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderDir {
    Asc,
    Desc,
}

impl OrderDir {
    fn keyword(self) -> &'static str {
        match self {
            OrderDir::Asc => "ASC",
            OrderDir::Desc => "DESC",
        }
    }
}

/// SELECT statement builder.
///
/// Columns are qualified with the *context table*: the main table by
/// default, rebindable with [`from`](Select::from) and restored with
/// [`reset_table`](Select::reset_table). Child builders for conditions and
/// joins take the builder by value and hand it back at their `end()`.
#[derive(Clone, Debug)]
pub struct Select {
    main_table: String,
    additional_table: String,
    placeholders: Placeholders,
    union: String,
    command: String,
    distinct: String,
    columns: String,
    from: String,
    join: String,
    where_clause: String,
    group: String,
    having: String,
    order: String,
    limit: String,
}

impl Select {
    const CLAUSES: &'static [Clause] = &[
        Clause::Union,
        Clause::Command,
        Clause::Distinct,
        Clause::Columns,
        Clause::From,
        Clause::Join,
        Clause::Where,
        Clause::Group,
        Clause::Having,
        Clause::Order,
        Clause::Limit,
    ];

    /// Create a SELECT builder for `table`.
    pub fn new(table: &str) -> Self {
        Self {
            main_table: table.to_string(),
            additional_table: String::new(),
            placeholders: Placeholders::new(),
            union: String::new(),
            command: "SELECT".to_string(),
            distinct: String::new(),
            columns: String::new(),
            from: format!("FROM {}", table),
            join: String::new(),
            where_clause: String::new(),
            group: String::new(),
            having: String::new(),
            order: String::new(),
            limit: String::new(),
        }
    }

    /// Append one column, qualified with the context table.
    pub fn column(self, column: &str) -> Self {
        self.name_columns(&[column])
    }

    /// Append several columns, each qualified with the context table.
    pub fn columns(self, columns: &[&str]) -> Self {
        self.name_columns(columns)
    }

    /// Append the wildcard column.
    pub fn all(self) -> Self {
        self.name_columns(&["*"])
    }

    /// Append `column AS alias`. A missing alias derives `{table}_{column}`.
    pub fn alias(mut self, column: &str, alias: Option<&str>) -> Self {
        let table = self.context_table();
        let alias = match alias {
            Some(alias) => alias.to_string(),
            None => format!("{}_{}", table, column),
        };
        self.aliases(&[(column, alias.as_str())])
    }

    /// Append `column AS alias` pairs.
    pub fn aliases(self, pairs: &[(&str, &str)]) -> Self {
        let rendered: Vec<String> = pairs
            .iter()
            .map(|(column, alias)| format!("{} AS {}", column, alias))
            .collect();
        let refs: Vec<&str> = rendered.iter().map(String::as_str).collect();
        self.name_columns(&refs)
    }

    /// Mark the statement DISTINCT.
    pub fn distinct(mut self) -> Self {
        self.distinct = "DISTINCT".to_string();
        self
    }

    /// Rebind the context table used to qualify later columns.
    ///
    /// The FROM clause text itself is set at construction and replaced by a
    /// union rebase, not here.
    pub fn from(mut self, table: &str) -> Self {
        self.additional_table = table.to_string();
        self
    }

    /// Restore the context table to the main table.
    pub fn reset_table(mut self) -> Self {
        self.additional_table = self.main_table.clone();
        self
    }

    /// Append an aggregate call to the column list. A not-applicable
    /// function contributes nothing.
    pub fn sql_functions(
        mut self,
        func: SqlFunc,
        column: &str,
        table: Option<&str>,
        alias: Option<&str>,
    ) -> Self {
        let table = match table {
            Some(table) => table.to_string(),
            None => self.context_table(),
        };

        if let Some(sql) = func.apply(column, &table, alias) {
            if !self.columns.is_empty() {
                self.columns.push_str(", ");
            }
            self.columns.push_str(&sql);
        }
        self
    }

    /// Open a WHERE chain; `end()` returns this builder.
    pub fn where_(self) -> ConditionChain<Self> {
        ConditionChain::new(self, ConditionKind::Where)
    }

    /// Open a HAVING chain; `end()` returns this builder.
    pub fn having(self) -> ConditionChain<Self> {
        ConditionChain::new(self, ConditionKind::Having)
    }

    /// Open a join builder on `table`; `end()` returns this builder.
    pub fn join(self, table: &str, join_type: JoinType) -> JoinBuilder {
        JoinBuilder::new(self, table, join_type)
    }

    /// Append a GROUP BY column, qualified with the context table.
    pub fn group(self, column: &str) -> Self {
        self.group_with(column, None)
    }

    /// GROUP BY with a table override.
    pub fn group_with(mut self, column: &str, table: Option<&str>) -> Self {
        let table = match table {
            Some(table) => table.to_string(),
            None => self.context_table(),
        };
        let target = format!("{}.{}", table, column);

        if self.group.is_empty() {
            self.group = format!("GROUP BY {}", target);
        } else {
            self.group.push_str(", ");
            self.group.push_str(&target);
        }
        self
    }

    /// Append an ORDER BY target.
    pub fn order(self, column: &str, direction: OrderDir) -> Self {
        self.order_with(Some(column), direction, None, None)
    }

    /// Full ORDER BY form with a table override and optional aggregate
    /// wrapping.
    ///
    /// The target text goes through the placeholder map under the key
    /// `order`, so the rendered clause carries a token until values are
    /// substituted; a `None` column allocates an unbound token for later
    /// binding.
    pub fn order_with(
        mut self,
        column: Option<&str>,
        direction: OrderDir,
        table: Option<&str>,
        func: Option<SqlFunc>,
    ) -> Self {
        let table = match table {
            Some(table) => table.to_string(),
            None => self.context_table(),
        };

        let target = column.map(|column| {
            func.and_then(|func| func.apply(column, &table, None))
                .unwrap_or_else(|| format!("{}.{}", table, column))
        });

        let token = self.placeholders.allocate("order", target);
        let entry = format!("{} {}", token, direction.keyword());

        if self.order.is_empty() {
            self.order = format!("ORDER BY {}", entry);
        } else {
            self.order.push_str(", ");
            self.order.push_str(&entry);
        }
        self
    }

    /// LIMIT with a bound quantity.
    pub fn limit(self, quantity: u64) -> Self {
        self.limit_with(Some(quantity), None, false)
    }

    /// Full LIMIT form through `limit`/`offset` placeholders, in the MySQL
    /// `LIMIT offset, quantity` shape.
    ///
    /// A `None` quantity allocates an unbound token; the offset token is
    /// only allocated when an offset is given or `need_offset` asks for an
    /// unbound one.
    pub fn limit_with(mut self, quantity: Option<u64>, offset: Option<u64>, need_offset: bool) -> Self {
        let quantity = self
            .placeholders
            .allocate("limit", quantity.map(|quantity| quantity.to_string()));

        let offset = if offset.is_some() || need_offset {
            Some(
                self.placeholders
                    .allocate("offset", offset.map(|offset| offset.to_string())),
            )
        } else {
            None
        };

        self.limit = match offset {
            Some(offset) => format!("LIMIT {}, {}", offset, quantity),
            None => format!("LIMIT {}", quantity),
        };
        self
    }

    /// Freeze the statement built so far into a union segment and start the
    /// next SELECT against `table`.
    pub fn union(self, table: &str) -> Self {
        self.create_union(table, "UNION")
    }

    /// Like [`union`](Select::union) with a `UNION ALL` marker.
    pub fn union_all(self, table: &str) -> Self {
        self.create_union(table, "UNION ALL")
    }

    // Sweep the canonical clause list: move non-empty fragments into the
    // union buffer, reset `command` to the bare SELECT keyword, leave `from`
    // for the rebase, clear the rest, then rebase onto the new table.
    fn create_union(mut self, table: &str, marker: &str) -> Self {
        for &clause in Self::CLAUSES {
            if clause == Clause::Union {
                continue;
            }
            let Some(slot) = self.clause_slot(clause) else {
                continue;
            };
            if slot.is_empty() {
                continue;
            }

            let text = std::mem::take(slot);
            if !self.union.is_empty() {
                self.union.push(' ');
            }
            self.union.push_str(&text);

            match clause {
                Clause::Command => self.command = "SELECT".to_string(),
                Clause::From => self.from = text,
                _ => {}
            }
        }

        self.union.push(' ');
        self.union.push_str(marker);
        self.rebase(table);
        self
    }

    fn rebase(&mut self, table: &str) {
        self.from = format!("FROM {}", table);
        self.main_table = table.to_string();
        self.additional_table = table.to_string();
    }

    // Qualification context for columns; defaults to the main table.
    fn context_table(&mut self) -> String {
        if self.additional_table.is_empty() {
            self.additional_table = self.main_table.clone();
        }
        self.additional_table.clone()
    }

    fn name_columns(mut self, columns: &[&str]) -> Self {
        let table = self.context_table();
        for column in columns {
            if !self.columns.is_empty() {
                self.columns.push_str(", ");
            }
            self.columns.push_str(&format!("{}.{}", table, column));
        }
        self
    }

    fn clause_slot(&mut self, clause: Clause) -> Option<&mut String> {
        let slot = match clause {
            Clause::Union => &mut self.union,
            Clause::Command => &mut self.command,
            Clause::Distinct => &mut self.distinct,
            Clause::Columns => &mut self.columns,
            Clause::From => &mut self.from,
            Clause::Join => &mut self.join,
            Clause::Where => &mut self.where_clause,
            Clause::Group => &mut self.group,
            Clause::Having => &mut self.having,
            Clause::Order => &mut self.order,
            Clause::Limit => &mut self.limit,
            _ => return None,
        };
        Some(slot)
    }

    pub(crate) fn set_join(&mut self, text: String) {
        self.join = text;
    }
}

impl SqlStatement for Select {
    fn clause_order(&self) -> &'static [Clause] {
        Self::CLAUSES
    }

    fn clause_text(&self, clause: Clause) -> &str {
        match clause {
            Clause::Union => &self.union,
            Clause::Command => &self.command,
            Clause::Distinct => &self.distinct,
            Clause::Columns => &self.columns,
            Clause::From => &self.from,
            Clause::Join => &self.join,
            Clause::Where => &self.where_clause,
            Clause::Group => &self.group,
            Clause::Having => &self.having,
            Clause::Order => &self.order,
            Clause::Limit => &self.limit,
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

impl ConditionTarget for Select {
    fn main_table(&self) -> &str {
        &self.main_table
    }

    fn set_condition(&mut self, kind: ConditionKind, text: String) {
        match kind {
            ConditionKind::Where => self.where_clause = text,
            ConditionKind::Having => self.having = text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_select() {
        let select = Select::new("users");
        assert_eq!(select.get_query(true), "SELECT FROM users");
    }

    #[test]
    fn test_columns_qualified_with_main_table() {
        let select = Select::new("users").columns(&["id", "name"]);
        assert_eq!(select.get_query(true), "SELECT users.id, users.name FROM users");
    }

    #[test]
    fn test_all_and_distinct() {
        let select = Select::new("users").distinct().all();
        assert_eq!(select.get_query(true), "SELECT DISTINCT users.* FROM users");
    }

    #[test]
    fn test_from_rebinds_column_context() {
        let select = Select::new("users").from("u").column("id").reset_table().column("name");
        assert_eq!(select.get_query(true), "SELECT u.id, users.name FROM users");
    }

    #[test]
    fn test_alias_default_name() {
        let select = Select::new("users").alias("id", None);
        assert_eq!(select.get_query(true), "SELECT users.id AS users_id FROM users");
    }

    #[test]
    fn test_aliases_pairs() {
        let select = Select::new("users").aliases(&[("id", "uid"), ("name", "uname")]);
        assert_eq!(
            select.get_query(true),
            "SELECT users.id AS uid, users.name AS uname FROM users"
        );
    }

    #[test]
    fn test_sql_functions_appends_to_columns() {
        let select = Select::new("orders")
            .column("user_id")
            .sql_functions(SqlFunc::Count, "*", None, Some("total"));
        assert_eq!(
            select.get_query(true),
            "SELECT orders.user_id, COUNT(*) AS total FROM orders"
        );
    }

    #[test]
    fn test_group_accumulates() {
        let select = Select::new("orders").all().group("user_id").group_with("status", Some("o"));
        assert_eq!(
            select.get_query(true),
            "SELECT orders.* FROM orders GROUP BY orders.user_id, o.status"
        );
    }

    #[test]
    fn test_order_substitutes_target() {
        let select = Select::new("users").all().order("name", OrderDir::Desc);
        assert_eq!(
            select.get_query(false),
            "SELECT users.* FROM users ORDER BY :order DESC"
        );
        assert_eq!(
            select.get_query(true),
            "SELECT users.* FROM users ORDER BY users.name DESC"
        );
    }

    #[test]
    fn test_order_with_aggregate() {
        let select = Select::new("orders")
            .all()
            .order_with(Some("price"), OrderDir::Asc, None, Some(SqlFunc::Max));
        assert_eq!(
            select.get_query(true),
            "SELECT orders.* FROM orders ORDER BY MAX(orders.price) ASC"
        );
    }

    #[test]
    fn test_multiple_order_targets() {
        let select = Select::new("users")
            .all()
            .order("name", OrderDir::Asc)
            .order("id", OrderDir::Desc);
        assert_eq!(
            select.get_query(true),
            "SELECT users.* FROM users ORDER BY users.name ASC, users.id DESC"
        );
    }

    #[test]
    fn test_limit_plain() {
        let select = Select::new("users").all().limit(10);
        assert_eq!(select.get_query(true), "SELECT users.* FROM users LIMIT 10");
    }

    #[test]
    fn test_limit_with_offset() {
        let select = Select::new("users").all().limit_with(Some(10), Some(20), false);
        assert_eq!(select.get_query(true), "SELECT users.* FROM users LIMIT 20, 10");
    }

    #[test]
    fn test_limit_unbound_until_get_all() {
        let mut select = Select::new("users").all().limit_with(None, None, true);
        assert_eq!(
            select.get_query(true),
            "SELECT users.* FROM users LIMIT :offset, :limit"
        );
        let (query, bindings) = select.get_all(&["5", "50"]);
        assert_eq!(query, "SELECT users.* FROM users LIMIT :offset, :limit");
        assert_eq!(bindings.value(":limit"), Some("5"));
        assert_eq!(bindings.value(":offset"), Some("50"));
    }

    #[test]
    fn test_union_freezes_and_rebases() {
        let select = Select::new("users").columns(&["id"]).union("admins").columns(&["id"]);
        assert_eq!(
            select.get_query(true),
            "SELECT users.id FROM users UNION SELECT admins.id FROM admins"
        );
    }

    #[test]
    fn test_union_all_marker() {
        let select = Select::new("users").all().union_all("admins").all();
        assert_eq!(
            select.get_query(true),
            "SELECT users.* FROM users UNION ALL SELECT admins.* FROM admins"
        );
    }

    #[test]
    fn test_union_resets_clauses() {
        let select = Select::new("users")
            .columns(&["id"])
            .where_()
            .equal("age", 30)
            .end()
            .union("admins");

        assert_eq!(select.clause_text(Clause::Command), "SELECT");
        assert_eq!(select.clause_text(Clause::From), "FROM admins");
        assert_eq!(select.clause_text(Clause::Columns), "");
        assert_eq!(select.clause_text(Clause::Where), "");
    }
}
