//! # sqlforge
//!
//! A fluent, in-process SQL statement builder.
//!
//! Statements are assembled as parameterized text with named `:placeholder`
//! tokens; nothing here talks to a database. The crate covers the four DML
//! commands, each with its own builder and a fixed clause order.
//!
//! ## Features
//!
//! - **Named placeholders**: every value goes through an insertion-ordered
//!   token map, with unique tokens derived from the column name
//! - **Fluent chains**: WHERE/HAVING and JOIN are built by child builders
//!   that own the statement and hand it back at `end()`
//! - **Canonical rendering**: clause fragments always render in the fixed
//!   per-command order, regardless of call order
//! - **Prepared or literal**: splice values immediately or leave tokens
//!   unbound and bind them positionally later
//!
//! ```
//! use sqlforge::{select, OrderDir, SqlStatement};
//!
//! let query = select("users")
//!     .columns(&["id", "name"])
//!     .where_()
//!     .equal("age", 30)
//!     .end()
//!     .order("name", OrderDir::Asc)
//!     .get_query(true);
//!
//! assert_eq!(
//!     query,
//!     "SELECT users.id, users.name FROM users WHERE users.age = 30 \
//!      ORDER BY users.name ASC"
//! );
//! ```

pub mod condition;
pub mod delete;
pub mod error;
pub mod funcs;
pub mod insert;
pub mod join;
pub mod placeholder;
pub mod select;
pub mod statement;
pub mod update;
pub mod value;

pub use condition::{CmpOp, ConditionChain, ConditionKind, ConditionTarget};
pub use delete::Delete;
pub use error::{BuildError, BuildResult};
pub use funcs::SqlFunc;
pub use insert::Insert;
pub use join::{JoinBuilder, JoinType};
pub use placeholder::{Placeholders, PLACEHOLDER_MARK};
pub use select::{OrderDir, Select};
pub use statement::{Clause, SqlStatement};
pub use update::Update;
pub use value::{InValues, Value};

/// Start a SELECT against `table`.
pub fn select(table: &str) -> Select {
    Select::new(table)
}

/// Start an INSERT into `table`.
pub fn insert(table: &str) -> Insert {
    Insert::new(table)
}

/// Start an UPDATE of `table`.
pub fn update(table: &str) -> Update {
    Update::new(table)
}

/// Start a DELETE from `table`.
pub fn delete(table: &str) -> Delete {
    Delete::new(table)
}
