//! SQL generation module.
//!
//! Statement ASTs are dialect-neutral; rendering goes through a
//! [`builder::SqlBuilder`] and, for the default builder, a token stream
//! serialized per dialect.
//!
//! - [`expr`] - Expression AST (predicates, assignments, select lists)
//! - [`statement`] - Select/Insert/Update/Delete statements and return modes
//! - [`builder`] - Pluggable rendering into parameterized SQL text
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations

pub mod builder;
pub mod dialect;
pub mod expr;
pub mod statement;
pub mod token;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use builder::{RenderedSql, SqlBuilder, TokenSqlBuilder};
pub use dialect::{Dialect, SqlDialect};
pub use expr::{BinaryOperator, ColumnRef, OrderByExpr, SqlExpr};
pub use statement::{
    Assignment, DeleteStatement, InsertStatement, ReturnMode, SelectStatement, Statement,
    UpdateStatement,
};
pub use token::{Token, TokenStream};
