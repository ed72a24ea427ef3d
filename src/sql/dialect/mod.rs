//! SQL Dialect definitions and formatting rules.
//!
//! This module provides a trait-based abstraction for the few SQL dialect
//! differences generated statements are exposed to:
//!
//! - Identifier quoting: none (generic), `"` (PG/SQLite), `` ` `` (MySQL), `[]` (T-SQL)
//! - Boolean literals: true/false vs 1/0
//! - Parameter markers: `?` vs `$n` vs `@pn`
//!
//! # Usage
//!
//! ```ignore
//! use sqlgen::sql::dialect::{Dialect, SqlDialect};
//!
//! let dialect = Dialect::Postgres;
//! let quoted = dialect.quote_identifier("user");  // "user"
//! let marker = dialect.placeholder(2);            // $2
//! ```

mod generic;
pub mod helpers;
mod mysql;
mod postgres;
mod sqlite;
mod tsql;

pub use generic::Generic;
pub use mysql::MySql;
pub use postgres::Postgres;
pub use sqlite::Sqlite;
pub use tsql::TSql;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// SQL dialect trait - defines how SQL constructs are rendered.
///
/// Implementations handle dialect-specific syntax differences.
/// The default implementations follow ANSI SQL where possible.
pub trait SqlDialect: std::fmt::Debug {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    // =========================================================================
    // Identifier and Literal Quoting
    // =========================================================================

    /// Quote an identifier (table, column).
    fn quote_identifier(&self, ident: &str) -> String;

    /// Quote a string literal.
    ///
    /// All dialects use single quotes with `''` for escaping.
    /// Override for Unicode prefix (T-SQL N'...').
    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    /// Format a boolean literal.
    fn format_bool(&self, b: bool) -> &'static str;

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Marker for the `index`-th bound parameter (1-based).
    fn placeholder(&self, index: usize) -> String {
        helpers::placeholder_question(index)
    }

    // =========================================================================
    // DML
    // =========================================================================

    /// Whether DELETE needs the FROM keyword before the table.
    ///
    /// T-SQL and the generic form accept `DELETE t`.
    fn delete_requires_from(&self) -> bool {
        true
    }
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Generic,
    Postgres,
    MySql,
    TSql,
    Sqlite,
}

impl Dialect {
    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Generic => &Generic,
            Dialect::Postgres => &Postgres,
            Dialect::MySql => &MySql,
            Dialect::TSql => &TSql,
            Dialect::Sqlite => &Sqlite,
        }
    }

    /// All dialects, in declaration order.
    pub fn all() -> &'static [Dialect] {
        &[
            Dialect::Generic,
            Dialect::Postgres,
            Dialect::MySql,
            Dialect::TSql,
            Dialect::Sqlite,
        ]
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        self.dialect().format_bool(b)
    }

    fn placeholder(&self, index: usize) -> String {
        self.dialect().placeholder(index)
    }

    fn delete_requires_from(&self) -> bool {
        self.dialect().delete_requires_from()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Dialect::all()
            .iter()
            .copied()
            .find(|d| d.name() == lower)
            .ok_or_else(|| format!("unknown SQL dialect: {}", s))
    }
}
