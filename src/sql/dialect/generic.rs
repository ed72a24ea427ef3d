//! Generic SQL dialect.
//!
//! Emits identifiers unquoted and `?` markers for every parameter, the form
//! most `database/sql`-style drivers accept.

use super::helpers;
use super::SqlDialect;

/// Generic SQL dialect (the default).
#[derive(Debug, Clone, Copy)]
pub struct Generic;

impl SqlDialect for Generic {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_none(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    fn delete_requires_from(&self) -> bool {
        false
    }
}
