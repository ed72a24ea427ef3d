//! Front end for the data-access DSL.
//!
//! A DSL source file is ordinary Rust, written against [`vocabulary`] and
//! parsed with `syn`:
//!
//! - `struct`s with named fields declare tables; a `#[tag = "..."]` attribute
//!   on a field carries `key:"value"` metadata (`name`, `identity`,
//!   `tableName`).
//! - `static`/`const` items typed as one of those structs bind entities.
//! - `fn init` configures the generated module.
//! - Every other `fn` whose body calls the builder vocabulary becomes one
//!   generated accessor.
//!
//! # Example
//!
//! ```ignore
//! use sqlgen::dsl::*;
//!
//! #[derive(Table)]
//! pub struct User {
//!     #[tag = r#"identity:"true""#]
//!     pub UserID: i64,
//!     pub UserName: String,
//!     pub Sex: i32,
//! }
//!
//! const user: User = entity();
//!
//! fn init() {
//!     SetPackageName("users");
//! }
//!
//! pub fn GetUser(userID: i64) {
//!     From(user);
//!     SelectAll(user);
//!     Where(user.UserID == userID);
//!     SetReturnType(ReturnRecord);
//! }
//! ```
//!
//! Calls may also be chained: `Query::new().from(user).select_all(user).filter(..)`.

pub mod declarations;
pub mod interpreter;
pub mod operation;
pub mod span;
pub mod tag;
pub mod translate;
pub mod vocabulary;

pub use declarations::{bind_entities, extract_tables};
pub use interpreter::{interpret_file, DslModule, FnParam, ModuleConfig, QueryFunction};
pub use operation::{scan_calls, Call, Operation, StatementKind};
pub use span::SourcePos;
pub use tag::Tag;
pub use vocabulary::{
    entity, Column, Delete, From, InsertAll, OrderBy, OrderByDescending, Query, ReturnDefault,
    ReturnExecResult, ReturnMode, ReturnRecord, ReturnRecordChannel, ReturnRecordSet,
    ReturnScalar, ReturnScalarSet, Select, SelectAll, SetChannelBufferSize, SetPackageName,
    SetReturnType, SetRuntimePath, Table, TableName, Update, Where,
};

use serde::{Deserialize, Serialize};

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while reading a DSL source unit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DslError {
    /// A builder call has malformed or unresolvable arguments.
    #[error("argument error at {pos}: {message}")]
    Argument { pos: SourcePos, message: String },

    /// A declared table type is not a plain record.
    #[error("type definition error for `{type_name}` at {pos}: {message}")]
    TypeDefinition {
        type_name: String,
        pos: SourcePos,
        message: String,
    },

    /// A call outside the vocabulary, under `UnsupportedPolicy::Error`.
    #[error("unsupported construct at {pos}: {message}")]
    Unsupported { pos: SourcePos, message: String },
}

impl DslError {
    pub fn argument(pos: SourcePos, message: impl Into<String>) -> Self {
        DslError::Argument {
            pos,
            message: message.into(),
        }
    }

    /// Source position the error originated at.
    pub fn pos(&self) -> SourcePos {
        match self {
            DslError::Argument { pos, .. }
            | DslError::TypeDefinition { pos, .. }
            | DslError::Unsupported { pos, .. } => *pos,
        }
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// A diagnostic message with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub pos: SourcePos,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(pos: SourcePos, message: impl Into<String>) -> Self {
        Self {
            pos,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(pos: SourcePos, message: impl Into<String>) -> Self {
        Self {
            pos,
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A fatal error that prevents compilation.
    Error,
    /// A warning that doesn't prevent compilation.
    Warning,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} (at {})", level, self.message, self.pos)
    }
}

impl From<&DslError> for Diagnostic {
    fn from(err: &DslError) -> Self {
        Diagnostic::error(err.pos(), err.to_string())
    }
}

/// What to do with a call outside the builder vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedPolicy {
    /// Log a warning, record a diagnostic and skip the call.
    #[default]
    Warn,
    /// Fail the file.
    Error,
}

/// Collects non-fatal findings while a file is interpreted.
#[derive(Debug, Default)]
pub struct Reporter {
    policy: UnsupportedPolicy,
    diagnostics: Vec<Diagnostic>,
}

impl Reporter {
    pub fn new(policy: UnsupportedPolicy) -> Self {
        Self {
            policy,
            diagnostics: Vec::new(),
        }
    }

    pub fn policy(&self) -> UnsupportedPolicy {
        self.policy
    }

    /// Report an out-of-vocabulary call according to the policy.
    pub fn unsupported(
        &mut self,
        pos: SourcePos,
        message: impl Into<String>,
    ) -> Result<(), DslError> {
        let message = message.into();
        match self.policy {
            UnsupportedPolicy::Error => Err(DslError::Unsupported { pos, message }),
            UnsupportedPolicy::Warn => {
                self.warn(pos, message);
                Ok(())
            }
        }
    }

    /// Record a warning.
    pub fn warn(&mut self, pos: SourcePos, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%pos, "{}", message);
        self.diagnostics.push(Diagnostic::warning(pos, message));
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
