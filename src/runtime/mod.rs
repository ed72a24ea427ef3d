//! Interface generated accessors compile against.
//!
//! Generated code calls exactly two operations on an [`Executor`]: `query`
//! for selects and `exec` for mutations. A database driver adapts itself by
//! implementing the trait; this crate ships none.
//!
//! # Example
//!
//! ```ignore
//! use sqlgen::runtime::{Context, Executor};
//!
//! async fn load(db: &dyn Executor) -> Result<(), sqlgen::runtime::DbError> {
//!     let ctx = Context::new();
//!     let users = users::GetUsers(db, &ctx, 42).await?;
//!     Ok(())
//! }
//! ```

pub mod value;

use async_trait::async_trait;
use thiserror::Error;

pub use tokio;
pub use tokio_util::sync::CancellationToken;
pub use value::{FromValue, Value};

/// Execution context handed to every call. Cancelling it stops streaming
/// accessors and should abort in-flight driver work.
pub type Context = CancellationToken;

/// Errors surfaced by generated accessors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DbError {
    /// The context was cancelled.
    #[error("operation cancelled")]
    Cancelled,

    /// A row had fewer columns than the select list.
    #[error("column {index} out of range (row has {len} columns)")]
    ColumnOutOfRange { index: usize, len: usize },

    /// A column value could not be converted to the field type.
    #[error("column {index}: cannot read {found} as {expected}")]
    Conversion {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// Error reported by the driver.
    #[error("driver error: {0}")]
    Driver(String),
}

impl DbError {
    pub fn driver(message: impl Into<String>) -> Self {
        DbError::Driver(message.into())
    }
}

/// Outcome of a mutating statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecResult {
    pub rows_affected: u64,
    pub last_insert_id: Option<i64>,
}

/// One fetched row; values are in select-list order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read column `index` as `T`.
    pub fn get<T: FromValue>(&self, index: usize) -> Result<T, DbError> {
        let value = self.values.get(index).ok_or(DbError::ColumnOutOfRange {
            index,
            len: self.values.len(),
        })?;
        T::from_value(value).ok_or(DbError::Conversion {
            index,
            expected: T::TYPE_NAME,
            found: value.kind(),
        })
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

/// A result cursor. Dropping it releases the underlying resources.
#[async_trait]
pub trait Rows: Send {
    /// Advance to the next row; `None` once exhausted.
    async fn next(&mut self) -> Result<Option<Row>, DbError>;
}

/// The database seam generated code talks to.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run a select and return its cursor.
    async fn query(
        &self,
        ctx: &Context,
        sql: &str,
        args: &[Value],
    ) -> Result<Box<dyn Rows>, DbError>;

    /// Run a mutating statement once.
    async fn exec(&self, ctx: &Context, sql: &str, args: &[Value]) -> Result<ExecResult, DbError>;
}

/// In-memory cursor over pre-fetched rows.
#[derive(Debug, Default)]
pub struct VecRows {
    rows: std::vec::IntoIter<Row>,
}

impl VecRows {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: rows.into_iter(),
        }
    }
}

#[async_trait]
impl Rows for VecRows {
    async fn next(&mut self) -> Result<Option<Row>, DbError> {
        Ok(self.rows.next())
    }
}
