//! Declarations DSL source files are written against.
//!
//! With `use sqlgen::dsl::*;` a DSL file type-checks as ordinary Rust.
//! Every call here is a no-op at run time; the compiler only reads the
//! syntax. Calls come in two equivalent spellings:
//!
//! ```ignore
//! From(user);
//! SelectAll(user);
//! Where(user.UserID == userID);
//!
//! Query::new()
//!     .from(user)
//!     .select_all(user)
//!     .filter(user.UserID == userID);
//! ```
//!
//! A column list naming more than one column is written as a tuple:
//! `Select((user.UserID, user.UserName))`. Entities are bound with
//! `const user: User = entity();`.

#![allow(non_snake_case, non_upper_case_globals)]

pub use crate::sql::ReturnMode;
pub use sqlgen_macros::Table;

use super::operation::Operation;

// ============================================================================
// Records
// ============================================================================

/// A record entities can be bound to. Implemented by `#[derive(Table)]`.
pub trait Table: Sized {
    /// Placeholder value of every entity of this record.
    const ENTITY: Self;
}

/// A field type a [`Table`] record may hold.
pub trait Column: Sized {
    /// The field's value inside [`Table::ENTITY`].
    const EMPTY: Self;
}

/// Field type that sets the physical table name through its tag:
/// `#[tag = r#"tableName:"accounts""#] pub table: TableName`.
///
/// The field is dropped from the generated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableName;

/// Initialiser of an entity binding.
pub const fn entity<T: Table>() -> T {
    T::ENTITY
}

macro_rules! impl_column {
    ($($ty:ty => $empty:expr),* $(,)?) => {
        $(
            impl Column for $ty {
                const EMPTY: Self = $empty;
            }
        )*
    };
}

impl_column! {
    i8 => 0, i16 => 0, i32 => 0, i64 => 0, i128 => 0, isize => 0,
    u8 => 0, u16 => 0, u32 => 0, u64 => 0, u128 => 0, usize => 0,
    f32 => 0.0, f64 => 0.0,
    bool => false,
    char => '\0',
    String => String::new(),
    &'static str => "",
    TableName => TableName,
}

impl<T> Column for Vec<T> {
    const EMPTY: Self = Vec::new();
}

impl<T> Column for Option<T> {
    const EMPTY: Self = None;
}

// ============================================================================
// Return modes
// ============================================================================

pub const ReturnDefault: ReturnMode = ReturnMode::Default;
pub const ReturnExecResult: ReturnMode = ReturnMode::ExecResult;
pub const ReturnScalar: ReturnMode = ReturnMode::Scalar;
pub const ReturnScalarSet: ReturnMode = ReturnMode::ScalarSet;
pub const ReturnRecord: ReturnMode = ReturnMode::Record;
pub const ReturnRecordSet: ReturnMode = ReturnMode::RecordSet;
pub const ReturnRecordChannel: ReturnMode = ReturnMode::RecordChannel;

// ============================================================================
// Builder calls
// ============================================================================

pub fn From<T>(_table: T) {}

pub fn Select<C>(_columns: C) {}

pub fn SelectAll<T>(_table: T) {}

pub fn Where(_condition: bool) {}

pub fn InsertAll<T>(_table: T) {}

pub fn Update<C, V>(_column: C, _value: V) {}

pub fn Delete<T>(_table: T) {}

pub fn OrderBy<C>(_columns: C) {}

pub fn OrderByDescending<C>(_columns: C) {}

pub fn SetReturnType(_mode: ReturnMode) {}

/// Only meaningful with [`ReturnRecordChannel`].
pub fn SetChannelBufferSize(_size: usize) {}

/// Module initializer: wrap the generated code in `pub mod <name>`.
pub fn SetPackageName(_name: &str) {}

/// Module initializer: path generated code imports the runtime from.
pub fn SetRuntimePath(_path: &str) {}

/// Fluent spelling of the builder calls.
///
/// Each method records its operation, so a built query can be inspected
/// with [`Query::operations`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    operations: Vec<Operation>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations in call order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    fn record(mut self, op: Operation) -> Self {
        self.operations.push(op);
        self
    }

    pub fn from<T>(self, _table: T) -> Self {
        self.record(Operation::From)
    }

    pub fn select<C>(self, _columns: C) -> Self {
        self.record(Operation::Select)
    }

    pub fn select_all<T>(self, _table: T) -> Self {
        self.record(Operation::SelectAll)
    }

    pub fn filter(self, _condition: bool) -> Self {
        self.record(Operation::Where)
    }

    pub fn r#where(self, _condition: bool) -> Self {
        self.record(Operation::Where)
    }

    pub fn insert_all<T>(self, _table: T) -> Self {
        self.record(Operation::InsertAll)
    }

    pub fn update<C, V>(self, _column: C, _value: V) -> Self {
        self.record(Operation::Update)
    }

    pub fn delete<T>(self, _table: T) -> Self {
        self.record(Operation::Delete)
    }

    pub fn order_by<C>(self, _columns: C) -> Self {
        self.record(Operation::OrderBy)
    }

    pub fn order_by_descending<C>(self, _columns: C) -> Self {
        self.record(Operation::OrderByDescending)
    }

    pub fn set_return_type(self, _mode: ReturnMode) -> Self {
        self.record(Operation::SetReturnType)
    }

    pub fn set_channel_buffer_size(self, _size: usize) -> Self {
        self.record(Operation::SetChannelBufferSize)
    }
}
