//! Statement AST produced per DSL function.

use super::expr::{ColumnRef, OrderByExpr, SqlExpr};

/// One generated statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectStatement),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    /// Selected columns in output order. Row mapping relies on this order.
    pub select_list: Vec<SqlExpr>,
    /// Physical table name.
    pub table: String,
    pub filter: Option<SqlExpr>,
    pub order_by: Vec<OrderByExpr>,
    pub return_mode: ReturnMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub table: String,
    /// Every column of the table, in declaration order.
    pub columns: Vec<ColumnRef>,
    /// Leave identity columns out of the column and value lists.
    pub excludes_identity: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: ColumnRef,
    /// Always a `Parameter` or `Literal`.
    pub value: SqlExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub assignments: Vec<Assignment>,
    pub table: String,
    pub filter: Option<SqlExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub table: String,
    pub filter: Option<SqlExpr>,
}

/// Shape of a generated function's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnMode {
    /// Behaves as `RecordSet`.
    #[default]
    Default,
    ExecResult,
    Scalar,
    ScalarSet,
    Record,
    RecordSet,
    RecordChannel,
}

impl ReturnMode {
    /// Parse a mode name. Accepts `ReturnRecord`, `Record`, `record`, ...
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix("Return").unwrap_or(name);
        let mode = match name.to_ascii_lowercase().replace('_', "").as_str() {
            "default" => ReturnMode::Default,
            "execresult" => ReturnMode::ExecResult,
            "scalar" => ReturnMode::Scalar,
            "scalarset" => ReturnMode::ScalarSet,
            "record" => ReturnMode::Record,
            "recordset" => ReturnMode::RecordSet,
            "recordchannel" => ReturnMode::RecordChannel,
            _ => return None,
        };
        Some(mode)
    }

    /// Resolve `Default` to `RecordSet`.
    pub fn resolve(self) -> Self {
        match self {
            ReturnMode::Default => ReturnMode::RecordSet,
            other => other,
        }
    }

    /// Whether rows map onto a single column rather than a record.
    pub fn is_scalar(self) -> bool {
        matches!(self, ReturnMode::Scalar | ReturnMode::ScalarSet)
    }
}

impl std::fmt::Display for ReturnMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReturnMode::Default => "Default",
            ReturnMode::ExecResult => "ExecResult",
            ReturnMode::Scalar => "Scalar",
            ReturnMode::ScalarSet => "ScalarSet",
            ReturnMode::Record => "Record",
            ReturnMode::RecordSet => "RecordSet",
            ReturnMode::RecordChannel => "RecordChannel",
        };
        f.write_str(name)
    }
}

impl Statement {
    /// Physical table name the statement targets.
    pub fn table(&self) -> &str {
        match self {
            Statement::Select(s) => &s.table,
            Statement::Insert(s) => &s.table,
            Statement::Update(s) => &s.table,
            Statement::Delete(s) => &s.table,
        }
    }

    /// Return mode; mutations always yield an execution result.
    pub fn return_mode(&self) -> ReturnMode {
        match self {
            Statement::Select(s) => s.return_mode.resolve(),
            _ => ReturnMode::ExecResult,
        }
    }

    /// Bound parameter names in placeholder order.
    ///
    /// Updates walk assignment values first, then the predicate. Inserts
    /// bind every non-identity column by field name.
    pub fn parameters(&self) -> Vec<String> {
        let mut out = Vec::new();
        match self {
            Statement::Select(s) => {
                if let Some(filter) = &s.filter {
                    filter.collect_parameters(&mut out);
                }
            }
            Statement::Delete(s) => {
                if let Some(filter) = &s.filter {
                    filter.collect_parameters(&mut out);
                }
            }
            Statement::Update(s) => {
                for assignment in &s.assignments {
                    assignment.value.collect_parameters(&mut out);
                }
                if let Some(filter) = &s.filter {
                    filter.collect_parameters(&mut out);
                }
            }
            Statement::Insert(s) => {
                out.extend(
                    s.inserted_columns()
                        .map(|c| c.source.name.clone()),
                );
            }
        }
        out
    }
}

impl InsertStatement {
    /// Columns that appear in the column and value lists.
    pub fn inserted_columns(&self) -> impl Iterator<Item = &ColumnRef> {
        let skip_identity = self.excludes_identity;
        self.columns
            .iter()
            .filter(move |c| !(skip_identity && c.source.is_identity))
    }
}
