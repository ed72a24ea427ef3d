//! Structural scan of function bodies into builder calls.
//!
//! Only expression statements are inspected. A free call (`from(user)`,
//! `dsl::SelectAll(user)`) yields one [`Call`] named by its last path
//! segment; a method chain (`q.from(user).select_all(user)`) yields one
//! call per method, innermost first. The chain root is never a call.

use inflector::Inflector;
use syn::ext::IdentExt;
use syn::{Block, Expr, Ident, Stmt};

use super::span::SourcePos;

/// The builder vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    From,
    Select,
    SelectAll,
    Where,
    Update,
    Delete,
    InsertAll,
    OrderBy,
    OrderByDescending,
    SetReturnType,
    SetChannelBufferSize,
    // Module initializer
    SetPackageName,
    SetRuntimePath,
}

impl Operation {
    /// Look up a normalised (snake case) call name.
    pub fn from_name(name: &str) -> Option<Self> {
        let op = match name {
            "from" => Operation::From,
            "select" => Operation::Select,
            "select_all" => Operation::SelectAll,
            "where" | "filter" => Operation::Where,
            "update" => Operation::Update,
            "delete" => Operation::Delete,
            "insert_all" => Operation::InsertAll,
            "order_by" => Operation::OrderBy,
            "order_by_descending" => Operation::OrderByDescending,
            "set_return_type" => Operation::SetReturnType,
            "set_channel_buffer_size" => Operation::SetChannelBufferSize,
            "set_package_name" => Operation::SetPackageName,
            "set_runtime_path" => Operation::SetRuntimePath,
            _ => return None,
        };
        Some(op)
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::From => "from",
            Operation::Select => "select",
            Operation::SelectAll => "select_all",
            Operation::Where => "where",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::InsertAll => "insert_all",
            Operation::OrderBy => "order_by",
            Operation::OrderByDescending => "order_by_descending",
            Operation::SetReturnType => "set_return_type",
            Operation::SetChannelBufferSize => "set_channel_buffer_size",
            Operation::SetPackageName => "set_package_name",
            Operation::SetRuntimePath => "set_runtime_path",
        }
    }

    /// Operations whose arguments are a column list, which may also be
    /// written as one tuple: `Select((user.id, user.name))`.
    pub fn takes_column_list(self) -> bool {
        matches!(
            self,
            Operation::Select | Operation::OrderBy | Operation::OrderByDescending
        )
    }

    /// Operations only valid in `fn init`.
    pub fn is_initializer(self) -> bool {
        matches!(self, Operation::SetPackageName | Operation::SetRuntimePath)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One builder call found in a function body.
#[derive(Debug, Clone)]
pub struct Call<'a> {
    /// Normalised name.
    pub name: String,
    pub operation: Option<Operation>,
    pub args: Vec<&'a Expr>,
    pub pos: SourcePos,
}

/// Kind of statement a DSL function builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Insert,
    Select,
    Update,
    Delete,
}

impl StatementKind {
    const PREFIXES: [(&'static str, StatementKind); 4] = [
        ("insert", StatementKind::Insert),
        ("select", StatementKind::Select),
        ("update", StatementKind::Update),
        ("delete", StatementKind::Delete),
    ];

    fn from_call_name(name: &str) -> Option<Self> {
        Self::PREFIXES
            .iter()
            .find(|(prefix, _)| name.starts_with(prefix))
            .map(|(_, kind)| *kind)
    }
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StatementKind::Insert => "insert",
            StatementKind::Select => "select",
            StatementKind::Update => "update",
            StatementKind::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Normalise a call identifier: strip `r#` and trailing `_`, then snake case.
///
/// `SelectAll`, `select_all` and `r#where`/`where_`/`Where` all compare equal
/// after normalisation.
pub fn normalize_name(ident: &Ident) -> String {
    let raw = ident.unraw().to_string();
    raw.trim_end_matches('_').to_snake_case()
}

/// Collect the builder calls of a function body, in source order.
pub fn scan_calls(block: &Block) -> Vec<Call<'_>> {
    let mut calls = Vec::new();
    for stmt in &block.stmts {
        if let Stmt::Expr(expr, _) = stmt {
            collect_calls(expr, &mut calls);
        }
    }
    calls
}

fn collect_calls<'a>(expr: &'a Expr, calls: &mut Vec<Call<'a>>) {
    match expr {
        Expr::Call(call) => {
            let Expr::Path(path) = &*call.func else {
                return;
            };
            let Some(segment) = path.path.segments.last() else {
                return;
            };
            calls.push(make_call(&segment.ident, call.args.iter().collect()));
        }
        Expr::MethodCall(method) => {
            // Receiver first so chained calls keep source order
            if let Expr::MethodCall(_) = &*method.receiver {
                collect_calls(&method.receiver, calls);
            }
            calls.push(make_call(&method.method, method.args.iter().collect()));
        }
        Expr::Paren(p) => collect_calls(&p.expr, calls),
        Expr::Group(g) => collect_calls(&g.expr, calls),
        _ => {}
    }
}

fn make_call<'a>(ident: &Ident, args: Vec<&'a Expr>) -> Call<'a> {
    let name = normalize_name(ident);
    let operation = Operation::from_name(&name);
    let args = match operation {
        Some(op) if op.takes_column_list() => flatten_tuple(args),
        _ => args,
    };
    Call {
        operation,
        name,
        args,
        pos: SourcePos::of(ident),
    }
}

fn flatten_tuple(args: Vec<&Expr>) -> Vec<&Expr> {
    if let [single] = args[..] {
        if let Expr::Tuple(tuple) = single {
            return tuple.elems.iter().collect();
        }
    }
    args
}

/// Statement kind: the first call whose name starts with `insert`,
/// `select`, `update` or `delete`.
pub fn statement_kind(calls: &[Call<'_>]) -> Option<StatementKind> {
    calls
        .iter()
        .find_map(|call| StatementKind::from_call_name(&call.name))
}
