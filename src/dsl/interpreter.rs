//! Interpretation of DSL functions into statements.
//!
//! Each `fn` item is scanned once into [`Call`]s; the calls fill a draft
//! which is then checked and turned into a [`QueryFunction`]. The first
//! fatal error aborts the file. Out-of-vocabulary calls go through the
//! [`Reporter`] policy.

use std::collections::HashMap;

use syn::{Expr, ExprLit, FnArg, Item, ItemFn, Lit, Pat, UseTree};

use super::declarations::{bind_entities, doc_lines, extract_tables, token_text};
use super::operation::{scan_calls, statement_kind, Call, Operation, StatementKind};
use super::span::SourcePos;
use super::translate::{resolve_column, translate, translate_assignment_value, Scope};
use super::{DslError, Reporter};
use crate::model::{ColumnDef, TableDef};
use crate::sql::{
    Assignment, ColumnRef, DeleteStatement, InsertStatement, OrderByExpr, ReturnMode,
    SelectStatement, SqlExpr, Statement, UpdateStatement,
};

/// Crate root whose `use` items are not carried into generated code.
pub const DSL_CRATE: &str = "sqlgen";

/// Name of the module initializer function.
pub const INITIALIZER_FN: &str = "init";

/// Names the generated accessor body declares itself.
pub const RESERVED_PARAMS: &[&str] = &[
    "db", "ctx", "o", "rows", "row", "result", "read_row", "tx", "rx", "cancel", "token", "QUERY",
];

/// A parameter of a DSL function, carried to the accessor signature.
#[derive(Debug, Clone, PartialEq)]
pub struct FnParam {
    pub name: String,
    /// Type as normalised source text.
    pub ty: String,
}

/// One interpreted DSL function.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFunction {
    pub name: String,
    pub docs: Vec<String>,
    pub params: Vec<FnParam>,
    pub statement: Statement,
    /// Record type rows map onto (non-scalar selects) or inserts read from.
    pub record: Option<TableDef>,
    /// Bounded channel capacity for `RecordChannel`; `None` is unbounded.
    pub channel_buffer: Option<usize>,
    pub pos: SourcePos,
}

impl QueryFunction {
    pub fn return_mode(&self) -> ReturnMode {
        self.statement.return_mode()
    }

    /// Column a scalar select maps onto.
    pub fn scalar_column(&self) -> Option<&ColumnDef> {
        match &self.statement {
            Statement::Select(s) if s.return_mode.is_scalar() => match s.select_list.first() {
                Some(SqlExpr::Column(c)) => Some(&c.source),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Settings read from `fn init`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModuleConfig {
    /// Wrap generated code in `pub mod <name>`.
    pub package_name: Option<String>,
    /// Path generated code imports the runtime from.
    pub runtime_path: Option<String>,
}

/// Everything read from one DSL source unit.
#[derive(Debug, Clone, Default)]
pub struct DslModule {
    pub tables: Vec<TableDef>,
    pub entities: HashMap<String, TableDef>,
    pub config: ModuleConfig,
    /// `use` items carried into generated code.
    pub imports: Vec<String>,
    pub functions: Vec<QueryFunction>,
}

/// Interpret a parsed DSL file.
pub fn interpret_file(file: &syn::File, reporter: &mut Reporter) -> Result<DslModule, DslError> {
    let tables = extract_tables(file)?;
    let entities = bind_entities(file, &tables);

    let mut module = DslModule {
        tables,
        entities,
        ..Default::default()
    };

    for item in &file.items {
        match item {
            Item::Use(item_use) => {
                if !is_dsl_import(&item_use.tree) {
                    module.imports.push(token_text(item_use));
                }
            }
            Item::Fn(item_fn) if item_fn.sig.ident == INITIALIZER_FN => {
                read_initializer(item_fn, &mut module.config, reporter)?;
            }
            Item::Fn(item_fn) => {
                if let Some(function) = interpret_function(item_fn, &module.entities, reporter)? {
                    module.functions.push(function);
                }
            }
            _ => {}
        }
    }

    Ok(module)
}

fn is_dsl_import(tree: &UseTree) -> bool {
    match tree {
        UseTree::Path(p) => p.ident == DSL_CRATE,
        UseTree::Name(n) => n.ident == DSL_CRATE,
        UseTree::Rename(r) => r.ident == DSL_CRATE,
        UseTree::Glob(_) | UseTree::Group(_) => false,
    }
}

// ============================================================================
// Module initializer
// ============================================================================

fn read_initializer(
    item: &ItemFn,
    config: &mut ModuleConfig,
    reporter: &mut Reporter,
) -> Result<(), DslError> {
    for call in scan_calls(&item.block) {
        match call.operation {
            Some(Operation::SetPackageName) => {
                let name = string_arg(&call)?;
                if syn::parse_str::<syn::Ident>(&name).is_err() {
                    return Err(DslError::argument(
                        call.pos,
                        format!("package name `{}` is not an identifier", name),
                    ));
                }
                config.package_name = Some(name);
            }
            Some(Operation::SetRuntimePath) => {
                let path = string_arg(&call)?;
                if syn::parse_str::<syn::Path>(&path).is_err() {
                    return Err(DslError::argument(
                        call.pos,
                        format!("runtime path `{}` is not a path", path),
                    ));
                }
                config.runtime_path = Some(path);
            }
            _ => reporter.unsupported(
                call.pos,
                format!("`{}` is not supported in `{}`", call.name, INITIALIZER_FN),
            )?,
        }
    }
    Ok(())
}

fn string_arg(call: &Call<'_>) -> Result<String, DslError> {
    match call.args.as_slice() {
        [Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        })] => Ok(s.value()),
        _ => Err(DslError::argument(
            call.pos,
            format!("`{}` takes one string literal", call.name),
        )),
    }
}

// ============================================================================
// DSL functions
// ============================================================================

/// Interpret one function. Returns `None` for functions that build no
/// statement.
pub fn interpret_function(
    item: &ItemFn,
    entities: &HashMap<String, TableDef>,
    reporter: &mut Reporter,
) -> Result<Option<QueryFunction>, DslError> {
    let name = item.sig.ident.to_string();
    let calls = scan_calls(&item.block);
    let Some(kind) = statement_kind(&calls) else {
        tracing::debug!(function = %name, "no statement call; skipping");
        return Ok(None);
    };

    let params = read_params(item)?;
    let param_names: Vec<String> = params.iter().map(|p| p.name.clone()).collect();
    let scope = Scope::new(entities, &param_names);

    let mut draft = Draft::new(kind);
    for call in &calls {
        let Some(op) = call.operation else {
            reporter.unsupported(call.pos, format!("unsupported call `{}`", call.name))?;
            continue;
        };
        draft.apply(op, call, &scope)?;
    }

    let pos = SourcePos::of(&item.sig.ident);
    let (statement, record, channel_buffer) = draft.finish(&name, pos, &params, reporter)?;

    tracing::debug!(
        function = %name,
        kind = %kind,
        mode = %statement.return_mode(),
        "interpreted function"
    );

    Ok(Some(QueryFunction {
        name,
        docs: doc_lines(&item.attrs),
        params,
        statement,
        record,
        channel_buffer,
        pos,
    }))
}

fn read_params(item: &ItemFn) -> Result<Vec<FnParam>, DslError> {
    let mut params = Vec::new();
    for input in &item.sig.inputs {
        let typed = match input {
            FnArg::Typed(typed) => typed,
            FnArg::Receiver(receiver) => {
                return Err(DslError::argument(
                    SourcePos::of(receiver),
                    "DSL functions cannot take `self`",
                ));
            }
        };
        let ident = match &*typed.pat {
            Pat::Ident(p) if p.by_ref.is_none() && p.subpat.is_none() => &p.ident,
            other => {
                return Err(DslError::argument(
                    SourcePos::of(other),
                    format!("parameter `{}` must be a plain identifier", token_text(other)),
                ));
            }
        };
        let name = ident.to_string();
        if RESERVED_PARAMS.contains(&name.as_str()) {
            return Err(DslError::argument(
                SourcePos::of(ident),
                format!("parameter name `{}` is reserved by generated code", name),
            ));
        }
        params.push(FnParam {
            name,
            ty: token_text(&*typed.ty),
        });
    }
    Ok(params)
}

/// Accumulated state while a function's calls are applied.
struct Draft<'a> {
    kind: StatementKind,
    table: Option<&'a TableDef>,
    select_list: Option<Vec<ColumnRef>>,
    filter: Option<SqlExpr>,
    order_by: Vec<OrderByExpr>,
    assignments: Vec<Assignment>,
    target_seen: bool,
    from_seen: bool,
    return_mode: Option<(ReturnMode, SourcePos)>,
    buffer: Option<(usize, SourcePos)>,
}

impl<'a> Draft<'a> {
    fn new(kind: StatementKind) -> Self {
        Self {
            kind,
            table: None,
            select_list: None,
            filter: None,
            order_by: Vec::new(),
            assignments: Vec::new(),
            target_seen: false,
            from_seen: false,
            return_mode: None,
            buffer: None,
        }
    }

    fn apply(&mut self, op: Operation, call: &Call<'_>, scope: &Scope<'a>) -> Result<(), DslError> {
        self.check_kind(op, call)?;
        match op {
            Operation::From => {
                if self.from_seen {
                    return Err(DslError::argument(call.pos, "`from` appears twice"));
                }
                self.from_seen = true;
                let table = entity_arg(call, scope)?;
                self.bind(table, call.pos)?;
            }
            Operation::Select => {
                self.ensure_no_select(call)?;
                if call.args.is_empty() {
                    return Err(DslError::argument(call.pos, "`select` needs at least one column"));
                }
                let mut columns = Vec::with_capacity(call.args.len());
                for arg in &call.args {
                    let (table, column) = resolve_column(arg, scope)?;
                    self.bind(table, SourcePos::of(*arg))?;
                    columns.push(column);
                }
                self.select_list = Some(columns);
            }
            Operation::SelectAll => {
                self.ensure_no_select(call)?;
                let table = entity_arg(call, scope)?;
                self.bind(table, call.pos)?;
                let columns = table
                    .columns
                    .iter()
                    .map(|c| ColumnRef::new(&table.physical_name, c))
                    .collect();
                self.select_list = Some(columns);
            }
            Operation::Where => {
                let [arg] = call.args.as_slice() else {
                    return Err(DslError::argument(call.pos, "`where` takes one predicate"));
                };
                let predicate = translate(arg, scope)?;
                self.filter = Some(match self.filter.take() {
                    Some(existing) => existing.and(predicate),
                    None => predicate,
                });
            }
            Operation::Update => {
                let [target, value] = call.args.as_slice() else {
                    return Err(DslError::argument(
                        call.pos,
                        "`update` takes a column and a value",
                    ));
                };
                let (table, column) = resolve_column(target, scope)?;
                self.bind(table, SourcePos::of(*target))?;
                let value = translate_assignment_value(value, scope)?;
                self.assignments.push(Assignment { column, value });
            }
            Operation::Delete | Operation::InsertAll => {
                if self.target_seen {
                    return Err(DslError::argument(
                        call.pos,
                        format!("`{}` appears twice", op),
                    ));
                }
                self.target_seen = true;
                let table = entity_arg(call, scope)?;
                self.bind(table, call.pos)?;
            }
            Operation::OrderBy | Operation::OrderByDescending => {
                if call.args.is_empty() {
                    return Err(DslError::argument(
                        call.pos,
                        format!("`{}` needs at least one column", op),
                    ));
                }
                for arg in &call.args {
                    let (table, column) = resolve_column(arg, scope)?;
                    self.bind(table, SourcePos::of(*arg))?;
                    self.order_by.push(OrderByExpr {
                        column,
                        descending: op == Operation::OrderByDescending,
                    });
                }
            }
            Operation::SetReturnType => {
                if self.return_mode.is_some() {
                    return Err(DslError::argument(call.pos, "return type set twice"));
                }
                let mode = return_mode_arg(call)?;
                self.return_mode = Some((mode, call.pos));
            }
            Operation::SetChannelBufferSize => {
                if self.buffer.is_some() {
                    return Err(DslError::argument(call.pos, "channel buffer size set twice"));
                }
                let size = buffer_size_arg(call)?;
                self.buffer = Some((size, call.pos));
            }
            // Rejected by check_kind
            Operation::SetPackageName | Operation::SetRuntimePath => {}
        }
        Ok(())
    }

    fn check_kind(&self, op: Operation, call: &Call<'_>) -> Result<(), DslError> {
        if op.is_initializer() {
            return Err(DslError::argument(
                call.pos,
                format!("`{}` is only valid in `fn {}`", op, INITIALIZER_FN),
            ));
        }
        let allowed = match op {
            Operation::From | Operation::SetReturnType | Operation::SetChannelBufferSize => true,
            Operation::Select
            | Operation::SelectAll
            | Operation::OrderBy
            | Operation::OrderByDescending => self.kind == StatementKind::Select,
            Operation::Where => self.kind != StatementKind::Insert,
            Operation::Update => self.kind == StatementKind::Update,
            Operation::Delete => self.kind == StatementKind::Delete,
            Operation::InsertAll => self.kind == StatementKind::Insert,
            Operation::SetPackageName | Operation::SetRuntimePath => false,
        };
        if allowed {
            Ok(())
        } else {
            Err(DslError::argument(
                call.pos,
                format!("`{}` cannot be used in {} functions", op, self.kind),
            ))
        }
    }

    fn ensure_no_select(&self, call: &Call<'_>) -> Result<(), DslError> {
        if self.select_list.is_some() {
            return Err(DslError::argument(call.pos, "select list already set"));
        }
        Ok(())
    }

    /// Record the statement's table; every call must agree on it.
    fn bind(&mut self, table: &'a TableDef, pos: SourcePos) -> Result<(), DslError> {
        match self.table {
            Some(existing) if existing.name != table.name => Err(DslError::argument(
                pos,
                format!(
                    "`{}` mixes tables `{}` and `{}`",
                    self.kind, existing.name, table.name
                ),
            )),
            Some(_) => Ok(()),
            None => {
                self.table = Some(table);
                Ok(())
            }
        }
    }

    fn finish(
        self,
        name: &str,
        pos: SourcePos,
        params: &[FnParam],
        reporter: &mut Reporter,
    ) -> Result<(Statement, Option<TableDef>, Option<usize>), DslError> {
        let table = self.table.ok_or_else(|| {
            DslError::argument(pos, format!("`{}` does not name a table", name))
        })?;
        let mode = self.return_mode.map(|(m, _)| m).unwrap_or_default();

        if self.kind != StatementKind::Select {
            if let Some((mode, mode_pos)) = self.return_mode {
                if !matches!(mode, ReturnMode::Default | ReturnMode::ExecResult) {
                    return Err(DslError::argument(
                        mode_pos,
                        format!("{} functions return ExecResult, not {}", self.kind, mode),
                    ));
                }
            }
        }

        let channel_buffer = match self.buffer {
            Some((size, buffer_pos)) => {
                if self.kind == StatementKind::Select && mode == ReturnMode::RecordChannel {
                    Some(size)
                } else {
                    reporter.warn(
                        buffer_pos,
                        format!(
                            "channel buffer size ignored: `{}` does not return RecordChannel",
                            name
                        ),
                    );
                    None
                }
            }
            None => None,
        };

        let physical = table.physical_name.clone();
        let (statement, record) = match self.kind {
            StatementKind::Select => {
                let columns = self.select_list.unwrap_or_default();
                if columns.is_empty() {
                    return Err(DslError::argument(pos, format!("`{}` selects nothing", name)));
                }
                if mode.is_scalar() && columns.len() != 1 {
                    return Err(DslError::argument(
                        pos,
                        format!(
                            "{} needs exactly one selected column, found {}",
                            mode,
                            columns.len()
                        ),
                    ));
                }
                let record = (!mode.is_scalar()).then(|| table.clone());
                let statement = Statement::Select(SelectStatement {
                    select_list: columns.into_iter().map(SqlExpr::Column).collect(),
                    table: physical,
                    filter: self.filter,
                    order_by: self.order_by,
                    return_mode: mode,
                });
                (statement, record)
            }
            StatementKind::Insert => {
                if let Some(param) = params.first() {
                    return Err(DslError::argument(
                        pos,
                        format!(
                            "insert functions read values from the record; remove parameter `{}`",
                            param.name
                        ),
                    ));
                }
                let statement = Statement::Insert(InsertStatement {
                    table: physical.clone(),
                    columns: table
                        .columns
                        .iter()
                        .map(|c| ColumnRef::new(&physical, c))
                        .collect(),
                    excludes_identity: true,
                });
                (statement, Some(table.clone()))
            }
            StatementKind::Update => {
                if self.assignments.is_empty() {
                    return Err(DslError::argument(
                        pos,
                        format!("`{}` assigns no columns", name),
                    ));
                }
                let statement = Statement::Update(UpdateStatement {
                    assignments: self.assignments,
                    table: physical,
                    filter: self.filter,
                });
                (statement, None)
            }
            StatementKind::Delete => {
                let statement = Statement::Delete(DeleteStatement {
                    table: physical,
                    filter: self.filter,
                });
                (statement, None)
            }
        };

        Ok((statement, record, channel_buffer))
    }
}

fn entity_arg<'a>(call: &Call<'_>, scope: &Scope<'a>) -> Result<&'a TableDef, DslError> {
    match call.args.as_slice() {
        [arg] => scope.entity(arg).ok_or_else(|| {
            DslError::argument(
                SourcePos::of(*arg),
                format!("`{}` is not a bound entity", token_text(*arg)),
            )
        }),
        _ => Err(DslError::argument(
            call.pos,
            format!("`{}` takes one entity", call.name),
        )),
    }
}

fn return_mode_arg(call: &Call<'_>) -> Result<ReturnMode, DslError> {
    let [arg] = call.args.as_slice() else {
        return Err(DslError::argument(
            call.pos,
            "`set_return_type` takes exactly one mode",
        ));
    };
    let segment = match arg {
        Expr::Path(p) => p.path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    };
    segment
        .as_deref()
        .and_then(ReturnMode::from_name)
        .ok_or_else(|| {
            DslError::argument(
                SourcePos::of(*arg),
                format!("`{}` is not a return mode", token_text(*arg)),
            )
        })
}

fn buffer_size_arg(call: &Call<'_>) -> Result<usize, DslError> {
    let malformed = || {
        DslError::argument(
            call.pos,
            "`set_channel_buffer_size` takes one positive integer literal",
        )
    };
    let [Expr::Lit(ExprLit {
        lit: Lit::Int(int), ..
    })] = call.args.as_slice()
    else {
        return Err(malformed());
    };
    match int.base10_parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(malformed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::{Severity, UnsupportedPolicy};
    use crate::sql::{SqlBuilder, TokenSqlBuilder};

    const TABLES: &str = r##"
        use sqlgen::dsl::*;
        use chrono::NaiveDate;

        pub struct User {
            #[tag = r#"identity:"true""#]
            pub UserID: i64,
            pub UserName: String,
            pub Sex: i32,
        }

        pub struct Order {
            #[tag = r#"tableName:"orders""#]
            _t: OrderTableName,
            pub id: i64,
        }

        static user: User = entity();
        static order: Order = entity();
    "##;

    fn interpret(body: &str) -> Result<DslModule, DslError> {
        let src = format!("{}\n{}", TABLES, body);
        let file = syn::parse_file(&src).unwrap();
        interpret_file(&file, &mut Reporter::default())
    }

    fn single(body: &str) -> QueryFunction {
        let mut module = interpret(body).unwrap();
        assert_eq!(module.functions.len(), 1);
        module.functions.remove(0)
    }

    fn sql(function: &QueryFunction) -> String {
        TokenSqlBuilder::default().render(&function.statement).text
    }

    fn err(body: &str) -> String {
        interpret(body).unwrap_err().to_string()
    }

    #[test]
    fn test_select_all_with_filter() {
        let f = single(
            "pub fn GetUsers(userID: i64) { From(user); SelectAll(user); Where(user.UserID == userID); }",
        );
        assert_eq!(sql(&f), "SELECT UserID, UserName, Sex\nFROM User\nWHERE UserID = ?\n");
        assert_eq!(f.return_mode(), ReturnMode::RecordSet);
        assert_eq!(f.record.as_ref().map(|t| t.name.as_str()), Some("User"));
        assert_eq!(f.params, vec![FnParam { name: "userID".into(), ty: "i64".into() }]);
    }

    #[test]
    fn test_select_all_order_independent() {
        let a = single("fn a(id: i64) { Where(user.UserID == id); SelectAll(user); }");
        let b = single("fn b(id: i64) { SelectAll(user); Where(user.UserID == id); }");
        assert_eq!(sql(&a), sql(&b));
    }

    #[test]
    fn test_method_chain() {
        let f = single(
            "fn f(id: i64) { Query::new().from(user).select(user.UserName).filter(user.UserID > id).order_by_descending(user.UserID); }",
        );
        assert_eq!(
            sql(&f),
            "SELECT UserName\nFROM User\nWHERE UserID > ?\nORDER BY UserID DESC\n"
        );
    }

    #[test]
    fn test_order_by_accumulates() {
        let f = single(
            "fn f() { SelectAll(user); OrderBy(user.UserName); OrderByDescending(user.UserID, user.Sex); }",
        );
        assert!(sql(&f).ends_with("ORDER BY UserName,UserID DESC,Sex DESC\n"));
    }

    #[test]
    fn test_successive_where_calls_are_conjoined() {
        let f = single(
            "fn f(a: i64, b: i64) { SelectAll(user); Where(user.UserID == a || user.UserID == b); Where(user.Sex == 1); }",
        );
        assert!(sql(&f).contains("WHERE (UserID = ? OR UserID = ?) AND Sex = 1\n"));
    }

    #[test]
    fn test_return_modes() {
        let f = single("fn f() { SelectAll(user); SetReturnType(ReturnRecord); }");
        assert_eq!(f.return_mode(), ReturnMode::Record);

        let f = single("fn f() { Select(user.UserName); SetReturnType(ReturnMode::ScalarSet); }");
        assert_eq!(f.return_mode(), ReturnMode::ScalarSet);
        assert!(f.record.is_none());
        assert_eq!(f.scalar_column().map(|c| c.name.as_str()), Some("UserName"));
    }

    #[test]
    fn test_explicit_record_set_matches_default() {
        let a = single("fn f() { SelectAll(user); }");
        let b = single("fn f() { SelectAll(user); SetReturnType(ReturnRecordSet); }");
        assert_eq!(a.return_mode(), b.return_mode());
        assert_eq!(sql(&a), sql(&b));
    }

    #[test]
    fn test_channel_buffer() {
        let f = single(
            "fn f() { SelectAll(user); SetReturnType(ReturnRecordChannel); SetChannelBufferSize(16); }",
        );
        assert_eq!(f.channel_buffer, Some(16));

        let f = single("fn f() { SelectAll(user); SetReturnType(ReturnRecordChannel); }");
        assert_eq!(f.channel_buffer, None);
    }

    #[test]
    fn test_buffer_outside_channel_mode_warns() {
        let src = format!("{}\nfn f() {{ SelectAll(user); SetChannelBufferSize(4); }}", TABLES);
        let file = syn::parse_file(&src).unwrap();
        let mut reporter = Reporter::default();
        let module = interpret_file(&file, &mut reporter).unwrap();
        assert_eq!(module.functions[0].channel_buffer, None);
        assert_eq!(reporter.diagnostics().len(), 1);
        assert_eq!(reporter.diagnostics()[0].severity, Severity::Warning);
    }

    #[test]
    fn test_insert() {
        let f = single("fn AddUser() { InsertAll(user); }");
        assert_eq!(sql(&f), "INSERT INTO User(UserName,Sex)\nVALUES(?,?)");
        assert_eq!(f.statement.parameters(), vec!["UserName", "Sex"]);
        assert_eq!(f.return_mode(), ReturnMode::ExecResult);
    }

    #[test]
    fn test_update_accumulates() {
        let f = single(
            "fn f(name: String, id: i64) { Update(user.UserName, name); Update(user.Sex, 1); Where(user.UserID == id); }",
        );
        assert_eq!(sql(&f), "UPDATE User\nSET UserName = ?,Sex = 1\nWHERE UserID = ?\n");
        assert_eq!(f.statement.parameters(), vec!["name", "id"]);
    }

    #[test]
    fn test_delete_with_literal() {
        let f = single("fn f(userID: i64) { Delete(user); Where(user.UserID == userID && user.Sex == 0); }");
        assert_eq!(sql(&f), "DELETE User\nWHERE UserID = ? AND Sex = 0\n");
        assert_eq!(f.statement.parameters(), vec!["userID"]);
    }

    #[test]
    fn test_physical_table_name() {
        let f = single("fn f() { SelectAll(order); }");
        assert_eq!(sql(&f), "SELECT id\nFROM orders\n");
    }

    #[test]
    fn test_non_dsl_functions_skipped() {
        let module = interpret("fn helper() -> i32 { 1 + 1 }").unwrap();
        assert!(module.functions.is_empty());
    }

    #[test]
    fn test_imports_exclude_dsl_crate() {
        let module = interpret("").unwrap();
        assert_eq!(module.imports, vec!["use chrono::NaiveDate;"]);
    }

    #[test]
    fn test_initializer() {
        let module = interpret(
            r#"fn init() { set_package_name("users"); set_runtime_path("crate::db"); }"#,
        )
        .unwrap();
        assert_eq!(module.config.package_name.as_deref(), Some("users"));
        assert_eq!(module.config.runtime_path.as_deref(), Some("crate::db"));
        assert!(module.functions.is_empty());
    }

    #[test]
    fn test_initializer_unsupported_policy() {
        let src = format!("{}\nfn init() {{ SetDriver(\"pg\"); }}", TABLES);
        let file = syn::parse_file(&src).unwrap();

        let mut warn = Reporter::new(UnsupportedPolicy::Warn);
        interpret_file(&file, &mut warn).unwrap();
        assert_eq!(warn.diagnostics().len(), 1);

        let mut strict = Reporter::new(UnsupportedPolicy::Error);
        let err = interpret_file(&file, &mut strict).unwrap_err();
        assert!(matches!(err, DslError::Unsupported { .. }));
    }

    #[test]
    fn test_initializer_requires_string() {
        assert!(err("fn init() { set_package_name(users); }").contains("one string literal"));
        assert!(err(r#"fn init() { set_package_name("two words"); }"#).contains("not an identifier"));
    }

    #[test]
    fn test_unsupported_call_in_function() {
        let src = format!("{}\nfn f() {{ SelectAll(user); Limit(10); }}", TABLES);
        let file = syn::parse_file(&src).unwrap();
        let mut reporter = Reporter::default();
        let module = interpret_file(&file, &mut reporter).unwrap();
        assert_eq!(module.functions.len(), 1);
        assert!(reporter.diagnostics()[0].message.contains("`limit`"));
    }

    #[test]
    fn test_argument_errors() {
        assert!(err("fn f() { From(nobody); SelectAll(nobody); }").contains("`nobody` is not a bound entity"));
        assert!(err("fn f() { SelectAll(user); SetReturnType(); }").contains("exactly one mode"));
        assert!(err("fn f() { SelectAll(user); SetReturnType(ReturnBogus); }").contains("not a return mode"));
        assert!(err("fn f() { SelectAll(user); SetReturnType(ReturnRecord); SetReturnType(ReturnRecord); }")
            .contains("set twice"));
        assert!(err("fn f() { SelectAll(user); SetChannelBufferSize(0); }").contains("positive integer"));
        assert!(err("fn f(id: i64) { Update(user.UserName); }").contains("a column and a value"));
        assert!(err("fn f(id: i64) { Update(id, id); }").contains("expected `entity.field`"));
        assert!(err("fn f() { SelectAll(user); SelectAll(user); }").contains("already set"));
        assert!(err("fn f() { Select(user.UserID, order.id); }").contains("mixes tables"));
        assert!(err("fn f() { Delete(user); SelectAll(user); }").contains("cannot be used in delete functions"));
        assert!(err("fn f() { Delete(user); SetReturnType(ReturnRecord); }").contains("return ExecResult"));
        assert!(err("fn f() { Select(user.UserID, user.Sex); SetReturnType(ReturnScalar); }")
            .contains("exactly one selected column"));
        assert!(err("fn f(id: i64) { InsertAll(user); }").contains("remove parameter `id`"));
        assert!(err("fn f(rows: i64) { SelectAll(user); }").contains("reserved"));
        assert!(err("fn f(QUERY: i64) { SelectAll(user); Where(user.UserID == QUERY); }")
            .contains("`QUERY` is reserved"));
        assert!(err("fn f((a, b): (i64, i64)) { SelectAll(user); }").contains("plain identifier"));
        assert!(err("fn f() { SelectAll(user); set_package_name(\"x\"); }").contains("only valid in `fn init`"));
    }

    #[test]
    fn test_error_carries_position() {
        let src = "struct User { id: i64 }\nstatic user: User = entity();\nfn f() {\n    From(nobody);\n    SelectAll(user);\n}\n";
        let file = syn::parse_file(src).unwrap();
        let err = interpret_file(&file, &mut Reporter::default()).unwrap_err();
        assert_eq!(err.pos(), SourcePos::new(4, 10));
    }

    #[test]
    fn test_docs_carried() {
        let f = single("/// Loads every user.\nfn f() { SelectAll(user); }");
        assert_eq!(f.docs, vec!["Loads every user."]);
    }
}
