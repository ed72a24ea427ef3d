//! QueryFunction → async accessor emission.
//!
//! Every accessor takes the executor and context first and returns
//! `Result<T, DbError>`, where `T` follows the return mode:
//!
//! | mode            | `T`                                            |
//! |-----------------|------------------------------------------------|
//! | `Record`        | `Option<R>`                                    |
//! | `RecordSet`     | `Vec<R>`                                       |
//! | `Scalar`        | `Option<S>`                                    |
//! | `ScalarSet`     | `Vec<S>`                                       |
//! | `ExecResult`    | `ExecResult`                                   |
//! | `RecordChannel` | `(Receiver<Result<R, DbError>>, CancellationToken)` |
//!
//! Values are bound in the order of the rendered parameter list, which is
//! the placeholder order of the SQL text.

use super::format::{quote_string, IndentWriter};
use crate::dsl::QueryFunction;
use crate::sql::{RenderedSql, ReturnMode, SqlExpr, Statement};

/// Name of the record argument of insert accessors.
pub const INSERT_RECORD_ARG: &str = "o";

/// Type each row maps onto: the record, or the scalar column's type.
fn item_type(function: &QueryFunction) -> String {
    match function.scalar_column() {
        Some(column) => column.scalar_type.clone(),
        None => function
            .record
            .as_ref()
            .map_or_else(|| "()".to_string(), |t| t.name.clone()),
    }
}

/// The `T` of `Result<T, DbError>`.
pub fn return_type(function: &QueryFunction) -> String {
    let item = item_type(function);
    match function.return_mode() {
        ReturnMode::Record | ReturnMode::Scalar => format!("Option<{}>", item),
        ReturnMode::Default | ReturnMode::RecordSet | ReturnMode::ScalarSet => {
            format!("Vec<{}>", item)
        }
        ReturnMode::ExecResult => "ExecResult".to_string(),
        ReturnMode::RecordChannel => {
            let receiver = if function.channel_buffer.is_some() {
                "Receiver"
            } else {
                "UnboundedReceiver"
            };
            format!(
                "(tokio::sync::mpsc::{}<Result<{}, DbError>>, CancellationToken)",
                receiver, item
            )
        }
    }
}

fn signature(function: &QueryFunction) -> String {
    let mut params = vec!["db: &dyn Executor".to_string(), "ctx: &Context".to_string()];
    if let (Statement::Insert(_), Some(record)) = (&function.statement, &function.record) {
        params.push(format!("{}: &{}", INSERT_RECORD_ARG, record.name));
    }
    params.extend(function.params.iter().map(|p| format!("{}: {}", p.name, p.ty)));
    format!(
        "pub async fn {}({}) -> Result<{}, DbError> {{",
        function.name,
        params.join(", "),
        return_type(function)
    )
}

/// The `&[..]` argument slice handed to `query`/`exec`.
fn bound_args(function: &QueryFunction, rendered: &RenderedSql) -> String {
    if rendered.params.is_empty() {
        return "&[]".to_string();
    }
    let is_insert = matches!(function.statement, Statement::Insert(_));
    let values: Vec<String> = rendered
        .params
        .iter()
        .map(|name| {
            if is_insert {
                format!("Value::from({}.{}.clone())", INSERT_RECORD_ARG, name)
            } else {
                format!("Value::from({}.clone())", name)
            }
        })
        .collect();
    format!("&[{}]", values.join(", "))
}

/// Emit one accessor function.
pub fn emit_accessor(w: &mut IndentWriter, function: &QueryFunction, rendered: &RenderedSql) {
    w.write_docs(&function.docs);
    w.open_block(&signature(function));
    w.write_line(&format!("const QUERY: &str = {};", quote_string(&rendered.text)));
    w.blank_line();

    let args = bound_args(function, rendered);
    let Statement::Select(select) = &function.statement else {
        w.write_line(&format!("db.exec(ctx, QUERY, {}).await", args));
        w.close_block("}");
        return;
    };

    emit_read_row(w, function, &select.select_list);
    w.blank_line();
    w.write_line(&format!("let mut rows = db.query(ctx, QUERY, {}).await?;", args));

    match function.return_mode() {
        ReturnMode::Record | ReturnMode::Scalar => {
            w.open_block("match rows.next().await? {");
            w.write_line("Some(row) => Ok(Some(read_row(&row)?)),");
            w.write_line("None => Ok(None),");
            w.close_block("}");
        }
        ReturnMode::RecordChannel => emit_channel(w, function.channel_buffer),
        _ => {
            w.write_line("let mut result = Vec::new();");
            w.open_block("while let Some(row) = rows.next().await? {");
            w.write_line("result.push(read_row(&row)?);");
            w.close_block("}");
            w.write_line("Ok(result)");
        }
    }
    w.close_block("}");
}

/// Nested row mapper; columns are read by select-list position.
fn emit_read_row(w: &mut IndentWriter, function: &QueryFunction, select_list: &[SqlExpr]) {
    let item = item_type(function);
    w.open_block(&format!("fn read_row(row: &Row) -> Result<{}, DbError> {{", item));
    if function.scalar_column().is_some() {
        w.write_line("row.get(0)");
    } else {
        w.open_block(&format!("Ok({} {{", item));
        for (index, expr) in select_list.iter().enumerate() {
            if let SqlExpr::Column(column) = expr {
                w.write_line(&format!("{}: row.get({})?,", column.source.name, index));
            }
        }
        w.write_line(&format!("..{}::default()", item));
        w.close_block("})");
    }
    w.close_block("}");
}

/// Streaming body: one task owns the cursor and the sender.
///
/// Each iteration races cancellation (checked first) against the next row,
/// then against delivery. The task exits on cancellation, a dropped
/// receiver, exhaustion, or after delivering an error.
fn emit_channel(w: &mut IndentWriter, buffer: Option<usize>) {
    w.write_line("let cancel = ctx.child_token();");
    w.write_line("let token = cancel.clone();");
    match buffer {
        Some(size) => w.write_line(&format!(
            "let (tx, rx) = tokio::sync::mpsc::channel({});",
            size
        )),
        None => w.write_line("let (tx, rx) = tokio::sync::mpsc::unbounded_channel();"),
    }
    w.open_block("tokio::spawn(async move {");
    w.open_block("loop {");
    w.open_block("let next = tokio::select! {");
    w.write_line("biased;");
    w.write_line("_ = token.cancelled() => break,");
    w.write_line("next = rows.next() => next,");
    w.close_block("};");
    w.open_block("let item = match next {");
    w.write_line("Ok(Some(row)) => read_row(&row),");
    w.write_line("Ok(None) => break,");
    w.write_line("Err(err) => Err(err),");
    w.close_block("};");
    w.write_line("let failed = item.is_err();");
    match buffer {
        Some(_) => {
            w.open_block("let sent = tokio::select! {");
            w.write_line("biased;");
            w.write_line("_ = token.cancelled() => break,");
            w.write_line("sent = tx.send(item) => sent,");
            w.close_block("};");
            w.open_block("if sent.is_err() || failed {");
            w.write_line("break;");
            w.close_block("}");
        }
        None => {
            w.open_block("if token.is_cancelled() || tx.send(item).is_err() || failed {");
            w.write_line("break;");
            w.close_block("}");
        }
    }
    w.close_block("}");
    w.write_line("drop(rows);");
    w.write_line("drop(tx);");
    w.close_block("});");
    w.write_line("Ok((rx, cancel))");
}
