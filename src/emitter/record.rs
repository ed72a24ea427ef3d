//! TableDef → record struct emission.

use super::format::IndentWriter;
use crate::model::TableDef;

/// Derives every emitted record carries; row mapping starts from `Default`.
pub const BASE_DERIVES: [&str; 3] = ["Debug", "Clone", "Default"];

/// Derive list: the base derives followed by any the source declared,
/// deduplicated by last path segment.
pub fn derive_list(table: &TableDef) -> Vec<String> {
    let mut derives: Vec<String> = BASE_DERIVES.iter().map(|d| d.to_string()).collect();
    for derive in &table.derives {
        let last = derive.rsplit("::").next().unwrap_or(derive);
        if !derives.iter().any(|d| d.rsplit("::").next() == Some(last)) {
            derives.push(derive.clone());
        }
    }
    derives
}

fn visibility(declared: &str) -> &str {
    if declared.is_empty() {
        "pub"
    } else {
        declared
    }
}

/// Emit one record struct.
///
/// ```text
/// /// A user.
/// #[derive(Debug, Clone, Default)]
/// pub struct User {
///     /// sql: identity:"true"
///     pub UserID: i64,
///     pub UserName: String,
/// }
/// ```
pub fn emit_record(w: &mut IndentWriter, table: &TableDef) {
    w.write_docs(&table.docs);
    w.write_line(&format!("#[derive({})]", derive_list(table).join(", ")));
    for attr in &table.attributes {
        w.write_line(attr);
    }
    w.open_block(&format!("{} struct {} {{", visibility(&table.visibility), table.name));
    for column in &table.columns {
        w.write_docs(&column.docs);
        if let Some(tag) = &column.raw_metadata {
            w.write_line(&format!("/// sql: {}", tag));
        }
        for attr in &column.attributes {
            w.write_line(attr);
        }
        w.write_line(&format!(
            "{} {}: {},",
            visibility(&column.visibility),
            column.name,
            column.scalar_type
        ));
    }
    w.close_block("}");
}
