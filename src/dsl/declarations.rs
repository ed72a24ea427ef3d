//! Table and entity extraction.
//!
//! Tables are read in one full pass over the file, entities in a second, so
//! an entity may be declared before or after its table.

use std::collections::HashMap;

use quote::ToTokens;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, ExprLit, Fields, Item, ItemStruct, Lit, LitStr, Meta, Type};

use super::span::SourcePos;
use super::tag::Tag;
use super::DslError;
use crate::model::{ColumnDef, TableDef};

/// Attribute carrying field metadata.
pub const TAG_ATTRIBUTE: &str = "tag";

/// Derive that makes a record type-check against the vocabulary; not carried
/// into generated code.
pub const VOCABULARY_DERIVE: &str = "Table";

/// Field types whose name ends in this suffix may set the table name.
pub const TABLE_NAME_MARKER: &str = "TableName";

/// Extract a [`TableDef`] from every record declared in the file.
pub fn extract_tables(file: &syn::File) -> Result<Vec<TableDef>, DslError> {
    let mut tables = Vec::new();
    for item in &file.items {
        match item {
            Item::Struct(s) => tables.push(table_from_struct(s)?),
            Item::Type(alias) => {
                return Err(DslError::TypeDefinition {
                    type_name: alias.ident.to_string(),
                    pos: SourcePos::of(alias),
                    message: format!(
                        "alias to `{}` is not a record; declare a struct with named fields",
                        token_text(&alias.ty)
                    ),
                });
            }
            _ => {}
        }
    }
    Ok(tables)
}

/// Bind every `static`/`const` item typed as a known table.
pub fn bind_entities(file: &syn::File, tables: &[TableDef]) -> HashMap<String, TableDef> {
    let mut entities = HashMap::new();
    for item in &file.items {
        let (ident, ty) = match item {
            Item::Static(s) => (&s.ident, &*s.ty),
            Item::Const(c) => (&c.ident, &*c.ty),
            _ => continue,
        };
        let Some(type_name) = plain_type_name(ty) else {
            continue;
        };
        if let Some(table) = tables.iter().find(|t| t.name == type_name) {
            tracing::debug!(entity = %ident, table = %table.name, "bound entity");
            entities.insert(ident.to_string(), table.clone());
        }
    }
    entities
}

fn table_from_struct(item: &ItemStruct) -> Result<TableDef, DslError> {
    let type_name = item.ident.to_string();
    let type_error = |message: &str| DslError::TypeDefinition {
        type_name: type_name.clone(),
        pos: SourcePos::of(&item.ident),
        message: message.to_string(),
    };

    if !item.generics.params.is_empty() {
        return Err(type_error("generic records cannot map to a table"));
    }
    let fields = match &item.fields {
        Fields::Named(named) => &named.named,
        Fields::Unnamed(_) => return Err(type_error("tuple structs cannot map to a table")),
        Fields::Unit => return Err(type_error("unit structs cannot map to a table")),
    };

    let mut table = TableDef::new(&type_name);
    table.docs = doc_lines(&item.attrs);
    table.visibility = token_text(&item.vis);
    for attr in &item.attrs {
        if attr.path().is_ident("doc") {
            continue;
        }
        if attr.path().is_ident("derive") {
            let derives = derive_paths(attr, &type_name)?;
            table.derives.extend(derives.into_iter().filter(|path| {
                path.rsplit("::").next() != Some(VOCABULARY_DERIVE)
            }));
        } else {
            table.attributes.push(token_text(attr));
        }
    }

    for field in fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let raw_tag = field_tag(&field.attrs, &type_name)?;
        let tag = raw_tag.as_deref().map(Tag::parse).unwrap_or_default();

        if is_table_name_marker(&field.ty) {
            if let Some(physical) = tag.table_name() {
                table.physical_name = physical.to_string();
                continue;
            }
        }

        let name = ident.to_string();
        if table.column(&name).is_some() {
            return Err(DslError::TypeDefinition {
                type_name: type_name.clone(),
                pos: SourcePos::of(ident),
                message: format!("duplicate field `{}`", name),
            });
        }

        let physical = match tag.name() {
            Some(physical) => physical.to_string(),
            None => syn::ext::IdentExt::unraw(ident).to_string(),
        };
        let mut column = ColumnDef::new(name, token_text(&field.ty)).with_physical_name(physical);
        column.nullable = is_option(&field.ty);
        column.is_identity = tag.is_identity();
        column.raw_metadata = raw_tag;
        column.docs = doc_lines(&field.attrs);
        column.attributes = field
            .attrs
            .iter()
            .filter(|a| !a.path().is_ident("doc") && !a.path().is_ident(TAG_ATTRIBUTE))
            .map(token_text)
            .collect();
        column.visibility = token_text(&field.vis);
        table.columns.push(column);
    }

    tracing::debug!(
        table = %table.name,
        physical = %table.physical_name,
        columns = table.columns.len(),
        "extracted table"
    );
    Ok(table)
}

/// Read the `tag` attribute: `#[tag = "..."]` or `#[tag("...")]`.
fn field_tag(attrs: &[Attribute], type_name: &str) -> Result<Option<String>, DslError> {
    let Some(attr) = attrs.iter().find(|a| a.path().is_ident(TAG_ATTRIBUTE)) else {
        return Ok(None);
    };
    let text = match &attr.meta {
        Meta::NameValue(nv) => match &nv.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }) => Some(s.value()),
            _ => None,
        },
        Meta::List(list) => list.parse_args::<LitStr>().ok().map(|s| s.value()),
        Meta::Path(_) => None,
    };
    match text {
        Some(text) => Ok(Some(text)),
        None => Err(DslError::TypeDefinition {
            type_name: type_name.to_string(),
            pos: SourcePos::of(attr),
            message: "`tag` must be a string literal".to_string(),
        }),
    }
}

fn derive_paths(attr: &Attribute, type_name: &str) -> Result<Vec<String>, DslError> {
    let mut paths = Vec::new();
    attr.parse_nested_meta(|meta| {
        paths.push(token_text(&meta.path));
        Ok(())
    })
    .map_err(|e| DslError::TypeDefinition {
        type_name: type_name.to_string(),
        pos: SourcePos::of(attr),
        message: format!("malformed derive: {}", e),
    })?;
    Ok(paths)
}

/// Doc comment lines, with the single leading space rustdoc adds removed.
pub(crate) fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|a| a.path().is_ident("doc"))
        .filter_map(|a| match &a.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value()),
                _ => None,
            },
            _ => None,
        })
        .flat_map(|doc| {
            doc.split('\n')
                .map(|line| line.strip_prefix(' ').unwrap_or(line).trim_end().to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Source text of a syntax node as written.
///
/// Nodes without a source location (built in code rather than parsed) fall
/// back to the token printer.
pub(crate) fn token_text<T: ToTokens + ?Sized>(node: &T) -> String {
    node.span()
        .source_text()
        .unwrap_or_else(|| node.to_token_stream().to_string())
}

/// Last path segment of a plain (non-generic, non-qualified-self) path type.
fn plain_type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(p) if p.qself.is_none() => {
            let last = p.path.segments.last()?;
            last.arguments
                .is_empty()
                .then(|| last.ident.to_string())
        }
        Type::Group(g) => plain_type_name(&g.elem),
        Type::Paren(p) => plain_type_name(&p.elem),
        _ => None,
    }
}

fn last_segment(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(p) => p.path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    }
}

fn is_table_name_marker(ty: &Type) -> bool {
    last_segment(ty).is_some_and(|name| name.ends_with(TABLE_NAME_MARKER))
}

fn is_option(ty: &Type) -> bool {
    last_segment(ty).is_some_and(|name| name == "Option")
}
