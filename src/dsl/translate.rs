//! Translation of DSL expressions into [`SqlExpr`] trees.

use std::collections::HashMap;

use syn::{BinOp, Expr, ExprLit, Lit, Member, UnOp};

use super::declarations::token_text;
use super::span::SourcePos;
use super::DslError;
use crate::model::TableDef;
use crate::sql::{BinaryOperator, ColumnRef, SqlExpr};

/// Names visible to an expression: entity bindings and function parameters.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub entities: &'a HashMap<String, TableDef>,
    pub params: &'a [String],
}

impl<'a> Scope<'a> {
    pub fn new(entities: &'a HashMap<String, TableDef>, params: &'a [String]) -> Self {
        Self { entities, params }
    }

    fn is_param(&self, name: &str) -> bool {
        self.params.iter().any(|p| p == name)
    }

    /// Resolve an entity identifier expression.
    pub fn entity(&self, expr: &Expr) -> Option<&'a TableDef> {
        let name = single_ident(expr)?;
        self.entities.get(&name)
    }
}

/// Translate a predicate or value expression.
pub fn translate(expr: &Expr, scope: &Scope<'_>) -> Result<SqlExpr, DslError> {
    match expr {
        Expr::Lit(lit) => Ok(SqlExpr::literal(token_text(lit))),
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) && is_numeric(&unary.expr) => {
            Ok(SqlExpr::literal(format!("-{}", token_text(&*unary.expr))))
        }
        Expr::Path(_) => {
            let pos = SourcePos::of(expr);
            let Some(name) = single_ident(expr) else {
                return Err(DslError::argument(
                    pos,
                    format!("unsupported path `{}`", token_text(expr)),
                ));
            };
            if scope.is_param(&name) {
                Ok(SqlExpr::param(name))
            } else if scope.entities.contains_key(&name) {
                Err(DslError::argument(
                    pos,
                    format!("entity `{}` used as a value; select one of its fields", name),
                ))
            } else {
                Err(DslError::argument(
                    pos,
                    format!("`{}` is neither a parameter nor a bound entity", name),
                ))
            }
        }
        Expr::Field(_) => {
            let (_, column) = resolve_column(expr, scope)?;
            Ok(SqlExpr::Column(column))
        }
        Expr::Paren(paren) => Ok(SqlExpr::paren(translate(&paren.expr, scope)?)),
        Expr::Group(group) => translate(&group.expr, scope),
        Expr::Binary(binary) => {
            let op = map_operator(&binary.op).ok_or_else(|| {
                DslError::argument(
                    SourcePos::of(&binary.op),
                    format!("operator `{}` is not supported", token_text(&binary.op)),
                )
            })?;
            let left = translate(&binary.left, scope)?;
            let right = translate(&binary.right, scope)?;
            Ok(SqlExpr::binary(left, op, right))
        }
        other => Err(DslError::argument(
            SourcePos::of(other),
            format!("unsupported expression `{}`", token_text(other)),
        )),
    }
}

/// Translate the value side of an `update` call.
pub fn translate_assignment_value(expr: &Expr, scope: &Scope<'_>) -> Result<SqlExpr, DslError> {
    let value = translate(expr, scope)?;
    match value {
        SqlExpr::Parameter(_) | SqlExpr::Literal(_) => Ok(value),
        _ => Err(DslError::argument(
            SourcePos::of(expr),
            "an assigned value must be a parameter or a literal",
        )),
    }
}

/// Resolve `entity.field` to its table and column.
pub fn resolve_column<'a>(
    expr: &Expr,
    scope: &Scope<'a>,
) -> Result<(&'a TableDef, ColumnRef), DslError> {
    let pos = SourcePos::of(expr);
    let expr = match expr {
        Expr::Group(group) => &*group.expr,
        other => other,
    };
    let Expr::Field(field) = expr else {
        return Err(DslError::argument(
            pos,
            format!("expected `entity.field`, found `{}`", token_text(expr)),
        ));
    };
    let Some(entity_name) = single_ident(&field.base) else {
        return Err(DslError::argument(
            pos,
            format!("`{}` is not a bound entity", token_text(&*field.base)),
        ));
    };
    let Some(table) = scope.entities.get(&entity_name) else {
        return Err(DslError::argument(
            pos,
            format!("`{}` is not a bound entity", entity_name),
        ));
    };
    let Member::Named(member) = &field.member else {
        return Err(DslError::argument(pos, "tuple fields are not columns"));
    };
    let field_name = member.to_string();
    let column = table.column(&field_name).ok_or_else(|| {
        DslError::argument(
            SourcePos::of(member),
            format!("`{}` has no field `{}`", table.name, field_name),
        )
    })?;
    Ok((table, ColumnRef::new(&table.physical_name, column)))
}

fn map_operator(op: &BinOp) -> Option<BinaryOperator> {
    let mapped = match op {
        BinOp::Eq(_) => BinaryOperator::Eq,
        BinOp::Ne(_) => BinaryOperator::NotEq,
        BinOp::Lt(_) => BinaryOperator::Lt,
        BinOp::Gt(_) => BinaryOperator::Gt,
        BinOp::Le(_) => BinaryOperator::LtEq,
        BinOp::Ge(_) => BinaryOperator::GtEq,
        BinOp::And(_) => BinaryOperator::And,
        BinOp::Or(_) => BinaryOperator::Or,
        BinOp::Add(_) => BinaryOperator::Plus,
        BinOp::Sub(_) => BinaryOperator::Minus,
        BinOp::Mul(_) => BinaryOperator::Multiply,
        BinOp::Div(_) => BinaryOperator::Divide,
        BinOp::Rem(_) => BinaryOperator::Modulo,
        BinOp::BitAnd(_) => BinaryOperator::BitAnd,
        BinOp::BitOr(_) => BinaryOperator::BitOr,
        BinOp::BitXor(_) => BinaryOperator::BitXor,
        BinOp::Shl(_) => BinaryOperator::ShiftLeft,
        BinOp::Shr(_) => BinaryOperator::ShiftRight,
        // Compound assignment
        _ => return None,
    };
    Some(mapped)
}

fn is_numeric(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Lit(ExprLit {
            lit: Lit::Int(_) | Lit::Float(_),
            ..
        })
    )
}

/// Identifier of a single-segment path expression.
pub(crate) fn single_ident(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Path(p) if p.qself.is_none() => p.path.get_ident().map(|i| i.to_string()),
        Expr::Group(g) => single_ident(&g.expr),
        _ => None,
    }
}
