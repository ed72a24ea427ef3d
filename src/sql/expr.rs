//! Expression AST for predicates, assignments and select lists.
//!
//! Expressions are dialect-neutral. Column references carry the source
//! column so later stages can map rows back onto record fields.

use super::token::{Token, TokenStream};
use crate::model::ColumnDef;

// =============================================================================
// Expression AST
// =============================================================================

/// A portable SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlExpr {
    /// Literal source text, copied verbatim from the DSL.
    Literal(String),
    /// A function parameter bound as a placeholder.
    Parameter(String),
    /// Column of a bound entity.
    Column(ColumnRef),
    /// left op right
    Binary {
        left: Box<SqlExpr>,
        op: BinaryOperator,
        right: Box<SqlExpr>,
    },
    /// Parenthesised sub-expression; kept so output grouping matches input.
    Paren(Box<SqlExpr>),
}

/// Reference to a column of a specific table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    /// Physical name of the owning table.
    pub table: String,
    /// Physical name of the column.
    pub column: String,
    /// The column definition the reference resolved to.
    pub source: ColumnDef,
}

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub column: ColumnRef,
    pub descending: bool,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Comparison
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    // Logical
    And,
    Or,
    // Arithmetic
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
}

// =============================================================================
// Constructors
// =============================================================================

impl SqlExpr {
    pub fn literal(text: impl Into<String>) -> Self {
        SqlExpr::Literal(text.into())
    }

    pub fn param(name: impl Into<String>) -> Self {
        SqlExpr::Parameter(name.into())
    }

    pub fn column(table: &str, source: &ColumnDef) -> Self {
        SqlExpr::Column(ColumnRef::new(table, source))
    }

    pub fn binary(left: SqlExpr, op: BinaryOperator, right: SqlExpr) -> Self {
        SqlExpr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn paren(inner: SqlExpr) -> Self {
        SqlExpr::Paren(Box::new(inner))
    }

    /// Conjoin two predicates, parenthesising an `OR` side so the
    /// conjunction keeps its meaning.
    pub fn and(self, other: SqlExpr) -> Self {
        let wrap = |e: SqlExpr| match e {
            SqlExpr::Binary {
                op: BinaryOperator::Or,
                ..
            } => SqlExpr::paren(e),
            e => e,
        };
        SqlExpr::binary(wrap(self), BinaryOperator::And, wrap(other))
    }
}

impl ColumnRef {
    pub fn new(table: &str, source: &ColumnDef) -> Self {
        Self {
            table: table.to_string(),
            column: source.physical_name.clone(),
            source: source.clone(),
        }
    }
}

// =============================================================================
// Parameter collection
// =============================================================================

impl SqlExpr {
    /// Append every parameter name in a left-to-right depth-first walk.
    pub fn collect_parameters(&self, out: &mut Vec<String>) {
        match self {
            SqlExpr::Parameter(name) => out.push(name.clone()),
            SqlExpr::Binary { left, right, .. } => {
                left.collect_parameters(out);
                right.collect_parameters(out);
            }
            SqlExpr::Paren(inner) => inner.collect_parameters(out),
            SqlExpr::Literal(_) | SqlExpr::Column(_) => {}
        }
    }

    /// Parameter names in placeholder order.
    pub fn parameters(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_parameters(&mut out);
        out
    }
}

// =============================================================================
// Token generation
// =============================================================================

impl SqlExpr {
    /// Append this expression to a token stream.
    ///
    /// Columns render by physical name only; statements never join, so the
    /// table qualifier is redundant.
    pub fn write_tokens(&self, ts: &mut TokenStream) {
        match self {
            SqlExpr::Literal(text) => {
                ts.push(literal_token(text));
            }
            SqlExpr::Parameter(_) => {
                ts.placeholder();
            }
            SqlExpr::Column(col) => {
                ts.push(Token::Ident(col.column.clone()));
            }
            SqlExpr::Binary { left, op, right } => {
                left.write_tokens(ts);
                ts.space().push(op.to_token()).space();
                right.write_tokens(ts);
            }
            SqlExpr::Paren(inner) => {
                ts.lparen();
                inner.write_tokens(ts);
                ts.rparen();
            }
        }
    }

    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        self.write_tokens(&mut ts);
        ts
    }
}

impl BinaryOperator {
    pub fn to_token(self) -> Token {
        match self {
            BinaryOperator::Eq => Token::Eq,
            BinaryOperator::NotEq => Token::Ne,
            BinaryOperator::Lt => Token::Lt,
            BinaryOperator::Gt => Token::Gt,
            BinaryOperator::LtEq => Token::Lte,
            BinaryOperator::GtEq => Token::Gte,
            BinaryOperator::And => Token::And,
            BinaryOperator::Or => Token::Or,
            BinaryOperator::Plus => Token::Plus,
            BinaryOperator::Minus => Token::Minus,
            BinaryOperator::Multiply => Token::Mul,
            BinaryOperator::Divide => Token::Div,
            BinaryOperator::Modulo => Token::Mod,
            BinaryOperator::BitAnd => Token::BitAnd,
            BinaryOperator::BitOr => Token::BitOr,
            BinaryOperator::BitXor => Token::BitXor,
            BinaryOperator::ShiftLeft => Token::ShiftLeft,
            BinaryOperator::ShiftRight => Token::ShiftRight,
        }
    }
}

/// Classify literal source text into a token.
///
/// String, char and bool literals are re-quoted for the target dialect and
/// numeric literals lose their type suffix. Anything unrecognised passes
/// through as raw text.
pub fn literal_token(text: &str) -> Token {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, text),
    };
    let sign = if negative { "-" } else { "" };

    match syn::parse_str::<syn::Lit>(body) {
        Ok(syn::Lit::Str(s)) if !negative => Token::LitString(s.value()),
        Ok(syn::Lit::Char(c)) if !negative => Token::LitString(c.value().to_string()),
        Ok(syn::Lit::Bool(b)) if !negative => Token::LitBool(b.value),
        Ok(syn::Lit::Int(i)) => Token::Raw(format!("{}{}", sign, i.base10_digits())),
        Ok(syn::Lit::Float(f)) => Token::Raw(format!("{}{}", sign, f.base10_digits())),
        _ => Token::Raw(text.to_string()),
    }
}
