//! Rendering of statement ASTs into parameterized SQL text.
//!
//! `SqlBuilder` is the pluggable seam: the compiler holds a
//! `Box<dyn SqlBuilder>` and calls [`SqlBuilder::render`] once per
//! generated function. [`TokenSqlBuilder`] is the default strategy and
//! serializes through a [`TokenStream`] for a [`Dialect`].
//!
//! # Layout
//!
//! ```text
//! SELECT a, b            INSERT INTO t(a,b)     UPDATE t          DELETE t
//! FROM t                 VALUES(?,?)            SET a = ?,b = ?   WHERE ...
//! WHERE ...                                     WHERE ...
//! ORDER BY a,b DESC
//! ```
//!
//! Every clause except the INSERT value list ends in a newline.

use super::dialect::{Dialect, SqlDialect};
use super::expr::SqlExpr;
use super::statement::{
    DeleteStatement, InsertStatement, SelectStatement, Statement, UpdateStatement,
};
use super::token::{Token, TokenStream};

/// SQL text plus the parameter names bound to its placeholders, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSql {
    pub text: String,
    pub params: Vec<String>,
}

/// A replaceable SQL rendering strategy.
///
/// Implementations are reset before each statement, so one instance can
/// render every function in a file.
pub trait SqlBuilder: std::fmt::Debug + Send + Sync {
    /// Discard any text from a previous statement.
    fn reset(&mut self);

    fn write_select(&mut self, stmt: &SelectStatement);
    fn write_insert(&mut self, stmt: &InsertStatement);
    fn write_update(&mut self, stmt: &UpdateStatement);
    fn write_delete(&mut self, stmt: &DeleteStatement);

    /// Text written since the last reset.
    fn sql_text(&self) -> String;

    /// Final say over the bound parameter list.
    ///
    /// The list arrives in placeholder order; a builder that renders named
    /// or reordered markers rewrites it here so emitted argument order keeps
    /// matching the text.
    fn invoke_parameters(&self, params: Vec<String>) -> Vec<String> {
        params
    }

    /// Clone into a new box.
    fn boxed_clone(&self) -> Box<dyn SqlBuilder>;

    /// Render one statement.
    fn render(&mut self, stmt: &Statement) -> RenderedSql {
        self.reset();
        match stmt {
            Statement::Select(s) => self.write_select(s),
            Statement::Insert(s) => self.write_insert(s),
            Statement::Update(s) => self.write_update(s),
            Statement::Delete(s) => self.write_delete(s),
        }
        RenderedSql {
            text: self.sql_text(),
            params: self.invoke_parameters(stmt.parameters()),
        }
    }
}

impl Clone for Box<dyn SqlBuilder> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

// ============================================================================
// Default builder
// ============================================================================

/// Token-based builder for a single dialect.
#[derive(Debug, Clone, Default)]
pub struct TokenSqlBuilder {
    dialect: Dialect,
    tokens: TokenStream,
}

impl TokenSqlBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            tokens: TokenStream::new(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn write_filter(&mut self, filter: Option<&SqlExpr>) {
        if let Some(filter) = filter {
            self.tokens.push(Token::Where).space();
            filter.write_tokens(&mut self.tokens);
            self.tokens.newline();
        }
    }
}

impl SqlBuilder for TokenSqlBuilder {
    fn reset(&mut self) {
        self.tokens.clear();
    }

    fn write_select(&mut self, stmt: &SelectStatement) {
        let ts = &mut self.tokens;

        ts.push(Token::Select).space();
        for (i, item) in stmt.select_list.iter().enumerate() {
            if i > 0 {
                ts.comma().space();
            }
            item.write_tokens(ts);
        }
        ts.newline();

        ts.push(Token::From)
            .space()
            .push(Token::Ident(stmt.table.clone()))
            .newline();

        self.write_filter(stmt.filter.as_ref());

        if !stmt.order_by.is_empty() {
            let ts = &mut self.tokens;
            ts.push(Token::OrderBy).space();
            for (i, order) in stmt.order_by.iter().enumerate() {
                if i > 0 {
                    ts.comma();
                }
                ts.push(Token::Ident(order.column.column.clone()));
                if order.descending {
                    ts.space().push(Token::Desc);
                }
            }
            ts.newline();
        }
    }

    fn write_insert(&mut self, stmt: &InsertStatement) {
        let ts = &mut self.tokens;
        let columns: Vec<_> = stmt.inserted_columns().collect();

        ts.push(Token::Insert)
            .space()
            .push(Token::Into)
            .space()
            .push(Token::Ident(stmt.table.clone()))
            .lparen();
        for (i, col) in columns.iter().enumerate() {
            if i > 0 {
                ts.comma();
            }
            ts.push(Token::Ident(col.column.clone()));
        }
        ts.rparen().newline();

        ts.push(Token::Values).lparen();
        for i in 0..columns.len() {
            if i > 0 {
                ts.comma();
            }
            ts.placeholder();
        }
        ts.rparen();
    }

    fn write_update(&mut self, stmt: &UpdateStatement) {
        let ts = &mut self.tokens;

        ts.push(Token::Update)
            .space()
            .push(Token::Ident(stmt.table.clone()))
            .newline();

        ts.push(Token::Set).space();
        for (i, assignment) in stmt.assignments.iter().enumerate() {
            if i > 0 {
                ts.comma();
            }
            ts.push(Token::Ident(assignment.column.column.clone()))
                .space()
                .push(Token::Eq)
                .space();
            assignment.value.write_tokens(ts);
        }
        ts.newline();

        self.write_filter(stmt.filter.as_ref());
    }

    fn write_delete(&mut self, stmt: &DeleteStatement) {
        let ts = &mut self.tokens;

        ts.push(Token::Delete).space();
        if self.dialect.delete_requires_from() {
            ts.push(Token::From).space();
        }
        ts.push(Token::Ident(stmt.table.clone())).newline();

        self.write_filter(stmt.filter.as_ref());
    }

    fn sql_text(&self) -> String {
        self.tokens.serialize(self.dialect)
    }

    fn boxed_clone(&self) -> Box<dyn SqlBuilder> {
        Box::new(self.clone())
    }
}
