//! Rendering tests for the pluggable SQL builder.

use sqlgen::compile::{compile_source, CompileOptions};
use sqlgen::model::ColumnDef;
use sqlgen::sql::{
    Assignment, BinaryOperator, ColumnRef, DeleteStatement, Dialect, InsertStatement,
    OrderByExpr, ReturnMode, SelectStatement, SqlBuilder, SqlExpr, Statement, TokenSqlBuilder,
    UpdateStatement,
};

fn col(name: &str) -> ColumnRef {
    ColumnRef::new("orders", &ColumnDef::new(name, "i64"))
}

fn column(name: &str) -> SqlExpr {
    SqlExpr::Column(col(name))
}

fn cmp(name: &str, op: BinaryOperator, right: SqlExpr) -> SqlExpr {
    SqlExpr::binary(column(name), op, right)
}

fn select_open_orders() -> Statement {
    let filter = cmp("status", BinaryOperator::Eq, SqlExpr::literal("\"open\"")).and(cmp(
        "total",
        BinaryOperator::GtEq,
        SqlExpr::param("min_total"),
    ));
    Statement::Select(SelectStatement {
        select_list: vec![column("id"), column("total")],
        table: "orders".into(),
        filter: Some(filter),
        order_by: vec![OrderByExpr {
            column: col("total"),
            descending: true,
        }],
        return_mode: ReturnMode::RecordSet,
    })
}

// ============================================================================
// Dialect rendering
// ============================================================================

#[test]
fn test_select_per_dialect() {
    let stmt = select_open_orders();
    let render = |dialect| TokenSqlBuilder::new(dialect).render(&stmt).text;

    assert_eq!(
        render(Dialect::Generic),
        "SELECT id, total\nFROM orders\nWHERE status = 'open' AND total >= ?\nORDER BY total DESC\n"
    );
    assert_eq!(
        render(Dialect::Postgres),
        "SELECT \"id\", \"total\"\nFROM \"orders\"\nWHERE \"status\" = 'open' AND \"total\" >= $1\nORDER BY \"total\" DESC\n"
    );
    assert_eq!(
        render(Dialect::MySql),
        "SELECT `id`, `total`\nFROM `orders`\nWHERE `status` = 'open' AND `total` >= ?\nORDER BY `total` DESC\n"
    );
    assert_eq!(
        render(Dialect::TSql),
        "SELECT [id], [total]\nFROM [orders]\nWHERE [status] = 'open' AND [total] >= @p1\nORDER BY [total] DESC\n"
    );
}

#[test]
fn test_update_mixes_literals_and_parameters() {
    let stmt = Statement::Update(UpdateStatement {
        assignments: vec![
            Assignment {
                column: col("status"),
                value: SqlExpr::param("status"),
            },
            Assignment {
                column: col("retries"),
                value: SqlExpr::literal("-1"),
            },
            Assignment {
                column: col("note"),
                value: SqlExpr::param("note"),
            },
        ],
        table: "orders".into(),
        filter: Some(cmp("id", BinaryOperator::Eq, SqlExpr::param("id"))),
    });

    let rendered = TokenSqlBuilder::new(Dialect::Postgres).render(&stmt);
    assert_eq!(
        rendered.text,
        "UPDATE \"orders\"\nSET \"status\" = $1,\"retries\" = -1,\"note\" = $2\nWHERE \"id\" = $3\n"
    );
    assert_eq!(rendered.params, vec!["status", "note", "id"]);
}

#[test]
fn test_insert_without_identity_columns() {
    let stmt = Statement::Insert(InsertStatement {
        table: "orders".into(),
        columns: vec![col("id"), col("total")],
        excludes_identity: true,
    });
    let rendered = TokenSqlBuilder::new(Dialect::Sqlite).render(&stmt);
    assert_eq!(rendered.text, "INSERT INTO \"orders\"(\"id\",\"total\")\nVALUES(?,?)");
    assert_eq!(rendered.params, vec!["id", "total"]);
}

#[test]
fn test_delete_from_depends_on_dialect() {
    let stmt = Statement::Delete(DeleteStatement {
        table: "orders".into(),
        filter: Some(cmp("id", BinaryOperator::Eq, SqlExpr::param("id"))),
    });
    assert_eq!(
        TokenSqlBuilder::new(Dialect::Generic).render(&stmt).text,
        "DELETE orders\nWHERE id = ?\n"
    );
    assert_eq!(
        TokenSqlBuilder::new(Dialect::Sqlite).render(&stmt).text,
        "DELETE FROM \"orders\"\nWHERE \"id\" = ?\n"
    );
}

// ============================================================================
// Custom builders
// ============================================================================

/// Wraps the default builder and tags every statement with a comment.
#[derive(Debug, Clone)]
struct TaggedBuilder {
    inner: TokenSqlBuilder,
}

impl SqlBuilder for TaggedBuilder {
    fn reset(&mut self) {
        self.inner.reset();
    }

    fn write_select(&mut self, stmt: &SelectStatement) {
        self.inner.write_select(stmt);
    }

    fn write_insert(&mut self, stmt: &InsertStatement) {
        self.inner.write_insert(stmt);
    }

    fn write_update(&mut self, stmt: &UpdateStatement) {
        self.inner.write_update(stmt);
    }

    fn write_delete(&mut self, stmt: &DeleteStatement) {
        self.inner.write_delete(stmt);
    }

    fn sql_text(&self) -> String {
        format!("/* sqlgen */ {}", self.inner.sql_text())
    }

    fn invoke_parameters(&self, params: Vec<String>) -> Vec<String> {
        params.into_iter().map(|p| p.to_uppercase()).collect()
    }

    fn boxed_clone(&self) -> Box<dyn SqlBuilder> {
        Box::new(self.clone())
    }
}

#[test]
fn test_custom_builder_drives_compilation() {
    let dsl = r#"
        struct Order { id: i64, total: f64 }
        static order: Order = entity();

        fn Expensive(min_total: f64) {
            SelectAll(order);
            Where(order.total > min_total);
        }
    "#;
    let builder = TaggedBuilder {
        inner: TokenSqlBuilder::new(Dialect::Generic),
    };
    let options = CompileOptions::default().with_sql_builder(Box::new(builder));

    let output = compile_source(dsl, "orders.rs", &options).unwrap();

    assert_eq!(
        output.functions[0].sql,
        "/* sqlgen */ SELECT id, total\nFROM Order\nWHERE total > ?\n"
    );
    assert_eq!(output.functions[0].params, vec!["MIN_TOTAL"]);
}
