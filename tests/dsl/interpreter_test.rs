//! Tests for interpreting DSL function bodies into statements.

use sqlgen::dsl::{interpret_file, DslError, DslModule, Reporter, UnsupportedPolicy};
use sqlgen::sql::{ReturnMode, SqlBuilder, Statement, TokenSqlBuilder};

const TABLES: &str = r##"
    use sqlgen::dsl::*;
    use chrono::NaiveDate;

    pub struct Book {
        #[tag = r#"identity:"true""#]
        pub id: i64,
        pub title: String,
        pub author_id: i64,
        pub stock: i32,
    }

    pub struct Author {
        pub id: i64,
        pub name: String,
    }

    static book: Book = entity();
    static author: Author = entity();
"##;

fn interpret(body: &str) -> Result<DslModule, DslError> {
    let src = format!("{}\n{}", TABLES, body);
    let file = syn::parse_file(&src).unwrap();
    interpret_file(&file, &mut Reporter::new(UnsupportedPolicy::Error))
}

fn sql(body: &str) -> String {
    let module = interpret(body).unwrap();
    TokenSqlBuilder::default()
        .render(&module.functions[0].statement)
        .text
}

fn error(body: &str) -> String {
    interpret(body).unwrap_err().to_string()
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_chained_calls_with_filter_alias() {
    assert_eq!(
        sql("fn InStock() { q.select(book.id, book.title).filter(book.stock > 0).order_by(book.title); }"),
        "SELECT id, title\nFROM Book\nWHERE stock > 0\nORDER BY title\n"
    );
}

#[test]
fn test_raw_and_suffixed_names() {
    assert_eq!(
        sql("fn ByAuthor(a: i64) { select_all(book); r#where(book.author_id == a); }"),
        "SELECT id, title, author_id, stock\nFROM Book\nWHERE author_id = ?\n"
    );
    assert_eq!(
        sql("fn ByAuthor(a: i64) { select_all(book); where_(book.author_id == a); }"),
        "SELECT id, title, author_id, stock\nFROM Book\nWHERE author_id = ?\n"
    );
}

#[test]
fn test_parenthesized_predicate_kept() {
    assert_eq!(
        sql("fn Find(a: i64, s: i32) { Select(book.id); Where((book.author_id == a || book.author_id == 0) && book.stock >= s); }"),
        "SELECT id\nFROM Book\nWHERE (author_id = ? OR author_id = 0) AND stock >= ?\n"
    );
}

#[test]
fn test_update_with_literal_and_parameter() {
    let module = interpret(
        "fn Restock(n: i32, id: i64) { Update(book.stock, n); Update(book.title, \"restocked\"); Where(book.id == id); }",
    )
    .unwrap();
    let function = &module.functions[0];
    assert_eq!(function.return_mode(), ReturnMode::ExecResult);
    assert_eq!(function.statement.parameters(), vec!["n", "id"]);
    assert_eq!(
        TokenSqlBuilder::default().render(&function.statement).text,
        "UPDATE Book\nSET stock = ?,title = 'restocked'\nWHERE id = ?\n"
    );
}

#[test]
fn test_insert_reads_record() {
    let module = interpret("fn AddBook() { InsertAll(book); }").unwrap();
    let function = &module.functions[0];
    assert!(matches!(function.statement, Statement::Insert(_)));
    assert_eq!(function.record.as_ref().unwrap().name, "Book");
    assert_eq!(function.statement.parameters(), vec!["title", "author_id", "stock"]);
}

#[test]
fn test_scalar_select() {
    let module =
        interpret("fn Title(id: i64) { Select(book.title); Where(book.id == id); SetReturnType(ReturnScalar); }")
            .unwrap();
    let function = &module.functions[0];
    assert_eq!(function.return_mode(), ReturnMode::Scalar);
    assert_eq!(function.scalar_column().unwrap().scalar_type, "String");
    assert!(function.record.is_none());
}

#[test]
fn test_module_surface() {
    let module = interpret(
        r#"
        fn init() {
            set_package_name("library");
        }

        fn helper() -> i64 { 1 }

        /// All authors.
        pub fn Authors() { SelectAll(author); }
        "#,
    )
    .unwrap();
    assert_eq!(module.config.package_name.as_deref(), Some("library"));
    assert_eq!(module.imports, vec!["use chrono::NaiveDate;"]);
    assert_eq!(module.tables.len(), 2);
    assert_eq!(module.functions.len(), 1);
    assert_eq!(module.functions[0].docs, vec!["All authors."]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_mixed_tables_rejected() {
    let message = error("fn Bad() { Select(book.id, author.name); }");
    assert!(message.contains("mixes tables `Book` and `Author`"), "{}", message);
}

#[test]
fn test_scalar_needs_one_column() {
    let message = error("fn Bad() { Select(book.id, book.title); SetReturnType(ReturnScalarSet); }");
    assert!(message.contains("ScalarSet needs exactly one selected column, found 2"), "{}", message);
}

#[test]
fn test_mutation_return_type_rejected() {
    let message = error("fn Bad(id: i64) { Delete(book); Where(book.id == id); SetReturnType(ReturnRecord); }");
    assert!(message.contains("delete functions return ExecResult, not Record"), "{}", message);
}

#[test]
fn test_insert_parameters_rejected() {
    let message = error("fn Bad(id: i64) { InsertAll(book); }");
    assert!(message.contains("remove parameter `id`"), "{}", message);
}

#[test]
fn test_update_value_must_be_parameter_or_literal() {
    assert!(matches!(
        interpret("fn Bad() { Update(book.stock, book.id); }"),
        Err(DslError::Argument { .. })
    ));
}

#[test]
fn test_reserved_parameter_rejected() {
    let message = error("fn Bad(ctx: i64) { SelectAll(book); }");
    assert!(message.contains("`ctx` is reserved"), "{}", message);
}

#[test]
fn test_initializer_call_outside_init() {
    let message = error("fn Bad() { SelectAll(book); set_package_name(\"x\"); }");
    assert!(message.contains("only valid in `fn init`"), "{}", message);
}

#[test]
fn test_select_in_update_rejected() {
    let message = error("fn Bad(n: i32) { Update(book.stock, n); Select(book.id); }");
    assert!(message.contains("`select` cannot be used in update functions"), "{}", message);
}

#[test]
fn test_zero_channel_buffer_rejected() {
    let message = error("fn Bad() { SelectAll(book); SetReturnType(ReturnRecordChannel); SetChannelBufferSize(0); }");
    assert!(message.contains("positive integer"), "{}", message);
}

#[test]
fn test_unknown_return_mode() {
    let message = error("fn Bad() { SelectAll(book); SetReturnType(ReturnEverything); }");
    assert!(message.contains("`ReturnEverything` is not a return mode"), "{}", message);
}
