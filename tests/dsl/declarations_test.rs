//! Tests for table and entity extraction from record declarations.

use sqlgen::dsl::{bind_entities, extract_tables, DslError};

fn parse(src: &str) -> syn::File {
    syn::parse_file(src).unwrap()
}

#[test]
fn test_tables_in_declaration_order() {
    let file = parse(
        r#"
        struct User { id: i64 }
        enum Status { Open, Closed }
        struct Order { id: i64, user_id: i64 }
        "#,
    );
    let tables = extract_tables(&file).unwrap();
    let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["User", "Order"]);
    assert_eq!(tables[1].columns[1].name, "user_id");
}

#[test]
fn test_raw_identifier_field() {
    let file = parse("struct Event { r#type: String, at: i64 }");
    let tables = extract_tables(&file).unwrap();
    let column = &tables[0].columns[0];
    assert_eq!(column.name, "r#type");
    assert_eq!(column.physical_name, "type");
}

#[test]
fn test_field_docs_and_tags_carried() {
    let file = parse(
        r##"
        struct Account {
            /// Primary key.
            ///
            /// Assigned by the database.
            #[tag = r#"identity:"true" name:"account_id""#]
            id: i64,
            #[tag = r#"comment:"ignored""#]
            #[serde(default)]
            label: Option<String>,
        }
        "##,
    );
    let tables = extract_tables(&file).unwrap();
    let id = &tables[0].columns[0];
    assert_eq!(id.docs, vec!["Primary key.", "", "Assigned by the database."]);
    assert_eq!(id.physical_name, "account_id");
    assert!(id.is_identity);

    let label = &tables[0].columns[1];
    assert_eq!(label.physical_name, "label");
    assert!(!label.is_identity);
    assert!(label.nullable);
    assert_eq!(label.raw_metadata.as_deref(), Some(r#"comment:"ignored""#));
    assert_eq!(label.attributes, vec!["#[serde(default)]"]);
    assert!(id.attributes.is_empty());
}

#[test]
fn test_table_name_marker_is_not_a_column() {
    let file = parse(
        r##"
        struct Order {
            #[tag = r#"tableName:"sales_orders""#]
            table: OrderTableName,
            id: i64,
        }
        "##,
    );
    let tables = extract_tables(&file).unwrap();
    assert_eq!(tables[0].physical_name, "sales_orders");
    let names: Vec<_> = tables[0].columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id"]);
}

#[test]
fn test_generic_struct_is_rejected() {
    let file = parse("struct Page<T> { items: Vec<T> }");
    let err = extract_tables(&file).unwrap_err();
    match err {
        DslError::TypeDefinition { type_name, pos, .. } => {
            assert_eq!(type_name, "Page");
            assert_eq!((pos.line, pos.column), (1, 8));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_unit_struct_is_rejected() {
    let file = parse("struct Marker;");
    assert!(matches!(
        extract_tables(&file),
        Err(DslError::TypeDefinition { .. })
    ));
}

#[test]
fn test_entities_bind_by_type() {
    let file = parse(
        r#"
        static primary: User = entity();
        const replica: crate::User = entity();
        static count: i64 = 0;
        static boxed: Box<User> = entity();

        struct User { id: i64 }
        "#,
    );
    let tables = extract_tables(&file).unwrap();
    let entities = bind_entities(&file, &tables);

    assert_eq!(entities.len(), 2);
    assert_eq!(entities["primary"].name, "User");
    assert_eq!(entities["replica"].name, "User");
    assert!(!entities.contains_key("count"));
    assert!(!entities.contains_key("boxed"));
}
