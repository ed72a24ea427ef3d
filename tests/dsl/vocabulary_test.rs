//! DSL fixtures type-check as ordinary Rust against `sqlgen::dsl`.

#[allow(dead_code, non_snake_case, non_upper_case_globals, unused_variables)]
#[path = "../fixtures/users.rs"]
mod users;

#[allow(dead_code, non_snake_case, non_upper_case_globals, unused_variables)]
#[path = "../fixtures/items.rs"]
mod items;

use sqlgen::dsl::{entity, Operation, Query, ReturnRecordSet, Table, TableName};

#[test]
fn test_fixture_entities_are_placeholders() {
    let user: users::User = entity();
    assert_eq!(user.UserID, 0);
    assert!(user.UserName.is_empty());
    assert_eq!(user.Sex, 0);

    let item = <items::Item as Table>::ENTITY;
    assert_eq!(item.Serial, 0);
}

#[test]
fn test_fixture_functions_run_as_no_ops() {
    users::GetUser(1);
    users::RenameUser("ada".to_string(), 1);
    users::StreamUsers(0);
    items::GetBySerial(u64::MAX);
    items::AddItem();
}

#[allow(dead_code)]
#[derive(sqlgen::dsl::Table)]
struct Order {
    id: i64,
    note: Option<String>,
    lines: Vec<u32>,
    #[tag = r#"tableName:"orders""#]
    table: TableName,
}

#[test]
fn test_derive_outside_the_crate() {
    let order: Order = entity();
    assert_eq!(order.id, 0);
    assert_eq!(order.note, None);
    assert!(order.lines.is_empty());
    assert_eq!(order.table, TableName);
}

#[test]
fn test_chained_query() {
    let order: Order = entity();
    let query = Query::new()
        .from(Order::ENTITY)
        .select((order.id, order.note))
        .filter(order.id == 3)
        .order_by(order.id)
        .set_return_type(ReturnRecordSet);
    insta::assert_debug_snapshot!(query.operations(), @r"
    [
        From,
        Select,
        Where,
        OrderBy,
        SetReturnType,
    ]
    ");
    assert_eq!(query.operations()[2], Operation::Where);
}
