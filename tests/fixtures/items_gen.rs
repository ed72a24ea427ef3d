// Code generated by sqlgen from items.rs; do not edit.
#![allow(clippy::all, dead_code, non_snake_case, unused_imports)]

use sqlgen::runtime::{Context, DbError, ExecResult, Executor, Row, Value};

/// A stocked item.
#[derive(Debug, Clone, Default)]
pub struct Item {
    /// sql: identity:"true"
    pub ItemID: i64,
    pub Serial: u64,
    pub Label: String,
}

/// Finds items by serial number.
pub async fn GetBySerial(db: &dyn Executor, ctx: &Context, serial: u64) -> Result<Vec<Item>, DbError> {
    const QUERY: &str = "SELECT ItemID, Serial, Label\nFROM Item\nWHERE Serial = ?\n";

    fn read_row(row: &Row) -> Result<Item, DbError> {
        Ok(Item {
            ItemID: row.get(0)?,
            Serial: row.get(1)?,
            Label: row.get(2)?,
            ..Item::default()
        })
    }

    let mut rows = db.query(ctx, QUERY, &[Value::from(serial.clone())]).await?;
    let mut result = Vec::new();
    while let Some(row) = rows.next().await? {
        result.push(read_row(&row)?);
    }
    Ok(result)
}

pub async fn AddItem(db: &dyn Executor, ctx: &Context, o: &Item) -> Result<ExecResult, DbError> {
    const QUERY: &str = "INSERT INTO Item(Serial,Label)\nVALUES(?,?)";

    db.exec(ctx, QUERY, &[Value::from(o.Serial.clone()), Value::from(o.Label.clone())]).await
}
