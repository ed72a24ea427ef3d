// DSL input for wide_integer_test; items_gen.rs is its generated output.
use sqlgen::dsl::*;

/// A stocked item.
#[derive(Table)]
pub struct Item {
    #[tag = r#"identity:"true""#]
    pub ItemID: i64,
    pub Serial: u64,
    pub Label: String,
}

const item: Item = entity();

/// Finds items by serial number.
pub fn GetBySerial(serial: u64) {
    From(item);
    SelectAll(item);
    Where(item.Serial == serial);
}

pub fn AddItem() {
    InsertAll(item);
}
