//! Table metadata extracted from annotated record declarations.

pub mod table;

pub use table::{ColumnDef, TableDef};
