// src/model/table.rs

/// A record type that maps onto one SQL table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableDef {
    /// Logical name (the struct identifier).
    pub name: String,
    /// SQL table name; defaults to `name`.
    pub physical_name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnDef>,
    /// Doc comment lines carried to the emitted record.
    pub docs: Vec<String>,
    /// Derive paths declared on the source struct.
    pub derives: Vec<String>,
    /// Other outer attributes, as source text.
    pub attributes: Vec<String>,
    /// Visibility as source text (empty for private).
    pub visibility: String,
}

/// One field of a record type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnDef {
    /// Logical name (the field identifier).
    pub name: String,
    /// SQL column name; defaults to `name`.
    pub physical_name: String,
    /// Field type as normalised source text. Opaque to the compiler.
    pub scalar_type: String,
    /// Whether the field type is `Option<..>`.
    pub nullable: bool,
    /// Identity columns are left out of generated inserts.
    pub is_identity: bool,
    /// Raw tag text, carried unchanged to the emitted record.
    pub raw_metadata: Option<String>,
    pub docs: Vec<String>,
    /// Outer attributes other than docs and the tag, as source text.
    pub attributes: Vec<String>,
    pub visibility: String,
}

impl TableDef {
    /// Create a table whose physical name equals its logical name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            physical_name: name.clone(),
            name,
            ..Default::default()
        }
    }

    /// Builder: set the physical table name.
    pub fn with_physical_name(mut self, physical_name: impl Into<String>) -> Self {
        self.physical_name = physical_name.into();
        self
    }

    /// Builder: append a column.
    pub fn with_column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    /// Look up a column by logical name.
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns that take part in inserts, in declaration order.
    pub fn insertable_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| !c.is_identity)
    }
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, scalar_type: impl Into<String>) -> Self {
        let name = name.into();
        let scalar_type = scalar_type.into();
        Self {
            physical_name: name.clone(),
            nullable: scalar_type.starts_with("Option<"),
            name,
            scalar_type,
            ..Default::default()
        }
    }

    pub fn with_physical_name(mut self, physical_name: impl Into<String>) -> Self {
        self.physical_name = physical_name.into();
        self
    }

    pub fn identity(mut self) -> Self {
        self.is_identity = true;
        self
    }
}
