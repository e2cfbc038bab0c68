use super::{app::EntityId, ColumnDescriptor};

/// Table, columns and keys of one entity, resolved from its metadata.
#[derive(Debug)]
pub struct EntityDescriptor {
    pub id: EntityId,

    /// Rust type name of the entity.
    pub name: &'static str,

    pub table: TableName,

    /// Mapped fields in declaration order. Unmapped fields are skipped.
    pub columns: Vec<ColumnDescriptor>,

    /// Key columns, as indexes into `columns`, in key order.
    pub key: Vec<usize>,

    /// Column whose value the database generates on insert.
    pub identity: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName {
    pub schema: String,
    pub name: String,
}

impl EntityDescriptor {
    pub fn column(&self, name: &str) -> Option<(usize, &ColumnDescriptor)> {
        self.columns
            .iter()
            .enumerate()
            .find(|(_, column)| column.name == name)
    }

    pub fn column_for_field(&self, field: usize) -> Option<(usize, &ColumnDescriptor)> {
        self.columns
            .iter()
            .enumerate()
            .find(|(_, column)| column.field == field)
    }

    pub fn key_columns(&self) -> impl ExactSizeIterator<Item = &ColumnDescriptor> {
        self.key.iter().map(|&index| &self.columns[index])
    }

    /// Columns written by an insert: everything except the identity column.
    pub fn insert_columns(&self) -> impl Iterator<Item = (usize, &ColumnDescriptor)> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != self.identity)
    }

    /// Returns true when an insert should report the generated key back.
    pub fn returns_generated_key(&self) -> bool {
        self.identity.is_some() && self.key.len() == 1
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = (usize, &ColumnDescriptor)> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.is_foreign_key())
    }
}
