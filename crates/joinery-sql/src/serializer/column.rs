use super::{Formatter, Ident, ToSql};

/// A column reference, qualified by its table alias when the statement
/// joins.
#[derive(Debug, Clone)]
pub(super) struct ColumnRef<'a> {
    pub(super) table: Option<String>,
    pub(super) column: &'a str,
}

/// A projected column, renamed to its flattened alias.
pub(super) struct Projection<'a> {
    pub(super) column: ColumnRef<'a>,
    pub(super) alias: &'a str,
}

impl ColumnRef<'_> {
    /// Prefix of generated parameter names for conditions on this column.
    pub(super) fn param_name(&self) -> String {
        match &self.table {
            Some(table) => format!("{table}_{}", self.column),
            None => self.column.to_string(),
        }
    }
}

impl ToSql for &ColumnRef<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        if let Some(table) = &self.table {
            fmt!(f, table ".");
        }
        fmt!(f, Ident(self.column));
    }
}

impl ToSql for Projection<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, &self.column " AS " self.alias);
    }
}
