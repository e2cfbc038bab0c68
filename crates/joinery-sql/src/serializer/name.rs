use super::{Formatter, Ident, ToSql};

use joinery_core::schema::EntityDescriptor;

/// An entity's table, schema-qualified where the flavor supports it, with an
/// optional alias.
pub(super) struct TableRef<'a> {
    pub(super) entity: &'a EntityDescriptor,
    pub(super) alias: Option<String>,
}

impl ToSql for TableRef<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table = &self.entity.table;

        if !f.serializer.is_sqlite() {
            fmt!(f, Ident(&table.schema) ".");
        }

        fmt!(f, Ident(&table.name));

        if let Some(alias) = &self.alias {
            fmt!(f, " AS " alias);
        }
    }
}
