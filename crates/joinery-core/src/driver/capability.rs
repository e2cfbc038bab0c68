#[derive(Debug)]
pub struct Capability {
    /// SQL flavor spoken by the database.
    pub dialect: Dialect,

    /// Tables are addressed as `[schema].[table]`. When false, the schema is
    /// dropped from generated statements.
    pub schema_qualified_tables: bool,
}

/// The SQL flavors the statement builder knows how to emit.
///
/// Both use `@name` parameters and bracket-quoted identifiers; they differ in
/// row limiting, generated-key retrieval and string concatenation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    SqlServer,
    Sqlite,
}

impl Capability {
    /// SQL Server capabilities.
    pub const SQL_SERVER: Self = Self {
        dialect: Dialect::SqlServer,
        schema_qualified_tables: true,
    };

    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        dialect: Dialect::Sqlite,
        schema_qualified_tables: false,
    };
}
