#[macro_use]
mod fmt;
use fmt::ToSql;

mod column;
use column::{ColumnRef, Projection};

mod delim;
use delim::Comma;

mod flavor;
use flavor::Flavor;

mod ident;
use ident::Ident;

mod name;
use name::TableRef;

mod params;
use params::Placeholder;

mod predicate;

// Statement serializers
mod statement;

use joinery_core::{
    driver::{Capability, Transaction},
    schema::EntityDescriptor,
    stmt::{Params, Statement},
    Options, Schema,
};

/// Serialize mapping operations to SQL text and parameters.
#[derive(Debug)]
pub struct Serializer<'a> {
    /// Schema against which names are resolved
    schema: &'a Schema,

    options: &'a Options,

    /// The database flavor handles the differences between SQL dialects and
    /// supported features.
    flavor: Flavor,
}

struct Formatter<'a> {
    /// Handle to the serializer
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut Params,
}

impl<'a> Serializer<'a> {
    /// Picks the flavor matching a driver's capability.
    pub fn new(schema: &'a Schema, options: &'a Options, capability: &Capability) -> Serializer<'a> {
        Serializer {
            schema,
            options,
            flavor: Flavor::from(capability),
        }
    }

    /// SQL Server flavor.
    pub fn sql_server(schema: &'a Schema, options: &'a Options) -> Serializer<'a> {
        Serializer::new(schema, options, &Capability::SQL_SERVER)
    }

    /// SQLite flavor.
    pub fn sqlite(schema: &'a Schema, options: &'a Options) -> Serializer<'a> {
        Serializer::new(schema, options, &Capability::SQLITE)
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Serialize a transaction control operation to a SQL string.
    pub fn transaction(capability: &Capability, op: &Transaction) -> String {
        let flavor = Flavor::from(capability);

        match op {
            Transaction::Start { isolation } => match flavor {
                Flavor::SqlServer => format!(
                    "SET TRANSACTION ISOLATION LEVEL {}; BEGIN TRANSACTION;",
                    isolation.sql_name()
                ),
                // SQLite transactions are always serializable
                Flavor::Sqlite => "BEGIN;".to_string(),
            },
            Transaction::Commit => match flavor {
                Flavor::SqlServer => "COMMIT TRANSACTION;".to_string(),
                Flavor::Sqlite => "COMMIT;".to_string(),
            },
            Transaction::Rollback => match flavor {
                Flavor::SqlServer => "ROLLBACK TRANSACTION;".to_string(),
                Flavor::Sqlite => "ROLLBACK;".to_string(),
            },
        }
    }

    /// Runs `f` against a fresh formatter and packages the result.
    fn serialize(&self, f: impl FnOnce(&mut Formatter<'_>)) -> Statement {
        let mut sql = String::new();
        let mut params = Params::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut sql,
            params: &mut params,
        };

        f(&mut fmt);

        sql.push(';');
        Statement::new(sql, params)
    }

    fn table_name<'e>(&self, entity: &'e EntityDescriptor) -> TableRef<'e> {
        TableRef {
            entity,
            alias: None,
        }
    }
}
