mod value;
pub(crate) use value::Value;

use joinery_core::{
    async_trait,
    driver::{Capability, Driver, Operation, Response, Transaction},
    err,
    stmt::{Row, Statement},
    Error, Result,
};
use joinery_sql::Serializer;
use rusqlite::{ffi, Connection as RusqliteConnection};
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver from a `sqlite:` connection URL.
    /// `sqlite::memory:` opens a private in-memory database per connection.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver)?;

        if url.scheme() != "sqlite" {
            return Err(err!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            ));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    async fn connect(&self) -> Result<Box<dyn joinery_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Ok(Self { connection })
    }

    fn query(&mut self, stmt: &Statement) -> Result<Vec<Row>> {
        let mut prepared = self.prepare(stmt)?;

        let columns = prepared
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut rows = prepared.raw_query();
        let mut ret = vec![];

        while let Some(row) = rows.next().map_err(map_err)? {
            let mut values = Row::new();

            for (index, column) in columns.iter().enumerate() {
                let value = row.get_ref(index).map_err(map_err)?;
                values.insert(column.clone(), Value::from_sql(value)?.into_inner());
            }

            ret.push(values);
        }

        Ok(ret)
    }

    fn execute(&mut self, stmt: &Statement) -> Result<u64> {
        let mut prepared = self.prepare(stmt)?;
        let count = prepared.raw_execute().map_err(map_err)?;
        Ok(count as u64)
    }

    /// Prepares the statement and binds every parameter by name. Names given
    /// without a prefix are looked up as `@name`.
    fn prepare(&self, stmt: &Statement) -> Result<rusqlite::Statement<'_>> {
        let mut prepared = self.connection.prepare(&stmt.sql).map_err(map_err)?;

        for (name, value) in stmt.params.iter() {
            let value = Value::from(value.clone());
            value.check()?;

            let index = match prepared.parameter_index(name).map_err(map_err)? {
                Some(index) => index,
                None if !name.starts_with(['@', ':', '$', '?']) => prepared
                    .parameter_index(&format!("@{name}"))
                    .map_err(map_err)?
                    .ok_or_else(|| unknown_parameter(name, stmt))?,
                None => return Err(unknown_parameter(name, stmt)),
            };

            prepared
                .raw_bind_parameter(index, value)
                .map_err(map_err)?;
        }

        Ok(prepared)
    }
}

#[async_trait]
impl joinery_core::driver::Connection for Connection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::QuerySql(stmt) => Ok(Response::values(self.query(&stmt)?)),
            Operation::ExecSql(stmt) => Ok(Response::count(self.execute(&stmt)?)),
            Operation::Transaction(op) => {
                let sql = Serializer::transaction(&Capability::SQLITE, &op);
                self.connection.execute_batch(&sql).map_err(map_err)?;

                if let Transaction::Start { isolation } = op {
                    tracing::trace!(
                        target: "joinery::sqlite",
                        requested = isolation.sql_name(),
                        "SQLite transactions are serializable",
                    );
                }

                Ok(Response::count(0))
            }
        }
    }
}

fn unknown_parameter(name: &str, stmt: &Statement) -> Error {
    err!("parameter `{name}` does not appear in the statement; sql={}", stmt.sql)
}

fn map_err(err: rusqlite::Error) -> Error {
    let unique = matches!(
        &err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                || failure.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    );

    if unique {
        Error::unique_violation(err)
    } else {
        Error::driver(err)
    }
}
