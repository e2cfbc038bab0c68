mod builder;
pub use builder::Builder;

mod connect;

use crate::{engine, Entity, Primitive, Result};

use joinery_core::{
    driver::{Capability, Connection, IsolationLevel, Operation, Response, Transaction},
    schema::{app::EntityId, EntityDescriptor},
    stmt::{Aggregate, Op, Params, Query, Row, Set, Statement, Value, Where},
    Error, MappingContext, Options, Schema,
};
use joinery_sql::Serializer;

use std::sync::Arc;

/// A database handle: the resolved schema, the options it was built with and
/// one open connection.
///
/// Every operation builds its own mapping context, so nothing computed for
/// one statement leaks into the next.
#[derive(Debug)]
pub struct Db {
    schema: Arc<Schema>,
    options: Options,
    capability: &'static Capability,
    connection: Box<dyn Connection>,
    in_transaction: bool,
}

/// Outcome of [`Db::insert`].
#[derive(Debug, Clone, PartialEq)]
pub enum Inserted {
    /// The key generated by the database. It has also been assigned to the
    /// entity.
    Key(Value),

    /// Number of rows written, for entities without a generated key.
    Rows(u64),
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn capability(&self) -> &'static Capability {
        self.capability
    }

    /// Inserts `value`. When the entity has a single generated key, the new
    /// key is written back into `value`.
    pub async fn insert<T: Entity>(&mut self, value: &mut T) -> Result<Inserted> {
        let result = self.try_insert(value).await;
        self.guard(result).await
    }

    /// Loads the entity whose single-column key equals `key`.
    pub async fn get<T: Entity>(&mut self, key: impl Into<Value>) -> Result<Option<T>> {
        self.get_by_keys(vec![key.into()]).await
    }

    /// Loads the entity whose key columns, in key order, equal `keys`.
    pub async fn get_by_keys<T: Entity>(&mut self, keys: Vec<Value>) -> Result<Option<T>> {
        let result = self.try_get_by_keys(keys).await;
        self.guard(result).await
    }

    /// Loads every entity matching the query, with its referenced entities.
    pub async fn select<T: Entity>(&mut self, query: impl Into<Query>) -> Result<Vec<T>> {
        let result = self.try_select(query.into()).await;
        self.guard(result).await
    }

    /// Writes every non-key column of `value` to the row with its key.
    pub async fn update<T: Entity>(&mut self, value: &T) -> Result<u64> {
        let result = self.try_update(value).await;
        self.guard(result).await
    }

    /// Applies `set` to the rows matching `filter`. When `expected` is given
    /// and a different number of rows changed, the update has still run and
    /// an error is returned.
    pub async fn update_where<T: Entity>(
        &mut self,
        set: Set,
        filter: Where,
        expected: Option<u64>,
    ) -> Result<u64> {
        let result = self.try_update_where::<T>(set, filter, expected).await;
        self.guard(result).await
    }

    /// Deletes the row with the key of `value`.
    pub async fn delete<T: Entity>(&mut self, value: &T, expected: Option<u64>) -> Result<u64> {
        let result = self.try_delete(value, expected).await;
        self.guard(result).await
    }

    /// Deletes the rows matching `filter`. Only columns of `T`'s own table
    /// can be named.
    pub async fn delete_where<T: Entity>(
        &mut self,
        filter: Where,
        expected: Option<u64>,
    ) -> Result<u64> {
        let result = self.try_delete_where::<T>(filter, expected).await;
        self.guard(result).await
    }

    /// Computes one aggregate over the rows matching `filter`. A NULL result,
    /// such as `SUM` over no rows, loads as `U`'s default.
    pub async fn aggregate<T: Entity, U: Primitive>(
        &mut self,
        aggregate: Aggregate,
        filter: Where,
    ) -> Result<U> {
        let result = self.try_aggregate::<T, U>(aggregate, filter).await;
        self.guard(result).await
    }

    /// Runs raw SQL and returns its rows untouched.
    pub async fn execute_query(&mut self, sql: &str, params: Params) -> Result<Vec<Row>> {
        let result = self.query(Statement::new(sql, params)).await;
        self.guard(result).await
    }

    /// Runs raw SQL and returns the number of affected rows.
    pub async fn execute_non_query(
        &mut self,
        sql: &str,
        params: Params,
        expected: Option<u64>,
    ) -> Result<u64> {
        let result = match self.execute(Statement::new(sql, params)).await {
            Ok(count) => check_count(expected, count),
            Err(err) => Err(err),
        };
        self.guard(result).await
    }

    /// Opens a transaction with the configured isolation level.
    pub async fn begin(&mut self) -> Result<()> {
        let isolation = self.options.isolation_level;
        self.begin_with(isolation).await
    }

    pub async fn begin_with(&mut self, isolation: IsolationLevel) -> Result<()> {
        if self.in_transaction {
            return Err(Error::unsupported_operation("a transaction is already open"));
        }

        self.connection
            .exec(Transaction::Start { isolation }.into())
            .await?;
        self.in_transaction = true;

        tracing::debug!(target: "joinery::db", isolation = isolation.sql_name(), "transaction started");
        Ok(())
    }

    pub async fn commit(&mut self) -> Result<()> {
        self.end_transaction(Transaction::Commit).await
    }

    pub async fn rollback(&mut self) -> Result<()> {
        self.end_transaction(Transaction::Rollback).await
    }

    pub fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    async fn end_transaction(&mut self, op: Transaction) -> Result<()> {
        if !self.in_transaction {
            return Err(Error::unsupported_operation("no transaction is open"));
        }

        self.in_transaction = false;
        self.connection.exec(op.into()).await?;

        tracing::debug!(target: "joinery::db", ?op, "transaction finished");
        Ok(())
    }

    async fn try_insert<T: Entity>(&mut self, value: &mut T) -> Result<Inserted> {
        let schema = self.schema.clone();
        let entity = describe::<T>(&schema)?;
        let values = column_values(&schema, entity, value)?;
        let stmt = self.serializer(&schema).insert(entity, values)?;

        let Some(identity) = entity
            .identity
            .filter(|_| entity.returns_generated_key())
        else {
            return Ok(Inserted::Rows(self.execute(stmt).await?));
        };

        let key = self.exec(Operation::QuerySql(stmt)).await?.rows.into_scalar()?;
        value.assign(entity.columns[identity].field, key.clone())?;

        Ok(Inserted::Key(key))
    }

    async fn try_get_by_keys<T: Entity>(&mut self, keys: Vec<Value>) -> Result<Option<T>> {
        let schema = self.schema.clone();
        let entity = describe::<T>(&schema)?;

        if keys.len() != entity.key.len() {
            return Err(Error::invalid_filter(format!(
                "`{}` has {} key columns, got {} values",
                entity.name,
                entity.key.len(),
                keys.len()
            )));
        }

        let filter = entity
            .key_columns()
            .zip(keys)
            .fold(Where::new(), |filter, (column, key)| {
                filter.and(column.name, Op::Eq, key)
            });

        Ok(self.try_select(filter.into()).await?.into_iter().next())
    }

    async fn try_select<T: Entity>(&mut self, query: Query) -> Result<Vec<T>> {
        let schema = self.schema.clone();
        let cx = context::<T>(&schema)?;
        let stmt = self.serializer(&schema).select(&cx, &query)?;
        let rows = self.query(stmt).await?;

        engine::materialize(&cx, &rows, &self.options)
    }

    async fn try_update<T: Entity>(&mut self, value: &T) -> Result<u64> {
        let schema = self.schema.clone();
        let cx = context::<T>(&schema)?;
        let values = column_values(&schema, cx.entity(cx.root()), value)?;
        let stmt = self.serializer(&schema).update(&cx, values)?;

        self.execute(stmt).await
    }

    async fn try_update_where<T: Entity>(
        &mut self,
        set: Set,
        filter: Where,
        expected: Option<u64>,
    ) -> Result<u64> {
        let schema = self.schema.clone();
        let cx = context::<T>(&schema)?;
        let stmt = self.serializer(&schema).update_where(&cx, &set, &filter)?;

        check_count(expected, self.execute(stmt).await?)
    }

    async fn try_delete<T: Entity>(&mut self, value: &T, expected: Option<u64>) -> Result<u64> {
        let schema = self.schema.clone();
        let cx = context::<T>(&schema)?;
        let keys = cx
            .entity(cx.root())
            .key_columns()
            .map(|column| value.value(column.field, &[]))
            .collect::<Result<Vec<_>>>()?;
        let stmt = self.serializer(&schema).delete(&cx, keys)?;

        check_count(expected, self.execute(stmt).await?)
    }

    async fn try_delete_where<T: Entity>(
        &mut self,
        filter: Where,
        expected: Option<u64>,
    ) -> Result<u64> {
        let schema = self.schema.clone();
        let cx = context::<T>(&schema)?;
        let stmt = self.serializer(&schema).delete_where(&cx, &filter)?;

        check_count(expected, self.execute(stmt).await?)
    }

    async fn try_aggregate<T: Entity, U: Primitive>(
        &mut self,
        aggregate: Aggregate,
        filter: Where,
    ) -> Result<U> {
        let schema = self.schema.clone();
        let cx = context::<T>(&schema)?;
        let stmt = self.serializer(&schema).aggregate(&cx, &aggregate, &filter)?;
        let value = self.exec(Operation::QuerySql(stmt)).await?.rows.into_scalar()?;

        U::load(value)
    }

    fn serializer<'a>(&'a self, schema: &'a Schema) -> Serializer<'a> {
        Serializer::new(schema, &self.options, self.capability)
    }

    async fn query(&mut self, stmt: Statement) -> Result<Vec<Row>> {
        self.exec(Operation::QuerySql(stmt)).await?.rows.into_values()
    }

    async fn execute(&mut self, stmt: Statement) -> Result<u64> {
        self.exec(Operation::ExecSql(stmt)).await?.rows.into_count()
    }

    async fn exec(&mut self, op: Operation) -> Result<Response> {
        if let Operation::QuerySql(stmt) | Operation::ExecSql(stmt) = &op {
            tracing::debug!(
                target: "joinery::db",
                sql = %stmt.sql,
                params = stmt.params.len(),
                "executing statement",
            );
        }

        let response = self.connection.exec(op).await?;

        tracing::debug!(target: "joinery::db", rows = ?response.rows, "statement executed");
        Ok(response)
    }

    /// Logs a failed operation and, when configured, rolls back the open
    /// transaction. The original error is always returned.
    async fn guard<R>(&mut self, result: Result<R>) -> Result<R> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::error!(target: "joinery::db", error = %err, "operation failed");

                if self.options.rollback_on_error && self.in_transaction {
                    self.in_transaction = false;

                    if let Err(rollback) = self.connection.exec(Transaction::Rollback.into()).await {
                        tracing::warn!(
                            target: "joinery::db",
                            error = %rollback,
                            "rollback after a failed operation also failed",
                        );
                    }
                }

                Err(err)
            }
        }
    }
}

fn describe<T: Entity>(schema: &Schema) -> Result<&EntityDescriptor> {
    schema
        .get(EntityId::of::<T>())
        .ok_or_else(|| Error::invalid_schema(format!("`{}` is not registered", T::schema().name)))
}

fn context<T: Entity>(schema: &Schema) -> Result<MappingContext<'_>> {
    describe::<T>(schema)?;
    MappingContext::build(schema, EntityId::of::<T>())
}

/// One value per column of `entity`, in column order. A foreign key column
/// holds the value of the field it references on the target entity.
fn column_values<T: Entity>(
    schema: &Schema,
    entity: &EntityDescriptor,
    value: &T,
) -> Result<Vec<Value>> {
    entity
        .columns
        .iter()
        .map(|column| {
            if !column.is_foreign_key() {
                return value.value(column.field, &[]);
            }

            let (nested, leaf) = schema.reference_chain(column)?;
            leaf.encode(value.value(column.field, &nested)?)
        })
        .collect()
}

fn check_count(expected: Option<u64>, actual: u64) -> Result<u64> {
    match expected {
        Some(expected) if expected != actual => Err(Error::unexpected_row_count(expected, actual)),
        _ => Ok(actual),
    }
}
