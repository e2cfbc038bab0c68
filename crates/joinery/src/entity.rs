use crate::{Record, Result};

use joinery_core::{schema::app, stmt::Value, Error};

/// A type mapped to a table. Implemented by `#[derive(Entity)]`.
///
/// Fields are addressed by their declaration index, counting unmapped
/// fields, so indexes line up with the metadata returned by `schema`.
pub trait Entity: Sized + Send + 'static {
    /// Declarative metadata: table, columns, keys and foreign keys.
    fn schema() -> app::Model;

    /// Builds an instance from the columns of one joined table.
    fn load(record: &Record<'_>) -> Result<Self>;

    /// Current value of a mapped field. For a foreign key field, `nested`
    /// lists the fields to follow on the referenced entity.
    fn value(&self, field: usize, nested: &[usize]) -> Result<Value>;

    /// Stores a value read back from the database, such as a generated key.
    fn assign(&mut self, field: usize, value: Value) -> Result<()>;
}

/// Value stored in a foreign key column: the referenced entity's join field,
/// or NULL when there is no referenced entity.
pub fn reference_value<T: Entity>(target: Option<&T>, nested: &[usize]) -> Result<Value> {
    let Some(target) = target else {
        return Ok(Value::Null);
    };

    let [field, rest @ ..] = nested else {
        return Err(Error::invalid_schema(format!(
            "foreign key to `{}` has no referenced field",
            T::schema().name
        )));
    };

    target.value(*field, rest)
}

/// Structured value of a serialized field. `None` and unit values are stored
/// as NULL.
pub fn serialized_value<T: serde::Serialize>(value: &T) -> Result<Value> {
    match serde_json::to_value(value)? {
        serde_json::Value::Null => Ok(Value::Null),
        json => Ok(Value::Json(json)),
    }
}

pub fn unknown_field(entity: &str, field: usize) -> Error {
    joinery_core::err!("`{entity}` has no mapped field at index {field}")
}
