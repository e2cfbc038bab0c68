use crate::Result;

use joinery_core::{
    serialization,
    stmt::{Type, Value},
    Error,
};

use jiff::civil::DateTime;
use uuid::Uuid;

/// A scalar stored in a single column.
///
/// Loading NULL into a type that is not an `Option` yields the type's
/// default value.
pub trait Primitive: Sized {
    fn ty() -> Type;

    fn load(value: Value) -> Result<Self>;

    fn to_value(&self) -> Value;
}

impl Primitive for bool {
    fn ty() -> Type {
        Type::Bool
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Bool(value) => Ok(value),
            Value::I32(value) => Ok(value != 0),
            Value::I64(value) => Ok(value != 0),
            Value::Null => Ok(false),
            _ => Err(Error::type_conversion(value, "bool")),
        }
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Primitive for i32 {
    fn ty() -> Type {
        Type::I32
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::I32(value) => Ok(value),
            Value::I64(wide) => i32::try_from(wide).map_err(|_| Error::type_conversion(value, "i32")),
            Value::Null => Ok(0),
            _ => Err(Error::type_conversion(value, "i32")),
        }
    }

    fn to_value(&self) -> Value {
        Value::I32(*self)
    }
}

impl Primitive for i64 {
    fn ty() -> Type {
        Type::I64
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::I32(value) => Ok(value as i64),
            Value::I64(value) => Ok(value),
            Value::Null => Ok(0),
            _ => Err(Error::type_conversion(value, "i64")),
        }
    }

    fn to_value(&self) -> Value {
        Value::I64(*self)
    }
}

impl Primitive for f64 {
    fn ty() -> Type {
        Type::F64
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(0.0),
            value => value
                .as_f64()
                .ok_or_else(|| Error::type_conversion(value, "f64")),
        }
    }

    fn to_value(&self) -> Value {
        Value::F64(*self)
    }
}

impl Primitive for String {
    fn ty() -> Type {
        Type::String
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::String(value) => Ok(value),
            Value::Null => Ok(String::new()),
            _ => Err(Error::type_conversion(value, "String")),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Primitive for Vec<u8> {
    fn ty() -> Type {
        Type::Bytes
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(value) => Ok(value),
            Value::Null => Ok(vec![]),
            _ => Err(Error::type_conversion(value, "Vec<u8>")),
        }
    }

    fn to_value(&self) -> Value {
        Value::Bytes(self.clone())
    }
}

impl Primitive for Uuid {
    fn ty() -> Type {
        Type::Uuid
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Uuid(value) => Ok(value),
            Value::String(text) => Ok(Uuid::parse_str(&text)?),
            Value::Bytes(bytes) => Ok(Uuid::from_slice(&bytes)?),
            Value::Null => Ok(Uuid::nil()),
            _ => Err(Error::type_conversion(value, "Uuid")),
        }
    }

    fn to_value(&self) -> Value {
        Value::Uuid(*self)
    }
}

/// Integers are read as seconds since the Unix epoch.
impl Primitive for DateTime {
    fn ty() -> Type {
        Type::DateTime
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::DateTime(value) => Ok(value),
            Value::String(text) => Ok(text.trim().parse()?),
            Value::I32(seconds) => serialization::from_epoch_seconds(seconds as i64),
            Value::I64(seconds) => serialization::from_epoch_seconds(seconds),
            Value::Null => Ok(DateTime::default()),
            _ => Err(Error::type_conversion(value, "DateTime")),
        }
    }

    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }
}

impl<T: Primitive> Primitive for Option<T> {
    fn ty() -> Type {
        T::ty()
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => Ok(Some(T::load(value)?)),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }
}
