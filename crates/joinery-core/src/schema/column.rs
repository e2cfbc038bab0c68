use super::app::{EntityId, JoinKind, Serialization};
use crate::{serialization, stmt::Type, stmt::Value, Result};

#[derive(Debug)]
pub struct ColumnDescriptor {
    /// Index of the field in the entity's declaration order.
    pub field: usize,

    /// Rust field name.
    pub name: &'static str,

    /// Resolved column name, unquoted.
    pub column: String,

    pub ty: ColumnTy,

    pub is_key: bool,

    /// Value is generated by the database on insert.
    pub is_auto: bool,

    /// Position used to order composite keys.
    pub order: u32,

    /// Database type hint from `#[column(type_name = "..")]`.
    pub type_name: Option<&'static str>,

    /// The field carries an explicit `#[column]` or `#[foreign_key]`
    /// attribute. Such columns must be present in result rows.
    pub explicit: bool,
}

#[derive(Debug)]
pub enum ColumnTy {
    Primitive(Type),
    ForeignKey(ForeignKey),
    Serialized(Serialization),
}

#[derive(Debug)]
pub struct ForeignKey {
    pub target: EntityId,
    pub join: JoinKind,

    /// Index of the referenced column on the target entity.
    pub references: usize,

    pub optional: bool,
}

impl ColumnDescriptor {
    pub fn is_foreign_key(&self) -> bool {
        matches!(self.ty, ColumnTy::ForeignKey(_))
    }

    pub fn foreign_key(&self) -> Option<&ForeignKey> {
        match &self.ty {
            ColumnTy::ForeignKey(fk) => Some(fk),
            _ => None,
        }
    }

    pub fn serialization(&self) -> Option<Serialization> {
        match self.ty {
            ColumnTy::Serialized(kind) => Some(kind),
            _ => None,
        }
    }

    /// Date values of this column are stored as seconds since the Unix epoch.
    pub fn stores_epoch(&self) -> bool {
        matches!(self.ty, ColumnTy::Primitive(Type::DateTime))
            && self
                .type_name
                .is_some_and(|name| name.eq_ignore_ascii_case("bigint") || name.eq_ignore_ascii_case("int"))
    }

    /// Converts a value into the representation stored in this column.
    pub fn encode(&self, value: Value) -> Result<Value> {
        match value {
            Value::DateTime(datetime) if self.stores_epoch() => {
                Ok(Value::I64(serialization::epoch_seconds(datetime)?))
            }
            Value::Json(json) => match self.serialization() {
                Some(kind) => Ok(Value::String(serialization::encode(kind, self.name, &json)?)),
                None => Ok(Value::String(serde_json::to_string(&json)?)),
            },
            value => Ok(value),
        }
    }
}
