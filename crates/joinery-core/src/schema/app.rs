//! Declarative entity metadata, as emitted by `#[derive(Entity)]`.

use crate::{stmt::Type, NamingStyle};

use std::any::TypeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(TypeId);

impl EntityId {
    pub fn of<T: 'static>() -> EntityId {
        EntityId(TypeId::of::<T>())
    }
}

#[derive(Debug, Clone)]
pub struct Model {
    pub id: EntityId,

    /// Rust type name, also accepted as a qualifier in filter names.
    pub name: &'static str,

    pub table: Option<TableAttr>,

    /// Every named field in declaration order, including unmapped ones, so
    /// field indexes line up with the generated accessors.
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Default)]
pub struct TableAttr {
    pub name: Option<&'static str>,
    pub schema: Option<&'static str>,
    pub naming_style: Option<NamingStyle>,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub ty: FieldTy,
    pub column: Option<ColumnAttr>,
    pub key: Option<KeyAttr>,
    pub not_mapped: bool,
}

#[derive(Debug, Clone)]
pub enum FieldTy {
    Primitive(Type),
    Reference(Reference),
    Serialized(Serialization),

    /// Excluded with `#[not_mapped]`. The field's type is irrelevant.
    Unmapped,
}

/// A single-valued foreign key to another entity.
#[derive(Debug, Clone)]
pub struct Reference {
    pub target: fn() -> Model,
    pub join: JoinKind,

    /// Field on the referenced entity that the foreign key column matches.
    pub references: &'static str,

    /// The field is `Option<T>`, so a NULL foreign key loads as `None`.
    pub optional: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ColumnAttr {
    pub name: Option<&'static str>,
    pub order: Option<u32>,
    pub type_name: Option<&'static str>,
}

#[derive(Debug, Clone, Default)]
pub struct KeyAttr {
    pub auto: bool,
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
}

impl JoinKind {
    pub fn as_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Serialization {
    Json,
    Xml,
}

impl Field {
    pub fn is_reference(&self) -> bool {
        matches!(self.ty, FieldTy::Reference(_))
    }
}
