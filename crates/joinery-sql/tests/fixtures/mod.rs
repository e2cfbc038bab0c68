#![allow(dead_code)]

use joinery_core::{
    schema::app::*,
    stmt::{Statement, Type, Value},
    MappingContext, Options, Schema,
};

pub struct State;
pub struct City;
pub struct Address;
pub struct Customer;
pub struct Profile;

fn field(name: &'static str, ty: FieldTy) -> Field {
    Field {
        name,
        ty,
        column: None,
        key: None,
        not_mapped: false,
    }
}

fn prim(name: &'static str, ty: Type) -> Field {
    field(name, FieldTy::Primitive(ty))
}

fn key(name: &'static str, auto: bool) -> Field {
    Field {
        key: Some(KeyAttr { auto, order: None }),
        ..prim(name, Type::I64)
    }
}

fn reference(
    name: &'static str,
    target: fn() -> Model,
    join: JoinKind,
    column: Option<&'static str>,
) -> Field {
    Field {
        column: column.map(|name| ColumnAttr {
            name: Some(name),
            ..ColumnAttr::default()
        }),
        ..field(
            name,
            FieldTy::Reference(Reference {
                target,
                join,
                references: "id",
                optional: join == JoinKind::Left,
            }),
        )
    }
}

pub fn state() -> Model {
    Model {
        id: EntityId::of::<State>(),
        name: "State",
        table: None,
        fields: vec![
            key("id", true),
            prim("name", Type::String),
            prim("abbreviation", Type::String),
        ],
    }
}

pub fn city() -> Model {
    Model {
        id: EntityId::of::<City>(),
        name: "City",
        table: None,
        fields: vec![
            key("id", true),
            prim("name", Type::String),
            reference("state", state, JoinKind::Inner, None),
        ],
    }
}

pub fn address() -> Model {
    Model {
        id: EntityId::of::<Address>(),
        name: "Address",
        table: None,
        fields: vec![
            key("id", true),
            prim("street", Type::String),
            prim("zip_code", Type::String),
            reference("city", city, JoinKind::Inner, None),
        ],
    }
}

pub fn customer() -> Model {
    Model {
        id: EntityId::of::<Customer>(),
        name: "Customer",
        table: None,
        fields: vec![
            key("id", true),
            prim("name", Type::String),
            prim("balance", Type::F64),
            prim("email", Type::String),
            reference("billing", address, JoinKind::Left, Some("id_billing_address")),
            reference("shipping", address, JoinKind::Inner, Some("id_shipping_address")),
        ],
    }
}

pub fn profile() -> Model {
    Model {
        id: EntityId::of::<Profile>(),
        name: "Profile",
        table: None,
        fields: vec![
            key("id", false),
            Field {
                column: Some(ColumnAttr {
                    type_name: Some("bigint"),
                    ..ColumnAttr::default()
                }),
                ..prim("born", Type::DateTime)
            },
            field("characteristics", FieldTy::Serialized(Serialization::Json)),
        ],
    }
}

pub fn schema() -> Schema {
    Schema::build(vec![customer(), profile()], &Options::default()).unwrap()
}

pub fn context<T: 'static>(schema: &Schema) -> MappingContext<'_> {
    MappingContext::build(schema, EntityId::of::<T>()).unwrap()
}

pub fn params(stmt: &Statement) -> Vec<(&str, &Value)> {
    stmt.params.iter().collect()
}
