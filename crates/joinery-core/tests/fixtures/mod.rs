#![allow(dead_code)]

use joinery_core::schema::app::*;
use joinery_core::stmt::Type;

pub struct State;
pub struct City;
pub struct Address;
pub struct Customer;
pub struct User;
pub struct Node;

pub fn prim(name: &'static str, ty: Type) -> Field {
    Field {
        name,
        ty: FieldTy::Primitive(ty),
        column: None,
        key: None,
        not_mapped: false,
    }
}

pub fn key(name: &'static str, auto: bool) -> Field {
    Field {
        key: Some(KeyAttr { auto, order: None }),
        ..prim(name, Type::I64)
    }
}

pub fn reference(
    name: &'static str,
    target: fn() -> Model,
    join: JoinKind,
    optional: bool,
) -> Field {
    Field {
        name,
        ty: FieldTy::Reference(Reference {
            target,
            join,
            references: "id",
            optional,
        }),
        column: None,
        key: None,
        not_mapped: false,
    }
}

pub fn named(mut field: Field, column: &'static str) -> Field {
    field.column = Some(ColumnAttr {
        name: Some(column),
        ..ColumnAttr::default()
    });
    field
}

pub fn model<T: 'static>(name: &'static str, fields: Vec<Field>) -> Model {
    Model {
        id: EntityId::of::<T>(),
        name,
        table: None,
        fields,
    }
}

/// `State { id, name, abbreviation }`
pub fn state() -> Model {
    model::<State>(
        "State",
        vec![
            key("id", true),
            prim("name", Type::String),
            prim("abbreviation", Type::String),
        ],
    )
}

/// `City { id, name, state -> State }`
pub fn city() -> Model {
    model::<City>(
        "City",
        vec![
            key("id", true),
            prim("name", Type::String),
            reference("state", state, JoinKind::Inner, false),
        ],
    )
}

/// `Address { id, street, zip_code, city -> City }`
pub fn address() -> Model {
    model::<Address>(
        "Address",
        vec![
            key("id", true),
            prim("street", Type::String),
            prim("zip_code", Type::String),
            reference("city", city, JoinKind::Inner, false),
        ],
    )
}

/// `Customer { id, name, balance, billing -> Address (left), shipping -> Address, nickname (not mapped) }`
pub fn customer() -> Model {
    model::<Customer>(
        "Customer",
        vec![
            key("id", true),
            prim("name", Type::String),
            prim("balance", Type::F64),
            named(
                reference("billing", address, JoinKind::Left, true),
                "id_billing_address",
            ),
            named(
                reference("shipping", address, JoinKind::Inner, false),
                "id_shipping_address",
            ),
            Field {
                not_mapped: true,
                ..prim("nickname", Type::String)
            },
        ],
    )
}

/// `User { id, username }` stored as `security.application_user`.
pub fn user() -> Model {
    Model {
        table: Some(TableAttr {
            name: Some("application_user"),
            schema: Some("security"),
            naming_style: None,
        }),
        ..model::<User>(
            "User",
            vec![prim("id", Type::Uuid), prim("username", Type::String)],
        )
    }
}

/// `Node { id, parent -> Node }`
pub fn node() -> Model {
    model::<Node>(
        "Node",
        vec![
            key("id", true),
            named(reference("parent", node, JoinKind::Left, true), "id_parent"),
        ],
    )
}
