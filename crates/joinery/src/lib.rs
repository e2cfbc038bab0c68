pub mod db;
pub use db::{Builder, Db, Inserted};

mod engine;
pub use engine::Record;

mod entity;
pub use entity::Entity;

mod primitive;
pub use primitive::Primitive;

pub use joinery_core::{
    driver::{Capability, Connection, Driver, IsolationLevel},
    stmt::{Aggregate, AggregateFn, Direction, Op, OrderBy, Params, Query, Row, Set, Value, Where},
    Error, NamingStyle, Options, Result,
};

pub use joinery_macros::{Entity, Enum};

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{
        entity::{reference_value, serialized_value, unknown_field},
        Entity, Error, Primitive, Record, Result,
    };
    pub use joinery_core::{
        schema::app,
        stmt::{Type, Value},
        NamingStyle,
    };
}
