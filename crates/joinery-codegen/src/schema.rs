mod column;
pub(crate) use column::{Column, Serialize};

mod enumeration;
pub(crate) use enumeration::Enum;

mod error;
pub(crate) use error::ErrorSet;

mod field;
pub(crate) use field::{Field, FieldTy};

mod foreign_key;
pub(crate) use foreign_key::{ForeignKey, Join};

mod key_attr;
pub(crate) use key_attr::KeyAttr;

mod model;
pub(crate) use model::Model;

mod table;
pub(crate) use table::Table;
