pub mod driver;
pub use driver::{Connection, Driver};

mod error;
pub use error::{Error, IntoError};

pub mod mapping;
pub use mapping::MappingContext;

mod options;
pub use options::{NamingStyle, Options};

pub mod schema;
pub use schema::Schema;

pub mod serialization;

pub mod stmt;

/// A Result type alias that uses Joinery's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
