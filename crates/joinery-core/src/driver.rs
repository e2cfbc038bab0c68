mod capability;
pub use capability::{Capability, Dialect};

pub mod operation;
pub use operation::Operation;

mod response;
pub use response::{Response, Rows};

mod transaction;
pub use transaction::{IsolationLevel, Transaction};

use crate::{async_trait, Result};

use std::{borrow::Cow, fmt::Debug};

/// The external statement executor.
///
/// A driver knows how to reach a database and which SQL dialect it speaks.
/// The mapping engine produces statement text and parameters; drivers only
/// run them.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Returns the URL this driver is configured to connect to.
    fn url(&self) -> Cow<'_, str>;

    /// Describes the driver's capability, which selects the SQL flavor.
    fn capability(&self) -> &'static Capability;

    /// Opens a new connection.
    async fn connect(&self) -> Result<Box<dyn Connection>>;
}

#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Execute a database operation
    async fn exec(&mut self, op: Operation) -> Result<Response>;
}
