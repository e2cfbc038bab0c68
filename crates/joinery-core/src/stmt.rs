mod aggregate;
pub use aggregate::{Aggregate, AggregateFn};

mod filter;
pub use filter::{Condition, Conjunction, Op, Where};

mod order_by;
pub use order_by::{Direction, OrderBy};

mod params;
pub use params::Params;

mod query;
pub use query::Query;

mod row;
pub use row::Row;

mod set;
pub use set::{Assignment, Set};

mod statement;
pub use statement::Statement;

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;
