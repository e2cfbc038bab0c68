/// A single aggregate function applied to one resolved property.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub func: AggregateFn,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFn {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateFn {
    pub fn as_sql(self) -> &'static str {
        match self {
            AggregateFn::Count => "COUNT",
            AggregateFn::Sum => "SUM",
            AggregateFn::Avg => "AVG",
            AggregateFn::Min => "MIN",
            AggregateFn::Max => "MAX",
        }
    }
}

impl Aggregate {
    pub fn new(func: AggregateFn, name: impl Into<String>) -> Aggregate {
        Aggregate {
            func,
            name: name.into(),
        }
    }

    pub fn count(name: impl Into<String>) -> Aggregate {
        Aggregate::new(AggregateFn::Count, name)
    }

    pub fn sum(name: impl Into<String>) -> Aggregate {
        Aggregate::new(AggregateFn::Sum, name)
    }

    pub fn avg(name: impl Into<String>) -> Aggregate {
        Aggregate::new(AggregateFn::Avg, name)
    }

    pub fn min(name: impl Into<String>) -> Aggregate {
        Aggregate::new(AggregateFn::Min, name)
    }

    pub fn max(name: impl Into<String>) -> Aggregate {
        Aggregate::new(AggregateFn::Max, name)
    }
}
