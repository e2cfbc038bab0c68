use super::{OrderBy, Where};

/// Filter, ordering and row limit for a select.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filter: Where,
    pub order_by: OrderBy,
    pub limit: Option<u64>,
}

impl Query {
    pub fn new() -> Query {
        Query::default()
    }

    pub fn filter(mut self, filter: Where) -> Query {
        self.filter = filter;
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Query {
        self.order_by = order_by;
        self
    }

    pub fn limit(mut self, limit: u64) -> Query {
        self.limit = Some(limit);
        self
    }
}

impl From<Where> for Query {
    fn from(filter: Where) -> Self {
        Query::new().filter(filter)
    }
}
