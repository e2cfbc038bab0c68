use super::Params;

/// SQL text plus the parameters its placeholders refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Params,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Params) -> Statement {
        Statement {
            sql: sql.into(),
            params,
        }
    }
}
