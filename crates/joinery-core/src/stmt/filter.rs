use super::Value;

/// An ordered list of filter conditions.
///
/// Conditions combine left to right. `AND` appends to the clause being
/// accumulated, while `OR` closes it and opens a new parenthesized group, so
/// `a AND b OR c AND d` compiles to `(a AND b) OR (c AND d)`.
///
/// ```
/// # use joinery_core::stmt::{Op, Where};
/// let filter = Where::new()
///     .and("name", Op::Like, "%X%")
///     .or("address.city.name", Op::Eq, "Springfield");
/// assert_eq!(filter.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Where {
    conditions: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Property name, optionally qualified by a dotted path or entity name.
    pub name: String,
    pub op: Op,
    pub value: Value,

    /// One-based position in the list, used to keep parameter names unique.
    pub index: usize,
    pub conjunction: Conjunction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    And,
    Or,
}

/// Comparison operators understood by the predicate compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Is,
    IsNot,
    Like,
    NotLike,
    In,
    NotIn,
    Between,
}

impl Op {
    pub fn as_sql(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "<>",
            Op::Gt => ">",
            Op::Ge => ">=",
            Op::Lt => "<",
            Op::Le => "<=",
            Op::Is => "IS",
            Op::IsNot => "IS NOT",
            Op::Like => "LIKE",
            Op::NotLike => "NOT LIKE",
            Op::In => "IN",
            Op::NotIn => "NOT IN",
            Op::Between => "BETWEEN",
        }
    }

    pub fn is_like(self) -> bool {
        matches!(self, Op::Like | Op::NotLike)
    }

    pub fn is_in(self) -> bool {
        matches!(self, Op::In | Op::NotIn)
    }
}

impl Where {
    pub fn new() -> Where {
        Where::default()
    }

    pub fn and(mut self, name: impl Into<String>, op: Op, value: impl Into<Value>) -> Where {
        self.push(name, op, value, Conjunction::And);
        self
    }

    pub fn or(mut self, name: impl Into<String>, op: Op, value: impl Into<Value>) -> Where {
        self.push(name, op, value, Conjunction::Or);
        self
    }

    pub fn push(
        &mut self,
        name: impl Into<String>,
        op: Op,
        value: impl Into<Value>,
        conjunction: Conjunction,
    ) {
        let index = self.conditions.len() + 1;
        self.conditions.push(Condition {
            name: name.into(),
            op,
            value: value.into(),
            index,
            conjunction,
        });
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Condition> {
        self.conditions.iter()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.conditions.iter().map(|condition| &condition.name[..])
    }
}

impl<'a> IntoIterator for &'a Where {
    type Item = &'a Condition;
    type IntoIter = std::slice::Iter<'a, Condition>;

    fn into_iter(self) -> Self::IntoIter {
        self.conditions.iter()
    }
}
