use super::Value;

/// Column assignments for an update-by-filter statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Set {
    assignments: Vec<Assignment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: String,
    pub value: Value,

    /// One-based position, used as the `p{n}` parameter suffix.
    pub index: usize,
}

impl Set {
    pub fn new() -> Set {
        Set::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Set {
        let index = self.assignments.len() + 1;
        self.assignments.push(Assignment {
            name: name.into(),
            value: value.into(),
            index,
        });
        self
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Assignment> {
        self.assignments.iter()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
