#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBy {
    items: Vec<(String, Direction)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl OrderBy {
    pub fn new() -> OrderBy {
        OrderBy::default()
    }

    pub fn asc(mut self, name: impl Into<String>) -> OrderBy {
        self.items.push((name.into(), Direction::Asc));
        self
    }

    pub fn desc(mut self, name: impl Into<String>) -> OrderBy {
        self.items.push((name.into(), Direction::Desc));
        self
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, Direction)> {
        self.items.iter().map(|(name, dir)| (&name[..], *dir))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
