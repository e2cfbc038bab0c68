use super::Serializer;

use joinery_core::driver::{Capability, Dialect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flavor {
    SqlServer,
    Sqlite,
}

impl From<&Capability> for Flavor {
    fn from(capability: &Capability) -> Flavor {
        match capability.dialect {
            Dialect::SqlServer => Flavor::SqlServer,
            Dialect::Sqlite => Flavor::Sqlite,
        }
    }
}

impl Flavor {
    /// String concatenation operator.
    pub(super) fn concat(self) -> &'static str {
        match self {
            Flavor::SqlServer => " + ",
            Flavor::Sqlite => " || ",
        }
    }
}

impl Serializer<'_> {
    pub(super) fn is_sqlite(&self) -> bool {
        self.flavor == Flavor::Sqlite
    }
}
