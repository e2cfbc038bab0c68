use super::{Formatter, ToSql};

use joinery_core::stmt::Value;

/// A named parameter. Serializing it writes `@name` and records the value.
#[derive(Debug)]
pub(super) struct Placeholder {
    pub(super) name: String,
    pub(super) value: Value,
}

impl Placeholder {
    pub(super) fn new(name: impl Into<String>, value: Value) -> Placeholder {
        let name = name.into();
        Placeholder {
            name: format!("@{}", sanitize(&name)),
            value,
        }
    }
}

impl ToSql for Placeholder {
    fn to_sql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(&self.name);
        f.params.push(self.name, self.value);
    }
}

/// Parameter names are derived from column names, which may contain
/// characters that are not valid in a parameter name.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_alphanumeric() || ch == '_' { ch } else { '_' })
        .collect()
}
