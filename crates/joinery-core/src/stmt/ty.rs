/// Declared type of a mapped property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Bool,
    I32,
    I64,
    F64,
    String,
    Bytes,
    Uuid,
    DateTime,

    /// A fieldless enum stored as its integer discriminant.
    Enum(&'static str),
}

impl Type {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::I32 | Type::I64 | Type::F64)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Type::Bool => "bool",
            Type::I32 => "i32",
            Type::I64 => "i64",
            Type::F64 => "f64",
            Type::String => "String",
            Type::Bytes => "Vec<u8>",
            Type::Uuid => "Uuid",
            Type::DateTime => "DateTime",
            Type::Enum(name) => name,
        }
    }
}
