use super::Error;

/// A value or property type with no conversion strategy.
#[derive(Debug)]
pub(super) struct UnsupportedTypeError {
    ty: Box<str>,
}

impl std::error::Error for UnsupportedTypeError {}

impl core::fmt::Display for UnsupportedTypeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "type `{}` is not supported", self.ty)
    }
}

impl Error {
    pub fn unsupported_type(ty: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedType(UnsupportedTypeError {
            ty: ty.into().into(),
        }))
    }

    pub fn is_unsupported_type(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnsupportedType(_)))
    }
}
