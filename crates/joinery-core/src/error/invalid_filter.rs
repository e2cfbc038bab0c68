use super::Error;

/// A filter condition carries arguments its operator cannot use.
#[derive(Debug)]
pub(super) struct InvalidFilterError {
    message: Box<str>,
}

impl std::error::Error for InvalidFilterError {}

impl core::fmt::Display for InvalidFilterError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid filter: {}", self.message)
    }
}

impl Error {
    pub fn invalid_filter(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidFilter(InvalidFilterError {
            message: message.into().into(),
        }))
    }

    pub fn is_invalid_filter(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidFilter(_)))
    }
}
