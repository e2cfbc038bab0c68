use super::Error;

#[derive(Debug)]
pub(super) struct UnresolvedNameError {
    name: Box<str>,
    entity: Box<str>,
}

impl std::error::Error for UnresolvedNameError {}

impl core::fmt::Display for UnresolvedNameError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unresolved name `{}` on `{}`", self.name, self.entity)
    }
}

impl Error {
    /// Creates an error for a filter, sort or aggregate name that matches no
    /// mapped property reachable from `entity`.
    pub fn unresolved_name(name: impl Into<String>, entity: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnresolvedName(UnresolvedNameError {
            name: name.into().into(),
            entity: entity.into().into(),
        }))
    }

    pub fn is_unresolved_name(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnresolvedName(_)))
    }
}
