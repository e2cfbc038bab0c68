use super::Error;

/// A bare or entity-qualified name matched properties on more than one
/// joined entity.
#[derive(Debug)]
pub(super) struct AmbiguousNameError {
    name: Box<str>,
    candidates: Vec<String>,
}

impl std::error::Error for AmbiguousNameError {}

impl core::fmt::Display for AmbiguousNameError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "ambiguous name `{}`; candidates: {}",
            self.name,
            self.candidates.join(", ")
        )
    }
}

impl Error {
    /// Creates an ambiguous-name error listing every dotted path that matched.
    pub fn ambiguous_name(name: impl Into<String>, candidates: Vec<String>) -> Error {
        Error::from(super::ErrorKind::AmbiguousName(AmbiguousNameError {
            name: name.into().into(),
            candidates,
        }))
    }

    /// Returns `true` if this error is an ambiguous-name error.
    pub fn is_ambiguous_name(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::AmbiguousName(_)))
    }
}
