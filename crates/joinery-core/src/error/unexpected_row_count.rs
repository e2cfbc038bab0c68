use super::Error;

/// The statement ran, but touched a different number of rows than the caller
/// declared.
#[derive(Debug)]
pub(super) struct UnexpectedRowCountError {
    expected: u64,
    actual: u64,
}

impl std::error::Error for UnexpectedRowCountError {}

impl core::fmt::Display for UnexpectedRowCountError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unexpected row count: expected {}, got {}",
            self.expected, self.actual
        )
    }
}

impl Error {
    pub fn unexpected_row_count(expected: u64, actual: u64) -> Error {
        Error::from(super::ErrorKind::UnexpectedRowCount(
            UnexpectedRowCountError { expected, actual },
        ))
    }

    pub fn is_unexpected_row_count(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnexpectedRowCount(_)))
    }
}
