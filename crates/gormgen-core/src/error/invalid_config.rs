use super::Error;

/// Error when the per-run configuration cannot be parsed.
#[derive(Debug, Clone)]
pub(super) struct InvalidConfigError {
    reason: Box<str>,
}

impl std::error::Error for InvalidConfigError {}

impl core::fmt::Display for InvalidConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid configuration: {}", self.reason)
    }
}

impl Error {
    /// Creates an invalid configuration error.
    ///
    /// Raised for unknown plugin parameters or unrecognized engine names.
    pub fn invalid_config(reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConfig(InvalidConfigError {
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidConfig(_))
    }
}
