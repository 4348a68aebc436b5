use super::Error;

/// Error when an ormable message has no usable identifier field.
#[derive(Debug, Clone)]
pub(super) struct MissingPrimaryKeyError {
    message: Box<str>,
}

impl std::error::Error for MissingPrimaryKeyError {}

impl core::fmt::Display for MissingPrimaryKeyError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "missing primary key: ormable message `{}` has no string `id` field",
            self.message
        )
    }
}

impl Error {
    /// Creates a missing primary key error.
    pub fn missing_primary_key(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingPrimaryKey(MissingPrimaryKeyError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing primary key error.
    pub fn is_missing_primary_key(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingPrimaryKey(_))
    }
}
