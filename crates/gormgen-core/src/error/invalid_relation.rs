use super::Error;

/// Error when a field's relationship declaration cannot be resolved.
///
/// This occurs when:
/// - more than one relationship kind is declared on one field
/// - a relationship is declared on a field that is not message-typed
/// - the declared kind does not match the field's repetition
/// - the related message is unknown or not ormable
#[derive(Debug, Clone)]
pub(super) struct InvalidRelationError {
    message: Box<str>,
    field: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for InvalidRelationError {}

impl core::fmt::Display for InvalidRelationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid relation on `{}.{}`: {}",
            self.message, self.field, self.reason
        )
    }
}

impl Error {
    /// Creates an invalid relation error.
    pub fn invalid_relation(
        message: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::InvalidRelation(InvalidRelationError {
            message: message.into().into(),
            field: field.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid relation error.
    pub fn is_invalid_relation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidRelation(_))
    }
}
