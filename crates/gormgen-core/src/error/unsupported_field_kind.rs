use super::Error;

/// Error when a field's kind has no storage projection.
#[derive(Debug, Clone)]
pub(super) struct UnsupportedFieldKindError {
    message: Box<str>,
    field: Box<str>,
    kind: Box<str>,
}

impl std::error::Error for UnsupportedFieldKindError {}

impl core::fmt::Display for UnsupportedFieldKindError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported field kind: `{}.{}` has kind `{}`",
            self.message, self.field, self.kind
        )
    }
}

impl Error {
    /// Creates an unsupported field kind error.
    pub fn unsupported_field_kind(
        message: impl Into<String>,
        field: impl Into<String>,
        kind: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::UnsupportedFieldKind(
            UnsupportedFieldKindError {
                message: message.into().into(),
                field: field.into().into(),
                kind: kind.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unsupported field kind error.
    pub fn is_unsupported_field_kind(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedFieldKind(_))
    }
}
