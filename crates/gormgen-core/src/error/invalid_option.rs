use super::Error;

/// Error when a declared option has the wrong shape.
///
/// Examples: `ormable = "yes"` (string instead of bool), an unknown key inside
/// a `belongs_to` declaration, or `jsonb` on an integer field.
#[derive(Debug, Clone)]
pub(super) struct InvalidOptionError {
    message: Box<str>,
    field: Option<Box<str>>,
    option: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for InvalidOptionError {}

impl core::fmt::Display for InvalidOptionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.field {
            Some(field) => write!(
                f,
                "invalid option `{}` on `{}.{}`: {}",
                self.option, self.message, field, self.reason
            ),
            None => write!(
                f,
                "invalid option `{}` on `{}`: {}",
                self.option, self.message, self.reason
            ),
        }
    }
}

impl Error {
    /// Creates an invalid option error for a message or one of its fields.
    pub fn invalid_option(
        message: impl Into<String>,
        field: Option<&str>,
        option: impl Into<String>,
        reason: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::InvalidOption(InvalidOptionError {
            message: message.into().into(),
            field: field.map(Into::into),
            option: option.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid option error.
    pub fn is_invalid_option(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidOption(_))
    }
}
