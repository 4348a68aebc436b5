use super::Error;

/// Error when two columns of a model resolve to the same name.
///
/// Raised for a belongs-to foreign key clashing with a declared field of
/// another shape, for two relations generating the same shadow key, and for
/// many-to-many relations whose join table or join columns coincide. The
/// compiler never merges such columns silently.
#[derive(Debug, Clone)]
pub(super) struct NamingCollisionError {
    message: Box<str>,
    field: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for NamingCollisionError {}

impl core::fmt::Display for NamingCollisionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "naming collision on `{}.{}`: {}",
            self.message, self.field, self.reason
        )
    }
}

impl Error {
    /// Creates a naming collision error.
    pub fn naming_collision(
        message: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::NamingCollision(NamingCollisionError {
            message: message.into().into(),
            field: field.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is a naming collision error.
    pub fn is_naming_collision(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NamingCollision(_))
    }
}
