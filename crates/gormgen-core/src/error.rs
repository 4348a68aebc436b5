mod invalid_config;
mod invalid_file;
mod invalid_option;
mod invalid_relation;
mod missing_primary_key;
mod naming_collision;
mod unsupported_field_kind;

use invalid_config::InvalidConfigError;
use invalid_file::InvalidFileError;
use invalid_option::InvalidOptionError;
use invalid_relation::InvalidRelationError;
use missing_primary_key::MissingPrimaryKeyError;
use naming_collision::NamingCollisionError;
use std::sync::Arc;
use unsupported_field_kind::UnsupportedFieldKindError;

/// An error that can occur while compiling descriptors into storage models.
///
/// Every error is fatal for the whole run: the compiler stops at the first
/// offending message or field and produces no output.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed first, followed by earlier context, ending with
    /// the root cause.
    pub fn context(self, consequent: Error) -> Error {
        let kind = match Arc::try_unwrap(consequent.inner) {
            Ok(inner) => inner.kind,
            Err(shared) => shared.kind.clone(),
        };

        Error {
            inner: Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            }),
        }
    }

    /// Returns the innermost error of the chain.
    pub fn root(&self) -> &Error {
        let mut err = self;
        while let Some(cause) = &err.inner.cause {
            err = cause;
        }
        err
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut next = Some(self);
        core::iter::from_fn(move || {
            let err = next?;
            next = err.inner.cause.as_ref();
            Some(err)
        })
    }

    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner
            .cause
            .as_ref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

#[derive(Debug, Clone)]
enum ErrorKind {
    InvalidConfig(InvalidConfigError),
    InvalidFile(InvalidFileError),
    InvalidOption(InvalidOptionError),
    InvalidRelation(InvalidRelationError),
    MissingPrimaryKey(MissingPrimaryKeyError),
    NamingCollision(NamingCollisionError),
    UnsupportedFieldKind(UnsupportedFieldKindError),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            InvalidConfig(err) => core::fmt::Display::fmt(err, f),
            InvalidFile(err) => core::fmt::Display::fmt(err, f),
            InvalidOption(err) => core::fmt::Display::fmt(err, f),
            InvalidRelation(err) => core::fmt::Display::fmt(err, f),
            MissingPrimaryKey(err) => core::fmt::Display::fmt(err, f),
            NamingCollision(err) => core::fmt::Display::fmt(err, f),
            UnsupportedFieldKind(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Arc::new(ErrorInner { kind, cause: None }),
        }
    }
}
