use super::Error;

/// Error context naming the proto file being compiled.
#[derive(Debug, Clone)]
pub(super) struct InvalidFileError {
    file: Box<str>,
}

impl std::error::Error for InvalidFileError {}

impl core::fmt::Display for InvalidFileError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "failed to compile `{}`", self.file)
    }
}

impl Error {
    /// Creates an invalid file error, usually as context over the error
    /// raised inside that file.
    pub fn invalid_file(file: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidFile(InvalidFileError {
            file: file.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid file error.
    pub fn is_invalid_file(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidFile(_))
    }
}
