use gormgen_core::{descriptor::FileDescriptor, Error, Result};

/// Declared generation intent of a proto file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOptions {
    /// True if the file is emitted at all
    pub generate: bool,
}

impl FileOptions {
    /// Reads the file-level options. A file without options is not emitted.
    pub fn resolve(file: &FileDescriptor) -> Result<FileOptions> {
        let mut options = FileOptions::default();

        for (key, value) in file.options.iter() {
            match key {
                "generate" => {
                    options.generate = value.as_bool().ok_or_else(|| {
                        Error::invalid_option(
                            &file.name,
                            None,
                            key,
                            format!("expected bool, found {}", value.type_name()),
                        )
                    })?;
                }
                _ => {
                    log::debug!("ignoring option `{key}` on file `{}`", file.name);
                }
            }
        }

        Ok(options)
    }
}
