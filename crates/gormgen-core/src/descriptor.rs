//! In-memory descriptor set consumed by the compiler.
//!
//! This mirrors the subset of a protobuf `CodeGeneratorRequest` the compiler
//! reads. Decoding the request and writing the response belong to the caller;
//! the descriptor set arrives here fully deserialized, typically from JSON.

mod field;
pub use field::{FieldDescriptor, FieldKind};

mod file;
pub use file::FileDescriptor;

mod message;
pub use message::MessageDescriptor;

mod options;
pub use options::{OptionValue, Options};

use serde::{Deserialize, Serialize};

/// Fully qualified name of the well-known timestamp message.
pub const TIMESTAMP_TYPE: &str = ".google.protobuf.Timestamp";

/// Fully qualified name of the well-known structured-value message.
pub const STRUCT_TYPE: &str = ".google.protobuf.Struct";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptorSet {
    /// Paths of the files to emit. Empty means every file.
    pub files_to_generate: Vec<String>,

    /// All files of the request, including dependencies.
    pub files: Vec<FileDescriptor>,
}

impl DescriptorSet {
    /// Iterates the files the caller asked to generate, in request order.
    pub fn files_to_generate(&self) -> impl Iterator<Item = &FileDescriptor> {
        self.files.iter().filter(|file| {
            self.files_to_generate.is_empty() || self.files_to_generate.contains(&file.name)
        })
    }
}
