use super::{MessageDescriptor, Options};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDescriptor {
    /// Path of the `.proto` file, relative to the include root
    pub name: String,

    /// Protobuf package, e.g. `example.demo`
    pub package: String,

    /// Go package name the generated code is placed in
    pub go_package: String,

    /// Top-level messages in declaration order
    pub messages: Vec<MessageDescriptor>,

    /// File-level options
    pub options: Options,
}

impl FileDescriptor {
    /// Path prefix of generated files: the proto path without `.proto`.
    pub fn generated_filename_prefix(&self) -> &str {
        self.name.strip_suffix(".proto").unwrap_or(&self.name)
    }

    /// Go package name, falling back to the last proto package segment.
    pub fn go_package_name(&self) -> &str {
        if !self.go_package.is_empty() {
            // `go_package` may be an import path with an optional `;name`
            let package = self.go_package.as_str();
            return match package.rsplit_once(';') {
                Some((_, name)) => name,
                None => package.rsplit('/').next().unwrap_or(package),
            };
        }

        self.package.rsplit('.').next().unwrap_or(&self.package)
    }

    /// Looks up a top-level message by its proto name.
    pub fn message(&self, name: &str) -> Option<&MessageDescriptor> {
        self.messages.iter().find(|message| message.name == name)
    }

    /// Resolves a fully qualified type name (`.pkg.Name`) declared in this file
    /// to its Go identifier (`Name`, or `Outer_Inner` for nested types).
    ///
    /// Returns `None` when the type belongs to another package.
    pub fn go_ident(&self, type_name: &str) -> Option<String> {
        let type_name = type_name.strip_prefix('.').unwrap_or(type_name);
        let local = if self.package.is_empty() {
            type_name
        } else {
            type_name
                .strip_prefix(self.package.as_str())?
                .strip_prefix('.')?
        };

        Some(local.replace('.', "_"))
    }
}
