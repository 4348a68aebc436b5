use super::{Options, STRUCT_TYPE, TIMESTAMP_TYPE};

use serde::{Deserialize, Serialize};
use std_util::str;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDescriptor {
    /// Proto field name, e.g. `created_at`
    pub name: String,

    /// JSON name; derived from `name` when unset
    pub json_name: Option<String>,

    pub kind: FieldKind,

    /// True for `repeated` fields
    pub repeated: bool,

    /// True for proto3 `optional` fields (explicit presence)
    pub optional: bool,

    /// Fully qualified type name for enum and message kinds, e.g. `.example.User`
    pub type_name: Option<String>,

    /// Field-level options
    pub options: Options,

    /// Leading comments
    pub comments: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Bool,
    Int32,
    Sint32,
    Sfixed32,
    Uint32,
    Fixed32,
    Int64,
    Sint64,
    Sfixed64,
    Uint64,
    Fixed64,
    Float,
    Double,
    #[default]
    String,
    Bytes,
    Enum,
    Message,
    Group,
}

impl FieldDescriptor {
    /// Go identifier of the field, as protoc-gen-go names it.
    pub fn go_name(&self) -> String {
        str::go_camel_case(&self.name)
    }

    /// JSON name of the field.
    pub fn json_name(&self) -> String {
        match &self.json_name {
            Some(json_name) => json_name.clone(),
            None => str::json_camel_case(&self.name),
        }
    }

    pub fn is_message(&self) -> bool {
        matches!(self.kind, FieldKind::Message | FieldKind::Group)
    }

    pub fn is_enum(&self) -> bool {
        self.kind == FieldKind::Enum
    }

    /// True for `google.protobuf.Timestamp` fields.
    pub fn is_timestamp(&self) -> bool {
        self.is_message() && self.type_name.as_deref() == Some(TIMESTAMP_TYPE)
    }

    /// True for `google.protobuf.Struct` fields.
    pub fn is_struct(&self) -> bool {
        self.is_message() && self.type_name.as_deref() == Some(STRUCT_TYPE)
    }
}

impl FieldKind {
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Bool => "bool",
            FieldKind::Int32 => "int32",
            FieldKind::Sint32 => "sint32",
            FieldKind::Sfixed32 => "sfixed32",
            FieldKind::Uint32 => "uint32",
            FieldKind::Fixed32 => "fixed32",
            FieldKind::Int64 => "int64",
            FieldKind::Sint64 => "sint64",
            FieldKind::Sfixed64 => "sfixed64",
            FieldKind::Uint64 => "uint64",
            FieldKind::Fixed64 => "fixed64",
            FieldKind::Float => "float",
            FieldKind::Double => "double",
            FieldKind::String => "string",
            FieldKind::Bytes => "bytes",
            FieldKind::Enum => "enum",
            FieldKind::Message => "message",
            FieldKind::Group => "group",
        }
    }
}

impl core::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
