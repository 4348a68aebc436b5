#![allow(dead_code)]

use gormgen_codegen::Schema;
use gormgen_core::{
    descriptor::{
        DescriptorSet, FieldDescriptor, FieldKind, FileDescriptor, MessageDescriptor, Options,
        STRUCT_TYPE, TIMESTAMP_TYPE,
    },
    Config, Result,
};

pub const PACKAGE: &str = "example";

pub fn field(name: &str, kind: FieldKind) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_string(),
        kind,
        ..Default::default()
    }
}

pub fn id() -> FieldDescriptor {
    field("id", FieldKind::String)
}

pub fn string(name: &str) -> FieldDescriptor {
    field(name, FieldKind::String)
}

pub fn repeated(field: FieldDescriptor) -> FieldDescriptor {
    FieldDescriptor {
        repeated: true,
        ..field
    }
}

pub fn optional(field: FieldDescriptor) -> FieldDescriptor {
    FieldDescriptor {
        optional: true,
        ..field
    }
}

pub fn with_options(field: FieldDescriptor, options: Options) -> FieldDescriptor {
    FieldDescriptor { options, ..field }
}

/// A field of message type `target`, declared in the test package.
pub fn message_field(name: &str, target: &str) -> FieldDescriptor {
    FieldDescriptor {
        type_name: Some(format!(".{PACKAGE}.{target}")),
        ..field(name, FieldKind::Message)
    }
}

pub fn enum_field(name: &str, target: &str) -> FieldDescriptor {
    FieldDescriptor {
        type_name: Some(format!(".{PACKAGE}.{target}")),
        ..field(name, FieldKind::Enum)
    }
}

pub fn timestamp(name: &str) -> FieldDescriptor {
    FieldDescriptor {
        type_name: Some(TIMESTAMP_TYPE.to_string()),
        ..field(name, FieldKind::Message)
    }
}

pub fn structure(name: &str) -> FieldDescriptor {
    FieldDescriptor {
        type_name: Some(STRUCT_TYPE.to_string()),
        ..field(name, FieldKind::Message)
    }
}

/// `option` nested under a relation kind, e.g. `belongs_to {}`.
pub fn relation(field: FieldDescriptor, kind: &str, options: Options) -> FieldDescriptor {
    let field_options = field.options.clone().with(kind, options);
    with_options(field, field_options)
}

pub fn message(name: &str, fields: Vec<FieldDescriptor>) -> MessageDescriptor {
    MessageDescriptor {
        name: name.to_string(),
        fields,
        ..Default::default()
    }
}

pub fn ormable(name: &str, fields: Vec<FieldDescriptor>) -> MessageDescriptor {
    MessageDescriptor {
        options: Options::new().with("ormable", true),
        ..message(name, fields)
    }
}

pub fn file(messages: Vec<MessageDescriptor>) -> FileDescriptor {
    FileDescriptor {
        name: "demo/example.proto".to_string(),
        package: PACKAGE.to_string(),
        go_package: "github.com/acme/demo;example".to_string(),
        messages,
        options: Options::new().with("generate", true),
    }
}

pub fn set(files: Vec<FileDescriptor>) -> DescriptorSet {
    DescriptorSet {
        files_to_generate: files.iter().map(|file| file.name.clone()).collect(),
        files,
    }
}

pub fn schema(messages: Vec<MessageDescriptor>) -> Result<Schema> {
    schema_with(messages, &Config::default())
}

pub fn schema_with(messages: Vec<MessageDescriptor>, config: &Config) -> Result<Schema> {
    let schema = Schema::from_file(&file(messages), config)?;
    Ok(schema.expect("file has ormable messages"))
}

/// Renders the single generated file of `messages`.
pub fn expand(messages: Vec<MessageDescriptor>, config: &Config) -> Result<String> {
    let mut files = gormgen_codegen::compile(&set(vec![file(messages)]), config)?;
    assert_eq!(files.len(), 1);
    Ok(files.remove(0).content)
}

/// The owner/thing pair most tests start from.
pub fn owner_and_thing(thing_fields: Vec<FieldDescriptor>) -> Vec<MessageDescriptor> {
    let mut fields = vec![id()];
    fields.extend(thing_fields);

    vec![
        ormable("Owner", vec![id(), string("name")]),
        ormable("Thing", fields),
    ]
}

/// The lines of `source` between the line starting with `header` and the
/// next line that closes a top-level block.
pub fn declaration<'a>(source: &'a str, header: &str) -> &'a str {
    let start = source
        .find(&format!("\n{header}"))
        .map(|at| at + 1)
        .unwrap_or_else(|| panic!("`{header}` not found in:\n{source}"));

    let rest = &source[start..];
    let end = rest
        .find("\n}\n")
        .map(|at| at + 3)
        .unwrap_or(rest.len());

    &rest[..end]
}
