use super::{name::record_name, FieldOptions, MessageOptions, Relation};

use gormgen_core::{
    descriptor::{FieldDescriptor, FieldKind, FileDescriptor, MessageDescriptor},
    Config, Engine, Error, Result,
};

/// How a field is stored, and so how it converts between wire message and
/// storage record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldTy {
    /// Scalar, optional scalar or repeated scalar. Assigned as is.
    Scalar(FieldKind),

    Enum(EnumTy),

    Timestamp(TimestampTy),

    /// JSON document column
    Json(JsonSource),

    /// Related or embedded message
    Message(MessageTy),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumTy {
    /// Go identifier of the enum, e.g. `Thing_Status`
    pub ident: String,

    /// Stored by name rather than number
    pub as_string: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampTy {
    /// Go time layout when stored as text
    pub format: Option<String>,
}

/// The wire-side shape of a JSON document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonSource {
    /// `google.protobuf.Struct`
    Struct,
    String,
    Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTy {
    /// Go identifier of the message
    pub ident: String,

    /// True if the message has a storage record; embedded messages without
    /// one are stored as their wire type.
    pub ormable: bool,
}

/// Output of the type projector for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub ty: FieldTy,

    /// Go type of the record field, e.g. `pq.Int32Array`
    pub go_type: String,

    /// Column type directive, e.g. `type:integer[];`
    pub column: Option<String>,
}

const POSTGRES_ARRAYS: &[(FieldKind, &str)] = &[
    (FieldKind::Bool, "boolean[]"),
    (FieldKind::Int32, "integer[]"),
    (FieldKind::Int64, "bigint[]"),
    (FieldKind::Float, "real[]"),
    (FieldKind::Double, "double precision[]"),
    (FieldKind::String, "text[]"),
    (FieldKind::Bytes, "bytea[]"),
];

const COCKROACHDB_ARRAYS: &[(FieldKind, &str)] = &[
    (FieldKind::Bool, "bool[]"),
    (FieldKind::Int32, "int[]"),
    (FieldKind::Int64, "int[]"),
    (FieldKind::Float, "float[]"),
    (FieldKind::Double, "float[]"),
    (FieldKind::String, "string[]"),
    (FieldKind::Bytes, "bytes[]"),
];

/// Maps a field to its record type and column directive.
///
/// Rules are tried in order: timestamps, JSON documents, messages, enums,
/// then scalars. The engine only affects array column types.
pub fn project(
    file: &FileDescriptor,
    message: &MessageDescriptor,
    field: &FieldDescriptor,
    options: &FieldOptions,
    relation: Option<&Relation>,
    config: &Config,
) -> Result<Projection> {
    let unsupported = |kind: String| Error::unsupported_field_kind(&message.name, &field.name, kind);
    let invalid = |option: &str, reason: &str| {
        Error::invalid_option(&message.name, Some(field.name.as_str()), option, reason)
    };

    if field.kind == FieldKind::Group {
        return Err(unsupported(field.kind.to_string()));
    }

    if options.time_format_override.is_some() && !field.is_timestamp() {
        return Err(invalid(
            "time_format_override",
            "only applies to google.protobuf.Timestamp fields",
        ));
    }

    if options.enum_as_string.is_some() && !field.is_enum() {
        return Err(invalid("enum_as_string", "only applies to enum fields"));
    }

    if options.jsonb
        && !field.is_struct()
        && !matches!(field.kind, FieldKind::String | FieldKind::Bytes)
    {
        return Err(invalid(
            "jsonb",
            "only applies to string, bytes and google.protobuf.Struct fields",
        ));
    }

    if field.is_timestamp() {
        if field.repeated {
            return Err(unsupported("repeated google.protobuf.Timestamp".into()));
        }

        let format = options.time_format_override.clone();
        let (go_type, column) = match format {
            None => ("*time.Time", "default:now();"),
            Some(_) => ("*string", "type:text;"),
        };

        return Ok(Projection {
            ty: FieldTy::Timestamp(TimestampTy { format }),
            go_type: go_type.to_string(),
            column: Some(column.to_string()),
        });
    }

    if field.is_struct() || options.jsonb {
        if field.repeated {
            return Err(unsupported(format!("repeated json {}", type_label(field))));
        }

        let source = match field.kind {
            FieldKind::String => JsonSource::String,
            FieldKind::Bytes => JsonSource::Bytes,
            _ => JsonSource::Struct,
        };

        return Ok(Projection {
            ty: FieldTy::Json(source),
            go_type: "*pgtype.JSONB".to_string(),
            column: Some("type:jsonb;".to_string()),
        });
    }

    if field.is_message() {
        let type_name = field.type_name.as_deref().unwrap_or_default();

        let (ty, column) = match relation {
            Some(relation) => {
                let ty = MessageTy {
                    ident: relation.target().to_string(),
                    ormable: true,
                };
                (ty, None)
            }
            None => {
                let target = file
                    .go_ident(type_name)
                    .and_then(|ident| file.message(&ident))
                    .ok_or_else(|| unsupported(format!("message {type_name}")))?;

                let ty = MessageTy {
                    ident: target.name.clone(),
                    ormable: MessageOptions::resolve(target)?.ormable,
                };
                (ty, Some("type:jsonb;serializer:json;".to_string()))
            }
        };

        let elem = if ty.ormable {
            record_name(&ty.ident)
        } else {
            ty.ident.clone()
        };

        let go_type = if field.repeated {
            format!("[]*{elem}")
        } else {
            format!("*{elem}")
        };

        return Ok(Projection {
            ty: FieldTy::Message(ty),
            go_type,
            column,
        });
    }

    if field.is_enum() {
        let type_name = field.type_name.as_deref().unwrap_or_default();
        let ident = file
            .go_ident(type_name)
            .ok_or_else(|| unsupported(format!("enum {type_name}")))?;

        let as_string = options.enum_as_string.unwrap_or(!config.enums_as_ints);
        let ty = FieldTy::Enum(EnumTy { ident, as_string });

        if field.repeated {
            let (go_type, storage) = if as_string {
                ("pq.StringArray", FieldKind::String)
            } else {
                ("pq.Int32Array", FieldKind::Int32)
            };

            return Ok(Projection {
                ty,
                go_type: go_type.to_string(),
                column: array_column(config.engine, storage).map(column_type),
            });
        }

        let go_type = if as_string { "string" } else { "int" };

        return Ok(Projection {
            ty,
            go_type: pointer_if(field.optional, go_type),
            column: None,
        });
    }

    let Some(go_type) = scalar_go_type(field.kind) else {
        return Err(unsupported(field.kind.to_string()));
    };

    if field.repeated {
        let (Some(array), Some(column)) = (
            scalar_array_go_type(field.kind),
            array_column(config.engine, field.kind),
        ) else {
            return Err(unsupported(format!("repeated {}", field.kind)));
        };

        return Ok(Projection {
            ty: FieldTy::Scalar(field.kind),
            go_type: array.to_string(),
            column: Some(column_type(column)),
        });
    }

    // optional bytes keep their nil-able slice type
    let optional = field.optional && field.kind != FieldKind::Bytes;

    Ok(Projection {
        ty: FieldTy::Scalar(field.kind),
        go_type: pointer_if(optional, go_type),
        column: None,
    })
}

/// Native array column type of a scalar kind for the engine.
pub fn array_column(engine: Engine, kind: FieldKind) -> Option<&'static str> {
    let table = match engine {
        Engine::Postgres => POSTGRES_ARRAYS,
        Engine::Cockroachdb => COCKROACHDB_ARRAYS,
    };

    table
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, column)| *column)
}

fn scalar_go_type(kind: FieldKind) -> Option<&'static str> {
    Some(match kind {
        FieldKind::Bool => "bool",
        FieldKind::Int32 => "int32",
        FieldKind::Int64 => "int64",
        FieldKind::Float => "float32",
        FieldKind::Double => "float64",
        FieldKind::String => "string",
        FieldKind::Bytes => "[]byte",
        _ => return None,
    })
}

fn scalar_array_go_type(kind: FieldKind) -> Option<&'static str> {
    Some(match kind {
        FieldKind::Bool => "pq.BoolArray",
        FieldKind::Int32 => "pq.Int32Array",
        FieldKind::Int64 => "pq.Int64Array",
        FieldKind::Float => "pq.Float32Array",
        FieldKind::Double => "pq.Float64Array",
        FieldKind::String => "pq.StringArray",
        FieldKind::Bytes => "pq.ByteaArray",
        _ => return None,
    })
}

fn column_type(column: &str) -> String {
    format!("type:{column};")
}

fn pointer_if(pointer: bool, go_type: &str) -> String {
    if pointer {
        format!("*{go_type}")
    } else {
        go_type.to_string()
    }
}

fn type_label(field: &FieldDescriptor) -> String {
    match &field.type_name {
        Some(type_name) => type_name.trim_start_matches('.').to_string(),
        None => field.kind.to_string(),
    }
}
