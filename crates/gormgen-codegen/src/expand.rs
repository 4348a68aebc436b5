mod convert;
mod crud;
mod generics;
mod model;
mod writer;

use writer::{GoImport, Imports, Writer};

use crate::schema::{Model, Schema};

use gormgen_core::Config;
use std::cell::RefCell;

struct Expand<'a> {
    /// The file being expanded
    schema: &'a Schema,

    config: &'a Config,

    /// Packages referenced so far
    imports: RefCell<Imports>,
}

impl Expand<'_> {
    fn import(&self, import: GoImport) {
        self.imports.borrow_mut().add(import);
    }

    /// Per-model unit: record, conversions, then batch operations.
    fn expand_model(&self, model: &Model, w: &mut Writer) {
        self.expand_record_struct(model, w);
        self.expand_record_methods(model, w);
        self.expand_to_proto(model, w);
        self.expand_to_model(model, w);
        self.expand_proto_methods(model, w);
        self.expand_slice_types(model, w);
        self.expand_upsert(model, w);
        self.expand_list(model, w);
        self.expand_get_by_ids(model, w);
        self.expand_delete(model, w);
        self.expand_replace_associations(model, w);
    }

    /// Opens a call to the file's `transaction` helper. `prefix` is written
    /// before the call, e.g. `return`.
    fn transaction(&self, w: &mut Writer, prefix: &str, body: impl FnOnce(&mut Writer)) {
        w.block_with(
            format!("{prefix} transaction(ctx, db, func(tx *gorm.DB) error"),
            "})",
            body,
        );
    }
}

/// Renders the Go source of one file.
pub(crate) fn file(schema: &Schema, config: &Config) -> String {
    let expand = Expand {
        schema,
        config,
        imports: RefCell::default(),
    };

    let mut body = Writer::new();

    for model in &schema.models {
        expand.expand_model(model, &mut body);
    }

    expand.expand_generics(&mut body);

    let mut out = Writer::new();
    out.line("// Code generated by gormgen. DO NOT EDIT.");
    out.line(format!("// source: {}", schema.source));
    out.line(format!("// engine: {}", config.engine.name()));
    out.blank();
    out.line(format!("package {}", schema.package));
    out.blank();
    expand.imports.borrow().write(&mut out);

    let mut source = out.into_string();
    source.push_str(&body.into_string());
    source
}

/// A Go interpreted string literal.
fn go_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');

    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }

    out.push('"');
    out
}
