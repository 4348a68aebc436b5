use super::{go_string, Expand, GoImport, Writer};

use crate::schema::{Model, ModelField};

use std_util::str;

impl Expand<'_> {
    pub(super) fn expand_record_struct(&self, model: &Model, w: &mut Writer) {
        let name = &model.name;

        w.blank();
        match &model.comments {
            Some(comments) => w.comment(comments),
            None => w.line(format!(
                "// {} is the storage record of {}.",
                name.record, name.message
            )),
        }

        w.block(format!("type {} struct", name.record), |w| {
            for field in &model.fields {
                if let Some(belongs_to) = field.shadow_id_field() {
                    let gorm = if belongs_to.references == "Id" {
                        "gorm:\"type:uuid;\" "
                    } else {
                        ""
                    };

                    w.line(format!(
                        "{} *string `{gorm}json:\"{}\"`",
                        belongs_to.foreign_key,
                        str::lower_camel_case(&belongs_to.foreign_key)
                    ));
                }

                if let Some(comments) = &field.comments {
                    w.comment(comments);
                }

                self.import_for_type(&field.go_type);
                w.line(format!(
                    "{} {} `{}`",
                    field.go_name,
                    field.go_type,
                    struct_tag(field)
                ));
            }
        });
    }

    /// `TableName` and `GetModelId`.
    pub(super) fn expand_record_methods(&self, model: &Model, w: &mut Writer) {
        let name = &model.name;
        let pk = &model.primary_key;

        w.blank();
        w.block(format!("func (m *{}) TableName() string", name.record), |w| {
            w.line(format!("return {}", go_string(&model.table_name)));
        });

        w.blank();
        w.block(format!("func (m *{}) GetModelId() string", name.record), |w| {
            w.block("if m == nil", |w| w.line("return \"\""));

            if pk.optional {
                self.import(GoImport::Lo);
                w.line(format!("return lo.FromPtr(m.{})", pk.go_name));
            } else {
                w.line(format!("return m.{}", pk.go_name));
            }
        });
    }

    /// `GetProtoId` and `SetProtoId` on the wire message.
    pub(super) fn expand_proto_methods(&self, model: &Model, w: &mut Writer) {
        let name = &model.name;
        let pk = &model.primary_key;

        w.blank();
        w.block(format!("func (m *{}) GetProtoId() *string", name.message), |w| {
            if pk.optional {
                w.block("if m == nil", |w| w.line("return nil"));
                w.line(format!("return m.{}", pk.go_name));
            } else {
                w.block(format!("if m == nil || m.{} == \"\"", pk.go_name), |w| {
                    w.line("return nil")
                });
                w.line(format!("return &m.{}", pk.go_name));
            }
        });

        w.blank();
        w.block(format!("func (m *{}) SetProtoId(id string)", name.message), |w| {
            if pk.optional {
                w.line(format!("m.{} = &id", pk.go_name));
            } else {
                w.line(format!("m.{} = id", pk.go_name));
            }
        });
    }

    /// `<Msg>Protos` / `<Msg>GormModels` and their conversions.
    pub(super) fn expand_slice_types(&self, model: &Model, w: &mut Writer) {
        let name = &model.name;

        w.blank();
        w.line(format!("type {} []*{}", name.protos, name.message));

        w.blank();
        w.line(format!("type {} []*{}", name.records, name.record));

        w.blank();
        w.block(
            format!("func (p {}) ToModels() ({}, error)", name.protos, name.records),
            |w| {
                w.line(format!(
                    "return ToModels[*{}, *{}](p)",
                    name.message, name.record
                ));
            },
        );

        w.blank();
        w.block(
            format!("func (m {}) ToProtos() ({}, error)", name.records, name.protos),
            |w| {
                w.line(format!(
                    "return ToProtos[*{}, *{}](m)",
                    name.record, name.message
                ));
            },
        );
    }

    fn import_for_type(&self, go_type: &str) {
        let go_type = go_type.trim_start_matches(&['*', '[', ']'][..]);

        if go_type.starts_with("pq.") {
            self.import(GoImport::Pq);
        } else if go_type.starts_with("time.") {
            self.import(GoImport::Time);
        } else if go_type.starts_with("pgtype.") {
            self.import(GoImport::Pgtype);
        }
    }
}

/// `gorm:"..." json:"..."`, dropping an empty `gorm` part.
fn struct_tag(field: &ModelField) -> String {
    if field.tag.is_empty() {
        format!("json:\"{}\"", field.json_name)
    } else {
        format!("gorm:\"{}\" json:\"{}\"", field.tag, field.json_name)
    }
}
