use super::{go_string, Expand, GoImport, Writer};

use crate::schema::{EnumTy, FieldTy, JsonSource, Model, ModelField, Name};

/// Which way a conversion goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Storage record to wire message: `ToProto`
    ToProto,

    /// Wire message to storage record: `ToModel`
    ToModel,
}

impl Direction {
    /// Variable holding the value being built.
    fn target(self) -> &'static str {
        match self {
            Direction::ToProto => "theProto",
            Direction::ToModel => "theModel",
        }
    }
}

impl Expand<'_> {
    pub(super) fn expand_to_proto(&self, model: &Model, w: &mut Writer) {
        let name = &model.name;

        w.blank();
        w.block(
            format!(
                "func (m *{}) ToProto() (*{}, error)",
                name.record, name.message
            ),
            |w| {
                w.block("if m == nil", |w| w.line("return nil, nil"));
                w.line(format!("theProto := &{}{{}}", name.message));

                for field in &model.fields {
                    self.expand_field_conversion(field, Direction::ToProto, w);
                }

                w.line("return theProto, nil");
            },
        );
    }

    pub(super) fn expand_to_model(&self, model: &Model, w: &mut Writer) {
        let name = &model.name;

        w.blank();
        w.block(
            format!(
                "func (m *{}) ToModel() (*{}, error)",
                name.message, name.record
            ),
            |w| {
                w.block("if m == nil", |w| w.line("return nil, nil"));
                w.line(format!("theModel := &{}{{}}", name.record));

                for field in &model.fields {
                    self.expand_field_conversion(field, Direction::ToModel, w);

                    if let Some(belongs_to) = field.shadow_id_field() {
                        self.import(GoImport::Lo);
                        w.block(
                            format!(
                                "if id := m.{}.Get{}(); id != \"\"",
                                field.go_name, belongs_to.references
                            ),
                            |w| {
                                w.line(format!(
                                    "theModel.{} = lo.ToPtr(id)",
                                    belongs_to.foreign_key
                                ))
                            },
                        );
                    }
                }

                w.line("return theModel, nil");
            },
        );
    }

    fn expand_field_conversion(&self, field: &ModelField, dir: Direction, w: &mut Writer) {
        let f = &field.go_name;
        let target = dir.target();

        match &field.ty {
            FieldTy::Scalar(_) => {
                w.line(format!("{target}.{f} = m.{f}"));
            }
            FieldTy::Enum(ty) => self.expand_enum_conversion(field, ty, dir, w),
            FieldTy::Timestamp(ty) => {
                self.import(GoImport::Timestamppb);

                w.block(format!("if m.{f} != nil"), |w| match (dir, &ty.format) {
                    (Direction::ToProto, None) => {
                        w.line(format!("theProto.{f} = timestamppb.New(*m.{f})"));
                    }
                    (Direction::ToProto, Some(format)) => {
                        self.import(GoImport::Time);
                        w.line(format!("t, err := time.Parse({}, *m.{f})", go_string(format)));
                        w.return_on_err("nil, err");
                        w.line(format!("theProto.{f} = timestamppb.New(t)"));
                    }
                    (Direction::ToModel, None) => {
                        self.import(GoImport::Lo);
                        w.line(format!("theModel.{f} = lo.ToPtr(m.{f}.AsTime())"));
                    }
                    (Direction::ToModel, Some(format)) => {
                        self.import(GoImport::Lo);
                        w.line(format!(
                            "theModel.{f} = lo.ToPtr(m.{f}.AsTime().Format({}))",
                            go_string(format)
                        ));
                    }
                });
            }
            FieldTy::Json(source) => self.expand_json_conversion(field, *source, dir, w),
            FieldTy::Message(ty) if !ty.ormable => {
                // embedded wire type, stored as is
                w.line(format!("{target}.{f} = m.{f}"));
            }
            FieldTy::Message(ty) => {
                let name = Name::new(&ty.ident);

                let (guard, convert) = match (dir, field.repeated) {
                    (Direction::ToProto, false) => ("m.{f} != nil", format!("m.{f}.ToProto()")),
                    (Direction::ToModel, false) => ("m.{f} != nil", format!("m.{f}.ToModel()")),
                    (Direction::ToProto, true) => (
                        "len(m.{f}) > 0",
                        format!("{}(m.{f}).ToProtos()", name.records),
                    ),
                    (Direction::ToModel, true) => (
                        "len(m.{f}) > 0",
                        format!("{}(m.{f}).ToModels()", name.protos),
                    ),
                };

                w.block(format!("if {}", guard.replace("{f}", f)), |w| {
                    w.line(format!("converted, err := {convert}"));
                    w.return_on_err("nil, err");
                    w.line(format!("{target}.{f} = converted"));
                });
            }
        }
    }

    fn expand_enum_conversion(&self, field: &ModelField, ty: &EnumTy, dir: Direction, w: &mut Writer) {
        let f = &field.go_name;
        let e = &ty.ident;

        if field.repeated {
            self.import(GoImport::Lo);

            let mapper = match (dir, ty.as_string) {
                (Direction::ToProto, false) => format!("func(v int32, _ int) {e} {{ return {e}(v) }}"),
                (Direction::ToProto, true) => {
                    format!("func(v string, _ int) {e} {{ return {e}({e}_value[v]) }}")
                }
                (Direction::ToModel, false) => format!("func(v {e}, _ int) int32 {{ return int32(v) }}"),
                (Direction::ToModel, true) => format!("func(v {e}, _ int) string {{ return v.String() }}"),
            };

            w.line(format!("{}.{f} = lo.Map(m.{f}, {mapper})", dir.target()));
            return;
        }

        // value expression over `v`, the source field's value
        let convert = |v: &str| match (dir, ty.as_string) {
            (Direction::ToProto, false) => format!("{e}({v})"),
            (Direction::ToProto, true) => format!("{e}({e}_value[{v}])"),
            (Direction::ToModel, false) => format!("int({v})"),
            (Direction::ToModel, true) if field.optional => format!("({v}).String()"),
            (Direction::ToModel, true) => format!("{v}.String()"),
        };

        if field.optional {
            self.import(GoImport::Lo);
            w.block(format!("if m.{f} != nil"), |w| {
                w.line(format!(
                    "{}.{f} = lo.ToPtr({})",
                    dir.target(),
                    convert(&format!("*m.{f}"))
                ));
            });
        } else {
            w.line(format!("{}.{f} = {}", dir.target(), convert(&format!("m.{f}"))));
        }
    }

    fn expand_json_conversion(&self, field: &ModelField, source: JsonSource, dir: Direction, w: &mut Writer) {
        let f = &field.go_name;

        match dir {
            Direction::ToProto => {
                w.block(format!("if m.{f} != nil"), |w| match source {
                    JsonSource::Struct => {
                        self.import(GoImport::Structpb);
                        self.import(GoImport::Protojson);
                        w.line(format!("theProto.{f} = &structpb.Struct{{}}"));
                        w.block(
                            format!("if err := protojson.Unmarshal(m.{f}.Bytes, theProto.{f}); err != nil"),
                            |w| w.line("return nil, err"),
                        );
                    }
                    JsonSource::String if field.optional => {
                        self.import(GoImport::Lo);
                        w.line(format!("theProto.{f} = lo.ToPtr(string(m.{f}.Bytes))"));
                    }
                    JsonSource::String => {
                        w.line(format!("theProto.{f} = string(m.{f}.Bytes)"));
                    }
                    JsonSource::Bytes => {
                        w.line(format!("theProto.{f} = m.{f}.Bytes"));
                    }
                });
            }
            Direction::ToModel => {
                self.import(GoImport::Pgtype);

                let (guard, bytes) = match source {
                    JsonSource::Struct => (format!("m.{f} != nil"), "bytes".to_string()),
                    JsonSource::String if field.optional => {
                        (format!("m.{f} != nil"), format!("[]byte(*m.{f})"))
                    }
                    JsonSource::String => (format!("m.{f} != \"\""), format!("[]byte(m.{f})")),
                    JsonSource::Bytes => (format!("len(m.{f}) > 0"), format!("m.{f}")),
                };

                w.block(format!("if {guard}"), |w| {
                    if source == JsonSource::Struct {
                        self.import(GoImport::Protojson);
                        w.line(format!("bytes, err := protojson.Marshal(m.{f})"));
                        w.return_on_err("nil, err");
                    }

                    w.line(format!(
                        "theModel.{f} = &pgtype.JSONB{{Bytes: {bytes}, Status: pgtype.Present}}"
                    ));
                });
            }
        }
    }
}
