mod support;

use gormgen_core::{
    descriptor::{FieldDescriptor, FieldKind, Options},
    Config,
};
use pretty_assertions::assert_eq;
use std_util::prelude::*;
use support::*;

fn expand_thing(fields: Vec<FieldDescriptor>) -> String {
    assert_ok!(expand(owner_and_thing(fields), &Config::default()))
}

fn to_proto(source: &str) -> &str {
    declaration(source, "func (m *ThingGormModel) ToProto()")
}

fn to_model(source: &str) -> &str {
    declaration(source, "func (m *Thing) ToModel()")
}

#[test]
fn scalars_enums_and_timestamps() {
    let source = expand_thing(vec![
        enum_field("status", "Thing_Status"),
        timestamp("created_at"),
    ]);

    assert_eq!(
        to_proto(&source),
        "\
func (m *ThingGormModel) ToProto() (*Thing, error) {
\tif m == nil {
\t\treturn nil, nil
\t}
\ttheProto := &Thing{}
\ttheProto.Id = m.Id
\ttheProto.Status = Thing_Status(m.Status)
\tif m.CreatedAt != nil {
\t\ttheProto.CreatedAt = timestamppb.New(*m.CreatedAt)
\t}
\treturn theProto, nil
}
"
    );

    assert_eq!(
        to_model(&source),
        "\
func (m *Thing) ToModel() (*ThingGormModel, error) {
\tif m == nil {
\t\treturn nil, nil
\t}
\ttheModel := &ThingGormModel{}
\ttheModel.Id = m.Id
\ttheModel.Status = int(m.Status)
\tif m.CreatedAt != nil {
\t\ttheModel.CreatedAt = lo.ToPtr(m.CreatedAt.AsTime())
\t}
\treturn theModel, nil
}
"
    );
}

#[test]
fn string_enums() {
    let source = expand_thing(vec![
        with_options(
            enum_field("status", "Thing_Status"),
            Options::new().with("enum_as_string", true),
        ),
        optional(with_options(
            enum_field("level", "Level"),
            Options::new().with("enum_as_string", true),
        )),
        repeated(enum_field("flags", "Flag")),
        repeated(with_options(
            enum_field("labels", "Label"),
            Options::new().with("enum_as_string", true),
        )),
    ]);

    let to_proto = to_proto(&source);
    assert!(to_proto.contains("\ttheProto.Status = Thing_Status(Thing_Status_value[m.Status])\n"));
    assert!(to_proto.contains("\t\ttheProto.Level = lo.ToPtr(Level(Level_value[*m.Level]))\n"));
    assert!(to_proto.contains(
        "\ttheProto.Flags = lo.Map(m.Flags, func(v int32, _ int) Flag { return Flag(v) })\n"
    ));
    assert!(to_proto.contains(
        "\ttheProto.Labels = lo.Map(m.Labels, func(v string, _ int) Label { return Label(Label_value[v]) })\n"
    ));

    let to_model = to_model(&source);
    assert!(to_model.contains("\ttheModel.Status = m.Status.String()\n"));
    assert!(to_model.contains("\t\ttheModel.Level = lo.ToPtr((*m.Level).String())\n"));
    assert!(to_model.contains(
        "\ttheModel.Flags = lo.Map(m.Flags, func(v Flag, _ int) int32 { return int32(v) })\n"
    ));
    assert!(to_model.contains(
        "\ttheModel.Labels = lo.Map(m.Labels, func(v Label, _ int) string { return v.String() })\n"
    ));
}

#[test]
fn formatted_timestamps_parse_and_format_with_the_layout() {
    let source = expand_thing(vec![with_options(
        timestamp("due_on"),
        Options::new().with("time_format_override", "2006-01-02"),
    )]);

    assert!(to_proto(&source).contains(
        "\
\tif m.DueOn != nil {
\t\tt, err := time.Parse(\"2006-01-02\", *m.DueOn)
\t\tif err != nil {
\t\t\treturn nil, err
\t\t}
\t\ttheProto.DueOn = timestamppb.New(t)
\t}
"
    ));
    assert!(to_model(&source).contains(
        "\t\ttheModel.DueOn = lo.ToPtr(m.DueOn.AsTime().Format(\"2006-01-02\"))\n"
    ));
}

#[test]
fn json_documents() {
    let source = expand_thing(vec![
        structure("payload"),
        with_options(string("raw"), Options::new().with("jsonb", true)),
        with_options(field("blob", FieldKind::Bytes), Options::new().with("jsonb", true)),
    ]);

    let to_proto = to_proto(&source);
    assert!(to_proto.contains(
        "\
\tif m.Payload != nil {
\t\ttheProto.Payload = &structpb.Struct{}
\t\tif err := protojson.Unmarshal(m.Payload.Bytes, theProto.Payload); err != nil {
\t\t\treturn nil, err
\t\t}
\t}
"
    ));
    assert!(to_proto.contains("\t\ttheProto.Raw = string(m.Raw.Bytes)\n"));
    assert!(to_proto.contains("\t\ttheProto.Blob = m.Blob.Bytes\n"));

    let to_model = to_model(&source);
    assert!(to_model.contains(
        "\
\tif m.Payload != nil {
\t\tbytes, err := protojson.Marshal(m.Payload)
\t\tif err != nil {
\t\t\treturn nil, err
\t\t}
\t\ttheModel.Payload = &pgtype.JSONB{Bytes: bytes, Status: pgtype.Present}
\t}
"
    ));
    assert!(to_model.contains(
        "\
\tif m.Raw != \"\" {
\t\ttheModel.Raw = &pgtype.JSONB{Bytes: []byte(m.Raw), Status: pgtype.Present}
\t}
"
    ));
    assert!(to_model.contains("\tif len(m.Blob) > 0 {\n"));
}

#[test]
fn relations_convert_through_the_related_model() {
    let messages = vec![
        ormable(
            "Owner",
            vec![
                id(),
                relation(
                    repeated(message_field("things", "Thing")),
                    "has_many",
                    Options::new(),
                ),
            ],
        ),
        ormable(
            "Thing",
            vec![
                id(),
                relation(message_field("owner", "Owner"), "belongs_to", Options::new()),
            ],
        ),
    ];
    let source = assert_ok!(expand(messages, &Config::default()));

    assert!(to_proto(&source).contains(
        "\
\tif m.Owner != nil {
\t\tconverted, err := m.Owner.ToProto()
\t\tif err != nil {
\t\t\treturn nil, err
\t\t}
\t\ttheProto.Owner = converted
\t}
"
    ));

    // the shadow key is filled from the related message's id
    assert!(to_model(&source).contains(
        "\
\t\ttheModel.Owner = converted
\t}
\tif id := m.Owner.GetId(); id != \"\" {
\t\ttheModel.OwnerId = lo.ToPtr(id)
\t}
"
    ));

    let owner_to_proto = declaration(&source, "func (m *OwnerGormModel) ToProto()");
    assert!(owner_to_proto.contains("\t\tconverted, err := ThingGormModels(m.Things).ToProtos()\n"));

    let owner_to_model = declaration(&source, "func (m *Owner) ToModel()");
    assert!(owner_to_model.contains("\tif len(m.Things) > 0 {\n"));
    assert!(owner_to_model.contains("\t\tconverted, err := ThingProtos(m.Things).ToModels()\n"));
}

#[test]
fn embedded_messages_are_copied() {
    let messages = vec![
        message("Address", vec![string("street")]),
        ormable("Thing", vec![id(), message_field("address", "Address")]),
    ];
    let source = assert_ok!(expand(messages, &Config::default()));

    assert!(to_proto(&source).contains("\ttheProto.Address = m.Address\n"));
    assert!(to_model(&source).contains("\ttheModel.Address = m.Address\n"));
}
