use gormgen_core::descriptor::{DescriptorSet, FieldKind, OptionValue};
use pretty_assertions::assert_eq;

const REQUEST: &str = r#"{
    "files_to_generate": ["demo/example.proto"],
    "files": [
        {
            "name": "google/protobuf/timestamp.proto",
            "package": "google.protobuf",
            "messages": [{ "name": "Timestamp" }]
        },
        {
            "name": "demo/example.proto",
            "package": "example",
            "go_package": "github.com/acme/demo;example",
            "options": { "generate": true },
            "messages": [
                {
                    "name": "User",
                    "options": { "ormable": true, "table": "app_users" },
                    "fields": [
                        { "name": "id", "kind": "string", "optional": true },
                        { "name": "tags", "kind": "string", "repeated": true },
                        {
                            "name": "company",
                            "kind": "message",
                            "type_name": ".example.Company",
                            "options": { "belongs_to": { "foreign_key": "EmployerId" } }
                        },
                        { "name": "score", "kind": "int64", "options": { "weight": 3 } }
                    ]
                }
            ]
        }
    ]
}"#;

#[test]
fn decode_descriptor_set() {
    let set: DescriptorSet = serde_json::from_str(REQUEST).unwrap();

    let generated: Vec<_> = set.files_to_generate().map(|f| f.name.as_str()).collect();
    assert_eq!(generated, ["demo/example.proto"]);

    let file = set.files_to_generate().next().unwrap();
    assert_eq!(file.go_package_name(), "example");
    assert_eq!(file.options.get("generate"), Some(&OptionValue::Bool(true)));

    let user = file.message("User").unwrap();
    assert_eq!(user.options.get("ormable"), Some(&OptionValue::Bool(true)));
    assert_eq!(
        user.options.get("table").and_then(OptionValue::as_str),
        Some("app_users")
    );

    let kinds: Vec<_> = user.fields.iter().map(|f| (f.kind, f.repeated)).collect();
    assert_eq!(
        kinds,
        [
            (FieldKind::String, false),
            (FieldKind::String, true),
            (FieldKind::Message, false),
            (FieldKind::Int64, false),
        ]
    );

    let belongs_to = user.fields[2]
        .options
        .get("belongs_to")
        .and_then(OptionValue::as_message)
        .unwrap();
    assert_eq!(
        belongs_to.get("foreign_key").and_then(OptionValue::as_str),
        Some("EmployerId")
    );
    assert_eq!(user.fields[3].options.get("weight"), Some(&OptionValue::Int(3)));
}

#[test]
fn empty_files_to_generate_means_all() {
    let set: DescriptorSet = serde_json::from_str(
        r#"{ "files": [{ "name": "a.proto" }, { "name": "b.proto" }] }"#,
    )
    .unwrap();

    assert_eq!(set.files_to_generate().count(), 2);
}

#[test]
fn lookup_field_by_go_name() {
    let set: DescriptorSet = serde_json::from_str(REQUEST).unwrap();
    let user = set.files[1].message("User").unwrap();

    assert_eq!(user.field_by_go_name("Company").map(|f| f.name.as_str()), Some("company"));
    assert!(user.field_by_go_name("company").is_none());
}
