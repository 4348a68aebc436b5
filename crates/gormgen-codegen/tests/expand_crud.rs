mod support;

use gormgen_core::{descriptor::Options, Config, Engine};
use pretty_assertions::assert_eq;
use std_util::prelude::*;
use support::*;

fn owner_with_things() -> Vec<gormgen_core::descriptor::MessageDescriptor> {
    vec![
        ormable(
            "Owner",
            vec![
                id(),
                relation(
                    repeated(message_field("things", "Thing")),
                    "has_many",
                    Options::new(),
                ),
                relation(message_field("profile", "Profile"), "has_one", Options::new()),
            ],
        ),
        ormable("Thing", vec![id(), optional(string("owner_id"))]),
        ormable("Profile", vec![id(), optional(string("owner_id"))]),
    ]
}

#[test]
fn upsert_omits_relation_fields() {
    let source = assert_ok!(expand(owner_with_things(), &Config::default()));

    assert_eq!(
        declaration(&source, "func (p OwnerProtos) Upsert("),
        "\
func (p OwnerProtos) Upsert(ctx context.Context, db *gorm.DB) (OwnerGormModels, error) {
\treturn Upsert[*Owner, *OwnerGormModel](ctx, db, p, \"Things\", \"Profile\")
}
"
    );
    assert!(source.contains(
        "\treturn Upsert[*Thing, *ThingGormModel](ctx, db, p)\n"
    ));
}

#[test]
fn list_and_get_by_ids_fill_the_receiver() {
    let source = assert_ok!(expand(owner_with_things(), &Config::default()));

    assert_eq!(
        declaration(&source, "func (p *ThingProtos) List("),
        "\
func (p *ThingProtos) List(ctx context.Context, db *gorm.DB, limit, offset int, orderBy string, preloads ...string) error {
\tmodels, err := List[*ThingGormModel](ctx, db, limit, offset, orderBy, preloads...)
\tif err != nil {
\t\treturn err
\t}
\tprotos, err := ThingGormModels(models).ToProtos()
\tif err != nil {
\t\treturn err
\t}
\t*p = protos
\treturn nil
}
"
    );
    assert!(declaration(&source, "func (p *ThingProtos) GetByIds(").contains(
        "\tmodels, err := GetByIds[*ThingGormModel](ctx, db, ids, preloads...)\n"
    ));
}

#[test]
fn delete() {
    let source = assert_ok!(expand(owner_with_things(), &Config::default()));

    assert_eq!(
        declaration(&source, "func DeleteThingGormModels("),
        "\
func DeleteThingGormModels(ctx context.Context, db *gorm.DB, ids []string) error {
\treturn Delete[*ThingGormModel](ctx, db, ids)
}
"
    );
}

#[test]
fn replace_associations() {
    let source = assert_ok!(expand(owner_with_things(), &Config::default()));

    assert_eq!(
        declaration(&source, "func (m OwnerGormModels) ReplaceAssociations("),
        "\
func (m OwnerGormModels) ReplaceAssociations(ctx context.Context, db *gorm.DB) error {
\tif len(m) == 0 {
\t\treturn nil
\t}
\treturn transaction(ctx, db, func(tx *gorm.DB) error {
\t\tfor _, model := range m {
\t\t\tif len(model.Things) > 0 {
\t\t\t\tif err := tx.Model(model).Association(\"Things\").Replace(model.Things); err != nil {
\t\t\t\t\treturn err
\t\t\t\t}
\t\t\t} else if err := tx.Model(model).Association(\"Things\").Clear(); err != nil {
\t\t\t\treturn err
\t\t\t}
\t\t\tif model.Profile != nil {
\t\t\t\tif err := tx.Model(model).Association(\"Profile\").Replace(model.Profile); err != nil {
\t\t\t\t\treturn err
\t\t\t\t}
\t\t\t} else if err := tx.Model(model).Association(\"Profile\").Clear(); err != nil {
\t\t\t\treturn err
\t\t\t}
\t\t}
\t\treturn nil
\t})
}
"
    );

    // no has-one, has-many or many-to-many: nothing to replace
    assert_eq!(
        declaration(&source, "func (m ThingGormModels) ReplaceAssociations("),
        "\
func (m ThingGormModels) ReplaceAssociations(ctx context.Context, db *gorm.DB) error {
\treturn nil
}
"
    );
}

#[test]
fn belongs_to_is_not_replaced() {
    let source = assert_ok!(expand(
        owner_and_thing(vec![relation(
            message_field("owner", "Owner"),
            "belongs_to",
            Options::new(),
        )]),
        &Config::default(),
    ));

    assert_eq!(
        declaration(&source, "func (m ThingGormModels) ReplaceAssociations("),
        "func (m ThingGormModels) ReplaceAssociations(ctx context.Context, db *gorm.DB) error {\n\treturn nil\n}\n"
    );
}

#[test]
fn transaction_helper_per_engine() {
    let messages = || vec![ormable("Thing", vec![id()])];

    let postgres = assert_ok!(expand(messages(), &Config::default()));
    assert_eq!(
        declaration(&postgres, "func transaction("),
        "\
func transaction(ctx context.Context, db *gorm.DB, fn func(tx *gorm.DB) error) error {
\treturn db.WithContext(ctx).Transaction(fn)
}
"
    );
    assert!(!postgres.contains("crdbgorm"));

    let cockroach = assert_ok!(expand(
        messages(),
        &Config::default().engine(Engine::Cockroachdb),
    ));
    assert!(cockroach.contains("// engine: cockroachdb\n"));
    assert!(cockroach.contains(
        "\tcrdbgorm \"github.com/cockroachdb/cockroach-go/v2/crdb/crdbgorm\"\n"
    ));
    assert!(declaration(&cockroach, "func transaction(")
        .contains("\treturn crdbgorm.ExecuteTx(ctx, db, nil, fn)\n"));
}

#[test]
fn constraints_list_every_model() {
    let source = assert_ok!(expand(owner_with_things(), &Config::default()));

    assert_eq!(
        declaration(&source, "type Protos interface"),
        "type Protos interface {\n\t*Owner | *Thing | *Profile\n}\n"
    );
    assert_eq!(
        declaration(&source, "type Models interface"),
        "\
type Models interface {
\t*OwnerGormModel | *ThingGormModel | *ProfileGormModel
\tGetModelId() string
}
"
    );
}

#[test]
fn generic_upsert() {
    let source = assert_ok!(expand(owner_with_things(), &Config::default()));
    let upsert = declaration(&source, "func Upsert[P Proto[M], M Models](");

    for line in [
        "\t\t\tp.SetProtoId(uuid.New().String())\n",
        "\tmodels, err := ToModels[P, M](protos)\n",
        "\terr = transaction(ctx, db, func(tx *gorm.DB) error {\n",
        "\t\tsession := tx.Clauses(clause.OnConflict{UpdateAll: true})\n",
        "\t\t\tsession = session.Omit(omit...)\n",
        "\t\treturn tx.Where(\"id in ?\", ids).Find(&upserted).Error\n",
        "\treturn orderByIds(upserted, ids), nil\n",
    ] {
        assert!(upsert.contains(line), "missing {line:?} in\n{upsert}");
    }
}

#[test]
fn many_to_many_helpers_only_when_needed() {
    let without = assert_ok!(expand(owner_with_things(), &Config::default()));
    assert!(!without.contains("ManyToManyAssociations"));

    let with = assert_ok!(expand(
        vec![
            ormable(
                "User",
                vec![
                    id(),
                    relation(
                        repeated(message_field("companies", "Company")),
                        "many_to_many",
                        Options::new(),
                    ),
                ],
            ),
            ormable("Company", vec![id()]),
        ],
        &Config::default(),
    ));

    assert!(with.contains("\ntype ManyToManyAssociations[L Models, R Models] map[L][]R\n"));
    for (func, method) in [
        ("AssociateManyToMany", "Append"),
        ("DissociateManyToMany", "Delete"),
        ("ReplaceManyToMany", "Replace"),
    ] {
        let helper = declaration(&with, &format!("func {func}["));
        assert!(
            helper.contains(&format!(
                "if err := tx.Model(model).Association(name).{method}(related); err != nil {{"
            )),
            "{helper}"
        );
    }
}
