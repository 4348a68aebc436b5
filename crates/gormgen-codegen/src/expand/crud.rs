use super::{go_string, Expand, GoImport, Writer};

use crate::schema::Model;

impl Expand<'_> {
    pub(super) fn expand_upsert(&self, model: &Model, w: &mut Writer) {
        let name = &model.name;
        self.import_batch();

        let omit = model
            .omit
            .iter()
            .map(|field| format!(", {}", go_string(field)))
            .collect::<String>();

        w.blank();
        w.line("// Upsert writes the messages and returns the stored records, in input order.");
        w.block(
            format!(
                "func (p {}) Upsert(ctx context.Context, db *gorm.DB) ({}, error)",
                name.protos, name.records
            ),
            |w| {
                w.line(format!(
                    "return Upsert[*{}, *{}](ctx, db, p{omit})",
                    name.message, name.record
                ));
            },
        );
    }

    pub(super) fn expand_list(&self, model: &Model, w: &mut Writer) {
        let name = &model.name;
        self.import_batch();

        w.blank();
        w.block(
            format!(
                "func (p *{}) List(ctx context.Context, db *gorm.DB, limit, offset int, orderBy string, preloads ...string) error",
                name.protos
            ),
            |w| {
                w.line(format!(
                    "models, err := List[*{}](ctx, db, limit, offset, orderBy, preloads...)",
                    name.record
                ));
                w.return_on_err("err");
                self.assign_protos(model, w);
            },
        );
    }

    pub(super) fn expand_get_by_ids(&self, model: &Model, w: &mut Writer) {
        let name = &model.name;
        self.import_batch();

        w.blank();
        w.block(
            format!(
                "func (p *{}) GetByIds(ctx context.Context, db *gorm.DB, ids []string, preloads ...string) error",
                name.protos
            ),
            |w| {
                w.line(format!(
                    "models, err := GetByIds[*{}](ctx, db, ids, preloads...)",
                    name.record
                ));
                w.return_on_err("err");
                self.assign_protos(model, w);
            },
        );
    }

    pub(super) fn expand_delete(&self, model: &Model, w: &mut Writer) {
        let name = &model.name;
        self.import_batch();

        w.blank();
        w.block(
            format!(
                "func Delete{}s(ctx context.Context, db *gorm.DB, ids []string) error",
                name.record
            ),
            |w| w.line(format!("return Delete[*{}](ctx, db, ids)", name.record)),
        );
    }

    /// Has-one, has-many and many-to-many fields are not written by
    /// `Upsert`; this replaces each association with the record's value.
    pub(super) fn expand_replace_associations(&self, model: &Model, w: &mut Writer) {
        let name = &model.name;
        self.import_batch();

        w.blank();
        w.block(
            format!(
                "func (m {}) ReplaceAssociations(ctx context.Context, db *gorm.DB) error",
                name.records
            ),
            |w| {
                if !model.has_replace_relationships {
                    w.line("return nil");
                    return;
                }

                w.block("if len(m) == 0", |w| w.line("return nil"));

                self.transaction(w, "return", |w| {
                    w.block("for _, model := range m", |w| {
                        for field in &model.fields {
                            let Some(relation) = &field.relation else {
                                continue;
                            };

                            if !relation.needs_replace() {
                                continue;
                            }

                            let f = &field.go_name;
                            let present = if field.repeated {
                                format!("len(model.{f}) > 0")
                            } else {
                                format!("model.{f} != nil")
                            };

                            let association = format!("tx.Model(model).Association({})", go_string(f));

                            w.line(format!("if {present} {{"));
                            w.indented(|w| {
                                w.block(
                                    format!("if err := {association}.Replace(model.{f}); err != nil"),
                                    |w| w.line("return err"),
                                );
                            });
                            w.line(format!("}} else if err := {association}.Clear(); err != nil {{"));
                            w.indented(|w| w.line("return err"));
                            w.line("}");
                        }
                    });

                    w.line("return nil");
                });
            },
        );
    }

    fn import_batch(&self) {
        self.import(GoImport::Context);
        self.import(GoImport::Gorm);
    }

    /// Converts `models` and stores them in `*p`.
    fn assign_protos(&self, model: &Model, w: &mut Writer) {
        w.line(format!(
            "protos, err := {}(models).ToProtos()",
            model.name.records
        ));
        w.return_on_err("err");
        w.line("*p = protos");
        w.line("return nil");
    }
}
