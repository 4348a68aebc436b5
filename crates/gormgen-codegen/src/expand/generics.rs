use super::{Expand, GoImport, Writer};

use gormgen_core::Engine;

impl Expand<'_> {
    /// The helpers every model's batch operations delegate to. Written once
    /// per file, after the models.
    pub(super) fn expand_generics(&self, w: &mut Writer) {
        self.import(GoImport::Context);
        self.import(GoImport::Gorm);

        self.expand_constraints(w);
        self.expand_transaction(w);
        self.expand_conversions(w);
        self.expand_generic_upsert(w);
        self.expand_generic_delete(w);
        self.expand_generic_reads(w);

        if self.schema.has_many_to_many() {
            self.expand_many_to_many(w);
        }
    }

    fn expand_constraints(&self, w: &mut Writer) {
        let models = &self.schema.models;

        let protos = models
            .iter()
            .map(|model| format!("*{}", model.name.message))
            .collect::<Vec<_>>()
            .join(" | ");

        let records = models
            .iter()
            .map(|model| format!("*{}", model.name.record))
            .collect::<Vec<_>>()
            .join(" | ");

        w.blank();
        w.block("type Protos interface", |w| w.line(protos));

        w.blank();
        w.block("type Models interface", |w| {
            w.line(records);
            w.line("GetModelId() string");
        });

        w.blank();
        w.block("type Proto[M Models] interface", |w| {
            w.line("GetProtoId() *string");
            w.line("SetProtoId(string)");
            w.line("ToModel() (M, error)");
        });

        w.blank();
        w.block("type Model[P Protos] interface", |w| {
            w.line("GetModelId() string");
            w.line("ToProto() (P, error)");
        });
    }

    fn expand_transaction(&self, w: &mut Writer) {
        w.blank();
        w.block(
            "func transaction(ctx context.Context, db *gorm.DB, fn func(tx *gorm.DB) error) error",
            |w| match self.config.engine {
                Engine::Postgres => {
                    w.line("return db.WithContext(ctx).Transaction(fn)");
                }
                Engine::Cockroachdb => {
                    self.import(GoImport::Crdbgorm);
                    w.line("return crdbgorm.ExecuteTx(ctx, db, nil, fn)");
                }
            },
        );
    }

    fn expand_conversions(&self, w: &mut Writer) {
        w.blank();
        w.block(
            "func ToModels[P Proto[M], M Models](protos []P) ([]M, error)",
            |w| {
                w.line("models := make([]M, 0, len(protos))");
                w.block("for _, p := range protos", |w| {
                    w.line("model, err := p.ToModel()");
                    w.return_on_err("nil, err");
                    w.line("models = append(models, model)");
                });
                w.line("return models, nil");
            },
        );

        w.blank();
        w.block(
            "func ToProtos[M Model[P], P Protos](models []M) ([]P, error)",
            |w| {
                w.line("protos := make([]P, 0, len(models))");
                w.block("for _, m := range models", |w| {
                    w.line("proto, err := m.ToProto()");
                    w.return_on_err("nil, err");
                    w.line("protos = append(protos, proto)");
                });
                w.line("return protos, nil");
            },
        );
    }

    fn expand_generic_upsert(&self, w: &mut Writer) {
        self.import(GoImport::Clause);
        self.import(GoImport::Uuid);

        w.blank();
        w.comment(
            "Upsert assigns an id to every message without one, writes them in one\n\
             transaction and reads the stored records back in input order. Fields\n\
             named in omit are not written.",
        );
        w.block(
            "func Upsert[P Proto[M], M Models](ctx context.Context, db *gorm.DB, protos []P, omit ...string) ([]M, error)",
            |w| {
                w.block("if len(protos) == 0", |w| w.line("return nil, nil"));

                w.line("ids := make([]string, 0, len(protos))");
                w.block("for _, p := range protos", |w| {
                    w.block("if p.GetProtoId() == nil", |w| {
                        w.line("p.SetProtoId(uuid.New().String())");
                    });
                    w.line("ids = append(ids, *p.GetProtoId())");
                });

                w.line("models, err := ToModels[P, M](protos)");
                w.return_on_err("nil, err");

                w.line("var upserted []M");
                self.transaction(w, "err =", |w| {
                    w.line("session := tx.Clauses(clause.OnConflict{UpdateAll: true})");
                    w.block("if len(omit) > 0", |w| {
                        w.line("session = session.Omit(omit...)");
                    });
                    w.block("if err := session.Create(&models).Error; err != nil", |w| {
                        w.line("return err");
                    });
                    w.line("return tx.Where(\"id in ?\", ids).Find(&upserted).Error");
                });
                w.return_on_err("nil, err");

                w.line("return orderByIds(upserted, ids), nil");
            },
        );
    }

    fn expand_generic_delete(&self, w: &mut Writer) {
        w.blank();
        w.block(
            "func Delete[M Models](ctx context.Context, db *gorm.DB, ids []string) error",
            |w| {
                w.block("if len(ids) == 0", |w| w.line("return nil"));
                w.line("var models []M");
                self.transaction(w, "return", |w| {
                    w.line("return tx.Where(\"id in ?\", ids).Delete(&models).Error");
                });
            },
        );
    }

    /// `List`, `GetByIds` and the `orderByIds` helper.
    fn expand_generic_reads(&self, w: &mut Writer) {
        w.blank();
        w.block(
            "func List[M Models](ctx context.Context, db *gorm.DB, limit, offset int, orderBy string, preloads ...string) ([]M, error)",
            |w| {
                w.line("session := db.Session(&gorm.Session{}).WithContext(ctx)");
                w.block("if limit > 0", |w| w.line("session = session.Limit(limit)"));
                w.block("if offset > 0", |w| w.line("session = session.Offset(offset)"));
                preload(w);
                w.block("if orderBy != \"\"", |w| {
                    w.line("session = session.Order(orderBy)")
                });
                w.line("var models []M");
                w.block("if err := session.Find(&models).Error; err != nil", |w| {
                    w.line("return nil, err");
                });
                w.line("return models, nil");
            },
        );

        w.blank();
        w.block(
            "func GetByIds[M Models](ctx context.Context, db *gorm.DB, ids []string, preloads ...string) ([]M, error)",
            |w| {
                w.block("if len(ids) == 0", |w| w.line("return nil, nil"));
                w.line("session := db.Session(&gorm.Session{}).WithContext(ctx)");
                preload(w);
                w.line("var models []M");
                w.block(
                    "if err := session.Where(\"id in ?\", ids).Find(&models).Error; err != nil",
                    |w| w.line("return nil, err"),
                );
                w.line("return orderByIds(models, ids), nil");
            },
        );

        w.blank();
        w.block(
            "func orderByIds[M Models](models []M, ids []string) []M",
            |w| {
                w.line("byId := make(map[string]M, len(models))");
                w.block("for _, m := range models", |w| {
                    w.line("byId[m.GetModelId()] = m");
                });
                w.line("ordered := make([]M, 0, len(models))");
                w.block("for _, id := range ids", |w| {
                    w.block("if m, ok := byId[id]; ok", |w| {
                        w.line("ordered = append(ordered, m)");
                    });
                });
                w.line("return ordered");
            },
        );
    }

    fn expand_many_to_many(&self, w: &mut Writer) {
        w.blank();
        w.comment("ManyToManyAssociations maps records to the related records of one association.");
        w.line("type ManyToManyAssociations[L Models, R Models] map[L][]R");

        for (func, method) in [
            ("AssociateManyToMany", "Append"),
            ("DissociateManyToMany", "Delete"),
            ("ReplaceManyToMany", "Replace"),
        ] {
            w.blank();
            w.block(
                format!(
                    "func {func}[L Models, R Models](ctx context.Context, db *gorm.DB, associations ManyToManyAssociations[L, R], name string) error"
                ),
                |w| {
                    w.block("if len(associations) == 0", |w| w.line("return nil"));
                    self.transaction(w, "return", |w| {
                        w.block("for model, related := range associations", |w| {
                            w.block(
                                format!(
                                    "if err := tx.Model(model).Association(name).{method}(related); err != nil"
                                ),
                                |w| w.line("return err"),
                            );
                        });
                        w.line("return nil");
                    });
                },
            );
        }
    }
}

fn preload(w: &mut Writer) {
    w.block("for _, preload := range preloads", |w| {
        w.line("session = session.Preload(preload)");
    });
}
