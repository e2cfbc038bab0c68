use super::{
    app::{self, EntityId, FieldTy},
    ColumnDescriptor, ColumnTy, EntityDescriptor, ForeignKey, Schema, TableName,
};
use crate::{Error, Options, Result};

use indexmap::IndexMap;

pub(super) struct Builder<'a> {
    options: &'a Options,
}

impl<'a> Builder<'a> {
    pub(super) fn new(options: &'a Options) -> Builder<'a> {
        Builder { options }
    }

    pub(super) fn build(&self, models: Vec<app::Model>) -> Result<Schema> {
        let models = collect(models);

        let tables = models
            .values()
            .map(|model| (model.id, self.table_name(model)))
            .collect::<IndexMap<_, _>>();

        let mut entities = IndexMap::with_capacity(models.len());

        for model in models.values() {
            let entity = self.describe(model, &tables)?;
            entities.insert(model.id, entity);
        }

        // Foreign keys were created with a placeholder target column. Now
        // that every entity is described, resolve the referenced field name.
        let mut resolved = vec![];

        for (model, entity) in models.values().zip(entities.values()) {
            for (index, column) in entity.columns.iter().enumerate() {
                let ColumnTy::ForeignKey(fk) = &column.ty else {
                    continue;
                };
                let FieldTy::Reference(reference) = &model.fields[column.field].ty else {
                    continue;
                };

                let target = &entities[&fk.target];
                let Some((target_column, _)) = target.column(reference.references) else {
                    return Err(Error::invalid_schema(format!(
                        "`{}.{}` references `{}.{}`, which is not a mapped property",
                        entity.name, column.name, target.name, reference.references
                    )));
                };

                resolved.push((model.id, index, target_column));
            }
        }

        for (id, index, target_column) in resolved {
            if let ColumnTy::ForeignKey(fk) = &mut entities[&id].columns[index].ty {
                fk.references = target_column;
            }
        }

        Ok(Schema { entities })
    }

    fn table_name(&self, model: &app::Model) -> TableName {
        let attr = model.table.clone().unwrap_or_default();
        let style = attr.naming_style.unwrap_or(self.options.naming_style);

        TableName {
            schema: attr
                .schema
                .map(str::to_string)
                .unwrap_or_else(|| self.options.schema.clone()),
            name: attr
                .name
                .map(str::to_string)
                .unwrap_or_else(|| style.apply(model.name)),
        }
    }

    fn describe(
        &self,
        model: &app::Model,
        tables: &IndexMap<EntityId, TableName>,
    ) -> Result<EntityDescriptor> {
        let table = tables[&model.id].clone();
        let style = model
            .table
            .as_ref()
            .and_then(|attr| attr.naming_style)
            .unwrap_or(self.options.naming_style);

        let mut columns: Vec<ColumnDescriptor> = vec![];

        for (index, field) in model.fields.iter().enumerate() {
            if field.not_mapped {
                continue;
            }

            let explicit_name = field.column.as_ref().and_then(|column| column.name);

            let (ty, inferred) = match &field.ty {
                FieldTy::Primitive(ty) => (ColumnTy::Primitive(ty.clone()), None),
                FieldTy::Serialized(kind) => (ColumnTy::Serialized(*kind), None),
                FieldTy::Unmapped => continue,
                FieldTy::Reference(reference) => {
                    let target = (reference.target)();
                    let Some(target_table) = tables.get(&target.id) else {
                        return Err(Error::invalid_schema(format!(
                            "`{}.{}` references `{}`, which is not registered",
                            model.name, field.name, target.name
                        )));
                    };

                    let inferred = self
                        .options
                        .infer_composed_id_in_foreign_keys
                        .then(|| format!("id_{}", target_table.name));

                    let fk = ForeignKey {
                        target: target.id,
                        join: reference.join,
                        references: usize::MAX,
                        optional: reference.optional,
                    };

                    (ColumnTy::ForeignKey(fk), inferred)
                }
            };

            let column = match (explicit_name, inferred) {
                (Some(name), _) => name.to_string(),
                (None, Some(name)) => name,
                (None, None) => {
                    let styled = style.apply(field.name);
                    if styled.eq_ignore_ascii_case("id") && self.options.use_composed_id {
                        format!("{styled}_{}", table.name)
                    } else {
                        styled
                    }
                }
            };

            if let Some(existing) = columns.iter().find(|c| c.column == column) {
                return Err(Error::invalid_schema(format!(
                    "`{}.{}` and `{}.{}` both map to column `{}`",
                    model.name, existing.name, model.name, field.name, column
                )));
            }

            let order = field
                .key
                .as_ref()
                .and_then(|key| key.order)
                .or_else(|| field.column.as_ref().and_then(|column| column.order))
                .unwrap_or(0);

            columns.push(ColumnDescriptor {
                field: index,
                name: field.name,
                column,
                ty,
                is_key: field.key.is_some(),
                is_auto: field.key.as_ref().is_some_and(|key| key.auto),
                order,
                type_name: field.column.as_ref().and_then(|column| column.type_name),
                explicit: field.column.is_some() || field.is_reference(),
            });
        }

        let mut key: Vec<usize> = (0..columns.len()).filter(|&i| columns[i].is_key).collect();

        if key.is_empty() {
            if let Some(index) = columns.iter().position(|column| column.name == "id") {
                columns[index].is_key = true;
                columns[index].is_auto = self.options.implicit_key_auto_generated;
                key.push(index);
            }
        }

        key.sort_by_key(|&index| columns[index].order);

        let identity = key.iter().copied().find(|&index| columns[index].is_auto);

        Ok(EntityDescriptor {
            id: model.id,
            name: model.name,
            table,
            columns,
            key,
            identity,
        })
    }
}

/// Registers the given models and, transitively, every entity they
/// reference.
fn collect(models: Vec<app::Model>) -> IndexMap<EntityId, app::Model> {
    let mut registered = IndexMap::new();
    let mut pending = models;
    pending.reverse();

    while let Some(model) = pending.pop() {
        if registered.contains_key(&model.id) {
            continue;
        }

        for field in &model.fields {
            if let FieldTy::Reference(reference) = &field.ty {
                if !field.not_mapped {
                    pending.push((reference.target)());
                }
            }
        }

        registered.insert(model.id, model);
    }

    registered
}
