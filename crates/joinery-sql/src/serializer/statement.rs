use super::{
    ColumnRef, Comma, Formatter, Ident, Placeholder, Projection, Serializer, TableRef, ToSql,
};

use joinery_core::{
    mapping::NodeId,
    schema::EntityDescriptor,
    stmt::{Aggregate, Op, Query, Set, Statement, Value, Where},
    Error, MappingContext, Result,
};

/// `<KIND> JOIN <table> AS tN ON tP.[fk] = tN.[referenced]`
struct Join<'a> {
    kind: &'static str,
    table: TableRef<'a>,
    owner: ColumnRef<'a>,
    referenced: ColumnRef<'a>,
}

impl ToSql for Join<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, " " self.kind " " self.table " ON ");
        fmt!(f, &self.owner " = ");
        fmt!(f, &self.referenced);
    }
}

struct OrderItem<'a> {
    column: ColumnRef<'a>,
    direction: &'static str,
}

impl ToSql for OrderItem<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, &self.column " " self.direction);
    }
}

/// `[column] = @param`
struct Assign<'a> {
    column: &'a str,
    value: Placeholder,
}

impl ToSql for Assign<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, Ident(self.column) " = " self.value);
    }
}

impl<'a> Serializer<'a> {
    /// `SELECT` every mapped column of the root entity and of each entity
    /// joined through its foreign keys.
    pub fn select(&self, cx: &MappingContext<'_>, query: &Query) -> Result<Statement> {
        let predicate = self.predicate(cx, &query.filter, true)?;

        let order_by = query
            .order_by
            .iter()
            .map(|(name, direction)| {
                let id = cx.resolve(name)?;
                Ok(OrderItem {
                    column: self.column_ref(cx, id, true),
                    direction: direction.as_sql(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let projection = cx.mappings().map(|(id, mapping)| Projection {
            column: self.column_ref(cx, id, true),
            alias: &mapping.alias,
        });

        let joins = self.joins(cx);
        let (top, limit) = match query.limit {
            Some(limit) if self.is_sqlite() => (None, Some(limit)),
            limit => (limit, None),
        };

        Ok(self.serialize(|f| {
            fmt!(f, "SELECT ");
            if let Some(top) = top {
                fmt!(f, "TOP (" top ") ");
            }
            fmt!(f, Comma(projection) " FROM " self.aliased_root(cx));
            for join in joins {
                fmt!(f, join);
            }
            fmt!(f, " WHERE " predicate);
            if !order_by.is_empty() {
                fmt!(f, " ORDER BY " Comma(order_by));
            }
            if let Some(limit) = limit {
                fmt!(f, " LIMIT " limit);
            }
        }))
    }

    /// `INSERT` one row. `values` holds one value per column of `entity`;
    /// the identity column's value is skipped.
    ///
    /// When the entity has a single generated key, the statement returns it
    /// as a one-row, one-column result.
    pub fn insert(&self, entity: &EntityDescriptor, values: Vec<Value>) -> Result<Statement> {
        let mut columns = vec![];
        let mut placeholders = vec![];

        for ((index, column), value) in entity.columns.iter().enumerate().zip(values) {
            if Some(index) == entity.identity {
                continue;
            }

            columns.push(Ident(&column.column[..]));
            placeholders.push(Placeholder::new(&column.column, column.encode(value)?));
        }

        let generated = match entity.identity {
            Some(index) if entity.returns_generated_key() => Some(&entity.columns[index].column[..]),
            _ => None,
        };

        Ok(self.serialize(|f| {
            fmt!(f, "INSERT INTO " self.table_name(entity));

            if !columns.is_empty() {
                fmt!(f, " (" Comma(columns) ")");
            }

            if let (Some(generated), false) = (generated, self.is_sqlite()) {
                fmt!(f, " OUTPUT INSERTED." Ident(generated));
            }

            if placeholders.is_empty() {
                fmt!(f, " DEFAULT VALUES");
            } else {
                fmt!(f, " VALUES (" Comma(placeholders) ")");
            }

            if let (Some(generated), true) = (generated, self.is_sqlite()) {
                fmt!(f, " RETURNING " Ident(generated));
            }
        }))
    }

    /// `UPDATE` every non-key column of the row whose key matches. `values`
    /// holds one value per column of the root entity.
    pub fn update(&self, cx: &MappingContext<'_>, values: Vec<Value>) -> Result<Statement> {
        let entity = cx.entity(cx.root());
        let mut assignments = vec![];
        let mut filter = Where::new();

        for (column, value) in entity.columns.iter().zip(values) {
            if column.is_key {
                filter = filter.and(column.name, Op::Eq, value);
            } else {
                assignments.push(Assign {
                    column: &column.column,
                    value: Placeholder::new(&column.column, column.encode(value)?),
                });
            }
        }

        if assignments.is_empty() {
            return Err(Error::unsupported_operation(format!(
                "`{}` has no non-key columns to update",
                entity.name
            )));
        }

        let predicate = self.predicate(cx, &self.key_order(entity, filter), false)?;

        Ok(self.serialize(|f| {
            fmt!(f, "UPDATE " self.table_name(entity) " SET " Comma(assignments) " WHERE " predicate);
        }))
    }

    /// `UPDATE` the rows matching `filter`. Only columns of the root table
    /// may be named.
    pub fn update_where(
        &self,
        cx: &MappingContext<'_>,
        set: &Set,
        filter: &Where,
    ) -> Result<Statement> {
        let entity = cx.entity(cx.root());

        if set.is_empty() {
            return Err(Error::unsupported_operation(format!(
                "update of `{}` without any assignment",
                entity.name
            )));
        }

        self.single_table(cx, "update", set.iter().map(|a| &a.name[..]))?;
        self.single_table(cx, "update", filter.names())?;

        let assignments = set
            .iter()
            .map(|assignment| {
                let column = cx.column(cx.resolve(&assignment.name)?);
                Ok(Assign {
                    column: &column.column,
                    value: Placeholder::new(
                        format!("{}_p{}", column.column, assignment.index),
                        column.encode(assignment.value.clone())?,
                    ),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let predicate = self.predicate(cx, filter, false)?;

        Ok(self.serialize(|f| {
            fmt!(f, "UPDATE " self.table_name(entity) " SET " Comma(assignments) " WHERE " predicate);
        }))
    }

    /// `DELETE` the row whose key columns equal `keys`, given in key order.
    pub fn delete(&self, cx: &MappingContext<'_>, keys: Vec<Value>) -> Result<Statement> {
        let entity = cx.entity(cx.root());

        if keys.len() != entity.key.len() {
            return Err(Error::invalid_filter(format!(
                "`{}` has {} key columns, got {} values",
                entity.name,
                entity.key.len(),
                keys.len()
            )));
        }

        let filter = entity
            .key_columns()
            .zip(keys)
            .fold(Where::new(), |filter, (column, value)| {
                filter.and(column.name, Op::Eq, value)
            });

        self.delete_where(cx, &filter)
    }

    /// `DELETE` the rows matching `filter`. Only columns of the root table
    /// may be named.
    pub fn delete_where(&self, cx: &MappingContext<'_>, filter: &Where) -> Result<Statement> {
        let entity = cx.entity(cx.root());

        self.single_table(cx, "delete", filter.names())?;
        let predicate = self.predicate(cx, filter, false)?;

        Ok(self.serialize(|f| {
            fmt!(f, "DELETE FROM " self.table_name(entity) " WHERE " predicate);
        }))
    }

    /// `SELECT FUNC(column)` over the rows matching `filter`. Joins are only
    /// emitted when the column or a filter name belongs to a joined entity.
    pub fn aggregate(
        &self,
        cx: &MappingContext<'_>,
        aggregate: &Aggregate,
        filter: &Where,
    ) -> Result<Statement> {
        let target = cx.resolve(&aggregate.name)?;

        let resolved = filter
            .names()
            .map(|name| cx.resolve(name))
            .collect::<Result<Vec<_>>>()?;

        let joined = cx.reaches_joined(resolved.into_iter().chain([target]));

        let column = self.column_ref(cx, target, joined);
        let predicate = self.predicate(cx, filter, joined)?;
        let joins = if joined { self.joins(cx) } else { vec![] };
        let func = aggregate.func.as_sql();

        Ok(self.serialize(|f| {
            fmt!(f, "SELECT " func "(");
            fmt!(f, &column ") FROM ");
            if joined {
                fmt!(f, self.aliased_root(cx));
            } else {
                fmt!(f, self.table_name(cx.entity(cx.root())));
            }
            for join in joins {
                fmt!(f, join);
            }
            fmt!(f, " WHERE " predicate);
        }))
    }

    fn aliased_root<'c>(&self, cx: &MappingContext<'c>) -> TableRef<'c> {
        TableRef {
            entity: cx.entity(cx.root()),
            alias: Some(cx.alias(cx.root())),
        }
    }

    fn joins<'c>(&self, cx: &MappingContext<'c>) -> Vec<Join<'c>> {
        cx.joins()
            .into_iter()
            .filter_map(|node| self.join(cx, node))
            .collect()
    }

    fn join<'c>(&self, cx: &MappingContext<'c>, node: NodeId) -> Option<Join<'c>> {
        let (parent, column) = cx.node(node).parent?;
        let owner = &cx.entity(parent).columns[column];
        let fk = owner.foreign_key()?;
        let entity = cx.entity(node);

        Some(Join {
            kind: cx.node(node).join.unwrap_or(fk.join).as_sql(),
            table: TableRef {
                entity,
                alias: Some(cx.alias(node)),
            },
            owner: ColumnRef {
                table: Some(cx.alias(parent)),
                column: &owner.column,
            },
            referenced: ColumnRef {
                table: Some(cx.alias(node)),
                column: &entity.columns[fk.references].column,
            },
        })
    }

    /// Rejects names that reach beyond the root table.
    fn single_table<'n>(
        &self,
        cx: &MappingContext<'_>,
        operation: &str,
        names: impl Iterator<Item = &'n str>,
    ) -> Result<()> {
        for name in names {
            if name.contains('.') {
                return Err(Error::unsupported_operation(format!(
                    "{operation} by filter does not support the multi-part name `{name}`"
                )));
            }

            let id = cx.resolve(name)?;
            if cx.mapping(id).node != cx.root() {
                return Err(Error::unsupported_operation(format!(
                    "{operation} by filter does not support `{name}`, which belongs to `{}`",
                    cx.entity(cx.mapping(id).node).name
                )));
            }
        }

        Ok(())
    }

    /// Reorders key conditions collected in column order into key order.
    fn key_order(&self, entity: &EntityDescriptor, filter: Where) -> Where {
        let mut conditions: Vec<_> = filter.iter().cloned().collect();
        conditions.sort_by_key(|condition| {
            entity
                .key_columns()
                .position(|column| column.name == condition.name)
        });

        conditions.into_iter().fold(Where::new(), |filter, condition| {
            filter.and(condition.name, condition.op, condition.value)
        })
    }
}
