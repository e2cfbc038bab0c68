//! Rebuilds entity graphs from flat result rows.
//!
//! A select projects every mapped column of every joined table under its
//! `t<n>_<column>` alias. Materializing a row starts at the root node of the
//! mapping context and descends through foreign key fields, reading each
//! node's columns by alias.

mod lenient;

use crate::{Entity, Primitive, Result};

use joinery_core::{
    mapping::{MappingId, NodeId},
    schema::{ColumnDescriptor, EntityDescriptor},
    serialization,
    stmt::{Row, Value},
    Error, MappingContext, Options,
};

use serde::de::DeserializeOwned;

/// The columns of one joined table within one result row.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    cx: &'a MappingContext<'a>,
    node: NodeId,
    row: &'a Row,
    options: &'a Options,
}

/// Loads one `T` per row.
pub(crate) fn materialize<T: Entity>(
    cx: &MappingContext<'_>,
    rows: &[Row],
    options: &Options,
) -> Result<Vec<T>> {
    rows.iter()
        .map(|row| {
            T::load(&Record {
                cx,
                node: cx.root(),
                row,
                options,
            })
        })
        .collect()
}

impl<'a> Record<'a> {
    /// Reads a scalar field.
    pub fn primitive<T: Primitive>(&self, field: usize) -> Result<T> {
        let (_, column) = self.column(field)?;
        let value = match self.raw(field)? {
            Value::String(text) if self.options.auto_trim_strings => {
                Value::String(text.trim().to_string())
            }
            value => value,
        };

        T::load(value).map_err(|err| self.failed(err, column))
    }

    /// Reads a field stored as JSON or XML text.
    pub fn serialized<T: DeserializeOwned>(&self, field: usize) -> Result<T> {
        let (_, column) = self.column(field)?;

        let json = match self.raw(field)? {
            Value::Null => serde_json::Value::Null,
            Value::String(text) => match column.serialization() {
                Some(kind) => serialization::decode(kind, &text)
                    .map_err(|err| self.failed(err, column))?,
                None => serde_json::from_str(&text)?,
            },
            Value::Json(json) => json,
            value => {
                return Err(self.failed(
                    Error::type_conversion(value, "serialized text"),
                    column,
                ))
            }
        };

        lenient::from_value(json).map_err(|err| self.failed(err, column))
    }

    /// Reads a required reference. A row whose referenced columns are all
    /// NULL fails to load.
    pub fn reference<T: Entity>(&self, field: usize) -> Result<T> {
        let (child, column) = self.child(field)?;

        if child.is_absent() {
            return Err(self.failed(
                Error::type_conversion(Value::Null, child.entity().name),
                column,
            ));
        }

        T::load(&child)
    }

    /// Reads an optional reference. A row whose referenced columns are all
    /// NULL loads as `None`.
    pub fn optional_reference<T: Entity>(&self, field: usize) -> Result<Option<T>> {
        let (child, _) = self.child(field)?;

        if child.is_absent() {
            return Ok(None);
        }

        T::load(&child).map(Some)
    }

    fn entity(&self) -> &'a EntityDescriptor {
        self.cx.entity(self.node)
    }

    fn column(&self, field: usize) -> Result<(MappingId, &'a ColumnDescriptor)> {
        let id = self
            .cx
            .field(self.node, field)
            .ok_or_else(|| crate::entity::unknown_field(self.entity().name, field))?;

        Ok((id, self.cx.column(id)))
    }

    /// The raw value of a field. A column missing from the row reads as
    /// NULL unless the field is explicitly mapped.
    fn raw(&self, field: usize) -> Result<Value> {
        let (id, column) = self.column(field)?;

        if let Some(value) = self.cx.read(id, self.row) {
            return Ok(value.clone());
        }

        let alias = &self.cx.mapping(id).alias;

        if column.explicit {
            return Err(joinery_core::err!(
                "result row has no column `{alias}` for `{}.{}` at `{}`",
                self.entity().name,
                column.name,
                self.cx.path(self.node),
            ));
        }

        tracing::warn!(
            target: "joinery::engine",
            column = %alias,
            entity = self.entity().name,
            field = column.name,
            "result row has no column for the field; using its default",
        );

        Ok(Value::Null)
    }

    fn child(&self, field: usize) -> Result<(Record<'a>, &'a ColumnDescriptor)> {
        let Some((index, column)) = self.entity().column_for_field(field) else {
            return Err(crate::entity::unknown_field(self.entity().name, field));
        };

        let node = self.cx.child(self.node, index).ok_or_else(|| {
            joinery_core::err!(
                "`{}.{}` was not joined at `{}`",
                self.entity().name,
                column.name,
                self.cx.path(self.node)
            )
        })?;

        Ok((Record { node, ..*self }, column))
    }

    /// True when every column of this table is NULL or missing, as for the
    /// unmatched side of a `LEFT JOIN`.
    fn is_absent(&self) -> bool {
        self.cx
            .mappings()
            .filter(|(_, mapping)| mapping.node == self.node)
            .all(|(id, _)| self.cx.read(id, self.row).map_or(true, Value::is_null))
    }

    fn failed(&self, err: Error, column: &ColumnDescriptor) -> Error {
        err.context(joinery_core::err!(
            "cannot load `{}.{}` at `{}`",
            self.entity().name,
            column.name,
            self.cx.path(self.node)
        ))
    }
}
