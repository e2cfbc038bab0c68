pub mod app;

mod builder;

mod column;
pub use column::{ColumnDescriptor, ColumnTy, ForeignKey};

mod entity;
pub use entity::{EntityDescriptor, TableName};

use crate::{Options, Result};
use app::EntityId;

use indexmap::IndexMap;

/// Resolved descriptors for every registered entity.
///
/// Built once from declarative metadata and the naming options, then only
/// read. Entities reached through a foreign key are registered automatically.
#[derive(Debug)]
pub struct Schema {
    entities: IndexMap<EntityId, EntityDescriptor>,
}

impl Schema {
    pub fn build(models: Vec<app::Model>, options: &Options) -> Result<Schema> {
        builder::Builder::new(options).build(models)
    }

    /// Returns the descriptor for an entity.
    pub fn describe(&self, id: EntityId) -> Result<&EntityDescriptor> {
        self.entities.get(&id).ok_or_else(|| {
            crate::Error::invalid_schema(format!("entity {id:?} is not registered"))
        })
    }

    pub fn get(&self, id: EntityId) -> Option<&EntityDescriptor> {
        self.entities.get(&id)
    }

    pub fn entities(&self) -> impl ExactSizeIterator<Item = &EntityDescriptor> {
        self.entities.values()
    }

    /// Follows a foreign key column to the column whose value it stores.
    ///
    /// Returns the field indexes to walk on each referenced entity and the
    /// final, non-reference column. A reference that points at another
    /// reference is followed until a stored column is reached.
    pub fn reference_chain<'a>(
        &'a self,
        mut column: &'a ColumnDescriptor,
    ) -> Result<(Vec<usize>, &'a ColumnDescriptor)> {
        let mut nested = vec![];

        while let ColumnTy::ForeignKey(fk) = &column.ty {
            let target = self.describe(fk.target)?;
            column = &target.columns[fk.references];
            nested.push(column.field);
        }

        Ok((nested, column))
    }
}
