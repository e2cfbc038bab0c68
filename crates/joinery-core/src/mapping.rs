//! Operation-scoped registry of every table and column reached from a root
//! entity through its foreign keys.
//!
//! The context is an arena of nodes, one per joined table. Each node knows
//! its parent and the foreign key column it was reached through, so the
//! path to any column can be rebuilt by walking parent links. Table aliases
//! are assigned in visitation order, `t1` being the root.

mod resolve;

use crate::{
    schema::{app::JoinKind, ColumnDescriptor, EntityDescriptor},
    stmt::Value,
    Error, Result, Schema,
};

use crate::schema::app::EntityId;

/// Identifies a joined table within a [`MappingContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Identifies one column of one joined table within a [`MappingContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MappingId(usize);

#[derive(Debug)]
pub struct MappingContext<'a> {
    schema: &'a Schema,
    nodes: Vec<Node<'a>>,
    mappings: Vec<Mapping>,
}

#[derive(Debug)]
pub struct Node<'a> {
    pub entity: &'a EntityDescriptor,

    /// The parent node and the index of the foreign key column on the
    /// parent's entity that leads here. `None` for the root.
    pub parent: Option<(NodeId, usize)>,

    /// Effective join kind. A node below a `LEFT` join is always `LEFT`.
    pub join: Option<JoinKind>,

    /// Mappings of this node, one per column, in column order.
    mappings: Vec<MappingId>,

    /// Child nodes keyed by the foreign key column they are reached through.
    children: Vec<(usize, NodeId)>,
}

#[derive(Debug)]
pub struct Mapping {
    pub node: NodeId,

    /// Index of the column on the node's entity.
    pub column: usize,

    /// Flattened result column name, `t<n>_<column>` with every character
    /// that is not valid in a bare identifier replaced by `_`.
    pub alias: String,
}

impl<'a> MappingContext<'a> {
    /// Walks the foreign key graph depth first from `root`.
    pub fn build(schema: &'a Schema, root: EntityId) -> Result<MappingContext<'a>> {
        let mut cx = MappingContext {
            schema,
            nodes: vec![],
            mappings: vec![],
        };

        let entity = schema.describe(root)?;
        let mut ancestors = vec![];
        cx.visit(entity, None, None, &mut ancestors)?;

        Ok(cx)
    }

    fn visit(
        &mut self,
        entity: &'a EntityDescriptor,
        parent: Option<(NodeId, usize)>,
        join: Option<JoinKind>,
        ancestors: &mut Vec<EntityId>,
    ) -> Result<NodeId> {
        let id = NodeId(self.nodes.len());
        let alias = alias_of(id);

        let mappings = entity
            .columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let mapping = MappingId(self.mappings.len());
                self.mappings.push(Mapping {
                    node: id,
                    column: index,
                    alias: flatten(&alias, &column.column),
                });
                mapping
            })
            .collect();

        self.nodes.push(Node {
            entity,
            parent,
            join,
            mappings,
            children: vec![],
        });

        ancestors.push(entity.id);

        for (index, column) in entity.foreign_keys() {
            let Some(fk) = column.foreign_key() else {
                continue;
            };

            if ancestors.contains(&fk.target) {
                return Err(Error::invalid_schema(format!(
                    "cyclic foreign key `{}.{}`",
                    entity.name, column.name
                )));
            }

            let target = self.schema.describe(fk.target)?;
            let child_join = match join {
                Some(JoinKind::Left) => JoinKind::Left,
                _ => fk.join,
            };

            let child = self.visit(target, Some((id, index)), Some(child_join), ancestors)?;
            self.nodes[id.0].children.push((index, child));
        }

        ancestors.pop();

        Ok(id)
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node<'a> {
        &self.nodes[id.0]
    }

    pub fn entity(&self, id: NodeId) -> &'a EntityDescriptor {
        self.nodes[id.0].entity
    }

    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Table alias of a node: `t1` for the root, then `t2`, `t3`, ... in
    /// visitation order.
    pub fn alias(&self, id: NodeId) -> String {
        alias_of(id)
    }

    pub fn mapping(&self, id: MappingId) -> &Mapping {
        &self.mappings[id.0]
    }

    pub fn mappings(&self) -> impl ExactSizeIterator<Item = (MappingId, &Mapping)> {
        self.mappings
            .iter()
            .enumerate()
            .map(|(index, mapping)| (MappingId(index), mapping))
    }

    pub fn column(&self, id: MappingId) -> &'a ColumnDescriptor {
        let mapping = &self.mappings[id.0];
        &self.entity(mapping.node).columns[mapping.column]
    }

    /// The node's mapping for a field, by declaration index.
    pub fn field(&self, node: NodeId, field: usize) -> Option<MappingId> {
        let node = &self.nodes[node.0];
        node.mappings
            .iter()
            .copied()
            .find(|&id| node.entity.columns[self.mappings[id.0].column].field == field)
    }

    /// The node joined through the given foreign key column.
    pub fn child(&self, node: NodeId, column: usize) -> Option<NodeId> {
        self.nodes[node.0]
            .children
            .iter()
            .find(|(index, _)| *index == column)
            .map(|(_, child)| *child)
    }

    /// The chain of foreign key fields from the root to `node`, rendered as
    /// `\address\city\`. The root's path is `\`.
    pub fn path(&self, node: NodeId) -> String {
        let mut path = String::from("\\");
        for name in self.segments(node) {
            path.push_str(name);
            path.push('\\');
        }
        path
    }

    /// Dotted name of a mapping, as accepted by name resolution.
    pub fn dotted(&self, id: MappingId) -> String {
        let mapping = &self.mappings[id.0];
        let mut segments = self.segments(mapping.node);
        segments.push(self.column(id).name);
        segments.join(".")
    }

    fn segments(&self, mut node: NodeId) -> Vec<&'a str> {
        let mut segments = vec![];
        while let Some((parent, column)) = self.nodes[node.0].parent {
            segments.push(self.entity(parent).columns[column].name);
            node = parent;
        }
        segments.reverse();
        segments
    }

    /// Non-root nodes in join order: every `INNER` join before every `LEFT`
    /// join, each group in visitation order. A parent always precedes its
    /// children.
    pub fn joins(&self) -> Vec<NodeId> {
        let mut joins: Vec<_> = self.nodes().skip(1).collect();
        joins.sort_by_key(|&id| self.nodes[id.0].join == Some(JoinKind::Left));
        joins
    }

    /// Returns true when any node other than the root holds a mapping in
    /// `ids`.
    pub fn reaches_joined(&self, ids: impl IntoIterator<Item = MappingId>) -> bool {
        ids.into_iter()
            .any(|id| self.mappings[id.0].node != self.root())
    }

    /// Looks up a mapping's value in a row keyed by alias column.
    pub fn read<'r>(&self, id: MappingId, row: &'r crate::stmt::Row) -> Option<&'r Value> {
        row.get(&self.mappings[id.0].alias)
    }
}

fn alias_of(id: NodeId) -> String {
    format!("t{}", id.0 + 1)
}

fn flatten(table: &str, column: &str) -> String {
    let column: String = column
        .chars()
        .map(|ch| if ch.is_alphanumeric() || ch == '_' { ch } else { '_' })
        .collect();

    format!("{table}_{column}")
}
