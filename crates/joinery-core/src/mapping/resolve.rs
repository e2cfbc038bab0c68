use super::{MappingContext, MappingId, NodeId};
use crate::{Error, Result};

use heck::ToSnakeCase;

impl MappingContext<'_> {
    /// Resolves a filter, sort or aggregate name to a mapping.
    ///
    /// * `a.b.c` walks the foreign key fields `a` then `b` from the root and
    ///   picks field `c` on the table reached.
    /// * `Entity.field`, when no path matches, picks `field` on the only
    ///   joined table of type `Entity`.
    /// * A bare `field` prefers the root. Otherwise a single match on a
    ///   joined table is accepted. Several matches are ambiguous.
    ///
    /// Segments may be written in any case convention; `ZipCode` and
    /// `zip_code` name the same field.
    pub fn resolve(&self, name: &str) -> Result<MappingId> {
        let segments: Vec<_> = name.split('.').map(str::trim).collect();

        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(self.unresolved(name));
        }

        let (last, path) = segments
            .split_last()
            .ok_or_else(|| self.unresolved(name))?;

        if path.is_empty() {
            return self.resolve_bare(name, last);
        }

        if let Some(node) = self.walk(path) {
            if let Some(id) = self.field_named(node, last) {
                return Ok(id);
            }
        }

        if let [qualifier] = path {
            return self.resolve_qualified(name, qualifier, last);
        }

        Err(self.unresolved(name))
    }

    fn resolve_bare(&self, name: &str, field: &str) -> Result<MappingId> {
        if let Some(id) = self.field_named(self.root(), field) {
            return Ok(id);
        }

        let matches: Vec<_> = self
            .nodes()
            .skip(1)
            .filter_map(|node| self.field_named(node, field))
            .collect();

        match &matches[..] {
            [] => Err(self.unresolved(name)),
            [id] => {
                tracing::warn!(
                    target: "joinery::mapping",
                    name,
                    resolved = %self.dotted(*id),
                    "name resolved to a joined entity",
                );
                Ok(*id)
            }
            _ => Err(self.ambiguous(name, &matches)),
        }
    }

    fn resolve_qualified(&self, name: &str, entity: &str, field: &str) -> Result<MappingId> {
        let matches: Vec<_> = self
            .nodes()
            .filter(|&node| same_name(self.entity(node).name, entity))
            .filter_map(|node| self.field_named(node, field))
            .collect();

        match &matches[..] {
            [] => Err(self.unresolved(name)),
            [id] => Ok(*id),
            _ => Err(self.ambiguous(name, &matches)),
        }
    }

    /// Follows foreign key fields from the root.
    fn walk(&self, path: &[&str]) -> Option<NodeId> {
        let mut node = self.root();

        for segment in path {
            let id = self.field_named(node, segment)?;
            node = self.child(node, self.mapping(id).column)?;
        }

        Some(node)
    }

    fn field_named(&self, node: NodeId, name: &str) -> Option<MappingId> {
        let entity = self.entity(node);
        self.node(node)
            .mappings
            .iter()
            .copied()
            .find(|&id| same_name(entity.columns[self.mapping(id).column].name, name))
    }

    fn unresolved(&self, name: &str) -> Error {
        Error::unresolved_name(name, self.entity(self.root()).name)
    }

    fn ambiguous(&self, name: &str, matches: &[MappingId]) -> Error {
        Error::ambiguous_name(name, matches.iter().map(|&id| self.dotted(id)).collect())
    }
}

fn same_name(declared: &str, written: &str) -> bool {
    declared == written || declared.to_snake_case() == written.to_snake_case()
}
