use super::{ErrorSet, Field, Table};

#[derive(Debug)]
pub(crate) struct Model {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// `#[table(..)]`
    pub(crate) table: Option<Table>,

    /// Every named field, mapped or not, in declaration order
    pub(crate) fields: Vec<Field>,
}

impl Model {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Model> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "entity fields must be named",
            ));
        };

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "entities cannot have generic parameters",
            ));
        }

        let mut errs = ErrorSet::new();
        let mut table = None;

        for attr in &ast.attrs {
            if attr.path().is_ident("table") {
                if table.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[table] attribute"));
                } else {
                    table = errs.ok(Table::from_ast(attr));
                }
            }
        }

        let fields: Vec<_> = node
            .named
            .iter()
            .enumerate()
            .filter_map(|(index, field)| errs.ok(Field::from_ast(field, &ast.ident, index)))
            .collect();

        errs.finish()?;

        if !fields.iter().any(Field::is_mapped) {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "entity must map at least one field",
            ));
        }

        let auto_keys = fields
            .iter()
            .filter(|field| field.key.as_ref().is_some_and(|key| key.auto))
            .count();

        if auto_keys > 1 {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "at most one key field can be generated by the database",
            ));
        }

        Ok(Model {
            ident: ast.ident.clone(),
            table,
            fields,
        })
    }

    pub(crate) fn name(&self) -> String {
        self.ident.to_string()
    }
}
