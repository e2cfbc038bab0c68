use super::{Column, ErrorSet, ForeignKey, KeyAttr, Serialize};

#[derive(Debug)]
pub(crate) struct Field {
    /// Index of field in the containing struct
    pub(crate) id: usize,

    pub(crate) ident: syn::Ident,

    pub(crate) ty: FieldTy,

    /// `#[column(..)]`
    pub(crate) column: Option<Column>,

    /// `#[key(..)]`
    pub(crate) key: Option<KeyAttr>,

    /// `#[not_mapped]`
    pub(crate) not_mapped: bool,
}

#[derive(Debug)]
pub(crate) enum FieldTy {
    Primitive(syn::Type),
    Reference(ForeignKey),
    Serialized(syn::Type, Serialize),
}

impl Field {
    pub(super) fn from_ast(
        field: &syn::Field,
        model_ident: &syn::Ident,
        id: usize,
    ) -> syn::Result<Field> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "entity fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut column = None;
        let mut key = None;
        let mut reference = None;
        let mut not_mapped = false;

        let mut ty = field.ty.clone();
        rewrite_self(&mut ty, model_ident);

        for attr in &field.attrs {
            if attr.path().is_ident("column") {
                if column.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[column] attribute"));
                } else {
                    column = errs.ok(Column::from_ast(attr));
                }
            } else if attr.path().is_ident("key") {
                if key.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[key] attribute"));
                } else {
                    key = errs.ok(KeyAttr::from_ast(attr));
                }
            } else if attr.path().is_ident("foreign_key") {
                if reference.is_some() {
                    errs.push(syn::Error::new_spanned(
                        attr,
                        "duplicate #[foreign_key] attribute",
                    ));
                } else {
                    reference = errs.ok(ForeignKey::from_ast(attr, &ty));
                }
            } else if attr.path().is_ident("not_mapped") {
                if not_mapped {
                    errs.push(syn::Error::new_spanned(
                        attr,
                        "duplicate #[not_mapped] attribute",
                    ));
                }
                not_mapped = true;
            }
        }

        if not_mapped && (column.is_some() || key.is_some() || reference.is_some()) {
            errs.push(syn::Error::new_spanned(
                field,
                "#[not_mapped] cannot be combined with other mapping attributes",
            ));
        }

        if reference.is_some() && column.is_some() {
            errs.push(syn::Error::new_spanned(
                field,
                "foreign key fields name their column with #[foreign_key(column = \"..\")]",
            ));
        }

        if reference.is_some() && key.is_some() {
            errs.push(syn::Error::new_spanned(
                field,
                "foreign key fields cannot be part of the key",
            ));
        }

        let serialize = column.as_ref().and_then(|column| column.serialize);

        if serialize.is_some() && key.is_some() {
            errs.push(syn::Error::new_spanned(
                field,
                "serialized fields cannot be part of the key",
            ));
        }

        errs.finish()?;

        let ty = match (reference, serialize) {
            (Some(reference), _) => FieldTy::Reference(reference),
            (None, Some(kind)) => FieldTy::Serialized(ty, kind),
            (None, None) => FieldTy::Primitive(ty),
        };

        Ok(Field {
            id,
            ident: ident.clone(),
            ty,
            column,
            key,
            not_mapped,
        })
    }

    pub(crate) fn is_mapped(&self) -> bool {
        !self.not_mapped
    }
}

fn rewrite_self(ty: &mut syn::Type, model: &syn::Ident) {
    use syn::visit_mut::VisitMut;

    struct RewriteSelf<'a>(&'a syn::Ident);

    impl VisitMut for RewriteSelf<'_> {
        fn visit_path_mut(&mut self, path: &mut syn::Path) {
            syn::visit_mut::visit_path_mut(self, path);

            if path.is_ident("Self") {
                path.segments[0].ident = self.0.clone();
            }
        }
    }

    RewriteSelf(model).visit_type_mut(ty);
}
