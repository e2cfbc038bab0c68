/// `#[foreign_key(column = "..", join = inner|left, references = field)]`
#[derive(Debug)]
pub(crate) struct ForeignKey {
    /// Referenced entity type
    pub(crate) target: syn::Type,

    /// The field is `Option<target>`
    pub(crate) optional: bool,

    pub(crate) column: Option<syn::LitStr>,

    pub(crate) join: Join,

    /// Field on the referenced entity that the column matches. Defaults to
    /// `id`.
    pub(crate) references: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Join {
    #[default]
    Inner,
    Left,
}

impl ForeignKey {
    pub(super) fn from_ast(attr: &syn::Attribute, ty: &syn::Type) -> syn::Result<ForeignKey> {
        let (target, optional) = match option_inner(ty) {
            Some(inner) => (inner.clone(), true),
            None => (ty.clone(), false),
        };

        let mut fk = ForeignKey {
            target,
            optional,
            column: None,
            join: Join::default(),
            references: "id".to_string(),
        };

        if let syn::Meta::Path(_) = &attr.meta {
            return Ok(fk);
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("column") {
                fk.column = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("join") {
                let ident: syn::Ident = meta.value()?.parse()?;
                fk.join = if ident == "inner" {
                    Join::Inner
                } else if ident == "left" {
                    Join::Left
                } else {
                    return Err(syn::Error::new_spanned(&ident, "expected `inner` or `left`"));
                };
            } else if meta.path.is_ident("references") {
                let value = meta.value()?;
                fk.references = if value.peek(syn::LitStr) {
                    value.parse::<syn::LitStr>()?.value()
                } else {
                    value.parse::<syn::Ident>()?.to_string()
                };
            } else {
                return Err(syn::Error::new_spanned(
                    &meta.path,
                    "expected `column`, `join` or `references`",
                ));
            }

            Ok(())
        })?;

        Ok(fk)
    }
}

/// Returns `T` when `ty` is written as `Option<T>`.
fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(path) = ty else {
        return None;
    };

    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }

    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    match args.args.first()? {
        syn::GenericArgument::Type(inner) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}
