/// A fieldless enum stored as its integer discriminant.
#[derive(Debug)]
pub(crate) struct Enum {
    pub(crate) ident: syn::Ident,
    pub(crate) variants: Vec<Variant>,
}

#[derive(Debug)]
pub(crate) struct Variant {
    pub(crate) ident: syn::Ident,
    pub(crate) discriminant: i64,
}

impl Enum {
    pub(crate) fn from_ast(ast: &syn::ItemEnum) -> syn::Result<Enum> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "enums cannot have generic parameters",
            ));
        }

        if ast.variants.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "enum must have at least one variant",
            ));
        }

        let mut variants = Vec::with_capacity(ast.variants.len());
        let mut next = 0i64;

        for variant in &ast.variants {
            if !matches!(variant.fields, syn::Fields::Unit) {
                return Err(syn::Error::new_spanned(
                    &variant.fields,
                    "only fieldless variants can be stored",
                ));
            }

            let discriminant = match &variant.discriminant {
                Some((_, expr)) => discriminant(expr)?,
                None => next,
            };

            if let Some(existing) = variants
                .iter()
                .find(|existing: &&Variant| existing.discriminant == discriminant)
            {
                return Err(syn::Error::new_spanned(
                    &variant.ident,
                    format!(
                        "discriminant {discriminant} is already used by `{}`",
                        existing.ident
                    ),
                ));
            }

            variants.push(Variant {
                ident: variant.ident.clone(),
                discriminant,
            });
            next = discriminant.wrapping_add(1);
        }

        Ok(Enum {
            ident: ast.ident.clone(),
            variants,
        })
    }
}

fn discriminant(expr: &syn::Expr) -> syn::Result<i64> {
    match expr {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Int(lit),
            ..
        }) => lit.base10_parse(),
        syn::Expr::Unary(syn::ExprUnary {
            op: syn::UnOp::Neg(_),
            expr,
            ..
        }) => Ok(-discriminant(expr)?),
        _ => Err(syn::Error::new_spanned(
            expr,
            "discriminant must be an integer literal",
        )),
    }
}
