/// `#[key]`, `#[key(auto)]`, `#[key(order = N)]`
#[derive(Debug, Default)]
pub(crate) struct KeyAttr {
    pub(crate) auto: bool,
    pub(crate) order: Option<syn::LitInt>,
}

impl KeyAttr {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<KeyAttr> {
        let mut key = KeyAttr::default();

        if let syn::Meta::Path(_) = &attr.meta {
            return Ok(key);
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("auto") {
                if key.auto {
                    return Err(meta.error("duplicate `auto`"));
                }
                key.auto = true;
            } else if meta.path.is_ident("order") {
                let lit: syn::LitInt = meta.value()?.parse()?;
                lit.base10_parse::<u32>()?;
                key.order = Some(lit);
            } else {
                return Err(syn::Error::new_spanned(
                    &meta.path,
                    "expected `auto` or `order`",
                ));
            }

            Ok(())
        })?;

        Ok(key)
    }
}
