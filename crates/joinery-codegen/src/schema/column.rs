#[derive(Debug, Default)]
pub(crate) struct Column {
    pub(crate) name: Option<syn::LitStr>,
    pub(crate) order: Option<syn::LitInt>,
    pub(crate) type_name: Option<syn::LitStr>,
    pub(crate) serialize: Option<Serialize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Serialize {
    Json,
    Xml,
}

mod kw {
    syn::custom_keyword!(name);
    syn::custom_keyword!(order);
    syn::custom_keyword!(type_name);
    syn::custom_keyword!(serialize);
}

impl Column {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Column> {
        match &attr.meta {
            // A bare `#[column]` marks the field as explicitly mapped.
            syn::Meta::Path(_) => Ok(Column::default()),
            _ => attr.parse_args(),
        }
    }
}

impl syn::parse::Parse for Column {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut result = Column::default();

        // Allowed syntax:
        //
        // #[column("name")]
        // #[column(name = "name", order = 1)]
        // #[column(type_name = "bigint")]
        // #[column(serialize = "json")]
        while !input.is_empty() {
            let lookahead = input.lookahead1();

            if lookahead.peek(syn::LitStr) || lookahead.peek(kw::name) {
                if result.name.is_some() {
                    return Err(syn::Error::new(input.span(), "duplicate column name"));
                }
                if input.peek(kw::name) {
                    let _kw: kw::name = input.parse()?;
                    let _eq_token: syn::Token![=] = input.parse()?;
                }
                result.name = Some(input.parse()?);
            } else if lookahead.peek(kw::order) {
                if result.order.is_some() {
                    return Err(syn::Error::new(input.span(), "duplicate column order"));
                }
                let _kw: kw::order = input.parse()?;
                let _eq_token: syn::Token![=] = input.parse()?;
                let lit: syn::LitInt = input.parse()?;
                lit.base10_parse::<u32>()?;
                result.order = Some(lit);
            } else if lookahead.peek(kw::type_name) {
                if result.type_name.is_some() {
                    return Err(syn::Error::new(input.span(), "duplicate column type name"));
                }
                let _kw: kw::type_name = input.parse()?;
                let _eq_token: syn::Token![=] = input.parse()?;
                result.type_name = Some(input.parse()?);
            } else if lookahead.peek(kw::serialize) {
                if result.serialize.is_some() {
                    return Err(syn::Error::new(input.span(), "duplicate serialization"));
                }
                let _kw: kw::serialize = input.parse()?;
                let _eq_token: syn::Token![=] = input.parse()?;
                let lit: syn::LitStr = input.parse()?;
                result.serialize = Some(match &lit.value()[..] {
                    "json" => Serialize::Json,
                    "xml" => Serialize::Xml,
                    _ => {
                        return Err(syn::Error::new_spanned(
                            &lit,
                            "expected `\"json\"` or `\"xml\"`",
                        ))
                    }
                });
            } else {
                return Err(lookahead.error());
            }

            if input.is_empty() {
                break;
            }
            let _comma_token: syn::Token![,] = input.parse()?;
        }

        Ok(result)
    }
}
