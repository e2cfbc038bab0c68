/// `#[table(name = "..", schema = "..", naming_style = "..")]`
#[derive(Debug, Default)]
pub(crate) struct Table {
    pub(crate) name: Option<syn::LitStr>,
    pub(crate) schema: Option<syn::LitStr>,
    pub(crate) naming_style: Option<syn::Ident>,
}

const NAMING_STYLES: [&str; 4] = [
    "lower_case_underscored",
    "lower_case",
    "pascal_case_underscored",
    "pascal_case",
];

impl Table {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Table> {
        let mut table = Table::default();

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                if table.name.is_some() {
                    return Err(meta.error("duplicate `name`"));
                }
                table.name = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("schema") {
                if table.schema.is_some() {
                    return Err(meta.error("duplicate `schema`"));
                }
                table.schema = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("naming_style") {
                let lit: syn::LitStr = meta.value()?.parse()?;
                let style = lit.value();

                if !NAMING_STYLES.contains(&&style[..]) {
                    return Err(syn::Error::new_spanned(
                        &lit,
                        format!("unknown naming style; expected one of {}", NAMING_STYLES.join(", ")),
                    ));
                }

                let variant = heck::ToUpperCamelCase::to_upper_camel_case(&style[..]);
                table.naming_style = Some(syn::Ident::new(&variant, lit.span()));
            } else {
                return Err(syn::Error::new_spanned(
                    &meta.path,
                    "expected `name`, `schema` or `naming_style`",
                ));
            }

            Ok(())
        })?;

        Ok(table)
    }
}
