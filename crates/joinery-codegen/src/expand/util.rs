use proc_macro2::TokenStream;

/// An unsuffixed integer literal.
pub(crate) fn int(v: usize) -> TokenStream {
    let lit = proc_macro2::Literal::usize_unsuffixed(v);
    quote::quote!(#lit)
}

/// `Some(value)` or `None`.
pub(crate) fn option<T: quote::ToTokens>(value: Option<T>) -> TokenStream {
    match value {
        Some(value) => quote::quote!(Some(#value)),
        None => quote::quote!(None),
    }
}
