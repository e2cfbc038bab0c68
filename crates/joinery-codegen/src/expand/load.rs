use super::{util, Expand};
use crate::schema::FieldTy;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    /// `Entity::load`: every mapped field is read from the record by its
    /// declaration index. Unmapped fields take their default.
    pub(super) fn expand_load(&self) -> TokenStream {
        let joinery = &self.joinery;
        let model_ident = &self.model.ident;

        let fields = self.model.fields.iter().map(|field| {
            let ident = &field.ident;
            let index = util::int(field.id);

            let load = match &field.ty {
                _ if field.not_mapped => quote!(::core::default::Default::default()),
                FieldTy::Primitive(_) => quote!(record.primitive(#index)?),
                FieldTy::Serialized(..) => quote!(record.serialized(#index)?),
                FieldTy::Reference(fk) if fk.optional => {
                    quote!(record.optional_reference(#index)?)
                }
                FieldTy::Reference(_) => quote!(record.reference(#index)?),
            };

            quote!(#ident: #load)
        });

        quote! {
            fn load(record: &#joinery::Record<'_>) -> #joinery::Result<Self> {
                Ok(#model_ident {
                    #( #fields, )*
                })
            }
        }
    }
}
