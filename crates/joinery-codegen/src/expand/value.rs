use super::{util, Expand};
use crate::schema::FieldTy;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    /// `Entity::value`: reads a mapped field. Foreign key fields forward the
    /// remaining path to the referenced entity.
    pub(super) fn expand_value(&self) -> TokenStream {
        let joinery = &self.joinery;
        let name = self.model.name();

        let arms = self
            .model
            .fields
            .iter()
            .filter(|field| field.is_mapped())
            .map(|field| {
                let ident = &field.ident;
                let index = util::int(field.id);

                let value = match &field.ty {
                    FieldTy::Primitive(_) => {
                        quote!(Ok(#joinery::Primitive::to_value(&self.#ident)))
                    }
                    FieldTy::Serialized(..) => quote!(#joinery::serialized_value(&self.#ident)),
                    FieldTy::Reference(fk) if fk.optional => {
                        quote!(#joinery::reference_value(self.#ident.as_ref(), nested))
                    }
                    FieldTy::Reference(_) => {
                        quote!(#joinery::reference_value(Some(&self.#ident), nested))
                    }
                };

                quote!(#index => #value,)
            });

        quote! {
            #[allow(unused_variables)]
            fn value(&self, field: usize, nested: &[usize]) -> #joinery::Result<#joinery::Value> {
                match field {
                    #( #arms )*
                    _ => Err(#joinery::unknown_field(#name, field)),
                }
            }
        }
    }

    /// `Entity::assign`: stores a value read back from the database, such as
    /// a generated key.
    pub(super) fn expand_assign(&self) -> TokenStream {
        let joinery = &self.joinery;
        let name = self.model.name();

        let arms = self
            .model
            .fields
            .iter()
            .filter(|field| field.is_mapped())
            .filter_map(|field| {
                let FieldTy::Primitive(_) = &field.ty else {
                    return None;
                };

                let ident = &field.ident;
                let index = util::int(field.id);

                Some(quote!(#index => self.#ident = #joinery::Primitive::load(value)?,))
            });

        quote! {
            #[allow(unreachable_code)]
            fn assign(&mut self, field: usize, value: #joinery::Value) -> #joinery::Result<()> {
                match field {
                    #( #arms )*
                    _ => return Err(#joinery::unknown_field(#name, field)),
                }

                Ok(())
            }
        }
    }
}
