mod enumeration;
mod load;
mod schema;
mod util;
mod value;

use crate::schema::{Enum, Model};

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The entity being expanded
    model: &'a Model,

    /// Path prefix for joinery types
    joinery: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let joinery = &self.joinery;
        let model_ident = &self.model.ident;
        let schema = self.expand_schema();
        let load = self.expand_load();
        let value = self.expand_value();
        let assign = self.expand_assign();

        wrap_in_const(quote! {
            impl #joinery::Entity for #model_ident {
                #schema
                #load
                #value
                #assign
            }
        })
    }
}

pub(super) fn model(model: &Model) -> TokenStream {
    Expand {
        model,
        joinery: quote!(_joinery::codegen_support),
    }
    .expand()
}

pub(super) fn enumeration(enumeration: &Enum) -> TokenStream {
    wrap_in_const(enumeration::expand(
        enumeration,
        &quote!(_joinery::codegen_support),
    ))
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use joinery as _joinery;
            #code
        };
    }
}
