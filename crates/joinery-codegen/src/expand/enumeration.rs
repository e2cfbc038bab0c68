use crate::schema::Enum;

use proc_macro2::TokenStream;
use quote::quote;

/// Stores the enum as its discriminant. Loading a value that matches no
/// variant fails.
pub(super) fn expand(enumeration: &Enum, joinery: &TokenStream) -> TokenStream {
    let ident = &enumeration.ident;
    let name = ident.to_string();

    let load_arms = enumeration.variants.iter().map(|variant| {
        let variant_ident = &variant.ident;
        let discriminant = variant.discriminant;
        quote!(Some(#discriminant) => Ok(#ident::#variant_ident),)
    });

    let value_arms = enumeration.variants.iter().map(|variant| {
        let variant_ident = &variant.ident;
        let discriminant = variant.discriminant;
        quote!(#ident::#variant_ident => #discriminant,)
    });

    quote! {
        impl #joinery::Primitive for #ident {
            fn ty() -> #joinery::Type {
                #joinery::Type::Enum(#name)
            }

            fn load(value: #joinery::Value) -> #joinery::Result<Self> {
                match value.as_i64() {
                    #( #load_arms )*
                    _ => Err(#joinery::Error::type_conversion(value, #name)),
                }
            }

            fn to_value(&self) -> #joinery::Value {
                #joinery::Value::I64(match self {
                    #( #value_arms )*
                })
            }
        }

        impl ::core::convert::From<#ident> for #joinery::Value {
            fn from(value: #ident) -> Self {
                #joinery::Primitive::to_value(&value)
            }
        }
    }
}
