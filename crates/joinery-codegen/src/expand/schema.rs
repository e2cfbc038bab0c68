use super::{util, Expand};
use crate::schema::{Field, FieldTy, Join, Serialize};

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_schema(&self) -> TokenStream {
        let joinery = &self.joinery;
        let model_ident = &self.model.ident;
        let name = self.model.name();
        let table = self.expand_table();
        let fields = self.model.fields.iter().map(|field| self.expand_field(field));

        quote! {
            fn schema() -> #joinery::app::Model {
                #joinery::app::Model {
                    id: #joinery::app::EntityId::of::<#model_ident>(),
                    name: #name,
                    table: #table,
                    fields: vec![ #( #fields ),* ],
                }
            }
        }
    }

    fn expand_table(&self) -> TokenStream {
        let joinery = &self.joinery;

        let Some(table) = &self.model.table else {
            return quote!(None);
        };

        let name = util::option(table.name.as_ref());
        let schema = util::option(table.schema.as_ref());
        let naming_style = util::option(
            table
                .naming_style
                .as_ref()
                .map(|style| quote!(#joinery::NamingStyle::#style)),
        );

        quote! {
            Some(#joinery::app::TableAttr {
                name: #name,
                schema: #schema,
                naming_style: #naming_style,
            })
        }
    }

    fn expand_field(&self, field: &Field) -> TokenStream {
        let joinery = &self.joinery;
        let name = field.ident.to_string();
        let not_mapped = field.not_mapped;

        let ty = match &field.ty {
            _ if field.not_mapped => quote!(#joinery::app::FieldTy::Unmapped),
            FieldTy::Primitive(ty) => {
                quote!(#joinery::app::FieldTy::Primitive(<#ty as #joinery::Primitive>::ty()))
            }
            FieldTy::Serialized(_, Serialize::Json) => {
                quote!(#joinery::app::FieldTy::Serialized(#joinery::app::Serialization::Json))
            }
            FieldTy::Serialized(_, Serialize::Xml) => {
                quote!(#joinery::app::FieldTy::Serialized(#joinery::app::Serialization::Xml))
            }
            FieldTy::Reference(fk) => {
                let target = &fk.target;
                let optional = fk.optional;
                let references = &fk.references;
                let join = match fk.join {
                    Join::Inner => quote!(#joinery::app::JoinKind::Inner),
                    Join::Left => quote!(#joinery::app::JoinKind::Left),
                };

                quote!(#joinery::app::FieldTy::Reference(#joinery::app::Reference {
                    target: <#target as #joinery::Entity>::schema,
                    join: #join,
                    references: #references,
                    optional: #optional,
                }))
            }
        };

        let column = match (&field.ty, &field.column) {
            (FieldTy::Reference(fk), _) => match &fk.column {
                Some(name) => quote!(Some(#joinery::app::ColumnAttr {
                    name: Some(#name),
                    order: None,
                    type_name: None,
                })),
                None => quote!(None),
            },
            (_, Some(column)) => {
                let name = util::option(column.name.as_ref());
                let order = util::option(column.order.as_ref());
                let type_name = util::option(column.type_name.as_ref());

                quote!(Some(#joinery::app::ColumnAttr {
                    name: #name,
                    order: #order,
                    type_name: #type_name,
                }))
            }
            (_, None) => quote!(None),
        };

        let key = match &field.key {
            Some(key) => {
                let auto = key.auto;
                let order = util::option(key.order.as_ref());
                quote!(Some(#joinery::app::KeyAttr { auto: #auto, order: #order }))
            }
            None => quote!(None),
        };

        quote! {
            #joinery::app::Field {
                name: #name,
                ty: #ty,
                column: #column,
                key: #key,
                not_mapped: #not_mapped,
            }
        }
    }
}
