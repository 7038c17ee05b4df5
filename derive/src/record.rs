use proc_macro::TokenStream;
use proc_macro2::Literal;
use quote::quote;
use serde_derive_internals::{ast, Ctxt, Derive};
use std::collections::HashMap;
use syn::ext::IdentExt;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, GenericParam, Generics, Ident, LitStr};

pub fn derive_record_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match RecordDescription::parse(&input) {
        Ok(description) => description.expand().into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct RecordField {
    ident: Ident,
    name: String,
    external_name: String,
}

/// Everything the expansion needs about the deriving struct.
struct RecordDescription {
    name: Ident,
    generics: Generics,
    fields: Vec<RecordField>,
}

#[derive(Default)]
struct FieldAttrs {
    skip: bool,
    rename: Option<String>,
}

impl RecordDescription {
    fn parse(input: &DeriveInput) -> syn::Result<Self> {
        let name = input.ident.clone();

        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => fields.named.clone(),
                fields => return Err(syn::Error::new_spanned(fields, "Record can only be derived for structs with named fields")),
            },
            _ => return Err(syn::Error::new_spanned(&name, "Record can only be derived for structs")),
        };

        let serde_names = serde_names(input)?;

        let mut record_fields = Vec::new();
        for field in fields {
            let Some(ident) = field.ident.clone() else { continue };
            let attrs = field_attrs(&field.attrs)?;
            if attrs.skip {
                continue;
            }
            let field_name = ident.unraw().to_string();
            let external_name = attrs.rename.or_else(|| serde_names.get(&field_name).cloned()).unwrap_or_else(|| field_name.clone());
            record_fields.push(RecordField { ident, name: field_name, external_name });
        }

        let mut generics = input.generics.clone();
        let type_params: Vec<Ident> = generics
            .params
            .iter()
            .filter_map(|param| match param {
                GenericParam::Type(ty) => Some(ty.ident.clone()),
                _ => None,
            })
            .collect();
        if !type_params.is_empty() {
            let where_clause = generics.make_where_clause();
            for param in type_params {
                where_clause.predicates.push(parse_quote!(#param: ::verity::ToValue));
            }
        }

        Ok(Self { name, generics, fields: record_fields })
    }

    fn expand(&self) -> proc_macro2::TokenStream {
        let name = &self.name;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let idents: Vec<&Ident> = self.fields.iter().map(|field| &field.ident).collect();
        let names: Vec<&str> = self.fields.iter().map(|field| field.name.as_str()).collect();
        let external_names: Vec<&str> = self.fields.iter().map(|field| field.external_name.as_str()).collect();
        let indexes: Vec<Literal> = (0..self.fields.len()).map(Literal::usize_unsuffixed).collect();

        quote! {
            #[automatically_derived]
            impl #impl_generics ::verity::Record for #name #ty_generics #where_clause {
                fn value(&self, name: &str) -> ::std::option::Option<::verity::Value> {
                    match name {
                        #( #names => ::std::option::Option::Some(::verity::ToValue::to_value(&self.#idents)), )*
                        _ => ::std::option::Option::None,
                    }
                }

                fn external_name<'a>(&self, name: &'a str) -> ::std::borrow::Cow<'a, str> {
                    match name {
                        #( #names => ::std::borrow::Cow::Borrowed(#external_names), )*
                        _ => ::std::borrow::Cow::Borrowed(name),
                    }
                }
            }

            #[automatically_derived]
            impl #impl_generics ::verity::Schema for #name #ty_generics #where_clause {
                fn fields() -> &'static [::verity::FieldDescriptor] {
                    const FIELDS: &[::verity::FieldDescriptor] = &[
                        #( ::verity::FieldDescriptor { name: #names, external_name: #external_names }, )*
                    ];
                    FIELDS
                }

                fn value_at(&self, index: usize) -> ::std::option::Option<::verity::Value> {
                    match index {
                        #( #indexes => ::std::option::Option::Some(::verity::ToValue::to_value(&self.#idents)), )*
                        _ => ::std::option::Option::None,
                    }
                }
            }
        }
    }
}

/// Serialized names of the struct's fields, keyed by field name, with `rename` and `rename_all` applied.
fn serde_names(input: &DeriveInput) -> syn::Result<HashMap<String, String>> {
    let ctxt = Ctxt::new();
    let names = ast::Container::from_ast(&ctxt, input, Derive::Serialize).map(|container| match &container.data {
        ast::Data::Struct(_, fields) => fields
            .iter()
            .filter_map(|field| match &field.member {
                syn::Member::Named(ident) => Some((ident.unraw().to_string(), field.attrs.name().serialize_name().to_string())),
                syn::Member::Unnamed(_) => None,
            })
            .collect::<HashMap<_, _>>(),
        ast::Data::Enum(_) => HashMap::new(),
    });
    ctxt.check()?;
    Ok(names.unwrap_or_default())
}

fn field_attrs(attrs: &[syn::Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                parsed.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let name: LitStr = meta.value()?.parse()?;
                parsed.rename = Some(name.value());
                Ok(())
            } else {
                Err(meta.error("unsupported record attribute, expected `skip` or `rename = \"...\"`"))
            }
        })?;
    }
    Ok(parsed)
}
