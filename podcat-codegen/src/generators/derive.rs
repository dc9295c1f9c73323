//! Implementation of the `#[derive(Model)]` macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Path, Visibility};

use super::copy::generate_copy_impl;

/// Parse and generate code for the `#[derive(Model)]` macro.
pub fn derive_model_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Model derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Model derive only supports structs",
            ));
        }
    };

    let struct_attrs = parse_struct_attrs(input)?;
    let krate = struct_attrs
        .krate
        .unwrap_or_else(|| syn::parse_quote!(::podcat_model));
    let model_name = struct_attrs.name.unwrap_or_else(|| name.to_string());

    let field_infos: Vec<FieldInfo> = fields.iter().map(parse_field).collect::<Result<_, _>>()?;

    let field_tags = field_infos.iter().map(|f| {
        let field = &f.name;
        let json = &f.json;
        let bson = &f.bson;
        let index = &f.index;
        let nested = match &f.nested {
            Some(ty) => quote! { ::core::option::Option::Some(<#ty as #krate::Model>::model_info) },
            None => quote! { ::core::option::Option::None },
        };
        quote! {
            #krate::FieldTags {
                field: #field,
                json: #json,
                bson: #bson,
                index: #index,
                nested: #nested,
            }
        }
    });

    let copy_impl = generate_copy_impl(input, &krate, &field_infos);
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::Model for #name #ty_generics #where_clause {
            const MODEL_NAME: &'static str = #model_name;
            const FIELD_TAGS: &'static [#krate::FieldTags] = &[
                #(#field_tags),*
            ];
        }

        #copy_impl
    })
}

/// Struct-level attributes parsed from `#[model(...)]`.
#[derive(Debug, Default)]
struct StructAttrs {
    name: Option<String>,
    krate: Option<Path>,
}

/// Parse struct-level `#[model(...)]` attributes.
fn parse_struct_attrs(input: &DeriveInput) -> Result<StructAttrs, syn::Error> {
    let mut attrs = StructAttrs::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("model") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.name = Some(value.value());
            } else if meta.path.is_ident("crate") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.krate = Some(value.parse()?);
            } else {
                return Err(meta.error("unknown model attribute"));
            }
            Ok(())
        })?;
    }

    Ok(attrs)
}

/// Information about a field.
#[derive(Debug)]
pub(super) struct FieldInfo {
    pub(super) ident: Ident,
    /// Field name without the raw identifier prefix.
    pub(super) name: String,
    pub(super) json: String,
    pub(super) bson: String,
    pub(super) index: String,
    /// Embedded record type rendered through its own descriptor.
    pub(super) nested: Option<Path>,
    /// Candidate for change-copy.
    pub(super) copy: bool,
}

/// Parse a field and its `#[model(...)]` attributes.
fn parse_field(field: &syn::Field) -> Result<FieldInfo, syn::Error> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "Fields must be named"))?;

    let mut json = String::new();
    let mut bson = String::new();
    let mut index = String::new();
    let mut nested = None;
    let mut skip_copy = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("model") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("json") {
                let value: LitStr = meta.value()?.parse()?;
                json = value.value();
            } else if meta.path.is_ident("bson") {
                let value: LitStr = meta.value()?.parse()?;
                bson = value.value();
            } else if meta.path.is_ident("index") {
                let value: LitStr = meta.value()?.parse()?;
                index = value.value();
            } else if meta.path.is_ident("nested") {
                let value: LitStr = meta.value()?.parse()?;
                nested = Some(value.parse::<Path>()?);
            } else if meta.path.is_ident("skip_copy") {
                skip_copy = true;
            } else {
                return Err(meta.error("unknown model field attribute"));
            }
            Ok(())
        })?;
    }

    Ok(FieldInfo {
        name: ident.unraw().to_string(),
        ident,
        json,
        bson,
        index,
        nested,
        copy: is_public(&field.vis) && !skip_copy,
    })
}

/// Only `pub` fields take part in change-copy.
fn is_public(vis: &Visibility) -> bool {
    matches!(vis, Visibility::Public(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use syn::parse_quote;

    #[test]
    fn test_derive_simple_model() {
        let input: DeriveInput = parse_quote! {
            struct Episode {
                #[model(json = "id", bson = "_id,omitempty")]
                pub id: Option<u32>,
                #[model(json = "title", bson = "title", index = "title_idx,unique")]
                pub title: String,
            }
        };

        let code = derive_model_impl(&input).unwrap().to_string();
        assert!(code.contains(":: podcat_model :: Model for Episode"));
        assert!(code.contains("\"_id,omitempty\""));
        assert!(code.contains("\"title_idx,unique\""));
        assert!(code.contains(":: podcat_model :: CopyModel for Episode"));
    }

    #[test]
    fn test_derive_custom_name_and_crate() {
        let input: DeriveInput = parse_quote! {
            #[model(name = "Podcast", crate = "podcat::model")]
            struct Feed {
                #[model(json = "url", bson = "url")]
                pub url: String,
            }
        };

        let code = derive_model_impl(&input).unwrap().to_string();
        assert!(code.contains("podcat :: model :: Model for Feed"));
        assert!(code.contains("\"Podcast\""));
    }

    #[test]
    fn test_derive_nested_record() {
        let input: DeriveInput = parse_quote! {
            struct Feed {
                #[model(json = "items", bson = "items", nested = "crate::Item")]
                pub items: Vec<Item>,
                #[model(json = "title", bson = "title")]
                pub title: String,
            }
        };

        let code = derive_model_impl(&input).unwrap().to_string();
        assert!(code.contains("crate :: Item as :: podcat_model :: Model"));
        assert!(code.contains("model_info"));
        assert_eq!(code.matches(":: core :: option :: Option :: None").count(), 1);
    }

    #[test]
    fn test_derive_rejects_tuple_struct() {
        let input: DeriveInput = parse_quote! {
            struct Pair(u32, u32);
        };
        assert!(derive_model_impl(&input).is_err());
    }

    #[test]
    fn test_derive_rejects_enum() {
        let input: DeriveInput = parse_quote! {
            enum Kind { A, B }
        };
        assert!(derive_model_impl(&input).is_err());
    }

    #[test]
    fn test_unknown_field_attribute() {
        let input: DeriveInput = parse_quote! {
            struct Bad {
                #[model(column = "x")]
                pub x: u32,
            }
        };
        assert!(derive_model_impl(&input).is_err());
    }

    #[test]
    fn test_parse_field_visibility_and_raw_ident() {
        let field: syn::Field = parse_quote! {
            #[model(json = "type", bson = "type")]
            pub r#type: String
        };
        let info = parse_field(&field).unwrap();
        assert_eq!(info.name, "type");
        assert!(info.copy);

        let field: syn::Field = parse_quote! {
            #[model(json = "etag", bson = "etag")]
            etag: String
        };
        assert!(!parse_field(&field).unwrap().copy);

        let field: syn::Field = parse_quote! {
            #[model(skip_copy)]
            pub cached: String
        };
        let info = parse_field(&field).unwrap();
        assert!(!info.copy);
        assert!(info.json.is_empty());
    }
}
