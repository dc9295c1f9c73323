//! `CopyModel` generation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Path};

use super::derive::FieldInfo;

/// Generate the field-wise `CopyModel` impl for the copy candidates.
pub(super) fn generate_copy_impl(
    input: &DeriveInput,
    krate: &Path,
    fields: &[FieldInfo],
) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let copies = fields.iter().filter(|f| f.copy).map(|f| {
        let ident = &f.ident;
        let field_name = &f.name;
        quote! {
            if !ignored.contains(&#field_name) {
                changed |= #krate::copy_field(&mut self.#ident, &src.#ident);
            }
        }
    });

    quote! {
        impl #impl_generics #krate::CopyModel for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn copy_from(&mut self, src: &Self, ignored: &[&str]) -> bool {
                #[allow(unused_mut)]
                let mut changed = false;
                #(#copies)*
                changed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::derive::derive_model_impl;
    use syn::{DeriveInput, parse_quote};

    #[test]
    fn test_copy_skips_private_and_skipped_fields() {
        let input: DeriveInput = parse_quote! {
            struct Item {
                pub guid: String,
                pub title: String,
                etag: String,
                #[model(skip_copy)]
                pub fetched: bool,
            }
        };

        let code = derive_model_impl(&input).unwrap().to_string();
        assert!(code.contains("& mut self . guid"));
        assert!(code.contains("& mut self . title"));
        assert!(!code.contains("& mut self . etag"));
        assert!(!code.contains("& mut self . fetched"));
    }

    #[test]
    fn test_copy_checks_ignored_by_field_name() {
        let input: DeriveInput = parse_quote! {
            struct Item {
                pub r#type: String,
            }
        };

        let code = derive_model_impl(&input).unwrap().to_string();
        assert!(code.contains("ignored . contains (& \"type\")"));
        assert!(code.contains("self . r#type"));
    }
}
