use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

mod block_meta;
use block_meta::{parse_block_info, parse_params};

/// Registers a building block with the block registry.
///
/// The struct must implement `Default` and `BuildingBlock`; the registry
/// creates instances through `Default` and configures them with `on_create`.
#[proc_macro_derive(StreamBlock, attributes(block_meta, param))]
pub fn derive_stream_block(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let block_info = match parse_block_info(&input) {
        Ok(info) => info,
        Err(e) => return e.write_errors().into(),
    };

    let fields = match parse_params(&input) {
        Ok(fields) => fields,
        Err(e) => return e.write_errors().into(),
    };

    let struct_name = &input.ident;
    let block_id = block_info
        .id
        .clone()
        .unwrap_or_else(|| struct_name.to_string().to_lowercase());
    let block_name = &block_info.name;
    let category = &block_info.category;

    let params = fields.iter().filter_map(|f| {
        let field_name = f.ident.as_ref()?.to_string();
        let type_name = f
            .kind
            .clone()
            .unwrap_or_else(|| extract_type_name(&f.ty).to_string());

        let default = match &f.default {
            Some(literal) => quote! {
                ::serde_json::from_str::<::serde_json::Value>(#literal)
                    .unwrap_or_else(|_| ::serde_json::Value::String(#literal.to_string()))
            },
            None => quote! { ::serde_json::Value::Null },
        };
        let min = option_tokens(f.min);
        let max = option_tokens(f.max);

        Some(quote! {
            crate::registry::ParameterSchema {
                name: #field_name.to_string(),
                param_type: #type_name.to_string(),
                default: #default,
                min: #min,
                max: #max,
            }
        })
    });

    let lowered = struct_name.to_string().to_lowercase();
    let mod_name = syn::Ident::new(
        &format!("__block_registration_{}", lowered),
        struct_name.span(),
    );
    let factory_fn_name = syn::Ident::new(
        &format!("create_metadata_{}", lowered),
        struct_name.span(),
    );

    let expanded = quote! {
        #[doc(hidden)]
        mod #mod_name {
            use super::*;

            fn #factory_fn_name() -> crate::registry::BlockMetadata {
                crate::registry::BlockMetadata {
                    id: #block_id.to_string(),
                    name: #block_name.to_string(),
                    category: #category.to_string(),
                    parameters: vec![#(#params),*],
                    factory: || Box::new(#struct_name::default()),
                }
            }

            ::inventory::submit! {
                crate::registry::BlockMetadataFactoryWrapper(#factory_fn_name)
            }
        }
    };

    TokenStream::from(expanded)
}

fn option_tokens(value: Option<f64>) -> proc_macro2::TokenStream {
    match value {
        Some(v) => quote! { Some(#v) },
        None => quote! { None },
    }
}

fn extract_type_name(ty: &syn::Type) -> &'static str {
    let type_str = quote!(#ty).to_string();

    if type_str.contains("f64") || type_str.contains("f32") {
        "number"
    } else if type_str.contains("u32") || type_str.contains("i32")
        || type_str.contains("u64") || type_str.contains("i64")
        || type_str.contains("usize") || type_str.contains("isize") {
        "integer"
    } else if type_str.contains("String") || type_str.contains("str") {
        "string"
    } else if type_str.contains("bool") {
        "boolean"
    } else {
        "object"
    }
}
