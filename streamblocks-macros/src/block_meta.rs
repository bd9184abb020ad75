use darling::{FromAttributes, FromField};
use syn::{DeriveInput, Fields};

/// Parsed attributes from #[block_meta(...)]
#[derive(Debug, FromAttributes)]
#[darling(attributes(block_meta))]
pub struct BlockMetaArgs {
    /// Registry key used in pipeline configs; defaults to the lowercased struct name
    #[darling(default)]
    pub id: Option<String>,
    pub name: String,
    pub category: String,
}

/// Parsed attributes from #[param(...)]
#[derive(Debug, FromField)]
#[darling(attributes(param))]
pub struct ParamField {
    pub ident: Option<syn::Ident>,
    pub ty: syn::Type,

    /// JSON literal for the default value
    #[darling(default)]
    pub default: Option<String>,

    /// Overrides the type name inferred from the field type
    #[darling(default)]
    pub kind: Option<String>,

    #[darling(default)]
    pub min: Option<f64>,

    #[darling(default)]
    pub max: Option<f64>,
}

pub fn parse_block_info(input: &DeriveInput) -> darling::Result<BlockMetaArgs> {
    BlockMetaArgs::from_attributes(&input.attrs)
}

pub fn parse_params(input: &DeriveInput) -> darling::Result<Vec<ParamField>> {
    let fields = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => return Ok(Vec::new()),
        },
        _ => {
            return Err(darling::Error::custom(
                "StreamBlock can only be derived for structs",
            ))
        }
    };

    fields
        .iter()
        .filter(|f| f.attrs.iter().any(|attr| attr.path().is_ident("param")))
        .map(ParamField::from_field)
        .collect()
}
