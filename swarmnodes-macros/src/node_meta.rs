use darling::{FromAttributes, FromField};
use syn::{DeriveInput, Fields};

/// Parsed attributes from #[node_meta(...)]
#[derive(Debug, FromAttributes)]
#[darling(attributes(node_meta))]
pub struct NodeMetaArgs {
    /// Registry key; defaults to the struct name
    #[darling(default)]
    pub key: Option<String>,
    pub name: String,
    pub category: String,
    #[darling(default)]
    pub function: Option<String>,
}

/// Parsed attributes from #[param(...)]
#[derive(Debug, FromField)]
#[darling(attributes(param))]
pub struct ParamField {
    pub ident: Option<syn::Ident>,
    pub ty: syn::Type,

    #[darling(default)]
    pub default: Option<String>,

    #[darling(default)]
    pub min: Option<f64>,

    #[darling(default)]
    pub max: Option<f64>,
}

/// Parsed attributes from #[input(...)] / #[output(...)]
#[derive(Debug, FromField)]
#[darling(attributes(input, output))]
pub struct PortField {
    pub ident: Option<syn::Ident>,

    #[darling(default)]
    pub name: Option<String>,

    #[darling(default)]
    pub data_type: Option<String>,

    #[darling(default)]
    pub optional: bool,
}

impl PortField {
    /// Port id: the field name without its leading underscore
    pub fn id(&self) -> String {
        self.ident
            .as_ref()
            .map(|ident| ident.to_string().trim_start_matches('_').to_string())
            .unwrap_or_default()
    }
}

pub fn parse_node_info(input: &DeriveInput) -> darling::Result<NodeMetaArgs> {
    NodeMetaArgs::from_attributes(&input.attrs)
}

fn named_fields(input: &DeriveInput) -> Vec<&syn::Field> {
    match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.iter().collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

pub fn parse_params(input: &DeriveInput) -> darling::Result<Vec<ParamField>> {
    named_fields(input)
        .into_iter()
        .filter(|f| f.attrs.iter().any(|attr| attr.path().is_ident("param")))
        .map(ParamField::from_field)
        .collect()
}

pub fn parse_ports(input: &DeriveInput) -> darling::Result<(Vec<PortField>, Vec<PortField>)> {
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();

    for field in named_fields(input) {
        if field.attrs.iter().any(|attr| attr.path().is_ident("input")) {
            inputs.push(PortField::from_field(field)?);
        }

        if field.attrs.iter().any(|attr| attr.path().is_ident("output")) {
            outputs.push(PortField::from_field(field)?);
        }
    }

    Ok((inputs, outputs))
}
