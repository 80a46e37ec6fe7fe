use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

mod node_meta;
use node_meta::{parse_node_info, parse_params, parse_ports};

/// Derives `crate::registry::NodeClass` from `#[node_meta]`, `#[input]`,
/// `#[output]` and `#[param]` attributes. The struct must implement
/// `Default` and `ProcessingNode`.
#[proc_macro_derive(SwarmNode, attributes(node_meta, param, input, output))]
pub fn derive_swarm_node(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let node_info = match parse_node_info(&input) {
        Ok(info) => info,
        Err(e) => return e.write_errors().into(),
    };

    let params = match parse_params(&input) {
        Ok(params) => params,
        Err(e) => return e.write_errors().into(),
    };

    let (inputs, outputs) = match parse_ports(&input) {
        Ok(ports) => ports,
        Err(e) => return e.write_errors().into(),
    };

    let struct_name = &input.ident;
    let node_key = node_info.key.clone().unwrap_or_else(|| struct_name.to_string());
    let node_name = &node_info.name;
    let category = &node_info.category;
    let function = node_info.function.as_deref().unwrap_or("process");

    let param_schemas = params.iter().filter_map(|f| {
        let field_name = f.ident.as_ref()?.to_string();
        let default_val = f.default.as_deref().unwrap_or("null");
        let type_name = host_type_tag(&f.ty);
        let min = option_tokens(f.min);
        let max = option_tokens(f.max);

        Some(quote! {
            crate::registry::ParameterSchema {
                name: #field_name.to_string(),
                param_type: #type_name.to_string(),
                default: serde_json::from_str(#default_val).unwrap_or(serde_json::Value::Null),
                min: #min,
                max: #max,
            }
        })
    });

    let input_metas = inputs.iter().map(|port| {
        let port_id = port.id();
        let port_name = port.name.clone().unwrap_or_else(|| port_id.clone());
        let data_type = port.data_type.as_deref().unwrap_or("*");
        let optional = port.optional;

        quote! {
            crate::registry::PortMetadata {
                id: #port_id.to_string(),
                name: #port_name.to_string(),
                data_type: #data_type.to_string(),
                optional: #optional,
            }
        }
    });

    let output_metas = outputs.iter().map(|port| {
        let port_id = port.id();
        let port_name = port.name.clone().unwrap_or_else(|| port_id.clone());
        let data_type = port.data_type.as_deref().unwrap_or("*");

        quote! {
            crate::registry::PortMetadata {
                id: #port_id.to_string(),
                name: #port_name.to_string(),
                data_type: #data_type.to_string(),
                optional: false,
            }
        }
    });

    let expanded = quote! {
        impl crate::registry::NodeClass for #struct_name {
            fn descriptor() -> crate::registry::NodeDescriptor {
                crate::registry::NodeDescriptor {
                    key: #node_key.to_string(),
                    name: #node_name.to_string(),
                    category: #category.to_string(),
                    function: #function.to_string(),
                    inputs: vec![#(#input_metas),*],
                    outputs: vec![#(#output_metas),*],
                    parameters: vec![#(#param_schemas),*],
                    factory: || Box::new(<#struct_name as ::std::default::Default>::default()),
                }
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

fn host_type_tag(ty: &syn::Type) -> &'static str {
    let type_str = quote!(#ty).to_string();

    if type_str.contains("f64") || type_str.contains("f32") {
        "FLOAT"
    } else if type_str.contains("u32") || type_str.contains("i32")
        || type_str.contains("u64") || type_str.contains("i64")
        || type_str.contains("usize") || type_str.contains("isize") {
        "INT"
    } else if type_str.contains("bool") {
        "BOOLEAN"
    } else if type_str.contains("String") || type_str.contains("str") {
        "STRING"
    } else {
        "*"
    }
}
