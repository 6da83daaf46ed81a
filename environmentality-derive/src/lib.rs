//! Derive macro implementation for environmentality

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use std::collections::HashSet;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type};

mod attrs;

use attrs::{FieldAttrs, StructAttrs};

/// Extract inner type from `Option<T>`, if `ty` is one
fn option_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let seg = type_path.path.segments.last()?;
    if seg.ident != "Option" {
        return None;
    }
    if let syn::PathArguments::AngleBracketed(args) = &seg.arguments {
        if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
            return Some(inner);
        }
    }
    None
}

/// `Environmentality` derive macro
///
/// Generates the property declarations for a struct and the functions that
/// resolve them into an instance.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[env(prefix = "PREFIX_")]`: Add prefix to all env var names
/// - `#[env(case_insensitive)]`: Match env var names ignoring case
///
/// **Field-level**:
/// - `#[env(name = "CUSTOM_NAME")]`: Custom environment variable name
/// - `#[env(default)]`: Use `Default::default()` if env var not set
/// - `#[env(default = value)]`: Use explicit default value if env var not set
/// - `#[env(enum_values = [a, b])]`: Restrict the value (or every element) to a set
/// - `#[env(from_file)]`: Support `{VAR}_FILE` pattern
///
/// `Option<T>` fields are optional; all other fields are required unless
/// they have a default. Each variable name, after the prefix is applied,
/// may be bound to only one field.
///
/// # Generated functions
///
/// - `declarations()`: the property declarations, in field order
/// - `from_snapshot_with(&Snapshot, Options)`: resolve with explicit options
/// - `from_snapshot(&Snapshot)`: resolve, returning all errors
/// - `from_env_with(ErrorPolicy)`: resolve the process environment under a policy
/// - `from_env()`: resolve the process environment, returning all errors
/// - `from_env_or_exit()`: resolve the process environment, printing the
///   report and exiting on any error
#[proc_macro_derive(Environmentality, attributes(env))]
pub fn derive_environmentality(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let struct_attrs = StructAttrs::from_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Environmentality only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Environmentality only supports structs",
            ));
        }
    };

    let mut declarations = Vec::with_capacity(fields.len());
    let mut field_initializers = Vec::with_capacity(fields.len());
    let mut seen_names = HashSet::with_capacity(fields.len());

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let field_type = &field.ty;
        let attrs = FieldAttrs::from_field(field)?;

        let option_inner = option_inner_type(field_type);
        if option_inner.is_some() && attrs.default.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "Option<T> fields cannot have default attribute (they default to None automatically)",
            ));
        }
        let value_type = option_inner.unwrap_or(field_type);

        let base_name = attrs
            .name
            .unwrap_or_else(|| field_name.unraw().to_string().to_uppercase());
        let env_var_name = format!("{}{}", struct_attrs.prefix, base_name);
        if !seen_names.insert(env_var_name.clone()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("environment variable {env_var_name} is bound to more than one field"),
            ));
        }

        let optional = option_inner.map(|_| quote! { .optional() });
        let from_file = attrs.from_file.then(|| quote! { .from_file() });
        let default = attrs.default.map(|default| {
            let expr = match default {
                Some(expr) => quote! { #expr },
                None => quote! { ::core::default::Default::default() },
            };
            quote! {
                .with_default({
                    let __default: #value_type = #expr;
                    ::environmentality::EnvValue::into_value(__default)
                })
            }
        });
        let enum_values = attrs.enum_values.map(|elems| {
            quote! {
                .enum_values::<_, ::environmentality::Value>(::std::vec![
                    #(::environmentality::Value::from(#elems)),*
                ])
            }
        });

        declarations.push(quote! {
            ::environmentality::de::declare::<#value_type>(#env_var_name)
                #optional #from_file #default #enum_values
        });

        let take = if option_inner.is_some() {
            quote! { ::environmentality::de::take_optional::<#value_type>(&mut __values, #env_var_name)? }
        } else {
            quote! { ::environmentality::de::take_required::<#value_type>(&mut __values, #env_var_name)? }
        };
        field_initializers.push(quote! { #field_name: #take });
    }

    let case = if struct_attrs.case_insensitive {
        quote! { ::environmentality::CaseMode::Insensitive }
    } else {
        quote! { ::environmentality::CaseMode::Sensitive }
    };

    Ok(quote! {
        impl #struct_name {
            /// Property declarations for this struct, in field order
            pub fn declarations() -> ::std::vec::Vec<::environmentality::PropertyDeclaration> {
                ::std::vec![#(#declarations),*]
            }

            /// Load configuration from a snapshot with explicit options
            ///
            /// # Errors
            ///
            /// - Any property failed validation (after the error policy ran)
            /// - A resolved value does not fit its field type
            pub fn from_snapshot_with(
                snapshot: &::environmentality::Snapshot,
                options: ::environmentality::Options,
            ) -> ::core::result::Result<Self, ::environmentality::EnvError> {
                let mut __values = ::environmentality::de::resolve_all(
                    &Self::declarations(),
                    snapshot,
                    options,
                )?;
                Ok(Self {
                    #(#field_initializers),*
                })
            }

            /// Load configuration from a snapshot, returning every error
            pub fn from_snapshot(
                snapshot: &::environmentality::Snapshot,
            ) -> ::core::result::Result<Self, ::environmentality::EnvError> {
                Self::from_snapshot_with(
                    snapshot,
                    ::environmentality::Options::collecting().case(#case),
                )
            }

            /// Load configuration from environment variables under an error policy
            pub fn from_env_with(
                policy: ::environmentality::ErrorPolicy,
            ) -> ::core::result::Result<Self, ::environmentality::EnvError> {
                Self::from_snapshot_with(
                    &::environmentality::Snapshot::from_env(),
                    ::environmentality::Options::default().case(#case).policy(policy),
                )
            }

            /// Load configuration from environment variables
            ///
            /// # Errors
            ///
            /// - Required environment variables are not set
            /// - Environment variable values fail type or enum validation
            /// - File-based values fail to read
            pub fn from_env() -> ::environmentality::anyhow::Result<Self> {
                Ok(Self::from_snapshot(&::environmentality::Snapshot::from_env())?)
            }

            /// Load configuration from environment variables, exiting the
            /// process with a report on any error
            pub fn from_env_or_exit() -> Self {
                ::environmentality::de::or_exit(Self::from_snapshot_with(
                    &::environmentality::Snapshot::from_env(),
                    ::environmentality::Options::default().case(#case),
                ))
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_expand_named_struct() {
        let input: DeriveInput = parse_quote! {
            #[env(prefix = "APP_")]
            struct Config {
                host: String,
                port: Option<u16>,
            }
        };

        let tokens = expand(&input).unwrap().to_string();
        assert!(tokens.contains("\"APP_HOST\""));
        assert!(tokens.contains("\"APP_PORT\""));
    }

    #[test]
    fn test_duplicate_variable_name_is_error() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[env(name = "SHARED")]
                first: String,
                #[env(name = "SHARED")]
                second: String,
            }
        };

        let err = expand(&input).unwrap_err();
        assert!(err.to_string().contains("SHARED"));
    }

    #[test]
    fn test_field_name_colliding_with_custom_name_is_error() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                host: String,
                #[env(name = "HOST")]
                other_host: String,
            }
        };

        assert!(expand(&input).is_err());
    }

    #[test]
    fn test_default_on_option_is_error() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[env(default)]
                port: Option<u16>,
            }
        };

        assert!(expand(&input).is_err());
    }
}
