//! Derive macro implementation for tagconf

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;

use attrs::{FieldAttrs, StructAttrs};

/// `TagConf` derive macro
///
/// Implements `tagconf::TagConf` (a walk over the fields in declaration
/// order) and `tagconf::Field` (so the struct can be nested in another).
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[conf(json)]`: Accept JSON objects as values of this struct type
///
/// **Field-level**:
/// - `#[conf(name = "value")]`: Any tag, e.g. `env = "PORT,required"`,
///   `default = 8080`, `separator = ":"`
/// - `#[conf(name)]`: Tag with value `"true"`, e.g. `expand`
/// - `#[conf(flatten)]`: Walk an embedded struct
/// - `#[conf(skip)]`: Never visit the field
///
/// # Example
///
/// See the `tagconf` crate documentation for usage examples.
#[proc_macro_derive(TagConf, attributes(conf))]
pub fn derive_tagconf(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let struct_attrs = StructAttrs::from_attrs(&input.attrs)?;

    let fields: Vec<&syn::Field> = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "TagConf only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "TagConf only supports structs",
            ));
        }
    };

    // One visit per field, in declaration order
    let mut visits = Vec::with_capacity(fields.len());
    for field in fields {
        let attrs = FieldAttrs::from_field(field)?;
        if attrs.skip {
            continue;
        }

        let Some(field_ident) = &field.ident else {
            continue;
        };
        let field_name = field_ident.unraw().to_string();
        let field_type = &field.ty;
        let tag_names = attrs.tags.iter().map(|(name, _)| name);
        let tag_values = attrs.tags.iter().map(|(_, value)| value);

        let visit = if attrs.flatten {
            quote! { __walker.flatten(&__field, &mut self.#field_ident)?; }
        } else {
            quote! { __walker.field(&__field, &mut self.#field_ident)?; }
        };

        visits.push(quote! {
            {
                let __field = ::tagconf::FieldDescriptor::new(
                    #field_name,
                    ::core::any::type_name::<#field_type>(),
                    &[#((#tag_names, #tag_values)),*],
                );
                #visit
            }
        });
    }

    let decode_json = struct_attrs.json.then(|| {
        quote! {
            fn decode_json(
                json: &str,
            ) -> ::core::option::Option<::core::result::Result<Self, ::tagconf::serde_json::Error>> {
                ::core::option::Option::Some(::tagconf::__private::decode_json::<Self>(json))
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::tagconf::TagConf for #struct_name #ty_generics #where_clause {
            fn walk(
                &mut self,
                __walker: &mut ::tagconf::Walker<'_>,
            ) -> ::core::result::Result<(), ::tagconf::ConfError> {
                #(#visits)*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics ::tagconf::Field for #struct_name #ty_generics #where_clause {
            fn as_struct(&mut self) -> ::core::option::Option<&mut dyn ::tagconf::TagConf> {
                ::core::option::Option::Some(self)
            }

            #decode_json
        }
    })
}
