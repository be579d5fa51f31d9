use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use proc_macro_crate::{FoundCrate, crate_name};
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Field, Fields, LitStr, parse_macro_input};

#[proc_macro_derive(FormModel, attributes(form))]
pub fn derive_form_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            input.ident,
            "FormModel derive currently supports only non-generic structs",
        ));
    }

    let named_fields = match input.data {
        Data::Struct(data) => match data.fields {
            Fields::Named(fields) => fields.named,
            _ => {
                return Err(syn::Error::new(
                    Span::call_site(),
                    "FormModel derive requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new(
                Span::call_site(),
                "FormModel derive is only supported on structs",
            ));
        }
    };

    let model_ident = input.ident;
    let vis = input.vis;
    let fields_struct_ident = format_ident!("{model_ident}Fields");
    let formpanel = formpanel_path();

    let mut lens_defs = Vec::new();
    let mut fields_methods = Vec::new();
    let mut keys = Vec::new();

    for field in named_fields {
        let attrs = FieldAttrs::parse(&field)?;
        if attrs.skip {
            continue;
        }
        let Some(field_ident) = field.ident else {
            continue;
        };
        let field_ty = field.ty;
        let rust_name = field_ident.to_string();
        let rust_name = rust_name.trim_start_matches("r#");
        let key_name = attrs.rename.unwrap_or_else(|| rust_name.to_string());
        let lens_ident = format_ident!("{model_ident}{}Lens", to_pascal_case(rust_name));

        lens_defs.push(quote! {
            #[derive(Clone, Copy, Debug, Default)]
            #vis struct #lens_ident;

            impl #formpanel::form::FieldLens<#model_ident> for #lens_ident {
                type Value = #field_ty;

                fn key(self) -> #formpanel::form::FieldKey {
                    #formpanel::form::FieldKey::new(#key_name)
                }

                fn get<'a>(self, model: &'a #model_ident) -> &'a Self::Value {
                    &model.#field_ident
                }

                fn set(self, model: &mut #model_ident, value: Self::Value) {
                    model.#field_ident = value;
                }
            }
        });

        fields_methods.push(quote! {
            #vis const fn #field_ident(&self) -> #lens_ident {
                #lens_ident
            }
        });

        keys.push(quote! { #formpanel::form::FieldKey::new(#key_name) });
    }

    Ok(quote! {
        #[derive(Clone, Copy, Debug, Default)]
        #vis struct #fields_struct_ident;

        impl #fields_struct_ident {
            #(#fields_methods)*
        }

        impl #formpanel::form::FormModel for #model_ident {
            type Fields = #fields_struct_ident;

            fn fields() -> Self::Fields {
                #fields_struct_ident
            }

            fn field_keys() -> &'static [#formpanel::form::FieldKey] {
                const KEYS: &[#formpanel::form::FieldKey] = &[#(#keys),*];
                KEYS
            }
        }

        #(#lens_defs)*
    })
}

#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    skip: bool,
}

impl FieldAttrs {
    fn parse(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();
        for attr in &field.attrs {
            if !attr.path().is_ident("form") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    attrs.rename = Some(value.value());
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    attrs.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported form attribute, expected `rename` or `skip`"))
                }
            })?;
        }
        Ok(attrs)
    }
}

fn formpanel_path() -> TokenStream2 {
    match crate_name("formpanel") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Ok(FoundCrate::Itself) => quote!(crate),
        Err(_) => quote!(::formpanel),
    }
}

fn to_pascal_case(input: &str) -> String {
    let mut out = String::new();
    for segment in input.split('_') {
        if segment.is_empty() {
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
