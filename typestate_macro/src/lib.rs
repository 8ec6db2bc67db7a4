use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;
use syn::Error;
use syn::Result;
use syn::parse_macro_input;
use syn::spanned::Spanned;
use syn::{self};

/// Ensures the input is a `#[repr(u32)]` enum whose variants are all unit
/// variants with an explicit discriminant.
/// Returns the variant identifiers on success; on failure returns
/// `syn::Error` pointing at the offending item.
fn check_explicit_u32_enum(ast: &DeriveInput) -> Result<Vec<syn::Ident>> {
    let ident = &ast.ident;

    // Verify presence of #[repr(u32)]
    let mut is_u32 = false;
    for attr in &ast.attrs {
        if attr.path().is_ident("repr") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("u32") {
                    is_u32 = true;
                }
                Ok(())
            })?;
        }
    }

    let data = match &ast.data {
        syn::Data::Enum(e) => e,
        _ => {
            return Err(Error::new(
                ast.span(),
                "Only enums are supported by #[derive(RawReg)]",
            ));
        }
    };

    if !is_u32 {
        return Err(Error::new(
            ident.span(),
            "Enum must be #[repr(u32)] to #[derive(RawReg)]",
        ));
    }

    if data.variants.is_empty() {
        return Err(Error::new(
            ident.span(),
            "Enum must have at least one variant to #[derive(RawReg)]",
        ));
    }

    // Hardware encodings may have gaps, so every value is spelled out.
    let mut variants = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, syn::Fields::Unit) {
            return Err(Error::new(
                variant.fields.span(),
                "Variants must be unit variants to #[derive(RawReg)]",
            ));
        }
        if variant.discriminant.is_none() {
            return Err(Error::new(
                variant.ident.span(),
                "Variant needs an explicit discriminant (`= value`) to #[derive(RawReg)]",
            ));
        }
        variants.push(variant.ident.clone());
    }
    Ok(variants)
}

#[proc_macro_derive(RawReg)]
pub fn derive_rawreg(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    let ident = &ast.ident;

    let variants = match check_explicit_u32_enum(&ast) {
        Ok(v) => v,
        Err(e) => return e.to_compile_error().into(),
    };

    let expanded: proc_macro2::TokenStream = quote! {
        impl ::typestate::RawReg for #ident {
            #[inline]
            fn to_raw(self) -> u32 {
                self as u32
            }

            #[inline]
            fn try_from_raw(raw: u32) -> ::core::option::Option<Self> {
                #(
                    if raw == Self::#variants as u32 {
                        return ::core::option::Option::Some(Self::#variants);
                    }
                )*
                ::core::option::Option::None
            }
        }
    };
    expanded.into()
}
