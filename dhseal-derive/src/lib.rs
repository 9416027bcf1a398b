use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

// SILENT DEBUG MACRO
// ================================================================================================

/// Derives a Debug implementation that elides secret values.
///
/// The generated implementation writes `<elided secret for TypeName>` instead of the field
/// values, so key material cannot end up in logs, panic messages or error chains by way of a
/// stray `{:?}`.
///
/// # Example
///
/// ```ignore
/// #[derive(SilentDebug)]
/// pub struct SharedSecret {
///     inner: [u8; 32],
/// }
///
/// let secret = SharedSecret { inner: [0u8; 32] };
/// assert_eq!(format!("{:?}", secret), "<elided secret for SharedSecret>");
/// ```
#[proc_macro_derive(SilentDebug)]
pub fn silent_debug(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    expand_silent_impl(&ast, quote!(::core::fmt::Debug))
}

// SILENT DISPLAY MACRO
// ================================================================================================

/// Derives a Display implementation that elides secret values.
///
/// Displaying a secret is almost always a mistake, but generic code (error reporting, CLI
/// output) sometimes requires `Display`. The generated implementation prints the same
/// placeholder as [`SilentDebug`](macro@SilentDebug).
#[proc_macro_derive(SilentDisplay)]
pub fn silent_display(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    expand_silent_impl(&ast, quote!(::core::fmt::Display))
}

// HELPERS
// ================================================================================================

fn expand_silent_impl(ast: &DeriveInput, fmt_trait: proc_macro2::TokenStream) -> TokenStream {
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics #fmt_trait for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "<elided secret for {}>", stringify!(#name))
            }
        }
    };

    TokenStream::from(expanded)
}
