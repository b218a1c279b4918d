//! Procedural macros for Tadbir.
//!
//! Use these through `tadbir-derive` or the `tadbir` facade.

use darling::FromDeriveInput;
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Options accepted in `#[behavior(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(behavior), supports(struct_any, enum_any))]
struct BehaviorOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    /// Registration name; defaults to the type name.
    #[darling(default)]
    name: Option<String>,
    /// Also submit a `BehaviorEntry` for compile-time discovery.
    #[darling(default)]
    discover: bool,
    /// Discovered entries are built per resolve instead of once.
    #[darling(default)]
    transient: bool,
    /// Path the generated code reaches the runtime through.
    #[darling(rename = "crate", default)]
    krate: Option<syn::Path>,
}

/// Derives `BehaviorKind`, giving a behavior its registration name.
///
/// ```rust,ignore
/// #[derive(Default, BehaviorKind)]
/// #[behavior(name = "card", discover)]
/// pub struct CreditCardSettlement;
/// ```
///
/// - `name = "..."`: register under this name instead of the type name
/// - `discover`: submit the type to `RegistryBuilder::discovered()`
///   (the type must implement `Default` and `SettlementBehavior`)
/// - `transient`: with `discover`, build a new instance per resolve
/// - `crate = "..."`: where the runtime lives; defaults to `tadbir`.
///   Crates that depend on `tadbir-container` without the facade
///   pass `crate = "tadbir_container"`.
#[proc_macro_derive(BehaviorKind, attributes(behavior))]
pub fn derive_behavior_kind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let opts = match BehaviorOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(err) => return err.write_errors().into(),
    };

    expand(opts).unwrap_or_else(syn::Error::into_compile_error).into()
}

fn expand(opts: BehaviorOpts) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &opts.ident;
    let kind = opts.name.clone().unwrap_or_else(|| ident.to_string());

    if kind.trim().is_empty() {
        return Err(syn::Error::new_spanned(ident, "behavior name must not be empty"));
    }
    if opts.transient && !opts.discover {
        return Err(syn::Error::new_spanned(
            ident,
            "`transient` only applies together with `discover`",
        ));
    }
    if opts.discover && !opts.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &opts.generics,
            "`discover` cannot be used on generic types",
        ));
    }

    let krate = opts
        .krate
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(::tadbir));
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let kind_impl = quote! {
        impl #impl_generics #krate::behavior::BehaviorKind for #ident #ty_generics #where_clause {
            const KIND: &'static str = #kind;
        }
    };

    if !opts.discover {
        return Ok(kind_impl);
    }

    let entry = if opts.transient {
        quote! { #krate::provider::BehaviorEntry::of::<#ident>().transient() }
    } else {
        quote! { #krate::provider::BehaviorEntry::of::<#ident>() }
    };

    Ok(quote! {
        #kind_impl

        #krate::__inventory::submit! { #entry }
    })
}
