//! Procedural macros for Elemental.
//!
//! Use through the `elemental` crate with the `macros` feature enabled.

use proc_macro::TokenStream;

mod component;

/// Derive macro binding a type to a component namespace.
///
/// Implements `elemental::Tagged`, giving the type a `TAG` constant and an
/// `event(bare)` helper. The tag is checked at compile time.
///
/// ```rust,ignore
/// #[derive(elemental::Component)]
/// #[component(tag = "color-picker")]
/// struct ColorPicker;
///
/// assert_eq!(ColorPicker::event("change"), "color-picker:change");
/// ```
#[proc_macro_derive(Component, attributes(component))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    component::derive_component_impl(input)
}

/// Turn a function into an `EventListener` unit struct of the same name.
///
/// The function takes `&Event<D>` and returns `()` or `Result<(), E>`.
///
/// ```rust,ignore
/// #[elemental::listener]
/// fn on_change(event: &Event<String>) {
///     println!("{:?}", event.detail());
/// }
///
/// let handle = ListenerRef::new(on_change);
/// ```
#[proc_macro_attribute]
pub fn listener(attr: TokenStream, item: TokenStream) -> TokenStream {
    component::listener_impl(attr, item)
}
